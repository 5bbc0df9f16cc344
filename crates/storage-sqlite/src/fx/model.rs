//! Database models for exchange rates.

use std::str::FromStr;

use diesel::prelude::*;
use rust_decimal::Decimal;

use ratekeeper_core::fx::{ExchangeRate, NewExchangeRate};

use crate::currencies::CurrencyDB;
use crate::errors::StorageError;

/// Database model for exchange rates. The rate is stored as decimal text.
#[derive(Queryable, Identifiable, Associations, Selectable, PartialEq, Debug, Clone)]
#[diesel(belongs_to(CurrencyDB, foreign_key = currency_id))]
#[diesel(table_name = crate::schema::exchange_rate)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ExchangeRateDB {
    pub id: i32,
    pub currency_id: i32,
    pub nominal: i32,
    pub rate: String,
}

/// Database model for creating a new exchange rate
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::exchange_rate)]
pub struct NewExchangeRateDB {
    pub currency_id: i32,
    pub nominal: i32,
    pub rate: String,
}

impl TryFrom<ExchangeRateDB> for ExchangeRate {
    type Error = StorageError;

    fn try_from(db: ExchangeRateDB) -> Result<Self, Self::Error> {
        let rate = Decimal::from_str(&db.rate).map_err(|e| {
            StorageError::SerializationError(format!(
                "rate '{}' of exchange rate {}: {}",
                db.rate, db.id, e
            ))
        })?;
        Ok(Self {
            id: db.id,
            currency_id: db.currency_id,
            nominal: db.nominal,
            rate,
        })
    }
}

impl From<NewExchangeRate> for NewExchangeRateDB {
    fn from(domain: NewExchangeRate) -> Self {
        Self {
            currency_id: domain.currency_id,
            nominal: domain.nominal,
            rate: domain.rate.to_string(),
        }
    }
}
