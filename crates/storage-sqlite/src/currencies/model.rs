//! Database models for currencies.

use diesel::prelude::*;

use ratekeeper_core::currencies::{Currency, NewCurrency};

/// Database model for currencies
#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::currency)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CurrencyDB {
    pub id: i32,
    pub code: String,
    pub full_name: String,
    pub sign: String,
}

/// Database model for creating a new currency
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::currency)]
pub struct NewCurrencyDB {
    pub code: String,
    pub full_name: String,
    pub sign: String,
}

impl From<CurrencyDB> for Currency {
    fn from(db: CurrencyDB) -> Self {
        Self {
            id: db.id,
            code: db.code,
            full_name: db.full_name,
            sign: db.sign,
        }
    }
}

impl From<NewCurrency> for NewCurrencyDB {
    fn from(domain: NewCurrency) -> Self {
        Self {
            code: domain.code,
            full_name: domain.full_name,
            sign: domain.sign,
        }
    }
}
