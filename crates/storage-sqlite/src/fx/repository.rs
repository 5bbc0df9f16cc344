use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use ratekeeper_core::errors::{EntityKind, Error, StorageOp};
use ratekeeper_core::fx::{ExchangeRate, ExchangeRateRepositoryTrait, NewExchangeRate};
use ratekeeper_core::Result;

use super::model::{ExchangeRateDB, NewExchangeRateDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{currency, exchange_rate};

pub struct ExchangeRateRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ExchangeRateRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        ExchangeRateRepository { pool, writer }
    }
}

/// Error key for a rate: the code of its currency when it can still be read.
fn currency_key(conn: &mut SqliteConnection, currency_id: i32) -> String {
    currency::table
        .find(currency_id)
        .select(currency::code)
        .first::<String>(conn)
        .unwrap_or_else(|_| currency_id.to_string())
}

fn to_domain(row: ExchangeRateDB) -> Result<ExchangeRate> {
    Ok(ExchangeRate::try_from(row)?)
}

#[async_trait]
impl ExchangeRateRepositoryTrait for ExchangeRateRepository {
    fn list(&self) -> Result<Vec<ExchangeRate>> {
        let mut conn = get_connection(&self.pool)?;
        exchange_rate::table
            .order(exchange_rate::id.asc())
            .select(ExchangeRateDB::as_select())
            .load::<ExchangeRateDB>(&mut conn)
            .map_err(StorageError::from)?
            .into_iter()
            .map(to_domain)
            .collect()
    }

    fn get_by_currency_id(&self, currency_id: i32) -> Result<Option<ExchangeRate>> {
        let mut conn = get_connection(&self.pool)?;
        exchange_rate::table
            .filter(exchange_rate::currency_id.eq(currency_id))
            .select(ExchangeRateDB::as_select())
            .first::<ExchangeRateDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .map(to_domain)
            .transpose()
    }

    fn exists_by_currency_id(&self, currency_id: i32) -> Result<bool> {
        let mut conn = get_connection(&self.pool)?;
        Ok(diesel::select(exists(
            exchange_rate::table.filter(exchange_rate::currency_id.eq(currency_id)),
        ))
        .get_result::<bool>(&mut conn)
        .map_err(StorageError::from)?)
    }

    async fn insert(&self, new_rate: NewExchangeRate) -> Result<ExchangeRate> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<ExchangeRate> {
                let currency_id = new_rate.currency_id;
                let result = diesel::insert_into(exchange_rate::table)
                    .values(NewExchangeRateDB::from(new_rate))
                    .returning(ExchangeRateDB::as_returning())
                    .get_result(conn);
                match result {
                    Ok(row) => to_domain(row),
                    Err(e) => {
                        let key = currency_key(conn, currency_id);
                        Err(StorageError::from(e).translate(
                            StorageOp::Insert,
                            EntityKind::ExchangeRate,
                            &key,
                        ))
                    }
                }
            })
            .await
    }

    async fn update(&self, updated: ExchangeRate) -> Result<ExchangeRate> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<ExchangeRate> {
                let result = diesel::update(exchange_rate::table.find(updated.id))
                    .set((
                        exchange_rate::nominal.eq(updated.nominal),
                        exchange_rate::rate.eq(updated.rate.to_string()),
                    ))
                    .returning(ExchangeRateDB::as_returning())
                    .get_result(conn);
                match result {
                    Ok(row) => to_domain(row),
                    Err(e) => {
                        let key = currency_key(conn, updated.currency_id);
                        Err(StorageError::from(e).translate(
                            StorageOp::Update,
                            EntityKind::ExchangeRate,
                            &key,
                        ))
                    }
                }
            })
            .await
    }

    async fn delete(&self, id: i32) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let affected = diesel::delete(exchange_rate::table.find(id))
                    .execute(conn)
                    .map_err(|e| {
                        StorageError::from(e).translate(
                            StorageOp::Delete,
                            EntityKind::ExchangeRate,
                            &id.to_string(),
                        )
                    })?;
                if affected == 0 {
                    return Err(Error::not_found(EntityKind::ExchangeRate, id.to_string()));
                }
                Ok(affected)
            })
            .await
    }
}
