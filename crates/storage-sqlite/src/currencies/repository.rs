use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;

use ratekeeper_core::currencies::{Currency, CurrencyRepositoryTrait, NewCurrency};
use ratekeeper_core::errors::{EntityKind, Error, StorageOp};
use ratekeeper_core::Result;

use super::model::{CurrencyDB, NewCurrencyDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::currency;

pub struct CurrencyRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl CurrencyRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        CurrencyRepository { pool, writer }
    }
}

#[async_trait]
impl CurrencyRepositoryTrait for CurrencyRepository {
    fn list(&self) -> Result<Vec<Currency>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = currency::table
            .order(currency::id.asc())
            .select(CurrencyDB::as_select())
            .load::<CurrencyDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Currency::from).collect())
    }

    fn get_by_code(&self, code: &str) -> Result<Option<Currency>> {
        let mut conn = get_connection(&self.pool)?;
        let row = currency::table
            .filter(currency::code.eq(code))
            .select(CurrencyDB::as_select())
            .first::<CurrencyDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(row.map(Currency::from))
    }

    fn get_by_id(&self, id: i32) -> Result<Option<Currency>> {
        let mut conn = get_connection(&self.pool)?;
        let row = currency::table
            .find(id)
            .select(CurrencyDB::as_select())
            .first::<CurrencyDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(row.map(Currency::from))
    }

    async fn insert(&self, new_currency: NewCurrency) -> Result<Currency> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Currency> {
                let code = new_currency.code.clone();
                let row = diesel::insert_into(currency::table)
                    .values(NewCurrencyDB::from(new_currency))
                    .returning(CurrencyDB::as_returning())
                    .get_result(conn)
                    .map_err(|e| {
                        StorageError::from(e).translate(
                            StorageOp::Insert,
                            EntityKind::Currency,
                            &code,
                        )
                    })?;
                Ok(Currency::from(row))
            })
            .await
    }

    async fn update(&self, updated: Currency) -> Result<Currency> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Currency> {
                let row = diesel::update(currency::table.find(updated.id))
                    .set((
                        currency::full_name.eq(&updated.full_name),
                        currency::sign.eq(&updated.sign),
                    ))
                    .returning(CurrencyDB::as_returning())
                    .get_result(conn)
                    .map_err(|e| {
                        StorageError::from(e).translate(
                            StorageOp::Update,
                            EntityKind::Currency,
                            &updated.code,
                        )
                    })?;
                Ok(Currency::from(row))
            })
            .await
    }

    async fn delete(&self, code: &str) -> Result<usize> {
        let code = code.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let affected = diesel::delete(currency::table.filter(currency::code.eq(&code)))
                    .execute(conn)
                    .map_err(|e| {
                        StorageError::from(e).translate(
                            StorageOp::Delete,
                            EntityKind::Currency,
                            &code,
                        )
                    })?;
                if affected == 0 {
                    return Err(Error::not_found(EntityKind::Currency, code));
                }
                Ok(affected)
            })
            .await
    }
}
