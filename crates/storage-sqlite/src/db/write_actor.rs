use super::DbPool;
use crate::errors::StorageError;
use diesel::SqliteConnection;
use log::debug;
use std::any::Any;
use tokio::sync::{mpsc, oneshot};
use ratekeeper_core::errors::{Error, Result};

// Type alias for the job to be executed by the writer actor.
// Jobs return core::Result so repositories can raise translated domain errors.
type Job<T> = Box<dyn FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static>;

type AnyResult = Result<Box<dyn Any + Send + 'static>>;

/// Handle for sending jobs to the writer actor.
#[derive(Clone)]
pub struct WriteHandle {
    tx: mpsc::Sender<(Job<Box<dyn Any + Send + 'static>>, oneshot::Sender<AnyResult>)>,
}

impl WriteHandle {
    /// Executes a database job on the writer actor, inside an immediate
    /// transaction that is rolled back when the job fails.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static + Any,
    {
        let (ret_tx, ret_rx) = oneshot::channel();

        self.tx
            .send((
                Box::new(move |c| job(c).map(|v| Box::new(v) as Box<dyn Any + Send>)),
                ret_tx,
            ))
            .await
            .map_err(|_| Error::ResourceFailure("database writer has stopped".to_string()))?;

        let boxed = ret_rx.await.map_err(|_| {
            Error::ResourceFailure("database writer dropped the job without a result".to_string())
        })??;

        boxed
            .downcast::<T>()
            .map(|value| *value)
            .map_err(|_| Error::UnexpectedStorage("writer returned an unexpected type".to_string()))
    }
}

/// Spawns a background Tokio task that acts as the single writer to the database.
///
/// Jobs are processed serially. Each job takes a connection from the pool,
/// subject to the pool's connection timeout, and gives it back when done.
pub fn spawn_writer(pool: DbPool) -> WriteHandle {
    // The channel is bounded; 1024 is an arbitrary size.
    let (tx, mut rx) =
        mpsc::channel::<(Job<Box<dyn Any + Send + 'static>>, oneshot::Sender<AnyResult>)>(1024);

    tokio::spawn(async move {
        while let Some((job, reply_tx)) = rx.recv().await {
            let result = run_job(&pool, job);
            // The requester may have gone away (timed out or cancelled).
            let _ = reply_tx.send(result);
        }
        debug!("Database writer stopped");
    });

    WriteHandle { tx }
}

fn run_job(pool: &DbPool, job: Job<Box<dyn Any + Send + 'static>>) -> AnyResult {
    let mut conn = pool.get().map_err(StorageError::from)?;
    conn.immediate_transaction::<_, StorageError, _>(|c| job(c).map_err(StorageError::from))
        .map_err(Error::from)
}
