//! Temp-file databases for repository tests.

use std::sync::Arc;

use tempfile::{tempdir, TempDir};

use crate::db::{create_pool, run_migrations, spawn_writer, DbPool, PoolConfig, WriteHandle};

/// Creates a migrated database in a temp directory.
/// The directory is removed when the returned `TempDir` is dropped.
pub fn create_test_db() -> (Arc<DbPool>, WriteHandle, TempDir) {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let db_path = temp_dir.path().join("test.db").to_string_lossy().to_string();

    let pool = create_pool(&db_path, &PoolConfig::default()).expect("Failed to create pool");
    run_migrations(&pool).expect("Failed to run migrations");

    let writer = spawn_writer((*pool).clone());
    (pool, writer, temp_dir)
}
