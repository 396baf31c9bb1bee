#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

use product_admin::db::{DbPool, establish_connection_pool};
use product_admin::images::{ImageStore, ImageStoreResult};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// A migrated throwaway SQLite database, removed again on drop.
pub struct TestDb {
    path: String,
    pool: DbPool,
}

impl TestDb {
    pub fn new(name: &str) -> Self {
        let path = std::env::temp_dir()
            .join(name)
            .to_string_lossy()
            .into_owned();
        let _ = std::fs::remove_file(&path);

        let pool = establish_connection_pool(&path).expect("failed to create test pool");
        let mut conn = pool.get().expect("failed to get test connection");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("failed to run migrations");

        Self { path, pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        for suffix in ["", "-wal", "-shm"] {
            let _ = std::fs::remove_file(format!("{}{suffix}", self.path));
        }
    }
}

/// In-memory stand-in for the image host, recording every call.
#[derive(Default)]
pub struct MemoryImageStore {
    pub uploads: Mutex<Vec<String>>,
    pub deletes: Mutex<Vec<String>>,
}

#[async_trait]
impl ImageStore for MemoryImageStore {
    async fn upload(&self, _bytes: Vec<u8>, public_id: &str) -> ImageStoreResult<String> {
        let url = format!("https://img.example.com/products/{public_id}.png");
        self.uploads.lock().unwrap().push(url.clone());
        Ok(url)
    }

    async fn delete(&self, url: &str) -> ImageStoreResult<()> {
        self.deletes.lock().unwrap().push(url.to_string());
        Ok(())
    }
}
