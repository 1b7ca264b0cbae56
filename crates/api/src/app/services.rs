//! Shared state handed to every handler.

use stockroom_infra::Database;

/// Handler-facing services. Cloning `Database` only clones the pool handle.
#[derive(Debug, Clone)]
pub struct AppServices {
    pub db: Database,
}

impl AppServices {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}
