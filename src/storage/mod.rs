mod apps_store;
mod migrations;
mod sqlite_store;

pub use sqlite_store::SqliteStore;
