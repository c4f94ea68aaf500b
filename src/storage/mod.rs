pub mod sqlite;

pub use sqlite::{SqliteStorage, alert_key};
