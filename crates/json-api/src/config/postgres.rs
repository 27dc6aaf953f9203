//! Database Config

use serde::Deserialize;

use subs_app::database::PoolSettings;

/// Database pool settings.
#[derive(Debug, Clone, Deserialize)]
pub struct PostgresSettings {
    /// `PostgreSQL` connection string
    pub dsn: String,

    /// Connections kept open while idle.
    pub min_conns: u32,

    /// Upper bound on open connections.
    pub max_conns: u32,
}

impl PostgresSettings {
    #[must_use]
    pub fn pool_settings(&self) -> PoolSettings {
        PoolSettings {
            min_connections: self.min_conns,
            max_connections: self.max_conns,
            ..PoolSettings::new(self.dsn.clone())
        }
    }
}
