pub mod employee;

use log::{debug, warn};
use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::Connection;
use thiserror::Error;

use crate::config::Config;

#[derive(Debug, Error)]
#[error("Database connection error: {0}")]
pub struct ConnectionError(#[from] pub sqlx::Error);

/// Opens one store connection per unit of work.
///
/// There is no pooling: every caller gets a fresh connection and is
/// expected to hand it back through [`close_connection`]. A pool could sit
/// behind `open_connection` without callers noticing.
#[derive(Clone)]
pub struct ConnectionFactory {
    options: PgConnectOptions,
    target: String,
}

impl ConnectionFactory {
    pub fn new(config: &Config) -> Self {
        let options = PgConnectOptions::new()
            .host(&config.server)
            .port(config.port)
            .database(&config.database)
            .username(&config.user_name)
            .password(&config.password);

        ConnectionFactory {
            options,
            target: format!(
                "{}@{}:{}/{}",
                config.user_name, config.server, config.port, config.database
            ),
        }
    }

    /// Host, port, database and user, without the password.
    pub fn target(&self) -> &str {
        &self.target
    }

    pub async fn open_connection(&self) -> Result<PgConnection, ConnectionError> {
        debug!("Opening connection to {}", self.target);
        PgConnection::connect_with(&self.options)
            .await
            .map_err(|err| {
                log::error!("Error connecting to database {}: {}", self.target, err);
                ConnectionError(err)
            })
    }
}

/// Releases a connection. Failing to close cleanly is logged, not returned,
/// since the caller's outcome has already been decided.
pub async fn close_connection(conn: PgConnection) {
    if let Err(err) = conn.close().await {
        warn!("Error closing database connection: {}", err);
    } else {
        debug!("Connection closed");
    }
}
