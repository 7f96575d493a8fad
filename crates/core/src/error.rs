//! Unified error types for legisync.
//!
//! The taxonomy mirrors how the subsystem degrades: transport failures are
//! recoverable by falling back to cache/storage/mock data, parse mismatches
//! never surface here (they yield absent fields instead), and resolver
//! session failures collapse to a single "lookup unavailable" outcome.

use tokio_rusqlite::rusqlite;

/// Unified error types for the acquisition and reconciliation subsystem.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// URL could not be parsed or constructed.
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// Transport-level HTTP failure (connect, DNS, non-2xx status).
    #[error("http error: {0}")]
    Http(String),

    /// Request exceeded the configured timeout.
    #[error("fetch timeout: {0}")]
    Timeout(String),

    /// Response body exceeded the configured size cap.
    #[error("fetch too large: {0}")]
    TooLarge(String),

    /// Database operation failed.
    #[error("database error: {0}")]
    Database(tokio_rusqlite::Error),

    /// Migration failed to apply.
    #[error("migration failed: {0}")]
    MigrationFailed(String),

    /// A sync source yielded zero records; the batch was not applied.
    #[error("scrape yielded no records: {0}")]
    EmptyScrape(String),

    /// The stateful lookup session failed partway through.
    #[error("lookup unavailable: {0}")]
    LookupFailed(String),
}

impl From<tokio_rusqlite::Error<Error>> for Error {
    fn from(err: tokio_rusqlite::Error<Error>) -> Self {
        match err {
            tokio_rusqlite::Error::Error(e) => e,
            tokio_rusqlite::Error::ConnectionClosed => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
            tokio_rusqlite::Error::Close(c) => Error::Database(tokio_rusqlite::Error::Close(c)),
            _ => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
        }
    }
}

impl From<tokio_rusqlite::Error<rusqlite::Error>> for Error {
    fn from(err: tokio_rusqlite::Error<rusqlite::Error>) -> Self {
        Error::Database(err)
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Database(tokio_rusqlite::Error::Error(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::EmptyScrape("bill list".to_string());
        assert!(err.to_string().contains("no records"));
        assert!(err.to_string().contains("bill list"));
    }

    #[test]
    fn test_lookup_failed_display() {
        let err = Error::LookupFailed("no form on page".to_string());
        assert!(err.to_string().contains("lookup unavailable"));
    }
}
