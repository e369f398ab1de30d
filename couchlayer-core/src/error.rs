//! Error types and result types for document store operations.
//!
//! Every operation returns [`StoreResult<T>`]. The variants of [`StoreError`] keep local
//! failures (encoding, request construction, caller misuse) apart from transport failures
//! and from replies the server rejected, so callers can decide what to do with each.

use serde::Deserialize;
use thiserror::Error;

/// Reason CouchDB 1.x reports when a database is missing.
pub const REASON_NO_DB_FILE: &str = "no_db_file";
/// Reason CouchDB 2.x and later report when a database is missing.
pub const REASON_DATABASE_DOES_NOT_EXIST: &str = "Database does not exist.";
/// Reason attached to a failed `get` whose doctype has no database.
pub const REASON_WRONG_DOCTYPE: &str = "wrong_doctype";
/// Error name CouchDB reports when creating a database that already exists.
pub const ERROR_FILE_EXISTS: &str = "file_exists";

/// Represents all possible errors that can occur when interacting with a document store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The request body could not be serialized. Nothing was sent.
    #[error("Encoding error: {0}")]
    Encoding(String),
    /// The request could not be constructed (malformed URL or request).
    #[error("Request error: {0}")]
    Request(String),
    /// The server could not be reached (refused, reset, timed out).
    #[error("Connection error: {0}")]
    Connection(String),
    /// The response body could not be read to the end.
    #[error("Response read error: {0}")]
    ResponseRead(String),
    /// The server answered with a non-2xx status.
    #[error(transparent)]
    Server(#[from] ServerError),
    /// The response body did not have the expected structure.
    #[error("Decoding error: {0}")]
    Decoding(String),
    /// The server answered 2xx but did not acknowledge the write.
    #[error("Protocol error: {0}")]
    Protocol(String),
    /// The caller passed a document that cannot be used for this operation.
    /// Never sent over the wire.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
    /// Error during backend construction.
    #[error("Initialization error: {0}")]
    Initialization(String),
}

impl StoreError {
    /// Returns the server error carried by this error, if any.
    pub fn as_server(&self) -> Option<&ServerError> {
        match self {
            StoreError::Server(err) => Some(err),
            _ => None,
        }
    }

    /// Returns `true` when the server reported that the target database does not exist.
    pub fn is_no_database(&self) -> bool {
        self.as_server().is_some_and(ServerError::is_no_database)
    }

    /// Returns `true` when the server refused to create a database because it already exists.
    pub fn is_database_exists(&self) -> bool {
        self.as_server().is_some_and(ServerError::is_database_exists)
    }
}

/// A specialized `Result` type for document store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// A non-2xx reply from the server.
///
/// CouchDB error bodies look like `{"error": "not_found", "reason": "Database does not exist."}`.
/// Both fields are extracted when present; the raw body is always kept.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("CouchDB({status} {error}): {reason}")]
pub struct ServerError {
    /// HTTP status code.
    pub status: u16,
    /// The `error` field of the reply, empty when the body had none.
    pub error: String,
    /// The `reason` field of the reply, empty when the body had none.
    pub reason: String,
    /// The raw response body.
    pub body: String,
}

#[derive(Deserialize, Default)]
struct ErrorBody {
    #[serde(default)]
    error: String,
    #[serde(default)]
    reason: String,
}

impl ServerError {
    /// Builds a server error from a status code and a raw body.
    ///
    /// Bodies that are not CouchDB error objects leave `error` and `reason` empty.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        let ErrorBody { error, reason } = serde_json::from_str(&body).unwrap_or_default();

        Self { status, error, reason, body }
    }

    /// Returns `true` when the server reported that the target database does not exist.
    pub fn is_no_database(&self) -> bool {
        self.status == 404
            && (self.reason == REASON_NO_DB_FILE || self.reason == REASON_DATABASE_DOES_NOT_EXIST)
    }

    /// Returns `true` when the server refused to create a database because it already exists.
    pub fn is_database_exists(&self) -> bool {
        self.status == 412 && self.error == ERROR_FILE_EXISTS
    }

    /// Returns a copy of this error carrying a different reason.
    pub fn with_reason(&self, reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_couchdb_error_body() {
        let err = ServerError::new(404, r#"{"error":"not_found","reason":"no_db_file"}"#);
        assert_eq!(err.status, 404);
        assert_eq!(err.error, "not_found");
        assert_eq!(err.reason, "no_db_file");
        assert!(err.is_no_database());
        assert!(!err.is_database_exists());
    }

    #[test]
    fn recognizes_couchdb2_missing_database_reason() {
        let err = ServerError::new(
            404,
            r#"{"error":"not_found","reason":"Database does not exist."}"#,
        );
        assert!(err.is_no_database());
    }

    #[test]
    fn missing_document_is_not_missing_database() {
        let err = ServerError::new(404, r#"{"error":"not_found","reason":"missing"}"#);
        assert!(!err.is_no_database());
    }

    #[test]
    fn keeps_raw_body_when_not_json() {
        let err = ServerError::new(502, "Bad Gateway");
        assert_eq!(err.error, "");
        assert_eq!(err.reason, "");
        assert_eq!(err.body, "Bad Gateway");
        assert!(!err.is_no_database());
    }

    #[test]
    fn recognizes_existing_database() {
        let err = ServerError::new(
            412,
            r#"{"error":"file_exists","reason":"The database could not be created, the file already exists."}"#,
        );
        assert!(err.is_database_exists());
        assert!(StoreError::from(err).is_database_exists());
    }

    #[test]
    fn with_reason_returns_a_new_error() {
        let err = ServerError::new(404, r#"{"error":"not_found","reason":"no_db_file"}"#);
        let retagged = err.with_reason(REASON_WRONG_DOCTYPE);

        assert_eq!(retagged.reason, REASON_WRONG_DOCTYPE);
        assert_eq!(retagged.status, 404);
        assert_eq!(retagged.error, "not_found");
        assert_eq!(err.reason, "no_db_file");
    }

    #[test]
    fn display_includes_status_and_reason() {
        let err = StoreError::from(ServerError::new(
            404,
            r#"{"error":"not_found","reason":"wrong_doctype"}"#,
        ));
        assert_eq!(err.to_string(), "CouchDB(404 not_found): wrong_doctype");
    }

    #[test]
    fn non_server_errors_are_not_classified() {
        let err = StoreError::Connection("refused".into());
        assert!(err.as_server().is_none());
        assert!(!err.is_no_database());
    }
}
