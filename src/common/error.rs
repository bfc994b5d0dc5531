//! Error types for metabroker

use crate::proto::common::ErrorCode;
use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// The coordinator service an operation is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Authority {
    /// Owns collection schemas and partitions.
    RootCoord,
    /// Owns recovery info, segments and indexes.
    DataCoord,
}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Authority::RootCoord => f.write_str("root coordinator"),
            Authority::DataCoord => f.write_str("data coordinator"),
        }
    }
}

/// Kind of entity a not-found status refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Collection,
    Partition,
    Channel,
    Segment,
    Index,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Collection => "collection",
            EntityKind::Partition => "partition",
            EntityKind::Channel => "channel",
            EntityKind::Segment => "segment",
            EntityKind::Index => "index",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum Error {
    // === Remote Call Errors ===
    /// The call never produced an envelope (transport, timeout, cancellation).
    #[error("remote call {op}({args}) failed: {source}")]
    RemoteCallFailed {
        op: &'static str,
        args: String,
        #[source]
        source: tonic::Status,
    },

    /// `code` is the numeric status code, `error_code` the raw legacy one.
    #[error("{kind} not found: {reason}")]
    NotFound {
        kind: EntityKind,
        code: i32,
        error_code: i32,
        reason: String,
    },

    #[error("{op} failed: code={code}, error_code={error_code}, reason={reason}")]
    RemoteOperationFailed {
        op: &'static str,
        code: i32,
        error_code: i32,
        reason: String,
    },

    #[error("malformed {op} response: {reason}")]
    MalformedResponse { op: &'static str, reason: String },

    // === Wiring Errors ===
    #[error("{0} client is not configured")]
    MissingCapability(Authority),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    // === Config Errors ===
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // === Generic ===
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Does this error report a missing entity?
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    /// The missing entity's kind, if this is a not-found error.
    pub fn not_found_kind(&self) -> Option<EntityKind> {
        match self {
            Error::NotFound { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    pub fn is_collection_not_found(&self) -> bool {
        self.not_found_kind() == Some(EntityKind::Collection)
    }

    /// Is this error worth retrying by the caller?
    pub fn is_retryable(&self) -> bool {
        use tonic::Code;
        match self {
            Error::RemoteCallFailed { source, .. } => matches!(
                source.code(),
                Code::Unavailable | Code::DeadlineExceeded | Code::ResourceExhausted
            ),
            Error::RemoteOperationFailed {
                code, error_code, ..
            } => {
                crate::common::status::is_transient_code(*code)
                    || *error_code == ErrorCode::NotReadyServe as i32
            }
            Error::ConnectionFailed(_) => true,
            _ => false,
        }
    }
}

impl From<tonic::transport::Error> for Error {
    fn from(e: tonic::transport::Error) -> Self {
        Error::ConnectionFailed(e.to_string())
    }
}

impl From<::config::ConfigError> for Error {
    fn from(e: ::config::ConfigError) -> Self {
        Error::InvalidConfig(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_kind() {
        let err = Error::NotFound {
            kind: EntityKind::Collection,
            code: 100,
            error_code: ErrorCode::CollectionNotExists as i32,
            reason: "collection 100".into(),
        };
        assert!(err.is_not_found());
        assert!(err.is_collection_not_found());
        assert_eq!(err.not_found_kind(), Some(EntityKind::Collection));

        let err = Error::MissingCapability(Authority::DataCoord);
        assert!(!err.is_not_found());
        assert_eq!(err.not_found_kind(), None);
        assert_eq!(err.to_string(), "data coordinator client is not configured");
    }

    #[test]
    fn test_retryable() {
        let err = Error::RemoteCallFailed {
            op: "DescribeIndex",
            args: "collection_id=1".into(),
            source: tonic::Status::unavailable("connection refused"),
        };
        assert!(err.is_retryable());

        let err = Error::RemoteCallFailed {
            op: "DescribeIndex",
            args: "collection_id=1".into(),
            source: tonic::Status::invalid_argument("bad request"),
        };
        assert!(!err.is_retryable());

        let err = Error::RemoteOperationFailed {
            op: "DescribeIndex",
            code: 65535,
            error_code: ErrorCode::UnexpectedError as i32,
            reason: "boom".into(),
        };
        assert!(!err.is_retryable());

        let err = Error::RemoteOperationFailed {
            op: "DescribeIndex",
            code: 0,
            error_code: ErrorCode::NotReadyServe as i32,
            reason: "starting".into(),
        };
        assert!(err.is_retryable());
    }

    #[test]
    fn test_remote_call_failed_message() {
        let err = Error::RemoteCallFailed {
            op: "ShowPartitions",
            args: "collection_id=7".into(),
            source: tonic::Status::deadline_exceeded("too slow"),
        };
        let msg = err.to_string();
        assert!(msg.contains("ShowPartitions"));
        assert!(msg.contains("collection_id=7"));
    }
}
