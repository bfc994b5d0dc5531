//! Envelope status checks
//!
//! A status is successful only when both its numeric `code` and its legacy
//! `error_code` are zero. Failures are mapped to local errors through the
//! tables below: the numeric code is consulted first, then the legacy one.
//! Message text is never inspected.

use crate::common::{EntityKind, Error, Result};
use crate::proto::common::{ErrorCode, Status};
use crate::proto::Envelope;

pub const CODE_SUCCESS: i32 = 0;
pub const CODE_SERVICE_NOT_READY: i32 = 1;
pub const CODE_SERVICE_UNAVAILABLE: i32 = 2;
pub const CODE_COLLECTION_NOT_FOUND: i32 = 100;
pub const CODE_PARTITION_NOT_FOUND: i32 = 202;
pub const CODE_CHANNEL_NOT_FOUND: i32 = 500;
pub const CODE_SEGMENT_NOT_FOUND: i32 = 600;
pub const CODE_INDEX_NOT_FOUND: i32 = 700;

const NOT_FOUND_CODES: &[(i32, EntityKind)] = &[
    (CODE_COLLECTION_NOT_FOUND, EntityKind::Collection),
    (CODE_PARTITION_NOT_FOUND, EntityKind::Partition),
    (CODE_CHANNEL_NOT_FOUND, EntityKind::Channel),
    (CODE_SEGMENT_NOT_FOUND, EntityKind::Segment),
    (CODE_INDEX_NOT_FOUND, EntityKind::Index),
];

const NOT_FOUND_LEGACY: &[(ErrorCode, EntityKind)] = &[
    (ErrorCode::CollectionNotExists, EntityKind::Collection),
    (ErrorCode::CollectionNameNotFound, EntityKind::Collection),
    (ErrorCode::IndexNotExist, EntityKind::Index),
];

/// Outcome of classifying one envelope status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    NotFound(EntityKind),
    Failed,
}

pub fn is_transient_code(code: i32) -> bool {
    matches!(code, CODE_SERVICE_NOT_READY | CODE_SERVICE_UNAVAILABLE)
}

/// Classify a status. An absent status counts as success.
///
/// Legacy codes are compared as raw integers, so a code this crate does not
/// list is still a failure.
pub fn classify(status: Option<&Status>) -> StatusKind {
    let Some(status) = status else {
        return StatusKind::Success;
    };
    let legacy = status.error_code;

    if status.code == CODE_SUCCESS && legacy == ErrorCode::Success as i32 {
        return StatusKind::Success;
    }

    if status.code != CODE_SUCCESS {
        if let Some((_, kind)) = NOT_FOUND_CODES.iter().find(|(c, _)| *c == status.code) {
            return StatusKind::NotFound(*kind);
        }
        // A numeric code takes precedence over whatever legacy code came along
        return StatusKind::Failed;
    }

    ErrorCode::try_from(legacy)
        .ok()
        .and_then(|legacy| NOT_FOUND_LEGACY.iter().find(|(c, _)| *c == legacy))
        .map(|(_, kind)| StatusKind::NotFound(*kind))
        .unwrap_or(StatusKind::Failed)
}

/// Turn a status into `Ok(())` or the error it maps to.
///
/// Both code spaces are carried verbatim: `code` is the numeric code,
/// `error_code` the raw legacy code.
pub fn check_status(op: &'static str, status: Option<&Status>) -> Result<()> {
    match classify(status) {
        StatusKind::Success => Ok(()),
        StatusKind::NotFound(kind) => {
            let status = status.cloned().unwrap_or_default();
            Err(Error::NotFound {
                kind,
                code: status.code,
                error_code: status.error_code,
                reason: status.reason,
            })
        }
        StatusKind::Failed => {
            let status = status.cloned().unwrap_or_default();
            Err(Error::RemoteOperationFailed {
                op,
                code: status.code,
                error_code: status.error_code,
                reason: status.reason,
            })
        }
    }
}

pub fn check_response<R: Envelope>(op: &'static str, resp: &R) -> Result<()> {
    check_status(op, resp.envelope_status())
}
