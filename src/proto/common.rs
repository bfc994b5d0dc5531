//! Envelope status and request header

use serde::Serialize;

/// Legacy error codes carried in `Status::error_code`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,
    UnexpectedError = 1,
    ConnectFailed = 2,
    PermissionDenied = 3,
    CollectionNotExists = 4,
    IllegalArgument = 5,
    FileNotFound = 14,
    MetaFailed = 15,
    IndexNotExist = 25,
    EmptyCollection = 26,
    CollectionNameNotFound = 28,
    NotReadyServe = 41,
}

/// Request types stamped into `MsgBase::msg_type`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum MsgType {
    Undefined = 0,
    DescribeCollection = 103,
    ShowPartitions = 204,
    DescribeIndex = 301,
    GetIndexInfos = 305,
    SegmentInfo = 502,
    GetRecoveryInfo = 511,
}

#[derive(Clone, PartialEq, prost::Message, Serialize)]
pub struct Status {
    #[prost(enumeration = "ErrorCode", tag = "1")]
    pub error_code: i32,
    #[prost(string, tag = "2")]
    pub reason: String,
    #[prost(int32, tag = "3")]
    pub code: i32,
    #[prost(bool, tag = "4")]
    pub retriable: bool,
    #[prost(string, tag = "5")]
    pub detail: String,
}

impl Status {
    pub fn success() -> Self {
        Self::default()
    }

    /// Failure status identified by its numeric code.
    pub fn with_code(code: i32, reason: impl Into<String>) -> Self {
        Self {
            error_code: ErrorCode::UnexpectedError as i32,
            reason: reason.into(),
            code,
            ..Default::default()
        }
    }

    /// Failure status identified only by its legacy error code.
    pub fn legacy(error_code: ErrorCode, reason: impl Into<String>) -> Self {
        Self {
            error_code: error_code as i32,
            reason: reason.into(),
            ..Default::default()
        }
    }
}

/// Header attached to every coordinator request.
#[derive(Clone, PartialEq, prost::Message, Serialize)]
pub struct MsgBase {
    #[prost(enumeration = "MsgType", tag = "1")]
    pub msg_type: i32,
    #[prost(int64, tag = "2")]
    pub msg_id: i64,
    #[prost(uint64, tag = "3")]
    pub timestamp: u64,
    #[prost(int64, tag = "4")]
    pub source_id: i64,
    #[prost(int64, tag = "5")]
    pub target_id: i64,
}

#[derive(Clone, PartialEq, prost::Message, Serialize)]
pub struct KeyValuePair {
    #[prost(string, tag = "1")]
    pub key: String,
    #[prost(string, tag = "2")]
    pub value: String,
}

impl KeyValuePair {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}
