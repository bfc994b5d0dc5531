//! Data-authority index messages

use super::common::{KeyValuePair, Status};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum IndexState {
    IndexStateNone = 0,
    Unissued = 1,
    InProgress = 2,
    Finished = 3,
    Failed = 4,
    Retry = 5,
}

/// Collection-level index definition.
#[derive(Clone, PartialEq, prost::Message, Serialize)]
pub struct IndexInfo {
    #[prost(int64, tag = "1")]
    pub collection_id: i64,
    #[prost(int64, tag = "2")]
    pub field_id: i64,
    #[prost(string, tag = "3")]
    pub index_name: String,
    #[prost(message, repeated, tag = "4")]
    pub type_params: Vec<KeyValuePair>,
    #[prost(message, repeated, tag = "5")]
    pub index_params: Vec<KeyValuePair>,
    #[prost(int64, tag = "6")]
    pub indexed_rows: i64,
    #[prost(int64, tag = "7")]
    pub total_rows: i64,
    #[prost(enumeration = "IndexState", tag = "8")]
    pub state: i32,
    #[prost(string, tag = "9")]
    pub index_state_fail_reason: String,
    #[prost(bool, tag = "10")]
    pub is_auto_index: bool,
    #[prost(message, repeated, tag = "11")]
    pub user_index_params: Vec<KeyValuePair>,
    #[prost(int64, tag = "12")]
    pub index_id: i64,
    #[prost(int64, tag = "13")]
    pub pending_index_rows: i64,
}

#[derive(Clone, PartialEq, prost::Message, Serialize)]
pub struct DescribeIndexRequest {
    #[prost(int64, tag = "1")]
    pub collection_id: i64,
    #[prost(string, tag = "2")]
    pub index_name: String,
    #[prost(uint64, tag = "3")]
    pub timestamp: u64,
}

#[derive(Clone, PartialEq, prost::Message, Serialize)]
pub struct DescribeIndexResponse {
    #[prost(message, optional, tag = "1")]
    pub status: Option<Status>,
    #[prost(message, repeated, tag = "2")]
    pub index_infos: Vec<IndexInfo>,
}

/// Index files built for one field of one segment.
#[derive(Clone, PartialEq, prost::Message, Serialize)]
pub struct IndexFilePathInfo {
    #[prost(int64, tag = "1")]
    pub segment_id: i64,
    #[prost(int64, tag = "2")]
    pub field_id: i64,
    #[prost(int64, tag = "3")]
    pub index_id: i64,
    #[prost(int64, tag = "4")]
    pub build_id: i64,
    #[prost(string, tag = "5")]
    pub index_name: String,
    #[prost(message, repeated, tag = "6")]
    pub index_params: Vec<KeyValuePair>,
    #[prost(string, repeated, tag = "7")]
    pub index_file_paths: Vec<String>,
    #[prost(uint64, tag = "8")]
    pub serialized_size: u64,
    #[prost(int64, tag = "9")]
    pub index_version: i64,
    #[prost(int64, tag = "10")]
    pub num_rows: i64,
    #[prost(int32, tag = "11")]
    pub current_index_version: i32,
}

/// Every index built for one segment.
#[derive(Clone, PartialEq, prost::Message, Serialize)]
pub struct SegmentIndexInfo {
    #[prost(int64, tag = "1")]
    pub collection_id: i64,
    #[prost(int64, tag = "2")]
    pub segment_id: i64,
    #[prost(bool, tag = "3")]
    pub enable_index: bool,
    #[prost(message, repeated, tag = "4")]
    pub index_infos: Vec<IndexFilePathInfo>,
}

#[derive(Clone, PartialEq, prost::Message, Serialize)]
pub struct GetIndexInfoRequest {
    #[prost(int64, tag = "1")]
    pub collection_id: i64,
    #[prost(int64, repeated, tag = "2")]
    pub segment_ids: Vec<i64>,
    #[prost(string, tag = "3")]
    pub index_name: String,
}

#[derive(Clone, PartialEq, prost::Message, Serialize)]
pub struct GetIndexInfoResponse {
    #[prost(message, optional, tag = "1")]
    pub status: Option<Status>,
    #[prost(map = "int64, message", tag = "2")]
    pub segment_info: HashMap<i64, SegmentIndexInfo>,
}
