//! Records handed to the query side

use super::common::KeyValuePair;
use serde::Serialize;

/// Index materialization for one field of one segment.
#[derive(Clone, PartialEq, prost::Message, Serialize)]
pub struct FieldIndexInfo {
    #[prost(int64, tag = "1")]
    pub field_id: i64,
    #[prost(bool, tag = "2")]
    pub enable_index: bool,
    #[prost(string, tag = "3")]
    pub index_name: String,
    #[prost(int64, tag = "4")]
    pub index_id: i64,
    #[prost(int64, tag = "5")]
    pub build_id: i64,
    #[prost(message, repeated, tag = "6")]
    pub index_params: Vec<KeyValuePair>,
    #[prost(string, repeated, tag = "7")]
    pub index_file_paths: Vec<String>,
    #[prost(int64, tag = "8")]
    pub index_size: i64,
    #[prost(int64, tag = "9")]
    pub index_version: i64,
    #[prost(int64, tag = "10")]
    pub num_rows: i64,
    #[prost(int32, tag = "11")]
    pub current_index_version: i32,
}
