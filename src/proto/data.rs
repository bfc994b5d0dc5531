//! Data-authority recovery and segment messages

use super::common::{MsgBase, Status};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum SegmentState {
    SegmentStateNone = 0,
    NotExist = 1,
    Growing = 2,
    Sealed = 3,
    Flushed = 4,
    Flushing = 5,
    Dropped = 6,
    Importing = 7,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum SegmentLevel {
    Legacy = 0,
    L0 = 1,
    L1 = 2,
    L2 = 3,
}

/// Position inside a write-ahead channel.
#[derive(Clone, PartialEq, prost::Message, Serialize)]
pub struct MsgPosition {
    #[prost(string, tag = "1")]
    pub channel_name: String,
    #[prost(bytes = "vec", tag = "2")]
    pub msg_id: Vec<u8>,
    #[prost(string, tag = "3")]
    pub msg_group: String,
    #[prost(uint64, tag = "4")]
    pub timestamp: u64,
}

/// Recovery descriptor of one virtual channel.
#[derive(Clone, PartialEq, prost::Message, Serialize)]
pub struct VchannelInfo {
    #[prost(int64, tag = "1")]
    pub collection_id: i64,
    #[prost(string, tag = "2")]
    pub channel_name: String,
    #[prost(message, optional, tag = "3")]
    pub seek_position: Option<MsgPosition>,
    #[prost(int64, repeated, tag = "4")]
    pub unflushed_segment_ids: Vec<i64>,
    #[prost(int64, repeated, tag = "5")]
    pub flushed_segment_ids: Vec<i64>,
    #[prost(int64, repeated, tag = "6")]
    pub dropped_segment_ids: Vec<i64>,
    #[prost(int64, repeated, tag = "7")]
    pub indexed_segment_ids: Vec<i64>,
}

#[derive(Clone, PartialEq, prost::Message, Serialize)]
pub struct Binlog {
    #[prost(int64, tag = "1")]
    pub entries_num: i64,
    #[prost(uint64, tag = "2")]
    pub timestamp_from: u64,
    #[prost(uint64, tag = "3")]
    pub timestamp_to: u64,
    #[prost(string, tag = "4")]
    pub log_path: String,
    #[prost(int64, tag = "5")]
    pub log_size: i64,
    #[prost(int64, tag = "6")]
    pub log_id: i64,
}

#[derive(Clone, PartialEq, prost::Message, Serialize)]
pub struct FieldBinlog {
    #[prost(int64, tag = "1")]
    pub field_id: i64,
    #[prost(message, repeated, tag = "2")]
    pub binlogs: Vec<Binlog>,
}

/// Binlog references of one segment, as returned by the v1 recovery call.
#[derive(Clone, PartialEq, prost::Message, Serialize)]
pub struct SegmentBinlogs {
    #[prost(int64, tag = "1")]
    pub segment_id: i64,
    #[prost(message, repeated, tag = "2")]
    pub field_binlogs: Vec<FieldBinlog>,
    #[prost(int64, tag = "3")]
    pub num_of_rows: i64,
    #[prost(message, repeated, tag = "4")]
    pub statslogs: Vec<FieldBinlog>,
    #[prost(message, repeated, tag = "5")]
    pub deltalogs: Vec<FieldBinlog>,
    #[prost(string, tag = "6")]
    pub insert_channel: String,
}

/// Full segment metadata.
#[derive(Clone, PartialEq, prost::Message, Serialize)]
pub struct SegmentInfo {
    #[prost(int64, tag = "1")]
    pub id: i64,
    #[prost(int64, tag = "2")]
    pub collection_id: i64,
    #[prost(int64, tag = "3")]
    pub partition_id: i64,
    #[prost(string, tag = "4")]
    pub insert_channel: String,
    #[prost(int64, tag = "5")]
    pub num_of_rows: i64,
    #[prost(enumeration = "SegmentState", tag = "6")]
    pub state: i32,
    #[prost(int64, tag = "7")]
    pub max_row_num: i64,
    #[prost(uint64, tag = "8")]
    pub last_expire_time: u64,
    #[prost(message, optional, tag = "9")]
    pub start_position: Option<MsgPosition>,
    #[prost(message, optional, tag = "10")]
    pub dml_position: Option<MsgPosition>,
    #[prost(message, repeated, tag = "11")]
    pub binlogs: Vec<FieldBinlog>,
    #[prost(message, repeated, tag = "12")]
    pub statslogs: Vec<FieldBinlog>,
    #[prost(message, repeated, tag = "13")]
    pub deltalogs: Vec<FieldBinlog>,
    #[prost(enumeration = "SegmentLevel", tag = "14")]
    pub level: i32,
}

#[derive(Clone, PartialEq, prost::Message, Serialize)]
pub struct GetRecoveryInfoRequest {
    #[prost(message, optional, tag = "1")]
    pub base: Option<MsgBase>,
    #[prost(int64, tag = "2")]
    pub collection_id: i64,
    #[prost(int64, tag = "3")]
    pub partition_id: i64,
}

#[derive(Clone, PartialEq, prost::Message, Serialize)]
pub struct GetRecoveryInfoResponse {
    #[prost(message, optional, tag = "1")]
    pub status: Option<Status>,
    #[prost(message, repeated, tag = "2")]
    pub channels: Vec<VchannelInfo>,
    #[prost(message, repeated, tag = "3")]
    pub binlogs: Vec<SegmentBinlogs>,
}

#[derive(Clone, PartialEq, prost::Message, Serialize)]
pub struct GetRecoveryInfoRequestV2 {
    #[prost(message, optional, tag = "1")]
    pub base: Option<MsgBase>,
    #[prost(int64, tag = "2")]
    pub collection_id: i64,
    #[prost(int64, repeated, tag = "3")]
    pub partition_ids: Vec<i64>,
}

#[derive(Clone, PartialEq, prost::Message, Serialize)]
pub struct GetRecoveryInfoResponseV2 {
    #[prost(message, optional, tag = "1")]
    pub status: Option<Status>,
    #[prost(message, repeated, tag = "2")]
    pub channels: Vec<VchannelInfo>,
    #[prost(message, repeated, tag = "3")]
    pub segments: Vec<SegmentInfo>,
}

#[derive(Clone, PartialEq, prost::Message, Serialize)]
pub struct GetSegmentInfoRequest {
    #[prost(message, optional, tag = "1")]
    pub base: Option<MsgBase>,
    #[prost(int64, repeated, tag = "2")]
    pub segment_ids: Vec<i64>,
    #[prost(bool, tag = "3")]
    pub include_unhealthy: bool,
}

#[derive(Clone, PartialEq, prost::Message, Serialize)]
pub struct GetSegmentInfoResponse {
    #[prost(message, optional, tag = "1")]
    pub status: Option<Status>,
    #[prost(message, repeated, tag = "2")]
    pub infos: Vec<SegmentInfo>,
    #[prost(map = "string, message", tag = "3")]
    pub channel_checkpoint: HashMap<String, MsgPosition>,
}
