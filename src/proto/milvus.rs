//! Collection-authority requests and responses

use super::common::{MsgBase, Status};
use super::schema::CollectionSchema;
use serde::Serialize;

#[derive(Clone, PartialEq, prost::Message, Serialize)]
pub struct DescribeCollectionRequest {
    #[prost(message, optional, tag = "1")]
    pub base: Option<MsgBase>,
    #[prost(string, tag = "2")]
    pub db_name: String,
    #[prost(string, tag = "3")]
    pub collection_name: String,
    #[prost(int64, tag = "4")]
    pub collection_id: i64,
    #[prost(uint64, tag = "5")]
    pub time_stamp: u64,
}

#[derive(Clone, PartialEq, prost::Message, Serialize)]
pub struct DescribeCollectionResponse {
    #[prost(message, optional, tag = "1")]
    pub status: Option<Status>,
    #[prost(message, optional, tag = "2")]
    pub schema: Option<CollectionSchema>,
    #[prost(int64, tag = "3")]
    pub collection_id: i64,
    #[prost(string, repeated, tag = "4")]
    pub virtual_channel_names: Vec<String>,
    #[prost(string, repeated, tag = "5")]
    pub physical_channel_names: Vec<String>,
    #[prost(uint64, tag = "6")]
    pub created_timestamp: u64,
    #[prost(int32, tag = "7")]
    pub shards_num: i32,
    #[prost(string, tag = "8")]
    pub collection_name: String,
    #[prost(string, tag = "9")]
    pub db_name: String,
}

#[derive(Clone, PartialEq, prost::Message, Serialize)]
pub struct ShowPartitionsRequest {
    #[prost(message, optional, tag = "1")]
    pub base: Option<MsgBase>,
    #[prost(string, tag = "2")]
    pub db_name: String,
    #[prost(string, tag = "3")]
    pub collection_name: String,
    #[prost(int64, tag = "4")]
    pub collection_id: i64,
    #[prost(string, repeated, tag = "5")]
    pub partition_names: Vec<String>,
}

#[derive(Clone, PartialEq, prost::Message, Serialize)]
pub struct ShowPartitionsResponse {
    #[prost(message, optional, tag = "1")]
    pub status: Option<Status>,
    #[prost(string, repeated, tag = "2")]
    pub partition_names: Vec<String>,
    #[prost(int64, repeated, tag = "3")]
    pub partition_ids: Vec<i64>,
    #[prost(uint64, repeated, tag = "4")]
    pub created_timestamps: Vec<u64>,
}
