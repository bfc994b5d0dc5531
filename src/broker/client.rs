//! Capability traits for the two coordinator services
//!
//! The broker only sees these traits. Implementations must be safe to call
//! from many tasks at once; `grpc` provides the tonic-backed ones.

use crate::common::CallContext;
use crate::proto::data::{
    GetRecoveryInfoRequest, GetRecoveryInfoRequestV2, GetRecoveryInfoResponse,
    GetRecoveryInfoResponseV2, GetSegmentInfoRequest, GetSegmentInfoResponse,
};
use crate::proto::index::{
    DescribeIndexRequest, DescribeIndexResponse, GetIndexInfoRequest, GetIndexInfoResponse,
};
use crate::proto::milvus::{
    DescribeCollectionRequest, DescribeCollectionResponse, ShowPartitionsRequest,
    ShowPartitionsResponse,
};
use tonic::Status;

/// Collection authority: schemas and partitions.
#[tonic::async_trait]
pub trait RootCoordClient: Send + Sync {
    async fn describe_collection(
        &self,
        ctx: &CallContext,
        req: DescribeCollectionRequest,
    ) -> Result<DescribeCollectionResponse, Status>;

    async fn show_partitions(
        &self,
        ctx: &CallContext,
        req: ShowPartitionsRequest,
    ) -> Result<ShowPartitionsResponse, Status>;
}

/// Data authority: recovery info, segments and indexes.
#[tonic::async_trait]
pub trait DataCoordClient: Send + Sync {
    async fn get_recovery_info(
        &self,
        ctx: &CallContext,
        req: GetRecoveryInfoRequest,
    ) -> Result<GetRecoveryInfoResponse, Status>;

    async fn get_recovery_info_v2(
        &self,
        ctx: &CallContext,
        req: GetRecoveryInfoRequestV2,
    ) -> Result<GetRecoveryInfoResponseV2, Status>;

    async fn describe_index(
        &self,
        ctx: &CallContext,
        req: DescribeIndexRequest,
    ) -> Result<DescribeIndexResponse, Status>;

    async fn get_segment_info(
        &self,
        ctx: &CallContext,
        req: GetSegmentInfoRequest,
    ) -> Result<GetSegmentInfoResponse, Status>;

    async fn get_index_infos(
        &self,
        ctx: &CallContext,
        req: GetIndexInfoRequest,
    ) -> Result<GetIndexInfoResponse, Status>;
}
