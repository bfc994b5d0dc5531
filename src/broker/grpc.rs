//! tonic clients for the coordinator services
//!
//! Both clients wrap a shared `Channel`; cloning is cheap and every clone
//! multiplexes over the same connection.

use crate::broker::client::{DataCoordClient, RootCoordClient};
use crate::common::{CallContext, Result};
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
use std::time::Duration;
use tonic::codec::ProstCodec;
use tonic::codegen::http::uri::PathAndQuery;
use tonic::transport::{Channel, Endpoint};
use tonic::Status;

const ROOT_COORD_DESCRIBE_COLLECTION: &str = "/metabroker.root.RootCoord/DescribeCollection";
const ROOT_COORD_SHOW_PARTITIONS: &str = "/metabroker.root.RootCoord/ShowPartitions";

const DATA_COORD_GET_RECOVERY_INFO: &str = "/metabroker.data.DataCoord/GetRecoveryInfo";
const DATA_COORD_GET_RECOVERY_INFO_V2: &str = "/metabroker.data.DataCoord/GetRecoveryInfoV2";
const DATA_COORD_DESCRIBE_INDEX: &str = "/metabroker.data.DataCoord/DescribeIndex";
const DATA_COORD_GET_SEGMENT_INFO: &str = "/metabroker.data.DataCoord/GetSegmentInfo";
const DATA_COORD_GET_INDEX_INFOS: &str = "/metabroker.data.DataCoord/GetIndexInfos";

async fn connect_channel(addr: String, connect_timeout: Duration) -> Result<Channel> {
    let channel = Endpoint::from_shared(addr)?
        .connect_timeout(connect_timeout)
        .tcp_nodelay(true)
        .connect()
        .await?;
    Ok(channel)
}

/// Issue one unary call, forwarding the context's remaining time as the gRPC timeout.
async fn unary<Req, Resp>(
    channel: &Channel,
    ctx: &CallContext,
    path: &'static str,
    req: Req,
) -> std::result::Result<Resp, Status>
where
    Req: prost::Message + Send + Sync + 'static,
    Resp: prost::Message + Default + Send + Sync + 'static,
{
    let mut grpc = tonic::client::Grpc::new(channel.clone());
    grpc.ready()
        .await
        .map_err(|e| Status::unavailable(format!("service was not ready: {}", e)))?;

    let mut request = tonic::Request::new(req);
    if let Some(remaining) = ctx.remaining() {
        request.set_timeout(remaining);
    }

    let codec: ProstCodec<Req, Resp> = ProstCodec::default();
    let response = grpc
        .unary(request, PathAndQuery::from_static(path), codec)
        .await?;
    Ok(response.into_inner())
}

#[derive(Clone)]
pub struct RootCoordGrpcClient {
    channel: Channel,
}

impl RootCoordGrpcClient {
    pub async fn connect(addr: String, connect_timeout: Duration) -> Result<Self> {
        tracing::info!("Connecting to root coordinator at {}", addr);
        let channel = connect_channel(addr, connect_timeout).await?;
        Ok(Self::new(channel))
    }

    pub fn new(channel: Channel) -> Self {
        Self { channel }
    }
}

#[tonic::async_trait]
impl RootCoordClient for RootCoordGrpcClient {
    async fn describe_collection(
        &self,
        ctx: &CallContext,
        req: DescribeCollectionRequest,
    ) -> std::result::Result<DescribeCollectionResponse, Status> {
        unary(&self.channel, ctx, ROOT_COORD_DESCRIBE_COLLECTION, req).await
    }

    async fn show_partitions(
        &self,
        ctx: &CallContext,
        req: ShowPartitionsRequest,
    ) -> std::result::Result<ShowPartitionsResponse, Status> {
        unary(&self.channel, ctx, ROOT_COORD_SHOW_PARTITIONS, req).await
    }
}

#[derive(Clone)]
pub struct DataCoordGrpcClient {
    channel: Channel,
}

impl DataCoordGrpcClient {
    pub async fn connect(addr: String, connect_timeout: Duration) -> Result<Self> {
        tracing::info!("Connecting to data coordinator at {}", addr);
        let channel = connect_channel(addr, connect_timeout).await?;
        Ok(Self::new(channel))
    }

    pub fn new(channel: Channel) -> Self {
        Self { channel }
    }
}

#[tonic::async_trait]
impl DataCoordClient for DataCoordGrpcClient {
    async fn get_recovery_info(
        &self,
        ctx: &CallContext,
        req: GetRecoveryInfoRequest,
    ) -> std::result::Result<GetRecoveryInfoResponse, Status> {
        unary(&self.channel, ctx, DATA_COORD_GET_RECOVERY_INFO, req).await
    }

    async fn get_recovery_info_v2(
        &self,
        ctx: &CallContext,
        req: GetRecoveryInfoRequestV2,
    ) -> std::result::Result<GetRecoveryInfoResponseV2, Status> {
        unary(&self.channel, ctx, DATA_COORD_GET_RECOVERY_INFO_V2, req).await
    }

    async fn describe_index(
        &self,
        ctx: &CallContext,
        req: DescribeIndexRequest,
    ) -> std::result::Result<DescribeIndexResponse, Status> {
        unary(&self.channel, ctx, DATA_COORD_DESCRIBE_INDEX, req).await
    }

    async fn get_segment_info(
        &self,
        ctx: &CallContext,
        req: GetSegmentInfoRequest,
    ) -> std::result::Result<GetSegmentInfoResponse, Status> {
        unary(&self.channel, ctx, DATA_COORD_GET_SEGMENT_INFO, req).await
    }

    async fn get_index_infos(
        &self,
        ctx: &CallContext,
        req: GetIndexInfoRequest,
    ) -> std::result::Result<GetIndexInfoResponse, Status> {
        unary(&self.channel, ctx, DATA_COORD_GET_INDEX_INFOS, req).await
    }
}
