//! Coordinator broker
//!
//! Single entry point for every metadata lookup made during collection load
//! and recovery. Each operation:
//! 1. checks that the owning coordinator is wired,
//! 2. builds the request by value from its arguments,
//! 3. runs the remote call under the caller's `CallContext`,
//! 4. validates the envelope status,
//! 5. extracts or reshapes the payload.
//!
//! Failures return immediately; nothing is retried here.

use crate::broker::client::{DataCoordClient, RootCoordClient};
use crate::broker::transform::flatten_segment_index;
use crate::common::status::{check_response, CODE_SEGMENT_NOT_FOUND};
use crate::common::{Authority, CallContext, EntityKind, Error, Result};
use crate::proto::common::{ErrorCode, MsgBase, MsgType, Status};
use crate::proto::data::{
    GetRecoveryInfoRequest, GetRecoveryInfoRequestV2, GetSegmentInfoRequest,
    GetSegmentInfoResponse, SegmentBinlogs, SegmentInfo, VchannelInfo,
};
use crate::proto::index::{DescribeIndexRequest, GetIndexInfoRequest, IndexInfo};
use crate::proto::milvus::{DescribeCollectionRequest, ShowPartitionsRequest};
use crate::proto::query::FieldIndexInfo;
use crate::proto::schema::CollectionSchema;
use crate::proto::Envelope;
use std::future::Future;
use std::sync::Arc;

pub struct CoordinatorBroker {
    data_coord: Option<Arc<dyn DataCoordClient>>,
    root_coord: Option<Arc<dyn RootCoordClient>>,
    /// Node ID stamped into request headers
    source_id: i64,
}

impl CoordinatorBroker {
    /// Either client may be `None` when its operations are never used.
    pub fn new(
        data_coord: Option<Arc<dyn DataCoordClient>>,
        root_coord: Option<Arc<dyn RootCoordClient>>,
    ) -> Self {
        Self {
            data_coord,
            root_coord,
            source_id: 0,
        }
    }

    pub fn with_source_id(mut self, source_id: i64) -> Self {
        self.source_id = source_id;
        self
    }

    pub fn has_root_coord(&self) -> bool {
        self.root_coord.is_some()
    }

    pub fn has_data_coord(&self) -> bool {
        self.data_coord.is_some()
    }

    fn root_coord(&self) -> Result<&dyn RootCoordClient> {
        self.root_coord
            .as_deref()
            .ok_or(Error::MissingCapability(Authority::RootCoord))
    }

    fn data_coord(&self) -> Result<&dyn DataCoordClient> {
        self.data_coord
            .as_deref()
            .ok_or(Error::MissingCapability(Authority::DataCoord))
    }

    fn msg_base(&self, msg_type: MsgType) -> Option<MsgBase> {
        Some(MsgBase {
            msg_type: msg_type as i32,
            source_id: self.source_id,
            ..Default::default()
        })
    }

    /// Fetch the schema of a collection from the root coordinator.
    pub async fn get_collection_schema(
        &self,
        ctx: &CallContext,
        collection_id: i64,
    ) -> Result<CollectionSchema> {
        const OP: &str = "DescribeCollection";
        let root_coord = self.root_coord()?;
        let req = DescribeCollectionRequest {
            base: self.msg_base(MsgType::DescribeCollection),
            collection_id,
            ..Default::default()
        };

        let resp = call(
            ctx,
            OP,
            format!("collection_id={}", collection_id),
            root_coord.describe_collection(ctx, req),
        )
        .await?;

        let schema = resp.schema.ok_or_else(|| Error::MalformedResponse {
            op: OP,
            reason: format!("no schema for collection {}", collection_id),
        })?;
        tracing::debug!(collection_id, schema = %schema.name, "fetched collection schema");
        Ok(schema)
    }

    /// List partition IDs of a collection.
    ///
    /// A missing collection is reported as `Error::NotFound` with
    /// `EntityKind::Collection`.
    pub async fn get_partitions(&self, ctx: &CallContext, collection_id: i64) -> Result<Vec<i64>> {
        const OP: &str = "ShowPartitions";
        let root_coord = self.root_coord()?;
        let req = ShowPartitionsRequest {
            base: self.msg_base(MsgType::ShowPartitions),
            collection_id,
            ..Default::default()
        };

        let resp = call(
            ctx,
            OP,
            format!("collection_id={}", collection_id),
            root_coord.show_partitions(ctx, req),
        )
        .await?;

        tracing::debug!(
            collection_id,
            partitions = resp.partition_ids.len(),
            "fetched partitions"
        );
        Ok(resp.partition_ids)
    }

    /// Recovery info, v1 protocol: channels plus per-segment binlog references.
    pub async fn get_recovery_info(
        &self,
        ctx: &CallContext,
        collection_id: i64,
        partition_id: i64,
    ) -> Result<(Vec<VchannelInfo>, Vec<SegmentBinlogs>)> {
        const OP: &str = "GetRecoveryInfo";
        let data_coord = self.data_coord()?;
        let req = GetRecoveryInfoRequest {
            base: self.msg_base(MsgType::GetRecoveryInfo),
            collection_id,
            partition_id,
        };

        let resp = call(
            ctx,
            OP,
            format!(
                "collection_id={}, partition_id={}",
                collection_id, partition_id
            ),
            data_coord.get_recovery_info(ctx, req),
        )
        .await?;

        tracing::debug!(
            collection_id,
            partition_id,
            channels = resp.channels.len(),
            segments = resp.binlogs.len(),
            "fetched recovery info"
        );
        Ok((resp.channels, resp.binlogs))
    }

    /// Recovery info, v2 protocol: channels plus full segment infos.
    ///
    /// An empty `partition_ids` asks for every partition of the collection.
    pub async fn get_recovery_info_v2(
        &self,
        ctx: &CallContext,
        collection_id: i64,
        partition_ids: &[i64],
    ) -> Result<(Vec<VchannelInfo>, Vec<SegmentInfo>)> {
        const OP: &str = "GetRecoveryInfoV2";
        let data_coord = self.data_coord()?;
        let req = GetRecoveryInfoRequestV2 {
            base: self.msg_base(MsgType::GetRecoveryInfo),
            collection_id,
            partition_ids: partition_ids.to_vec(),
        };

        let resp = call(
            ctx,
            OP,
            format!(
                "collection_id={}, partition_ids={:?}",
                collection_id, partition_ids
            ),
            data_coord.get_recovery_info_v2(ctx, req),
        )
        .await?;

        tracing::debug!(
            collection_id,
            channels = resp.channels.len(),
            segments = resp.segments.len(),
            "fetched recovery info v2"
        );
        Ok((resp.channels, resp.segments))
    }

    /// Index definitions of a collection.
    pub async fn describe_index(
        &self,
        ctx: &CallContext,
        collection_id: i64,
    ) -> Result<Vec<IndexInfo>> {
        const OP: &str = "DescribeIndex";
        let data_coord = self.data_coord()?;
        let req = DescribeIndexRequest {
            collection_id,
            ..Default::default()
        };

        let resp = call(
            ctx,
            OP,
            format!("collection_id={}", collection_id),
            data_coord.describe_index(ctx, req),
        )
        .await?;

        Ok(resp.index_infos)
    }

    /// Segment infos, returned as the whole response so callers can read
    /// the channel checkpoints as well.
    pub async fn get_segment_info(
        &self,
        ctx: &CallContext,
        segment_ids: &[i64],
    ) -> Result<GetSegmentInfoResponse> {
        const OP: &str = "GetSegmentInfo";
        let data_coord = self.data_coord()?;
        if segment_ids.is_empty() {
            return Ok(GetSegmentInfoResponse {
                status: Some(Status::success()),
                ..Default::default()
            });
        }

        let req = GetSegmentInfoRequest {
            base: self.msg_base(MsgType::SegmentInfo),
            segment_ids: segment_ids.to_vec(),
            include_unhealthy: true,
        };

        let resp = call(
            ctx,
            OP,
            format!("segment_ids={:?}", segment_ids),
            data_coord.get_segment_info(ctx, req),
        )
        .await?;

        if resp.infos.is_empty() {
            tracing::warn!(?segment_ids, "no such segment in data coordinator");
            return Err(Error::NotFound {
                kind: EntityKind::Segment,
                code: CODE_SEGMENT_NOT_FOUND,
                error_code: ErrorCode::Success as i32,
                reason: format!("segments {:?}", segment_ids),
            });
        }
        Ok(resp)
    }

    /// Per-field index records of one segment.
    ///
    /// A segment without index data yields an empty vector, not an error.
    pub async fn get_index_info(
        &self,
        ctx: &CallContext,
        collection_id: i64,
        segment_id: i64,
    ) -> Result<Vec<FieldIndexInfo>> {
        const OP: &str = "GetIndexInfos";
        let data_coord = self.data_coord()?;
        let req = GetIndexInfoRequest {
            collection_id,
            segment_ids: vec![segment_id],
            ..Default::default()
        };

        let resp = call(
            ctx,
            OP,
            format!(
                "collection_id={}, segment_id={}",
                collection_id, segment_id
            ),
            data_coord.get_index_infos(ctx, req),
        )
        .await?;

        let infos = flatten_segment_index(&resp.segment_info, segment_id);
        if infos.is_empty() {
            tracing::debug!(collection_id, segment_id, "segment has no index info");
        }
        Ok(infos)
    }
}

/// Run one remote call under `ctx` and validate its envelope.
async fn call<R, F>(ctx: &CallContext, op: &'static str, args: String, fut: F) -> Result<R>
where
    R: Envelope,
    F: Future<Output = std::result::Result<R, tonic::Status>>,
{
    let resp = match ctx.run(fut).await {
        Ok(resp) => resp,
        Err(source) => {
            tracing::warn!(
                op,
                %args,
                code = ?source.code(),
                "remote call failed: {}",
                source.message()
            );
            return Err(Error::RemoteCallFailed { op, args, source });
        }
    };

    if let Err(err) = check_response(op, &resp) {
        tracing::warn!(op, %args, error = %err, "coordinator returned failure status");
        return Err(err);
    }
    Ok(resp)
}
