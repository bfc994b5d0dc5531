//! Scripted fake coordinators for broker tests
#![allow(dead_code)]

use metabroker::broker::{DataCoordClient, RootCoordClient};
use metabroker::common::CallContext;
use metabroker::proto::data::{
    GetRecoveryInfoRequest, GetRecoveryInfoRequestV2, GetRecoveryInfoResponse,
    GetRecoveryInfoResponseV2, GetSegmentInfoRequest, GetSegmentInfoResponse,
};
use metabroker::proto::index::{
    DescribeIndexRequest, DescribeIndexResponse, GetIndexInfoRequest, GetIndexInfoResponse,
};
use metabroker::proto::milvus::{
    DescribeCollectionRequest, DescribeCollectionResponse, ShowPartitionsRequest,
    ShowPartitionsResponse,
};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;
use tonic::Status;

pub type Reply<T> = Result<T, Status>;

/// Queued replies for one remote method, plus the requests it received.
pub struct Script<Req, Resp> {
    replies: Mutex<VecDeque<Reply<Resp>>>,
    requests: Mutex<Vec<Req>>,
    delay: Mutex<Option<Duration>>,
}

impl<Req, Resp> Default for Script<Req, Resp> {
    fn default() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            delay: Mutex::new(None),
        }
    }
}

impl<Req: Clone, Resp> Script<Req, Resp> {
    pub fn reply(&self, reply: Reply<Resp>) {
        self.replies.lock().unwrap().push_back(reply);
    }

    pub fn ok(&self, resp: Resp) {
        self.reply(Ok(resp));
    }

    pub fn fail(&self, status: Status) {
        self.reply(Err(status));
    }

    /// Sleep before answering.
    pub fn delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    pub fn requests(&self) -> Vec<Req> {
        self.requests.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Every queued reply was consumed.
    pub fn drained(&self) -> bool {
        self.replies.lock().unwrap().is_empty()
    }

    async fn answer(&self, req: Req) -> Reply<Resp> {
        self.requests.lock().unwrap().push(req);
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Status::internal("unexpected call")))
    }
}

#[derive(Default)]
pub struct FakeRootCoord {
    pub describe_collection: Script<DescribeCollectionRequest, DescribeCollectionResponse>,
    pub show_partitions: Script<ShowPartitionsRequest, ShowPartitionsResponse>,
}

#[tonic::async_trait]
impl RootCoordClient for FakeRootCoord {
    async fn describe_collection(
        &self,
        _ctx: &CallContext,
        req: DescribeCollectionRequest,
    ) -> Reply<DescribeCollectionResponse> {
        self.describe_collection.answer(req).await
    }

    async fn show_partitions(
        &self,
        _ctx: &CallContext,
        req: ShowPartitionsRequest,
    ) -> Reply<ShowPartitionsResponse> {
        self.show_partitions.answer(req).await
    }
}

#[derive(Default)]
pub struct FakeDataCoord {
    pub get_recovery_info: Script<GetRecoveryInfoRequest, GetRecoveryInfoResponse>,
    pub get_recovery_info_v2: Script<GetRecoveryInfoRequestV2, GetRecoveryInfoResponseV2>,
    pub describe_index: Script<DescribeIndexRequest, DescribeIndexResponse>,
    pub get_segment_info: Script<GetSegmentInfoRequest, GetSegmentInfoResponse>,
    pub get_index_infos: Script<GetIndexInfoRequest, GetIndexInfoResponse>,
}

#[tonic::async_trait]
impl DataCoordClient for FakeDataCoord {
    async fn get_recovery_info(
        &self,
        _ctx: &CallContext,
        req: GetRecoveryInfoRequest,
    ) -> Reply<GetRecoveryInfoResponse> {
        self.get_recovery_info.answer(req).await
    }

    async fn get_recovery_info_v2(
        &self,
        _ctx: &CallContext,
        req: GetRecoveryInfoRequestV2,
    ) -> Reply<GetRecoveryInfoResponseV2> {
        self.get_recovery_info_v2.answer(req).await
    }

    async fn describe_index(
        &self,
        _ctx: &CallContext,
        req: DescribeIndexRequest,
    ) -> Reply<DescribeIndexResponse> {
        self.describe_index.answer(req).await
    }

    async fn get_segment_info(
        &self,
        _ctx: &CallContext,
        req: GetSegmentInfoRequest,
    ) -> Reply<GetSegmentInfoResponse> {
        self.get_segment_info.answer(req).await
    }

    async fn get_index_infos(
        &self,
        _ctx: &CallContext,
        req: GetIndexInfoRequest,
    ) -> Reply<GetIndexInfoResponse> {
        self.get_index_infos.answer(req).await
    }
}
