//! Wire messages exchanged with the coordinator services
//!
//! Messages are declared with `prost` derives instead of generated from
//! `.proto` files, grouped by the package they belong to:
//! - `common`: envelope status and request header
//! - `schema`: collection and field schemas
//! - `milvus`: collection-authority (root coordinator) API
//! - `data`: data-authority recovery and segment API
//! - `index`: data-authority index API
//! - `query`: records handed to the query side

pub mod common;
pub mod data;
pub mod index;
pub mod milvus;
pub mod query;
pub mod schema;

use common::Status;

/// A response that carries an envelope status.
pub trait Envelope {
    /// The envelope status, `None` when the authority omitted it.
    fn envelope_status(&self) -> Option<&Status>;
}

macro_rules! impl_envelope {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Envelope for $ty {
                fn envelope_status(&self) -> Option<&Status> {
                    self.status.as_ref()
                }
            }
        )+
    };
}

impl_envelope!(
    milvus::DescribeCollectionResponse,
    milvus::ShowPartitionsResponse,
    data::GetRecoveryInfoResponse,
    data::GetRecoveryInfoResponseV2,
    data::GetSegmentInfoResponse,
    index::DescribeIndexResponse,
    index::GetIndexInfoResponse,
);
