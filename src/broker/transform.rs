//! Payload reshaping that does not depend on the remote call

use crate::proto::index::{IndexFilePathInfo, SegmentIndexInfo};
use crate::proto::query::FieldIndexInfo;
use std::collections::HashMap;

/// Convert one index file record into the query-side field index record.
pub fn field_index_info(info: &IndexFilePathInfo) -> FieldIndexInfo {
    FieldIndexInfo {
        field_id: info.field_id,
        enable_index: true,
        index_name: info.index_name.clone(),
        index_id: info.index_id,
        build_id: info.build_id,
        index_params: info.index_params.clone(),
        index_file_paths: info.index_file_paths.clone(),
        index_size: i64::try_from(info.serialized_size).unwrap_or(i64::MAX),
        index_version: info.index_version,
        num_rows: info.num_rows,
        current_index_version: info.current_index_version,
    }
}

/// Flatten the index records stored under `segment_id`.
///
/// Records keep the order they have in the nested sequence. A segment
/// absent from the map yields an empty vector.
pub fn flatten_segment_index(
    segments: &HashMap<i64, SegmentIndexInfo>,
    segment_id: i64,
) -> Vec<FieldIndexInfo> {
    segments
        .get(&segment_id)
        .map(|seg| seg.index_infos.iter().map(field_index_info).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proto::common::KeyValuePair;

    fn segment(segment_id: i64, index_ids: &[i64]) -> SegmentIndexInfo {
        SegmentIndexInfo {
            segment_id,
            index_infos: index_ids
                .iter()
                .map(|&index_id| IndexFilePathInfo {
                    segment_id,
                    index_id,
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_flatten_keeps_order() {
        let segments = HashMap::from([(10000, segment(10000, &[3, 1, 2]))]);
        let ids: Vec<i64> = flatten_segment_index(&segments, 10000)
            .iter()
            .map(|info| info.index_id)
            .collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_flatten_absent_segment() {
        let segments = HashMap::from([(10000, segment(10000, &[1]))]);
        assert!(flatten_segment_index(&segments, 99999).is_empty());
        assert!(flatten_segment_index(&HashMap::new(), 10000).is_empty());
    }

    #[test]
    fn test_flatten_only_requested_segment() {
        let segments = HashMap::from([
            (1, segment(1, &[10, 11])),
            (2, segment(2, &[20])),
        ]);
        let infos = flatten_segment_index(&segments, 2);
        assert_eq!(infos.len(), 1);
        assert_eq!(infos[0].index_id, 20);
    }

    #[test]
    fn test_field_index_info_copies_fields() {
        let info = IndexFilePathInfo {
            segment_id: 1,
            field_id: 101,
            index_id: 7,
            build_id: 70,
            index_name: "vec_idx".into(),
            index_params: vec![KeyValuePair::new("index_type", "HNSW")],
            index_file_paths: vec!["files/index/70/1".into(), "files/index/70/2".into()],
            serialized_size: 4096,
            index_version: 2,
            num_rows: 1000,
            current_index_version: 4,
        };
        let field = field_index_info(&info);
        assert!(field.enable_index);
        assert_eq!(field.field_id, 101);
        assert_eq!(field.index_id, 7);
        assert_eq!(field.build_id, 70);
        assert_eq!(field.index_name, "vec_idx");
        assert_eq!(field.index_params, info.index_params);
        assert_eq!(field.index_file_paths, info.index_file_paths);
        assert_eq!(field.index_size, 4096);
        assert_eq!(field.index_version, 2);
        assert_eq!(field.num_rows, 1000);
        assert_eq!(field.current_index_version, 4);
    }
}
