use crate::error::{MbgError, Result};
use crate::models::{StandardGroupId, ThresholdRecord};
use crate::reference::ReferenceData;

/// Threshold record for a resolved group.
///
/// A missing row means the resolver tables and the standards table disagree,
/// so it is reported as a config error rather than defaulted.
pub fn get_threshold<'a>(group_id: &StandardGroupId, data: &'a ReferenceData) -> Result<&'a ThresholdRecord> {
    data.standard(group_id)
        .ok_or_else(|| MbgError::Config(format!("standard not found for group {}", group_id)))
}
