//! Remote dataset handles

use tracing::info;

use crate::client::{Cluster, ColumnInfo, ColumnType, ColumnTypeRequest, FrameInfo};
use crate::error::Result;

/// Handle to a dataset living on the cluster.
///
/// The schema is cached locally and refreshed whenever an operation changes
/// it on the server.
pub struct FrameHandle {
    info: FrameInfo,
}

impl FrameHandle {
    pub(crate) fn new(info: FrameInfo) -> Self {
        Self { info }
    }

    pub fn id(&self) -> &str {
        &self.info.id
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    pub fn rows(&self) -> usize {
        self.info.rows
    }

    pub fn width(&self) -> usize {
        self.info.columns.len()
    }

    pub fn columns(&self) -> &[ColumnInfo] {
        &self.info.columns
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&ColumnInfo> {
        self.info.columns.iter().find(|c| c.name == name)
    }

    /// Reinterpret a column as categorical, in place, then refresh the cached
    /// schema from the cluster's view of the frame. An unknown column is an
    /// error surfaced by the cluster.
    pub fn to_categorical(&mut self, cluster: &Cluster, column: &str) -> Result<()> {
        let request = ColumnTypeRequest {
            dtype: ColumnType::Categorical,
        };
        let updated: FrameInfo = cluster.put(
            &format!("/api/frames/{}/columns/{}", self.info.id, column),
            &request,
        )?;
        info!(frame_id = %self.info.id, column = %column, "Column reinterpreted as categorical");
        self.info = updated;
        Ok(())
    }
}
