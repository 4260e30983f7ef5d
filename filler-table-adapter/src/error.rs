use filler_table::TableError;

use crate::NodeId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AdapterError {
    /// The handle does not refer to a live row of the table.
    #[error("unknown or stale row handle {0:?}")]
    UnknownRow(NodeId),

    #[error(transparent)]
    Table(#[from] TableError),
}
