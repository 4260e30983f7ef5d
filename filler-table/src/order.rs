use crate::{OrderKey, TableError, TableHost};

/// Tracks whether the order keys held by the fillers are still trustworthy.
///
/// Inserting or removing any row shifts the logical position of every row after it, including
/// rows that are currently hidden. The flag is raised on every structural change and consumed
/// by the next reconciliation, which then re-reads the keys of all hidden rows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OrderTracker {
    dirty: bool,
}

impl OrderTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn order_of<H: TableHost>(host: &H, row: H::Node) -> Result<OrderKey, TableError> {
        match host.order_key(row) {
            Some(order) => Ok(order),
            None => {
                vwarn!(row = ?row, "row has no order key");
                Err(TableError::MissingOrderKey)
            }
        }
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clears the flag and returns its previous value.
    pub fn take_dirty(&mut self) -> bool {
        core::mem::take(&mut self.dirty)
    }
}
