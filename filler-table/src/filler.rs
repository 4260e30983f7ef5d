use alloc::collections::VecDeque;
use alloc::vec::Vec;

use crate::order::OrderTracker;
use crate::{FillerSide, OrderKey, TableError, TableHost};

/// A row hidden behind a filler, together with the order key it had when last read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HiddenRow<N> {
    pub row: N,
    pub order: OrderKey,
}

/// A spacer element standing in for a contiguous run of hidden rows.
///
/// The top filler keeps its rows ascending toward the viewport (the last row is the closest);
/// the bottom filler keeps them ascending away from it (the first row is the closest).
#[derive(Clone, Debug)]
pub struct Filler<N> {
    side: FillerSide,
    element: Option<N>,
    hidden: VecDeque<HiddenRow<N>>,
}

impl<N: Copy + Eq + core::fmt::Debug> Filler<N> {
    pub fn new(side: FillerSide) -> Self {
        Self::with_capacity(side, 0)
    }

    pub fn with_capacity(side: FillerSide, capacity: usize) -> Self {
        Self {
            side,
            element: None,
            hidden: VecDeque::with_capacity(capacity),
        }
    }

    pub fn side(&self) -> FillerSide {
        self.side
    }

    /// The spacer node, once the host has reported it.
    pub fn element(&self) -> Option<N> {
        self.element
    }

    pub(crate) fn set_element(&mut self, element: Option<N>) {
        self.element = element;
    }

    /// Appends `row` with its current order key. Does not sort.
    pub fn add<H: TableHost<Node = N>>(&mut self, host: &H, row: N) -> Result<(), TableError> {
        let order = OrderTracker::order_of(host, row)?;
        self.hidden.push_back(HiddenRow { row, order });
        Ok(())
    }

    /// Removes `row`, keeping the relative order of the remaining rows.
    ///
    /// Returns `false` when the row was not held by this filler.
    pub fn remove(&mut self, row: N) -> bool {
        let before = self.hidden.len();
        self.hidden.retain(|it| it.row != row);
        self.hidden.len() != before
    }

    /// Re-reads the order key of every held row.
    ///
    /// Rows that no longer have a key (typically handles the host destroyed without notifying
    /// the table) are dropped and returned. Their visibility is left to the caller.
    pub fn recalculate_order<H: TableHost<Node = N>>(&mut self, host: &H) -> Vec<N> {
        let mut dropped = Vec::new();
        self.hidden.retain_mut(|it| match OrderTracker::order_of(host, it.row) {
            Ok(order) => {
                it.order = order;
                true
            }
            Err(_) => {
                dropped.push(it.row);
                false
            }
        });
        dropped
    }

    /// Stable sort, ascending by order key.
    pub fn sort(&mut self) {
        self.hidden.make_contiguous().sort_by_key(|it| it.order);
    }

    pub fn has_any(&self) -> bool {
        !self.hidden.is_empty()
    }

    pub fn len(&self) -> usize {
        self.hidden.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hidden.is_empty()
    }

    pub fn contains(&self, row: N) -> bool {
        self.hidden.iter().any(|it| it.row == row)
    }

    pub fn iter(&self) -> impl Iterator<Item = &HiddenRow<N>> + '_ {
        self.hidden.iter()
    }

    /// The row with the lowest position (after a sort).
    ///
    /// Calling this on an empty filler is a logic error: it panics in debug builds and returns
    /// `None` otherwise.
    pub fn peek_first(&self) -> Option<N> {
        if self.hidden.is_empty() {
            vwarn!(side = %self.side, "peek_first on an empty filler");
        }
        debug_assert!(self.has_any(), "peek_first on an empty {} filler", self.side);
        self.hidden.front().map(|it| it.row)
    }

    /// The row with the highest position (after a sort).
    ///
    /// Same contract as [`Filler::peek_first`].
    pub fn peek_last(&self) -> Option<N> {
        if self.hidden.is_empty() {
            vwarn!(side = %self.side, "peek_last on an empty filler");
        }
        debug_assert!(self.has_any(), "peek_last on an empty {} filler", self.side);
        self.hidden.back().map(|it| it.row)
    }

    /// Removes and returns the row with the lowest position, the one closest to the viewport
    /// for the bottom filler.
    pub fn pop_first(&mut self) -> Option<N> {
        self.hidden.pop_front().map(|it| it.row)
    }

    /// Removes and returns the row with the highest position, the one closest to the viewport
    /// for the top filler.
    pub fn pop_last(&mut self) -> Option<N> {
        self.hidden.pop_back().map(|it| it.row)
    }

    /// Height the spacer should have for `row_height` sized rows.
    pub fn height_for(&self, row_height: f32) -> f32 {
        self.hidden.len() as f32 * row_height
    }

    /// Writes `len() * row_height` to the spacer's height.
    pub fn update_height<H: TableHost<Node = N>>(
        &self,
        host: &mut H,
        row_height: f32,
    ) -> Result<(), TableError> {
        let element = self.element.ok_or(TableError::MissingFiller(self.side))?;
        host.set_height(element, self.height_for(row_height));
        Ok(())
    }

    /// Drops all held rows without touching their visibility.
    pub fn clear(&mut self) {
        self.hidden.clear();
    }
}
