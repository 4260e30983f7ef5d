use core::fmt;

use crate::{NodeKind, OrderKey, ScrollViewport};

/// The host UI tree, as seen by [`crate::FillerTable`].
///
/// The table never creates or destroys nodes. It only reads layout metrics, toggles row
/// visibility and writes the two spacer heights. Layout metrics are expected to reflect the
/// host's most recent layout pass; the table does not re-run layout between reads.
///
/// `Node` is a non-owning handle. The host must notify the table (via
/// [`crate::FillerTable::on_child_remove`]) before a tracked node is destroyed.
pub trait TableHost {
    type Node: Copy + Eq + fmt::Debug;

    fn classify(&self, node: Self::Node) -> NodeKind;

    fn child_count(&self, parent: Self::Node) -> usize;

    /// Returns the child at `index` in document order.
    fn child(&self, parent: Self::Node, index: usize) -> Option<Self::Node>;

    /// The row's logical position in the whole table.
    fn order_key(&self, row: Self::Node) -> Option<OrderKey>;

    /// Geometry of the closest scrollable container, or `None` if the table is not inside one.
    fn scroll_viewport(&self) -> Option<ScrollViewport>;

    /// Client height of the table element itself.
    fn content_height(&self) -> f32;

    /// Offset of the node's top edge, in the same coordinate space as the scroll offset.
    fn offset_top(&self, node: Self::Node) -> f32;

    /// Border-box height of the node. Zero while layout has not settled.
    fn offset_height(&self, node: Self::Node) -> f32;

    fn client_height(&self, node: Self::Node) -> f32;

    fn is_displayed(&self, node: Self::Node) -> bool;

    fn set_displayed(&mut self, node: Self::Node, displayed: bool);

    fn set_height(&mut self, node: Self::Node, height: f32);
}
