use alloc::vec::Vec;

use filler_table::{NodeKind, OrderKey, ScrollViewport, TableHost};

use crate::AdapterError;

/// A generation-counted handle into an [`ArenaTable`].
///
/// Handles to removed nodes stay detectably stale even after their slot is reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId {
    index: u32,
    generation: u32,
}

#[derive(Clone, Debug)]
struct NodeData {
    kind: NodeKind,
    displayed: bool,
    // Intrinsic height for rows, the height property for fillers.
    height: f32,
    order: Option<OrderKey>,
    offset: f32,
    measured: f32,
}

impl NodeData {
    fn new(kind: NodeKind, height: f32) -> Self {
        Self {
            kind,
            displayed: true,
            height,
            order: None,
            offset: 0.0,
            measured: 0.0,
        }
    }
}

#[derive(Clone, Debug)]
struct Slot {
    generation: u32,
    data: Option<NodeData>,
}

/// An in-memory table inside a vertical scroll container.
///
/// The body holds the top filler, the rows in document order, then the bottom filler. Rows are
/// laid out as stacked blocks; hidden rows take no space. Layout metrics only change when
/// [`ArenaTable::layout`] runs.
///
/// Row order keys follow document order and are renumbered on every insert/remove, the way a
/// data binding would rewrite a `data-order` attribute.
///
/// Rows are added and removed through [`crate::TableController`], which notifies the
/// [`filler_table::FillerTable`] tracking the tree.
#[derive(Clone, Debug)]
pub struct ArenaTable {
    slots: Vec<Slot>,
    free: Vec<u32>,
    body: NodeId,
    top: NodeId,
    bottom: NodeId,
    rows: Vec<NodeId>,
    viewport_height: f32,
    scroll_offset: f32,
    content_height: f32,
}

impl ArenaTable {
    pub fn new(viewport_height: f32) -> Self {
        let mut table = Self {
            slots: Vec::new(),
            free: Vec::new(),
            body: NodeId {
                index: 0,
                generation: 0,
            },
            top: NodeId {
                index: 0,
                generation: 0,
            },
            bottom: NodeId {
                index: 0,
                generation: 0,
            },
            rows: Vec::new(),
            viewport_height,
            scroll_offset: 0.0,
            content_height: 0.0,
        };
        table.body = table.alloc(NodeData::new(NodeKind::Body, 0.0));
        table.top = table.alloc(NodeData::new(NodeKind::TopFiller, 0.0));
        table.bottom = table.alloc(NodeData::new(NodeKind::BottomFiller, 0.0));
        table
    }

    fn alloc(&mut self, data: NodeData) -> NodeId {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.data = Some(data);
            return NodeId {
                index,
                generation: slot.generation,
            };
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            data: Some(data),
        });
        NodeId {
            index,
            generation: 0,
        }
    }

    fn get(&self, id: NodeId) -> Option<&NodeData> {
        let slot = self.slots.get(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.data.as_ref()
    }

    fn get_mut(&mut self, id: NodeId) -> Option<&mut NodeData> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.data.as_mut()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    pub fn top_filler(&self) -> NodeId {
        self.top
    }

    pub fn bottom_filler(&self) -> NodeId {
        self.bottom
    }

    /// Rows in document order, displayed or not.
    pub fn rows(&self) -> &[NodeId] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn displayed_rows(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.rows.iter().copied().filter(|&id| self.is_displayed(id))
    }

    /// The height property of a node (the spacer height for fillers).
    pub fn height_property(&self, id: NodeId) -> Option<f32> {
        self.get(id).map(|n| n.height)
    }

    pub(crate) fn push_row(&mut self, height: f32) -> NodeId {
        self.insert_row(self.rows.len(), height)
    }

    /// Inserts a row at `index` (clamped to the row count).
    pub(crate) fn insert_row(&mut self, index: usize, height: f32) -> NodeId {
        let id = self.alloc(NodeData::new(NodeKind::Row, height));
        let index = index.min(self.rows.len());
        self.rows.insert(index, id);
        self.renumber(index);
        id
    }

    pub(crate) fn remove_row(&mut self, id: NodeId) -> Result<(), AdapterError> {
        let Some(position) = self.rows.iter().position(|&r| r == id) else {
            return Err(AdapterError::UnknownRow(id));
        };
        self.rows.remove(position);
        let slot = &mut self.slots[id.index as usize];
        slot.data = None;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.renumber(position);
        Ok(())
    }

    pub fn set_row_height(&mut self, id: NodeId, height: f32) -> Result<(), AdapterError> {
        match self.get_mut(id) {
            Some(node) if node.kind == NodeKind::Row => {
                node.height = height;
                Ok(())
            }
            _ => Err(AdapterError::UnknownRow(id)),
        }
    }

    fn renumber(&mut self, from: usize) {
        for i in from..self.rows.len() {
            let id = self.rows[i];
            if let Some(node) = self.get_mut(id) {
                node.order = Some(i as OrderKey);
            }
        }
    }

    pub fn viewport_height(&self) -> f32 {
        self.viewport_height
    }

    pub fn set_viewport_height(&mut self, height: f32) {
        self.viewport_height = height.max(0.0);
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    /// The largest scroll offset the last layout allows.
    pub fn max_scroll_offset(&self) -> f32 {
        (self.content_height - self.viewport_height).max(0.0)
    }

    /// Sets the scroll offset, clamped to the content laid out by the last layout pass.
    pub fn set_scroll_offset(&mut self, offset: f32) {
        self.scroll_offset = offset.clamp(0.0, self.max_scroll_offset());
    }

    /// Runs block layout over the body: the fillers and every displayed row are stacked in
    /// document order.
    pub fn layout(&mut self) {
        let mut y = 0.0f32;
        let order = core::iter::once(self.top)
            .chain(self.rows.iter().copied())
            .chain(core::iter::once(self.bottom))
            .collect::<Vec<_>>();
        for id in order {
            if let Some(node) = self.get_mut(id) {
                node.offset = y;
                node.measured = if node.displayed {
                    node.height.max(0.0)
                } else {
                    0.0
                };
                y += node.measured;
            }
        }
        self.content_height = y;
        self.scroll_offset = self.scroll_offset.clamp(0.0, self.max_scroll_offset());
    }
}

impl TableHost for ArenaTable {
    type Node = NodeId;

    fn classify(&self, node: NodeId) -> NodeKind {
        self.get(node).map_or(NodeKind::Row, |n| n.kind)
    }

    fn child_count(&self, parent: NodeId) -> usize {
        if parent == self.body {
            self.rows.len() + 2
        } else {
            0
        }
    }

    fn child(&self, parent: NodeId, index: usize) -> Option<NodeId> {
        if parent != self.body {
            return None;
        }
        let rows = self.rows.len();
        match index {
            0 => Some(self.top),
            i if i <= rows => Some(self.rows[i - 1]),
            i if i == rows + 1 => Some(self.bottom),
            _ => None,
        }
    }

    fn order_key(&self, row: NodeId) -> Option<OrderKey> {
        self.get(row).and_then(|n| n.order)
    }

    fn scroll_viewport(&self) -> Option<ScrollViewport> {
        Some(ScrollViewport::new(self.viewport_height, self.scroll_offset))
    }

    fn content_height(&self) -> f32 {
        self.content_height
    }

    fn offset_top(&self, node: NodeId) -> f32 {
        self.get(node).map_or(0.0, |n| n.offset)
    }

    fn offset_height(&self, node: NodeId) -> f32 {
        self.get(node).map_or(0.0, |n| n.measured)
    }

    fn client_height(&self, node: NodeId) -> f32 {
        self.get(node).map_or(0.0, |n| n.measured)
    }

    fn is_displayed(&self, node: NodeId) -> bool {
        self.get(node).is_some_and(|n| n.displayed)
    }

    fn set_displayed(&mut self, node: NodeId, displayed: bool) {
        if let Some(n) = self.get_mut(node) {
            n.displayed = displayed;
        }
    }

    fn set_height(&mut self, node: NodeId, height: f32) {
        if let Some(n) = self.get_mut(node) {
            n.height = height;
        }
    }
}
