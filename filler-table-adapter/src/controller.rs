use filler_table::{FillerTable, NodeKind, TableHost, TableOptions, UpdateOutcome};

use crate::{AdapterError, ArenaTable, NodeId};

/// A framework-neutral controller that owns an [`ArenaTable`] and the [`FillerTable`] tracking it.
///
/// Every structural change goes through the controller so the table is notified before a row
/// handle dies. A structural change also invalidates the table: removing hidden rows does not
/// change the laid out content height, so the trigger gate alone would leave stale spacers.
///
/// Adapters drive it by calling:
/// - `push_row` / `insert_row` / `remove_row` / `set_row_count` when the data set changes
/// - `on_viewport_height` / `on_scroll` when UI events occur
/// - `tick()` once per frame: layout, reconcile, layout
#[derive(Clone, Debug)]
pub struct TableController {
    tree: ArenaTable,
    table: FillerTable<NodeId>,
}

impl TableController {
    pub fn new(viewport_height: f32, options: TableOptions) -> Self {
        let tree = ArenaTable::new(viewport_height);
        let mut table = FillerTable::new(options);
        table.on_child_add(&tree, tree.body());
        table.on_child_add(&tree, tree.top_filler());
        table.on_child_add(&tree, tree.bottom_filler());
        Self { tree, table }
    }

    /// Builds a controller holding `rows` rows of `row_height`.
    pub fn with_rows(viewport_height: f32, rows: usize, row_height: f32) -> Self {
        let mut c = Self::new(viewport_height, TableOptions::default());
        c.set_row_count(rows, row_height);
        c
    }

    pub fn tree(&self) -> &ArenaTable {
        &self.tree
    }

    pub fn table(&self) -> &FillerTable<NodeId> {
        &self.table
    }

    pub fn into_parts(self) -> (ArenaTable, FillerTable<NodeId>) {
        (self.tree, self.table)
    }

    pub fn push_row(&mut self, height: f32) -> NodeId {
        let id = self.tree.push_row(height);
        self.table.on_child_add(&self.tree, id);
        self.table.invalidate();
        id
    }

    pub fn insert_row(&mut self, index: usize, height: f32) -> NodeId {
        let id = self.tree.insert_row(index, height);
        self.table.on_child_add(&self.tree, id);
        self.table.invalidate();
        id
    }

    pub fn remove_row(&mut self, id: NodeId) -> Result<(), AdapterError> {
        if !self.tree.contains(id) || self.tree.classify(id) != NodeKind::Row {
            return Err(AdapterError::UnknownRow(id));
        }
        self.table.on_child_remove(&self.tree, id);
        self.table.invalidate();
        self.tree.remove_row(id)
    }

    /// Grows or shrinks the row list at its end, like a data binding re-rendering a list.
    ///
    /// Returns the number of rows added (positive) or removed (negative).
    pub fn set_row_count(&mut self, count: usize, row_height: f32) -> isize {
        let before = self.tree.row_count();
        while self.tree.row_count() < count {
            self.push_row(row_height);
        }
        while self.tree.row_count() > count {
            let Some(&last) = self.tree.rows().last() else {
                break;
            };
            self.table.on_child_remove(&self.tree, last);
            self.table.invalidate();
            if self.tree.remove_row(last).is_err() {
                break;
            }
        }
        let delta = self.tree.row_count() as isize - before as isize;
        if delta != 0 {
            vdebug!(before, after = self.tree.row_count(), "TableController::set_row_count");
        }
        delta
    }

    pub fn on_viewport_height(&mut self, height: f32) {
        self.tree.set_viewport_height(height);
    }

    /// Call this when the UI reports a scroll offset change. Returns the clamped offset.
    pub fn on_scroll(&mut self, scroll_offset: f32) -> f32 {
        self.tree.set_scroll_offset(scroll_offset);
        self.tree.scroll_offset()
    }

    /// Advances one frame: lays out the tree, reconciles the table, then lays out again so the
    /// metrics reflect the new visibility and spacer heights.
    pub fn tick(&mut self) -> Result<UpdateOutcome, AdapterError> {
        self.tree.layout();
        let outcome = self.table.update(&mut self.tree)?;
        self.tree.layout();
        vtrace!(
            scroll_offset = self.tree.scroll_offset(),
            skipped = outcome.is_skipped(),
            "TableController::tick"
        );
        Ok(outcome)
    }

    /// Ticks until the table is stable, up to `max_frames` reconciled frames.
    ///
    /// Each frame only grows or shrinks the visible window from its edges, so a large jump can
    /// leave far too many rows displayed without changing the content height. A frame that
    /// hid or revealed rows therefore forces the next one past the trigger gate. Returns the
    /// number of frames that reconciled.
    pub fn settle(&mut self, max_frames: usize) -> Result<usize, AdapterError> {
        let mut frames = 0usize;
        while frames < max_frames {
            let UpdateOutcome::Reconciled(report) = self.tick()? else {
                break;
            };
            frames += 1;
            if !report.is_quiet() {
                self.table.invalidate();
            }
        }
        Ok(frames)
    }

    /// Shows every hidden row and collapses both spacers.
    pub fn reveal_all(&mut self) -> Result<usize, AdapterError> {
        let revealed = self.table.reveal_all(&mut self.tree)?;
        self.tree.layout();
        Ok(revealed)
    }
}
