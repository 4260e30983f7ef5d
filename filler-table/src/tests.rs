use crate::*;

use alloc::vec::Vec;

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_u32(&mut self, start: u32, end_exclusive: u32) -> u32 {
        debug_assert!(start < end_exclusive);
        let span = (end_exclusive - start) as u64;
        start + (self.next_u64() % span) as u32
    }
}

const BODY: usize = 0;
const TOP: usize = 1;
const BOTTOM: usize = 2;

#[derive(Clone, Debug)]
struct Node {
    kind: NodeKind,
    displayed: bool,
    height: f32,
    order: Option<OrderKey>,
    offset: f32,
    measured: f32,
}

/// A flat table: a body holding the top filler, the rows, then the bottom filler.
///
/// Metrics only change when `layout` runs, the way a real UI tree behaves between frames.
struct Grid {
    nodes: Vec<Node>,
    children: Vec<usize>,
    viewport: Option<ScrollViewport>,
    content_height: f32,
}

impl Grid {
    fn new(rows: usize, row_height: f32, viewport_height: f32) -> Self {
        let node = |kind, height| Node {
            kind,
            displayed: true,
            height,
            order: None,
            offset: 0.0,
            measured: 0.0,
        };
        let mut nodes = alloc::vec![
            node(NodeKind::Body, 0.0),
            node(NodeKind::TopFiller, 0.0),
            node(NodeKind::BottomFiller, 0.0),
        ];
        let mut children = alloc::vec![TOP];
        for i in 0..rows {
            let mut row = node(NodeKind::Row, row_height);
            row.order = Some(i as OrderKey);
            children.push(nodes.len());
            nodes.push(row);
        }
        children.push(BOTTOM);

        let mut grid = Self {
            nodes,
            children,
            viewport: Some(ScrollViewport::new(viewport_height, 0.0)),
            content_height: 0.0,
        };
        grid.layout();
        grid
    }

    fn row(&self, i: usize) -> usize {
        i + 3
    }

    fn rows(&self) -> Vec<usize> {
        self.children
            .iter()
            .copied()
            .filter(|&id| self.nodes[id].kind == NodeKind::Row)
            .collect()
    }

    fn visible_rows(&self) -> Vec<usize> {
        self.rows()
            .into_iter()
            .filter(|&id| self.nodes[id].displayed)
            .collect()
    }

    fn layout(&mut self) {
        let mut y = 0.0f32;
        for &id in &self.children {
            let node = &mut self.nodes[id];
            node.offset = y;
            node.measured = if node.displayed { node.height } else { 0.0 };
            y += node.measured;
        }
        self.content_height = y;
    }

    fn scroll_to(&mut self, offset: f32) {
        if let Some(v) = &mut self.viewport {
            v.scroll_offset = offset;
        }
    }

    /// Removes a row from the body and renumbers the remaining rows, like a data binding would.
    fn remove_row(&mut self, table: &mut FillerTable<usize>, id: usize) {
        table.on_child_remove(&*self, id);
        self.children.retain(|&c| c != id);
        let rows = self.rows();
        for (i, row) in rows.into_iter().enumerate() {
            self.nodes[row].order = Some(i as OrderKey);
        }
    }
}

impl TableHost for Grid {
    type Node = usize;

    fn classify(&self, node: usize) -> NodeKind {
        self.nodes[node].kind
    }

    fn child_count(&self, parent: usize) -> usize {
        if parent == BODY { self.children.len() } else { 0 }
    }

    fn child(&self, parent: usize, index: usize) -> Option<usize> {
        if parent != BODY {
            return None;
        }
        self.children.get(index).copied()
    }

    fn order_key(&self, row: usize) -> Option<OrderKey> {
        self.nodes[row].order
    }

    fn scroll_viewport(&self) -> Option<ScrollViewport> {
        self.viewport
    }

    fn content_height(&self) -> f32 {
        self.content_height
    }

    fn offset_top(&self, node: usize) -> f32 {
        self.nodes[node].offset
    }

    fn offset_height(&self, node: usize) -> f32 {
        self.nodes[node].measured
    }

    fn client_height(&self, node: usize) -> f32 {
        self.nodes[node].measured
    }

    fn is_displayed(&self, node: usize) -> bool {
        self.nodes[node].displayed
    }

    fn set_displayed(&mut self, node: usize, displayed: bool) {
        self.nodes[node].displayed = displayed;
    }

    fn set_height(&mut self, node: usize, height: f32) {
        self.nodes[node].height = height;
    }
}

fn bound_table(grid: &Grid) -> FillerTable<usize> {
    let mut table = FillerTable::new(TableOptions::default());
    table.on_child_add(grid, BODY);
    table.on_child_add(grid, TOP);
    table.on_child_add(grid, BOTTOM);
    table
}

/// Layout, reconcile, layout: one host frame.
fn frame(grid: &mut Grid, table: &mut FillerTable<usize>) -> UpdateOutcome {
    grid.layout();
    let outcome = table.update(grid).unwrap();
    grid.layout();
    outcome
}

fn assert_partition(grid: &Grid, table: &FillerTable<usize>) {
    for id in grid.rows() {
        let in_top = table.top_filler().contains(id);
        let in_bottom = table.bottom_filler().contains(id);
        let visible = grid.nodes[id].displayed;
        let places = [in_top, in_bottom, visible].iter().filter(|b| **b).count();
        assert_eq!(places, 1, "row {id}: top={in_top} bottom={in_bottom} visible={visible}");
    }
    assert_eq!(
        table.top_filler().len() + table.bottom_filler().len() + grid.visible_rows().len(),
        grid.rows().len()
    );
}

fn assert_sorted(filler: &Filler<usize>) {
    let orders: Vec<OrderKey> = filler.iter().map(|it| it.order).collect();
    assert!(orders.windows(2).all(|w| w[0] < w[1]), "{orders:?}");
}

#[test]
fn initial_update_hides_rows_below_viewport() {
    let mut grid = Grid::new(150, 22.0, 220.0);
    let mut table = bound_table(&grid);

    let outcome = frame(&mut grid, &mut table);
    let report = outcome.report().copied().unwrap();

    // ceil(220 / 22) + 1 rows stay visible.
    assert_eq!(grid.visible_rows().len(), 11);
    assert_eq!(report.hidden_bottom, 139);
    assert_eq!(report.hidden_top, 0);
    assert_eq!(report.row_height, 22.0);
    assert!(table.top_filler().is_empty());
    assert_eq!(table.bottom_filler().len(), 139);
    assert_eq!(grid.nodes[TOP].height, 0.0);
    assert_eq!(grid.nodes[BOTTOM].height, 139.0 * 22.0);
    assert_eq!(grid.content_height, 150.0 * 22.0);
    assert_partition(&grid, &table);
    assert_sorted(table.bottom_filler());
}

#[test]
fn unchanged_inputs_skip_the_cycle() {
    let mut grid = Grid::new(150, 22.0, 220.0);
    let mut table = bound_table(&grid);
    assert!(!frame(&mut grid, &mut table).is_skipped());

    let before: Vec<bool> = grid.nodes.iter().map(|n| n.displayed).collect();
    assert!(frame(&mut grid, &mut table).is_skipped());
    let after: Vec<bool> = grid.nodes.iter().map(|n| n.displayed).collect();
    assert_eq!(before, after);
}

#[test]
fn content_height_changes_below_tolerance_are_ignored() {
    let mut grid = Grid::new(20, 10.0, 50.0);
    let mut table = bound_table(&grid);
    frame(&mut grid, &mut table);

    grid.content_height += 1.5;
    assert!(table.update(&mut grid).unwrap().is_skipped());

    grid.content_height += 0.5;
    assert!(!table.update(&mut grid).unwrap().is_skipped());
}

#[test]
fn initial_zero_inputs_are_skipped() {
    let mut grid = Grid::new(0, 22.0, 0.0);
    let mut table = bound_table(&grid);
    assert!(table.update(&mut grid).unwrap().is_skipped());
}

#[test]
fn no_scroll_container_skips() {
    let mut grid = Grid::new(10, 22.0, 50.0);
    grid.viewport = None;
    let mut table = bound_table(&grid);
    assert!(table.update(&mut grid).unwrap().is_skipped());
    assert_eq!(grid.visible_rows().len(), 10);
}

#[test]
fn scrolling_one_row_moves_it_into_top_filler() {
    let mut grid = Grid::new(150, 22.0, 220.0);
    let mut table = bound_table(&grid);
    frame(&mut grid, &mut table);

    grid.scroll_to(23.0);
    let report = frame(&mut grid, &mut table).report().copied().unwrap();

    assert_eq!(report.hidden_top, 1);
    assert_eq!(report.revealed_bottom, 1);
    assert_eq!(table.top_filler().peek_last(), Some(grid.row(0)));
    assert_eq!(grid.nodes[TOP].height, 22.0);
    assert_eq!(grid.nodes[BOTTOM].height, 138.0 * 22.0);
    assert!(grid.nodes[grid.row(11)].displayed);
    assert_eq!(grid.visible_rows().len(), 11);
    assert_partition(&grid, &table);
}

#[test]
fn scrolling_back_reveals_top_rows() {
    let mut grid = Grid::new(150, 22.0, 220.0);
    let mut table = bound_table(&grid);
    frame(&mut grid, &mut table);
    grid.scroll_to(23.0);
    frame(&mut grid, &mut table);

    grid.scroll_to(0.0);
    let report = frame(&mut grid, &mut table).report().copied().unwrap();
    assert_eq!(report.revealed_top, 1);
    assert_eq!(report.hidden_bottom, 1);
    assert!(table.top_filler().is_empty());
    assert_eq!(grid.nodes[TOP].height, 0.0);

    let expected: Vec<usize> = (0..11).map(|i| grid.row(i)).collect();
    assert_eq!(grid.visible_rows(), expected);
    assert_partition(&grid, &table);
}

#[test]
fn rows_touching_the_viewport_edges_stay_visible() {
    let mut grid = Grid::new(150, 22.0, 220.0);
    let mut table = bound_table(&grid);
    frame(&mut grid, &mut table);

    // Row 10 starts exactly at the viewport end.
    assert!(grid.nodes[grid.row(10)].displayed);

    // Row 0 ends exactly at the scroll offset.
    grid.scroll_to(22.0);
    let report = frame(&mut grid, &mut table).report().copied().unwrap();
    assert_eq!(report.hidden_top, 0);
    assert!(grid.nodes[grid.row(0)].displayed);
    assert!(table.top_filler().is_empty());
}

#[test]
fn zero_height_rows_are_left_alone() {
    let mut grid = Grid::new(20, 22.0, 100.0);
    for i in 15..20 {
        let id = grid.row(i);
        grid.nodes[id].height = 0.0;
    }
    let mut table = bound_table(&grid);
    frame(&mut grid, &mut table);

    for i in 5..15 {
        assert!(table.bottom_filler().contains(grid.row(i)));
    }
    for i in 15..20 {
        assert!(grid.nodes[grid.row(i)].displayed);
        assert!(!table.bottom_filler().contains(grid.row(i)));
    }
    assert_partition(&grid, &table);
}

#[test]
fn missing_body_is_a_configuration_error() {
    let mut grid = Grid::new(10, 22.0, 50.0);
    let mut table = FillerTable::new(TableOptions::default());
    table.on_child_add(&grid, TOP);
    table.on_child_add(&grid, BOTTOM);
    assert_eq!(table.update(&mut grid), Err(TableError::MissingBody));

    // The gate snapshot is untouched, so the cycle runs once the body shows up.
    table.on_child_add(&grid, BODY);
    assert!(!table.update(&mut grid).unwrap().is_skipped());
}

#[test]
fn missing_filler_is_a_configuration_error() {
    let mut grid = Grid::new(10, 22.0, 50.0);
    let mut table = FillerTable::new(TableOptions::default());
    table.on_child_add(&grid, BODY);
    table.on_child_add(&grid, TOP);
    assert_eq!(
        table.update(&mut grid),
        Err(TableError::MissingFiller(FillerSide::Bottom))
    );

    let mut table = bound_table(&grid);
    table.on_child_remove(&grid, TOP);
    assert_eq!(table.top_filler().element(), None);
    assert_eq!(
        table.update(&mut grid),
        Err(TableError::MissingFiller(FillerSide::Top))
    );
}

#[test]
fn missing_order_key_keeps_row_visible() {
    let mut grid = Grid::new(40, 22.0, 100.0);
    let id = grid.row(39);
    grid.nodes[id].order = None;
    let mut table = bound_table(&grid);

    let report = frame(&mut grid, &mut table).report().copied().unwrap();
    assert_eq!(report.unordered, 1);
    assert_eq!(report.hidden_bottom, 34);
    assert_eq!(report.row_height, 22.0);
    assert!(grid.nodes[id].displayed);
    assert!(!table.bottom_filler().contains(id));
    assert_eq!(grid.nodes[TOP].height, 0.0);
    assert_eq!(
        grid.nodes[BOTTOM].height,
        table.bottom_filler().len() as f32 * report.row_height
    );
    assert_eq!(grid.content_height, 880.0);
    assert_partition(&grid, &table);

    // The same row is met again on the next cycle; it must not stall the table.
    table.invalidate();
    let report = frame(&mut grid, &mut table).report().copied().unwrap();
    assert_eq!(report.unordered, 1);
    assert!(report.is_quiet());
    assert_eq!(table.bottom_filler().len(), 34);
    assert_eq!(grid.nodes[BOTTOM].height, 34.0 * 22.0);
    assert_eq!(grid.content_height, 880.0);
    assert_partition(&grid, &table);
}

#[test]
fn rows_losing_their_order_key_are_dropped_from_fillers() {
    let mut grid = Grid::new(150, 22.0, 220.0);
    let mut table = bound_table(&grid);
    frame(&mut grid, &mut table);

    // Row 60 disappears from the tree without the table being told.
    let lost = grid.row(60);
    assert!(table.bottom_filler().contains(lost));
    grid.children.retain(|&c| c != lost);
    grid.nodes[lost].order = None;
    let removed = grid.row(100);
    grid.remove_row(&mut table, removed);

    table.invalidate();
    let report = frame(&mut grid, &mut table).report().copied().unwrap();
    assert!(report.reordered);
    assert_eq!(report.unordered, 1);
    assert!(!table.bottom_filler().contains(lost));
    assert_eq!(table.bottom_filler().len(), 137);
    assert_eq!(
        grid.nodes[BOTTOM].height,
        table.bottom_filler().len() as f32 * report.row_height
    );
    assert_sorted(table.bottom_filler());
    assert_partition(&grid, &table);
}

#[test]
fn removing_a_hidden_row_recalculates_orders() {
    let mut grid = Grid::new(150, 22.0, 220.0);
    let mut table = bound_table(&grid);
    frame(&mut grid, &mut table);

    let removed = grid.row(50);
    assert!(table.bottom_filler().contains(removed));
    grid.remove_row(&mut table, removed);
    assert!(!table.bottom_filler().contains(removed));
    assert!(table.order_dirty());

    // Stale keys: row 51 is still recorded with order 51.
    let stale = table
        .bottom_filler()
        .iter()
        .find(|it| it.row == grid.row(51))
        .map(|it| it.order);
    assert_eq!(stale, Some(51));

    grid.scroll_to(1.0);
    let report = frame(&mut grid, &mut table).report().copied().unwrap();
    assert!(report.reordered);
    assert!(!table.order_dirty());
    for it in table.bottom_filler().iter() {
        assert_eq!(Some(it.order), grid.order_key(it.row));
    }
    assert_sorted(table.bottom_filler());
    assert_partition(&grid, &table);
}

#[test]
fn adding_a_row_marks_orders_dirty() {
    let grid = Grid::new(3, 22.0, 50.0);
    let mut table = bound_table(&grid);
    assert!(!table.order_dirty());
    table.on_child_add(&grid, grid.row(1));
    assert!(table.order_dirty());
}

#[test]
fn invalidate_forces_the_next_cycle() {
    let mut grid = Grid::new(30, 22.0, 100.0);
    let mut table = bound_table(&grid);
    frame(&mut grid, &mut table);
    assert!(frame(&mut grid, &mut table).is_skipped());

    table.invalidate();
    assert_eq!(table.viewport_state(), None);
    let report = frame(&mut grid, &mut table).report().copied().unwrap();
    assert!(report.is_quiet());
    assert!(frame(&mut grid, &mut table).is_skipped());
}

#[test]
fn reveal_all_restores_every_row() {
    let mut grid = Grid::new(60, 22.0, 100.0);
    let mut table = bound_table(&grid);
    frame(&mut grid, &mut table);
    grid.scroll_to(300.0);
    frame(&mut grid, &mut table);
    assert!(table.top_filler().has_any());
    assert!(table.bottom_filler().has_any());

    let hidden = table.top_filler().len() + table.bottom_filler().len();
    assert_eq!(table.reveal_all(&mut grid), Ok(hidden));
    assert_eq!(grid.visible_rows().len(), 60);
    assert!(table.top_filler().is_empty());
    assert!(table.bottom_filler().is_empty());
    assert_eq!(grid.nodes[TOP].height, 0.0);
    assert_eq!(grid.nodes[BOTTOM].height, 0.0);
}

#[test]
fn filler_remove_preserves_relative_order() {
    let grid = Grid::new(6, 22.0, 50.0);
    let mut filler = Filler::new(FillerSide::Bottom);
    for i in [4, 1, 3, 2] {
        filler.add(&grid, grid.row(i)).unwrap();
    }
    assert!(filler.remove(grid.row(3)));
    assert!(!filler.remove(grid.row(3)));

    let rows: Vec<usize> = filler.iter().map(|it| it.row).collect();
    assert_eq!(rows, [grid.row(4), grid.row(1), grid.row(2)]);

    filler.sort();
    assert_eq!(filler.peek_first(), Some(grid.row(1)));
    assert_eq!(filler.peek_last(), Some(grid.row(4)));
    assert_eq!(filler.height_for(10.0), 30.0);
}

#[test]
fn filler_pops_from_both_ends() {
    let grid = Grid::new(6, 22.0, 50.0);
    let mut filler = Filler::new(FillerSide::Top);
    for i in [4, 1, 3, 2] {
        filler.add(&grid, grid.row(i)).unwrap();
    }
    filler.sort();

    assert_eq!(filler.pop_first(), Some(grid.row(1)));
    assert_eq!(filler.pop_last(), Some(grid.row(4)));
    assert_eq!(filler.len(), 2);
    assert_eq!(filler.peek_first(), Some(grid.row(2)));
    assert_eq!(filler.peek_last(), Some(grid.row(3)));

    filler.clear();
    assert_eq!(filler.pop_first(), None);
    assert_eq!(filler.pop_last(), None);
}

#[test]
fn filler_sort_is_stable_for_equal_keys() {
    let mut grid = Grid::new(4, 22.0, 50.0);
    for i in 0..4 {
        let id = grid.row(i);
        grid.nodes[id].order = Some(7);
    }
    let mut filler = Filler::new(FillerSide::Top);
    for i in [2, 0, 3, 1] {
        filler.add(&grid, grid.row(i)).unwrap();
    }
    filler.sort();
    let rows: Vec<usize> = filler.iter().map(|it| it.row).collect();
    assert_eq!(rows, [grid.row(2), grid.row(0), grid.row(3), grid.row(1)]);
}

#[test]
fn filler_update_height_requires_an_element() {
    let mut grid = Grid::new(2, 22.0, 50.0);
    let filler: Filler<usize> = Filler::new(FillerSide::Top);
    assert_eq!(
        filler.update_height(&mut grid, 22.0),
        Err(TableError::MissingFiller(FillerSide::Top))
    );
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "peek_first on an empty bottom filler")]
fn peeking_an_empty_filler_panics_in_debug() {
    let filler: Filler<usize> = Filler::new(FillerSide::Bottom);
    let _ = filler.peek_first();
}

#[test]
fn order_tracker_flag_is_consumed_once() {
    let mut tracker = OrderTracker::new();
    assert!(!tracker.take_dirty());
    tracker.mark_dirty();
    assert!(tracker.is_dirty());
    assert!(tracker.take_dirty());
    assert!(!tracker.is_dirty());
}

#[test]
fn viewport_state_gate() {
    let a = ViewportState::new(100.0, ScrollViewport::new(50.0, 10.0));
    assert!(!a.differs_from(&a, 2.0));
    assert!(!a.differs_from(&ViewportState::new(98.5, ScrollViewport::new(50.0, 10.0)), 2.0));
    assert!(a.differs_from(&ViewportState::new(98.0, ScrollViewport::new(50.0, 10.0)), 2.0));
    assert!(!a.differs_from(&ViewportState::new(101.5, ScrollViewport::new(50.0, 10.0)), 2.0));
    assert!(a.differs_from(&ViewportState::new(102.0, ScrollViewport::new(50.0, 10.0)), 2.0));
    assert!(a.differs_from(&ViewportState::new(100.0, ScrollViewport::new(51.0, 10.0)), 2.0));
    assert!(a.differs_from(&ViewportState::new(100.0, ScrollViewport::new(50.0, 10.5)), 2.0));
}

#[test]
fn randomized_scrolling_keeps_rows_partitioned() {
    let mut rng = Lcg::new(0x5eed);
    let mut grid = Grid::new(300, 20.0, 200.0);
    let mut table = bound_table(&grid);
    frame(&mut grid, &mut table);

    for step in 0..300 {
        if step % 7 == 0 {
            let height = rng.gen_range_u32(40, 400) as f32;
            if let Some(v) = &mut grid.viewport {
                v.height = height;
            }
        }
        let max = (grid.content_height as u32).max(1);
        grid.scroll_to(rng.gen_range_u32(0, max) as f32);

        frame(&mut grid, &mut table);
        assert_partition(&grid, &table);
        assert_sorted(table.top_filler());
        assert_sorted(table.bottom_filler());

        // Top filler rows all come before bottom filler rows.
        if let (Some(last_top), Some(first_bottom)) = (
            table.top_filler().iter().last(),
            table.bottom_filler().iter().next(),
        ) {
            assert!(last_top.order < first_bottom.order);
        }
    }
}
