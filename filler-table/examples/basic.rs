// Example: a minimal host with uniform rows, scrolled once to the middle.
use filler_table::{FillerTable, NodeKind, OrderKey, ScrollViewport, TableHost, TableOptions};

const BODY: usize = 0;
const TOP: usize = 1;
const BOTTOM: usize = 2;
const FIRST_ROW: usize = 3;

struct Host {
    rows: usize,
    row_height: f32,
    viewport_height: f32,
    scroll_offset: f32,
    // Per node: displayed flag and height property (only meaningful for the fillers).
    displayed: Vec<bool>,
    height: Vec<f32>,
    offset: Vec<f32>,
    measured: Vec<f32>,
    content_height: f32,
}

impl Host {
    fn new(rows: usize, row_height: f32, viewport_height: f32) -> Self {
        let nodes = FIRST_ROW + rows;
        Self {
            rows,
            row_height,
            viewport_height,
            scroll_offset: 0.0,
            displayed: vec![true; nodes],
            height: vec![0.0; nodes],
            offset: vec![0.0; nodes],
            measured: vec![0.0; nodes],
            content_height: 0.0,
        }
    }

    fn layout(&mut self) {
        let order = std::iter::once(TOP)
            .chain(FIRST_ROW..FIRST_ROW + self.rows)
            .chain(std::iter::once(BOTTOM));
        let mut y = 0.0;
        for id in order {
            let h = if !self.displayed[id] {
                0.0
            } else if id >= FIRST_ROW {
                self.row_height
            } else {
                self.height[id]
            };
            self.offset[id] = y;
            self.measured[id] = h;
            y += h;
        }
        self.content_height = y;
    }

    fn visible(&self) -> Vec<usize> {
        (FIRST_ROW..FIRST_ROW + self.rows)
            .filter(|&id| self.displayed[id])
            .map(|id| id - FIRST_ROW)
            .collect()
    }
}

impl TableHost for Host {
    type Node = usize;

    fn classify(&self, node: usize) -> NodeKind {
        match node {
            BODY => NodeKind::Body,
            TOP => NodeKind::TopFiller,
            BOTTOM => NodeKind::BottomFiller,
            _ => NodeKind::Row,
        }
    }

    fn child_count(&self, parent: usize) -> usize {
        if parent == BODY { self.rows + 2 } else { 0 }
    }

    fn child(&self, parent: usize, index: usize) -> Option<usize> {
        if parent != BODY {
            return None;
        }
        match index {
            0 => Some(TOP),
            i if i <= self.rows => Some(FIRST_ROW + i - 1),
            i if i == self.rows + 1 => Some(BOTTOM),
            _ => None,
        }
    }

    fn order_key(&self, row: usize) -> Option<OrderKey> {
        row.checked_sub(FIRST_ROW).map(|i| i as OrderKey)
    }

    fn scroll_viewport(&self) -> Option<ScrollViewport> {
        Some(ScrollViewport::new(self.viewport_height, self.scroll_offset))
    }

    fn content_height(&self) -> f32 {
        self.content_height
    }

    fn offset_top(&self, node: usize) -> f32 {
        self.offset[node]
    }

    fn offset_height(&self, node: usize) -> f32 {
        self.measured[node]
    }

    fn client_height(&self, node: usize) -> f32 {
        self.measured[node]
    }

    fn is_displayed(&self, node: usize) -> bool {
        self.displayed[node]
    }

    fn set_displayed(&mut self, node: usize, displayed: bool) {
        self.displayed[node] = displayed;
    }

    fn set_height(&mut self, node: usize, height: f32) {
        self.height[node] = height;
    }
}

fn main() -> Result<(), filler_table::TableError> {
    let mut host = Host::new(150, 22.0, 220.0);
    let mut table = FillerTable::new(TableOptions::default());
    for node in [BODY, TOP, BOTTOM] {
        table.on_child_add(&host, node);
    }

    host.layout();
    let outcome = table.update(&mut host)?;
    host.layout();
    println!("initial: {outcome:?}");
    println!("visible={:?}", host.visible());
    println!(
        "top_spacer={} bottom_spacer={}",
        host.height[TOP], host.height[BOTTOM]
    );

    host.scroll_offset = 1_500.0;
    for frame in 0..8 {
        host.layout();
        let outcome = table.update(&mut host)?;
        host.layout();
        let Some(report) = outcome.report() else {
            break;
        };
        println!("frame {frame}: {report:?}");
        if report.is_quiet() {
            break;
        }
        table.invalidate();
    }
    println!("visible={:?}", host.visible());
    println!(
        "top_rows={} bottom_rows={}",
        table.top_filler().len(),
        table.bottom_filler().len()
    );
    Ok(())
}
