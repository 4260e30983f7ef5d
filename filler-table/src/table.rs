use crate::filler::Filler;
use crate::order::OrderTracker;
use crate::{
    CycleReport, FillerSide, NodeKind, ScrollViewport, TableError, TableHost, TableOptions,
    UpdateOutcome, ViewportState,
};

/// A windowed table that keeps only the rows near the viewport displayed.
///
/// Rows that scroll out of view are hidden and tracked by one of two fillers. Each filler's
/// spacer element is sized to `hidden rows * approximate row height`, so the scrollable content
/// keeps roughly the same height as the full table.
///
/// This type does not hold any UI objects, only handles into the host tree:
/// - Report structural changes via `on_child_add` / `on_child_remove`.
/// - Call `update` on every UI update tick, after the host has run layout.
///
/// Row heights are assumed to be uniform. The per-row estimate is derived from the table's
/// client height on every cycle.
#[derive(Clone, Debug)]
pub struct FillerTable<N> {
    options: TableOptions,
    body: Option<N>,
    top: Filler<N>,
    bottom: Filler<N>,
    order: OrderTracker,
    // `None` forces the next update past the trigger gate.
    last: Option<ViewportState>,
}

impl<N: Copy + Eq + core::fmt::Debug> Default for FillerTable<N> {
    fn default() -> Self {
        Self::new(TableOptions::default())
    }
}

impl<N: Copy + Eq + core::fmt::Debug> FillerTable<N> {
    pub fn new(options: TableOptions) -> Self {
        vdebug!(
            height_tolerance = options.height_tolerance,
            reveal_margin = options.reveal_margin,
            "FillerTable::new"
        );
        Self {
            body: None,
            top: Filler::with_capacity(FillerSide::Top, options.initial_capacity),
            bottom: Filler::with_capacity(FillerSide::Bottom, options.initial_capacity),
            order: OrderTracker::new(),
            last: Some(ViewportState::default()),
            options,
        }
    }

    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    /// Replaces the options. The next update bypasses the trigger gate.
    pub fn set_options(&mut self, options: TableOptions) {
        self.options = options;
        self.invalidate();
    }

    pub fn body(&self) -> Option<N> {
        self.body
    }

    pub fn top_filler(&self) -> &Filler<N> {
        &self.top
    }

    pub fn bottom_filler(&self) -> &Filler<N> {
        &self.bottom
    }

    pub fn filler(&self, side: FillerSide) -> &Filler<N> {
        match side {
            FillerSide::Top => &self.top,
            FillerSide::Bottom => &self.bottom,
        }
    }

    fn filler_mut(&mut self, side: FillerSide) -> &mut Filler<N> {
        match side {
            FillerSide::Top => &mut self.top,
            FillerSide::Bottom => &mut self.bottom,
        }
    }

    /// Whether the filler order keys will be re-read on the next cycle.
    pub fn order_dirty(&self) -> bool {
        self.order.is_dirty()
    }

    /// The inputs observed at the last completed cycle.
    pub fn viewport_state(&self) -> Option<ViewportState> {
        self.last
    }

    /// Forgets the last observed inputs so the next update always runs a full cycle.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Call this whenever a node is added under the table.
    pub fn on_child_add<H: TableHost<Node = N>>(&mut self, host: &H, child: N) {
        let kind = host.classify(child);
        vdebug!(child = ?child, kind = ?kind, "on_child_add");
        match kind {
            NodeKind::Body => self.body = Some(child),
            NodeKind::TopFiller => self.top.set_element(Some(child)),
            NodeKind::BottomFiller => self.bottom.set_element(Some(child)),
            NodeKind::Row => self.order.mark_dirty(),
        }
    }

    /// Call this before a node under the table is destroyed.
    pub fn on_child_remove<H: TableHost<Node = N>>(&mut self, host: &H, child: N) {
        let kind = host.classify(child);
        vdebug!(child = ?child, kind = ?kind, "on_child_remove");
        match kind {
            NodeKind::Body => {
                if self.body == Some(child) {
                    self.body = None;
                }
            }
            NodeKind::TopFiller | NodeKind::BottomFiller => {
                let side = if kind == NodeKind::TopFiller {
                    FillerSide::Top
                } else {
                    FillerSide::Bottom
                };
                let filler = self.filler_mut(side);
                if filler.element() == Some(child) {
                    filler.set_element(None);
                }
            }
            NodeKind::Row => {
                self.top.remove(child);
                self.bottom.remove(child);
                self.order.mark_dirty();
            }
        }
    }

    /// Runs one reconciliation cycle if the viewport inputs changed since the last one.
    ///
    /// Returns `Ok(UpdateOutcome::Skipped)` when the host reports no scroll container or when
    /// the inputs are unchanged (within `height_tolerance` for the content height).
    ///
    /// Errors are only reported for an unbound body or filler, before any row is touched. The
    /// last observed inputs are kept, so the cycle is retried on the next update. Rows without an
    /// order key stay displayed and the cycle completes.
    pub fn update<H: TableHost<Node = N>>(
        &mut self,
        host: &mut H,
    ) -> Result<UpdateOutcome, TableError> {
        let Some(viewport) = host.scroll_viewport() else {
            return Ok(UpdateOutcome::Skipped);
        };
        let next = ViewportState::new(host.content_height(), viewport);

        if let Some(last) = &self.last {
            if !last.differs_from(&next, self.options.height_tolerance) {
                return Ok(UpdateOutcome::Skipped);
            }
        }

        let report = self.update_view(host, viewport)?;
        self.last = Some(next);
        Ok(UpdateOutcome::Reconciled(report))
    }

    fn update_view<H: TableHost<Node = N>>(
        &mut self,
        host: &mut H,
        viewport: ScrollViewport,
    ) -> Result<CycleReport, TableError> {
        let body = self.body.ok_or(TableError::MissingBody)?;
        let top_element = self
            .top
            .element()
            .ok_or(TableError::MissingFiller(FillerSide::Top))?;
        let bottom_element = self
            .bottom
            .element()
            .ok_or(TableError::MissingFiller(FillerSide::Bottom))?;

        let mut report = CycleReport::default();

        if self.order.is_dirty() {
            let mut dropped = self.top.recalculate_order(host);
            dropped.extend(self.bottom.recalculate_order(host));
            for row in dropped {
                host.set_displayed(row, true);
                report.unordered += 1;
            }
            self.order.take_dirty();
            report.reordered = true;
        }

        let scroll_offset = viewport.scroll_offset;
        let viewport_end = viewport.end();

        for i in 0..host.child_count(body) {
            let Some(child) = host.child(body, i) else {
                continue;
            };
            if child == top_element || child == bottom_element {
                continue;
            }
            if host.classify(child) != NodeKind::Row || !host.is_displayed(child) {
                continue;
            }

            let child_offset = host.offset_top(child);
            let child_height = host.offset_height(child);

            // Layout has not settled for this row yet.
            if child_height == 0.0 {
                continue;
            }

            let side = if scroll_offset > child_offset + child_height {
                FillerSide::Top
            } else if child_offset > viewport_end {
                FillerSide::Bottom
            } else {
                continue;
            };
            if !self.hide(host, child, side) {
                report.unordered += 1;
            } else if side == FillerSide::Top {
                report.hidden_top += 1;
            } else {
                report.hidden_bottom += 1;
            }
        }

        if report.hidden() > 0 {
            self.top.sort();
            self.bottom.sort();
        }

        let row_height = self.approximate_row_height(host, body);
        report.row_height = row_height;

        let mut top_height = host.client_height(top_element);
        while top_height > scroll_offset - self.options.reveal_margin && self.top.has_any() {
            let Some(row) = self.top.pop_last() else {
                break;
            };
            host.set_displayed(row, true);
            top_height -= row_height;
            report.revealed_top += 1;
        }

        let content_height = host.content_height();
        let mut bottom_height = host.client_height(bottom_element);
        while bottom_height > 0.0
            && viewport_end > content_height - bottom_height
            && self.bottom.has_any()
        {
            let Some(row) = self.bottom.pop_first() else {
                break;
            };
            host.set_displayed(row, true);
            bottom_height -= row_height;
            report.revealed_bottom += 1;
        }

        self.top.update_height(host, row_height)?;
        self.bottom.update_height(host, row_height)?;

        vtrace!(
            scroll_offset,
            viewport_height = viewport.height,
            content_height,
            row_height,
            hidden_top = report.hidden_top,
            hidden_bottom = report.hidden_bottom,
            unordered = report.unordered,
            revealed_top = report.revealed_top,
            revealed_bottom = report.revealed_bottom,
            top_rows = self.top.len(),
            bottom_rows = self.bottom.len(),
            "FillerTable::update_view"
        );

        Ok(report)
    }

    /// Returns `false` when the row has no order key; it then stays displayed and untracked.
    fn hide<H: TableHost<Node = N>>(&mut self, host: &mut H, row: N, side: FillerSide) -> bool {
        if self.filler_mut(side).add(host, row).is_err() {
            return false;
        }
        host.set_displayed(row, false);
        true
    }

    /// Table height divided by the number of body children, excluding the two fillers.
    fn approximate_row_height<H: TableHost<Node = N>>(&self, host: &H, body: N) -> f32 {
        let rows = host.child_count(body).saturating_sub(2);
        if rows == 0 {
            return 0.0;
        }
        host.content_height() / rows as f32
    }

    /// Shows every hidden row and collapses both spacers.
    ///
    /// Useful before tearing the table down or when switching virtualization off. Returns the
    /// number of rows revealed.
    pub fn reveal_all<H: TableHost<Node = N>>(&mut self, host: &mut H) -> Result<usize, TableError> {
        let mut revealed = 0usize;
        for side in [FillerSide::Top, FillerSide::Bottom] {
            let filler = self.filler_mut(side);
            for it in filler.iter() {
                host.set_displayed(it.row, true);
                revealed += 1;
            }
            filler.clear();
            filler.update_height(host, 0.0)?;
        }
        vdebug!(revealed, "FillerTable::reveal_all");
        self.invalidate();
        Ok(revealed)
    }
}
