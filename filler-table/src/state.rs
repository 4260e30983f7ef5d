use crate::ScrollViewport;

/// The inputs observed at the previous reconciliation.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewportState {
    /// Client height of the table.
    pub content_height: f32,
    /// Client height of the scroll container.
    pub viewport_height: f32,
    pub scroll_offset: f32,
}

impl ViewportState {
    pub fn new(content_height: f32, viewport: ScrollViewport) -> Self {
        Self {
            content_height,
            viewport_height: viewport.height,
            scroll_offset: viewport.scroll_offset,
        }
    }

    /// Returns `true` when `next` differs enough from `self` to warrant a reconciliation.
    ///
    /// Content height is compared with `height_tolerance`; viewport height and scroll offset
    /// must match exactly.
    pub fn differs_from(&self, next: &ViewportState, height_tolerance: f32) -> bool {
        (self.content_height - next.content_height).abs() >= height_tolerance
            || self.viewport_height != next.viewport_height
            || self.scroll_offset != next.scroll_offset
    }
}
