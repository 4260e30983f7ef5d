/// A data-range window over a uniformly sized list.
///
/// This is the data-side alternative to [`filler_table::FillerTable`]: instead of hiding rows
/// that already exist, the adapter only materializes `start..end` and sizes two spacers for the
/// rest.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DataWindow {
    pub start: usize,
    pub end: usize, // exclusive
    pub top_height: f32,
    pub bottom_height: f32,
}

impl DataWindow {
    /// Computes the window for a list of `count` rows of `row_height` below a header of
    /// `head_height` inside a scroll container.
    ///
    /// One extra row is kept past the viewport end. A non-positive `row_height` disables
    /// windowing and returns the whole list.
    pub fn compute(
        scroll_top: f32,
        head_height: f32,
        viewport_height: f32,
        row_height: f32,
        count: usize,
    ) -> Self {
        if row_height.is_nan() || row_height <= 0.0 {
            return Self {
                start: 0,
                end: count,
                top_height: 0.0,
                bottom_height: 0.0,
            };
        }

        let offset = (scroll_top - head_height).max(0.0);
        let viewport_height = viewport_height.max(0.0);

        let end = ceil_to_usize((offset + viewport_height) / row_height)
            .saturating_add(1)
            .min(count);
        let start = floor_to_usize(offset / row_height).min(end);

        Self {
            start,
            end,
            top_height: start as f32 * row_height,
            bottom_height: (count - end) as f32 * row_height,
        }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// The windowed part of `items`.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let end = self.end.min(items.len());
        let start = self.start.min(end);
        &items[start..end]
    }
}

// `as` saturates, and `x` is never negative here.
fn floor_to_usize(x: f32) -> usize {
    x as usize
}

fn ceil_to_usize(x: f32) -> usize {
    let t = x as usize;
    if (t as f32) < x { t.saturating_add(1) } else { t }
}
