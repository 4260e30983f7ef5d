/// Configuration for [`crate::FillerTable`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableOptions {
    /// Content height changes below this are ignored by the trigger gate.
    pub height_tolerance: f32,

    /// How far the top spacer may still exceed the scroll offset before the top reveal loop
    /// stops, i.e. the loop runs while `top_height > scroll_offset - reveal_margin`.
    pub reveal_margin: f32,

    /// Initial capacity of each filler's row list.
    pub initial_capacity: usize,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            height_tolerance: 2.0,
            reveal_margin: 5.0,
            initial_capacity: 0x200,
        }
    }
}

impl TableOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_height_tolerance(mut self, height_tolerance: f32) -> Self {
        self.height_tolerance = height_tolerance;
        self
    }

    pub fn with_reveal_margin(mut self, reveal_margin: f32) -> Self {
        self.reveal_margin = reveal_margin;
        self
    }

    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }
}
