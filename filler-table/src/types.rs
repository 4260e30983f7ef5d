/// The logical position of a row in the whole table.
pub type OrderKey = i64;

/// How the host classifies a child of the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeKind {
    /// The container whose children are the rows and the two fillers.
    Body,
    TopFiller,
    BottomFiller,
    /// Anything else. Adding or removing one invalidates the filler order keys.
    Row,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FillerSide {
    Top,
    Bottom,
}

impl core::fmt::Display for FillerSide {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Top => f.write_str("top"),
            Self::Bottom => f.write_str("bottom"),
        }
    }
}

/// Geometry of the closest scrollable container, as reported by the host.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollViewport {
    /// Client height of the scroll container.
    pub height: f32,
    /// Current scroll offset of the scroll container.
    pub scroll_offset: f32,
}

impl ScrollViewport {
    pub fn new(height: f32, scroll_offset: f32) -> Self {
        Self {
            height,
            scroll_offset,
        }
    }

    /// The offset of the bottom edge of the viewport.
    pub fn end(&self) -> f32 {
        self.height + self.scroll_offset
    }
}

/// What a single reconciliation cycle did.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CycleReport {
    pub hidden_top: usize,
    pub hidden_bottom: usize,
    pub revealed_top: usize,
    pub revealed_bottom: usize,
    /// Whether the filler order keys were re-read at the start of the cycle.
    pub reordered: bool,
    /// Rows without an order key. They were left displayed, or dropped from a filler when
    /// their key disappeared.
    pub unordered: usize,
    /// The approximate row height used for the reveal loops and the spacer heights.
    pub row_height: f32,
}

impl CycleReport {
    pub fn hidden(&self) -> usize {
        self.hidden_top + self.hidden_bottom
    }

    pub fn revealed(&self) -> usize {
        self.revealed_top + self.revealed_bottom
    }

    /// Returns `true` when no row changed visibility during the cycle.
    pub fn is_quiet(&self) -> bool {
        self.hidden() == 0 && self.revealed() == 0
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UpdateOutcome {
    /// The trigger gate found nothing worth reconciling.
    Skipped,
    Reconciled(CycleReport),
}

impl UpdateOutcome {
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped)
    }

    pub fn report(&self) -> Option<&CycleReport> {
        match self {
            Self::Skipped => None,
            Self::Reconciled(report) => Some(report),
        }
    }
}
