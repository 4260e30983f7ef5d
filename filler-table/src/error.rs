use crate::FillerSide;

/// Errors reported by [`crate::FillerTable`] and [`crate::Filler`].
///
/// Layout that has not settled yet is never an error; such rows are retried on the next cycle.
/// A row without an order key is only an error for [`crate::Filler::add`]; a reconciliation
/// leaves such rows displayed and counts them in [`crate::CycleReport::unordered`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("table has no body element bound")]
    MissingBody,

    #[error("table has no {0} filler element bound")]
    MissingFiller(FillerSide),

    #[error("row has no order key")]
    MissingOrderKey,
}
