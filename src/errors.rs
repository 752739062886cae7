//! Errors
//!
//! Custom error types used throughout the `cart-trees` crate.
use thiserror::Error;

/// Errors raised while fitting or applying a decision tree.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// Feature rows and labels disagree in length.
    #[error("Mismatched lengths: {0} rows against {1} labels.")]
    DimensionMismatch(usize, usize),
    /// Fit requires at least one labeled row.
    #[error("At least one labeled row is required.")]
    EmptyDataset,
    /// A traversed decision node tests a column the input row does not have.
    #[error("Feature X{0} is absent from the input row.")]
    MissingFeature(usize),
    /// A feature value could not be ordered against the stored threshold.
    #[error("Feature X{0} is not comparable with the stored threshold.")]
    TypeMismatch(usize),
    /// Prediction or rendering was requested before the tree was fitted.
    #[error("The tree wasn't built yet.")]
    NotFitted,
    /// A parameter setter rejected its value.
    #[error("{0}")]
    InvalidParameter(String),
}
