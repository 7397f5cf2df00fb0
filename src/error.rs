//! Typed errors for the scoring pipeline

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors raised by threshold estimation, rank assignment and score composition
#[derive(Debug, Error)]
pub enum ScoreError {
    /// Percentile thresholds cannot be estimated from an empty sequence
    #[error("cannot estimate percentile thresholds of an empty sequence")]
    EmptyInput,

    /// A designated numeric column had no rows
    #[error("column '{0}' is empty; cannot estimate percentile thresholds")]
    EmptyColumn(String),

    /// Null entries would misalign rank vectors with table rows
    #[error("column '{column}' contains {nulls} null value(s); scoring requires non-null numeric columns")]
    NullValues { column: String, nulls: usize },

    /// Polarity string was neither of the two supported modes
    #[error("unknown polarity '{0}': expected 'recency' or 'activity'")]
    UnknownPolarity(String),

    /// External thresholds need the reference table and all three column names together
    #[error("external thresholds require a reference table and all three reference column names; got a partial set")]
    PartialReference,

    /// Reference-derived rank columns cannot be attached to a target of a different height
    #[error("reference table has {reference} rows but target has {target}; rank columns cannot be attached")]
    RowCountMismatch { target: usize, reference: usize },

    #[error(transparent)]
    Polars(#[from] PolarsError),
}
