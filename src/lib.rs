//! RfmScore: RFM customer-segmentation scoring on Polars DataFrames
//!
//! Derives per-dimension 33rd/66th percentile thresholds, assigns rank labels
//! 1-3 with dimension-dependent polarity (recency inverted), and composes the
//! ranks into a three-digit RFM score. Thresholds can come from the scored
//! table itself or from a separate reference table.

pub mod cli;
pub mod data;
pub mod error;
pub mod score;
pub mod viz;

// Re-export public items for easier access
pub use cli::Args;
pub use data::{load_table, require_columns, write_table};
pub use error::ScoreError;
pub use score::{
    assign_ranks, compose_score, estimate_thresholds, score_rfm, Polarity, Rank, RankBasis,
    RfmColumns, ThresholdSource,
};
pub use viz::{create_scatter_plot, plot_recency_frequency, plot_recency_monetary};

/// Common result type used throughout the application
pub type Result<T> = anyhow::Result<T>;
