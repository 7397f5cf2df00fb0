//! RFM scoring: percentile thresholds, rank assignment and score composition

use crate::error::ScoreError;
use polars::prelude::*;
use std::str::FromStr;

/// Ordering polarity for one RFM dimension.
///
/// Recency inverts the mapping: a customer who bought recently has a *low*
/// recency value and deserves the *high* rank. Frequency and monetary share the
/// straight mapping (more activity, higher rank).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Recency,
    Activity,
}

impl FromStr for Polarity {
    type Err = ScoreError;

    fn from_str(s: &str) -> Result<Self, ScoreError> {
        match s.to_ascii_lowercase().as_str() {
            "recency" | "r" => Ok(Polarity::Recency),
            "activity" | "fm" => Ok(Polarity::Activity),
            _ => Err(ScoreError::UnknownPolarity(s.to_string())),
        }
    }
}

/// Per-dimension rank label, rendered as "1", "2" or "3" in the output table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rank {
    Bottom,
    Middle,
    Top,
}

impl Rank {
    pub fn digit(self) -> i32 {
        match self {
            Rank::Bottom => 1,
            Rank::Middle => 2,
            Rank::Top => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Rank::Bottom => "1",
            Rank::Middle => "2",
            Rank::Top => "3",
        }
    }
}

/// Compose three per-dimension ranks into one RFM score.
///
/// The three digits concatenate in Recency-Frequency-Monetary order and are
/// read as a decimal numeral: ranks 3, 1, 2 compose to 312, never to the sum 6.
/// Scores therefore range over the 27 values {111, ..., 333} with each digit in
/// {1, 2, 3}.
pub fn compose_score(r: Rank, f: Rank, m: Rank) -> i32 {
    r.digit() * 100 + f.digit() * 10 + m.digit()
}

/// Names of the three designated numeric columns of a record table
#[derive(Debug, Clone, Copy)]
pub struct RfmColumns<'a> {
    pub recency: &'a str,
    pub frequency: &'a str,
    pub monetary: &'a str,
}

/// Which table's values are ranked when thresholds come from a reference table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RankBasis {
    /// Rank the reference table's own values and attach the resulting columns
    /// to the target, which requires both tables to have the same height and
    /// row order.
    #[default]
    Reference,
    /// Rank the target's values against reference-derived thresholds
    Target,
}

/// Where percentile thresholds come from, validated as a whole before dispatch
#[derive(Debug)]
pub enum ThresholdSource<'a> {
    /// Thresholds from the scored table's own columns
    SelfThreshold,
    /// Thresholds from a distinct reference table (e.g. a historical baseline)
    External {
        reference: &'a DataFrame,
        columns: RfmColumns<'a>,
        basis: RankBasis,
    },
}

impl<'a> ThresholdSource<'a> {
    /// Build a threshold source from independently optional arguments.
    ///
    /// All four external arguments must be supplied together or not at all; a
    /// partial set fails with [`ScoreError::PartialReference`] rather than
    /// silently falling back to self-thresholds.
    pub fn from_parts(
        reference: Option<&'a DataFrame>,
        recency: Option<&'a str>,
        frequency: Option<&'a str>,
        monetary: Option<&'a str>,
        basis: RankBasis,
    ) -> Result<Self, ScoreError> {
        match (reference, recency, frequency, monetary) {
            (None, None, None, None) => Ok(ThresholdSource::SelfThreshold),
            (Some(reference), Some(recency), Some(frequency), Some(monetary)) => {
                Ok(ThresholdSource::External {
                    reference,
                    columns: RfmColumns {
                        recency,
                        frequency,
                        monetary,
                    },
                    basis,
                })
            }
            _ => Err(ScoreError::PartialReference),
        }
    }
}

/// Extract a designated column as a dense `f64` vector, in row order.
///
/// Integer columns are cast; empty or null-bearing columns are rejected since
/// both would corrupt the row alignment of the rank vectors.
pub fn numeric_column(df: &DataFrame, name: &str) -> Result<Vec<f64>, ScoreError> {
    let series = df.column(name)?.cast(&DataType::Float64)?;
    let values = series.f64()?;
    if values.is_empty() {
        return Err(ScoreError::EmptyColumn(name.to_string()));
    }
    let nulls = values.null_count();
    if nulls > 0 {
        return Err(ScoreError::NullValues {
            column: name.to_string(),
            nulls,
        });
    }
    Ok(values.into_no_null_iter().collect())
}

/// Estimate the 33rd and 66th percentile cut points of a numeric sequence.
///
/// Uses linear interpolation between order statistics (rank = pct/100 × (n−1)),
/// so the result is independent of the input order. The pair satisfies
/// p33 ≤ p66, with ties possible on low-cardinality input.
pub fn estimate_thresholds(values: &[f64]) -> Result<(f64, f64), ScoreError> {
    if values.is_empty() {
        return Err(ScoreError::EmptyInput);
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    Ok((percentile(&sorted, 33.0), percentile(&sorted, 66.0)))
}

/// `sorted` must be ascending and non-empty
fn percentile(sorted: &[f64], pct: f64) -> f64 {
    let last = sorted.len() - 1;
    let rank = pct / 100.0 * last as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (rank - lo as f64)
}

/// Label every value with a rank, preserving input length and order.
///
/// The branches are an explicit guard chain: below p33, above p66, and a
/// default middle band. A value that satisfies neither strict comparison (the
/// closed band, or a NaN that compares with nothing) lands on rank "2".
pub fn assign_ranks(values: &[f64], thresholds: (f64, f64), polarity: Polarity) -> Vec<Rank> {
    let (p33, p66) = thresholds;
    let (below, above) = match polarity {
        Polarity::Recency => (Rank::Top, Rank::Bottom),
        Polarity::Activity => (Rank::Bottom, Rank::Top),
    };
    values
        .iter()
        .map(|&v| {
            if v < p33 {
                below
            } else if v > p66 {
                above
            } else {
                Rank::Middle
            }
        })
        .collect()
}

/// Score a record table, appending `R`, `F`, `M` rank columns and the composite
/// `RFM` column to a copy of `target`.
///
/// # Arguments
/// * `target` - table receiving the score columns; never mutated
/// * `columns` - names of `target`'s recency/frequency/monetary columns
/// * `source` - self-thresholds, or an external reference table (see
///   [`ThresholdSource`] and [`RankBasis`] for the two external behaviors)
pub fn score_rfm(
    target: &DataFrame,
    columns: &RfmColumns,
    source: &ThresholdSource,
) -> Result<DataFrame, ScoreError> {
    let (r, f, m) = match source {
        ThresholdSource::SelfThreshold => (
            rank_column(target, columns.recency, Polarity::Recency)?,
            rank_column(target, columns.frequency, Polarity::Activity)?,
            rank_column(target, columns.monetary, Polarity::Activity)?,
        ),
        ThresholdSource::External {
            reference,
            columns: ref_columns,
            basis: RankBasis::Reference,
        } => {
            if reference.height() != target.height() {
                return Err(ScoreError::RowCountMismatch {
                    target: target.height(),
                    reference: reference.height(),
                });
            }
            (
                rank_column(reference, ref_columns.recency, Polarity::Recency)?,
                rank_column(reference, ref_columns.frequency, Polarity::Activity)?,
                rank_column(reference, ref_columns.monetary, Polarity::Activity)?,
            )
        }
        ThresholdSource::External {
            reference,
            columns: ref_columns,
            basis: RankBasis::Target,
        } => (
            rank_against(reference, ref_columns.recency, target, columns.recency, Polarity::Recency)?,
            rank_against(
                reference,
                ref_columns.frequency,
                target,
                columns.frequency,
                Polarity::Activity,
            )?,
            rank_against(
                reference,
                ref_columns.monetary,
                target,
                columns.monetary,
                Polarity::Activity,
            )?,
        ),
    };

    attach_scores(target, &r, &f, &m)
}

/// Thresholds and rank inputs both from the same column
fn rank_column(df: &DataFrame, name: &str, polarity: Polarity) -> Result<Vec<Rank>, ScoreError> {
    let values = numeric_column(df, name)?;
    let thresholds = estimate_thresholds(&values)?;
    Ok(assign_ranks(&values, thresholds, polarity))
}

/// Thresholds from the reference column, rank inputs from the target column
fn rank_against(
    reference: &DataFrame,
    reference_col: &str,
    target: &DataFrame,
    target_col: &str,
    polarity: Polarity,
) -> Result<Vec<Rank>, ScoreError> {
    let thresholds = estimate_thresholds(&numeric_column(reference, reference_col)?)?;
    Ok(assign_ranks(
        &numeric_column(target, target_col)?,
        thresholds,
        polarity,
    ))
}

fn attach_scores(
    target: &DataFrame,
    r: &[Rank],
    f: &[Rank],
    m: &[Rank],
) -> Result<DataFrame, ScoreError> {
    let labels = |ranks: &[Rank]| ranks.iter().map(|rank| rank.label()).collect::<Vec<_>>();

    let mut scored = target.clone();
    scored.with_column(Series::new("R", labels(r)))?;
    scored.with_column(Series::new("F", labels(f)))?;
    scored.with_column(Series::new("M", labels(m)))?;

    let composite: Vec<i32> = r
        .iter()
        .zip(f.iter())
        .zip(m.iter())
        .map(|((&rk, &fk), &mk)| compose_score(rk, fk, mk))
        .collect();
    scored.with_column(Series::new("RFM", composite))?;

    Ok(scored)
}
