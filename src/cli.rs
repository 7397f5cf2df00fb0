//! Command-line interface definitions and argument parsing

use crate::score::RankBasis;
use clap::Parser;

/// RFM customer scoring CLI over CSV tables
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input CSV file
    #[arg(short, long, default_value = "data.csv")]
    pub input: String,

    /// Column holding recency values
    #[arg(long, default_value = "Recency")]
    pub recency_col: String,

    /// Column holding frequency values
    #[arg(long, default_value = "Frequency")]
    pub frequency_col: String,

    /// Column holding monetary values
    #[arg(long, default_value = "Monetary")]
    pub monetary_col: String,

    /// Optional CSV supplying percentile thresholds instead of the input table.
    /// Requires all three --ref-* column names.
    #[arg(long)]
    pub reference: Option<String>,

    /// Recency column of the reference table
    #[arg(long)]
    pub ref_recency_col: Option<String>,

    /// Frequency column of the reference table
    #[arg(long)]
    pub ref_frequency_col: Option<String>,

    /// Monetary column of the reference table
    #[arg(long)]
    pub ref_monetary_col: Option<String>,

    /// With a reference table, rank the input table's own values against the
    /// reference thresholds instead of re-ranking the reference table
    #[arg(long)]
    pub score_target: bool,

    /// Output path for the scored CSV
    #[arg(short, long, default_value = "rfm_scores.csv")]
    pub output: String,

    /// Optional output path for a scatter plot of two columns of the scored table
    #[arg(short, long)]
    pub plot: Option<String>,

    /// Column on the plot's x-axis
    #[arg(long, default_value = "Frequency")]
    pub plot_x: String,

    /// Column on the plot's y-axis
    #[arg(long, default_value = "Recency")]
    pub plot_y: String,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Basis for rank assignment when a reference table is in play
    pub fn rank_basis(&self) -> RankBasis {
        if self.score_target {
            RankBasis::Target
        } else {
            RankBasis::Reference
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> Args {
        Args {
            input: "test.csv".to_string(),
            recency_col: "Recency".to_string(),
            frequency_col: "Frequency".to_string(),
            monetary_col: "Monetary".to_string(),
            reference: None,
            ref_recency_col: None,
            ref_frequency_col: None,
            ref_monetary_col: None,
            score_target: false,
            output: "out.csv".to_string(),
            plot: None,
            plot_x: "Frequency".to_string(),
            plot_y: "Recency".to_string(),
            verbose: false,
        }
    }

    #[test]
    fn test_rank_basis() {
        let mut args = base_args();
        assert_eq!(args.rank_basis(), RankBasis::Reference);

        args.score_target = true;
        assert_eq!(args.rank_basis(), RankBasis::Target);
    }

    #[test]
    fn test_parses_reference_arguments() {
        let args = Args::parse_from([
            "rfmscore",
            "--input",
            "current.csv",
            "--reference",
            "baseline.csv",
            "--ref-recency-col",
            "Recency",
            "--ref-frequency-col",
            "Frequency",
            "--ref-monetary-col",
            "Monetary",
            "--score-target",
        ]);
        assert_eq!(args.reference.as_deref(), Some("baseline.csv"));
        assert_eq!(args.rank_basis(), RankBasis::Target);
    }
}
