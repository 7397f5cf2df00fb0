//! RfmScore: RFM customer scoring over CSV tables
//!
//! This is the main entrypoint that orchestrates table loading, scoring,
//! output writing and visualization.

use anyhow::Result;
use clap::Parser;
use polars::prelude::DataFrame;
use rfmscore::{
    create_scatter_plot, load_table, require_columns, score_rfm, write_table, Args, RfmColumns,
    ThresholdSource,
};
use std::time::Instant;

fn main() -> Result<()> {
    let args = Args::parse();

    if args.verbose {
        println!("RfmScore - RFM customer scoring");
        println!("===============================\n");
    }

    run_pipeline(&args)
}

fn run_pipeline(args: &Args) -> Result<()> {
    let start_time = Instant::now();

    // Step 1: Load the target table
    if args.verbose {
        println!("Step 1: Loading input table");
        println!("  Input file: {}", args.input);
    }
    let target = load_table(&args.input)?;
    require_columns(
        &target,
        &[&args.recency_col, &args.frequency_col, &args.monetary_col],
    )?;
    println!("✓ Loaded {} rows from {}", target.height(), args.input);

    // Step 2: Resolve the threshold source
    let reference: Option<DataFrame> = match &args.reference {
        Some(path) => {
            let df = load_table(path)?;
            println!("✓ Loaded {} reference rows from {}", df.height(), path);
            Some(df)
        }
        None => None,
    };
    let source = ThresholdSource::from_parts(
        reference.as_ref(),
        args.ref_recency_col.as_deref(),
        args.ref_frequency_col.as_deref(),
        args.ref_monetary_col.as_deref(),
        args.rank_basis(),
    )?;
    match &source {
        ThresholdSource::SelfThreshold => {
            println!("Getting threshold percentiles from the input table")
        }
        ThresholdSource::External { .. } => {
            println!("Getting threshold percentiles from the reference table")
        }
    }

    // Step 3: Score
    let columns = RfmColumns {
        recency: &args.recency_col,
        frequency: &args.frequency_col,
        monetary: &args.monetary_col,
    };
    let score_start = Instant::now();
    let mut scored = score_rfm(&target, &columns, &source)?;
    println!("✓ Scored {} rows", scored.height());
    if args.verbose {
        println!("  Scoring time: {:.2}s", score_start.elapsed().as_secs_f64());
        println!("\n{}", scored.head(Some(5)));
    }

    // Step 4: Write results
    write_table(&mut scored, &args.output)?;
    println!("✓ Scored table written to {}", args.output);

    // Step 5: Optional scatter plot
    if let Some(plot_path) = &args.plot {
        create_scatter_plot(&scored, &args.plot_x, &args.plot_y, plot_path, None)?;
    }

    println!(
        "\nTotal processing time: {:.2}s",
        start_time.elapsed().as_secs_f64()
    );
    Ok(())
}
