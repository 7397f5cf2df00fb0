//! Scatter-plot rendering for scored tables using Plotters

use crate::score::numeric_column;
use plotters::prelude::*;
use polars::prelude::DataFrame;

/// Point color for recency/frequency plots
const RF_POINT: RGBColor = RGBColor(0xFE, 0xB9, 0x41);
/// Point color for recency/monetary plots
const RM_POINT: RGBColor = RGBColor(0xFF, 0x00, 0x80);

/// Create a scatter plot of two numeric columns of a scored table
///
/// # Arguments
/// * `df` - scored table (used read-only; no computation on the values)
/// * `x_col` / `y_col` - names of the numeric columns to plot
/// * `output_path` - path to save the PNG plot
/// * `plot_title` - title for the plot
pub fn create_scatter_plot(
    df: &DataFrame,
    x_col: &str,
    y_col: &str,
    output_path: &str,
    plot_title: Option<&str>,
) -> crate::Result<()> {
    let title = plot_title.unwrap_or("RFM Scatter");
    scatter(df, x_col, y_col, output_path, title, RF_POINT)
}

/// Recency-over-frequency scatter (recency on the y-axis)
pub fn plot_recency_frequency(
    df: &DataFrame,
    frequency_col: &str,
    recency_col: &str,
    output_path: &str,
) -> crate::Result<()> {
    scatter(df, frequency_col, recency_col, output_path, "RF", RF_POINT)
}

/// Recency-over-monetary scatter (recency on the y-axis)
pub fn plot_recency_monetary(
    df: &DataFrame,
    monetary_col: &str,
    recency_col: &str,
    output_path: &str,
) -> crate::Result<()> {
    scatter(df, monetary_col, recency_col, output_path, "RM", RM_POINT)
}

fn scatter(
    df: &DataFrame,
    x_col: &str,
    y_col: &str,
    output_path: &str,
    title: &str,
    color: RGBColor,
) -> crate::Result<()> {
    let x_values = numeric_column(df, x_col)?;
    let y_values = numeric_column(df, y_col)?;

    // Plot bounds with some padding
    let x_min = x_values.iter().fold(f64::INFINITY, |a, &b| a.min(b));
    let x_max = x_values.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b));
    let y_min = y_values.iter().fold(f64::INFINITY, |a, &b| a.min(b));
    let y_max = y_values.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b));
    let x_pad = ((x_max - x_min) * 0.05).max(0.5);
    let y_pad = ((y_max - y_min) * 0.05).max(0.5);

    let root = BitMapBackend::new(output_path, (800, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min - x_pad..x_max + x_pad, y_min - y_pad..y_max + y_pad)?;

    chart
        .configure_mesh()
        .x_desc(x_col)
        .y_desc(y_col)
        .axis_desc_style(("sans-serif", 15))
        .draw()?;

    chart.draw_series(
        x_values
            .iter()
            .zip(y_values.iter())
            .map(|(&x, &y)| Circle::new((x, y), 4, color.mix(0.5).filled())),
    )?;

    root.present()?;
    println!("Scatter plot saved to: {}", output_path);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;
    use std::path::Path;
    use tempfile::tempdir;

    fn create_test_table() -> DataFrame {
        df!(
            "Recency" => [5.0, 50.0, 95.0, 20.0, 70.0, 40.0],
            "Frequency" => [10.0, 50.0, 90.0, 35.0, 60.0, 25.0],
            "Monetary" => [20.0, 60.0, 100.0, 45.0, 80.0, 30.0],
        )
        .unwrap()
    }

    #[test]
    fn test_create_scatter_plot() {
        let df = create_test_table();
        let temp_dir = tempdir().unwrap();
        let output_path = temp_dir.path().join("test_scatter.png");
        let output_str = output_path.to_str().unwrap();

        let result = create_scatter_plot(&df, "Frequency", "Recency", output_str, None);
        assert!(result.is_ok());
        assert!(Path::new(output_str).exists());
    }

    #[test]
    fn test_plot_rf_and_rm() {
        let df = create_test_table();
        let temp_dir = tempdir().unwrap();

        let rf_path = temp_dir.path().join("rf.png");
        let result = plot_recency_frequency(&df, "Frequency", "Recency", rf_path.to_str().unwrap());
        assert!(result.is_ok());
        assert!(rf_path.exists());

        let rm_path = temp_dir.path().join("rm.png");
        let result = plot_recency_monetary(&df, "Monetary", "Recency", rm_path.to_str().unwrap());
        assert!(result.is_ok());
        assert!(rm_path.exists());
    }

    #[test]
    fn test_missing_column_is_an_error() {
        let df = create_test_table();
        let temp_dir = tempdir().unwrap();
        let output_path = temp_dir.path().join("bad.png");

        let result =
            create_scatter_plot(&df, "NoSuchColumn", "Recency", output_path.to_str().unwrap(), None);
        assert!(result.is_err());
    }
}
