//! CSV loading and writing around the scoring core

use polars::prelude::*;

/// Load a record table from a CSV file with a header row
pub fn load_table(path: &str) -> crate::Result<DataFrame> {
    let df = CsvReader::from_path(path)?.has_header(true).finish()?;
    if df.height() == 0 {
        anyhow::bail!("no rows found in {}", path);
    }
    Ok(df)
}

/// Check that the named columns exist before scoring, for a readable failure
pub fn require_columns(df: &DataFrame, names: &[&str]) -> crate::Result<()> {
    for name in names {
        if df.column(name).is_err() {
            anyhow::bail!(
                "column '{}' not found; table has columns {:?}",
                name,
                df.get_column_names()
            );
        }
    }
    Ok(())
}

/// Write a scored table back to CSV
pub fn write_table(df: &mut DataFrame, path: &str) -> crate::Result<()> {
    let mut file = std::fs::File::create(path)?;
    CsvWriter::new(&mut file).finish(df)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_csv() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "CustomerID,Recency,Frequency,Monetary").unwrap();
        writeln!(file, "101,5,10,20").unwrap();
        writeln!(file, "102,50,50,60").unwrap();
        writeln!(file, "103,95,90,100").unwrap();
        file
    }

    #[test]
    fn test_load_table() {
        let file = create_test_csv();
        let df = load_table(file.path().to_str().unwrap()).unwrap();
        assert_eq!(df.height(), 3);
        assert_eq!(df.width(), 4);
    }

    #[test]
    fn test_load_table_empty() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "CustomerID,Recency,Frequency,Monetary").unwrap();
        let result = load_table(file.path().to_str().unwrap());
        assert!(result.is_err());
    }

    #[test]
    fn test_require_columns() {
        let file = create_test_csv();
        let df = load_table(file.path().to_str().unwrap()).unwrap();
        assert!(require_columns(&df, &["Recency", "Frequency", "Monetary"]).is_ok());

        let err = require_columns(&df, &["Recency", "Revenue"]).unwrap_err();
        assert!(err.to_string().contains("Revenue"));
    }

    #[test]
    fn test_write_table_round_trip() {
        let file = create_test_csv();
        let mut df = load_table(file.path().to_str().unwrap()).unwrap();

        let out = NamedTempFile::new().unwrap();
        write_table(&mut df, out.path().to_str().unwrap()).unwrap();
        let reloaded = load_table(out.path().to_str().unwrap()).unwrap();
        assert_eq!(reloaded.height(), 3);
    }
}
