use crate::domain::model::ConsolidationReport;
use crate::utils::error::Result;
use polars::prelude::*;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Reads one publication. Every column is kept as text: the portal's files
/// use decimal commas and vary in column order between years.
pub fn read_publication(path: &Path, separator: u8) -> Result<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .with_parse_options(
            CsvParseOptions::default()
                .with_separator(separator)
                .with_encoding(CsvEncoding::LossyUtf8),
        )
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    tracing::debug!(
        "Read {} ({} rows, {} columns)",
        path.display(),
        df.height(),
        df.width()
    );
    Ok(df)
}

/// Stacks every input into one frame, unioning columns by name, and writes
/// it as Snappy-compressed Parquet. Empty files are skipped. Returns `None`
/// when no non-empty input is left.
pub fn consolidate_csv_files(
    inputs: &[PathBuf],
    separator: u8,
    output: &Path,
) -> Result<Option<ConsolidationReport>> {
    let mut frames = Vec::with_capacity(inputs.len());
    for path in inputs {
        if std::fs::metadata(path)?.len() == 0 {
            tracing::warn!("Skipping empty file {}", path.display());
            continue;
        }
        frames.push(read_publication(path, separator)?);
    }

    if frames.is_empty() {
        return Ok(None);
    }

    let mut combined = polars::functions::concat_df_diagonal(&frames)?;

    let mut file = File::create(output)?;
    ParquetWriter::new(&mut file)
        .with_compression(ParquetCompression::Snappy)
        .finish(&mut combined)?;

    Ok(Some(ConsolidationReport {
        input_files: frames.len(),
        rows: combined.height(),
        columns: combined.width(),
        output_path: output.display().to_string(),
    }))
}
