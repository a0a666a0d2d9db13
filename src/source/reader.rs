use std::path::{Path, PathBuf};

use polars::prelude::*;
use thiserror::Error;

use super::schema::{ResolvedColumns, TableSchema};

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("source file not found: {path}")]
    NotFound { path: PathBuf },
    #[error("source file is empty: {path}")]
    Empty { path: PathBuf },
    #[error("source file {path} is missing required columns: {}", .missing.join(", "))]
    SchemaMismatch { path: PathBuf, missing: Vec<String> },
    #[error("failed to read source file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse source file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: PolarsError,
    },
}

impl SourceError {
    pub fn kind(&self) -> &'static str {
        match self {
            SourceError::NotFound { .. } => "not_found",
            SourceError::Empty { .. } => "empty",
            SourceError::SchemaMismatch { .. } => "schema_mismatch",
            SourceError::Io { .. } => "io",
            SourceError::Parse { .. } => "parse",
        }
    }
}

#[derive(Debug, Clone)]
pub struct TableSnapshot {
    pub frame: DataFrame,
    pub columns: ResolvedColumns,
}

impl TableSnapshot {
    pub fn height(&self) -> usize {
        self.frame.height()
    }
}

/// Read `path` as a headed CSV table and bind it against `schema`.
///
/// Every column is read as text; numeric interpretation happens where the
/// values are used, so a stray non-numeric cell never fails the whole read.
pub fn read_snapshot(path: &Path, schema: &TableSchema) -> Result<TableSnapshot, SourceError> {
    let metadata = match std::fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
            return Err(SourceError::NotFound {
                path: path.to_path_buf(),
            });
        }
        Err(source) => {
            return Err(SourceError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    if metadata.len() == 0 {
        return Err(SourceError::Empty {
            path: path.to_path_buf(),
        });
    }

    let frame = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.into()))
        .and_then(|reader| reader.finish())
        .map_err(|source| match source {
            PolarsError::NoData(_) => SourceError::Empty {
                path: path.to_path_buf(),
            },
            source => SourceError::Parse {
                path: path.to_path_buf(),
                source,
            },
        })?;

    if frame.height() == 0 {
        return Err(SourceError::Empty {
            path: path.to_path_buf(),
        });
    }

    let header: Vec<&str> = frame
        .get_column_names()
        .into_iter()
        .map(|name| name.as_str())
        .collect();
    let columns = schema
        .resolve(&header)
        .map_err(|missing| SourceError::SchemaMismatch {
            path: path.to_path_buf(),
            missing,
        })?;

    log::debug!(
        "source_read table={} path={} rows={} columns={}",
        schema.name,
        path.display(),
        frame.height(),
        header.len()
    );

    Ok(TableSnapshot { frame, columns })
}

pub fn text_column(frame: &DataFrame, name: &str) -> PolarsResult<StringChunked> {
    let column = frame.column(name)?.cast(&DataType::String)?;
    Ok(column.str()?.clone())
}
