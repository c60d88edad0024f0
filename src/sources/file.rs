use crate::sources::csv::{parse_csv, ParseOutcome};
use crate::sources::traits::ListingSource;
use anyhow::Result;
use async_trait::async_trait;
use std::error::Error;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Reasons an uploaded file could not be turned into text
#[derive(Debug)]
pub enum UploadError {
    /// File name does not end in `.csv`
    NotCsv(String),
    Read { file_name: String, source: io::Error },
}

impl fmt::Display for UploadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadError::NotCsv(name) => write!(f, "Not a CSV file: {name}"),
            UploadError::Read { file_name, source } => {
                write!(f, "Failed to read {file_name}: {source}")
            }
        }
    }
}

impl Error for UploadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            UploadError::NotCsv(_) => None,
            UploadError::Read { source, .. } => Some(source),
        }
    }
}

/// Listings read from a CSV file on disk
pub struct CsvFileSource {
    path: PathBuf,
    file_name: String,
}

impl CsvFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { path, file_name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ListingSource for CsvFileSource {
    async fn load(&self) -> Result<ParseOutcome> {
        // Checked by name only, like a file picker's accept filter
        if !self.file_name.ends_with(".csv") {
            return Err(UploadError::NotCsv(self.file_name.clone()).into());
        }

        debug!("Reading {}", self.path.display());
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| UploadError::Read {
                file_name: self.file_name.clone(),
                source,
            })?;

        info!("Read {} bytes from {}", text.len(), self.file_name);
        Ok(parse_csv(&text))
    }

    fn source_name(&self) -> &str {
        &self.file_name
    }
}

/// Listings from CSV text that is already in memory (stdin, drag and drop)
pub struct TextSource {
    name: String,
    text: String,
}

impl TextSource {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

#[async_trait]
impl ListingSource for TextSource {
    async fn load(&self) -> Result<ParseOutcome> {
        Ok(parse_csv(&self.text))
    }

    fn source_name(&self) -> &str {
        &self.name
    }
}
