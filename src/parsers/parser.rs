use csv::Error as CsvError;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Csv(#[from] CsvError),

    #[error(
        "{}:{line}: expected 3 columns (dstport,protocol,tag), found {fields}",
        .path.display()
    )]
    MalformedRow {
        path: PathBuf,
        line: u64,
        fields: usize,
    },

    #[error("{}:{line}: expected at least 8 fields, found {tokens}", .path.display())]
    MalformedLine {
        path: PathBuf,
        line: u64,
        tokens: usize,
    },

    #[error("{}:{line}: input is not plain ASCII text", .path.display())]
    Encoding { path: PathBuf, line: u64 },
}

impl ReadError {
    pub fn io(path: &Path, source: io::Error) -> Self {
        ReadError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// A file format that can be read record by record.
///
/// The file stays open for as long as the returned iterator lives, so it is
/// released as soon as the caller is done with it, including on error.
pub trait Parser {
    type Record;

    fn parse(
        &self,
        file_path: &Path,
    ) -> Result<Box<dyn Iterator<Item = Result<Self::Record, ReadError>>>, ReadError>;
}
