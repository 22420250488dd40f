use super::parser::{Parser, ReadError};
use crate::records::lookup_record::{LookupRecord, LOOKUP_COLUMNS};
use csv::{ByteRecord, ReaderBuilder, Trim};
use log::debug;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Reads the comma separated lookup table, one `LookupRecord` per row.
///
/// The reader does not treat the first row as a header, deciding that is up
/// to the caller. Rows may carry more than three columns, the extra ones are
/// ignored.
pub struct CsvParser;

const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

fn check_record(record: &ByteRecord, path: &Path) -> Result<u64, ReadError> {
    let line = record.position().map_or(0, |pos| pos.line());

    if !record.iter().all(|field| field.is_ascii()) {
        return Err(ReadError::Encoding {
            path: path.to_path_buf(),
            line,
        });
    }

    if record.len() < LOOKUP_COLUMNS {
        return Err(ReadError::MalformedRow {
            path: path.to_path_buf(),
            line,
            fields: record.len(),
        });
    }

    Ok(line)
}

impl Parser for CsvParser {
    type Record = LookupRecord;

    fn parse(
        &self,
        file_path: &Path,
    ) -> Result<Box<dyn Iterator<Item = Result<LookupRecord, ReadError>>>, ReadError> {
        debug!("Opening the lookup file: {:?} ...", file_path);
        let file = File::open(file_path).map_err(|e| ReadError::io(file_path, e))?;
        let mut file = BufReader::new(file);

        // csv strips a leading byte order mark, so look for one first.
        let start = file.fill_buf().map_err(|e| ReadError::io(file_path, e))?;
        if start.starts_with(UTF8_BOM) {
            return Err(ReadError::Encoding {
                path: file_path.to_path_buf(),
                line: 1,
            });
        }

        let rdr = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(file);

        let path = file_path.to_path_buf();
        let iter = rdr
            .into_byte_records()
            .map(move |result| -> Result<LookupRecord, ReadError> {
                let record = result?;
                let line = check_record(&record, &path)?;

                let columns: ByteRecord = record.iter().take(LOOKUP_COLUMNS).collect();
                let row: LookupRecord = columns.deserialize(None)?;
                debug!("{:?}:{}: {:?}", path, line, row);

                Ok(row.normalized())
            });

        Ok(Box::new(iter))
    }
}
