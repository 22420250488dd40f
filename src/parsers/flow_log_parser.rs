use super::parser::{Parser, ReadError};
use crate::records::flow_record::FlowRecord;
use log::debug;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Splits a `\n` terminated chunk on bare `\r` as well, so `\n`, `\r\n`
/// and `\r` all end a line.
fn split_carriage_returns(chunk: io::Result<Vec<u8>>) -> Vec<io::Result<Vec<u8>>> {
    match chunk {
        Ok(mut bytes) => {
            if bytes.last() == Some(&b'\r') {
                bytes.pop();
            }
            bytes
                .split(|byte| *byte == b'\r')
                .map(|line| Ok(line.to_vec()))
                .collect()
        }
        Err(e) => vec![Err(e)],
    }
}

/// Reads a flow log, one `FlowRecord` per non-blank line.
pub struct FlowLogParser;

impl Parser for FlowLogParser {
    type Record = FlowRecord;

    fn parse(
        &self,
        file_path: &Path,
    ) -> Result<Box<dyn Iterator<Item = Result<FlowRecord, ReadError>>>, ReadError> {
        debug!("Opening the flow log: {:?} ...", file_path);
        let file = File::open(file_path).map_err(|e| ReadError::io(file_path, e))?;
        let reader = BufReader::new(file);

        let path = file_path.to_path_buf();
        let iter = reader
            .split(b'\n')
            .flat_map(split_carriage_returns)
            .enumerate()
            .filter_map(move |(index, result)| {
                let line = index as u64 + 1;

                let bytes = match result {
                    Ok(bytes) => bytes,
                    Err(e) => return Some(Err(ReadError::io(&path, e))),
                };

                // ASCII is always valid UTF-8, so one check covers both.
                let text = match String::from_utf8(bytes) {
                    Ok(text) if text.is_ascii() => text,
                    _ => {
                        return Some(Err(ReadError::Encoding {
                            path: path.clone(),
                            line,
                        }))
                    }
                };

                let text = text.trim();
                if text.is_empty() {
                    debug!("{:?}:{}: skipping blank line", path, line);
                    return None;
                }

                Some(FlowRecord::from_line(text, &path, line))
            });

        Ok(Box::new(iter))
    }
}
