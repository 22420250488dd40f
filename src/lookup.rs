use std::collections::HashMap;
use std::path::Path;

use log::{debug, info, warn};

use crate::parsers::{
    csv_parser::CsvParser,
    parser::{Parser, ReadError},
};
use crate::records::{flow_record::PortProtocol, lookup_record::LookupRecord};

/// Maps a (port, protocol) pair to the tag assigned to it.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LookupTable {
    entries: HashMap<PortProtocol, String>, // last row wins for a repeated key
}

impl LookupTable {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Inserts a row, returning the tag it replaced if the key was already present.
    pub fn insert(&mut self, record: LookupRecord) -> Option<String> {
        let key = record.key();
        self.entries.insert(key, record.tag)
    }

    pub fn tag_for(&self, key: &PortProtocol) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Loads the lookup table at `path`.
///
/// A first row whose tag column reads `tag` (in any case) is taken to be a
/// header and dropped. Any other first row is a regular entry.
pub fn load_lookup_table(path: &Path) -> Result<LookupTable, ReadError> {
    let parser = CsvParser;
    let mut table = LookupTable::new();

    for (index, record) in parser.parse(path)?.enumerate() {
        let record = record?;

        if index == 0 && record.is_header() {
            debug!("Skipping header row: {:?}", record);
            continue;
        }

        if let Some(previous) = table.insert(record) {
            debug!("Overwriting earlier tag {:?}", previous);
        }
    }

    if table.is_empty() {
        warn!("Lookup table {:?} has no entries, every flow will be untagged", path);
    }
    info!("Loaded {} lookup entries from {:?}", table.len(), path);
    Ok(table)
}
