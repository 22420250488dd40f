use std::collections::HashMap;
use std::path::Path;

use log::{debug, info};

use crate::lookup::LookupTable;
use crate::parsers::{
    flow_log_parser::FlowLogParser,
    parser::{Parser, ReadError},
};
use crate::records::flow_record::{FlowRecord, PortProtocol};

/// Tag counted for records with no lookup entry.
pub const UNTAGGED: &str = "Untagged";

/// Result of a pass over a flow log.
///
/// Every processed line adds one to both maps, so their totals always equal
/// `lines_processed`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FlowCounts {
    pub tag_counts: HashMap<String, u64>,
    pub port_protocol_counts: HashMap<PortProtocol, u64>,
    pub lines_processed: u64,
}

pub struct FlowAggregator<'a> {
    lookup: &'a LookupTable,
    counts: FlowCounts,
}

impl<'a> FlowAggregator<'a> {
    pub fn new(lookup: &'a LookupTable) -> Self {
        Self {
            lookup,
            counts: FlowCounts::default(),
        }
    }

    /// Counts one record under its tag and its (port, protocol) pair.
    pub fn add_record(&mut self, record: &FlowRecord) {
        let key = record.key();
        let tag = self.lookup.tag_for(&key).unwrap_or(UNTAGGED);
        debug!("Line {}: {:?} -> {}", record.line, key, tag);

        *self.counts.tag_counts.entry(tag.to_string()).or_insert(0) += 1;
        *self.counts.port_protocol_counts.entry(key).or_insert(0) += 1;
        self.counts.lines_processed += 1;
    }

    pub fn finish(self) -> FlowCounts {
        self.counts
    }
}

/// Tags every record of the flow log at `path` and counts the results.
///
/// The first bad line aborts the pass; no partial counts are returned.
pub fn aggregate_flow_log(path: &Path, lookup: &LookupTable) -> Result<FlowCounts, ReadError> {
    let parser = FlowLogParser;
    let mut aggregator = FlowAggregator::new(lookup);

    for record in parser.parse(path)? {
        aggregator.add_record(&record?);
    }

    let counts = aggregator.finish();
    info!(
        "Processed {} flow log lines from {:?}: {} tags, {} port/protocol combinations",
        counts.lines_processed,
        path,
        counts.tag_counts.len(),
        counts.port_protocol_counts.len()
    );
    Ok(counts)
}
