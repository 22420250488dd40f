use std::{
    cmp::Ordering,
    collections::HashMap,
    fs::File,
    io::{BufWriter, Write},
};

use anyhow::{anyhow, Context};
use log::debug;

use crate::{
    aggregator::FlowCounts,
    args::{ExportMethodType, OutputConfig},
    records::flow_record::PortProtocol,
};

/// Sort key for ports: ports that parse as integers come first in numeric
/// order, followed by every other port in lexicographic order.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum PortSortKey<'a> {
    Numeric(i128),
    Text(&'a str),
}

impl<'a> PortSortKey<'a> {
    fn of(port: &'a str) -> Self {
        match port.parse::<i128>() {
            Ok(number) => PortSortKey::Numeric(number),
            Err(_) => PortSortKey::Text(port),
        }
    }
}

fn compare_port_protocol(a: &PortProtocol, b: &PortProtocol) -> Ordering {
    PortSortKey::of(&a.port)
        .cmp(&PortSortKey::of(&b.port))
        .then_with(|| a.protocol.cmp(&b.protocol))
        // "0443" and "443" share a numeric key
        .then_with(|| a.port.cmp(&b.port))
}

pub fn write_tag_counts<W: Write>(
    writer: &mut W,
    tag_counts: &HashMap<String, u64>,
) -> std::io::Result<()> {
    let mut entries: Vec<(&String, &u64)> = tag_counts.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    writeln!(writer, "Tag Counts:")?;
    writeln!(writer, "Tag,Count")?;
    for (tag, count) in entries {
        writeln!(writer, "{},{}", tag, count)?;
    }
    Ok(())
}

pub fn write_port_protocol_counts<W: Write>(
    writer: &mut W,
    port_protocol_counts: &HashMap<PortProtocol, u64>,
) -> std::io::Result<()> {
    let mut entries: Vec<(&PortProtocol, &u64)> = port_protocol_counts.iter().collect();
    entries.sort_by(|a, b| compare_port_protocol(a.0, b.0));

    writeln!(writer, "Port/Protocol Combination Counts:")?;
    writeln!(writer, "Port,Protocol,Count")?;
    for (key, count) in entries {
        writeln!(writer, "{},{},{}", key.port, key.protocol, count)?;
    }
    Ok(())
}

/// Writes both sections of the report, separated by a blank line.
pub fn write_report<W: Write>(writer: &mut W, counts: &FlowCounts) -> std::io::Result<()> {
    write_tag_counts(writer, &counts.tag_counts)?;
    writeln!(writer)?;
    write_port_protocol_counts(writer, &counts.port_protocol_counts)
}

pub struct OutputWriter {
    writer: BufWriter<Box<dyn Write>>,
}

impl OutputWriter {
    pub fn new(config: &OutputConfig) -> anyhow::Result<Self> {
        let writer: BufWriter<Box<dyn Write>> = match config.output {
            ExportMethodType::File => {
                let path = config
                    .export_path
                    .as_ref()
                    .ok_or_else(|| anyhow!("an export path is required for file output"))?;
                let file = File::create(path)
                    .with_context(|| format!("failed to create {}", path.display()))?;
                BufWriter::new(Box::new(file))
            }
            ExportMethodType::Print => BufWriter::new(Box::new(std::io::stdout())),
        };

        Ok(OutputWriter { writer })
    }

    pub fn write_counts(&mut self, counts: &FlowCounts) -> std::io::Result<()> {
        debug!("Writing report to output");
        write_report(&mut self.writer, counts)
    }

    /// Flushes the writer, surfacing any write error buffered so far.
    pub fn flush_and_close(&mut self) -> std::io::Result<()> {
        self.writer.flush()
    }
}
