use crate::parsers::parser::ReadError;
use lazy_static::lazy_static;
use std::collections::HashMap;
use std::path::Path;

/// Name given to every protocol number missing from `PROTOCOL_NAMES`.
pub const UNKNOWN_PROTOCOL: &str = "others";

/// Position of the destination port in a flow log line.
const DST_PORT_FIELD: usize = 6;
/// Position of the IANA protocol number in a flow log line.
const PROTOCOL_FIELD: usize = 7;
/// A flow log line needs at least this many fields to reach the protocol.
pub const MIN_FLOW_FIELDS: usize = PROTOCOL_FIELD + 1;

lazy_static! {
    static ref PROTOCOL_NAMES: HashMap<&'static str, &'static str> =
        HashMap::from([("1", "icmp"), ("6", "tcp"), ("17", "udp")]);
}

/// Resolves an IANA protocol number, as written in the flow log, to its name.
pub fn protocol_name(number: &str) -> &'static str {
    PROTOCOL_NAMES
        .get(number)
        .copied()
        .unwrap_or(UNKNOWN_PROTOCOL)
}

/// A destination port and protocol name pair.
///
/// Both parts are compared as text: `0443` and `443` are different ports.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PortProtocol {
    pub port: String,
    pub protocol: String,
}

impl PortProtocol {
    pub fn new(port: &str, protocol: &str) -> Self {
        PortProtocol {
            port: port.to_string(),
            protocol: protocol.to_string(),
        }
    }
}

/// The two fields of a flow log line this tool cares about.
///
/// A full line reads: version, account-id, interface-id, srcaddr, dstaddr,
/// srcport, dstport, protocol, packets, bytes, start, end, action, log-status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowRecord {
    pub line: u64,
    pub dst_port: String,
    pub protocol_number: String,
}

impl FlowRecord {
    pub fn from_line(text: &str, path: &Path, line: u64) -> Result<Self, ReadError> {
        let fields: Vec<&str> = text.split_whitespace().collect();
        if fields.len() < MIN_FLOW_FIELDS {
            return Err(ReadError::MalformedLine {
                path: path.to_path_buf(),
                line,
                tokens: fields.len(),
            });
        }

        Ok(FlowRecord {
            line,
            dst_port: fields[DST_PORT_FIELD].to_string(),
            protocol_number: fields[PROTOCOL_FIELD].to_string(),
        })
    }

    pub fn protocol(&self) -> &'static str {
        protocol_name(&self.protocol_number)
    }

    pub fn key(&self) -> PortProtocol {
        PortProtocol::new(&self.dst_port, self.protocol())
    }
}
