use serde::Deserialize;

use super::flow_record::PortProtocol;

/// Number of columns a lookup row must have: dstport, protocol and tag.
pub const LOOKUP_COLUMNS: usize = 3;

/// One row of the lookup table.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LookupRecord {
    pub dst_port: String,
    pub protocol: String,
    pub tag: String,
}

impl LookupRecord {
    /// Protocol names are matched case-insensitively, so they are stored
    /// lower-cased. The port stays as written.
    pub fn normalized(self) -> Self {
        LookupRecord {
            dst_port: self.dst_port.trim().to_string(),
            protocol: self.protocol.trim().to_ascii_lowercase(),
            tag: self.tag.trim().to_string(),
        }
    }

    /// Whether this row looks like the `dstport,protocol,tag` header line.
    pub fn is_header(&self) -> bool {
        self.tag.eq_ignore_ascii_case("tag")
    }

    pub fn key(&self) -> PortProtocol {
        PortProtocol::new(&self.dst_port, &self.protocol)
    }
}
