mod report_test;

#[cfg(test)]
use std::io::Write;

#[cfg(test)]
pub fn temp_file(contents: &[u8]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents).unwrap();
    file.flush().unwrap();
    file
}

/// A version 2 flow log line with the given destination port and protocol number.
#[cfg(test)]
pub fn flow_line(dst_port: &str, protocol: &str) -> String {
    format!(
        "2 123456789012 eni-0a1b2c3d 10.0.1.201 198.51.100.2 1234 {} {} 25 20000 1620140761 1620140821 ACCEPT OK\n",
        dst_port, protocol
    )
}
