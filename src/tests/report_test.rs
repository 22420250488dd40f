#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use crate::{
        aggregator::FlowCounts,
        output::{write_port_protocol_counts, write_report, write_tag_counts},
        records::flow_record::PortProtocol,
    };

    fn tag_counts(entries: &[(&str, u64)]) -> HashMap<String, u64> {
        entries
            .iter()
            .map(|(tag, count)| (tag.to_string(), *count))
            .collect()
    }

    fn port_protocol_counts(entries: &[(&str, &str, u64)]) -> HashMap<PortProtocol, u64> {
        entries
            .iter()
            .map(|(port, protocol, count)| (PortProtocol::new(port, protocol), *count))
            .collect()
    }

    fn render<F>(write: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> std::io::Result<()>,
    {
        let mut buffer = Vec::new();
        write(&mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_tags_sorted_lexicographically() {
        let counts = tag_counts(&[("sv_P2", 1), ("Untagged", 2), ("sv_P1", 3)]);
        let output = render(|w| write_tag_counts(w, &counts));

        assert_eq!(
            output,
            "Tag Counts:\nTag,Count\nUntagged,2\nsv_P1,3\nsv_P2,1\n"
        );
    }

    #[test]
    fn test_ports_sorted_numerically() {
        let counts =
            port_protocol_counts(&[("80", "tcp", 1), ("443", "tcp", 1), ("1024", "tcp", 1)]);
        let output = render(|w| write_port_protocol_counts(w, &counts));

        assert_eq!(
            output,
            "Port/Protocol Combination Counts:\nPort,Protocol,Count\n80,tcp,1\n443,tcp,1\n1024,tcp,1\n"
        );
    }

    #[test]
    fn test_protocol_breaks_port_ties() {
        let counts =
            port_protocol_counts(&[("53", "udp", 4), ("53", "tcp", 2), ("0", "icmp", 7)]);
        let output = render(|w| write_port_protocol_counts(w, &counts));
        let lines: Vec<&str> = output.lines().skip(2).collect();

        assert_eq!(lines, vec!["0,icmp,7", "53,tcp,2", "53,udp,4"]);
    }

    #[test]
    fn test_text_ports_after_numeric_ports() {
        let counts = port_protocol_counts(&[
            ("https", "tcp", 1),
            ("8080", "tcp", 1),
            ("ftp", "tcp", 1),
            ("22", "tcp", 1),
        ]);
        let output = render(|w| write_port_protocol_counts(w, &counts));
        let lines: Vec<&str> = output.lines().skip(2).collect();

        assert_eq!(
            lines,
            vec!["22,tcp,1", "8080,tcp,1", "ftp,tcp,1", "https,tcp,1"]
        );
    }

    #[test]
    fn test_ports_beyond_i64_sort_numerically() {
        let counts = port_protocol_counts(&[
            ("99999999999999999999", "tcp", 1),
            ("http", "tcp", 1),
            ("443", "tcp", 1),
        ]);
        let output = render(|w| write_port_protocol_counts(w, &counts));
        let lines: Vec<&str> = output.lines().skip(2).collect();

        assert_eq!(
            lines,
            vec!["443,tcp,1", "99999999999999999999,tcp,1", "http,tcp,1"]
        );
    }

    #[test]
    fn test_zero_padded_ports_stay_distinct() {
        let counts = port_protocol_counts(&[("443", "tcp", 1), ("0443", "tcp", 2)]);
        let output = render(|w| write_port_protocol_counts(w, &counts));
        let lines: Vec<&str> = output.lines().skip(2).collect();

        assert_eq!(lines, vec!["0443,tcp,2", "443,tcp,1"]);
    }

    #[test]
    fn test_full_report() {
        let counts = FlowCounts {
            tag_counts: tag_counts(&[("sv_P2", 1), ("Untagged", 2), ("sv_P1", 3)]),
            port_protocol_counts: port_protocol_counts(&[
                ("80", "tcp", 1),
                ("443", "tcp", 1),
                ("1024", "tcp", 1),
            ]),
            lines_processed: 3,
        };
        let output = render(|w| write_report(w, &counts));

        let expected = "Tag Counts:\n\
                        Tag,Count\n\
                        Untagged,2\n\
                        sv_P1,3\n\
                        sv_P2,1\n\
                        \n\
                        Port/Protocol Combination Counts:\n\
                        Port,Protocol,Count\n\
                        80,tcp,1\n\
                        443,tcp,1\n\
                        1024,tcp,1\n";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_empty_report_keeps_headers() {
        let output = render(|w| write_report(w, &FlowCounts::default()));

        assert_eq!(
            output,
            "Tag Counts:\nTag,Count\n\nPort/Protocol Combination Counts:\nPort,Protocol,Count\n"
        );
    }
}
