use myip::extract_ip;
use proptest::prelude::*;

proptest! {
    // Any text without an "IP:" line start yields an empty address.
    #[test]
    fn prop_no_label_no_ip(lines in prop::collection::vec("[a-zA-Z ]{0,20}", 0..8)) {
        let text = lines
            .into_iter()
            .filter(|l| !l.starts_with("IP:"))
            .collect::<Vec<_>>()
            .join("\n");
        prop_assert_eq!(extract_ip(&text), "");
    }

    #[test]
    fn prop_label_line_is_found(
        before in prop::collection::vec("[a-z]{1,10}: [a-z]{0,10}", 0..5),
        ip in "[0-9]{1,3}\\.[0-9]{1,3}\\.[0-9]{1,3}\\.[0-9]{1,3}",
    ) {
        let mut lines = before;
        lines.push(format!("IP: {ip}"));
        lines.push("City: Riga".to_string());
        prop_assert_eq!(extract_ip(&lines.join("\n")), ip);
    }

    #[test]
    fn prop_extract_ip_no_panic(s in "(?s).*") {
        let _ = extract_ip(&s);
    }
}
