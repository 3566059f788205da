//! DNS record extraction utilities.
//!
//! Helpers that turn raw resolver answers into output-ready values.

use crate::config::SPF_MARKER;

/// Returns every TXT string that carries an SPF policy.
///
/// Any TXT value containing `v=spf1` counts, in the order the records were
/// returned.
pub fn extract_spf_records(txt_records: &[String]) -> Vec<String> {
    txt_records
        .iter()
        .filter(|txt| txt.contains(SPF_MARKER))
        .cloned()
        .collect()
}

/// Strips trailing dots from a DNS name (`mx.example.com.` → `mx.example.com`).
pub fn strip_trailing_dot(name: &str) -> &str {
    name.trim().trim_end_matches('.')
}

/// Normalizes a list of hostnames from a DNS answer, dropping empty entries
/// (the root name `.` becomes empty after stripping).
pub fn clean_hostnames(names: Vec<String>) -> Vec<String> {
    names
        .iter()
        .map(|name| strip_trailing_dot(name))
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_spf_records_subset() {
        let txt = vec![
            "v=spf1 include:_spf.example.com ~all".to_string(),
            "google-site-verification=abc".to_string(),
            "  v=spf1 -all".to_string(),
        ];
        assert_eq!(
            extract_spf_records(&txt),
            vec![
                "v=spf1 include:_spf.example.com ~all".to_string(),
                "  v=spf1 -all".to_string()
            ]
        );
    }

    #[test]
    fn test_extract_spf_records_substring_match() {
        let txt = vec!["prefix v=spf1 a mx".to_string(), "V=SPF1 -all".to_string()];
        assert_eq!(extract_spf_records(&txt), vec!["prefix v=spf1 a mx".to_string()]);
    }

    #[test]
    fn test_extract_spf_records_none() {
        assert!(extract_spf_records(&[]).is_empty());
        assert!(extract_spf_records(&["v=DMARC1; p=none".to_string()]).is_empty());
    }

    #[test]
    fn test_strip_trailing_dot() {
        assert_eq!(strip_trailing_dot("mx.example.com."), "mx.example.com");
        assert_eq!(strip_trailing_dot("mx.example.com"), "mx.example.com");
        assert_eq!(strip_trailing_dot("ns1.example.com.."), "ns1.example.com");
        assert_eq!(strip_trailing_dot("."), "");
    }

    #[test]
    fn test_clean_hostnames_preserves_order() {
        let names = vec![
            "mx2.example.com.".to_string(),
            ".".to_string(),
            "mx1.example.com.".to_string(),
        ];
        assert_eq!(
            clean_hostnames(names),
            vec!["mx2.example.com".to_string(), "mx1.example.com".to_string()]
        );
    }
}
