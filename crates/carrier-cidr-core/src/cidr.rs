// # CIDR Entries and Canonical Form
//
// Entries are opaque `"ip/mask"` tokens. They are never parsed into address
// semantics; ordering only looks at their numeric fields.
//
// ## Canonical Order
//
// Entries are split on `.` and `/` and compared by the first three tokens
// (the first three address octets), ascending. The fourth octet and the
// mask never take part in the comparison, and the sort is stable, so entries
// sharing a /24 prefix keep their scraped order.
//
// ## Snapshot Text Form
//
// One entry per line, each followed by `\n`. The empty set renders as the
// empty string.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of leading numeric tokens that take part in canonical ordering
const ORDERING_TOKENS: usize = 3;

/// One published gateway block, e.g. `210.153.84.0/24`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CidrEntry(String);

/// Ordered sequence of entries for one carrier
pub type CidrSet = Vec<CidrEntry>;

impl CidrEntry {
    /// Wrap an already-joined `"ip/mask"` token
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Build an entry from its address and mask halves
    pub fn from_parts(ip: &str, mask: &str) -> Self {
        Self(format!("{}/{}", ip, mask))
    }

    /// The raw token
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Ordering key: the first three numeric tokens
    ///
    /// A token's value is its leading decimal digits; a token with none
    /// (or a missing token) counts as 0.
    pub fn sort_key(&self) -> [u64; ORDERING_TOKENS] {
        let mut key = [0u64; ORDERING_TOKENS];
        for (slot, token) in key.iter_mut().zip(self.0.split(['.', '/'])) {
            *slot = leading_number(token);
        }
        key
    }
}

impl fmt::Display for CidrEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CidrEntry {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

fn leading_number(token: &str) -> u64 {
    token
        .trim()
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0u64, |acc, b| {
            acc.saturating_mul(10).saturating_add(u64::from(b - b'0'))
        })
}

/// Sort a set into canonical order (stable, first three octets only)
pub fn canonicalize(mut set: CidrSet) -> CidrSet {
    // sort_by_key is stable
    set.sort_by_key(CidrEntry::sort_key);
    set
}

/// Render a set as snapshot text
pub fn to_snapshot_text(set: &[CidrEntry]) -> String {
    let mut text = String::new();
    for entry in set {
        text.push_str(entry.as_str());
        text.push('\n');
    }
    text
}

/// Parse snapshot text back into a set, skipping blank lines
pub fn parse_snapshot(text: &str) -> CidrSet {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(CidrEntry::new)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(tokens: &[&str]) -> CidrSet {
        tokens.iter().map(|t| CidrEntry::new(*t)).collect()
    }

    #[test]
    fn test_canonical_order_by_first_three_octets() {
        let sorted = canonicalize(set(&["10.2.3.4/24", "9.9.9.9/24", "10.2.1.1/24"]));
        assert_eq!(sorted, set(&["9.9.9.9/24", "10.2.1.1/24", "10.2.3.4/24"]));
    }

    #[test]
    fn test_order_is_numeric_not_lexical() {
        let sorted = canonicalize(set(&["100.0.0.0/8", "20.0.0.0/8", "3.0.0.0/8"]));
        assert_eq!(sorted, set(&["3.0.0.0/8", "20.0.0.0/8", "100.0.0.0/8"]));
    }

    #[test]
    fn test_fourth_octet_and_mask_do_not_reorder() {
        // Same first three octets: input order survives regardless of the
        // fourth octet or the prefix length.
        let input = set(&["210.153.84.128/25", "210.153.84.0/24", "210.153.84.64/23"]);
        assert_eq!(canonicalize(input.clone()), input);
    }

    #[test]
    fn test_canonicalize_empty() {
        assert!(canonicalize(Vec::new()).is_empty());
    }

    #[test]
    fn test_sort_key_tolerates_malformed_tokens() {
        assert_eq!(CidrEntry::new("10.x.3.4/24").sort_key(), [10, 0, 3]);
        assert_eq!(CidrEntry::new("10.2").sort_key(), [10, 2, 0]);
        assert_eq!(CidrEntry::new("12a.7b.3").sort_key(), [12, 7, 3]);
    }

    #[test]
    fn test_from_parts_joins_with_slash() {
        assert_eq!(
            CidrEntry::from_parts("202.179.204.0", "24").as_str(),
            "202.179.204.0/24"
        );
    }

    #[test]
    fn test_snapshot_text_form() {
        let entries = set(&["1.2.3.0/24", "4.5.6.0/24"]);
        let text = to_snapshot_text(&entries);
        assert_eq!(text, "1.2.3.0/24\n4.5.6.0/24\n");
        assert_eq!(parse_snapshot(&text), entries);
        assert_eq!(to_snapshot_text(&[]), "");
    }

    #[test]
    fn test_parse_snapshot_skips_blank_lines() {
        let parsed = parse_snapshot("\n1.2.3.0/24\r\n\n  4.5.6.0/24  \n");
        assert_eq!(parsed, set(&["1.2.3.0/24", "4.5.6.0/24"]));
    }
}
