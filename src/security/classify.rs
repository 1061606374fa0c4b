//! Private-address classification.
//!
//! Classification is a textual prefix match over the address string, not
//! bitmask arithmetic. The rule set deliberately mirrors the service's
//! contract: `10.`, `127.`, `169.254.`, `192.168.`, `172.{16..31}.` for
//! IPv4 and `::1`, `fc`/`fd`, `fe80` for IPv6, and nothing else (no
//! `0.0.0.0` special case, no IPv4-mapped IPv6 literals). Broader coverage
//! is opt-in via extra configured prefixes rather than a silent change to
//! the defaults.

/// Address family tag carried alongside a resolved address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddrFamily {
    /// IPv4
    V4,
    /// IPv6
    V6,
}

/// The private-address rule set.
///
/// `Default` yields the fixed contract rules; operators may extend (never
/// shrink) the effective set through [`ClassifierRules::with_extra`].
#[derive(Debug, Clone)]
pub struct ClassifierRules {
    /// IPv4 prefixes classified private (dotted-quad text match).
    pub v4_prefixes: Vec<String>,
    /// Whether `172.` addresses with second octet in [16,31] are private.
    pub v4_range_172: bool,
    /// IPv6 addresses that are private on exact (lower-cased) match.
    pub v6_exact: Vec<String>,
    /// IPv6 prefixes classified private (lower-cased text match).
    pub v6_prefixes: Vec<String>,
}

impl Default for ClassifierRules {
    fn default() -> Self {
        Self {
            v4_prefixes: vec![
                "10.".to_string(),
                "127.".to_string(),
                "169.254.".to_string(),
                "192.168.".to_string(),
            ],
            v4_range_172: true,
            v6_exact: vec!["::1".to_string()],
            v6_prefixes: vec!["fc".to_string(), "fd".to_string(), "fe80".to_string()],
        }
    }
}

impl ClassifierRules {
    /// Returns the default rules extended with additional blocked prefixes.
    ///
    /// Prefixes containing `:` are applied to IPv6 addresses, all others to
    /// IPv4. IPv6 prefixes are lower-cased to match the comparison rules.
    pub fn with_extra(prefixes: &[String]) -> Self {
        let mut rules = Self::default();
        for prefix in prefixes {
            if prefix.contains(':') || prefix.chars().any(|c| c.is_ascii_alphabetic()) {
                rules.v6_prefixes.push(prefix.to_ascii_lowercase());
            } else {
                rules.v4_prefixes.push(prefix.clone());
            }
        }
        rules
    }
}

/// Returns `true` if the address falls in a private/reserved range and must
/// be blocked.
///
/// Pure and total over well-formed address strings. Malformed strings match
/// no private prefix and are classified public; address syntax is the
/// resolution collaborator's responsibility.
pub fn is_private_address(rules: &ClassifierRules, address: &str, family: AddrFamily) -> bool {
    match family {
        AddrFamily::V4 => is_private_v4(rules, address),
        AddrFamily::V6 => is_private_v6(rules, address),
    }
}

fn is_private_v4(rules: &ClassifierRules, address: &str) -> bool {
    if rules.v4_prefixes.iter().any(|p| address.starts_with(p)) {
        return true;
    }
    if rules.v4_range_172 && address.starts_with("172.") {
        // Second octet in [16,31], read from the text.
        if let Some(second) = address.split('.').nth(1) {
            if let Ok(octet) = second.parse::<u8>() {
                return (16..=31).contains(&octet);
            }
        }
    }
    false
}

fn is_private_v6(rules: &ClassifierRules, address: &str) -> bool {
    let lower = address.to_ascii_lowercase();
    if rules.v6_exact.iter().any(|e| lower == *e) {
        return true;
    }
    rules.v6_prefixes.iter().any(|p| lower.starts_with(p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn private_v4(address: &str) -> bool {
        is_private_address(&ClassifierRules::default(), address, AddrFamily::V4)
    }

    fn private_v6(address: &str) -> bool {
        is_private_address(&ClassifierRules::default(), address, AddrFamily::V6)
    }

    #[test]
    fn test_private_ipv4_ranges() {
        assert!(private_v4("10.0.0.1"));
        assert!(private_v4("10.255.255.255"));
        assert!(private_v4("127.0.0.1"));
        assert!(private_v4("169.254.1.1"));
        assert!(private_v4("192.168.1.1"));
        assert!(private_v4("172.16.0.1"));
        assert!(private_v4("172.31.255.255"));
    }

    #[test]
    fn test_public_ipv4() {
        assert!(!private_v4("8.8.8.8"));
        assert!(!private_v4("1.1.1.1"));
        assert!(!private_v4("93.184.216.34"));
        assert!(!private_v4("192.0.2.1"));
        assert!(!private_v4("203.0.113.1"));
        // 172.x outside [16,31] is public
        assert!(!private_v4("172.15.0.1"));
        assert!(!private_v4("172.32.0.1"));
        // Known gaps in the contract rule set stay public
        assert!(!private_v4("0.0.0.0"));
        assert!(!private_v4("100.64.0.1"));
        assert!(!private_v4("224.0.0.1"));
    }

    #[test]
    fn test_private_ipv6_ranges() {
        assert!(private_v6("::1"));
        assert!(private_v6("fc00::1"));
        assert!(private_v6("fd12:3456::1"));
        assert!(private_v6("fe80::1"));
    }

    #[test]
    fn test_ipv6_case_insensitive() {
        assert!(private_v6("FC00::1"));
        assert!(private_v6("FE80::ABCD"));
        assert!(private_v6("Fd00::2"));
    }

    #[test]
    fn test_public_ipv6() {
        assert!(!private_v6("2001:db8::1"));
        assert!(!private_v6("2607:f8b0:4004:800::200e"));
        // fe80 prefix only; fe blocks nothing on its own
        assert!(!private_v6("fe00::1"));
        // IPv4-mapped literals are deliberately not special-cased
        assert!(!private_v6("::ffff:127.0.0.1"));
    }

    #[test]
    fn test_malformed_addresses_classify_public() {
        assert!(!private_v4("not-an-address"));
        assert!(!private_v4(""));
        assert!(!private_v6("not-an-address"));
        // Family mismatch matches no prefix
        assert!(!private_v6("127.0.0.1"));
    }

    #[test]
    fn test_extra_prefixes_extend_rules() {
        let rules = ClassifierRules::with_extra(&["100.64.".to_string(), "FEC0".to_string()]);
        assert!(is_private_address(&rules, "100.64.12.1", AddrFamily::V4));
        assert!(is_private_address(&rules, "fec0::1", AddrFamily::V6));
        // The defaults are still in effect
        assert!(is_private_address(&rules, "127.0.0.1", AddrFamily::V4));
        assert!(!is_private_address(&rules, "8.8.8.8", AddrFamily::V4));
    }

    proptest! {
        #[test]
        fn test_ipv4_classification_matches_rule_definition(
            o1 in 0u8..=255,
            o2 in 0u8..=255,
            o3 in 0u8..=255,
            o4 in 0u8..=255,
        ) {
            let address = format!("{o1}.{o2}.{o3}.{o4}");
            let expected = o1 == 10
                || o1 == 127
                || (o1 == 169 && o2 == 254)
                || (o1 == 192 && o2 == 168)
                || (o1 == 172 && (16..=31).contains(&o2));
            prop_assert_eq!(private_v4(&address), expected, "address {}", address);
        }

        #[test]
        fn test_ipv6_prefix_rules(tail in "[0-9a-f]{1,4}") {
            let ula_c = format!("fc00::{tail}");
            let ula_d = format!("fd00::{tail}");
            let link_local = format!("fe80::{tail}");
            let global = format!("2001:db8::{tail}");
            prop_assert!(private_v6(&ula_c));
            prop_assert!(private_v6(&ula_d));
            prop_assert!(private_v6(&link_local));
            prop_assert!(!private_v6(&global));
        }
    }
}
