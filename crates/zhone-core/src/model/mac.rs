// ── Hardware address ──
//
// Wireless clients are correlated across two pages by MAC address, so the
// address must be validated and canonicalised before it is used as a key.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

/// MAC address, normalized to lowercase colon-separated format (aa:bb:cc:dd:ee:ff).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MacAddress(String);

impl MacAddress {
    /// Parse a 6-octet address written with `:` or `-` separators.
    ///
    /// Anything else (wrong octet count, non-hex digits, mixed separators,
    /// surrounding whitespace) is rejected rather than repaired.
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        let invalid = || ParseError::InvalidAddress {
            field: "mac".into(),
            value: raw.into(),
        };

        let separator = if raw.contains(':') { ':' } else { '-' };
        let octets: Vec<&str> = raw.split(separator).collect();
        if octets.len() != 6 {
            return Err(invalid());
        }
        if !octets
            .iter()
            .all(|o| o.len() == 2 && o.chars().all(|c| c.is_ascii_hexdigit()))
        {
            return Err(invalid());
        }

        Ok(Self(octets.join(":").to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MacAddress {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn mac_address_normalizes_case() {
        let mac = MacAddress::parse("AA:BB:CC:DD:EE:0F").unwrap();
        assert_eq!(mac.as_str(), "aa:bb:cc:dd:ee:0f");
    }

    #[test]
    fn mac_address_normalizes_dashes() {
        let mac: MacAddress = "AA-BB-CC-DD-EE-FF".parse().unwrap();
        assert_eq!(mac.to_string(), "aa:bb:cc:dd:ee:ff");
    }

    #[test]
    fn mac_address_rejects_short() {
        assert!(MacAddress::parse("aa:bb:cc:dd:ee").is_err());
    }

    #[test]
    fn mac_address_rejects_non_hex() {
        let err = MacAddress::parse("aa:bb:cc:dd:ee:gg").unwrap_err();
        assert!(matches!(err, ParseError::InvalidAddress { .. }));
    }

    #[test]
    fn mac_address_rejects_mixed_separators() {
        assert!(MacAddress::parse("aa:bb-cc:dd:ee:ff").is_err());
    }

    #[test]
    fn mac_address_rejects_numeric_field() {
        // A shifted record puts an RSSI where the address should be.
        assert!(MacAddress::parse("-47").is_err());
    }
}
