//! Wallet address value type.

use serde::{Deserialize, Serialize};

/// A wallet address, normalized to lowercase at construction.
///
/// Every comparison in the system (the one-vote-per-address invariant, the
/// self-vote guard) is case-insensitive, so normalization happens once here
/// and plain equality is correct everywhere else.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ts_rs::TS)]
#[ts(export)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    /// Parse and normalize an address: `0x` followed by 40 hex digits.
    pub fn parse(raw: &str) -> Result<Self, AddressParseError> {
        if !raw.starts_with("0x") && !raw.starts_with("0X") {
            return Err(AddressParseError::MissingPrefix);
        }
        if raw.len() != 42 {
            return Err(AddressParseError::BadLength(raw.len()));
        }
        if let Some(bad) = raw[2..].chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(AddressParseError::BadCharacter(bad));
        }
        Ok(Self(raw.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Address {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Address {
    type Error = AddressParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Address> for String {
    fn from(addr: Address) -> Self {
        addr.0
    }
}

/// Rejection reasons for malformed addresses.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum AddressParseError {
    #[error("address must start with 0x")]
    MissingPrefix,

    #[error("address must be 42 characters, got {0}")]
    BadLength(usize),

    #[error("address contains non-hex character {0:?}")]
    BadCharacter(char),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_normalize() {
        let addr = Address::parse("0xAbCdEf0123456789aBcDeF0123456789abcdef01").expect("parse");
        assert_eq!(addr.as_str(), "0xabcdef0123456789abcdef0123456789abcdef01");
    }

    #[test]
    fn test_case_insensitive_equality() {
        let upper = Address::parse("0xABCDEF0123456789ABCDEF0123456789ABCDEF01").expect("parse");
        let lower = Address::parse("0xabcdef0123456789abcdef0123456789abcdef01").expect("parse");
        assert_eq!(upper, lower);
    }

    #[test]
    fn test_missing_prefix_rejected() {
        let result = Address::parse("abcdef0123456789abcdef0123456789abcdef0101");
        assert_eq!(result, Err(AddressParseError::MissingPrefix));
    }

    #[test]
    fn test_bad_length_rejected() {
        let result = Address::parse("0xabc");
        assert_eq!(result, Err(AddressParseError::BadLength(5)));
    }

    #[test]
    fn test_non_hex_rejected() {
        let result = Address::parse("0xzbcdef0123456789abcdef0123456789abcdef01");
        assert_eq!(result, Err(AddressParseError::BadCharacter('z')));
    }

    #[test]
    fn test_serde_round_trip() {
        let addr = Address::parse("0xAbCdEf0123456789aBcDeF0123456789abcdef01").expect("parse");
        let json = serde_json::to_string(&addr).expect("serialize");
        assert_eq!(json, "\"0xabcdef0123456789abcdef0123456789abcdef01\"");
        let back: Address = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, addr);
    }

    #[test]
    fn test_serde_rejects_malformed() {
        let result: Result<Address, _> = serde_json::from_str("\"not-an-address\"");
        assert!(result.is_err());
    }
}
