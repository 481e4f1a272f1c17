//! Typed identifiers
//!
//! Every on-chain handle gets its own newtype so a `PostId` can never be
//! passed where a `CommentId` is expected. The wire representation used by
//! the off-chain service and the chain indexer is a hex string, optionally
//! prefixed with `0x`; parsing happens once, at the edge.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::error::IdParseError;

/// Parse a hex wire string (`"0x1a"`, `"1A"`, `"000f"`) into a `u64`
pub fn parse_hex_u64(input: &str) -> Result<u64, IdParseError> {
    let trimmed = input.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if digits.is_empty() {
        return Err(IdParseError::Empty);
    }

    // from_str_radix accepts a leading '+', the wire format does not
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(IdParseError::InvalidHex(input.to_string()));
    }

    u64::from_str_radix(digits, 16).map_err(|_| IdParseError::Overflow(input.to_string()))
}

macro_rules! chain_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(u64);

        impl $name {
            pub const fn new(value: u64) -> Self {
                Self(value)
            }

            /// Numeric value of the id
            pub const fn get(self) -> u64 {
                self.0
            }

            /// Parse from the hex wire representation
            pub fn from_hex(input: &str) -> Result<Self, IdParseError> {
                parse_hex_u64(input).map(Self)
            }

            /// Hex wire representation (`0x`-prefixed, lowercase)
            pub fn to_hex(self) -> String {
                format!("0x{:x}", self.0)
            }

            /// Kind label used in log lines and error messages
            pub const fn kind() -> &'static str {
                $label
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl FromStr for $name {
            type Err = IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_hex(s)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_hex())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                deserializer.deserialize_any(IdVisitor).map(Self)
            }
        }
    };
}

/// Accepts either the hex string wire form or a bare JSON integer
struct IdVisitor;

impl<'de> Visitor<'de> for IdVisitor {
    type Value = u64;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a hex-encoded id string or an unsigned integer")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<u64, E> {
        Ok(v)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<u64, E> {
        u64::try_from(v).map_err(|_| E::custom(format!("negative id: {}", v)))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<u64, E> {
        parse_hex_u64(v).map_err(E::custom)
    }
}

chain_id!(
    /// Identifier of a post
    PostId,
    "post"
);
chain_id!(
    /// Identifier of a comment
    CommentId,
    "comment"
);
chain_id!(
    /// Identifier of a blog
    BlogId,
    "blog"
);
chain_id!(
    /// Identifier of a reaction (upvote or downvote)
    ReactionId,
    "reaction"
);

/// An account address (SS58 string as produced by the chain)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Shortened form for display, e.g. `5Grwva...utQY`
    pub fn short(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        if chars.len() <= 12 {
            return self.0.clone();
        }
        let head: String = chars[..6].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AccountId {
    fn from(address: &str) -> Self {
        Self::new(address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_variants() {
        assert_eq!(parse_hex_u64("0x1a").unwrap(), 26);
        assert_eq!(parse_hex_u64("1A").unwrap(), 26);
        assert_eq!(parse_hex_u64("0X00000000000000000000ff").unwrap(), 255);
        assert_eq!(PostId::from_hex("0x0").unwrap(), PostId::new(0));
    }

    #[test]
    fn test_parse_hex_rejects_bad_input() {
        assert!(matches!(parse_hex_u64(""), Err(IdParseError::Empty)));
        assert!(matches!(parse_hex_u64("0x"), Err(IdParseError::Empty)));
        assert!(matches!(parse_hex_u64("+1"), Err(IdParseError::InvalidHex(_))));
        assert!(matches!(parse_hex_u64("xyz"), Err(IdParseError::InvalidHex(_))));
        assert!(matches!(
            parse_hex_u64("0x1ffffffffffffffff"),
            Err(IdParseError::Overflow(_))
        ));
    }

    #[test]
    fn test_equality_by_numeric_value() {
        let a: CommentId = "0x0a".parse().unwrap();
        let b: CommentId = "A".parse().unwrap();
        assert_eq!(a, b);
        assert!(CommentId::new(2) < CommentId::new(10));
    }

    #[test]
    fn test_serde_wire_form() {
        let id = BlogId::new(31);
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"0x1f\"");
        let parsed: BlogId = serde_json::from_str("\"0x1f\"").unwrap();
        assert_eq!(parsed, id);
        let numeric: BlogId = serde_json::from_str("31").unwrap();
        assert_eq!(numeric, id);
        assert!(serde_json::from_str::<BlogId>("\"nope\"").is_err());
    }

    #[test]
    fn test_account_short() {
        let account = AccountId::new("5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY");
        assert_eq!(account.short(), "5Grwva...utQY");
        assert_eq!(AccountId::new("alice").short(), "alice");
    }
}
