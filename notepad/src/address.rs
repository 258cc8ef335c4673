//! Identities of callers.
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;
use thiserror::Error;

/// Width of an [`Address`] in bytes.
pub const ADDRESS_LEN: usize = 20;

/// An opaque, fixed-width identity.
///
/// Every caller of a [`crate::NoteStore`] is identified by an [`Address`].
/// The all-zero address ([`Address::ZERO`]) is a valid value; it is never
/// treated as an error, it simply does not belong to anybody.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Address {
    bytes: [u8; ADDRESS_LEN],
}

#[derive(Error, Debug, PartialEq)]
pub enum AddressParseError {
    #[error("address must be {} hex digits, got {0}", ADDRESS_LEN * 2)]
    WrongLength(usize),
    #[error("address is not valid hex")]
    NotHex(#[from] hex::FromHexError),
}

impl Address {
    pub const ZERO: Address = Address {
        bytes: [0; ADDRESS_LEN],
    };

    pub const fn new(bytes: [u8; ADDRESS_LEN]) -> Self {
        Address { bytes }
    }

    pub fn is_zero(&self) -> bool {
        self == &Address::ZERO
    }
}

impl From<[u8; ADDRESS_LEN]> for Address {
    fn from(bytes: [u8; ADDRESS_LEN]) -> Address {
        Address::new(bytes)
    }
}

impl FromStr for Address {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        if digits.len() != ADDRESS_LEN * 2 {
            return Err(AddressParseError::WrongLength(digits.len()));
        }
        let mut bytes = [0u8; ADDRESS_LEN];
        hex::decode_to_slice(digits, &mut bytes)?;
        Ok(Address { bytes })
    }
}

impl TryFrom<String> for Address {
    type Error = AddressParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Address> for String {
    fn from(address: Address) -> String {
        address.to_string()
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.bytes))
    }
}
