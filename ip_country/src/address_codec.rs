// Copyright (c) 2024, MASQ (https://masq.ai) and/or its affiliates. All rights reserved.

use std::fmt::{Display, Formatter};
use std::net::Ipv4Addr;
use std::str::FromStr;

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum AddressCodecError {
    InvalidAddress(String),
}

impl Display for AddressCodecError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AddressCodecError::InvalidAddress(text) => {
                write!(f, "Invalid IPv4 address: '{}'", text)
            }
        }
    }
}

/// Big-endian integer form of a dotted-decimal IPv4 address. IPv6 literals, including
/// IPv4-mapped ones, are rejected.
pub fn encode(address_text: &str) -> Result<u32, AddressCodecError> {
    Ipv4Addr::from_str(address_text)
        .map(u32::from)
        .map_err(|_| AddressCodecError::InvalidAddress(address_text.to_string()))
}

pub fn decode(address: u32) -> String {
    Ipv4Addr::from(address).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_works_for_extremes_and_ordinary_addresses() {
        assert_eq!(encode("0.0.0.0"), Ok(0));
        assert_eq!(encode("255.255.255.255"), Ok(u32::MAX));
        assert_eq!(encode("1.0.0.200"), Ok(0x010000C8));
        assert_eq!(encode("87.242.127.255"), Ok((87 << 24) + (242 << 16) + (127 << 8) + 255));
    }

    #[test]
    fn encode_rejects_anything_that_is_not_an_ipv4_literal() {
        vec![
            "",
            "booga",
            "1.2.3",
            "1.2.3.4.5",
            "256.0.0.1",
            "1.2.3.-4",
            " 1.2.3.4",
            "1.2.3.4/24",
            "::1",
            "::ffff:1.2.3.4",
            "1:0:0:0:0:0:0:0",
        ]
        .into_iter()
        .for_each(|text| {
            assert_eq!(
                encode(text),
                Err(AddressCodecError::InvalidAddress(text.to_string())),
                "{}",
                text
            )
        });
    }

    #[test]
    fn decode_is_the_inverse_of_encode() {
        vec![
            "0.0.0.0",
            "0.0.2.128",
            "1.0.0.200",
            "10.15.200.17",
            "127.0.0.1",
            "223.255.255.35",
            "255.255.255.255",
        ]
        .into_iter()
        .for_each(|text| assert_eq!(decode(encode(text).unwrap()), text.to_string()));
    }

    #[test]
    fn invalid_address_error_is_displayed_with_the_offending_text() {
        let result = AddressCodecError::InvalidAddress("BOOGA".to_string()).to_string();

        assert_eq!(result, "Invalid IPv4 address: 'BOOGA'".to_string());
    }
}
