// Copyright (c) 2024, MASQ (https://masq.ai) and/or its affiliates. All rights reserved.

use crate::address_codec;
use crate::address_codec::AddressCodecError;
use std::fmt::{Display, Formatter};

/// One database row, already cut down to the three fields the range table cares about.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct RangeRecord {
    pub start_text: String,
    pub end_text: String,
    pub country_code: String,
}

impl RangeRecord {
    pub fn new(start_text: &str, end_text: &str, country_code: &str) -> Self {
        Self {
            start_text: start_text.to_string(),
            end_text: end_text.to_string(),
            country_code: country_code.to_string(),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CountryBlock {
    pub start: u32,
    pub end: u32,
    pub iso3166: String,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum InvalidBlock {
    Address(AddressCodecError),
    Reversed { start: u32, end: u32 },
}

impl Display for InvalidBlock {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidBlock::Address(e) => write!(f, "{}", e),
            InvalidBlock::Reversed { start, end } => write!(
                f,
                "Ending address {} is less than starting address {}",
                address_codec::decode(*end),
                address_codec::decode(*start)
            ),
        }
    }
}

impl From<AddressCodecError> for InvalidBlock {
    fn from(e: AddressCodecError) -> Self {
        InvalidBlock::Address(e)
    }
}

impl TryFrom<&RangeRecord> for CountryBlock {
    type Error = InvalidBlock;

    fn try_from(record: &RangeRecord) -> Result<Self, Self::Error> {
        let start = address_codec::encode(&record.start_text)?;
        let end = address_codec::encode(&record.end_text)?;
        Self::new(start, end, &record.country_code)
    }
}

impl CountryBlock {
    pub fn new(start: u32, end: u32, iso3166: &str) -> Result<Self, InvalidBlock> {
        // A reversed row is rejected even though both of its addresses parse, so it never
        // reaches a RangeTable or its size.
        if end < start {
            return Err(InvalidBlock::Reversed { start, end });
        }
        Ok(Self {
            start,
            end,
            iso3166: iso3166.to_string(),
        })
    }

    pub fn contains_shifted(&self, address: u32, offset: u32) -> bool {
        let shifted = address >> offset;
        (self.start >> offset) <= shifted && shifted <= (self.end >> offset)
    }

    /// True when `next` begins exactly one address after this block ends.
    pub fn is_followed_by(&self, next: &CountryBlock) -> bool {
        self.end.checked_add(1) == Some(next.start)
    }
}

impl Display for CountryBlock {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}-{} {}",
            address_codec::decode(self.start),
            address_codec::decode(self.end),
            self.iso3166
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_from_works_for_well_formed_record() {
        let record = RangeRecord::new("1.0.0.0", "1.0.0.255", "AU");

        let result = CountryBlock::try_from(&record);

        assert_eq!(
            result,
            Ok(CountryBlock {
                start: 0x01000000,
                end: 0x010000FF,
                iso3166: "AU".to_string(),
            })
        );
    }

    #[test]
    fn try_from_accepts_single_address_block() {
        let record = RangeRecord::new("255.255.255.255", "255.255.255.255", "ZZ");

        let result = CountryBlock::try_from(&record).unwrap();

        assert_eq!(result.start, u32::MAX);
        assert_eq!(result.end, u32::MAX);
    }

    #[test]
    fn try_from_fails_for_bad_start_address() {
        let record = RangeRecord::new("BOOGA", "1.0.0.255", "AU");

        let result = CountryBlock::try_from(&record);

        assert_eq!(
            result,
            Err(InvalidBlock::Address(AddressCodecError::InvalidAddress(
                "BOOGA".to_string()
            )))
        );
    }

    #[test]
    fn try_from_fails_for_ipv6_end_address() {
        let record = RangeRecord::new("1.0.0.0", "1:0:0:255:0:0:0:0", "AU");

        let result = CountryBlock::try_from(&record);

        assert_eq!(
            result,
            Err(InvalidBlock::Address(AddressCodecError::InvalidAddress(
                "1:0:0:255:0:0:0:0".to_string()
            )))
        );
    }

    #[test]
    fn try_from_fails_for_reversed_addresses() {
        let record = RangeRecord::new("1.0.63.255", "1.0.32.0", "CN");

        let result = CountryBlock::try_from(&record);

        assert_eq!(
            result.err().unwrap().to_string(),
            "Ending address 1.0.32.0 is less than starting address 1.0.63.255".to_string()
        );
    }

    #[test]
    fn contains_shifted_compares_buckets() {
        let subject = CountryBlock::new(0x00000280, 0x000002FF, "US").unwrap();

        assert_eq!(subject.contains_shifted(0x000002C8, 0), true);
        assert_eq!(subject.contains_shifted(0x00000200, 0), false);
        assert_eq!(subject.contains_shifted(0x00000200, 8), true);
        assert_eq!(subject.contains_shifted(0x00000300, 8), false);
    }

    #[test]
    fn is_followed_by_does_not_overflow_at_the_top_of_the_address_space() {
        let top = CountryBlock::new(u32::MAX, u32::MAX, "ZZ").unwrap();
        let bottom = CountryBlock::new(0, 9, "ZZ").unwrap();
        let next = CountryBlock::new(10, 19, "AU").unwrap();

        assert_eq!(top.is_followed_by(&bottom), false);
        assert_eq!(bottom.is_followed_by(&next), true);
        assert_eq!(next.is_followed_by(&bottom), false);
    }

    #[test]
    fn display_shows_range_and_country() {
        let subject = CountryBlock::new(0x01000000, 0x010000FF, "AU").unwrap();

        assert_eq!(subject.to_string(), "1.0.0.0-1.0.0.255 AU".to_string());
    }
}
