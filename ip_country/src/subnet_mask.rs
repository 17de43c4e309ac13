// Copyright (c) 2024, MASQ (https://masq.ai) and/or its affiliates. All rights reserved.

use ipnetwork::Ipv4Network;
use std::fmt::{Display, Formatter};
use std::net::Ipv4Addr;

pub const EXACT_MATCH_MASK: u8 = 32;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SubnetMaskOutOfRange(pub i64);

impl Display for SubnetMaskOutOfRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Subnet mask shall be within 1 - 32 range (got {})", self.0)
    }
}

/// Prefix length between 1 and 32. Addresses that sit exactly on a boundary of this prefix are
/// looked up by their whole subnet; 32 turns that off.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SubnetMask {
    bits: u8,
}

impl Default for SubnetMask {
    fn default() -> Self {
        SubnetMask {
            bits: EXACT_MATCH_MASK,
        }
    }
}

impl TryFrom<i64> for SubnetMask {
    type Error = SubnetMaskOutOfRange;

    fn try_from(bits: i64) -> Result<Self, Self::Error> {
        match u8::try_from(bits) {
            Ok(bits) if (1..=EXACT_MATCH_MASK).contains(&bits) => Ok(SubnetMask { bits }),
            _ => Err(SubnetMaskOutOfRange(bits)),
        }
    }
}

impl SubnetMask {
    pub fn wildcard_bits(&self) -> u32 {
        u32::from(EXACT_MATCH_MASK - self.bits)
    }

    pub fn is_exact(&self) -> bool {
        self.bits == EXACT_MATCH_MASK
    }

    pub fn is_subnet_base(&self, address: u32) -> bool {
        let address = Ipv4Addr::from(address);
        match Ipv4Network::new(address, self.bits) {
            Ok(network) => network.network() == address,
            Err(_) => false,
        }
    }

    /// Number of low-order bits the lookup ignores for this query address.
    pub fn offset_for(&self, address: u32) -> u32 {
        if !self.is_exact() && self.is_subnet_base(address) {
            self.wildcard_bits()
        } else {
            0
        }
    }
}
