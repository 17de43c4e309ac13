// Copyright (c) 2024, MASQ (https://masq.ai) and/or its affiliates. All rights reserved.

use crate::address_codec;
use crate::logger::Logger;
use crate::range_table::RangeTable;
use crate::subnet_mask::SubnetMask;
use crate::trace;
use std::collections::BTreeSet;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ScanPolicy {
    /// Stop at the first block that misses after at least one hit. Relies on all blocks of a
    /// bucket being adjacent in the sorted table; under-reports when they are not.
    #[default]
    StopAfterFirstMatchBlock,
    /// Test every block.
    FullScan,
}

pub struct CountryFinder<'a> {
    table: &'a RangeTable,
    subnet_mask: SubnetMask,
    scan_policy: ScanPolicy,
    logger: Logger,
}

impl<'a> CountryFinder<'a> {
    pub fn new(table: &'a RangeTable, subnet_mask: SubnetMask, scan_policy: ScanPolicy) -> Self {
        Self {
            table,
            subnet_mask,
            scan_policy,
            logger: Logger::new("CountryFinder"),
        }
    }

    /// Country codes for an address, or for its whole subnet when the address is the base of a
    /// subnet under the configured mask. Unparseable input finds nothing.
    pub fn find_country(&self, address_text: &str) -> BTreeSet<String> {
        let mut countries = BTreeSet::new();
        let address = match address_codec::encode(address_text) {
            Ok(address) => address,
            Err(e) => {
                trace!(self.logger, "{}", e);
                return countries;
            }
        };
        let offset = self.subnet_mask.offset_for(address);
        for block in self.table.blocks() {
            if block.contains_shifted(address, offset) {
                countries.insert(block.iso3166.clone());
            } else if !countries.is_empty()
                && self.scan_policy == ScanPolicy::StopAfterFirstMatchBlock
            {
                break;
            }
        }
        if countries.is_empty() {
            trace!(self.logger, "No range covers {}", address_text);
        }
        countries
    }
}
