// Copyright (c) 2024, MASQ (https://masq.ai) and/or its affiliates. All rights reserved.

use crate::address_codec;
use crate::country_block::{CountryBlock, RangeRecord};
use crate::logger::Logger;
use crate::{debug, info};
use itertools::Itertools;
use std::collections::HashMap;

/// Country blocks sorted by starting address. Built once, then only read.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct RangeTable {
    blocks: Vec<CountryBlock>,
    skipped: usize,
}

impl RangeTable {
    /// Records whose addresses don't parse, or whose end precedes their start, are dropped.
    /// A record repeating both the start and the country of an earlier one replaces it; a
    /// record repeating only the start is kept alongside.
    pub fn build<I>(records: I) -> RangeTable
    where
        I: IntoIterator<Item = RangeRecord>,
    {
        let logger = Logger::new("RangeTable");
        let mut blocks: Vec<CountryBlock> = vec![];
        let mut index_by_key: HashMap<(u32, String), usize> = HashMap::new();
        let mut skipped = 0usize;
        for (idx, record) in records.into_iter().enumerate() {
            let block = match CountryBlock::try_from(&record) {
                Ok(block) => block,
                Err(e) => {
                    debug!(logger, "Skipping record {}: {}", idx + 1, e);
                    skipped += 1;
                    continue;
                }
            };
            let key = (block.start, block.iso3166.clone());
            match index_by_key.get(&key) {
                Some(&existing) => {
                    debug!(
                        logger,
                        "Record {} ({}) replaces earlier block {}",
                        idx + 1,
                        block,
                        blocks[existing]
                    );
                    blocks[existing] = block;
                }
                None => {
                    index_by_key.insert(key, blocks.len());
                    blocks.push(block);
                }
            }
        }
        blocks.sort_by_key(|block| block.start);
        info!(
            logger,
            "Built table of {} ranges; skipped {} malformed records",
            blocks.len(),
            skipped
        );
        RangeTable { blocks, skipped }
    }

    pub fn size(&self) -> usize {
        self.blocks.len()
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn blocks(&self) -> &[CountryBlock] {
        &self.blocks
    }

    /// Whether every range begins right after its predecessor ends. Says nothing about whether
    /// the first range starts at 0.0.0.0 or the last one ends at 255.255.255.255.
    pub fn is_complete(&self) -> bool {
        match self
            .blocks
            .iter()
            .tuple_windows()
            .find(|(current, next)| !current.is_followed_by(next))
        {
            None => true,
            Some((current, next)) => {
                debug!(
                    Logger::new("RangeTable"),
                    "Coverage gap between {} and {}",
                    address_codec::decode(current.end),
                    address_codec::decode(next.start)
                );
                false
            }
        }
    }
}
