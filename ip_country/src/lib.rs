// Copyright (c) 2024, MASQ (https://masq.ai) and/or its affiliates. All rights reserved.

pub mod address_codec;
pub mod configuration;
pub mod country_block;
pub mod country_finder;
pub mod ip_country;
pub mod ip_country_csv;
pub mod logger;
pub mod range_table;
pub mod subnet_mask;
#[cfg(test)]
mod test_utils;
