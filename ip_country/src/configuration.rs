// Copyright (c) 2024, MASQ (https://masq.ai) and/or its affiliates. All rights reserved.

use crate::country_finder::ScanPolicy;
use crate::ip_country_csv::{
    FieldLayout, DEFAULT_COUNTRY_INDEX, DEFAULT_END_INDEX, DEFAULT_START_INDEX,
};
use crate::subnet_mask::{SubnetMask, SubnetMaskOutOfRange, EXACT_MATCH_MASK};
use clap::{crate_description, crate_version, App, AppSettings, Arg, ArgMatches, ErrorKind};
use lazy_static::lazy_static;
use log::LevelFilter;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_DATABASE: &str = "data.csv";
pub const DEFAULT_LOG_LEVEL: &str = "warn";

const DATABASE_HELP: &str = "CSV file with the IP-range-to-country data";
const START_INDEX_HELP: &str = "Zero-based index of the range start address in each CSV row";
const END_INDEX_HELP: &str = "Zero-based index of the range end address in each CSV row";
const COUNTRY_INDEX_HELP: &str = "Zero-based index of the ISO 3166 country code in each CSV row";
const MASK_HELP: &str = "Subnet mask between 1 and 32. A query address that is the base of a \
     subnet of this size finds every country in the subnet.";
const SIZE_HELP: &str = "Print the number of ranges in the database and exit";
const CHECK_HELP: &str =
    "Print whether the database ranges follow one another without gaps and exit";
const FULL_SCAN_HELP: &str = "Test every range instead of stopping after the first block of \
     matches; slower, but finds matches that aren't adjacent in the sorted database";
const LOG_LEVEL_HELP: &str = "Diagnostics written to stderr";
const ADDRESS_HELP: &str =
    "IPv4 addresses to look up. If none are given, addresses are read from stdin, one per line.";

lazy_static! {
    static ref DEFAULT_START_INDEX_STRING: String = DEFAULT_START_INDEX.to_string();
    static ref DEFAULT_END_INDEX_STRING: String = DEFAULT_END_INDEX.to_string();
    static ref DEFAULT_COUNTRY_INDEX_STRING: String = DEFAULT_COUNTRY_INDEX.to_string();
    static ref DEFAULT_MASK_STRING: String = EXACT_MATCH_MASK.to_string();
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigurationError {
    Help(String),
    Usage(String),
    SubnetMask(SubnetMaskOutOfRange),
}

impl Display for ConfigurationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigurationError::Help(text) => write!(f, "{}", text),
            ConfigurationError::Usage(text) => write!(f, "{}", text),
            ConfigurationError::SubnetMask(e) => write!(f, "{}", e),
        }
    }
}

impl From<SubnetMaskOutOfRange> for ConfigurationError {
    fn from(e: SubnetMaskOutOfRange) -> Self {
        ConfigurationError::SubnetMask(e)
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct IpCountryConfig {
    pub database_path: PathBuf,
    pub field_layout: FieldLayout,
    pub subnet_mask: SubnetMask,
    pub scan_policy: ScanPolicy,
    pub report_size: bool,
    pub report_completeness: bool,
    pub log_level: LevelFilter,
    pub addresses: Vec<String>,
}

impl IpCountryConfig {
    pub fn from_args(args: &[String]) -> Result<IpCountryConfig, ConfigurationError> {
        let matches = app().get_matches_from_safe(args).map_err(|e| match e.kind {
            ErrorKind::HelpDisplayed | ErrorKind::VersionDisplayed => {
                ConfigurationError::Help(e.message)
            }
            _ => ConfigurationError::Usage(e.message),
        })?;
        let subnet_mask = SubnetMask::try_from(Self::value::<i64>(&matches, "mask")?)?;
        Ok(IpCountryConfig {
            database_path: PathBuf::from(Self::value::<String>(&matches, "geodb")?),
            field_layout: FieldLayout {
                start_index: Self::value(&matches, "ipstart")?,
                end_index: Self::value(&matches, "ipend")?,
                country_index: Self::value(&matches, "country")?,
            },
            subnet_mask,
            scan_policy: if matches.is_present("full-scan") {
                ScanPolicy::FullScan
            } else {
                ScanPolicy::StopAfterFirstMatchBlock
            },
            report_size: matches.is_present("size"),
            report_completeness: matches.is_present("check"),
            log_level: Self::value(&matches, "log-level")?,
            addresses: matches
                .values_of("address")
                .map(|values| values.map(|value| value.to_string()).collect())
                .unwrap_or_default(),
        })
    }

    // Every option has a default and a validator, so a failure here means the schema and this
    // function disagree.
    fn value<T: FromStr>(matches: &ArgMatches, name: &str) -> Result<T, ConfigurationError> {
        let text = matches
            .value_of(name)
            .ok_or_else(|| ConfigurationError::Usage(format!("Missing value for --{}", name)))?;
        T::from_str(text).map_err(|_| {
            ConfigurationError::Usage(format!("Invalid value for --{}: '{}'", name, text))
        })
    }
}

pub fn app() -> App<'static, 'static> {
    App::new("ip_country")
        .global_settings(if cfg!(test) {
            &[AppSettings::ColorNever]
        } else {
            &[AppSettings::ColorAuto, AppSettings::ColoredHelp]
        })
        .version(crate_version!())
        .author("MASQ")
        .about(crate_description!())
        .arg(
            Arg::with_name("geodb")
                .long("geodb")
                .value_name("FILE")
                .takes_value(true)
                .empty_values(false)
                .default_value(DEFAULT_DATABASE)
                .help(DATABASE_HELP),
        )
        .arg(index_arg("ipstart", &DEFAULT_START_INDEX_STRING, START_INDEX_HELP))
        .arg(index_arg("ipend", &DEFAULT_END_INDEX_STRING, END_INDEX_HELP))
        .arg(index_arg("country", &DEFAULT_COUNTRY_INDEX_STRING, COUNTRY_INDEX_HELP))
        .arg(
            Arg::with_name("mask")
                .long("mask")
                .value_name("BITS")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value(&DEFAULT_MASK_STRING)
                .validator(Validators::validate_integer)
                .help(MASK_HELP),
        )
        .arg(
            Arg::with_name("size")
                .long("size")
                .takes_value(false)
                .help(SIZE_HELP),
        )
        .arg(
            Arg::with_name("check")
                .long("check")
                .takes_value(false)
                .help(CHECK_HELP),
        )
        .arg(
            Arg::with_name("full-scan")
                .long("full-scan")
                .aliases(&["full_scan"])
                .takes_value(false)
                .help(FULL_SCAN_HELP),
        )
        .arg(
            Arg::with_name("log-level")
                .long("log-level")
                .aliases(&["log_level"])
                .value_name("FILTER")
                .takes_value(true)
                .possible_values(&["error", "warn", "info", "debug", "trace", "off"])
                .default_value(DEFAULT_LOG_LEVEL)
                .case_insensitive(true)
                .help(LOG_LEVEL_HELP),
        )
        .arg(
            Arg::with_name("address")
                .value_name("ADDRESS")
                .multiple(true)
                .required(false)
                .help(ADDRESS_HELP),
        )
}

fn index_arg(name: &'static str, default: &'static str, help: &'static str) -> Arg<'static, 'static> {
    Arg::with_name(name)
        .long(name)
        .value_name("INDEX")
        .takes_value(true)
        .default_value(default)
        .validator(Validators::validate_index)
        .help(help)
}

struct Validators {}

impl Validators {
    fn validate_index(index: String) -> Result<(), String> {
        match index.parse::<usize>() {
            Ok(_) => Ok(()),
            Err(_) => Err(index),
        }
    }

    fn validate_integer(value: String) -> Result<(), String> {
        match value.parse::<i64>() {
            Ok(_) => Ok(()),
            Err(_) => Err(value),
        }
    }
}
