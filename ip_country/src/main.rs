// Copyright (c) 2024, MASQ (https://masq.ai) and/or its affiliates. All rights reserved.

use ip_country_lib::ip_country::IpCountry;
use std::env;
use std::io;
use std::process;

pub fn main() {
    let args: Vec<String> = env::args().collect();
    process::exit(IpCountry::new().go(
        &args,
        &mut io::stdin(),
        &mut io::stdout(),
        &mut io::stderr(),
    ))
}
