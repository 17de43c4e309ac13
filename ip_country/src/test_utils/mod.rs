// Copyright (c) 2024, MASQ (https://masq.ai) and/or its affiliates. All rights reserved.

pub mod logging;

use crate::country_block::RangeRecord;

pub fn make_records(rows: &[(&str, &str, &str)]) -> Vec<RangeRecord> {
    rows.iter()
        .map(|(start, end, country)| RangeRecord::new(start, end, country))
        .collect()
}

// Twenty rows with gaps between several of them, deliberately out of order.
pub static EXACT_TEST_DATA: &str = "0.0.0.0,0.255.255.255,ZZ
1.0.0.0,1.0.0.255,AU
1.0.1.0,1.0.3.255,CN
1.0.4.0,1.0.7.255,AU
1.0.8.0,1.0.15.255,CN
1.0.16.0,1.0.31.255,JP
1.0.32.0,1.0.63.255,CN
1.0.64.0,1.0.127.255,JP
1.0.128.0,1.0.255.255,TH
1.1.0.0,1.1.0.255,CN
10.0.0.0,10.255.255.255,ZZ
2.0.0.0,2.15.255.255,FR
5.0.0.0,5.255.255.255,DE
87.242.0.0,87.242.127.255,RU
87.242.128.0,87.242.255.255,UA
127.0.0.0,127.255.255.255,ZZ
192.168.0.0,192.168.255.255,ZZ
200.0.0.0,200.255.255.255,BR
223.255.255.0,223.255.255.255,AU
255.255.255.255,255.255.255.255,ZZ
";

// Covers the whole address space; several ranges share /24 buckets.
pub static SUBNET_TEST_DATA: &str = "0.0.0.0,0.0.0.63,ZZ
0.0.0.64,0.0.0.127,RU
0.0.0.128,0.0.0.191,UA
0.0.0.192,0.0.1.255,KZ
0.0.2.0,0.0.2.127,GB
0.0.2.128,0.0.2.255,US
0.0.3.0,255.255.255.255,FR
";
