// Copyright (c) 2024, MASQ (https://masq.ai) and/or its affiliates. All rights reserved.

pub mod byte_array_reader_writer;
pub mod utils;
