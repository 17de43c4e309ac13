// Copyright (c) 2019, MASQ (https://masq.ai) and/or its affiliates. All rights reserved.

use std::fs;
use std::path::{Path, PathBuf};

pub const BASE_TEST_DIR: &str = "generated/test";

pub fn test_directory(module: &str, name: &str) -> PathBuf {
    PathBuf::from(format!("{}/{}/{}", BASE_TEST_DIR, module, name))
}

pub fn ensure_test_directory_exists(module: &str, name: &str) -> PathBuf {
    let dir = test_directory(module, name);
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir)
        .unwrap_or_else(|e| panic!("Couldn't create test directory {:?}: {:?}", dir, e));
    dir
}

pub fn write_test_file(dir: &Path, file_name: &str, contents: &str) -> PathBuf {
    let path = dir.join(file_name);
    fs::write(&path, contents)
        .unwrap_or_else(|e| panic!("Couldn't write test file {:?}: {:?}", path, e));
    path
}
