// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use rotolog::Logger;

struct Foreign;

impl log::Log for Foreign {
    fn enabled(&self, _: &log::Metadata) -> bool {
        true
    }

    fn log(&self, _: &log::Record) {}

    fn flush(&self) {}
}

#[test]
fn test_setup_fails_cleanly_when_another_logger_is_installed() {
    static FOREIGN: Foreign = Foreign;
    log::set_logger(&FOREIGN).unwrap();

    let temp_dir = tempfile::tempdir().expect("failed to create a temporary directory");
    let logger = Logger::builder("example.log")
        .root_directory(temp_dir.path())
        .build()
        .unwrap();

    let err = rotolog::bridge::try_setup_log_crate(logger).unwrap_err();
    assert_eq!(err.kind(), rotolog::ErrorKind::InvalidConfiguration);
    assert!(rotolog::bridge::default_logger().is_none());

    log::info!("handled by the foreign logger");
    assert!(!temp_dir.path().join("example.log").exists());
}
