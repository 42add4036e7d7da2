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

use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use rotolog::LogEvent;
use rotolog::LogLevel;
use rotolog::Logger;
use rotolog::PrunePolicy;
use tempfile::TempDir;

fn message_only_logger(dir: &Path, size_limit: i64, retained: usize) -> Logger {
    Logger::builder("test.log")
        .root_directory(dir)
        .line_format("%Message%")
        .size_limit(size_limit)
        .retained_backups(retained)
        .build()
        .unwrap()
}

fn read(path: impl AsRef<Path>) -> String {
    fs::read_to_string(path).unwrap()
}

fn count_backups(dir: &Path) -> usize {
    fs::read_dir(dir)
        .unwrap()
        .filter_map(|entry| {
            let filename = entry.ok()?.file_name().into_string().ok()?;
            filename.ends_with(".bak").then_some(filename)
        })
        .count()
}

#[test]
fn test_one_rotation_after_the_limit_is_exceeded() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let logger = message_only_logger(temp_dir.path(), 100, 1);

    // 29 characters plus the newline: 30 bytes per event
    let messages = (0..5).map(|i| format!("event {i} {}", "z".repeat(21))).collect::<Vec<_>>();
    for message in messages.iter() {
        assert_eq!(message.len() + 1, 30);
        logger.info(message);
    }

    let backups = logger.backups().unwrap();
    assert_eq!(backups.len(), 1);
    assert_eq!(
        read(&backups[0]),
        format!(
            "File Created\n{}\n{}\n{}\n",
            messages[0], messages[1], messages[2]
        )
    );
    assert_eq!(
        read(logger.active_path()),
        format!("File Created\n{}\n{}\n", messages[3], messages[4])
    );
}

#[test]
fn test_backup_count_settles_at_the_retained_count() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let retained = 3;
    let logger = message_only_logger(temp_dir.path(), 50, retained);

    let mut previous: Vec<PathBuf> = vec![];
    for i in 0..40 {
        logger.info(&format!("Log entry {i}: {}", "A".repeat(30)));
        let backups = logger.backups().unwrap();
        assert!(backups.len() <= retained, "{} backups", backups.len());

        // backup names embed a zero-padded rotation token, so they sort chronologically;
        // whatever was deleted must be older than everything that survived
        for deleted in previous.iter().filter(|b| !backups.contains(b)) {
            assert!(backups.iter().all(|kept| kept > deleted));
        }
        previous = backups;
        // keep creation times of consecutive files apart on coarse filesystems
        thread::sleep(Duration::from_millis(5));
    }
    assert_eq!(count_backups(temp_dir.path()), retained);
}

#[test]
fn test_lowering_retention_prunes_per_policy() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let logger = message_only_logger(temp_dir.path(), 0, 4);

    // every write after the first rotates
    for i in 0..5 {
        logger.info(&format!("line {i}"));
        thread::sleep(Duration::from_millis(5));
    }
    assert_eq!(logger.backups().unwrap().len(), 4);

    logger.set_retained_backups(1);
    logger.info("line 5");
    thread::sleep(Duration::from_millis(5));
    // one rotation adds a backup and deletes only the oldest
    assert_eq!(logger.backups().unwrap().len(), 4);

    logger.set_prune_policy(PrunePolicy::DownToLimit);
    logger.info("line 6");
    let backups = logger.backups().unwrap();
    assert_eq!(backups.len(), 1);
    assert_eq!(read(&backups[0]), "File Created\nline 5\n");
    assert_eq!(read(logger.active_path()), "File Created\nline 6\n");
}

#[test]
fn test_overwrite_leaves_only_the_new_event() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let logger = message_only_logger(temp_dir.path(), 1024, 1);

    logger.info("first");
    logger.info("second");
    logger.write(LogEvent::new(LogLevel::Info, "only").with_overwrite(true));
    assert_eq!(read(logger.active_path()), "File Created\nonly\n");

    // overwriting with a filtered event still recreates the file
    logger.set_level(LogLevel::Error);
    logger.write(LogEvent::new(LogLevel::Info, "filtered").with_overwrite(true));
    assert_eq!(read(logger.active_path()), "File Created\n");
}

#[test]
fn test_filtered_events_still_rotate() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let logger = message_only_logger(temp_dir.path(), 10, 1);
    logger.set_level(LogLevel::Warning);

    logger.warning("a warning that is long enough");
    logger.debug("below the minimum level");

    assert_eq!(logger.backups().unwrap().len(), 1);
    assert_eq!(read(logger.active_path()), "File Created\n");
    let all = fs::read_dir(temp_dir.path())
        .unwrap()
        .map(|entry| read(entry.unwrap().path()))
        .collect::<String>();
    assert!(!all.contains("below the minimum level"));
}

#[test]
fn test_prefix_and_custom_extension() {
    let temp_dir = TempDir::new().expect("failed to create a temporary directory");
    let logger = Logger::builder("svc")
        .root_directory(temp_dir.path())
        .line_format("[%szLogLevel%] %Message%")
        .backup_extension("old")
        .size_limit(0)
        .build()
        .unwrap();

    logger.write(LogEvent::new(LogLevel::Exception, "boom").with_prefix("\n\n"));
    assert_eq!(
        read(logger.active_path()),
        "[Debug] File Created\n\n\n[Exception] boom\n"
    );

    logger.log_raw(9, "unnamed level");
    let backups = logger.backups().unwrap();
    assert_eq!(backups.len(), 1);
    let name = backups[0].file_name().unwrap().to_str().unwrap().to_string();
    assert!(name.starts_with("svc_") && name.ends_with(".old"), "{name}");
    assert_eq!(
        read(logger.active_path()),
        "[Debug] File Created\n[9] unnamed level\n"
    );
}
