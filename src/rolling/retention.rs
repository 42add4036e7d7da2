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
use std::path::PathBuf;
use std::time::SystemTime;

use crate::Error;
use crate::config::LoggerConfig;

/// How many backups are deleted after a rotation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PrunePolicy {
    /// Delete at most the single oldest backup per rotation.
    ///
    /// If the retained count is lowered while more backups exist, the surplus shrinks by one per
    /// rotation.
    #[default]
    OldestOnly,
    /// Delete the oldest backups until no more than the retained count remain.
    DownToLimit,
}

#[derive(Debug)]
pub(crate) struct Backup {
    pub(crate) path: PathBuf,
    name: String,
    created: SystemTime,
}

/// List backups of the configured log, oldest first.
///
/// A backup is a regular file in the root directory whose name starts with the log filename and
/// ends with the backup extension. The active log itself never counts. Files are ordered by
/// creation time, by modification time where the platform does not record creation, and by
/// name on ties.
pub(crate) fn list_backups(config: &LoggerConfig) -> Result<Vec<Backup>, Error> {
    let root = config.root_directory();
    let read_dir = fs::read_dir(root).map_err(|err| {
        Error::from_io_error("failed to read log dir", err).with_context("path", root)
    })?;

    let filename = config.filename();
    let extension = config.backup_extension();
    let mut backups = read_dir
        .filter_map(|entry| {
            let entry = entry.ok()?;
            let metadata = entry.metadata().ok()?;
            // the writer only creates files, not directories or symlinks
            if !metadata.is_file() {
                return None;
            }

            // if the filename is not a UTF-8 string, skip it
            let name = entry.file_name().into_string().ok()?;
            if name == filename || !name.starts_with(filename) || !name.ends_with(extension) {
                return None;
            }

            let created = metadata.created().or_else(|_| metadata.modified()).ok()?;
            Some(Backup {
                path: entry.path(),
                name,
                created,
            })
        })
        .collect::<Vec<_>>();

    backups.sort_by(|a, b| a.created.cmp(&b.created).then_with(|| a.name.cmp(&b.name)));
    Ok(backups)
}

/// Delete surplus backups according to the configured [`PrunePolicy`].
///
/// Returns how many backups were deleted.
pub(crate) fn prune(config: &LoggerConfig) -> Result<usize, Error> {
    #[cfg(test)]
    fault::check()?;

    let backups = list_backups(config)?;
    let surplus = backups.len().saturating_sub(config.retained_backups());
    let count = match config.prune_policy() {
        PrunePolicy::OldestOnly => surplus.min(1),
        PrunePolicy::DownToLimit => surplus,
    };

    for backup in backups.iter().take(count) {
        fs::remove_file(&backup.path).map_err(|err| {
            Error::from_io_error("failed to remove old log", err)
                .with_context("path", backup.path.display())
        })?;
    }

    Ok(count)
}
