use crate::err::{NhdError, Result};
use crate::nhd_record::NhdRecord;

use log::{debug, trace};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Characters that are dropped from generated file names.
pub const FORBIDDEN_FILE_NAME_CHARS: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Remove every forbidden character (no replacement).
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .filter(|c| !FORBIDDEN_FILE_NAME_CHARS.contains(c))
        .collect()
}

/// Where a single file is going to be moved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamePlan {
    pub target_directory: PathBuf,
    /// Sanitized and collision free, includes the `_N` suffix when one was needed.
    pub base_name: String,
    /// Source extension with its leading dot, or empty.
    pub extension: OsString,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameOutcome {
    pub source: PathBuf,
    pub target: PathBuf,
    /// `false` for dry runs.
    pub applied: bool,
}

impl RenameOutcome {
    pub fn source_file_name(&self) -> String {
        display_file_name(&self.source)
    }

    pub fn target_file_name(&self) -> String {
        display_file_name(&self.target)
    }
}

fn display_file_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}

/// `.ext` for `name.ext`, empty when there is no extension. Dot files have no extension.
fn dotted_extension(path: &Path) -> OsString {
    match path.extension() {
        Some(ext) => {
            let mut dotted = OsString::from(".");
            dotted.push(ext);
            dotted
        }
        None => OsString::new(),
    }
}

fn is_occupied(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

impl RenamePlan {
    /// Build the plan for `source`, probing the directory for a free name.
    ///
    /// The probe runs against the live filesystem, so files planned earlier in the same batch
    /// are seen once they have been renamed. `source` itself occupies its own name.
    pub fn new(source: &Path, record: &NhdRecord) -> RenamePlan {
        let target_directory = source
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let sanitized = sanitize_file_name(&record.candidate_name());

        let mut plan = RenamePlan {
            target_directory,
            base_name: sanitized.clone(),
            extension: dotted_extension(source),
        };

        let mut counter: u64 = 1;
        while is_occupied(&plan.target_path()) {
            trace!("`{}` is taken", plan.target_path().display());
            plan.base_name = format!("{sanitized}_{counter}");
            counter += 1;
        }

        debug!(
            "Planned `{}` -> `{}`",
            source.display(),
            plan.target_path().display()
        );
        plan
    }

    pub fn file_name(&self) -> OsString {
        let mut name = OsString::from(&self.base_name);
        name.push(&self.extension);
        name
    }

    pub fn target_path(&self) -> PathBuf {
        self.target_directory.join(self.file_name())
    }

    /// Move `source` to the planned target, or only report it when `dry_run` is set.
    pub fn apply(self, source: &Path, dry_run: bool) -> Result<RenameOutcome> {
        let target = self.target_path();

        if !dry_run {
            fs::rename(source, &target).map_err(|e| NhdError::FailedToRename {
                from: source.to_path_buf(),
                to: target.clone(),
                source: e,
            })?;
        }

        Ok(RenameOutcome {
            source: source.to_path_buf(),
            target,
            applied: !dry_run,
        })
    }
}
