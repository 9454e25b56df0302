use crate::err::{NhdError, Result};
use crate::nhd_record::NhdRecord;
use crate::rename_plan::{RenameOutcome, RenamePlan};

use log::{debug, info, warn};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const NHD_EXTENSION: &str = ".nhd";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenameSettings {
    dry_run: bool,
}

impl RenameSettings {
    pub fn new() -> Self {
        RenameSettings::default()
    }

    /// When set, renames are planned and reported but never applied.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }
}

/// Decode, plan and apply (or simulate) the rename of a single NHD file.
///
/// The file is read completely and closed before the target name is probed.
pub fn rename_nhd_file(path: impl AsRef<Path>, settings: &RenameSettings) -> Result<RenameOutcome> {
    let path = path.as_ref();

    let record = NhdRecord::from_path(path)?;
    let plan = RenamePlan::new(path, &record);
    plan.apply(path, settings.is_dry_run())
}

/// Case-insensitive `.nhd` suffix check on the final path component.
pub fn is_nhd_file_name(path: &Path) -> bool {
    path.file_name()
        .map(|name| {
            name.to_string_lossy()
                .to_ascii_lowercase()
                .ends_with(NHD_EXTENSION)
        })
        .unwrap_or(false)
}

/// Entries directly inside `dir` whose name ends in `.nhd`, sorted by name.
pub fn collect_nhd_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let read_err = |source| NhdError::FailedToReadFile {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_err)? {
        let path = entry.map_err(read_err)?.path();
        if is_nhd_file_name(&path) {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub succeeded: usize,
}

impl RunSummary {
    pub fn failed(&self) -> usize {
        self.total - self.succeeded
    }
}

/// Drives renames and writes one report line per file to `output`.
///
/// Per-file failures are reported and swallowed. Only failures to write the report escape.
pub struct NhdRenamer<W: Write> {
    settings: RenameSettings,
    output: W,
}

impl<W: Write> NhdRenamer<W> {
    pub fn new(settings: RenameSettings, output: W) -> Self {
        NhdRenamer { settings, output }
    }

    pub fn settings(&self) -> &RenameSettings {
        &self.settings
    }

    pub fn into_inner(self) -> W {
        self.output
    }

    /// Returns `true` if the file was renamed (or would be, in a dry run).
    pub fn process_file(&mut self, path: &Path) -> Result<bool> {
        match rename_nhd_file(path, &self.settings) {
            Ok(outcome) => {
                let verb = if outcome.applied {
                    "Renamed"
                } else {
                    "Would rename"
                };
                info!(
                    "{verb} `{}` -> `{}`",
                    outcome.source.display(),
                    outcome.target.display()
                );
                writeln!(
                    self.output,
                    "{verb}: {} -> {}",
                    outcome.source_file_name(),
                    outcome.target_file_name()
                )?;
                Ok(true)
            }
            Err(e) => {
                warn!("Failed to process `{}`: {:?}", path.display(), e);
                self.report_error(path, &e)?;
                Ok(false)
            }
        }
    }

    /// Process a single `.nhd` file or every `.nhd` file directly inside a directory.
    pub fn run(&mut self, path: &Path) -> Result<RunSummary> {
        if self.settings.is_dry_run() {
            writeln!(
                self.output,
                "Running in DRY RUN mode - no files will be renamed"
            )?;
        }

        if path.is_file() && is_nhd_file_name(path) {
            let succeeded = self.process_file(path)?;
            return Ok(RunSummary {
                total: 1,
                succeeded: usize::from(succeeded),
            });
        }

        if path.is_dir() {
            return self.run_directory(path);
        }

        let e = NhdError::InvalidPath {
            path: path.to_path_buf(),
        };
        warn!("{e}");
        writeln!(self.output, "{e}")?;
        Ok(RunSummary::default())
    }

    fn run_directory(&mut self, dir: &Path) -> Result<RunSummary> {
        let files = match collect_nhd_files(dir) {
            Ok(files) => files,
            Err(e) => {
                self.report_error(dir, &e)?;
                return Ok(RunSummary::default());
            }
        };
        debug!("Found {} NHD files in `{}`", files.len(), dir.display());

        if files.is_empty() {
            writeln!(self.output, "No NHD files found in {}", dir.display())?;
            return Ok(RunSummary::default());
        }

        let mut summary = RunSummary {
            total: files.len(),
            succeeded: 0,
        };
        for file in &files {
            if self.process_file(file)? {
                summary.succeeded += 1;
            }
        }

        writeln!(
            self.output,
            "Processed {} of {} NHD files",
            summary.succeeded, summary.total
        )?;
        Ok(summary)
    }

    fn report_error(&mut self, path: &Path, e: &NhdError) -> Result<()> {
        writeln!(self.output, "Error processing {}: {}", path.display(), e)?;
        Ok(())
    }
}
