#![deny(unused_must_use)]
#![forbid(unsafe_code)]

pub use nhd_record::NhdRecord;
pub use nhd_renamer::{
    NhdRenamer, RenameSettings, RunSummary, collect_nhd_files, is_nhd_file_name, rename_nhd_file,
};
pub use rename_plan::{RenameOutcome, RenamePlan, sanitize_file_name};

pub mod err;
pub mod nhd_record;
pub mod nhd_renamer;
pub mod rename_plan;

mod utils;
