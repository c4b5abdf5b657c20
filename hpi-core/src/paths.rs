//! Project directory layout.
//!
//! Everything the pipelines touch lives under one project root:
//! raw spreadsheets in `data/raw/`, cleaned CSVs in `output/`.

use std::path::{Path, PathBuf};

/// Raw input directory, relative to the project root.
pub const RAW_DIR: [&str; 2] = ["data", "raw"];

/// Output directory, relative to the project root.
pub const OUTPUT_DIR: &str = "output";

/// Resolved project directories. Pure path arithmetic: nothing here is
/// created or checked for existence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    pub root: PathBuf,
    pub raw_dir: PathBuf,
    pub out_dir: PathBuf,
}

impl ProjectPaths {
    /// Root the layout at `root` directly.
    pub fn from_root(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let raw_dir = RAW_DIR.iter().fold(root.clone(), |p, part| p.join(part));
        let out_dir = root.join(OUTPUT_DIR);
        Self {
            root,
            raw_dir,
            out_dir,
        }
    }

    /// Root the layout `levels_up` directories above `anchor`.
    ///
    /// `anchor` is typically the location of the running program. Climbing
    /// past the filesystem root stops at the topmost ancestor.
    pub fn from_anchor(anchor: &Path, levels_up: usize) -> Self {
        let root = anchor
            .ancestors()
            .nth(levels_up)
            .or_else(|| anchor.ancestors().last())
            .unwrap_or(anchor);
        Self::from_root(root)
    }
}
