//! Upload staging boundary
//!
//! The core's only obligation toward the upload pipeline is to name the
//! source paths that should be staged into a destination directory. The
//! actual copy or link creation happens outside the scanner.

use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::scan::Record;

/// The ordered list of files to stage into one destination
#[derive(Debug, Clone, Serialize)]
pub struct StagingPlan {
    pub destination: PathBuf,
    pub sources: Vec<PathBuf>,
}

impl StagingPlan {
    /// Build a plan from a filtered record subset, preserving record order
    /// and dropping duplicate paths
    pub fn for_records<'a, I>(records: I, destination: &Path) -> Self
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let mut seen = HashSet::new();
        let sources = records
            .into_iter()
            .map(|record| record.path.clone())
            .filter(|path| seen.insert(path.clone()))
            .collect();

        Self {
            destination: destination.to_path_buf(),
            sources,
        }
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}
