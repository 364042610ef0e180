use crate::index::DocId;
use std::path::{Path, PathBuf};

/// Whether source paths are kept for later verification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TrackingMode {
    #[default]
    Counting,
    Verifying,
}

/// Hands out sequential document ids starting at 0.
#[derive(Debug, Clone)]
pub enum DocumentRegistry {
    Counting { next: DocId },
    Verifying { paths: Vec<PathBuf> },
}

impl DocumentRegistry {
    pub fn new(mode: TrackingMode) -> Self {
        match mode {
            TrackingMode::Counting => Self::Counting { next: 0 },
            TrackingMode::Verifying => Self::Verifying { paths: Vec::new() },
        }
    }

    pub fn mode(&self) -> TrackingMode {
        match self {
            Self::Counting { .. } => TrackingMode::Counting,
            Self::Verifying { .. } => TrackingMode::Verifying,
        }
    }

    pub fn register(&mut self, path: &Path) -> DocId {
        match self {
            Self::Counting { next } => {
                let id = *next;
                *next += 1;
                id
            }
            Self::Verifying { paths } => {
                paths.push(path.to_path_buf());
                (paths.len() - 1) as DocId
            }
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Counting { next } => *next as usize,
            Self::Verifying { paths } => paths.len(),
        }
    }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    /// Source path of `doc_id`; always `None` in counting mode.
    pub fn path(&self, doc_id: DocId) -> Option<&Path> {
        match self {
            Self::Counting { .. } => None,
            Self::Verifying { paths } => paths.get(doc_id as usize).map(PathBuf::as_path),
        }
    }
}

impl Default for DocumentRegistry {
    fn default() -> Self { Self::new(TrackingMode::default()) }
}
