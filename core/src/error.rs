use crate::index::DocId;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("cannot read file: {}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("document paths are not retained in counting mode")]
    NotRetained,

    #[error("no document registered with id {doc_id}")]
    MissingDocument { doc_id: DocId },

    #[error("word count mismatch for {term:?} in {}: stored {stored}, found {actual}", path.display())]
    CountMismatch {
        term: String,
        doc_id: DocId,
        path: PathBuf,
        stored: u32,
        actual: u32,
    },
}
