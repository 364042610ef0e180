pub mod backend;
pub mod database;
pub mod error;
pub mod index;
pub mod registry;
pub mod stopwords;
pub mod timing;
pub mod tokenizer;
pub mod verify;

pub use backend::{BTreeBackend, HashBackend, TrieBackend};
pub use database::{limit_from_signed, Config, Database, DatabaseInfo, QueryOutcome};
pub use error::{Error, Result};
pub use index::{DocId, IndexBackend, Posting, PostingList};
pub use registry::{DocumentRegistry, TrackingMode};
pub use stopwords::StopWords;
pub use timing::{BenchmarkLog, TimingSink};
pub use tokenizer::Normalizer;
pub use verify::Verifier;
