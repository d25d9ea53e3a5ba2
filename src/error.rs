use crate::wordbank::Difficulty;
use thiserror::Error;

/// Failure to turn the word and riddle documents into a corpus.
///
/// Always fatal at startup: the game never reaches the menu with a partial corpus.
#[derive(Error, Debug)]
pub enum CorpusLoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed {document} document: {source}")]
    Json {
        document: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("category '{category}' is missing difficulty '{difficulty}'")]
    MissingDifficulty {
        category: String,
        difficulty: Difficulty,
    },

    #[error("unknown difficulty '{0}' (expected easy, medium or hard)")]
    UnknownDifficulty(String),

    #[error("'{key}' is defined twice in {category}")]
    DuplicateKey { category: String, key: String },

    #[error("entry '{entry}' in {category}/{difficulty} has no letters to guess")]
    InvalidEntry {
        category: String,
        difficulty: Difficulty,
        entry: String,
    },

    #[error("words document defines no categories")]
    NoCategories,

    #[error("'riddle' is reserved and cannot be used as a word category")]
    ReservedCategory,
}

/// Failure to pick a word for a new round.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("no word categories available")]
    NoCategories,

    #[error("unknown category '{0}'")]
    UnknownCategory(String),

    #[error("no entries for {category}/{difficulty}")]
    EmptyBucket {
        category: String,
        difficulty: Difficulty,
    },
}
