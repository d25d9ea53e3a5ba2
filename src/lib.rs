// Library interface for hangman
// This allows integration tests to access internal modules

pub mod audio;
pub mod button;
pub mod cli;
pub mod error;
pub mod event_log;
pub mod flow;
pub mod game_state;
pub mod logging;
pub mod selector;
pub mod tui;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use error::{CorpusLoadError, SelectionError};
pub use event_log::{EventLog, LogSink};
pub use flow::{NavAction, Screen, ScreenFlowController, Transition};
pub use game_state::{GuessOutcome, MAX_TRIES, RoundState, RoundStatus};
pub use selector::{CategoryChoice, RandomCategoryStrategy, Selection, WordSelector};
pub use wordbank::{
    Difficulty, WordCorpus, load_corpus_from_files, load_corpus_from_str, load_embedded_corpus,
};
