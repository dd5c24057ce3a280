#![doc = include_str!("../README.md")]

// Required to rename serde
#[cfg(feature = "serde")]
extern crate serde_crate as serde;

use thiserror::Error;

pub mod word;
pub use word::{Word, WORD_LEN};

pub mod grade;
pub use grade::{Grade, GuessResult, Pattern};

pub mod words;
pub use words::Dictionary;

pub mod history;
pub use history::History;

pub mod filter;

pub mod rank;
pub use rank::{Ranking, Suggestion};

pub mod session;
pub use session::{Solver, Status};

pub mod harness;
pub use harness::Harness;

pub mod perf;
pub use perf::{Perf, Summary};

/// A [`Result`](std::result::Result) whose error defaults to [`WordleError`].
pub type Result<T, E = WordleError> = std::result::Result<T, E>;

/// The errors that `wordle_assist` can produce.
#[derive(Debug, Error)]
pub enum WordleError {
    #[error("could not load the word lists")]
    Load {
        #[from]
        kind: LoadError,
    },

    #[error("rejected a malformed guess")]
    Validation {
        #[from]
        kind: ValidationError,
    },

    #[error("general IO error")]
    Io(#[from] std::io::Error),
}

/// Problems with the word lists handed to a [`Dictionary`].
///
/// These are fatal: no session can be created from a malformed dictionary.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoadError {
    #[error("the answer list is empty")]
    EmptyAnswers,

    #[error("the guess list is empty")]
    EmptyGuesses,

    /// An entry is not five ASCII letters.
    #[error("entry {line} (\"{word}\") is not a five letter word")]
    InvalidWord { word: String, line: usize },
}

/// Problems with a guess handed to a [`Solver`].
///
/// A guess that fails validation is never recorded.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("\"{0}\" is not a five letter word")]
    InvalidWord(String),

    #[error("\"{word}\" has {} letters but {marks} marks were given", .word.len())]
    LengthMismatch { word: String, marks: usize },

    #[error("{0} is not a mark; expected 0 (absent), 1 (present) or 2 (correct)")]
    InvalidMark(u8),

    #[error("'{0}' is not a mark character")]
    InvalidMarkChar(char),
}
