//! The word lists a session draws from.

use std::{fs, path::Path};

use itertools::Itertools;
use log::debug;

use crate::{LoadError, Result, Word};

/// The static dictionary of a game: the words that can be answers and the
/// (larger) vocabulary of words that may be guessed.
///
/// Both lists are sorted and free of duplicates, and the guess vocabulary
/// always contains every answer. Nothing changes after construction.
///
/// # Examples
///
/// ```rust
/// use wordle_assist::{Dictionary, Word};
///
/// let dict = Dictionary::new(["crane", "slate"], ["adieu", "soare"])?;
/// assert_eq!(dict.answers().len(), 2);
/// assert_eq!(dict.guesses().len(), 4);
///
/// let crane: Word = "crane".parse()?;
/// let soare: Word = "soare".parse()?;
/// assert!(dict.is_answer(&crane));
/// assert!(!dict.is_answer(&soare));
/// assert!(dict.is_guess(&crane));
///
/// assert!(Dictionary::new(Vec::<&str>::new(), ["adieu"]).is_err());
/// assert!(Dictionary::new(["crane"], ["crayon"]).is_err());
/// #
/// # Ok::<_, wordle_assist::WordleError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dictionary {
    answers: Vec<Word>,
    guesses: Vec<Word>,
}

impl Dictionary {
    /// Builds a dictionary from a list of answers and a list of allowed
    /// guesses.
    ///
    /// Returns an error if either list is empty or if any entry is not a five
    /// letter word.
    pub fn new<A, G>(answers: A, guesses: G) -> Result<Self>
    where
        A: IntoIterator,
        A::Item: AsRef<str>,
        G: IntoIterator,
        G::Item: AsRef<str>,
    {
        let answers = parse_list(answers)?;
        if answers.is_empty() {
            return Err(LoadError::EmptyAnswers.into());
        }

        let guesses = parse_list(guesses)?;
        if guesses.is_empty() {
            return Err(LoadError::EmptyGuesses.into());
        }

        let extra = answers
            .iter()
            .filter(|a| guesses.binary_search(a).is_err())
            .count();
        if extra > 0 {
            debug!("{} answers were missing from the guess list", extra);
        }

        let guesses = guesses.into_iter().merge(answers.iter().copied()).dedup().collect();

        Ok(Dictionary { answers, guesses })
    }

    /// Builds a dictionary from two newline-separated lists.
    ///
    /// Blank lines and lines starting with `#` are skipped.
    pub fn from_text(answers: &str, guesses: &str) -> Result<Self> {
        Self::new(lines(answers), lines(guesses))
    }

    /// Reads two newline-separated word list files.
    pub fn from_files(answers: impl AsRef<Path>, guesses: impl AsRef<Path>) -> Result<Self> {
        let answers = fs::read_to_string(answers)?;
        let guesses = fs::read_to_string(guesses)?;
        Self::from_text(&answers, &guesses)
    }

    /// The words that may be the solution, in sorted order.
    pub fn answers(&self) -> &[Word] {
        &self.answers
    }

    /// Every word that may be guessed, in sorted order.
    pub fn guesses(&self) -> &[Word] {
        &self.guesses
    }

    pub fn is_answer(&self, word: &Word) -> bool {
        self.answers.binary_search(word).is_ok()
    }

    pub fn is_guess(&self, word: &Word) -> bool {
        self.guesses.binary_search(word).is_ok()
    }
}

fn lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
}

fn parse_list<I>(words: I) -> Result<Vec<Word>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut parsed = words
        .into_iter()
        .enumerate()
        .map(|(line, word)| {
            word.as_ref().parse::<Word>().map_err(|_| LoadError::InvalidWord {
                word: word.as_ref().to_string(),
                line: line + 1,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    parsed.sort_unstable();
    parsed.dedup();
    Ok(parsed)
}
