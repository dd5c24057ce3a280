//! Five letter words.

use std::{
    convert::TryFrom,
    fmt::{Debug, Display},
    ops::Deref,
    str::FromStr,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// The number of letters in every Wordle word.
pub const WORD_LEN: usize = 5;

/// A Wordle word.
///
/// Construction is validated, so every instance holds exactly
/// [`WORD_LEN`] lowercase ASCII letters. Words compare and sort by their
/// letters.
///
/// # Examples
///
/// ```rust
/// # use std::ops::Deref;
/// use wordle_assist::Word;
///
/// let pints: Word = "Pints".parse()?;
/// assert_eq!(pints.deref(), "pints");
///
/// assert!("tlamps".parse::<Word>().is_err());
/// assert!("t1amp".parse::<Word>().is_err());
/// #
/// # Ok::<_, wordle_assist::ValidationError>(())
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", into = "String", try_from = "String")
)]
pub struct Word {
    letters: [u8; WORD_LEN],
}

impl Word {
    /// Returns the letters of the word as ASCII bytes.
    pub fn letters(&self) -> &[u8; WORD_LEN] {
        &self.letters
    }

    /// Returns the letter at `index` as an offset from `a`.
    #[inline]
    pub(crate) fn slot(&self, index: usize) -> usize {
        (self.letters[index] - b'a') as usize
    }
}

impl FromStr for Word {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let bytes = trimmed.as_bytes();
        if bytes.len() != WORD_LEN || !bytes.iter().all(u8::is_ascii_alphabetic) {
            return Err(ValidationError::InvalidWord(s.to_string()));
        }

        let mut letters = [0_u8; WORD_LEN];
        for (slot, b) in letters.iter_mut().zip(bytes) {
            *slot = b.to_ascii_lowercase();
        }
        Ok(Word { letters })
    }
}

impl TryFrom<&str> for Word {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<String> for Word {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Word> for String {
    fn from(word: Word) -> Self {
        word.deref().to_string()
    }
}

impl Deref for Word {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        // Only ASCII letters ever make it into `letters`.
        std::str::from_utf8(&self.letters).expect("words hold ascii letters")
    }
}

impl Display for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.deref())
    }
}

impl Debug for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Word({:?})", self.deref())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn normalizes_case_and_whitespace() {
        let word: Word = "  CrAnE\n".parse().unwrap();
        assert_eq!(&*word, "crane");
        assert_eq!(word.slot(0), 2);
    }

    #[test]
    fn rejects_bad_words() {
        for bad in ["", "cran", "cranes", "cr ne", "cr4ne", "crâne"] {
            assert_eq!(
                bad.parse::<Word>(),
                Err(ValidationError::InvalidWord(bad.to_string())),
                "{bad:?} should not parse"
            );
        }
    }

    #[test]
    fn orders_by_letters() {
        let mut words: Vec<Word> = ["trace", "crane", "slate"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        words.sort();
        assert_eq!(
            words.iter().map(|w| w.to_string()).collect::<Vec<_>>(),
            ["crane", "slate", "trace"]
        );
    }
}
