//! The guesses made so far in a session.

use std::fmt::Display;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::GuessResult;

/// An ordered log of graded guesses.
///
/// The history only grows while a session runs, and later guesses add to the
/// constraints of earlier ones rather than replacing them. Adapters can read
/// it to tell which guesses on a board are new since the last sync.
///
/// # Examples
///
/// ```rust
/// use wordle_assist::{History, GuessResult};
///
/// let mut history = History::new();
/// history.push("crane:00210".parse()?);
/// history.push("pinot:02000".parse()?);
///
/// assert_eq!(history.len(), 2);
/// assert_eq!(history.to_string(), "crane:00210\npinot:02000");
/// #
/// # Ok::<_, wordle_assist::ValidationError>(())
/// ```
#[derive(Clone, Debug, Hash, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", transparent)
)]
pub struct History {
    inner: Vec<GuessResult>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a guess.
    pub fn push(&mut self, result: GuessResult) {
        self.inner.push(result);
    }

    pub(crate) fn clear(&mut self) {
        self.inner.clear();
    }

    /// Returns a slice into the underlying data.
    pub fn inner(&self) -> &[GuessResult] {
        self.inner.as_slice()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn last(&self) -> Option<&GuessResult> {
        self.inner.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GuessResult> {
        self.inner.iter()
    }

    /// Returns true if the most recent guess was graded all correct.
    pub fn solved(&self) -> bool {
        matches!(self.last(), Some(r) if r.pattern().is_win())
    }
}

impl From<Vec<GuessResult>> for History {
    fn from(inner: Vec<GuessResult>) -> Self {
        History { inner }
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a GuessResult;
    type IntoIter = std::slice::Iter<'a, GuessResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Display for History {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some((last, rest)) = self.inner.split_last() {
            for result in rest {
                writeln!(f, "{}", result)?;
            }
            write!(f, "{}", last)?;
        }
        Ok(())
    }
}
