//! A solving session: the guesses made so far and the recommendations that
//! follow from them.

use std::{sync::Arc, time::Duration};

use log::{debug, warn};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    filter::filter,
    rank::{self, Ranking, Suggestion},
    Dictionary, GuessResult, History, Result, Word,
};

/// The state of one game being solved.
///
/// A solver owns the history of graded guesses and the hard mode preference.
/// Everything else (the remaining words and the suggestions) is recomputed
/// from the full history on every request, so nothing can go stale.
///
/// Mutating methods take `&mut self`, so a solver shared between threads has
/// to sit behind a lock; this keeps a guess from landing halfway through a
/// ranking.
///
/// # Examples
///
/// ```rust
/// use wordle_assist::Solver;
///
/// let mut solver = Solver::new(["crane", "slate", "trace"], ["soare"])?;
/// assert_eq!(solver.remaining_word_count(), 3);
///
/// solver.add_guess("crane", &[1, 2, 2, 0, 2])?;
/// assert_eq!(solver.remaining_word_count(), 1);
/// assert_eq!(solver.remaining_words()[0].to_string(), "trace");
///
/// // In hard mode only the words that can still win are offered.
/// solver.set_hard_mode(true);
/// let best = solver.suggestions(5);
/// assert_eq!(best.len(), 1);
/// assert_eq!(best[0].word().to_string(), "trace");
///
/// // Malformed input is rejected and changes nothing.
/// assert!(solver.add_guess("crane", &[0, 1]).is_err());
/// assert_eq!(solver.history().len(), 1);
///
/// solver.reset();
/// assert_eq!(solver.remaining_word_count(), 3);
/// #
/// # Ok::<_, wordle_assist::WordleError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Solver {
    dict: Arc<Dictionary>,
    history: History,
    hard_mode: bool,
}

impl Solver {
    /// Creates a session from an answer list and a list of allowed guesses.
    ///
    /// Fails with a [`LoadError`](crate::LoadError) if either list is empty
    /// or malformed.
    pub fn new<A, G>(answers: A, guesses: G) -> Result<Self>
    where
        A: IntoIterator,
        A::Item: AsRef<str>,
        G: IntoIterator,
        G::Item: AsRef<str>,
    {
        let dict = Dictionary::new(answers, guesses)?;
        Ok(Self::with_dictionary(Arc::new(dict)))
    }

    /// Creates a session over a dictionary that other sessions may share.
    pub fn with_dictionary(dict: Arc<Dictionary>) -> Self {
        Solver {
            dict,
            history: History::new(),
            hard_mode: false,
        }
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dict
    }

    /// Records a guess and the marks it received: 0 for absent, 1 for
    /// present and 2 for correct.
    ///
    /// The marks are trusted as given. If the word or marks are malformed the
    /// guess is rejected with a [`ValidationError`](crate::ValidationError)
    /// and the history is left unchanged.
    pub fn add_guess(&mut self, word: &str, marks: &[u8]) -> Result<()> {
        let result = GuessResult::new(word, marks)?;
        self.add_result(result);
        Ok(())
    }

    /// Records an already validated guess.
    pub fn add_result(&mut self, result: GuessResult) {
        debug!("recording guess {}", result);
        self.history.push(result);
    }

    /// Forgets every guess. The hard mode preference is kept.
    pub fn reset(&mut self) {
        debug!("resetting after {} guesses", self.history.len());
        self.history.clear();
    }

    /// Replaces the history with `guesses` if they differ from it.
    ///
    /// This is meant for adapters that re-read a whole board every time it
    /// changes: they can hand over every row and let the solver decide
    /// whether anything is new. Every entry is validated before anything is
    /// replaced, so on error the history is untouched.
    ///
    /// Returns true if the history changed.
    pub fn sync<S, M>(&mut self, guesses: &[(S, M)]) -> Result<bool>
    where
        S: AsRef<str>,
        M: AsRef<[u8]>,
    {
        let parsed = guesses
            .iter()
            .map(|(word, marks)| GuessResult::new(word.as_ref(), marks.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        if parsed.as_slice() == self.history.inner() {
            return Ok(false);
        }

        debug!(
            "replaying {} guesses over {} recorded",
            parsed.len(),
            self.history.len()
        );
        self.history = History::from(parsed);
        Ok(true)
    }

    /// Turns hard mode on or off. Only future suggestions are affected.
    pub fn set_hard_mode(&mut self, enabled: bool) {
        if enabled != self.hard_mode {
            debug!("hard mode {}", if enabled { "on" } else { "off" });
        }
        self.hard_mode = enabled;
    }

    pub fn hard_mode(&self) -> bool {
        self.hard_mode
    }

    /// The guesses recorded so far, oldest first.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// The answers consistent with every recorded guess, in sorted order.
    pub fn remaining_words(&self) -> Vec<Word> {
        filter(&self.history, self.dict.answers())
    }

    pub fn remaining_word_count(&self) -> usize {
        self.remaining_words().len()
    }

    /// Returns up to `n` suggestions, best first.
    ///
    /// In hard mode only words that could still be the answer are suggested;
    /// otherwise the whole guess vocabulary is scored. If no answer fits the
    /// recorded guesses there is nothing to suggest.
    pub fn suggestions(&self, n: usize) -> Vec<Suggestion> {
        let remaining = self.remaining_words();
        if n == 0 || self.empty(&remaining) {
            return Vec::new();
        }

        let mut ranked = rank::rank(self.pool(&remaining), &remaining, &self.dict);
        ranked.truncate(n);
        ranked
    }

    /// Like [`suggestions()`](Self::suggestions()), but gives up scoring once
    /// `budget` has elapsed. Check [`Ranking::is_complete()`] to tell a best
    /// effort answer from a full one.
    pub fn suggestions_within(&self, n: usize, budget: Duration) -> Ranking {
        let remaining = self.remaining_words();
        if self.empty(&remaining) {
            return rank::rank_within(&[], &remaining, &self.dict, budget);
        }

        rank::rank_within(self.pool(&remaining), &remaining, &self.dict, budget).truncate(n)
    }

    /// A snapshot of the session for status displays.
    pub fn status(&self) -> Status {
        Status {
            word_count: self.remaining_word_count(),
            guess_count: self.history.len(),
            hard_mode: self.hard_mode,
        }
    }

    fn pool<'a>(&'a self, remaining: &'a [Word]) -> &'a [Word] {
        if self.hard_mode {
            remaining
        } else {
            self.dict.guesses()
        }
    }

    fn empty(&self, remaining: &[Word]) -> bool {
        if remaining.is_empty() {
            warn!(
                "no answer is consistent with the {} recorded guesses",
                self.history.len()
            );
            true
        } else {
            false
        }
    }
}

/// How far along a session is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", rename_all = "camelCase")
)]
pub struct Status {
    /// The number of answers still consistent with the guesses.
    pub word_count: usize,
    pub guess_count: usize,
    pub hard_mode: bool,
}

#[cfg(test)]
mod test {
    use itertools::Itertools;
    use proptest::{collection::vec, prelude::*};

    use super::*;
    use crate::{ValidationError, WordleError};

    const IGHT: [&str; 6] = ["fight", "light", "might", "night", "sight", "tight"];

    fn solver(answers: &[&str], extra: &[&str]) -> Solver {
        Solver::new(answers, answers.iter().chain(extra)).unwrap()
    }

    fn names(suggestions: &[Suggestion]) -> Vec<String> {
        suggestions.iter().map(|s| s.word().to_string()).collect()
    }

    #[test]
    fn narrows_after_a_guess() {
        let mut solver = solver(&["crane", "slate", "trace"], &[]);
        assert_eq!(solver.remaining_word_count(), 3);

        // crane graded against trace
        solver.add_guess("crane", &[1, 2, 2, 0, 2]).unwrap();
        assert_eq!(solver.remaining_word_count(), 1);

        // Nothing is left to learn, so targets come alphabetically.
        let suggestions = solver.suggestions(3);
        assert_eq!(names(&suggestions), ["crane", "slate", "trace"]);
        assert!(suggestions.iter().all(|s| s.entropy() == 0.0));
        assert_eq!(
            suggestions.iter().map(|s| s.possible_answer()).collect_vec(),
            [false, false, true]
        );
    }

    #[test]
    fn contradictory_feedback_leaves_nothing() {
        let mut solver = solver(&["crane", "slate", "trace"], &[]);
        solver.add_guess("crane", &[0, 0, 2, 1, 0]).unwrap();
        assert_eq!(solver.remaining_word_count(), 0);
        assert!(solver.suggestions(8).is_empty());

        let ranking = solver.suggestions_within(8, Duration::from_secs(1));
        assert!(ranking.suggestions().is_empty());
        assert!(ranking.is_complete());
    }

    #[test]
    fn rejects_malformed_guesses_atomically() {
        let mut solver = solver(&["crane", "slate", "trace"], &[]);
        solver.add_guess("slate", &[0, 0, 2, 0, 2]).unwrap();

        assert!(matches!(
            solver.add_guess("crane", &[0, 0, 2]),
            Err(WordleError::Validation {
                kind: ValidationError::LengthMismatch { marks: 3, .. }
            })
        ));
        assert!(matches!(
            solver.add_guess("cranes", &[0, 0, 2, 0, 0, 0]),
            Err(WordleError::Validation {
                kind: ValidationError::InvalidWord(_)
            })
        ));
        assert!(matches!(
            solver.add_guess("crane", &[0, 0, 2, 0, 7]),
            Err(WordleError::Validation {
                kind: ValidationError::InvalidMark(7)
            })
        ));
        assert_eq!(solver.history().len(), 1);
        assert_eq!(solver.history().to_string(), "slate:00202");
    }

    #[test]
    fn reset_keeps_hard_mode() {
        let mut solver = solver(&["crane", "slate", "trace"], &[]);
        solver.set_hard_mode(true);
        solver.add_guess("crane", &[1, 2, 2, 0, 2]).unwrap();
        solver.reset();

        assert!(solver.history().is_empty());
        assert!(solver.hard_mode());
        assert_eq!(solver.remaining_word_count(), 3);
    }

    #[test]
    fn hard_mode_only_suggests_remaining_words() {
        let mut solver = solver(&IGHT, &["flint", "month", "stomp"]);

        let easy = solver.suggestions(3);
        assert_eq!(easy[0].word().to_string(), "flint");
        assert!(!easy[0].in_word_list());

        solver.set_hard_mode(true);
        let hard = solver.suggestions(10);
        assert_eq!(hard.len(), IGHT.len());
        let remaining = solver.remaining_words();
        assert!(hard.iter().all(|s| remaining.contains(&s.word())));
    }

    #[test]
    fn returns_fewer_than_asked_when_short() {
        let solver = solver(&["crane", "slate"], &[]);
        assert_eq!(solver.suggestions(10).len(), 2);
        assert!(solver.suggestions(0).is_empty());
        assert_eq!(solver.suggestions(1).len(), 1);
    }

    #[test]
    fn sync_replays_whole_boards() {
        let mut solver = solver(&IGHT, &["flint"]);

        let board = [("flint", vec![0_u8, 0, 1, 1, 2])];
        assert!(solver.sync(&board).unwrap());
        assert!(!solver.sync(&board).unwrap());
        assert_eq!(solver.remaining_words(), ["night".parse::<Word>().unwrap()]);

        let bad = [("flint", vec![0_u8, 0, 1, 1, 2]), ("night", vec![2, 2])];
        assert!(solver.sync(&bad).is_err());
        assert_eq!(solver.history().len(), 1);

        let longer = [("flint", vec![0_u8, 0, 1, 1, 2]), ("night", vec![2, 2, 2, 2, 2])];
        assert!(solver.sync(&longer).unwrap());
        assert!(solver.history().solved());
        assert_eq!(solver.status().guess_count, 2);

        let empty: [(&str, Vec<u8>); 0] = [];
        assert!(solver.sync(&empty).unwrap());
        assert_eq!(solver.remaining_word_count(), IGHT.len());
    }

    #[test]
    fn sessions_share_a_dictionary() {
        let dict = Arc::new(Dictionary::new(IGHT, ["flint"]).unwrap());
        let mut a = Solver::with_dictionary(dict.clone());
        let b = Solver::with_dictionary(dict);

        a.add_guess("flint", &[0, 0, 1, 1, 2]).unwrap();
        assert_eq!(a.remaining_word_count(), 1);
        assert_eq!(b.remaining_word_count(), IGHT.len());
    }

    #[test]
    fn status_reports_progress() {
        let mut solver = solver(&IGHT, &[]);
        solver.add_guess("might", &[0, 2, 2, 2, 2]).unwrap();
        assert_eq!(
            solver.status(),
            Status {
                word_count: 5,
                guess_count: 1,
                hard_mode: false
            }
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn status_and_suggestions_serialize() {
        let mut solver = solver(&["crane", "slate", "trace"], &[]);
        solver.add_guess("crane", &[1, 2, 2, 0, 2]).unwrap();

        let json = serde_json::to_string(&solver.status()).unwrap();
        assert_eq!(json, r#"{"wordCount":1,"guessCount":1,"hardMode":false}"#);

        let json = serde_json::to_value(&solver.suggestions(1)).unwrap();
        assert_eq!(json[0]["word"], "crane");
        assert_eq!(json[0]["entropy"], 0.0);
        assert_eq!(json[0]["inWordList"], true);
        assert_eq!(json[0]["possibleAnswer"], false);
    }

    #[test]
    fn solver_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Solver>();
    }

    proptest! {
        #[test]
        fn reset_restores_every_answer(
            answers in vec("[a-d]{5}", 1..30),
            guesses in vec(("[a-d]{5}", vec(0_u8..3, 5)), 0..5),
        ) {
            let mut solver = Solver::new(&answers, &answers).unwrap();
            for (word, marks) in &guesses {
                solver.add_guess(word, marks).unwrap();
            }
            solver.reset();
            prop_assert_eq!(solver.remaining_word_count(), solver.dictionary().answers().len());
        }

        #[test]
        fn guesses_only_narrow(
            answers in vec("[a-d]{5}", 1..30),
            guesses in vec(("[a-d]{5}", vec(0_u8..3, 5)), 1..5),
        ) {
            let mut solver = Solver::new(&answers, &answers).unwrap();
            let mut last = solver.remaining_word_count();
            for (word, marks) in &guesses {
                solver.add_guess(word, marks).unwrap();
                let now = solver.remaining_word_count();
                prop_assert!(now <= last);
                last = now;
            }
        }

        #[test]
        fn suggestions_are_reproducible(
            answers in vec("[a-d]{5}", 2..20),
            extra in vec("[a-e]{5}", 0..20),
            hard in any::<bool>(),
        ) {
            let mut solver = Solver::new(&answers, answers.iter().chain(&extra)).unwrap();
            solver.set_hard_mode(hard);
            let first = solver.suggestions(5);
            let second = solver.suggestions(5);
            prop_assert_eq!(names(&first), names(&second));
            prop_assert_eq!(
                first.iter().map(|s| s.entropy().to_bits()).collect_vec(),
                second.iter().map(|s| s.entropy().to_bits()).collect_vec()
            );
        }
    }
}
