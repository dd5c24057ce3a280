//! Scoring guesses by how much they are expected to reveal.
//!
//! A guess splits the remaining answers into groups by the pattern of grades
//! each answer would produce. The Shannon entropy of that split, in bits, is
//! the information the guess is expected to reveal, and the ranker orders
//! guesses by it.

use std::{
    cmp::Ordering,
    fmt::Display,
    time::{Duration, Instant},
};

use log::{trace, warn};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Dictionary, Pattern, Word};

/// How many pool words are scored between deadline checks.
const CHUNK: usize = 256;

/// A recommended guess.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", rename_all = "camelCase")
)]
pub struct Suggestion {
    word: Word,
    entropy: f64,
    in_word_list: bool,
    possible_answer: bool,
}

impl Suggestion {
    pub fn word(&self) -> Word {
        self.word
    }

    /// The expected information gain of guessing this word, in bits.
    pub fn entropy(&self) -> f64 {
        self.entropy
    }

    /// True for "target" words, which are in the answer list, and false for
    /// "explore" words, which are only good for narrowing things down.
    pub fn in_word_list(&self) -> bool {
        self.in_word_list
    }

    /// True if the word is consistent with every clue so far.
    ///
    /// This is informational only and plays no part in the ordering.
    pub fn possible_answer(&self) -> bool {
        self.possible_answer
    }

    /// Highest entropy first, then target words, then alphabetical.
    fn order(&self, other: &Self) -> Ordering {
        other
            .entropy
            .total_cmp(&self.entropy)
            .then_with(|| other.in_word_list.cmp(&self.in_word_list))
            .then_with(|| self.word.cmp(&other.word))
    }
}

impl Display for Suggestion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = if self.in_word_list { "target" } else { "explore" };
        write!(f, "{} {:.3} bits ({})", self.word, self.entropy, kind)
    }
}

/// The result of scoring a pool of guesses.
///
/// A ranking is complete unless it was cut short by a time budget, in which
/// case only the first [`scored()`](Ranking::scored()) words of the pool were
/// considered.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranking {
    suggestions: Vec<Suggestion>,
    scored: usize,
    pool_size: usize,
}

impl Ranking {
    /// The suggestions, best first.
    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn into_suggestions(self) -> Vec<Suggestion> {
        self.suggestions
    }

    /// How many words of the pool were scored.
    pub fn scored(&self) -> usize {
        self.scored
    }

    pub fn pool_size(&self) -> usize {
        self.pool_size
    }

    /// Returns false if the ranking ran out of time before scoring the
    /// whole pool.
    pub fn is_complete(&self) -> bool {
        self.scored == self.pool_size
    }

    /// Keeps only the best `n` suggestions.
    pub(crate) fn truncate(mut self, n: usize) -> Self {
        self.suggestions.truncate(n);
        self
    }
}

/// Computes the expected information gain, in bits, of guessing `guess` when
/// the answer is equally likely to be any word in `remaining`.
///
/// This is zero when at most one word remains, and never more than
/// `log2(remaining.len())`.
///
/// # Examples
///
/// ```rust
/// use wordle_assist::{rank::entropy, Word};
///
/// let remaining: Vec<Word> = ["crane", "slate", "trace", "crate"]
///     .iter()
///     .map(|s| s.parse())
///     .collect::<Result<_, _>>()?;
///
/// // crane tells all four apart
/// assert_eq!(entropy(&"crane".parse()?, &remaining), 2.0);
/// assert_eq!(entropy(&"crane".parse()?, &remaining[..1]), 0.0);
/// #
/// # Ok::<_, wordle_assist::ValidationError>(())
/// ```
pub fn entropy(guess: &Word, remaining: &[Word]) -> f64 {
    if remaining.len() <= 1 {
        return 0.0;
    }

    let mut counts = [0_u32; Pattern::COUNT];
    for answer in remaining {
        counts[Pattern::compute(guess, answer).index()] += 1;
    }

    let total = remaining.len() as f64;
    counts
        .iter()
        .filter(|&&count| count > 0)
        .map(|&count| {
            let count = count as f64;
            (count / total) * (total / count).log2()
        })
        .sum()
}

/// Scores every word of `pool` against `remaining` and returns them best
/// first.
///
/// Target words (those in the dictionary's answer list) are flagged so they
/// can be told apart from explore words. An empty `remaining` yields no
/// suggestions.
pub fn rank(pool: &[Word], remaining: &[Word], dict: &Dictionary) -> Vec<Suggestion> {
    rank_until(pool, remaining, dict, None).into_suggestions()
}

/// Like [`rank()`], but stops scoring once `budget` has elapsed.
///
/// At least one chunk of the pool is always scored, so a non-empty pool never
/// produces an empty ranking. A budget too large to represent, such as
/// [`Duration::MAX`], never runs out.
pub fn rank_within(
    pool: &[Word],
    remaining: &[Word],
    dict: &Dictionary,
    budget: Duration,
) -> Ranking {
    rank_until(pool, remaining, dict, Instant::now().checked_add(budget))
}

fn rank_until(
    pool: &[Word],
    remaining: &[Word],
    dict: &Dictionary,
    deadline: Option<Instant>,
) -> Ranking {
    if remaining.is_empty() {
        return Ranking {
            suggestions: Vec::new(),
            scored: pool.len(),
            pool_size: pool.len(),
        };
    }

    let start = Instant::now();
    let mut sorted = remaining.to_vec();
    sorted.sort_unstable();

    let score = |word: &Word| Suggestion {
        word: *word,
        entropy: entropy(word, remaining),
        in_word_list: dict.is_answer(word),
        possible_answer: sorted.binary_search(word).is_ok(),
    };

    let mut suggestions = Vec::with_capacity(pool.len());
    for chunk in pool.chunks(CHUNK) {
        if !suggestions.is_empty() && deadline.map_or(false, |d| Instant::now() >= d) {
            warn!(
                "ranking stopped after {} of {} words",
                suggestions.len(),
                pool.len()
            );
            break;
        }

        #[cfg(feature = "parallel")]
        suggestions.par_extend(chunk.par_iter().map(score));

        #[cfg(not(feature = "parallel"))]
        suggestions.extend(chunk.iter().map(score));
    }

    let scored = suggestions.len();
    sort(&mut suggestions);

    trace!(
        "scored {} guesses against {} answers in {:?}",
        scored,
        remaining.len(),
        start.elapsed()
    );

    Ranking {
        suggestions,
        scored,
        pool_size: pool.len(),
    }
}

fn sort(suggestions: &mut [Suggestion]) {
    #[cfg(feature = "parallel")]
    suggestions.par_sort_unstable_by(Suggestion::order);

    #[cfg(not(feature = "parallel"))]
    suggestions.sort_unstable_by(Suggestion::order);
}

/// Lays out suggestions as a table, one row per word, best first.
///
/// Words that could still be the answer are highlighted.
#[cfg(feature = "fancy")]
pub fn suggestion_table(suggestions: &[Suggestion]) -> comfy_table::Table {
    use comfy_table::{Cell, CellAlignment, Color, Table};

    let mut table = Table::new();
    if table.is_tty() {
        table.load_preset(comfy_table::presets::UTF8_FULL);
    }
    table.set_header(vec!["#", "guess", "bits", "kind"]);

    for (i, s) in suggestions.iter().enumerate() {
        let mut word = Cell::new(s.word());
        if s.possible_answer() {
            word = word.fg(Color::Green);
        }
        table.add_row(vec![
            Cell::new(i + 1),
            word,
            Cell::new(format!("{:.3}", s.entropy())).set_alignment(CellAlignment::Right),
            Cell::new(if s.in_word_list() { "target" } else { "explore" }),
        ]);
    }

    table
}
