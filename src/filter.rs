//! Narrowing the answer list down to the words that fit every clue.

use itertools::Itertools;

use crate::{GuessResult, Pattern, Word};

/// Returns every word in `base` that is consistent with all of `history`.
///
/// A word is consistent with a graded guess when grading that guess against
/// the word reproduces the recorded grades exactly. The result keeps the order
/// of `base`. An empty history keeps everything; contradictory clues keep
/// nothing, which is a valid outcome rather than an error.
///
/// # Examples
///
/// ```rust
/// use wordle_assist::{filter::filter, GuessResult, History, Word};
///
/// let base: Vec<Word> = ["crane", "slate", "trace"]
///     .iter()
///     .map(|s| s.parse())
///     .collect::<Result<_, _>>()?;
///
/// let history: Vec<GuessResult> = vec!["crane:12202".parse()?];
/// let remaining = filter(&history, &base);
/// assert_eq!(remaining, vec!["trace".parse::<Word>()?]);
///
/// assert_eq!(filter(&History::new(), &base), base);
/// #
/// # Ok::<_, wordle_assist::ValidationError>(())
/// ```
pub fn filter<'h, H>(history: H, base: &[Word]) -> Vec<Word>
where
    H: IntoIterator<Item = &'h GuessResult>,
{
    let clues = history
        .into_iter()
        .map(|result| (result.word(), result.pattern()))
        .collect_vec();

    base.iter()
        .filter(|answer| consistent(&clues, answer))
        .copied()
        .collect()
}

/// Returns true if `answer` fits every clue in `history`.
pub fn is_consistent<'h, H>(history: H, answer: &Word) -> bool
where
    H: IntoIterator<Item = &'h GuessResult>,
{
    history.into_iter().all(|result| result.matches(answer))
}

#[inline]
fn consistent(clues: &[(Word, Pattern)], answer: &Word) -> bool {
    clues
        .iter()
        .all(|(guess, pattern)| Pattern::compute(guess, answer) == *pattern)
}
