//! Playing the solver against known answers to see how well it does.

use std::sync::Arc;

#[cfg(feature = "fancy")]
use indicatif::ProgressBar;
use log::info;
use rand::seq::index::sample;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::{perf::Perf, Dictionary, GuessResult, History, Solver, Word};

/// Wordle allows six guesses.
pub const MAX_GUESSES: usize = 6;

/// A test harness that plays whole games with a [`Solver`].
///
/// Each game starts a fresh session, guesses the top suggestion, feeds back
/// the grades the hidden answer would give, and repeats until the answer is
/// found or [`MAX_GUESSES`] run out. Once a single word fits every clue it is
/// guessed outright. Configuration methods consume the harness and return a
/// new one.
///
/// # Examples
///
/// ```rust
/// # use std::sync::Arc;
/// use wordle_assist::{Dictionary, Harness};
///
/// let dict = Dictionary::new(["fight", "light", "might"], ["flint"])?;
/// let perf = Harness::new(Arc::new(dict))
///     .quiet()
///     .test_all()
///     .run();
///
/// assert_eq!(perf.num_tried(), 3);
/// assert_eq!(perf.num_missed(), 0);
/// #
/// # Ok::<_, wordle_assist::WordleError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Harness {
    dict: Arc<Dictionary>,
    #[cfg_attr(not(feature = "fancy"), allow(dead_code))]
    verbose: bool,
    num_games: Option<usize>,
    hard_mode: bool,
    opener: Option<Word>,
}

impl Harness {
    /// Creates a new test harness over `dict`.
    ///
    /// Defaults:
    /// 1. quiet mode
    /// 2. plays 100 answers chosen at random
    /// 3. easy mode
    /// 4. opens with whatever the solver suggests for an empty board
    pub fn new(dict: Arc<Dictionary>) -> Self {
        let num_games = Some(100.min(dict.answers().len()));
        Harness {
            dict,
            verbose: false,
            num_games,
            hard_mode: false,
            opener: None,
        }
    }

    /// Shows a progress bar while playing.
    pub fn verbose(self) -> Self {
        Harness {
            verbose: true,
            ..self
        }
    }

    /// Makes the harness silent while playing.
    pub fn quiet(self) -> Self {
        Harness {
            verbose: false,
            ..self
        }
    }

    /// Plays every answer in the dictionary.
    pub fn test_all(self) -> Self {
        Harness {
            num_games: None,
            ..self
        }
    }

    /// Plays `n` answers chosen at random.
    pub fn test_num(self, n: usize) -> Self {
        let n = n.clamp(0, self.dict.answers().len());
        Harness {
            num_games: Some(n),
            ..self
        }
    }

    /// Only guesses words that could still be the answer.
    pub fn hard_mode(self, hard_mode: bool) -> Self {
        Harness { hard_mode, ..self }
    }

    /// Always opens with `word` instead of the top suggestion.
    pub fn opener(self, word: Word) -> Self {
        Harness {
            opener: Some(word),
            ..self
        }
    }

    /// Plays the configured games and records how they went.
    ///
    /// Games are recorded in the order of their answers.
    pub fn run(&self) -> Perf {
        let mut answers: Vec<Word> = match self.num_games {
            Some(n) => {
                let mut rng = rand::thread_rng();
                sample(&mut rng, self.dict.answers().len(), n)
                    .iter()
                    .map(|i| self.dict.answers()[i])
                    .collect()
            }
            None => self.dict.answers().to_vec(),
        };
        answers.sort_unstable();

        let opener = self.opener.or_else(|| {
            let mut solver = Solver::with_dictionary(self.dict.clone());
            solver.set_hard_mode(self.hard_mode);
            solver.suggestions(1).first().map(|s| s.word())
        });

        info!(
            "playing {} games ({} mode) opening with {}",
            answers.len(),
            if self.hard_mode { "hard" } else { "easy" },
            opener.map_or_else(|| "nothing".to_string(), |w| w.to_string())
        );

        #[cfg(feature = "fancy")]
        let bar = if self.verbose {
            ProgressBar::new(answers.len() as u64)
        } else {
            ProgressBar::hidden()
        };

        let play = |answer: &Word| {
            let game = (*answer, self.play(*answer, opener));
            #[cfg(feature = "fancy")]
            bar.inc(1);
            game
        };

        #[cfg(feature = "parallel")]
        let tries: Vec<_> = answers.par_iter().map(play).collect();

        #[cfg(not(feature = "parallel"))]
        let tries: Vec<_> = answers.iter().map(play).collect();

        #[cfg(feature = "fancy")]
        bar.finish_and_clear();

        let mut perf = Perf::new(self.label(opener));
        perf.tries = tries;
        info!("solved {} of {}", perf.num_solved(), perf.num_tried());
        perf
    }

    /// Runs the harness (see [`run()`](Harness::run())) and prints the
    /// summary with a histogram.
    pub fn run_and_summarize(&self) -> crate::Result<Perf> {
        let perf = self.run();
        perf.to_summary().print(true)?;
        Ok(perf)
    }

    fn play(&self, answer: Word, opener: Option<Word>) -> History {
        let mut solver = Solver::with_dictionary(self.dict.clone());
        solver.set_hard_mode(self.hard_mode);

        while solver.history().len() < MAX_GUESSES {
            let remaining = solver.remaining_words();
            let guess = match (opener, remaining.as_slice()) {
                (Some(word), _) if solver.history().is_empty() => word,
                (_, [last]) => *last,
                _ => match solver.suggestions(1).first() {
                    Some(s) => s.word(),
                    None => break,
                },
            };

            let result = GuessResult::derive(guess, &answer);
            solver.add_result(result);
            if result.pattern().is_win() {
                break;
            }
        }

        solver.history().clone()
    }

    fn label(&self, opener: Option<Word>) -> String {
        let mode = if self.hard_mode { "hard" } else { "easy" };
        match opener {
            Some(word) => format!("entropy, {} mode, opening {}", mode, word),
            None => format!("entropy, {} mode", mode),
        }
    }
}
