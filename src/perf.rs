//! Evaluating how well the solver plays.

use std::{fmt::Display, io::Write, ops::Deref};

#[cfg(feature = "fancy")]
use comfy_table::{Cell, Color, ColumnConstraint, Row, Table, Width};
#[cfg(feature = "fancy")]
use owo_colors::{AnsiColors, OwoColorize, Stream};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{harness::MAX_GUESSES, History, Result, Word};

/// A record of the games played by the [test harness](crate::Harness).
///
/// This struct can provide statistics about the games on its own, but it
/// is recommended to produce a [`Summary`] first to cache the computations.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct Perf {
    pub(crate) tries: Vec<(Word, History)>,
    label: String,
}

impl Perf {
    /// Creates a new empty performance record.
    pub(crate) fn new(label: impl Into<String>) -> Self {
        Perf {
            tries: Vec::new(),
            label: label.into(),
        }
    }

    /// Describes the configuration that produced this record.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Every answer played and the guesses made for it.
    pub fn tries(&self) -> &[(Word, History)] {
        &self.tries
    }

    /// Gets the number of games played.
    pub fn num_tried(&self) -> u32 {
        self.tries.len() as u32
    }

    /// Gets the number of games won within the guess limit.
    pub fn num_solved(&self) -> u32 {
        self.tries
            .iter()
            .filter(|(_, history)| history.solved())
            .count() as u32
    }

    pub fn frac_solved(&self) -> f32 {
        (self.num_solved() as f32) / (self.num_tried() as f32)
    }

    /// Gets the number of guesses across all games.
    pub fn cumulative_guesses(&self) -> u32 {
        self.tries.iter().map(|(_, h)| h.len() as u32).sum()
    }

    /// Gets the average number of guesses needed to win a game.
    ///
    /// Guesses made in lost games are not counted.
    pub fn guesses_per_solution(&self) -> f32 {
        let solved_guesses: u32 = self
            .tries
            .iter()
            .filter(|(_, history)| history.solved())
            .map(|(_, h)| h.len() as u32)
            .sum();
        (solved_guesses as f32) / (self.num_solved() as f32)
    }

    pub fn num_missed(&self) -> u32 {
        self.num_tried() - self.num_solved()
    }

    pub fn frac_missed(&self) -> f32 {
        (self.num_missed() as f32) / (self.num_tried() as f32)
    }

    /// Prints the summary and then a table of the guesses made for each
    /// answer. Lost games are highlighted.
    #[cfg(feature = "fancy")]
    pub fn print(&self) {
        print!("{}", self);
        println!("{}", self.table());
    }

    /// Lays out one cell per game: the answer above the guesses made for it.
    #[cfg(feature = "fancy")]
    pub fn table(&self) -> Table {
        let mut table = Table::new();
        if !table.is_tty() {
            table.set_table_width(80);
        } else {
            table.load_preset(comfy_table::presets::UTF8_FULL);
        }
        let columns = (table.get_table_width().unwrap_or(80) / 13).max(1) as usize;
        for chunk in self.tries.chunks(columns) {
            let mut row = Row::new();
            for (answer, history) in chunk {
                let mut cell = Cell::new(format!("{}\n-----------\n{}", answer, history));
                if !history.solved() {
                    cell = cell.bg(Color::Red).fg(Color::Black);
                }
                row.add_cell(cell);
            }
            table.add_row(row);
        }
        table.set_constraints(vec![
            ColumnConstraint::LowerBoundary(Width::Fixed(11));
            columns
        ]);
        table
    }

    /// Converts this performance record to a pre-calculated summary.
    pub fn to_summary(&self) -> Summary {
        let mut bins = [0; MAX_GUESSES];

        self.tries
            .iter()
            .filter(|(_, history)| history.solved())
            .map(|(_, history)| history.len())
            .for_each(|n| bins[n - 1] += 1);

        debug_assert_eq!(bins.iter().sum::<u32>(), self.num_solved());

        Summary {
            label: &self.label,
            num_tried: self.num_tried(),
            num_solved: self.num_solved(),
            cumulative_guesses: self.cumulative_guesses(),
            histogram: bins.into(),
        }
    }
}

impl Display for Perf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_summary())
    }
}

/// A summary of a [`Perf`] record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize),
    serde(crate = "serde_crate")
)]
pub struct Summary<'a> {
    label: &'a str,
    num_tried: u32,
    num_solved: u32,
    cumulative_guesses: u32,
    histogram: Histogram,
}

impl<'a> Summary<'a> {
    pub fn label(&self) -> &'a str {
        self.label
    }

    pub fn num_tried(&self) -> u32 {
        self.num_tried
    }

    /// Gets the number of games won.
    ///
    /// This is never more than [`num_tried()`](Summary::num_tried()).
    pub fn num_solved(&self) -> u32 {
        self.num_solved
    }

    pub fn frac_solved(&self) -> f32 {
        (self.num_solved as f32) / (self.num_tried as f32)
    }

    pub fn cumulative_guesses(&self) -> u32 {
        self.cumulative_guesses
    }

    /// Gets the number of guesses across all won games.
    pub fn cumulative_guesses_solved(&self) -> u32 {
        self.histogram
            .iter()
            .enumerate()
            .map(|(i, v)| (i as u32 + 1) * v)
            .sum::<u32>()
    }

    /// Gets the average number of guesses needed to win a game.
    pub fn mean_guesses(&self) -> f32 {
        (self.cumulative_guesses_solved() as f32) / (self.num_solved as f32)
    }

    pub fn num_missed(&self) -> u32 {
        self.num_tried - self.num_solved
    }

    pub fn frac_missed(&self) -> f32 {
        (self.num_missed() as f32) / (self.num_tried as f32)
    }

    pub fn histogram(&self) -> &Histogram {
        &self.histogram
    }

    /// Prints the summary to stdout, coloring the win rate when the terminal
    /// supports it, and optionally the histogram of guess counts.
    pub fn print(&self, histogram: bool) -> Result<()> {
        let mut stdout = std::io::stdout();

        writeln!(stdout, "{:-^80}", self.label)?;
        writeln!(stdout, "Ran {} words", self.num_tried())?;

        let percent = format!("{:.1}%", self.frac_solved() * 100.);
        #[cfg(feature = "fancy")]
        let percent = percent.if_supports_color(Stream::Stdout, |text| {
            if self.num_missed() == 0 {
                text.color(AnsiColors::Green)
            } else {
                text.color(AnsiColors::Red)
            }
        });

        writeln!(
            stdout,
            "Guessed {} correctly, or {}, and {} incorrectly",
            self.num_solved(),
            percent,
            self.num_missed()
        )?;
        writeln!(
            stdout,
            "Correct guesses took {:.2} attempts on average",
            self.mean_guesses(),
        )?;

        if histogram {
            write!(stdout, "{}", self.histogram)?;
        }

        Ok(())
    }
}

impl<'a> Display for Summary<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{:-^80}", self.label)?;
        writeln!(f, "Ran {} words", self.num_tried(),)?;

        writeln!(
            f,
            "Guessed {} correctly, or {:.1}%, and {} incorrectly",
            self.num_solved(),
            self.frac_solved() * 100.,
            self.num_missed()
        )?;

        writeln!(
            f,
            "Correct guesses took {:.2} attempts on average",
            self.mean_guesses(),
        )?;

        Ok(())
    }
}

/// How many games were won in one guess, two guesses, and so on.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
pub struct Histogram {
    bins: [u32; MAX_GUESSES],
}

impl From<[u32; MAX_GUESSES]> for Histogram {
    fn from(other: [u32; MAX_GUESSES]) -> Self {
        Self { bins: other }
    }
}

impl Deref for Histogram {
    type Target = [u32; MAX_GUESSES];

    fn deref(&self) -> &Self::Target {
        &self.bins
    }
}

impl Display for Histogram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let max = self.iter().copied().max().unwrap_or(0);
        let digits =
            std::iter::successors(Some(max), |&n| (n >= 10).then(|| n / 10)).count() as u32;
        let count_per_mark = (max as f32 / (80. - digits as f32 - 6.)).max(1.0);

        for (i, &bin) in self.bins.iter().enumerate() {
            write!(f, "{} |", i + 1)?;
            let marks = (bin as f32 / count_per_mark).floor() as usize;
            writeln!(f, "{:#>marks$} ({})", "", bin)?;
        }

        Ok(())
    }
}
