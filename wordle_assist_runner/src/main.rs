use std::{error::Error, path::PathBuf, process::ExitCode, sync::Arc, time::Duration};

use clap::{Args, Parser, Subcommand};
use log::{debug, info};
use serde_json::json;
use wordle_assist::{
    rank::suggestion_table, Dictionary, GuessResult, Harness, Solver, Word, WordleError,
};

/// Recommends the next Wordle guess.
#[derive(Parser)]
#[command(name = "wordle-assist", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rank the next guess given the guesses made so far
    Suggest(Suggest),

    /// Play whole games against known answers and summarize them
    Simulate(Simulate),
}

#[derive(Args)]
struct Lists {
    /// File of possible answers, one word per line
    #[arg(short, long)]
    answers: PathBuf,

    /// File of words that are allowed as guesses; defaults to the answers
    #[arg(short, long)]
    guesses: Option<PathBuf>,
}

impl Lists {
    fn load(&self) -> wordle_assist::Result<Dictionary> {
        let guesses = self.guesses.as_ref().unwrap_or(&self.answers);
        let dict = Dictionary::from_files(&self.answers, guesses)?;
        info!(
            "loaded {} answers and {} guesses",
            dict.answers().len(),
            dict.guesses().len()
        );
        Ok(dict)
    }
}

#[derive(Args)]
struct Suggest {
    #[command(flatten)]
    lists: Lists,

    /// Graded guesses in order, like `crane:12202`; marks are 0/b (absent),
    /// 1/y (present) and 2/g (correct)
    history: Vec<GuessResult>,

    /// Only suggest words that could still be the answer
    #[arg(long)]
    hard: bool,

    /// How many suggestions to show
    #[arg(short = 'n', long, default_value_t = 10)]
    count: usize,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Stop ranking after this many milliseconds
    #[arg(long)]
    budget_ms: Option<u64>,
}

#[derive(Args)]
struct Simulate {
    #[command(flatten)]
    lists: Lists,

    /// How many random answers to play
    #[arg(short = 'n', long, default_value_t = 100, conflicts_with = "all")]
    num: usize,

    /// Play every answer
    #[arg(long)]
    all: bool,

    /// Only guess words that could still be the answer
    #[arg(long)]
    hard: bool,

    /// Always open with this word
    #[arg(long)]
    opener: Option<Word>,

    /// Show a progress bar
    #[arg(short, long)]
    verbose: bool,

    /// Print a table of every game
    #[arg(long)]
    games: bool,
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Suggest(args) => suggest(args),
        Command::Simulate(args) => simulate(args),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprint!("error: {}", e);
            let mut source = e.source();
            while let Some(cause) = source {
                eprint!(": {}", cause);
                source = cause.source();
            }
            eprintln!();
            ExitCode::FAILURE
        }
    }
}

/// Exit code when no word fits the guesses given.
const NO_CANDIDATES: u8 = 2;

fn suggest(args: Suggest) -> Result<ExitCode, WordleError> {
    let dict = args.lists.load()?;
    let mut solver = Solver::with_dictionary(Arc::new(dict));
    solver.set_hard_mode(args.hard);
    for result in args.history {
        solver.add_result(result);
    }

    let budget = args.budget_ms.map_or(Duration::MAX, Duration::from_millis);
    let ranking = solver.suggestions_within(args.count, budget);
    let remaining = solver.remaining_word_count();
    debug!(
        "scored {} of {} guesses",
        ranking.scored(),
        ranking.pool_size()
    );

    if args.json {
        let out = json!({
            "remainingCount": remaining,
            "complete": ranking.is_complete(),
            "status": solver.status(),
            "suggestions": ranking.suggestions(),
        });
        println!("{}", out);
    } else if remaining == 0 {
        eprintln!("No word fits those guesses. Check the marks for a typo.");
    } else if let [answer] = solver.remaining_words().as_slice() {
        println!("Only {} fits; guess it.", answer);
    } else {
        println!("{} words remain", remaining);
        if remaining <= 10 {
            let words: Vec<String> = solver
                .remaining_words()
                .iter()
                .map(|w| w.to_string())
                .collect();
            println!("{}", words.join(" "));
        }
        println!("{}", suggestion_table(ranking.suggestions()));
        if !ranking.is_complete() {
            println!(
                "Ran out of time after scoring {} of {} guesses; these may not be the best.",
                ranking.scored(),
                ranking.pool_size()
            );
        }
    }

    if remaining == 0 {
        Ok(ExitCode::from(NO_CANDIDATES))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn simulate(args: Simulate) -> Result<ExitCode, WordleError> {
    let dict = args.lists.load()?;
    let mut harness = Harness::new(Arc::new(dict)).hard_mode(args.hard);
    harness = if args.all {
        harness.test_all()
    } else {
        harness.test_num(args.num)
    };
    if let Some(word) = args.opener {
        harness = harness.opener(word);
    }
    if args.verbose {
        harness = harness.verbose();
    }

    let perf = harness.run_and_summarize()?;
    if args.games {
        perf.print();
    }

    Ok(ExitCode::SUCCESS)
}
