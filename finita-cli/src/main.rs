//! Command line front end: reads an automaton description in the
//! line-oriented interchange format and runs, traces, renders or
//! determinizes it.

use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::debug;

use finita::Automaton;

mod dot;
mod format;

#[derive(Parser, Debug)]
#[command(name = "finita", about = "Simulate and determinize finite automata")]
struct Cli {
    /// Automaton description file; reads stdin when omitted.
    #[arg(short, long, value_name = "FILE", global = true)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every state visited while consuming the symbols, starting at
    /// the initial state; stops at the first symbol with no matching edge.
    Trace { symbols: Vec<String> },

    /// Print the state reached after consuming all symbols; prints nothing
    /// when the walk dies.
    Run { symbols: Vec<String> },

    /// Print `accept` or `reject`; the exit status is 0 or 1 accordingly.
    Accept { symbols: Vec<String> },

    /// Render the automaton as a DOT digraph.
    Dot,

    /// Convert to a deterministic automaton via subset construction and
    /// print it in the interchange format.
    Determinize {
        /// Separator joining source state names into subset state labels.
        #[arg(short, long, default_value = ",")]
        separator: String,
    },
}

fn read_description(file: Option<&PathBuf>) -> Result<String> {
    match file {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
        }
        None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("reading stdin")?;
            Ok(input)
        }
    }
}

fn trace(automaton: &Automaton<String, String>, symbols: &[String]) {
    let mut current = automaton.initial_state();
    println!("{current}");
    for symbol in symbols {
        match automaton.transition(current, std::slice::from_ref(symbol)) {
            Some(next) => {
                current = next;
                println!("{current}");
            }
            None => break,
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let input = read_description(cli.file.as_ref())?;
    let automaton = format::parse(&input)?;
    debug!(
        "loaded automaton with {} states over {} symbols",
        automaton.states().len(),
        automaton.symbols().len()
    );

    match &cli.command {
        Command::Trace { symbols } => trace(&automaton, symbols),
        Command::Run { symbols } => {
            if let Some(state) = automaton.transition(automaton.initial_state(), symbols) {
                println!("{state}");
            }
        }
        Command::Accept { symbols } => {
            if automaton.accept(symbols) {
                println!("accept");
            } else {
                println!("reject");
                return Ok(ExitCode::from(1));
            }
        }
        Command::Dot => println!("{}", dot::render(&automaton)),
        Command::Determinize { separator } => {
            let dfa = automaton.determinize_joined(separator);
            print!("{}", format::write(&dfa));
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    env_logger::init();
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(1)
        }
    }
}
