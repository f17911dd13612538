#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]

use std::{
    env::args,
    io::{self, Write, stderr, stdout},
    process::ExitCode,
};

use hotseat::{fuzz::fuzz, repl::repl};
use rand::{SeedableRng, rngs::SmallRng};

const DEFAULT_FUZZ_GAMES: usize = 100;

fn run_fuzz(games: Option<&str>) -> io::Result<ExitCode> {
    let mut output = stdout().lock();
    let mut error = stderr().lock();
    let games = match games.map(str::parse::<usize>).transpose() {
        Ok(games) => games.unwrap_or(DEFAULT_FUZZ_GAMES),
        Err(err) => {
            writeln!(error, "Error: {err}")?;
            return Ok(ExitCode::FAILURE);
        }
    };
    match fuzz(games, &mut SmallRng::from_os_rng()) {
        Ok(()) => {
            writeln!(output, "{games} games agree with the reference")?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            writeln!(error, "Error: {err}")?;
            Ok(ExitCode::FAILURE)
        }
    }
}
fn main() -> io::Result<ExitCode> {
    let args: Vec<String> = args().skip(1).collect();
    match args.first().map(String::as_str) {
        None => {
            repl()?;
            Ok(ExitCode::SUCCESS)
        }
        Some("fuzz") => run_fuzz(args.get(1).map(String::as_str)),
        Some(command) => {
            writeln!(stderr(), "Error: unknown command `{command}`")?;
            writeln!(stderr(), "usage: hotseat [fuzz [games]]")?;
            Ok(ExitCode::FAILURE)
        }
    }
}
