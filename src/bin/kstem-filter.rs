//! Stream driver, mirroring the reference's `kstem.c`: reads lines from
//! standard input, stems every token on the line, and writes the stems back
//! out space-separated, one line of output per line of input.

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use kstem::galago::kstem::stem;
use kstem::galago::kstem_lexicon::init_from_env;

fn main() -> ExitCode {
    if let Err(err) = run() {
        eprintln!("kstem-filter: {}", err);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    init_from_env()?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for line in stdin.lock().lines() {
        let line = line?;
        let stems: Vec<String> = line
            .split(|c: char| c == '\t' || c == '\r' || c == '\n' || c == ' ')
            .filter(|tok| !tok.is_empty())
            .map(stem)
            .collect();
        writeln!(out, "{}", stems.join(" "))?;
    }
    Ok(())
}
