//! Interactive driver, mirroring the reference's `test-kstem.c`: prompts
//! for a word, prints its stem, and exits on an empty line.

use std::io::{self, Write};
use std::process::ExitCode;

use kstem::galago::kstem::stem;
use kstem::galago::kstem_lexicon::init_from_env;

fn main() -> ExitCode {
    if let Err(err) = run() {
        eprintln!("kstem-interactive: {}", err);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    init_from_env()?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    loop {
        write!(out, "Please enter a word (<CR> to quit): ")?;
        out.flush()?;

        let mut line = String::new();
        let n = stdin.read_line(&mut line)?;
        if n == 0 || line.trim().is_empty() {
            break;
        }
        writeln!(out, "\nThe stem was: {}", stem(line.trim()))?;
    }
    Ok(())
}
