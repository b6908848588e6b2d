//! Batch driver, mirroring the reference's `kstem-file.c`: stems every
//! whitespace-separated token in a file, one stem per output line.

use std::fs;
use std::process::ExitCode;

use kstem::galago::kstem::stem;
use kstem::galago::kstem_lexicon::init_from_env;

fn main() -> ExitCode {
    if let Err(err) = run() {
        eprintln!("kstem-batch: {}", err);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    init_from_env()?;

    let path = std::env::args()
        .nth(1)
        .ok_or("usage: kstem-batch <input-file>")?;
    let contents = fs::read_to_string(&path)?;

    use std::io::Write;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for token in contents.split_whitespace() {
        writeln!(out, "{}", stem(token))?;
    }
    Ok(())
}
