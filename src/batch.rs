//! Command-file and interactive drivers for a [`Session`].
//!
//! Command files hold one command per line. Blank lines and lines starting
//! with `//` are echoed but not executed. Failures are printed as
//! `Error: <message>` and the run continues with the next line.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use crate::command::Session;
use crate::error::Result;

const PROMPT: &str = "Enter command: ";
const STOP: &str = "stop";

/// Echoes and executes every line of `reader`.
pub fn run<R: BufRead, W: Write>(
    session: &mut Session,
    reader: R,
    out: &mut W,
) -> std::io::Result<()> {
    for line in reader.lines() {
        let line = line?;
        writeln!(out, "{line}")?;
        if is_command(&line) {
            write_outcome(out, session.run_line(&line))?;
        }
    }
    Ok(())
}

/// Runs the command file at `path`.
pub fn run_file<W: Write>(session: &mut Session, path: &Path, out: &mut W) -> std::io::Result<()> {
    let file = File::open(path)?;
    run(session, BufReader::new(file), out)
}

/// Prompts for commands until `stop` or end of input.
pub fn interactive<R: BufRead, W: Write>(
    session: &mut Session,
    mut reader: R,
    out: &mut W,
) -> std::io::Result<()> {
    loop {
        write!(out, "{PROMPT}")?;
        out.flush()?;

        let mut input = String::new();
        if reader.read_line(&mut input)? == 0 {
            return Ok(());
        }

        let input = input.trim();
        if input.eq_ignore_ascii_case(STOP) {
            return Ok(());
        }
        if input.is_empty() {
            writeln!(out, "Error: Please provide a command")?;
            continue;
        }
        write_outcome(out, session.run_line(input))?;
    }
}

fn is_command(line: &str) -> bool {
    let line = line.trim();
    !line.is_empty() && !line.starts_with("//")
}

fn write_outcome<W: Write>(out: &mut W, outcome: Result<String>) -> std::io::Result<()> {
    match outcome {
        Ok(text) => write!(out, "{text}"),
        Err(err) => writeln!(out, "Error: {err}"),
    }
}
