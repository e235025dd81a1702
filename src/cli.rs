// File: ./src/cli.rs
//! Shared command-line interface logic: help text, flags and log setup.
use crate::Lict;
use crate::context::AppContext;
use anyhow::{Context, Result};
use simplelog::{Config as LogConfig, WriteLogger};
use std::fs::OpenOptions;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Flags understood by both binaries.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Args {
    pub root: Option<PathBuf>,
    pub help: bool,
}

impl Args {
    /// Parses everything after the program name. Unknown flags are ignored.
    pub fn parse<I: IntoIterator<Item = String>>(args: I) -> Self {
        let mut parsed = Args::default();
        let mut iter = args.into_iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--help" | "-h" | "help" => parsed.help = true,
                "--root" | "-r" => parsed.root = iter.next().map(PathBuf::from),
                _ => {}
            }
        }
        parsed
    }
}

/// Sends `log` output to `<cache_dir>/lict.log` so it never mixes with replies.
pub fn init_logging(ctx: &dyn AppContext, level: log::LevelFilter) -> Result<()> {
    let path = ctx.get_log_file_path()?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;
    WriteLogger::init(level, LogConfig::default(), file)
        .map_err(|e| anyhow::anyhow!("Failed to initialise logging: {}", e))?;
    Ok(())
}

pub fn print_help(binary_name: &str) {
    let is_tui = binary_name.contains("tui");

    println!(
        "Lict v{} - A small task tracker you talk to ({})",
        env!("CARGO_PKG_VERSION"),
        if is_tui { "TUI" } else { "CLI" }
    );
    println!();
    println!("USAGE:");
    println!("    {} [--root <path>]", binary_name);
    println!("    {} --help", binary_name);
    println!();
    println!("OPTIONS:");
    println!("    -r, --root <path>     Use a different directory for config and data.");
    println!("    -h, --help            Show this help message.");
    println!();
    println!("COMMANDS:");
    println!("    todo <description>                           Add a todo");
    println!("    deadline <description> /by <date>            Add a task with a due date");
    println!("    event <description> /from <date> /to <date>  Add an event");
    println!("    list                                         Show every task");
    println!("    mark <n> / unmark <n>                        Set or clear the done flag");
    println!("    delete <n>                                   Remove task n");
    println!("    find <text>                                  Tasks whose description contains text");
    println!("    snooze <n> [<date> | <amount>]               Push a deadline or event later");
    println!("    hello                                        Say hello");
    println!("    bye                                          Quit");
    println!();
    println!("DATES:");
    println!("    2024-01-31, 2024-01-31 18:00, 2024-01-31 1800, 31/1/2024, 31/1/2024 1800");
    println!("    Snooze amounts: 30m, 2h, 3d, 1w (a bare `snooze <n>` uses the config default)");
    if is_tui {
        println!();
        println!("KEYS:");
        println!("    Enter: Send   Esc: Quit   PgUp/PgDn: Scroll");
    }
}

/// Feeds `input` to `lict` line by line until `bye` or end of input.
///
/// Bytes that are not valid UTF-8 are replaced rather than ending the session.
pub fn run_repl(lict: &mut Lict, mut input: impl BufRead, mut out: impl Write) -> io::Result<()> {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(());
        }
        let line = String::from_utf8_lossy(&buf);
        let response = lict.get_response(line.trim_end_matches(['\n', '\r']));
        writeln!(out, "{}", response.text)?;
        out.flush()?;
        if response.is_exit {
            return Ok(());
        }
    }
}
