// Binary entry point for the terminal chat window.
use anyhow::Result;
use lict::cli::{self, Args};

fn main() -> Result<()> {
    let args = Args::parse(std::env::args().skip(1));
    if args.help {
        cli::print_help("lict-tui");
        return Ok(());
    }
    lict::tui::run(args.root)
}
