// Binary entry point for the line-based front-end.
use anyhow::Result;
use lict::Lict;
use lict::cli::{self, Args};
use lict::config::Config;
use lict::context::StandardContext;
use std::io::{self, Write};

fn main() -> Result<()> {
    let args = Args::parse(std::env::args().skip(1));
    if args.help {
        cli::print_help("lict");
        return Ok(());
    }

    let ctx = StandardContext::new(args.root);
    let config = Config::load_or_init(&ctx)?;
    if let Err(e) = cli::init_logging(&ctx, config.log_level_filter()) {
        eprintln!("Warning: {}", e);
    }

    let mut lict = Lict::from_context(&ctx, &config)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", lict.greeting())?;
    if let Some(warning) = lict.load_warning() {
        writeln!(out, "{}", warning)?;
    }

    cli::run_repl(&mut lict, io::stdin().lock(), &mut out)?;

    log::info!("Session ended with {} tasks", lict.tasks().len());
    Ok(())
}
