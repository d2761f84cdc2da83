/*!
 * Command-line interface for ccopier
 */

use std::io;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use log::LevelFilter;

use ccopier::actions::{CopyContext, CopyOutcome};
use ccopier::clipboard::{ClipboardSink, StdoutSink, SystemClipboard};
use ccopier::config::{Args, Config, Mode};
use ccopier::notify::ConsoleNotifier;
use ccopier::report::{CopyReport, Reporter};
use ccopier::scanner::Scanner;

fn main() -> ExitCode {
    // Parse command line arguments
    let args = Args::parse();

    if let Some(shell) = args.generate {
        clap_complete::generate(shell, &mut Args::command(), "ccopier", &mut io::stdout());
        return ExitCode::SUCCESS;
    }

    init_logger(args.verbose);

    match Config::from_args(args).and_then(|config| run(&config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// `-v` turns on debug output for this crate; RUST_LOG still wins
fn init_logger(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .parse_default_env()
        .init();
}

fn run(config: &Config) -> ccopier::Result<()> {
    config.validate()?;

    let notifier = ConsoleNotifier::new(config.quiet);
    let clipboard: Box<dyn ClipboardSink> = if config.stdout {
        Box::new(StdoutSink)
    } else {
        Box::new(SystemClipboard)
    };
    let scanner = Scanner::new(config.use_default_ignore);
    let ctx = CopyContext::new(&config.project_root, scanner, clipboard.as_ref(), &notifier)?;

    let outcome = match &config.mode {
        Mode::CopyFolders => ctx.copy_folders(&config.folders)?,
        Mode::ShowTree => {
            let tree = ctx.build_tree(&config.modules)?;
            println!("{}", tree.render());
            return Ok(());
        }
        Mode::CopySelection(query) => {
            let tree = ctx.build_tree(&config.modules)?;
            ctx.copy_tree_selection(&tree, query)?
        }
    };

    if let (true, CopyOutcome::Copied(result)) = (config.report, &outcome) {
        Reporter::new().print_report(&CopyReport::new(clipboard.describe(), result));
    }

    Ok(())
}
