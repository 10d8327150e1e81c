use anyhow::Result;
use rsed::cli::{self, Invocation, USAGE};
use rsed::config::{self, Config};
use rsed::{engine, logger, DiffFormatter, Document, OutputSink, RsedError};
use std::io::{self, IsTerminal};
use std::process::ExitCode;
use tracing::debug;

const PROG: &str = "rsed";

fn main() -> ExitCode {
    let args = cli::parse_args();

    let config = config::load_config().unwrap_or_else(|e| {
        eprintln!("Warning: {:#}; using default configuration", e);
        Config::default()
    });

    if let Err(e) = logger::init_debug_logging(logger::debug_requested(config.debug())) {
        eprintln!("Warning: {:#}", e);
    }

    match run(args.operands, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if err.downcast_ref::<RsedError>().is_some_and(RsedError::wants_usage) {
                eprintln!("{}", USAGE);
            }
            eprintln!("{}: error: {}", PROG, err);
            ExitCode::FAILURE
        }
    }
}

fn run(operands: Vec<String>, config: &Config) -> Result<()> {
    let piped = !io::stdin().is_terminal();
    let invocation = Invocation::from_operands(operands, piped)?;
    debug!(?invocation, piped, "parsed invocation");

    let document = match &invocation.file {
        Some(path) => Document::from_path(path)?,
        None => Document::from_reader(io::stdin().lock())?,
    };

    let request = invocation.into_request(document)?;
    let result = engine::execute(&request)?;

    if config.show_diff() && !result.diffs.is_empty() {
        let use_color = config.use_color(DiffFormatter::should_use_color());
        eprint!("{}", DiffFormatter::format_reports(&result.diffs, use_color));
    }

    let mut sink = OutputSink::new(io::stdout().lock(), config.print());
    sink.emit(&result.text, &request.destination)?;

    Ok(())
}
