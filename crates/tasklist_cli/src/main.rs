use clap::Parser;
use std::io::{self, IsTerminal};
use tasklist_cli::cli::{Cli, collect_config_overrides, init_tracing, normalize_parse_error};
use tasklist_cli::session::Session;
use tasklist_core::config::{load_config_with_fallback, merge_overrides};
use tasklist_core::error::AppError;
use tasklist_core::state::TaskListState;
use tasklist_core::storage::JsonFileStore;
use tracing::{info, warn};

fn run(cli: Cli) -> Result<(), AppError> {
    init_tracing(cli.verbose, cli.quiet)?;

    let loaded = load_config_with_fallback();
    if let Some(err) = loaded.error.as_ref() {
        warn!(error = %err, "using default configuration");
    }
    let overrides = collect_config_overrides(&cli.config_override)?;
    let config = merge_overrides(&loaded.config, &overrides);

    let store = JsonFileStore::from_env()?;
    info!(store = %store.path().display(), "opening task list");
    let mut session = Session::new(TaskListState::hydrate(store), config);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.command {
        Some(command) => session.execute(command, cli.json, &mut out),
        None => {
            let stdin = io::stdin();
            let show_prompt = stdin.is_terminal();
            session.run_interactive(stdin.lock(), &mut out, &mut io::stderr(), show_prompt)
        }
    }
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if !err.use_stderr() => {
            // --help and --version
            let _ = err.print();
            return;
        }
        Err(err) => {
            eprintln!("ERROR: {}", normalize_parse_error(err));
            std::process::exit(1);
        }
    };

    if let Err(err) = run(cli) {
        eprintln!("ERROR: {}", err);
        std::process::exit(1);
    }
}
