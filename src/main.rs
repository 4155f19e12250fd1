use std::process;

use clap::Parser;
use tracenav::config::{ViewerConfig, set_config_path};
use tracenav::styling::{eprintln, format_error, format_hint};

mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::CommandError;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Some(path) = cli.config {
        set_config_path(path);
    }

    if let Err(e) = run(cli.command) {
        eprintln!("{}", format_error(&format!("{e:#}")));
        if let Some(CommandError::EmptyTrace { .. }) = e.downcast_ref() {
            eprintln!(
                "{}",
                format_hint(
                    r#"Records look like: I0101 00:00:00.000000 1file.py:10] {"eager_dispatch": {...}}"#
                )
            );
        }
        process::exit(1);
    }
}

/// `RUST_LOG` takes precedence; `-v`/`-vv` only change the default filter.
fn init_logging(verbose: u8) {
    let default_filter = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn run(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Summary { file } => commands::handle_summary(&file),
        Commands::Show { file, entry, zoom } => {
            let config = ViewerConfig::load()?;
            commands::handle_show(&file, entry, zoom, &config)
        }
        Commands::Step { file, entry } => {
            let config = ViewerConfig::load()?;
            commands::handle_step(&file, entry, &config)
        }
        Commands::Dump { file } => commands::handle_dump(&file),
    }
}
