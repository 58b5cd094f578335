use clap::Parser;
use mgen::{Cli, MgenConfig};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let root = std::env::current_dir().unwrap_or_else(|_| ".".into());
    let config = match MgenConfig::load(&root, cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    // Logs go to stderr so generated code on stdout stays clean.
    let filter = EnvFilter::try_from_env("MGEN_LOG")
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level(&config)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // stderr stays unlocked: generator threads log to it while we run.
    let stdout = std::io::stdout();
    match mgen::run(&cli, &config, &mut stdout.lock(), &mut std::io::stderr()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
