//! envsubst -- substitute environment variables into files.
//!
//! Usage: envsubst [OPTIONS] [GLOB]...

use std::collections::HashMap;

use clap::Parser;

use envsubst::cli::Cli;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never mix with the report on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Cli::parse().into_config();
    // Variables whose name or value is not valid UTF-8 cannot appear in text.
    let variables: HashMap<String, String> = std::env::vars_os()
        .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
        .collect();

    let report = envsubst::run::run(&config, &variables)?;
    if config.json {
        eprint!("{}", envsubst::run::render_diffs(&report));
    }
    println!("{}", envsubst::run::render(&report, &config)?);

    Ok(())
}
