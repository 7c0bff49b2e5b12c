use clap::Parser;
use papyrus_cli::{args::PapyrusArgs, config::Config, Papyrus};
use std::path::Path;
use std::process::exit;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = PapyrusArgs::parse();
    setup_logging(cli.log_spans, cli.verbose);

    let config = Config::discover(Path::new("papyrus.toml")).unwrap_or_else(|error| {
        tracing::warn!(error = %error, "failed to load papyrus.toml, using defaults");
        Config::default()
    });

    match Papyrus::new(config).execute(cli) {
        Ok(()) => exit(0),
        Err(error) => {
            tracing::error!(error = %format!("{error:#}"), "operation failed");
            exit(1);
        }
    }
}

fn setup_logging(log_spans: bool, verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "debug" } else { "info" })
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr));

    if log_spans {
        builder
            .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
            .init();
    } else {
        builder.init();
    }
}
