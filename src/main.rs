use std::process::ExitCode;

use clap::Parser;
use status_check::{
    check,
    trace::{get_subscriber, init_subscriber, TraceSettings},
    RedirectPolicy, Settings, StatusFetcher,
};

/// Checks that an HTTP endpoint answers with the expected status code.
#[derive(Parser)]
#[command(name = "status-check", version, about)]
struct Args {
    /// URL to request, overrides the configured one
    url: Option<String>,
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<String>,
    /// Expected status code
    #[arg(short, long)]
    expect: Option<u16>,
    /// Report redirect responses instead of following them
    #[arg(long)]
    no_follow: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let settings = match Settings::load(args.config.as_deref()) {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("failed to load configuration: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let (writer, _guard) = tracing_appender::non_blocking(std::io::stderr());
    init_subscriber(get_subscriber(TraceSettings {
        level: settings.log.level,
        writer,
    }));

    let url = args.url.unwrap_or(settings.url);
    let expected = args.expect.unwrap_or(settings.expected_status);
    let redirect = if args.no_follow {
        RedirectPolicy::Manual
    } else {
        settings.redirect.policy()
    };

    let outcome = check::run(&StatusFetcher::new(redirect), &url, expected).await;
    outcome.report();
    ExitCode::from(outcome.exit_code())
}
