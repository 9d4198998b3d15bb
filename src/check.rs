use std::{
    error::Error as StdError,
    fmt::{self, Write},
};

use crate::status_fetcher::{StatusFetcher, TransportError};

/// Result of checking one endpoint against an expected status.
#[derive(Debug)]
pub enum Outcome {
    Pass,
    Mismatch { expected: u16, actual: u16 },
    Failed { url: String, error: TransportError },
}

impl Outcome {
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    pub fn exit_code(&self) -> u8 {
        if self.is_pass() {
            0
        } else {
            1
        }
    }

    /// Prints `PASS` on stdout, anything else on stderr.
    pub fn report(&self) {
        if self.is_pass() {
            println!("{}", self);
        } else {
            eprintln!("{}", self);
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => write!(f, "PASS"),
            Self::Mismatch { expected, actual } => {
                write!(f, "Expected {}, got {}", expected, actual)
            }
            Self::Failed { url, error } => {
                write!(f, "Request to {} failed: {}", url, error_chain_msg(error)?)
            }
        }
    }
}

#[tracing::instrument(level = "info", name = "check endpoint status", skip(fetcher))]
pub async fn run(fetcher: &StatusFetcher, url: &str, expected: u16) -> Outcome {
    match fetcher.get_status(url).await {
        Ok(actual) if actual == expected => Outcome::Pass,
        Ok(actual) => {
            tracing::warn!("unexpected status: expected {}, got {}", expected, actual);
            Outcome::Mismatch { expected, actual }
        }
        Err(error) => Outcome::Failed {
            url: url.to_string(),
            error,
        },
    }
}

fn error_chain_msg(err: &impl StdError) -> Result<String, fmt::Error> {
    let mut msg = String::new();
    write!(msg, "{}", err)?;
    let mut current = err.source();
    while let Some(source) = current {
        let source_msg = source.to_string();
        if !msg.contains(&source_msg) {
            write!(msg, "\ncaused by:\n\t{}", source_msg)?;
        }
        current = source.source();
    }
    Ok(msg)
}
