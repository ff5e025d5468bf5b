use std::process::ExitStatus;

use thiserror::Error;

/// Failures raised while loading a specification file or executing a test.
///
/// Register mismatches are not in here: a discrepancy is a reported test
/// result, not an error.
#[derive(Debug, Error)]
pub enum DriverError {
    /// Malformed specification line. Fails the whole load before any test
    /// runs.
    #[error("spec line {line}: {reason}")]
    Parse { line: usize, reason: String },

    /// The spec names an oracle function that is not registered.
    #[error("unknown oracle function `{0}`")]
    UnknownOracle(String),

    /// An external tool could not be launched at all.
    #[error("could not launch `{tool}`")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    /// An external tool ran but exited with a non-zero status. Carries
    /// everything the tool printed so the caller can surface it.
    #[error("`{tool}` exited with {status}")]
    Tool {
        tool: String,
        status: ExitStatus,
        output: String,
    },

    /// A simulator output token that is not an `index:value` pair.
    #[error("malformed register token `{token}` in simulator output")]
    Format { token: String },

    /// The simulator never reported a register the oracle expects.
    #[error("register {0} missing from simulator output")]
    MissingRegister(u32),
}
