use std::process::ExitStatus;

/// Everything that can go wrong during one invocation. All of these are
/// terminal: the only mutating step is the final scale-apply command, so
/// there is never partial progress to roll back.
#[derive(Debug, thiserror::Error)]
pub(crate) enum Error {
    #[error("failed to run niri: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("niri failed: {0}")]
    ExternalToolFailure(ExitStatus),

    #[error("no output from niri")]
    EmptyResponse,

    #[error("could not parse niri response: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    #[error("No focused output!")]
    NoFocusedOutput,

    #[error("Could not find an output named {0}")]
    UnknownOutput(String),

    #[error("output {0} is disabled and has no scale to cycle")]
    OutputDisabled(String),
}
