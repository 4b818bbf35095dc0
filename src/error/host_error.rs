use thiserror::Error;

/// Failures of the environment the interpreter runs in.
///
/// Script mistakes are diagnostics. A `HostError` means the pipeline itself
/// could not continue.
#[derive(Debug, Error)]
pub enum HostError {
    /// Writing program output failed.
    #[error("failed to write program output: {0}")]
    Output(#[from] std::io::Error),
}
