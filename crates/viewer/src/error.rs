//! Structured viewer errors with meaningful exit codes.
//!
//! Exit code scheme:
//! - 0:  success
//! - 1:  window, GL context, or capability probe failure
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 10: shader init error (source read, compile, link)
//! - 11: I/O error (lookup-table dump)
//! - 12: input error (bad octave count, bad dump path)
//! - 13: texture upload error

use noisebed_core::render::{ContextError, ShaderError, TextureError};
use std::fmt;

/// Errors produced by viewer operations, each mapped to a distinct exit code.
pub enum CliError {
    /// The window could not be opened, or the driver failed the probe.
    Context(String),
    /// Shader source read, compile, or link failed.
    Shader(ShaderError),
    /// An I/O failure while writing output files.
    Io(String),
    /// A user input error.
    Input(String),
    /// A texture could not be validated or uploaded.
    Texture(TextureError),
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Context(_) => 1,
            CliError::Shader(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Texture(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Context(msg) => write!(f, "{msg}"),
            CliError::Shader(e) => write!(f, "{e}"),
            CliError::Io(msg) => write!(f, "{msg}"),
            CliError::Input(msg) => write!(f, "{msg}"),
            CliError::Texture(e) => write!(f, "{e}"),
        }
    }
}

impl From<ShaderError> for CliError {
    fn from(e: ShaderError) -> Self {
        CliError::Shader(e)
    }
}

impl From<TextureError> for CliError {
    fn from(e: TextureError) -> Self {
        CliError::Texture(e)
    }
}

impl From<ContextError> for CliError {
    fn from(e: ContextError) -> Self {
        CliError::Context(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_error_exit_code_is_1() {
        let err = CliError::Context("no window".into());
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn shader_error_exit_code_is_10() {
        let err = CliError::Shader(ShaderError::Link("mismatch".into()));
        assert_eq!(err.exit_code(), 10);
    }

    #[test]
    fn io_error_exit_code_is_11() {
        let err = CliError::Io("write failed".into());
        assert_eq!(err.exit_code(), 11);
    }

    #[test]
    fn input_error_exit_code_is_12() {
        let err = CliError::Input("bad octave count".into());
        assert_eq!(err.exit_code(), 12);
    }

    #[test]
    fn texture_error_exit_code_is_13() {
        let err = CliError::Texture(TextureError::DiffuseSize {
            expected: 10,
            got: 2,
        });
        assert_eq!(err.exit_code(), 13);
    }

    #[test]
    fn from_shader_error_preserves_the_driver_log() {
        let cli_err = CliError::from(ShaderError::Link("varying mismatch".into()));
        assert_eq!(cli_err.exit_code(), 10);
        assert!(cli_err.to_string().contains("varying mismatch"));
    }

    #[test]
    fn from_context_error_maps_to_exit_1() {
        let cli_err = CliError::from(ContextError::UnsupportedVersion {
            got_major: 2,
            got_minor: 1,
        });
        assert_eq!(cli_err.exit_code(), 1);
        assert!(cli_err.to_string().contains("2.1"));
    }
}
