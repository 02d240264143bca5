//! Exit code standardization for metalctl
//!
//! Provides consistent exit codes for different error types to enable
//! reliable programmatic error detection by scripts and CI jobs.
//!
//! ## Exit Code Convention
//!
//! - `0` = Success (a completed run, regardless of individual device outcomes)
//! - `1` = User error (unknown project name, invalid input)
//! - `2` = System error (transport fault, provider API failure)
//! - `3` = Configuration error (missing token, config parse error)

use crate::error::{ConfigError, MetalctlError};

/// Standard exit codes for metalctl
pub mod codes {
    /// Success
    #[allow(dead_code)]
    pub const SUCCESS: i32 = 0;
    /// User error (unknown project, invalid input)
    pub const USER_ERROR: i32 = 1;
    /// System error (transport fault, API failure)
    pub const SYSTEM_ERROR: i32 = 2;
    /// Configuration error (missing token, config parse error)
    pub const CONFIG_ERROR: i32 = 3;
}

/// Map a MetalctlError to an appropriate exit code
///
/// An unknown project name is a user mistake rather than a broken setup, so
/// it maps to `USER_ERROR`; every other configuration problem maps to
/// `CONFIG_ERROR`.
pub fn exit_code_for_error(error: &MetalctlError) -> i32 {
    use MetalctlError::*;
    match error {
        Config(ConfigError::UnknownProject(_)) => codes::USER_ERROR,
        Config(_) => codes::CONFIG_ERROR,

        Transport { .. } => codes::SYSTEM_ERROR,
        Api { .. } => codes::SYSTEM_ERROR,
        Io(_) => codes::SYSTEM_ERROR,
        Json(_) => codes::SYSTEM_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_project_is_user_error() {
        let err = MetalctlError::Config(ConfigError::UnknownProject("staging".to_string()));
        assert_eq!(exit_code_for_error(&err), codes::USER_ERROR);
    }

    #[test]
    fn test_missing_token_is_config_error() {
        let err = MetalctlError::Config(ConfigError::MissingToken);
        assert_eq!(exit_code_for_error(&err), codes::CONFIG_ERROR);
    }

    #[test]
    fn test_api_failure_is_system_error() {
        let err = MetalctlError::Api {
            operation: "list devices".to_string(),
            status: 500,
            body: "internal error".to_string(),
        };
        assert_eq!(exit_code_for_error(&err), codes::SYSTEM_ERROR);
    }
}
