use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Spotify credentials are not blank and the call timeout is positive
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if let Some(spotify) = &config.spotify {
        if spotify.client_id.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "spotify.client_id cannot be empty".to_string(),
            ));
        }
        if spotify.client_secret.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "spotify.client_secret cannot be empty".to_string(),
            ));
        }
        if spotify.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "spotify.timeout_secs must be greater than 0".to_string(),
            ));
        }
    }

    Ok(())
}
