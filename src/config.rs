//! Process configuration, read once at startup.

use std::path::PathBuf;

use secrecy::SecretString;

use crate::error::ConfigError;

/// Environment variable holding the Telegram bot token.
pub const TOKEN_VAR: &str = "TOKEN";
/// Environment variable holding the liveness port.
pub const PORT_VAR: &str = "PORT";
/// Environment variable overriding the asset directory.
pub const PAGES_DIR_VAR: &str = "QURAN_PAGES_DIR";
/// Set to `1`/`true` to chat over stdin/stdout instead of Telegram.
pub const CONSOLE_VAR: &str = "BOT_CONSOLE";

pub const DEFAULT_PORT: u16 = 10000;
pub const DEFAULT_PAGES_DIR: &str = "pages";

/// Where messages come from.
#[derive(Debug, Clone)]
pub enum Transport {
    /// Telegram Bot API with this token. The token is never logged.
    Telegram { token: SecretString },
    /// Local stdin/stdout REPL.
    Console,
}

/// Bot configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub transport: Transport,
    /// Port for the liveness sidecar.
    pub port: u16,
    /// Directory holding `{page}.jpg` and `{page}.ogg` files.
    pub pages_dir: PathBuf,
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// The token is required unless console mode is on.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let console = lookup(CONSOLE_VAR)
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let transport = if console {
            Transport::Console
        } else {
            let token = lookup(TOKEN_VAR)
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .ok_or_else(|| ConfigError::MissingEnvVar(TOKEN_VAR.to_string()))?;
            Transport::Telegram {
                token: SecretString::from(token),
            }
        };

        let port = match lookup(PORT_VAR) {
            Some(raw) if !raw.trim().is_empty() => {
                raw.trim()
                    .parse::<u16>()
                    .map_err(|e| ConfigError::InvalidValue {
                        key: PORT_VAR.to_string(),
                        message: format!("{raw:?} is not a valid port: {e}"),
                    })?
            }
            _ => DEFAULT_PORT,
        };

        let pages_dir = lookup(PAGES_DIR_VAR)
            .filter(|d| !d.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PAGES_DIR));

        Ok(Self {
            transport,
            port,
            pages_dir,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use secrecy::ExposeSecret;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn missing_token_is_fatal() {
        let err = Config::from_lookup(lookup_from(&[(PORT_VAR, "8080")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(ref k) if k == TOKEN_VAR));
    }

    #[test]
    fn blank_token_is_missing() {
        let err = Config::from_lookup(lookup_from(&[(TOKEN_VAR, "   ")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(_)));
    }

    #[test]
    fn defaults_applied() {
        let config = Config::from_lookup(lookup_from(&[(TOKEN_VAR, "123:ABC")])).unwrap();
        match config.transport {
            Transport::Telegram { ref token } => assert_eq!(token.expose_secret(), "123:ABC"),
            Transport::Console => panic!("Expected Telegram transport"),
        }
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.pages_dir, PathBuf::from(DEFAULT_PAGES_DIR));
    }

    #[test]
    fn explicit_values_used() {
        let config = Config::from_lookup(lookup_from(&[
            (TOKEN_VAR, "t"),
            (PORT_VAR, " 8443 "),
            (PAGES_DIR_VAR, "/srv/mushaf"),
        ]))
        .unwrap();
        assert_eq!(config.port, 8443);
        assert_eq!(config.pages_dir, PathBuf::from("/srv/mushaf"));
    }

    #[test]
    fn invalid_port_rejected() {
        let err =
            Config::from_lookup(lookup_from(&[(TOKEN_VAR, "t"), (PORT_VAR, "ten")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == PORT_VAR));

        let err =
            Config::from_lookup(lookup_from(&[(TOKEN_VAR, "t"), (PORT_VAR, "70000")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn console_mode_needs_no_token() {
        let config = Config::from_lookup(lookup_from(&[(CONSOLE_VAR, "true")])).unwrap();
        assert!(matches!(config.transport, Transport::Console));
    }

    #[test]
    fn console_flag_off_still_requires_token() {
        let err = Config::from_lookup(lookup_from(&[(CONSOLE_VAR, "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(_)));
    }

    #[test]
    fn token_not_in_debug_output() {
        let config = Config::from_lookup(lookup_from(&[(TOKEN_VAR, "secret-token")])).unwrap();
        assert!(!format!("{config:?}").contains("secret-token"));
    }
}
