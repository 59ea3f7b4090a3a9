use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;
use url::Url;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub openrouter_api_base: String,
    pub openrouter_api_key: String,
    pub openrouter_model: String,
    pub google_api_key: String,
    pub google_speech_api_base: String,
    pub allowed_origins: Vec<String>,
    pub max_audio_bytes: usize,
    pub http_timeout_secs: u64,
    pub max_concurrent_requests: usize,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let config = Self {
            server_address: get_env_or("SERVER_ADDRESS", "0.0.0.0:8000"),
            openrouter_api_base: get_env_or("OPENROUTER_API_BASE", "https://openrouter.ai/api/v1"),
            openrouter_api_key: get_env_or("OPENROUTER_API_KEY", ""),
            openrouter_model: get_env_or("OPENROUTER_MODEL", "openai/gpt-4"),
            google_api_key: get_env_or("GOOGLE_API_KEY", ""),
            google_speech_api_base: get_env_or(
                "GOOGLE_SPEECH_API_BASE",
                "https://speech.googleapis.com/v1",
            ),
            allowed_origins: parse_origins(&get_env_or("ALLOWED_ORIGINS", "http://localhost:3000")),
            max_audio_bytes: get_env_parse_or("MAX_AUDIO_BYTES", 10 * 1024 * 1024)?,
            http_timeout_secs: get_env_parse_or("HTTP_TIMEOUT_SECS", 60)?,
            max_concurrent_requests: get_env_parse_or("MAX_CONCURRENT_REQUESTS", 256)?,
        };
        config.check()?;
        Ok(config)
    }

    /// Rejects values that would only fail later, at request time.
    pub fn check(&self) -> Result<()> {
        for (name, value) in [
            ("OPENROUTER_API_BASE", &self.openrouter_api_base),
            ("GOOGLE_SPEECH_API_BASE", &self.google_speech_api_base),
        ] {
            Url::parse(value)
                .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e)))?;
        }
        if self.max_audio_bytes == 0 {
            return Err(Error::Config("MAX_AUDIO_BYTES must be positive".to_string()));
        }
        if self.max_concurrent_requests == 0 {
            return Err(Error::Config(
                "MAX_CONCURRENT_REQUESTS must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_address: "0.0.0.0:8000".to_string(),
            openrouter_api_base: "https://openrouter.ai/api/v1".to_string(),
            openrouter_api_key: String::new(),
            openrouter_model: "openai/gpt-4".to_string(),
            google_api_key: String::new(),
            google_speech_api_base: "https://speech.googleapis.com/v1".to_string(),
            allowed_origins: vec!["http://localhost:3000".to_string()],
            max_audio_bytes: 10 * 1024 * 1024,
            http_timeout_secs: 60,
            max_concurrent_requests: 256,
        }
    }
}

fn get_env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origins_are_split_and_trimmed() {
        let origins = parse_origins("http://localhost:3000, https://app.example.com ,,");
        assert_eq!(
            origins,
            vec!["http://localhost:3000", "https://app.example.com"]
        );
    }

    #[test]
    fn default_config_passes_check() {
        assert!(Config::default().check().is_ok());
    }

    #[test]
    fn bad_base_url_is_rejected() {
        let config = Config {
            openrouter_api_base: "not a url".to_string(),
            ..Config::default()
        };
        assert!(matches!(config.check(), Err(Error::Config(_))));
    }
}
