use crate::domain::tts::DEFAULT_LANGUAGE;
use crate::infrastructure::repositories::translate_tts_provider::DEFAULT_ENDPOINT;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    // TTS cache
    pub tts_cache_dir: PathBuf,
    pub tts_scratch_dir: PathBuf,
    pub tts_memory_cache_entries: u64,
    // Synthesis provider
    pub tts_default_language: String,
    pub tts_provider_url: String,
    pub tts_provider_timeout_secs: u64,
    // Temp file janitor
    pub temp_file_max_age_secs: u64,
    pub temp_cleanup_interval_secs: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let tts_cache_dir =
            PathBuf::from(env::var("TTS_CACHE_DIR").unwrap_or_else(|_| "./tts_cache".to_string()));
        let tts_scratch_dir = env::var("TTS_SCRATCH_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| tts_cache_dir.clone());

        let config = Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            environment: match env::var("ENVIRONMENT").as_deref() {
                Ok("production") => Environment::Production,
                _ => Environment::Development,
            },
            log_format: match env::var("LOG_FORMAT").as_deref() {
                Ok("json") => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            tts_cache_dir,
            tts_scratch_dir,
            tts_memory_cache_entries: env::var("TTS_MEMORY_CACHE_ENTRIES")
                .unwrap_or_else(|_| "256".to_string())
                .parse()?,
            tts_default_language: env::var("TTS_DEFAULT_LANGUAGE")
                .ok()
                .map(|code| code.trim().to_string())
                .filter(|code| !code.is_empty())
                .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            tts_provider_url: env::var("TTS_PROVIDER_URL")
                .unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string()),
            tts_provider_timeout_secs: env::var("TTS_PROVIDER_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()?,
            temp_file_max_age_secs: env::var("TEMP_FILE_MAX_AGE_SECS")
                .unwrap_or_else(|_| "3600".to_string())
                .parse()?,
            temp_cleanup_interval_secs: env::var("TEMP_CLEANUP_INTERVAL_SECS")
                .unwrap_or_else(|_| "600".to_string())
                .parse()?,
        };

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    pub fn provider_timeout(&self) -> Duration {
        Duration::from_secs(self.tts_provider_timeout_secs)
    }

    pub fn temp_file_max_age(&self) -> Duration {
        Duration::from_secs(self.temp_file_max_age_secs)
    }

    pub fn temp_cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.temp_cleanup_interval_secs)
    }
}
