use std::env;
use std::str::FromStr;

use thiserror::Error;

pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {0} not set")]
    Missing(&'static str),
    #[error("environment variable {0} is empty")]
    Empty(&'static str),
    #[error("environment variable {key} has invalid value {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Process configuration. Read once at startup and never changed afterwards.
#[derive(Clone)]
pub struct EnvConfig {
    pub port: u16,
    pub db_url: String,
    pub jwt_secret: String,
    pub max_upload_bytes: usize,
    pub ocr: OcrConfig,
}

// secrets stay out of logs
impl std::fmt::Debug for EnvConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvConfig")
            .field("port", &self.port)
            .field("db_url", &"<redacted>")
            .field("jwt_secret", &"<redacted>")
            .field("max_upload_bytes", &self.max_upload_bytes)
            .field("ocr", &self.ocr)
            .finish()
    }
}

#[derive(Clone, Debug)]
pub struct OcrConfig {
    pub tesseract_cmd: String,
    pub pdftotext_cmd: String,
    pub pdftoppm_cmd: String,
    pub lang: String,
    pub dpi: u32,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            tesseract_cmd: "tesseract".to_string(),
            pdftotext_cmd: "pdftotext".to_string(),
            pdftoppm_cmd: "pdftoppm".to_string(),
            lang: "eng".to_string(),
            dpi: 300,
        }
    }
}

impl EnvConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| -> Result<String, ConfigError> {
            match lookup(key) {
                None => Err(ConfigError::Missing(key)),
                Some(v) if v.trim().is_empty() => Err(ConfigError::Empty(key)),
                Some(v) => Ok(v),
            }
        };
        let or_default = |key: &'static str, default: &str| -> String {
            lookup(key).filter(|v| !v.trim().is_empty()).unwrap_or_else(|| default.to_string())
        };

        let defaults = OcrConfig::default();

        Ok(EnvConfig {
            port: parse_or(&lookup, "PORT", 8000)?,
            db_url: required("POSTGRES_URI")?,
            jwt_secret: required("JWT_SECRET")?,
            max_upload_bytes: parse_or(&lookup, "MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            ocr: OcrConfig {
                tesseract_cmd: or_default("TESSERACT_CMD", &defaults.tesseract_cmd),
                pdftotext_cmd: or_default("PDFTOTEXT_CMD", &defaults.pdftotext_cmd),
                pdftoppm_cmd: or_default("PDFTOPPM_CMD", &defaults.pdftoppm_cmd),
                lang: or_default("OCR_LANG", &defaults.lang),
                dpi: parse_or(&lookup, "OCR_DPI", defaults.dpi)?,
            },
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(v) if v.trim().is_empty() => Ok(default),
        Some(v) => v.trim().parse().map_err(|_| ConfigError::Invalid { key, value: v }),
    }
}
