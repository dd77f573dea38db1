//! Configuration, built from environment variables.

use std::time::Duration;

use secrecy::SecretString;

use crate::error::ConfigError;

/// Bot configuration.
#[derive(Clone)]
pub struct Config {
    /// LINE channel secret, used to verify webhook signatures.
    pub channel_secret: SecretString,
    /// LINE channel access token, used for Messaging API calls.
    pub channel_access_token: SecretString,
    /// HTTP listen port.
    pub port: u16,
    /// Path to the counter database file.
    pub db_path: String,
    /// Tesseract language code for OCR.
    pub ocr_lang: String,
    /// OCR subprocess timeout.
    pub ocr_timeout: Duration,
    /// Optional keyword override (comma-separated in `OINORI_KEYWORDS`).
    pub keywords: Option<Vec<String>>,
}

impl Config {
    /// Build config from environment variables.
    ///
    /// `LINE_CHANNEL_SECRET` and `LINE_CHANNEL_ACCESS_TOKEN` are required;
    /// everything else has a default. A numeric variable that is set but
    /// unparseable is an error, not a silent default.
    pub fn from_env() -> Result<Self, ConfigError> {
        let channel_secret = std::env::var("LINE_CHANNEL_SECRET")
            .map_err(|_| ConfigError::MissingEnvVar("LINE_CHANNEL_SECRET".into()))?;
        let channel_access_token = std::env::var("LINE_CHANNEL_ACCESS_TOKEN")
            .map_err(|_| ConfigError::MissingEnvVar("LINE_CHANNEL_ACCESS_TOKEN".into()))?;

        let port: u16 = parse_numeric("PORT", std::env::var("PORT").ok())?.unwrap_or(8000);

        let db_path =
            std::env::var("OINORI_DB_PATH").unwrap_or_else(|_| "./data/counts.db".to_string());

        let ocr_lang = std::env::var("OINORI_OCR_LANG").unwrap_or_else(|_| "jpn".to_string());

        let ocr_timeout_secs: u64 = parse_numeric(
            "OINORI_OCR_TIMEOUT_SECS",
            std::env::var("OINORI_OCR_TIMEOUT_SECS").ok(),
        )?
        .unwrap_or(30);

        let keywords = std::env::var("OINORI_KEYWORDS")
            .ok()
            .map(|raw| parse_keywords(&raw));

        Ok(Self {
            channel_secret: SecretString::from(channel_secret),
            channel_access_token: SecretString::from(channel_access_token),
            port,
            db_path,
            ocr_lang,
            ocr_timeout: Duration::from_secs(ocr_timeout_secs),
            keywords,
        })
    }
}

/// Parse a set numeric variable, mapping a parse failure to [`ConfigError`].
/// An unset variable (`None`) is fine; the caller supplies the default.
fn parse_numeric<T: std::str::FromStr>(
    key: &str,
    raw: Option<String>,
) -> Result<Option<T>, ConfigError> {
    match raw {
        None => Ok(None),
        Some(s) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                message: format!("cannot parse {s:?} as a number"),
            }),
    }
}

/// Split a comma-separated keyword list, trimming and dropping empty items.
fn parse_keywords(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    // Config::from_env reads process-global env vars, so these tests only
    // cover the parsing helpers that don't race with other tests.

    use super::*;

    #[test]
    fn keyword_override_parsing() {
        let parsed = parse_keywords("不採用, お祈り ,,  ");
        assert_eq!(parsed, vec!["不採用".to_string(), "お祈り".to_string()]);
    }

    #[test]
    fn numeric_var_parses_when_set() {
        let port = parse_numeric::<u16>("PORT", Some("9000".to_string())).unwrap();
        assert_eq!(port, Some(9000));
    }

    #[test]
    fn numeric_var_defaults_when_unset() {
        let port = parse_numeric::<u16>("PORT", None).unwrap();
        assert_eq!(port, None);
    }

    #[test]
    fn unparseable_numeric_var_is_an_error() {
        let err = parse_numeric::<u16>("PORT", Some("eight".to_string())).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "PORT"));
        assert!(err.to_string().contains("PORT"));
    }
}
