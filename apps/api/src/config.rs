use anyhow::{bail, Context, Result};

/// S3 refuses presigned URLs that live longer than seven days.
pub const MAX_DOWNLOAD_LINK_TTL_SECS: u64 = 7 * 24 * 60 * 60;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    pub s3_bucket: String,
    pub s3_endpoint: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    pub anthropic_api_key: String,
    /// Base URL of the identity service that resolves bearer tokens to users.
    pub auth_url: String,
    pub auth_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// Tesseract language models, e.g. `["tur", "eng"]`.
    pub ocr_languages: Vec<String>,
    pub ocr_dpi: u32,
    pub pdftoppm_bin: String,
    pub tesseract_bin: String,
    /// Lifetime of signed download URLs and their short codes.
    pub download_link_ttl_secs: u64,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            redis_url: require_env("REDIS_URL")?,
            s3_bucket: require_env("S3_BUCKET")?,
            s3_endpoint: require_env("S3_ENDPOINT")?,
            aws_access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
            aws_secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            auth_url: require_env("AUTH_URL")?,
            auth_api_key: require_env("AUTH_API_KEY")?,
            port: parse_env("PORT", 8080).context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            ocr_languages: parse_languages(
                &std::env::var("OCR_LANGUAGES").unwrap_or_else(|_| "tur+eng".to_string()),
            ),
            ocr_dpi: parse_env("OCR_DPI", 300).context("OCR_DPI must be a positive integer")?,
            pdftoppm_bin: std::env::var("PDFTOPPM_BIN").unwrap_or_else(|_| "pdftoppm".to_string()),
            tesseract_bin: std::env::var("TESSERACT_BIN")
                .unwrap_or_else(|_| "tesseract".to_string()),
            download_link_ttl_secs: link_ttl(
                parse_env("DOWNLOAD_LINK_TTL_SECS", 60)
                    .context("DOWNLOAD_LINK_TTL_SECS must be a number of seconds")?,
            )?,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 10 * 1024 * 1024)
                .context("MAX_UPLOAD_BYTES must be a number of bytes")?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => Ok(raw.trim().parse::<T>()?),
        Err(_) => Ok(default),
    }
}

fn link_ttl(secs: u64) -> Result<u64> {
    if secs == 0 || secs > MAX_DOWNLOAD_LINK_TTL_SECS {
        bail!("DOWNLOAD_LINK_TTL_SECS must be between 1 and {MAX_DOWNLOAD_LINK_TTL_SECS}, got {secs}");
    }
    Ok(secs)
}

/// Accepts both Tesseract's `tur+eng` form and a comma-separated list.
fn parse_languages(raw: &str) -> Vec<String> {
    raw.split(['+', ','])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
