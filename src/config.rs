use dotenvy::dotenv;
use std::env;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    MissingEnv(&'static str),
    #[error("invalid URL in {0}: {1}")]
    InvalidUrl(&'static str, String),
}

/// Stock simulated endpoint used when no override webhook is configured.
pub const DEFAULT_OVERRIDE_WEBHOOK: &str = "https://httpbin.org/post";
pub const DEFAULT_OVERRIDE_TOKEN: &str = "SIMULATED_TOKEN";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub name: String,
    pub email: String,
    pub reg_no: String,
    pub generate_url: url::Url,
    pub submit_url: url::Url,
    /// None when OVERRIDE_WEBHOOK is set but blank; the fallback then lands
    /// on `submit_url`.
    pub override_webhook: Option<url::Url>,
    pub override_token: String,
    pub final_query: Option<String>,
}

fn required(key: &'static str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::MissingEnv(key))
}

fn required_url(key: &'static str) -> Result<url::Url, ConfigError> {
    let raw = required(key)?;
    url::Url::parse(&raw).map_err(|_| ConfigError::InvalidUrl(key, raw))
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        if cfg!(not(test)) {
            let _ = dotenv();
        }

        let name = required("APP_NAME")?;
        let email = required("APP_EMAIL")?;
        let reg_no = required("APP_REG_NO")?;
        let generate_url = required_url("GENERATE_URL")?;
        let submit_url = required_url("SUBMIT_URL")?;

        let override_webhook = match env::var("OVERRIDE_WEBHOOK") {
            Ok(s) if s.trim().is_empty() => None,
            Ok(s) => {
                let parsed = url::Url::parse(&s)
                    .map_err(|_| ConfigError::InvalidUrl("OVERRIDE_WEBHOOK", s.clone()))?;
                Some(parsed)
            }
            Err(_) => Some(
                url::Url::parse(DEFAULT_OVERRIDE_WEBHOOK).expect("default webhook URL is valid"),
            ),
        };

        let override_token =
            env::var("OVERRIDE_TOKEN").unwrap_or_else(|_| DEFAULT_OVERRIDE_TOKEN.to_string());

        let final_query = env::var("FINAL_QUERY").ok();

        Ok(AppConfig {
            name,
            email,
            reg_no,
            generate_url,
            submit_url,
            override_webhook,
            override_token,
            final_query,
        })
    }
}
