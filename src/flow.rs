// One-shot startup flow: ask the vendor for a webhook, fall back to the
// simulated endpoint when that fails, then submit the final query if one was
// provided.

use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::{error, info};

use crate::config::AppConfig;
use crate::vendor::{GenerateError, GenerateRequest, Vendor};

#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("network error while submitting: {0}")]
    Transport(reqwest::Error),
    #[error("webhook returned HTTP {status}: {body}")]
    HttpStatus { status: StatusCode, body: String },
    #[error("could not read webhook response body: {0}")]
    BodyRead(reqwest::Error),
}

/// The webhook/token pair every submission goes to. Exactly one pair is
/// active once the generate stage has been resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveWebhook {
    pub url: String,
    pub token: String,
}

pub struct StartupFlow {
    client: Client,
    cfg: AppConfig,
}

impl StartupFlow {
    pub fn new(cfg: AppConfig) -> StartupFlow {
        StartupFlow {
            client: Client::new(),
            cfg,
        }
    }

    /// Run the whole flow once. Nothing in here is fatal to the process;
    /// every failure is logged and resolved through the fallback table.
    pub async fn run(&self, final_query_override: Option<String>) {
        info!("Starting webhook flow");

        let vendor = Vendor::new(self.client.clone(), self.cfg.generate_url.clone());
        let request = GenerateRequest {
            name: self.cfg.name.clone(),
            reg_no: self.cfg.reg_no.clone(),
            email: self.cfg.email.clone(),
        };

        info!("Calling generate endpoint: {}", self.cfg.generate_url);

        let vendor_pair = match vendor.generate(&request).await {
            Ok(resp) => match (resp.webhook_url(), resp.access_token()) {
                (Some(url), Some(token)) if !url.trim().is_empty() => {
                    info!("Received webhook URL and access token from vendor.");
                    Some(ActiveWebhook {
                        url: url.to_string(),
                        token: token.to_string(),
                    })
                }
                _ => {
                    info!("Vendor did not return full data. Will use fallback values.");
                    None
                }
            },
            Err(e) => {
                match &e {
                    GenerateError::Transport(_) => error!("Network error calling vendor: {e}"),
                    GenerateError::HttpStatus { .. } => error!("HTTP error from vendor: {e}"),
                    GenerateError::EmptyBody | GenerateError::Decode(_) => {
                        error!("Vendor response not usable: {e}")
                    }
                }
                info!("Falling back to configured override webhook.");
                None
            }
        };

        let active = match vendor_pair {
            Some(pair) => pair,
            None => {
                let fallback = fallback_webhook(&self.cfg);
                info!("Using override webhook: {}", fallback.url);
                info!(
                    "Using override token (truncated): {}",
                    truncate_token(&fallback.token)
                );
                fallback
            }
        };

        let last_digit = last_reg_digit(&self.cfg.reg_no);
        info!(
            "Registration number last digit: {} -> {}",
            last_digit,
            parity_label(last_digit)
        );

        info!("--- Next steps ---");
        info!("1) Solve the question assigned to your registration number (odd/even).");
        info!("2) Re-run with FINAL_QUERY set, or pass the query as the first argument, to auto-submit.");

        let final_query = resolve_final_query(
            final_query_override.as_deref(),
            self.cfg.final_query.as_deref(),
        );

        match final_query {
            Some(query) => {
                info!("Auto-submit requested. Submitting final query now...");
                self.submit_final_query(&active, &query).await;
            }
            None => {
                info!("No final query provided. Solve your question and re-run with FINAL_QUERY to submit.");
            }
        }
    }

    /// Terminal, side-effect-only stage; outcomes are logged, never returned.
    pub async fn submit_final_query(&self, active: &ActiveWebhook, query: &str) {
        info!("Submitting to: {}", active.url);

        match self.post_final_query(active, query).await {
            Ok((status, body)) => {
                info!("Submit response status: {status}");
                info!("Submit response body: {body}");
            }
            Err(SubmitError::Transport(e)) => {
                error!("Network error while submitting: {e}");
                error!("You can re-run on a different network or rely on the documented fallback.");
            }
            Err(e @ SubmitError::HttpStatus { .. }) => {
                error!("Submit HTTP error: {e}");
            }
            Err(e) => {
                error!("Submit failed: {e}");
            }
        }
    }

    async fn post_final_query(
        &self,
        active: &ActiveWebhook,
        query: &str,
    ) -> Result<(StatusCode, String), SubmitError> {
        let body = serde_json::json!({ "finalquery": query });

        let res = self
            .client
            .post(active.url.as_str())
            .header(reqwest::header::AUTHORIZATION, active.token.as_str())
            .json(&body)
            .send()
            .await
            .map_err(SubmitError::Transport)?;

        let status = res.status();
        let text = res.text().await.map_err(SubmitError::BodyRead)?;

        if !status.is_success() {
            return Err(SubmitError::HttpStatus { status, body: text });
        }

        Ok((status, text))
    }
}

/// Fallback pair: the override webhook when present, else the submit URL,
/// always with the override token.
fn fallback_webhook(cfg: &AppConfig) -> ActiveWebhook {
    let url = match &cfg.override_webhook {
        Some(u) => u.to_string(),
        None => cfg.submit_url.to_string(),
    };
    ActiveWebhook {
        url,
        token: cfg.override_token.clone(),
    }
}

/// Last digit of the registration number, or -1 when it does not end in a
/// decimal digit.
fn last_reg_digit(reg_no: &str) -> i32 {
    match reg_no.trim().chars().last().and_then(|c| c.to_digit(10)) {
        Some(d) => d as i32,
        None => -1,
    }
}

// The -1 sentinel has a nonzero remainder, so a missing digit reports ODD.
fn parity_label(last_digit: i32) -> &'static str {
    if last_digit % 2 == 0 { "EVEN" } else { "ODD" }
}

/// A non-blank override wins; otherwise the configured value, if non-blank.
/// The winning value is passed through verbatim.
fn resolve_final_query(override_value: Option<&str>, configured: Option<&str>) -> Option<String> {
    override_value
        .filter(|s| !s.trim().is_empty())
        .or_else(|| configured.filter(|s| !s.trim().is_empty()))
        .map(str::to_string)
}

fn truncate_token(token: &str) -> String {
    if token.chars().count() > 20 {
        let head: String = token.chars().take(20).collect();
        format!("{head}...")
    } else {
        token.to_string()
    }
}
