use crate::config::config;
use crate::types::mail::SendEmail;
use reqwest::{Client, ClientBuilder};
use std::time::Instant;
use tracing::{debug, warn};

/// Fire the rendered message at the provider. Callers treat this as a sink;
/// a delivery failure is logged here and is never a subsystem error.
pub async fn send_email(email: SendEmail) -> Result<String, String> {
    let mail_config = &config().mail;

    let payload = serde_json::to_string(&email)
        .map_err(|e| format!("serialize email failed: {e}"))?;

    let client: Client = ClientBuilder::new()
        .user_agent("lantern-auth/0.1 (+reqwest)")
        .timeout(std::time::Duration::from_secs(30))
        .build()
        .map_err(|e| format!("build client failed: {e}"))?;

    debug!(to = ?email.to, subject = %email.subject, "sending mail");

    let t0 = Instant::now();
    let res = client
        .post(&mail_config.endpoint)
        .bearer_auth(&mail_config.api_key) // do NOT log the key
        .header("Content-Type", "application/json")
        .body(payload)
        .send()
        .await
        .map_err(|e| format!("send failed: {e}"))?;
    let dt = t0.elapsed();

    let status = res.status();
    let body = res
        .text()
        .await
        .map_err(|e| format!("read body failed: {e}"))?;

    debug!(%status, ms = dt.as_millis(), "mail provider answered");

    if status.is_success() {
        Ok(body)
    } else {
        warn!(%status, "mail provider rejected message");
        Err(format!("mail provider error: HTTP {status}: {body}"))
    }
}
