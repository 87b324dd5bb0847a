//! Contact form submission

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::api::BlogClient;
use crate::error::{ApiError, FolioError, Result};
use crate::submission::SubmissionState;

pub const MISSING_FIELDS: &str = "Please fill all required fields.";
pub const SENT: &str = "Thanks! Your message has been sent.";
pub const NETWORK_ERROR: &str = "Network error. Please try again later.";

/// Contact form fields
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactSubmission {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub newsletter: bool,
}

impl ContactSubmission {
    pub fn trimmed(&self) -> Self {
        Self {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            subject: self.subject.trim().to_string(),
            message: self.message.trim().to_string(),
            newsletter: self.newsletter,
        }
    }

    /// Every text field is required
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("firstName", &self.first_name),
            ("lastName", &self.last_name),
            ("email", &self.email),
            ("subject", &self.subject),
            ("message", &self.message),
        ];
        match fields.iter().find(|(_, v)| v.trim().is_empty()) {
            Some((name, _)) => Err(FolioError::MissingField(*name)),
            None => Ok(()),
        }
    }

    /// Form-encoded representation; the newsletter flag is sent as `1`/`0`
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("firstName", self.first_name.clone()),
            ("lastName", self.last_name.clone()),
            ("email", self.email.clone()),
            ("subject", self.subject.clone()),
            ("message", self.message.clone()),
            ("newsletter", if self.newsletter { "1" } else { "0" }.to_string()),
        ]
    }
}

/// Validate and send a submission.
///
/// The JSON body goes first. If the endpoint answers with a non-success
/// status the same fields are retried once as a form post. A transport
/// failure is not retried.
pub fn submit(client: &BlogClient, submission: &ContactSubmission) -> Result<()> {
    let submission = submission.trimmed();
    submission.validate()?;

    let url = client.contact_url();
    match client.post_json(url, &submission) {
        Ok(_) => {}
        Err(ApiError::Status { status, .. }) => {
            warn!("Contact endpoint rejected JSON ({}), retrying as form", status);
            client.post_form(url, &submission.form_fields())?;
        }
        Err(e) => return Err(e.into()),
    }
    info!("Contact message from {} delivered", submission.email);
    Ok(())
}

/// User-facing outcome: `(success, message)`
pub fn status_message<T>(result: &Result<T>) -> (bool, String) {
    match result {
        Ok(_) => (true, SENT.to_string()),
        Err(FolioError::MissingField(_)) => (false, MISSING_FIELDS.to_string()),
        Err(FolioError::Api(ApiError::Status { body, .. })) => {
            let detail = match body.trim() {
                "" => "Please try again later.",
                b => b,
            };
            (false, format!("Failed to send message. {}", detail))
        }
        Err(FolioError::Busy) => (false, FolioError::Busy.to_string()),
        Err(_) => (false, NETWORK_ERROR.to_string()),
    }
}

/// Contact form with its submission guard
#[derive(Debug, Default)]
pub struct ContactForm {
    state: SubmissionState,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn send(&mut self, client: &BlogClient, submission: &ContactSubmission) -> Result<()> {
        self.state.run(|| submit(client, submission))
    }
}

/// Alert markup for a submission outcome
pub fn render_status(success: bool, message: &str) -> String {
    let class = if success { "alert-success" } else { "alert-danger" };
    format!(
        r#"<div class="alert {}" role="alert">{}</div>"#,
        class,
        crate::helpers::html_escape(message)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::test_support::spawn_server;
    use axum::{
        http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
        routing::post,
        Router,
    };
    use std::sync::{Arc, Mutex};

    fn filled() -> ContactSubmission {
        ContactSubmission {
            first_name: " Ada ".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            subject: "Hi".to_string(),
            message: "Hello there".to_string(),
            newsletter: true,
        }
    }

    fn client_for(base: &str) -> BlogClient {
        BlogClient::new(&SiteConfig {
            contact_url: format!("{}/contact", base),
            ..Default::default()
        })
    }

    #[test]
    fn test_validate() {
        assert!(filled().validate().is_ok());
        let mut s = filled();
        s.email = "  ".to_string();
        assert!(matches!(s.validate(), Err(FolioError::MissingField("email"))));
    }

    #[test]
    fn test_form_fields() {
        let fields = filled().trimmed().form_fields();
        assert_eq!(fields[0], ("firstName", "Ada".to_string()));
        assert_eq!(fields[5], ("newsletter", "1".to_string()));
    }

    #[test]
    fn test_status_messages() {
        assert_eq!(status_message(&Ok(())), (true, SENT.to_string()));
        let missing: Result<()> = Err(FolioError::MissingField("email"));
        assert_eq!(status_message(&missing).1, MISSING_FIELDS);
        let rejected: Result<()> = Err(ApiError::Status {
            status: 500,
            body: "Mailbox full".to_string(),
        }
        .into());
        assert_eq!(status_message(&rejected).1, "Failed to send message. Mailbox full");
        let rejected: Result<()> = Err(ApiError::Status {
            status: 500,
            body: String::new(),
        }
        .into());
        assert_eq!(
            status_message(&rejected).1,
            "Failed to send message. Please try again later."
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_form_fallback() {
        let seen: Arc<Mutex<Vec<String>>> = Arc::default();
        let log = seen.clone();
        let router = Router::new().route(
            "/contact",
            post(move |headers: HeaderMap, body: String| {
                let log = log.clone();
                async move {
                    let ct = headers
                        .get(CONTENT_TYPE)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("")
                        .to_string();
                    log.lock().unwrap().push(body);
                    if ct.starts_with("application/json") {
                        StatusCode::UNSUPPORTED_MEDIA_TYPE
                    } else {
                        StatusCode::OK
                    }
                }
            }),
        );
        let base = spawn_server(router).await;
        let client = client_for(&base);

        let (result, state) = tokio::task::spawn_blocking(move || {
            let mut form = ContactForm::new();
            let result = form.send(&client, &filled());
            (result, form.state().clone())
        })
        .await
        .unwrap();

        assert!(result.is_ok());
        assert_eq!(state, SubmissionState::Succeeded);
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert!(seen[0].contains("\"firstName\":\"Ada\""));
        assert!(seen[1].contains("firstName=Ada"));
        assert!(seen[1].contains("newsletter=1"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_rejected_twice() {
        let router = Router::new().route(
            "/contact",
            post(|| async { (StatusCode::BAD_REQUEST, "Invalid email") }),
        );
        let base = spawn_server(router).await;
        let client = client_for(&base);

        let result = tokio::task::spawn_blocking(move || submit(&client, &filled()))
            .await
            .unwrap();
        assert_eq!(
            status_message(&result),
            (false, "Failed to send message. Invalid email".to_string())
        );
    }

    #[test]
    fn test_missing_fields_skip_network() {
        let client = client_for("http://127.0.0.1:9");
        let result = submit(&client, &ContactSubmission::default());
        assert_eq!(status_message(&result).1, MISSING_FIELDS);
    }
}
