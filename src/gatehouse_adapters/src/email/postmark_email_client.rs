use gatehouse_core::{Email, EmailClient};
use reqwest::{Client, Response, Url};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

/// Delivers plain-text mail through Postmark's `/email` endpoint.
pub struct PostmarkEmailClient {
    http_client: Client,
    base_url: Url,
    sender: Email,
    server_token: Secret<String>,
}

impl PostmarkEmailClient {
    pub fn new(
        base_url: Url,
        sender: Email,
        server_token: Secret<String>,
        http_client: Client,
    ) -> Self {
        Self {
            http_client,
            base_url,
            sender,
            server_token,
        }
    }
}

#[async_trait::async_trait]
impl EmailClient for PostmarkEmailClient {
    #[tracing::instrument(name = "Sending email via Postmark", skip_all)]
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        content: &str,
    ) -> Result<(), String> {
        let url = self
            .base_url
            .join(EMAIL_ENDPOINT)
            .map_err(|e| e.to_string())?;

        let message = OutboundMessage {
            from: self.sender.as_ref().expose_secret(),
            to: recipient.as_ref().expose_secret(),
            subject,
            text_body: content,
            message_stream: MESSAGE_STREAM,
        };

        let response = self
            .http_client
            .post(url)
            .header(SERVER_TOKEN_HEADER, self.server_token.expose_secret())
            .json(&message)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        if response.status().is_success() {
            return Ok(());
        }
        Err(rejection_reason(response).await)
    }
}

const EMAIL_ENDPOINT: &str = "/email";
const MESSAGE_STREAM: &str = "outbound";
const SERVER_TOKEN_HEADER: &str = "X-Postmark-Server-Token";

#[derive(Serialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct OutboundMessage<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text_body: &'a str,
    message_stream: &'a str,
}

/// Error body Postmark returns alongside a 4xx.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct PostmarkError {
    error_code: i64,
    message: String,
}

async fn rejection_reason(response: Response) -> String {
    let status = response.status();
    match response.json::<PostmarkError>().await {
        Ok(error) => format!(
            "Postmark rejected the email ({status}, code {}): {}",
            error.error_code, error.message
        ),
        Err(_) => format!("Postmark rejected the email ({status})"),
    }
}
