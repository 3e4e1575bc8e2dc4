use gatehouse_core::{Email, EmailClient};

/// Logs outgoing mail instead of delivering it.
#[derive(Debug, Clone, Default)]
pub struct MockEmailClient;

impl MockEmailClient {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl EmailClient for MockEmailClient {
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        content: &str,
    ) -> Result<(), String> {
        tracing::debug!(%recipient, subject, content, "email not delivered");
        Ok(())
    }
}
