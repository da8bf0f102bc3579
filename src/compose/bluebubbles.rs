use crate::api::client::ApiClient;
use crate::compose::{ComposeOutcome, Composer};
use crate::utils::RUNTIME;
use tokio::sync::mpsc::UnboundedSender;

/// Sends through a BlueBubbles server's new-chat endpoint.
///
/// `compose` queues the request on the shared runtime and returns `Sent` once
/// it is handed off, so the caller's thread never waits on the network.
/// Failures that happen later are logged and, if a sender was given, reported
/// on it.
pub struct BlueBubblesComposer {
    base_url: String,
    password: String,
    failures: Option<UnboundedSender<String>>,
}

impl BlueBubblesComposer {
    pub fn new(base_url: &str, password: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            password: password.to_string(),
            failures: None,
        }
    }

    pub fn with_failure_reports(mut self, failures: UnboundedSender<String>) -> Self {
        self.failures = Some(failures);
        self
    }
}

impl Composer for BlueBubblesComposer {
    fn can_send_text(&self) -> bool {
        !self.base_url.is_empty() && !self.password.is_empty()
    }

    fn unavailable_reason(&self) -> String {
        "BlueBubbles server URL or password is not configured".to_string()
    }

    fn compose(&mut self, body: &str, recipients: &[String]) -> ComposeOutcome {
        // The server cannot address a chat on its own.
        if recipients.is_empty() {
            log::warn!("BlueBubbles compose needs a recipient; pick a contact first");
            return ComposeOutcome::Failed;
        }
        let client = match ApiClient::new(&self.base_url, &self.password) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("could not build API client: {e}");
                return ComposeOutcome::Failed;
            }
        };
        let recipients = recipients.to_vec();
        let body = body.to_string();
        let failures = self.failures.clone();
        RUNTIME.spawn(async move {
            match client.create_chat(&recipients, &body).await {
                Ok(guid) => log::debug!("message handed to chat {guid}"),
                Err(e) => {
                    log::warn!("BlueBubbles send failed: {e}");
                    if let Some(tx) = failures {
                        let _ = tx.send(e.to_string());
                    }
                }
            }
        });
        ComposeOutcome::Sent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[test]
    fn test_unconfigured_is_unavailable() {
        assert!(!BlueBubblesComposer::new("", "pw").can_send_text());
        assert!(!BlueBubblesComposer::new("https://bb.example", "").can_send_text());
        assert!(BlueBubblesComposer::new("https://bb.example", "pw").can_send_text());
    }

    #[test]
    fn test_no_recipient_fails_without_network() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut composer = BlueBubblesComposer::new("https://bb.invalid", "pw").with_failure_reports(tx);
        assert_eq!(composer.compose("hi", &[]), ComposeOutcome::Failed);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_unreachable_server_reports_after_handoff() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        // Nothing listens on the discard port.
        let mut composer = BlueBubblesComposer::new("http://127.0.0.1:9", "pw").with_failure_reports(tx);
        assert_eq!(composer.compose("hi", &["+905551112233".to_string()]), ComposeOutcome::Sent);

        let reported = RUNTIME.block_on(async {
            tokio::time::timeout(std::time::Duration::from_secs(10), rx.recv()).await
        });
        assert!(matches!(reported, Ok(Some(_))));
    }
}
