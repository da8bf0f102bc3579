pub mod bluebubbles;
pub mod sms_uri;

use crate::app::{AppState, ComposerBackend};
use crate::error::{QsError, QsResult};
use tokio::sync::mpsc::UnboundedSender;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposeOutcome {
    Sent,
    Cancelled,
    Failed,
}

/// Message-composition facility: a recipient list of zero or one entries and a body.
pub trait Composer {
    /// Whether this device/configuration can send text at all.
    fn can_send_text(&self) -> bool;

    fn compose(&mut self, body: &str, recipients: &[String]) -> ComposeOutcome;

    /// Reason reported when `can_send_text` is false.
    fn unavailable_reason(&self) -> String {
        "messaging is not available on this device".to_string()
    }
}

/// The composer configured in `state`. Backends that finish in the
/// background report late failures on `failures`.
pub fn from_state(state: &AppState, failures: Option<UnboundedSender<String>>) -> Box<dyn Composer> {
    match state.composer {
        ComposerBackend::SmsUri => Box::new(sms_uri::SmsUriComposer::system()),
        ComposerBackend::BlueBubbles => {
            let composer = bluebubbles::BlueBubblesComposer::new(&state.base_url, &state.password);
            match failures {
                Some(tx) => Box::new(composer.with_failure_reports(tx)),
                None => Box::new(composer),
            }
        }
    }
}

/// Sent, cancelled and failed all end the interaction; nothing is retried.
pub fn send(composer: &mut dyn Composer, body: &str, recipient: Option<&str>) -> QsResult<ComposeOutcome> {
    if body.is_empty() {
        return Err(QsError::EmptyBody);
    }
    if !composer.can_send_text() {
        let reason = composer.unavailable_reason();
        log::warn!("cannot send text: {reason}");
        return Err(QsError::ComposerUnavailable(reason));
    }
    let recipients: Vec<String> = recipient.map(str::to_string).into_iter().collect();
    let outcome = composer.compose(body, &recipients);
    log::info!("compose finished with {:?} ({} recipient(s))", outcome, recipients.len());
    Ok(outcome)
}
