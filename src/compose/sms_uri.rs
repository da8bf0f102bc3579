//! Compose through the desktop's `sms:` URI handler (RFC 5724).

use crate::compose::{ComposeOutcome, Composer};
use std::path::Path;
use std::process::Command;
use url::form_urlencoded;

/// Build `sms:<numbers>?body=<text>`. Numbers keep only dialable characters;
/// the body is percent-encoded with `%20` for spaces.
pub fn sms_uri(body: &str, recipients: &[String]) -> String {
    let numbers: Vec<String> = recipients
        .iter()
        .map(|r| r.chars().filter(|c| c.is_ascii_digit() || matches!(c, '+' | '*' | '#')).collect::<String>())
        .filter(|n| !n.is_empty())
        .collect();
    let encoded: String = form_urlencoded::byte_serialize(body.as_bytes()).collect();
    format!("sms:{}?body={}", numbers.join(","), encoded.replace('+', "%20"))
}

pub struct SmsUriComposer {
    program: String,
    args: Vec<String>,
}

impl SmsUriComposer {
    pub fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// The opener for the current OS.
    pub fn system() -> Self {
        if cfg!(target_os = "macos") {
            Self::new("open", &[])
        } else if cfg!(target_os = "windows") {
            Self::new("cmd", &["/c", "start", ""])
        } else {
            Self::new("xdg-open", &[])
        }
    }

    fn program_on_path(&self) -> bool {
        let program = Path::new(&self.program);
        if program.is_absolute() {
            return program.is_file();
        }
        let Some(paths) = std::env::var_os("PATH") else {
            return false;
        };
        std::env::split_paths(&paths).any(|dir| {
            dir.join(&self.program).is_file() || dir.join(format!("{}.exe", self.program)).is_file()
        })
    }
}

impl Composer for SmsUriComposer {
    fn can_send_text(&self) -> bool {
        self.program_on_path()
    }

    fn unavailable_reason(&self) -> String {
        format!("no sms: handler launcher ({}) on PATH", self.program)
    }

    fn compose(&mut self, body: &str, recipients: &[String]) -> ComposeOutcome {
        let uri = sms_uri(body, recipients);
        match Command::new(&self.program).args(&self.args).arg(&uri).status() {
            Ok(status) if status.success() => ComposeOutcome::Sent,
            Ok(status) => {
                log::warn!("{} exited with {}", self.program, status);
                ComposeOutcome::Failed
            }
            Err(e) => {
                log::warn!("failed to launch {}: {}", self.program, e);
                ComposeOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uri_with_recipient() {
        let uri = sms_uri("Film gecesi?", &["+90 (555) 111-22-33".to_string()]);
        assert_eq!(uri, "sms:+905551112233?body=Film%20gecesi%3F");
    }

    #[test]
    fn test_uri_without_recipient_encodes_plus_and_unicode() {
        let uri = sms_uri("1+1 ş", &[]);
        assert_eq!(uri, "sms:?body=1%2B1%20%C5%9F");
    }

    #[test]
    fn test_missing_program_is_unavailable() {
        let composer = SmsUriComposer::new("definitely-not-a-real-opener-qs", &[]);
        assert!(!composer.can_send_text());
        assert!(composer.unavailable_reason().contains("definitely-not-a-real-opener-qs"));
    }

    #[cfg(unix)]
    #[test]
    fn test_compose_reports_launcher_exit() {
        let mut ok = SmsUriComposer::new("/bin/sh", &["-c", "exit 0", "sh"]);
        assert!(ok.can_send_text());
        assert_eq!(ok.compose("hi", &[]), ComposeOutcome::Sent);

        let mut failing = SmsUriComposer::new("/bin/sh", &["-c", "exit 3", "sh"]);
        assert_eq!(failing.compose("hi", &[]), ComposeOutcome::Failed);
    }
}
