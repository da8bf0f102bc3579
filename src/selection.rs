use crate::api::models::Contact;
use crate::error::{QsError, QsResult};

/// Used when neither the contact nor the configured label provides a name.
pub const DEFAULT_UNKNOWN_LABEL: &str = "Bilinmeyen";

/// Contact-pick interaction. `None` means the user backed out.
pub trait ContactPicker {
    fn pick(&mut self) -> Option<Contact>;
}

/// A picked recipient. The display name is never blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    display_name: String,
    phone_number: Option<String>,
}

impl Selection {
    pub fn new(display_name: &str, phone_number: Option<&str>) -> QsResult<Self> {
        let display_name = display_name.trim();
        if display_name.is_empty() {
            return Err(QsError::EmptyContactName);
        }
        Ok(Self {
            display_name: display_name.to_string(),
            phone_number: phone_number
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string),
        })
    }

    /// Build a selection from a picked contact. A missing or blank name is
    /// replaced with `unknown_label`, or [`DEFAULT_UNKNOWN_LABEL`] when that is
    /// blank too; only the first phone number is kept.
    pub fn from_contact(contact: &Contact, unknown_label: &str) -> Self {
        let fallback = Some(unknown_label.trim())
            .filter(|l| !l.is_empty())
            .unwrap_or(DEFAULT_UNKNOWN_LABEL);
        let display_name = contact
            .full_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(fallback)
            .to_string();
        let phone_number = contact
            .phone_numbers
            .iter()
            .map(|p| p.trim())
            .find(|p| !p.is_empty())
            .map(str::to_string);
        Self { display_name, phone_number }
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn phone_number(&self) -> Option<&str> {
        self.phone_number.as_deref()
    }
}

#[derive(Debug, Default)]
pub struct SelectionState {
    current: Option<Selection>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current selection wholesale; nothing from the previous pick
    /// survives. A blank name is rejected and the previous selection is kept.
    pub fn set_selection(&mut self, display_name: &str, phone_number: Option<&str>) -> QsResult<()> {
        match Selection::new(display_name, phone_number) {
            Ok(selection) => {
                self.set(selection);
                Ok(())
            }
            Err(e) => {
                log::warn!("keeping previous selection: {e}");
                Err(e)
            }
        }
    }

    pub fn set(&mut self, selection: Selection) {
        log::debug!(
            "selected {} ({})",
            selection.display_name,
            if selection.phone_number.is_some() { "has number" } else { "no number" }
        );
        self.current = Some(selection);
    }

    pub fn current(&self) -> Option<&Selection> {
        self.current.as_ref()
    }

    pub fn current_recipient(&self) -> Option<&str> {
        self.current.as_ref()?.phone_number()
    }

    pub fn display_name(&self) -> Option<&str> {
        self.current.as_ref().map(Selection::display_name)
    }
}
