use serde::{Deserialize, Serialize};

/// A contact as returned by a picker: formatted full name and phone numbers
/// in the order the address book lists them.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Contact {
    pub full_name: Option<String>,
    pub phone_numbers: Vec<String>,
}

impl Contact {
    pub fn new(full_name: Option<&str>, phone_numbers: &[&str]) -> Self {
        Self {
            full_name: full_name.map(str::to_string),
            phone_numbers: phone_numbers.iter().map(|p| p.to_string()).collect(),
        }
    }

    /// Row label for pickers: "Name (number)", or whichever half exists.
    pub fn label(&self) -> String {
        let name = self.full_name.as_deref().map(str::trim).unwrap_or("");
        match (name.is_empty(), self.phone_numbers.first()) {
            (false, Some(phone)) => format!("{} ({})", name, phone),
            (false, None) => name.to_string(),
            (true, Some(phone)) => phone.clone(),
            (true, None) => String::new(),
        }
    }
}
