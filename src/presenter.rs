use crate::api::models::Contact;
use crate::compose::{self, ComposeOutcome, Composer};
use crate::error::{QsError, QsResult};
use crate::selection::{ContactPicker, Selection, SelectionState};
use crate::storage::KeyValueStore;
use crate::templates::TemplateStore;

pub struct Presenter<S: KeyValueStore> {
    templates: TemplateStore<S>,
    selection: SelectionState,
    composer: Box<dyn Composer>,
    body: String,
    name_field: String,
    unknown_label: String,
}

impl<S: KeyValueStore> Presenter<S> {
    pub fn new(templates: TemplateStore<S>, composer: Box<dyn Composer>, unknown_label: &str) -> Self {
        Self {
            templates,
            selection: SelectionState::new(),
            composer,
            body: String::new(),
            name_field: String::new(),
            unknown_label: unknown_label.to_string(),
        }
    }

    pub fn row_count(&self) -> usize {
        self.templates.len()
    }

    pub fn row_text(&self, index: usize) -> Option<&str> {
        self.templates.get(index)
    }

    pub fn templates(&self) -> &TemplateStore<S> {
        &self.templates
    }

    /// Copy the row's template into the body, and the picked name (if any)
    /// into the name field.
    pub fn select_row(&mut self, index: usize) -> QsResult<()> {
        let text = self
            .templates
            .get(index)
            .ok_or(QsError::IndexOutOfRange { index, len: self.templates.len() })?
            .to_string();
        self.body = text;
        if let Some(name) = self.selection.display_name() {
            self.name_field = name.to_string();
        }
        Ok(())
    }

    pub fn delete_row(&mut self, index: usize) -> QsResult<String> {
        self.templates.remove_at(index)
    }

    pub fn add_template(&mut self, text: &str) -> QsResult<()> {
        self.templates.append(text)
    }

    pub fn pick_contact(&mut self, picker: &mut dyn ContactPicker) -> Option<&Selection> {
        let picked = picker.pick();
        self.apply_pick(picked)
    }

    /// Apply a finished pick. A cancelled pick (`None`) keeps the previous selection.
    pub fn apply_pick(&mut self, contact: Option<Contact>) -> Option<&Selection> {
        if let Some(contact) = contact {
            let selection = Selection::from_contact(&contact, &self.unknown_label);
            self.name_field = selection.display_name().to_string();
            self.selection.set(selection);
        }
        self.selection.current()
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn send(&mut self) -> QsResult<ComposeOutcome> {
        compose::send(self.composer.as_mut(), &self.body, self.selection.current_recipient())
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn set_body(&mut self, body: &str) {
        self.body = body.to_string();
    }

    pub fn name_field(&self) -> &str {
        &self.name_field
    }

    pub fn set_name_field(&mut self, name: &str) {
        self.name_field = name.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::templates::DEFAULT_TEMPLATES;

    struct NullComposer;

    impl Composer for NullComposer {
        fn can_send_text(&self) -> bool {
            true
        }

        fn compose(&mut self, _body: &str, _recipients: &[String]) -> ComposeOutcome {
            ComposeOutcome::Cancelled
        }
    }

    fn presenter() -> Presenter<MemoryStore> {
        Presenter::new(TemplateStore::open(MemoryStore::new()), Box::new(NullComposer), "Bilinmeyen")
    }

    #[test]
    fn test_rows_follow_store() {
        let mut p = presenter();
        assert_eq!(p.row_count(), 10);
        assert_eq!(p.row_text(9), Some(DEFAULT_TEMPLATES[9]));
        p.add_template("Merhaba").unwrap();
        assert_eq!(p.row_count(), 11);
        p.delete_row(0).unwrap();
        assert_eq!(p.row_text(0), Some(DEFAULT_TEMPLATES[1]));
    }

    #[test]
    fn test_select_without_contact_keeps_name_field() {
        let mut p = presenter();
        p.set_name_field("typed by hand");
        p.select_row(1).unwrap();
        assert_eq!(p.body(), DEFAULT_TEMPLATES[1]);
        assert_eq!(p.name_field(), "typed by hand");
    }

    #[test]
    fn test_select_copies_picked_name() {
        let mut p = presenter();
        p.apply_pick(Some(Contact::new(Some("Ayşe"), &["+90555"])));
        p.set_name_field("");
        p.select_row(2).unwrap();
        assert_eq!(p.name_field(), "Ayşe");
    }

    #[test]
    fn test_select_out_of_range_changes_nothing() {
        let mut p = presenter();
        p.set_body("draft");
        assert!(p.select_row(42).is_err());
        assert_eq!(p.body(), "draft");
    }

    #[test]
    fn test_cancelled_pick_keeps_selection() {
        let mut p = presenter();
        p.apply_pick(Some(Contact::new(Some("Ayşe"), &["+90555"])));
        let kept = p.apply_pick(None).cloned();
        assert_eq!(kept.map(|s| s.display_name().to_string()), Some("Ayşe".to_string()));
        assert_eq!(p.selection().current_recipient(), Some("+90555"));
    }

    #[test]
    fn test_nameless_pick_uses_placeholder() {
        let mut p = presenter();
        p.apply_pick(Some(Contact::new(None, &["+90555"])));
        assert_eq!(p.name_field(), "Bilinmeyen");
    }

    #[test]
    fn test_send_returns_composer_outcome() {
        let mut p = presenter();
        p.set_body("hi");
        assert_eq!(p.send().unwrap(), ComposeOutcome::Cancelled);
    }
}
