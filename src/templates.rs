use crate::error::{QsError, QsResult};
use crate::storage::KeyValueStore;

pub const TEMPLATES_KEY: &str = "smsTemplates";

pub const DEFAULT_TEMPLATES: [&str; 10] = [
    "Bilgilendirme: Bugünkü etkinlik iptal edilmiştir.",
    "Akşam yemeği için buluşalım mı?",
    "Bugün hava çok güzel, sahile inelim mi?",
    "Marketten bir şey lazım mı, çıkıyorum da?",
    "Film gecesi yapalım mı bu akşam?",
    "Kahve molası zamanı, eşlik etmek ister misin?",
    "Uyanınca mesaj at, kahvaltıya gidelim.",
    "Bugün moralim bozuk biraz, konuşabilir miyiz?",
    "Şarjım bitmek üzere, eve gelince yazarım.",
    "Yarın erkenden yürüyüşe çıkalım mı, hava serin olacakmış.",
];

pub fn default_templates() -> Vec<String> {
    DEFAULT_TEMPLATES.iter().map(|t| t.to_string()).collect()
}

/// Read the persisted list, falling back to the defaults when the slot is
/// empty, unreadable or holds anything other than a list of strings.
/// The fallback is not written back.
pub fn load<S: KeyValueStore>(slot: &S) -> Vec<String> {
    match slot.get(TEMPLATES_KEY) {
        Ok(Some(raw)) => match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(saved) => return saved,
            Err(e) => log::warn!("stored templates are malformed, using defaults: {e}"),
        },
        Ok(None) => log::debug!("no stored templates, using defaults"),
        Err(e) => log::warn!("could not read stored templates, using defaults: {e}"),
    }
    default_templates()
}

/// Overwrite the persisted list.
pub fn save<S: KeyValueStore>(slot: &mut S, templates: &[String]) -> QsResult<()> {
    let raw = serde_json::to_string(templates)?;
    slot.set(TEMPLATES_KEY, &raw)
}

/// Every mutation rewrites the whole list before returning; a failed write
/// undoes the mutation.
pub struct TemplateStore<S: KeyValueStore> {
    slot: S,
    templates: Vec<String>,
}

impl<S: KeyValueStore> TemplateStore<S> {
    pub fn open(slot: S) -> Self {
        let templates = load(&slot);
        log::info!("loaded {} templates", templates.len());
        Self { slot, templates }
    }

    pub fn templates(&self) -> &[String] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.templates.get(index).map(String::as_str)
    }

    pub fn slot(&self) -> &S {
        &self.slot
    }

    pub fn append(&mut self, text: &str) -> QsResult<()> {
        if text.is_empty() {
            return Err(QsError::InvalidTemplate);
        }
        self.templates.push(text.to_string());
        if let Err(e) = save(&mut self.slot, &self.templates) {
            self.templates.pop();
            return Err(e);
        }
        log::debug!("appended template, now {}", self.templates.len());
        Ok(())
    }

    pub fn remove_at(&mut self, index: usize) -> QsResult<String> {
        let len = self.templates.len();
        if index >= len {
            return Err(QsError::IndexOutOfRange { index, len });
        }
        let removed = self.templates.remove(index);
        if let Err(e) = save(&mut self.slot, &self.templates) {
            self.templates.insert(index, removed);
            return Err(e);
        }
        log::debug!("removed template at {index}, now {}", self.templates.len());
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[derive(Default)]
    struct FlakySlot {
        inner: MemoryStore,
        fail_reads: bool,
        fail_writes: bool,
    }

    impl KeyValueStore for FlakySlot {
        fn get(&self, key: &str) -> QsResult<Option<String>> {
            if self.fail_reads {
                return Err(QsError::Storage("database is locked".into()));
            }
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> QsResult<()> {
            if self.fail_writes {
                return Err(QsError::Storage("disk full".into()));
            }
            self.inner.set(key, value)
        }
    }

    fn persisted(slot: &impl KeyValueStore) -> Option<Vec<String>> {
        slot.get(TEMPLATES_KEY)
            .unwrap()
            .map(|raw| serde_json::from_str(&raw).unwrap())
    }

    #[test]
    fn test_empty_slot_yields_unpersisted_defaults() {
        let store = TemplateStore::open(MemoryStore::new());
        assert_eq!(store.templates(), default_templates().as_slice());
        assert_eq!(store.len(), 10);
        assert_eq!(persisted(store.slot()), None);
    }

    #[test]
    fn test_malformed_slot_yields_defaults() {
        let mut slot = MemoryStore::new();
        slot.set(TEMPLATES_KEY, r#"{"not":"a list"}"#).unwrap();
        assert_eq!(load(&slot), default_templates());

        slot.set(TEMPLATES_KEY, "[1, 2, 3]").unwrap();
        assert_eq!(load(&slot), default_templates());
    }

    #[test]
    fn test_unreadable_slot_yields_unpersisted_defaults() {
        let mut slot = FlakySlot::default();
        save(&mut slot, &["kept".to_string()]).unwrap();
        slot.fail_reads = true;

        assert_eq!(load(&slot), default_templates());
        let store = TemplateStore::open(slot);
        assert_eq!(store.templates(), default_templates().as_slice());
        assert_eq!(store.slot().inner.get(TEMPLATES_KEY).unwrap().as_deref(), Some(r#"["kept"]"#));
    }

    #[test]
    fn test_unreadable_empty_slot_is_not_written() {
        let slot = FlakySlot { fail_reads: true, ..Default::default() };
        let store = TemplateStore::open(slot);
        assert_eq!(store.len(), 10);
        assert_eq!(store.slot().inner.get(TEMPLATES_KEY).unwrap(), None);
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let mut slot = MemoryStore::new();
        let list = vec!["a".to_string(), "b".to_string(), "a".to_string()];
        save(&mut slot, &list).unwrap();
        assert_eq!(load(&slot), list);
    }

    #[test]
    fn test_saved_empty_list_is_kept() {
        let mut slot = MemoryStore::new();
        save(&mut slot, &[]).unwrap();
        assert!(load(&slot).is_empty());
    }

    #[test]
    fn test_remove_first_default() {
        let mut store = TemplateStore::open(MemoryStore::new());
        let removed = store.remove_at(0).unwrap();
        assert_eq!(removed, DEFAULT_TEMPLATES[0]);
        assert_eq!(store.len(), 9);
        assert_eq!(store.get(0), Some(DEFAULT_TEMPLATES[1]));
        assert_eq!(persisted(store.slot()).unwrap(), store.templates());
        assert_eq!(persisted(store.slot()).unwrap().len(), 9);
    }

    #[test]
    fn test_remove_middle_shifts_left() {
        let mut store = TemplateStore::open(MemoryStore::new());
        let mut expected = default_templates();
        expected.remove(4);
        store.remove_at(4).unwrap();
        assert_eq!(store.templates(), expected.as_slice());
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut store = TemplateStore::open(MemoryStore::new());
        let err = store.remove_at(10).unwrap_err();
        assert!(matches!(err, QsError::IndexOutOfRange { index: 10, len: 10 }));
        assert_eq!(store.len(), 10);
        assert_eq!(persisted(store.slot()), None);
    }

    #[test]
    fn test_append_persists() {
        let mut store = TemplateStore::open(MemoryStore::new());
        store.append("Merhaba").unwrap();
        assert_eq!(store.len(), 11);
        assert_eq!(store.get(10), Some("Merhaba"));
        assert_eq!(persisted(store.slot()).unwrap(), store.templates());
    }

    #[test]
    fn test_append_allows_duplicates() {
        let mut store = TemplateStore::open(MemoryStore::new());
        store.append(DEFAULT_TEMPLATES[0]).unwrap();
        assert_eq!(store.get(0), store.get(10));
    }

    #[test]
    fn test_append_empty_is_rejected_without_side_effects() {
        let mut store = TemplateStore::open(MemoryStore::new());
        assert!(matches!(store.append(""), Err(QsError::InvalidTemplate)));
        assert_eq!(store.len(), 10);
        assert_eq!(persisted(store.slot()), None);
    }

    #[test]
    fn test_failed_write_rolls_back() {
        let mut store = TemplateStore::open(FlakySlot::default());
        store.append("kept").unwrap();
        store.slot.fail_writes = true;

        assert!(matches!(store.append("lost"), Err(QsError::Storage(_))));
        assert_eq!(store.len(), 11);

        assert!(store.remove_at(3).is_err());
        assert_eq!(store.len(), 11);
        assert_eq!(store.get(3), Some(DEFAULT_TEMPLATES[3]));
        assert_eq!(persisted(store.slot()).unwrap(), store.templates());
    }
}
