//! User-facing copy for the GTK front-end.

pub const APP_TITLE: &str = "QuickSMS";
pub const PICK_CONTACT: &str = "Kişi Seç";
pub const NAME_PLACEHOLDER: &str = "İsim";
pub const SEND: &str = "Gönder";
pub const DELETE: &str = "Sil";

pub const ADD_TITLE: &str = "Yeni Şablon";
pub const ADD_MESSAGE: &str = "Mesaj içeriğini girin";
pub const ADD_PLACEHOLDER: &str = "Örn: Merhaba, randevunuz...";
pub const ADD_CONFIRM: &str = "Ekle";
pub const CANCEL: &str = "İptal";

pub const CONTACT_HINT: &str = "Listeden bir kişi seçin ya da isim ve numara yazın:";
pub const CONTACT_NUMBER_PLACEHOLDER: &str = "Telefon numarası";
pub const CONTACT_CONFIRM: &str = "Seç";

pub const SMS_UNAVAILABLE: &str = "SMS gönderilemiyor";
pub const SEND_FAILED: &str = "Mesaj gönderilemedi";
pub const TEMPLATES_NOT_SAVED: &str = "Şablonlar bu oturumdan sonra saklanmayacak";

pub fn storage_failed(err: &str) -> String {
    format!("Şablonlar kaydedilemedi: {err}")
}

pub fn contacts_failed(err: &str) -> String {
    format!("Kişiler yüklenemedi: {err}")
}
