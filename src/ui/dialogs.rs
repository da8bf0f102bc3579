use adw::prelude::*;
use gtk4 as gtk;
use std::cell::RefCell;
use std::rc::Rc;

use crate::api::client::ApiClient;
use crate::api::models::Contact;
use crate::app::AppState;
use crate::ui::strings;

fn dialog_content() -> gtk::Box {
    let content = gtk::Box::new(gtk::Orientation::Vertical, 12);
    content.set_margin_top(12);
    content.set_margin_bottom(12);
    content.set_margin_start(12);
    content.set_margin_end(12);
    content
}

/// Prompt for a new template. `on_add` only sees confirmed, non-empty text.
pub fn show_add_template_dialog<F: Fn(String) + 'static>(parent: &impl IsA<gtk::Window>, on_add: F) {
    let dialog = gtk::Dialog::builder()
        .title(strings::ADD_TITLE)
        .transient_for(parent)
        .modal(true)
        .build();

    let content = dialog_content();
    let info = gtk::Label::new(Some(strings::ADD_MESSAGE));
    info.set_halign(gtk::Align::Start);
    content.append(&info);

    let entry = gtk::Entry::new();
    entry.set_placeholder_text(Some(strings::ADD_PLACEHOLDER));
    entry.set_hexpand(true);
    entry.set_activates_default(true);
    content.append(&entry);
    dialog.content_area().append(&content);

    let _ = dialog.add_button(strings::CANCEL, gtk::ResponseType::Cancel);
    let ok_btn = dialog.add_button(strings::ADD_CONFIRM, gtk::ResponseType::Ok);
    ok_btn.add_css_class("suggested-action");
    dialog.set_default_response(gtk::ResponseType::Ok);

    dialog.connect_response(move |dlg, resp| {
        if resp == gtk::ResponseType::Ok {
            let text = entry.text().to_string();
            if !text.is_empty() {
                on_add(text);
            }
        }
        dlg.close();
    });

    dialog.present();
}

/// Let the user choose a server contact or type one in. `on_pick` receives
/// `None` when the dialog is cancelled or left empty.
pub fn show_contact_dialog<F>(parent: &impl IsA<gtk::Window>, state: &AppState, overlay: &adw::ToastOverlay, on_pick: F)
where
    F: Fn(Option<Contact>) + 'static,
{
    let dialog = gtk::Dialog::builder()
        .title(strings::PICK_CONTACT)
        .transient_for(parent)
        .modal(true)
        .build();

    let content = dialog_content();
    let info = gtk::Label::new(Some(strings::CONTACT_HINT));
    info.set_halign(gtk::Align::Start);
    content.append(&info);

    let dropdown = gtk::DropDown::from_strings(&[]);
    dropdown.set_hexpand(true);
    dropdown.set_enable_search(true);
    dropdown.set_visible(state.server_configured());
    content.append(&dropdown);

    let name_entry = gtk::Entry::new();
    name_entry.set_placeholder_text(Some(strings::NAME_PLACEHOLDER));
    content.append(&name_entry);

    let number_entry = gtk::Entry::new();
    number_entry.set_placeholder_text(Some(strings::CONTACT_NUMBER_PLACEHOLDER));
    number_entry.set_input_purpose(gtk::InputPurpose::Phone);
    content.append(&number_entry);
    dialog.content_area().append(&content);

    let _ = dialog.add_button(strings::CANCEL, gtk::ResponseType::Cancel);
    let ok_btn = dialog.add_button(strings::CONTACT_CONFIRM, gtk::ResponseType::Ok);
    ok_btn.add_css_class("suggested-action");
    dialog.set_default_response(gtk::ResponseType::Ok);

    let directory: Rc<RefCell<Vec<Contact>>> = Rc::new(RefCell::new(Vec::new()));
    if state.server_configured() {
        let base_url = state.base_url.clone();
        let password = state.password.clone();
        let dropdown = dropdown.clone();
        let directory = directory.clone();
        let overlay = overlay.clone();
        crate::ui::run_async_to_main(
            async move {
                match ApiClient::new(&base_url, &password) {
                    Ok(client) => client.contacts().await,
                    Err(e) => Err(e),
                }
            },
            move |res| match res {
                Ok(contacts) => {
                    let labels: Vec<String> = contacts.iter().map(Contact::label).collect();
                    let refs: Vec<&str> = labels.iter().map(String::as_str).collect();
                    dropdown.set_model(Some(&gtk::StringList::new(&refs)));
                    *directory.borrow_mut() = contacts;
                }
                Err(err) => {
                    log::warn!("contact directory unavailable: {err}");
                    overlay.add_toast(adw::Toast::new(&strings::contacts_failed(&err.to_string())));
                }
            },
        );
    }

    dialog.connect_response(move |dlg, resp| {
        if resp != gtk::ResponseType::Ok {
            on_pick(None);
            dlg.close();
            return;
        }
        let name = name_entry.text().trim().to_string();
        let number = number_entry.text().trim().to_string();
        let picked = if !name.is_empty() || !number.is_empty() {
            Some(Contact {
                full_name: (!name.is_empty()).then_some(name),
                phone_numbers: if number.is_empty() { Vec::new() } else { vec![number] },
            })
        } else {
            directory.borrow().get(dropdown.selected() as usize).cloned()
        };
        on_pick(picked);
        dlg.close();
    });

    dialog.present();
}
