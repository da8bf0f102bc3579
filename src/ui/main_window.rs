use adw::prelude::*;
use adw::Application;
use gtk4 as gtk;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use tokio::sync::mpsc;

use crate::api::models::Contact;
use crate::app::AppState;
use crate::compose::{self, ComposeOutcome};
use crate::error::QsError;
use crate::presenter::Presenter;
use crate::storage::{KeyValueStore, MemoryStore};
use crate::templates::TemplateStore;
use crate::ui::dialogs;
use crate::ui::strings;
use crate::ui::template_list::TemplateList;

type SlotPresenter = Presenter<Box<dyn KeyValueStore>>;

struct Screen {
    state: AppState,
    presenter: RefCell<SlotPresenter>,
    window: adw::ApplicationWindow,
    overlay: adw::ToastOverlay,
    list: TemplateList,
    contact_btn: gtk::Button,
    name_entry: gtk::Entry,
    body_view: gtk::TextView,
}

impl Screen {
    fn toast(&self, text: &str) {
        self.overlay.add_toast(adw::Toast::new(text));
    }

    fn refresh_list(self: &Rc<Self>) {
        let items = self.presenter.borrow().templates().templates().to_vec();
        let weak: Weak<Self> = Rc::downgrade(self);
        self.list.set_items(
            &items,
            Rc::new(move |index| {
                if let Some(screen) = weak.upgrade() {
                    screen.delete_row(index);
                }
            }),
        );
    }

    /// Pull what the user typed into the presenter.
    fn read_fields(&self) {
        let buffer = self.body_view.buffer();
        let body = buffer.text(&buffer.start_iter(), &buffer.end_iter(), false);
        let mut presenter = self.presenter.borrow_mut();
        presenter.set_body(&body);
        presenter.set_name_field(&self.name_entry.text());
    }

    fn write_fields(&self) {
        let (body, name) = {
            let presenter = self.presenter.borrow();
            (presenter.body().to_string(), presenter.name_field().to_string())
        };
        self.body_view.buffer().set_text(&body);
        self.name_entry.set_text(&name);
    }

    fn select_row(&self, index: usize) {
        self.read_fields();
        let res = self.presenter.borrow_mut().select_row(index);
        match res {
            Ok(()) => self.write_fields(),
            Err(e) => log::warn!("row select ignored: {e}"),
        }
    }

    fn delete_row(self: &Rc<Self>, index: usize) {
        let res = self.presenter.borrow_mut().delete_row(index);
        if let Err(e) = res {
            log::warn!("delete failed: {e}");
            self.toast(&strings::storage_failed(&e.to_string()));
        }
        self.refresh_list();
    }

    fn add_template(self: &Rc<Self>, text: &str) {
        let res = self.presenter.borrow_mut().add_template(text);
        match res {
            Ok(()) => self.refresh_list(),
            Err(QsError::InvalidTemplate) => {}
            Err(e) => {
                log::warn!("add failed: {e}");
                self.toast(&strings::storage_failed(&e.to_string()));
            }
        }
    }

    fn apply_pick(&self, contact: Option<Contact>) {
        self.read_fields();
        let name = self
            .presenter
            .borrow_mut()
            .apply_pick(contact)
            .map(|s| s.display_name().to_string());
        if let Some(name) = name {
            self.contact_btn.set_label(&name);
            self.write_fields();
        }
    }

    fn send(&self) {
        self.read_fields();
        let res = self.presenter.borrow_mut().send();
        match res {
            Ok(ComposeOutcome::Failed) => self.toast(strings::SEND_FAILED),
            Ok(_) => {}
            Err(QsError::EmptyBody) => {}
            Err(QsError::ComposerUnavailable(_)) => self.toast(strings::SMS_UNAVAILABLE),
            Err(e) => self.toast(&e.to_string()),
        }
    }
}

fn open_presenter(state: &AppState, overlay: &adw::ToastOverlay) -> SlotPresenter {
    let slot: Box<dyn KeyValueStore> = match state.open_slot() {
        Ok(slot) => Box::new(slot),
        Err(e) => {
            log::error!("template storage unavailable, keeping templates in memory: {e}");
            overlay.add_toast(adw::Toast::new(strings::TEMPLATES_NOT_SAVED));
            Box::new(MemoryStore::new())
        }
    };

    let (failures, mut failed) = mpsc::unbounded_channel::<String>();
    {
        let overlay = overlay.clone();
        gtk::glib::spawn_future_local(async move {
            while let Some(err) = failed.recv().await {
                log::warn!("send did not go through: {err}");
                overlay.add_toast(adw::Toast::new(strings::SEND_FAILED));
            }
        });
    }

    Presenter::new(
        TemplateStore::open(slot),
        compose::from_state(state, Some(failures)),
        &state.unknown_contact_label,
    )
}

pub fn show_main_window(app: &Application, state: AppState) {
    let window = adw::ApplicationWindow::builder()
        .application(app)
        .title(strings::APP_TITLE)
        .default_width(420)
        .default_height(720)
        .build();

    let overlay = adw::ToastOverlay::new();

    let header = adw::HeaderBar::new();
    let title = gtk::Label::new(Some(strings::APP_TITLE));
    header.set_title_widget(Some(&title));
    let contact_btn = gtk::Button::with_label(strings::PICK_CONTACT);
    header.pack_start(&contact_btn);
    let add_btn = gtk::Button::from_icon_name("list-add-symbolic");
    header.pack_end(&add_btn);

    let root = gtk::Box::new(gtk::Orientation::Vertical, 8);
    root.set_margin_top(12);
    root.set_margin_bottom(12);
    root.set_margin_start(12);
    root.set_margin_end(12);

    let name_entry = gtk::Entry::new();
    name_entry.set_placeholder_text(Some(strings::NAME_PLACEHOLDER));
    root.append(&name_entry);

    let body_view = gtk::TextView::new();
    body_view.set_wrap_mode(gtk::WrapMode::WordChar);
    body_view.set_top_margin(6);
    body_view.set_bottom_margin(6);
    body_view.set_left_margin(6);
    body_view.set_right_margin(6);
    let body_frame = gtk::Frame::new(None);
    body_frame.set_child(Some(&body_view));
    body_frame.set_size_request(-1, 120);
    root.append(&body_frame);

    let send_btn = gtk::Button::with_label(strings::SEND);
    send_btn.add_css_class("suggested-action");
    send_btn.set_halign(gtk::Align::End);
    root.append(&send_btn);

    let list = TemplateList::new();
    root.append(&list.widget());

    overlay.set_child(Some(&root));
    let container = gtk::Box::new(gtk::Orientation::Vertical, 0);
    container.append(&header);
    container.append(&overlay);
    window.set_content(Some(&container));

    let presenter = open_presenter(&state, &overlay);
    let screen = Rc::new(Screen {
        state,
        presenter: RefCell::new(presenter),
        window: window.clone(),
        overlay,
        list,
        contact_btn: contact_btn.clone(),
        name_entry,
        body_view,
    });
    screen.refresh_list();

    {
        let weak = Rc::downgrade(&screen);
        screen.list.connect_selected(move |index| {
            if let Some(screen) = weak.upgrade() {
                screen.select_row(index);
            }
        });
    }
    {
        let weak = Rc::downgrade(&screen);
        send_btn.connect_clicked(move |_| {
            if let Some(screen) = weak.upgrade() {
                screen.send();
            }
        });
    }
    {
        let weak = Rc::downgrade(&screen);
        add_btn.connect_clicked(move |_| {
            let Some(screen) = weak.upgrade() else { return };
            let weak = Rc::downgrade(&screen);
            dialogs::show_add_template_dialog(&screen.window, move |text| {
                if let Some(screen) = weak.upgrade() {
                    screen.add_template(&text);
                }
            });
        });
    }
    {
        let weak = Rc::downgrade(&screen);
        contact_btn.connect_clicked(move |_| {
            let Some(screen) = weak.upgrade() else { return };
            let weak = Rc::downgrade(&screen);
            dialogs::show_contact_dialog(&screen.window, &screen.state, &screen.overlay, move |contact| {
                if let Some(screen) = weak.upgrade() {
                    screen.apply_pick(contact);
                }
            });
        });
    }

    // Keeps the screen alive for as long as the window is open.
    {
        let screen = screen.clone();
        window.connect_close_request(move |_| {
            log::debug!("closing with {} templates", screen.presenter.borrow().row_count());
            gtk::glib::Propagation::Proceed
        });
    }

    window.present();
}
