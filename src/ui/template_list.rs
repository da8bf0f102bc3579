use gtk4 as gtk;
use gtk4::prelude::*;
use std::rc::Rc;

use crate::ui::strings;

/// Scrollable template rows, each with its own delete button.
pub struct TemplateList {
    root: gtk::ScrolledWindow,
    list: gtk::ListBox,
}

impl TemplateList {
    pub fn new() -> Self {
        let list = gtk::ListBox::new();
        list.set_selection_mode(gtk::SelectionMode::None);
        list.set_activate_on_single_click(true);
        list.add_css_class("boxed-list");

        let root = gtk::ScrolledWindow::builder()
            .vexpand(true)
            .hexpand(true)
            .child(&list)
            .build();

        Self { root, list }
    }

    pub fn widget(&self) -> gtk::Widget {
        self.root.clone().upcast()
    }

    pub fn connect_selected<F: Fn(usize) + 'static>(&self, on_select: F) {
        self.list.connect_row_activated(move |_, row| {
            if let Ok(index) = usize::try_from(row.index()) {
                on_select(index);
            }
        });
    }

    pub fn set_items(&self, items: &[String], on_delete: Rc<dyn Fn(usize)>) {
        while let Some(child) = self.list.first_child() {
            self.list.remove(&child);
        }
        for text in items {
            let row = gtk::ListBoxRow::new();
            let line = gtk::Box::new(gtk::Orientation::Horizontal, 8);
            line.set_margin_top(8);
            line.set_margin_bottom(8);
            line.set_margin_start(8);
            line.set_margin_end(8);

            let label = gtk::Label::new(Some(text.as_str()));
            label.set_halign(gtk::Align::Start);
            label.set_hexpand(true);
            label.set_wrap(true);
            label.set_xalign(0.0);
            line.append(&label);

            let delete_btn = gtk::Button::with_label(strings::DELETE);
            delete_btn.add_css_class("destructive-action");
            delete_btn.set_valign(gtk::Align::Center);
            {
                let row = row.clone();
                let on_delete = on_delete.clone();
                delete_btn.connect_clicked(move |_| {
                    if let Ok(index) = usize::try_from(row.index()) {
                        (on_delete)(index);
                    }
                });
            }
            line.append(&delete_btn);

            row.set_child(Some(&line));
            self.list.append(&row);
        }
    }
}
