pub mod api;
pub mod app;
pub mod compose;
pub mod error;
pub mod logging;
pub mod presenter;
pub mod selection;
pub mod storage;
pub mod templates;
pub mod utils;

#[cfg(feature = "gui")]
pub mod ui;
