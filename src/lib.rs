#![warn(clippy::all, rust_2018_idioms)]

mod app;
pub use app::App;
pub mod dom;
pub mod editor;
pub mod error;
pub mod export;
pub mod highlight;
pub mod sink;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use error::ExportError;
pub use export::{trigger_json_download, DownloadLink, ExportRequest};
pub use sink::DownloadSink;
