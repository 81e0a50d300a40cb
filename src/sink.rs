// This module contains the things a download link can be handed to

use crate::{error::ExportError, export::DownloadLink};

/// Something that can be told to save a link. Fire and forget: `Ok` means
/// the host accepted the request, not that a file exists yet.
pub trait DownloadSink {
    fn download(&mut self, link: &DownloadLink) -> Result<(), ExportError>;
}

/// Saves downloads as files in a directory, for running outside a browser.
#[cfg(not(target_arch = "wasm32"))]
pub struct DirectorySink {
    dir: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl DirectorySink {
    pub fn new(dir: impl Into<std::path::PathBuf>) -> Self {
        DirectorySink { dir: dir.into() }
    }

    pub fn path_for(&self, link: &DownloadLink) -> std::path::PathBuf {
        self.dir.join(&link.download)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl DownloadSink for DirectorySink {
    fn download(&mut self, link: &DownloadLink) -> Result<(), ExportError> {
        let payload = crate::export::payload_from_data_uri(&link.href)?;
        let path = self.path_for(link);
        std::fs::write(&path, payload)?;
        log::info!("saved {}", path.display());
        Ok(())
    }
}

/// The sink the current platform downloads through.
pub fn platform_sink(
    #[allow(unused_variables)] export_dir: &str,
) -> Result<Box<dyn DownloadSink>, ExportError> {
    #[cfg(target_arch = "wasm32")]
    {
        Ok(Box::new(crate::dom::AnchorSink::new(
            crate::web::WebDocument::current()?,
        )))
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        Ok(Box::new(DirectorySink::new(export_dir)))
    }
}
