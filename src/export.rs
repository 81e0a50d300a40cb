// This module turns a text payload and a base-name into a download link and hands it to a sink

use log::debug;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;

use crate::{error::ExportError, sink::DownloadSink};

pub const DATA_URI_PREFIX: &str = "data:text/json;charset=utf-8,";
pub const FILE_EXTENSION: &str = ".json";

/// Everything `encodeURIComponent` escapes: all but `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// A payload waiting to be saved as `<export_name>.json`.
///
/// The payload is expected to be JSON already; nothing here checks that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    pub payload: String,
    pub export_name: String,
}

impl ExportRequest {
    pub fn new(payload: impl Into<String>, export_name: impl Into<String>) -> Self {
        ExportRequest {
            payload: payload.into(),
            export_name: export_name.into(),
        }
    }

    pub fn from_value<T: Serialize + ?Sized>(
        value: &T,
        export_name: impl Into<String>,
    ) -> anyhow::Result<Self> {
        Ok(Self::new(serde_json::to_string(value)?, export_name))
    }

    pub fn from_value_pretty<T: Serialize + ?Sized>(
        value: &T,
        export_name: impl Into<String>,
    ) -> anyhow::Result<Self> {
        Ok(Self::new(serde_json::to_string_pretty(value)?, export_name))
    }

    pub fn link(&self) -> DownloadLink {
        DownloadLink {
            href: data_uri(&self.payload),
            download: file_name(&self.export_name),
        }
    }

    pub fn send(&self, sink: &mut dyn DownloadSink) -> Result<(), ExportError> {
        let link = self.link();
        debug!(
            "exporting {} ({} bytes of payload)",
            link.download,
            self.payload.len()
        );
        sink.download(&link)
    }
}

/// What a sink is asked to do: offer `href` for saving under the name `download`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadLink {
    pub href: String,
    pub download: String,
}

pub fn data_uri(payload: &str) -> String {
    format!("{DATA_URI_PREFIX}{}", utf8_percent_encode(payload, URI_COMPONENT))
}

pub fn file_name(export_name: &str) -> String {
    format!("{export_name}{FILE_EXTENSION}")
}

pub fn payload_from_data_uri(uri: &str) -> Result<String, ExportError> {
    let encoded = uri
        .strip_prefix(DATA_URI_PREFIX)
        .ok_or_else(|| ExportError::MalformedDataUri(format!("missing '{DATA_URI_PREFIX}'")))?;
    percent_decode_str(encoded)
        .decode_utf8()
        .map(|payload| payload.into_owned())
        .map_err(|e| ExportError::MalformedDataUri(e.to_string()))
}

/// Offer `payload` to the host as `<export_name>.json`.
///
/// Returns once the sink has been given the link; the download itself
/// carries on without us.
pub fn trigger_json_download(
    sink: &mut dyn DownloadSink,
    payload: &str,
    export_name: &str,
) -> Result<(), ExportError> {
    ExportRequest::new(payload, export_name).send(sink)
}
