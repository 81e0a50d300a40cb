use wasm_bindgen::{prelude::*, JsCast};
use web_sys::HtmlAnchorElement;

use crate::{
    dom::{AnchorSink, Document},
    error::ExportError,
    export::trigger_json_download,
};

/// The page's own `document`.
pub struct WebDocument {
    document: web_sys::Document,
}

impl WebDocument {
    pub fn current() -> Result<Self, ExportError> {
        let window = web_sys::window().ok_or(ExportError::HostUnavailable("window"))?;
        let document = window
            .document()
            .ok_or(ExportError::HostUnavailable("document"))?;
        Ok(WebDocument { document })
    }
}

fn rejected(op: &'static str) -> impl FnOnce(JsValue) -> ExportError {
    move |e| ExportError::primitive(op, e.as_string().unwrap_or_else(|| format!("{e:?}")))
}

impl Document for WebDocument {
    type Anchor = HtmlAnchorElement;

    fn create_anchor(&self) -> Result<HtmlAnchorElement, ExportError> {
        self.document
            .create_element("a")
            .map_err(rejected("createElement"))?
            .dyn_into::<HtmlAnchorElement>()
            .map_err(|_| ExportError::primitive("createElement", "not an anchor"))
    }

    fn set_attribute(
        &self,
        anchor: &HtmlAnchorElement,
        name: &str,
        value: &str,
    ) -> Result<(), ExportError> {
        anchor
            .set_attribute(name, value)
            .map_err(rejected("setAttribute"))
    }

    fn append_to_body(&self, anchor: &HtmlAnchorElement) -> Result<(), ExportError> {
        let body = self
            .document
            .body()
            .ok_or(ExportError::HostUnavailable("body"))?;
        body.append_child(anchor).map_err(rejected("appendChild"))?;
        Ok(())
    }

    fn click(&self, anchor: &HtmlAnchorElement) {
        anchor.click();
    }

    fn remove(&self, anchor: &HtmlAnchorElement) {
        anchor.remove();
    }
}

/// Make the browser download `payload` as `<exportName>.json`.
#[wasm_bindgen(js_name = triggerJsonDownload)]
pub fn trigger_json_download_js(payload: &str, export_name: &str) -> Result<(), JsValue> {
    let mut sink = AnchorSink::new(WebDocument::current().map_err(to_js)?);
    trigger_json_download(&mut sink, payload, export_name).map_err(to_js)
}

fn to_js(e: ExportError) -> JsValue {
    JsValue::from_str(&e.to_string())
}
