use egui::{CentralPanel, Color32, Context, RichText, ScrollArea, TextEdit, TextStyle, Ui};
use serde::{Deserialize, Serialize};

use crate::{
    export::{file_name, ExportRequest},
    highlight::layouter,
    sink::platform_sink,
};

#[derive(Serialize, Deserialize)]
#[serde(default)]
pub struct EditorState {
    payload: String,
    export_name: String,
    // only used natively, the browser picks its own download folder
    export_dir: String,
    #[serde(skip)]
    status: Status,
}

#[derive(Default)]
enum Status {
    #[default]
    None,
    Exported(String),
    Failed(String),
}

impl Default for EditorState {
    fn default() -> Self {
        Self {
            payload: include_str!("../payloads/sample.json").into(),
            export_name: "export".into(),
            export_dir: ".".into(),
            status: Default::default(),
        }
    }
}

impl EditorState {
    pub fn set_export_dir(&mut self, dir: impl Into<String>) {
        self.export_dir = dir.into();
    }

    fn request(&self) -> ExportRequest {
        ExportRequest::new(self.payload.as_str(), self.export_name.as_str())
    }

    fn export(&mut self) {
        self.send(self.request());
    }

    /// Sends `request` through the platform sink and shows the outcome in the status line.
    pub fn send(&mut self, request: ExportRequest) {
        let res = platform_sink(&self.export_dir).and_then(|mut sink| request.send(sink.as_mut()));
        match res {
            Ok(()) => self.status = Status::Exported(file_name(&request.export_name)),
            Err(e) => self.report_failure(e),
        }
    }

    pub(crate) fn status_text(&self) -> Option<String> {
        match &self.status {
            Status::None => None,
            Status::Exported(name) => Some(format!("Exported '{name}'")),
            Status::Failed(e) => Some(format!("Export failed!\n{e}")),
        }
    }

    pub fn report_failure(&mut self, e: impl std::fmt::Display) {
        log::error!("export failed: {e}");
        self.status = Status::Failed(e.to_string());
    }

    fn format(&mut self) {
        match serde_json::from_str::<serde_json::Value>(&self.payload)
            .and_then(|v| serde_json::to_string_pretty(&v))
        {
            Ok(pretty) => self.payload = pretty,
            Err(e) => log::warn!("not formatting, payload is not json: {e}"),
        }
    }

    fn import(&mut self, name: &str, bytes: &[u8]) {
        match String::from_utf8(bytes.to_vec()) {
            Ok(s) => {
                self.payload = s;
                self.export_name = import_name(name);
                self.status = Status::None;
            }
            Err(e) => {
                self.status = Status::Failed(format!("'{name}' is not utf-8 text: {e}"));
            }
        }
    }
}

// a dropped "state.json" should export as "state.json" again, not "state.json.json"
fn import_name(file_name: &str) -> String {
    std::path::Path::new(file_name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "export".into())
}

pub fn ui(ctx: &Context, state: &mut EditorState) {
    import_files(ctx, state);

    CentralPanel::default().show(ctx, |ui| {
        payload_ui(ui, state);

        ui.separator();

        export_ui(ui, state);

        status_ui(ui, state);

        if ui.small_button("Reset").clicked() {
            *state = EditorState::default();
            ctx.memory_mut(|m| *m = Default::default());
        }
    });
}

fn import_files(ctx: &Context, state: &mut EditorState) {
    let dropped = ctx.input(|i| i.raw.dropped_files.clone());
    for file in dropped {
        if let Some(bytes) = &file.bytes {
            state.import(&file.name, bytes);
            continue;
        }

        #[cfg(not(target_arch = "wasm32"))]
        if let Some(path) = &file.path {
            let name = path.to_string_lossy();
            match std::fs::read(path) {
                Ok(bytes) => state.import(&name, &bytes),
                Err(e) => state.status = Status::Failed(format!("failed to read '{name}': {e}")),
            }
        }
    }
}

fn payload_ui(ui: &mut Ui, state: &mut EditorState) {
    ui.heading("Payload");
    ui.label("Drag and drop a file to import it!");

    ScrollArea::both()
        .id_source("payload")
        .max_height(400.0)
        .show(ui, |ui| {
            ui.add(
                TextEdit::multiline(&mut state.payload)
                    .font(TextStyle::Monospace)
                    .code_editor()
                    .desired_rows(20)
                    .lock_focus(true)
                    .desired_width(f32::INFINITY)
                    .layouter(&mut layouter()),
            );
        });

    ui.horizontal(|ui| {
        match serde_json::from_str::<serde::de::IgnoredAny>(&state.payload) {
            Ok(_) => ui.label(RichText::new("Valid JSON").color(Color32::LIGHT_GREEN)),
            Err(e) => ui.label(
                RichText::new(format!("Not valid JSON ({e}), it will be exported as is"))
                    .color(Color32::YELLOW),
            ),
        };

        if ui.button("Format").clicked() {
            state.format();
        }
    });
}

fn export_ui(ui: &mut Ui, state: &mut EditorState) {
    ui.heading("Export");

    ui.horizontal(|ui| {
        ui.label("Name:");
        ui.add(TextEdit::singleline(&mut state.export_name).desired_width(200.0));
        ui.label(format!("Saves as '{}'", file_name(&state.export_name)));
    });

    #[cfg(not(target_arch = "wasm32"))]
    ui.horizontal(|ui| {
        ui.label("Directory:");
        ui.add(TextEdit::singleline(&mut state.export_dir).desired_width(200.0));
    });

    if ui.button("Export").clicked() {
        state.export();
    }
}

fn status_ui(ui: &mut Ui, state: &EditorState) {
    let Some(text) = state.status_text() else {
        return;
    };
    match state.status {
        Status::Failed(_) => ui.label(RichText::new(text).color(Color32::RED)),
        _ => ui.label(text),
    };
}
