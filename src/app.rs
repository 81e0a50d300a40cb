use egui::{Context, TopBottomPanel};

use crate::{
    editor::{ui, EditorState},
    export::ExportRequest,
};

const SNAPSHOT_NAME: &str = "json-export-session";

/// The exporter window: a menu bar over the payload editor.
#[derive(serde::Deserialize, serde::Serialize, Default)]
#[serde(default)]
pub struct App {
    state: EditorState,
}

impl App {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        cc.storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default()
    }

    /// Downloads the whole session (payload, name, directory) as json,
    /// the same payload eframe persists between runs. The outcome lands in
    /// the editor's status line.
    fn export_session(&mut self) {
        match ExportRequest::from_value_pretty(&*self, SNAPSHOT_NAME) {
            Ok(request) => self.state.send(request),
            Err(e) => self.state.report_failure(format!("failed to serialize session: {e:#}")),
        }
    }

    fn menu_ui(&mut self, ctx: &Context) {
        TopBottomPanel::top("menu").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Export session").clicked() {
                        self.export_session();
                        ui.close_menu();
                    }

                    #[cfg(not(target_arch = "wasm32"))]
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
            });
        });
    }
}

impl eframe::App for App {
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self);
    }

    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.menu_ui(ctx);
        ui(ctx, &mut self.state)
    }
}
