use std::path::Path;

use eframe::egui::{self, Slider};

use crate::config::SketchConfig;
use crate::error::ExportError;
use crate::event::SessionEvent;
use crate::renderer::Renderer;
use crate::session::ToolSession;
use crate::settings::ToolKind;

pub struct SketchApp {
    session: ToolSession,
    renderer: Renderer,
    config: SketchConfig,
    /// Whether the pointer was over the canvas last frame
    pointer_inside: bool,
    status: Option<String>,
}

impl SketchApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: SketchConfig) -> Self {
        let mut session = ToolSession::new(&config);

        let egui_ctx = cc.egui_ctx.clone();
        session.subscribe(Box::new(move |event: &SessionEvent| {
            if *event == SessionEvent::StateChanged {
                egui_ctx.request_repaint();
            }
        }));

        Self {
            session,
            renderer: Renderer::new(),
            config,
            pointer_inside: false,
            status: None,
        }
    }

    fn tools_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("tools_panel")
            .resizable(false)
            .default_width(180.0)
            .show(ctx, |ui| {
                ui.heading("Tools");
                ui.separator();

                let settings = self.session.settings().clone();
                if ui
                    .selectable_label(settings.tool == ToolKind::Brush, "🖌 Brush")
                    .clicked()
                {
                    self.session.select_brush(settings.thickness);
                }

                ui.label("Stamps:");
                ui.horizontal_wrapped(|ui| {
                    for glyph in &self.config.stamps {
                        let selected = settings.tool == ToolKind::Stamp && settings.glyph == *glyph;
                        if ui.selectable_label(selected, glyph.as_str()).clicked() {
                            self.session.select_stamp(glyph.clone());
                        }
                    }
                });

                ui.separator();

                ui.horizontal(|ui| {
                    ui.label("Color:");
                    let mut color = settings.color;
                    if egui::color_picker::color_edit_button_srgba(
                        ui,
                        &mut color,
                        egui::color_picker::Alpha::Opaque,
                    )
                    .changed()
                    {
                        self.session.set_color(color);
                    }
                });

                ui.horizontal(|ui| {
                    ui.label("Thickness:");
                    let mut thickness = settings.thickness;
                    let range = self.config.min_thickness..=self.config.max_thickness;
                    if ui.add(Slider::new(&mut thickness, range)).changed() {
                        self.session.set_thickness(thickness);
                    }
                });

                ui.separator();

                let controls = self.session.control_state();
                ui.horizontal(|ui| {
                    if ui
                        .add_enabled(controls.undo_enabled, egui::Button::new("Undo"))
                        .clicked()
                    {
                        self.session.undo();
                    }
                    if ui
                        .add_enabled(controls.redo_enabled, egui::Button::new("Redo"))
                        .clicked()
                    {
                        self.session.redo();
                    }
                    if ui.button("Clear").clicked() {
                        self.session.clear();
                    }
                });

                let history = self.session.history();
                ui.label(format!(
                    "{} drawn, {} undone",
                    history.committed().len(),
                    history.undone().len()
                ));

                ui.separator();

                if ui.button("Export PNG").clicked() {
                    self.export();
                }
                if let Some(status) = &self.status {
                    ui.label(status);
                }
            });
    }

    fn handle_pointer(&mut self, ui: &egui::Ui, response: &egui::Response) {
        let input = CanvasInput::read(ui, response);
        self.pointer_inside = input.apply(&mut self.session, self.pointer_inside);
    }

    fn export(&mut self) {
        let path = self.config.export_file.clone();
        let result = self
            .session
            .export(self.config.export_size)
            .and_then(|bytes| write_export(&path, &bytes));

        self.status = Some(match result {
            Ok(()) => format!("Saved {}", path.display()),
            Err(err) => {
                log::error!("Export failed: {err}");
                err.to_string()
            }
        });
    }
}

/// One frame of pointer input as seen by the canvas
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct CanvasInput {
    /// Canvas-local pointer position, `None` when the canvas is not hovered
    /// (including when a popup covers it)
    local: Option<egui::Vec2>,
    pressed: bool,
    released: bool,
    moved: bool,
}

impl CanvasInput {
    fn read(ui: &egui::Ui, response: &egui::Response) -> Self {
        let rect = response.rect;
        let (pressed, released, moved) = ui.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
                i.pointer.delta() != egui::Vec2::ZERO,
            )
        });
        Self {
            local: response
                .hover_pos()
                .filter(|pos| rect.contains(*pos))
                .map(|pos| pos - rect.min),
            pressed,
            released,
            moved,
        }
    }

    /// Forward to the session. Returns whether the pointer is now inside.
    fn apply(self, session: &mut ToolSession, was_inside: bool) -> bool {
        let Some(local) = self.local else {
            if was_inside {
                session.pointer_leave();
            }
            return false;
        };

        if self.pressed {
            session.pointer_down(local.x, local.y);
        } else if self.moved {
            session.pointer_move(local.x, local.y);
        }
        if self.released {
            session.pointer_up();
        }
        true
    }
}

fn write_export(path: &Path, bytes: &[u8]) -> Result<(), ExportError> {
    std::fs::write(path, bytes).map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })
}

impl eframe::App for SketchApp {
    /// Called each time the UI needs repainting
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.tools_panel(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            let (response, painter) =
                ui.allocate_painter(self.session.canvas_size(), egui::Sense::click_and_drag());
            self.handle_pointer(ui, &response);
            self.renderer.render(&painter, response.rect, &self.session);
        });
    }
}
