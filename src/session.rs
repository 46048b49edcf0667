//! The tool session: turns pointer and control events into history
//! mutations and preview updates.
//!
//! The session is in one of two states:
//! - `Idle`: pointer up. A preview may be shown at the last pointer position.
//! - `Drawing`: pointer down. Moves extend the newest committed drawable.
//!
//! Every mutation of the committed list, the undone list, the active drawable
//! or the preview is followed by a [`SessionEvent::StateChanged`].

use egui::{Color32, Vec2};
use log::{debug, info};

use crate::config::SketchConfig;
use crate::drawable::{Drawable, Point};
use crate::error::ExportError;
use crate::event::{EventBus, EventHandler, PointerHint, SessionEvent};
use crate::export;
use crate::history::History;
use crate::preview::Preview;
use crate::settings::{ToolKind, ToolSettings};

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Idle { preview: Option<Preview> },
    Drawing,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::Idle { preview: None }
    }
}

impl SessionState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle { .. } => "Idle",
            Self::Drawing => "Drawing",
        }
    }
}

/// Which history buttons the host UI should enable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlState {
    pub undo_enabled: bool,
    pub redo_enabled: bool,
}

impl ControlState {
    pub fn from_history(history: &History) -> Self {
        Self {
            undo_enabled: history.can_undo(),
            redo_enabled: history.can_redo(),
        }
    }
}

#[derive(Debug)]
pub struct ToolSession {
    settings: ToolSettings,
    history: History,
    state: SessionState,
    last_pointer: Option<Point>,
    canvas_size: Vec2,
    background: Color32,
    events: EventBus,
}

impl Default for ToolSession {
    fn default() -> Self {
        Self::new(&SketchConfig::default())
    }
}

impl ToolSession {
    pub fn new(config: &SketchConfig) -> Self {
        Self {
            settings: config.tool_settings(),
            history: History::new(),
            state: SessionState::default(),
            last_pointer: None,
            canvas_size: config.canvas_size(),
            background: config.background_color(),
            events: EventBus::new(),
        }
    }

    pub fn subscribe(&mut self, handler: Box<dyn EventHandler>) {
        self.events.subscribe(handler);
    }

    pub fn settings(&self) -> &ToolSettings {
        &self.settings
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, SessionState::Drawing)
    }

    pub fn preview(&self) -> Option<&Preview> {
        match &self.state {
            SessionState::Idle { preview } => preview.as_ref(),
            SessionState::Drawing => None,
        }
    }

    pub fn committed(&self) -> &[Drawable] {
        self.history.committed()
    }

    pub fn control_state(&self) -> ControlState {
        ControlState::from_history(&self.history)
    }

    pub fn canvas_size(&self) -> Vec2 {
        self.canvas_size
    }

    pub fn background(&self) -> Color32 {
        self.background
    }

    // Tool settings

    pub fn select_brush(&mut self, thickness: f32) {
        self.settings.tool = ToolKind::Brush;
        self.settings.thickness = thickness;
        self.settings_changed();
    }

    pub fn select_stamp(&mut self, glyph: impl Into<String>) {
        self.settings.tool = ToolKind::Stamp;
        self.settings.glyph = glyph.into();
        self.settings_changed();
    }

    pub fn set_color(&mut self, color: Color32) {
        self.settings.color = color;
        self.settings_changed();
    }

    pub fn set_thickness(&mut self, value: f32) {
        self.settings.thickness = value;
        self.settings_changed();
    }

    fn settings_changed(&mut self) {
        debug!("Tool settings now {:?}", self.settings);
        // An active drawable keeps the parameters it was created with
        if self.is_drawing() {
            return;
        }
        if let Some(at) = self.last_pointer {
            self.show_preview(at);
        }
    }

    // Pointer input

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        let at = Point::new(x, y);
        self.last_pointer = Some(at);

        let drawable = Drawable::from_settings(&self.settings, at);
        debug!("{} -> Drawing: new {}", self.state.name(), drawable.kind().name());
        self.history.commit(drawable);
        self.state = SessionState::Drawing;
        self.events.emit(SessionEvent::StateChanged);
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        let at = Point::new(x, y);
        self.last_pointer = Some(at);

        let hint = PointerHint {
            position: at,
            thickness: self.settings.thickness,
            color: (self.settings.tool == ToolKind::Brush).then_some(self.settings.color),
        };
        self.events.emit(SessionEvent::PointerHint(hint.clone()));

        match self.state {
            SessionState::Drawing => {
                if let Some(active) = self.history.active_mut() {
                    active.incorporate(at);
                    self.events.emit(SessionEvent::StateChanged);
                }
            }
            SessionState::Idle { .. } => self.on_pointer_hint(&hint),
        }
    }

    pub fn pointer_up(&mut self) {
        if self.is_drawing() {
            debug!("Drawing -> Idle: pointer up");
            self.state = SessionState::default();
        }
    }

    pub fn pointer_leave(&mut self) {
        self.last_pointer = None;
        let had_preview = self.preview().is_some();
        if self.is_drawing() {
            debug!("Drawing -> Idle: pointer left surface");
        }
        self.state = SessionState::default();
        if had_preview {
            self.events.emit(SessionEvent::StateChanged);
        }
    }

    fn on_pointer_hint(&mut self, hint: &PointerHint) {
        self.show_preview(hint.position);
    }

    fn show_preview(&mut self, at: Point) {
        self.state = SessionState::Idle {
            preview: Some(Preview::from_settings(&self.settings, at)),
        };
        self.events.emit(SessionEvent::StateChanged);
    }

    // History

    pub fn undo(&mut self) -> bool {
        self.end_drawing();
        let changed = self.history.undo();
        if changed {
            info!("Undo ({} committed left)", self.history.committed().len());
            self.events.emit(SessionEvent::StateChanged);
        }
        changed
    }

    pub fn redo(&mut self) -> bool {
        self.end_drawing();
        let changed = self.history.redo();
        if changed {
            info!("Redo ({} committed)", self.history.committed().len());
            self.events.emit(SessionEvent::StateChanged);
        }
        changed
    }

    /// Empty both stacks. Not undoable.
    pub fn clear(&mut self) {
        self.end_drawing();
        info!(
            "Clearing {} committed and {} undone drawables",
            self.history.committed().len(),
            self.history.undone().len()
        );
        self.history.clear();
        self.events.emit(SessionEvent::StateChanged);
    }

    /// Stop extending the newest drawable so a later move cannot touch
    /// one that was undone or cleared
    fn end_drawing(&mut self) {
        if self.is_drawing() {
            debug!("Drawing -> Idle: history changed");
            self.state = SessionState::default();
        }
    }

    /// Render the committed drawables to PNG, scaled so the canvas width
    /// becomes `target_size`. The preview is never included.
    pub fn export(&self, target_size: u32) -> Result<Vec<u8>, ExportError> {
        export::export_png(
            self.history.committed(),
            self.canvas_size,
            target_size,
            self.background,
        )
    }
}
