/// User intents raised by buttons, keyboard shortcuts and surface clicks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UiAction {
    Play,
    ResetPose,
    EnterPresentation,
    ExitPresentation,
    /// Click on the rendering surface; toggles play/pause.
    SurfaceClick,
}

/// A button to show in the host's control bar.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ButtonSpec {
    pub label: String,
    pub shortcut: String,
    pub icon: Option<String>,
    pub action: UiAction,
}

impl ButtonSpec {
    pub fn new(label: impl Into<String>, shortcut: impl Into<String>, action: UiAction) -> Self {
        Self {
            label: label.into(),
            shortcut: shortcut.into(),
            icon: None,
            action,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn play() -> Self {
        Self::new("Play", "space", UiAction::Play).with_icon("play-icon")
    }

    pub fn reset_pose() -> Self {
        Self::new("Reset", "R", UiAction::ResetPose)
    }

    pub fn enter_presentation() -> Self {
        Self::new("Enter VR", "E", UiAction::EnterPresentation).with_icon("cardboard-icon")
    }

    pub fn exit_presentation() -> Self {
        Self::new("Exit VR", "E", UiAction::ExitPresentation).with_icon("cardboard-icon")
    }
}

/// Opaque handle to a button previously added to a [`ControlSurface`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ButtonId(pub u64);

/// Host control bar collaborator.
pub trait ControlSurface {
    fn add_button(&mut self, spec: ButtonSpec) -> ButtonId;

    /// Removing an unknown id is a no-op.
    fn remove_button(&mut self, id: ButtonId);
}

/// In-memory control bar that keeps buttons in insertion order.
#[derive(Debug, Default)]
pub struct HeadlessControls {
    next_id: u64,
    buttons: Vec<(ButtonId, ButtonSpec)>,
}

impl HeadlessControls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buttons(&self) -> impl Iterator<Item = &ButtonSpec> {
        self.buttons.iter().map(|(_, spec)| spec)
    }

    pub fn labels(&self) -> Vec<&str> {
        self.buttons().map(|b| b.label.as_str()).collect()
    }

    pub fn contains(&self, action: UiAction) -> bool {
        self.buttons().any(|b| b.action == action)
    }
}

impl ControlSurface for HeadlessControls {
    fn add_button(&mut self, spec: ButtonSpec) -> ButtonId {
        let id = ButtonId(self.next_id);
        self.next_id += 1;
        self.buttons.push((id, spec));
        id
    }

    fn remove_button(&mut self, id: ButtonId) {
        self.buttons.retain(|(existing, _)| *existing != id);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ui/controls.rs"]
mod tests;
