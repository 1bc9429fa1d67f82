//! # Host Collaborators
//!
//! What the editor needs from the page embedding it: somewhere to mount the
//! preview surface and a UI to show panels, code and notifications. The
//! engine owns no host state; these traits are its only way out.

use crate::panel::{PropertiesPanel, ToolbarButton};
use crate::preview::{HeadlessSurface, PreviewSurface};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// How long notifications stay up before the host dismisses them
pub const NOTIFICATION_DURATION_MS: u64 = 3000;

/// Mount contract: resolve a container id to a preview surface
pub trait HostPage {
    type Surface: PreviewSurface;

    /// `None` when no element with `container_id` exists
    fn create_surface(&mut self, container_id: &str) -> Option<Self::Surface>;
}

/// Host page with a fixed set of container ids and headless surfaces
#[derive(Debug, Default, Clone)]
pub struct HeadlessHost {
    pub containers: HashSet<String>,
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_container(mut self, id: impl Into<String>) -> Self {
        self.add_container(id);
        self
    }

    pub fn add_container(&mut self, id: impl Into<String>) {
        self.containers.insert(id.into());
    }
}

impl HostPage for HeadlessHost {
    type Surface = HeadlessSurface;

    fn create_surface(&mut self, container_id: &str) -> Option<HeadlessSurface> {
        self.containers
            .contains(container_id)
            .then(HeadlessSurface::new)
    }
}

/// Editor tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorTab {
    #[default]
    Design,
    Code,
}

impl EditorTab {
    pub fn as_str(&self) -> &'static str {
        match self {
            EditorTab::Design => "design",
            EditorTab::Code => "code",
        }
    }
}

impl fmt::Display for EditorTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EditorTab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "design" => Ok(EditorTab::Design),
            "code" => Ok(EditorTab::Code),
            other => Err(format!("Unknown tab: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

/// Toast-style message; the host schedules dismissal after `duration_ms`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    pub duration_ms: u64,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, NotificationKind::Success)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, NotificationKind::Error)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, NotificationKind::Info)
    }

    fn new(message: impl Into<String>, kind: NotificationKind) -> Self {
        Self {
            message: message.into(),
            kind,
            duration_ms: NOTIFICATION_DURATION_MS,
        }
    }
}

/// Editor chrome outside the preview surface
pub trait HostUi {
    /// Block buttons, in registry order
    fn render_toolbar(&mut self, buttons: &[ToolbarButton]);

    /// Full properties panel render (selection changed)
    fn render_properties(&mut self, panel: &PropertiesPanel);

    /// Incremental refresh of the validation slot only (property edited)
    fn refresh_validation(&mut self, message: Option<&str>);

    fn show_tab(&mut self, tab: EditorTab);

    /// Exported document for the code tab
    fn show_code(&mut self, code: &str);

    fn notify(&mut self, notification: &Notification);
}

/// Ignores everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullUi;

impl HostUi for NullUi {
    fn render_toolbar(&mut self, _buttons: &[ToolbarButton]) {}
    fn render_properties(&mut self, _panel: &PropertiesPanel) {}
    fn refresh_validation(&mut self, _message: Option<&str>) {}
    fn show_tab(&mut self, _tab: EditorTab) {}
    fn show_code(&mut self, _code: &str) {}
    fn notify(&mut self, _notification: &Notification) {}
}

/// A call made on [`RecordingUi`]
#[derive(Debug, Clone, PartialEq)]
pub enum UiCall {
    Toolbar(Vec<ToolbarButton>),
    Properties(PropertiesPanel),
    Validation(Option<String>),
    Tab(EditorTab),
    Code(String),
    Notify(Notification),
}

/// Records every call, in order
#[derive(Debug, Default, Clone)]
pub struct RecordingUi {
    pub calls: Vec<UiCall>,
}

impl RecordingUi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    pub fn last_panel(&self) -> Option<&PropertiesPanel> {
        self.calls.iter().rev().find_map(|call| match call {
            UiCall::Properties(panel) => Some(panel),
            _ => None,
        })
    }

    pub fn notifications(&self) -> Vec<&Notification> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                UiCall::Notify(n) => Some(n),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, matches: impl Fn(&UiCall) -> bool) -> usize {
        self.calls.iter().filter(|call| matches(call)).count()
    }
}

impl HostUi for RecordingUi {
    fn render_toolbar(&mut self, buttons: &[ToolbarButton]) {
        self.calls.push(UiCall::Toolbar(buttons.to_vec()));
    }

    fn render_properties(&mut self, panel: &PropertiesPanel) {
        self.calls.push(UiCall::Properties(panel.clone()));
    }

    fn refresh_validation(&mut self, message: Option<&str>) {
        self.calls.push(UiCall::Validation(message.map(str::to_string)));
    }

    fn show_tab(&mut self, tab: EditorTab) {
        self.calls.push(UiCall::Tab(tab));
    }

    fn show_code(&mut self, code: &str) {
        self.calls.push(UiCall::Code(code.to_string()));
    }

    fn notify(&mut self, notification: &Notification) {
        self.calls.push(UiCall::Notify(notification.clone()));
    }
}
