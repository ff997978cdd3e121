//! Notification hosts.
//!
//! This module provides:
//! - The [`ToastHost`] seam between request building and the OS service
//! - `WinRtHost`, backed by `Windows.UI.Notifications` (Windows only)
//! - [`RecordingHost`], an in-process host that keeps every document it is shown
//! - AUMID registration for branded notifications

use std::path::PathBuf;

use crate::document::ToastDocument;
use crate::error::HostError;
use crate::template::ToastTemplate;

#[cfg(windows)]
mod aumid;
mod recording;
#[cfg(windows)]
mod winrt;

pub use recording::{HostStage, RecordedDocument, RecordingHost, ShownToast};
#[cfg(windows)]
pub use winrt::{WinRtDocument, WinRtHost};

/// Host used by [`crate::ToastSession::new`] and the C entry points.
#[cfg(windows)]
pub type DefaultHost = WinRtHost;
#[cfg(not(windows))]
pub type DefaultHost = RecordingHost;

/// Slate-800, matching the app icon tile.
pub const DEFAULT_ICON_BACKGROUND: &str = "FF1e293b";

/// Branding for an Application User Model ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppRegistration {
    pub app_id: String,
    pub display_name: String,
    pub icon_path: Option<PathBuf>,
    pub icon_background: String,
}

impl AppRegistration {
    pub fn new(app_id: &str, display_name: &str) -> Self {
        Self {
            app_id: app_id.to_string(),
            display_name: display_name.to_string(),
            icon_path: None,
            icon_background: DEFAULT_ICON_BACKGROUND.to_string(),
        }
    }

    pub fn icon(mut self, path: impl Into<PathBuf>) -> Self {
        self.icon_path = Some(path.into());
        self
    }

    pub fn icon_background(mut self, argb: &str) -> Self {
        self.icon_background = argb.to_string();
        self
    }
}

/// The OS notification service, seen from one thread.
pub trait ToastHost {
    type Document: ToastDocument;

    /// Establishes the calling thread's connection to the service.
    fn initialize(&mut self) -> Result<(), HostError>;

    fn uninitialize(&mut self) -> Result<(), HostError>;

    /// Returns a blank document for one of the fixed templates.
    fn template(&self, template: ToastTemplate) -> Result<Self::Document, HostError>;

    /// Displays `document` under the notifier scoped to `app_id`.
    fn show(&self, document: &Self::Document, app_id: &str) -> Result<(), HostError>;

    fn register_app(&self, registration: &AppRegistration) -> Result<(), HostError>;
}
