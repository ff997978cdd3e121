//! Notification requests, built fresh for every call.

use crate::normalize::path_to_uri;
use crate::template::{ToastDuration, ToastTemplate};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastImage {
    /// Already normalized, see [`path_to_uri`].
    pub uri: String,
    pub alt_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastRequest {
    pub app_id: String,
    pub title: String,
    pub message: String,
    pub duration: Option<ToastDuration>,
    pub image: Option<ToastImage>,
}

impl ToastRequest {
    pub fn new(app_id: &str, title: &str, message: &str) -> Self {
        Self {
            app_id: app_id.to_string(),
            title: title.to_string(),
            message: message.to_string(),
            duration: None,
            image: None,
        }
    }

    pub fn duration(mut self, duration: ToastDuration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Attaches an image given as a local path or URI.
    pub fn image(mut self, path: &str, alt_text: Option<&str>) -> Self {
        self.image = Some(ToastImage {
            uri: path_to_uri(path),
            alt_text: alt_text.map(str::to_string),
        });
        self
    }

    pub fn template(&self) -> ToastTemplate {
        if self.image.is_some() {
            ToastTemplate::ImageAndText
        } else {
            ToastTemplate::TextOnly
        }
    }

    /// Short label used in error messages and logs.
    pub fn kind(&self) -> &'static str {
        match (&self.image, &self.duration) {
            (Some(_), _) => "image",
            (None, Some(_)) => "duration",
            (None, None) => "simple",
        }
    }
}
