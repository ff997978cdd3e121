//! Per-thread connection to the notification service.

use std::marker::PhantomData;

use crate::config::ToastConfig;
use crate::document::build_document;
use crate::error::{Result, ToastError};
use crate::host::{AppRegistration, DefaultHost, ToastHost};
use crate::request::ToastRequest;
use crate::template::ToastDuration;

/// A live host connection. Constructing it initializes the host on the
/// calling thread and dropping it tears the connection down.
///
/// The session is neither `Send` nor `Sync`: the WinRT apartment belongs to
/// the thread that created it.
pub struct ToastSession<H: ToastHost = DefaultHost> {
    host: H,
    config: ToastConfig,
    _thread_bound: PhantomData<*const ()>,
}

impl ToastSession<DefaultHost> {
    pub fn new() -> Result<Self> {
        Self::with_config(DefaultHost::default(), ToastConfig::default())
    }
}

impl<H: ToastHost> ToastSession<H> {
    pub fn with_host(host: H) -> Result<Self> {
        Self::with_config(host, ToastConfig::default())
    }

    pub fn with_config(mut host: H, config: ToastConfig) -> Result<Self> {
        host.initialize().map_err(ToastError::Initialization)?;
        Ok(Self {
            host,
            config,
            _thread_bound: PhantomData,
        })
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn config(&self) -> &ToastConfig {
        &self.config
    }

    /// Builds the document for `request` and hands it to the host.
    pub fn show(&self, request: &ToastRequest) -> Result<()> {
        let document = build_document(&self.host, request, &self.config.image_alt_text)?;

        self.host
            .show(&document, &request.app_id)
            .map_err(ToastError::Submission)?;

        tracing::debug!("Notification ({}) shown for {}", request.kind(), request.app_id);
        Ok(())
    }

    pub fn show_simple(&self, title: &str, message: &str, app_id: &str) -> Result<()> {
        self.show(&ToastRequest::new(app_id, title, message))
    }

    pub fn show_with_duration(
        &self,
        title: &str,
        message: &str,
        app_id: &str,
        duration: ToastDuration,
    ) -> Result<()> {
        self.show(&ToastRequest::new(app_id, title, message).duration(duration))
    }

    pub fn show_with_image(
        &self,
        title: &str,
        message: &str,
        image_path: &str,
        app_id: &str,
        alt_text: Option<&str>,
    ) -> Result<()> {
        self.show(&ToastRequest::new(app_id, title, message).image(image_path, alt_text))
    }

    pub fn register_app(&self, registration: &AppRegistration) -> Result<()> {
        self.host
            .register_app(registration)
            .map_err(|source| ToastError::Registration {
                app_id: registration.app_id.clone(),
                source,
            })
    }
}

impl<H: ToastHost> Drop for ToastSession<H> {
    fn drop(&mut self) {
        if let Err(e) = self.host.uninitialize() {
            tracing::warn!("Toast host teardown failed: {}", e);
        }
    }
}
