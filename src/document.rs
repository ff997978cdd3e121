//! Filling host-supplied template documents from a [`ToastRequest`].

use crate::error::{HostError, Result, ToastError};
use crate::host::ToastHost;
use crate::request::ToastRequest;

/// Alt text used when the caller supplies none.
pub const DEFAULT_IMAGE_ALT: &str = "Toast notification image";

/// A template document owned by the notification host.
///
/// Slots are addressed in document order. Implementations never escape text
/// themselves unless they serialize it, see [`ToastDocument::to_xml`].
pub trait ToastDocument {
    fn text_slot_count(&self) -> std::result::Result<usize, HostError>;

    fn set_text(&mut self, slot: usize, text: &str) -> std::result::Result<(), HostError>;

    fn set_root_attribute(&mut self, name: &str, value: &str)
        -> std::result::Result<(), HostError>;

    /// Sets an attribute on the first image placeholder.
    ///
    /// Returns `Ok(false)` when the template has no image placeholder.
    fn set_image_attribute(&mut self, name: &str, value: &str)
        -> std::result::Result<bool, HostError>;

    fn to_xml(&self) -> std::result::Result<String, HostError>;
}

/// Requests the template for `request` and fills it.
///
/// Title goes in the first text slot, message in the second; values beyond the
/// template's slots are dropped. A missing image placeholder is not an error.
pub fn build_document<H: ToastHost>(
    host: &H,
    request: &ToastRequest,
    default_alt: &str,
) -> Result<H::Document> {
    let kind = request.kind();
    let construction = |source: HostError| ToastError::Construction { kind, source };

    let mut document = host.template(request.template()).map_err(construction)?;

    let slots = document.text_slot_count().map_err(construction)?;
    for (slot, text) in [request.title.as_str(), request.message.as_str()]
        .into_iter()
        .enumerate()
        .take(slots)
    {
        document.set_text(slot, text).map_err(construction)?;
    }

    if let Some(duration) = request.duration {
        document
            .set_root_attribute("duration", duration.as_str())
            .map_err(construction)?;
    }

    if let Some(image) = &request.image {
        let found = document
            .set_image_attribute("src", &image.uri)
            .map_err(construction)?;
        if found {
            let alt = image.alt_text.as_deref().unwrap_or(default_alt);
            document
                .set_image_attribute("alt", alt)
                .map_err(construction)?;
        } else {
            tracing::debug!("Template has no image placeholder, skipping {}", image.uri);
        }
    }

    Ok(document)
}
