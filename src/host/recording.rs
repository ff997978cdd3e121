//! In-process host that builds template documents itself and records what it
//! is asked to show. Nothing reaches the screen.

use std::cell::RefCell;
use std::rc::Rc;

use super::{AppRegistration, ToastHost};
use crate::document::ToastDocument;
use crate::error::HostError;
use crate::template::{ToastTemplate, TEMPLATE_TEXT_SLOTS};

/// Host operation that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostStage {
    Initialize,
    Uninitialize,
    Template,
    Show,
    Register,
}

/// A toast document modelled on the WinRT template XML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedDocument {
    template: ToastTemplate,
    root_attributes: Vec<(String, String)>,
    image_attributes: Option<Vec<(String, String)>>,
    texts: Vec<String>,
}

impl RecordedDocument {
    fn blank(template: ToastTemplate, text_slots: usize, image_placeholder: bool) -> Self {
        Self {
            template,
            root_attributes: Vec::new(),
            image_attributes: (template.has_image() && image_placeholder).then(Vec::new),
            texts: vec![String::new(); text_slots],
        }
    }

    pub fn template(&self) -> ToastTemplate {
        self.template
    }

    pub fn texts(&self) -> Vec<&str> {
        self.texts.iter().map(String::as_str).collect()
    }

    pub fn root_attribute(&self, name: &str) -> Option<&str> {
        lookup(&self.root_attributes, name)
    }

    pub fn image_attribute(&self, name: &str) -> Option<&str> {
        self.image_attributes
            .as_deref()
            .and_then(|attributes| lookup(attributes, name))
    }
}

fn lookup<'a>(attributes: &'a [(String, String)], name: &str) -> Option<&'a str> {
    attributes
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

fn upsert(attributes: &mut Vec<(String, String)>, name: &str, value: &str) {
    match attributes.iter_mut().find(|(key, _)| key == name) {
        Some((_, existing)) => *existing = value.to_string(),
        None => attributes.push((name.to_string(), value.to_string())),
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

fn write_attributes(out: &mut String, attributes: &[(String, String)]) {
    for (name, value) in attributes {
        out.push_str(&format!(" {}=\"{}\"", name, escape(value)));
    }
}

impl ToastDocument for RecordedDocument {
    fn text_slot_count(&self) -> Result<usize, HostError> {
        Ok(self.texts.len())
    }

    fn set_text(&mut self, slot: usize, text: &str) -> Result<(), HostError> {
        let target = self
            .texts
            .get_mut(slot)
            .ok_or_else(|| HostError::new(format!("No text element at index {}", slot)))?;
        target.push_str(text);
        Ok(())
    }

    fn set_root_attribute(&mut self, name: &str, value: &str) -> Result<(), HostError> {
        upsert(&mut self.root_attributes, name, value);
        Ok(())
    }

    fn set_image_attribute(&mut self, name: &str, value: &str) -> Result<bool, HostError> {
        match self.image_attributes.as_mut() {
            Some(attributes) => {
                upsert(attributes, name, value);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn to_xml(&self) -> Result<String, HostError> {
        let mut xml = String::from("<toast");
        write_attributes(&mut xml, &self.root_attributes);
        xml.push_str(&format!(
            "><visual><binding template=\"{}\">",
            self.template.binding_name()
        ));
        if let Some(attributes) = &self.image_attributes {
            xml.push_str("<image id=\"1\"");
            write_attributes(&mut xml, attributes);
            xml.push_str("/>");
        }
        for (index, text) in self.texts.iter().enumerate() {
            xml.push_str(&format!("<text id=\"{}\">{}</text>", index + 1, escape(text)));
        }
        xml.push_str("</binding></visual></toast>");
        Ok(xml)
    }
}

/// A document handed to [`RecordingHost::show`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShownToast {
    pub app_id: String,
    pub document: RecordedDocument,
    pub xml: String,
}

#[derive(Debug, Default)]
struct Recording {
    initialized: bool,
    shown: Vec<ShownToast>,
    registrations: Vec<AppRegistration>,
}

/// Clones share the same recording, so a caller can keep a handle to a host
/// it has moved into a session.
#[derive(Debug, Clone)]
pub struct RecordingHost {
    text_slots: Option<usize>,
    image_placeholder: bool,
    failing_at: Option<HostStage>,
    recording: Rc<RefCell<Recording>>,
}

impl Default for RecordingHost {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingHost {
    pub fn new() -> Self {
        Self {
            text_slots: None,
            image_placeholder: true,
            failing_at: None,
            recording: Rc::new(RefCell::new(Recording::default())),
        }
    }

    /// Overrides the number of text placeholders every template exposes.
    pub fn with_text_slots(mut self, slots: usize) -> Self {
        self.text_slots = Some(slots);
        self
    }

    pub fn without_image_placeholder(mut self) -> Self {
        self.image_placeholder = false;
        self
    }

    pub fn failing_at(mut self, stage: HostStage) -> Self {
        self.failing_at = Some(stage);
        self
    }

    pub fn is_initialized(&self) -> bool {
        self.recording.borrow().initialized
    }

    pub fn shown(&self) -> Vec<ShownToast> {
        self.recording.borrow().shown.clone()
    }

    pub fn registrations(&self) -> Vec<AppRegistration> {
        self.recording.borrow().registrations.clone()
    }

    fn check(&self, stage: HostStage) -> Result<(), HostError> {
        if self.failing_at == Some(stage) {
            return Err(HostError::new(format!("{:?} rejected by host", stage)));
        }
        Ok(())
    }
}

impl ToastHost for RecordingHost {
    type Document = RecordedDocument;

    fn initialize(&mut self) -> Result<(), HostError> {
        self.check(HostStage::Initialize)?;
        self.recording.borrow_mut().initialized = true;
        Ok(())
    }

    fn uninitialize(&mut self) -> Result<(), HostError> {
        self.recording.borrow_mut().initialized = false;
        self.check(HostStage::Uninitialize)
    }

    fn template(&self, template: ToastTemplate) -> Result<RecordedDocument, HostError> {
        self.check(HostStage::Template)?;
        let slots = self.text_slots.unwrap_or(TEMPLATE_TEXT_SLOTS);
        Ok(RecordedDocument::blank(template, slots, self.image_placeholder))
    }

    fn show(&self, document: &RecordedDocument, app_id: &str) -> Result<(), HostError> {
        self.check(HostStage::Show)?;
        if !self.is_initialized() {
            return Err(HostError::new("Host is not initialized"));
        }

        let xml = document.to_xml()?;
        tracing::debug!("Recorded toast for '{}': {}", app_id, xml);
        self.recording.borrow_mut().shown.push(ShownToast {
            app_id: app_id.to_string(),
            document: document.clone(),
            xml,
        });
        Ok(())
    }

    fn register_app(&self, registration: &AppRegistration) -> Result<(), HostError> {
        self.check(HostStage::Register)?;
        tracing::debug!(
            "Recorded AUMID registration: {} ({})",
            registration.app_id,
            registration.display_name
        );
        self.recording
            .borrow_mut()
            .registrations
            .push(registration.clone());
        Ok(())
    }
}
