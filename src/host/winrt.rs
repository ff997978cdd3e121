//! Host backed by `Windows.UI.Notifications`.

use windows::{
    core::{h, Interface, HSTRING},
    Data::Xml::Dom::{IXmlNode, XmlDocument, XmlElement},
    UI::Notifications::{ToastNotification, ToastNotificationManager, ToastTemplateType},
    Win32::System::WinRT::{RoInitialize, RoUninitialize, RO_INIT_MULTITHREADED},
};

use super::{aumid, AppRegistration, ToastHost};
use crate::document::ToastDocument;
use crate::error::HostError;
use crate::template::ToastTemplate;

#[derive(Debug, Clone)]
pub struct WinRtDocument {
    xml: XmlDocument,
}

impl ToastDocument for WinRtDocument {
    fn text_slot_count(&self) -> Result<usize, HostError> {
        let nodes = self.xml.GetElementsByTagName(h!("text"))?;
        Ok(nodes.Length()? as usize)
    }

    fn set_text(&mut self, slot: usize, text: &str) -> Result<(), HostError> {
        let node = self.xml.GetElementsByTagName(h!("text"))?.Item(slot as u32)?;
        let text_node = self.xml.CreateTextNode(&HSTRING::from(text))?;
        node.AppendChild(&text_node.cast::<IXmlNode>()?)?;
        Ok(())
    }

    fn set_root_attribute(&mut self, name: &str, value: &str) -> Result<(), HostError> {
        self.xml
            .DocumentElement()?
            .SetAttribute(&HSTRING::from(name), &HSTRING::from(value))?;
        Ok(())
    }

    fn set_image_attribute(&mut self, name: &str, value: &str) -> Result<bool, HostError> {
        let nodes = self.xml.GetElementsByTagName(h!("image"))?;
        if nodes.Length()? == 0 {
            return Ok(false);
        }

        let image = nodes.Item(0)?.cast::<XmlElement>()?;
        image.SetAttribute(&HSTRING::from(name), &HSTRING::from(value))?;
        Ok(true)
    }

    fn to_xml(&self) -> Result<String, HostError> {
        Ok(self.xml.GetXml()?.to_string())
    }
}

/// Owns the calling thread's WinRT apartment between `initialize` and
/// `uninitialize`.
#[derive(Debug, Default)]
pub struct WinRtHost {
    initialized: bool,
}

impl ToastHost for WinRtHost {
    type Document = WinRtDocument;

    fn initialize(&mut self) -> Result<(), HostError> {
        if !self.initialized {
            unsafe { RoInitialize(RO_INIT_MULTITHREADED)? };
            self.initialized = true;
            tracing::debug!("WinRT apartment initialized");
        }
        Ok(())
    }

    fn uninitialize(&mut self) -> Result<(), HostError> {
        if self.initialized {
            unsafe { RoUninitialize() };
            self.initialized = false;
            tracing::debug!("WinRT apartment released");
        }
        Ok(())
    }

    fn template(&self, template: ToastTemplate) -> Result<WinRtDocument, HostError> {
        let template_type = match template {
            ToastTemplate::TextOnly => ToastTemplateType::ToastText02,
            ToastTemplate::ImageAndText => ToastTemplateType::ToastImageAndText02,
        };
        let xml = ToastNotificationManager::GetTemplateContent(template_type)?;
        Ok(WinRtDocument { xml })
    }

    fn show(&self, document: &WinRtDocument, app_id: &str) -> Result<(), HostError> {
        let toast = ToastNotification::CreateToastNotification(&document.xml)?;
        let notifier = ToastNotificationManager::CreateToastNotifierWithId(&HSTRING::from(app_id))?;
        notifier.Show(&toast)?;
        Ok(())
    }

    fn register_app(&self, registration: &AppRegistration) -> Result<(), HostError> {
        aumid::ensure_aumid_registered(registration)
    }
}
