//! AUMID (Application User Model ID) registration for Windows notifications.
//!
//! Toasts only show a custom name and icon when the AUMID they are posted under
//! is registered. Without it, Windows falls back to the parent process name.

use winreg::enums::*;
use winreg::RegKey;

use super::AppRegistration;
use crate::error::HostError;

fn registry_path(app_id: &str) -> String {
    format!(r"Software\Classes\AppUserModelId\{}", app_id)
}

/// Creates or updates
/// `HKEY_CURRENT_USER\Software\Classes\AppUserModelId\<app_id>` with
/// `DisplayName`, `IconUri` (only if the file exists) and `IconBackgroundColor`.
pub fn ensure_aumid_registered(registration: &AppRegistration) -> Result<(), HostError> {
    let hkcu = RegKey::predef(HKEY_CURRENT_USER);
    let path = registry_path(&registration.app_id);

    let (key, disposition) = hkcu.create_subkey(&path)?;

    let action = match disposition {
        RegDisposition::REG_CREATED_NEW_KEY => "Created",
        RegDisposition::REG_OPENED_EXISTING_KEY => "Updated",
    };

    key.set_value("DisplayName", &registration.display_name)?;

    match &registration.icon_path {
        Some(icon_path) if icon_path.exists() => {
            let icon = icon_path.to_string_lossy().to_string();
            key.set_value("IconUri", &icon)?;
            tracing::debug!("AUMID icon set to: {}", icon);
        }
        Some(icon_path) => tracing::warn!("Icon file not found at: {:?}", icon_path),
        None => {}
    }

    key.set_value("IconBackgroundColor", &registration.icon_background)?;

    tracing::info!("{} AUMID registry entry: {}", action, path);

    Ok(())
}
