use thiserror::Error;

pub const TOAST_SUCCESS: i32 = 0;
pub const TOAST_ERROR_INVALID_PARAM: i32 = -1;
pub const TOAST_ERROR_WINRT_INIT: i32 = -2;
pub const TOAST_ERROR_TOAST_CREATION: i32 = -3;
pub const TOAST_ERROR_NOTIFICATION: i32 = -4;
pub const TOAST_ERROR_REGISTRATION: i32 = -5;

/// Diagnostic reported by the notification host.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct HostError(pub String);

impl HostError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

#[cfg(windows)]
impl From<windows::core::Error> for HostError {
    fn from(err: windows::core::Error) -> Self {
        HostError(format!("{} (HRESULT {:#010x})", err.message(), err.code().0))
    }
}

impl From<std::io::Error> for HostError {
    fn from(err: std::io::Error) -> Self {
        HostError(err.to_string())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ToastError {
    #[error("Invalid parameter: {0} cannot be null")]
    InvalidParameter(&'static str),

    #[error("Failed to initialize WinRT apartment: {0}")]
    Initialization(HostError),

    #[error("Toast notifications are not initialized on this thread")]
    NotInitialized,

    #[error("Failed to create {kind} toast notification: {source}")]
    Construction {
        kind: &'static str,
        source: HostError,
    },

    #[error("Failed to show toast notification: {0}")]
    Submission(HostError),

    #[error("Failed to register application identity '{app_id}': {source}")]
    Registration { app_id: String, source: HostError },
}

impl ToastError {
    /// Status code returned across the C boundary.
    pub fn status(&self) -> i32 {
        match self {
            Self::InvalidParameter(_) => TOAST_ERROR_INVALID_PARAM,
            Self::Initialization(_) | Self::NotInitialized => TOAST_ERROR_WINRT_INIT,
            Self::Construction { .. } => TOAST_ERROR_TOAST_CREATION,
            Self::Submission(_) => TOAST_ERROR_NOTIFICATION,
            Self::Registration { .. } => TOAST_ERROR_REGISTRATION,
        }
    }
}

pub type Result<T> = std::result::Result<T, ToastError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ToastError::InvalidParameter("title").status(), -1);
        assert_eq!(ToastError::Initialization(HostError::new("x")).status(), -2);
        assert_eq!(ToastError::NotInitialized.status(), -2);
        assert_eq!(
            ToastError::Construction {
                kind: "simple",
                source: HostError::new("x")
            }
            .status(),
            -3
        );
        assert_eq!(ToastError::Submission(HostError::new("x")).status(), -4);
        assert_eq!(
            ToastError::Registration {
                app_id: "app".to_string(),
                source: HostError::new("x")
            }
            .status(),
            -5
        );
    }

    #[test]
    fn test_messages_carry_host_diagnostic() {
        let err = ToastError::Submission(HostError::new("notifier unavailable"));
        assert_eq!(
            err.to_string(),
            "Failed to show toast notification: notifier unavailable"
        );

        let err = ToastError::InvalidParameter("title, message, and app_id");
        assert_eq!(
            err.to_string(),
            "Invalid parameter: title, message, and app_id cannot be null"
        );
    }
}
