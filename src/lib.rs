//! Toast notifications on Windows, callable from C.
//!
//! The Rust API centres on [`ToastSession`]: creating one initializes the
//! notification host for the current thread, dropping it releases the host.
//! The `toast_*` functions in [`ffi`] wrap a thread-local session for C callers.

pub mod config;
pub mod document;
pub mod error;
pub mod ffi;
pub mod host;
pub mod logging;
pub mod normalize;
pub mod request;
pub mod session;
pub mod template;

pub use config::ToastConfig;
pub use document::{build_document, ToastDocument, DEFAULT_IMAGE_ALT};
pub use error::{HostError, Result, ToastError};
pub use host::{AppRegistration, DefaultHost, RecordingHost, ToastHost};
pub use request::{ToastImage, ToastRequest};
pub use session::ToastSession;
pub use template::{ToastDuration, ToastTemplate, TOAST_DURATION_LONG, TOAST_DURATION_SHORT};
