//! C entry points.
//!
//! Every function returns a status code from [`crate::error`]. On failure a
//! message is stored in a thread-local buffer readable through
//! [`toast_get_last_error`]. A successful call leaves the previous message in
//! place. Nothing unwinds across this boundary.

use std::cell::RefCell;
use std::ffi::c_char;
use std::panic::{self, AssertUnwindSafe};

use crate::config::ToastConfig;
use crate::error::{
    Result, ToastError, TOAST_ERROR_REGISTRATION, TOAST_ERROR_TOAST_CREATION, TOAST_ERROR_WINRT_INIT,
    TOAST_SUCCESS,
};
use crate::host::{AppRegistration, DefaultHost};
use crate::logging;
use crate::normalize::text_from_ptr;
use crate::session::ToastSession;
use crate::template::ToastDuration;

/// Size of the last-error buffer, including the terminating NUL.
pub const LAST_ERROR_CAPACITY: usize = 256;

thread_local! {
    static SESSION: RefCell<Option<ToastSession>> = const { RefCell::new(None) };
    static LAST_ERROR: RefCell<[u8; LAST_ERROR_CAPACITY]> =
        const { RefCell::new([0; LAST_ERROR_CAPACITY]) };
}

/// Overwrites the last-error buffer, truncating on a UTF-8 boundary so at
/// most 255 bytes plus NUL are stored.
fn set_last_error(message: &str) {
    let mut end = message.len().min(LAST_ERROR_CAPACITY - 1);
    while !message.is_char_boundary(end) {
        end -= 1;
    }

    LAST_ERROR.with(|buf| {
        let mut buf = buf.borrow_mut();
        buf.fill(0);
        buf[..end].copy_from_slice(&message.as_bytes()[..end]);
    });
}

/// C entry points that report through [`run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryPoint {
    Init,
    Simple,
    Duration,
    Image,
    Registration,
}

impl EntryPoint {
    fn name(self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Simple => "simple",
            Self::Duration => "duration",
            Self::Image => "image",
            Self::Registration => "registration",
        }
    }

    /// Status reported when the entry point panics.
    fn panic_status(self) -> i32 {
        match self {
            Self::Init => TOAST_ERROR_WINRT_INIT,
            Self::Simple | Self::Duration | Self::Image => TOAST_ERROR_TOAST_CREATION,
            Self::Registration => TOAST_ERROR_REGISTRATION,
        }
    }

    fn panic_message(self) -> &'static str {
        match self {
            Self::Init => "Failed to initialize WinRT apartment",
            Self::Simple => "Failed to create or show simple toast notification",
            Self::Duration => "Failed to create or show duration toast notification",
            Self::Image => "Failed to create or show image toast notification",
            Self::Registration => "Failed to register application identity",
        }
    }
}

fn run(entry: EntryPoint, f: impl FnOnce() -> Result<()>) -> i32 {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(())) => TOAST_SUCCESS,
        Ok(Err(e)) => {
            tracing::warn!("toast {} failed: {}", entry.name(), e);
            set_last_error(&e.to_string());
            e.status()
        }
        Err(_) => {
            tracing::error!("toast {} panicked", entry.name());
            set_last_error(entry.panic_message());
            entry.panic_status()
        }
    }
}

fn require(args: &[*const c_char], names: &'static str) -> Result<()> {
    if args.iter().any(|arg| arg.is_null()) {
        return Err(ToastError::InvalidParameter(names));
    }
    Ok(())
}

fn with_session<T>(f: impl FnOnce(&ToastSession) -> Result<T>) -> Result<T> {
    SESSION.with(|slot| match slot.borrow().as_ref() {
        Some(session) => f(session),
        None => Err(ToastError::NotInitialized),
    })
}

/// Initializes toast notifications for the calling thread. Calling it again on
/// an initialized thread is a no-op.
#[no_mangle]
pub extern "system" fn toast_init() -> i32 {
    run(EntryPoint::Init, || {
        let config = ToastConfig::load();
        logging::init(&config);

        SESSION.with(|slot| -> Result<()> {
            let mut slot = slot.borrow_mut();
            if slot.is_none() {
                *slot = Some(ToastSession::with_config(DefaultHost::default(), config)?);
            }
            Ok(())
        })
    })
}

/// Releases the calling thread's session. Safe to call repeatedly; errors are
/// discarded.
#[no_mangle]
pub extern "system" fn toast_cleanup() {
    let _ = panic::catch_unwind(|| {
        let session = SESSION.with(|slot| slot.borrow_mut().take());
        drop(session);
    });
}

/// # Safety
///
/// Every pointer must be null or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "system" fn toast_show_simple(
    title: *const c_char,
    message: *const c_char,
    app_id: *const c_char,
) -> i32 {
    run(EntryPoint::Simple, || {
        require(&[title, message, app_id], "title, message, and app_id")?;
        let (title, message, app_id) = unsafe {
            (text_from_ptr(title), text_from_ptr(message), text_from_ptr(app_id))
        };
        with_session(|session| session.show_simple(&title, &message, &app_id))
    })
}

/// `duration` is `TOAST_DURATION_LONG` (1) for long; any other value is short.
///
/// # Safety
///
/// Every pointer must be null or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "system" fn toast_show_with_duration(
    title: *const c_char,
    message: *const c_char,
    app_id: *const c_char,
    duration: i32,
) -> i32 {
    run(EntryPoint::Duration, || {
        require(&[title, message, app_id], "title, message, and app_id")?;
        let (title, message, app_id) = unsafe {
            (text_from_ptr(title), text_from_ptr(message), text_from_ptr(app_id))
        };
        let duration = ToastDuration::from_raw(duration);
        with_session(|session| session.show_with_duration(&title, &message, &app_id, duration))
    })
}

/// `alt_text` may be null, in which case the configured default is used.
///
/// # Safety
///
/// Every pointer must be null or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "system" fn toast_show_with_image(
    title: *const c_char,
    message: *const c_char,
    image_path: *const c_char,
    app_id: *const c_char,
    alt_text: *const c_char,
) -> i32 {
    run(EntryPoint::Image, || {
        require(
            &[title, message, image_path, app_id],
            "title, message, image_path and app_id",
        )?;
        let (title, message, image_path, app_id) = unsafe {
            (
                text_from_ptr(title),
                text_from_ptr(message),
                text_from_ptr(image_path),
                text_from_ptr(app_id),
            )
        };
        let alt_text = (!alt_text.is_null()).then(|| unsafe { text_from_ptr(alt_text) });

        with_session(|session| {
            session.show_with_image(&title, &message, &image_path, &app_id, alt_text.as_deref())
        })
    })
}

/// Registers display name and icon for `app_id`. `icon_path` may be null.
///
/// # Safety
///
/// Every pointer must be null or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "system" fn toast_register_app(
    app_id: *const c_char,
    display_name: *const c_char,
    icon_path: *const c_char,
) -> i32 {
    run(EntryPoint::Registration, || {
        require(&[app_id, display_name], "app_id and display_name")?;
        let (app_id, display_name) = unsafe { (text_from_ptr(app_id), text_from_ptr(display_name)) };
        let icon_path = (!icon_path.is_null()).then(|| unsafe { text_from_ptr(icon_path) });

        with_session(|session| {
            let mut registration = AppRegistration::new(&app_id, &display_name)
                .icon_background(&session.config().icon_background);
            if let Some(icon_path) = icon_path {
                registration = registration.icon(icon_path);
            }
            session.register_app(&registration)
        })
    })
}

/// Returns the calling thread's last error message. The pointer stays valid
/// for the life of the thread; its contents change on the next failure.
#[no_mangle]
pub extern "system" fn toast_get_last_error() -> *const c_char {
    LAST_ERROR.with(|buf| buf.as_ptr() as *const c_char)
}

#[cfg(all(test, not(windows)))]
mod tests {
    use super::*;
    use crate::host::{HostStage, RecordingHost, ShownToast};
    use std::ffi::CStr;
    use std::ptr;

    fn last_error() -> String {
        unsafe { CStr::from_ptr(toast_get_last_error()) }
            .to_string_lossy()
            .into_owned()
    }

    fn shown() -> Vec<ShownToast> {
        with_session(|session| Ok(session.host().shown())).unwrap()
    }

    #[test]
    fn test_round_trip() {
        assert_eq!(toast_init(), 0);
        let status = unsafe { toast_show_simple(c"T".as_ptr(), c"M".as_ptr(), c"app".as_ptr()) };
        assert_eq!(status, 0);

        let shown = shown();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].app_id, "app");
        assert_eq!(shown[0].document.texts(), vec!["T", "M"]);

        toast_cleanup();
        assert_eq!(last_error(), "");
    }

    #[test]
    fn test_null_parameters() {
        assert_eq!(toast_init(), 0);

        let status = unsafe { toast_show_simple(ptr::null(), c"M".as_ptr(), c"app".as_ptr()) };
        assert_eq!(status, -1);
        assert_eq!(
            last_error(),
            "Invalid parameter: title, message, and app_id cannot be null"
        );

        let status = unsafe {
            toast_show_with_duration(c"T".as_ptr(), c"M".as_ptr(), ptr::null(), 1)
        };
        assert_eq!(status, -1);

        let status = unsafe {
            toast_show_with_image(
                c"T".as_ptr(),
                c"M".as_ptr(),
                ptr::null(),
                c"app".as_ptr(),
                ptr::null(),
            )
        };
        assert_eq!(status, -1);
        assert_eq!(
            last_error(),
            "Invalid parameter: title, message, image_path and app_id cannot be null"
        );

        assert!(shown().is_empty());
        toast_cleanup();
    }

    #[test]
    fn test_null_checked_before_initialization() {
        let status = unsafe { toast_show_simple(c"T".as_ptr(), ptr::null(), c"app".as_ptr()) };
        assert_eq!(status, -1);
    }

    #[test]
    fn test_show_without_init() {
        let status = unsafe { toast_show_simple(c"T".as_ptr(), c"M".as_ptr(), c"app".as_ptr()) };
        assert_eq!(status, -2);
        assert_eq!(
            last_error(),
            "Toast notifications are not initialized on this thread"
        );

        assert_eq!(toast_init(), 0);
        toast_cleanup();
        let status = unsafe { toast_show_simple(c"T".as_ptr(), c"M".as_ptr(), c"app".as_ptr()) };
        assert_eq!(status, -2);
    }

    #[test]
    fn test_duration_values() {
        assert_eq!(toast_init(), 0);
        for duration in [0, 1, 99, -1] {
            let status = unsafe {
                toast_show_with_duration(c"T".as_ptr(), c"M".as_ptr(), c"app".as_ptr(), duration)
            };
            assert_eq!(status, 0);
        }

        let durations: Vec<_> = shown()
            .iter()
            .map(|toast| toast.document.root_attribute("duration").map(str::to_string))
            .collect();
        assert_eq!(
            durations,
            vec![
                Some("short".to_string()),
                Some("long".to_string()),
                Some("short".to_string()),
                Some("short".to_string()),
            ]
        );
        toast_cleanup();
    }

    #[test]
    fn test_image_alt_text() {
        assert_eq!(toast_init(), 0);
        let status = unsafe {
            toast_show_with_image(
                c"T".as_ptr(),
                c"M".as_ptr(),
                c"C:\\images\\pic.png".as_ptr(),
                c"app".as_ptr(),
                ptr::null(),
            )
        };
        assert_eq!(status, 0);
        let status = unsafe {
            toast_show_with_image(
                c"T".as_ptr(),
                c"M".as_ptr(),
                c"https://example.com/a.png".as_ptr(),
                c"app".as_ptr(),
                c"Grüße".as_ptr(),
            )
        };
        assert_eq!(status, 0);

        let shown = shown();
        assert_eq!(
            shown[0].document.image_attribute("src"),
            Some("file:///C:/images/pic.png")
        );
        assert_eq!(
            shown[0].document.image_attribute("alt"),
            Some("Toast notification image")
        );
        assert_eq!(
            shown[1].document.image_attribute("src"),
            Some("https://example.com/a.png")
        );
        assert_eq!(shown[1].document.image_attribute("alt"), Some("Grüße"));
        toast_cleanup();
    }

    #[test]
    fn test_empty_strings_are_accepted() {
        assert_eq!(toast_init(), 0);
        let status = unsafe { toast_show_simple(c"".as_ptr(), c"".as_ptr(), c"app".as_ptr()) };
        assert_eq!(status, 0);
        assert_eq!(shown()[0].document.texts(), vec!["", ""]);
        toast_cleanup();
    }

    #[test]
    fn test_cleanup_is_idempotent() {
        toast_cleanup();
        assert_eq!(toast_init(), 0);
        assert_eq!(toast_init(), 0);
        toast_cleanup();
        toast_cleanup();
    }

    #[test]
    fn test_register_app() {
        assert_eq!(toast_init(), 0);
        let status = unsafe {
            toast_register_app(c"com.example.app".as_ptr(), c"Example".as_ptr(), ptr::null())
        };
        assert_eq!(status, 0);

        let registrations = with_session(|session| Ok(session.host().registrations())).unwrap();
        assert_eq!(registrations[0].app_id, "com.example.app");
        assert_eq!(registrations[0].icon_path, None);
        assert_eq!(registrations[0].icon_background, "FF1e293b");

        let status = unsafe { toast_register_app(ptr::null(), c"Example".as_ptr(), ptr::null()) };
        assert_eq!(status, -1);
        toast_cleanup();
    }

    #[test]
    fn test_last_error_truncated_on_char_boundary() {
        let message = "é".repeat(200);
        set_last_error(&message);
        let stored = last_error();
        assert_eq!(stored.len(), 254);
        assert!(message.starts_with(&stored));

        set_last_error("");
        assert_eq!(last_error(), "");
    }

    #[test]
    fn test_last_error_keeps_full_message() {
        set_last_error("Failed to initialize WinRT apartment");
        assert_eq!(last_error(), "Failed to initialize WinRT apartment");
    }

    fn install(host: RecordingHost) {
        let session = ToastSession::with_host(host).unwrap();
        SESSION.with(|slot| *slot.borrow_mut() = Some(session));
    }

    #[test]
    fn test_panic_is_contained() {
        let status = run(EntryPoint::Simple, || panic!("boom"));
        assert_eq!(status, -3);
        assert_eq!(
            last_error(),
            "Failed to create or show simple toast notification"
        );
    }

    #[test]
    fn test_init_panic_reports_init_failure() {
        let status = run(EntryPoint::Init, || panic!("boom"));
        assert_eq!(status, -2);
        assert_eq!(last_error(), "Failed to initialize WinRT apartment");
    }

    #[test]
    fn test_registration_panic_reports_registration_failure() {
        let status = run(EntryPoint::Registration, || panic!("boom"));
        assert_eq!(status, -5);
        assert_eq!(last_error(), "Failed to register application identity");
    }

    #[test]
    fn test_construction_failure_sets_last_error() {
        install(RecordingHost::new().failing_at(HostStage::Template));
        let status = unsafe { toast_show_simple(c"T".as_ptr(), c"M".as_ptr(), c"app".as_ptr()) };
        assert_eq!(status, -3);
        assert_eq!(
            last_error(),
            "Failed to create simple toast notification: Template rejected by host"
        );
        toast_cleanup();
    }

    #[test]
    fn test_submission_failure_sets_last_error() {
        install(RecordingHost::new().failing_at(HostStage::Show));
        let status = unsafe {
            toast_show_with_duration(c"T".as_ptr(), c"M".as_ptr(), c"app".as_ptr(), 1)
        };
        assert_eq!(status, -4);
        assert_eq!(
            last_error(),
            "Failed to show toast notification: Show rejected by host"
        );
        assert!(shown().is_empty());
        toast_cleanup();
    }

    #[test]
    fn test_init_leaves_global_subscriber_alone() {
        if std::env::var_os(crate::logging::LOG_ENV).is_some() {
            return;
        }
        assert_eq!(toast_init(), 0);
        let status = unsafe { toast_show_simple(c"T".as_ptr(), c"M".as_ptr(), c"app".as_ptr()) };
        assert_eq!(status, 0);
        assert!(!tracing::dispatcher::has_been_set());
        toast_cleanup();
    }
}
