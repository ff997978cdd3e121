//! Conversion of caller-supplied C strings and image paths.

use std::ffi::{c_char, CStr};

/// Reads a NUL-terminated UTF-8 string supplied by a C caller.
///
/// A null pointer or an empty string yields an empty `String`; required fields
/// are validated separately. Invalid sequences become U+FFFD.
///
/// # Safety
///
/// `ptr` must be null or point to a NUL-terminated string that stays valid for
/// the duration of the call.
pub unsafe fn text_from_ptr(ptr: *const c_char) -> String {
    if ptr.is_null() {
        return String::new();
    }
    CStr::from_ptr(ptr).to_string_lossy().into_owned()
}

/// Turns a local filesystem path into a URI the notification host can resolve.
///
/// Anything already carrying a scheme (`://`) is returned as is. Otherwise
/// backslashes become forward slashes and `file:///` is prepended. No
/// existence check and no percent-encoding.
pub fn path_to_uri(path: &str) -> String {
    if path.contains("://") {
        return path.to_string();
    }

    let mut uri = String::with_capacity(path.len() + 8);
    uri.push_str("file:///");
    uri.extend(path.chars().map(|c| if c == '\\' { '/' } else { c }));
    uri
}
