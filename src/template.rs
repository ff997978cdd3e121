//! Fixed toast templates and display durations.

pub const TOAST_DURATION_SHORT: i32 = 0;
pub const TOAST_DURATION_LONG: i32 = 1;

/// Text placeholders in both fixed templates: title and message.
pub const TEMPLATE_TEXT_SLOTS: usize = 2;

/// Template skeletons supplied by the notification host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastTemplate {
    /// `ToastText02`: bold title line plus one wrapped message line.
    TextOnly,
    /// `ToastImageAndText02`: image, title line and message line.
    ImageAndText,
}

impl ToastTemplate {
    /// Name of the template as it appears in the `binding` element.
    pub fn binding_name(self) -> &'static str {
        match self {
            Self::TextOnly => "ToastText02",
            Self::ImageAndText => "ToastImageAndText02",
        }
    }

    pub fn has_image(self) -> bool {
        matches!(self, Self::ImageAndText)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastDuration {
    #[default]
    Short,
    Long,
}

impl ToastDuration {
    /// Maps the C-level duration value. Only `TOAST_DURATION_LONG` means long.
    pub fn from_raw(value: i32) -> Self {
        if value == TOAST_DURATION_LONG {
            Self::Long
        } else {
            Self::Short
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Long => "long",
        }
    }
}

impl std::fmt::Display for ToastDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
