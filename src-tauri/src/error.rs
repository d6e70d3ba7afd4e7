/// Failure reported by a host platform service (pointer, icon geometry, raw input).
///
/// None of these are fatal: callers degrade to "not hovering" or "no wheel data".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    PointerUnavailable { message: String },
    IconRectUnavailable { message: String },
    Registration { message: String },
    Payload { message: String },
}

impl PlatformError {
    pub fn pointer_unavailable(message: impl Into<String>) -> Self {
        Self::PointerUnavailable {
            message: message.into(),
        }
    }

    pub fn icon_rect_unavailable(message: impl Into<String>) -> Self {
        Self::IconRectUnavailable {
            message: message.into(),
        }
    }

    pub fn registration(message: impl Into<String>) -> Self {
        Self::Registration {
            message: message.into(),
        }
    }

    pub fn payload(message: impl Into<String>) -> Self {
        Self::Payload {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::PointerUnavailable { message }
            | Self::IconRectUnavailable { message }
            | Self::Registration { message }
            | Self::Payload { message } => message,
        }
    }
}

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PointerUnavailable { message } => write!(f, "PointerUnavailable: {}", message),
            Self::IconRectUnavailable { message } => {
                write!(f, "IconRectUnavailable: {}", message)
            }
            Self::Registration { message } => write!(f, "Registration: {}", message),
            Self::Payload { message } => write!(f, "Payload: {}", message),
        }
    }
}

impl std::error::Error for PlatformError {}

#[cfg(target_os = "windows")]
impl From<windows::core::Error> for PlatformError {
    fn from(err: windows::core::Error) -> Self {
        Self::registration(err.message())
    }
}
