//! Notification kind resolution and the per-kind wire codes.

use std::fmt;

/// The closed set of notification kinds MPNS accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    Tile,
    Toast,
    Raw,
}

impl NotificationKind {
    /// Resolves caller input to a kind.
    ///
    /// Only the exact strings `"tile"` and `"toast"` are recognized. Anything
    /// else, including no input at all, resolves to [`NotificationKind::Raw`].
    /// This never fails.
    pub fn resolve(input: Option<&str>) -> Self {
        match input {
            Some("tile") => NotificationKind::Tile,
            Some("toast") => NotificationKind::Toast,
            _ => NotificationKind::Raw,
        }
    }

    /// Value of the `X-NotificationClass` header.
    pub fn notification_class(&self) -> &'static str {
        match self {
            NotificationKind::Tile => "1",
            NotificationKind::Toast => "2",
            NotificationKind::Raw => "3",
        }
    }

    /// Value of the `X-WindowsPhone-Target` header, if the kind carries one.
    ///
    /// Raw notifications have no target and the header must not be sent.
    pub fn windowsphone_target(&self) -> Option<&'static str> {
        match self {
            NotificationKind::Tile => Some("token"),
            NotificationKind::Toast => Some("toast"),
            NotificationKind::Raw => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Tile => "tile",
            NotificationKind::Toast => "toast",
            NotificationKind::Raw => "raw",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Option<&str>> for NotificationKind {
    fn from(input: Option<&str>) -> Self {
        Self::resolve(input)
    }
}

impl From<&str> for NotificationKind {
    fn from(input: &str) -> Self {
        Self::resolve(Some(input))
    }
}
