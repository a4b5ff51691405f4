//! User-facing notifications
//!
//! The data layer reports outcomes (update succeeded, update rolled back,
//! fetch failed) through a [`Notifier`]. The trait keeps the surface
//! pluggable: the terminal notifier here, a UI toast layer in an embedding
//! application, a recording notifier in tests.

mod terminal;

pub use terminal::TerminalNotifier;

/// Severity of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Warning,
    Error,
}

/// Visual weight of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Subtle,
    Solid,
}

/// A single notification
#[derive(Debug, Clone)]
pub struct Notice {
    /// Stable identifier, used to replace an earlier notice with the same id
    pub id: Option<String>,

    /// Short human-readable message
    pub title: String,

    /// Severity
    pub status: Status,

    /// Visual weight, if the surface distinguishes one
    pub variant: Option<Variant>,

    /// Whether the user may dismiss the notice
    pub closable: bool,
}

impl Notice {
    fn new(title: impl Into<String>, status: Status) -> Self {
        Self {
            id: None,
            title: title.into(),
            status,
            variant: None,
            closable: false,
        }
    }

    /// A success notice
    pub fn success(title: impl Into<String>) -> Self {
        Self::new(title, Status::Success)
    }

    /// A warning notice
    pub fn warning(title: impl Into<String>) -> Self {
        Self::new(title, Status::Warning)
    }

    /// An error notice
    pub fn error(title: impl Into<String>) -> Self {
        Self::new(title, Status::Error)
    }

    /// Tag the notice with a stable id
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the visual variant
    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = Some(variant);
        self
    }

    /// Mark the notice user-dismissable
    pub fn closable(mut self) -> Self {
        self.closable = true;
        self
    }
}

/// Notification surface
pub trait Notifier: Send + Sync {
    /// Display a notice
    fn push(&self, notice: Notice);

    /// Dismiss a previously pushed notice by id; unknown ids are ignored
    fn dismiss(&self, id: &str);
}
