//! Terminal notifier with consistent status formatting

use super::{Notice, Notifier, Status};
use console::style;
use tracing::debug;

/// Prints notices to stderr with status-colored tags.
///
/// Dismissal is a no-op: a terminal cannot retract printed lines, so the
/// de-duplication contract degrades to printing each notice once.
#[derive(Debug, Default)]
pub struct TerminalNotifier;

impl TerminalNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Notifier for TerminalNotifier {
    fn push(&self, notice: Notice) {
        match notice.status {
            Status::Success => {
                eprintln!("{} {}", style("[OK]").green(), notice.title);
            }
            Status::Warning => {
                eprintln!("{} {}", style("[WARN]").yellow(), notice.title);
            }
            Status::Error => {
                eprintln!("{} {}", style("[ERROR]").red(), notice.title);
            }
        }
    }

    fn dismiss(&self, id: &str) {
        debug!("dismiss requested for notice {id}, nothing to retract");
    }
}
