pub mod alert;
pub mod message;
pub mod progress;
pub mod prompt;
pub mod styles;
pub mod table;

pub use alert::*;
pub use message::*;
pub use progress::*;
pub use prompt::*;
pub use styles::*;
pub use table::*;

use console::Term;
use dialoguer::theme::ColorfulTheme;
use isimctl_common::Cancelled;
use std::io;
use std::sync::Arc;

/// Terminal handle and prompt theme shared by every interactive component
#[derive(Clone)]
pub struct Ui {
    theme: Arc<ColorfulTheme>,
    term: Term,
}

impl Ui {
    pub fn new() -> Self {
        Self {
            theme: Arc::new(ColorfulTheme::default()),
            term: Term::stderr(),
        }
    }

    pub fn theme(&self) -> &ColorfulTheme {
        &self.theme
    }

    pub fn term(&self) -> &Term {
        &self.term
    }

    /// Put the cursor back after a prompt was interrupted
    pub fn restore(&self) {
        let _ = self.term.show_cursor();
    }
}

impl Default for Ui {
    fn default() -> Self {
        Self::new()
    }
}

/// Ctrl-C inside a prompt surfaces as [`Cancelled`]
pub(crate) fn interaction_error(err: dialoguer::Error) -> anyhow::Error {
    match err {
        dialoguer::Error::IO(io) if io.kind() == io::ErrorKind::Interrupted => {
            anyhow::Error::from(Cancelled)
        }
        other => anyhow::Error::from(other),
    }
}
