//! Notifier that writes notices to the `tracing` log.

use tracing::{info, warn};

use crate::task::ports::{Notice, NoticeLevel, Notifier};

/// Notifier for headless use: success notices log at `info`, errors at
/// `warn`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Success => info!(notice = %notice.message, "board notice"),
            NoticeLevel::Error => warn!(notice = %notice.message, "board error"),
        }
    }
}
