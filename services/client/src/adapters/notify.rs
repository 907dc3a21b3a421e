//! services/client/src/adapters/notify.rs
//!
//! This module contains a `Notifier` adapter that surfaces notices through
//! the log. The real UI replaces this with its toast/modal surface; the
//! application layer only ever talks to the port.

use galmaetgil_core::domain::{Badge, Notice, NoticeLevel};
use galmaetgil_core::ports::Notifier;
use tracing::{error, info};

/// A `Notifier` that writes notices to the tracing log.
#[derive(Clone, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Error => error!("notice: {}", notice.message),
            NoticeLevel::Success | NoticeLevel::Info => info!("notice: {}", notice.message),
        }
    }

    fn badge_awarded(&self, badge: &Badge) {
        info!("new badge awarded: {} ({})", badge.name, badge.rarity);
    }
}
