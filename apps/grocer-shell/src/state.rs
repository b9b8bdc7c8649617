//! # Shell State
//!
//! The session plus the settings used to render it.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ShellState                                                             │
//! │  ┌──────────────────────┐ ┌──────────────────┐ ┌────────────────────┐   │
//! │  │  Session             │ │  ShellConfig     │ │  shown_revision    │   │
//! │  │  (all engine state)  │ │  (currency etc.) │ │  (last status tick)│   │
//! │  └──────────────────────┘ └──────────────────┘ └────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use grocer_core::Session;

use crate::config::ShellConfig;

pub struct ShellState {
    pub session: Session,
    pub config: ShellConfig,
    shown_revision: u64,
}

impl ShellState {
    pub fn new(session: Session, config: ShellConfig) -> Self {
        let shown_revision = session.revision();
        ShellState {
            session,
            config,
            shown_revision,
        }
    }

    /// True once per session revision that has not been shown yet.
    pub fn take_change(&mut self) -> bool {
        let revision = self.session.revision();
        if revision == self.shown_revision {
            return false;
        }
        self.shown_revision = revision;
        true
    }
}
