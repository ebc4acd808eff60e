//! Modal dialog state.
//!
//! The loading cover behaves like a modal: it blocks scene input from
//! startup until the intro reveal has slid it away.

use log::info;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Modal {
    LoadingCover,
    About,
    Work,
    Contact,
}

/// Which modal, if any, is currently open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalState {
    open: Option<Modal>,
}

impl ModalState {
    /// Starts with the loading cover up.
    pub fn new() -> Self {
        Self {
            open: Some(Modal::LoadingCover),
        }
    }

    /// State with nothing open, for hosts that skip the loading cover.
    pub fn closed() -> Self {
        Self { open: None }
    }

    pub fn open_modal(&self) -> Option<Modal> {
        self.open
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Scene ray casting, activation and orbit input are off while true.
    pub fn input_suppressed(&self) -> bool {
        self.is_open()
    }

    /// Mark `modal` open. Returns the modal it replaced, if any.
    pub fn open(&mut self, modal: Modal) -> Option<Modal> {
        info!("modal {:?} opened", modal);
        self.open.replace(modal)
    }

    /// Close `modal` if it is the one open. Returns whether anything changed.
    pub fn close(&mut self, modal: Modal) -> bool {
        if self.open == Some(modal) {
            info!("modal {:?} closed", modal);
            self.open = None;
            true
        } else {
            false
        }
    }
}

impl Default for ModalState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loading_cover_suppresses_input_at_startup() {
        let state = ModalState::new();
        assert_eq!(state.open_modal(), Some(Modal::LoadingCover));
        assert!(state.input_suppressed());
    }

    #[test]
    fn test_close_only_matches_open_modal() {
        let mut state = ModalState::closed();
        state.open(Modal::About);
        assert!(!state.close(Modal::Work));
        assert!(state.close(Modal::About));
        assert!(!state.input_suppressed());
    }
}
