//! Controller-owned session state.

use std::fmt;

use moodtrack_core::{Draft, Entry, Identity, Screen, SupportNotice};

/// Monotonic session counter; advanced on every login and logout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionEpoch(u64);

impl SessionEpoch {
    /// Returns the following epoch.
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    /// Raw counter value.
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SessionEpoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Everything the client shows, owned by [`crate::SessionController`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub(crate) screen: Screen,
    pub(crate) identity: Option<Identity>,
    pub(crate) draft: Draft,
    pub(crate) error: Option<String>,
    pub(crate) entries: Vec<Entry>,
    pub(crate) streak: Option<u32>,
    pub(crate) notice: Option<SupportNotice>,
    pub(crate) epoch: SessionEpoch,
}

impl SessionState {
    pub(crate) fn new() -> Self {
        Self {
            screen: Screen::Login,
            identity: None,
            draft: Draft::empty_for(Screen::Login),
            error: None,
            entries: Vec::new(),
            streak: None,
            notice: None,
            epoch: SessionEpoch::default(),
        }
    }

    /// Active screen.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Authenticated identity, if logged in.
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// Form draft of the active screen.
    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Current error message.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Last fetched entries, in backend order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Last fetched streak; `None` while unknown.
    pub fn streak(&self) -> Option<u32> {
        self.streak
    }

    /// Current wellbeing notice.
    pub fn notice(&self) -> Option<SupportNotice> {
        self.notice
    }

    /// Current session epoch.
    pub fn epoch(&self) -> SessionEpoch {
        self.epoch
    }

    /// Returns `true` when the screen/identity/data invariants hold.
    pub fn is_consistent(&self) -> bool {
        let logged_in = self.identity.is_some();
        let screen_matches = (self.screen == Screen::Dashboard) == logged_in;
        let draft_matches = self.draft.screen() == self.screen;
        let data_cleared = logged_in || (self.entries.is_empty() && self.streak.is_none());
        screen_matches && draft_matches && data_cleared
    }
}
