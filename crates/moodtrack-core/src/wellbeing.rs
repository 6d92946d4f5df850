//! Supportive notices derived from happiness scores.

use crate::{Entry, Happiness};

/// Scores strictly below this value trigger a gentle reminder.
pub const LOW_HAPPINESS_THRESHOLD: u8 = 4;

/// Number of most recent entries inspected for a sustained low mood.
pub const DISTRESS_WINDOW: usize = 5;

const DISTRESS_MAX_SCORE: u8 = 2;

/// Informational notice shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupportNotice {
    /// The entry just recorded had a low score.
    GentleReminder,
    /// Recent entries show a sustained very low mood.
    ReachOut,
}

impl SupportNotice {
    /// User-facing text of the notice.
    pub fn message(self) -> &'static str {
        match self {
            Self::GentleReminder => {
                "Tough days happen. Be gentle with yourself today; a small act of self-care \
                 or something you usually find calming can help."
            }
            Self::ReachOut => {
                "Your last few entries suggest you may be going through a difficult time. \
                 It is okay to ask for support: a trusted friend, family member, or a \
                 counselor can make a real difference. You don't have to go through this alone."
            }
        }
    }
}

/// Notice to show after an entry with `happiness` was saved.
pub fn notice_after_entry(happiness: Happiness) -> Option<SupportNotice> {
    (happiness.value() < LOW_HAPPINESS_THRESHOLD).then_some(SupportNotice::GentleReminder)
}

/// Returns `true` when the most recent [`DISTRESS_WINDOW`] entries all scored 1 or 2.
///
/// Fewer than [`DISTRESS_WINDOW`] entries never count as distress.
pub fn distress_detected(entries: &[Entry]) -> bool {
    if entries.len() < DISTRESS_WINDOW {
        return false;
    }

    let mut newest_first: Vec<&Entry> = entries.iter().collect();
    newest_first.sort_by(|a, b| b.timestamp.sort_key().cmp(&a.timestamp.sort_key()));

    newest_first
        .iter()
        .take(DISTRESS_WINDOW)
        .all(|entry| entry.happiness.value() <= DISTRESS_MAX_SCORE)
}
