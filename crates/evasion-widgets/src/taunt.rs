#![forbid(unsafe_code)]

//! Rotating taunt messages.
//!
//! Each dodge of the decline control bumps a counter; the message shown is
//! `messages[(count - 1) % len]`, so the ladder cycles once exhausted. Before
//! the first dodge there is no message.

use std::borrow::Cow;

use evasion_runtime::policy_config::TauntPolicyConfig;

/// Built-in messages, in display order.
///
/// Plain English text without emoji. Localized or decorated messages go in
/// the `[taunts] messages` policy section, which replaces this set.
pub const DEFAULT_TAUNTS: [&str; 10] = [
    "Maybe your finger slipped...",
    "You're just playing, right?",
    "My heart beats faster when you get close to Yes...",
    "Destiny (and this button) say Yes...",
    "Don't do this to me...",
    "Accept! You won't regret it.",
    "'Yes' looks so much nicer than 'No'.",
    "Come on! Say yes...",
    "Are you really going to say no?",
    "Go on, press the pink button...",
];

/// Dodge counter with its message list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TauntLadder {
    messages: Vec<Cow<'static, str>>,
    count: u32,
}

impl Default for TauntLadder {
    fn default() -> Self {
        Self::new(DEFAULT_TAUNTS)
    }
}

impl TauntLadder {
    /// Create a ladder over `messages` with a zero count.
    #[must_use]
    pub fn new<I, S>(messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Cow<'static, str>>,
    {
        Self {
            messages: messages.into_iter().map(Into::into).collect(),
            count: 0,
        }
    }

    /// Ladder from policy; an empty message list keeps the built-in set.
    #[must_use]
    pub fn from_policy(policy: &TauntPolicyConfig) -> Self {
        if policy.messages.is_empty() {
            Self::default()
        } else {
            Self::new(policy.messages.iter().cloned())
        }
    }

    /// Number of dodges recorded.
    #[must_use]
    pub const fn count(&self) -> u32 {
        self.count
    }

    /// Number of distinct messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the ladder has no messages at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Message for an arbitrary dodge count.
    #[must_use]
    pub fn message_for(&self, count: u32) -> Option<&str> {
        if count == 0 || self.messages.is_empty() {
            return None;
        }
        let index = (count as usize - 1) % self.messages.len();
        Some(&self.messages[index])
    }

    /// Message for the current count.
    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.message_for(self.count)
    }

    /// Record one dodge and return the message to show.
    pub fn record_dodge(&mut self) -> Option<&str> {
        self.count = self.count.saturating_add(1);
        self.current()
    }

    /// Back to zero dodges.
    pub fn reset(&mut self) {
        self.count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_message_before_first_dodge() {
        let ladder = TauntLadder::default();
        assert_eq!(ladder.count(), 0);
        assert_eq!(ladder.current(), None);
        assert_eq!(ladder.len(), 10);
    }

    #[test]
    fn messages_follow_dodge_count() {
        let mut ladder = TauntLadder::new(["a", "b", "c"]);
        assert_eq!(ladder.record_dodge(), Some("a"));
        assert_eq!(ladder.record_dodge(), Some("b"));
        assert_eq!(ladder.record_dodge(), Some("c"));
        assert_eq!(ladder.count(), 3);
    }

    #[test]
    fn ladder_cycles_once_exhausted() {
        let ladder = TauntLadder::new(["a", "b", "c"]);
        assert_eq!(ladder.message_for(4), Some("a"));
        assert_eq!(ladder.message_for(5), Some("b"));
        assert_eq!(ladder.message_for(300), Some("c"));
    }

    #[test]
    fn default_ladder_wraps_after_ten() {
        let ladder = TauntLadder::default();
        assert_eq!(ladder.message_for(1), Some(DEFAULT_TAUNTS[0]));
        assert_eq!(ladder.message_for(10), Some(DEFAULT_TAUNTS[9]));
        assert_eq!(ladder.message_for(11), Some(DEFAULT_TAUNTS[0]));
    }

    #[test]
    fn empty_ladder_never_taunts() {
        let mut ladder = TauntLadder::new(Vec::<String>::new());
        assert!(ladder.is_empty());
        assert_eq!(ladder.record_dodge(), None);
        assert_eq!(ladder.count(), 1);
    }

    #[test]
    fn reset_clears_count() {
        let mut ladder = TauntLadder::new(["a"]);
        ladder.record_dodge();
        ladder.reset();
        assert_eq!(ladder.current(), None);
    }

    #[test]
    fn policy_overrides_messages() {
        let policy = TauntPolicyConfig {
            messages: vec!["x".into(), "y".into()],
        };
        let ladder = TauntLadder::from_policy(&policy);
        assert_eq!(ladder.len(), 2);
        assert_eq!(ladder.message_for(2), Some("y"));
        assert_eq!(
            TauntLadder::from_policy(&TauntPolicyConfig::default()),
            TauntLadder::default()
        );
    }

    #[test]
    fn policy_messages_keep_emoji_and_non_ascii_text() {
        let policy = TauntPolicyConfig {
            messages: vec!["¿En serio? 😢".into()],
        };
        let mut ladder = TauntLadder::from_policy(&policy);
        assert_eq!(ladder.record_dodge(), Some("¿En serio? 😢"));
        assert!(DEFAULT_TAUNTS.iter().all(|m| m.is_ascii()));
    }
}
