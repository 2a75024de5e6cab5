#![forbid(unsafe_code)]

//! Invitation response state.
//!
//! The prompt starts [`InvitationResponse::Pending`]. While pending, every
//! dodge of the decline control advances the taunt ladder. Accepting is
//! final: the decline control is no longer shown and later dodges are not
//! counted.

use std::cell::RefCell;
use std::rc::Rc;

use crate::taunt::TauntLadder;

/// Recipient's answer so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InvitationResponse {
    #[default]
    Pending,
    Accepted,
}

/// Response state plus the taunts shown while it is pending.
#[derive(Debug, Clone, Default)]
pub struct InvitationPrompt {
    response: InvitationResponse,
    taunts: TauntLadder,
}

impl InvitationPrompt {
    #[must_use]
    pub fn new(taunts: TauntLadder) -> Self {
        Self {
            response: InvitationResponse::Pending,
            taunts,
        }
    }

    /// Resume from a previously stored response.
    #[must_use]
    pub fn with_response(mut self, response: InvitationResponse) -> Self {
        self.response = response;
        self
    }

    #[must_use]
    pub const fn response(&self) -> InvitationResponse {
        self.response
    }

    #[must_use]
    pub fn is_accepted(&self) -> bool {
        self.response == InvitationResponse::Accepted
    }

    /// Whether the decline control should still be rendered.
    #[must_use]
    pub fn shows_decline(&self) -> bool {
        !self.is_accepted()
    }

    /// Dodges counted while pending.
    #[must_use]
    pub const fn dodges(&self) -> u32 {
        self.taunts.count()
    }

    /// Taunt to display, if any. Nothing is shown once accepted.
    #[must_use]
    pub fn taunt(&self) -> Option<&str> {
        if self.is_accepted() {
            return None;
        }
        self.taunts.current()
    }

    /// Accept the invitation. Returns `false` if it was already accepted.
    pub fn accept(&mut self) -> bool {
        if self.is_accepted() {
            return false;
        }
        self.response = InvitationResponse::Accepted;
        #[cfg(feature = "tracing")]
        tracing::info!(message = "invitation.accept", dodges = self.taunts.count());
        true
    }

    /// Count one dodge and return the new taunt. Ignored once accepted.
    pub fn record_dodge(&mut self) -> Option<&str> {
        if self.is_accepted() {
            return None;
        }
        self.taunts.record_dodge()
    }

    /// Callback suitable for [`EvasiveButton::on_dodge`].
    ///
    /// Holds a weak reference, so it never keeps the prompt alive.
    ///
    /// [`EvasiveButton::on_dodge`]: crate::EvasiveButton::on_dodge
    pub fn dodge_handler(this: &Rc<RefCell<Self>>) -> impl FnMut() + 'static {
        let weak = Rc::downgrade(this);
        move || {
            if let Some(shared) = weak.upgrade()
                && let Ok(mut prompt) = shared.try_borrow_mut()
            {
                prompt.record_dodge();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_pending_without_taunt() {
        let prompt = InvitationPrompt::default();
        assert_eq!(prompt.response(), InvitationResponse::Pending);
        assert!(prompt.shows_decline());
        assert_eq!(prompt.taunt(), None);
        assert_eq!(prompt.dodges(), 0);
    }

    #[test]
    fn dodges_advance_taunts() {
        let mut prompt = InvitationPrompt::new(TauntLadder::new(["one", "two"]));
        assert_eq!(prompt.record_dodge(), Some("one"));
        assert_eq!(prompt.record_dodge(), Some("two"));
        assert_eq!(prompt.record_dodge(), Some("one"));
        assert_eq!(prompt.taunt(), Some("one"));
        assert_eq!(prompt.dodges(), 3);
    }

    #[test]
    fn accept_is_idempotent() {
        let mut prompt = InvitationPrompt::default();
        assert!(prompt.accept());
        assert!(!prompt.accept());
        assert!(prompt.is_accepted());
        assert!(!prompt.shows_decline());
    }

    #[test]
    fn dodges_after_accept_are_ignored() {
        let mut prompt = InvitationPrompt::new(TauntLadder::new(["one"]));
        prompt.record_dodge();
        prompt.accept();
        assert_eq!(prompt.record_dodge(), None);
        assert_eq!(prompt.dodges(), 1);
        assert_eq!(prompt.taunt(), None);
    }

    #[test]
    fn resumed_acceptance_hides_decline() {
        let mut prompt =
            InvitationPrompt::default().with_response(InvitationResponse::Accepted);
        assert!(!prompt.shows_decline());
        assert!(!prompt.accept());
        assert_eq!(prompt.record_dodge(), None);
    }

    #[test]
    fn dodge_handler_counts_through_shared_prompt() {
        let prompt = Rc::new(RefCell::new(InvitationPrompt::default()));
        let mut handler = InvitationPrompt::dodge_handler(&prompt);
        handler();
        handler();
        assert_eq!(prompt.borrow().dodges(), 2);
    }

    #[test]
    fn dodge_handler_outliving_prompt_is_harmless() {
        let prompt = Rc::new(RefCell::new(InvitationPrompt::default()));
        let mut handler = InvitationPrompt::dodge_handler(&prompt);
        drop(prompt);
        handler();
    }
}
