/// The dialogue queue — ordered beats, a showing latch, and pending
/// choices.

use std::collections::VecDeque;

use crate::schema::beat::{Beat, Choice};

/// What a call to [`DialogueQueue::advance`] produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// The next beat was popped and is now on stage.
    Shown(Beat),
    /// The active sequence just drained; the phase's end-of-dialogue
    /// transition should run. Fires at most once per sequence.
    Drained,
    /// Nothing to do: the queue is idle, or a choice is waiting.
    Idle,
}

/// FIFO of pending beats plus the "something is on stage" latch.
///
/// The latch is what makes the end-of-sequence transition single-fire:
/// draining flips it off, so spamming advance on an empty queue yields
/// `Idle`, not repeated `Drained`s. A pending choice freezes the queue
/// until it is answered.
#[derive(Debug, Clone)]
pub struct DialogueQueue {
    entries: VecDeque<Beat>,
    showing: bool,
    choice: Option<Vec<Choice>>,
}

impl DialogueQueue {
    pub fn new() -> Self {
        Self { entries: VecDeque::new(), showing: false, choice: None }
    }

    pub fn is_showing(&self) -> bool {
        self.showing
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn pending_len(&self) -> usize {
        self.entries.len()
    }

    pub fn has_pending_choice(&self) -> bool {
        self.choice.is_some()
    }

    pub fn pending_choice(&self) -> Option<&[Choice]> {
        self.choice.as_deref()
    }

    /// Append a beat without touching whatever is on stage.
    pub fn push(&mut self, beat: Beat) {
        self.entries.push_back(beat);
    }

    /// Throw away any queued beats and stage a fresh sequence.
    pub fn replace<I>(&mut self, beats: I)
    where
        I: IntoIterator<Item = Beat>,
    {
        debug_assert!(self.choice.is_none(), "sequence staged over an unanswered choice");
        self.entries = beats.into_iter().collect();
    }

    /// Pop the next beat, or signal the end of the active sequence.
    pub fn advance(&mut self) -> Advance {
        if self.choice.is_some() {
            return Advance::Idle;
        }
        if let Some(beat) = self.entries.pop_front() {
            self.showing = true;
            return Advance::Shown(beat);
        }
        if self.showing {
            self.showing = false;
            return Advance::Drained;
        }
        Advance::Idle
    }

    /// Record that something outside the queue (a system message) is on
    /// stage, so the next drain still runs the end-of-sequence transition.
    pub fn mark_showing(&mut self) {
        self.showing = true;
    }

    /// Put a set of options on stage. Advancing is frozen until one is
    /// selected.
    pub fn present_choice(&mut self, options: Vec<Choice>) {
        self.showing = true;
        self.choice = Some(options);
    }

    /// Resolve the pending choice by position. Out-of-range selections and
    /// selections with nothing pending return `None` and leave the state
    /// untouched.
    pub fn select_choice(&mut self, index: usize) -> Option<Choice> {
        match self.choice.take() {
            Some(mut options) if index < options.len() => Some(options.swap_remove(index)),
            other => {
                self.choice = other;
                None
            }
        }
    }
}

impl Default for DialogueQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::beat::ChoiceAction;

    fn beat(text: &'static str) -> Beat {
        Beat::narration(text)
    }

    #[test]
    fn advance_pops_in_fifo_order() {
        let mut queue = DialogueQueue::new();
        queue.push(beat("one"));
        queue.push(beat("two"));

        assert_eq!(queue.advance(), Advance::Shown(beat("one")));
        assert!(queue.is_showing());
        assert_eq!(queue.advance(), Advance::Shown(beat("two")));
        assert_eq!(queue.advance(), Advance::Drained);
        assert!(!queue.is_showing());
    }

    #[test]
    fn drained_fires_once_per_sequence() {
        let mut queue = DialogueQueue::new();
        queue.push(beat("only"));
        queue.advance();

        assert_eq!(queue.advance(), Advance::Drained);
        assert_eq!(queue.advance(), Advance::Idle);
        assert_eq!(queue.advance(), Advance::Idle);
    }

    #[test]
    fn idle_queue_stays_idle() {
        let mut queue = DialogueQueue::new();
        assert_eq!(queue.advance(), Advance::Idle);
    }

    #[test]
    fn replace_discards_queued_beats() {
        let mut queue = DialogueQueue::new();
        queue.push(beat("stale"));
        queue.replace([beat("fresh one"), beat("fresh two")]);

        assert_eq!(queue.pending_len(), 2);
        assert_eq!(queue.advance(), Advance::Shown(beat("fresh one")));
    }

    #[test]
    fn replace_preserves_the_showing_latch() {
        let mut queue = DialogueQueue::new();
        queue.push(beat("old"));
        queue.advance();
        queue.replace([beat("new")]);

        assert!(queue.is_showing());
        assert_eq!(queue.advance(), Advance::Shown(beat("new")));
        assert_eq!(queue.advance(), Advance::Drained);
    }

    #[test]
    fn external_message_arms_the_drain() {
        let mut queue = DialogueQueue::new();
        queue.mark_showing();
        assert_eq!(queue.advance(), Advance::Drained);
        assert_eq!(queue.advance(), Advance::Idle);
    }

    #[test]
    fn pending_choice_freezes_advancement() {
        let mut queue = DialogueQueue::new();
        queue.push(beat("behind the choice"));
        queue.present_choice(vec![Choice { label: "Play Again", action: ChoiceAction::Restart }]);

        assert_eq!(queue.advance(), Advance::Idle);
        assert!(queue.has_pending_choice());

        let picked = queue.select_choice(0).unwrap();
        assert_eq!(picked.action, ChoiceAction::Restart);
        assert!(!queue.has_pending_choice());
        assert_eq!(queue.advance(), Advance::Shown(beat("behind the choice")));
    }

    #[test]
    fn out_of_range_selection_keeps_the_choice_pending() {
        let mut queue = DialogueQueue::new();
        queue.present_choice(vec![Choice { label: "Play Again", action: ChoiceAction::Restart }]);

        assert!(queue.select_choice(5).is_none());
        assert!(queue.has_pending_choice());
        assert!(queue.select_choice(0).is_some());
    }

    #[test]
    fn selection_with_nothing_pending_is_a_no_op() {
        let mut queue = DialogueQueue::new();
        assert!(queue.select_choice(0).is_none());
    }

    #[test]
    fn selection_picks_by_position() {
        let mut queue = DialogueQueue::new();
        queue.present_choice(vec![
            Choice { label: "Warn Mother about the cup", action: ChoiceAction::WarnQueen },
            Choice { label: "Taunt Laertes", action: ChoiceAction::TauntLaertes },
        ]);

        let picked = queue.select_choice(1).unwrap();
        assert_eq!(picked.action, ChoiceAction::TauntLaertes);
    }
}
