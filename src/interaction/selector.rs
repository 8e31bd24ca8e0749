use super::interactable::Interactable;
use crate::events::{ListenerId, Observers};
use crate::math::Vec2;
use log::debug;
use std::rc::{Rc, Weak};

/// Strong handle to an interactable; the owner (scene/entity table) keeps it alive
pub type Candidate<C> = Rc<dyn Interactable<C>>;

/// Tracks interactables in range and picks the single best one
///
/// Candidates are held weakly. Dropping the last strong handle is how an
/// entity gets "destroyed"; dead entries are pruned at the start of every
/// `evaluate`.
///
/// Selection order: highest `priority()` first, then the smallest squared
/// distance to the anchor. Remaining ties go to whichever candidate
/// entered range first.
pub struct InteractionSelector<C> {
    candidates: Vec<Weak<dyn Interactable<C>>>,
    current: Option<Weak<dyn Interactable<C>>>,
    anchor: Vec2,
    on_target_changed: Observers<Option<Candidate<C>>>,
}

impl<C> InteractionSelector<C> {
    pub fn new() -> Self {
        InteractionSelector {
            candidates: Vec::new(),
            current: None,
            anchor: Vec2::ZERO,
            on_target_changed: Observers::new(),
        }
    }

    /// Adds a candidate that entered range. Returns false if already tracked.
    ///
    /// Selection is not recomputed until the next `evaluate`.
    pub fn add_candidate(&mut self, candidate: &Candidate<C>) -> bool {
        let handle = Rc::downgrade(candidate);
        if self.candidates.iter().any(|c| Weak::ptr_eq(c, &handle)) {
            return false;
        }
        self.candidates.push(handle);
        true
    }

    /// Removes a candidate that left range. Returns false if it wasn't tracked.
    pub fn remove_candidate(&mut self, candidate: &Candidate<C>) -> bool {
        let handle = Rc::downgrade(candidate);
        let before = self.candidates.len();
        self.candidates.retain(|c| !Weak::ptr_eq(c, &handle));
        self.candidates.len() != before
    }

    /// Number of tracked candidates (including ones not yet pruned)
    pub fn candidate_count(&self) -> usize {
        self.candidates.len()
    }

    /// Observer position used by the last `evaluate`
    pub fn anchor(&self) -> Vec2 {
        self.anchor
    }

    /// Recomputes the best target around `anchor`
    ///
    /// Returns true (and notifies listeners) if the target changed,
    /// including changes to or from "no target".
    pub fn evaluate(&mut self, anchor: Vec2) -> bool {
        self.anchor = anchor;
        self.candidates.retain(|c| c.strong_count() > 0);

        let best = self.choose_best(anchor);

        let changed = match (&self.current, &best) {
            (None, None) => false,
            (Some(current), Some(best)) => !Weak::ptr_eq(current, &Rc::downgrade(best)),
            _ => true,
        };

        if changed {
            self.current = best.as_ref().map(Rc::downgrade);
            debug!(
                "Interaction target changed: {}",
                best.as_ref().map_or_else(|| "none".to_string(), |t| t.prompt_text())
            );
            self.on_target_changed.notify(&best);
        }

        changed
    }

    /// Interacts with the current target, if any and still alive
    ///
    /// Returns true if an interaction ran.
    pub fn trigger(&self, ctx: &mut C) -> bool {
        match self.current_target() {
            Some(target) => {
                target.interact(ctx);
                true
            }
            None => false,
        }
    }

    /// The currently selected target
    pub fn current_target(&self) -> Option<Candidate<C>> {
        self.current.as_ref().and_then(Weak::upgrade)
    }

    /// Prompt text for the current target (what the prompt UI shows)
    pub fn current_prompt(&self) -> Option<String> {
        self.current_target().map(|target| target.prompt_text())
    }

    /// Registers a listener for target changes; receives the new target or None
    pub fn subscribe(&mut self, listener: impl FnMut(&Option<Candidate<C>>) + 'static) -> ListenerId {
        self.on_target_changed.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.on_target_changed.unsubscribe(id)
    }

    fn choose_best(&self, anchor: Vec2) -> Option<Candidate<C>> {
        let mut live = self.candidates.iter().filter_map(Weak::upgrade);

        if self.candidates.len() == 1 {
            return live.next();
        }

        let mut best: Option<(Candidate<C>, i32, f32)> = None;

        for candidate in live {
            let priority = candidate.priority();
            let dist_sq = candidate.position().distance_squared(anchor);

            let better = match &best {
                None => true,
                Some((_, best_priority, best_dist_sq)) => {
                    priority > *best_priority
                        || (priority == *best_priority && dist_sq < *best_dist_sq)
                }
            };

            if better {
                best = Some((candidate, priority, dist_sq));
            }
        }

        best.map(|(candidate, _, _)| candidate)
    }
}

impl<C> Default for InteractionSelector<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    /// Context: log of interacted prop names
    type Log = Vec<&'static str>;

    struct Prop {
        name: &'static str,
        priority: i32,
        position: Cell<Vec2>,
    }

    impl Prop {
        fn spawn(name: &'static str, priority: i32, x: f32) -> Candidate<Log> {
            Rc::new(Prop {
                name,
                priority,
                position: Cell::new(Vec2::new(x, 0.0)),
            })
        }
    }

    impl Interactable<Log> for Prop {
        fn interact(&self, ctx: &mut Log) {
            ctx.push(self.name);
        }

        fn prompt_text(&self) -> String {
            self.name.to_string()
        }

        fn priority(&self) -> i32 {
            self.priority
        }

        fn position(&self) -> Vec2 {
            self.position.get()
        }
    }

    fn changes(selector: &mut InteractionSelector<Log>) -> Rc<RefCell<Vec<Option<String>>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        selector.subscribe(move |target| {
            sink.borrow_mut().push(target.as_ref().map(|t| t.prompt_text()));
        });
        seen
    }

    #[test]
    fn test_priority_beats_distance() {
        let far_high = Prop::spawn("far_high", 5, 10.0);
        let near_high = Prop::spawn("near_high", 5, 2.0);
        let nearest_low = Prop::spawn("nearest_low", 3, 1.0);

        let mut selector = InteractionSelector::new();
        for prop in [&far_high, &near_high, &nearest_low] {
            selector.add_candidate(prop);
        }

        assert!(selector.evaluate(Vec2::ZERO));
        assert_eq!(selector.current_prompt().as_deref(), Some("near_high"));
    }

    #[test]
    fn test_no_candidates_means_no_target() {
        let mut selector: InteractionSelector<Log> = InteractionSelector::new();
        assert!(!selector.evaluate(Vec2::ZERO));
        assert!(selector.current_target().is_none());

        let mut log = Log::new();
        assert!(!selector.trigger(&mut log));
        assert!(log.is_empty());
    }

    #[test]
    fn test_single_candidate_selected() {
        let only = Prop::spawn("only", -100, 1_000.0);
        let mut selector = InteractionSelector::new();
        selector.add_candidate(&only);

        assert!(selector.evaluate(Vec2::ZERO));
        assert_eq!(selector.current_prompt().as_deref(), Some("only"));
        assert!(!selector.evaluate(Vec2::ZERO)); // Unchanged
    }

    #[test]
    fn test_duplicates_ignored() {
        let prop = Prop::spawn("crate", 0, 1.0);
        let mut selector = InteractionSelector::new();

        assert!(selector.add_candidate(&prop));
        assert!(!selector.add_candidate(&prop));
        assert_eq!(selector.candidate_count(), 1);
    }

    #[test]
    fn test_removing_target_selects_next_best() {
        let best = Prop::spawn("best", 5, 3.0);
        let next = Prop::spawn("next", 1, 1.0);

        let mut selector = InteractionSelector::new();
        selector.add_candidate(&best);
        selector.add_candidate(&next);
        selector.evaluate(Vec2::ZERO);
        let seen = changes(&mut selector);

        assert!(selector.remove_candidate(&best));
        assert!(selector.evaluate(Vec2::ZERO));
        assert_eq!(*seen.borrow(), vec![Some("next".to_string())]);

        selector.remove_candidate(&next);
        assert!(selector.evaluate(Vec2::ZERO));
        assert!(!selector.evaluate(Vec2::ZERO));
        assert_eq!(*seen.borrow(), vec![Some("next".to_string()), None]);
    }

    #[test]
    fn test_dropped_candidates_are_pruned() {
        let keep = Prop::spawn("keep", 0, 5.0);
        let doomed = Prop::spawn("doomed", 9, 1.0);

        let mut selector = InteractionSelector::new();
        selector.add_candidate(&keep);
        selector.add_candidate(&doomed);
        selector.evaluate(Vec2::ZERO);
        assert_eq!(selector.current_prompt().as_deref(), Some("doomed"));

        drop(doomed);
        assert!(selector.current_target().is_none());
        assert!(selector.evaluate(Vec2::ZERO));
        assert_eq!(selector.candidate_count(), 1);
        assert_eq!(selector.current_prompt().as_deref(), Some("keep"));
    }

    #[test]
    fn test_moving_anchor_changes_target() {
        let left = Prop::spawn("left", 0, -4.0);
        let right = Prop::spawn("right", 0, 4.0);

        let mut selector = InteractionSelector::new();
        selector.add_candidate(&left);
        selector.add_candidate(&right);

        selector.evaluate(Vec2::new(-3.0, 0.0));
        assert_eq!(selector.current_prompt().as_deref(), Some("left"));

        assert!(selector.evaluate(Vec2::new(3.0, 0.0)));
        assert_eq!(selector.current_prompt().as_deref(), Some("right"));
        assert_eq!(selector.anchor(), Vec2::new(3.0, 0.0));
    }

    #[test]
    fn test_equal_candidates_keep_first_found() {
        let first = Prop::spawn("first", 2, 3.0);
        let second = Prop::spawn("second", 2, -3.0);

        let mut selector = InteractionSelector::new();
        selector.add_candidate(&first);
        selector.add_candidate(&second);

        selector.evaluate(Vec2::ZERO);
        assert_eq!(selector.current_prompt().as_deref(), Some("first"));
    }

    #[test]
    fn test_trigger_runs_current_target() {
        let lever = Prop::spawn("lever", 0, 1.0);
        let mut selector = InteractionSelector::new();
        selector.add_candidate(&lever);
        selector.evaluate(Vec2::ZERO);

        let mut log = Log::new();
        assert!(selector.trigger(&mut log));
        assert!(selector.trigger(&mut log));
        assert_eq!(log, vec!["lever", "lever"]);
    }
}
