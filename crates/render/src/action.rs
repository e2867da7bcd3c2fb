//! Clickable regions created by `%{A...}` tags.
//!
//! The [`ActionTracker`] outlives individual dispatch passes so that a click
//! arriving after a redraw can be resolved to the command of the region under
//! the pointer. Each pass starts with [`ActionTracker::begin_cycle`], which
//! drops every region of the previous pass.
//!
//! Open regions are kept on one stack per alignment zone. A close tag pops the
//! most recently opened region of the requested button in the current zone,
//! so regions for several buttons may be opened together and closed in any
//! order, and regions never cross zones.

use std::fmt;

use markup::MouseButton;

use crate::context::Alignment;

/// Handle for one action region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActionId(u64);

impl ActionId {
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out monotonically increasing [`ActionId`]s.
#[derive(Debug, Clone, Default)]
pub struct ActionIdAllocator {
    next: u64,
}

impl ActionIdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// An allocator whose first id is `first`.
    pub fn starting_at(first: u64) -> Self {
        Self { next: first }
    }

    pub fn allocate(&mut self) -> ActionId {
        let id = ActionId(self.next);
        self.next += 1;
        id
    }
}

/// A clickable span bound to a mouse button and a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRegion {
    pub id: ActionId,
    pub button: MouseButton,
    pub command: String,
    pub zone: Alignment,
    /// First pixel of the region, reported by the renderer.
    pub start_x: Option<i32>,
    /// One past the last pixel of the region, reported by the renderer.
    pub end_x: Option<i32>,
    open: bool,
}

impl ActionRegion {
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Returns true if `x` lies inside the region's reported extent.
    pub fn contains(&self, x: i32) -> bool {
        match (self.start_x, self.end_x) {
            (Some(start), Some(end)) => start <= x && x < end,
            _ => false,
        }
    }
}

/// Tracks open and closed action regions for the current dispatch pass.
#[derive(Debug, Clone, Default)]
pub struct ActionTracker {
    ids: ActionIdAllocator,
    regions: Vec<ActionRegion>,
    open: [Vec<(ActionId, MouseButton)>; 3],
}

impl ActionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// A tracker drawing ids from `ids`.
    pub fn with_allocator(ids: ActionIdAllocator) -> Self {
        Self {
            ids,
            ..Self::default()
        }
    }

    /// Drop every region. Ids are never reused.
    pub fn begin_cycle(&mut self) {
        self.regions.clear();
        for stack in &mut self.open {
            stack.clear();
        }
    }

    /// Ids of regions still open, in opening order. They stay in the tracker
    /// until the next [`begin_cycle`](Self::begin_cycle).
    pub fn end_cycle(&self) -> Vec<ActionId> {
        let mut unclosed: Vec<_> = self
            .open
            .iter()
            .flat_map(|stack| stack.iter().map(|(id, _)| *id))
            .collect();
        unclosed.sort();
        unclosed
    }

    pub fn action_open(&mut self, button: MouseButton, command: String, zone: Alignment) -> ActionId {
        let id = self.ids.allocate();
        self.regions.push(ActionRegion {
            id,
            button,
            command,
            zone,
            start_x: None,
            end_x: None,
            open: true,
        });
        self.open[zone.index()].push((id, button));
        id
    }

    /// Close the most recent open region in `zone` for `button`, or for any
    /// button when `button` is `None`.
    ///
    /// Returns `None` if no such region is open.
    pub fn action_close(
        &mut self,
        button: Option<MouseButton>,
        zone: Alignment,
    ) -> Option<(ActionId, MouseButton)> {
        let stack = &mut self.open[zone.index()];
        let pos = stack
            .iter()
            .rposition(|(_, open_button)| button.is_none_or(|b| b == *open_button))?;
        let (id, button) = stack.remove(pos);

        if let Some(region) = self.region_mut(id) {
            region.open = false;
        }
        Some((id, button))
    }

    fn region_mut(&mut self, id: ActionId) -> Option<&mut ActionRegion> {
        self.regions.iter_mut().find(|r| r.id == id)
    }

    pub fn get(&self, id: ActionId) -> Option<&ActionRegion> {
        self.regions.iter().find(|r| r.id == id)
    }

    pub fn command(&self, id: ActionId) -> Option<&str> {
        self.get(id).map(|r| r.command.as_str())
    }

    /// Record where a region starts. Returns false for unknown ids.
    pub fn set_start(&mut self, id: ActionId, x: i32) -> bool {
        match self.region_mut(id) {
            Some(region) => {
                region.start_x = Some(x);
                true
            }
            None => false,
        }
    }

    /// Record where a region ends. Returns false for unknown ids.
    pub fn set_end(&mut self, id: ActionId, x: i32) -> bool {
        match self.region_mut(id) {
            Some(region) => {
                region.end_x = Some(x);
                true
            }
            None => false,
        }
    }

    /// The innermost closed region for `button` containing `x`.
    pub fn has_action(&self, button: MouseButton, x: i32) -> Option<ActionId> {
        self.regions
            .iter()
            .rev()
            .find(|r| !r.open && r.button == button && r.contains(x))
            .map(|r| r.id)
    }

    pub fn regions(&self) -> &[ActionRegion] {
        &self.regions
    }

    /// Number of regions created in the current pass.
    pub fn num_actions(&self) -> usize {
        self.regions.len()
    }

    pub fn num_unclosed(&self) -> usize {
        self.open.iter().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_then_close_returns_same_id() {
        let mut tracker = ActionTracker::new();
        let id = tracker.action_open(MouseButton::Left, "X".into(), Alignment::Left);
        assert_eq!(
            tracker.action_close(Some(MouseButton::Left), Alignment::Left),
            Some((id, MouseButton::Left))
        );
        assert_eq!(tracker.num_unclosed(), 0);
        assert!(!tracker.get(id).unwrap().is_open());
    }

    #[test]
    fn close_is_valid_once() {
        let mut tracker = ActionTracker::new();
        tracker.action_open(MouseButton::Left, "X".into(), Alignment::Left);
        assert!(tracker.action_close(None, Alignment::Left).is_some());
        assert_eq!(tracker.action_close(None, Alignment::Left), None);
    }

    #[test]
    fn mismatched_button_does_not_close_other_regions() {
        let mut tracker = ActionTracker::new();
        let left = tracker.action_open(MouseButton::Left, "X".into(), Alignment::Left);
        assert_eq!(tracker.action_close(Some(MouseButton::Right), Alignment::Left), None);
        assert!(tracker.get(left).unwrap().is_open());
    }

    #[test]
    fn zones_are_isolated() {
        let mut tracker = ActionTracker::new();
        tracker.action_open(MouseButton::Left, "X".into(), Alignment::Left);
        assert_eq!(tracker.action_close(Some(MouseButton::Left), Alignment::Right), None);
        assert_eq!(tracker.action_close(None, Alignment::Center), None);
        assert_eq!(tracker.num_unclosed(), 1);
    }

    #[test]
    fn close_picks_most_recent_matching_button() {
        let mut tracker = ActionTracker::new();
        let outer = tracker.action_open(MouseButton::Left, "a".into(), Alignment::Left);
        let scroll = tracker.action_open(MouseButton::ScrollUp, "b".into(), Alignment::Left);
        let inner = tracker.action_open(MouseButton::Left, "c".into(), Alignment::Left);

        assert_eq!(
            tracker.action_close(Some(MouseButton::Left), Alignment::Left),
            Some((inner, MouseButton::Left))
        );
        assert_eq!(
            tracker.action_close(Some(MouseButton::Left), Alignment::Left),
            Some((outer, MouseButton::Left))
        );
        assert_eq!(
            tracker.action_close(None, Alignment::Left),
            Some((scroll, MouseButton::ScrollUp))
        );
    }

    #[test]
    fn ids_come_from_injected_allocator() {
        let mut tracker = ActionTracker::with_allocator(ActionIdAllocator::starting_at(40));
        let a = tracker.action_open(MouseButton::Left, "a".into(), Alignment::Left);
        tracker.begin_cycle();
        let b = tracker.action_open(MouseButton::Left, "b".into(), Alignment::Left);
        assert_eq!(a.value(), 40);
        assert_eq!(b.value(), 41);
    }

    #[test]
    fn begin_cycle_discards_everything() {
        let mut tracker = ActionTracker::new();
        let id = tracker.action_open(MouseButton::Left, "a".into(), Alignment::Right);
        tracker.begin_cycle();
        assert_eq!(tracker.num_actions(), 0);
        assert_eq!(tracker.num_unclosed(), 0);
        assert!(tracker.get(id).is_none());
        assert_eq!(tracker.action_close(None, Alignment::Right), None);
    }

    #[test]
    fn end_cycle_reports_unclosed() {
        let mut tracker = ActionTracker::new();
        let a = tracker.action_open(MouseButton::Left, "a".into(), Alignment::Right);
        let b = tracker.action_open(MouseButton::Left, "b".into(), Alignment::Left);
        let c = tracker.action_open(MouseButton::Middle, "c".into(), Alignment::Left);
        tracker.action_close(Some(MouseButton::Left), Alignment::Left);
        assert_eq!(tracker.end_cycle(), vec![a, c]);
        assert_ne!(b, c);
    }

    #[test]
    fn click_resolution_prefers_innermost() {
        let mut tracker = ActionTracker::new();
        let outer = tracker.action_open(MouseButton::Left, "outer".into(), Alignment::Left);
        let inner = tracker.action_open(MouseButton::Left, "inner".into(), Alignment::Left);
        tracker.action_close(None, Alignment::Left);
        tracker.action_close(None, Alignment::Left);
        assert!(tracker.set_start(outer, 0));
        assert!(tracker.set_end(outer, 20));
        assert!(tracker.set_start(inner, 5));
        assert!(tracker.set_end(inner, 10));

        assert_eq!(tracker.has_action(MouseButton::Left, 7), Some(inner));
        assert_eq!(tracker.has_action(MouseButton::Left, 15), Some(outer));
        assert_eq!(tracker.has_action(MouseButton::Left, 20), None);
        assert_eq!(tracker.has_action(MouseButton::Right, 7), None);
        assert_eq!(tracker.command(inner), Some("inner"));
    }

    #[test]
    fn open_regions_are_not_clickable() {
        let mut tracker = ActionTracker::new();
        let id = tracker.action_open(MouseButton::Left, "a".into(), Alignment::Left);
        tracker.set_start(id, 0);
        tracker.set_end(id, 10);
        assert_eq!(tracker.has_action(MouseButton::Left, 5), None);
    }

    #[test]
    fn set_extent_of_unknown_id() {
        let mut tracker = ActionTracker::new();
        let id = tracker.action_open(MouseButton::Left, "a".into(), Alignment::Left);
        tracker.begin_cycle();
        assert!(!tracker.set_start(id, 0));
        assert!(!tracker.set_end(id, 1));
    }
}
