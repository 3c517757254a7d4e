// detector.rs - Decides whether one cell's visual needs recomputing

use std::sync::atomic::{AtomicU64, Ordering};

/// Identity of a selectable entity (a list item or a grid cell).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub u64);

/// Identity of the callback a cell uses to emit actions.
///
/// Two handles compare equal only if they came from the same dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DispatchHandle(u64);

static NEXT_DISPATCH: AtomicU64 = AtomicU64::new(1);

impl DispatchHandle {
    /// Allocate a handle distinct from every earlier one in this process.
    pub fn fresh() -> Self {
        Self(NEXT_DISPATCH.fetch_add(1, Ordering::Relaxed))
    }
}

/// Identity of the data a cell displays, compared by bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentKey(pub u64);

impl ContentKey {
    pub fn from_value(value: f64) -> Self {
        Self(value.to_bits())
    }
}

impl From<ItemId> for ContentKey {
    fn from(id: ItemId) -> Self {
        Self(id.0)
    }
}

/// Inputs handed to one cell's render gate on every pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRenderInput {
    pub row: usize,
    pub column: usize,
    /// Position of this cell in the caller's flat enumeration.
    pub index: usize,
    pub content: ContentKey,
    pub highlighted_index: Option<usize>,
    pub selected_item: Option<ItemId>,
    pub dispatch: DispatchHandle,
}

impl CellRenderInput {
    pub fn is_highlighted(&self) -> bool {
        self.highlighted_index == Some(self.index)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Skip,
    Recompute,
}

impl Verdict {
    pub fn is_recompute(self) -> bool {
        matches!(self, Verdict::Recompute)
    }
}

/// Change-detection rule for grid cells and list items. First match decides:
///
/// 1. dispatch handle changed: recompute, or clicks would go to a stale callback
/// 2. coordinates, flat index or content changed: recompute
/// 3. selected item changed: recompute, even for cells the change does not touch
/// 4. highlighted index unchanged: skip
/// 5. highlighted index moved: recompute only if this cell's own highlight flipped
///
/// Rule 3 over-triggers on purpose. Working out per-cell selection relevance
/// is no cheaper than redrawing.
pub fn should_recompute(prev: &CellRenderInput, next: &CellRenderInput) -> Verdict {
    if prev.dispatch != next.dispatch {
        return Verdict::Recompute;
    }
    if prev.row != next.row
        || prev.column != next.column
        || prev.index != next.index
        || prev.content != next.content
    {
        return Verdict::Recompute;
    }
    if prev.selected_item != next.selected_item {
        return Verdict::Recompute;
    }
    if prev.highlighted_index == next.highlighted_index {
        return Verdict::Skip;
    }
    if prev.is_highlighted() == next.is_highlighted() {
        Verdict::Skip
    } else {
        Verdict::Recompute
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(index: usize, highlighted: Option<usize>, dispatch: DispatchHandle) -> CellRenderInput {
        CellRenderInput {
            row: 3,
            column: 5,
            index,
            content: ContentKey::from_value(42.5),
            highlighted_index: highlighted,
            selected_item: None,
            dispatch,
        }
    }

    #[test]
    fn identical_input_skips() {
        let x = input(3, Some(3), DispatchHandle::fresh());
        assert_eq!(should_recompute(&x, &x), Verdict::Skip);
    }

    #[test]
    fn losing_highlight_recomputes() {
        let d = DispatchHandle::fresh();
        let prev = input(3, Some(3), d);
        let next = input(3, Some(7), d);
        assert_eq!(should_recompute(&prev, &next), Verdict::Recompute);
    }

    #[test]
    fn gaining_highlight_recomputes() {
        let d = DispatchHandle::fresh();
        assert_eq!(
            should_recompute(&input(7, Some(3), d), &input(7, Some(7), d)),
            Verdict::Recompute
        );
    }

    #[test]
    fn unrelated_highlight_move_skips() {
        let d = DispatchHandle::fresh();
        let prev = input(5, Some(2), d);
        let next = input(5, Some(9), d);
        assert_eq!(should_recompute(&prev, &next), Verdict::Skip);
    }

    #[test]
    fn highlight_cleared_counts_as_a_move() {
        let d = DispatchHandle::fresh();
        assert_eq!(should_recompute(&input(4, Some(4), d), &input(4, None, d)), Verdict::Recompute);
        assert_eq!(should_recompute(&input(4, Some(1), d), &input(4, None, d)), Verdict::Skip);
    }

    #[test]
    fn new_dispatch_handle_recomputes() {
        let prev = input(1, None, DispatchHandle::fresh());
        let next = input(1, None, DispatchHandle::fresh());
        assert_eq!(should_recompute(&prev, &next), Verdict::Recompute);
    }

    #[test]
    fn dispatch_beats_every_other_rule() {
        // Highlight moved elsewhere would skip on its own.
        let prev = input(5, Some(2), DispatchHandle::fresh());
        let next = input(5, Some(9), DispatchHandle::fresh());
        assert_eq!(should_recompute(&prev, &next), Verdict::Recompute);
    }

    #[test]
    fn coordinate_change_recomputes() {
        let d = DispatchHandle::fresh();
        let prev = input(0, None, d);
        let moved_row = CellRenderInput { row: 4, ..prev };
        let moved_column = CellRenderInput { column: 0, ..prev };
        assert_eq!(should_recompute(&prev, &moved_row), Verdict::Recompute);
        assert_eq!(should_recompute(&prev, &moved_column), Verdict::Recompute);
    }

    #[test]
    fn content_change_recomputes() {
        let d = DispatchHandle::fresh();
        let prev = input(0, None, d);
        let next = CellRenderInput { content: ContentKey::from_value(12.0), ..prev };
        assert_eq!(should_recompute(&prev, &next), Verdict::Recompute);
    }

    #[test]
    fn any_selection_change_recomputes() {
        let d = DispatchHandle::fresh();
        let prev = input(0, None, d);
        // Item 99 is not this cell, the detector still asks for a redraw.
        let next = CellRenderInput { selected_item: Some(ItemId(99)), ..prev };
        assert_eq!(should_recompute(&prev, &next), Verdict::Recompute);
        assert_eq!(should_recompute(&next, &prev), Verdict::Recompute);
    }

    #[test]
    fn fresh_handles_are_distinct() {
        assert_ne!(DispatchHandle::fresh(), DispatchHandle::fresh());
    }
}
