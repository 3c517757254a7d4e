// combobox.rs - Input/highlight/selection state for a filterable list

use crate::detector::ItemId;

/// Emitted when the selected item actually changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    Selected(ItemId),
    Cleared,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Combobox {
    input_value: String,
    highlighted_index: Option<usize>,
    selected_item: Option<ItemId>,
    item_count: usize,
}

impl Combobox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input_value(&self) -> &str {
        &self.input_value
    }

    pub fn highlighted_index(&self) -> Option<usize> {
        self.highlighted_index
    }

    pub fn selected_item(&self) -> Option<ItemId> {
        self.selected_item
    }

    /// Replace the input text. Returns whether it changed; a change drops
    /// the highlight since the list is about to be refiltered.
    pub fn set_input(&mut self, value: &str) -> bool {
        if self.input_value == value {
            return false;
        }
        self.input_value = value.to_string();
        self.highlighted_index = None;
        true
    }

    /// Tell the combobox how many items are rendered.
    pub fn set_item_count(&mut self, count: usize) {
        self.item_count = count;
        if self.highlighted_index.is_some_and(|i| i >= count) {
            self.highlighted_index = None;
        }
    }

    pub fn highlight(&mut self, index: Option<usize>) {
        self.highlighted_index = index.filter(|&i| i < self.item_count);
    }

    pub fn highlight_next(&mut self) {
        if self.item_count == 0 {
            self.highlighted_index = None;
            return;
        }
        self.highlighted_index = Some(match self.highlighted_index {
            Some(i) => (i + 1) % self.item_count,
            None => 0,
        });
    }

    pub fn highlight_prev(&mut self) {
        if self.item_count == 0 {
            self.highlighted_index = None;
            return;
        }
        self.highlighted_index = Some(match self.highlighted_index {
            Some(0) | None => self.item_count - 1,
            Some(i) => i - 1,
        });
    }

    /// Select `item`; `None` if it was already selected.
    pub fn select(&mut self, item: ItemId) -> Option<SelectionChange> {
        if self.selected_item == Some(item) {
            return None;
        }
        self.selected_item = Some(item);
        Some(SelectionChange::Selected(item))
    }

    pub fn clear_selection(&mut self) -> Option<SelectionChange> {
        self.selected_item.take().map(|_| SelectionChange::Cleared)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_items(count: usize) -> Combobox {
        let mut combo = Combobox::new();
        combo.set_item_count(count);
        combo
    }

    #[test]
    fn highlight_wraps_both_ways() {
        let mut combo = with_items(3);
        combo.highlight_prev();
        assert_eq!(combo.highlighted_index(), Some(2));
        combo.highlight_next();
        assert_eq!(combo.highlighted_index(), Some(0));
        combo.highlight_next();
        assert_eq!(combo.highlighted_index(), Some(1));
    }

    #[test]
    fn empty_list_has_no_highlight() {
        let mut combo = with_items(0);
        combo.highlight_next();
        assert_eq!(combo.highlighted_index(), None);
        combo.highlight(Some(0));
        assert_eq!(combo.highlighted_index(), None);
    }

    #[test]
    fn shrinking_list_drops_stale_highlight() {
        let mut combo = with_items(10);
        combo.highlight(Some(8));
        combo.set_item_count(5);
        assert_eq!(combo.highlighted_index(), None);
    }

    #[test]
    fn typing_resets_highlight() {
        let mut combo = with_items(10);
        combo.highlight(Some(4));
        assert!(combo.set_input("par"));
        assert!(!combo.set_input("par"));
        assert_eq!(combo.highlighted_index(), None);
        assert_eq!(combo.input_value(), "par");
    }

    #[test]
    fn selection_changes_are_reported_once() {
        let mut combo = with_items(10);
        assert_eq!(combo.select(ItemId(4)), Some(SelectionChange::Selected(ItemId(4))));
        assert_eq!(combo.select(ItemId(4)), None);
        assert_eq!(combo.clear_selection(), Some(SelectionChange::Cleared));
        assert_eq!(combo.clear_selection(), None);
    }
}
