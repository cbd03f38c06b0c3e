//! Grid, paginator and navigator bar combined into one focus domain
//!
//! Only one element across the grid items and navigator buttons is ever
//! highlighted. When a rebuilt page offers nothing to highlight, focus falls
//! back to the navigator's Player button.

use crate::nav::listeners::{ListenerKey, ListenerMap};
use crate::nav::widgets::{
    Direction, GridItem, GridLayout, MenuGrid, MoveOutcome, Navigator, Paginator, RedrawSignal,
    ResumeStrategy,
};

/// Which element currently holds the highlight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Grid(usize),
    Navigator(ListenerKey),
    None,
}

/// How to pick the highlighted item after a page rebuild
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reselect {
    First,
    /// Page-relative index
    Index(usize),
    /// Item whose `id` matches, if it is on the new page
    Identity(String),
}

#[derive(Debug)]
pub struct PagedMenu {
    grid: MenuGrid,
    navigator: Navigator,
    paginator: Paginator,
    items: Vec<GridItem>,
    signal: RedrawSignal,
}

impl PagedMenu {
    pub fn new(rows: usize, cols: usize, layout: GridLayout, navigator: Navigator, signal: RedrawSignal) -> Self {
        let mut grid = MenuGrid::new(rows, cols, layout);
        let grid_signal = signal.clone();
        grid.subscribe(move |_| grid_signal.request());
        let page_size = grid.capacity();

        Self {
            grid,
            navigator,
            paginator: Paginator::new(page_size, 0),
            items: Vec::new(),
            signal,
        }
    }

    pub fn grid(&self) -> &MenuGrid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut MenuGrid {
        &mut self.grid
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    /// Every item across all pages
    pub fn items(&self) -> &[GridItem] {
        &self.items
    }

    pub fn focus(&self) -> Focus {
        if let Some(i) = self.grid.selected() {
            Focus::Grid(i)
        } else if let Some(key) = self.navigator.selected_key() {
            Focus::Navigator(key)
        } else {
            Focus::None
        }
    }

    pub fn selected_item(&self) -> Option<&GridItem> {
        self.grid.selected_item()
    }

    /// Replace the whole item list and show the current (clamped) page
    pub fn set_items(&mut self, items: Vec<GridItem>, reselect: Reselect) {
        self.items = items;
        self.paginator.set_total_items(self.items.len());
        self.rebuild(reselect);
    }

    /// Show `page` (clamped); returns the page now shown
    pub fn show_page(&mut self, page: usize, reselect: Reselect) -> usize {
        let shown = self.paginator.turn_to(page);
        self.rebuild(reselect);
        shown
    }

    /// Turn by `delta` pages. Returns false at either end.
    pub fn turn_page(&mut self, delta: i32) -> bool {
        if !self.paginator.turn(delta) {
            return false;
        }
        self.rebuild(Reselect::First);
        true
    }

    /// Reopen on the page holding the absolute `index`. Returns whether the
    /// item itself could be highlighted.
    pub fn resume(&mut self, index: usize, strategy: ResumeStrategy) -> bool {
        match self.paginator.resume(index, strategy) {
            Some(relative) => {
                self.rebuild(Reselect::Index(relative));
                self.grid.selected() == Some(relative)
            }
            None => {
                self.rebuild(Reselect::First);
                self.force_player_focus();
                false
            }
        }
    }

    fn rebuild(&mut self, reselect: Reselect) {
        let range = self.paginator.page_range();
        let page_items = self.items[range].to_vec();
        self.grid.set_items(page_items);

        let (left, right) = self.paginator.counters();
        self.navigator.set_page_counters(&left, &right);

        let enabled = |grid: &MenuGrid, i: usize| grid.items().get(i).map(|item| item.enabled).unwrap_or(false);
        let target = match reselect {
            Reselect::First => self.grid.first_enabled(),
            Reselect::Index(i) => Some(i).filter(|i| enabled(&self.grid, *i)),
            Reselect::Identity(id) => self.grid.position_of(&id),
        };

        match target {
            Some(i) => {
                self.navigator.clear_selection();
                self.grid.set_selected(Some(i));
            }
            None => self.force_player_focus(),
        }
    }

    /// Park the highlight on the navigator's Player button
    pub fn force_player_focus(&mut self) {
        self.grid.set_selected(None);
        if !self.navigator.select_key(ListenerKey::Player) {
            self.navigator.select_default();
        }
        self.signal.request();
    }

    /// Directional input. Inside the grid this is the wraparound walk; inside
    /// the navigator left/right walk the bar and up/down return to the grid.
    pub fn navigate(&mut self, direction: Direction) -> bool {
        if self.grid.selected().is_some() || self.navigator.selected().is_none() {
            return match self.grid.move_selection(direction) {
                MoveOutcome::Moved { .. } => {
                    self.navigator.clear_selection();
                    true
                }
                MoveOutcome::Rejected => false,
            };
        }

        let moved = match direction {
            Direction::Left => self.navigator.move_selection(-1),
            Direction::Right => self.navigator.move_selection(1),
            Direction::Up | Direction::Down => return self.focus_grid(),
        };
        if moved {
            self.signal.request();
        }
        moved
    }

    fn focus_grid(&mut self) -> bool {
        match self.grid.first_enabled() {
            Some(first) => {
                self.navigator.clear_selection();
                self.grid.set_selected(Some(first));
                true
            }
            None => false,
        }
    }

    /// Toggle the highlight between grid and navigator
    pub fn focus_next(&mut self) -> bool {
        match self.focus() {
            Focus::Grid(_) => {
                self.grid.set_selected(None);
                self.navigator.select_default();
                self.signal.request();
                true
            }
            Focus::Navigator(_) | Focus::None => {
                if self.focus_grid() {
                    true
                } else {
                    self.force_player_focus();
                    true
                }
            }
        }
    }

    /// Press whatever is highlighted
    pub fn activate(&mut self, listeners: &ListenerMap) -> bool {
        if self.grid.selected().is_some() {
            self.grid.select()
        } else {
            self.navigator.activate(listeners)
        }
    }

    /// Touch on a page-relative grid cell
    pub fn touch(&mut self, index: usize) -> bool {
        if self.grid.select_index(index) {
            self.navigator.clear_selection();
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::state::StateObject;

    fn items(count: usize) -> Vec<GridItem> {
        (0..count)
            .map(|i| GridItem::new(format!("track {}", i), StateObject::new().with("index", i)).with_id(format!("t{}", i)))
            .collect()
    }

    fn menu(rows: usize, cols: usize) -> (PagedMenu, RedrawSignal) {
        let signal = RedrawSignal::new();
        (PagedMenu::new(rows, cols, GridLayout::Horizontal, Navigator::paginated(), signal.clone()), signal)
    }

    fn assert_single_highlight(menu: &PagedMenu) {
        let grid = menu.grid().selected().is_some() as u8;
        let nav = menu.navigator().selected().is_some() as u8;
        assert!(grid + nav <= 1, "grid and navigator both highlighted");
    }

    #[test]
    fn test_pages_and_counters() {
        let (mut menu, _) = menu(2, 5);
        menu.set_items(items(23), Reselect::First);

        assert_eq!(menu.paginator().total_pages(), 3);
        assert_eq!(menu.focus(), Focus::Grid(0));
        assert_eq!(menu.navigator().label_of(ListenerKey::PageUp), Some("2"));

        assert_eq!(menu.show_page(4, Reselect::First), 3);
        assert_eq!(menu.grid().len(), 3);
        assert_eq!(menu.navigator().label_of(ListenerKey::PageDown), Some("2"));
        assert_eq!(menu.navigator().label_of(ListenerKey::PageUp), Some("0"));
        assert!(!menu.turn_page(1));
        assert_single_highlight(&menu);
    }

    #[test]
    fn test_empty_page_forces_player_button() {
        let (mut menu, _) = menu(3, 3);
        menu.set_items(Vec::new(), Reselect::First);

        assert_eq!(menu.focus(), Focus::Navigator(ListenerKey::Player));
        assert_eq!(menu.navigator().label_of(ListenerKey::PageDown), Some("0"));
        assert_eq!(menu.navigator().label_of(ListenerKey::PageUp), Some("0"));
    }

    #[test]
    fn test_identity_survives_rebuild() {
        let (mut menu, _) = menu(2, 2);
        menu.set_items(items(4), Reselect::Identity("t2".into()));
        assert_eq!(menu.focus(), Focus::Grid(2));

        // t2 gone: nothing natural to highlight
        let mut fewer = items(4);
        fewer.remove(2);
        menu.set_items(fewer, Reselect::Identity("t2".into()));
        assert_eq!(menu.focus(), Focus::Navigator(ListenerKey::Player));
        assert_single_highlight(&menu);
    }

    #[test]
    fn test_navigator_walk_and_return() {
        let (mut menu, signal) = menu(1, 3);
        menu.set_items(items(3), Reselect::First);
        signal.take();

        assert!(menu.focus_next());
        assert_eq!(menu.focus(), Focus::Navigator(ListenerKey::Player));
        assert!(menu.navigate(Direction::Right));
        assert_eq!(menu.focus(), Focus::Navigator(ListenerKey::PageUp));
        assert!(signal.take());

        assert!(menu.navigate(Direction::Down));
        assert_eq!(menu.focus(), Focus::Grid(0));
        assert_single_highlight(&menu);
    }

    #[test]
    fn test_rejected_move_does_not_request_redraw() {
        let signal = RedrawSignal::new();
        let mut menu = PagedMenu::new(1, 2, GridLayout::Horizontal, Navigator::paginated(), signal.clone());
        menu.set_items(
            vec![GridItem::new("a", StateObject::new()), GridItem::new("-", StateObject::new()).disabled()],
            Reselect::First,
        );
        signal.take();

        assert!(!menu.navigate(Direction::Right));
        assert!(!signal.take());
    }

    #[test]
    fn test_resume_with_both_strategies() {
        let (mut menu, _) = menu(2, 5);
        menu.set_items(items(23), Reselect::First);

        assert!(menu.resume(10, ResumeStrategy::Ceil));
        assert_eq!(menu.paginator().current_page(), 2);
        assert_eq!(menu.focus(), Focus::Grid(0));

        assert!(!menu.resume(10, ResumeStrategy::FirstPageShortcut));
        assert_eq!(menu.paginator().current_page(), 1);
        assert_eq!(menu.focus(), Focus::Navigator(ListenerKey::Player));
    }

    #[test]
    fn test_touch_moves_focus_into_grid() {
        let (mut menu, _) = menu(1, 3);
        menu.set_items(Vec::new(), Reselect::First);
        menu.set_items(items(3), Reselect::Index(7));
        assert_eq!(menu.focus(), Focus::Navigator(ListenerKey::Player));

        assert!(menu.touch(1));
        assert_eq!(menu.focus(), Focus::Grid(1));
        assert_single_highlight(&menu);
    }
}
