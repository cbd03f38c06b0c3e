use std::fmt;

use crate::nav::listeners::Listener;
use crate::nav::state::StateObject;

/// Interpretation of the grid's linear index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridLayout {
    /// Row-major: index 1 is to the right of index 0
    #[default]
    Horizontal,
    /// Column-major: index 1 is below index 0
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Result of a directional step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved { from: Option<usize>, to: usize },
    /// Destination disabled, empty or identical; nothing changed
    Rejected,
}

/// Notification sent to grid observers after each state change
#[derive(Debug, Clone, PartialEq)]
pub enum GridEvent {
    SelectionChanged { from: Option<usize>, to: Option<usize> },
    Selected { index: usize, state: StateObject },
    Rebuilt { item_count: usize },
}

/// One selectable cell
#[derive(Clone)]
pub struct GridItem {
    /// Identity used to keep a logical item highlighted across rebuilds
    pub id: String,
    pub label: String,
    pub state: StateObject,
    pub enabled: bool,
    /// Release listener; falls back to the grid's default listener
    pub listener: Option<Listener>,
}

impl fmt::Debug for GridItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridItem")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("state", &self.state)
            .field("enabled", &self.enabled)
            .field("listener", &self.listener.is_some())
            .finish()
    }
}

impl GridItem {
    pub fn new(label: impl Into<String>, state: StateObject) -> Self {
        let label = label.into();
        Self {
            id: label.clone(),
            label,
            state,
            enabled: true,
            listener: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Placeholder cell that can never be selected
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn with_listener(mut self, listener: Listener) -> Self {
        self.listener = Some(listener);
        self
    }
}

/// Index reached by one directional step from `index` in a rows x cols grid.
///
/// Every edge wraps around within the same row (horizontal moves) or the same
/// column (vertical moves). The result may point past the end of a partially
/// filled page; callers treat that as an empty cell.
pub fn step(rows: usize, cols: usize, layout: GridLayout, index: usize, direction: Direction) -> usize {
    let rows = rows.max(1);
    let cols = cols.max(1);

    match layout {
        GridLayout::Horizontal => {
            let row = index / cols;
            let col = index % cols;
            match direction {
                Direction::Left if col == 0 => index + (cols - 1),
                Direction::Left => index - 1,
                Direction::Right if col == cols - 1 => index - (cols - 1),
                Direction::Right => index + 1,
                Direction::Up if row == 0 => index + (rows - 1) * cols,
                Direction::Up => index - cols,
                Direction::Down if row == rows - 1 => index % cols,
                Direction::Down => index + cols,
            }
        }
        GridLayout::Vertical => {
            let col = index / rows;
            let row = index % rows;
            match direction {
                Direction::Up if row == 0 => index + (rows - 1),
                Direction::Up => index - 1,
                Direction::Down if row == rows - 1 => index - (rows - 1),
                Direction::Down => index + 1,
                Direction::Left if col == 0 => index + (cols - 1) * rows,
                Direction::Left => index - rows,
                Direction::Right if col == cols - 1 => index % rows,
                Direction::Right => index + rows,
            }
        }
    }
}

type Observer = Box<dyn FnMut(&GridEvent)>;

/// One page of selectable items laid out in a fixed rows x cols matrix
pub struct MenuGrid {
    rows: usize,
    cols: usize,
    layout: GridLayout,
    items: Vec<GridItem>,
    selected: Option<usize>,
    default_listener: Option<Listener>,
    observers: Vec<Observer>,
}

impl fmt::Debug for MenuGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuGrid")
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .field("layout", &self.layout)
            .field("items", &self.items.len())
            .field("selected", &self.selected)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl MenuGrid {
    pub fn new(rows: usize, cols: usize, layout: GridLayout) -> Self {
        Self {
            rows: rows.max(1),
            cols: cols.max(1),
            layout,
            items: Vec::new(),
            selected: None,
            default_listener: None,
            observers: Vec::new(),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn layout(&self) -> GridLayout {
        self.layout
    }

    /// Number of cells on one page
    pub fn capacity(&self) -> usize {
        self.rows * self.cols
    }

    pub fn items(&self) -> &[GridItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_item(&self) -> Option<&GridItem> {
        self.selected.and_then(|i| self.items.get(i))
    }

    pub fn set_default_listener(&mut self, listener: Listener) {
        self.default_listener = Some(listener);
    }

    /// Register a redraw observer
    pub fn subscribe(&mut self, observer: impl FnMut(&GridEvent) + 'static) {
        self.observers.push(Box::new(observer));
    }

    fn notify(&mut self, event: GridEvent) {
        for observer in self.observers.iter_mut() {
            observer(&event);
        }
    }

    fn is_selectable(&self, index: usize) -> bool {
        self.items.get(index).map(|item| item.enabled).unwrap_or(false)
    }

    pub fn first_enabled(&self) -> Option<usize> {
        self.items.iter().position(|item| item.enabled)
    }

    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id == id && item.enabled)
    }

    /// Replace the page content. Selection is cleared; the caller decides
    /// what to highlight next.
    pub fn set_items(&mut self, mut items: Vec<GridItem>) {
        let capacity = self.capacity();
        if items.len() > capacity {
            log::warn!("Menu page given {} items for {} cells, truncating", items.len(), capacity);
            items.truncate(capacity);
        }
        self.items = items;
        self.selected = None;
        let item_count = self.items.len();
        self.notify(GridEvent::Rebuilt { item_count });
    }

    /// Highlight `index` (or nothing). Returns false when the index is not a
    /// selectable item on this page.
    pub fn set_selected(&mut self, index: Option<usize>) -> bool {
        if let Some(i) = index {
            if !self.is_selectable(i) {
                return false;
            }
        }
        if self.selected != index {
            let from = self.selected;
            self.selected = index;
            self.notify(GridEvent::SelectionChanged { from, to: index });
        }
        true
    }

    /// Move the highlight one step in `direction`
    pub fn move_selection(&mut self, direction: Direction) -> MoveOutcome {
        let current = match self.selected {
            Some(i) => i,
            None => {
                return match self.first_enabled() {
                    Some(first) => {
                        self.selected = Some(first);
                        self.notify(GridEvent::SelectionChanged { from: None, to: Some(first) });
                        MoveOutcome::Moved { from: None, to: first }
                    }
                    None => MoveOutcome::Rejected,
                };
            }
        };

        let target = step(self.rows, self.cols, self.layout, current, direction);
        if target == current || !self.is_selectable(target) {
            log::debug!("Rejected {:?} move from {} to {}", direction, current, target);
            return MoveOutcome::Rejected;
        }

        self.selected = Some(target);
        self.notify(GridEvent::SelectionChanged { from: Some(current), to: Some(target) });
        MoveOutcome::Moved { from: Some(current), to: target }
    }

    /// Release the highlighted item: call its listener with a copy of its
    /// state. Returns false when nothing is highlighted.
    pub fn select(&mut self) -> bool {
        let Some(index) = self.selected else {
            return false;
        };
        let Some(item) = self.items.get(index) else {
            return false;
        };

        let state = item.state.clone();
        let listener = item.listener.clone().or_else(|| self.default_listener.clone());
        match listener {
            Some(listener) => listener(Some(state.clone())),
            None => log::debug!("Item {} ({}) has no release listener", index, item.label),
        }
        self.notify(GridEvent::Selected { index, state });
        true
    }

    /// Touch selection: highlight and release in one go
    pub fn select_index(&mut self, index: usize) -> bool {
        if !self.is_selectable(index) {
            return false;
        }
        if self.selected != Some(index) {
            // Observers see a single Selected event for a touch
            self.selected = Some(index);
        }
        self.select()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::{Arc, Mutex};

    fn grid_with(rows: usize, cols: usize, layout: GridLayout, count: usize) -> MenuGrid {
        let mut grid = MenuGrid::new(rows, cols, layout);
        let items = (0..count)
            .map(|i| GridItem::new(format!("item {}", i), StateObject::new().with("index", i)))
            .collect();
        grid.set_items(items);
        grid
    }

    fn counting(grid: &mut MenuGrid) -> Rc<RefCell<Vec<GridEvent>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        grid.subscribe(move |event| sink.borrow_mut().push(event.clone()));
        events
    }

    #[test]
    fn test_horizontal_wraps_within_row_and_column() {
        // 3x3: left of 0 is 2, right of 2 is 0, up of 1 is 7, down of 7 is 1
        assert_eq!(step(3, 3, GridLayout::Horizontal, 0, Direction::Left), 2);
        assert_eq!(step(3, 3, GridLayout::Horizontal, 2, Direction::Right), 0);
        assert_eq!(step(3, 3, GridLayout::Horizontal, 1, Direction::Up), 7);
        assert_eq!(step(3, 3, GridLayout::Horizontal, 7, Direction::Down), 1);
        assert_eq!(step(3, 3, GridLayout::Horizontal, 4, Direction::Down), 7);
    }

    #[test]
    fn test_vertical_swaps_roles() {
        // 2 rows x 3 cols column-major: indices 0,1 in column 0
        assert_eq!(step(2, 3, GridLayout::Vertical, 0, Direction::Down), 1);
        assert_eq!(step(2, 3, GridLayout::Vertical, 1, Direction::Down), 0);
        assert_eq!(step(2, 3, GridLayout::Vertical, 0, Direction::Up), 1);
        assert_eq!(step(2, 3, GridLayout::Vertical, 0, Direction::Right), 2);
        assert_eq!(step(2, 3, GridLayout::Vertical, 4, Direction::Right), 0);
        assert_eq!(step(2, 3, GridLayout::Vertical, 1, Direction::Left), 5);
    }

    #[test]
    fn test_opposite_moves_return_home() {
        for layout in [GridLayout::Horizontal, GridLayout::Vertical] {
            for (rows, cols) in [(1, 1), (1, 4), (3, 3), (2, 5), (4, 2)] {
                for i in 0..rows * cols {
                    let back = step(rows, cols, layout, step(rows, cols, layout, i, Direction::Left), Direction::Right);
                    assert_eq!(back, i, "{:?} {}x{} left/right from {}", layout, rows, cols, i);
                    let back = step(rows, cols, layout, step(rows, cols, layout, i, Direction::Up), Direction::Down);
                    assert_eq!(back, i, "{:?} {}x{} up/down from {}", layout, rows, cols, i);
                }
            }
        }
    }

    #[test]
    fn test_scenario_three_by_three() {
        let mut grid = grid_with(3, 3, GridLayout::Horizontal, 9);
        grid.set_selected(Some(0));

        assert_eq!(grid.move_selection(Direction::Right), MoveOutcome::Moved { from: Some(0), to: 1 });
        for _ in 0..8 {
            grid.move_selection(Direction::Right);
        }
        // Right wraps inside row 0: 1 -> 2 -> 0 -> 1 ...
        assert_eq!(grid.selected(), Some(0));

        grid.move_selection(Direction::Up);
        assert_eq!(grid.selected(), Some(6));
    }

    #[test]
    fn test_disabled_destination_is_rejected_silently() {
        let mut grid = MenuGrid::new(1, 3, GridLayout::Horizontal);
        grid.set_items(vec![
            GridItem::new("a", StateObject::new()),
            GridItem::new("placeholder", StateObject::new()).disabled(),
            GridItem::new("c", StateObject::new()),
        ]);
        grid.set_selected(Some(0));
        let events = counting(&mut grid);

        assert_eq!(grid.move_selection(Direction::Right), MoveOutcome::Rejected);
        assert_eq!(grid.selected(), Some(0));
        assert!(events.borrow().is_empty());

        // The other way wraps to the last column
        assert_eq!(grid.move_selection(Direction::Left), MoveOutcome::Moved { from: Some(0), to: 2 });
        assert_eq!(events.borrow().len(), 1);
    }

    #[test]
    fn test_empty_cell_on_partial_page_is_rejected() {
        let mut grid = grid_with(2, 3, GridLayout::Horizontal, 4);
        grid.set_selected(Some(2));
        assert_eq!(grid.move_selection(Direction::Down), MoveOutcome::Rejected);
        assert_eq!(grid.selected(), Some(2));
    }

    #[test]
    fn test_select_invokes_listener_once_and_notifies() {
        let received = Arc::new(Mutex::new(Vec::new()));
        let sink = received.clone();
        let mut grid = grid_with(2, 2, GridLayout::Horizontal, 4);
        grid.set_default_listener(Arc::new(move |state: Option<StateObject>| sink.lock().unwrap().push(state)));
        let events = counting(&mut grid);

        assert!(!grid.select());
        grid.set_selected(Some(3));
        assert!(grid.select());

        let received = received.lock().unwrap();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].as_ref().and_then(|s| s.get_index()), Some(3));
        // one for the highlight, one for the release
        assert_eq!(events.borrow().len(), 2);
    }

    #[test]
    fn test_item_listener_overrides_default() {
        let hits = Arc::new(Mutex::new(0));
        let default_hits = Arc::new(Mutex::new(0));
        let item_hits = hits.clone();
        let fallback_hits = default_hits.clone();
        let mut grid = MenuGrid::new(1, 2, GridLayout::Horizontal);
        grid.set_default_listener(Arc::new(move |_: Option<StateObject>| *fallback_hits.lock().unwrap() += 1));
        grid.set_items(vec![
            GridItem::new("a", StateObject::new())
                .with_listener(Arc::new(move |_: Option<StateObject>| *item_hits.lock().unwrap() += 1)),
        ]);
        assert!(grid.select_index(0));
        assert_eq!(*hits.lock().unwrap(), 1);
        assert_eq!(*default_hits.lock().unwrap(), 0);
    }

    #[test]
    fn test_first_move_without_selection_picks_first_enabled() {
        let mut grid = MenuGrid::new(1, 3, GridLayout::Horizontal);
        grid.set_items(vec![
            GridItem::new("x", StateObject::new()).disabled(),
            GridItem::new("y", StateObject::new()),
        ]);
        assert_eq!(grid.move_selection(Direction::Down), MoveOutcome::Moved { from: None, to: 1 });
    }

    #[test]
    fn test_rebuild_truncates_and_clears_selection() {
        let mut grid = grid_with(1, 2, GridLayout::Horizontal, 2);
        grid.set_selected(Some(1));
        grid.set_items((0..5).map(|i| GridItem::new(i.to_string(), StateObject::new())).collect());
        assert_eq!(grid.len(), 2);
        assert_eq!(grid.selected(), None);
    }
}
