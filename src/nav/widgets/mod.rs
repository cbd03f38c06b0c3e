pub mod menu_grid;
pub mod navigator;
pub mod paged_menu;
pub mod pagination;

pub use menu_grid::{step, Direction, GridEvent, GridItem, GridLayout, MenuGrid, MoveOutcome};
pub use navigator::{NavButton, Navigator};
pub use paged_menu::{Focus, PagedMenu, Reselect};
pub use pagination::{Paginator, ResumeStrategy};

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Shared "please redraw" flag. Widgets raise it on every visible change and
/// the event loop consumes it once per frame.
#[derive(Debug, Clone, Default)]
pub struct RedrawSignal {
    pending: Arc<AtomicU64>,
}

impl RedrawSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&self) {
        self.pending.fetch_add(1, Ordering::SeqCst);
    }

    /// Number of requests not yet taken
    pub fn pending(&self) -> u64 {
        self.pending.load(Ordering::SeqCst)
    }

    /// Consume all pending requests; true if there was at least one
    pub fn take(&self) -> bool {
        self.pending.swap(0, Ordering::SeqCst) > 0
    }
}
