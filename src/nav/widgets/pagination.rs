//! Page bookkeeping for menus whose content does not fit one grid

use std::ops::Range;

/// How a reopened browser finds the page holding a remembered item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResumeStrategy {
    /// Indices below one page go to page 1, everything else to
    /// `ceil(index / page_size)`. An index that is an exact multiple of the
    /// page size lands one page early and is not on the resumed page.
    FirstPageShortcut,
    /// `ceil((index + 1) / page_size)`: always the page holding the item
    #[default]
    Ceil,
}

impl ResumeStrategy {
    /// 1-based page for a 0-based item index
    pub fn page_for(self, index: usize, page_size: usize) -> usize {
        let page_size = page_size.max(1);
        match self {
            ResumeStrategy::FirstPageShortcut => {
                if index < page_size {
                    1
                } else {
                    index.div_ceil(page_size)
                }
            }
            ResumeStrategy::Ceil => (index + 1).div_ceil(page_size),
        }
    }
}

/// Tracks the current page of a list of `total_items` split into pages of
/// `page_size`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
    total_items: usize,
    current_page: usize,
}

impl Paginator {
    pub fn new(page_size: usize, total_items: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            total_items,
            current_page: if total_items > 0 { 1 } else { 0 },
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    /// 1-based, 0 when there is nothing to show
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.page_size)
    }

    /// Change the item count, keeping the current page when it still exists
    pub fn set_total_items(&mut self, total_items: usize) {
        self.total_items = total_items;
        let total_pages = self.total_pages();
        self.current_page = match (total_pages, self.current_page) {
            (0, _) => 0,
            (_, 0) => 1,
            (pages, page) => page.min(pages),
        };
    }

    /// Jump to `page`, clamped into the valid range. Returns the page now shown.
    pub fn turn_to(&mut self, page: usize) -> usize {
        let total_pages = self.total_pages();
        self.current_page = if total_pages == 0 { 0 } else { page.clamp(1, total_pages) };
        self.current_page
    }

    /// Move by `delta` pages. Returns false when the page did not change.
    pub fn turn(&mut self, delta: i32) -> bool {
        if self.total_pages() == 0 {
            return false;
        }
        let before = self.current_page;
        let target = if delta < 0 {
            before.saturating_sub(delta.unsigned_abs() as usize)
        } else {
            before.saturating_add(delta as usize)
        };
        self.turn_to(target) != before
    }

    /// Item range of the current page within the full list
    pub fn page_range(&self) -> Range<usize> {
        if self.current_page == 0 {
            return 0..0;
        }
        let start = (self.current_page - 1) * self.page_size;
        let end = (start + self.page_size).min(self.total_items);
        start..end
    }

    /// Offset of the first item of the current page
    pub fn page_start(&self) -> usize {
        self.page_range().start
    }

    pub fn pages_left(&self) -> usize {
        self.current_page.saturating_sub(1)
    }

    pub fn pages_right(&self) -> usize {
        self.total_pages().saturating_sub(self.current_page)
    }

    /// Decimal labels for the navigator's page-left and page-right buttons
    pub fn counters(&self) -> (String, String) {
        (self.pages_left().to_string(), self.pages_right().to_string())
    }

    /// Turn to the page holding `index` according to `strategy`. Returns the
    /// page-relative position of the item when it is on that page.
    pub fn resume(&mut self, index: usize, strategy: ResumeStrategy) -> Option<usize> {
        let page = strategy.page_for(index, self.page_size);
        self.turn_to(page);
        let range = self.page_range();
        if range.contains(&index) {
            Some(index - range.start)
        } else {
            None
        }
    }
}
