use super::App;

/// Columns moved per horizontal scroll step
const HORIZONTAL_STEP: usize = 4;

/// Largest scroll offset that still fills the viewport
pub(crate) fn max_scroll(total_rows: usize, viewport_height: usize) -> usize {
    total_rows.saturating_sub(viewport_height)
}

impl App {
    // Table view

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.catalog.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.catalog.len().saturating_sub(1);
    }

    // Diff view

    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.scroll_offset += 1;
        self.clamp_scroll();
    }

    pub fn scroll_half_page_up(&mut self) {
        let half = (self.diff_viewport_height / 2).max(1);
        self.scroll_offset = self.scroll_offset.saturating_sub(half);
    }

    pub fn scroll_half_page_down(&mut self) {
        let half = (self.diff_viewport_height / 2).max(1);
        self.scroll_offset += half;
        self.clamp_scroll();
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_offset = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = max_scroll(self.alignment.len(), self.diff_viewport_height);
    }

    pub fn scroll_left(&mut self) {
        self.horizontal_scroll = self.horizontal_scroll.saturating_sub(HORIZONTAL_STEP);
    }

    pub fn scroll_right(&mut self) {
        self.horizontal_scroll += HORIZONTAL_STEP;
    }

    /// Scroll so the next change below the current view is near the top
    pub fn next_change(&mut self) {
        let current = self.scroll_offset;
        let next = self
            .alignment
            .change_starts()
            .into_iter()
            .map(|row| self.scroll_target_for(row))
            .find(|&target| target > current);
        if let Some(target) = next {
            tracing::debug!(from = current, to = target, "jump to next change");
            self.scroll_offset = target;
            self.clamp_scroll();
        }
    }

    /// Scroll to the closest change above the current view
    pub fn prev_change(&mut self) {
        let current = self.scroll_offset;
        let prev = self
            .alignment
            .change_starts()
            .into_iter()
            .map(|row| self.scroll_target_for(row))
            .filter(|&target| target < current)
            .last();
        if let Some(target) = prev {
            tracing::debug!(from = current, to = target, "jump to previous change");
            self.scroll_offset = target;
        }
    }

    /// Clamp scroll offset so we don't scroll past content
    pub fn clamp_scroll(&mut self) {
        // Before the first render the viewport height is unknown
        if self.diff_viewport_height == 0 {
            self.scroll_offset = self.scroll_offset.min(self.alignment.len().saturating_sub(1));
            return;
        }
        self.scroll_offset = self
            .scroll_offset
            .min(max_scroll(self.alignment.len(), self.diff_viewport_height));
    }
}
