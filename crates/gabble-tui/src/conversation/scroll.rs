//! Scroll position for the transcript.

use std::cell::Cell;

/// Lines moved by one page step.
pub const PAGE_LINES: usize = 10;

/// Transcript scroll state, measured in lines back from the newest line.
///
/// An offset of zero means the view follows the newest message. The widget
/// records the largest reachable offset on every render so scrolling up
/// stops at the first message.
#[derive(Debug, Default)]
pub struct TranscriptScroll {
    offset: usize,
    limit: Cell<usize>,
}

impl TranscriptScroll {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines scrolled back from the bottom.
    pub fn offset(&self) -> usize {
        self.offset.min(self.limit.get())
    }

    /// Whether the view is pinned to the newest line.
    pub fn is_following(&self) -> bool {
        self.offset() == 0
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.offset = self.offset().saturating_add(lines).min(self.limit.get());
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.offset = self.offset().saturating_sub(lines);
    }

    pub fn to_top(&mut self) {
        self.offset = self.limit.get();
    }

    /// Jump back to the newest line and follow appends again.
    pub fn to_latest(&mut self) {
        self.offset = 0;
    }

    /// Record the largest offset the last render could show.
    pub fn set_limit(&self, limit: usize) {
        self.limit.set(limit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_following() {
        let scroll = TranscriptScroll::new();
        assert!(scroll.is_following());
        assert_eq!(scroll.offset(), 0);
    }

    #[test]
    fn test_scroll_up_is_clamped_to_limit() {
        let mut scroll = TranscriptScroll::new();
        scroll.set_limit(5);
        scroll.scroll_up(3);
        assert_eq!(scroll.offset(), 3);
        scroll.scroll_up(PAGE_LINES);
        assert_eq!(scroll.offset(), 5);
        assert!(!scroll.is_following());
    }

    #[test]
    fn test_scroll_down_and_latest() {
        let mut scroll = TranscriptScroll::new();
        scroll.set_limit(20);
        scroll.to_top();
        assert_eq!(scroll.offset(), 20);
        scroll.scroll_down(15);
        assert_eq!(scroll.offset(), 5);
        scroll.to_latest();
        assert!(scroll.is_following());
    }

    #[test]
    fn test_shrinking_limit_clamps_offset() {
        let mut scroll = TranscriptScroll::new();
        scroll.set_limit(20);
        scroll.scroll_up(12);
        scroll.set_limit(4);
        assert_eq!(scroll.offset(), 4);
    }

    #[test]
    fn test_no_scroll_when_transcript_fits() {
        let mut scroll = TranscriptScroll::new();
        scroll.scroll_up(PAGE_LINES);
        assert!(scroll.is_following());
    }
}
