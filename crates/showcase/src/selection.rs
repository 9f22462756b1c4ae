//! Slide selection: the currently selected slide index and the last one the
//! camera was moved for.

use crate::error::NavError;

/// A processed change of the selected slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideChange {
    pub from: usize,
    pub to: usize,
}

#[derive(Debug, Clone)]
pub struct SlideSelection {
    current: usize,
    last_processed: usize,
    count: usize,
}

impl SlideSelection {
    pub fn new(count: usize) -> Self {
        Self {
            current: 0,
            last_processed: 0,
            count,
        }
    }

    #[inline]
    pub fn current(&self) -> usize {
        self.current
    }

    #[inline]
    pub fn last_processed(&self) -> usize {
        self.last_processed
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Sets the selected slide. Re-selecting the same index is allowed and
    /// produces no change.
    pub fn select(&mut self, index: usize) -> Result<(), NavError> {
        if index >= self.count {
            return Err(NavError::SlideOutOfRange {
                index,
                count: self.count,
            });
        }
        self.current = index;
        Ok(())
    }

    /// Consumes the pending change, if the selection differs from the last
    /// processed index.
    pub fn take_change(&mut self) -> Option<SlideChange> {
        if self.current == self.last_processed {
            return None;
        }
        let change = SlideChange {
            from: self.last_processed,
            to: self.current,
        };
        self.last_processed = self.current;
        Some(change)
    }

    pub fn next_index(&self) -> usize {
        (self.current + 1).min(self.count.saturating_sub(1))
    }

    pub fn previous_index(&self) -> usize {
        self.current.saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redundant_selection_is_not_a_change() {
        let mut sel = SlideSelection::new(3);
        sel.select(0).unwrap();
        assert_eq!(sel.take_change(), None);

        sel.select(2).unwrap();
        assert_eq!(sel.take_change(), Some(SlideChange { from: 0, to: 2 }));
        assert_eq!(sel.take_change(), None);
    }

    #[test]
    fn out_of_range_is_rejected() {
        let mut sel = SlideSelection::new(3);
        assert_eq!(
            sel.select(3),
            Err(NavError::SlideOutOfRange { index: 3, count: 3 })
        );
        assert_eq!(sel.current(), 0);
    }

    #[test]
    fn neighbours_clamp_at_the_ends() {
        let mut sel = SlideSelection::new(3);
        assert_eq!(sel.previous_index(), 0);
        sel.select(2).unwrap();
        assert_eq!(sel.next_index(), 2);
        assert_eq!(sel.previous_index(), 1);
    }
}
