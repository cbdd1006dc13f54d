//! Background blink shown after a phase completes

/// Number of background toggles in one blink sequence
pub const BLINK_TOGGLES: u8 = 10;
/// Delay between toggles
pub const BLINK_INTERVAL_MS: u64 = 500;

/// Highlight color painted while the blink is "on"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlinkColor {
    Alert,
}

/// Display-only blink progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlinkState {
    pub active: bool,
    pub ticks_elapsed: u8,
}

impl BlinkState {
    /// A fresh sequence, not yet toggled
    pub fn started() -> Self {
        Self {
            active: true,
            ticks_elapsed: 0,
        }
    }

    /// Advance one toggle. Returns false once the sequence is finished.
    pub fn advance(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.ticks_elapsed += 1;
        if self.ticks_elapsed >= BLINK_TOGGLES {
            *self = Self::default();
            return false;
        }
        true
    }

    /// Color to paint right now. Odd toggles highlight, even toggles restore.
    pub fn color(&self) -> Option<BlinkColor> {
        if self.active && self.ticks_elapsed % 2 == 1 {
            Some(BlinkColor::Alert)
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blink_runs_ten_toggles() {
        let mut blink = BlinkState::started();
        let mut highlighted = 0;
        let mut steps = 0;
        while blink.advance() {
            steps += 1;
            if blink.color().is_some() {
                highlighted += 1;
            }
        }
        // tenth toggle restores the original background and ends the sequence
        assert_eq!(steps, 9);
        assert_eq!(highlighted, 5);
        assert!(!blink.active);
        assert_eq!(blink.color(), None);
    }

    #[test]
    fn test_cleared_blink_does_not_advance() {
        let mut blink = BlinkState::started();
        blink.advance();
        blink.clear();
        assert!(!blink.advance());
        assert_eq!(blink, BlinkState::default());
    }
}
