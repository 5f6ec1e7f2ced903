/// Lightbox navigation state
///
/// The lightbox is a two-state machine (Closed / Open) around a single
/// current card index. Stepping works on the *visible sequence*: the
/// indexes of the cards the active filter leaves on screen, in their
/// original order. All functions here are pure; `Gallery` applies the
/// results and talks to the renderer.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Closed,
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Lightbox {
    phase: Phase,
    /// Kept after closing so the gallery step buttons continue from here
    current: usize,
}

impl Lightbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.phase == Phase::Open
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// Enter (or stay in) the Open state on `index`.
    /// The caller has already checked that `index` names a card.
    pub(crate) fn show(&mut self, index: usize) {
        self.current = index;
        self.phase = Phase::Open;
    }

    pub(crate) fn hide(&mut self) {
        self.phase = Phase::Closed;
    }
}

/// Position of `current` in `visible`, `-1` when it is not there
fn position(visible: &[usize], current: usize) -> isize {
    visible
        .iter()
        .position(|&index| index == current)
        .map_or(-1, |pos| pos as isize)
}

/// Card after `current` in the lightbox, wrapping last -> first.
///
/// When `current` is not in the sequence (the filter changed while the
/// lightbox was open) the missing position counts as -1, which lands on
/// the first visible card.
pub fn step_next(visible: &[usize], current: usize) -> Option<usize> {
    if visible.is_empty() {
        return None;
    }
    let len = visible.len() as isize;
    let next = (position(visible, current) + 1).rem_euclid(len);
    Some(visible[next as usize])
}

/// Card before `current` in the lightbox, wrapping first -> last.
///
/// A missing `current` counts as position -1 here too, so the result is
/// the second-to-last visible card (or the only one).
pub fn step_previous(visible: &[usize], current: usize) -> Option<usize> {
    if visible.is_empty() {
        return None;
    }
    let len = visible.len() as isize;
    let previous = (position(visible, current) - 1 + len).rem_euclid(len);
    Some(visible[previous as usize])
}

/// Target of the gallery-level "next" button.
/// A missing `current` restarts from the first visible card.
pub fn gallery_step_next(visible: &[usize], current: usize) -> Option<usize> {
    let last = visible.len().checked_sub(1)?;
    match visible.iter().position(|&index| index == current) {
        Some(pos) if pos < last => Some(visible[pos + 1]),
        _ => Some(visible[0]),
    }
}

/// Target of the gallery-level "previous" button.
/// A missing `current` restarts from the last visible card.
pub fn gallery_step_previous(visible: &[usize], current: usize) -> Option<usize> {
    let last = visible.len().checked_sub(1)?;
    match visible.iter().position(|&index| index == current) {
        Some(pos) if pos > 0 => Some(visible[pos - 1]),
        _ => Some(visible[last]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_closed() {
        let lightbox = Lightbox::new();
        assert_eq!(lightbox.phase(), Phase::Closed);
        assert_eq!(lightbox.current(), 0);
    }

    #[test]
    fn test_close_keeps_current() {
        let mut lightbox = Lightbox::new();
        lightbox.show(3);
        lightbox.hide();
        assert!(!lightbox.is_open());
        assert_eq!(lightbox.current(), 3);
    }

    #[test]
    fn test_step_wraps_both_ends() {
        let visible = [0, 2, 5];
        assert_eq!(step_next(&visible, 5), Some(0));
        assert_eq!(step_previous(&visible, 0), Some(5));
        assert_eq!(step_next(&visible, 0), Some(2));
        assert_eq!(step_previous(&visible, 5), Some(2));
    }

    #[test]
    fn test_step_on_empty_sequence_is_none() {
        assert_eq!(step_next(&[], 0), None);
        assert_eq!(step_previous(&[], 0), None);
        assert_eq!(gallery_step_next(&[], 0), None);
        assert_eq!(gallery_step_previous(&[], 0), None);
    }

    #[test]
    fn test_next_from_missing_current_jumps_to_first() {
        // Card 1 was filtered away while open
        assert_eq!(step_next(&[0, 2, 4], 1), Some(0));
        assert_eq!(step_next(&[7], 1), Some(7));
    }

    #[test]
    fn test_previous_from_missing_current_lands_second_to_last() {
        assert_eq!(step_previous(&[0, 2, 4], 1), Some(2));
        assert_eq!(step_previous(&[0, 2], 1), Some(0));
        assert_eq!(step_previous(&[7], 1), Some(7));
    }

    #[test]
    fn test_cyclic_closure() {
        let visible = [1, 3, 4, 8];
        for &start in &visible {
            let mut current = start;
            for _ in 0..visible.len() {
                current = step_next(&visible, current).unwrap();
            }
            assert_eq!(current, start);
        }
    }

    #[test]
    fn test_next_then_previous_is_identity() {
        let visible = [1, 3, 4, 8];
        for &start in &visible {
            let forward = step_next(&visible, start).unwrap();
            assert_eq!(step_previous(&visible, forward), Some(start));
            let backward = step_previous(&visible, start).unwrap();
            assert_eq!(step_next(&visible, backward), Some(start));
        }
    }

    #[test]
    fn test_gallery_steps() {
        let visible = [0, 2, 5];
        assert_eq!(gallery_step_next(&visible, 0), Some(2));
        assert_eq!(gallery_step_next(&visible, 5), Some(0));
        assert_eq!(gallery_step_next(&visible, 1), Some(0));
        assert_eq!(gallery_step_previous(&visible, 2), Some(0));
        assert_eq!(gallery_step_previous(&visible, 0), Some(5));
        assert_eq!(gallery_step_previous(&visible, 1), Some(5));
    }
}
