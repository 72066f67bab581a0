use gesture_strike_core::GestureLabel;

/// Fixed-size ring of the most recent raw labels for one role.
#[derive(Clone, Debug)]
pub struct LabelWindow {
    slots: Box<[GestureLabel]>,
    next: usize,
    filled: usize,
}

impl LabelWindow {
    /// Creates an empty window holding `frames` labels, at least one.
    #[must_use]
    pub fn new(frames: usize) -> Self {
        Self {
            slots: vec![GestureLabel::None; frames.max(1)].into_boxed_slice(),
            next: 0,
            filled: 0,
        }
    }

    /// Records the newest label, evicting the oldest once full.
    pub fn push(&mut self, label: GestureLabel) {
        self.slots[self.next] = label;
        self.next = (self.next + 1) % self.slots.len();
        self.filled = (self.filled + 1).min(self.slots.len());
    }

    /// Label every slot agrees on, once the window is full.
    ///
    /// Agreement on [`GestureLabel::None`] confirms nothing.
    #[must_use]
    pub fn confirmed(&self) -> Option<GestureLabel> {
        if self.filled < self.slots.len() {
            return None;
        }
        let first = self.slots[0];
        if first == GestureLabel::None || self.slots.iter().any(|label| *label != first) {
            return None;
        }
        Some(first)
    }

    /// Forgets every recorded label.
    pub fn clear(&mut self) {
        self.slots.fill(GestureLabel::None);
        self.next = 0;
        self.filled = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::LabelWindow;
    use gesture_strike_core::GestureLabel;

    #[test]
    fn confirms_only_when_full_and_unanimous() {
        let mut window = LabelWindow::new(3);
        window.push(GestureLabel::Fist);
        window.push(GestureLabel::Fist);
        assert_eq!(window.confirmed(), None);
        window.push(GestureLabel::Fist);
        assert_eq!(window.confirmed(), Some(GestureLabel::Fist));
        window.push(GestureLabel::OpenPalm);
        assert_eq!(window.confirmed(), None);
    }

    #[test]
    fn unanimous_none_confirms_nothing() {
        let mut window = LabelWindow::new(2);
        window.push(GestureLabel::None);
        window.push(GestureLabel::None);
        assert_eq!(window.confirmed(), None);
    }

    #[test]
    fn clear_restarts_the_count() {
        let mut window = LabelWindow::new(2);
        window.push(GestureLabel::Point);
        window.push(GestureLabel::Point);
        window.clear();
        window.push(GestureLabel::Point);
        assert_eq!(window.confirmed(), None);
    }
}
