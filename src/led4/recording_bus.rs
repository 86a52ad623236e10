use super::SegmentBus;

/// A [`SegmentBus`] that remembers what the hardware would currently be showing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingBus {
    lit: Option<(usize, u8)>,
    colon: bool,
    degree_sign: bool,
    show_count: u32,
    blank_count: u32,
}

impl RecordingBus {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            lit: None,
            colon: false,
            degree_sign: false,
            show_count: 0,
            blank_count: 0,
        }
    }

    /// The selected digit and its pattern, or `None` while every digit is deselected.
    #[must_use]
    pub const fn lit(&self) -> Option<(usize, u8)> {
        self.lit
    }

    /// `(colon, degree_sign)`.
    #[must_use]
    pub const fn indicators(&self) -> (bool, bool) {
        (self.colon, self.degree_sign)
    }

    #[must_use]
    pub const fn show_count(&self) -> u32 {
        self.show_count
    }

    #[must_use]
    pub const fn blank_count(&self) -> u32 {
        self.blank_count
    }
}

impl SegmentBus for RecordingBus {
    fn show(&mut self, index: usize, segments: u8) {
        self.lit = Some((index, segments));
        self.show_count = self.show_count.saturating_add(1);
    }

    fn blank(&mut self) {
        self.lit = None;
        self.blank_count = self.blank_count.saturating_add(1);
    }

    fn set_indicators(&mut self, colon: bool, degree_sign: bool) {
        self.colon = colon;
        self.degree_sign = degree_sign;
    }
}
