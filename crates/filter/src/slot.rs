/// One position in the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Slot {
    /// Never filled, or cleared by spike suppression.
    #[default]
    Empty,
    Present(i32),
}

impl Slot {
    #[must_use]
    pub fn value(self) -> Option<i32> {
        match self {
            Slot::Present(v) => Some(v),
            Slot::Empty      => None,
        }
    }

    #[must_use]
    pub fn is_present(self) -> bool {
        matches!(self, Slot::Present(_))
    }
}

impl From<Option<i32>> for Slot {
    fn from(value: Option<i32>) -> Self {
        value.map_or(Slot::Empty, Slot::Present)
    }
}
