use crate::{Error, Timestamp};

/// Half-open range `[start, end)`. `end == None` means the interval never ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValidityInterval {
    start: Timestamp,
    end: Option<Timestamp>,
}

impl ValidityInterval {
    pub fn new(start: Timestamp, end: Option<Timestamp>) -> Result<Self, Error> {
        match end {
            Some(end) if start >= end => Err(Error::InvalidInterval { start, end }),
            _ => Ok(Self { start, end }),
        }
    }

    /// `[start, forever)`.
    pub const fn unbounded(start: Timestamp) -> Self {
        Self { start, end: None }
    }

    pub const fn start(&self) -> Timestamp {
        self.start
    }

    pub const fn end(&self) -> Option<Timestamp> {
        self.end
    }

    #[inline]
    pub fn contains(&self, instant: Timestamp) -> bool {
        self.start <= instant && self.end.is_none_or(|end| instant < end)
    }

    /// The first boundary of this interval strictly after `instant`.
    pub fn next_boundary_after(&self, instant: Timestamp) -> Option<Timestamp> {
        if self.start > instant {
            return Some(self.start);
        }
        self.end.filter(|end| *end > instant)
    }
}
