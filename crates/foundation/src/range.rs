/// Whether the `end` of a [`DegreeRange`] is part of the range.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Bound {
    Exclusive,
    Inclusive,
}

/// Integer-stepped range of whole degrees.
///
/// Stepping in integers keeps every produced value exact, so grid vertices
/// compare equal to their literal coordinates.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DegreeRange {
    pub start: i32,
    pub end: i32,
    pub step: i32,
    pub bound: Bound,
}

impl DegreeRange {
    /// `[start, end)` stepping by `step`.
    pub const fn half_open(start: i32, end: i32, step: i32) -> Self {
        Self {
            start,
            end,
            step,
            bound: Bound::Exclusive,
        }
    }

    /// `[start, end]` stepping by `step`.
    pub const fn closed(start: i32, end: i32, step: i32) -> Self {
        Self {
            start,
            end,
            step,
            bound: Bound::Inclusive,
        }
    }

    pub fn contains(&self, value: i32) -> bool {
        match self.bound {
            Bound::Exclusive => value < self.end,
            Bound::Inclusive => value <= self.end,
        }
    }

    /// Values from `start` while still inside the bound. Empty for a
    /// non-positive step.
    pub fn iter(&self) -> DegreeRangeIter {
        DegreeRangeIter {
            range: *self,
            next: if self.step > 0 { Some(self.start) } else { None },
        }
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl IntoIterator for DegreeRange {
    type Item = i32;
    type IntoIter = DegreeRangeIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Debug, Clone)]
pub struct DegreeRangeIter {
    range: DegreeRange,
    next: Option<i32>,
}

impl Iterator for DegreeRangeIter {
    type Item = i32;

    fn next(&mut self) -> Option<i32> {
        let value = self.next?;
        if !self.range.contains(value) {
            self.next = None;
            return None;
        }
        self.next = value.checked_add(self.range.step);
        Some(value)
    }
}
