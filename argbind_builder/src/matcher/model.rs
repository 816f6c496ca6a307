use std::ops::Range;

/// The tokens assigned to one positional, as offsets into the positional run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Assignment {
    pub(crate) range: Range<usize>,
    // Fewer tokens than the positional's minimum were assigned.
    pub(crate) deficient: bool,
}

impl Assignment {
    pub(crate) fn count(&self) -> usize {
        self.range.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Allocation {
    pub(crate) assignments: Vec<Assignment>,
    pub(crate) unconsumed: Range<usize>,
}

impl Allocation {
    pub(crate) fn counts(&self) -> Vec<usize> {
        self.assignments.iter().map(Assignment::count).collect()
    }
}
