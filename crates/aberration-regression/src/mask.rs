//! Row inclusion masks

/// Immutable set of rows that take part in a fit
///
/// Masks are built fresh for every fit instead of overwriting excluded
/// observations with sentinel values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowMask {
    included: Vec<bool>,
}

impl RowMask {
    /// Every row included
    pub fn all(len: usize) -> Self {
        Self {
            included: vec![true; len],
        }
    }

    pub fn from_vec(included: Vec<bool>) -> Self {
        Self { included }
    }

    /// Include row `i` when `keep(i)` is true
    pub fn from_fn<F>(len: usize, keep: F) -> Self
    where
        F: FnMut(usize) -> bool,
    {
        Self {
            included: (0..len).map(keep).collect(),
        }
    }

    /// Total number of rows covered by the mask
    pub fn len(&self) -> usize {
        self.included.len()
    }

    pub fn is_empty(&self) -> bool {
        self.included.is_empty()
    }

    /// Number of included rows
    pub fn count(&self) -> usize {
        self.included.iter().filter(|&&keep| keep).count()
    }

    pub fn is_included(&self, row: usize) -> bool {
        self.included.get(row).copied().unwrap_or(false)
    }

    /// Indices of included rows, ascending
    pub fn included(&self) -> impl Iterator<Item = usize> + '_ {
        self.included
            .iter()
            .enumerate()
            .filter_map(|(i, &keep)| keep.then_some(i))
    }
}
