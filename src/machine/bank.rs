use crate::Cents;

/// A per-denomination coin bank: a capacity-bounded counter.
///
/// The count stays within `0..=capacity`. Both mutating operations have
/// preconditions the caller checks first; they are not internally guarded.
#[derive(Debug, Clone)]
pub struct CoinBank {
    value: Cents,
    count: u32,
    capacity: u32,
}

impl CoinBank {
    pub fn new(value: Cents, count: u32, capacity: u32) -> Self {
        debug_assert!(count <= capacity);
        Self {
            value,
            count,
            capacity,
        }
    }

    /// Denomination this bank holds.
    pub fn value(&self) -> Cents {
        self.value
    }

    /// Coins currently in the bank.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Whether one more coin fits.
    pub fn can_accept(&self) -> bool {
        self.count < self.capacity
    }

    /// Add one coin. Precondition: `can_accept()`.
    pub fn insert(&mut self) {
        debug_assert!(self.can_accept());
        self.count += 1;
    }

    /// Take one coin out for change. Precondition: `count() > 0`; the
    /// change solver never selects an empty bank.
    pub fn remove(&mut self) {
        debug_assert!(self.count > 0);
        self.count -= 1;
    }
}
