//! Core domain types for the vending machine engine.

/// Monetary value in cents.
pub type Cents = u32;

/// An event representing the possible inputs of the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Offer a coin of the given denomination to the machine.
    InsertCoin(Cents),
    /// Ask the machine to vend an item for the loaded amount.
    Dispense,
    /// Abort the open transaction and ask for the loaded amount back.
    Cancel,
}

/// Lifecycle state of the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum State {
    /// No transaction open.
    #[default]
    Idle,
    /// At least one valid coin accepted; transaction open.
    Insertion,
    /// Last coin was rejected; transaction (if any) still open.
    Suspension,
    /// Transient: a refund or dispense is finalizing. Never observed
    /// between calls; every trigger that enters it also leaves it.
    Termination,
}

/// Static configuration of a machine: which coins it takes, what the
/// item costs and how much stock it starts with.
#[derive(Debug, Clone)]
pub struct MachineConfig {
    /// Accepted denominations with their starting coin counts.
    pub denominations: Vec<(Cents, u32)>,
    /// Capacity of every coin bank.
    pub bank_capacity: u32,
    /// Price of the single item sold, in cents.
    pub item_price: Cents,
    /// Item units loaded at construction.
    pub starting_stock: u32,
}

impl Default for MachineConfig {
    /// The reference configuration: 10/20/50c and $1/$2 coins with
    /// starting counts 8/25/5/11/15, a $1.60 item, two units in stock.
    fn default() -> Self {
        Self {
            denominations: vec![(10, 8), (20, 25), (50, 5), (100, 11), (200, 15)],
            bank_capacity: 25,
            item_price: 160,
            starting_stock: 2,
        }
    }
}
