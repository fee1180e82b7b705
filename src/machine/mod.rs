//! The vending transaction state machine.
//!
//! The machine owns the coin banks and drives a single transaction through
//! Idle, Insertion, Suspension and Termination. Business conditions
//! (unsupported coin, full bank, empty stock, unreachable change) are never
//! errors: each one logs a line and redirects the transition.

use std::collections::BTreeMap;

use tokio_stream::{Stream, StreamExt};
use tracing::{debug, info, warn};

use crate::model::{Cents, Event, MachineConfig, State};

mod bank;
pub use bank::CoinBank;

pub mod change;

/// Read-back of an [`Event::InsertCoin`] trigger.
#[derive(Debug)]
pub struct InsertReceipt {
    pub in_insertion_state: bool,
    pub logs: Vec<String>,
    pub tray: Vec<Cents>,
}

/// Read-back of an [`Event::Dispense`] trigger.
#[derive(Debug)]
pub struct VendReceipt {
    pub change_amount: Cents,
    pub logs: Vec<String>,
    pub tray: Vec<Cents>,
    pub stock_remaining: u32,
    pub idle: bool,
}

/// Read-back of an [`Event::Cancel`] trigger.
#[derive(Debug)]
pub struct CancelReceipt {
    pub change_amount: Cents,
    pub logs: Vec<String>,
    pub tray: Vec<Cents>,
    pub idle: bool,
}

/// A coin-operated vending machine for a single item.
///
/// One instance per physical machine, driven by one caller at a time; the
/// check-then-act sequences here are not internally atomic, so concurrent
/// callers must serialize externally.
pub struct Machine {
    config: MachineConfig,
    state: State,
    /// Denomination -> bank; exclusively owned, never handed out.
    banks: BTreeMap<Cents, CoinBank>,
    loaded_amount: Cents,
    change_amount: Cents,
    /// Coins staged for the customer; replaced per transition, drained on read.
    tray: Vec<Cents>,
    stock: u32,
    /// Transaction log, drained on read.
    logs: Vec<String>,
}

/// Public API
impl Machine {
    pub fn new(config: MachineConfig) -> Self {
        let banks = config
            .denominations
            .iter()
            .map(|&(value, count)| (value, CoinBank::new(value, count, config.bank_capacity)))
            .collect();
        let stock = config.starting_stock;

        Self {
            config,
            state: State::Idle,
            banks,
            loaded_amount: 0,
            change_amount: 0,
            tray: Vec::new(),
            stock,
            logs: vec!["Machine is idle and running.".to_string()],
        }
    }

    /// Offer a coin to the machine.
    pub fn insert_coin(&mut self, value: Cents) -> InsertReceipt {
        self.apply(Event::InsertCoin(value));
        InsertReceipt {
            in_insertion_state: self.state == State::Insertion,
            logs: self.take_logs(),
            tray: self.take_tray(),
        }
    }

    /// Ask the machine to vend.
    pub fn dispense(&mut self) -> VendReceipt {
        self.apply(Event::Dispense);
        VendReceipt {
            change_amount: self.change_amount,
            logs: self.take_logs(),
            tray: self.take_tray(),
            stock_remaining: self.stock,
            idle: self.is_idle(),
        }
    }

    /// Abort the open transaction.
    pub fn cancel(&mut self) -> CancelReceipt {
        self.apply(Event::Cancel);
        CancelReceipt {
            change_amount: self.change_amount,
            logs: self.take_logs(),
            tray: self.take_tray(),
            idle: self.is_idle(),
        }
    }

    /// Apply a single event on top of the current machine state.
    pub fn apply(&mut self, event: Event) {
        let from = self.state;
        match (self.state, event) {
            (State::Idle | State::Insertion | State::Suspension, Event::InsertCoin(value)) => {
                self.handle_insert(value);
            }
            (State::Insertion | State::Suspension, Event::Cancel) => self.refund(),
            (State::Insertion, Event::Dispense) => self.handle_dispense(),
            // Idle ignores dispense/cancel; suspension ignores dispense.
            _ => {}
        }
        debug!(?from, to = ?self.state, ?event, "event handled");
    }

    /// Drive the machine with the given event stream.
    pub async fn run(&mut self, mut stream: impl Stream<Item = Event> + Unpin) {
        while let Some(event) = stream.next().await {
            self.apply(event);
        }
    }

    /// Discard this transaction's machine and rebuild from configuration.
    pub fn reset(&mut self) {
        *self = Self::new(self.config.clone());
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == State::Idle
    }

    pub fn loaded_amount(&self) -> Cents {
        self.loaded_amount
    }

    pub fn change_amount(&self) -> Cents {
        self.change_amount
    }

    pub fn stock(&self) -> u32 {
        self.stock
    }

    /// Direct stock mutation; bypasses the state machine.
    pub fn set_stock(&mut self, stock: u32) {
        self.stock = stock;
    }

    /// Current coin count of the bank for `value`, if one is configured.
    pub fn bank_count(&self, value: Cents) -> Option<u32> {
        self.banks.get(&value).map(CoinBank::count)
    }

    /// Drain the transaction log accumulated since the last read.
    pub fn take_logs(&mut self) -> Vec<String> {
        std::mem::take(&mut self.logs)
    }

    /// Drain the coins staged for the customer.
    pub fn take_tray(&mut self) -> Vec<Cents> {
        std::mem::take(&mut self.tray)
    }
}

/// Private API
impl Machine {
    fn log(&mut self, line: &str) {
        info!("{line}");
        self.logs.push(line.to_string());
    }

    fn log_warn(&mut self, line: &str) {
        warn!("{line}");
        self.logs.push(line.to_string());
    }

    /// Validate-and-record: accept the coin into its bank, or reject it.
    fn handle_insert(&mut self, value: Cents) {
        match self.banks.get_mut(&value) {
            Some(bank) if bank.can_accept() => {
                bank.insert();
                self.loaded_amount += value;
                self.log("Inserted coin.");
                self.state = State::Insertion;
            }
            Some(_) => {
                self.log_warn("Coin bank full.");
                self.reject(value);
            }
            None => {
                self.log_warn("Warning. Unsupported coin inserted.");
                self.reject(value);
            }
        }
    }

    /// Stage the rejected coin and suspend. Banks and loaded amount are
    /// untouched; a second rejection replaces the staged coin.
    fn reject(&mut self, value: Cents) {
        self.log("Rejecting coin.");
        self.tray = vec![value];
        self.state = State::Suspension;
    }

    /// Refund the loaded amount. The pending change amount is replaced,
    /// never accumulated. An unreachable refund combination is logged and
    /// the machine still goes idle.
    fn refund(&mut self) {
        self.state = State::Termination;
        self.log("Cancelling transaction.");
        self.change_amount = self.loaded_amount;
        self.loaded_amount = 0;

        if self.change_amount == 0 {
            self.tray.clear();
        } else {
            match self.deduct_change(self.change_amount) {
                Some(coins) => self.tray = coins,
                None => {
                    self.log_warn("Unable to return change.");
                    self.tray.clear();
                }
            }
        }

        self.state = State::Idle;
    }

    fn handle_dispense(&mut self) {
        self.state = State::Termination;

        if self.stock == 0 {
            self.log_warn("Items are out of stock.");
            self.refund();
            return;
        }

        if self.loaded_amount < self.config.item_price {
            self.log_warn("Insufficient funds.");
            self.refund();
            return;
        }

        let change = self.loaded_amount - self.config.item_price;
        if change == 0 {
            self.stock -= 1;
            self.loaded_amount = 0;
            self.change_amount = 0;
            self.tray.clear();
            self.log("Item issued.");
            self.state = State::Idle;
            return;
        }

        match self.deduct_change(change) {
            Some(coins) => {
                self.stock -= 1;
                self.loaded_amount = 0;
                self.change_amount = change;
                self.tray = coins;
                self.log("Item issued.");
                self.state = State::Idle;
            }
            None => {
                // Loaded amount is still intact, so the refund below hands
                // back the full inserted sum. The inserted coins sit in the
                // banks, so that refund always finds a combination.
                self.log_warn("Unable to return change.");
                self.refund();
            }
        }
    }

    /// Run the change solver against current inventories; on success,
    /// remove exactly the selected coins from their banks.
    fn deduct_change(&mut self, target: Cents) -> Option<Vec<Cents>> {
        let available: Vec<(Cents, u32)> = self
            .banks
            .values()
            .rev()
            .map(|bank| (bank.value(), bank.count()))
            .collect();

        let coins = change::make_change(target, &available)?;
        for value in &coins {
            if let Some(bank) = self.banks.get_mut(value) {
                bank.remove();
            }
        }
        Some(coins)
    }
}

impl Default for Machine {
    fn default() -> Self {
        Self::new(MachineConfig::default())
    }
}
