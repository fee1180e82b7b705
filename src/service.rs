//! Presentation-facing service over a [`Machine`].
//!
//! Fires triggers and maps machine state into a [`MachineInfo`] view with
//! formatted amounts and coin labels. Reading an info drains the machine's
//! transaction log and tray.

use serde::Serialize;
use thiserror::Error;

use crate::machine::Machine;
use crate::model::{Cents, Event, MachineConfig};

/// The display set is wider than the bank set (a rejected 5c coin must be
/// showable in the tray); anything outside it is a configuration mismatch.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CurrencyError {
    #[error("no display mapping for denomination {0}")]
    UnmappedDenomination(Cents),
}

/// Label for a single coin, e.g. "20c" or "$2".
pub fn coin_label(value: Cents) -> Result<String, CurrencyError> {
    match value {
        5 | 10 | 20 | 50 => Ok(format!("{value}c")),
        100 => Ok("$1".to_string()),
        200 => Ok("$2".to_string()),
        other => Err(CurrencyError::UnmappedDenomination(other)),
    }
}

/// Dollar rendering of an amount in cents; zero collapses to "$0".
pub fn format_cents(cents: Cents) -> String {
    if cents == 0 {
        "$0".to_string()
    } else {
        format!("${}.{:02}", cents / 100, cents % 100)
    }
}

/// Snapshot handed to the presentation layer after each operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MachineInfo {
    pub loaded: String,
    pub tray: String,
    pub stock: u32,
    pub status: String,
    pub idle: bool,
}

/// Owns a machine and exposes the operations the presentation layer consumes.
pub struct MachineService {
    machine: Machine,
}

impl MachineService {
    pub fn new() -> Self {
        Self::with_config(MachineConfig::default())
    }

    pub fn with_config(config: MachineConfig) -> Self {
        Self {
            machine: Machine::new(config),
        }
    }

    /// Snapshot without firing a trigger.
    pub fn info(&mut self) -> Result<MachineInfo, CurrencyError> {
        self.generate_info()
    }

    pub fn insert(&mut self, coin: Cents) -> Result<MachineInfo, CurrencyError> {
        self.handle(Event::InsertCoin(coin))
    }

    pub fn dispense(&mut self) -> Result<MachineInfo, CurrencyError> {
        self.handle(Event::Dispense)
    }

    pub fn cancel(&mut self) -> Result<MachineInfo, CurrencyError> {
        self.handle(Event::Cancel)
    }

    /// Fire one event and read the resulting snapshot.
    pub fn handle(&mut self, event: Event) -> Result<MachineInfo, CurrencyError> {
        self.machine.apply(event);
        self.generate_info()
    }

    /// Discard the machine and rebuild it from its configuration.
    pub fn reset(&mut self) -> Result<MachineInfo, CurrencyError> {
        self.machine.reset();
        self.generate_info()
    }

    pub fn stock(&self) -> u32 {
        self.machine.stock()
    }

    /// Direct stock adjustment; bypasses the state machine.
    pub fn set_stock(&mut self, stock: u32) {
        self.machine.set_stock(stock);
    }

    fn generate_info(&mut self) -> Result<MachineInfo, CurrencyError> {
        let logs = self.machine.take_logs();
        let tray = self.machine.take_tray();

        let tray = if tray.is_empty() {
            "Tray is empty.".to_string()
        } else {
            tray.iter()
                .map(|&coin| coin_label(coin))
                .collect::<Result<Vec<_>, _>>()?
                .join(", ")
        };

        Ok(MachineInfo {
            loaded: format_cents(self.machine.loaded_amount()),
            tray,
            stock: self.machine.stock(),
            status: logs.join(" "),
            idle: self.machine.is_idle(),
        })
    }
}

impl Default for MachineService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coin_labels() {
        assert_eq!(coin_label(5).unwrap(), "5c");
        assert_eq!(coin_label(10).unwrap(), "10c");
        assert_eq!(coin_label(20).unwrap(), "20c");
        assert_eq!(coin_label(50).unwrap(), "50c");
        assert_eq!(coin_label(100).unwrap(), "$1");
        assert_eq!(coin_label(200).unwrap(), "$2");
        assert_eq!(coin_label(30), Err(CurrencyError::UnmappedDenomination(30)));
    }

    #[test]
    fn cents_formatting() {
        assert_eq!(format_cents(0), "$0");
        assert_eq!(format_cents(40), "$0.40");
        assert_eq!(format_cents(160), "$1.60");
        assert_eq!(format_cents(200), "$2.00");
        assert_eq!(format_cents(205), "$2.05");
    }

    #[test]
    fn fresh_machine_info() {
        let mut service = MachineService::new();
        let info = service.info().unwrap();

        assert_eq!(info.loaded, "$0");
        assert_eq!(info.tray, "Tray is empty.");
        assert_eq!(info.stock, 2);
        assert_eq!(info.status, "Machine is idle and running.");
        assert!(info.idle);
    }

    #[test]
    fn info_drains_logs() {
        let mut service = MachineService::new();
        service.info().unwrap();

        let info = service.info().unwrap();
        assert_eq!(info.status, "");
    }

    #[test]
    fn insert_reports_loaded_value() {
        let mut service = MachineService::new();
        service.info().unwrap();

        let info = service.insert(100).unwrap();
        assert_eq!(info.loaded, "$1.00");
        assert_eq!(info.status, "Inserted coin.");
        assert!(!info.idle);
    }

    #[test]
    fn purchase_reports_labeled_change() {
        let mut service = MachineService::new();
        service.insert(100).unwrap();
        service.insert(100).unwrap();

        let info = service.dispense().unwrap();
        assert_eq!(info.loaded, "$0");
        assert_eq!(info.tray, "20c, 20c");
        assert_eq!(info.stock, 1);
        assert_eq!(info.status, "Item issued.");
        assert!(info.idle);
    }

    #[test]
    fn rejected_displayable_coin_shows_in_tray() {
        // 5c has a label but no bank, so it is rejected yet displayable.
        let mut service = MachineService::new();
        service.info().unwrap();

        let info = service.insert(5).unwrap();
        assert_eq!(info.tray, "5c");
        assert_eq!(
            info.status,
            "Warning. Unsupported coin inserted. Rejecting coin."
        );
        assert!(!info.idle);
    }

    #[test]
    fn rejected_unmapped_coin_is_a_fault() {
        let mut service = MachineService::new();
        let result = service.insert(30);
        assert_eq!(result, Err(CurrencyError::UnmappedDenomination(30)));
    }

    #[test]
    fn reset_returns_fresh_info() {
        let mut service = MachineService::new();
        service.insert(100).unwrap();
        service.set_stock(9);

        let info = service.reset().unwrap();
        assert_eq!(info.loaded, "$0");
        assert_eq!(info.stock, 2);
        assert_eq!(info.status, "Machine is idle and running.");
        assert!(info.idle);
        assert_eq!(service.stock(), 2);
    }

    #[test]
    fn stock_adjustment() {
        let mut service = MachineService::new();
        assert_eq!(service.stock(), 2);
        service.set_stock(40);
        assert_eq!(service.stock(), 40);
    }
}
