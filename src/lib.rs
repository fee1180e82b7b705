pub mod csv;
pub mod machine;
pub mod model;
pub mod service;

pub use machine::Machine;
pub use model::{Cents, Event, MachineConfig, State};
pub use service::{MachineInfo, MachineService};
