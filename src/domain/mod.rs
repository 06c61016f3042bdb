pub mod record;
pub mod region;
pub mod state;

pub use record::{DayRecord, Fact, Meta, OutputRecord, QueueSchedule, UpdateStatus, SCHEMA_VERSION};
pub use region::{Region, RegionRegistry};
pub use state::{CellFlags, DisruptionState};
