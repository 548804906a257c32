pub mod config;
pub mod error;
pub mod event;
pub mod types;

pub use config::PolicyConfig;
pub use error::{DecisionError, DecisionResult};
pub use event::{CapacityToTerminate, DecisionResponse, EventInstance, Inventory, ScaleInEvent};
pub use types::*;
