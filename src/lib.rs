//! Risk appetite allocation and RAG status evaluation.
//!
//! Board appetite is cascaded to business units by percentage share, each
//! unit's exposure is classified Green/Amber/Red against its allocated
//! appetite and tolerance ceiling, and unit exposures roll up into a
//! firm-wide risk profile compared against the original board appetite.
//!
//! The evaluation core (`allocation`, `status`, `aggregate`, `snapshot`) is
//! pure and holds no state between calls. `synthetic` is a separate input
//! producer for demos.

pub mod aggregate;
pub mod allocation;
pub mod config;
pub mod report;
pub mod snapshot;
pub mod status;
pub mod synthetic;
pub mod types;

pub use allocation::AllocationError;
pub use config::{ScenarioConfig, ScenarioError, UnitConfig};
pub use report::{FirmReport, FirmSummary, UnitRow};
pub use snapshot::{FirmSnapshot, SnapshotError};
pub use types::{AppetiteVerdict, BusinessUnit, RiskStatus, UnitName};
