//! Alerts Module
//!
//! Turns each equipment's latest snapshot and a failure probability into a
//! severity tier, alert messages and maintenance recommendations.
//!
//! ## Structure
//! - `types`: Severity, Priority, AlertResult, Alert, Recommendation
//! - `rules`: thresholds and the tier mapping
//! - `engine`: assess / evaluate
//!
//! ## Usage
//! ```ignore
//! use crate::logic::alerts::evaluate;
//!
//! let (alerts, recommendations) = evaluate(&rows, &forest)?;
//! for alert in &alerts {
//!     println!("{} ({})", alert.equipment_name, alert.equipment_id);
//! }
//! ```

pub mod engine;
pub mod rules;
pub mod types;

#[cfg(test)]
mod tests;

pub use engine::evaluate;
pub use types::{Alert, Priority, Recommendation, Severity};

#[cfg(test)]
pub use engine::{assess, partition};
#[cfg(test)]
pub use types::AlertResult;
