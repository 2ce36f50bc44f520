//! Logic Module - Pipeline & Engines
//!
//! ## Architecture
//! - `records/` - Typed input records
//! - `workbook/` - Workbook I/O, schema validation, synthetic data
//! - `features/` - Joins, per-equipment time features, snapshots
//! - `model/` - Failure classifier training (smartcore)
//! - `alerts/` - Threshold tiers, alerts and recommendations
//! - `history/` - JSONL scan log
//! - `scan` - The pipeline both front ends run

pub mod config;
pub mod records;
pub mod workbook;

pub mod features;
pub mod model;
pub mod alerts;

pub mod history;
pub mod scan;
