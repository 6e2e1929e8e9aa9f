//! Farm advisory and scheme eligibility services for the KrishiMitra backend.

pub mod advisory;
pub mod agronomy;
pub mod config;
pub mod data;
pub mod error;
pub mod mandi;
pub mod router;
pub mod schemes;
pub mod telemetry;

pub use data::KnowledgeBase;
