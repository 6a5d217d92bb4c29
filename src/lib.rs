pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::ServerConfig;

pub use crate::core::processor::ReceiptProcessor;
pub use crate::core::rules::{calculate_breakdown, calculate_points, Rule, ScoreBreakdown};
pub use crate::core::store::InMemoryReceiptStore;
pub use crate::core::validator::validate_receipt;
pub use crate::domain::model::{LineItem, ProcessedReceipt, RawReceipt, Receipt};
pub use crate::domain::ports::{IdGenerator, ReceiptStore};
pub use crate::utils::error::{FieldError, ReceiptError, Result, ValidationError};
