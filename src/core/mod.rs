pub mod id;
pub mod processor;
pub mod rules;
pub mod store;
pub mod validator;

pub use crate::domain::model::{LineItem, ProcessedReceipt, RawReceipt, Receipt};
pub use crate::domain::ports::{ConfigProvider, IdGenerator, ReceiptStore};
pub use crate::utils::error::Result;
