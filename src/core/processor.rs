use crate::core::id::UuidGenerator;
use crate::core::rules::calculate_breakdown;
use crate::core::store::InMemoryReceiptStore;
use crate::core::validator::validate_receipt;
use crate::domain::model::{ProcessedReceipt, RawReceipt};
use crate::domain::ports::{IdGenerator, ReceiptStore};
use crate::utils::error::{FieldError, ReceiptError, Result, ValidationError};
use serde_json::Value;

/// 驗證 -> 計分 -> 產生識別碼 -> 寫入結果表
pub struct ReceiptProcessor<S: ReceiptStore, G: IdGenerator> {
    store: S,
    ids: G,
}

impl ReceiptProcessor<InMemoryReceiptStore, UuidGenerator> {
    pub fn in_memory() -> Self {
        Self::new(InMemoryReceiptStore::new(), UuidGenerator)
    }
}

impl<S: ReceiptStore, G: IdGenerator> ReceiptProcessor<S, G> {
    pub fn new(store: S, ids: G) -> Self {
        Self { store, ids }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn process(&self, raw: &RawReceipt) -> Result<ProcessedReceipt> {
        let receipt = validate_receipt(raw).inspect_err(|e| {
            tracing::warn!("Rejected receipt: {}", e);
        })?;

        let breakdown = calculate_breakdown(&receipt);
        let id = self.ids.next_id();
        self.store.put(&id, breakdown.total);

        tracing::info!("Processed receipt {} with {} points", id, breakdown.total);

        Ok(ProcessedReceipt {
            id,
            points: breakdown.total,
        })
    }

    /// 先把 JSON 解析成 `RawReceipt`；無法解析或不是物件都視為無效收據
    pub fn process_json(&self, body: &[u8]) -> Result<ProcessedReceipt> {
        let value: Value = serde_json::from_slice(body).map_err(|e| {
            tracing::warn!("Rejected receipt payload: {}", e);
            ReceiptError::Malformed(e)
        })?;

        if !value.is_object() {
            tracing::warn!("Rejected receipt payload: top-level JSON is not an object");
            return Err(ValidationError::new(vec![FieldError::WrongType {
                field: "receipt".to_string(),
                expected: "a JSON object".to_string(),
            }])
            .into());
        }

        let raw: RawReceipt = serde_json::from_value(value)?;
        self.process(&raw)
    }

    pub fn points(&self, id: &str) -> Result<u64> {
        match self.store.get(id) {
            Some(points) => {
                tracing::info!("Retrieved points for receipt {}: {}", id, points);
                Ok(points)
            }
            None => {
                tracing::warn!("Receipt ID {} not found", id);
                Err(ReceiptError::NotFound { id: id.to_string() })
            }
        }
    }
}
