use crate::domain::ports::ReceiptStore;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// 記憶體內的結果表，程序結束即消失
///
/// 整張表由單一 `RwLock` 保護；鎖不會跨越 `.await` 持有。
#[derive(Debug, Default)]
pub struct InMemoryReceiptStore {
    points: RwLock<HashMap<String, u64>>,
}

impl InMemoryReceiptStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReceiptStore for InMemoryReceiptStore {
    fn put(&self, id: &str, points: u64) {
        // 寫入端 panic 不會留下半更新的 map，直接沿用內部資料
        let mut table = self.points.write().unwrap_or_else(PoisonError::into_inner);
        table.insert(id.to_string(), points);
    }

    fn get(&self, id: &str) -> Option<u64> {
        let table = self.points.read().unwrap_or_else(PoisonError::into_inner);
        table.get(id).copied()
    }

    fn len(&self) -> usize {
        self.points
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
