/// 識別碼 -> 點數 的結果表
///
/// 實作必須可被多個請求同時使用；`put` 與 `get` 皆不會失敗。
pub trait ReceiptStore: Send + Sync {
    /// 寫入或覆蓋 `id` 的點數
    fn put(&self, id: &str, points: u64);

    /// 查無資料時回傳 `None`
    fn get(&self, id: &str) -> Option<u64>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// 產生新的不透明識別碼
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

pub trait ConfigProvider: Send + Sync {
    /// `host:port`，已通過驗證
    fn bind_addr(&self) -> &str;
    fn log_format(&self) -> LogFormat;
    /// 明確指定的日誌等級，未指定時由 verbose 決定
    fn log_level(&self) -> Option<&str>;
    fn verbose(&self) -> bool;
}
