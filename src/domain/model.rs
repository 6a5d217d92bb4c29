use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;

/// 從 JSON 解析出的原始收據，欄位型別尚未檢查
///
/// 所有欄位皆為選填的任意 JSON 值，缺漏或型別錯誤交由驗證器逐欄回報。
/// 未定義的欄位會被忽略。
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawReceipt {
    pub retailer: Option<serde_json::Value>,
    pub purchase_date: Option<serde_json::Value>,
    pub purchase_time: Option<serde_json::Value>,
    pub items: Option<serde_json::Value>,
    pub total: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    short_description: String,
    price: String,
}

impl LineItem {
    pub(crate) fn new(short_description: String, price: String) -> Self {
        Self {
            short_description,
            price,
        }
    }

    pub fn short_description(&self) -> &str {
        &self.short_description
    }

    /// 兩位小數的金額字串，例如 "6.49"
    pub fn price(&self) -> &str {
        &self.price
    }
}

/// 通過驗證的收據
///
/// 只能經由 [`crate::core::validator::validate_receipt`] 建立，
/// 因此持有此型別即代表所有欄位都符合格式。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    retailer: String,
    purchase_date: NaiveDate,
    purchase_time: NaiveTime,
    items: Vec<LineItem>,
    total: String,
}

impl Receipt {
    pub(crate) fn new(
        retailer: String,
        purchase_date: NaiveDate,
        purchase_time: NaiveTime,
        items: Vec<LineItem>,
        total: String,
    ) -> Self {
        Self {
            retailer,
            purchase_date,
            purchase_time,
            items,
            total,
        }
    }

    pub fn retailer(&self) -> &str {
        &self.retailer
    }

    pub fn purchase_date(&self) -> NaiveDate {
        self.purchase_date
    }

    pub fn purchase_time(&self) -> NaiveTime {
        self.purchase_time
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn total(&self) -> &str {
        &self.total
    }
}

/// 已計分並存入結果表的收據
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedReceipt {
    pub id: String,
    pub points: u64,
}
