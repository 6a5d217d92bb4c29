//! 收據驗證：`RawReceipt` -> `Receipt`
//!
//! 每個欄位獨立檢查，所有錯誤一次收集回報。

use crate::domain::model::{LineItem, RawReceipt, Receipt};
use crate::utils::error::{FieldError, ValidationError};
use chrono::{NaiveDate, NaiveTime};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

pub const RETAILER_PATTERN: &str = r"^[A-Za-z0-9\s\-&]+$";
pub const DESCRIPTION_PATTERN: &str = r"^[A-Za-z0-9\s\-]+$";
// `\d` 在 regex crate 中匹配所有 Unicode 數字，金額與日期只接受 ASCII
pub const AMOUNT_PATTERN: &str = r"^[0-9]+\.[0-9]{2}$";

const DATE_SHAPE: &str = r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$";
const TIME_SHAPE: &str = r"^[0-9]{2}:[0-9]{2}$";

static RETAILER_RE: LazyLock<Regex> = LazyLock::new(|| compile(RETAILER_PATTERN));
static DESCRIPTION_RE: LazyLock<Regex> = LazyLock::new(|| compile(DESCRIPTION_PATTERN));
static AMOUNT_RE: LazyLock<Regex> = LazyLock::new(|| compile(AMOUNT_PATTERN));
static DATE_RE: LazyLock<Regex> = LazyLock::new(|| compile(DATE_SHAPE));
static TIME_RE: LazyLock<Regex> = LazyLock::new(|| compile(TIME_SHAPE));

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in pattern must compile")
}

/// 驗證原始收據，成功時回傳不可變的 `Receipt`
pub fn validate_receipt(raw: &RawReceipt) -> Result<Receipt, ValidationError> {
    let mut errors = Vec::new();

    let retailer = check_pattern(
        &mut errors,
        "retailer",
        raw.retailer.as_ref(),
        &RETAILER_RE,
        RETAILER_PATTERN,
    );
    let purchase_date = check_date(&mut errors, "purchaseDate", raw.purchase_date.as_ref());
    let purchase_time = check_time(&mut errors, "purchaseTime", raw.purchase_time.as_ref());
    let items = check_items(&mut errors, raw.items.as_ref());
    let total = check_pattern(&mut errors, "total", raw.total.as_ref(), &AMOUNT_RE, AMOUNT_PATTERN);

    match (retailer, purchase_date, purchase_time, items, total) {
        (Some(retailer), Some(date), Some(time), Some(items), Some(total)) if errors.is_empty() => {
            Ok(Receipt::new(retailer, date, time, items, total))
        }
        _ => Err(ValidationError::new(errors)),
    }
}

impl TryFrom<&RawReceipt> for Receipt {
    type Error = ValidationError;

    fn try_from(raw: &RawReceipt) -> Result<Self, Self::Error> {
        validate_receipt(raw)
    }
}

fn require_str<'a>(
    errors: &mut Vec<FieldError>,
    field: &str,
    value: Option<&'a Value>,
) -> Option<&'a str> {
    match value {
        None | Some(Value::Null) => {
            errors.push(FieldError::Missing {
                field: field.to_string(),
            });
            None
        }
        Some(Value::String(s)) => Some(s.as_str()),
        Some(_) => {
            errors.push(FieldError::WrongType {
                field: field.to_string(),
                expected: "a string".to_string(),
            });
            None
        }
    }
}

fn check_pattern(
    errors: &mut Vec<FieldError>,
    field: &str,
    value: Option<&Value>,
    re: &Regex,
    pattern: &str,
) -> Option<String> {
    let s = require_str(errors, field, value)?;
    if re.is_match(s) {
        Some(s.to_string())
    } else {
        errors.push(FieldError::PatternMismatch {
            field: field.to_string(),
            value: s.to_string(),
            pattern: pattern.to_string(),
        });
        None
    }
}

fn check_date(
    errors: &mut Vec<FieldError>,
    field: &str,
    value: Option<&Value>,
) -> Option<NaiveDate> {
    let s = require_str(errors, field, value)?;
    // chrono 的 %m/%d 接受單一位數，先確認形狀
    let parsed = DATE_RE
        .is_match(s)
        .then(|| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
        .flatten();

    if parsed.is_none() {
        errors.push(FieldError::InvalidDate {
            field: field.to_string(),
            value: s.to_string(),
        });
    }
    parsed
}

fn check_time(
    errors: &mut Vec<FieldError>,
    field: &str,
    value: Option<&Value>,
) -> Option<NaiveTime> {
    let s = require_str(errors, field, value)?;
    let parsed = TIME_RE
        .is_match(s)
        .then(|| NaiveTime::parse_from_str(s, "%H:%M").ok())
        .flatten();

    if parsed.is_none() {
        errors.push(FieldError::InvalidTime {
            field: field.to_string(),
            value: s.to_string(),
        });
    }
    parsed
}

fn check_items(errors: &mut Vec<FieldError>, value: Option<&Value>) -> Option<Vec<LineItem>> {
    let entries = match value {
        None | Some(Value::Null) => {
            errors.push(FieldError::Missing {
                field: "items".to_string(),
            });
            return None;
        }
        Some(Value::Array(entries)) => entries,
        Some(_) => {
            errors.push(FieldError::WrongType {
                field: "items".to_string(),
                expected: "an array of items".to_string(),
            });
            return None;
        }
    };

    if entries.is_empty() {
        errors.push(FieldError::EmptyItems {
            field: "items".to_string(),
        });
        return None;
    }

    let before = errors.len();
    let mut items = Vec::with_capacity(entries.len());

    for (index, entry) in entries.iter().enumerate() {
        let Some(obj) = entry.as_object() else {
            errors.push(FieldError::WrongType {
                field: format!("items[{}]", index),
                expected: "an object".to_string(),
            });
            continue;
        };

        let description = check_pattern(
            errors,
            &format!("items[{}].shortDescription", index),
            obj.get("shortDescription"),
            &DESCRIPTION_RE,
            DESCRIPTION_PATTERN,
        );
        let price = check_pattern(
            errors,
            &format!("items[{}].price", index),
            obj.get("price"),
            &AMOUNT_RE,
            AMOUNT_PATTERN,
        );

        if let (Some(description), Some(price)) = (description, price) {
            items.push(LineItem::new(description, price));
        }
    }

    (errors.len() == before).then_some(items)
}
