//! 點數規則引擎
//!
//! 七條規則各自只讀取 `Receipt`，互不相依，總分為各規則點數相加。
//! 金額一律以整數「分」精確計算；解析失敗的規則貢獻 0 點而不是中止計算。

use crate::domain::model::Receipt;
use chrono::{Datelike, Timelike};

const ROUND_DOLLAR_POINTS: u64 = 50;
const QUARTER_MULTIPLE_POINTS: u64 = 25;
const POINTS_PER_ITEM_PAIR: u64 = 5;
const ODD_DAY_POINTS: u64 = 6;
const AFTERNOON_WINDOW_POINTS: u64 = 10;
const AFTERNOON_WINDOW_HOURS: std::ops::Range<u32> = 14..16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// 零售商名稱中每個英數字元 1 點
    Retailer,
    /// 總額為整數元 50 點
    RoundDollar,
    /// 總額為 0.25 的倍數 25 點
    QuarterMultiple,
    /// 每兩個品項 5 點
    ItemPairs,
    /// 品名去空白後長度為 3 的倍數時，加 ceil(價格 * 0.2)
    ItemDescription,
    /// 購買日為奇數日 6 點
    OddDay,
    /// 14:00 (含) 至 16:00 (不含) 購買 10 點
    AfternoonWindow,
}

impl Rule {
    pub const ALL: [Rule; 7] = [
        Rule::Retailer,
        Rule::RoundDollar,
        Rule::QuarterMultiple,
        Rule::ItemPairs,
        Rule::ItemDescription,
        Rule::OddDay,
        Rule::AfternoonWindow,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Rule::Retailer => "retailer",
            Rule::RoundDollar => "round_dollar",
            Rule::QuarterMultiple => "quarter_multiple",
            Rule::ItemPairs => "item_pairs",
            Rule::ItemDescription => "item_description",
            Rule::OddDay => "odd_day",
            Rule::AfternoonWindow => "afternoon_window",
        }
    }

    pub fn points(&self, receipt: &Receipt) -> u64 {
        match self {
            Rule::Retailer => retailer_points(receipt),
            Rule::RoundDollar => round_dollar_points(receipt),
            Rule::QuarterMultiple => quarter_multiple_points(receipt),
            Rule::ItemPairs => item_pair_points(receipt),
            Rule::ItemDescription => item_description_points(receipt),
            Rule::OddDay => odd_day_points(receipt),
            Rule::AfternoonWindow => afternoon_window_points(receipt),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleContribution {
    pub rule: Rule,
    pub points: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreBreakdown {
    pub contributions: Vec<RuleContribution>,
    pub total: u64,
}

impl ScoreBreakdown {
    pub fn points_for(&self, rule: Rule) -> u64 {
        self.contributions
            .iter()
            .find(|c| c.rule == rule)
            .map(|c| c.points)
            .unwrap_or(0)
    }
}

/// 計算收據總點數
pub fn calculate_points(receipt: &Receipt) -> u64 {
    calculate_breakdown(receipt).total
}

/// 計算總點數並保留每條規則的貢獻
pub fn calculate_breakdown(receipt: &Receipt) -> ScoreBreakdown {
    tracing::debug!("Scoring receipt from retailer '{}'", receipt.retailer());

    let contributions: Vec<RuleContribution> = Rule::ALL
        .iter()
        .map(|&rule| {
            let points = rule.points(receipt);
            tracing::debug!(rule = rule.name(), points, "rule applied");
            RuleContribution { rule, points }
        })
        .collect();

    let total = contributions
        .iter()
        .fold(0u64, |acc, c| acc.saturating_add(c.points));

    tracing::debug!("Completed scoring: total points = {}", total);

    ScoreBreakdown {
        contributions,
        total,
    }
}

/// 將 "12.34" 解析為 1234 分；溢位或格式錯誤時回傳 `None`
pub fn parse_cents(amount: &str) -> Option<u64> {
    let (dollars, cents) = amount.split_once('.')?;
    if dollars.is_empty()
        || cents.len() != 2
        || !dollars.bytes().all(|b| b.is_ascii_digit())
        || !cents.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }

    dollars
        .parse::<u64>()
        .ok()?
        .checked_mul(100)?
        .checked_add(cents.parse::<u64>().ok()?)
}

fn total_cents(receipt: &Receipt) -> Option<u64> {
    let cents = parse_cents(receipt.total());
    if cents.is_none() {
        tracing::warn!("Could not parse total '{}', rule awards 0", receipt.total());
    }
    cents
}

fn retailer_points(receipt: &Receipt) -> u64 {
    receipt
        .retailer()
        .chars()
        .filter(|c| c.is_alphanumeric())
        .count() as u64
}

fn round_dollar_points(receipt: &Receipt) -> u64 {
    match total_cents(receipt) {
        Some(cents) if cents % 100 == 0 => ROUND_DOLLAR_POINTS,
        _ => 0,
    }
}

fn quarter_multiple_points(receipt: &Receipt) -> u64 {
    match total_cents(receipt) {
        Some(cents) if cents % 25 == 0 => QUARTER_MULTIPLE_POINTS,
        _ => 0,
    }
}

fn item_pair_points(receipt: &Receipt) -> u64 {
    (receipt.items().len() / 2) as u64 * POINTS_PER_ITEM_PAIR
}

/// ceil(price * 0.2) == ceil(cents / 500)
pub fn description_bonus(description: &str, price: &str) -> u64 {
    // 長度以字元計；空字串 (0 % 3 == 0) 同樣符合
    let trimmed_len = description.trim().chars().count();
    if trimmed_len % 3 != 0 {
        return 0;
    }

    match parse_cents(price) {
        Some(cents) => cents.div_ceil(500),
        None => {
            tracing::warn!("Could not parse item price '{}', item awards 0", price);
            0
        }
    }
}

fn item_description_points(receipt: &Receipt) -> u64 {
    receipt
        .items()
        .iter()
        .map(|item| description_bonus(item.short_description(), item.price()))
        .fold(0u64, u64::saturating_add)
}

fn odd_day_points(receipt: &Receipt) -> u64 {
    if receipt.purchase_date().day() % 2 == 1 {
        ODD_DAY_POINTS
    } else {
        0
    }
}

fn afternoon_window_points(receipt: &Receipt) -> u64 {
    if AFTERNOON_WINDOW_HOURS.contains(&receipt.purchase_time().hour()) {
        AFTERNOON_WINDOW_POINTS
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::LineItem;
    use chrono::{NaiveDate, NaiveTime};

    fn receipt(
        retailer: &str,
        date: &str,
        time: &str,
        total: &str,
        items: &[(&str, &str)],
    ) -> Receipt {
        Receipt::new(
            retailer.to_string(),
            NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            NaiveTime::parse_from_str(time, "%H:%M").unwrap(),
            items
                .iter()
                .map(|(d, p)| LineItem::new(d.to_string(), p.to_string()))
                .collect(),
            total.to_string(),
        )
    }

    #[test]
    fn test_minimal_round_dollar_receipt() {
        let r = receipt("A", "2022-01-02", "13:00", "1.00", &[("X", "1.00")]);
        let breakdown = calculate_breakdown(&r);

        assert_eq!(breakdown.points_for(Rule::Retailer), 1);
        assert_eq!(breakdown.points_for(Rule::RoundDollar), 50);
        assert_eq!(breakdown.points_for(Rule::QuarterMultiple), 25);
        assert_eq!(breakdown.points_for(Rule::ItemPairs), 0);
        assert_eq!(breakdown.points_for(Rule::ItemDescription), 0);
        assert_eq!(breakdown.points_for(Rule::OddDay), 0);
        assert_eq!(breakdown.points_for(Rule::AfternoonWindow), 0);
        assert_eq!(breakdown.total, 76);
    }

    #[test]
    fn test_pair_odd_day_and_window() {
        let r = receipt(
            "AA",
            "2022-01-03",
            "15:00",
            "2.25",
            &[("abc", "1.00"), ("defg", "1.00")],
        );
        assert_eq!(calculate_points(&r), 2 + 25 + 5 + 1 + 6 + 10);
    }

    #[test]
    fn test_every_item_qualifies() {
        let r = receipt(
            "Retailer",
            "2022-02-05",
            "10:00",
            "5.75",
            &[("abc", "1.00"), ("abc", "2.00"), ("abcdef", "3.00"), ("xyz", "4.00")],
        );
        assert_eq!(calculate_points(&r), 8 + 25 + 10 + 4 + 6);
    }

    #[test]
    fn test_window_start_is_inclusive() {
        let r = receipt(
            "Store",
            "2022-04-04",
            "14:00",
            "3.50",
            &[("aaa", "1.00"), ("bbb", "2.00")],
        );
        assert_eq!(calculate_points(&r), 5 + 25 + 5 + 2 + 10);
    }

    #[test]
    fn test_afternoon_window_boundaries() {
        for (time, expected) in [("13:59", 0), ("14:00", 10), ("15:59", 10), ("16:00", 0)] {
            let r = receipt("A", "2022-01-02", time, "1.01", &[("X", "1.00")]);
            assert_eq!(Rule::AfternoonWindow.points(&r), expected, "at {}", time);
        }
    }

    #[test]
    fn test_odd_cents_earn_no_total_bonus() {
        let r = receipt("A", "2022-01-02", "13:00", "10.01", &[("X", "1.00")]);
        assert_eq!(Rule::RoundDollar.points(&r), 0);
        assert_eq!(Rule::QuarterMultiple.points(&r), 0);
    }

    #[test]
    fn test_quarter_multiples() {
        for (total, expected) in [("0.00", 25), ("0.25", 25), ("7.50", 25), ("12.75", 25), ("1.10", 0)] {
            let r = receipt("A", "2022-01-02", "13:00", total, &[("X", "1.00")]);
            assert_eq!(Rule::QuarterMultiple.points(&r), expected, "total {}", total);
        }
    }

    #[test]
    fn test_retailer_counts_only_alphanumerics() {
        let r = receipt("M&M Corner Market", "2022-01-02", "13:00", "1.01", &[("X", "1.00")]);
        assert_eq!(Rule::Retailer.points(&r), 14);
    }

    #[test]
    fn test_item_pairs_floor() {
        let items = [("X", "1.00"); 5];
        let r = receipt("A", "2022-01-02", "13:00", "1.01", &items);
        assert_eq!(Rule::ItemPairs.points(&r), 10);
    }

    #[test]
    fn test_description_bonus_trims_and_rounds_up() {
        assert_eq!(description_bonus("Emils Cheese Pizza", "12.25"), 3);
        assert_eq!(description_bonus("   Klarbrunn 12-PK 12 FL OZ  ", "12.00"), 3);
        assert_eq!(description_bonus("Mountain Dew 12PK", "6.49"), 0);
        // 5.00 * 0.2 恰為 1，不可進位成 2
        assert_eq!(description_bonus("abc", "5.00"), 1);
        assert_eq!(description_bonus("abc", "5.01"), 2);
        assert_eq!(description_bonus("abc", "0.00"), 0);
    }

    #[test]
    fn test_blank_description_qualifies_literally() {
        // 去空白後長度 0 視為 3 的倍數
        assert_eq!(description_bonus("", "10.00"), 2);
        assert_eq!(description_bonus("   ", "10.00"), 2);
    }

    #[test]
    fn test_unparseable_amounts_award_zero() {
        let huge = "99999999999999999999.00";
        let r = receipt("A", "2022-01-02", "13:00", huge, &[("abc", huge), ("def", "5.00")]);
        let breakdown = calculate_breakdown(&r);

        assert_eq!(breakdown.points_for(Rule::RoundDollar), 0);
        assert_eq!(breakdown.points_for(Rule::QuarterMultiple), 0);
        // 只有可解析的品項計分
        assert_eq!(breakdown.points_for(Rule::ItemDescription), 1);
        assert_eq!(breakdown.total, 1 + 5 + 1);
    }

    #[test]
    fn test_parse_cents() {
        assert_eq!(parse_cents("35.35"), Some(3535));
        assert_eq!(parse_cents("0.05"), Some(5));
        assert_eq!(parse_cents("1.2"), None);
        assert_eq!(parse_cents(".25"), None);
        assert_eq!(parse_cents("-1.00"), None);
        assert_eq!(parse_cents("1.00.00"), None);
        assert_eq!(parse_cents("184467440737095517.00"), None);
    }

    #[test]
    fn test_breakdown_covers_every_rule_once() {
        let r = receipt("Target", "2022-01-01", "13:01", "35.35", &[("Mountain Dew 12PK", "6.49")]);
        let breakdown = calculate_breakdown(&r);

        let rules: Vec<Rule> = breakdown.contributions.iter().map(|c| c.rule).collect();
        assert_eq!(rules, Rule::ALL.to_vec());
        assert_eq!(
            breakdown.total,
            breakdown.contributions.iter().map(|c| c.points).sum::<u64>()
        );
    }

    #[test]
    fn test_scoring_is_repeatable() {
        let r = receipt(
            "M&M Corner Market",
            "2022-03-20",
            "14:33",
            "9.00",
            &[("Gatorade", "2.25"); 4],
        );
        let first = calculate_points(&r);
        assert_eq!(first, 109);
        assert_eq!(calculate_points(&r), first);
    }
}
