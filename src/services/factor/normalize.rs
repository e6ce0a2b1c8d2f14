//! 区间文案规范化
//!
//! 前端区间文案转换为上游因子键使用的写法：
//! - `X以上` -> `大于X`，`X以下` -> `小于X`
//! - `X~Y` 保持 `~`，单位只追加在末尾
//! - 金额类因子追加单位（亿/万），零边界不带单位

use regex::Regex;
use std::sync::OnceLock;

/// 带单位的边界数值
#[derive(Debug, Clone, Copy, PartialEq)]
struct Amount<'a> {
    number: &'a str,
    unit: Option<&'a str>,
}

/// 区间边界
#[derive(Debug, Clone, PartialEq)]
enum RangeBound<'a> {
    Above(Amount<'a>),
    Below(Amount<'a>),
    Between(Amount<'a>, Amount<'a>),
}

struct RangePatterns {
    above: Regex,
    below: Regex,
    between: Regex,
}

fn patterns() -> &'static RangePatterns {
    static PATTERNS: OnceLock<RangePatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| RangePatterns {
        above: Regex::new(r"^(?:(\d+(?:\.\d+)?)(亿|万)?以上|大于(\d+(?:\.\d+)?)(亿|万)?)$").unwrap(),
        below: Regex::new(r"^(?:(\d+(?:\.\d+)?)(亿|万)?以下|小于(\d+(?:\.\d+)?)(亿|万)?)$").unwrap(),
        between: Regex::new(r"^(\d+(?:\.\d+)?)(亿|万)?[~\-](\d+(?:\.\d+)?)(亿|万)?$").unwrap(),
    })
}

fn parse_bound(text: &str) -> Option<RangeBound<'_>> {
    let p = patterns();

    // 两种写法各占一组 (数值, 单位)
    let single = |re: &Regex| {
        re.captures(text).and_then(|c| {
            let (number, unit) = match c.get(1) {
                Some(n) => (n, c.get(2)),
                None => (c.get(3)?, c.get(4)),
            };
            Some(Amount { number: number.as_str(), unit: unit.map(|m| m.as_str()) })
        })
    };

    if let Some(amount) = single(&p.above) {
        return Some(RangeBound::Above(amount));
    }
    if let Some(amount) = single(&p.below) {
        return Some(RangeBound::Below(amount));
    }
    p.between.captures(text).and_then(|c| {
        let high_unit = c.get(4).map(|m| m.as_str());
        // 下界未写单位时沿用上界单位，如 "0~1000万"
        let low = Amount { number: c.get(1)?.as_str(), unit: c.get(2).map(|m| m.as_str()).or(high_unit) };
        let high = Amount { number: c.get(3)?.as_str(), unit: high_unit };
        Some(RangeBound::Between(low, high))
    })
}

fn is_zero(number: &str) -> bool {
    number.parse::<f64>().map_or(false, |n| n == 0.0)
}

/// 换算到目标单位；万 -> 亿 不能整除时返回 None
fn convert(amount: Amount<'_>, target: &str) -> Option<String> {
    match (amount.unit, target) {
        (None, _) | (Some(_), "") => Some(amount.number.to_string()),
        (Some(from), to) if from == to => Some(amount.number.to_string()),
        (Some("亿"), "万") => {
            let n = amount.number.parse::<f64>().ok()? * 10_000.0;
            Some(format!("{}", n))
        }
        (Some("万"), "亿") => {
            let n = amount.number.parse::<f64>().ok()?;
            (n % 10_000.0 == 0.0).then(|| format!("{}", n / 10_000.0))
        }
        _ => None,
    }
}

/// 因子对应的金额单位
pub fn unit_for(factor_name: &str) -> Option<&'static str> {
    match factor_name {
        "营业收入" | "净利润" => Some("亿"),
        "大单净额" | "陆股通净流入" => Some("万"),
        _ => None,
    }
}

/// 规范化区间文案
///
/// 不含数字的文案（如 `亏损`）原样返回；文案单位与因子单位不同时按 1亿 = 10000万 换算，
/// 无法换算的原样返回
pub fn format_range(text: &str, unit: Option<&str>) -> String {
    let text = text.trim();

    if !text.chars().any(|c| c.is_ascii_digit()) {
        return text.to_string();
    }

    let Some(bound) = parse_bound(text) else {
        let unit = unit.unwrap_or("");
        if unit.is_empty() || text.ends_with(unit) {
            return text.to_string();
        }
        return format!("{}{}", text, unit);
    };

    // 无单位因子保留文案自带的单位
    let label_unit = match bound {
        RangeBound::Above(a) | RangeBound::Below(a) => a.unit,
        RangeBound::Between(_, high) => high.unit,
    };
    let unit = unit.or(label_unit).unwrap_or("");
    let suffix = |n: &str| if is_zero(n) { "" } else { unit };

    let formatted = match bound {
        RangeBound::Above(a) => convert(a, unit).map(|n| format!("大于{}{}", n, suffix(&n))),
        RangeBound::Below(a) => convert(a, unit).map(|n| format!("小于{}{}", n, suffix(&n))),
        RangeBound::Between(low, high) => convert(low, unit)
            .zip(convert(high, unit))
            .map(|(low, high)| format!("{}~{}{}", low, high, unit)),
    };
    formatted.unwrap_or_else(|| text.to_string())
}
