//! 因子数值分档
//!
//! 将因子数值归入展示档位，如市净率 1.3 -> "1-2"

/// 分档规则：按上界升序排列，(上界, 档位)，超出最后上界取 overflow
struct BucketRule {
    bounds: &'static [(f64, &'static str)],
    overflow: &'static str,
}

fn rule_for(factor_name: &str) -> Option<BucketRule> {
    let rule = match factor_name {
        "市盈率(TTM)" => BucketRule {
            bounds: &[(10.0, "<10"), (20.0, "10-20"), (30.0, "20-30")],
            overflow: ">30",
        },
        "市净率" => BucketRule {
            bounds: &[(1.0, "<1"), (2.0, "1-2"), (3.0, "2-3")],
            overflow: ">3",
        },
        "毛利率" | "营业收入增长率" | "净利润增长率" => BucketRule {
            bounds: &[(10.0, "<10%"), (20.0, "10-20%"), (30.0, "20-30%")],
            overflow: ">30%",
        },
        "净利率" | "ROE" => BucketRule {
            bounds: &[(5.0, "<5%"), (10.0, "5-10%"), (15.0, "10-15%")],
            overflow: ">15%",
        },
        _ => return None,
    };
    Some(rule)
}

/// 格式化因子数值为展示档位
///
/// 负值统一为"负"；无分档规则的因子保留两位小数
pub fn format_factor_value(factor_name: &str, value: f64) -> String {
    let Some(rule) = rule_for(factor_name) else {
        return format!("{:.2}", value);
    };

    if value < 0.0 {
        return "负".to_string();
    }
    rule.bounds
        .iter()
        .find(|(upper, _)| value < *upper)
        .map(|(_, label)| label.to_string())
        .unwrap_or_else(|| rule.overflow.to_string())
}
