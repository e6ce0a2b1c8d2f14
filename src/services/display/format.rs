//! 数值展示格式

use serde_json::{Map, Value};

use crate::models::StockRow;

/// 单元格转数值；空值、空串及非数字返回 None
pub fn cell_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) if !s.trim().is_empty() => s.trim().parse::<f64>().ok().filter(|n| !n.is_nan()),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

fn with_number(value: &Value, f: impl FnOnce(f64) -> String) -> String {
    cell_number(value).map(f).unwrap_or_else(|| "-".to_string())
}

/// 价格：¥12.30
pub fn format_price(value: &Value) -> String {
    with_number(value, |v| format!("¥{:.2}", v))
}

/// 涨跌额：正数带 +
pub fn format_change(value: &Value) -> String {
    with_number(value, |v| if v > 0.0 { format!("+{:.2}", v) } else { format!("{:.2}", v) })
}

/// 百分比：12.30%
pub fn format_percent(value: &Value) -> String {
    with_number(value, |v| format!("{:.2}%", v))
}

/// 涨跌幅：正数带 +
pub fn format_signed_percent(value: &Value) -> String {
    with_number(value, |v| if v > 0.0 { format!("+{:.2}%", v) } else { format!("{:.2}%", v) })
}

pub fn format_number(value: &Value) -> String {
    with_number(value, |v| format!("{:.2}", v))
}

/// 元转亿元
pub fn format_yi_yuan(value: &Value) -> String {
    with_number(value, |v| format!("{:.2}亿", v / 100_000_000.0))
}

/// 涨跌颜色
pub fn price_class(change: f64) -> &'static str {
    if change > 0.0 {
        "price-up"
    } else if change < 0.0 {
        "price-down"
    } else {
        "price-neutral"
    }
}

/// 按列名格式化单元格；未登记的列原样输出文本
pub fn format_cell(column: &str, value: &Value) -> Value {
    let text = match column {
        // 金额列上游以元为单位
        "营业收入" | "净利润" | "大单净额" | "陆股通净流入" | "总市值" | "流通市值" => format_yi_yuan(value),
        "销售毛利率" | "资产负债率" | "ROE" => format_percent(value),
        "市净率" | "市盈率" | "大单净量" => format_number(value),
        "涨跌幅" => format_signed_percent(value),
        "涨跌额" => format_change(value),
        "最新价" => format_price(value),
        _ => return value.clone(),
    };
    Value::String(text)
}

/// 涨跌颜色列名
pub const PRICE_CLASS_COLUMN: &str = "_priceClass";

/// 生成展示行；含涨跌幅时附带涨跌颜色
pub fn format_row(row: &StockRow) -> Map<String, Value> {
    let mut out: Map<String, Value> = row
        .iter()
        .map(|(column, value)| (column.clone(), format_cell(column, value)))
        .collect();

    if let Some(change) = row.get("涨跌幅").and_then(cell_number) {
        out.insert(PRICE_CLASS_COLUMN.to_string(), Value::String(price_class(change).to_string()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_formatters() {
        assert_eq!(format_price(&json!(12.3)), "¥12.30");
        assert_eq!(format_price(&json!("8")), "¥8.00");
        assert_eq!(format_change(&json!(1.234)), "+1.23");
        assert_eq!(format_change(&json!(-0.5)), "-0.50");
        assert_eq!(format_change(&json!(0)), "0.00");
        assert_eq!(format_percent(&json!(35.456)), "35.46%");
        assert_eq!(format_signed_percent(&json!(2)), "+2.00%");
        assert_eq!(format_signed_percent(&json!(-2)), "-2.00%");
        assert_eq!(format_number(&json!("15.678")), "15.68");
        assert_eq!(format_yi_yuan(&json!(1_234_000_000.0)), "12.34亿");
    }

    #[test]
    fn test_missing_values() {
        for value in [Value::Null, json!(""), json!("  "), json!("abc"), json!([1])] {
            assert_eq!(format_price(&value), "-");
            assert_eq!(format_percent(&value), "-");
        }
    }

    #[test]
    fn test_price_class() {
        assert_eq!(price_class(0.1), "price-up");
        assert_eq!(price_class(-0.1), "price-down");
        assert_eq!(price_class(0.0), "price-neutral");
    }

    #[test]
    fn test_format_row() {
        let row = json!({
            "股票代码": "600519",
            "营业收入": 150_560_000_000.0,
            "净利润": -320_000_000.0,
            "大单净额": "-32000000",
            "ROE": 30.1,
            "市盈率": null,
            "所属题材": "白酒"
        });
        let out = format_row(row.as_object().unwrap());
        assert_eq!(out["股票代码"], "600519");
        assert_eq!(out["营业收入"], "1505.60亿");
        assert_eq!(out["净利润"], "-3.20亿");
        assert_eq!(out["大单净额"], "-0.32亿");
        assert_eq!(out["ROE"], "30.10%");
        assert_eq!(out["市盈率"], "-");
        assert_eq!(out["所属题材"], "白酒");
        assert!(out.get(PRICE_CLASS_COLUMN).is_none());

        let out = format_row(json!({"涨跌幅": "-1.5"}).as_object().unwrap());
        assert_eq!(out["涨跌幅"], "-1.50%");
        assert_eq!(out[PRICE_CLASS_COLUMN], "price-down");
    }
}
