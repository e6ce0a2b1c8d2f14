//! 上游响应整理
//!
//! 上游可能返回数组、{stocks: [...]}、{data: [...]} 或 "代码 -> 字段" 的对象，
//! 统一整理为以 `股票代码` 开头的股票行

use regex::Regex;
use serde_json::{Map, Number, Value};
use std::sync::OnceLock;

use crate::models::StockRow;

pub const CODE_COLUMN: &str = "股票代码";
pub const NAME_COLUMN: &str = "股票简称";

/// 数据模式下无结果时的默认列
pub const DEFAULT_CODE_COLUMNS: &[&str] = &[
    "code",
    "股票简称",
    "净利润",
    "营业收入",
    "销售毛利率",
    "资产负债率",
    "ROE",
    "市净率",
    "市盈率",
    "大单净量",
    "大单净额",
];

fn six_digit_code() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{6}$").unwrap())
}

/// 股票行整理选项
#[derive(Debug, Clone, Copy, Default)]
pub struct RowOptions {
    /// 数字字符串转换为数值
    pub coerce_numbers: bool,
    /// 六位代码补交易所前缀：6 开头为 SH，其余为 SZ
    pub add_code_prefix: bool,
}

/// 从上游响应中取出股票行
pub fn extract_rows(response: Value) -> Vec<StockRow> {
    let raw = match response {
        Value::Object(mut obj) if obj.contains_key("data") => obj.remove("data").unwrap_or(Value::Null),
        other => other,
    };

    match raw {
        Value::Array(items) => objects_only(items),
        Value::Object(mut obj) => {
            if let Some(Value::Array(items)) = obj.get("stocks") {
                return objects_only(items.clone());
            }
            if let Some(Value::Array(_)) = obj.get("data") {
                if let Some(Value::Array(items)) = obj.remove("data") {
                    return objects_only(items);
                }
            }
            rows_from_code_map(obj)
        }
        _ => Vec::new(),
    }
}

fn objects_only(items: Vec<Value>) -> Vec<StockRow> {
    items
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(row) => Some(row),
            _ => None,
        })
        .collect()
}

/// "代码 -> 字段" 对象转换为股票行
fn rows_from_code_map(map: Map<String, Value>) -> Vec<StockRow> {
    map.into_iter()
        .filter_map(|(code, data)| match data {
            Value::Object(fields) => {
                let name = fields
                    .get("name")
                    .or_else(|| fields.get(NAME_COLUMN))
                    .and_then(Value::as_str)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("股票{}", code));

                let mut row = Map::new();
                row.insert(CODE_COLUMN.to_string(), Value::String(code));
                row.insert(NAME_COLUMN.to_string(), Value::String(name));
                for (key, value) in fields {
                    if key == NAME_COLUMN && value.as_str().map_or(true, str::is_empty) {
                        continue;
                    }
                    row.insert(key, value);
                }
                Some(row)
            }
            _ if six_digit_code().is_match(&code) => {
                let name = format!("股票{}", code);
                let mut row = Map::new();
                row.insert(CODE_COLUMN.to_string(), Value::String(code));
                row.insert(NAME_COLUMN.to_string(), Value::String(name));
                Some(row)
            }
            _ => None,
        })
        .collect()
}

fn value_as_code(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn coerce_number(value: Value) -> Value {
    match &value {
        Value::String(s) if !s.trim().is_empty() => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .and_then(Number::from_f64)
            .map(Value::Number)
            .unwrap_or(value),
        _ => value,
    }
}

fn with_exchange_prefix(code: String) -> String {
    if six_digit_code().is_match(&code) {
        let prefix = if code.starts_with('6') { "SH" } else { "SZ" };
        format!("{}{}", prefix, code)
    } else {
        code
    }
}

/// 统一股票行字段：`股票代码` 置首，去掉 `code` 和 `con_code`
pub fn process_stock_data(rows: Vec<StockRow>, options: RowOptions) -> Vec<StockRow> {
    rows.into_iter()
        .map(|row| {
            let code = value_as_code(row.get("code"))
                .or_else(|| value_as_code(row.get(CODE_COLUMN)))
                .unwrap_or_default();
            let code = if options.add_code_prefix { with_exchange_prefix(code) } else { code };

            let mut out = Map::new();
            out.insert(CODE_COLUMN.to_string(), Value::String(code));
            for (key, value) in row {
                if key == "code" || key == "con_code" || key == CODE_COLUMN {
                    continue;
                }
                let value = if options.coerce_numbers { coerce_number(value) } else { value };
                out.insert(key, value);
            }
            out
        })
        .collect()
}

/// 固定列顺序：股票代码、股票简称在前，其余保持原顺序
pub fn order_columns<S: AsRef<str>>(columns: &[S]) -> Vec<String> {
    let has = |name: &str| columns.iter().any(|c| c.as_ref() == name);

    let mut ordered = Vec::with_capacity(columns.len());
    for pinned in [CODE_COLUMN, NAME_COLUMN] {
        if has(pinned) {
            ordered.push(pinned.to_string());
        }
    }
    ordered.extend(
        columns
            .iter()
            .map(|c| c.as_ref())
            .filter(|c| *c != CODE_COLUMN && *c != NAME_COLUMN)
            .map(str::to_string),
    );
    ordered
}
