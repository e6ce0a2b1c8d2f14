//! 表格排序与分页

use regex::Regex;
use serde_json::Value;
use std::cmp::Ordering;
use std::sync::OnceLock;

use crate::models::{SortOrder, SortSpec, StockRow};

fn leading_float() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").unwrap())
}

/// 取字符串开头的数字部分，如 "12.5亿" -> 12.5
fn parse_leading_float(text: &str) -> Option<f64> {
    leading_float()
        .find(text)
        .and_then(|m| m.as_str().trim().parse::<f64>().ok())
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_leading_float(s),
        _ => None,
    }
}

fn as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// 升序比较两个单元格；缺失值排在最后
fn compare_cells(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());

    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        // 数值在前、文本在后，保证全序
        (Some(a), Some(b)) => match (as_number(a), as_number(b)) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => as_text(a).cmp(&as_text(b)),
        },
    }
}

/// 按列排序（稳定排序）
///
/// 升序时缺失值在末尾，降序时整体反转，缺失值在开头
pub fn sort_rows(rows: &mut [StockRow], sort: &SortSpec) {
    rows.sort_by(|a, b| {
        let ordering = compare_cells(a.get(&sort.prop), b.get(&sort.prop));
        match sort.order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    });
}

/// 一页数据
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
}

/// 分页，页码从 1 开始；超出范围返回空页
pub fn paginate<T>(items: Vec<T>, page: usize, page_size: usize) -> Page<T> {
    let page = page.max(1);
    let page_size = page_size.max(1);
    let total = items.len();
    let start = (page - 1).saturating_mul(page_size);

    let items = items.into_iter().skip(start).take(page_size).collect();
    Page { items, total, page, page_size }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rows(values: Vec<Value>) -> Vec<StockRow> {
        values.into_iter().filter_map(|v| v.as_object().cloned()).collect()
    }

    fn codes(rows: &[StockRow]) -> Vec<&str> {
        rows.iter().map(|r| r["股票代码"].as_str().unwrap()).collect()
    }

    #[test]
    fn test_numeric_sort_with_mixed_types() {
        let mut data = rows(vec![
            json!({"股票代码": "A", "ROE": "12.5"}),
            json!({"股票代码": "B", "ROE": 3}),
            json!({"股票代码": "C"}),
            json!({"股票代码": "D", "ROE": "100%"}),
            json!({"股票代码": "E", "ROE": null}),
        ]);

        let asc = SortSpec { prop: "ROE".into(), order: SortOrder::Ascending };
        sort_rows(&mut data, &asc);
        assert_eq!(codes(&data), vec!["B", "A", "D", "C", "E"]);

        let desc = SortSpec { prop: "ROE".into(), order: SortOrder::Descending };
        sort_rows(&mut data, &desc);
        assert_eq!(&codes(&data)[2..], &["D", "A", "B"]);
        assert!(codes(&data)[..2].contains(&"C"));
    }

    #[test]
    fn test_text_sort() {
        let mut data = rows(vec![
            json!({"股票代码": "600000", "股票简称": "浦发银行"}),
            json!({"股票代码": "000001", "股票简称": "平安银行"}),
            json!({"股票代码": "SZ300750", "股票简称": "宁德时代"}),
        ]);
        sort_rows(&mut data, &SortSpec::by_code());
        // "SZ300750" 无法解析为数字，排在数值之后
        assert_eq!(codes(&data), vec!["000001", "600000", "SZ300750"]);
    }

    #[test]
    fn test_paginate() {
        let page = paginate((1..=45).collect::<Vec<_>>(), 3, 20);
        assert_eq!(page.items, (41..=45).collect::<Vec<_>>());
        assert_eq!(page.total, 45);

        let page = paginate((1..=45).collect::<Vec<_>>(), 0, 20);
        assert_eq!(page.page, 1);
        assert_eq!(page.items.len(), 20);

        let page = paginate((1..=5).collect::<Vec<_>>(), 9, 20);
        assert!(page.items.is_empty());
        assert_eq!(page.total, 5);
    }
}
