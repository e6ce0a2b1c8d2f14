//! 个股悬浮提示

use serde_json::Value;

use crate::models::StockTooltip;

pub const EMPTY_TOOLTIP: &str = "暂无详细信息";

const LATEST_THEME_KEYS: &[&str] = &["latest_theme", "latestTheme", "theme"];
const FLUCTUATION_THEME_KEYS: &[&str] = &["recent_fluctuation_theme", "recentFluctuationTheme", "fluctuation_theme"];

fn first_text(detail: &Value, keys: &[&str]) -> String {
    keys.iter()
        .filter_map(|key| detail.get(*key))
        .find_map(|value| match value {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .unwrap_or_default()
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// 由个股详情生成提示：最新题材、空行、近期异动题材
pub fn render_tooltip(detail: Option<&Value>) -> StockTooltip {
    let detail = detail.filter(|d| d.as_object().map_or(false, |obj| !obj.is_empty()));
    let Some(detail) = detail else {
        return StockTooltip {
            latest_theme: String::new(),
            recent_fluctuation_theme: String::new(),
            lines: vec![EMPTY_TOOLTIP.to_string()],
            html: EMPTY_TOOLTIP.to_string(),
        };
    };

    let latest_theme = first_text(detail, LATEST_THEME_KEYS);
    let recent_fluctuation_theme = first_text(detail, FLUCTUATION_THEME_KEYS);

    let mut lines = Vec::new();
    if !latest_theme.is_empty() {
        lines.push(latest_theme.clone());
        lines.push(String::new());
    }
    if !recent_fluctuation_theme.is_empty() {
        lines.push(recent_fluctuation_theme.clone());
    }
    if lines.is_empty() {
        lines.push(EMPTY_TOOLTIP.to_string());
    }

    // 题材文本内的换行同样渲染为 <br>
    let html = lines
        .iter()
        .map(|line| escape_html(line).replace("\r\n", "<br>").replace('\n', "<br>"))
        .collect::<Vec<_>>()
        .join("<br>");
    StockTooltip { latest_theme, recent_fluctuation_theme, lines, html }
}
