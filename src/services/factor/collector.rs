//! 因子收集
//!
//! 将前端筛选条件转换为上游筛选服务约定的因子键（"中文因子名_区间"），
//! 同时记录各类别已选因子、题材列表和特色指标

use crate::models::{is_selected, CollectedFactors, FilterSelection, SelectedFactors};

use super::catalog::backend_token_vocabulary;
use super::mapping::{chinese_name, FactorCategory};
use super::normalize::{format_range, unit_for};

/// 均线取值 -> 上游因子键
fn moving_average_token(value: &str) -> Option<&'static str> {
    match value {
        "多头排列" => Some("均线_多头排列"),
        "均线粘合" => Some("均线_粘合"),
        "股价站上5日线" => Some("股价站上5日线"),
        "股价站上60日线" => Some("均线_股价站上60日线"),
        _ => None,
    }
}

/// 区间类因子（基本面、资金面）
fn collect_ranged(
    category: FactorCategory,
    entries: &[(&'static str, &Option<String>)],
    tokens: &mut Vec<String>,
    selected: &mut Vec<String>,
) {
    for (key, value) in entries {
        if !is_selected(value) {
            continue;
        }
        let (Some(name), Some(value)) = (chinese_name(category, key), value.as_deref()) else {
            continue;
        };
        tokens.push(format!("{}_{}", name, format_range(value, unit_for(name))));
        selected.push(name.to_string());
    }
}

fn collect_technical(selection: &FilterSelection, tokens: &mut Vec<String>, selected: &mut Vec<String>) {
    for (key, value) in selection.technical.entries() {
        if !is_selected(value) {
            continue;
        }
        let (Some(name), Some(value)) = (chinese_name(FactorCategory::Technical, key), value.as_deref()) else {
            continue;
        };
        let value = value.trim();

        if key == "ma" {
            match moving_average_token(value) {
                Some(token) => {
                    tokens.push(token.to_string());
                    selected.push(name.to_string());
                }
                None => log::debug!("忽略未知均线条件: {}", value),
            }
            continue;
        }

        tokens.push(format!("{}_{}", name, value));
        selected.push(name.to_string());
    }
}

/// 收集筛选因子
///
/// 因子按基本面、技术面、资金面分组输出；空值跳过；特色指标单独返回，不并入因子
pub fn collect_factors(selection: &FilterSelection) -> CollectedFactors {
    let mut factors = Vec::new();
    let mut selected = SelectedFactors::default();

    collect_ranged(
        FactorCategory::Fundamental,
        &selection.fundamental.entries(),
        &mut factors,
        &mut selected.fundamental,
    );
    collect_technical(selection, &mut factors, &mut selected.technical);
    collect_ranged(
        FactorCategory::Capital,
        &selection.capital.entries(),
        &mut factors,
        &mut selected.capital,
    );

    let indicator = selection
        .indicator
        .special
        .as_deref()
        .map(str::trim)
        .unwrap_or_default()
        .to_string();

    let themes: Vec<String> = selection
        .hot_concept
        .themes
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();

    let vocabulary = backend_token_vocabulary();
    let unknown_tokens: Vec<String> = factors
        .iter()
        .filter(|t| !vocabulary.contains(t.as_str()))
        .cloned()
        .collect();
    if !unknown_tokens.is_empty() {
        log::warn!("以下因子不在上游因子词表中: {:?}", unknown_tokens);
    }

    CollectedFactors {
        factors,
        selected_factors: selected,
        themes,
        indicator,
        unknown_tokens,
    }
}
