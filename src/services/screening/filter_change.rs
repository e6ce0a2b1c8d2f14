//! 筛选条件变化处理
//!
//! 特色指标单独选择时走静态数据；与题材/因子组合时走常规搜索

use serde::Serialize;

use crate::models::{is_selected, FilterChange, FilterSelection, SortSpec};

/// 条件变化后的处理方式
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum FilterChangeOutcome {
    /// 取消特色指标：清空结果
    ClearIndicator,
    /// 仅选择了特色指标：查询静态指标数据
    StaticIndicator { indicator: String },
    /// 全部条件被清空：清空结果并恢复默认排序
    ClearAll { sort: SortSpec },
    /// 常规搜索
    Search { filters: FilterSelection },
}

fn is_indicator_change(change: &FilterChange) -> bool {
    change.category == "indicator" && change.condition == "special"
}

/// 处理筛选条件变化
pub fn process_filter_change(change: &FilterChange) -> FilterChangeOutcome {
    let all = &change.all_filters;

    if is_indicator_change(change) {
        if !is_selected(&change.value) {
            return FilterChangeOutcome::ClearIndicator;
        }

        let has_other = all.has_theme_selection() || all.has_factor_selection();
        if !has_other {
            let indicator = change.value.as_deref().unwrap_or_default().trim().to_string();
            return FilterChangeOutcome::StaticIndicator { indicator };
        }
    }

    if all.is_blank() {
        return FilterChangeOutcome::ClearAll { sort: SortSpec::by_code() };
    }

    FilterChangeOutcome::Search { filters: all.clone() }
}
