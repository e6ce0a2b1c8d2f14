//! 查询路由
//!
//! 根据收集到的因子、题材和特色指标选择上游筛选接口

use serde_json::{json, Value};

use crate::models::CollectedFactors;

/// 上游筛选接口
#[derive(Debug, Clone, PartialEq)]
pub enum FilterRoute {
    /// 题材/因子 + 特色指标交集
    ThemesFactorsZhibiao {
        themes: Vec<String>,
        factors: Vec<String>,
        zhibiao: String,
    },
    /// 题材与因子交集
    ThemesAndFactors {
        themes: Vec<String>,
        factors: Vec<String>,
    },
    Themes { themes: Vec<String> },
    Factors { factors: Vec<String> },
    /// 仅特色指标（静态数据）
    Zhibiao { zhibiao: String },
    /// 无任何条件
    Empty,
}

impl FilterRoute {
    /// 选择上游接口
    pub fn plan(collected: &CollectedFactors) -> Self {
        let themes = collected.themes.clone();
        let factors = collected.factors.clone();
        let zhibiao = collected.indicator.clone();

        let has_themes = !themes.is_empty();
        let has_factors = !factors.is_empty();
        let has_zhibiao = !zhibiao.is_empty();

        match (has_themes, has_factors, has_zhibiao) {
            (true, _, true) | (_, true, true) => FilterRoute::ThemesFactorsZhibiao { themes, factors, zhibiao },
            (true, true, false) => FilterRoute::ThemesAndFactors { themes, factors },
            (true, false, false) => FilterRoute::Themes { themes },
            (false, true, false) => FilterRoute::Factors { factors },
            (false, false, true) => FilterRoute::Zhibiao { zhibiao },
            (false, false, false) => FilterRoute::Empty,
        }
    }

    /// 接口类型名
    pub fn kind(&self) -> &'static str {
        match self {
            FilterRoute::ThemesFactorsZhibiao { .. } => "themes_factors_zhibiao",
            FilterRoute::ThemesAndFactors { .. } => "multi_theme_factor",
            FilterRoute::Themes { .. } => "themes",
            FilterRoute::Factors { .. } => "factors",
            FilterRoute::Zhibiao { .. } => "zhibiao",
            FilterRoute::Empty => "empty",
        }
    }

    /// 上游接口路径
    pub fn path(&self) -> Option<&'static str> {
        match self {
            FilterRoute::ThemesFactorsZhibiao { .. } => Some("/stock/filter/themes-factors-zhibiao"),
            FilterRoute::ThemesAndFactors { .. } => Some("/stock/filter/themes-and-factors"),
            FilterRoute::Themes { .. } => Some("/stock/filter/themes"),
            FilterRoute::Factors { .. } => Some("/stock/filter/factors"),
            FilterRoute::Zhibiao { .. } => Some("/stock/filter/zhibiao"),
            FilterRoute::Empty => None,
        }
    }

    /// 请求体
    pub fn payload(&self) -> Value {
        match self {
            FilterRoute::ThemesFactorsZhibiao { themes, factors, zhibiao } => {
                json!({ "themes": themes, "factors": factors, "zhibiao": zhibiao })
            }
            FilterRoute::ThemesAndFactors { themes, factors } => json!({ "themes": themes, "factors": factors }),
            FilterRoute::Themes { themes } => json!({ "themes": themes }),
            FilterRoute::Factors { factors } => json!({ "factors": factors }),
            FilterRoute::Zhibiao { zhibiao } => json!({ "zhibiao": zhibiao }),
            FilterRoute::Empty => Value::Null,
        }
    }

    /// 查询缓存键；特色指标静态数据和空查询不缓存
    pub fn cache_key(&self) -> Option<String> {
        match self {
            FilterRoute::Zhibiao { .. } | FilterRoute::Empty => None,
            _ => Some(format!("{}:{}", self.kind(), self.payload())),
        }
    }

    /// 是否包含题材（决定表格模式）
    pub fn has_themes(&self) -> bool {
        match self {
            FilterRoute::ThemesFactorsZhibiao { themes, .. } => !themes.is_empty(),
            FilterRoute::ThemesAndFactors { .. } | FilterRoute::Themes { .. } => true,
            _ => false,
        }
    }
}
