//! 筛选条件数据模型
//!
//! 前端提交的筛选条件按类别分组，字段名沿用前端约定（camelCase）

use serde::{Deserialize, Serialize};

/// 基本面筛选
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundamentalSelection {
    /// 营业收入
    pub revenue: Option<String>,
    /// 市盈率
    pub pe: Option<String>,
    /// 销售毛利率
    pub gross_margin: Option<String>,
    /// ROE
    pub roe: Option<String>,
    /// 净利润
    pub net_profit: Option<String>,
    /// 市净率
    pub pb: Option<String>,
    /// 资产负债率
    pub debt_ratio: Option<String>,
}

/// 技术面筛选
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalSelection {
    pub macd: Option<String>,
    pub kdj: Option<String>,
    pub boll: Option<String>,
    /// 单k组合
    pub k_pattern: Option<String>,
    /// 均线
    pub ma: Option<String>,
}

/// 资金面筛选
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapitalSelection {
    /// 大单净量
    pub big_order_net: Option<String>,
    /// 大单净额
    pub big_order_amount: Option<String>,
    /// 陆股通净流入
    pub hk_connect: Option<String>,
}

/// 特色指标（单选）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSelection {
    pub special: Option<String>,
}

/// 热门概念（题材多选）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HotConceptSelection {
    #[serde(default)]
    pub themes: Vec<String>,
}

/// 全部筛选条件
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSelection {
    #[serde(default)]
    pub fundamental: FundamentalSelection,
    #[serde(default)]
    pub technical: TechnicalSelection,
    #[serde(default)]
    pub capital: CapitalSelection,
    #[serde(default)]
    pub indicator: IndicatorSelection,
    #[serde(default)]
    pub hot_concept: HotConceptSelection,
}

/// 取值是否为有效选择（非空白）
pub fn is_selected(value: &Option<String>) -> bool {
    value.as_deref().map_or(false, |v| !v.trim().is_empty())
}

impl FundamentalSelection {
    /// 按固定顺序返回 (英文键名, 取值)
    pub fn entries(&self) -> [(&'static str, &Option<String>); 7] {
        [
            ("revenue", &self.revenue),
            ("pe", &self.pe),
            ("grossMargin", &self.gross_margin),
            ("roe", &self.roe),
            ("netProfit", &self.net_profit),
            ("pb", &self.pb),
            ("debtRatio", &self.debt_ratio),
        ]
    }
}

impl TechnicalSelection {
    pub fn entries(&self) -> [(&'static str, &Option<String>); 5] {
        [
            ("macd", &self.macd),
            ("kdj", &self.kdj),
            ("boll", &self.boll),
            ("kPattern", &self.k_pattern),
            ("ma", &self.ma),
        ]
    }
}

impl CapitalSelection {
    pub fn entries(&self) -> [(&'static str, &Option<String>); 3] {
        [
            ("bigOrderNet", &self.big_order_net),
            ("bigOrderAmount", &self.big_order_amount),
            ("hkConnect", &self.hk_connect),
        ]
    }
}

impl FilterSelection {
    /// 是否选择了任意因子（不含题材和特色指标）
    pub fn has_factor_selection(&self) -> bool {
        self.fundamental.entries().iter().any(|(_, v)| is_selected(v))
            || self.technical.entries().iter().any(|(_, v)| is_selected(v))
            || self.capital.entries().iter().any(|(_, v)| is_selected(v))
    }

    /// 是否选择了任意题材
    pub fn has_theme_selection(&self) -> bool {
        self.hot_concept.themes.iter().any(|t| !t.trim().is_empty())
    }

    /// 全部条件为空
    pub fn is_blank(&self) -> bool {
        !self.has_factor_selection()
            && !self.has_theme_selection()
            && !is_selected(&self.indicator.special)
    }
}

/// 已选因子名称（按类别）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectedFactors {
    pub fundamental: Vec<String>,
    pub technical: Vec<String>,
    pub capital: Vec<String>,
}

/// 因子收集结果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectedFactors {
    /// 后端查询因子，形如 "营业收入_大于50亿"
    pub factors: Vec<String>,
    pub selected_factors: SelectedFactors,
    pub themes: Vec<String>,
    /// 特色指标，不并入因子
    pub indicator: String,
    /// 不在上游因子词表中的因子（仅用于诊断）
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unknown_tokens: Vec<String>,
}

/// 单次筛选条件变化
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterChange {
    /// 变化所在类别，如 indicator / fundamental
    #[serde(default)]
    pub category: String,
    /// 变化的条件键，如 special / revenue
    #[serde(default)]
    pub condition: String,
    /// 新取值
    pub value: Option<String>,
    /// 变化后的全部条件
    #[serde(default)]
    pub all_filters: FilterSelection,
}
