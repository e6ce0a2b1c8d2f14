//! 因子配置目录
//!
//! 提供特色指标选项、因子分类、各因子可选区间，以及上游筛选服务已入库的因子词表

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};
use std::sync::OnceLock;
use thiserror::Error;

use super::mapping::{english_key, FactorCategory};

/// 特色指标选项
pub const INDICATOR_OPTIONS: &[&str] = &["打板", "抄底", "低吸", "追涨", "龙头"];

/// 各因子可选区间（前端展示文案）
const FACTOR_RANGES: &[(&str, &[&str])] = &[
    ("营业收入", &["小于5亿", "5~10亿", "10~20亿", "20~50亿", "50亿以上"]),
    ("市盈率", &["10以下", "10~20", "20~30", "30~40"]),
    ("销售毛利率", &["5以下", "5~20", "20~35", "35~40", "40以上"]),
    ("ROE", &["5以下", "5~10", "10~20", "20以上"]),
    ("净利润", &["亏损", "0~1亿", "1~3亿", "3~5亿", "5亿以上"]),
    ("市净率", &["1以下", "1~1.5", "1.5~2", "2~3", "3以上"]),
    ("资产负债率", &["10以下", "10~15", "15~30", "30以上"]),
    ("MACD", &["金叉", "底背离", "拐头向上", "0轴金叉"]),
    ("KDJ", &["金叉", "底背离", "拐头向上"]),
    ("BOLL", &["突破上轨", "突破下轨", "突破中轨", "开口向上"]),
    ("单k组合", &["大阳线", "小阳星", "向上跳空缺口", "向下跳空", "长下影线", "长上影线"]),
    ("均线", &["多头排列", "均线粘合", "股价站上5日线", "股价站上60日线"]),
    ("大单净量", &["小于0", "0~1", "1~3", "大于3"]),
    ("大单净额", &["小于0", "0~1000万", "1000~5000万", "大于5000万"]),
    ("陆股通净流入", &["小于0", "0~1000万", "1000~5000万", "5000~10000万", "10000万以上"]),
];

/// 上游筛选服务入库的因子键（factor:<键>）
const BACKEND_TOKENS: &[&str] = &[
    // 基本面
    "营业收入_小于5亿", "营业收入_5~10亿", "营业收入_10~20亿", "营业收入_20~50亿", "营业收入_大于50亿",
    "市盈率_小于10", "市盈率_10~20", "市盈率_20~30", "市盈率_30~40", "市盈率_大于40",
    "销售毛利率_小于5", "销售毛利率_5~20", "销售毛利率_20~35", "销售毛利率_35~40", "销售毛利率_大于40",
    "ROE_小于5", "ROE_5~10", "ROE_10~20", "ROE_大于20",
    "净利润_亏损", "净利润_0~1亿", "净利润_1~3亿", "净利润_3~5亿", "净利润_大于5亿",
    "市净率_小于1", "市净率_1~1.5", "市净率_1.5~2", "市净率_2~3", "市净率_大于3",
    "资产负债率_小于10", "资产负债率_10~15", "资产负债率_15~30", "资产负债率_大于30",
    // 技术面
    "MACD_金叉", "MACD_底背离", "MACD_拐头向上", "MACD_0轴金叉",
    "KDJ_金叉", "KDJ_底背离", "KDJ_拐头向上",
    "BOLL_突破上轨", "BOLL_突破下轨", "BOLL_突破中轨", "BOLL_开口向上",
    "单k组合_大阳线", "单k组合_小阳星", "单k组合_向上跳空缺口", "单k组合_向下跳空", "单k组合_长下影线", "单k组合_长上影线",
    "均线_多头排列", "均线_粘合", "股价站上5日线", "均线_股价站上60日线",
    // 资金面
    "陆股通净流入_小于0", "陆股通净流入_0~1000万", "陆股通净流入_1000~5000万", "陆股通净流入_5000~10000万", "陆股通净流入_大于10000万",
    "大单净额_小于0", "大单净额_0~1000万", "大单净额_1000~5000万", "大单净额_大于5000万",
    "大单净量_小于0", "大单净量_0~1", "大单净量_1~3", "大单净量_大于3",
];

/// 上游因子词表
pub fn backend_token_vocabulary() -> &'static HashSet<&'static str> {
    static VOCABULARY: OnceLock<HashSet<&'static str>> = OnceLock::new();
    VOCABULARY.get_or_init(|| BACKEND_TOKENS.iter().copied().collect())
}

/// 因子分类
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FactorCategories {
    pub fundamental: Vec<String>,
    pub technical: Vec<String>,
    pub capital: Vec<String>,
}

/// 因子配置目录
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FactorCatalog {
    pub indicator_options: Vec<String>,
    pub categories: FactorCategories,
    /// 因子中文名 -> 可选区间
    pub ranges: BTreeMap<String, Vec<String>>,
    /// 因子中文名 -> 前端字段键名（legacy 页面使用）
    #[serde(default)]
    pub keys: BTreeMap<String, String>,
}

impl FactorCatalog {
    /// 内置配置
    pub fn builtin() -> Self {
        let names = |category: FactorCategory| -> Vec<String> {
            category.name_map().iter().map(|(_, name)| name.to_string()).collect()
        };

        Self {
            indicator_options: INDICATOR_OPTIONS.iter().map(|s| s.to_string()).collect(),
            categories: FactorCategories {
                fundamental: names(FactorCategory::Fundamental),
                technical: names(FactorCategory::Technical),
                capital: names(FactorCategory::Capital),
            },
            ranges: FACTOR_RANGES
                .iter()
                .map(|(name, options)| {
                    (name.to_string(), options.iter().map(|s| s.to_string()).collect())
                })
                .collect(),
            keys: FACTOR_RANGES
                .iter()
                .filter_map(|(name, _)| english_key(name).map(|(_, key)| (name.to_string(), key.to_string())))
                .collect(),
        }
    }

    /// 空配置
    pub fn empty() -> Self {
        Self::default()
    }

    /// 某个因子的可选区间
    pub fn options_for(&self, name: &str) -> &[String] {
        self.ranges.get(name).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// 配置校验错误
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize)]
pub enum CatalogError {
    #[error("因子配置对象不能为空")]
    Missing,
    #[error("indicator_options 必须是数组类型")]
    IndicatorOptionsNotArray,
    #[error("categories 必须是对象类型")]
    CategoriesNotObject,
    #[error("{0} 必须是数组类型")]
    CategoryNotArray(String),
    #[error("ranges 必须是对象类型")]
    RangesNotObject,
}

/// 配置校验结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogValidation {
    pub valid: bool,
    pub errors: Vec<String>,
}

/// 校验提交的因子配置，返回全部问题
pub fn validate_catalog(value: &Value) -> CatalogValidation {
    let errors = collect_catalog_errors(value);
    CatalogValidation {
        valid: errors.is_empty(),
        errors: errors.iter().map(ToString::to_string).collect(),
    }
}

fn collect_catalog_errors(value: &Value) -> Vec<CatalogError> {
    let obj = match value.as_object() {
        Some(obj) => obj,
        None => return vec![CatalogError::Missing],
    };

    let mut errors = Vec::new();

    if !obj.get("indicator_options").map_or(false, Value::is_array) {
        errors.push(CatalogError::IndicatorOptionsNotArray);
    }

    match obj.get("categories").and_then(Value::as_object) {
        Some(categories) => {
            for category in FactorCategory::ALL {
                if !categories.get(category.key()).map_or(false, Value::is_array) {
                    errors.push(CatalogError::CategoryNotArray(category.key().to_string()));
                }
            }
        }
        None => errors.push(CatalogError::CategoriesNotObject),
    }

    if !obj.get("ranges").map_or(false, Value::is_object) {
        errors.push(CatalogError::RangesNotObject);
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = FactorCatalog::builtin();
        let value = serde_json::to_value(&catalog).unwrap();

        let result = validate_catalog(&value);
        assert!(result.valid, "{:?}", result.errors);
        assert_eq!(catalog.indicator_options.len(), 5);
        assert_eq!(catalog.categories.fundamental.len(), 7);

        // 每个分类因子都有可选区间
        for name in catalog
            .categories
            .fundamental
            .iter()
            .chain(&catalog.categories.technical)
            .chain(&catalog.categories.capital)
        {
            assert!(!catalog.options_for(name).is_empty(), "{} 缺少区间", name);
            assert!(catalog.keys.contains_key(name), "{} 缺少键名", name);
        }
        assert_eq!(catalog.keys.get("均线").map(String::as_str), Some("ma"));
    }

    #[test]
    fn test_validation_reports_every_problem() {
        let result = validate_catalog(&json!({
            "indicator_options": "打板",
            "categories": {"fundamental": [], "technical": {}},
        }));

        assert!(!result.valid);
        assert_eq!(
            result.errors,
            vec![
                "indicator_options 必须是数组类型",
                "technical 必须是数组类型",
                "capital 必须是数组类型",
                "ranges 必须是对象类型",
            ]
        );

        let result = validate_catalog(&Value::Null);
        assert_eq!(result.errors, vec!["因子配置对象不能为空"]);
    }

    #[test]
    fn test_empty_catalog_passes_shape_check() {
        let value = serde_json::to_value(FactorCatalog::empty()).unwrap();
        assert!(validate_catalog(&value).valid);
        assert!(FactorCatalog::empty().options_for("ROE").is_empty());
    }

    #[test]
    fn test_vocabulary_contains_ma_exceptions() {
        let vocab = backend_token_vocabulary();
        assert!(vocab.contains("股价站上5日线"));
        assert!(vocab.contains("均线_粘合"));
        assert!(!vocab.contains("均线_均线粘合"));
    }
}
