//! 因子中英文键名映射
//!
//! 英文键名为前端表单字段，中文名为上游筛选服务使用的因子名

/// 因子类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FactorCategory {
    Fundamental,
    Technical,
    Capital,
}

impl FactorCategory {
    pub const ALL: [FactorCategory; 3] = [
        FactorCategory::Fundamental,
        FactorCategory::Technical,
        FactorCategory::Capital,
    ];

    /// 类别键名
    pub fn key(&self) -> &'static str {
        match self {
            FactorCategory::Fundamental => "fundamental",
            FactorCategory::Technical => "technical",
            FactorCategory::Capital => "capital",
        }
    }

    /// 该类别的 (英文键名, 中文名) 映射，按展示顺序
    pub fn name_map(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            FactorCategory::Fundamental => FUNDAMENTAL_NAME_MAP,
            FactorCategory::Technical => TECHNICAL_NAME_MAP,
            FactorCategory::Capital => CAPITAL_NAME_MAP,
        }
    }
}

/// 基本面因子
pub const FUNDAMENTAL_NAME_MAP: &[(&str, &str)] = &[
    ("revenue", "营业收入"),
    ("pe", "市盈率"),
    ("grossMargin", "销售毛利率"),
    ("roe", "ROE"),
    ("netProfit", "净利润"),
    ("pb", "市净率"),
    ("debtRatio", "资产负债率"),
];

/// 技术面因子
pub const TECHNICAL_NAME_MAP: &[(&str, &str)] = &[
    ("macd", "MACD"),
    ("kdj", "KDJ"),
    ("boll", "BOLL"),
    ("kPattern", "单k组合"),
    ("ma", "均线"),
];

/// 资金面因子
pub const CAPITAL_NAME_MAP: &[(&str, &str)] = &[
    ("bigOrderNet", "大单净量"),
    ("bigOrderAmount", "大单净额"),
    ("hkConnect", "陆股通净流入"),
];

/// 英文键名 -> 中文名
pub fn chinese_name(category: FactorCategory, key: &str) -> Option<&'static str> {
    category
        .name_map()
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, name)| *name)
}

/// 中文名 -> (类别, 英文键名)
pub fn english_key(name: &str) -> Option<(FactorCategory, &'static str)> {
    FactorCategory::ALL.iter().find_map(|category| {
        category
            .name_map()
            .iter()
            .find(|(_, n)| *n == name)
            .map(|(k, _)| (*category, *k))
    })
}
