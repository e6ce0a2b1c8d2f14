//! 股票筛选结果数据模型
//!
//! 上游返回的股票行字段不固定（随所选因子变化），统一以 JSON 对象表示

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::filter::{CollectedFactors, FilterSelection};

/// 股票行：列名 -> 值，保持上游字段顺序
pub type StockRow = Map<String, Value>;

/// 默认每页条数
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// 排序方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// 排序条件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortSpec {
    /// 排序列名
    pub prop: String,
    pub order: SortOrder,
}

impl SortSpec {
    /// 默认排序：股票代码升序
    pub fn by_code() -> Self {
        Self {
            prop: "股票代码".to_string(),
            order: SortOrder::Ascending,
        }
    }
}

/// 选股请求
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenRequest {
    #[serde(default)]
    pub filters: FilterSelection,
    /// 页码，从 1 开始
    pub page: Option<usize>,
    pub page_size: Option<usize>,
    pub sort: Option<SortSpec>,
    /// 是否附带格式化后的展示行
    #[serde(default)]
    pub formatted: bool,
    /// 数字字符串转换为数值
    #[serde(default)]
    pub coerce_numbers: bool,
    /// 股票代码补充交易所前缀（SH/SZ）
    #[serde(default)]
    pub add_code_prefix: bool,
}

/// 表格模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableMode {
    /// 含题材的查询
    Theme,
    /// 因子或特色指标查询
    Data,
}

/// 选股结果
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenResult {
    /// 实际调用的上游接口类型
    pub route: String,
    pub mode: TableMode,
    /// 有序列名
    pub columns: Vec<String>,
    /// 结果总数（分页前）
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub rows: Vec<StockRow>,
    /// 展示用格式化行（仅在请求 formatted 时返回）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_rows: Option<Vec<Map<String, Value>>>,
    /// 是否展示时间筛选
    pub show_time_filter: bool,
    /// 是否命中查询缓存
    pub cached: bool,
    pub collected: CollectedFactors,
}

/// 悬浮提示内容
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockTooltip {
    pub latest_theme: String,
    pub recent_fluctuation_theme: String,
    pub lines: Vec<String>,
    pub html: String,
}

/// 个股详情
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockDetail {
    pub code: String,
    pub detail: Value,
    pub tooltip: StockTooltip,
}

/// 个股跳转链接
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockLinks {
    pub code: String,
    pub code_link: String,
    pub analysis_url: String,
    pub tree_id_url: String,
    pub route_path: String,
    /// 客户端为通达信桌面浏览器时应跳转 tree_id_url
    pub open_in_tdx: bool,
}

/// 个股链接查询参数
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LinkQuery {
    pub tdx: Option<String>,
}
