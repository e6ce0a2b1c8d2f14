//! 选股服务
//!
//! 收集因子 -> 选择上游接口 -> 查询（带缓存）-> 整理股票行 -> 排序分页

use anyhow::Result;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::models::{
    FilterChange, FilterSelection, ScreenRequest, ScreenResult, SortSpec, StockDetail, StockRow, TableMode,
    DEFAULT_PAGE_SIZE,
};
use crate::services::display::{format_row, render_tooltip};
use crate::services::factor::collect_factors;
use crate::services::query_cache::QueryCache;
use crate::services::screening::{
    extract_rows, order_columns, paginate, process_filter_change, process_stock_data, sort_rows,
    FilterChangeOutcome, FilterRoute, RowOptions, DEFAULT_CODE_COLUMNS,
};
use crate::services::upstream::FilterBackend;

const THEME_LIST_CACHE_KEY: &str = "theme_list";

/// 条件变化处理结果
#[derive(Debug, Clone, Serialize)]
pub struct FilterChangeResult {
    pub outcome: FilterChangeOutcome,
    /// 需要查询时的结果
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ScreenResult>,
}

pub struct Screener {
    backend: Arc<dyn FilterBackend>,
    cache: QueryCache,
}

impl Screener {
    pub fn new(backend: Arc<dyn FilterBackend>, cache: QueryCache) -> Self {
        Self { backend, cache }
    }

    /// 选股查询
    pub async fn screen(&self, request: &ScreenRequest) -> Result<ScreenResult> {
        let collected = collect_factors(&request.filters);
        let route = FilterRoute::plan(&collected);
        log::info!(
            "选股查询: route={}, 因子 {} 个, 题材 {} 个, 特色指标 {:?}",
            route.kind(),
            collected.factors.len(),
            collected.themes.len(),
            collected.indicator
        );

        let (response, cached) = self.query(&route).await?;

        let options = RowOptions {
            coerce_numbers: request.coerce_numbers,
            add_code_prefix: request.add_code_prefix,
        };
        let mut rows = process_stock_data(extract_rows(response), options);

        let mode = if route.has_themes() { TableMode::Theme } else { TableMode::Data };
        let columns = table_columns(&rows, mode);

        let sort = request.sort.clone().unwrap_or_else(SortSpec::by_code);
        sort_rows(&mut rows, &sort);

        let page = paginate(
            rows,
            request.page.unwrap_or(1),
            request.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        );
        let display_rows = request
            .formatted
            .then(|| page.items.iter().map(format_row).collect());

        Ok(ScreenResult {
            route: route.kind().to_string(),
            mode,
            columns,
            total: page.total,
            page: page.page,
            page_size: page.page_size,
            rows: page.items,
            display_rows,
            show_time_filter: mode == TableMode::Theme,
            cached,
            collected,
        })
    }

    /// 查询上游；返回 (响应, 是否命中缓存)
    async fn query(&self, route: &FilterRoute) -> Result<(Value, bool)> {
        if route.path().is_none() {
            return Ok((Value::Null, false));
        }

        let key = route.cache_key();
        if let Some(hit) = key.as_deref().and_then(|k| self.cache.get(k)) {
            log::debug!("命中查询缓存: {}", route.kind());
            return Ok((hit, true));
        }

        let response = self.backend.filter(route).await?;
        if let Some(key) = key {
            self.cache.insert(key, response.clone());
        }
        Ok((response, false))
    }

    /// 筛选条件变化
    pub async fn filter_change(&self, change: &FilterChange) -> Result<FilterChangeResult> {
        let outcome = process_filter_change(change);

        let filters = match &outcome {
            FilterChangeOutcome::StaticIndicator { indicator } => {
                let mut filters = FilterSelection::default();
                filters.indicator.special = Some(indicator.clone());
                Some(filters)
            }
            FilterChangeOutcome::Search { filters } => Some(filters.clone()),
            FilterChangeOutcome::ClearIndicator | FilterChangeOutcome::ClearAll { .. } => None,
        };

        let result = match filters {
            Some(filters) => {
                let request = ScreenRequest { filters, ..Default::default() };
                Some(self.screen(&request).await?)
            }
            None => None,
        };

        Ok(FilterChangeResult { outcome, result })
    }

    /// 个股详情与悬浮提示
    pub async fn stock_detail(&self, code: &str) -> Result<StockDetail> {
        let detail = self.backend.stock_detail(code).await?;
        let tooltip = render_tooltip(Some(&detail));
        Ok(StockDetail { code: code.to_string(), detail, tooltip })
    }

    /// 题材列表（带缓存）
    pub async fn themes(&self) -> Result<Vec<String>> {
        if let Some(Value::Array(items)) = self.cache.get(THEME_LIST_CACHE_KEY) {
            return Ok(items.iter().filter_map(Value::as_str).map(str::to_string).collect());
        }

        let themes = self.backend.theme_list().await?;
        self.cache.insert(THEME_LIST_CACHE_KEY.to_string(), json!(themes));
        Ok(themes)
    }
}

/// 表格列：各行字段按首次出现顺序合并；数据模式无结果时使用默认列
fn table_columns(rows: &[StockRow], mode: TableMode) -> Vec<String> {
    if rows.is_empty() {
        return match mode {
            TableMode::Data => DEFAULT_CODE_COLUMNS.iter().map(|c| c.to_string()).collect(),
            TableMode::Theme => Vec::new(),
        };
    }

    let mut seen: Vec<&str> = Vec::new();
    for row in rows {
        for key in row.keys() {
            if !seen.contains(&key.as_str()) {
                seen.push(key.as_str());
            }
        }
    }
    order_columns(&seen)
}
