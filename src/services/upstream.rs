//! 上游筛选服务客户端
//!
//! 上游接口统一以 JSON POST 调用，成功时返回 `{code: 200, data: ...}`，
//! 失败时返回非 2xx 状态并在 `error` 字段给出原因

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;

use crate::config::UpstreamConfig;
use crate::services::screening::FilterRoute;

pub const THEME_LIST_PATH: &str = "/theme/list";
pub const STOCK_DETAIL_PATH: &str = "/stock/filter/detail";

/// 上游调用错误
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("上游服务返回 {status}: {message}")]
    Status { status: u16, message: String },

    #[error("请求上游服务失败: {0}")]
    Request(#[from] reqwest::Error),

    #[error("上游响应格式错误: {0}")]
    Format(String),
}

/// 筛选数据来源
#[async_trait]
pub trait FilterBackend: Send + Sync {
    /// 按路由查询，返回上游原始响应
    async fn filter(&self, route: &FilterRoute) -> Result<Value>;

    /// 个股详情（已去掉 `{code, data}` 外层）
    async fn stock_detail(&self, code: &str) -> Result<Value>;

    /// 全部题材
    async fn theme_list(&self) -> Result<Vec<String>>;
}

/// 基于 HTTP 的上游客户端
pub struct HttpFilterBackend {
    client: Client,
    base_url: String,
}

impl HttpFilterBackend {
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn read_json(response: reqwest::Response) -> Result<Value, UpstreamError> {
        let status = response.status();
        let body: Value = match response.json().await {
            Ok(body) => body,
            Err(e) if status.is_success() => return Err(UpstreamError::Request(e)),
            Err(_) => Value::Null,
        };

        if !status.is_success() {
            let message = body
                .get("error")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("未知错误").to_string());
            return Err(UpstreamError::Status { status: status.as_u16(), message });
        }
        Ok(body)
    }

    async fn post_json(&self, path: &str, payload: &Value) -> Result<Value, UpstreamError> {
        let url = self.url(path);
        log::debug!("请求上游接口: {} {}", url, payload);

        let response = self.client.post(&url).json(payload).send().await?;
        Self::read_json(response).await
    }
}

#[async_trait]
impl FilterBackend for HttpFilterBackend {
    async fn filter(&self, route: &FilterRoute) -> Result<Value> {
        let path = route
            .path()
            .ok_or_else(|| UpstreamError::Format("空查询没有对应的上游接口".to_string()))?;
        Ok(self.post_json(path, &route.payload()).await?)
    }

    async fn stock_detail(&self, code: &str) -> Result<Value> {
        let body = self.post_json(STOCK_DETAIL_PATH, &json!({ "code": code })).await?;
        match body {
            Value::Object(mut obj) if obj.contains_key("data") => Ok(obj.remove("data").unwrap_or(Value::Null)),
            other => Ok(other),
        }
    }

    async fn theme_list(&self) -> Result<Vec<String>> {
        let url = self.url(THEME_LIST_PATH);
        log::debug!("请求题材列表: {}", url);

        let response = self.client.get(&url).send().await.map_err(UpstreamError::from)?;
        let body = Self::read_json(response).await?;
        Ok(parse_theme_list(&body)?)
    }
}

/// 题材列表：`{themes: [...]}`、`{data: [...]}` 或直接数组
fn parse_theme_list(body: &Value) -> Result<Vec<String>, UpstreamError> {
    let items = body
        .get("themes")
        .or_else(|| body.get("data"))
        .unwrap_or(body)
        .as_array()
        .ok_or_else(|| UpstreamError::Format("题材列表不是数组".to_string()))?;

    Ok(items
        .iter()
        .filter_map(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect())
}

/// 测试用桩上游：固定响应并记录调用
#[cfg(test)]
pub mod testing {
    use super::*;
    use std::sync::{Arc, Mutex};

    pub struct StubBackend {
        response: Value,
        calls: Mutex<Vec<String>>,
    }

    impl StubBackend {
        pub fn new(response: Value) -> Arc<Self> {
            Arc::new(Self { response, calls: Mutex::new(Vec::new()) })
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl FilterBackend for StubBackend {
        async fn filter(&self, route: &FilterRoute) -> Result<Value> {
            self.calls.lock().unwrap().push(route.kind().to_string());
            Ok(self.response.clone())
        }

        async fn stock_detail(&self, code: &str) -> Result<Value> {
            self.calls.lock().unwrap().push(format!("detail:{}", code));
            Ok(json!({"latest_theme": "白酒"}))
        }

        async fn theme_list(&self) -> Result<Vec<String>> {
            self.calls.lock().unwrap().push("themes".to_string());
            Ok(vec!["机器人".to_string(), "白酒".to_string()])
        }
    }

    /// 总是失败的上游
    pub struct FailingBackend;

    #[async_trait]
    impl FilterBackend for FailingBackend {
        async fn filter(&self, _route: &FilterRoute) -> Result<Value> {
            Err(UpstreamError::Status { status: 500, message: "上游不可用".to_string() }.into())
        }

        async fn stock_detail(&self, _code: &str) -> Result<Value> {
            Err(UpstreamError::Status { status: 400, message: "获取详情失败".to_string() }.into())
        }

        async fn theme_list(&self) -> Result<Vec<String>> {
            Err(UpstreamError::Format("题材列表不是数组".to_string()).into())
        }
    }
}
