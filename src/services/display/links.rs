//! 个股跳转链接与客户端识别

use regex::Regex;
use std::sync::OnceLock;
use url::form_urlencoded;

use crate::config::LinkConfig;
use crate::models::StockLinks;

fn mobile_ua() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)Android|webOS|iPhone|iPod|iPad|BlackBerry|IEMobile|Opera Mini").unwrap())
}

fn tdx_ua() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)TdxBrowser|TdxW|tdx|TongDaXin").unwrap())
}

fn encode(text: &str) -> String {
    form_urlencoded::byte_serialize(text.as_bytes()).collect()
}

/// 请求方客户端类型
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClientKind {
    pub mobile: bool,
    pub tdx: bool,
}

impl ClientKind {
    /// 由 User-Agent 与 `tdx` 查询参数识别
    pub fn detect(user_agent: &str, tdx_flag: Option<&str>) -> Self {
        let flagged = tdx_flag
            .map(|v| v.trim().eq_ignore_ascii_case("1") || v.trim().eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Self {
            mobile: mobile_ua().is_match(user_agent),
            tdx: flagged || tdx_ua().is_match(user_agent),
        }
    }

    /// 仅桌面端通达信浏览器跳转内部链接
    pub fn open_in_tdx(&self) -> bool {
        self.tdx && !self.mobile
    }
}

/// 链接生成器
#[derive(Debug, Clone)]
pub struct LinkBuilder {
    stock_host: String,
    analysis_host: String,
}

impl LinkBuilder {
    pub fn new(config: &LinkConfig) -> Self {
        Self {
            stock_host: config.stock_host.trim_end_matches('/').to_string(),
            analysis_host: config.analysis_host.trim_end_matches('/').to_string(),
        }
    }

    pub fn code_link(&self, code: &str) -> String {
        format!("{}/code_{}", self.stock_host, code)
    }

    pub fn analysis_url(&self, code: &str) -> String {
        format!("{}/analysis?stock_code={}", self.analysis_host, encode(code))
    }

    pub fn tree_id_url(&self, code: &str) -> String {
        format!("http://www.treeid/code_{}", code)
    }

    pub fn route_path(&self, code: &str) -> String {
        format!("/stock-filter?code={}", encode(code))
    }

    pub fn links(&self, code: &str, client: ClientKind) -> StockLinks {
        StockLinks {
            code: code.to_string(),
            code_link: self.code_link(code),
            analysis_url: self.analysis_url(code),
            tree_id_url: self.tree_id_url(code),
            route_path: self.route_path(code),
            open_in_tdx: client.open_in_tdx(),
        }
    }
}
