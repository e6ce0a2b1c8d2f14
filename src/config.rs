//! 配置模块
//!
//! 支持从 JSON 文件加载系统配置，部分字段可由环境变量覆盖

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,
    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
    /// 工作线程数（0 表示使用 CPU 核心数）
    #[serde(default)]
    pub workers: usize,
}

/// 上游筛选服务配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// 筛选服务根地址
    #[serde(default = "default_upstream_base_url")]
    pub base_url: String,
    /// 请求超时时间（秒）
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// 连接超时时间（秒）
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

/// 查询缓存配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// 是否启用
    #[serde(default = "default_cache_enabled")]
    pub enabled: bool,
    /// 缓存有效期（秒）
    #[serde(default = "default_cache_ttl")]
    pub ttl_secs: u64,
    /// 最大缓存条目数
    #[serde(default = "default_cache_max_entries")]
    pub max_entries: usize,
}

/// 外链配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkConfig {
    /// 个股页面站点
    #[serde(default = "default_stock_host")]
    pub stock_host: String,
    /// 分析系统站点
    #[serde(default = "default_analysis_host")]
    pub analysis_host: String,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// 日志级别: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// 应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub links: LinkConfig,
    #[serde(default)]
    pub log: LogConfig,
}

// 默认值函数
fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }
fn default_upstream_base_url() -> String { "http://127.0.0.1:5000".to_string() }
fn default_timeout() -> u64 { 30 }
fn default_connect_timeout() -> u64 { 10 }
fn default_cache_enabled() -> bool { true }
fn default_cache_ttl() -> u64 { 120 }
fn default_cache_max_entries() -> usize { 30 }
fn default_stock_host() -> String { "http://192.168.1.25:3000".to_string() }
fn default_analysis_host() -> String { "http://192.168.1.188:8077".to_string() }
fn default_log_level() -> String { "info".to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: 0,
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_upstream_base_url(),
            timeout_secs: default_timeout(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_cache_enabled(),
            ttl_secs: default_cache_ttl(),
            max_entries: default_cache_max_entries(),
        }
    }
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            stock_host: default_stock_host(),
            analysis_host: default_analysis_host(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// 从 JSON 文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// 加载配置，优先从文件，失败则使用默认值，最后应用环境变量覆盖
    ///
    /// 此时日志系统尚未初始化，加载过程中的消息随返回值一并交给调用方输出
    pub fn load() -> (Self, Vec<String>) {
        let config_paths = ["config.json", "config/config.json"];
        let mut notes = Vec::new();

        let mut config = None;
        for path in config_paths {
            if Path::new(path).exists() {
                match Self::from_file(path) {
                    Ok(c) => {
                        notes.push(format!("从 {} 加载配置成功", path));
                        config = Some(c);
                        break;
                    }
                    Err(e) => {
                        notes.push(format!("加载配置文件 {} 失败: {}", path, e));
                    }
                }
            }
        }

        let mut config = config.unwrap_or_else(|| {
            notes.push("使用默认配置".to_string());
            Self::default()
        });
        config.apply_env_overrides(|key| env::var(key).ok());
        (config, notes)
    }

    /// 使用环境变量覆盖部分配置项
    fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = non_empty("UPSTREAM_BASE_URL") {
            self.upstream.base_url = v;
        }
        if let Some(v) = non_empty("STOCK_HOST") {
            self.links.stock_host = v;
        }
        if let Some(v) = non_empty("ANALYSIS_HOST") {
            self.links.analysis_host = v;
        }
    }

    /// 获取服务器绑定地址
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"server": {"port": 9000}, "cache": {"enabled": false}}"#).unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert!(!config.cache.enabled);
        assert_eq!(config.cache.ttl_secs, 120);
        assert_eq!(config.cache.max_entries, 30);
        assert_eq!(config.upstream.timeout_secs, 30);
        assert_eq!(config.bind_addr(), "0.0.0.0:9000");
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("UPSTREAM_BASE_URL", "http://filter.internal:5000"),
            ("STOCK_HOST", "  "),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config.apply_env_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.upstream.base_url, "http://filter.internal:5000");
        // 空白值不覆盖
        assert_eq!(config.links.stock_host, "http://192.168.1.25:3000");
        assert_eq!(config.links.analysis_host, "http://192.168.1.188:8077");
    }
}
