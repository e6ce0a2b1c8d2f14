//! 选股网关服务
//!
//! 将选股页面的筛选条件转换为上游筛选服务的查询，
//! 并整理、排序、分页、格式化返回结果

mod config;     // 配置加载
mod handlers;   // HTTP 请求处理器
mod models;     // 数据模型定义
mod services;   // 业务逻辑服务
mod state;      // 共享应用状态

use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::upstream::HttpFilterBackend;
use crate::state::AppState;

/// 应用程序入口
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let (config, notes) = AppConfig::load();

    // 初始化日志系统，RUST_LOG 优先于配置文件
    env_logger::init_from_env(Env::default().default_filter_or(config.log.level.as_str()));
    for note in &notes {
        log::info!("{}", note);
    }

    let backend = HttpFilterBackend::new(&config.upstream)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, format!("创建上游客户端失败: {}", e)))?;
    let state = web::Data::new(AppState::new(&config, Arc::new(backend)));

    let bind_addr = config.bind_addr();
    log::info!("启动选股网关服务: {}, 上游服务: {}", bind_addr, config.upstream.base_url);

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())  // 添加请求日志中间件
            .app_data(state.clone())
            .configure(handlers::config)  // 配置路由
    });
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(bind_addr)?.run().await
}
