//! 业务逻辑服务模块
//!
//! 因子收集、查询路由、上游调用和结果整理

pub mod display;     // 展示格式、链接与提示
pub mod factor;      // 因子目录与收集
pub mod query_cache; // 查询缓存
pub mod screener;    // 选股服务
pub mod screening;   // 路由、结果整理与分页
pub mod upstream;    // 上游筛选服务客户端
