//! 因子服务
//!
//! 因子映射、配置目录、区间规范化、因子收集和数值分档

mod bucket;
mod catalog;
mod collector;
mod mapping;
mod normalize;

pub use bucket::format_factor_value;
pub use catalog::{validate_catalog, CatalogValidation, FactorCatalog};
pub use collector::collect_factors;
