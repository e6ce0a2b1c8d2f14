//! 选股查询：路由选择、条件变化处理、结果整理与分页

mod filter_change;
mod planner;
mod rows;
mod table;

pub use filter_change::{process_filter_change, FilterChangeOutcome};
pub use planner::FilterRoute;
pub use rows::{extract_rows, order_columns, process_stock_data, RowOptions, DEFAULT_CODE_COLUMNS};
pub use table::{paginate, sort_rows};
