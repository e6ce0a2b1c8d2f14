//! 展示层辅助：数值格式、跳转链接、悬浮提示

mod format;
mod links;
mod tooltip;

pub use format::format_row;
pub use links::{ClientKind, LinkBuilder};
pub use tooltip::render_tooltip;
