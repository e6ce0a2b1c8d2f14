pub mod filter;
pub mod response;
pub mod stock;

pub use filter::*;
pub use response::*;
pub use stock::*;
