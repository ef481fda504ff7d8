pub mod body;
pub mod common;
pub mod expression;

pub use body::parse_body;
pub use expression::parse_expression;
