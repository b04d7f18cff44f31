pub mod dispatch;
pub mod duplicates;
pub mod input;
pub mod similar;
pub mod tokens;
