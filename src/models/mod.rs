pub mod common;
pub mod trabalhos;

pub use common::{ApiResponse, ErrorCode};
