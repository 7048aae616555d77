pub mod file_magic;
pub mod html;
pub mod parameter_error_handler;
pub mod password;

pub use file_magic::validate_magic_bytes;
pub use html::escape_html;
pub use parameter_error_handler::json_error_handler;
pub use parameter_error_handler::query_error_handler;
