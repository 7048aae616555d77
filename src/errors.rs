//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_trabalhos_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum TrabalhosError {
            $($variant(String),)*
        }

        impl TrabalhosError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(TrabalhosError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(TrabalhosError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(TrabalhosError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl TrabalhosError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        TrabalhosError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_trabalhos_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    FileOperation("E004", "File Operation Error"),
    Validation("E005", "Validation Error"),
    Conflict("E006", "Duplicate Record"),
    ImportParse("E008", "Import Parse Error"),
    QrEncode("E009", "QR Encode Error"),
    ImageEncode("E010", "Image Encode Error"),
}

impl TrabalhosError {
    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for TrabalhosError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for TrabalhosError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for TrabalhosError {
    fn from(err: sea_orm::DbErr) -> Self {
        // 唯一约束冲突单独归类，各数据库后端一致
        match err.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(msg)) => TrabalhosError::Conflict(msg),
            _ => TrabalhosError::DatabaseOperation(err.to_string()),
        }
    }
}

impl From<std::io::Error> for TrabalhosError {
    fn from(err: std::io::Error) -> Self {
        TrabalhosError::FileOperation(err.to_string())
    }
}

impl From<csv::Error> for TrabalhosError {
    fn from(err: csv::Error) -> Self {
        TrabalhosError::ImportParse(err.to_string())
    }
}

impl From<calamine::XlsxError> for TrabalhosError {
    fn from(err: calamine::XlsxError) -> Self {
        TrabalhosError::ImportParse(err.to_string())
    }
}

impl From<qrcode::types::QrError> for TrabalhosError {
    fn from(err: qrcode::types::QrError) -> Self {
        TrabalhosError::QrEncode(err.to_string())
    }
}

impl From<image::ImageError> for TrabalhosError {
    fn from(err: image::ImageError) -> Self {
        TrabalhosError::ImageEncode(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TrabalhosError>;
