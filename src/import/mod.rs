//! 表格导入
//!
//! - `parse`: CSV / XLSX 解析为原始表格
//! - `headers`: 表头归一化与列投影
//! - `pipeline`: 生成记录并写入存储

pub mod headers;
pub mod parse;
pub mod pipeline;

use serde::Serialize;

pub use headers::{CANONICAL_COLUMNS, normalize_header, normalize_headers, project_canonical};
pub use parse::{RawTable, parse_table};
pub use pipeline::{ImportReport, build_record, coerce_painel, import_rows};

/// 投影到标准列后的一行数据，全部为原始文本
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportRow {
    pub aluno: String,
    pub orientador: String,
    pub areas: String,
    pub titulo: String,
    pub avaliador1: String,
    pub avaliador2: String,
    pub painel: String,
}
