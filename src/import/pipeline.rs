//! 导入流程
//!
//! 每行生成一条新记录并逐条写入。展板编号无法解析时记为 0，不中断整批导入；
//! 存储错误直接向上传递。

use serde::Serialize;
use tracing::debug;

use super::ImportRow;
use crate::errors::Result;
use crate::models::trabalhos::{entities::Trabalho, requests::TrabalhoForm};
use crate::storage::Storage;

/// 导入结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub total: usize,
    pub imported: usize,
}

/// 解析展板编号：整数、可解析的小数（向零截断），否则为 0
pub fn coerce_painel(raw: &str) -> i64 {
    let raw = raw.trim();
    if let Ok(n) = raw.parse::<i64>() {
        return n;
    }
    match raw.parse::<f64>() {
        Ok(f) if f.is_finite() => f.trunc() as i64,
        _ => 0,
    }
}

/// 由导入行构建新记录
pub fn build_record(row: &ImportRow) -> Trabalho {
    Trabalho::new(TrabalhoForm {
        aluno: row.aluno.clone(),
        orientador: row.orientador.clone(),
        areas: row.areas.clone(),
        titulo: row.titulo.clone(),
        avaliador1: row.avaliador1.clone(),
        avaliador2: row.avaliador2.clone(),
        painel: coerce_painel(&row.painel),
    })
}

/// 逐行写入
pub async fn import_rows(storage: &dyn Storage, rows: &[ImportRow]) -> Result<ImportReport> {
    let mut imported = 0;
    for row in rows {
        let record = build_record(row);
        storage.insert_trabalho(record).await?;
        imported += 1;
    }

    debug!("Imported {} of {} rows", imported, rows.len());
    Ok(ImportReport {
        total: rows.len(),
        imported,
    })
}
