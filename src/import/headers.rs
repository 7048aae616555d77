//! 表头归一化
//!
//! 已知同义词（不区分大小写与重音）映射到七个标准列名，其余表头原样保留。

use super::{ImportRow, RawTable};

/// 标准列，顺序即导入 / 预览的列顺序
pub const CANONICAL_COLUMNS: [&str; 7] = [
    "aluno",
    "orientador",
    "areas",
    "titulo",
    "avaliador1",
    "avaliador2",
    "painel",
];

/// 折叠后的同义词 -> 标准列
const SYNONYMS: &[(&str, &str)] = &[
    ("aluno", "aluno"),
    ("aluno(a)", "aluno"),
    ("aluno (a)", "aluno"),
    ("aluna", "aluno"),
    ("estudante", "aluno"),
    ("orientador", "orientador"),
    ("orientador(a)", "orientador"),
    ("orientador (a)", "orientador"),
    ("orientadora", "orientador"),
    ("areas", "areas"),
    ("area", "areas"),
    ("titulo", "titulo"),
    ("titulo do trabalho", "titulo"),
    ("avaliador 1", "avaliador1"),
    ("avaliador1", "avaliador1"),
    ("avaliador(a) 1", "avaliador1"),
    ("avaliador 2", "avaliador2"),
    ("avaliador2", "avaliador2"),
    ("avaliador(a) 2", "avaliador2"),
    ("no do painel", "painel"),
    ("n do painel", "painel"),
    ("n. do painel", "painel"),
    ("no. do painel", "painel"),
    ("numero do painel", "painel"),
    ("no painel", "painel"),
    ("painel", "painel"),
];

fn fold_char(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        // 序数符号与度数符号：Nº / N° 视为 No
        'º' | '°' => 'o',
        'ª' => 'a',
        other => other,
    }
}

/// 小写、去重音、压缩空白后的查找键
fn fold(header: &str) -> String {
    header
        .to_lowercase()
        .chars()
        .map(fold_char)
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// 归一化单个表头
pub fn normalize_header(header: &str) -> String {
    let key = fold(header);
    SYNONYMS
        .iter()
        .find(|(synonym, _)| *synonym == key)
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or_else(|| header.to_string())
}

/// 归一化整组表头
pub fn normalize_headers(headers: &[String]) -> Vec<String> {
    headers.iter().map(|h| normalize_header(h)).collect()
}

/// 将原始表格投影到标准列
///
/// 同名列只取第一次出现的位置；缺失的列补空字符串；无法识别的列丢弃。
pub fn project_canonical(table: &RawTable) -> Vec<ImportRow> {
    let normalized = normalize_headers(&table.headers);
    let index_of = |column: &str| normalized.iter().position(|h| h == column);
    let indices: Vec<Option<usize>> = CANONICAL_COLUMNS.iter().map(|c| index_of(*c)).collect();

    table
        .rows
        .iter()
        .map(|row| {
            let cell = |slot: usize| -> String {
                indices[slot]
                    .and_then(|i| row.get(i))
                    .cloned()
                    .unwrap_or_default()
            };
            ImportRow {
                aluno: cell(0),
                orientador: cell(1),
                areas: cell(2),
                titulo: cell(3),
                avaliador1: cell(4),
                avaliador2: cell(5),
                painel: cell(6),
            }
        })
        .collect()
}
