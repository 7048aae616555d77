//! CSV / XLSX 解析
//!
//! 第一行视为表头。完全空白的行跳过。

use calamine::{Reader, Xlsx};
use std::io::Cursor;

use crate::errors::{Result, TrabalhosError};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// 解析后的原始表格
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

fn is_blank(row: &[String]) -> bool {
    row.iter().all(|cell| cell.trim().is_empty())
}

/// 按文件扩展名选择解析方式
pub fn parse_table(data: &[u8], file_name: &str) -> Result<RawTable> {
    if file_name.to_lowercase().ends_with(".xlsx") {
        parse_xlsx(data)
    } else {
        parse_csv(data)
    }
}

pub fn parse_csv(data: &[u8]) -> Result<RawTable> {
    let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(Cursor::new(data));

    let headers: Vec<String> = rdr
        .byte_headers()?
        .iter()
        .map(|h| String::from_utf8_lossy(h).to_string())
        .collect();
    if headers.is_empty() || is_blank(&headers) {
        return Err(TrabalhosError::import_parse("CSV 文件缺少表头"));
    }

    let mut rows = Vec::new();
    for (row_num, result) in rdr.byte_records().enumerate() {
        let record = result.map_err(|e| {
            TrabalhosError::import_parse(format!("第 {} 行解析失败: {e}", row_num + 2))
        })?;
        let row: Vec<String> = record
            .iter()
            .map(|cell| String::from_utf8_lossy(cell).to_string())
            .collect();
        if !is_blank(&row) {
            rows.push(row);
        }
    }

    Ok(RawTable { headers, rows })
}

pub fn parse_xlsx(data: &[u8]) -> Result<RawTable> {
    // calamine 错误经 From<XlsxError> 归为 ImportParse
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(data))?;

    // 获取第一个工作表
    let sheet_names = workbook.sheet_names().to_vec();
    let sheet_name = sheet_names
        .first()
        .ok_or_else(|| TrabalhosError::import_parse("工作簿中没有工作表"))?;

    let range = workbook.worksheet_range(sheet_name)?;

    let mut rows_iter = range.rows();
    let headers: Vec<String> = rows_iter
        .next()
        .ok_or_else(|| TrabalhosError::import_parse("工作表为空"))?
        .iter()
        .map(|cell| cell.to_string())
        .collect();

    let rows = rows_iter
        .map(|row| row.iter().map(|cell| cell.to_string()).collect::<Vec<_>>())
        .filter(|row| !is_blank(row))
        .collect();

    Ok(RawTable { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_csv_basic() {
        let data = "Aluno(a),Título,Nº do Painel\nAna,Robótica,5\n,,\nBea,\"Solo, água\",x\n";
        let table = parse_csv(data.as_bytes()).unwrap();
        assert_eq!(table.headers, vec!["Aluno(a)", "Título", "Nº do Painel"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1], vec!["Bea", "Solo, água", "x"]);
    }

    #[test]
    fn test_parse_csv_strips_bom_and_allows_ragged_rows() {
        let mut data = UTF8_BOM.to_vec();
        data.extend_from_slice(b"aluno,painel\nAna\n");
        let table = parse_csv(&data).unwrap();
        assert_eq!(table.headers[0], "aluno");
        assert_eq!(table.rows, vec![vec!["Ana".to_string()]]);
    }

    #[test]
    fn test_parse_csv_empty_file() {
        assert!(parse_csv(b"").is_err());
    }

    #[test]
    fn test_parse_xlsx_roundtrip_from_writer() {
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "Aluno").unwrap();
        sheet.write_string(0, 1, "Nº do Painel").unwrap();
        sheet.write_string(1, 0, "Ana").unwrap();
        sheet.write_number(1, 1, 5.0).unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let table = parse_table(&bytes, "Planilha.XLSX").unwrap();
        assert_eq!(table.headers, vec!["Aluno", "Nº do Painel"]);
        assert_eq!(table.rows, vec![vec!["Ana".to_string(), "5".to_string()]]);
    }

    #[test]
    fn test_parse_xlsx_garbage() {
        let err = parse_xlsx(b"not a zip").unwrap_err();
        assert!(matches!(err, TrabalhosError::ImportParse(_)));
        assert_eq!(err.code(), "E008");
    }
}
