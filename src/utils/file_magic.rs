/// 验证上传文件内容的魔术字节是否与扩展名匹配
///
/// # Arguments
/// * `data` - 文件内容的前几个字节
/// * `extension` - 文件扩展名（包含点号，如 ".xlsx"）
///
/// # Returns
/// * `true` - 魔术字节匹配或该类型不需要验证
/// * `false` - 魔术字节不匹配
pub fn validate_magic_bytes(data: &[u8], extension: &str) -> bool {
    if data.is_empty() {
        return false;
    }

    match extension.to_lowercase().as_str() {
        // OOXML 表格为 ZIP 容器
        ".xlsx" => data.starts_with(&[0x50, 0x4B, 0x03, 0x04]),
        // 文本格式 - 不检查魔术字节
        ".csv" | ".txt" => true,
        // 未知格式 - 默认拒绝
        _ => false,
    }
}

/// 取文件名的扩展名（小写，包含点号）
pub fn extension_of(file_name: &str) -> String {
    std::path::Path::new(file_name)
        .extension()
        .and_then(|s| s.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
        .unwrap_or_default()
}
