/// 转义 HTML 特殊字符
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// 按字符截断，超出时追加 "..."
pub fn truncate_chars(input: &str, max: usize) -> String {
    if input.chars().count() > max {
        let mut out: String = input.chars().take(max).collect();
        out.push_str("...");
        out
    } else {
        input.to_string()
    }
}
