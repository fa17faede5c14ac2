use mime_guess::Mime;

/// 根据对象 key 的扩展名推断 MIME 类型，无法识别时为 application/octet-stream
pub fn guess_mime_type(key: &str) -> Mime {
    mime_guess::from_path(original_file_name(key)).first_or_octet_stream()
}

/// 从对象 key 还原原始文件名：最后一级去掉 `{uuid}_` 前缀
pub fn original_file_name(key: &str) -> &str {
    let last = key.rsplit('/').next().unwrap_or(key);
    match last.split_once('_') {
        Some((_, name)) if !name.is_empty() => name,
        _ => last,
    }
}

/// 构造 inline 的 `Content-Disposition` 值
///
/// `filename=` 只保留可打印 ASCII，非 ASCII 文件名放在 RFC 5987 的 `filename*=` 里。
pub fn content_disposition_value(file_name: &str) -> String {
    let ascii_safe: String = file_name
        .chars()
        .filter(|c| c.is_ascii_graphic() && !matches!(c, '"' | ';' | '\\'))
        .collect();
    let ascii_name = if ascii_safe.is_empty() {
        "download".to_string()
    } else {
        ascii_safe
    };

    let encoded: String = file_name
        .bytes()
        .map(|b| match b {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'!'
            | b'#'
            | b'$'
            | b'&'
            | b'+'
            | b'-'
            | b'.'
            | b'^'
            | b'_'
            | b'`'
            | b'|'
            | b'~' => (b as char).to_string(),
            _ => format!("%{b:02X}"),
        })
        .collect();

    format!("inline; filename=\"{ascii_name}\"; filename*=UTF-8''{encoded}")
}
