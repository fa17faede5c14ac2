/// 对象 key 校验失败原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKeyError {
    Empty,
    AbsolutePath,
    Backslash,
    PathTraversal,
    EmptySegment,
    ControlCharacter,
}

impl ObjectKeyError {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Empty => "Object key cannot be empty",
            Self::AbsolutePath => "Invalid object key: leading '/' is not allowed",
            Self::Backslash => "Invalid object key: backslashes are not allowed",
            Self::PathTraversal => "Invalid object key: '.' and '..' segments are not allowed",
            Self::EmptySegment => "Invalid object key: empty path segments are not allowed",
            Self::ControlCharacter => "Invalid object key: control characters are not allowed",
        }
    }
}

/// 校验对象 key：允许多级 `/` 分隔，但不能逃逸出 bucket 目录
pub fn validate_object_key(key: &str) -> Result<&str, ObjectKeyError> {
    if key.is_empty() {
        return Err(ObjectKeyError::Empty);
    }
    // 包含 \0 与 CR/LF，防止路径截断与响应头注入
    if key.chars().any(|c| c.is_control()) {
        return Err(ObjectKeyError::ControlCharacter);
    }
    if key.starts_with('/') {
        return Err(ObjectKeyError::AbsolutePath);
    }
    if key.contains('\\') {
        return Err(ObjectKeyError::Backslash);
    }
    for segment in key.split('/') {
        if segment.is_empty() {
            return Err(ObjectKeyError::EmptySegment);
        }
        if segment == "." || segment == ".." {
            return Err(ObjectKeyError::PathTraversal);
        }
    }
    Ok(key)
}

/// bucket 名必须是单级 key
pub fn validate_bucket_name(bucket: &str) -> Result<&str, ObjectKeyError> {
    let bucket = validate_object_key(bucket)?;
    if bucket.contains('/') || bucket.starts_with('.') {
        return Err(ObjectKeyError::PathTraversal);
    }
    Ok(bucket)
}
