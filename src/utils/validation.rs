use crate::utils::error::{DistError, Result};
use regex::Regex;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(DistError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(DistError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(DistError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// 副檔名不含前導的 `.`，例如 `py`
pub fn validate_extension(field_name: &str, extension: &str) -> Result<()> {
    validate_non_empty_string(field_name, extension)?;

    if extension.starts_with('.') || extension.contains(['/', '\\']) {
        return Err(DistError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: extension.to_string(),
            reason: "Extension must be a bare suffix such as 'py'".to_string(),
        });
    }
    Ok(())
}

/// 檔名後綴需以 `.` 開頭，例如 `.openapi.json`
pub fn validate_suffix(field_name: &str, suffix: &str) -> Result<()> {
    if !suffix.starts_with('.') || suffix.len() < 2 || suffix.contains(['/', '\\']) {
        return Err(DistError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: suffix.to_string(),
            reason: "Suffix must start with '.' and name a file suffix such as '.openapi.json'"
                .to_string(),
        });
    }
    Ok(())
}

/// Python 模組路徑：以 `.` 分隔的識別字
pub fn validate_module_path(field_name: &str, module: &str) -> Result<()> {
    let re = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)*$")
        .expect("module path pattern is valid");

    if !re.is_match(module) {
        return Err(DistError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: module.to_string(),
            reason: "Expected a dotted Python module path such as 'buf.validate'".to_string(),
        });
    }
    Ok(())
}
