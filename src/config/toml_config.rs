use crate::config::DistConfig;
use crate::utils::error::{DistError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use std::path::Path;

impl DistConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content =
            std::fs::read_to_string(&path).map_err(|e| DistError::io(path.as_ref(), e))?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置，缺少的欄位使用預設值
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| DistError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 有指定檔案就載入並驗證，否則使用預設慣例
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => {
                tracing::debug!("Loading configuration from {}", path.display());
                Self::from_file(path)?
            }
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// 替換環境變數 (例如 ${DIST_ROOT})，未定義的保留原樣
    fn substitute_env_vars(content: &str) -> String {
        let re = Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid");

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        result.into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = DistConfig::from_toml_str("").unwrap();
        assert_eq!(config, DistConfig::default());
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let toml_content = r#"
[relocation]
new_namespace = "acme.buf.validate"
destination_dir = "dist/python/acme/buf/validate"

[validation]
document_dir = "build/openapi"
"#;

        let config = DistConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.relocation.new_namespace, "acme.buf.validate");
        assert_eq!(config.relocation.source_dir, "dist/python/buf/validate");
        assert_eq!(config.validation.document_dir, "build/openapi");
        assert_eq!(config.validation.swagger_suffix, ".swagger.json");
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("SCHEMA_DIST_TEST_DOC_DIR", "out/openapi");

        let toml_content = r#"
[validation]
document_dir = "${SCHEMA_DIST_TEST_DOC_DIR}"
"#;

        let config = DistConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.validation.document_dir, "out/openapi");

        std::env::remove_var("SCHEMA_DIST_TEST_DOC_DIR");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = DistConfig::from_toml_str("[relocation\nsource_dir = 1").unwrap_err();
        assert!(matches!(err, DistError::ConfigError { .. }));
    }

    #[test]
    fn test_load_rejects_invalid_extension() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[relocation]\nextension = \".py\"\n")
            .unwrap();

        let err = DistConfig::load(Some(temp_file.path())).unwrap_err();
        assert!(matches!(err, DistError::InvalidConfigValueError { .. }));
    }

    #[test]
    fn test_load_without_file_is_default() {
        assert_eq!(DistConfig::load(None).unwrap(), DistConfig::default());
    }
}
