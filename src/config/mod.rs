pub mod cli;
pub mod toml_config;

use crate::utils::error::Result;
use crate::utils::validation::{
    validate_extension, validate_module_path, validate_path, validate_suffix, Validate,
};
use serde::Deserialize;

// 產出目錄的固定慣例，皆相對於執行根目錄
pub const DEFAULT_PYTHON_ROOT: &str = "dist/python";
pub const DEFAULT_SOURCE_DIR: &str = "dist/python/buf/validate";
pub const DEFAULT_DESTINATION_DIR: &str = "dist/python/cyberstorm/buf/validate";
pub const DEFAULT_PACKAGE_MARKER: &str = "dist/python/cyberstorm/buf/__init__.py";
pub const DEFAULT_SHADOW_DIR: &str = "dist/python/google";
pub const DEFAULT_MODULE_EXTENSION: &str = "py";
pub const DEFAULT_OLD_NAMESPACE: &str = "buf.validate";
pub const DEFAULT_NEW_NAMESPACE: &str = "cyberstorm.buf.validate";

pub const DEFAULT_DOCUMENT_DIR: &str = "dist/openapi";
pub const DEFAULT_OPENAPI_SUFFIX: &str = ".openapi.json";
pub const DEFAULT_SWAGGER_SUFFIX: &str = ".swagger.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DistConfig {
    pub relocation: RelocationConfig,
    pub validation: ValidationConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RelocationConfig {
    /// 匯入改寫時遞迴掃描的根目錄
    pub python_root: String,
    pub source_dir: String,
    pub destination_dir: String,
    /// 需要存在的套件標記檔 (`__init__.py`)
    pub package_marker: String,
    /// 會遮蔽系統已安裝套件的目錄
    pub shadow_dir: String,
    pub extension: String,
    pub old_namespace: String,
    pub new_namespace: String,
}

impl Default for RelocationConfig {
    fn default() -> Self {
        Self {
            python_root: DEFAULT_PYTHON_ROOT.to_string(),
            source_dir: DEFAULT_SOURCE_DIR.to_string(),
            destination_dir: DEFAULT_DESTINATION_DIR.to_string(),
            package_marker: DEFAULT_PACKAGE_MARKER.to_string(),
            shadow_dir: DEFAULT_SHADOW_DIR.to_string(),
            extension: DEFAULT_MODULE_EXTENSION.to_string(),
            old_namespace: DEFAULT_OLD_NAMESPACE.to_string(),
            new_namespace: DEFAULT_NEW_NAMESPACE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    pub document_dir: String,
    pub openapi_suffix: String,
    pub swagger_suffix: String,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            document_dir: DEFAULT_DOCUMENT_DIR.to_string(),
            openapi_suffix: DEFAULT_OPENAPI_SUFFIX.to_string(),
            swagger_suffix: DEFAULT_SWAGGER_SUFFIX.to_string(),
        }
    }
}

impl Validate for RelocationConfig {
    fn validate(&self) -> Result<()> {
        validate_path("relocation.python_root", &self.python_root)?;
        validate_path("relocation.source_dir", &self.source_dir)?;
        validate_path("relocation.destination_dir", &self.destination_dir)?;
        validate_path("relocation.package_marker", &self.package_marker)?;
        validate_path("relocation.shadow_dir", &self.shadow_dir)?;
        validate_extension("relocation.extension", &self.extension)?;
        validate_module_path("relocation.old_namespace", &self.old_namespace)?;
        validate_module_path("relocation.new_namespace", &self.new_namespace)?;
        Ok(())
    }
}

impl Validate for ValidationConfig {
    fn validate(&self) -> Result<()> {
        validate_path("validation.document_dir", &self.document_dir)?;
        validate_suffix("validation.openapi_suffix", &self.openapi_suffix)?;
        validate_suffix("validation.swagger_suffix", &self.swagger_suffix)?;
        Ok(())
    }
}

impl Validate for DistConfig {
    fn validate(&self) -> Result<()> {
        self.relocation.validate()?;
        self.validation.validate()
    }
}
