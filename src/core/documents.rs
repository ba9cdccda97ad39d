use crate::config::ValidationConfig;
use crate::domain::model::{DocumentCheck, DocumentKind, FileOutcome, ValidationReport};
use crate::domain::ports::DistTask;
use crate::utils::error::{DistError, Result};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// 檢查產生的 API 文件是否為合法 JSON 且帶有版本標記。
///
/// A missing or empty document directory is a failure: CI relies on this to catch a
/// generation step that silently produced nothing. Per-file problems never stop the
/// batch, so one run reports every bad document.
pub struct DocumentValidator {
    kind: DocumentKind,
    dir: PathBuf,
    suffix: String,
    display_dir: String,
}

impl DocumentValidator {
    pub fn new(kind: DocumentKind, root: impl AsRef<Path>, config: &ValidationConfig) -> Self {
        let suffix = match kind {
            DocumentKind::OpenApi => config.openapi_suffix.clone(),
            DocumentKind::Swagger => config.swagger_suffix.clone(),
        };
        Self {
            kind,
            dir: root.as_ref().join(&config.document_dir),
            suffix,
            display_dir: config.document_dir.clone(),
        }
    }

    pub fn openapi(root: impl AsRef<Path>, config: &ValidationConfig) -> Self {
        Self::new(DocumentKind::OpenApi, root, config)
    }

    pub fn swagger(root: impl AsRef<Path>, config: &ValidationConfig) -> Self {
        Self::new(DocumentKind::Swagger, root, config)
    }

    pub fn pattern(&self) -> String {
        format!("{}/*{}", self.display_dir.trim_end_matches('/'), self.suffix)
    }

    /// 第一層中檔名符合後綴的非隱藏檔案，依路徑排序
    pub fn find_documents(&self) -> Result<Vec<PathBuf>> {
        if !self.dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut documents = Vec::new();
        for entry in fs::read_dir(&self.dir).map_err(|e| DistError::io(&self.dir, e))? {
            let entry = entry.map_err(|e| DistError::io(&self.dir, e))?;
            let path = entry.path();
            let matches_suffix = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| !name.starts_with('.') && name.ends_with(&self.suffix));
            if matches_suffix && path.is_file() {
                documents.push(path);
            }
        }
        documents.sort();
        Ok(documents)
    }

    pub fn check_document(&self, path: &Path) -> FileOutcome {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => return FileOutcome::Unreadable(e.to_string()),
        };

        match serde_json::from_str::<Value>(&content) {
            Ok(document) => self.check_marker(&document),
            Err(e) => FileOutcome::InvalidJson(e.to_string()),
        }
    }

    fn check_marker(&self, document: &Value) -> FileOutcome {
        let marker = document.get(self.kind.marker_key());
        match marker.and_then(Value::as_str) {
            Some(version) if self.kind.marker_rule().matches(version) => FileOutcome::Valid,
            Some(version) => FileOutcome::MarkerMismatch {
                found: Some(version.to_string()),
            },
            None => FileOutcome::MarkerMismatch {
                found: marker.map(Value::to_string),
            },
        }
    }

    pub fn validate_all(&self) -> Result<ValidationReport> {
        println!("📋 Validating {} files...", self.kind.label());

        let pattern = self.pattern();
        let documents = self.find_documents()?;

        if documents.is_empty() {
            println!(
                "  ❌ No {} files found matching: {}",
                self.kind.short_name(),
                pattern
            );
            tracing::warn!(%pattern, "No documents to validate");
            return Ok(ValidationReport {
                kind: self.kind,
                pattern,
                checks: Vec::new(),
            });
        }

        let mut checks = Vec::with_capacity(documents.len());
        for path in documents {
            let filename = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            println!("  Validating {}...", filename);

            let outcome = self.check_document(&path);
            match &outcome {
                FileOutcome::Valid => println!("  ✅ Valid {} JSON", self.kind.label()),
                FileOutcome::MarkerMismatch { found } => {
                    println!("  ❌ {}", self.kind.missing_marker_message());
                    tracing::debug!(file = %filename, ?found, "Version marker mismatch");
                }
                FileOutcome::InvalidJson(message) => println!("  ❌ Invalid JSON: {}", message),
                FileOutcome::Unreadable(message) => {
                    println!("  ❌ Error reading file: {}", message)
                }
            }
            checks.push(DocumentCheck { path, outcome });
        }

        Ok(ValidationReport {
            kind: self.kind,
            pattern,
            checks,
        })
    }
}

impl DistTask for DocumentValidator {
    type Report = ValidationReport;

    fn name(&self) -> &str {
        match self.kind {
            DocumentKind::OpenApi => "validate-openapi",
            DocumentKind::Swagger => "validate-swagger",
        }
    }

    fn execute(&self) -> Result<ValidationReport> {
        self.validate_all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_document(root: &Path, name: &str, content: &str) {
        let dir = root.join("dist/openapi");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_pattern_uses_config() {
        let validator = DocumentValidator::swagger("/tmp", &ValidationConfig::default());
        assert_eq!(validator.pattern(), "dist/openapi/*.swagger.json");
    }

    #[test]
    fn test_find_documents_filters_suffix() {
        let temp_dir = TempDir::new().unwrap();
        write_document(temp_dir.path(), "b.openapi.json", "{}");
        write_document(temp_dir.path(), "a.openapi.json", "{}");
        write_document(temp_dir.path(), "a.swagger.json", "{}");
        write_document(temp_dir.path(), "notes.json", "{}");
        write_document(temp_dir.path(), ".openapi.json", "{}");
        write_document(temp_dir.path(), ".draft.openapi.json", "{}");

        let validator = DocumentValidator::openapi(temp_dir.path(), &ValidationConfig::default());
        let names: Vec<_> = validator
            .find_documents()
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.openapi.json", "b.openapi.json"]);
    }

    #[test]
    fn test_non_string_marker_is_mismatch() {
        let temp_dir = TempDir::new().unwrap();
        write_document(temp_dir.path(), "n.openapi.json", r#"{"openapi": 3.0}"#);
        let validator = DocumentValidator::openapi(temp_dir.path(), &ValidationConfig::default());

        let outcome =
            validator.check_document(&temp_dir.path().join("dist/openapi/n.openapi.json"));
        assert_eq!(
            outcome,
            FileOutcome::MarkerMismatch {
                found: Some("3.0".to_string())
            }
        );
    }

    #[test]
    fn test_array_document_is_mismatch() {
        let temp_dir = TempDir::new().unwrap();
        write_document(temp_dir.path(), "list.swagger.json", r#"["swagger"]"#);
        let validator = DocumentValidator::swagger(temp_dir.path(), &ValidationConfig::default());

        let outcome =
            validator.check_document(&temp_dir.path().join("dist/openapi/list.swagger.json"));
        assert_eq!(outcome, FileOutcome::MarkerMismatch { found: None });
    }

    #[test]
    fn test_unreadable_document() {
        let temp_dir = TempDir::new().unwrap();
        let validator = DocumentValidator::swagger(temp_dir.path(), &ValidationConfig::default());
        let outcome = validator.check_document(&temp_dir.path().join("missing.swagger.json"));
        assert!(matches!(outcome, FileOutcome::Unreadable(_)));
    }
}
