use std::fmt;
use std::path::PathBuf;

/// 兩種 API 文件格式，各自以單一 JSON 鍵值作為版本標記
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    OpenApi,
    Swagger,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerRule {
    Prefix(&'static str),
    Exact(&'static str),
}

impl MarkerRule {
    pub fn matches(&self, value: &str) -> bool {
        match self {
            MarkerRule::Prefix(prefix) => value.starts_with(prefix),
            MarkerRule::Exact(expected) => value == *expected,
        }
    }
}

impl DocumentKind {
    pub fn marker_key(&self) -> &'static str {
        match self {
            DocumentKind::OpenApi => "openapi",
            DocumentKind::Swagger => "swagger",
        }
    }

    pub fn marker_rule(&self) -> MarkerRule {
        match self {
            DocumentKind::OpenApi => MarkerRule::Prefix("3."),
            DocumentKind::Swagger => MarkerRule::Exact("2.0"),
        }
    }

    /// 狀態輸出用的名稱，例如 "OpenAPI 3.0"
    pub fn label(&self) -> &'static str {
        match self {
            DocumentKind::OpenApi => "OpenAPI 3.0",
            DocumentKind::Swagger => "Swagger 2.0",
        }
    }

    pub fn short_name(&self) -> &'static str {
        match self {
            DocumentKind::OpenApi => "OpenAPI",
            DocumentKind::Swagger => "Swagger",
        }
    }

    /// 缺少標記時的訊息
    pub fn missing_marker_message(&self) -> &'static str {
        match self {
            DocumentKind::OpenApi => "Missing openapi 3.x identifier",
            DocumentKind::Swagger => "Missing swagger 2.0 identifier",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Valid,
    InvalidJson(String),
    MarkerMismatch { found: Option<String> },
    Unreadable(String),
}

impl FileOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, FileOutcome::Valid)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentCheck {
    pub path: PathBuf,
    pub outcome: FileOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub kind: DocumentKind,
    /// 掃描時使用的樣式，例如 `dist/openapi/*.openapi.json`
    pub pattern: String,
    pub checks: Vec<DocumentCheck>,
}

impl ValidationReport {
    /// 沒有任何文件也算失敗
    pub fn is_success(&self) -> bool {
        !self.checks.is_empty() && self.checks.iter().all(|c| c.outcome.is_valid())
    }

    pub fn failures(&self) -> impl Iterator<Item = &DocumentCheck> {
        self.checks.iter().filter(|c| !c.outcome.is_valid())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovedFile {
    pub from: PathBuf,
    pub to: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelocationOutcome {
    SourceMissing,
    Relocated { moved: Vec<MovedFile> },
}

impl RelocationOutcome {
    pub fn moved(&self) -> &[MovedFile] {
        match self {
            RelocationOutcome::SourceMissing => &[],
            RelocationOutcome::Relocated { moved } => moved,
        }
    }

    pub fn moved_any(&self) -> bool {
        !self.moved().is_empty()
    }
}

/// 單一行的匯入改寫
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRewrite {
    pub line: usize,
    pub before: String,
    pub after: String,
}

impl fmt::Display for ImportRewrite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}: {} -> {}", self.line, self.before.trim(), self.after.trim())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelocationReport {
    pub relocation: RelocationOutcome,
    pub shadow_removed: bool,
    pub scanned_files: usize,
    pub rewritten_files: Vec<PathBuf>,
    pub dry_run: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_rules() {
        assert!(DocumentKind::OpenApi.marker_rule().matches("3.0.3"));
        assert!(DocumentKind::OpenApi.marker_rule().matches("3.1.0"));
        assert!(!DocumentKind::OpenApi.marker_rule().matches("2.0"));
        assert!(DocumentKind::Swagger.marker_rule().matches("2.0"));
        assert!(!DocumentKind::Swagger.marker_rule().matches("2.0.0"));
    }

    #[test]
    fn test_empty_report_is_failure() {
        let report = ValidationReport {
            kind: DocumentKind::Swagger,
            pattern: "dist/openapi/*.swagger.json".to_string(),
            checks: vec![],
        };
        assert!(!report.is_success());
    }

    #[test]
    fn test_report_fails_on_any_bad_file() {
        let report = ValidationReport {
            kind: DocumentKind::OpenApi,
            pattern: "dist/openapi/*.openapi.json".to_string(),
            checks: vec![
                DocumentCheck {
                    path: PathBuf::from("a.openapi.json"),
                    outcome: FileOutcome::Valid,
                },
                DocumentCheck {
                    path: PathBuf::from("b.openapi.json"),
                    outcome: FileOutcome::MarkerMismatch {
                        found: Some("2.0".to_string()),
                    },
                },
            ],
        };
        assert!(!report.is_success());
        assert_eq!(report.failures().count(), 1);
    }
}
