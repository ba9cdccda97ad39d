use crate::domain::model::ImportRewrite;
use crate::utils::error::{DistError, Result};
use regex::{NoExpand, Regex};

/// 單一改寫規則，依序套用
#[derive(Debug, Clone)]
pub struct ImportRule {
    pub name: &'static str,
    pattern: Regex,
    replacement: String,
    literal: bool,
}

impl ImportRule {
    fn new(name: &'static str, pattern: &str, replacement: String, literal: bool) -> Result<Self> {
        let pattern = Regex::new(pattern).map_err(|e| DistError::ConfigError {
            message: format!("Invalid import rule '{}': {}", name, e),
        })?;
        Ok(Self {
            name,
            pattern,
            replacement,
            literal,
        })
    }

    fn apply(&self, line: &str) -> String {
        if self.literal {
            self.pattern
                .replace_all(line, NoExpand(&self.replacement))
                .into_owned()
        } else {
            self.pattern
                .replace_all(line, self.replacement.as_str())
                .into_owned()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteResult {
    pub content: String,
    pub rewrites: Vec<ImportRewrite>,
}

impl RewriteResult {
    pub fn changed(&self) -> bool {
        !self.rewrites.is_empty()
    }
}

/// 將 `old_namespace` 的 import 改寫為 `new_namespace`。
///
/// Three statement shapes are handled, in this order:
///
/// 1. `from <old> import validate_pb2 as <old>_dot_validate__pb2` (the protoc-generated alias)
/// 2. `from <old> import <rest of line>`, with the rest kept verbatim
/// 3. `import <old>.<module>`, with any trailing ` as alias` untouched
///
/// Every rule is anchored on a word boundary before the keyword and requires the old
/// namespace to follow it directly, so already rewritten lines never match again.
#[derive(Debug, Clone)]
pub struct ImportRewriter {
    rules: Vec<ImportRule>,
}

impl ImportRewriter {
    pub fn new(old_namespace: &str, new_namespace: &str) -> Result<Self> {
        let old = regex::escape(old_namespace);
        let generated_alias = format!(
            "{}_dot_validate__pb2",
            old_namespace.replace('.', "_dot_")
        );

        let rules = vec![
            ImportRule::new(
                "generated-validate-alias",
                &format!(
                    r"\bfrom {} import validate_pb2 as {}",
                    old,
                    regex::escape(&generated_alias)
                ),
                format!(
                    "from {} import validate_pb2 as {}",
                    new_namespace, generated_alias
                ),
                true,
            )?,
            ImportRule::new(
                "from-import",
                &format!(r"\bfrom {} import ([^\n]+)", old),
                format!("from {} import ${{1}}", new_namespace),
                false,
            )?,
            ImportRule::new(
                "module-import",
                &format!(r"\bimport {}\.(\S+)", old),
                format!("import {}.${{1}}", new_namespace),
                false,
            )?,
        ];

        Ok(Self { rules })
    }

    pub fn rules(&self) -> &[ImportRule] {
        &self.rules
    }

    /// 逐行套用規則，保留原本的換行字元
    pub fn rewrite(&self, content: &str) -> RewriteResult {
        let mut output = String::with_capacity(content.len() + 64);
        let mut rewrites = Vec::new();

        for (index, line) in content.split_inclusive('\n').enumerate() {
            let rewritten = self
                .rules
                .iter()
                .fold(line.to_string(), |current, rule| rule.apply(&current));

            if rewritten != line {
                rewrites.push(ImportRewrite {
                    line: index + 1,
                    before: line.trim_end_matches(['\r', '\n']).to_string(),
                    after: rewritten.trim_end_matches(['\r', '\n']).to_string(),
                });
            }
            output.push_str(&rewritten);
        }

        RewriteResult {
            content: output,
            rewrites,
        }
    }
}
