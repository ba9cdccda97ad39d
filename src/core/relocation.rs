use crate::config::RelocationConfig;
use crate::core::imports::ImportRewriter;
use crate::domain::model::{MovedFile, RelocationOutcome, RelocationReport};
use crate::domain::ports::DistTask;
use crate::utils::error::{DistError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 把產生的 `buf/validate` 模組搬到廠商命名空間下，並修正 import。
///
/// The steps run in a fixed order: relocation, shadow removal, then the import walk,
/// so the walk only ever sees the final file set. Filesystem errors abort the run and
/// nothing already moved is rolled back.
pub struct NamespaceRelocator {
    root: PathBuf,
    config: RelocationConfig,
    rewriter: ImportRewriter,
    dry_run: bool,
}

impl NamespaceRelocator {
    pub fn new(root: impl Into<PathBuf>, config: RelocationConfig) -> Result<Self> {
        let rewriter = ImportRewriter::new(&config.old_namespace, &config.new_namespace)?;
        Ok(Self {
            root: root.into(),
            config,
            rewriter,
            dry_run: false,
        })
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    fn resolve(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    fn has_extension(&self, path: &Path) -> bool {
        path.extension()
            .is_some_and(|ext| ext == self.config.extension.as_str())
    }

    pub fn relocate_validation_modules(&self) -> Result<RelocationOutcome> {
        let source = self.resolve(&self.config.source_dir);
        let destination = self.resolve(&self.config.destination_dir);

        if !source.is_dir() {
            tracing::debug!("Source directory {} not found", source.display());
            return Ok(RelocationOutcome::SourceMissing);
        }

        let candidates = self.list_modules(&source)?;

        if !self.dry_run {
            fs::create_dir_all(&destination).map_err(|e| DistError::io(&destination, e))?;
            touch(&self.resolve(&self.config.package_marker))?;
        }

        let mut moved = Vec::with_capacity(candidates.len());
        for from in candidates {
            // list_modules 只回傳有檔名的一般檔案
            let Some(file_name) = from.file_name() else {
                continue;
            };
            let to = destination.join(file_name);

            if self.dry_run {
                println!("Would move {} to {}", from.display(), to.display());
            } else {
                move_file(&from, &to)?;
                println!("Moved {} to {}", from.display(), to.display());
            }
            moved.push(MovedFile { from, to });
        }

        if !self.dry_run && remove_dir_if_empty(&source)? {
            if let Some(parent) = source.parent() {
                remove_dir_if_empty(parent)?;
            }
        }

        Ok(RelocationOutcome::Relocated { moved })
    }

    /// 只看來源目錄第一層的模組檔，依檔名排序
    fn list_modules(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let mut modules = Vec::new();
        for entry in fs::read_dir(dir).map_err(|e| DistError::io(dir, e))? {
            let entry = entry.map_err(|e| DistError::io(dir, e))?;
            let path = entry.path();
            if path.is_file() && self.has_extension(&path) {
                modules.push(path);
            }
        }
        modules.sort();
        Ok(modules)
    }

    pub fn remove_shadowing_directory(&self) -> Result<bool> {
        let shadow = self.resolve(&self.config.shadow_dir);

        if !shadow.is_dir() {
            return Ok(false);
        }

        if self.dry_run {
            println!("Would remove {}", shadow.display());
        } else {
            fs::remove_dir_all(&shadow).map_err(|e| DistError::io(&shadow, e))?;
            println!(
                "✅ Removed {} to prevent shadowing system protobuf",
                shadow.display()
            );
        }
        Ok(true)
    }

    pub fn rewrite_imports(&self, file: &Path) -> Result<bool> {
        let content = fs::read_to_string(file).map_err(|e| DistError::io(file, e))?;
        let result = self.rewriter.rewrite(&content);

        if !result.changed() {
            return Ok(false);
        }

        for rewrite in &result.rewrites {
            tracing::debug!("{}: {}", file.display(), rewrite);
        }

        if self.dry_run {
            println!("Would fix imports in {}", file.display());
        } else {
            fs::write(file, result.content).map_err(|e| DistError::io(file, e))?;
            println!("✅ Fixed imports in {}", file.display());
        }
        Ok(true)
    }

    /// 遞迴列出 python_root 下所有模組檔；目錄不存在時為空。
    /// 隱藏檔與隱藏目錄不列入；`skip_shadow` 時略過遮蔽目錄
    fn walk_modules(&self, skip_shadow: bool) -> Result<Vec<PathBuf>> {
        let python_root = self.resolve(&self.config.python_root);
        if !python_root.is_dir() {
            return Ok(Vec::new());
        }
        let shadow = self.resolve(&self.config.shadow_dir);

        let walker = WalkDir::new(&python_root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                entry.depth() == 0
                    || !(is_hidden(entry.file_name())
                        || (skip_shadow && entry.path().starts_with(&shadow)))
            });

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry?;
            if entry.file_type().is_file() && self.has_extension(entry.path()) {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }

    pub fn run(&self) -> Result<RelocationReport> {
        println!(
            "Moving {} modules to {} namespace...",
            self.config.old_namespace, self.config.new_namespace
        );

        let relocation = self.relocate_validation_modules()?;
        match &relocation {
            RelocationOutcome::SourceMissing => println!(
                "ℹ️  No {} modules found to move",
                self.config.old_namespace
            ),
            RelocationOutcome::Relocated { moved } if moved.is_empty() => println!(
                "ℹ️  {} contained no .{} modules",
                self.config.source_dir, self.config.extension
            ),
            RelocationOutcome::Relocated { moved } => println!(
                "✅ Moved {} {} modules to {}",
                moved.len(),
                self.config.old_namespace,
                self.config.new_namespace
            ),
        }

        let shadow_removed = self.remove_shadowing_directory()?;
        if shadow_removed {
            println!("✅ Removed local {} - using the installed package instead", self.config.shadow_dir);
        } else {
            println!("ℹ️  No {} directory found to remove", self.config.shadow_dir);
        }

        // 預演時遮蔽目錄仍在磁碟上，需在走訪時略過
        let files = self.walk_modules(self.dry_run && shadow_removed)?;
        let mut rewritten_files = Vec::new();
        for file in &files {
            if self.rewrite_imports(file)? {
                rewritten_files.push(self.final_location(&relocation, file));
            }
        }

        tracing::info!(
            scanned = files.len(),
            rewritten = rewritten_files.len(),
            "Import rewrite finished"
        );
        println!("✅ Fixed imports in {} files", rewritten_files.len());
        println!("✅ Python namespace cleanup complete");

        Ok(RelocationReport {
            relocation,
            shadow_removed,
            scanned_files: files.len(),
            rewritten_files,
            dry_run: self.dry_run,
        })
    }
}

impl NamespaceRelocator {
    /// 預演時已規劃搬移的檔案以目的地路徑回報
    fn final_location(&self, relocation: &RelocationOutcome, file: &Path) -> PathBuf {
        if self.dry_run {
            if let Some(moved) = relocation.moved().iter().find(|m| m.from == file) {
                return moved.to.clone();
            }
        }
        file.to_path_buf()
    }
}

impl DistTask for NamespaceRelocator {
    type Report = RelocationReport;

    fn name(&self) -> &str {
        "fix-python-namespace"
    }

    fn execute(&self) -> Result<RelocationReport> {
        self.run()
    }
}

fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}

/// 建立空檔案；已存在時不截斷內容
fn touch(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| DistError::io(parent, e))?;
    }
    fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| DistError::io(path, e))?;
    Ok(())
}

/// rename 失敗時 (例如跨檔案系統) 改用複製後刪除
fn move_file(from: &Path, to: &Path) -> Result<()> {
    if let Err(rename_err) = fs::rename(from, to) {
        tracing::debug!(
            "rename {} failed ({}), falling back to copy",
            from.display(),
            rename_err
        );
        fs::copy(from, to).map_err(|e| DistError::io(to, e))?;
        fs::remove_file(from).map_err(|e| DistError::io(from, e))?;
    }
    Ok(())
}

fn remove_dir_if_empty(dir: &Path) -> Result<bool> {
    if !dir.is_dir() {
        return Ok(false);
    }
    let is_empty = fs::read_dir(dir)
        .map_err(|e| DistError::io(dir, e))?
        .next()
        .is_none();
    if is_empty {
        fs::remove_dir(dir).map_err(|e| DistError::io(dir, e))?;
    }
    Ok(is_empty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn relocator(root: &Path) -> NamespaceRelocator {
        NamespaceRelocator::new(root, RelocationConfig::default()).unwrap()
    }

    #[test]
    fn test_missing_source_is_noop() {
        let temp_dir = TempDir::new().unwrap();
        let outcome = relocator(temp_dir.path())
            .relocate_validation_modules()
            .unwrap();

        assert_eq!(outcome, RelocationOutcome::SourceMissing);
        assert!(!outcome.moved_any());
        assert!(!temp_dir.path().join("dist/python/cyberstorm").exists());
    }

    #[test]
    fn test_non_module_files_keep_source_dir() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "dist/python/buf/validate/validate_pb2.py", "x = 1\n");
        write(temp_dir.path(), "dist/python/buf/validate/validate_pb2.pyi", "x: int\n");

        let outcome = relocator(temp_dir.path())
            .relocate_validation_modules()
            .unwrap();

        assert_eq!(outcome.moved().len(), 1);
        assert!(temp_dir
            .path()
            .join("dist/python/buf/validate/validate_pb2.pyi")
            .exists());
        assert!(temp_dir
            .path()
            .join("dist/python/cyberstorm/buf/validate/validate_pb2.py")
            .exists());
    }

    #[test]
    fn test_touch_keeps_existing_marker_content() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "dist/python/cyberstorm/buf/__init__.py", "# keep\n");
        write(temp_dir.path(), "dist/python/buf/validate/validate_pb2.py", "x = 1\n");

        relocator(temp_dir.path())
            .relocate_validation_modules()
            .unwrap();

        let marker =
            fs::read_to_string(temp_dir.path().join("dist/python/cyberstorm/buf/__init__.py"))
                .unwrap();
        assert_eq!(marker, "# keep\n");
    }

    #[test]
    fn test_parent_kept_when_not_empty() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "dist/python/buf/validate/validate_pb2.py", "x = 1\n");
        write(temp_dir.path(), "dist/python/buf/other/thing_pb2.py", "y = 2\n");

        relocator(temp_dir.path())
            .relocate_validation_modules()
            .unwrap();

        assert!(!temp_dir.path().join("dist/python/buf/validate").exists());
        assert!(temp_dir.path().join("dist/python/buf/other").exists());
    }

    #[test]
    fn test_remove_shadowing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let relocator = relocator(temp_dir.path());
        assert!(!relocator.remove_shadowing_directory().unwrap());

        write(temp_dir.path(), "dist/python/google/api/annotations_pb2.py", "");
        assert!(relocator.remove_shadowing_directory().unwrap());
        assert!(!temp_dir.path().join("dist/python/google").exists());
    }

    #[test]
    fn test_rewrite_imports_reports_unchanged() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "dist/python/plain.py", "import os\n");
        let path = temp_dir.path().join("dist/python/plain.py");

        assert!(!relocator(temp_dir.path()).rewrite_imports(&path).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "import os\n");
    }

    #[test]
    fn test_run_skips_hidden_entries() {
        let temp_dir = TempDir::new().unwrap();
        let import = "from buf.validate import validate_pb2\n";
        write(temp_dir.path(), "dist/python/app/client.py", import);
        write(temp_dir.path(), "dist/python/app/.cache.py", import);
        write(temp_dir.path(), "dist/python/.venv/lib/site.py", import);

        let report = relocator(temp_dir.path()).run().unwrap();

        assert_eq!(report.scanned_files, 1);
        assert_eq!(
            report.rewritten_files,
            vec![temp_dir.path().join("dist/python/app/client.py")]
        );
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("dist/python/app/.cache.py")).unwrap(),
            import
        );
    }

    #[test]
    fn test_rewrite_imports_missing_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = relocator(temp_dir.path())
            .rewrite_imports(&temp_dir.path().join("nope.py"))
            .unwrap_err();
        assert!(matches!(err, DistError::IoError { .. }));
    }
}
