//! # File Discovery Module / 文件发现模块
//!
//! This module enumerates candidate files under the project root for the
//! selector to classify. Discovery is deterministic: entries are visited in
//! sorted order and paths come back root-relative with `/` separators, so
//! glob matching behaves identically on every platform.
//!
//! 此模块枚举项目根目录下的候选文件，供选择器分类。
//! 发现是确定性的：条目按排序顺序访问，路径以相对根目录、
//! 使用 `/` 分隔符的形式返回，因此 glob 匹配在每个平台上的行为都相同。

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory names that never contain test sources and are not descended into.
/// 永远不包含测试源文件且不会深入遍历的目录名称。
const SKIPPED_DIRS: &[&str] = &["node_modules", "target"];

/// Recursively enumerates all files under `root`.
///
/// Hidden entries (`.`-prefixed) and the dependency/build directories in
/// [`SKIPPED_DIRS`] are skipped. The returned paths are relative to `root`,
/// use `/` as the separator, and are sorted.
///
/// 递归枚举 `root` 下的所有文件。
///
/// 隐藏条目（以 `.` 开头）和 [`SKIPPED_DIRS`] 中的依赖/构建目录会被跳过。
/// 返回的路径相对于 `root`，使用 `/` 作为分隔符，并且已排序。
pub fn discover_files(root: &Path) -> Result<Vec<String>> {
    let mut files = Vec::new();
    walk(root, root, &mut files)?;
    files.sort();
    Ok(files)
}

fn walk(dir: &Path, root: &Path, files: &mut Vec<String>) -> Result<()> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?;

    for entry in entries {
        let entry =
            entry.with_context(|| format!("Failed to read entry in: {}", dir.display()))?;
        let path = entry.path();
        let name = entry.file_name();
        let name = name.to_string_lossy();

        if name.starts_with('.') {
            continue;
        }

        let file_type = entry
            .file_type()
            .with_context(|| format!("Failed to stat: {}", path.display()))?;

        if file_type.is_dir() {
            if SKIPPED_DIRS.contains(&name.as_ref()) {
                continue;
            }
            walk(&path, root, files)?;
        } else if file_type.is_file() {
            files.push(relative_slash_path(&path, root));
        }
        // Symlinks are ignored: following them could escape the project root.
        // 符号链接被忽略：跟随它们可能逃出项目根目录。
    }

    Ok(())
}

/// Renders `path` relative to `root` with `/` separators, regardless of the
/// platform's native separator.
///
/// 无论平台的原生分隔符如何，都以 `/` 分隔符呈现 `path` 相对于 `root` 的路径。
pub fn relative_slash_path(path: &Path, root: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Gets the absolute path from a potentially relative path.
///
/// # Arguments
/// * `path` - Path to canonicalize
///
/// # Returns
/// Canonicalized absolute path, or an error if the path doesn't exist
pub fn absolute_path(path: &Path) -> Result<PathBuf> {
    fs::canonicalize(path).with_context(|| format!("Failed to resolve path: {}", path.display()))
}
