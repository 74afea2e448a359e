//! Workspace enumeration of resource files
//!
//! The enumeration order is the order the project set reports: project
//! files in file-name-sorted walk order, then each project's resource
//! files in declaration order. Nothing is re-sorted globally and nothing
//! is deduplicated across projects.

use crate::store;
use crate::types::{ResourceEntry, ResxError};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Item elements that carry project files in a legacy project. A project
/// declaring none of these is treated as SDK-style with implicit items.
const FILE_ITEM_ELEMENTS: &[&str] = &["Compile", "EmbeddedResource", "None", "Content", "Resource"];

/// A directory tree of projects and their resource files
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Every resource file known to the project set, in project order.
    ///
    /// Declared items are reported whether or not they exist on disk;
    /// projects without explicit file items are scanned for `.resx` files
    /// (skipping `bin`/`obj`), and a workspace without any project file
    /// falls back to scanning the root directly.
    pub fn enumerate_resource_files(&self) -> Result<Vec<PathBuf>, ResxError> {
        if !self.root.is_dir() {
            return Err(ResxError::DirectoryNotFound(
                self.root.display().to_string(),
            ));
        }

        let projects: Vec<PathBuf> = walk_sorted(&self.root)
            .filter(|p| has_extension(p, "csproj"))
            .collect();

        if projects.is_empty() {
            return Ok(scan_resx_under(&self.root));
        }

        let mut files = Vec::new();
        for project in &projects {
            match project_resource_files(project) {
                Ok(mut found) => files.append(&mut found),
                Err(e) => eprintln!("Warning: skipping {}: {}", project.display(), e),
            }
        }

        Ok(files)
    }

    /// First file/entry pair whose entry value equals `value`, in
    /// enumeration order, short-circuiting at the first match
    pub fn find_first_matching_value(
        &self,
        value: &str,
    ) -> Result<Option<(PathBuf, ResourceEntry)>, ResxError> {
        let files = self.enumerate_resource_files()?;
        Ok(find_first_matching_value_in(&files, value))
    }
}

/// Scan an ordered file list for the first entry matching `value`.
///
/// Files that fail to open or parse are skipped with a warning; a broken
/// file must not hide a match in a later one.
pub fn find_first_matching_value_in(
    files: &[PathBuf],
    value: &str,
) -> Option<(PathBuf, ResourceEntry)> {
    for file in files {
        match store::find_by_value(file, value) {
            Ok(Some(entry)) => return Some((file.clone(), entry)),
            Ok(None) => {}
            Err(e) => eprintln!("Warning: skipping {}: {}", file.display(), e),
        }
    }

    None
}

/// Resource files declared by one project, in declaration order
fn project_resource_files(project: &Path) -> Result<Vec<PathBuf>, ResxError> {
    let source = fs::read_to_string(project)?;
    let doc = roxmltree::Document::parse(&source).map_err(|e| ResxError::Parse(e.to_string()))?;
    let project_dir = project.parent().unwrap_or_else(|| Path::new("."));

    let mut has_file_items = false;
    let mut files = Vec::new();

    for node in doc.descendants().filter(|n| n.is_element()) {
        if !FILE_ITEM_ELEMENTS.contains(&node.tag_name().name()) {
            continue;
        }
        let Some(include) = node.attribute("Include") else {
            continue;
        };
        has_file_items = true;

        let include = include.replace('\\', "/");
        if !include.to_ascii_lowercase().ends_with(".resx") {
            continue;
        }

        if include.contains('*') {
            files.extend(expand_wildcard(project_dir, &include));
        } else {
            files.push(project_dir.join(&include));
        }
    }

    // SDK-style projects declare no file items; their resource files are
    // whatever sits under the project directory.
    if !has_file_items {
        files = scan_resx_under(project_dir);
    }

    Ok(files)
}

/// Expand an MSBuild wildcard include against the project directory
fn expand_wildcard(project_dir: &Path, include: &str) -> Vec<PathBuf> {
    let Some(pattern) = project_dir.join(include).to_str().map(|s| s.to_string()) else {
        return Vec::new();
    };
    match glob::glob(&pattern) {
        Ok(paths) => paths.filter_map(|p| p.ok()).collect(),
        Err(_) => Vec::new(),
    }
}

/// Walk a directory in file-name-sorted order, skipping build output and
/// dot directories
fn walk_sorted(root: &Path) -> impl Iterator<Item = PathBuf> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_skipped_dir(e))
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path().to_path_buf())
}

fn scan_resx_under(dir: &Path) -> Vec<PathBuf> {
    walk_sorted(dir)
        .filter(|p| has_extension(p, "resx"))
        .collect()
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .map(|n| n == "bin" || n == "obj" || n.starts_with('.'))
            .unwrap_or(false)
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case(ext))
        .unwrap_or(false)
}
