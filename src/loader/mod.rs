//! # Loader
//!
//! Reads every configuration file of a module directory and collects the module
//! calls they declare. Loading never fails as a whole: unreadable directories,
//! unreadable files and invalid syntax all end up in [`Module::diagnostics`],
//! and files that could be parsed still contribute their calls.

mod fs;

use std::path::{Path, PathBuf};

pub use fs::{FileSystem, MemoryFileSystem, OsFileSystem};

use crate::{
    analyzer::parse_file,
    config::LoaderConfig,
    diagnostics::Diagnostic,
    module::Module,
    source::SourceFile,
};

/// Loads the module in `dir` from disk with the default settings.
pub fn load_module(dir: impl AsRef<Path>) -> Module {
    load_module_with(&OsFileSystem, dir, &LoaderConfig::default())
}

#[tracing::instrument(level = "debug", skip_all, fields(dir = %dir.as_ref().display()))]
pub fn load_module_with(fs: &dyn FileSystem, dir: impl AsRef<Path>, config: &LoaderConfig) -> Module {
    let dir = dir.as_ref();
    let mut module = Module::new(dir.display().to_string());

    let paths = match fs.read_dir(dir) {
        Ok(paths) => paths,
        Err(e) => {
            tracing::warn!("cannot read {}: {}", dir.display(), e);
            module.diagnostics.push(Diagnostic::error(
                "Failed to read module directory",
                format!("Module directory {} does not exist or cannot be read: {}.", dir.display(), e),
            ));
            return module;
        }
    };

    for path in config_files(paths, config) {
        let filename = path.display().to_string();
        let bytes = match fs.read_file(&path) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!("skipping {}: {}", filename, e);
                module.diagnostics.push(Diagnostic::error(
                    "Failed to read file",
                    format!("The configuration file {} could not be read: {}.", filename, e),
                ));
                continue;
            }
        };

        let file = SourceFile::new(filename, bytes);
        let (body, diags) = parse_file(&file);
        module.diagnostics.extend(diags);
        match body {
            Some(body) => module.add_file(&body, &file),
            None => tracing::warn!("skipping {}: invalid syntax", file.filename()),
        }
    }

    tracing::debug!(
        "{} module calls, {} diagnostics",
        module.module_calls.len(),
        module.diagnostics.len()
    );
    module
}

/// Configuration files among `paths`, sorted by name.
fn config_files(paths: Vec<PathBuf>, config: &LoaderConfig) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = paths
        .into_iter()
        .filter(|path| {
            let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
                return false;
            };
            if config.skip_hidden && is_ignored(name) {
                return false;
            }
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| config.extensions.iter().any(|wanted| wanted == ext))
        })
        .collect();
    files.sort();
    files
}

/// Dotfiles and editor backup or swap files.
fn is_ignored(name: &str) -> bool {
    name.starts_with('.') || name.starts_with('#') || name.ends_with('~')
}
