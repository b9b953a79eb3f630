use crate::clear::clear_directory;
use crate::errors::{HeapError, IoContext};
use crate::ignore::{load_ignore_patterns, IgnoreRules, HEAP_DIR_PATTERN};
use crate::utils::{display_path, default_extensions, has_allowed_extension};
use std::ffi::{OsStr, OsString};
use std::fs::{self, File, FileTimes};
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, info, trace, warn};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    pub source_dir: PathBuf,
    pub destination_dir: PathBuf,
    pub extensions: Vec<String>,
    pub modified_after: Option<SystemTime>,
    /// Defaults to `<source_dir>/.gitignore`.
    pub ignore_file: Option<PathBuf>,
}

impl AggregatorConfig {
    pub fn new<S: Into<PathBuf>, D: Into<PathBuf>>(source_dir: S, destination_dir: D) -> Self {
        AggregatorConfig {
            source_dir: source_dir.into(),
            destination_dir: destination_dir.into(),
            extensions: default_extensions(),
            modified_after: None,
            ignore_file: None,
        }
    }
}

/// One file placed in the heap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyRecord {
    pub source: PathBuf,
    /// Source path relative to the source root.
    pub relative: PathBuf,
    pub destination: PathBuf,
    pub bytes: u64,
}

pub trait Aggregator {
    fn aggregate(&self) -> Result<Vec<CopyRecord>, HeapError>;
}

/// Copies every selected file into a single flat directory.
pub struct FlatAggregator {
    config: AggregatorConfig,
}

impl FlatAggregator {
    pub fn new(config: AggregatorConfig) -> Self {
        FlatAggregator { config }
    }
}

impl Aggregator for FlatAggregator {
    fn aggregate(&self) -> Result<Vec<CopyRecord>, HeapError> {
        let config = &self.config;
        let source_dir = std::path::absolute(&config.source_dir).at_path(&config.source_dir)?;
        let destination_dir =
            std::path::absolute(&config.destination_dir).at_path(&config.destination_dir)?;

        if !source_dir.is_dir() {
            return Err(HeapError::ConfigError(format!(
                "source {} is not a directory",
                source_dir.display()
            )));
        }

        let ignore_file = config
            .ignore_file
            .clone()
            .unwrap_or_else(|| source_dir.join(".gitignore"));
        let mut patterns = load_ignore_patterns(&ignore_file)?;
        patterns.push(HEAP_DIR_PATTERN.to_owned());
        let rules = IgnoreRules::new(&patterns, source_dir.clone(), destination_dir.clone());

        clear_directory(&destination_dir)?;

        let mut records = Vec::new();
        // Ignored directories only skip their own files; descent continues and
        // each subdirectory is tested on its own.
        // Unreadable directories are skipped with a warning; only clearing,
        // copying and timestamp reads abort the run.
        for entry in WalkDir::new(&source_dir).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable path: {}", e);
                    continue;
                }
            };
            if !entry.file_type().is_dir() {
                continue;
            }
            let dir = entry.path();
            if rules.should_ignore(dir) {
                debug!("Skipping files in ignored directory {}", dir.display());
                continue;
            }

            let files = match list_files(dir) {
                Ok(files) => files,
                Err(e) => {
                    warn!("Skipping unreadable directory {}: {}", dir.display(), e);
                    continue;
                }
            };

            for file_path in files {
                let Some(file_name) = file_path.file_name() else {
                    continue;
                };
                if !has_allowed_extension(&file_name.to_string_lossy(), &config.extensions) {
                    continue;
                }

                let relative = file_path
                    .strip_prefix(&source_dir)
                    .unwrap_or(file_path.as_path())
                    .to_path_buf();
                if rules.should_ignore(&relative) {
                    debug!("Ignoring {}", display_path(&relative));
                    continue;
                }

                if let Some(floor) = config.modified_after {
                    let modified = fs::metadata(&file_path)
                        .and_then(|m| m.modified())
                        .at_path(&file_path)?;
                    if modified < floor {
                        trace!("{} predates the modification floor", display_path(&relative));
                        continue;
                    }
                }

                let destination = unique_destination(&destination_dir, file_name)?;
                let bytes = copy_with_metadata(&file_path, &destination)?;
                info!(
                    "Copied: {} to {}",
                    file_path.display(),
                    destination.display()
                );

                records.push(CopyRecord {
                    source: file_path,
                    relative,
                    destination,
                    bytes,
                });
            }
        }

        debug!("Aggregated {} files", records.len());
        Ok(records)
    }
}

pub fn aggregate_files(config: AggregatorConfig) -> Result<Vec<CopyRecord>, HeapError> {
    let aggregator = FlatAggregator::new(config);
    aggregator.aggregate()
}

/// Non-directory entries of `dir`, sorted by name. Symlinks count as files
/// unless they resolve to a directory.
fn list_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let file_type = entry.file_type()?;
        let is_dir = if file_type.is_symlink() {
            fs::metadata(&path).map(|m| m.is_dir()).unwrap_or(false)
        } else {
            file_type.is_dir()
        };
        if !is_dir {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// First free name in `destination_dir`: `name.ext`, then `name_1.ext`,
/// `name_2.ext`, and so on.
pub fn unique_destination(destination_dir: &Path, file_name: &OsStr) -> Result<PathBuf, HeapError> {
    let candidate = destination_dir.join(file_name);
    if !candidate.try_exists().at_path(&candidate)? {
        return Ok(candidate);
    }

    let name = Path::new(file_name);
    let stem = name.file_stem().unwrap_or(file_name);
    let extension = name.extension();

    let mut counter: u64 = 1;
    loop {
        let mut numbered = OsString::from(stem);
        numbered.push(format!("_{counter}"));
        if let Some(ext) = extension {
            numbered.push(".");
            numbered.push(ext);
        }

        let candidate = destination_dir.join(&numbered);
        if !candidate.try_exists().at_path(&candidate)? {
            trace!("Resolved name collision for {:?} as {:?}", file_name, numbered);
            return Ok(candidate);
        }
        counter += 1;
    }
}

/// Copies file contents, then carries over access/modification times and
/// permission bits. Returns the number of bytes written.
pub fn copy_with_metadata(source: &Path, destination: &Path) -> Result<u64, HeapError> {
    let metadata = fs::metadata(source).at_path(source)?;
    let mut reader = File::open(source).at_path(source)?;
    let mut writer = File::create(destination).at_path(destination)?;
    let bytes = io::copy(&mut reader, &mut writer).at_path(destination)?;

    let mut times = FileTimes::new().set_modified(metadata.modified().at_path(source)?);
    if let Ok(accessed) = metadata.accessed() {
        times = times.set_accessed(accessed);
    }
    writer.set_times(times).at_path(destination)?;
    drop(writer);

    // Permissions go last since a read-only mode would reject set_times.
    fs::set_permissions(destination, metadata.permissions()).at_path(destination)?;
    Ok(bytes)
}
