use crate::errors::{HeapError, IoContext};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Empties `directory` while leaving the directory itself in place.
pub fn clear_directory<P: AsRef<Path>>(directory: P) -> Result<(), HeapError> {
    let directory = directory.as_ref();

    if !directory.try_exists().at_path(directory)? {
        debug!("Creating destination {}", directory.display());
        fs::create_dir_all(directory).at_path(directory)?;
    }

    for entry in fs::read_dir(directory).at_path(directory)? {
        let item_path = entry.at_path(directory)?.path();
        // symlink_metadata so a link to a directory is unlinked, not followed
        let file_type = fs::symlink_metadata(&item_path)
            .at_path(&item_path)?
            .file_type();

        if file_type.is_dir() {
            fs::remove_dir_all(&item_path).at_path(&item_path)?;
        } else {
            fs::remove_file(&item_path).at_path(&item_path)?;
        }
        debug!("Removed {}", item_path.display());
    }

    info!("Cleared all contents from {}", directory.display());
    Ok(())
}
