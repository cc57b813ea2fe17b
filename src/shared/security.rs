use crate::shared::Result;
use std::fs;
use std::path::Path;
use uuid::Uuid;

/// Maximum configuration file size (1 MB)
pub const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;

/// Length of a hyphenated UUID, the only accepted session id shape
const SESSION_ID_LENGTH: usize = 36;

/// Validates that a path is not a symbolic link
///
/// Uses `symlink_metadata()` so the link itself is inspected, not its target.
///
/// # Errors
/// Returns an error if the path is a symbolic link or if metadata cannot be read
pub fn validate_not_symlink(path: &Path, operation: &str) -> Result<()> {
    let metadata = fs::symlink_metadata(path).map_err(|e| {
        anyhow::anyhow!(
            "Failed to read metadata for {} operation on {}: {}",
            operation,
            path.display(),
            e
        )
    })?;

    if metadata.is_symlink() {
        anyhow::bail!(
            "Security: {} is a symbolic link. For security reasons, {} operations on symbolic links are not allowed.",
            path.display(),
            operation
        );
    }

    Ok(())
}

/// Validates that a path exists and is a regular file (not a directory or symlink)
///
/// # Errors
/// Returns an error if:
/// - The path doesn't exist
/// - The path is a symbolic link
/// - The path is not a regular file
pub fn validate_regular_file(path: &Path, file_description: &str) -> Result<()> {
    let metadata = fs::symlink_metadata(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {} metadata: {}", file_description, e))?;

    if metadata.is_symlink() {
        anyhow::bail!(
            "Security: {} is a symbolic link. For security reasons, symbolic links are not allowed.",
            path.display()
        );
    }

    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    Ok(())
}

/// Validates file size is within acceptable limits
pub fn validate_file_size(file_size: u64, path: &Path, max_size: u64) -> Result<()> {
    if file_size > max_size {
        anyhow::bail!(
            "Security: {} is too large ({} bytes). Maximum allowed size is {} bytes.",
            path.display(),
            file_size,
            max_size
        );
    }
    Ok(())
}

/// Checks that a session id taken from a cookie looks like one we issued.
///
/// Session ids end up in file names for the file-backed store, so anything
/// other than a hyphenated UUID is refused before it reaches the disk.
pub fn is_well_formed_session_id(id: &str) -> bool {
    id.len() == SESSION_ID_LENGTH && Uuid::try_parse(id).is_ok()
}
