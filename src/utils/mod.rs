//! Path helpers shared by the template stores.

use std::path::{Component, Path};

use crate::core::DigestError;

/// Normalize a path to forward slashes for display and stable identifiers.
///
/// Windows extended-length prefixes (`\\?\`) are stripped before normalization.
pub fn normalize_path_for_storage<P: AsRef<Path>>(path: P) -> String {
    let path_str = path.as_ref().to_string_lossy();

    let cleaned = if let Some(stripped) = path_str.strip_prefix(r"\\?\UNC\") {
        format!("//{stripped}")
    } else if let Some(stripped) = path_str.strip_prefix(r"\\?\") {
        stripped.to_string()
    } else {
        path_str.to_string()
    };

    cleaned.replace('\\', "/")
}

/// Check that a logical template name stays inside the template root.
///
/// Names must be relative, non-empty and free of `..` components.
///
/// # Errors
///
/// Returns [`DigestError::InvalidTemplateName`] describing the first problem found.
pub fn validate_template_name(name: &str) -> Result<(), DigestError> {
    let invalid = |reason: &str| DigestError::InvalidTemplateName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if name.trim().is_empty() {
        return Err(invalid("name is empty"));
    }
    if name.contains('\0') {
        return Err(invalid("name contains a NUL byte"));
    }

    for component in Path::new(name).components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            Component::ParentDir => return Err(invalid("parent directory references are not allowed")),
            Component::RootDir | Component::Prefix(_) => {
                return Err(invalid("absolute paths are not allowed"));
            }
        }
    }

    Ok(())
}
