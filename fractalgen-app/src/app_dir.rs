//! On-disk locations for the `fractalgen` binary.
//!
//! `preferences.json` and the default `images/` export folder both live
//! beside the executable.

use std::path::PathBuf;

/// Folder holding the `fractalgen` executable, or the working directory
/// when the executable path cannot be resolved.
pub fn exe_directory() -> PathBuf {
    match std::env::current_exe() {
        Ok(exe) => match exe.parent() {
            Some(dir) => dir.to_path_buf(),
            None => PathBuf::from("."),
        },
        Err(_) => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}

/// Where PNGs go when `--output` is not given.
pub fn images_directory() -> PathBuf {
    exe_directory().join("images")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn images_live_beside_the_executable() {
        let images = images_directory();
        assert_eq!(images.file_name().and_then(|n| n.to_str()), Some("images"));
        assert_eq!(images.parent(), Some(exe_directory().as_path()));
    }
}
