use std::path::{Path, PathBuf};

use crate::error::{handle_error, Error, Result};

/// Resolves `path` against the directory of the running executable.
///
/// Absolute paths are kept as they are. Either way the resulting path must
/// exist on disk.
pub fn make_absolute_path(path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    let absolute = if path.is_relative() {
        executable_dir()?.join(path)
    } else {
        path.to_path_buf()
    };

    if !absolute.exists() {
        return Err(handle_error(Error::MissingPath(absolute)));
    }

    Ok(absolute)
}

fn executable_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().map_err(|source| {
        handle_error(Error::Io {
            path: PathBuf::from("<current executable>"),
            source,
        })
    })?;

    Ok(exe.parent().map(Path::to_path_buf).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_existing_path_is_kept() {
        let manifest = Path::new(env!("CARGO_MANIFEST_DIR")).join("Cargo.toml");
        assert_eq!(make_absolute_path(&manifest).unwrap(), manifest);
    }

    #[test]
    fn relative_path_is_joined_to_executable_dir() {
        let exe = std::env::current_exe().unwrap();
        let name = exe.file_name().unwrap();
        let resolved = make_absolute_path(name).unwrap();
        assert_eq!(resolved, exe);
    }

    #[test]
    fn missing_path_is_reported() {
        let err = make_absolute_path("res/definitely_not_here.glsl").unwrap_err();
        match err {
            Error::MissingPath(p) => assert!(p.ends_with("res/definitely_not_here.glsl")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
