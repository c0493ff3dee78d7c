//! Copia recursiva del directorio plantilla de ejecutables.
//!
//! Los enlaces simbólicos se recrean como enlaces (no se siguen). Cualquier
//! fallo se reporta con la entrada concreta que lo provocó; lo copiado hasta
//! ese punto queda en disco.

use std::fs;
use std::io;
use std::path::Path;

use walkdir::WalkDir;

use crate::errors::SweepError;

/// Copia el contenido de `src` dentro de `dst` (que se crea si no existe).
pub fn copy_tree(src: &Path, dst: &Path) -> Result<usize, SweepError> {
    let copy_err = |from: &Path, to: &Path, source: io::Error| SweepError::Copy { from: from.to_path_buf(),
                                                                                 to: to.to_path_buf(),
                                                                                 source };
    if !src.is_dir() {
        return Err(copy_err(src, dst, io::Error::new(io::ErrorKind::NotFound, "no es un directorio")));
    }
    fs::create_dir_all(dst).map_err(|e| copy_err(src, dst, e))?;

    let mut copied = 0usize;
    for entry in WalkDir::new(src).follow_links(false).min_depth(1) {
        let entry = entry.map_err(|e| {
                             let from = e.path().map(Path::to_path_buf).unwrap_or_else(|| src.to_path_buf());
                             copy_err(&from, dst, io::Error::from(e))
                         })?;
        let path = entry.path();
        let rel = path.strip_prefix(src).unwrap_or(path);
        let target = dst.join(rel);
        let ft = entry.file_type();

        if ft.is_dir() {
            fs::create_dir_all(&target).map_err(|e| copy_err(path, &target, e))?;
        } else if ft.is_symlink() {
            let link = fs::read_link(path).map_err(|e| copy_err(path, &target, e))?;
            make_symlink(&link, &target).map_err(|e| copy_err(path, &target, e))?;
        } else {
            fs::copy(path, &target).map_err(|e| copy_err(path, &target, e))?;
        }
        copied += 1;
    }
    log::debug!("copiadas {} entradas {} -> {}", copied, src.display(), dst.display());
    Ok(copied)
}

#[cfg(unix)]
fn make_symlink(link: &Path, target: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(link, target)
}

#[cfg(windows)]
fn make_symlink(link: &Path, target: &Path) -> io::Result<()> {
    let resolved: std::path::PathBuf = match target.parent() {
        Some(parent) => parent.join(link),
        None => link.to_path_buf(),
    };
    if resolved.is_dir() {
        std::os::windows::fs::symlink_dir(link, target)
    } else {
        std::os::windows::fs::symlink_file(link, target)
    }
}

/// Mueve `from` a `to` (renombrado; si falla, copia y borra el original).
pub fn move_file(from: &Path, to: &Path) -> Result<(), SweepError> {
    let move_err = |source: io::Error| SweepError::Move { from: from.to_path_buf(),
                                                          to: to.to_path_buf(),
                                                          source };
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(rename_err) => {
            log::warn!("rename {} -> {} falló ({}); se copia y borra", from.display(), to.display(), rename_err);
            fs::copy(from, to).map_err(|_| move_err(rename_err))?;
            fs::remove_file(from).map_err(move_err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn copies_nested_files() {
        let tmp = tempfile::TempDir::new().unwrap();
        let src = tmp.path().join("exec");
        fs::create_dir_all(src.join("data/sub")).unwrap();
        fs::write(src.join("star"), "bin").unwrap();
        fs::write(src.join("data/sub/table.dat"), "1 2 3").unwrap();

        let dst = tmp.path().join("run");
        let n = copy_tree(&src, &dst).unwrap();
        assert_eq!(n, 4);
        assert_eq!(fs::read_to_string(dst.join("star")).unwrap(), "bin");
        assert_eq!(fs::read_to_string(dst.join("data/sub/table.dat")).unwrap(), "1 2 3");
    }

    #[cfg(unix)]
    #[test]
    fn symlinks_stay_links() {
        let tmp = tempfile::TempDir::new().unwrap();
        let src = tmp.path().join("exec");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("real"), "x").unwrap();
        std::os::unix::fs::symlink("real", src.join("alias")).unwrap();
        std::os::unix::fs::symlink("/nonexistent/target", src.join("dangling")).unwrap();

        let dst = tmp.path().join("run");
        copy_tree(&src, &dst).unwrap();
        assert!(fs::symlink_metadata(dst.join("alias")).unwrap().file_type().is_symlink());
        assert_eq!(fs::read_link(dst.join("alias")).unwrap(), PathBuf::from("real"));
        assert_eq!(fs::read_link(dst.join("dangling")).unwrap(), PathBuf::from("/nonexistent/target"));
    }

    #[test]
    fn missing_source_is_copy_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let err = copy_tree(&tmp.path().join("nope"), &tmp.path().join("run")).unwrap_err();
        assert!(matches!(err, SweepError::Copy { .. }));
    }

    #[test]
    fn move_relocates_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let from = tmp.path().join("inlist_c1");
        let to = tmp.path().join("inlist");
        fs::write(&from, "a").unwrap();
        fs::write(&to, "placeholder").unwrap();
        move_file(&from, &to).unwrap();
        assert!(!from.exists());
        assert_eq!(fs::read_to_string(&to).unwrap(), "a");
    }
}
