//! Resolution of the file to patch.
//!
//! The tool is shipped inside `DeepDriveMD-BEDE/bede_env_setup/`, next to an
//! `MD-tools` checkout. The default target is found relative to the directory
//! the tool itself lives in: two levels up, then into MD-tools.

use std::env;
use std::path::{Component, Path, PathBuf};

use crate::error::{PatchError, PatchResult};

/// Path from the tool's directory to the target file.
pub const DEFAULT_RELATIVE_TARGET: &str = "../../MD-tools/mdtools/openmm/sim.py";

/// Resolve the default target relative to `base_dir`.
///
/// The result is lexically normalized; the filesystem is not consulted.
pub fn resolve_from(base_dir: &Path) -> PathBuf {
    normalize(&base_dir.join(DEFAULT_RELATIVE_TARGET))
}

/// Resolve the default target relative to the running executable.
///
/// The tool's location is the path it was invoked by (`argv[0]`) when that
/// path has a directory part, so a symlink placed in `bede_env_setup/` resolves
/// relative to the symlink. Otherwise it falls back to
/// [`env::current_exe`], which on Linux follows symlinks to the real binary.
pub fn default_target() -> PatchResult<PathBuf> {
    let exe = match invocation_path(env::args_os().next().map(PathBuf::from)) {
        Some(path) => path,
        None => env::current_exe().map_err(PatchError::ExecutableLocation)?,
    };
    let exe = if exe.is_absolute() {
        exe
    } else {
        env::current_dir()
            .map_err(PatchError::ExecutableLocation)?
            .join(exe)
    };
    let dir = exe.parent().unwrap_or_else(|| Path::new("/"));
    Ok(resolve_from(dir))
}

/// `argv[0]`, if it names the binary by a path with a directory component.
///
/// A bare name (found through `PATH`) says nothing about where the binary
/// lives.
pub fn invocation_path(argv0: Option<PathBuf>) -> Option<PathBuf> {
    argv0.filter(|path| {
        path.parent()
            .is_some_and(|dir| !dir.as_os_str().is_empty())
    })
}

/// Collapse `.` and `..` components without touching the filesystem.
///
/// `..` at the root stays at the root. A relative path that climbs above its
/// start keeps its leading `..` components.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }

    if out.is_empty() {
        return PathBuf::from(".");
    }
    out.iter().collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_two_levels_up_into_md_tools() {
        let target = resolve_from(Path::new("/work/DeepDriveMD-BEDE/bede_env_setup"));
        assert_eq!(target, PathBuf::from("/work/MD-tools/mdtools/openmm/sim.py"));
    }

    #[test]
    fn normalize_drops_current_dir() {
        assert_eq!(normalize(Path::new("/a/./b/./c")), PathBuf::from("/a/b/c"));
    }

    #[test]
    fn normalize_stops_at_root() {
        assert_eq!(normalize(Path::new("/a/../../b")), PathBuf::from("/b"));
    }

    #[test]
    fn normalize_keeps_leading_parent_of_relative_path() {
        assert_eq!(normalize(Path::new("a/../../b")), PathBuf::from("../b"));
        assert_eq!(normalize(Path::new("a/..")), PathBuf::from("."));
    }

    #[test]
    fn invocation_path_requires_directory_part() {
        assert_eq!(invocation_path(Some(PathBuf::from("patch-mdtools"))), None);
        assert_eq!(invocation_path(None), None);
        assert_eq!(
            invocation_path(Some(PathBuf::from("./patch-mdtools"))),
            Some(PathBuf::from("./patch-mdtools"))
        );
        assert_eq!(
            invocation_path(Some(PathBuf::from("/opt/bede_env_setup/patch-mdtools"))),
            Some(PathBuf::from("/opt/bede_env_setup/patch-mdtools"))
        );
    }

    #[test]
    fn default_target_ends_with_sim_py() {
        let target = default_target().unwrap();
        assert!(target.is_absolute());
        assert!(target.ends_with("MD-tools/mdtools/openmm/sim.py"));
    }
}
