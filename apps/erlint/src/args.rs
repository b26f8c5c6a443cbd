//! Compiler argument assembly.
//!
//! Arguments are emitted in a fixed order because `erlc` resolves includes
//! and code paths by position:
//! 1. fixed compiler flags
//! 2. `-D<symbol>` defines
//! 3. `-I <dir>` for each include dir found upward
//! 4. `-pa <dir>` for each code-path dir found upward
//! 5. `-I <root>` plus `-pa <root>/*/ebin` for each dependency root found upward
//! 6. `-I <dir>` for extra include dirs, verbatim
//!
//! Directories that cannot be found are skipped.

use crate::resolve::{absolutize, find_upward};
use glob::{glob, Pattern};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const PROFILE_PLACEHOLDER: &str = "{profile}";
pub const DEFAULT_PROFILE: &str = "default";

pub const DEFAULT_COMPILER_OPTS: &[&str] = &[
    "+warn_obsolete_guard",
    "+warn_unused_import",
    "+warn_shadow_vars",
    "+warn_export_vars",
    "+strong_validation",
    "+report",
];
pub const DEFAULT_INCLUDE_NAMES: &[&str] = &["include", "src"];
pub const DEFAULT_CODE_PATH_NAMES: &[&str] = &["ebin"];
pub const DEFAULT_DEPENDENCY_NAMES: &[&str] = &["apps", "deps", "_build/{profile}/lib"];
pub const DEFAULT_LIB_OUTPUT_NAME: &str = "ebin";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Inputs for argument assembly. Built once per run and read-only.
pub struct SearchConfig {
    pub compiler_opts: Vec<String>,
    pub define_symbols: Vec<String>,
    pub include_names: Vec<String>,
    pub code_path_names: Vec<String>,
    /// May contain `{profile}`, replaced by `build_profile`.
    pub dependency_names: Vec<String>,
    pub lib_output_name: String,
    pub extra_include_dirs: Vec<String>,
    pub build_profile: Option<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            compiler_opts: to_strings(DEFAULT_COMPILER_OPTS),
            define_symbols: Vec::new(),
            include_names: to_strings(DEFAULT_INCLUDE_NAMES),
            code_path_names: to_strings(DEFAULT_CODE_PATH_NAMES),
            dependency_names: to_strings(DEFAULT_DEPENDENCY_NAMES),
            lib_output_name: DEFAULT_LIB_OUTPUT_NAME.to_string(),
            extra_include_dirs: Vec::new(),
            build_profile: None,
        }
    }
}

impl SearchConfig {
    /// Build profile with the `default` fallback for unset or blank values.
    pub fn profile(&self) -> &str {
        match self.build_profile.as_deref().map(str::trim) {
            Some(p) if !p.is_empty() => p,
            _ => DEFAULT_PROFILE,
        }
    }

    /// Dependency root names with the profile placeholder substituted.
    pub fn dependency_names_resolved(&self) -> Vec<String> {
        let profile = self.profile();
        self.dependency_names
            .iter()
            .map(|n| n.replace(PROFILE_PLACEHOLDER, profile))
            .collect()
    }
}

pub(crate) fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Assemble compiler arguments for `source` (the source file is not included).
pub fn build_args(source: &Path, cfg: &SearchConfig) -> Vec<String> {
    let mut out: Vec<String> = cfg.compiler_opts.clone();

    for sym in &cfg.define_symbols {
        out.push(format!("-D{}", sym));
    }

    for name in &cfg.include_names {
        if let Some(p) = find_upward(source, name) {
            push_flag(&mut out, "-I", &p);
        }
    }

    for name in &cfg.code_path_names {
        if let Some(p) = find_upward(source, name) {
            push_flag(&mut out, "-pa", &p);
        }
    }

    for name in cfg.dependency_names_resolved() {
        let Some(root) = find_upward(source, &name) else {
            continue;
        };
        push_flag(&mut out, "-I", &root);
        for lib in lib_output_dirs(&root, &cfg.lib_output_name) {
            push_flag(&mut out, "-pa", &lib);
        }
    }

    for dir in &cfg.extra_include_dirs {
        out.push("-I".to_string());
        out.push(dir.clone());
    }

    out
}

/// Push `flag <path>`; non-UTF-8 paths are skipped since a lossy copy
/// would name a different directory.
fn push_flag(out: &mut Vec<String>, flag: &str, path: &Path) {
    let Some(p) = path.to_str() else {
        debug!(flag, path = %path.display(), "skipping non-UTF-8 path");
        return;
    };
    out.push(flag.to_string());
    out.push(p.to_string());
}

/// List `<root>/*/<lib_name>` directories in glob (sorted) order, absolutized.
fn lib_output_dirs(root: &Path, lib_name: &str) -> Vec<PathBuf> {
    let pattern = format!(
        "{}/*/{}",
        Pattern::escape(&root.to_string_lossy()),
        Pattern::escape(lib_name)
    );
    let entries = match glob(&pattern) {
        Ok(paths) => paths,
        Err(e) => {
            debug!(pattern = %pattern, error = %e, "skipping dependency root with bad glob");
            return Vec::new();
        }
    };
    entries
        .filter_map(Result::ok)
        .filter(|p| p.is_dir())
        .map(|p| absolutize(&p))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    /// project/{include,src,ebin,deps/{pkgA,pkgB}/ebin}
    fn fixture() -> (tempfile::TempDir, PathBuf) {
        let dir = tempdir().unwrap();
        let root = dir.path().join("project");
        for d in ["include", "src", "ebin", "deps/pkgA/ebin", "deps/pkgB/ebin"] {
            fs::create_dir_all(root.join(d)).unwrap();
        }
        let file = root.join("src/mod.erl");
        fs::write(&file, "-module(mod).").unwrap();
        (dir, file)
    }

    fn s(p: PathBuf) -> String {
        p.to_string_lossy().to_string()
    }

    #[test]
    fn test_full_argument_order() {
        let (_dir, file) = fixture();
        let root = file.parent().unwrap().parent().unwrap().to_path_buf();
        let cfg = SearchConfig {
            define_symbols: vec!["TEST".into()],
            extra_include_dirs: vec!["/opt/extra/include".into()],
            ..SearchConfig::default()
        };
        let args = build_args(&file, &cfg);

        let mut expected = to_strings(DEFAULT_COMPILER_OPTS);
        expected.push("-DTEST".into());
        expected.extend(["-I".into(), s(root.join("include"))]);
        expected.extend(["-I".into(), s(root.join("src"))]);
        expected.extend(["-pa".into(), s(root.join("ebin"))]);
        expected.extend(["-I".into(), s(root.join("deps"))]);
        expected.extend(["-pa".into(), s(root.join("deps/pkgA/ebin"))]);
        expected.extend(["-pa".into(), s(root.join("deps/pkgB/ebin"))]);
        expected.extend(["-I".into(), "/opt/extra/include".into()]);
        assert_eq!(args, expected);
    }

    #[test]
    fn test_build_is_deterministic() {
        let (_dir, file) = fixture();
        let cfg = SearchConfig::default();
        assert_eq!(build_args(&file, &cfg), build_args(&file, &cfg));
    }

    #[test]
    fn test_removing_dependency_root_drops_only_its_tokens() {
        let (_dir, file) = fixture();
        let root = file.parent().unwrap().parent().unwrap().to_path_buf();
        let cfg = SearchConfig::default();
        let before = build_args(&file, &cfg);

        fs::remove_dir_all(root.join("deps")).unwrap();
        let after = build_args(&file, &cfg);

        let dropped = [
            s(root.join("deps")),
            s(root.join("deps/pkgA/ebin")),
            s(root.join("deps/pkgB/ebin")),
        ];
        let mut expected = Vec::new();
        let mut i = 0;
        while i < before.len() {
            if i + 1 < before.len() && dropped.contains(&before[i + 1]) {
                i += 2;
                continue;
            }
            expected.push(before[i].clone());
            i += 1;
        }
        assert_eq!(after, expected);
        assert_eq!(before.len() - after.len(), 6);
    }

    #[test]
    fn test_dependency_packages_without_ebin_are_skipped() {
        let (_dir, file) = fixture();
        let root = file.parent().unwrap().parent().unwrap().to_path_buf();
        fs::create_dir_all(root.join("deps/pkgC/src")).unwrap();
        let args = build_args(&file, &SearchConfig::default());
        let pa: Vec<_> = args
            .windows(2)
            .filter(|w| w[0] == "-pa")
            .map(|w| w[1].clone())
            .collect();
        assert_eq!(
            pa,
            vec![
                s(root.join("ebin")),
                s(root.join("deps/pkgA/ebin")),
                s(root.join("deps/pkgB/ebin")),
            ]
        );
    }

    #[test]
    fn test_profile_placeholder_resolves_build_lib() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("_build/test/lib/cowboy/ebin")).unwrap();
        fs::create_dir_all(root.join("src")).unwrap();
        let file = root.join("src/m.erl");

        let cfg = SearchConfig {
            build_profile: Some("test".into()),
            ..SearchConfig::default()
        };
        let args = build_args(&file, &cfg);
        let lib = s(root.join("_build/test/lib"));
        let ebin = s(root.join("_build/test/lib/cowboy/ebin"));
        let pos = args.iter().position(|a| *a == lib).unwrap();
        assert_eq!(args[pos - 1], "-I");
        assert_eq!(args[pos + 1], "-pa");
        assert_eq!(args[pos + 2], ebin);

        // The default profile does not see the test build.
        let args = build_args(&file, &SearchConfig::default());
        assert!(!args.contains(&lib));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_non_utf8_package_dir_is_skipped() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;
        let (_dir, file) = fixture();
        let root = file.parent().unwrap().parent().unwrap().to_path_buf();
        let bad = root.join("deps").join(OsStr::from_bytes(b"pkg\xff"));
        fs::create_dir_all(bad.join("ebin")).unwrap();

        let args = build_args(&file, &SearchConfig::default());
        assert!(args.iter().all(|a| !a.contains('\u{FFFD}')));
        let pa: Vec<_> = args
            .windows(2)
            .filter(|w| w[0] == "-pa")
            .map(|w| w[1].clone())
            .collect();
        assert_eq!(
            pa,
            vec![
                s(root.join("ebin")),
                s(root.join("deps/pkgA/ebin")),
                s(root.join("deps/pkgB/ebin")),
            ]
        );
    }

    #[test]
    fn test_custom_lib_output_name() {
        let (_dir, file) = fixture();
        let root = file.parent().unwrap().parent().unwrap().to_path_buf();
        fs::create_dir_all(root.join("deps/pkgA/out")).unwrap();
        let cfg = SearchConfig {
            lib_output_name: "out".into(),
            ..SearchConfig::default()
        };
        let args = build_args(&file, &cfg);
        assert!(args.contains(&s(root.join("deps/pkgA/out"))));
        assert!(!args.contains(&s(root.join("deps/pkgA/ebin"))));
    }

    #[test]
    fn test_blank_profile_falls_back_to_default() {
        let cfg = SearchConfig {
            build_profile: Some("  ".into()),
            ..SearchConfig::default()
        };
        assert_eq!(cfg.profile(), "default");
        assert!(cfg
            .dependency_names_resolved()
            .contains(&"_build/default/lib".to_string()));
    }

    #[test]
    fn test_unsaved_buffer_gets_only_unsearched_tokens() {
        let cfg = SearchConfig {
            define_symbols: vec!["NOTEST".into()],
            extra_include_dirs: vec!["inc".into()],
            ..SearchConfig::default()
        };
        let args = build_args(Path::new(""), &cfg);
        let mut expected = to_strings(DEFAULT_COMPILER_OPTS);
        expected.extend(["-DNOTEST".into(), "-I".into(), "inc".into()]);
        assert_eq!(args, expected);
    }
}
