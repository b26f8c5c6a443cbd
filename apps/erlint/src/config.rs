//! Configuration discovery and effective settings resolution.
//!
//! Erlint reads `erlint.toml|yaml|yml` from the source file's directory or
//! the closest ancestor (stopping at a `.git` boundary) and merges it with CLI
//! flags to produce an `Effective` config.
//! Defaults:
//! - `executable`: probed from known install locations, then `PATH`
//! - `include_dirs`, `define_symbols`: empty
//! - `build_profile`: `default`
//! - `output`: `human`
//! - `[search]`: the standard `erlc` flags and rebar-style directory names
//!
//! Overrides precedence: CLI > config file > defaults. Repeatable CLI values
//! (`-D`, `-I`) are appended after configured ones.

use crate::args::SearchConfig;
use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const CONFIG_FILES: &[&str] = &["erlint.toml", "erlint.yaml", "erlint.yml"];

#[derive(Debug, Default, Deserialize, Clone)]
/// Directory-search overrides under `[search]`.
pub struct SearchCfg {
    pub compiler_opts: Option<Vec<String>>,
    pub include_names: Option<Vec<String>>,
    pub code_path_names: Option<Vec<String>>,
    pub dependency_names: Option<Vec<String>>,
    pub lib_output_name: Option<String>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `erlint.toml|yaml`.
pub struct ErlintConfig {
    pub executable: Option<String>,
    #[serde(default)]
    pub include_dirs: Vec<String>,
    #[serde(default)]
    pub define_symbols: Vec<String>,
    pub build_profile: Option<String>,
    pub output: Option<String>,
    #[serde(default)]
    pub search: Option<SearchCfg>,
}

#[derive(Debug, Default, Clone)]
/// Values supplied on the command line.
pub struct Overrides {
    pub executable: Option<String>,
    pub include_dirs: Vec<String>,
    pub define_symbols: Vec<String>,
    pub build_profile: Option<String>,
    pub output: Option<String>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub config_path: Option<PathBuf>,
    pub executable: Option<String>,
    pub output: String,
    pub search: SearchConfig,
}

/// Walk upward from `start` to the directory holding the config file.
///
/// Stops at the first `erlint.toml|yaml|yml` or at a `.git` entry, whichever
/// comes first. Returns `None` when neither is found.
pub fn detect_config_root(start: &Path) -> Option<PathBuf> {
    let mut cur = start;
    loop {
        if CONFIG_FILES.iter().any(|f| cur.join(f).is_file()) {
            return Some(cur.to_path_buf());
        }
        if cur.join(".git").exists() {
            return None;
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return None,
        }
    }
}

/// Load `ErlintConfig` from `root`, if a config file is present there.
pub fn load_config(root: &Path) -> Result<Option<(PathBuf, ErlintConfig)>> {
    for name in CONFIG_FILES {
        let path = root.join(name);
        if !path.is_file() {
            continue;
        }
        let s = fs::read_to_string(&path).map_err(|e| Error::ConfigRead {
            path: path.clone(),
            source: e,
        })?;
        let parsed = if name.ends_with(".toml") {
            toml::from_str::<ErlintConfig>(&s).map_err(|e| e.to_string())
        } else {
            serde_yaml::from_str::<ErlintConfig>(&s).map_err(|e| e.to_string())
        };
        let cfg = parsed.map_err(|message| Error::ConfigParse {
            path: path.clone(),
            message,
        })?;
        return Ok(Some((path, cfg)));
    }
    Ok(None)
}

/// Resolve `Effective` for linting `source` by merging CLI flags,
/// discovered config, and defaults.
pub fn resolve_effective(source: &Path, cli: &Overrides) -> Result<Effective> {
    let start = source.parent().unwrap_or(Path::new("."));
    let loaded = match detect_config_root(start) {
        Some(root) => load_config(&root)?,
        None => None,
    };
    let (config_path, cfg) = match loaded {
        Some((path, cfg)) => {
            debug!(path = %path.display(), "loaded config");
            (Some(path), cfg)
        }
        None => {
            debug!(start = %start.display(), "no erlint config found; using defaults");
            (None, ErlintConfig::default())
        }
    };

    let executable = cli.executable.clone().or(cfg.executable);
    let output = cli
        .output
        .clone()
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());
    let build_profile = cli.build_profile.clone().or(cfg.build_profile);

    let mut define_symbols = cfg.define_symbols;
    define_symbols.extend(cli.define_symbols.iter().cloned());
    let mut extra_include_dirs = cfg.include_dirs;
    extra_include_dirs.extend(cli.include_dirs.iter().cloned());

    let defaults = SearchConfig::default();
    let search_cfg = cfg.search.unwrap_or_default();
    let search = SearchConfig {
        compiler_opts: search_cfg.compiler_opts.unwrap_or(defaults.compiler_opts),
        define_symbols,
        include_names: search_cfg.include_names.unwrap_or(defaults.include_names),
        code_path_names: search_cfg
            .code_path_names
            .unwrap_or(defaults.code_path_names),
        dependency_names: search_cfg
            .dependency_names
            .unwrap_or(defaults.dependency_names),
        lib_output_name: search_cfg
            .lib_output_name
            .unwrap_or(defaults.lib_output_name),
        extra_include_dirs,
        build_profile,
    };

    Ok(Effective {
        config_path,
        executable,
        output,
        search,
    })
}
