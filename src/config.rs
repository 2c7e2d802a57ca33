//! Saved command-line defaults.
//!
//! Defaults live in flag files: a global one under the user config
//! directory and an optional `.playmarkrc` in the working directory. Both
//! hold the same tokens the command line accepts, one or more per line.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

const APP_DIR: &str = "playmark";
const LOCAL_FILE: &str = ".playmarkrc";

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub watch: bool,
    pub fragment: bool,
    pub perf: bool,
    pub format: Option<String>,
    pub out: Option<PathBuf>,
    pub refresh: Option<u32>,
    pub render_debug_log: Option<PathBuf>,
}

impl ConfigFlags {
    /// Merge two flag sets. Switches are OR-ed; valued options from `other`
    /// win over `self`.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            watch: self.watch || other.watch,
            fragment: self.fragment || other.fragment,
            perf: self.perf || other.perf,
            format: other.format.clone().or_else(|| self.format.clone()),
            out: other.out.clone().or_else(|| self.out.clone()),
            refresh: other.refresh.or(self.refresh),
            render_debug_log: other
                .render_debug_log
                .clone()
                .or_else(|| self.render_debug_log.clone()),
        }
    }

    fn to_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for (on, flag) in [
            (self.watch, "--watch"),
            (self.fragment, "--fragment"),
            (self.perf, "--perf"),
        ] {
            if on {
                lines.push(flag.to_string());
            }
        }
        if let Some(format) = &self.format {
            lines.push(format!("--format {format}"));
        }
        if let Some(out) = &self.out {
            lines.push(format!("--out {}", out.display()));
        }
        if let Some(secs) = self.refresh {
            lines.push(format!("--refresh {secs}"));
        }
        if let Some(path) = &self.render_debug_log {
            lines.push(format!("--render-debug-log {}", path.display()));
        }
        lines
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join(APP_DIR).join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join(APP_DIR)
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join(APP_DIR).join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(".config").join(APP_DIR).join("config");
        }
    }

    PathBuf::from(LOCAL_FILE)
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(LOCAL_FILE)
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = vec!["# playmark defaults (saved with --save)".to_string()];
    lines.extend(flags.to_lines());
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Value of `--name VALUE` or `--name=VALUE` at `tokens[*i]`, advancing `i`
/// past a separate value token.
fn option_value<'a>(tokens: &'a [String], i: &mut usize, name: &str) -> Option<&'a str> {
    let token = tokens.get(*i)?;
    let rest = token.strip_prefix("--")?.strip_prefix(name)?;
    if rest.is_empty() {
        let next = tokens.get(*i + 1)?;
        *i += 1;
        return Some(next);
    }
    rest.strip_prefix('=')
}

/// Extract the persistable flags from raw arguments. Unknown tokens and the
/// positional source are skipped.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        match tokens[i].as_str() {
            "--watch" | "-w" => flags.watch = true,
            "--fragment" => flags.fragment = true,
            "--perf" => flags.perf = true,
            "-o" => {
                if let Some(next) = tokens.get(i + 1) {
                    flags.out = Some(PathBuf::from(next));
                    i += 1;
                }
            }
            _ => {
                if let Some(value) = option_value(tokens, &mut i, "format") {
                    flags.format = Some(value.to_string());
                } else if let Some(value) = option_value(tokens, &mut i, "out") {
                    flags.out = Some(PathBuf::from(value));
                } else if let Some(value) = option_value(tokens, &mut i, "refresh") {
                    flags.refresh = value.parse().ok();
                } else if let Some(value) = option_value(tokens, &mut i, "render-debug-log") {
                    flags.render_debug_log = Some(PathBuf::from(value));
                }
            }
        }
        i += 1;
    }
    flags
}
