use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// How `render` prints a segment tree.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Tree,
    Json,
    Html,
    Plain,
}

impl OutputFormat {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Tree => "tree",
            Self::Json => "json",
            Self::Html => "html",
            Self::Plain => "plain",
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub watch: bool,
    pub perf: bool,
    pub format: Option<OutputFormat>,
    pub snippets: Option<PathBuf>,
    pub max_depth: Option<usize>,
    pub sync_prefix: Option<String>,
}

impl ConfigFlags {
    pub fn union(&self, other: &Self) -> Self {
        Self {
            watch: self.watch || other.watch,
            perf: self.perf || other.perf,
            format: other.format.or(self.format),
            snippets: other.snippets.clone().or_else(|| self.snippets.clone()),
            max_depth: other.max_depth.or(self.max_depth),
            sync_prefix: other
                .sync_prefix
                .clone()
                .or_else(|| self.sync_prefix.clone()),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    config_dir().map_or_else(|| PathBuf::from(".snipmarkrc"), |dir| dir.join("config"))
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".snipmarkrc")
}

/// Where the snippet table lives unless `--snippets` says otherwise.
///
/// `SNIPMARK_SNIPPETS` overrides the platform default.
pub fn default_snippets_path() -> PathBuf {
    if let Some(path) = std::env::var_os("SNIPMARK_SNIPPETS") {
        return PathBuf::from(path);
    }
    config_dir().map_or_else(
        || PathBuf::from("snippets.json"),
        |dir| dir.join("snippets.json"),
    )
}

fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return Some(PathBuf::from(appdata).join("snipmark"));
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return Some(
                PathBuf::from(home)
                    .join("Library")
                    .join("Application Support")
                    .join("snipmark"),
            );
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return Some(PathBuf::from(xdg).join("snipmark"));
        }
        if let Some(home) = std::env::var_os("HOME") {
            return Some(PathBuf::from(home).join(".config").join("snipmark"));
        }
    }

    None
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
    let mut lines = Vec::new();
    lines.push("# snipmark defaults (saved with --save)".to_string());
    if flags.watch {
        lines.push("--watch".to_string());
    }
    if flags.perf {
        lines.push("--perf".to_string());
    }
    if let Some(format) = flags.format {
        lines.push(format!("--format {}", format.as_str()));
    }
    if let Some(path) = &flags.snippets {
        lines.push(format!("--snippets {}", path.display()));
    }
    if let Some(depth) = flags.max_depth {
        lines.push(format!("--max-depth {depth}"));
    }
    if let Some(prefix) = &flags.sync_prefix {
        lines.push(format!("--sync-prefix {prefix}"));
    }
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

/// Pick the flags this module knows out of a raw token list.
///
/// Unknown tokens (subcommands, positional text) are skipped, so the same
/// function reads both the process arguments and rc files.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        if token == "--watch" {
            flags.watch = true;
        } else if token == "--perf" {
            flags.perf = true;
        } else if let Some((name, value)) = token.split_once('=') {
            apply_valued_flag(&mut flags, name, value);
        } else if is_valued_flag(token) {
            if let Some(next) = tokens.get(i + 1) {
                apply_valued_flag(&mut flags, token, next);
                i += 1;
            }
        }
        i += 1;
    }
    flags
}

fn is_valued_flag(name: &str) -> bool {
    matches!(
        name,
        "--format" | "--snippets" | "--max-depth" | "--sync-prefix"
    )
}

fn apply_valued_flag(flags: &mut ConfigFlags, name: &str, value: &str) {
    match name {
        "--format" => flags.format = parse_format(value),
        "--snippets" => flags.snippets = Some(PathBuf::from(value)),
        "--max-depth" => flags.max_depth = value.parse().ok(),
        "--sync-prefix" => flags.sync_prefix = Some(value.to_string()),
        _ => {}
    }
}

fn parse_format(s: &str) -> Option<OutputFormat> {
    match s {
        "tree" => Some(OutputFormat::Tree),
        "json" => Some(OutputFormat::Json),
        "html" => Some(OutputFormat::Html),
        "plain" => Some(OutputFormat::Plain),
        _ => None,
    }
}
