use std::collections::HashMap;
use std::fs;
use std::path::{
  Path,
  PathBuf
};

use anyhow::{
  Context,
  anyhow,
  bail
};
use taskdash_model::DateMode;
use tracing::{
  debug,
  info,
  trace,
  warn
};

const RC_ENV: &str = "TASKDASHRC";
const RC_FILE_NAME: &str =
  ".taskdashrc";

/// Every setting taskdash reads, with
/// its built-in value.
const SETTINGS: [(&str, &str); 4] = [
  ("data.location", "~/.taskdash"),
  ("color", "on"),
  ("confirm", "on"),
  ("default.mode", "exact")
];

/// One meaningful line of an rc file.
#[derive(Debug, PartialEq, Eq)]
enum RcLine<'a> {
  Blank,
  Include(&'a str),
  Setting {
    key:   &'a str,
    value: &'a str
  }
}

impl<'a> RcLine<'a> {
  fn parse(raw: &'a str) -> Option<Self> {
    let line = raw
      .split_once('#')
      .map_or(raw, |(before, _)| before)
      .trim();

    if line.is_empty() {
      return Some(Self::Blank);
    }
    if let Some(target) =
      line.strip_prefix("include ")
    {
      return Some(Self::Include(
        target.trim()
      ));
    }

    line.split_once('=').map(
      |(key, value)| Self::Setting {
        key:   key.trim(),
        value: value.trim()
      }
    )
  }
}

#[derive(Debug, Clone)]
pub struct Config {
  values:           HashMap<String, String>,
  pub loaded_files: Vec<PathBuf>
}

impl Config {
  /// Built-in values only, no rc file.
  pub fn defaults() -> Self {
    Self {
      values:       SETTINGS
        .iter()
        .map(|(key, value)| {
          (
            key.to_string(),
            value.to_string()
          )
        })
        .collect(),
      loaded_files: Vec::new()
    }
  }

  #[tracing::instrument(skip(
    rc_override
  ))]
  pub fn load(
    rc_override: Option<&Path>
  ) -> anyhow::Result<Self> {
    let mut cfg = Self::defaults();

    match rc_path(rc_override) {
      | Some(path) => {
        info!(rc = %path.display(), "loading rc file");
        cfg.read_file(&path)?;
      }
      | None => {
        debug!(
          "no rc file; using built-in \
           settings"
        )
      }
    }

    Ok(cfg)
  }

  /// `--rc KEY=VALUE` pairs; a leading
  /// `rc.` on the key is ignored.
  pub fn apply_overrides<I>(
    &mut self,
    overrides: I
  ) where
    I: IntoIterator<
      Item = (String, String)
    >
  {
    for (key, value) in overrides {
      let key = key
        .strip_prefix("rc.")
        .map(str::to_string)
        .unwrap_or(key);
      self.set(
        &key,
        &value,
        "command line"
      );
    }
  }

  pub fn get(
    &self,
    key: &str
  ) -> Option<&str> {
    self
      .values
      .get(key)
      .map(String::as_str)
  }

  /// `on/off`, `yes/no`, `true/false`
  /// or `1/0`. Anything else is an
  /// error.
  pub fn get_bool(
    &self,
    key: &str
  ) -> anyhow::Result<Option<bool>> {
    self
      .get(key)
      .map(|raw| parse_bool(key, raw))
      .transpose()
  }

  /// Date comparison used by `list`
  /// when no mode is given.
  pub fn default_date_mode(
    &self
  ) -> anyhow::Result<DateMode> {
    let Some(raw) =
      self.get("default.mode")
    else {
      return Ok(DateMode::default());
    };
    raw.parse::<DateMode>().map_err(
      |err| {
        anyhow!(
          "invalid default.mode: {err}"
        )
      }
    )
  }

  fn set(
    &mut self,
    key: &str,
    value: &str,
    origin: &str
  ) {
    if !is_known_setting(key) {
      warn!(
        key,
        origin,
        "unknown setting has no effect"
      );
    }
    trace!(key, value, origin, "setting");
    self
      .values
      .insert(key.to_string(), value.to_string());
  }

  fn read_file(
    &mut self,
    path: &Path
  ) -> anyhow::Result<()> {
    let path = expand_tilde(path);
    if self.loaded_files.contains(&path)
    {
      warn!(rc = %path.display(), "rc file already loaded; skipping");
      return Ok(());
    }

    let text = fs::read_to_string(&path)
      .with_context(|| {
        format!(
          "failed to read {}",
          path.display()
        )
      })?;
    self.loaded_files.push(path.clone());

    let origin = path.display().to_string();
    for (idx, raw) in
      text.lines().enumerate()
    {
      let Some(line) = RcLine::parse(raw)
      else {
        bail!(
          "invalid config line {origin}:{}: {raw}",
          idx + 1
        );
      };

      match line {
        | RcLine::Blank => {}
        | RcLine::Include(target) => {
          let target =
            include_target(&path, target)?;
          if target.exists() {
            self.read_file(&target)?;
          } else {
            warn!(include = %target.display(), "included rc file does not exist");
          }
        }
        | RcLine::Setting {
          key,
          value
        } => self.set(key, value, &origin)
      }
    }

    Ok(())
  }
}

/// `--data`, then `data.location`, then
/// `~/.taskdash`.
pub fn resolve_data_dir(
  cfg: &Config,
  override_dir: Option<&Path>
) -> anyhow::Result<PathBuf> {
  if let Some(dir) = override_dir {
    return Ok(dir.to_path_buf());
  }

  match cfg.get("data.location") {
    | Some(location)
      if !location.is_empty() =>
    {
      Ok(expand_tilde(Path::new(
        location
      )))
    }
    | _ => dirs::home_dir()
      .map(|home| home.join(".taskdash"))
      .ok_or_else(|| {
        anyhow!(
          "cannot determine home \
           directory"
        )
      })
  }
}

/// Shared by `color` and `confirm`.
pub fn parse_bool(
  key: &str,
  raw: &str
) -> anyhow::Result<bool> {
  match raw
    .trim()
    .to_ascii_lowercase()
    .as_str()
  {
    | "on" | "yes" | "y" | "true"
    | "1" => Ok(true),
    | "off" | "no" | "n" | "false"
    | "0" => Ok(false),
    | other => Err(anyhow!(
      "invalid {key} setting: \
       {other}; expected on or off"
    ))
  }
}

fn is_known_setting(key: &str) -> bool {
  SETTINGS
    .iter()
    .any(|(known, _)| *known == key)
}

/// `--rcfile`, then `$TASKDASHRC`
/// (`/dev/null` disables), then
/// `~/.taskdashrc` when it exists.
fn rc_path(
  rc_override: Option<&Path>
) -> Option<PathBuf> {
  if let Some(path) = rc_override {
    return Some(path.to_path_buf());
  }

  if let Ok(env_path) =
    std::env::var(RC_ENV)
  {
    return (env_path != "/dev/null")
      .then(|| PathBuf::from(env_path));
  }

  dirs::home_dir()
    .map(|home| home.join(RC_FILE_NAME))
    .filter(|candidate| {
      candidate.exists()
    })
}

fn include_target(
  rc_file: &Path,
  target: &str
) -> anyhow::Result<PathBuf> {
  if target.is_empty() {
    bail!(
      "empty include in {}",
      rc_file.display()
    );
  }

  let target =
    expand_tilde(Path::new(target));
  if target.is_absolute() {
    return Ok(target);
  }
  let base = rc_file
    .parent()
    .unwrap_or_else(|| Path::new("."));
  Ok(base.join(target))
}

fn expand_tilde(path: &Path) -> PathBuf {
  match (
    path.strip_prefix("~"),
    dirs::home_dir()
  ) {
    | (Ok(rest), Some(home)) => {
      home.join(rest)
    }
    | _ => path.to_path_buf()
  }
}
