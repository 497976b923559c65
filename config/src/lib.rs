use linked_hash_map::LinkedHashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use util::config;
use yaml_rust::{Yaml, YamlLoader};

pub const DEFAULT_CONFIG_FILE: &str = "charfont.yaml";

/// Every field is optional; `None` falls back to the generator default.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
  pub output: Option<PathBuf>,
  pub charset: CharsetConfig,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CharsetConfig {
  pub subdir: Option<PathBuf>,
  pub files: Option<Vec<String>>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("{0}")]
  Io(#[from] io::Error),
  #[error("{0}")]
  Yaml(#[from] yaml_rust::ScanError),
  #[error("{0}")]
  Other(String),
}

impl From<String> for ConfigError {
  fn from(err: String) -> Self {
    Self::Other(err)
  }
}

impl From<&str> for ConfigError {
  fn from(err: &str) -> Self {
    Self::Other(err.to_owned())
  }
}

/// Loads `path`, or [`DEFAULT_CONFIG_FILE`] if `path` is `None`.
///
/// A missing default file yields the default config; a missing explicit file
/// is an error.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
  let content = match path {
    Some(path) => fs::read_to_string(path)?,
    None => match config::load_config_file(DEFAULT_CONFIG_FILE)? {
      Some((_, content)) => content,
      None => return Ok(Config::default()),
    },
  };
  parse_config(&content)
}

pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
  let mut docs = YamlLoader::load_from_str(content)?;
  let mut config = Config::default();
  let doc = match docs.pop() {
    Some(doc) if !doc.is_null() => doc,
    _ => return Ok(config),
  };

  let mut obj = doc.into_hash().ok_or("toplevel is not object")?;

  // output
  if let Some(output) = obj.remove(&Yaml::String("output".to_owned())) {
    if !output.is_null() {
      let output = output.into_string().ok_or("output is not string")?;
      config.output = Some(PathBuf::from(output));
    }
  }

  // charset
  if let Some(charset) = obj.remove(&Yaml::String("charset".to_owned())) {
    if !charset.is_null() {
      let charset = charset.into_hash().ok_or("charset is not object")?;
      config.charset = load_charset_config(charset)?;
    }
  }

  if let Some((key, _)) = obj.pop_front() {
    return Err(format!("superfluous field {}", yaml_to_string(&key)).into());
  }

  Ok(config)
}

fn load_charset_config(
  mut charset: LinkedHashMap<Yaml, Yaml>,
) -> Result<CharsetConfig, ConfigError> {
  let mut charset_config = CharsetConfig::default();

  // charset.subdir
  if let Some(subdir) = charset
    .remove(&Yaml::String("subdir".into()))
    .filter(|subdir| !subdir.is_null())
  {
    let subdir = subdir
      .into_string()
      .ok_or("charset.subdir is not string")?;
    charset_config.subdir = Some(PathBuf::from(subdir));
  }

  // charset.files
  if let Some(files) = charset
    .remove(&Yaml::String("files".into()))
    .filter(|files| !files.is_null())
  {
    let files = files.into_vec().ok_or("charset.files is not array")?;
    if files.is_empty() {
      return Err("charset.files must not be empty".into());
    }
    let files = files
      .into_iter()
      .enumerate()
      .map(|(i, file)| {
        file
          .into_string()
          .ok_or_else(|| format!("charset.files[{}] is not string", i))
      })
      .collect::<Result<Vec<_>, _>>()?;
    charset_config.files = Some(files);
  }

  if let Some((key, _)) = charset.pop_front() {
    return Err(
      format!("superfluous field {} in charset", yaml_to_string(&key)).into(),
    );
  }

  Ok(charset_config)
}

fn yaml_to_string(yaml: &Yaml) -> String {
  match yaml {
    Yaml::Null => "~".to_owned(),
    Yaml::Boolean(true) => "true".to_owned(),
    Yaml::Boolean(false) => "false".to_owned(),
    Yaml::Hash(_) => "<object>".to_owned(),
    Yaml::Array(_) => "<array>".to_owned(),
    Yaml::String(s) => format!("'{}'", s.replace('\'', "\\'")),
    Yaml::Integer(n) => n.to_string(),
    Yaml::Real(n) => n.to_string(),
    Yaml::Alias(_) => "<alias>".to_owned(),
    Yaml::BadValue => "<bad value>".to_owned(),
  }
}
