use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
  #[error("{}: {source}", .path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
  #[error("{}: marker `{marker}` not found", .path.display())]
  MissingMarker { path: PathBuf, marker: &'static str },
  #[error("line {line}: invalid table entry `{content}`")]
  InvalidTableLine { line: usize, content: String },
  #[error("failed to replace {}: {source}", .path.display())]
  Persist {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
}

impl Error {
  pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
    Self::Io {
      path: path.into(),
      source,
    }
  }
}
