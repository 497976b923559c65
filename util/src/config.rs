use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Search order:
/// - working directory
/// - executable path
pub fn find_config_file<P>(p: P) -> io::Result<Option<PathBuf>>
where
  P: AsRef<Path>,
{
  let p = p.as_ref();
  if p.try_exists()? {
    return Ok(Some(PathBuf::from(p)));
  }
  if p.is_absolute() {
    return Ok(None);
  }

  let exe = env::current_exe()?;
  match exe.parent() {
    Some(dir) => {
      let path = dir.join(p);
      Ok(path.try_exists()?.then_some(path))
    }
    None => Ok(None),
  }
}

/// Returns `None` if the file is found in neither location.
pub fn load_config_file<P>(p: P) -> io::Result<Option<(PathBuf, String)>>
where
  P: AsRef<Path>,
{
  match find_config_file(p)? {
    Some(path) => {
      let content = fs::read_to_string(&path)?;
      Ok(Some((path, content)))
    }
    None => Ok(None),
  }
}
