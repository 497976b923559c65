//! Refinement from ICU `.ucm` conversion tables of the legacy East Asian
//! Windows code pages.
//!
//! Any codepoint that one of these code pages can encode, and that the block
//! list did not already claim, is drawn with the CJK font in CJK mode only.

use crate::category::Category;
use crate::error::{Error, Result};
use crate::table::{RangeTable, CODEPOINT_COUNT};
use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Location of the `.ucm` files inside an icu-data checkout.
pub const UCM_SUBDIR: &str = "charset/data/ucm";

pub const CHARMAP_START: &str = "CHARMAP";
pub const CHARMAP_END: &str = "END CHARMAP";

/// Codepoints below this are never refined.
pub const REFINE_MIN: u32 = 0xA0;
pub const PRIVATE_USE_AREA: RangeInclusive<u32> = 0xE000..=0xF8FF;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharsetFile {
  pub code_page: &'static str,
  pub file_name: &'static str,
}

pub const CHARSET_FILES: &[CharsetFile] = &[
  CharsetFile {
    code_page: "CP932",
    file_name: "windows-932-2000.ucm",
  },
  CharsetFile {
    code_page: "CP936",
    file_name: "windows-936-2000.ucm",
  },
  CharsetFile {
    code_page: "CP949",
    file_name: "windows-949-2000.ucm",
  },
  CharsetFile {
    code_page: "CP950-HKSCS",
    file_name: "windows-950_hkscs-2001.ucm",
  },
  CharsetFile {
    code_page: "CP950",
    file_name: "windows-950-2000.ucm",
  },
];

/// A `<Uxxxx> \xNN...` line of a charmap section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mapping {
  pub codepoint: u32,
  pub byte_len: usize,
}

impl Mapping {
  pub fn is_multi_byte(&self) -> bool {
    self.byte_len > 1
  }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefineStats {
  pub files: usize,
  pub mappings: usize,
  pub upgraded: usize,
}

fn mapping_regex() -> &'static Regex {
  static RE: OnceLock<Regex> = OnceLock::new();
  RE.get_or_init(|| {
    Regex::new(r"^<U([0-9A-F]+)>\s+((?:\\x[0-9A-F]+)+)").expect("valid pattern")
  })
}

/// Parses one mapping line. Lines of any other shape yield `None`.
pub fn parse_mapping(line: &str) -> Option<Mapping> {
  let caps = mapping_regex().captures(line)?;
  let codepoint = match u32::from_str_radix(&caps[1], 16) {
    Ok(cp) if cp < CODEPOINT_COUNT => cp,
    _ => {
      log::warn!("codepoint out of range: {}", line);
      return None;
    }
  };
  Some(Mapping {
    codepoint,
    byte_len: caps[2].matches("\\x").count(),
  })
}

/// Reads the mappings between the `CHARMAP` and `END CHARMAP` lines.
///
/// `path` only names the source in errors.
pub fn parse_charmap<R: BufRead>(
  reader: R,
  path: impl AsRef<Path>,
) -> Result<Vec<Mapping>> {
  let path = path.as_ref();
  let mut lines = reader.lines();

  let mut started = false;
  for line in &mut lines {
    let line = line.map_err(|err| Error::io(path, err))?;
    if line.trim() == CHARMAP_START {
      started = true;
      break;
    }
  }
  if !started {
    return Err(Error::MissingMarker {
      path: path.to_owned(),
      marker: CHARMAP_START,
    });
  }

  let mut mappings = vec![];
  for line in lines {
    let line = line.map_err(|err| Error::io(path, err))?;
    let line = line.trim();
    if line == CHARMAP_END {
      return Ok(mappings);
    }
    if let Some(mapping) = parse_mapping(line) {
      mappings.push(mapping);
    }
  }

  Err(Error::MissingMarker {
    path: path.to_owned(),
    marker: CHARMAP_END,
  })
}

pub fn is_refinable(cp: u32) -> bool {
  cp >= REFINE_MIN && !PRIVATE_USE_AREA.contains(&cp)
}

/// Upgrades every refinable mapped codepoint still at the default category to
/// [`Category::Contextual`]. Returns the number of codepoints changed.
pub fn refine<'a>(
  table: &mut RangeTable,
  mappings: impl IntoIterator<Item = &'a Mapping>,
) -> usize {
  mappings
    .into_iter()
    .filter(|m| is_refinable(m.codepoint))
    .filter(|m| {
      table.upgrade(m.codepoint, Category::DEFAULT, Category::Contextual)
    })
    .count()
}

pub fn read_charmap_file(path: impl AsRef<Path>) -> Result<Vec<Mapping>> {
  let path = path.as_ref();
  let file = File::open(path).map_err(|err| Error::io(path, err))?;
  parse_charmap(BufReader::new(file), path)
}

/// Refines `table` from each of `files`, resolved against `dir`, in order.
///
/// Stops at the first file that is missing or has no charmap section.
pub fn refine_from_dir<I, P>(
  table: &mut RangeTable,
  dir: impl AsRef<Path>,
  files: I,
) -> Result<RefineStats>
where
  I: IntoIterator<Item = P>,
  P: AsRef<Path>,
{
  let dir = dir.as_ref();
  let mut stats = RefineStats::default();
  for file in files {
    let path: PathBuf = dir.join(file);
    let mappings = read_charmap_file(&path)?;
    let upgraded = refine(table, &mappings);
    log::debug!(
      "{}: {} mappings ({} multi-byte), {} upgraded",
      path.display(),
      mappings.len(),
      mappings.iter().filter(|m| m.is_multi_byte()).count(),
      upgraded
    );
    stats.files += 1;
    stats.mappings += mappings.len();
    stats.upgraded += upgraded;
  }
  Ok(stats)
}

pub fn default_file_names() -> impl Iterator<Item = &'static str> {
  CHARSET_FILES.iter().map(|f| f.file_name)
}
