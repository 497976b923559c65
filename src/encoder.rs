use crate::category::Category;
use crate::error::{Error, Result};
use crate::table::{RangeTable, CODEPOINT_COUNT};
use std::fmt::{self, Display, Formatter};
use std::io::{self, BufRead, Write};
use std::path::Path;

pub const HEADER: &[&str] = &[
  "# Generated by gen_charfont",
  "#",
  "# Unicode character font-type table",
  "# Based on Unicode CJK blocks and icu-data",
  "# TYPE can be",
  "#  1 : use non-CJK font (default; omitted in this file)",
  "#  2 : use CJK font",
  "#  3 : use CJK font in CJK mode, otherwise use non-CJK font",
  "#",
  "# CODEPOINT     TYPE",
  "# (SINGLE/RANGE)",
];

/// Maximal run of codepoints sharing one category. `end` is inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeRecord {
  pub start: u32,
  pub end: u32,
  pub category: Category,
}

impl RangeRecord {
  pub fn new(start: u32, end: u32, category: Category) -> Self {
    Self {
      start,
      end,
      category,
    }
  }

  pub fn contains(&self, cp: u32) -> bool {
    (self.start..=self.end).contains(&cp)
  }
}

impl Display for RangeRecord {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    if self.start == self.end {
      write!(f, "U{:06X}         {}", self.start, self.category)
    } else {
      write!(f, "U{:06X} U{:06X} {}", self.start, self.end, self.category)
    }
  }
}

/// Merges the table into runs and keeps the non-default ones, in ascending
/// order.
pub fn encode(table: &RangeTable) -> Vec<RangeRecord> {
  let mut records = vec![];
  let mut cps = table.iter();
  let mut current = match cps.next() {
    Some((cp, cat)) => RangeRecord::new(cp, cp, cat),
    None => return records,
  };

  for (cp, cat) in cps {
    if cat == current.category {
      current.end = cp;
      continue;
    }
    if !current.category.is_default() {
      records.push(current);
    }
    current = RangeRecord::new(cp, cp, cat);
  }
  if !current.category.is_default() {
    records.push(current);
  }

  records
}

pub fn write_table<W: Write>(
  records: &[RangeRecord],
  mut out: W,
) -> io::Result<()> {
  for line in HEADER {
    writeln!(out, "{}", line)?;
  }
  for record in records {
    writeln!(out, "{}", record)?;
  }
  out.flush()
}

pub fn render_table(records: &[RangeRecord]) -> String {
  let mut buf = vec![];
  // writing into a Vec cannot fail
  let _ = write_table(records, &mut buf);
  String::from_utf8_lossy(&buf).into_owned()
}

fn parse_codepoint(token: &str) -> Option<u32> {
  let hex = token.strip_prefix('U')?;
  if hex.is_empty() || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
    return None;
  }
  u32::from_str_radix(hex, 16)
    .ok()
    .filter(|&cp| cp < CODEPOINT_COUNT)
}

fn parse_record(line: &str) -> Option<RangeRecord> {
  let tokens: Vec<_> = line.split_whitespace().collect();
  let (start, end, digit) = match tokens[..] {
    [cp, digit] => {
      let cp = parse_codepoint(cp)?;
      (cp, cp, digit)
    }
    [start, end, digit] => {
      (parse_codepoint(start)?, parse_codepoint(end)?, digit)
    }
    _ => return None,
  };
  let category = digit.parse().ok().and_then(Category::from_digit)?;
  if start > end {
    return None;
  }
  Some(RangeRecord::new(start, end, category))
}

/// Reads a table in the format produced by [`write_table`].
///
/// Records must be ascending and disjoint. `path` only names the source in
/// errors.
pub fn parse_table<R: BufRead>(
  reader: R,
  path: impl AsRef<Path>,
) -> Result<Vec<RangeRecord>> {
  let path = path.as_ref();
  let mut records: Vec<RangeRecord> = vec![];

  for (i, line) in reader.lines().enumerate() {
    let line = line.map_err(|err| Error::io(path, err))?;
    let content = line.trim();
    if content.is_empty() || content.starts_with('#') {
      continue;
    }

    let invalid = || Error::InvalidTableLine {
      line: i + 1,
      content: content.to_owned(),
    };
    let record = parse_record(content).ok_or_else(invalid)?;
    if let Some(last) = records.last() {
      if record.start <= last.end {
        return Err(invalid());
      }
    }
    records.push(record);
  }

  Ok(records)
}

/// Rebuilds a full table from records. Codepoints not covered stay at the
/// default category.
pub fn expand(records: &[RangeRecord]) -> RangeTable {
  let mut table = RangeTable::new();
  for record in records {
    table.fill(record.start..record.end + 1, record.category);
  }
  table
}
