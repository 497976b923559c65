use crate::category::Category;
use crate::encoder::{parse_table, RangeRecord};
use crate::error::{Error, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Read side of a generated table, as a text renderer would hold it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharFontTable {
  records: Vec<RangeRecord>,
}

impl CharFontTable {
  /// `records` must be ascending and disjoint, as produced by
  /// [`encode`](crate::encoder::encode) or [`parse_table`].
  pub fn new(records: Vec<RangeRecord>) -> Self {
    debug_assert!(records.windows(2).all(|w| w[0].end < w[1].start));
    Self { records }
  }

  pub fn load(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|err| Error::io(path, err))?;
    Ok(Self::new(parse_table(BufReader::new(file), path)?))
  }

  pub fn records(&self) -> &[RangeRecord] {
    &self.records
  }

  pub fn category_of(&self, cp: u32) -> Category {
    let i = self.records.partition_point(|r| r.end < cp);
    match self.records.get(i) {
      Some(r) if r.contains(cp) => r.category,
      _ => Category::DEFAULT,
    }
  }

  pub fn uses_cjk_font(&self, cp: u32, cjk_mode: bool) -> bool {
    match self.category_of(cp) {
      Category::Cjk => true,
      Category::Contextual => cjk_mode,
      Category::Unused | Category::NonCjk => false,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  fn sample() -> CharFontTable {
    CharFontTable::new(vec![
      RangeRecord::new(0xA7, 0xA8, Category::Contextual),
      RangeRecord::new(0xE9, 0xE9, Category::Contextual),
      RangeRecord::new(0x1100, 0x11FE, Category::Cjk),
    ])
  }

  #[test]
  fn category_of() {
    let table = sample();
    assert_eq!(table.category_of(0x0), Category::NonCjk);
    assert_eq!(table.category_of(0xA6), Category::NonCjk);
    assert_eq!(table.category_of(0xA7), Category::Contextual);
    assert_eq!(table.category_of(0xA8), Category::Contextual);
    assert_eq!(table.category_of(0xA9), Category::NonCjk);
    assert_eq!(table.category_of(0xE9), Category::Contextual);
    assert_eq!(table.category_of(0x1100), Category::Cjk);
    assert_eq!(table.category_of(0x11FE), Category::Cjk);
    assert_eq!(table.category_of(0x11FF), Category::NonCjk);
    assert_eq!(table.category_of(0x10FFFF), Category::NonCjk);
  }

  #[test]
  fn cjk_mode() {
    let table = sample();
    assert!(table.uses_cjk_font(0x1100, false));
    assert!(table.uses_cjk_font(0x1100, true));
    assert!(!table.uses_cjk_font(0xE9, false));
    assert!(table.uses_cjk_font(0xE9, true));
    assert!(!table.uses_cjk_font(0x41, true));
  }

  #[test]
  fn empty() {
    assert_eq!(CharFontTable::default().category_of(0x4E00), Category::NonCjk);
  }
}
