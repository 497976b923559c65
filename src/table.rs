use crate::category::Category;
use std::fmt::{self, Debug, Formatter};
use std::ops::Range;

/// Number of codepoints, `0..=0x10FFFF`.
pub const CODEPOINT_COUNT: u32 = 0x110000;

/// One category per codepoint over the whole codepoint space.
///
/// Indexing outside `0..CODEPOINT_COUNT` is a bug in the caller and panics.
#[derive(Clone, PartialEq, Eq)]
pub struct RangeTable {
  cats: Box<[Category]>,
}

impl RangeTable {
  pub fn new() -> Self {
    Self {
      cats: vec![Category::DEFAULT; CODEPOINT_COUNT as usize]
        .into_boxed_slice(),
    }
  }

  pub fn len(&self) -> usize {
    self.cats.len()
  }

  pub fn is_empty(&self) -> bool {
    self.cats.is_empty()
  }

  pub fn get(&self, cp: u32) -> Category {
    self.cats[cp as usize]
  }

  pub fn set(&mut self, cp: u32, cat: Category) {
    self.cats[cp as usize] = cat;
  }

  /// Sets `cp` to `to` only if it currently holds `from`. Returns whether the
  /// entry was changed.
  pub fn upgrade(&mut self, cp: u32, from: Category, to: Category) -> bool {
    let slot = &mut self.cats[cp as usize];
    if *slot == from {
      *slot = to;
      true
    } else {
      false
    }
  }

  pub fn fill(&mut self, range: Range<u32>, cat: Category) {
    self.cats[range.start as usize..range.end as usize].fill(cat);
  }

  pub fn iter(&self) -> impl Iterator<Item = (u32, Category)> + '_ {
    self
      .cats
      .iter()
      .enumerate()
      .map(|(cp, &cat)| (cp as u32, cat))
  }

  pub fn count(&self, cat: Category) -> usize {
    self.cats.iter().filter(|&&c| c == cat).count()
  }
}

impl Default for RangeTable {
  fn default() -> Self {
    Self::new()
  }
}

impl Debug for RangeTable {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    f.debug_struct("RangeTable")
      .field("cjk", &self.count(Category::Cjk))
      .field("contextual", &self.count(Category::Contextual))
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  #[test]
  fn starts_as_default() {
    let table = RangeTable::new();
    assert_eq!(table.len(), 0x110000);
    assert!(table.iter().all(|(_, cat)| cat == Category::NonCjk));
    assert_eq!(table.get(0x10FFFF), Category::NonCjk);
  }

  #[test]
  fn upgrade_is_compare_and_set() {
    let mut table = RangeTable::new();
    table.set(0x4E00, Category::Cjk);

    assert!(!table.upgrade(0x4E00, Category::NonCjk, Category::Contextual));
    assert_eq!(table.get(0x4E00), Category::Cjk);

    assert!(table.upgrade(0xE9, Category::NonCjk, Category::Contextual));
    assert!(!table.upgrade(0xE9, Category::NonCjk, Category::Contextual));
    assert_eq!(table.get(0xE9), Category::Contextual);
  }

  #[test]
  fn fill_is_half_open() {
    let mut table = RangeTable::new();
    table.fill(0x10..0x20, Category::Cjk);
    assert_eq!(table.get(0x0F), Category::NonCjk);
    assert_eq!(table.get(0x10), Category::Cjk);
    assert_eq!(table.get(0x1F), Category::Cjk);
    assert_eq!(table.get(0x20), Category::NonCjk);
    assert_eq!(table.count(Category::Cjk), 16);
  }

  #[test]
  #[should_panic]
  fn out_of_range_panics() {
    RangeTable::new().get(0x110000);
  }
}
