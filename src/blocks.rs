//! Unicode blocks that are always drawn with the CJK font.
//!
//! Block list follows "The Unicode Standard Version 15.0, Chapter 18 East
//! Asia". Each `end` is the last codepoint of the block as published, but is
//! used as an exclusive bound, so the final codepoint of every range is left
//! out of the seeded set. Generated tables depend on that exact set.

use crate::category::Category;
use crate::table::RangeTable;
use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockRange {
  /// Blocks covered, first to last.
  pub name: &'static str,
  pub start: u32,
  /// Exclusive.
  pub end: u32,
}

impl BlockRange {
  const fn new(name: &'static str, start: u32, end: u32) -> Self {
    Self { name, start, end }
  }

  pub fn range(&self) -> Range<u32> {
    self.start..self.end
  }

  pub fn len(&self) -> usize {
    (self.end - self.start) as usize
  }

  pub fn is_empty(&self) -> bool {
    self.start >= self.end
  }
}

pub const CJK_BLOCKS: &[BlockRange] = &[
  BlockRange::new("Hangul Jamo", 0x1100, 0x11FF),
  BlockRange::new("CJK Radicals Supplement..Kangxi Radicals", 0x2E80, 0x2FDF),
  BlockRange::new(
    "Ideographic Description Characters..CJK Unified Ideographs Extension A",
    0x2FF0,
    0x4DBF,
  ),
  BlockRange::new("CJK Unified Ideographs..Lisu", 0x4E00, 0xA4FF),
  BlockRange::new("Hangul Jamo Extended-A", 0xA960, 0xA97F),
  BlockRange::new("Hangul Syllables..Hangul Jamo Extended-B", 0xAC00, 0xD7FF),
  BlockRange::new("CJK Compatibility Ideographs", 0xF900, 0xFAFF),
  BlockRange::new("Halfwidth and Fullwidth Forms", 0xFF00, 0xFFEF),
  BlockRange::new("Miao", 0x16F00, 0x16F9F),
  BlockRange::new(
    "Ideographic Symbols and Punctuation..Tangut Supplement",
    0x16FE0,
    0x18D8F,
  ),
  BlockRange::new("Kana Extended-B", 0x1AFF0, 0x1AFFF),
  BlockRange::new("Kana Supplement..Nushu", 0x1B000, 0x1B2FF),
  BlockRange::new("Enclosed Ideographic Supplement", 0x1F200, 0x1F2FF),
  BlockRange::new("CJK Unified Ideographs Extension B", 0x20000, 0x2A6DF),
  BlockRange::new(
    "CJK Unified Ideographs Extension C..CJK Unified Ideographs Extension F",
    0x2A700,
    0x2EBEF,
  ),
  BlockRange::new(
    "CJK Compatibility Ideographs Supplement",
    0x2F800,
    0x2FA1F,
  ),
  BlockRange::new(
    "CJK Unified Ideographs Extension G..CJK Unified Ideographs Extension H",
    0x30000,
    0x323AF,
  ),
];

/// Marks every codepoint of `blocks` as [`Category::Cjk`]. Returns the number
/// of codepoints written.
pub fn seed(table: &mut RangeTable, blocks: &[BlockRange]) -> usize {
  let mut written = 0;
  for block in blocks {
    log::debug!(
      "seeding U+{:04X}..U+{:04X} {}",
      block.start,
      block.end,
      block.name
    );
    table.fill(block.range(), Category::Cjk);
    written += block.len();
  }
  written
}
