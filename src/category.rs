use std::fmt::{self, Display, Formatter};

/// Font-type of a single codepoint.
///
/// The discriminants are the digits written to the generated table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Category {
  /// Reserved. Never produced, and treated exactly like `NonCjk`.
  Unused = 0,
  /// Use the non-CJK font. Every codepoint starts here.
  NonCjk = 1,
  /// Always use the CJK font.
  Cjk = 2,
  /// Use the CJK font in CJK mode, otherwise the non-CJK font.
  Contextual = 3,
}

impl Category {
  pub const DEFAULT: Category = Category::NonCjk;

  pub fn is_default(self) -> bool {
    matches!(self, Self::Unused | Self::NonCjk)
  }

  pub fn digit(self) -> u8 {
    self as u8
  }

  pub fn from_digit(digit: u8) -> Option<Self> {
    match digit {
      0 => Some(Self::Unused),
      1 => Some(Self::NonCjk),
      2 => Some(Self::Cjk),
      3 => Some(Self::Contextual),
      _ => None,
    }
  }
}

impl Default for Category {
  fn default() -> Self {
    Self::DEFAULT
  }
}

impl Display for Category {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.digit())
  }
}
