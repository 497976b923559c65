//! Character font-type table: which codepoints are drawn with the CJK font.

pub mod blocks;
pub mod category;
pub mod charset;
pub mod encoder;
pub mod error;
pub mod generator;
pub mod lookup;
pub mod table;

pub use self::category::Category;
pub use self::encoder::RangeRecord;
pub use self::error::{Error, Result};
pub use self::generator::{GenerationSummary, Generator, GeneratorOptions};
pub use self::lookup::CharFontTable;
pub use self::table::RangeTable;
