use crate::blocks::{self, BlockRange, CJK_BLOCKS};
use crate::category::Category;
use crate::charset::{self, RefineStats, UCM_SUBDIR};
use crate::encoder::{self, RangeRecord};
use crate::error::{Error, Result};
use crate::table::RangeTable;
use std::fs::{self, Permissions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

#[derive(Debug, Clone)]
pub struct GeneratorOptions {
  /// Root of an icu-data checkout.
  pub icu_data_dir: PathBuf,
  /// Location of the `.ucm` files, relative to `icu_data_dir`.
  pub ucm_subdir: PathBuf,
  pub charset_files: Vec<String>,
  pub blocks: &'static [BlockRange],
}

impl GeneratorOptions {
  pub fn new(icu_data_dir: impl Into<PathBuf>) -> Self {
    Self {
      icu_data_dir: icu_data_dir.into(),
      ucm_subdir: PathBuf::from(UCM_SUBDIR),
      charset_files: charset::default_file_names().map(String::from).collect(),
      blocks: CJK_BLOCKS,
    }
  }

  pub fn ucm_dir(&self) -> PathBuf {
    self.icu_data_dir.join(&self.ucm_subdir)
  }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationSummary {
  pub seeded: usize,
  pub refine: RefineStats,
  pub records: usize,
  pub cjk: usize,
  pub contextual: usize,
}

#[derive(Debug, Clone)]
pub struct Generated {
  pub records: Vec<RangeRecord>,
  pub summary: GenerationSummary,
}

pub struct Generator {
  options: GeneratorOptions,
}

impl Generator {
  pub fn new(options: GeneratorOptions) -> Self {
    Self { options }
  }

  /// Seeds, refines and encodes a fresh table.
  pub fn build(&self) -> Result<Generated> {
    let mut table = RangeTable::new();

    let seeded = blocks::seed(&mut table, self.options.blocks);
    log::info!(
      "seeded {} codepoints from {} blocks",
      seeded,
      self.options.blocks.len()
    );

    let ucm_dir = self.options.ucm_dir();
    let refine = charset::refine_from_dir(
      &mut table,
      &ucm_dir,
      &self.options.charset_files,
    )?;
    log::info!(
      "refined {} codepoints from {} mappings in {} files under {}",
      refine.upgraded,
      refine.mappings,
      refine.files,
      ucm_dir.display()
    );

    let records = encoder::encode(&table);
    let summary = GenerationSummary {
      seeded,
      refine,
      records: records.len(),
      cjk: table.count(Category::Cjk),
      contextual: table.count(Category::Contextual),
    };
    log::info!(
      "{} records ({} CJK, {} contextual codepoints)",
      summary.records,
      summary.cjk,
      summary.contextual
    );

    Ok(Generated { records, summary })
  }

  /// Builds the table and replaces `output` with it. Nothing is written
  /// unless the whole table was built.
  pub fn generate(
    &self,
    output: impl AsRef<Path>,
  ) -> Result<GenerationSummary> {
    let generated = self.build()?;
    write_table_file(&generated.records, output)?;
    Ok(generated.summary)
  }
}

/// Mode for the replacement file: the existing file's, or 0644 for a new one.
fn output_permissions(path: &Path) -> io::Result<Option<Permissions>> {
  match fs::metadata(path) {
    Ok(meta) => Ok(Some(meta.permissions())),
    Err(err) if err.kind() == io::ErrorKind::NotFound => {
      Ok(default_permissions())
    }
    Err(err) => Err(err),
  }
}

#[cfg(unix)]
fn default_permissions() -> Option<Permissions> {
  use std::os::unix::fs::PermissionsExt;
  Some(Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<Permissions> {
  None
}

/// Writes the table next to `path` and renames it over `path`. An existing
/// file keeps its permissions.
pub fn write_table_file(
  records: &[RangeRecord],
  path: impl AsRef<Path>,
) -> Result<()> {
  let path = path.as_ref();
  let text = encoder::render_table(records);
  let dir = match path.parent() {
    Some(dir) if !dir.as_os_str().is_empty() => dir,
    _ => Path::new("."),
  };

  let mut file =
    NamedTempFile::new_in(dir).map_err(|err| Error::io(dir, err))?;
  let tmp_path = file.path().to_owned();
  let perms = output_permissions(path).map_err(|err| Error::io(path, err))?;
  if let Some(perms) = perms {
    file
      .as_file()
      .set_permissions(perms)
      .map_err(|err| Error::io(&tmp_path, err))?;
  }
  file
    .write_all(text.as_bytes())
    .and_then(|_| file.flush())
    .map_err(|err| Error::io(tmp_path, err))?;
  file.persist(path).map_err(|err| Error::Persist {
    path: path.to_owned(),
    source: err.error,
  })?;

  log::info!("wrote {}", path.display());
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::lookup::CharFontTable;
  use pretty_assertions::assert_eq;
  use std::fs;

  const CP932: &str = "\
<code_set_name> \"windows-932-2000\"
CHARMAP
<U0041> \\x41 |0
<U00A7> \\x81\\x98 |0
<U3042> \\x82\\xA0 |0
<UE000> \\xF0\\x40 |0
END CHARMAP
";

  const CP936: &str = "\
CHARMAP
<U00A7> \\xA1\\xEC |0
<U00E9> \\xA8\\xA6 |0
<U2460> \\xA2\\xD9 |0
<U2461> \\xA2\\xDA |0
END CHARMAP
";

  fn icu_data() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let ucm = dir.path().join(UCM_SUBDIR);
    fs::create_dir_all(&ucm).unwrap();
    fs::write(ucm.join("a.ucm"), CP932).unwrap();
    fs::write(ucm.join("b.ucm"), CP936).unwrap();
    dir
  }

  fn options(dir: &Path) -> GeneratorOptions {
    GeneratorOptions {
      charset_files: vec!["a.ucm".into(), "b.ucm".into()],
      ..GeneratorOptions::new(dir)
    }
  }

  #[test]
  fn build() {
    let dir = icu_data();
    let generated = Generator::new(options(dir.path())).build().unwrap();

    let table = CharFontTable::new(generated.records.clone());
    assert_eq!(table.category_of(0x41), Category::NonCjk);
    assert_eq!(table.category_of(0xA7), Category::Contextual);
    assert_eq!(table.category_of(0xE9), Category::Contextual);
    assert_eq!(table.category_of(0x3042), Category::Cjk);
    assert_eq!(table.category_of(0xE000), Category::NonCjk);
    assert_eq!(
      &generated.records[..2],
      &[
        RangeRecord::new(0xA7, 0xA7, Category::Contextual),
        RangeRecord::new(0xE9, 0xE9, Category::Contextual),
      ]
    );
    assert!(generated
      .records
      .contains(&RangeRecord::new(0x2460, 0x2461, Category::Contextual)));
    assert_eq!(generated.summary.refine.upgraded, 4);
    assert_eq!(generated.summary.contextual, 4);
    assert_eq!(generated.summary.records, generated.records.len());
  }

  #[test]
  fn generate_writes_file() {
    let dir = icu_data();
    let output = dir.path().join("charfont");

    let summary = Generator::new(options(dir.path()))
      .generate(&output)
      .unwrap();

    let table = CharFontTable::load(&output).unwrap();
    assert_eq!(table.records().len(), summary.records);
    assert!(table.uses_cjk_font(0x4E00, false));
    assert!(table.uses_cjk_font(0x2460, true));
    assert!(!table.uses_cjk_font(0x2460, false));
  }

  #[test]
  fn failed_build_writes_nothing() {
    let dir = icu_data();
    let output = dir.path().join("charfont");
    let options = GeneratorOptions {
      charset_files: vec!["a.ucm".into(), "missing.ucm".into()],
      ..GeneratorOptions::new(dir.path())
    };

    let err = Generator::new(options).generate(&output).unwrap_err();

    assert!(matches!(err, Error::Io { .. }));
    assert!(!output.exists());
  }

  #[test]
  fn overwrites_existing_output() {
    let dir = icu_data();
    let output = dir.path().join("charfont");
    fs::write(&output, "stale").unwrap();

    Generator::new(options(dir.path()))
      .generate(&output)
      .unwrap();

    let text = fs::read_to_string(&output).unwrap();
    assert!(text.starts_with("# Generated by gen_charfont\n"));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
  }

  #[cfg(unix)]
  #[test]
  fn keeps_existing_mode() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("charfont");
    fs::write(&output, "stale").unwrap();
    fs::set_permissions(&output, Permissions::from_mode(0o640)).unwrap();

    write_table_file(&[], &output).unwrap();

    let mode = fs::metadata(&output).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o640);
  }

  #[cfg(unix)]
  #[test]
  fn new_output_is_world_readable() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("charfont");

    write_table_file(&[], &output).unwrap();

    let mode = fs::metadata(&output).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o644);
  }

  #[test]
  fn fixture_icu_data() {
    let dir = std::env::current_dir()
      .unwrap()
      .join("test/fixtures/icu-data");
    let generated = Generator::new(GeneratorOptions::new(dir)).build().unwrap();

    let contextual: Vec<_> = generated
      .records
      .iter()
      .filter(|r| r.category == Category::Contextual)
      .map(|r| (r.start, r.end))
      .collect();
    assert_eq!(
      contextual,
      vec![
        (0xA1, 0xA1),
        (0xA4, 0xA4),
        (0xA7, 0xA8),
        (0xB0, 0xB0),
        (0xC6, 0xC6),
        (0xCA, 0xCA),
        (0xE0, 0xE0),
        (0xE9, 0xE9),
        (0x101, 0x101),
        (0x391, 0x391),
        (0x2010, 0x2010),
        (0x2160, 0x2160),
        (0x2460, 0x2461),
        (0x2550, 0x2551),
      ]
    );

    let cjk: Vec<_> = generated
      .records
      .iter()
      .filter(|r| r.category == Category::Cjk)
      .map(|r| (r.start, r.end + 1))
      .collect();
    let blocks: Vec<_> = CJK_BLOCKS.iter().map(|b| (b.start, b.end)).collect();
    assert_eq!(cjk, blocks);

    assert_eq!(
      generated.summary,
      GenerationSummary {
        seeded: generated.summary.cjk,
        refine: RefineStats {
          files: 5,
          mappings: 42,
          upgraded: 17,
        },
        records: 31,
        cjk: generated.summary.seeded,
        contextual: 17,
      }
    );
  }
}
