use charfont::{Generator, GeneratorOptions};
use clap::{crate_version, value_parser, Arg, ArgAction, ArgMatches, Command};
use config::Config;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::process;

const OUTPUT_FILE: &str = "charfont";

fn main() {
  env_logger::Builder::from_env(
    env_logger::Env::default().default_filter_or("info"),
  )
  .init();

  let matches = cli().get_matches();
  if let Err(err) = run(&matches) {
    log::error!("{}", err);
    process::exit(1);
  }
}

fn cli() -> Command<'static> {
  Command::new("gen_charfont")
    .version(crate_version!())
    .about("Generate the character font-type table")
    .arg(
      Arg::new("output")
        .short('o')
        .long("output")
        .value_name("FILE")
        .help("file for the generated table")
        .takes_value(true)
        .value_parser(value_parser!(PathBuf)),
    )
    .arg(
      Arg::new("config")
        .short('c')
        .long("config")
        .value_name("FILE")
        .help("YAML config file, charfont.yaml by default")
        .takes_value(true)
        .value_parser(value_parser!(PathBuf)),
    )
    .arg(
      Arg::new("dry-run")
        .long("dry-run")
        .help("build the table without writing it")
        .action(ArgAction::SetTrue),
    )
    .arg(
      Arg::new("ICU_DATA_DIR")
        .help("icu-data checkout containing charset/data/ucm")
        .required(true)
        .value_parser(value_parser!(PathBuf)),
    )
}

fn run(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
  let config_path = matches.get_one::<PathBuf>("config").map(PathBuf::as_path);
  let config = config::load_config(config_path)?;
  let (options, output) = resolve(matches, config);

  let generator = Generator::new(options);
  if matches.get_one::<bool>("dry-run").copied().unwrap_or(false) {
    let generated = generator.build()?;
    log::info!(
      "dry run, {} records not written to {}",
      generated.records.len(),
      output.display()
    );
  } else {
    generator.generate(&output)?;
  }

  Ok(())
}

/// Command line > config file > built-in default.
fn resolve(
  matches: &ArgMatches,
  config: Config,
) -> (GeneratorOptions, PathBuf) {
  let icu_data_dir = matches
    .get_one::<PathBuf>("ICU_DATA_DIR")
    .cloned()
    .unwrap_or_default();
  let mut options = GeneratorOptions::new(icu_data_dir);
  if let Some(subdir) = config.charset.subdir {
    options.ucm_subdir = subdir;
  }
  if let Some(files) = config.charset.files {
    options.charset_files = files;
  }

  let output = matches
    .get_one::<PathBuf>("output")
    .cloned()
    .or(config.output)
    .unwrap_or_else(default_output);

  (options, output)
}

/// The table lives one level above this crate.
fn default_output() -> PathBuf {
  Path::new(env!("CARGO_MANIFEST_DIR"))
    .parent()
    .map_or_else(|| PathBuf::from(OUTPUT_FILE), |dir| dir.join(OUTPUT_FILE))
}
