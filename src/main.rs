use anyhow::{Context, Result, bail};
use clap::builder::PossibleValuesParser;
use clap::{Arg, ArgAction, Command};
use std::path::Path;
use textgrid::transforms::{TransformDescriptor, apply_transforms};
use textgrid::{CropMode, CsvOptions, MIN_INTERVAL_LENGTH, SerializeOptions, TextgridForm};

#[derive(Debug, PartialEq)]
enum OutputFormat {
    Textgrid(TextgridForm),
    Csv,
}

fn detect_output_format(file_path: &str, long: bool, pivot: Option<&String>) -> OutputFormat {
    let is_csv = Path::new(file_path)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    if is_csv || pivot.is_some() {
        OutputFormat::Csv
    } else if long {
        OutputFormat::Textgrid(TextgridForm::Long)
    } else {
        OutputFormat::Textgrid(TextgridForm::Short)
    }
}

fn main() -> Result<()> {
    println!("TextGrid Converter v{}", env!("CARGO_PKG_VERSION"));
    println!();

    let matches = Command::new("textgrid")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Praat TextGrid converter")
        .arg(
            Arg::new("input")
                .help("Input TextGrid file (long or short form, UTF-8 or UTF-16)")
                .required(true)
                .value_name("INPUT_FILE")
                .index(1),
        )
        .arg(
            Arg::new("output")
                .help("Output file (.TextGrid or .csv)")
                .required(true)
                .value_name("OUTPUT_FILE")
                .index(2),
        )
        .arg(
            Arg::new("verbose")
                .help("Enable verbose output")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("long")
                .help("Write the long (human readable) form instead of the short form")
                .long("long")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("read-raw")
                .help("Keep entries with empty labels when reading")
                .long("read-raw")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("min-interval-length")
                .help("Fold intervals shorter than this many seconds into their neighbour")
                .long("min-interval-length")
                .value_name("SECONDS")
                .value_parser(clap::value_parser!(f64)),
        )
        .arg(
            Arg::new("no-ultrashort-removal")
                .help("Keep intervals of any length when writing")
                .long("no-ultrashort-removal")
                .action(ArgAction::SetTrue)
                .conflicts_with("min-interval-length"),
        )
        .arg(
            Arg::new("offset")
                .help("Shift all timestamps by seconds (e.g. 1.5, -0.5)")
                .long("offset")
                .allow_hyphen_values(true)
                .value_name("SECONDS")
                .value_parser(clap::value_parser!(f64)),
        )
        .arg(
            Arg::new("crop")
                .help("Keep only the region between two timestamps")
                .long("crop")
                .num_args(2)
                .value_names(["START", "END"])
                .value_parser(clap::value_parser!(f64)),
        )
        .arg(
            Arg::new("crop-mode")
                .help("How intervals crossing the crop boundaries are treated")
                .long("crop-mode")
                .value_name("MODE")
                .value_parser(PossibleValuesParser::new(CropMode::NAMES.iter().copied()))
                .default_value("truncated"),
        )
        .arg(
            Arg::new("rebase")
                .help("Move the cropped region to start at zero")
                .long("rebase")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("pivot")
                .help("Write CSV with one row per interval of this tier")
                .long("pivot")
                .value_name("TIER"),
        )
        .arg(
            Arg::new("tiers")
                .help("Tiers to include as CSV columns (comma-separated)")
                .long("tiers")
                .value_name("TIERS")
                .value_delimiter(','),
        )
        .arg(
            Arg::new("no-header")
                .help("Omit the CSV header row")
                .long("no-header")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let input_file = matches
        .get_one::<String>("input")
        .context("Missing input file")?;
    let output_file = matches
        .get_one::<String>("output")
        .context("Missing output file")?;
    let verbose = matches.get_flag("verbose");
    let long = matches.get_flag("long");
    let read_raw = matches.get_flag("read-raw");
    let rebase_to_zero = matches.get_flag("rebase");
    let include_header = !matches.get_flag("no-header");
    let pivot = matches.get_one::<String>("pivot");

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if verbose { "debug" } else { "warn" }),
    )
    .init();

    let min_interval_length = if matches.get_flag("no-ultrashort-removal") {
        None
    } else {
        Some(
            matches
                .get_one::<f64>("min-interval-length")
                .copied()
                .unwrap_or(MIN_INTERVAL_LENGTH),
        )
    };

    let crop = match matches.get_many::<f64>("crop") {
        Some(values) => match values.copied().collect::<Vec<_>>()[..] {
            [start, end] if start < end => Some((start, end)),
            [start, end] => bail!("Crop start {} must be before crop end {}", start, end),
            _ => bail!("--crop takes a start and an end"),
        },
        None => None,
    };

    let crop_mode: CropMode = matches
        .get_one::<String>("crop-mode")
        .map_or("truncated", String::as_str)
        .parse()?;

    let transforms = TransformDescriptor {
        offset_amount: matches.get_one::<f64>("offset").copied().unwrap_or(0.0),
        crop,
        crop_mode,
        rebase_to_zero,
    };

    let tier_names: Option<Vec<String>> = matches
        .get_many::<String>("tiers")
        .map(|names| names.cloned().collect());

    let output_format = detect_output_format(output_file, long, pivot);
    log::info!("Output format: {:?}", output_format);

    log::info!("Reading TextGrid file: {}", input_file);
    let bytes = std::fs::read(input_file)
        .with_context(|| format!("Failed to read input file: {}", input_file))?;
    let tg = textgrid::parse_textgrid_bytes(&bytes, read_raw)
        .with_context(|| format!("Failed to parse TextGrid file: {}", input_file))?;

    log::info!("Applying transforms...");
    let tg = apply_transforms(&tg, &transforms).context("Failed to apply transforms")?;

    let output_content = match output_format {
        OutputFormat::Csv => {
            let Some(pivot) = pivot else {
                bail!("CSV output needs a pivot tier (--pivot TIER)");
            };
            let options = CsvOptions {
                tier_names,
                include_header,
            };
            textgrid::serialize_textgrid_to_csv(&tg, pivot, &options)
                .context("Failed to build CSV")?
        }
        OutputFormat::Textgrid(form) => {
            let options = SerializeOptions {
                min_interval_length,
                form,
                ..SerializeOptions::default()
            };
            textgrid::serialize_textgrid(&tg, &options).context("Failed to serialize TextGrid")?
        }
    };

    log::info!("Writing file: {}", output_file);
    std::fs::write(output_file, output_content)
        .with_context(|| format!("Failed to write output file: {}", output_file))?;

    Ok(())
}
