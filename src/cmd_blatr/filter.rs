use anyhow::Context;
use clap::*;
use std::path::Path;

use blatr::libs::filter::{ProbeFilter, MAX_BLOCKS, MIN_MATCHES};
use blatr::libs::psl::PSL_HEADER_LINES;

pub fn make_subcommand() -> Command {
    Command::new("filter")
        .about("Keep long single-block probe hits from a delimited PSL table")
        .after_help(
            r###"
Rows are kept when column 1 (matches) > --min-matches and column 18
(blockCount) <= --max-blocks. Kept rows are reduced to columns
1, 2, 9, 10, 14, 15, 16 and 18, without a header.

Rows with fewer than 18 columns, or whose matches/blockCount are not
numbers, are skipped.

Without -o, the result is written to <outdir>/<input stem>_processed.csv.

Examples:
  blatr filter probes.csv --outdir out
  blatr filter --sep tab in.psl -o stdout
  blatr filter --min-matches 80 --max-blocks 2 probes.csv -o kept.csv

"###,
        )
        .arg(
            Arg::new("infile")
                .required(true)
                .index(1)
                .help("Input file. [stdin] for standard input"),
        )
        .arg(
            Arg::new("outdir")
                .long("outdir")
                .num_args(1)
                .default_value(".")
                .help("Output directory, used when --outfile is not given"),
        )
        .arg(
            Arg::new("outfile")
                .short('o')
                .long("outfile")
                .num_args(1)
                .help("Output filename. [stdout] for screen"),
        )
        .arg(
            Arg::new("sep")
                .long("sep")
                .num_args(1)
                .value_parser([",", "tab"])
                .default_value(",")
                .help("Field separator of input and output"),
        )
        .arg(
            Arg::new("header_lines")
                .long("header-lines")
                .value_parser(value_parser!(usize))
                .help("Number of preamble lines to skip [default: 5]"),
        )
        .arg(
            Arg::new("min_matches")
                .long("min-matches")
                .value_parser(value_parser!(f64))
                .help("Keep rows with matches greater than this [default: 108]"),
        )
        .arg(
            Arg::new("max_blocks")
                .long("max-blocks")
                .value_parser(value_parser!(f64))
                .help("Keep rows with blockCount not greater than this [default: 1]"),
        )
}

pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let infile = args.get_one::<String>("infile").unwrap();
    let outdir = args.get_one::<String>("outdir").unwrap();
    let delimiter = match args.get_one::<String>("sep").unwrap().as_str() {
        "tab" => b'\t',
        _ => b',',
    };
    let skip = super::header_lines(args, PSL_HEADER_LINES);

    let min_matches = args.get_one::<f64>("min_matches").copied();
    let max_blocks = args.get_one::<f64>("max_blocks").copied();

    let filter = ProbeFilter::new()
        .with_min_matches(min_matches.unwrap_or(MIN_MATCHES))
        .with_max_blocks(max_blocks.unwrap_or(MAX_BLOCKS));

    let outfile = match args.get_one::<String>("outfile") {
        Some(o) => o.to_string(),
        None => {
            std::fs::create_dir_all(outdir)
                .with_context(|| format!("could not create {}", outdir))?;
            Path::new(outdir)
                .join(processed_name(infile))
                .to_string_lossy()
                .to_string()
        }
    };

    let reader = blatr::reader(infile)?;
    let writer = blatr::writer(&outfile)?;
    let (n_read, n_kept) = filter.run(reader, writer, delimiter, skip)?;

    log::info!("Kept {} of {} rows, saved to {}", n_kept, n_read, outfile);

    Ok(())
}

/// `dir/sample.psl.csv` -> `sample.psl_processed.csv`
fn processed_name(infile: &str) -> String {
    let stem = Path::new(infile)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| infile.to_string());
    format!("{}_processed.csv", stem)
}
