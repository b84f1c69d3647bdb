//! Subcommand modules for the `blatr` binary.

pub mod filter;
pub mod relate;
pub mod report;

use blatr::libs::psl::{read_records, PSL_HEADER_LINES};
use blatr::libs::relation::Relation;

/// Arguments shared by the subcommands reading PSL files.
pub fn psl_args(cmd: clap::Command) -> clap::Command {
    cmd.arg(
        clap::Arg::new("infile")
            .required(true)
            .index(1)
            .help("Input PSL file. [stdin] for standard input"),
    )
    .arg(
        clap::Arg::new("header_lines")
            .long("header-lines")
            .value_parser(clap::value_parser!(usize))
            .help("Number of preamble lines to skip [default: 5]"),
    )
    .arg(
        clap::Arg::new("tsv")
            .long("tsv")
            .action(clap::ArgAction::SetTrue)
            .help("Write tab-separated instead of comma-separated tables"),
    )
}

pub fn delimiter(args: &clap::ArgMatches) -> u8 {
    if args.get_flag("tsv") {
        b'\t'
    } else {
        b','
    }
}

pub fn header_lines(args: &clap::ArgMatches, default: usize) -> usize {
    args.get_one::<usize>("header_lines")
        .copied()
        .unwrap_or(default)
}

/// Load a PSL file and build its relation. Any malformed record aborts.
pub fn load_relation(args: &clap::ArgMatches) -> anyhow::Result<Relation> {
    let infile = args.get_one::<String>("infile").unwrap();
    let skip = header_lines(args, PSL_HEADER_LINES);

    let records = read_records(blatr::reader(infile)?, skip)?;
    let relation = Relation::from_records(&records)?;

    log::info!(
        "{}: {} records, {} probes, {} targets, {} distinct pairs",
        infile,
        records.len(),
        relation.probe_count(),
        relation.target_count(),
        relation.pair_count()
    );

    Ok(relation)
}
