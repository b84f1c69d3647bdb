use clap::*;

use blatr::libs::report::{ReportKind, Reports};

pub fn make_subcommand() -> Command {
    let cmd = Command::new("report")
        .about("Write a single probe/target report")
        .after_help(
            r###"
<what> is one of:

* target-counts - distinct probes per target
* probe-counts  - distinct targets per probe
* probe-hits    - sorted, comma-joined targets of each probe
* target-hits   - sorted, comma-joined probes of each target
* universal     - probes whose targets are exactly all observed targets

Rows are sorted by their first column.

Examples:
  blatr report probe-counts in.psl
  blatr report universal in.psl -o universal.csv
  blatr report target-hits --tsv in.psl.gz

"###,
        )
        .arg(
            Arg::new("what")
                .required(true)
                .index(1)
                .value_parser(ReportKind::ALL.map(|k| k.name()))
                .help("Which report to write"),
        )
        .arg(
            Arg::new("outfile")
                .short('o')
                .long("outfile")
                .num_args(1)
                .default_value("stdout")
                .help("Output filename. [stdout] for screen"),
        );

    super::psl_args(cmd).mut_arg("infile", |arg| arg.index(2))
}

pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let what = args.get_one::<String>("what").unwrap();
    let kind = ReportKind::from_name(what).unwrap();
    let outfile = args.get_one::<String>("outfile").unwrap();

    let relation = super::load_relation(args)?;
    let reports = Reports::from_relation(&relation);

    let writer = blatr::writer(outfile)?;
    reports.write_to(kind, writer, super::delimiter(args))?;

    Ok(())
}
