use clap::*;
use std::path::Path;

use blatr::libs::report::Reports;

pub fn make_subcommand() -> Command {
    let cmd = Command::new("relate")
        .about("Write all probe/target reports of a PSL file")
        .after_help(
            r###"
Build the deduplicated probe (qName) / target (tName) relation of a BLAT
PSL file and write five tables into the output directory:

* Unique_Target_Counts.csv       - distinct probes per target
* Unique_Probe_Counts.csv        - distinct targets per probe
* Probe_to_Target_Hits.csv       - sorted targets of each probe
* Target_to_Probe_Hits.csv       - sorted probes of each target
* Probes_Hitting_All_Targets.csv - probes hitting every observed target

A record whose blockCount is not an integer aborts the run; no file is
written in that case.

Examples:
  blatr relate in.psl -o reports
  blatr relate --tsv in.psl -o reports

"###,
        )
        .arg(
            Arg::new("outdir")
                .short('o')
                .long("outdir")
                .num_args(1)
                .default_value(".")
                .help("Output directory"),
        );

    super::psl_args(cmd)
}

pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let outdir = args.get_one::<String>("outdir").unwrap();

    let relation = super::load_relation(args)?;
    let reports = Reports::from_relation(&relation);

    let paths = reports.write_dir(Path::new(outdir), super::delimiter(args))?;
    log::info!("{} reports saved in {}", paths.len(), outdir);

    Ok(())
}
