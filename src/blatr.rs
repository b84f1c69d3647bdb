extern crate clap;
use clap::*;

mod cmd_blatr;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .format_timestamp(None)
        .format_target(false)
        .init();

    let app = Command::new("blatr")
        .version(crate_version!())
        .author(crate_authors!())
        .about("`blatr` - BLAT probe/target relations")
        .propagate_version(true)
        .arg_required_else_help(true)
        .color(ColorChoice::Auto)
        .subcommand(cmd_blatr::relate::make_subcommand())
        .subcommand(cmd_blatr::report::make_subcommand())
        .subcommand(cmd_blatr::filter::make_subcommand())
        .after_help(
            r###"Subcommands:

* relate - Write all probe/target reports of a PSL file into a directory
* report - Write a single probe/target report
* filter - Keep long single-block probe hits from a delimited PSL table

Set RUST_LOG=info to see run summaries.

"###,
        );

    // Check which subcomamnd the user ran...
    match app.get_matches().subcommand() {
        Some(("relate", sub_matches)) => cmd_blatr::relate::execute(sub_matches),
        Some(("report", sub_matches)) => cmd_blatr::report::execute(sub_matches),
        Some(("filter", sub_matches)) => cmd_blatr::filter::execute(sub_matches),
        _ => unreachable!(),
    }?;

    Ok(())
}
