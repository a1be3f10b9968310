use super::{DEFAULT_CSV, VERSION};
use clap::{App, Arg, ArgMatches};
use std::path::PathBuf;

fn cli_app<'a, 'b>() -> App<'a, 'b> {
    let arg_csvin = Arg::with_name("input_csvfile")
        .help("name of the csv file with the Date and 1RM columns")
        .short("f")
        .long("csvfile")
        .takes_value(true)
        .default_value(DEFAULT_CSV);
    let arg_verbose = Arg::with_name("verbose")
        .help("print debug information, including the loaded data")
        .short("v")
        .long("verbose")
        .takes_value(false);
    App::new("onerm_plot")
        .version(VERSION.unwrap_or("unknown"))
        .about("cli app to plot the 1RM progress over time")
        .arg(arg_csvin)
        .arg(arg_verbose)
}

fn from_matches(cli_args: &ArgMatches) -> (PathBuf, bool) {
    let csvin = PathBuf::from(cli_args.value_of("input_csvfile").unwrap_or(DEFAULT_CSV));
    let verbose = cli_args.is_present("verbose");
    (csvin, verbose)
}

/// Takes the CLI arguments that control the plotting of the 1RM time series.
pub fn parse_cli() -> (PathBuf, bool) {
    from_matches(&cli_app().get_matches())
}
