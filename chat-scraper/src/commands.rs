use crate::CLAP_STYLING;
use clap::{arg, command};

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("chat-scraper")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("chat-scraper")
        .about("Scrape, list, and filter links from exported chat files")
        .styles(CLAP_STYLING)
        .arg(
            arg!(-f --"filename" <PATH>)
                .required(true)
                .alias("fn")
                .help("Path to the file (use '-' for stdin)"),
        )
        .arg(
            arg!(-v --"verbose" ...)
                .required(false)
                .help("Increase log verbosity on stderr (-v info, -vv debug)"),
        )
        .subcommand_required(true)
        .subcommand(
            command!("links")
                .about("Operations with links")
                .subcommand_required(true)
                .subcommand(
                    command!("list")
                        .about("List links")
                        .arg(
                            arg!(-c --"category" <CATEGORIES>)
                                .required(false)
                                .help("Categories separated by comma (e.g. linkedin,instagram)")
                                .default_value("all"),
                        )
                        .arg(
                            arg!(-g --"grouped")
                                .required(false)
                                .help("Display links grouped by category (instead of a flat list).")
                                .action(clap::ArgAction::SetTrue),
                        )
                        .arg(
                            arg!(--"match-mode" <MODE>)
                                .required(false)
                                .help(
                                    "How hostnames are matched against categories: substring \
                                     (host contains the name) or domain-suffix \
                                     (exact domain or subdomain)",
                                )
                                .value_parser(["substring", "domain-suffix"])
                                .default_value("substring"),
                        )
                        .arg(
                            arg!(--"skip-invalid")
                                .required(false)
                                .help("Warn about malformed links and skip them, don't abort")
                                .action(clap::ArgAction::SetTrue),
                        )
                        .arg(
                            arg!(--"format" <FORMAT>)
                                .required(false)
                                .help("Report format: text, json")
                                .value_parser(["text", "json"])
                                .default_value("text"),
                        )
                        .arg(
                            arg!(-o --"output" <PATH>)
                                .required(false)
                                .help("Save report to file (default: display to screen)")
                                .value_parser(clap::value_parser!(std::path::PathBuf)),
                        ),
                ),
        )
}
