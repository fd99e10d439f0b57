use chat_scraper::handlers::{handle_links_list, init_tracing};
use commands::command_argument_builder;

mod commands;

fn main() {
    let cmd = command_argument_builder();
    let chosen_command = cmd.get_matches();

    init_tracing(chosen_command.get_count("verbose"));

    // clap enforces --filename
    let source = chosen_command
        .get_one::<String>("filename")
        .map(String::as_str)
        .unwrap_or(chat_scraper::STDIN_SOURCE);

    match chosen_command.subcommand() {
        Some(("links", primary_command)) => match primary_command.subcommand() {
            Some(("list", secondary_command)) => handle_links_list(source, secondary_command),
            _ => unreachable!("clap should ensure we don't get here"),
        },
        _ => unreachable!("clap should ensure we don't get here"),
    }
}

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);
