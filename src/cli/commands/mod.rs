use crate::app_lib::config::LogLevel;
use clap::{
    builder::{
        styling::{AnsiColor, Effects, Styles},
        ValueParser,
    },
    Arg, ColorChoice, Command,
};

/// `-v` count or `CROSSBOX_LOG_LEVEL`, as a name or a number from 0 (error) to 4 (trace).
pub fn validator_log_level() -> ValueParser {
    ValueParser::from(|level: &str| level.parse::<LogLevel>().map(LogLevel::verbosity))
}

pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new("crossbox")
        .about("CrossBoxFit identity console")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new("api-url")
                .short('u')
                .long("api-url")
                .help("Identity API base URL, example: https://api.crossbox.fit")
                .default_value("http://localhost:4000")
                .env("CROSSBOX_API_URL"),
        )
        .arg(
            Arg::new("timeout")
                .short('t')
                .long("timeout")
                .help("Request timeout in seconds")
                .default_value("10")
                .env("CROSSBOX_TIMEOUT")
                .value_parser(clap::value_parser!(u64).range(1..=300)),
        )
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbose")
                .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
                .env("CROSSBOX_LOG_LEVEL")
                .global(true)
                .action(clap::ArgAction::Count)
                .value_parser(validator_log_level()),
        )
}
