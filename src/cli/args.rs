use clap::{ArgAction, Parser};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "namegame",
    version,
    about = "fetch, shuffle, sort and search a list of people",
    long_about = "namegame fetches a list of people with headshots from a profiles endpoint and renders them as a table you can shuffle, sort or search.\n\nExamples:\n  namegame\n  namegame --sort last\n  namegame --search mat -o people.html\n  namegame --interactive\n\nTip: Use --init-config to write ~/.namegame/config.yml and keep CLI invocations short."
)]
pub struct CliArgs {
    #[arg(
        short = 'v',
        long = "vb",
        visible_alias = "verbose",
        action = ArgAction::Count,
        help_heading = "Output",
        help = "Increase verbosity (-v, -vv, -vvv)."
    )]
    pub verbose: u8,

    #[arg(
        short = 'C',
        long = "cfg",
        visible_alias = "config",
        value_name = "FILE",
        help_heading = "Input",
        help = "Path to config file (defaults to ~/.namegame/config.yml)."
    )]
    pub config: Option<String>,

    #[arg(
        long = "ic",
        visible_alias = "init-config",
        help_heading = "Input",
        help = "Write a default config file (if missing) and exit."
    )]
    pub init_config: bool,

    #[arg(
        short = 'e',
        long = "ep",
        visible_alias = "endpoint",
        value_name = "URL",
        help_heading = "Input",
        help = "Profiles endpoint returning a JSON array of people."
    )]
    pub endpoint: Option<String>,

    #[arg(
        short = 'T',
        long = "to",
        visible_alias = "timeout",
        value_name = "SECONDS",
        help_heading = "HTTP",
        help = "Request timeout in seconds."
    )]
    pub timeout: Option<u64>,

    #[arg(
        short = 'p',
        long = "px",
        visible_alias = "proxy",
        value_name = "URL",
        help_heading = "HTTP",
        help = "HTTP proxy URL (e.g. http://127.0.0.1:8080)."
    )]
    pub proxy: Option<String>,

    #[arg(
        long = "sch",
        visible_alias = "scheme",
        value_name = "SCHEME",
        help_heading = "HTTP",
        help = "Scheme prepended to scheme-relative headshot URLs (default http:)."
    )]
    pub scheme: Option<String>,

    #[arg(
        short = 's',
        long = "sr",
        visible_alias = "search",
        value_name = "TEXT",
        conflicts_with_all = ["shuffle", "sort"],
        help_heading = "View",
        help = "Only show people whose first or last name contains TEXT (case-insensitive)."
    )]
    pub search: Option<String>,

    #[arg(
        short = 'S',
        long = "sh",
        visible_alias = "shuffle",
        conflicts_with = "sort",
        help_heading = "View",
        help = "Show the list in random order."
    )]
    pub shuffle: bool,

    #[arg(
        short = 'k',
        long = "so",
        visible_alias = "sort",
        value_name = "KEY",
        help_heading = "View",
        help = "Sort by first or last name (first, last)."
    )]
    pub sort: Option<String>,

    #[arg(
        short = 'i',
        long = "it",
        visible_alias = "interactive",
        help_heading = "View",
        help = "Keep reading commands (search, shuffle, sort) from stdin after the first render."
    )]
    pub interactive: bool,

    #[arg(
        short = 'o',
        long = "out",
        visible_alias = "output",
        value_name = "FILE",
        help_heading = "Output",
        help = "Write the rendered list to a file."
    )]
    pub output: Option<String>,

    #[arg(
        short = 'A',
        long = "of",
        visible_alias = "output-format",
        value_name = "FORMAT",
        help_heading = "Output",
        help = "Output file format (text, json, html)."
    )]
    pub output_format: Option<String>,

    #[arg(
        short = 'n',
        long = "nc",
        visible_alias = "no-color",
        help_heading = "Output",
        help = "Disable colored output."
    )]
    pub no_color: bool,

    #[arg(
        short = 'c',
        long = "clr",
        visible_alias = "color",
        help_heading = "Output",
        help = "Enable colored output (overrides --no-color)."
    )]
    pub color: bool,
}
