use std::collections::HashMap;
use std::io::Write;
use std::time::Duration;

use clap::{error::ErrorKind, CommandFactory, Parser};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tokio::fs::OpenOptions;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::cli::args::CliArgs;
use crate::cli::validation;
use crate::config::{self, ConfigFile};
use crate::output::{self, OutputFormat};
use crate::person;
use crate::roster::{Action, Command, Roster};
use crate::source::{self, DataSource, SourceOptions};
use crate::transform::SortKey;

fn print_banner() {
    const BANNER: &str = r#"
  _ __   __ _ _ __ ___   ___  __ _  __ _ _ __ ___   ___
 | '_ \ / _` | '_ ` _ \ / _ \/ _` |/ _` | '_ ` _ \ / _ \
 | | | | (_| | | | | | |  __/ (_| | (_| | | | | | |  __/
 |_| |_|\__,_|_| |_| |_|\___|\__, |\__,_|_| |_| |_|\___|
                             |___/
    "#;
    println!("{}", BANNER.bold().cyan());
}

fn format_kv_line(label: &str, value: &str) {
    println!(":: {:<10}: {}", label.bold().white(), value);
}

fn render_custom_help() -> String {
    let cmd = CliArgs::command();
    let mut out = String::new();

    out.push_str(cmd.get_name());
    if let Some(version) = cmd.get_version() {
        out.push(' ');
        out.push_str(version);
    }
    out.push('\n');

    if let Some(long_about) = cmd.get_long_about() {
        out.push('\n');
        out.push_str(&long_about.to_string());
        out.push('\n');
    } else if let Some(about) = cmd.get_about() {
        out.push_str(&about.to_string());
        out.push('\n');
    }

    out.push('\n');
    out.push_str("Usage: ");
    out.push_str(cmd.get_name());
    out.push_str(" [OPTIONS]\n\n");

    let mut sections: Vec<(String, Vec<&clap::Arg>)> = Vec::new();
    let mut section_idx: HashMap<String, usize> = HashMap::new();

    for arg in cmd.get_arguments() {
        if arg.is_hide_set() {
            continue;
        }
        let heading = arg.get_help_heading().unwrap_or("Options").to_string();
        let idx = match section_idx.get(&heading).copied() {
            Some(i) => i,
            None => {
                sections.push((heading.clone(), Vec::new()));
                let i = sections.len() - 1;
                section_idx.insert(heading, i);
                i
            }
        };
        sections[idx].1.push(arg);
    }

    for (heading, args) in sections {
        out.push_str(&heading);
        out.push_str(":\n");
        for arg in args {
            let mut names: Vec<String> = Vec::new();
            if let Some(short) = arg.get_short() {
                names.push(format!("-{short}"));
            }
            if let Some(aliases) = arg.get_visible_aliases() {
                for alias in aliases {
                    names.push(format!("--{alias}"));
                }
            }
            if let Some(long) = arg.get_long() {
                names.push(format!("--{long}"));
            }
            let mut flag = names.join(", ");
            if let Some(value_names) = arg.get_value_names() {
                if let Some(v) = value_names.first() {
                    flag.push_str(&format!(" <{v}>"));
                }
            }
            let help = arg.get_help().map(|h| h.to_string()).unwrap_or_default();
            out.push_str(&format!("  {flag:<34} {help}\n"));
        }
        out.push('\n');
    }
    out
}

fn init_tracing(verbose: u8, no_color: bool) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(!no_color)
        .try_init();
}

#[derive(Clone, Debug)]
struct RunConfig {
    source: SourceOptions,
    action: Option<Action>,
    interactive: bool,
    output: Option<String>,
    output_format: OutputFormat,
    no_color: bool,
    verbose: u8,
}

fn resolve_output_format(
    explicit: Option<&str>,
    path: Option<&str>,
) -> Result<OutputFormat, String> {
    if let Some(raw) = explicit {
        return OutputFormat::parse(raw).ok_or_else(|| {
            format!("invalid output format '{raw}', expected text, json or html")
        });
    }
    Ok(path
        .and_then(output::infer_format_from_path)
        .unwrap_or(OutputFormat::Text))
}

fn build_run_config(args: CliArgs, cfg: ConfigFile) -> Result<RunConfig, String> {
    validation::validate(&args)?;

    let no_color = if args.color {
        false
    } else {
        args.no_color || cfg.no_color.unwrap_or(false)
    };

    let endpoint = args
        .endpoint
        .or(cfg.endpoint)
        .map(|e| e.trim().to_string())
        .unwrap_or_else(|| source::DEFAULT_ENDPOINT.to_string());
    validation::validate_endpoint(&endpoint)?;

    let timeout_seconds = args
        .timeout
        .or(cfg.timeout)
        .unwrap_or(source::DEFAULT_TIMEOUT_SECONDS);
    if timeout_seconds == 0 {
        return Err("invalid timeout, expected positive integer".to_string());
    }

    let proxy = args.proxy.or(cfg.proxy).filter(|p| !p.trim().is_empty());
    let headshot_scheme = person::normalize_scheme(
        args.scheme
            .or(cfg.headshot_scheme)
            .unwrap_or_else(|| person::DEFAULT_HEADSHOT_SCHEME.to_string())
            .as_str(),
    );

    let action = if let Some(query) = args.search {
        Some(Action::Search(query))
    } else if args.shuffle {
        Some(Action::Shuffle)
    } else if let Some(raw) = args.sort.as_deref() {
        let key = SortKey::parse(raw)
            .ok_or_else(|| format!("invalid --sort '{raw}', expected first or last"))?;
        Some(Action::Sort(key))
    } else {
        None
    };

    let output = args
        .output
        .or(cfg.output)
        .map(|p| config::expand_tilde_string(&p));
    let output_format = resolve_output_format(
        args.output_format.or(cfg.output_format).as_deref(),
        output.as_deref(),
    )?;

    Ok(RunConfig {
        source: SourceOptions {
            endpoint,
            timeout_seconds,
            proxy,
            headshot_scheme,
        },
        action,
        interactive: args.interactive,
        output,
        output_format,
        no_color,
        verbose: args.verbose,
    })
}

fn print_view<W: Write>(
    out: &mut W,
    roster: &Roster,
    label: &str,
    color: bool,
) -> Result<(), String> {
    let records = output::build_records(roster.visible());
    let table = output::render_text(&records, color);
    let status = format!(
        "{} of {} people ({})",
        roster.visible().len(),
        roster.full_list().len(),
        label
    );
    let status = if color {
        status.bold().green().to_string()
    } else {
        status
    };
    out.write_all(&table)
        .and_then(|_| writeln!(out, "{status}"))
        .and_then(|_| out.flush())
        .map_err(|e| format!("failed to write to stdout: {e}"))
}

/// Reads one command per line until EOF or quit, re-rendering after each
/// action. Returns the number of actions applied.
async fn run_session<R, W>(
    roster: &mut Roster,
    reader: R,
    out: &mut W,
    color: bool,
) -> Result<usize, String>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut applied = 0usize;
    let mut lines = reader.lines();
    loop {
        write!(out, "{}\n> ", output::render_controls(color))
            .and_then(|_| out.flush())
            .map_err(|e| format!("failed to write to stdout: {e}"))?;

        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => return Err(format!("failed to read command: {e}")),
        };
        if line.trim().is_empty() {
            continue;
        }
        match Command::parse(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Apply(action)) => {
                debug!(?action, "applying action");
                roster.apply(&action);
                applied += 1;
                print_view(out, roster, &action.label(), color)?;
            }
            Err(e) => {
                writeln!(out, "{e}").map_err(|e| format!("failed to write to stdout: {e}"))?;
            }
        }
    }
    Ok(applied)
}

async fn write_output(path: &str, format: OutputFormat, roster: &Roster) -> Result<(), String> {
    let records = output::build_records(roster.visible());
    let rendered = output::render(format, &records, false);
    let mut outfile = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
        .await
        .map_err(|e| format!("failed to open output file: {e}"))?;
    outfile
        .write_all(&rendered)
        .await
        .map_err(|_| "failed to write output file".to_string())?;
    outfile
        .flush()
        .await
        .map_err(|e| format!("failed to flush output file: {e}"))?;
    info!(path, "wrote output file");
    Ok(())
}

async fn fetch_with_spinner(
    data_source: &DataSource,
) -> Result<Vec<person::Person>, source::SourceError> {
    let pb = ProgressBar::new_spinner();
    pb.set_draw_target(ProgressDrawTarget::stderr());
    pb.enable_steady_tick(Duration::from_millis(100));
    let style = ProgressStyle::default_spinner().template("{spinner:.blue} {elapsed} {msg}");
    if let Ok(style) = style {
        pb.set_style(style);
    }
    pb.set_message(format!("fetching {}", data_source.endpoint()));
    let result = data_source.fetch_person_list().await;
    pb.finish_and_clear();
    result
}

async fn run_async(run: RunConfig) -> Result<(), String> {
    if run.no_color {
        colored::control::set_override(false);
    }
    let color = !run.no_color;
    print_banner();

    format_kv_line("Endpoint", &run.source.endpoint);
    format_kv_line("Timeout", &format!("{}s", run.source.timeout_seconds));
    if let Some(proxy) = run.source.proxy.as_deref() {
        format_kv_line("Proxy", proxy);
    }
    if let Some(action) = run.action.as_ref() {
        format_kv_line("View", &action.label());
    }
    if let Some(path) = run.output.as_deref() {
        format_kv_line("Output", path);
    }
    println!();

    let now = Instant::now();
    let data_source = DataSource::new(run.source.clone()).map_err(|e| e.to_string())?;

    let mut roster = Roster::new();
    match fetch_with_spinner(&data_source).await {
        Ok(people) => {
            info!(count = people.len(), "fetched person list");
            roster.on_fetch_complete(people).map_err(|e| e.to_string())?;
        }
        Err(e) if run.interactive => {
            warn!(error = %e, "fetch failed, continuing with an empty list");
            eprintln!("{} {}", "[ERR]".bold().red(), e);
        }
        Err(e) => return Err(e.to_string()),
    }

    let label = match run.action.as_ref() {
        Some(action) => {
            roster.apply(action);
            action.label()
        }
        None => "all".to_string(),
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    print_view(&mut out, &roster, &label, color)?;

    if let Some(path) = run.output.as_deref() {
        write_output(path, run.output_format, &roster).await?;
    }

    if run.interactive {
        let stdin = BufReader::new(tokio::io::stdin());
        let applied = run_session(&mut roster, stdin, &mut out, color).await?;
        debug!(applied, "interactive session finished");
        if let Some(path) = run.output.as_deref() {
            write_output(path, run.output_format, &roster).await?;
        }
    }

    writeln!(out, "\n:: Completed :: took {}ms ::", now.elapsed().as_millis())
    .map_err(|e| format!("failed to write to stdout: {e}"))?;
    Ok(())
}

pub fn run_cli() -> Result<(), String> {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp => {
                print!("{}", render_custom_help());
                return Ok(());
            }
            ErrorKind::DisplayVersion => {
                let cmd = CliArgs::command();
                print!("{}", cmd.render_version());
                return Ok(());
            }
            _ => return Err(e.to_string()),
        },
    };

    let explicit_config = args.config.clone().map(|p| config::expand_tilde(&p));

    if args.init_config {
        let path = explicit_config
            .or_else(config::default_config_path)
            .ok_or_else(|| "could not determine config path".to_string())?;
        if config::ensure_default_config_file(&path)? {
            println!("wrote {}", path.display());
        } else {
            println!("config already exists at {}", path.display());
        }
        return Ok(());
    }

    let cfg = match explicit_config.as_ref() {
        Some(path) => config::load_config(path, false)?,
        None => match config::default_config_path() {
            Some(path) => config::load_config(&path, true)?,
            None => ConfigFile::default(),
        },
    };

    let run = build_run_config(args, cfg)?;
    init_tracing(run.verbose, run.no_color);

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to build runtime: {e}"))?;

    rt.block_on(run_async(run))
}
