use crate::cli::args::CliArgs;
use crate::output::OutputFormat;
use crate::transform::SortKey;

pub fn validate(args: &CliArgs) -> Result<(), String> {
    if let Some(raw) = args.sort.as_deref() {
        SortKey::parse(raw)
            .ok_or_else(|| format!("invalid --sort '{raw}', expected first or last"))?;
    }
    if let Some(raw) = args.output_format.as_deref() {
        OutputFormat::parse(raw).ok_or_else(|| {
            format!("invalid --output-format '{raw}', expected text, json or html")
        })?;
    }
    if let Some(timeout) = args.timeout {
        if timeout == 0 {
            return Err("invalid timeout, expected positive integer".to_string());
        }
    }
    if let Some(raw) = args.endpoint.as_deref() {
        validate_endpoint(raw)?;
    }
    Ok(())
}

pub fn validate_endpoint(raw: &str) -> Result<(), String> {
    let url = reqwest::Url::parse(raw.trim())
        .map_err(|e| format!("invalid endpoint '{raw}': {e}"))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(format!("invalid endpoint '{raw}': unsupported scheme '{other}'")),
    }
}
