//! Subcommand implementations.

use std::path::PathBuf;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tagset_client::config::DEFAULT_CONFIG_FILE;
use tagset_client::{ClickOutcome, ClientConfig, Dispatcher, HttpTransport, Transport};
use tagset_core::{encode_real, RealBits, TagPath, TagValue, ValueKind, WidgetState};
use tracing::debug;

use crate::cli::Cli;
use crate::prompt::TerminalUi;
use crate::style;

const CLI_WIDGET: &str = "cli";

pub fn load_config(
    path: Option<PathBuf>,
    endpoint: Option<String>,
) -> anyhow::Result<ClientConfig> {
    let mut config = match path {
        Some(path) => ClientConfig::load(path)?,
        None => ClientConfig::load_or_default(DEFAULT_CONFIG_FILE)?,
    };
    if let Some(endpoint) = endpoint {
        config.endpoint = endpoint.trim().into();
    }
    debug!(
        "endpoint {} with {} widget(s)",
        config.endpoint,
        config.widgets.len()
    );
    Ok(config)
}

fn transport(config: &ClientConfig) -> anyhow::Result<HttpTransport> {
    Ok(HttpTransport::new(&config.endpoint, config.timeout)?)
}

fn report(outcome: &ClickOutcome) -> anyhow::Result<()> {
    match outcome {
        ClickOutcome::Sent(request) => {
            println!("{}", style::success(format!("sent {request}")));
            Ok(())
        }
        ClickOutcome::Rejected(request) => anyhow::bail!("server rejected '{request}'"),
        ClickOutcome::Cancelled => {
            println!("cancelled");
            Ok(())
        }
    }
}

pub fn run_encode(kind: ValueKind, value: &str, size: Option<usize>) -> anyhow::Result<()> {
    let encoded = TagValue::encode(kind, value, size.unwrap_or(0))?;
    println!("{encoded}");
    Ok(())
}

pub fn run_set(
    config: &ClientConfig,
    tag: &str,
    kind: ValueKind,
    value: &str,
    size: Option<usize>,
) -> anyhow::Result<()> {
    let widget = WidgetState::new(CLI_WIDGET, tag, kind, size.unwrap_or(0))?;
    let mut dispatcher = Dispatcher::new(transport(config)?, [widget].into_iter().collect());
    let outcome = dispatcher.set(CLI_WIDGET, value, &mut TerminalUi)?;
    report(&outcome)
}

pub fn run_get(config: &ClientConfig, tag: &str) -> anyhow::Result<()> {
    let tag = TagPath::parse(tag)?;
    let snapshot = transport(config)?.fetch_tag(&tag)?;
    println!(
        "{} : {} x{}",
        style::accent(tag.root()),
        snapshot.type_name,
        snapshot.count.max(1)
    );
    for (idx, value) in snapshot.data.iter().enumerate() {
        match snapshot.ascii.get(idx).filter(|text| !text.is_empty()) {
            Some(ascii) => println!("[{idx}] {value} '{ascii}'"),
            None => println!("[{idx}] {value}"),
        }
    }
    Ok(())
}

pub fn run_click(
    config: ClientConfig,
    widget: &str,
    value: Option<&str>,
    refresh: bool,
) -> anyhow::Result<()> {
    let transport = transport(&config)?;
    let mut dispatcher = Dispatcher::new(transport, config.widgets);
    if refresh {
        let current = dispatcher.refresh(widget)?;
        debug!("widget '{widget}' refreshed to {}", current.current_value);
    }
    let mut ui = TerminalUi;
    let outcome = match value {
        Some(text) => dispatcher.set(widget, text, &mut ui)?,
        None => dispatcher.click(widget, &mut ui)?,
    };
    report(&outcome)
}

pub fn run_inspect(value: &str, size: usize) -> anyhow::Result<()> {
    let bytes = encode_real(value, size)?;
    let bits = RealBits::from_bytes(&bytes)?;
    println!("value    {}", bits.value);
    println!("bytes    {}", TagValue::Bytes(bytes));
    println!("sign     {}", bits.sign);
    println!("exponent {}", bits.exponent);
    println!("mantissa {}", bits.mantissa);
    println!("bits     {bits}");
    Ok(())
}

pub fn run_widgets(config: &ClientConfig) -> anyhow::Result<()> {
    if config.widgets.is_empty() {
        println!("no widgets configured");
        return Ok(());
    }
    for widget in config.widgets.iter() {
        println!(
            "{:<16} {:<4} {:>2} B  {} = {}",
            widget.id,
            widget.kind,
            widget.byte_width,
            style::accent(widget.tag.as_str()),
            widget.current_value
        );
    }
    Ok(())
}

pub fn run_completions(shell: Shell) -> anyhow::Result<()> {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "tagset", &mut std::io::stdout());
    Ok(())
}
