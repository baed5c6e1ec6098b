use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde_json::json;

use relay_compose::cli::{CliArgs, CliCommand, SelectionArgs, SurfaceArg};
use relay_compose::commands::Cmd;
use relay_compose::config::ComposerConfig;
use relay_compose::editable::{MarkdownWrap, SelectionRange};
use relay_compose::measure::{FontdueMeasurer, TextMeasurer};
use relay_compose::messages::{Msg, SurfaceMsg, ToolbarMsg};
use relay_compose::model::{ComposerModel, FloatingId};
use relay_compose::overlay::SurfaceRect;
use relay_compose::proxy::{self, ProxyConfig, ProxyRequest};
use relay_compose::telemetry;
use relay_compose::update::update;

fn main() -> Result<()> {
    relay_compose::tracing::init();

    let args = CliArgs::parse();
    let config = match &args.config {
        Some(path) => ComposerConfig::load_from(path).with_env_overrides(),
        None => ComposerConfig::load(),
    };

    let result = run(&args, &config);
    if let Err(e) = &result {
        telemetry::log_error(e, Some(json!({ "command": command_name(&args.command) })));
    }
    result
}

fn run(args: &CliArgs, config: &ComposerConfig) -> Result<()> {
    match &args.command {
        CliCommand::Format { selection, style } => {
            format_selection(selection, style.wrap(), config)
        }
        CliCommand::Position {
            selection,
            surface,
            rect,
        } => {
            let measurer = load_measurer(args, config);
            print_position(selection, *surface, rect.0, config, measurer)
        }
        CliCommand::ProxyCheck { url } => proxy_check(url, config),
    }
}

fn command_name(command: &CliCommand) -> &'static str {
    match command {
        CliCommand::Format { .. } => "format",
        CliCommand::Position { .. } => "position",
        CliCommand::ProxyCheck { .. } => "proxy-check",
    }
}

/// `--font` wins over the configured face; no font means no measurement
fn load_measurer(args: &CliArgs, config: &ComposerConfig) -> Option<Box<dyn TextMeasurer>> {
    let path = args.font.as_deref().or(config.font.path.as_deref());
    let measurer = FontdueMeasurer::load(path, config.font.bold_path.as_deref())?;
    Some(Box::new(measurer))
}

/// Load the draft and run the selection tracker on `start..end`
fn open_selection(
    selection: &SelectionArgs,
    config: &ComposerConfig,
    measurer: Option<Box<dyn TextMeasurer>>,
    rect: SurfaceRect,
) -> Result<ComposerModel> {
    let text = read_draft(&selection.file)?;
    let mut model = ComposerModel::new(&text, config).with_surface_rect(rect);
    model.set_measurer(measurer);

    update(
        &mut model,
        Msg::Surface(SurfaceMsg::SelectionCompleted {
            start: selection.start,
            end: selection.end,
        }),
    );
    if model.visibility() != FloatingId::Toolbar {
        bail!(
            "Selection {}..{} of {} is empty or whitespace-only",
            selection.start,
            selection.end,
            selection.file.display()
        );
    }
    Ok(model)
}

fn read_draft(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn format_selection(
    selection: &SelectionArgs,
    wrap: MarkdownWrap,
    config: &ComposerConfig,
) -> Result<()> {
    let mut model = open_selection(selection, config, None, SurfaceRect::default())?;
    let msg = match wrap {
        MarkdownWrap::Bold => ToolbarMsg::Bold,
        MarkdownWrap::Italic => ToolbarMsg::Italic,
    };

    let mut new_selection: Option<SelectionRange> = None;
    for cmd in update(&mut model, Msg::Toolbar(msg)).map(Cmd::flatten).unwrap_or_default() {
        match cmd {
            Cmd::NotifyBold(text) => {
                telemetry::log_user_action("format_bold", Some(json!({ "chars": text.chars().count() })));
            }
            Cmd::NotifyItalic(text) => {
                telemetry::log_user_action("format_italic", Some(json!({ "chars": text.chars().count() })));
            }
            Cmd::FocusSurface { selection } => new_selection = Some(selection),
            _ => {}
        }
    }

    let selection = new_selection.context("Formatting did not apply")?;
    let output = json!({
        "text": model.text(),
        "selection": { "start": selection.start, "end": selection.end },
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_position(
    selection: &SelectionArgs,
    surface: SurfaceArg,
    rect: SurfaceRect,
    config: &ComposerConfig,
    measurer: Option<Box<dyn TextMeasurer>>,
) -> Result<()> {
    let mut model = open_selection(selection, config, measurer, rect)?;
    let measured = model.measurer().is_some();
    if surface == SurfaceArg::Feedback {
        update(&mut model, Msg::Toolbar(ToolbarMsg::AiRevise));
    }

    let placement = model
        .floating_placement()
        .context("No floating surface open")?;
    let output = json!({
        "surface": format!("{:?}", placement.kind),
        "measured": measured,
        "anchor": placement.anchor,
        "origin": placement.origin,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Dry run of the stream proxy: the verdict and the request it would send
fn proxy_check(url: &str, config: &ComposerConfig) -> Result<()> {
    let proxy_config = ProxyConfig::from_config(config);
    let output = if proxy_config.allows(url) {
        let request = proxy::upstream_request(
            ProxyRequest {
                url: url.to_string(),
                headers: Default::default(),
                body: None,
            },
            None,
        );
        let headers: serde_json::Map<String, serde_json::Value> = request
            .headers
            .iter()
            .map(|(name, value)| (name.to_string(), json!(value)))
            .collect();
        json!({
            "allowed": true,
            "method": proxy::UpstreamRequest::METHOD,
            "url": request.url,
            "headers": headers,
        })
    } else {
        json!({
            "allowed": false,
            "status": 400,
            "error": proxy::INVALID_URL_ERROR,
            "api_base_url": proxy_config.api_base_url,
        })
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
