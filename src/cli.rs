//! Command-line argument parsing
//!
//! Supports:
//! - Wrapping a selection of a draft file in bold / italic
//! - Estimating where the toolbar or feedback panel would be anchored
//! - Checking a URL against the SSE proxy's API base

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::editable::MarkdownWrap;
use crate::overlay::{FloatingSurfaceKind, SurfaceRect};

/// Selection toolbar and AI feedback panel tooling for Relay drafts
#[derive(Parser, Debug)]
#[command(name = "relay-compose", version, about = "Relay composer tooling")]
pub struct CliArgs {
    /// Config file (defaults to ~/.config/relay-compose/config.yaml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Font file used to measure text (overrides config)
    #[arg(long, global = true, value_name = "PATH")]
    pub font: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Wrap the selected text in markdown and print the result
    Format {
        #[command(flatten)]
        selection: SelectionArgs,

        #[command(flatten)]
        style: StyleArgs,
    },
    /// Print where a floating surface would be placed for the selection
    Position {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Which floating surface to position
        #[arg(long, value_enum, default_value_t = SurfaceArg::Toolbar)]
        surface: SurfaceArg,

        /// Draft surface bounds as left,top,right,bottom
        #[arg(long, value_name = "L,T,R,B", default_value = "0,0,1000,400")]
        rect: RectArg,
    },
    /// Show how the SSE proxy would answer a request for URL
    ProxyCheck {
        /// Target URL
        url: String,
    },
}

/// Draft file and the selected character range
#[derive(Args, Debug, Clone)]
pub struct SelectionArgs {
    /// Draft text file
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Selection start (character offset)
    #[arg(long)]
    pub start: usize,

    /// Selection end (character offset)
    #[arg(long)]
    pub end: usize,
}

#[derive(Args, Debug, Clone, Copy)]
#[group(required = true, multiple = false)]
pub struct StyleArgs {
    /// Wrap in **bold**
    #[arg(long)]
    pub bold: bool,

    /// Wrap in *italic*
    #[arg(long)]
    pub italic: bool,
}

impl StyleArgs {
    pub fn wrap(&self) -> MarkdownWrap {
        if self.bold {
            MarkdownWrap::Bold
        } else {
            MarkdownWrap::Italic
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceArg {
    Toolbar,
    Feedback,
}

impl From<SurfaceArg> for FloatingSurfaceKind {
    fn from(arg: SurfaceArg) -> Self {
        match arg {
            SurfaceArg::Toolbar => FloatingSurfaceKind::Toolbar,
            SurfaceArg::Feedback => FloatingSurfaceKind::FeedbackPanel,
        }
    }
}

/// `left,top,right,bottom` surface bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectArg(pub SurfaceRect);

impl FromStr for RectArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<f32> = s
            .split(',')
            .map(|p| p.trim().parse::<f32>())
            .collect::<Result<_, _>>()
            .map_err(|e| format!("Invalid rect '{}': {}", s, e))?;

        let [left, top, right, bottom] = parts[..] else {
            return Err(format!(
                "Invalid rect '{}': expected left,top,right,bottom",
                s
            ));
        };
        if right < left || bottom < top {
            return Err(format!("Invalid rect '{}': right/bottom before left/top", s));
        }
        Ok(RectArg(SurfaceRect::new(left, top, right, bottom)))
    }
}
