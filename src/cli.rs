//! CLI module - argument parsing and the interactive session flow

use anyhow::{bail, Result};
use clap::Parser;
use colored::Colorize;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use crate::clipboard;
use crate::core::estimate::{self, TokenEstimator, WhitespaceEstimator};
use crate::core::filter;
use crate::core::render;
use crate::core::tree;
use crate::select::{self, Selection};

/// repopick - interactively pick part of a directory tree and copy it as a prompt-ready bundle.
#[derive(Parser, Debug)]
#[command(name = "repopick")]
#[command(
    author,
    version,
    about,
    long_about = "repopick walks ROOT, drops known noise entries (.git, node_modules, \
build artifacts), and shows every remaining entry with an approximate token cost. \
You exclude entries level by level; the final selection is rendered as a <file_map> \
tree plus a <file_contents> dump, copied to the system clipboard, and echoed to the \
terminal.\n\n\
Token figures are a coarse whitespace-split approximation meant for budgeting, not \
an exact tokenizer count."
)]
pub struct Cli {
    /// Root directory to select from.
    #[arg(value_name = "ROOT")]
    pub root: PathBuf,

    /// Disable colored output.
    #[arg(long)]
    pub no_color: bool,
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    if cli.no_color {
        colored::control::set_override(false);
    }

    if !cli.root.is_dir() {
        bail!("{} is not a directory", cli.root.display());
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    run_session(&cli.root, &mut input, &mut output)
}

/// One interactive session: snapshot, filter, annotate, select, confirm,
/// render, deliver. Every early return is a clean exit with an explicit
/// message; only the streams themselves can produce an error here.
pub fn run_session<R: BufRead, W: Write>(root: &Path, input: &mut R, output: &mut W) -> Result<()> {
    writeln!(output, "\nStarting interactive selection in: {}\n", root.display())?;

    let snapshot = tree::snapshot(root);
    let Some(filtered) = filter::apply(snapshot) else {
        writeln!(output, "All items are ignored by default. Nothing to copy.")?;
        return Ok(());
    };

    let degraded = filtered.degraded_count();
    if degraded > 0 {
        writeln!(
            output,
            "{}",
            format!("Note: {degraded} entries could not be read fully and are included in degraded form.").yellow()
        )?;
    }

    let estimator = WhitespaceEstimator;
    let annotated = estimate::annotate(filtered, root, &estimator);

    let final_tree = match select::select_tree(annotated, input, output)? {
        Selection::Kept(node) => node,
        Selection::NothingSelected => {
            writeln!(output, "All items excluded. Nothing to copy.")?;
            return Ok(());
        }
    };

    let total = estimator.estimate(&estimate::full_inclusion_text(&final_tree, root));
    if !select::confirm_copy(input, output, total)? {
        writeln!(output, "Aborting. No output was copied.")?;
        return Ok(());
    }

    let artifact = render::render_output(&final_tree, root);
    match clipboard::copy(&artifact) {
        Ok(()) => writeln!(
            output,
            "\nDone! The following content (file map + file contents) has been copied to your clipboard:"
        )?,
        Err(err) => writeln!(
            output,
            "\n{}",
            format!("Clipboard delivery failed ({err}); the content is printed below instead:")
                .yellow()
        )?,
    }
    writeln!(output, "{}", "-".repeat(50))?;
    writeln!(output, "{artifact}")?;
    writeln!(output, "{}", "-".repeat(50))?;
    Ok(())
}
