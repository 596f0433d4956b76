//! repopick - an interactive CLI for packing part of a directory tree into a prompt
//!
//! repopick walks a directory, strips known noise paths, annotates every
//! entry with an approximate token cost, and lets the user exclude entries
//! level by level. The final selection is rendered as a `<file_map>` tree
//! plus a `<file_contents>` dump and handed to the system clipboard.

use anyhow::Result;
use clap::Parser;

mod cli;
mod clipboard;
mod core;
mod select;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::run(cli)
}
