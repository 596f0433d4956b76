//! Interactive exclusion pass
//!
//! Walks the annotated tree directory by directory. Each directory gets up
//! to two prompts (sub-directories, then files); the user answers with a
//! comma-separated list of indices to exclude, and kept sub-directories
//! are descended into afterwards, depth-first in listing order. Decisions
//! are final for the rest of the session.
//!
//! The pass is generic over its input and output streams so whole sessions
//! can be scripted in tests.

use colored::Colorize;
use std::collections::BTreeSet;
use std::io::{self, BufRead, Write};

use crate::core::tree::Node;

/// Outcome of the interactive pass.
#[derive(Debug)]
pub enum Selection {
    Kept(Node),
    /// The root had entries and the user excluded every one of them.
    NothingSelected,
}

/// Run the exclusion pass over `node`, prompting on `output` and reading
/// answers from `input`.
pub fn select_tree<R: BufRead, W: Write>(
    node: Node,
    input: &mut R,
    output: &mut W,
) -> io::Result<Selection> {
    let had_entries = !node.children.is_empty();
    let kept = prune(node, input, output)?;
    if had_entries && kept.children.is_empty() {
        return Ok(Selection::NothingSelected);
    }
    Ok(Selection::Kept(kept))
}

fn prune<R: BufRead, W: Write>(mut node: Node, input: &mut R, output: &mut W) -> io::Result<Node> {
    if node.is_file() {
        return Ok(node);
    }

    let (dirs, files): (Vec<Node>, Vec<Node>) =
        node.children.into_iter().partition(Node::is_dir);

    let excluded_dirs = if dirs.is_empty() {
        BTreeSet::new()
    } else {
        prompt_for_exclusions(
            input,
            output,
            &labels(&dirs),
            &format!("In directory: {}\nSubdirectories found:", node.path.display()),
        )?
    };
    let kept_dirs = keep_except(dirs, &excluded_dirs);

    let excluded_files = if files.is_empty() {
        BTreeSet::new()
    } else {
        prompt_for_exclusions(
            input,
            output,
            &labels(&files),
            &format!("In directory: {}\nFiles found:", node.path.display()),
        )?
    };
    let kept_files = keep_except(files, &excluded_files);

    // Descend only after both prompts for this level are resolved.
    let kept_dirs = kept_dirs
        .into_iter()
        .map(|dir| prune(dir, input, output))
        .collect::<io::Result<Vec<_>>>()?;

    node.children = kept_dirs.into_iter().chain(kept_files).collect();
    Ok(node)
}

fn keep_except(nodes: Vec<Node>, excluded: &BTreeSet<usize>) -> Vec<Node> {
    nodes
        .into_iter()
        .enumerate()
        .filter(|(idx, _)| !excluded.contains(idx))
        .map(|(_, node)| node)
        .collect()
}

fn labels(nodes: &[Node]) -> Vec<String> {
    nodes
        .iter()
        .map(|node| {
            format!(
                "{} ({})",
                node.name,
                format!("≈{} tokens", node.estimated_tokens).cyan()
            )
        })
        .collect()
}

/// Show a numbered option list and read the set of indices to exclude.
fn prompt_for_exclusions<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    options: &[String],
    context: &str,
) -> io::Result<BTreeSet<usize>> {
    writeln!(output, "\n{context}")?;
    for (idx, option) in options.iter().enumerate() {
        writeln!(output, "  [{idx}] {option}")?;
    }
    writeln!(output, "\nType the indices of items you want to EXCLUDE, comma-separated.")?;
    writeln!(output, "Or press Enter to exclude none (keep them all).")?;
    write!(output, "Exclude indices: ")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(parse_exclusions(&line, options.len()))
}

/// Parse a comma-separated exclusion answer against a list of `len`
/// options. Each token is parsed on its own; non-numeric or out-of-range
/// tokens are ignored, so malformed input can only keep more, never less.
pub fn parse_exclusions(input: &str, len: usize) -> BTreeSet<usize> {
    input
        .split(',')
        .filter_map(|token| token.trim().parse::<usize>().ok())
        .filter(|&idx| idx < len)
        .collect()
}

/// Final checkpoint: show the total estimate and ask for a go-ahead.
/// Anything other than an explicit yes aborts the run.
pub fn confirm_copy<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    total_tokens: usize,
) -> io::Result<bool> {
    write!(
        output,
        "\nYour final selection is approximately {} tokens. Proceed? (y/n): ",
        total_tokens.to_string().cyan()
    )?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let answer = line.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tree::snapshot;
    use std::fs;
    use std::io::Cursor;
    use tempfile::tempdir;

    fn run(tree: Node, answers: &str) -> (Selection, String) {
        let mut input = Cursor::new(answers.as_bytes().to_vec());
        let mut output = Vec::new();
        let selection = select_tree(tree, &mut input, &mut output).unwrap();
        (selection, String::from_utf8(output).unwrap())
    }

    #[test]
    fn parse_ignores_malformed_and_out_of_range_tokens() {
        assert_eq!(
            parse_exclusions("0, 2", 3),
            BTreeSet::from([0, 2])
        );
        assert_eq!(parse_exclusions("x, 1, 99", 3), BTreeSet::from([1]));
        assert_eq!(parse_exclusions("-1, 0", 3), BTreeSet::from([0]));
        assert_eq!(parse_exclusions("", 3), BTreeSet::new());
        assert_eq!(parse_exclusions("what?", 3), BTreeSet::new());
        assert_eq!(parse_exclusions("1,1,1", 3), BTreeSet::from([1]));
    }

    #[test]
    fn kept_set_size_matches_valid_exclusions_exactly() {
        for (answer, expected_kept) in [("0,1", 2), ("0,garbage,7", 3), ("", 4)] {
            let excluded = parse_exclusions(answer, 4);
            assert_eq!(4 - excluded.len(), expected_kept);
        }
    }

    #[test]
    fn excluded_entries_are_gone_and_order_is_preserved() {
        let temp = tempdir().unwrap();
        fs::create_dir(temp.path().join("keep_dir")).unwrap();
        fs::create_dir(temp.path().join("drop_dir")).unwrap();
        fs::write(temp.path().join("a.txt"), "a").unwrap();
        fs::write(temp.path().join("b.txt"), "b").unwrap();

        // Children sorted: dirs [drop_dir, keep_dir], files [a.txt, b.txt].
        // Exclude dir 0, exclude file 1, keep everything below keep_dir.
        let (selection, _) = run(snapshot(temp.path()), "0\n1\n");
        let Selection::Kept(tree) = selection else {
            panic!("expected a kept tree");
        };

        let names: Vec<&str> = tree.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["keep_dir", "a.txt"]);
    }

    #[test]
    fn excluding_everything_signals_nothing_selected() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("only.txt"), "x").unwrap();

        let (selection, _) = run(snapshot(temp.path()), "0\n");
        assert!(matches!(selection, Selection::NothingSelected));
    }

    #[test]
    fn empty_directory_prompts_nothing() {
        let temp = tempdir().unwrap();

        // No input is provided; any prompt would error out on EOF reads
        // being empty and show up in the transcript.
        let (selection, transcript) = run(snapshot(temp.path()), "");
        assert!(matches!(selection, Selection::Kept(_)));
        assert!(transcript.is_empty());
    }

    #[test]
    fn file_prompt_follows_directory_prompt_before_descent() {
        let temp = tempdir().unwrap();
        fs::create_dir(temp.path().join("sub")).unwrap();
        fs::write(temp.path().join("sub").join("inner.txt"), "x").unwrap();
        fs::write(temp.path().join("top.txt"), "x").unwrap();

        let (_, transcript) = run(snapshot(temp.path()), "\n\n\n");
        let subdirs_at = transcript.find("Subdirectories found:").unwrap();
        let files_at = transcript.find("Files found:").unwrap();
        let inner_at = transcript.find("inner.txt").unwrap();
        assert!(subdirs_at < files_at);
        assert!(files_at < inner_at);
    }

    #[test]
    fn eof_keeps_everything() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("a.txt"), "a").unwrap();

        let (selection, _) = run(snapshot(temp.path()), "");
        let Selection::Kept(tree) = selection else {
            panic!("expected a kept tree");
        };
        assert_eq!(tree.children.len(), 1);
    }

    #[test]
    fn confirmation_requires_an_explicit_yes() {
        for (answer, expected) in [
            ("y\n", true),
            ("YES\n", true),
            ("n\n", false),
            ("\n", false),
            ("", false),
            ("sure\n", false),
        ] {
            let mut input = Cursor::new(answer.as_bytes().to_vec());
            let mut output = Vec::new();
            assert_eq!(
                confirm_copy(&mut input, &mut output, 42).unwrap(),
                expected,
                "answer {answer:?}"
            );
        }
    }
}
