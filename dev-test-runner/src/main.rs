//! Runs the JSON fixture suites (`[description, expected, tree, options?]`)
//! against the renderer and reports each case.
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use colored::Colorize;
use jsdoc_type_render::{lower, Options, Renderer};
use serde_json::Value;

fn run_file(path: &PathBuf) -> Result<(usize, usize)> {
    let src = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let cases: Vec<Vec<Value>> = serde_json::from_str(&src).with_context(|| format!("parsing {}", path.display()))?;

    let (mut passed, mut failed) = (0, 0);
    for case in &cases {
        let [description, expected, tree, rest @ ..] = case.as_slice() else {
            bail!("{}: malformed case {case:?}", path.display());
        };
        let description = description.as_str().unwrap_or("<unnamed>");
        let expected = expected.as_str().unwrap_or_default();
        let options: Options = match rest.first() {
            Some(v) => serde_json::from_value(v.clone())
                .with_context(|| format!("{description}: bad options"))?,
            None => Options::default(),
        };
        let node = lower::from_json_value(tree).with_context(|| format!("{description}: bad tree"))?;
        let actual = Renderer::new(options.into_config()).stringify(&node);

        if actual == expected {
            passed += 1;
            eprintln!("  {} {description}", "✓".green());
        } else {
            failed += 1;
            eprintln!("  {} {description}", "✗".red());
            eprintln!("      expected: {expected}");
            eprintln!("      actual:   {actual}");
        }
    }
    Ok((passed, failed))
}

fn main() -> Result<()> {
    let dir = std::env::args().nth(1).unwrap_or_else(|| "fixtures".to_string());
    let pattern = format!("{dir}/*.json");

    let (mut passed, mut failed) = (0, 0);
    for entry in glob::glob(&pattern)? {
        let path = entry?;
        eprintln!("{}", path.display().to_string().bold());
        let (p, f) = run_file(&path)?;
        passed += p;
        failed += f;
    }

    eprintln!("{passed} passed, {failed} failed");
    if failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}
