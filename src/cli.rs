//! Minimal CLI: JSON type trees → type-expression text
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use log::LevelFilter;
use rayon::prelude::*;
use serde_json::Value;

use crate::config::Options;
use crate::ir::TypeNode;
use crate::render::Renderer;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// render parsed Closure/JSDoc type trees (JSON) back into type-expression text
#[derive(Parser, Debug)]
#[command(version)]
pub struct CommandLineInterface {
    /// more log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// render each input tree to one line of text
    Render(RenderOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// treat input as newline-delimited JSON (NDJSON), one tree per line
    #[arg(long, default_value_t = false)]
    ndjson: bool,

    /// JSON Pointer to select the tree inside each document (e.g. /doclets/0/type)
    #[arg(long)]
    json_pointer: Option<String>,

    /// jq filter applied to each document; every result is one tree
    #[arg(long)]
    jq_expr: Option<String>,

    /// One or more inputs. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(Args, Debug, Clone)]
struct RenderSettings {
    /// JSON options file (`links`, `linkClass`, `cssClass`, `htmlSafe`, `suppressModifiers`)
    #[arg(long)]
    options: Option<PathBuf>,

    /// JSON object mapping type names to URLs; overrides `links` from --options
    #[arg(long)]
    links: Option<PathBuf>,

    /// class attribute for generated links
    #[arg(long)]
    link_class: Option<String>,

    /// escape generic brackets as `&lt;` / `&gt;`
    #[arg(long)]
    html_safe: bool,

    /// skip `...`, `?`, `!` and `=` decoration
    #[arg(long)]
    no_modifiers: bool,
}

#[derive(clap::Parser, Debug)]
struct RenderOut {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    render_settings: RenderSettings,

    /// output file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn load_process(&self, mut apply: impl FnMut(Value) -> Result<()>) -> Result<()> {
        let source_paths = resolve_file_path_patterns(&self.input)?;
        for source_path in source_paths {
            let source_path_str = source_path.to_string_lossy().to_string();
            let source = std::fs::read_to_string(&source_path)
                .with_context(|| format!("failed to read source file {source_path_str}"))?;
            log::info!("reading {source_path_str}");

            let documents = if self.ndjson {
                source
                    .lines()
                    .enumerate()
                    .filter(|(_, line)| !line.trim().is_empty())
                    .map(|(ix, line)| {
                        serde_json::from_str::<Value>(line)
                            .with_context(|| format!("failed to parse JSON ({source_path_str}:{})", ix + 1))
                    })
                    .collect::<Result<Vec<_>>>()?
            } else {
                let value = serde_json::from_str::<Value>(&source)
                    .with_context(|| format!("failed to parse JSON source file ({source_path_str})"))?;
                vec![value]
            };

            for document in documents {
                let document = match self.json_pointer.as_deref() {
                    None => document,
                    Some(pointer) => document
                        .pointer(pointer)
                        .cloned()
                        .with_context(|| format!("JSON pointer {pointer} not found in {source_path_str}"))?,
                };
                match self.jq_expr.as_ref() {
                    None => apply(document)?,
                    Some(jq_expr) => {
                        let trees = crate::jq_exec::select_trees(jq_expr, &document).with_context(|| {
                            format!("failed to apply jq expression to source file ({source_path_str})")
                        })?;
                        for tree in trees {
                            apply(tree)?;
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

impl RenderSettings {
    fn load_renderer(&self) -> Result<Renderer> {
        let mut options = match self.options.as_ref() {
            Some(path) => Options::from_path(path)?,
            None => Options::default(),
        };
        if let Some(path) = self.links.as_ref() {
            options.links = Some(read_link_table(path)?);
        }
        if let Some(class) = self.link_class.as_ref() {
            options.link_class = Some(class.clone());
        }
        options.html_safe |= self.html_safe;
        let config = options.into_config();
        let config = if self.no_modifiers { config.without_modifiers() } else { config };
        Ok(Renderer::new(config))
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    /// Log to stderr so stdout stays clean for rendered output.
    pub fn init_logging(&self) {
        let _ = simplelog::WriteLogger::init(self.log_level(), simplelog::Config::default(), std::io::stderr());
    }

    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::Render(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(());
                }

                // 1) collect trees
                let mut trees = Vec::<TypeNode>::new();
                target.input_settings.load_process(|value| {
                    trees.push(crate::lower::from_json_value(&value)?);
                    Ok(())
                })?;
                log::info!("decoded {} type tree(s)", trees.len());

                // 2) render; output order follows input order
                let renderer = target.render_settings.load_renderer()?;
                let lines = trees
                    .par_iter()
                    .map(|tree| renderer.stringify(tree))
                    .collect::<Vec<_>>();
                let rendered = render_lines(&lines);

                if let Some(out) = target.out.as_ref() {
                    write_output(out, &rendered)?;
                } else {
                    print!("{rendered}");
                }
                Ok(())
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn read_link_table(path: &Path) -> Result<serde_json::Map<String, Value>> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("failed to read link table {}", path.display()))?;
    let table = crate::path_de::from_slice_with_path(&bytes)
        .with_context(|| format!("link table {} must be a JSON object", path.display()))?;
    Ok(table)
}

/// One line per tree, each newline-terminated; no trees, no output.
fn render_lines(lines: &[String]) -> String {
    lines.iter().map(|line| format!("{line}\n")).collect()
}

fn write_output(out: &Path, rendered: &str) -> Result<()> {
    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(out, rendered)
        .with_context(|| format!("failed to write {}", out.display()))
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let before = out.len();
            for entry in glob::glob(pattern).with_context(|| format!("bad glob pattern {pattern}"))? {
                out.push(entry?);
            }
            if out.len() == before {
                // an explicit glob that matched nothing is almost always a typo
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_render_flags() {
        let cli = CommandLineInterface::try_parse_from([
            "jsdoc-type-render", "-vv", "render", "-i", "a.json", "b.json", "--html-safe", "--link-class", "x",
        ])
        .unwrap();
        assert_eq!(cli.log_level(), LevelFilter::Debug);
        let Command::Render(target) = &cli.cmd;
        assert_eq!(target.input_settings.input, ["a.json", "b.json"]);
        assert!(target.render_settings.html_safe);
        assert_eq!(target.render_settings.link_class.as_deref(), Some("x"));
    }

    #[test]
    fn cli_flags_override_defaults() {
        let settings = RenderSettings {
            options: None,
            links: None,
            link_class: Some("cls".into()),
            html_safe: true,
            no_modifiers: true,
        };
        let renderer = settings.load_renderer().unwrap();
        assert!(renderer.config().html_safe());
        assert!(renderer.config().suppress_modifiers());
        assert_eq!(renderer.config().link_class(), Some("cls"));
    }

    #[test]
    fn no_trees_render_no_output() {
        assert_eq!(render_lines(&[]), "");
        assert_eq!(render_lines(&["a".to_string(), "".to_string()]), "a\n\n");
    }

    #[test]
    fn options_file_modifiers_survive_without_flag() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("options.json");
        std::fs::write(&path, r#"{"suppressModifiers": true}"#).unwrap();
        let settings = RenderSettings {
            options: Some(path),
            links: None,
            link_class: None,
            html_safe: false,
            no_modifiers: false,
        };
        assert!(settings.load_renderer().unwrap().config().suppress_modifiers());
    }

    #[test]
    fn literal_paths_pass_through() {
        let paths = resolve_file_path_patterns(["does/not/exist.json"]).unwrap();
        assert_eq!(paths, [PathBuf::from("does/not/exist.json")]);
    }
}
