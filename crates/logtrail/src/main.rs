mod cursor;
mod logging;
mod preview;

use std::io::IsTerminal as _;

use annotate_snippets::Renderer;
use anyhow::{Context as _, bail};
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use cursor::CursorArg;
use logtrail_ide::{Analysis, Buffer, Caret, Config};
use logtrail_inputs::File;
use logtrail_lsp_server::Server;

#[derive(Parser)]
#[command(version, about = "Insert scope-labelled log statements into JavaScript")]
enum Options {
    /// Inserts a log statement for every cursor and prints the result.
    Insert {
        path: Utf8PathBuf,
        /// Cursor as `LINE:COL`, or selection as `LINE:COL-LINE:COL` (one-based).
        #[arg(long = "at", value_name = "POSITION", required = true)]
        cursors: Vec<CursorArg>,
        /// Overwrite the file instead of printing it.
        #[arg(long)]
        write: bool,
        #[command(flatten)]
        config: ConfigArgs,
    },
    /// Shows what would be logged for every cursor.
    Preview {
        path: Utf8PathBuf,
        #[arg(long = "at", value_name = "POSITION", required = true)]
        cursors: Vec<CursorArg>,
        #[command(flatten)]
        config: ConfigArgs,
    },
    /// Runs the language server on stdio.
    Server {
        #[command(flatten)]
        config: ConfigArgs,
    },
}

#[derive(clap::Args)]
struct ConfigArgs {
    /// Function the generated statements call.
    #[arg(long, value_name = "NAME")]
    log_function: Option<String>,
    /// Text of one indentation level.
    #[arg(long, value_name = "TEXT")]
    indent_unit: Option<String>,
    /// Terminate generated lines with `\r\n`.
    #[arg(long)]
    crlf: bool,
}

impl From<ConfigArgs> for Config {
    fn from(args: ConfigArgs) -> Self {
        let defaults = Self::default();
        Self {
            log_function: args.log_function.unwrap_or(defaults.log_function),
            line_terminator: if args.crlf { "\r\n".to_owned() } else { defaults.line_terminator },
            indent_unit: args.indent_unit.unwrap_or(defaults.indent_unit),
        }
    }
}

fn main() -> anyhow::Result<()> {
    logging::init();

    match Options::parse() {
        Options::Insert { path, cursors, write, config } => {
            let analysis = Analysis::new(config.into());
            let file = load(&analysis, &path)?;
            let text = file.text(analysis.db());
            let carets = carets(text, &cursors)?;
            tracing::debug!(%path, cursors = carets.len(), "inserting");

            let mut output = text.to_owned();
            match analysis.insert_log(file, &carets) {
                Some(edit) => {
                    output.replace_range(std::ops::Range::<usize>::from(edit.range), &edit.insert);
                }
                None => eprintln!("nothing to log at the given positions"),
            }

            if write {
                std::fs::write(&path, output).with_context(|| format!("failed to write `{path}`"))
            } else {
                print!("{output}");
                Ok(())
            }
        }
        Options::Preview { path, cursors, config } => {
            let analysis = Analysis::new(config.into());
            let file = load(&analysis, &path)?;
            let text = file.text(analysis.db());
            let carets = carets(text, &cursors)?;

            let previews = analysis.preview(file, &carets);
            if previews.is_empty() {
                eprintln!("nothing to log at the given positions");
            }

            let renderer =
                if std::io::stdout().is_terminal() { Renderer::styled() } else { Renderer::plain() };
            print!("{}", preview::render(&renderer, path.as_str(), text, &previews));
            Ok(())
        }
        Options::Server { config } => Server::new(config.into())?.run(),
    }
}

fn load(analysis: &Analysis, path: &Utf8Path) -> anyhow::Result<File> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("failed to read `{path}`"))?;
    let file = File::from_path(analysis.db(), path.to_owned(), text);
    if file.kind(analysis.db()).is_none() {
        bail!("`{path}` is not a JavaScript or Vue file");
    }
    Ok(file)
}

fn carets(text: &str, cursors: &[CursorArg]) -> anyhow::Result<Vec<Caret>> {
    let buffer = Buffer::new(text);
    cursors
        .iter()
        .map(|cursor| cursor.to_caret(&buffer).map_err(Into::into))
        .collect()
}
