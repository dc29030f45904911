use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use conceptmap_common::{Editor, LayoutMode};
use tracing::info;
use tracing_subscriber::{prelude::*, EnvFilter};

mod script;

use script::Script;

#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Arrange a map with one of the automatic layouts
    Layout {
        /// Map file to read
        input: PathBuf,
        /// tree, radial, network, histogram or free-flow
        #[arg(long, short)]
        mode: LayoutMode,
        /// Where to write the result, stdout when absent
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Write a map as JSON or CSV, named after its title
    Export {
        /// Map file to read
        input: PathBuf,
        #[arg(long, short, value_enum, default_value_t = Format::Json)]
        format: Format,
        /// Directory the export is written to
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },

    /// Play a recorded editing session and print the resulting map
    Replay {
        /// Session script, a JSON list of timed actions
        script: PathBuf,
        /// Map to start from instead of the default one
        #[arg(long)]
        input: Option<PathBuf>,
        /// Where to write the result, stdout when absent
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Csv,
}

impl Format {
    fn extension(self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Csv => "csv",
        }
    }
}

fn load(path: &Path) -> Result<Editor> {
    let text =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let mut editor = Editor::default();
    editor
        .import_json(&text)
        .with_context(|| format!("Failed to import {}", path.display()))?;
    Ok(editor)
}

fn write_out(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => println!("{text}"),
    }
    Ok(())
}

fn layout(input: &Path, mode: LayoutMode, output: Option<&Path>) -> Result<()> {
    let mut editor = load(input)?;
    let source = editor.apply_layout(mode);
    info!("{mode} layout: {source:?}");
    write_out(&editor.export_json()?, output)
}

fn export(input: &Path, format: Format, dir: &Path) -> Result<PathBuf> {
    let editor = load(input)?;
    let text = match format {
        Format::Json => editor.export_json()?,
        Format::Csv => editor.export_csv()?,
    };

    let path = dir.join(editor.export_file_name(format.extension()));
    fs::write(&path, text).with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Exported {} as {}", input.display(), path.display());
    Ok(path)
}

fn replay(script: &Path, input: Option<&Path>, output: Option<&Path>) -> Result<()> {
    let text = fs::read_to_string(script)
        .with_context(|| format!("Failed to read {}", script.display()))?;
    let script = Script::parse(&text)?;

    let mut editor = match input {
        Some(path) => load(path)?,
        None => Editor::default(),
    };
    let replay = script.replay(&mut editor, Instant::now())?;
    for message in &replay.messages {
        info!("{message}");
    }
    editor.shutdown();

    write_out(&editor.export_json()?, output)
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    match args.command {
        Command::Layout {
            input,
            mode,
            output,
        } => layout(&input, mode, output.as_deref()),
        Command::Export { input, format, dir } => {
            let path = export(&input, format, &dir)?;
            println!("{}", path.display());
            Ok(())
        }
        Command::Replay {
            script,
            input,
            output,
        } => replay(&script, input.as_deref(), output.as_deref()),
    }
}
