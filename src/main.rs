use anyhow::{Context, Result, anyhow, bail};
use clap::{Parser, Subcommand};
use sketchpad::canvas::{self, Viewport};
use sketchpad::config::{Config, ExportFormat};
use sketchpad::data_url;
use sketchpad::export::{ExportManager, ExportOutcome, ExportRequest, expand_tilde};
use sketchpad::sketch::{
    EMPTY_MESSAGE, FileStore, KeyValueStore, SketchLibrary, SketchStore, format_timestamp,
};
use sketchpad::Sketchpad;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("SKETCHPAD_GIT_HASH"), ")");

#[derive(Parser, Debug)]
#[command(name = "sketchpad")]
#[command(version = VERSION, about = "Manage saved sketches: list, import, export and delete")]
struct Cli {
    /// Directory holding saved sketches (overrides `storage.directory`)
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Config file to use instead of ~/.config/sketchpad/config.toml
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List saved sketches
    List,

    /// Save a PNG image as a new sketch
    Import {
        /// PNG file to import
        png: PathBuf,

        /// Name of the new sketch
        #[arg(long, short = 'n')]
        name: String,
    },

    /// Export a saved sketch as PNG and/or PDF
    Export {
        /// Id of the sketch to export
        id: String,

        /// Which files to write (defaults to `export.format`)
        #[arg(long, short = 'f', value_enum)]
        format: Option<ExportFormat>,

        /// Output directory (defaults to `export.directory`)
        #[arg(long, short = 'o', value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Delete a saved sketch
    Delete {
        /// Id of the sketch to delete
        id: String,
    },

    /// Print the effective configuration as TOML
    ShowConfig,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Command::List => list(&config, cli.data_dir.as_deref()),
        Command::Import { png, name } => import(&config, cli.data_dir.as_deref(), &png, &name),
        Command::Export { id, format, output } => {
            export(&config, cli.data_dir.as_deref(), &id, format, output)
        }
        Command::Delete { id } => delete(&config, cli.data_dir.as_deref(), &id),
        Command::ShowConfig => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}

fn open_backend(config: &Config, data_dir: Option<&Path>) -> Result<Arc<dyn KeyValueStore>> {
    let directory = match data_dir {
        Some(dir) => dir.to_path_buf(),
        None => config.storage_directory()?,
    };
    log::debug!("Using sketch storage at {}", directory.display());
    Ok(Arc::new(FileStore::new(directory)))
}

fn open_library(config: &Config, data_dir: Option<&Path>) -> Result<SketchLibrary> {
    let backend = open_backend(config, data_dir)?;
    Ok(SketchLibrary::open(SketchStore::with_key(
        backend,
        config.storage.sketches_key.clone(),
    )))
}

fn list(config: &Config, data_dir: Option<&Path>) -> Result<()> {
    let library = open_library(config, data_dir)?;
    if library.is_empty() {
        println!("{EMPTY_MESSAGE}");
        return Ok(());
    }

    for sketch in library.sketches() {
        println!(
            "{}  {}  {}",
            sketch.id,
            sketch.name,
            format_timestamp(&sketch.date)
        );
    }
    Ok(())
}

fn import(config: &Config, data_dir: Option<&Path>, png: &Path, name: &str) -> Result<()> {
    let bytes = fs::read(png).with_context(|| format!("Failed to read {}", png.display()))?;
    let image = canvas::decode_png(&bytes)
        .map_err(|err| anyhow!("{} is not a readable PNG: {}", png.display(), err))?;

    let backend = open_backend(config, data_dir)?;
    let mut pad = Sketchpad::new(config, backend);
    pad.mount(Viewport::new(image.width() as f64, image.height() as f64, 1.0));
    pad.surface_mut()
        .load_png(&bytes)
        .with_context(|| format!("Failed to load {}", png.display()))?;

    let sketch = pad.save_sketch(name)?;
    println!("{}  {}", sketch.id, sketch.name);
    Ok(())
}

fn export(
    config: &Config,
    data_dir: Option<&Path>,
    id: &str,
    format: Option<ExportFormat>,
    output: Option<PathBuf>,
) -> Result<()> {
    let library = open_library(config, data_dir)?;
    let sketch = library
        .get(id)
        .with_context(|| format!("No saved sketch with id '{id}'"))?;
    let png = data_url::decode_png(&sketch.data_url)
        .with_context(|| format!("Sketch '{id}' has an invalid snapshot"))?;

    let mut export_config = config.export_config();
    if let Some(format) = format {
        export_config.format = format;
    }
    if let Some(output) = output {
        export_config.directory = expand_tilde(&output.to_string_lossy());
    }

    let runtime = tokio::runtime::Runtime::new().context("Failed to start export runtime")?;
    let manager = ExportManager::new(runtime.handle());
    let reply = manager.request_export(ExportRequest::new(png, export_config))?;

    match runtime.block_on(reply) {
        Ok(ExportOutcome::Success(result)) => {
            for path in result.paths() {
                println!("{}", path.display());
            }
            Ok(())
        }
        Ok(ExportOutcome::Failed(message)) => bail!(message),
        Err(_) => bail!("Export worker stopped before finishing"),
    }
}

fn delete(config: &Config, data_dir: Option<&Path>, id: &str) -> Result<()> {
    let mut library = open_library(config, data_dir)?;
    let removed = library.delete(id)?;
    println!("Deleted {}  {}", removed.id, removed.name);
    Ok(())
}
