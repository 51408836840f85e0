use clap::{CommandFactory, Parser, ValueEnum};
use gallerytool::imaging::RustBackend;
use gallerytool::{commands, config, output};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gallerytool")]
#[command(about = "Turn a directory of images into a static gallery site")]
#[command(long_about = "\
Turn a directory of images into a static gallery site

The source tree is mirrored into the output directory with sanitized names
(diacritics stripped, spaces → underscores, lowercase extensions). Images are
resized to the configured width; anything that cannot be resized is copied.

  photos/                      photos.web/
  ├── config.toml              ├── 2020_Trip/
  ├── 2020 Trip/               │   └── Beach_Day.jpg
  │   └── Beach Day.JPG        ├── notes.txt
  └── notes.txt                ├── thumbs/…          (gallery)
                               ├── content.json      (manifest)
                               ├── list.html
                               └── gallery.html

Commands:
  prepare   mirror and resize, write content.json, copy index.js/index.css
  list      write list.html from content.json (or the output tree)
  gallery   write gallery.html with thumbnails and lightbox
  all       prepare, list and gallery in one go

Run 'gallerytool --print-config' for a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Command to run
    #[arg(value_enum)]
    command: Option<Command>,

    /// Source directory
    source: Option<PathBuf>,

    /// Output directory [default: <source>.web]
    dest: Option<PathBuf>,

    /// Config file [default: <source>/config.toml]
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the full mirrored tree (overrides `debug` in config)
    #[arg(long, conflicts_with = "quiet")]
    debug: bool,

    /// Print only warnings, errors and summaries
    #[arg(long)]
    quiet: bool,

    /// Print a stock config.toml with all options documented
    #[arg(long)]
    print_config: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Command {
    /// Mirror the source tree into the output and record content.json
    Prepare,
    /// Write the file-list page
    List,
    /// Write the gallery page
    Gallery,
    /// Run prepare, list and gallery
    All,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let (Some(command), Some(source)) = (cli.command, cli.source.as_ref()) else {
        Cli::command().print_help()?;
        return Ok(());
    };
    let dest = cli
        .dest
        .clone()
        .unwrap_or_else(|| commands::default_dest(source));

    let mut site_config = match &cli.config {
        Some(path) => config::load_config_file(path)?,
        None => config::load_config(source)?,
    };
    if cli.debug {
        site_config.debug = true;
    }
    if cli.quiet {
        site_config.debug = false;
    }
    init_thread_pool(&site_config.processing);

    let backend = RustBackend::new();
    let debug = site_config.debug;

    match command {
        Command::Prepare => {
            println!("==> Preparing {} → {}", source.display(), dest.display());
            let report = commands::prepare(source, &dest, &site_config, &backend)?;
            output::print_prepare_output(&report, debug);
        }
        Command::List => {
            let report = commands::list(&dest, &site_config, None)?;
            output::print_page_output(&report, "list", debug);
        }
        Command::Gallery => {
            let report = commands::gallery(&dest, &site_config, &backend, None)?;
            output::print_page_output(&report, "gallery", debug);
        }
        Command::All => {
            println!("==> Building {} → {}", source.display(), dest.display());
            let report = commands::all(source, &dest, &site_config, &backend)?;
            output::print_all_output(&report, debug);
            println!("==> Done: {}", dest.display());
        }
    }

    Ok(())
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores: user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
