use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use docview_core::consts::DEFAULT_INDEX_PATH;
use docview_core::{
    Fetch, FileView, HttpFetcher, LocalFetcher, PageRasterizer, ResultIndex, Viewer, ViewerConfig,
};

#[derive(Parser)]
#[command(name = "docview")]
#[command(about = "Browse layout extraction results over their rendered PDF pages")]
struct Args {
    #[arg(long, default_value = DEFAULT_INDEX_PATH, help = "Result index JSON file")]
    index: PathBuf,

    #[arg(long, help = "Folder to view; lists folders when omitted")]
    folder: Option<String>,

    #[arg(long, help = "File to view; views every file of the folder when omitted")]
    file: Option<String>,

    #[arg(long, help = "Directory holding {folder}/{file}.pdf")]
    pdf_root: Option<PathBuf>,

    #[arg(short, long, default_value = "output", help = "Output directory")]
    output: PathBuf,

    #[arg(long, help = "JSON config overriding the defaults")]
    config: Option<PathBuf>,

    #[arg(long, help = "Read result artifacts from this directory instead of HTTP")]
    local_results: Option<PathBuf>,
}

fn load_config(args: &Args) -> Result<ViewerConfig, Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => ViewerConfig::from_file(path)?,
        None => ViewerConfig::default(),
    };

    if let Some(pdf_root) = &args.pdf_root {
        config.pdf_root = pdf_root.clone();
    }

    Ok(config)
}

fn print_legend(config: &ViewerConfig) {
    println!("\n=== Block Type Legend ===");
    for (label, hex) in config.style.legend() {
        println!("  {hex}  {label}");
    }
}

fn print_file_view(view: &FileView) {
    println!("\n=== Processed File: {}/{} ===", view.folder, view.file);
    println!("Statistics:");
    println!("  Page Count: {}", view.stats.page_count);
    println!("  Line Count: {}", view.stats.line_count);
    println!("  Word Count: {}", view.stats.word_count);
    println!("  Figure Count: {}", view.stats.figure_count);
    println!("  Table Count: {}", view.stats.table_count);

    for page in &view.pages {
        println!("\n--- Page {} ({} regions) ---", page.page_no, page.region_count);
        for line in &page.lines {
            println!("  {line}");
        }
    }
}

fn run<F: Fetch>(
    args: &Args,
    config: ViewerConfig,
    index: ResultIndex,
    fetcher: F,
    folder: &str,
) -> Result<(), Box<dyn Error>> {
    let files: Vec<String> = match &args.file {
        Some(file) => vec![file.clone()],
        None => index.files(folder)?.map(str::to_string).collect(),
    };

    if files.is_empty() {
        warn!("folder {folder} has no processed files");
        return Ok(());
    }

    print_legend(&config);

    let rasterizer = PageRasterizer::new(config.render_scale)?;
    info!("render pages at {}x", rasterizer.scale());
    let viewer = Viewer::new(config, index, fetcher, rasterizer);

    let report = viewer.view_folder(folder, &files, |view| {
        print_file_view(view);
        let out_dir = view.write_to(&args.output)?;
        println!("\nAnnotated pages written to {}", out_dir.display());
        Ok(())
    });

    println!("\n=== Summary ===");
    println!("Viewed: {}", report.viewed.len());
    for failure in &report.failures {
        println!("Failed: {} ({})", failure.file, failure.error);
        if let Some(diagnostic) = failure.error.diagnostic() {
            println!("  content that failed to parse: {diagnostic}");
        }
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    info!("Starting document processing viewer");
    info!("Result index: {}", args.index.display());

    let config = load_config(&args)?;

    let index = match ResultIndex::load(&args.index) {
        Ok(index) => index,
        Err(err) => {
            error!("{err}. Please process files first.");
            return Ok(());
        }
    };

    let Some(folder) = args.folder.clone() else {
        println!("Folders:");
        for folder in index.folders() {
            println!("  {folder}");
        }
        return Ok(());
    };

    if let Err(err) = index.files(&folder) {
        error!("{err}");
        return Ok(());
    }

    match &args.local_results {
        Some(root) => run(&args, config, index, LocalFetcher::new(root), &folder),
        None => {
            let fetcher = HttpFetcher::new(&config)?;
            run(&args, config, index, fetcher, &folder)
        }
    }
}
