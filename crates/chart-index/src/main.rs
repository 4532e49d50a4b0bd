use chart_index::check::{check, read_map_index, read_product_index};
use chart_index::collect::collect_products;
use chart_index::source::{DEFAULT_DATA_DIR, DEFAULT_INDEX_FILE};
use chart_index::{DataSource, IndexError};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "chart-index", about = "Inspect and build weather chart indexes")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Verify every map index and image referenced from the product index
    Check(RootArgs),
    /// Print products and their map labels
    List(RootArgs),
    /// Build a product index from the *.index.json files in a directory
    Collect {
        /// Directory holding the map indexes
        dir: PathBuf,

        /// Output JSON file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
}

#[derive(Args)]
struct RootArgs {
    /// Content root served to the browser
    root: PathBuf,

    /// Data directory relative to the root
    #[arg(long, default_value = DEFAULT_DATA_DIR)]
    data_dir: String,

    /// Product index file inside the data directory
    #[arg(long, default_value = DEFAULT_INDEX_FILE)]
    index: String,
}

impl RootArgs {
    fn source(&self) -> DataSource {
        DataSource::new(self.data_dir.clone(), self.index.clone())
    }

    fn data_path(&self) -> PathBuf {
        self.root.join(&self.data_dir)
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Check(args) => run_check(&args),
        Command::List(args) => run_list(&args),
        Command::Collect {
            dir,
            output,
            pretty,
        } => run_collect(&dir, output.as_deref(), pretty).map(|()| true),
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

fn run_check(args: &RootArgs) -> Result<bool, IndexError> {
    let report = check(&args.root, &args.source())?;

    for product in &report.products {
        let status = if product.is_ok() { "ok" } else { "BROKEN" };
        println!(
            "{status:>6}  {} ({}, {} maps)",
            product.product.name,
            product.product.indexfile,
            product.maps.len()
        );
        if let Some(err) = &product.error {
            println!("        {err}");
        }
        for file in &product.missing_images {
            println!("        missing image: {file}");
        }
    }

    let broken = report.broken().count();
    println!("{} products, {broken} broken", report.products.len());
    Ok(broken == 0)
}

fn run_list(args: &RootArgs) -> Result<bool, IndexError> {
    let dir = args.data_path();
    let products = read_product_index(&dir.join(&args.index))?;

    for product in &products {
        match &product.list_title {
            Some(title) => println!("{} [{title}]", product.name),
            None => println!("{}", product.name),
        }
        match read_map_index(&dir.join(&product.indexfile)) {
            Ok(maps) => {
                for map in &maps {
                    println!("  {:<12} {}", map.label(), map.file);
                }
            }
            Err(e) => println!("  ! {e}"),
        }
    }
    Ok(true)
}

fn run_collect(dir: &Path, output: Option<&Path>, pretty: bool) -> Result<(), IndexError> {
    let exclude = output
        .and_then(|p| p.file_name())
        .and_then(|n| n.to_str())
        .unwrap_or(DEFAULT_INDEX_FILE);
    let products = collect_products(dir, exclude)?;

    let json = if pretty {
        serde_json::to_string_pretty(&products)?
    } else {
        serde_json::to_string(&products)?
    };

    if let Some(output_path) = output {
        std::fs::write(output_path, &json).map_err(|e| IndexError::io(output_path, e))?;
        eprintln!(
            "Written {} products to {}",
            products.len(),
            output_path.display()
        );
    } else {
        println!("{json}");
    }
    Ok(())
}
