//! Docsplit CLI - entry point
//!
//! Thin command-line front-end over the library façade.

use clap::{Parser, Subcommand};
use docsplit::{Docsplit, DocsplitConfig, ImageOptions, MetadataField, Options, Pages};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "docsplit", version, about = "Split documents into pages, text, images, and metadata via the Docsplit toolkit")]
struct Cli {
    /// Docsplit installation root (overrides DOCSPLIT_JAVA_ROOT)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Split each page into a separate PDF
    Pages {
        file: PathBuf,
        /// Output directory
        #[arg(long)]
        output: PathBuf,
        /// Page selector, e.g. "1-10" or "1,3,5"
        #[arg(long)]
        pages: Option<String>,
    },
    /// Extract text into <output>/<basename>.txt
    Text {
        file: PathBuf,
        /// Output directory
        #[arg(long)]
        output: PathBuf,
        /// Page selector, e.g. "1-10" or "1,3,5"
        #[arg(long)]
        pages: Option<String>,
        /// Print the extracted text to stdout
        #[arg(long)]
        print: bool,
    },
    /// Rasterize pages as images
    Images {
        file: PathBuf,
        /// Output directory
        #[arg(long)]
        output: PathBuf,
        /// Size specs, e.g. 500x,250x
        #[arg(long, value_delimiter = ',')]
        sizes: Vec<String>,
        /// Format names, e.g. png,jpg
        #[arg(long, value_delimiter = ',')]
        formats: Vec<String>,
        /// Page selector, e.g. "1-10" or "1,3,5"
        #[arg(long)]
        pages: Option<String>,
    },
    /// Print a single metadata field
    Info {
        file: PathBuf,
        /// One of: author, date, creator, keywords, producer, subject, title, length
        field: String,
        /// Emit the field and value as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(serde::Serialize)]
struct InfoOutput<'a> {
    field: MetadataField,
    value: &'a str,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "docsplit=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = DocsplitConfig::from_env();
    if let Some(root) = cli.root {
        config.java_root = root;
    }
    let docsplit = Docsplit::new(config);

    match cli.command {
        Command::Pages {
            file,
            output,
            pages,
        } => {
            let mut options = Options::new();
            options.insert("output", output.display());
            if let Some(pages) = pages {
                options.insert("pages", Pages::Range(pages));
            }
            let out = docsplit.extract_pages(&file, options).await?;
            print!("{out}");
        }
        Command::Text {
            file,
            output,
            pages,
            print,
        } => {
            let mut options = Options::new();
            options.insert("output", output.display());
            if let Some(pages) = pages {
                options.insert("pages", Pages::Range(pages));
            }
            if print {
                options.insert("return_text", true);
            }
            let out = docsplit.extract_text(&file, options).await?;
            print!("{out}");
        }
        Command::Images {
            file,
            output,
            sizes,
            formats,
            pages,
        } => {
            let options = ImageOptions {
                sizes,
                formats,
                pages: pages.map(Pages::Range),
                output: Some(output),
            };
            for out in docsplit.extract_images(&file, options).await? {
                print!("{out}");
            }
        }
        Command::Info { file, field, json } => {
            let field: MetadataField = field.parse()?;
            let value = docsplit.extract_metadata(&file, field).await?;
            if json {
                let info = InfoOutput {
                    field,
                    value: value.trim_end(),
                };
                println!("{}", serde_json::to_string(&info)?);
            } else {
                print!("{value}");
            }
        }
    }

    Ok(())
}
