//! Image extraction fan-out
//!
//! Same command-building pattern as the page and text extractors, specialized
//! to produce one tool invocation per size and format combination.

use crate::error::Result;
use crate::exec::{Options, Pages, ToolRunner};
use std::path::{Path, PathBuf};

const EXTRACT_IMAGES: &str = "org.documentcloud.ExtractImages";

/// Target sizes, formats, and page selection for image extraction
#[derive(Debug, Clone, Default)]
pub struct ImageOptions {
    /// Size specs such as `"500x"` or `"700x900"`; empty uses the tool default
    pub sizes: Vec<String>,
    /// Format names such as `"jpg"` or `"png"`; empty uses the tool default
    pub formats: Vec<String>,
    /// Optional page selector
    pub pages: Option<Pages>,
    /// Output directory
    pub output: Option<PathBuf>,
}

/// Runs one image-extraction invocation per size and format combination
#[derive(Debug, Clone)]
pub struct ImageExtractor {
    runner: ToolRunner,
}

impl ImageExtractor {
    pub fn new(runner: ToolRunner) -> Self {
        Self { runner }
    }

    /// Extract page images from a PDF, returning each invocation's output
    pub async fn extract(&self, pdf: &Path, options: ImageOptions) -> Result<Vec<String>> {
        let sizes = fan(&options.sizes);
        let formats = fan(&options.formats);

        let mut outputs = Vec::with_capacity(sizes.len() * formats.len());
        for size in &sizes {
            for format in &formats {
                let mut flags = Options::new();
                if let Some(output) = &options.output {
                    flags.insert("output", output.display());
                }
                if let Some(pages) = &options.pages {
                    flags.insert("pages", pages);
                }
                if let Some(size) = size {
                    flags.insert("size", size);
                }
                if let Some(format) = format {
                    flags.insert("format", format);
                }
                outputs.push(self.runner.run(&[EXTRACT_IMAGES], pdf, &flags).await?);
            }
        }
        Ok(outputs)
    }
}

/// An empty list means one invocation without the flag, so the tool's
/// default applies
fn fan(values: &[String]) -> Vec<Option<&str>> {
    if values.is_empty() {
        vec![None]
    } else {
        values.iter().map(|v| Some(v.as_str())).collect()
    }
}
