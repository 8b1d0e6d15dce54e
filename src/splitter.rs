//! The Docsplit command façade
//!
//! [`Docsplit`] translates high-level extraction requests into external-tool
//! invocations. Non-PDF inputs are normalized to PDF first by shelling out to
//! the bundled office converter; no document processing happens natively.

use crate::config::DocsplitConfig;
use crate::error::{Error, Result};
use crate::exec::{Options, ToolRunner};
use crate::images::{ImageExtractor, ImageOptions};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

const EXTRACT_PAGES: &str = "org.documentcloud.ExtractPages";
const EXTRACT_TEXT: &str = "org.documentcloud.ExtractText";
const EXTRACT_INFO: &str = "org.documentcloud.ExtractInfo";

/// Metadata fields understood by the info extractor
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MetadataField {
    Author,
    Date,
    Creator,
    Keywords,
    Producer,
    Subject,
    Title,
    Length,
}

impl MetadataField {
    /// Every field the info extractor accepts
    pub const ALL: [MetadataField; 8] = [
        MetadataField::Author,
        MetadataField::Date,
        MetadataField::Creator,
        MetadataField::Keywords,
        MetadataField::Producer,
        MetadataField::Subject,
        MetadataField::Title,
        MetadataField::Length,
    ];

    /// The field name as passed to the external tool
    pub fn as_str(&self) -> &'static str {
        match self {
            MetadataField::Author => "author",
            MetadataField::Date => "date",
            MetadataField::Creator => "creator",
            MetadataField::Keywords => "keywords",
            MetadataField::Producer => "producer",
            MetadataField::Subject => "subject",
            MetadataField::Title => "title",
            MetadataField::Length => "length",
        }
    }
}

impl fmt::Display for MetadataField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetadataField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        MetadataField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| Error::UnknownMetadataField {
                field: s.to_string(),
            })
    }
}

/// Façade over the external Docsplit toolkit
#[derive(Debug, Clone)]
pub struct Docsplit {
    runner: ToolRunner,
}

impl Docsplit {
    pub fn new(config: DocsplitConfig) -> Self {
        Self {
            runner: ToolRunner::new(config),
        }
    }

    pub fn config(&self) -> &DocsplitConfig {
        self.runner.config()
    }

    /// Split each page of a document into a separate PDF file.
    ///
    /// Recognized options include `output` (directory) and `pages`
    /// (a [`crate::Pages`] selector); any other option is forwarded verbatim.
    /// Returns the tool's standard output.
    pub async fn extract_pages(&self, path: impl AsRef<Path>, options: Options) -> Result<String> {
        let pdf = self.ensure_pdf(path.as_ref()).await?;
        self.runner.run(&[EXTRACT_PAGES], &pdf, &options).await
    }

    /// Extract text from a document into `<output>/<basename>.txt`.
    ///
    /// With the `return_text` option set to `true` and no `pages` selector,
    /// the produced text file is read back and its contents returned instead
    /// of the tool's standard output. A `pages` selector skips the re-read,
    /// since partial extractions do not produce the whole-document file.
    pub async fn extract_text(
        &self,
        path: impl AsRef<Path>,
        mut options: Options,
    ) -> Result<String> {
        let path = path.as_ref();
        let return_text = options
            .remove("return_text")
            .map(|v| v == "true")
            .unwrap_or(false);
        let basename = file_stem(path)?;

        let pdf = self.ensure_pdf(path).await?;
        let response = self.runner.run(&[EXTRACT_TEXT], &pdf, &options).await?;

        if return_text && !options.contains("pages") {
            let output_dir = options
                .get("output")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("."));
            let txt_path = output_dir.join(format!("{basename}.txt"));
            return tokio::fs::read_to_string(&txt_path)
                .await
                .map_err(|_| Error::OutputMissing {
                    path: txt_path.display().to_string(),
                });
        }

        Ok(response)
    }

    /// Rasterize pages as images at the requested sizes and formats.
    ///
    /// Fans out one tool invocation per size and format combination and
    /// returns each invocation's standard output.
    pub async fn extract_images(
        &self,
        path: impl AsRef<Path>,
        options: ImageOptions,
    ) -> Result<Vec<String>> {
        let pdf = self.ensure_pdf(path.as_ref()).await?;
        ImageExtractor::new(self.runner.clone())
            .extract(&pdf, options)
            .await
    }

    /// Read a single metadata field, returning the tool's raw output
    pub async fn extract_metadata(
        &self,
        path: impl AsRef<Path>,
        field: MetadataField,
    ) -> Result<String> {
        let pdf = self.ensure_pdf(path.as_ref()).await?;
        self.runner
            .run(&[EXTRACT_INFO, field.as_str()], &pdf, &Options::new())
            .await
    }

    /// Return the input unchanged if it is already a PDF, otherwise convert
    /// it via the office converter into `<temp_dir>/docsplit/<basename>.pdf`
    /// and return that path.
    pub async fn ensure_pdf(&self, path: &Path) -> Result<PathBuf> {
        let is_pdf = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("pdf"))
            .unwrap_or(false);
        if is_pdf {
            return Ok(path.to_path_buf());
        }

        let basename = file_stem(path)?;
        let conversion_dir = self.config().conversion_dir();
        tokio::fs::create_dir_all(&conversion_dir).await?;

        let target = conversion_dir.join(format!("{basename}.pdf"));
        tracing::debug!(input = %path.display(), target = %target.display(), "converting to PDF");
        self.runner.run_converter(path, &target).await?;
        Ok(target)
    }
}

fn file_stem(path: &Path) -> Result<String> {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .ok_or_else(|| {
            Error::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid input file name: {}", path.display()),
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn splitter_with_missing_runtime() -> Docsplit {
        let mut config = DocsplitConfig::new("/opt/docsplit");
        config.java_program = PathBuf::from("/nonexistent/docsplit-java-runtime");
        Docsplit::new(config)
    }

    #[rstest]
    #[case(MetadataField::Author, "author")]
    #[case(MetadataField::Date, "date")]
    #[case(MetadataField::Creator, "creator")]
    #[case(MetadataField::Keywords, "keywords")]
    #[case(MetadataField::Producer, "producer")]
    #[case(MetadataField::Subject, "subject")]
    #[case(MetadataField::Title, "title")]
    #[case(MetadataField::Length, "length")]
    fn test_metadata_field_names(#[case] field: MetadataField, #[case] name: &str) {
        assert_eq!(field.as_str(), name);
        assert_eq!(name.parse::<MetadataField>().unwrap(), field);
    }

    #[test]
    fn test_metadata_field_rejects_unknown_name() {
        let result = "pagecount".parse::<MetadataField>();
        assert!(matches!(
            result,
            Err(Error::UnknownMetadataField { field }) if field == "pagecount"
        ));
    }

    #[test]
    fn test_metadata_field_all_is_complete() {
        assert_eq!(MetadataField::ALL.len(), 8);
    }

    #[tokio::test]
    async fn test_ensure_pdf_passes_pdf_through_without_subprocess() {
        // The runtime binary does not exist, so any subprocess attempt would fail
        let splitter = splitter_with_missing_runtime();

        let result = splitter.ensure_pdf(Path::new("/docs/report.pdf")).await;
        assert_eq!(result.unwrap(), PathBuf::from("/docs/report.pdf"));
    }

    #[tokio::test]
    async fn test_ensure_pdf_extension_check_is_case_insensitive() {
        let splitter = splitter_with_missing_runtime();

        let result = splitter.ensure_pdf(Path::new("/docs/REPORT.PDF")).await;
        assert_eq!(result.unwrap(), PathBuf::from("/docs/REPORT.PDF"));
    }

    #[tokio::test]
    async fn test_ensure_pdf_converts_non_pdf_inputs() {
        // Conversion must attempt a subprocess, which fails with the missing runtime
        let splitter = splitter_with_missing_runtime();

        let result = splitter.ensure_pdf(Path::new("/docs/report.doc")).await;
        assert!(matches!(result, Err(Error::ToolNotFound { .. })));
    }

    #[test]
    fn test_file_stem_strips_extension() {
        assert_eq!(file_stem(Path::new("/docs/report.doc")).unwrap(), "report");
        assert_eq!(file_stem(Path::new("notes")).unwrap(), "notes");
    }

    #[test]
    fn test_file_stem_rejects_empty_path() {
        assert!(file_stem(Path::new("/")).is_err());
    }
}
