//! Subprocess invocation of the external Java toolkit
//!
//! Every extraction is exactly one subprocess: the runner assembles the
//! argument vector (no shell involved, so option values and file names are
//! never interpolated), spawns the configured runtime, and waits for it with
//! a time budget. A nonzero exit propagates as [`Error::Extraction`] carrying
//! the rendered command line and the tool's combined output.

use crate::config::DocsplitConfig;
use crate::error::{Error, Result};
use crate::exec::Options;
use std::io;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tokio::time::{timeout, Duration};

/// Spawns one external tool invocation per call; holds no state beyond the config
#[derive(Debug, Clone)]
pub struct ToolRunner {
    config: DocsplitConfig,
}

impl ToolRunner {
    pub fn new(config: DocsplitConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DocsplitConfig {
        &self.config
    }

    /// Run a Docsplit extractor class against an input file.
    ///
    /// `mode` is the target class plus any positional arguments it takes,
    /// e.g. `["org.documentcloud.ExtractInfo", "title"]`.
    pub async fn run(&self, mode: &[&str], input: &Path, options: &Options) -> Result<String> {
        let args = self.class_args(mode, input, options);
        self.invoke(&args).await
    }

    /// Run the office-document converter jar, producing `output`
    pub async fn run_converter(&self, input: &Path, output: &Path) -> Result<String> {
        let args = vec![
            "-jar".to_string(),
            self.config.converter_jar().display().to_string(),
            input.display().to_string(),
            output.display().to_string(),
        ];
        self.invoke(&args).await
    }

    /// Assemble the JVM flags, classpath, mode, option flags, and input path
    fn class_args(&self, mode: &[&str], input: &Path, options: &Options) -> Vec<String> {
        let mut args = Vec::new();
        if self.config.headless {
            args.push("-Djava.awt.headless=true".to_string());
        }
        args.push(self.config.logging_flag());
        args.push("-cp".to_string());
        args.push(self.config.classpath());
        args.extend(mode.iter().map(|s| s.to_string()));
        args.extend(options.to_args());
        args.push(input.display().to_string());
        args
    }

    async fn invoke(&self, args: &[String]) -> Result<String> {
        let program = &self.config.java_program;
        let rendered = render_command(program, args);
        tracing::debug!(command = %rendered, "spawning external tool");

        let child = Command::new(program)
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => Error::ToolNotFound {
                    program: program.display().to_string(),
                },
                _ => Error::Io(e),
            })?;

        let seconds = self.config.timeout_secs;
        let output = match timeout(Duration::from_secs(seconds), child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => return Err(Error::Io(e)),
            Err(_) => {
                // kill_on_drop: dropping the timed-out future kills the child
                tracing::error!(command = %rendered, seconds, "external tool timed out");
                return Err(Error::Timeout { seconds });
            }
        };

        if !output.status.success() {
            let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
            combined.push_str(&String::from_utf8_lossy(&output.stderr));
            tracing::error!(
                command = %rendered,
                status = ?output.status.code(),
                "external tool failed"
            );
            return Err(Error::Extraction {
                command: rendered,
                output: combined,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Render an argument vector as a copy-pasteable command line for diagnostics.
/// Never executed; the subprocess always receives the argument vector directly.
fn render_command(program: &Path, args: &[String]) -> String {
    let mut parts = vec![quote(&program.display().to_string())];
    parts.extend(args.iter().map(|arg| quote(arg)));
    parts.join(" ")
}

fn quote(token: &str) -> String {
    if token.is_empty()
        || token
            .chars()
            .any(|c| c.is_whitespace() || c == '\'' || c == '"')
    {
        format!("'{}'", token.replace('\'', "'\\''"))
    } else {
        token.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn test_config() -> DocsplitConfig {
        DocsplitConfig::new("/opt/docsplit")
    }

    #[test]
    fn test_class_args_shape() {
        let runner = ToolRunner::new(test_config());
        let mut options = Options::new();
        options.insert("output", "/tmp/out");

        let args = runner.class_args(
            &["org.documentcloud.ExtractPages"],
            Path::new("/docs/report.pdf"),
            &options,
        );

        assert_eq!(args[0], "-Djava.awt.headless=true");
        assert!(args[1].starts_with("-Djava.util.logging.config.file="));
        assert_eq!(args[2], "-cp");
        assert_eq!(args[3], runner.config().classpath());
        assert_eq!(args[4], "org.documentcloud.ExtractPages");
        assert_eq!(&args[5..7], ["--output", "/tmp/out"]);
        assert_eq!(args.last().unwrap(), "/docs/report.pdf");
    }

    #[test]
    fn test_class_args_without_headless() {
        let mut config = test_config();
        config.headless = false;
        let runner = ToolRunner::new(config);

        let args = runner.class_args(
            &["org.documentcloud.ExtractText"],
            Path::new("in.pdf"),
            &Options::new(),
        );

        assert!(!args.contains(&"-Djava.awt.headless=true".to_string()));
        assert!(args[0].starts_with("-Djava.util.logging.config.file="));
    }

    #[test]
    fn test_mode_positional_arguments_precede_flags() {
        let runner = ToolRunner::new(test_config());
        let mut options = Options::new();
        options.insert("output", "/tmp/out");

        let args = runner.class_args(
            &["org.documentcloud.ExtractInfo", "title"],
            Path::new("in.pdf"),
            &options,
        );

        let info_pos = args
            .iter()
            .position(|a| a == "org.documentcloud.ExtractInfo")
            .unwrap();
        assert_eq!(args[info_pos + 1], "title");
        assert_eq!(args[info_pos + 2], "--output");
    }

    #[test]
    fn test_render_command_quotes_whitespace() {
        let args = vec!["--output".to_string(), "/tmp/my docs".to_string()];
        let rendered = render_command(Path::new("java"), &args);

        assert_eq!(rendered, "java --output '/tmp/my docs'");
    }

    #[test]
    fn test_render_command_escapes_single_quotes() {
        let args = vec!["it's".to_string()];
        let rendered = render_command(Path::new("java"), &args);

        assert_eq!(rendered, r"java 'it'\''s'");
    }

    #[test]
    fn test_quote_plain_token_untouched() {
        assert_eq!(quote("--output"), "--output");
        assert_eq!(quote("/tmp/out"), "/tmp/out");
        assert_eq!(quote(""), "''");
    }

    #[test]
    fn test_converter_args_use_vendored_jar() {
        let runner = ToolRunner::new(test_config());
        let jar = runner.config().converter_jar();
        assert!(jar.to_string_lossy().contains("jodconverter"));
    }

    #[tokio::test]
    async fn test_spawn_failure_is_tool_not_found() {
        let mut config = test_config();
        config.java_program = PathBuf::from("/nonexistent/docsplit-java-runtime");
        let runner = ToolRunner::new(config);

        let result = runner
            .run(
                &["org.documentcloud.ExtractPages"],
                Path::new("in.pdf"),
                &Options::new(),
            )
            .await;

        assert!(matches!(result, Err(Error::ToolNotFound { .. })));
    }
}
