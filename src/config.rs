//! Configuration for locating the external Docsplit toolkit
//!
//! Everything the wrapper needs to know about the installation is carried in
//! [`DocsplitConfig`]: the installation root of the Java toolkit, the runtime
//! binary, the JVM flags, and the subprocess time budget. There is no global
//! state; a config is handed to [`crate::Docsplit`] at construction.

use std::env;
use std::path::PathBuf;

#[cfg(windows)]
const CLASSPATH_SEPARATOR: &str = ";";
#[cfg(not(windows))]
const CLASSPATH_SEPARATOR: &str = ":";

/// Default subprocess timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Location and invocation settings for the Docsplit Java toolkit
#[derive(Debug, Clone)]
pub struct DocsplitConfig {
    /// Installation root of the Docsplit Java toolkit
    pub java_root: PathBuf,
    /// Java runtime binary, a name resolved via PATH or an absolute path (default: `java`)
    pub java_program: PathBuf,
    /// Run the JVM with `-Djava.awt.headless=true` (default: true)
    pub headless: bool,
    /// `java.util.logging` configuration file (default: `vendor/logging.properties` under the root)
    pub logging_config: Option<PathBuf>,
    /// Subprocess timeout in seconds (default: 300)
    pub timeout_secs: u64,
    /// Base directory for implicit PDF conversion output (default: system temp dir)
    pub temp_dir: PathBuf,
}

impl Default for DocsplitConfig {
    fn default() -> Self {
        Self {
            java_root: PathBuf::from("/usr/local/lib/docsplit"),
            java_program: PathBuf::from("java"),
            headless: true,
            logging_config: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            temp_dir: env::temp_dir(),
        }
    }
}

impl DocsplitConfig {
    /// Create a config for a toolkit installed at the given root
    pub fn new(java_root: impl Into<PathBuf>) -> Self {
        Self {
            java_root: java_root.into(),
            ..Self::default()
        }
    }

    /// Build a config from the environment.
    ///
    /// Recognized variables: `DOCSPLIT_JAVA_ROOT` (installation root),
    /// `DOCSPLIT_JAVA` (runtime binary), `DOCSPLIT_TIMEOUT_SECS`.
    /// Unset or empty variables fall back to the defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(root) = env::var_os("DOCSPLIT_JAVA_ROOT").filter(|v| !v.is_empty()) {
            config.java_root = PathBuf::from(root);
        }
        if let Some(program) = env::var_os("DOCSPLIT_JAVA").filter(|v| !v.is_empty()) {
            config.java_program = PathBuf::from(program);
        }
        if let Ok(secs) = env::var("DOCSPLIT_TIMEOUT_SECS") {
            match secs.parse() {
                Ok(secs) => config.timeout_secs = secs,
                Err(_) => tracing::warn!(
                    value = %secs,
                    "ignoring unparsable DOCSPLIT_TIMEOUT_SECS, using default"
                ),
            }
        }

        config
    }

    /// Classpath covering the toolkit's `build` directory and vendored jars
    pub fn classpath(&self) -> String {
        format!(
            "{}{}{}",
            self.java_root.join("build").display(),
            CLASSPATH_SEPARATOR,
            self.java_root.join("vendor").join("*").display()
        )
    }

    /// The `-Djava.util.logging.config.file=...` JVM flag
    pub fn logging_flag(&self) -> String {
        let path = self
            .logging_config
            .clone()
            .unwrap_or_else(|| self.java_root.join("vendor").join("logging.properties"));
        format!("-Djava.util.logging.config.file={}", path.display())
    }

    /// Path to the vendored office-document converter jar
    pub fn converter_jar(&self) -> PathBuf {
        self.java_root
            .join("vendor")
            .join("jodconverter")
            .join("jodconverter-cli-2.2.2.jar")
    }

    /// Directory implicit PDF conversions are written into
    pub fn conversion_dir(&self) -> PathBuf {
        self.temp_dir.join("docsplit")
    }
}
