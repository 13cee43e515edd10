use crate::encoding::TextEncoding;
use crate::{config::ParserConfig, errors::ParserError, metrics::ParserMetrics};
use famgraph::{FamilyData, FamilyStore};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Information about a successfully parsed input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileInfo {
    /// Path to the source file (a logical name for in-memory input)
    pub file_path: PathBuf,

    /// Encoding the bytes were decoded with
    pub encoding: TextEncoding,

    /// Format version from the header (`GEDC.VERS`)
    pub version: Option<String>,

    /// Time taken to parse this input
    #[serde(with = "crate::metrics::duration_serde")]
    pub parse_time: Duration,

    /// Number of non-blank lines
    pub line_count: usize,

    /// Input size in bytes
    pub byte_count: usize,

    /// Lines dropped as malformed
    pub skipped_lines: usize,

    /// Level-0 records built
    pub records: usize,

    /// Individuals converted
    pub people: usize,

    /// Families converted
    pub families: usize,

    /// Source records converted
    pub sources: usize,

    /// Media records converted
    pub media: usize,

    /// `NOTE`/`SOUR`/`OBJE` pointers that named no record
    pub unresolved_references: usize,

    /// Family member pointers that named no individual
    pub dangling_links: usize,
}

impl FileInfo {
    /// Total number of entities extracted
    pub fn entity_count(&self) -> usize {
        self.people + self.families + self.sources + self.media
    }
}

/// Output of a successful parse
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedFile {
    /// Entities, linked
    pub data: FamilyData,

    /// What the parse did
    pub info: FileInfo,
}

/// Core trait for genealogy file parsers
///
/// A parser turns a file, byte buffer or string into linked [`FamilyData`].
/// Loading the result into a [`FamilyStore`] is a separate, atomic step, so a
/// failed parse never disturbs the graph readers are using.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` so one parser can serve many threads.
///
/// # Example
/// ```rust,ignore
/// use famgraph_gedcom::{GenealogyParser, ParsedFile, ParserConfig};
///
/// struct MyParser {
///     config: ParserConfig,
/// }
///
/// impl GenealogyParser for MyParser {
///     fn format(&self) -> &str {
///         "myformat"
///     }
///
///     fn file_extensions(&self) -> &[&str] {
///         &[".my"]
///     }
///
///     // ... implement other required methods
/// }
/// ```
pub trait GenealogyParser: Send + Sync {
    /// Returns the format identifier (lowercase, e.g. "gedcom")
    fn format(&self) -> &str;

    /// Returns supported file extensions (e.g. [".ged"])
    fn file_extensions(&self) -> &[&str];

    /// Parse a single file
    ///
    /// # Errors
    /// Returns `ParserError` if:
    /// - File cannot be read
    /// - File exceeds the configured size limit
    /// - Contents cannot be decoded or contain no records
    fn parse_file(&self, path: &Path) -> Result<ParsedFile, ParserError>;

    /// Parse raw bytes, detecting their encoding
    ///
    /// # Arguments
    /// * `bytes` - File contents
    /// * `file_path` - Logical path used in errors and `FileInfo`
    fn parse_bytes(&self, bytes: &[u8], file_path: &Path) -> Result<ParsedFile, ParserError>;

    /// Parse already decoded text
    ///
    /// # Arguments
    /// * `source` - GEDCOM text
    /// * `file_path` - Logical path used in errors and `FileInfo`
    fn parse_source(&self, source: &str, file_path: &Path) -> Result<ParsedFile, ParserError>;

    /// Parse text and replace the store's graph with the result
    ///
    /// The store is only touched after the parse has succeeded.
    fn load_into(
        &self,
        source: &str,
        file_path: &Path,
        store: &FamilyStore,
    ) -> Result<FileInfo, ParserError> {
        let parsed = self.parse_source(source, file_path)?;
        store.load(parsed.data);
        Ok(parsed.info)
    }

    /// Parse a file and replace the store's graph with the result
    fn load_file_into(&self, path: &Path, store: &FamilyStore) -> Result<FileInfo, ParserError> {
        let parsed = self.parse_file(path)?;
        store.load(parsed.data);
        Ok(parsed.info)
    }

    /// Discover parseable files in a directory
    ///
    /// Default implementation walks the directory and filters by extension.
    fn discover_files(&self, dir: &Path) -> Result<Vec<PathBuf>, ParserError> {
        use std::fs;

        let mut files = Vec::new();

        fn walk_dir(
            parser: &(impl GenealogyParser + ?Sized),
            dir: &Path,
            files: &mut Vec<PathBuf>,
        ) -> Result<(), ParserError> {
            if !dir.is_dir() {
                return Ok(());
            }

            for entry in
                fs::read_dir(dir).map_err(|e| ParserError::IoError(dir.to_path_buf(), e))?
            {
                let entry = entry.map_err(|e| ParserError::IoError(dir.to_path_buf(), e))?;
                let path = entry.path();

                if path.is_dir() {
                    walk_dir(parser, &path, files)?;
                } else if parser.can_parse(&path) {
                    files.push(path);
                }
            }

            Ok(())
        }

        walk_dir(self, dir, &mut files)?;
        files.sort();
        Ok(files)
    }

    /// Check if this parser can handle the given file
    ///
    /// Default implementation checks the extension, ignoring case.
    fn can_parse(&self, path: &Path) -> bool {
        if let Some(ext) = path.extension() {
            let ext_str = format!(".{}", ext.to_string_lossy().to_lowercase());
            self.file_extensions().contains(&ext_str.as_str())
        } else {
            false
        }
    }

    /// Get parser configuration
    fn config(&self) -> &ParserConfig;

    /// Get accumulated metrics
    fn metrics(&self) -> ParserMetrics;

    /// Reset metrics
    fn reset_metrics(&mut self);
}
