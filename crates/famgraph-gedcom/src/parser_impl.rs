//! Implementation of the GenealogyParser trait for GEDCOM
//!
//! Wires the stages together: decode, tokenize, build records, convert to
//! entities, link. Each stage is lenient and counts what it skipped; only
//! the structural failures listed in [`ParserError`] abort a parse.

use crate::builder::build_records;
use crate::converter::convert;
use crate::encoding::{decode, TextEncoding};
use crate::tokenizer::tokenize;
use crate::{FileInfo, GenealogyParser, ParsedFile, ParserConfig, ParserError, ParserMetrics, ParserResult};
use famgraph::link_families;
use log::{debug, info, warn};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::Instant;

/// GEDCOM 5.5 / 5.5.1 / 7.0 parser implementing the GenealogyParser trait
pub struct GedcomParser {
    config: ParserConfig,
    metrics: Mutex<ParserMetrics>,
}

impl GedcomParser {
    /// Create a new GEDCOM parser with default configuration
    pub fn new() -> Self {
        Self::with_config(ParserConfig::default())
    }

    /// Create a new GEDCOM parser with custom configuration
    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            config,
            metrics: Mutex::new(ParserMetrics::default()),
        }
    }

    /// Create a parser, rejecting an unusable configuration
    pub fn try_with_config(config: ParserConfig) -> ParserResult<Self> {
        config.validate()?;
        Ok(Self::with_config(config))
    }

    fn lock_metrics(&self) -> MutexGuard<'_, ParserMetrics> {
        self.metrics.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Record the outcome of one top-level parse
    fn track(&self, start: Instant, result: ParserResult<ParsedFile>) -> ParserResult<ParsedFile> {
        let duration = start.elapsed();
        let mut metrics = self.lock_metrics();
        metrics.files_attempted += 1;
        metrics.total_parse_time += duration;

        match result {
            Ok(mut parsed) => {
                parsed.info.parse_time = duration;
                metrics.files_succeeded += 1;
                metrics.total_lines += parsed.info.line_count;
                metrics.skipped_lines += parsed.info.skipped_lines;
                metrics.total_records += parsed.info.records;
                metrics.total_people += parsed.info.people;
                metrics.total_families += parsed.info.families;
                metrics.unresolved_references += parsed.info.unresolved_references;
                Ok(parsed)
            }
            Err(e) => {
                metrics.files_failed += 1;
                warn!("{e}");
                Err(e)
            }
        }
    }

    fn decode_and_parse(&self, bytes: &[u8], file_path: &Path) -> ParserResult<ParsedFile> {
        if bytes.len() > self.config.max_file_size {
            return Err(ParserError::FileTooLarge(file_path.to_path_buf(), bytes.len()));
        }

        let (text, encoding) = decode(bytes, self.config.latin1_fallback)
            .map_err(|message| ParserError::Encoding(file_path.to_path_buf(), message))?;
        if encoding == TextEncoding::Latin1 {
            debug!("{} is not UTF-8, decoded as Latin-1", file_path.display());
        }

        let mut parsed = self.parse_text(&text, file_path, encoding)?;
        parsed.info.byte_count = bytes.len();
        Ok(parsed)
    }

    fn parse_text(
        &self,
        source: &str,
        file_path: &Path,
        encoding: TextEncoding,
    ) -> ParserResult<ParsedFile> {
        let (lines, token_stats) = tokenize(source);
        let Some(first) = lines.first() else {
            return Err(ParserError::NotGedcom(file_path.to_path_buf()));
        };
        if self.config.require_header && (first.level != 0 || first.tag != "HEAD") {
            return Err(ParserError::MissingHeader(file_path.to_path_buf()));
        }
        if token_stats.skipped > 0 {
            debug!(
                "Skipped {} malformed lines in {}",
                token_stats.skipped,
                file_path.display()
            );
        }

        let (records, build_stats) = build_records(lines);
        let (mut data, conversion) = convert(&records, &self.config);
        let links = link_families(&mut data);

        info!(
            "Parsed {}: {} people, {} families, {} sources",
            file_path.display(),
            conversion.people,
            conversion.families,
            conversion.sources
        );

        let info = FileInfo {
            file_path: file_path.to_path_buf(),
            encoding,
            version: data.header.version.clone(),
            parse_time: Default::default(), // Set by track()
            line_count: token_stats.lines,
            byte_count: source.len(),
            skipped_lines: token_stats.skipped + build_stats.orphaned,
            records: build_stats.records,
            people: conversion.people,
            families: conversion.families,
            sources: conversion.sources,
            media: conversion.media,
            unresolved_references: conversion.unresolved_references,
            dangling_links: links.dangling,
        };

        Ok(ParsedFile { data, info })
    }
}

impl Default for GedcomParser {
    fn default() -> Self {
        Self::new()
    }
}

impl GenealogyParser for GedcomParser {
    fn format(&self) -> &str {
        "gedcom"
    }

    fn file_extensions(&self) -> &[&str] {
        &[".ged", ".gedcom"]
    }

    fn parse_file(&self, path: &Path) -> Result<ParsedFile, ParserError> {
        let start = Instant::now();

        // Check file extension
        if !self.can_parse(path) {
            return self.track(start, Err(ParserError::NotGedcom(path.to_path_buf())));
        }

        // Check file size before reading it
        let size = std::fs::metadata(path)
            .map_err(|e| ParserError::IoError(path.to_path_buf(), e))
            .map(|meta| meta.len() as usize);
        let result = size.and_then(|size| {
            if size > self.config.max_file_size {
                return Err(ParserError::FileTooLarge(path.to_path_buf(), size));
            }
            let bytes =
                std::fs::read(path).map_err(|e| ParserError::IoError(path.to_path_buf(), e))?;
            self.decode_and_parse(&bytes, path)
        });

        self.track(start, result)
    }

    fn parse_bytes(&self, bytes: &[u8], file_path: &Path) -> Result<ParsedFile, ParserError> {
        let start = Instant::now();
        let result = self.decode_and_parse(bytes, file_path);
        self.track(start, result)
    }

    fn parse_source(&self, source: &str, file_path: &Path) -> Result<ParsedFile, ParserError> {
        let start = Instant::now();
        let result = if source.len() > self.config.max_file_size {
            Err(ParserError::FileTooLarge(file_path.to_path_buf(), source.len()))
        } else {
            self.parse_text(source, file_path, TextEncoding::Utf8)
        };
        self.track(start, result)
    }

    fn config(&self) -> &ParserConfig {
        &self.config
    }

    fn metrics(&self) -> ParserMetrics {
        self.lock_metrics().clone()
    }

    fn reset_metrics(&mut self) {
        *self.lock_metrics() = ParserMetrics::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = "0 HEAD\n1 GEDC\n2 VERS 5.5.1\n0 @I1@ INDI\n1 NAME Ann //\n0 TRLR\n";

    #[test]
    fn test_gedcom_parser_new() {
        let parser = GedcomParser::new();
        assert_eq!(parser.format(), "gedcom");
    }

    #[test]
    fn test_gedcom_parser_file_extensions() {
        let parser = GedcomParser::new();
        let exts = parser.file_extensions();
        assert_eq!(exts.len(), 2);
        assert!(exts.contains(&".ged"));
        assert!(exts.contains(&".gedcom"));
    }

    #[test]
    fn test_gedcom_parser_can_parse() {
        let parser = GedcomParser::new();
        assert!(parser.can_parse(Path::new("family.ged")));
        assert!(parser.can_parse(Path::new("FAMILY.GED")));
        assert!(parser.can_parse(Path::new("tree.gedcom")));
        assert!(!parser.can_parse(Path::new("family.txt")));
        assert!(!parser.can_parse(Path::new("ged")));
    }

    #[test]
    fn test_metrics_initial_state() {
        let parser = GedcomParser::new();
        let metrics = parser.metrics();
        assert_eq!(metrics.files_attempted, 0);
        assert_eq!(metrics.files_succeeded, 0);
        assert_eq!(metrics.files_failed, 0);
    }

    #[test]
    fn test_parse_source_info() {
        let parser = GedcomParser::new();
        let parsed = parser.parse_source(SMALL, Path::new("small.ged")).unwrap();
        assert_eq!(parsed.info.people, 1);
        assert_eq!(parsed.info.records, 3);
        assert_eq!(parsed.info.line_count, 6);
        assert_eq!(parsed.info.version.as_deref(), Some("5.5.1"));
        assert_eq!(parsed.info.encoding, TextEncoding::Utf8);
        assert_eq!(parsed.data.people[0].name.full, "Ann");
    }

    #[test]
    fn test_not_gedcom() {
        let parser = GedcomParser::new();
        let err = parser
            .parse_source("hello world\nnothing here\n", Path::new("notes.txt"))
            .unwrap_err();
        assert!(matches!(err, ParserError::NotGedcom(_)));

        let metrics = parser.metrics();
        assert_eq!(metrics.files_attempted, 1);
        assert_eq!(metrics.files_failed, 1);
    }

    #[test]
    fn test_strict_requires_header() {
        let parser = GedcomParser::with_config(ParserConfig::strict());
        let err = parser
            .parse_source("0 @I1@ INDI\n1 NAME Ann //\n", Path::new("x.ged"))
            .unwrap_err();
        assert!(matches!(err, ParserError::MissingHeader(_)));
        assert!(parser.parse_source(SMALL, Path::new("x.ged")).is_ok());

        // Lenient mode accepts the same input
        let lenient = GedcomParser::new();
        assert!(lenient
            .parse_source("0 @I1@ INDI\n1 NAME Ann //\n", Path::new("x.ged"))
            .is_ok());
    }

    #[test]
    fn test_size_limit() {
        let parser = GedcomParser::with_config(ParserConfig::default().with_max_file_size(10));
        let err = parser.parse_bytes(SMALL.as_bytes(), Path::new("x.ged")).unwrap_err();
        assert!(matches!(err, ParserError::FileTooLarge(_, n) if n == SMALL.len()));
    }

    #[test]
    fn test_encoding_error_in_strict_mode() {
        let parser = GedcomParser::with_config(ParserConfig::strict());
        let err = parser
            .parse_bytes(b"0 HEAD\n1 NOTE caf\xE9\n", Path::new("x.ged"))
            .unwrap_err();
        assert!(matches!(err, ParserError::Encoding(_, _)));

        let parsed = GedcomParser::new()
            .parse_bytes(b"0 HEAD\n1 NOTE caf\xE9\n", Path::new("x.ged"))
            .unwrap();
        assert_eq!(parsed.info.encoding, TextEncoding::Latin1);
    }

    #[test]
    fn test_try_with_config() {
        assert!(GedcomParser::try_with_config(ParserConfig::default()).is_ok());
        assert!(matches!(
            GedcomParser::try_with_config(ParserConfig::default().with_max_file_size(0)),
            Err(ParserError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_reset_metrics() {
        let mut parser = GedcomParser::new();
        parser.parse_source(SMALL, Path::new("x.ged")).unwrap();
        assert_eq!(parser.metrics().total_people, 1);
        parser.reset_metrics();
        assert_eq!(parser.metrics(), ParserMetrics::default());
    }
}
