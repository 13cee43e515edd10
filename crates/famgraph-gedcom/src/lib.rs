//! # famgraph-gedcom
//!
//! GEDCOM parser for famgraph - reads GEDCOM 5.5, 5.5.1 and 7.0 files into
//! linked [`famgraph::FamilyData`].
//!
//! ## Features
//!
//! - Parse files, byte buffers (UTF-8, UTF-16 or Latin-1) or strings
//! - Joins `CONT`/`CONC` continuation lines and decodes `@@`
//! - Resolves `NOTE`/`SOUR`/`OBJE` pointers, including forward references
//! - Keeps unknown and vendor (`_TAG`) structures as opaque fields
//! - Safe: malformed lines are skipped and counted, never a panic
//!
//! ## Pipeline
//!
//! ```text
//! bytes ─ encoding ─▶ text ─ tokenizer ─▶ GedcomLine* ─ builder ─▶ RawNode*
//!       ─ converter ─▶ FamilyData ─ famgraph::link_families ─▶ linked FamilyData
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use famgraph::FamilyStore;
//! use famgraph_gedcom::{GedcomParser, GenealogyParser};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let source = "0 HEAD\n\
//!               0 @I1@ INDI\n1 NAME John /Smith/\n1 FAMS @F1@\n\
//!               0 @I2@ INDI\n1 NAME Ann /Smith/\n1 FAMC @F1@\n\
//!               0 @F1@ FAM\n1 HUSB @I1@\n1 CHIL @I2@\n\
//!               0 TRLR\n";
//!
//! let store = FamilyStore::new();
//! let parser = GedcomParser::new();
//! let info = parser.load_into(source, Path::new("smith.ged"), &store)?;
//! assert_eq!(info.people, 2);
//!
//! let graph = store.snapshot();
//! assert_eq!(graph.calculate_relationship("I1", "I2").label(), "Parent");
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod config;
pub mod converter;
pub mod date;
pub mod encoding;
pub mod errors;
pub mod metrics;
pub mod name;
pub mod record;
pub mod tokenizer;
pub mod traits;

mod parser_impl;

// Re-export commonly used types
pub use builder::{build_records, BuildStats, RecordBuilder};
pub use config::ParserConfig;
pub use converter::{convert, ConversionStats};
pub use date::parse_date;
pub use encoding::TextEncoding;
pub use errors::{ParserError, ParserResult};
pub use metrics::ParserMetrics;
pub use name::parse_name;
pub use parser_impl::GedcomParser;
pub use record::{RawNode, RawValue};
pub use tokenizer::{tokenize, GedcomLine, TokenStats, Tokenizer};
pub use traits::{FileInfo, GenealogyParser, ParsedFile};
