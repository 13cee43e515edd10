//! Hierarchical record builder.
//!
//! Rebuilds the nested record tree implied by level numbers from the flat
//! token stream. Open nodes live on an explicit stack of owned values: a line
//! at level L first folds every open node at level ≥ L into its parent, then
//! opens its own node. A level-0 line therefore completes the previous
//! record.

use crate::record::{RawNode, RawValue};
use crate::tokenizer::GedcomLine;
use log::debug;
use serde::{Deserialize, Serialize};

/// Counters for one build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildStats {
    /// Level-0 records completed
    pub records: usize,
    /// CONT/CONC lines merged into a value
    pub continuations: usize,
    /// Lines dropped because nothing could contain them
    pub orphaned: usize,
}

/// Streaming record builder.
///
/// Feed lines in order with [`RecordBuilder::push`]; each completed level-0
/// record is handed back as soon as the next one starts.
#[derive(Debug, Default)]
pub struct RecordBuilder {
    // (level, node); levels strictly increase from bottom to top
    stack: Vec<(usize, RawNode)>,
    stats: BuildStats,
}

impl RecordBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counters so far.
    pub fn stats(&self) -> BuildStats {
        self.stats
    }

    /// Consume one line; returns the previous record if this line completed it.
    pub fn push(&mut self, line: GedcomLine) -> Option<RawNode> {
        if line.tag == "CONT" || line.tag == "CONC" {
            let finished = self.fold_to(line.level.max(1));
            self.continue_text(&line);
            return finished;
        }

        let finished = self.fold_to(line.level);
        if line.level > 0 && self.stack.is_empty() {
            debug!(
                "Dropping {} on line {} outside any record",
                line.tag, line.line
            );
            self.stats.orphaned += 1;
            return finished;
        }

        let value = line.value.as_deref().map(RawValue::parse);
        self.stack
            .push((line.level, RawNode::new(line.tag, line.xref, value, line.line)));
        finished
    }

    /// Close every open node; returns the last record, if any.
    pub fn finish(&mut self) -> Option<RawNode> {
        self.fold_to(0)
    }

    /// Fold open nodes at `level` or deeper into their parents.
    fn fold_to(&mut self, level: usize) -> Option<RawNode> {
        while let Some(&(top_level, _)) = self.stack.last() {
            if top_level < level {
                break;
            }
            let (_, node) = self.stack.pop()?;
            match self.stack.last_mut() {
                Some((_, parent)) => parent.children.push(node),
                None => {
                    self.stats.records += 1;
                    return Some(node);
                }
            }
        }
        None
    }

    /// Append a CONT/CONC value to the enclosing text.
    fn continue_text(&mut self, line: &GedcomLine) {
        let Some((_, target)) = self.stack.last_mut() else {
            debug!("Dropping {} on line {} outside any record", line.tag, line.line);
            self.stats.orphaned += 1;
            return;
        };

        let piece = line
            .value
            .as_deref()
            .map(|v| v.replace("@@", "@"))
            .unwrap_or_default();
        let separator = if line.tag == "CONT" { "\n" } else { "" };

        // Some tools emit continuations of a child's text one level too shallow
        let text_child = if target.value.is_none() && !matches!(target.tag.as_str(), "NOTE" | "TEXT") {
            target
                .children
                .iter()
                .rposition(|child| matches!(child.value, Some(RawValue::Text(_))))
        } else {
            None
        };

        let holder = match text_child {
            Some(index) => &mut target.children[index],
            None => {
                if target.value.is_none() {
                    target.value = Some(RawValue::Text(String::new()));
                }
                target
            }
        };

        let Some(text) = holder.text_mut() else {
            debug!("Dropping {} on line {}: value is a pointer", line.tag, line.line);
            self.stats.orphaned += 1;
            return;
        };

        text.push_str(separator);
        text.push_str(&piece);
        self.stats.continuations += 1;
    }
}

/// Build every record from a token stream.
pub fn build_records(lines: impl IntoIterator<Item = GedcomLine>) -> (Vec<RawNode>, BuildStats) {
    let mut builder = RecordBuilder::new();
    let mut records = Vec::new();
    for line in lines {
        records.extend(builder.push(line));
    }
    records.extend(builder.finish());
    (records, builder.stats())
}
