use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Metrics collected during parsing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParserMetrics {
    /// Total inputs attempted to parse
    pub files_attempted: usize,

    /// Inputs successfully parsed
    pub files_succeeded: usize,

    /// Inputs that failed parsing
    pub files_failed: usize,

    /// Total time spent parsing
    #[serde(with = "duration_serde")]
    pub total_parse_time: Duration,

    /// Lines read
    pub total_lines: usize,

    /// Lines dropped as malformed
    pub skipped_lines: usize,

    /// Level-0 records built
    pub total_records: usize,

    /// Individuals converted
    pub total_people: usize,

    /// Families converted
    pub total_families: usize,

    /// Pointers that named no record
    pub unresolved_references: usize,
}

// Helper module for serializing Duration
pub(crate) mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (duration.as_millis() as u64).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis: u64 = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

impl Default for ParserMetrics {
    fn default() -> Self {
        Self {
            files_attempted: 0,
            files_succeeded: 0,
            files_failed: 0,
            total_parse_time: Duration::ZERO,
            total_lines: 0,
            skipped_lines: 0,
            total_records: 0,
            total_people: 0,
            total_families: 0,
            unresolved_references: 0,
        }
    }
}

impl ParserMetrics {
    /// Success rate (0.0 to 1.0)
    pub fn success_rate(&self) -> f64 {
        if self.files_attempted == 0 {
            0.0
        } else {
            self.files_succeeded as f64 / self.files_attempted as f64
        }
    }

    /// Average parse time per input
    pub fn avg_parse_time(&self) -> Duration {
        if self.files_succeeded == 0 {
            Duration::ZERO
        } else {
            self.total_parse_time / self.files_succeeded as u32
        }
    }

    /// Merge another metrics object into this one
    pub fn merge(&mut self, other: &ParserMetrics) {
        self.files_attempted += other.files_attempted;
        self.files_succeeded += other.files_succeeded;
        self.files_failed += other.files_failed;
        self.total_parse_time += other.total_parse_time;
        self.total_lines += other.total_lines;
        self.skipped_lines += other.skipped_lines;
        self.total_records += other.total_records;
        self.total_people += other.total_people;
        self.total_families += other.total_families;
        self.unresolved_references += other.unresolved_references;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_rate() {
        let mut metrics = ParserMetrics::default();
        assert_eq!(metrics.success_rate(), 0.0);
        metrics.files_attempted = 4;
        metrics.files_succeeded = 3;
        assert_eq!(metrics.success_rate(), 0.75);
    }

    #[test]
    fn test_merge() {
        let mut a = ParserMetrics {
            files_attempted: 1,
            files_succeeded: 1,
            total_people: 10,
            ..Default::default()
        };
        let b = ParserMetrics {
            files_attempted: 2,
            files_failed: 2,
            total_people: 5,
            skipped_lines: 3,
            ..Default::default()
        };
        a.merge(&b);
        assert_eq!(a.files_attempted, 3);
        assert_eq!(a.files_failed, 2);
        assert_eq!(a.total_people, 15);
        assert_eq!(a.skipped_lines, 3);
    }
}
