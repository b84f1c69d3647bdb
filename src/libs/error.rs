use std::fmt;

/// A PSL record that cannot be trusted. Fatal for the whole batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedRecordError {
    /// The line did not split into the expected number of columns
    Columns {
        /// The line number (1-based, counting the preamble)
        line: usize,
        /// Number of tab-separated fields found
        found: usize,
    },
    /// qName or tName is empty
    EmptyName { line: usize, column: &'static str },
    /// blockCount is not a non-negative integer
    BlockCount {
        probe_id: String,
        target_id: String,
        value: String,
    },
}

impl fmt::Display for MalformedRecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedRecordError::Columns { line, found } => write!(
                f,
                "Malformed record at line {}: expected {} columns, found {}",
                line,
                crate::libs::psl::PSL_COLUMNS.len(),
                found
            ),
            MalformedRecordError::EmptyName { line, column } => {
                write!(f, "Malformed record at line {}: empty {}", line, column)
            }
            MalformedRecordError::BlockCount {
                probe_id,
                target_id,
                value,
            } => write!(
                f,
                "Malformed record {} -> {}: invalid blockCount \"{}\"",
                probe_id, target_id, value
            ),
        }
    }
}

impl std::error::Error for MalformedRecordError {}
