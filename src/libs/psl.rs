use std::io::BufRead;

use crate::libs::error::MalformedRecordError;

/// Column names of a PSL line, in file order.
pub const PSL_COLUMNS: [&str; 21] = [
    "matches",
    "misMatches",
    "repMatches",
    "nCount",
    "qNumInsert",
    "qBaseInsert",
    "tNumInsert",
    "tBaseInsert",
    "strand",
    "qName",
    "qSize",
    "qStart",
    "qEnd",
    "tName",
    "tSize",
    "tStart",
    "tEnd",
    "blockCount",
    "blockSizes",
    "qStarts",
    "tStarts",
];

/// Lines of the `psLayout version 3` preamble written by BLAT.
pub const PSL_HEADER_LINES: usize = 5;

const Q_NAME: usize = 9;
const T_NAME: usize = 13;
const BLOCK_COUNT: usize = 17;

/// One BLAT hit between a probe (query) and a target.
///
/// Only the two names and `blockCount` matter to the relation engine. The
/// remaining columns ride along untouched in `columns`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlignmentRecord {
    pub probe_id: String,
    pub target_id: String,
    /// Raw `blockCount` text, validated when the relation is built
    pub block_count: String,
    pub columns: Vec<String>,
}

impl AlignmentRecord {
    /// Build a record from the three fields the engine looks at; every other
    /// column is left empty.
    pub fn new(probe_id: &str, target_id: &str, block_count: &str) -> Self {
        let mut columns = vec![String::new(); PSL_COLUMNS.len()];
        columns[Q_NAME] = probe_id.to_string();
        columns[T_NAME] = target_id.to_string();
        columns[BLOCK_COUNT] = block_count.to_string();

        Self {
            probe_id: probe_id.to_string(),
            target_id: target_id.to_string(),
            block_count: block_count.to_string(),
            columns,
        }
    }

    /// Parse one tab-separated PSL line. `line_no` is only used for error
    /// messages.
    ///
    /// ```
    /// use blatr::libs::psl::AlignmentRecord;
    /// let line = "59\t13\t0\t0\t2\t3\t1\t1\t+\tquery\t100\t10\t90\ttarget\t200\t50\t130\t2\t40,40,\t10,50,\t50,90,";
    /// let rec = AlignmentRecord::from_line(line, 6).unwrap();
    /// assert_eq!(rec.probe_id, "query");
    /// assert_eq!(rec.target_id, "target");
    /// assert_eq!(rec.block_count, "2");
    /// assert_eq!(rec.column("strand"), Some("+"));
    /// ```
    pub fn from_line(line: &str, line_no: usize) -> Result<Self, MalformedRecordError> {
        let fields: Vec<&str> = line.trim_end().split('\t').collect();
        if fields.len() != PSL_COLUMNS.len() {
            return Err(MalformedRecordError::Columns {
                line: line_no,
                found: fields.len(),
            });
        }

        for (idx, column) in [(Q_NAME, "qName"), (T_NAME, "tName")] {
            if fields[idx].is_empty() {
                return Err(MalformedRecordError::EmptyName {
                    line: line_no,
                    column,
                });
            }
        }

        Ok(Self {
            probe_id: fields[Q_NAME].to_string(),
            target_id: fields[T_NAME].to_string(),
            block_count: fields[BLOCK_COUNT].to_string(),
            columns: fields.iter().map(|s| s.to_string()).collect(),
        })
    }

    /// Look up a carried-through column by its PSL name.
    pub fn column(&self, name: &str) -> Option<&str> {
        PSL_COLUMNS
            .iter()
            .position(|c| *c == name)
            .and_then(|idx| self.columns.get(idx))
            .map(|s| s.as_str())
    }
}

/// Read every record after the first `header_lines` lines.
///
/// Any line that is not a 21-column PSL row, blank lines included, aborts
/// the whole read.
pub fn read_records<R: BufRead>(
    reader: R,
    header_lines: usize,
) -> anyhow::Result<Vec<AlignmentRecord>> {
    let mut records = vec![];

    for (i, line) in reader.lines().enumerate().skip(header_lines) {
        let line = line?;
        records.push(AlignmentRecord::from_line(&line, i + 1)?);
    }

    Ok(records)
}
