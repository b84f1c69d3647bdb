use std::io::{Read, Write};

/// Probes must match on strictly more bases than this.
pub const MIN_MATCHES: f64 = 108.0;

/// Probes may span at most this many blocks.
pub const MAX_BLOCKS: f64 = 1.0;

/// 0-based columns kept in the output: matches, misMatches, strand, qName,
/// tName, tSize, tStart, blockCount.
pub const KEEP_COLUMNS: [usize; 8] = [0, 1, 8, 9, 13, 14, 15, 17];

const MATCHES: usize = 0;
const BLOCK_COUNT: usize = 17;

/// Keeps long, ungapped probe hits and projects them to a few columns.
///
/// Unlike the relation builder, this filter is lenient: short rows and rows
/// whose numeric columns don't parse are dropped, not reported.
#[derive(Debug, Clone)]
pub struct ProbeFilter {
    pub min_matches: f64,
    pub max_blocks: f64,
    pub columns: Vec<usize>,
}

impl Default for ProbeFilter {
    fn default() -> Self {
        Self {
            min_matches: MIN_MATCHES,
            max_blocks: MAX_BLOCKS,
            columns: KEEP_COLUMNS.to_vec(),
        }
    }
}

impl ProbeFilter {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_min_matches(mut self, min_matches: f64) -> Self {
        self.min_matches = min_matches;
        self
    }

    pub fn with_max_blocks(mut self, max_blocks: f64) -> Self {
        self.max_blocks = max_blocks;
        self
    }

    /// Returns the projected row if `row` passes.
    ///
    /// ```
    /// use blatr::libs::filter::ProbeFilter;
    /// let row: Vec<String> = (1..=21).map(|i| i.to_string()).collect();
    ///
    /// let mut pass = row.clone();
    /// pass[0] = "120".to_string();
    /// pass[17] = "1".to_string();
    /// let kept = ProbeFilter::new().apply(&pass).unwrap();
    /// assert_eq!(kept, vec!["120", "2", "9", "10", "14", "15", "16", "1"]);
    ///
    /// assert!(ProbeFilter::new().apply(&row).is_none());
    /// ```
    pub fn apply<'a, S: AsRef<str>>(&self, row: &'a [S]) -> Option<Vec<&'a str>> {
        if row.len() <= BLOCK_COUNT {
            return None;
        }

        let matches: f64 = row[MATCHES].as_ref().trim().parse().ok()?;
        let blocks: f64 = row[BLOCK_COUNT].as_ref().trim().parse().ok()?;
        if matches <= self.min_matches || blocks > self.max_blocks {
            return None;
        }

        self.columns
            .iter()
            .map(|&i| row.get(i).map(|s| s.as_ref()))
            .collect()
    }

    /// Filter a delimited table, skipping the first `header_lines` lines.
    /// Returns `(rows read, rows kept)`.
    pub fn run<R: Read, W: Write>(
        &self,
        input: R,
        output: W,
        delimiter: u8,
        header_lines: usize,
    ) -> anyhow::Result<(usize, usize)> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .flexible(true)
            .from_reader(input);
        let mut wtr = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .from_writer(output);

        let mut n_read = 0;
        let mut n_kept = 0;
        for result in rdr.records() {
            let record = result?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            if line <= header_lines as u64 {
                continue;
            }

            n_read += 1;
            let row: Vec<&str> = record.iter().collect();
            if let Some(kept) = self.apply(&row) {
                wtr.write_record(&kept)?;
                n_kept += 1;
            }
        }
        wtr.flush()?;

        Ok((n_read, n_kept))
    }
}
