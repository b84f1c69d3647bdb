use anyhow::Context;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::libs::relation::{CountRow, HitRow, Relation};

/// The five tables derived from a [`Relation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    TargetCounts,
    ProbeCounts,
    ProbeToTargets,
    TargetToProbes,
    UniversalProbes,
}

impl ReportKind {
    pub const ALL: [ReportKind; 5] = [
        ReportKind::TargetCounts,
        ReportKind::ProbeCounts,
        ReportKind::ProbeToTargets,
        ReportKind::TargetToProbes,
        ReportKind::UniversalProbes,
    ];

    /// Name used on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            ReportKind::TargetCounts => "target-counts",
            ReportKind::ProbeCounts => "probe-counts",
            ReportKind::ProbeToTargets => "probe-hits",
            ReportKind::TargetToProbes => "target-hits",
            ReportKind::UniversalProbes => "universal",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            ReportKind::TargetCounts => "Unique_Target_Counts.csv",
            ReportKind::ProbeCounts => "Unique_Probe_Counts.csv",
            ReportKind::ProbeToTargets => "Probe_to_Target_Hits.csv",
            ReportKind::TargetToProbes => "Target_to_Probe_Hits.csv",
            ReportKind::UniversalProbes => "Probes_Hitting_All_Targets.csv",
        }
    }

    pub fn header(&self) -> &'static [&'static str] {
        match self {
            ReportKind::TargetCounts => &["Target (Column 14)", "Unique Probes (Column 10)"],
            ReportKind::ProbeCounts => &["Probe (Column 10)", "Unique Targets (Column 14)"],
            ReportKind::ProbeToTargets => &["Probe (Column 10)", "Target Hits (Column 14)"],
            ReportKind::TargetToProbes => &["Target (Column 14)", "Probes (Column 10)"],
            ReportKind::UniversalProbes => &["Probes Hitting All Targets"],
        }
    }
}

/// All reports of one run, materialized as rows of text cells.
///
/// Everything is computed up front so nothing is written for a batch that
/// fails halfway.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reports {
    pub target_counts: Vec<Vec<String>>,
    pub probe_counts: Vec<Vec<String>>,
    pub probe_to_targets: Vec<Vec<String>>,
    pub target_to_probes: Vec<Vec<String>>,
    pub universal_probes: Vec<Vec<String>>,
}

impl Reports {
    pub fn from_relation(relation: &Relation) -> Self {
        let counts = |rows: Vec<CountRow>| -> Vec<Vec<String>> {
            rows.into_iter()
                .map(|r| vec![r.key, r.count.to_string()])
                .collect()
        };
        let hits = |rows: Vec<HitRow>| -> Vec<Vec<String>> {
            rows.into_iter().map(|r| vec![r.key, r.hits]).collect()
        };

        Self {
            target_counts: counts(relation.target_counts()),
            probe_counts: counts(relation.probe_counts()),
            probe_to_targets: hits(relation.probe_to_targets()),
            target_to_probes: hits(relation.target_to_probes()),
            universal_probes: relation
                .universal_probes()
                .into_iter()
                .map(|p| vec![p])
                .collect(),
        }
    }

    pub fn rows(&self, kind: ReportKind) -> &[Vec<String>] {
        match kind {
            ReportKind::TargetCounts => &self.target_counts,
            ReportKind::ProbeCounts => &self.probe_counts,
            ReportKind::ProbeToTargets => &self.probe_to_targets,
            ReportKind::TargetToProbes => &self.target_to_probes,
            ReportKind::UniversalProbes => &self.universal_probes,
        }
    }

    /// Write one report, header row first.
    pub fn write_to<W: Write>(
        &self,
        kind: ReportKind,
        w: W,
        delimiter: u8,
    ) -> anyhow::Result<()> {
        let mut wtr = csv::WriterBuilder::new().delimiter(delimiter).from_writer(w);

        wtr.write_record(kind.header())?;
        for row in self.rows(kind) {
            wtr.write_record(row)?;
        }
        wtr.flush()?;

        Ok(())
    }

    /// Write all five reports into `dir`, creating it if needed. Returns the
    /// paths written.
    ///
    /// The files are first written to a staging directory inside `dir` and
    /// only moved into place once all of them are complete, so a failed
    /// write leaves none of them behind. The final renames are not atomic as
    /// a group.
    pub fn write_dir(&self, dir: &Path, delimiter: u8) -> anyhow::Result<Vec<PathBuf>> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("could not create {}", dir.display()))?;

        let staging = tempfile::Builder::new()
            .prefix(".blatr-")
            .tempdir_in(dir)
            .with_context(|| format!("could not create a staging dir in {}", dir.display()))?;

        for kind in ReportKind::ALL {
            let path = staging.path().join(kind.file_name());
            let file = std::fs::File::create(&path)
                .with_context(|| format!("could not create {}", path.display()))?;
            self.write_to(kind, std::io::BufWriter::new(file), delimiter)?;
            log::debug!("Staged {} rows in {}", self.rows(kind).len(), path.display());
        }

        let paths: Vec<PathBuf> = ReportKind::ALL
            .iter()
            .map(|kind| dir.join(kind.file_name()))
            .collect();
        if let Some(path) = paths.iter().find(|p| p.is_dir()) {
            anyhow::bail!("could not write {}: is a directory", path.display());
        }

        for (kind, path) in ReportKind::ALL.iter().zip(&paths) {
            std::fs::rename(staging.path().join(kind.file_name()), path)
                .with_context(|| format!("could not write {}", path.display()))?;
        }

        Ok(paths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::psl::AlignmentRecord;

    fn reports(pairs: &[(&str, &str)]) -> Reports {
        let recs: Vec<_> = pairs
            .iter()
            .map(|(p, t)| AlignmentRecord::new(p, t, "1"))
            .collect();
        Reports::from_relation(&Relation::from_records(&recs).unwrap())
    }

    fn render(reports: &Reports, kind: ReportKind, delimiter: u8) -> String {
        let mut buf = vec![];
        reports.write_to(kind, &mut buf, delimiter).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_csv_quoting() {
        let r = reports(&[("p1", "t1"), ("p1", "t2"), ("p2", "t1")]);

        assert_eq!(
            render(&r, ReportKind::TargetCounts, b','),
            "Target (Column 14),Unique Probes (Column 10)\nt1,2\nt2,1\n"
        );
        assert_eq!(
            render(&r, ReportKind::ProbeToTargets, b','),
            "Probe (Column 10),Target Hits (Column 14)\np1,\"t1, t2\"\np2,t1\n"
        );
        assert_eq!(
            render(&r, ReportKind::UniversalProbes, b','),
            "Probes Hitting All Targets\np1\n"
        );
    }

    #[test]
    fn test_tsv() {
        let r = reports(&[("p1", "t1"), ("p2", "t1")]);
        assert_eq!(
            render(&r, ReportKind::TargetToProbes, b'\t'),
            "Target (Column 14)\tProbes (Column 10)\nt1\tp1, p2\n"
        );
    }

    #[test]
    fn test_empty_reports_keep_header() {
        let r = reports(&[]);
        for kind in ReportKind::ALL {
            let out = render(&r, kind, b',');
            assert_eq!(out.lines().count(), 1, "{}", kind.name());
        }
    }

    #[test]
    fn test_kind_names() {
        for kind in ReportKind::ALL {
            assert_eq!(ReportKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(ReportKind::from_name("nope"), None);
    }

    #[test]
    fn test_write_dir() {
        let tmp = tempfile::TempDir::new().unwrap();
        let dir = tmp.path().join("nested/out");
        let r = reports(&[("p1", "t1")]);

        let paths = r.write_dir(&dir, b',').unwrap();
        assert_eq!(paths.len(), 5);
        for path in paths {
            assert!(path.is_file());
        }
        // staging dir is gone
        assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 5);

        let path = dir.join("Unique_Probe_Counts.csv");
        let content = std::fs::read_to_string(path).unwrap();
        assert_eq!(
            content,
            "Probe (Column 10),Unique Targets (Column 14)\np1,1\n"
        );
    }

    #[test]
    fn test_write_dir_all_or_nothing() {
        let tmp = tempfile::TempDir::new().unwrap();
        let dir = tmp.path();
        // the last report cannot be written over a directory
        std::fs::create_dir(dir.join("Probes_Hitting_All_Targets.csv")).unwrap();

        let r = reports(&[("p1", "t1")]);
        assert!(r.write_dir(dir, b',').is_err());

        for kind in ReportKind::ALL {
            assert!(!dir.join(kind.file_name()).is_file(), "{}", kind.name());
        }
        // only the blocking directory remains
        assert_eq!(std::fs::read_dir(dir).unwrap().count(), 1);
    }
}
