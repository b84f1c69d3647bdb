use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn get_path(filename: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests/blat");
    path.push(filename);
    path
}

const FILES: [&str; 5] = [
    "Unique_Target_Counts.csv",
    "Unique_Probe_Counts.csv",
    "Probe_to_Target_Hits.csv",
    "Target_to_Probe_Hits.csv",
    "Probes_Hitting_All_Targets.csv",
];

#[test]
fn command_relate_sample() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let outdir = temp.path().join("reports");

    let mut cmd = Command::cargo_bin("blatr")?;
    cmd.arg("relate")
        .arg(get_path("sample.psl"))
        .arg("-o")
        .arg(&outdir);
    cmd.assert().success();

    let read = |name: &str| fs::read_to_string(outdir.join(name)).unwrap();

    assert_eq!(
        read("Unique_Target_Counts.csv"),
        "Target (Column 14),Unique Probes (Column 10)\nchr1,3\nchr2,3\nchr3,3\n"
    );
    assert_eq!(
        read("Unique_Probe_Counts.csv"),
        "Probe (Column 10),Unique Targets (Column 14)\nprobeA,3\nprobeB,1\nprobeC,2\nprobeD,3\n"
    );
    assert_eq!(
        read("Probe_to_Target_Hits.csv"),
        "Probe (Column 10),Target Hits (Column 14)\n\
         probeA,\"chr1, chr2, chr3\"\n\
         probeB,chr1\n\
         probeC,\"chr2, chr3\"\n\
         probeD,\"chr1, chr2, chr3\"\n"
    );
    assert_eq!(
        read("Target_to_Probe_Hits.csv"),
        "Target (Column 14),Probes (Column 10)\n\
         chr1,\"probeA, probeB, probeD\"\n\
         chr2,\"probeA, probeC, probeD\"\n\
         chr3,\"probeA, probeC, probeD\"\n"
    );
    assert_eq!(
        read("Probes_Hitting_All_Targets.csv"),
        "Probes Hitting All Targets\nprobeA\nprobeD\n"
    );

    Ok(())
}

#[test]
fn command_relate_deterministic() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let first = temp.path().join("first");
    let second = temp.path().join("second");

    for outdir in [&first, &second] {
        let mut cmd = Command::cargo_bin("blatr")?;
        cmd.arg("relate")
            .arg(get_path("sample.psl"))
            .arg("-o")
            .arg(outdir);
        cmd.assert().success();
    }

    for name in FILES {
        assert_eq!(fs::read(first.join(name))?, fs::read(second.join(name))?);
    }

    Ok(())
}

#[test]
fn command_relate_tsv() -> anyhow::Result<()> {
    let temp = TempDir::new()?;

    let mut cmd = Command::cargo_bin("blatr")?;
    cmd.arg("relate")
        .arg("--tsv")
        .arg(get_path("example1.psl"))
        .arg("-o")
        .arg(temp.path());
    cmd.assert().success();

    let content = fs::read_to_string(temp.path().join("Probe_to_Target_Hits.csv"))?;
    assert_eq!(
        content,
        "Probe (Column 10)\tTarget Hits (Column 14)\np1\tchr1, chr2\np2\tchr1\n"
    );

    Ok(())
}

#[test]
fn command_relate_empty() -> anyhow::Result<()> {
    let temp = TempDir::new()?;

    let mut cmd = Command::cargo_bin("blatr")?;
    cmd.arg("relate")
        .arg(get_path("empty.psl"))
        .arg("-o")
        .arg(temp.path());
    cmd.assert().success();

    for name in FILES {
        let content = fs::read_to_string(temp.path().join(name))?;
        assert_eq!(content.lines().count(), 1, "{}", name);
    }

    Ok(())
}

#[test]
fn command_relate_malformed() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let outdir = temp.path().join("reports");

    let mut cmd = Command::cargo_bin("blatr")?;
    cmd.arg("relate")
        .arg(get_path("malformed.psl"))
        .arg("-o")
        .arg(&outdir);
    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("invalid blockCount \"NA\""));

    // nothing is written for a rejected batch
    assert!(!outdir.exists());

    Ok(())
}

#[test]
fn command_relate_short_line() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let outdir = temp.path().join("reports");

    let mut cmd = Command::cargo_bin("blatr")?;
    cmd.arg("relate")
        .arg(get_path("short.psl"))
        .arg("-o")
        .arg(&outdir);
    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("line 7: expected 21 columns, found 5"));

    assert!(!outdir.exists());

    Ok(())
}

#[test]
fn command_relate_missing_input() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("blatr")?;
    cmd.arg("relate")
        .arg(get_path("not_there.psl"))
        .arg("-o")
        .arg("stdout");
    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("could not open"));

    Ok(())
}
