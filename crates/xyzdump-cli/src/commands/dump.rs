use crate::cli::Cli;
use crate::error::{CliError, Result};
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use tracing::{debug, info};
use xyzdump::core::io::snapshot::Snapshot;
use xyzdump::core::models::selection::GroupMask;
use xyzdump::encoder::extxyz::{EncoderOptions, ExtxyzEncoder};
use xyzdump::workflows::frame;

pub fn run(cli: &Cli) -> Result<()> {
    let snapshot = Snapshot::load(&cli.input)?;
    debug!(
        particles = snapshot.store.len(),
        ntypes = snapshot.ntypes,
        triclinic = snapshot.simbox.is_triclinic(),
        "snapshot loaded"
    );

    let group = match cli.group {
        Some(0) => {
            return Err(CliError::Argument(
                "selection bits must have at least one bit set (--group 0 selects nothing)"
                    .to_string(),
            ));
        }
        Some(bits) => GroupMask::new(bits),
        None => GroupMask::all(),
    };

    let options = EncoderOptions {
        buffered: !cli.line_mode,
        format_line: cli.format.clone(),
        skew_lattice: cli.skew_lattice,
        group,
        ..EncoderOptions::default()
    };
    let mut encoder = ExtxyzEncoder::init(&options, snapshot.ntypes, snapshot.simbox.shape())?;

    if let Some(names) = &cli.element {
        let mut args: Vec<&str> = Vec::with_capacity(names.len() + 1);
        args.push("element");
        args.extend(names.iter().map(String::as_str));
        let consumed = encoder.modify_param(&args)?;
        debug!(consumed, "applied element name override");
    }

    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .append(cli.append)
        .truncate(!cli.append)
        .open(&cli.output)?;
    let mut out = BufWriter::new(file);
    let report = frame::write_frame(&snapshot.store, &snapshot.simbox, &mut encoder, &mut out)?;
    out.flush()?;

    info!(
        particles = report.particles,
        bytes = report.bytes,
        path = %cli.output.display(),
        "trajectory frame written"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write as _;

    fn write_snapshot(dir: &tempfile::TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("snapshot.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    const SNAPSHOT: &str = r#"
        [box]
        lo = [0.0, 0.0, 0.0]
        hi = [10.0, 10.0, 10.0]

        [[particles]]
        id = 10
        type = 1
        pos = [0.0, 0.0, 0.0]

        [[particles]]
        id = 20
        type = 1
        pos = [1.0, 2.0, 3.0]

        [[particles]]
        id = 30
        type = 2
        pos = [5.0, 5.0, 5.0]
    "#;

    fn cli_for(input: &std::path::Path, output: &std::path::Path, extra: &[&str]) -> Cli {
        let mut argv = vec![
            "xyzdump".to_string(),
            input.display().to_string(),
            "-o".to_string(),
            output.display().to_string(),
        ];
        argv.extend(extra.iter().map(|s| s.to_string()));
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn writes_a_complete_frame() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_snapshot(&dir, SNAPSHOT);
        let output = dir.path().join("out.extxyz");

        run(&cli_for(&input, &output, &[])).unwrap();

        let text = std::fs::read_to_string(&output).unwrap();
        assert_eq!(
            text,
            "3\nLattice=\"10 0.0 0.0 0.0 10 0.0 0.0 0.0 10\" \n\
             1 0 0 0\n1 1 2 3\n2 5 5 5\n"
        );
    }

    #[test]
    fn element_names_replace_type_codes() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_snapshot(&dir, SNAPSHOT);
        let output = dir.path().join("out.extxyz");

        run(&cli_for(&input, &output, &["--element", "C", "H"])).unwrap();

        let text = std::fs::read_to_string(&output).unwrap();
        assert!(text.contains("C 0 0 0\n"));
        assert!(text.contains("H 5 5 5\n"));
    }

    #[test]
    fn too_few_element_names_fail() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_snapshot(&dir, SNAPSHOT);
        let output = dir.path().join("out.extxyz");

        let err = run(&cli_for(&input, &output, &["--element", "C"])).unwrap_err();
        assert!(matches!(err, CliError::Encoder(_)));
    }

    #[test]
    fn line_mode_produces_identical_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_snapshot(&dir, SNAPSHOT);
        let batch_out = dir.path().join("batch.extxyz");
        let line_out = dir.path().join("line.extxyz");

        run(&cli_for(&input, &batch_out, &[])).unwrap();
        run(&cli_for(&input, &line_out, &["--line-mode"])).unwrap();

        assert_eq!(
            std::fs::read_to_string(&batch_out).unwrap(),
            std::fs::read_to_string(&line_out).unwrap()
        );
    }

    #[test]
    fn append_accumulates_frames() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_snapshot(&dir, SNAPSHOT);
        let output = dir.path().join("out.extxyz");

        run(&cli_for(&input, &output, &[])).unwrap();
        let single = std::fs::read_to_string(&output).unwrap();
        run(&cli_for(&input, &output, &["--append"])).unwrap();
        let double = std::fs::read_to_string(&output).unwrap();

        assert_eq!(double, format!("{single}{single}"));
    }

    #[test]
    fn zero_group_bits_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_snapshot(&dir, SNAPSHOT);
        let output = dir.path().join("out.extxyz");

        let err = run(&cli_for(&input, &output, &["--group", "0"])).unwrap_err();
        assert!(matches!(err, CliError::Argument(_)));
    }

    #[test]
    fn missing_snapshot_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.extxyz");

        let err = run(&cli_for(
            &dir.path().join("missing.toml"),
            &output,
            &[],
        ))
        .unwrap_err();
        assert!(matches!(err, CliError::Snapshot(_)));
    }
}
