use std::fs;
use std::process::Command;

use pretty_assertions::assert_eq;

fn numbered_lines(n: usize) -> String {
    (0..n).map(|i| format!("line {i}\n")).collect()
}

#[test]
fn replays_script_with_file_and_config() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("source.txt"), numbered_lines(50)).unwrap();
    fs::write(
        dir.path().join("edit-history.toml"),
        "[capture]\nline_threshold = 20\n",
    )
    .unwrap();
    let script = dir.path().join("session.txt");
    fs::write(
        &script,
        "\
open source.txt source.txt
goto 3 5
type A
# 15 lines away: inside the configured threshold
goto 18
type B
goto 30
type C
previous-edit
previous-edit
",
    )
    .unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_edit-history"))
        .arg(&script)
        .arg("--config")
        .arg(dir.path().join("edit-history.toml"))
        .arg("--log-dir")
        .arg(dir.path())
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(
        stdout.lines().collect::<Vec<_>>(),
        vec![
            "previous-edit: 3:6",
            "previous-edit: No previous edit history",
            "source.txt: previous=1 next=1",
        ]
    );
    assert!(dir.path().join("edit-history.log").exists());
}

#[test]
fn reports_script_errors() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("bad.txt");
    fs::write(&script, "open a\nwarp 9\n").unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_edit-history"))
        .arg(&script)
        .arg("--log-dir")
        .arg(dir.path())
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("line 2: unknown step `warp`"),
        "stderr: {stderr}"
    );
}
