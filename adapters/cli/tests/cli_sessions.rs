use std::{fs, path::PathBuf, process::Command};

const BOARD: &str = "\
#####
#A.G#
#...#
#####
";

fn board_file(name: &str) -> PathBuf {
    let path = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join(name);
    fs::write(&path, BOARD).expect("board file is writable");
    path
}

fn run(args: &[&str]) -> String {
    let output = Command::new(env!("CARGO_BIN_EXE_slide-gems"))
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to launch the slide-gems binary");

    assert!(
        output.status.success(),
        "slide-gems {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("stdout is utf-8")
}

#[test]
fn choose_prints_the_direction() {
    let path = board_file("choose.txt");
    let board = path.to_str().expect("temp path is utf-8");

    for difficulty in ["easy", "medium", "hard"] {
        let stdout = run(&["choose", "--board", board, "--difficulty", difficulty, "--seed", "1"]);
        assert_eq!(stdout.trim(), "east", "{difficulty}");
    }
}

#[test]
fn exported_board_plays_to_completion() {
    let path = board_file("export.txt");
    let board = path.to_str().expect("temp path is utf-8");

    let transfer = run(&["export", "--board", board]);
    let transfer = transfer.trim();
    assert!(transfer.starts_with("slide:v1:5x4:"), "{transfer}");

    let stdout = run(&["play", "--layout", transfer, "--seed", "7"]);
    assert!(stdout.contains("turn 1: slid east from (1, 1) to (1, 3)"), "{stdout}");
    assert!(
        stdout.contains("board cleared after 1 turns: 1 gems collected, 0 remaining, 0 shields"),
        "{stdout}"
    );
}

#[test]
fn missing_board_source_is_rejected() {
    let output = Command::new(env!("CARGO_BIN_EXE_slide-gems"))
        .args(["choose"])
        .output()
        .expect("failed to launch the slide-gems binary");

    assert!(!output.status.success());
}
