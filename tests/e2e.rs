use std::process::Command;

fn run(fixture: &str) -> (String, String, bool) {
    let path = format!("tests/fixtures/{fixture}");
    let output = Command::new(env!("CARGO_BIN_EXE_vend-eng"))
        .arg(&path)
        .env("RUST_LOG", "warn")
        .output()
        .expect("failed to run binary");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

#[test]
fn purchase_transcript() {
    let (stdout, stderr, success) = run("purchase.csv");

    assert!(success);
    assert!(stderr.is_empty());

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "loaded,tray,stock,status,idle");
    assert_eq!(
        lines[1],
        "$1.00,Tray is empty.,2,Machine is idle and running. Inserted coin.,false"
    );
    assert_eq!(lines[2], "$2.00,Tray is empty.,2,Inserted coin.,false");
    assert_eq!(lines[3], "$0,\"20c, 20c\",1,Item issued.,true");
}

#[test]
fn errors_warn_but_do_not_block() {
    let (stdout, stderr, success) = run("with_errors.csv");

    assert!(success);
    assert!(stderr.contains("unrecognized event"));
    assert!(stderr.contains("insert missing coin value"));

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "loaded,tray,stock,status,idle");
    assert_eq!(
        lines[1],
        "$1.00,Tray is empty.,2,Machine is idle and running. Inserted coin.,false"
    );
    assert_eq!(
        lines[2],
        "$1.00,5c,2,Warning. Unsupported coin inserted. Rejecting coin.,false"
    );
    assert_eq!(lines[3], "$0,$1,2,Cancelling transaction.,true");
}
