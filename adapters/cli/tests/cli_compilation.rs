use std::process::Command;

#[test]
fn cli_compiles_without_warnings() {
    let status = Command::new(env!("CARGO"))
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .args(["check", "--quiet", "--bin", "waypoint-defence"])
        .status()
        .expect("failed to invoke cargo check for the waypoint-defence binary");

    assert!(
        status.success(),
        "cargo check --bin waypoint-defence should succeed"
    );
}
