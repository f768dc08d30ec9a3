#![cfg(all(unix, feature = "cli"))]

use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::thread;
use std::time::{Duration, Instant};

fn astrolink() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_astrolink"));
    cmd.arg("--log-level").arg("error");
    cmd.env_remove("ASTROLINK_HEADER_MODE")
        .env_remove("ASTROLINK_MODULE")
        .env_remove("ASTROLINK_NAME");
    cmd
}

fn unique_temp_dir(tag: &str) -> PathBuf {
    let dir = PathBuf::from(format!(
        "/tmp/astrolink-{tag}-{}-{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("time should be after epoch")
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).expect("temp dir should be creatable");
    dir
}

fn wait_for_socket(path: &Path, timeout: Duration) {
    let start = Instant::now();
    while !path.exists() {
        if start.elapsed() >= timeout {
            panic!("socket {} never appeared", path.display());
        }
        thread::sleep(Duration::from_millis(25));
    }
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn decode_plain_frame_outputs_identifier_and_payload() {
    let output = astrolink()
        .args(["--format", "json", "decode", "0000002a68656c6c6f a55a"])
        .output()
        .expect("decode should run");

    assert!(output.status.success());
    let json: serde_json::Value =
        serde_json::from_str(stdout_of(&output).trim()).expect("decode output should be json");
    assert_eq!(
        json["schema_id"],
        "https://schemas.3leaps.dev/astrolink/cli/v1/frame-decoded.schema.json"
    );
    assert_eq!(json["id"], 42);
    assert_eq!(json["payload"], "hello");
    assert!(json["header"].is_null());
}

#[test]
fn decode_header_mode_reports_callsigns() {
    // GROUND-0 <- SAT-1, identifier 42, payload "hello", trailer.
    let frame = "8ea49eaa9c8860 a682a840404062 0000002a 68656c6c6f 0000";
    let output = astrolink()
        .args(["--format", "json", "decode", "--header-mode", frame])
        .output()
        .expect("decode should run");

    assert!(output.status.success());
    let json: serde_json::Value =
        serde_json::from_str(stdout_of(&output).trim()).expect("decode output should be json");
    assert_eq!(json["header"]["destination"], "GROUND-0");
    assert_eq!(json["header"]["source"], "SAT-1");
    assert_eq!(json["payload_size"], 5);
}

#[test]
fn decode_short_frame_returns_data_invalid() {
    let output = astrolink()
        .args(["decode", "0000002a"])
        .output()
        .expect("decode should run");

    assert_eq!(output.status.code(), Some(60));
    assert!(String::from_utf8_lossy(&output.stderr).contains("decode failed"));
}

#[test]
fn decode_bad_hex_returns_usage() {
    let output = astrolink()
        .args(["decode", "not-hex"])
        .output()
        .expect("decode should run");

    assert_eq!(output.status.code(), Some(64));
}

#[test]
fn encode_prints_big_endian_wire_frame() {
    let output = astrolink()
        .args(["--format", "json", "encode", "--id", "0x01020304", "--data", "hi"])
        .output()
        .expect("encode should run");

    assert!(output.status.success());
    let json: serde_json::Value =
        serde_json::from_str(stdout_of(&output).trim()).expect("encode output should be json");
    assert_eq!(json["wire_hex"], "010203046869");
    assert_eq!(json["wire_size"], 6);
}

#[test]
fn encode_rejects_payload_over_mtu() {
    let output = astrolink()
        .args(["encode", "--id", "1", "--data", &"x".repeat(252)])
        .output()
        .expect("encode should run");

    assert_eq!(output.status.code(), Some(60));
}

#[test]
fn send_to_missing_socket_fails() {
    let dir = unique_temp_dir("missing");
    let output = astrolink()
        .arg("send")
        .arg(dir.join("absent.sock"))
        .args(["--id", "1", "--data", "x"])
        .output()
        .expect("send should run");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("connect failed"));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn listen_delivers_packet_sent_over_socket() {
    let dir = unique_temp_dir("loop");
    let sock_path = dir.join("radio.sock");

    let child = astrolink()
        .args(["--format", "json", "listen", "--count", "1", "--name", "UHF"])
        .arg(&sock_path)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("listen should start");

    wait_for_socket(&sock_path, Duration::from_secs(3));

    let send = astrolink()
        .args(["--format", "json", "send", "--trailer", "--id", "42", "--data", "hello"])
        .arg(&sock_path)
        .output()
        .expect("send should run");
    assert!(
        send.status.success(),
        "send failed: {}",
        String::from_utf8_lossy(&send.stderr)
    );
    let sent: serde_json::Value =
        serde_json::from_str(stdout_of(&send).trim()).expect("send stats should be json");
    assert_eq!(sent["stats"]["tx"], 1);
    assert_eq!(sent["stats"]["tx_bytes"], 9);

    let output = wait_with_deadline(child, Duration::from_secs(5));
    assert!(output.status.success());

    let stdout = stdout_of(&output);
    let mut lines = stdout.lines();
    let packet: serde_json::Value =
        serde_json::from_str(lines.next().expect("packet line")).expect("packet json");
    assert_eq!(packet["iface"], "UHF");
    assert_eq!(packet["id"], 42);
    assert_eq!(packet["payload"], "hello");

    let stats: serde_json::Value =
        serde_json::from_str(lines.next().expect("stats line")).expect("stats json");
    assert_eq!(stats["stats"]["rx"], 1);
    assert_eq!(stats["stats"]["rx_dropped"], 0);

    let _ = std::fs::remove_dir_all(&dir);
}

fn wait_with_deadline(mut child: std::process::Child, timeout: Duration) -> Output {
    let start = Instant::now();
    loop {
        if child.try_wait().expect("child status").is_some() {
            return child.wait_with_output().expect("child output");
        }
        if start.elapsed() >= timeout {
            let _ = child.kill();
            panic!("child did not exit within {timeout:?}");
        }
        thread::sleep(Duration::from_millis(25));
    }
}

#[test]
fn version_prints_package_version() {
    let output = astrolink()
        .arg("version")
        .output()
        .expect("version should run");

    assert!(output.status.success());
    assert_eq!(
        stdout_of(&output).trim(),
        format!("astrolink {}", env!("CARGO_PKG_VERSION"))
    );
}

#[test]
fn envinfo_json_has_schema_and_framing() {
    let output = astrolink()
        .args(["--format", "json", "envinfo"])
        .output()
        .expect("envinfo should run");

    assert!(output.status.success());
    let json: serde_json::Value =
        serde_json::from_str(stdout_of(&output).trim()).expect("envinfo output should be json");
    assert_eq!(
        json["schema_id"],
        "https://schemas.3leaps.dev/astrolink/cli/v1/envinfo.schema.json"
    );
    assert_eq!(json["framing"]["header_size"], 14);
    assert_eq!(json["framing"]["mtu"], 251);
}
