/*
[INPUT]:  `serve` subcommand process and SIGTERM
[OUTPUT]: Graceful shutdown verification
[POS]:    Integration test layer - clean exit verification
[UPDATE]: When changing shutdown logic
*/

#![cfg(unix)]

use std::process::Stdio;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tokio::time::timeout;

/// SIGTERM stops the web UI and the process exits successfully
#[tokio::test]
async fn test_sigterm_stops_web_ui() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut child = Command::new(env!("CARGO_BIN_EXE_futures-testnet-bot"))
        .env_clear()
        .env("BINANCE_API_KEY", "key")
        .env("BINANCE_API_SECRET", "secret")
        .env("BINANCE_BASE_URL", "http://127.0.0.1:9")
        .current_dir(dir.path())
        .args(["--log-level", "info", "--log-dir"])
        .arg(dir.path().join("logs"))
        .args(["serve", "--bind", "127.0.0.1:0"])
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .expect("spawn binary");

    let stderr = child.stderr.take().expect("stderr piped");
    let mut lines = BufReader::new(stderr).lines();
    let listening = timeout(Duration::from_secs(10), async {
        while let Ok(Some(line)) = lines.next_line().await {
            if line.contains("web UI listening") {
                return true;
            }
        }
        false
    })
    .await
    .expect("server started in time");
    assert!(listening, "server never reported its address");

    let pid = child.id().expect("child pid");
    let status = std::process::Command::new("kill")
        .args(["-TERM", &pid.to_string()])
        .status()
        .expect("run kill");
    assert!(status.success());

    // Keep draining stderr so the child never blocks on a full pipe.
    tokio::spawn(async move { while let Ok(Some(_)) = lines.next_line().await {} });

    let exit = timeout(Duration::from_secs(10), child.wait())
        .await
        .expect("exited in time")
        .expect("wait");
    assert!(exit.success(), "exit status: {exit}");
}
