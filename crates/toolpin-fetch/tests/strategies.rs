#![cfg(unix)]

mod common;

use common::{Reply, TestServer, env_with_path, fake_program};
use tempfile::TempDir;
use toolpin_fetch::{Downloader, FetchError, FetchOptions, Strategy};

async fn fetch(downloader: &Downloader, url: &str) -> (Result<Vec<u8>, FetchError>, Vec<f64>) {
    let mut progress = Vec::new();
    let result = async {
        let mut download = downloader.open(url).await?;
        let mut body = Vec::new();
        while let Some(chunk) = download.next_chunk(&mut |p| progress.push(p)).await? {
            body.extend_from_slice(&chunk);
        }
        Ok::<_, FetchError>(body)
    }
    .await;
    (result, progress)
}

fn downloader(bin: &TempDir) -> Downloader {
    Downloader::new(env_with_path(bin.path()), FetchOptions::default()).unwrap()
}

#[tokio::test]
async fn test_curl_body_and_progress() {
    let bin = tempfile::tempdir().unwrap();
    fake_program(
        bin.path(),
        "curl",
        r#"printf '\r####      12.5%%' >&2
printf 'from-curl'
printf '\r##########   42,0%%' >&2"#,
    );
    let (result, progress) = fetch(&downloader(&bin), "https://example.com/a").await;
    assert_eq!(result.unwrap(), b"from-curl");
    assert!(!progress.is_empty());
    assert!(progress.iter().all(|p| *p > 0.0 && *p < 1.0));
    assert!(progress.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(progress.last().copied(), Some(0.42));
}

#[tokio::test]
async fn test_curl_receives_url() {
    let bin = tempfile::tempdir().unwrap();
    fake_program(bin.path(), "curl", r#"printf '%s|%s' "$1" "$2""#);
    let (result, _) = fetch(&downloader(&bin), "https://example.com/tool.tgz").await;
    assert_eq!(result.unwrap(), b"-#fL|https://example.com/tool.tgz");
}

#[tokio::test]
async fn test_wget_used_when_curl_missing() {
    let bin = tempfile::tempdir().unwrap();
    fake_program(
        bin.path(),
        "wget",
        r#"printf '50%%' >&2
printf '%s %s %s' "$1" "$2" "$3""#,
    );
    let (result, progress) = fetch(&downloader(&bin), "https://example.com/b").await;
    assert_eq!(result.unwrap(), b"-O - https://example.com/b");
    assert!(progress.is_empty());
}

#[tokio::test]
async fn test_native_used_when_both_missing() {
    let bin = tempfile::tempdir().unwrap();
    let server = TestServer::start(|_| Reply::ok("from-native")).await;
    let (result, _) = fetch(&downloader(&bin), &server.url("/c")).await;
    assert_eq!(result.unwrap(), b"from-native");
    assert_eq!(server.requests(), 1);
}

#[tokio::test]
async fn test_curl_failure_does_not_fall_back() {
    let bin = tempfile::tempdir().unwrap();
    fake_program(
        bin.path(),
        "curl",
        r#"printf '\r#=#=#   \n' >&2
printf 'curl: (22) The requested URL returned error: 404\n' >&2
exit 22"#,
    );
    fake_program(bin.path(), "wget", "printf 'from-wget'");
    let (result, _) = fetch(&downloader(&bin), "https://example.com/d").await;
    match result.unwrap_err() {
        FetchError::Exited {
            program,
            reason,
            diagnostics,
        } => {
            assert_eq!(program, "curl");
            assert_eq!(reason, "exit code 22");
            assert_eq!(diagnostics, "curl: (22) The requested URL returned error: 404");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_failure_with_empty_stderr() {
    let bin = tempfile::tempdir().unwrap();
    fake_program(bin.path(), "wget", "exit 4");
    let (result, _) = fetch(&downloader(&bin), "https://example.com/e").await;
    let err = result.unwrap_err();
    assert_eq!(err.to_string(), "wget exited with exit code 4:\n(empty stderr)");
}

#[tokio::test]
async fn test_all_strategies_unavailable() {
    let bin = tempfile::tempdir().unwrap();
    let options = FetchOptions::default().strategies([Strategy::Curl, Strategy::Wget]);
    let downloader = Downloader::new(env_with_path(bin.path()), options).unwrap();
    let (result, _) = fetch(&downloader, "https://example.com/f").await;
    match result.unwrap_err() {
        FetchError::Exhausted { tried } => assert_eq!(tried.len(), 2),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_terminal_result_is_reported_once() {
    let bin = tempfile::tempdir().unwrap();
    fake_program(bin.path(), "curl", "exit 6");
    let downloader = downloader(&bin);
    let mut download = downloader.open("https://example.com/g").await.unwrap();
    assert!(download.next_chunk(&mut |_| {}).await.is_err());
    assert!(download.next_chunk(&mut |_| {}).await.unwrap().is_none());
}

#[tokio::test]
async fn test_curl_progress_ignores_already_seen_tokens() {
    let bin = tempfile::tempdir().unwrap();
    fake_program(
        bin.path(),
        "curl",
        r#"PATH=/usr/bin:/bin
printf '\r##   1.9%%             ' >&2
sleep 0.2
printf '\r###' >&2
sleep 0.2
printf 'body'"#,
    );
    let (result, progress) = fetch(&downloader(&bin), "https://example.com/h").await;
    assert_eq!(result.unwrap(), b"body");
    assert_eq!(progress, [0.019]);
}

/// Whether a process with this id still exists.
fn alive(pid: &str) -> bool {
    std::process::Command::new("kill")
        .args(["-0", pid])
        .stderr(std::process::Stdio::null())
        .status()
        .unwrap()
        .success()
}

#[tokio::test]
async fn test_cancel_kills_and_reaps_curl() {
    let bin = tempfile::tempdir().unwrap();
    let pid_file = bin.path().join("curl.pid");
    fake_program(
        bin.path(),
        "curl",
        &format!(
            "PATH=/usr/bin:/bin\necho $$ > '{}'\nprintf 'first'\nexec sleep 30",
            pid_file.display()
        ),
    );
    let downloader = downloader(&bin);
    let mut download = downloader.open("https://example.com/i").await.unwrap();
    let chunk = download.next_chunk(&mut |_| {}).await.unwrap().unwrap();
    assert_eq!(&chunk[..], b"first");

    let pid = std::fs::read_to_string(&pid_file).unwrap().trim().to_string();
    assert!(alive(&pid));
    download.cancel().await;
    assert!(download.is_finished());
    assert!(!alive(&pid));
    assert!(download.next_chunk(&mut |_| {}).await.unwrap().is_none());
    download.cancel().await;
}
