use std::path::PathBuf;

use clap::Parser;
use pretty_assertions::assert_eq;

use hs450::{Args, TerminalClient};

struct NonInteractiveTerminal;

impl TerminalClient for NonInteractiveTerminal {
    fn stdout_is_terminal(&self) -> bool {
        false
    }

    fn stderr_is_terminal(&self) -> bool {
        false
    }
}

fn temp_path(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join("hs450-cli-run");
    std::fs::create_dir_all(&dir).expect("temp dir should create");
    dir.join(name)
}

/// Writes a 2x1 all-white PNG fixture and returns its path.
fn white_2x1_png(name: &str) -> PathBuf {
    let path = temp_path(name);
    let source = image::RgbImage::from_pixel(2, 1, image::Rgb([0xFF, 0xFF, 0xFF]));
    source.save(&path).expect("png fixture should save");
    path
}

#[tokio::test]
async fn get_against_fake_device_writes_the_decoded_image() -> anyhow::Result<()> {
    let output = temp_path("fetched.png");
    let args = Args::try_parse_from([
        "hs450",
        "--fake",
        // get-ready ack, 2x1 header, one packed group of limited-range black
        "--fake-device-script",
        "100002000110801080",
        "--output",
        "pretty",
        "get",
        "10.0.0.5",
        "1",
        output.to_str().expect("temp path should be utf-8"),
    ])?;

    let mut out = Vec::new();
    hs450::run(args, &mut out, &NonInteractiveTerminal).await?;

    let printed = String::from_utf8(out)?;
    assert!(
        printed.contains("Got 2x1 frame from slot 1"),
        "unexpected output: {printed}"
    );

    let saved = image::open(&output)?.to_rgb8();
    assert_eq!((2, 1), saved.dimensions());
    assert_eq!(vec![0u8; 6], saved.into_raw());
    Ok(())
}

#[tokio::test]
async fn put_against_fake_device_reports_json_result() -> anyhow::Result<()> {
    let source = white_2x1_png("white.png");
    let args = Args::try_parse_from([
        "hs450",
        "--fake",
        // put-ready ack, then store-complete ack
        "--fake-device-script",
        "acac",
        "--output",
        "json",
        "put",
        "10.0.0.5",
        "3",
        source.to_str().expect("temp path should be utf-8"),
    ])?;

    let mut out = Vec::new();
    hs450::run(args, &mut out, &NonInteractiveTerminal).await?;

    let printed = String::from_utf8(out)?;
    let result: serde_json::Value = serde_json::from_str(&printed)?;
    assert_eq!("put", result["action"]);
    assert_eq!(3, result["slot"]);
    assert_eq!(2, result["width"]);
    assert_eq!(1, result["height"]);
    assert_eq!(4, result["payload_bytes"]);
    Ok(())
}

#[tokio::test]
async fn get_with_wrong_ack_fails_and_writes_no_output_file() -> anyhow::Result<()> {
    let output = temp_path("never-written.png");
    let _cleanup = std::fs::remove_file(&output);
    let args = Args::try_parse_from([
        "hs450",
        "--fake",
        "--fake-device-script",
        "990002000110801080",
        "get",
        "10.0.0.5",
        "2",
        output.to_str().expect("temp path should be utf-8"),
    ])?;

    let mut out = Vec::new();
    let error = hs450::run(args, &mut out, &NonInteractiveTerminal)
        .await
        .expect_err("a 0x99 ack should abort the get");

    let rendered = format!("{error:#}");
    assert!(
        rendered.contains("unexpected get-ready ack"),
        "unexpected error chain: {rendered}"
    );
    assert!(
        !output.exists(),
        "no partial file may exist after a failed get"
    );
    assert!(out.is_empty(), "no result line may be printed on failure");
    Ok(())
}

#[tokio::test]
async fn put_without_store_ack_reports_a_transport_error() -> anyhow::Result<()> {
    let source = white_2x1_png("white-unacked.png");
    let args = Args::try_parse_from([
        "hs450",
        "--fake",
        // Only the ready ack is scripted; the store ack never arrives.
        "--fake-device-script",
        "ac",
        "put",
        "10.0.0.5",
        "1",
        source.to_str().expect("temp path should be utf-8"),
    ])?;

    let mut out = Vec::new();
    let error = hs450::run(args, &mut out, &NonInteractiveTerminal)
        .await
        .expect_err("a missing store ack should abort the put");

    let rendered = format!("{error:#}");
    assert!(
        rendered.contains("connection closed"),
        "unexpected error chain: {rendered}"
    );
    Ok(())
}
