//! Tests for the `chatclient` binary: argument handling, exit codes and a
//! full scripted conversation through real stdin/stdout.

use std::{
    io::Write,
    net::TcpListener,
    process::{Command, Output, Stdio},
};

use linechat_harness::{PeerStep, ScriptedPeer};

const USAGE: &str =
    "Please supply the required command line arguments.\nUsage: chatclient [host] [port]\n";

/// Run the binary with `args`, feeding `stdin` and waiting for it to exit.
fn chatclient(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_chatclient"))
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("binary should start");

    {
        let mut pipe = child.stdin.take().expect("stdin is piped");
        // The client may exit before reading everything
        let _ = pipe.write_all(stdin.as_bytes());
    }

    child.wait_with_output().expect("binary should run to completion")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn no_arguments_prints_usage_and_succeeds() {
    let output = chatclient(&[], "");
    assert!(output.status.success());
    assert_eq!(stdout(&output), USAGE);
}

#[test]
fn one_argument_prints_usage_and_succeeds() {
    let output = chatclient(&["localhost"], "");
    assert!(output.status.success());
    assert_eq!(stdout(&output), USAGE);
}

#[test]
fn extra_argument_prints_usage_and_succeeds() {
    let output = chatclient(&["localhost", "9001", "extra"], "");
    assert!(output.status.success());
    assert_eq!(stdout(&output), USAGE);
}

#[test]
fn scripted_conversation() {
    let peer = ScriptedPeer::spawn(vec![
        PeerStep::Receive,
        PeerStep::reply("peer", "hi"),
        PeerStep::Receive,
    ])
    .unwrap();

    let (host, port) = (peer.host(), peer.port());
    let output = chatclient(&[host.as_str(), port.as_str()], "alexander\nhello there\n\\quit\n");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let printed = stdout(&output);
    assert_eq!(
        printed,
        "Please enter your name (10 characters max):\nalexander> peer> hi\nalexander> Goodbye!\n"
    );
    assert_eq!(printed.lines().last(), Some("alexander> Goodbye!"));

    let transcript = peer.join().unwrap();
    assert_eq!(transcript.received_text(), vec!["alexander> hello there".to_string()]);
}

#[test]
fn server_close_exits_zero() {
    let peer = ScriptedPeer::spawn(vec![PeerStep::Receive, PeerStep::Close]).unwrap();

    let (host, port) = (peer.host(), peer.port());
    let output = chatclient(&[host.as_str(), port.as_str()], "bob\nhello\n");

    assert!(output.status.success());
    assert!(stdout(&output).ends_with("The connection was terminated by the server.\n"));
    peer.join().unwrap();
}

#[test]
fn refused_connection_exits_non_zero() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port().to_string();
    drop(listener);

    let output = chatclient(&["127.0.0.1", port.as_str()], "bob\n");

    assert_eq!(output.status.code(), Some(1));
    assert!(!output.stderr.is_empty(), "a diagnostic should be printed");
    assert!(output.stdout.is_empty());
}

#[test]
fn unknown_service_exits_non_zero() {
    let output = chatclient(&["127.0.0.1", "no-such-service"], "");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("could not resolve"));
}
