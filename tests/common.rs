#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::fs;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};

pub fn mc() -> Command {
    cargo_bin_cmd!("moodcoach")
}

/// Scratch workspace: a config file that points every service at a closed
/// port and uses the offline classifier, plus the history path it names.
pub struct Workspace {
    pub dir: tempfile::TempDir,
    pub config: PathBuf,
    pub history: PathBuf,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = dir.path().join("moodcoach.conf");
        let history = dir.path().join("data").join("history.csv");

        let yaml = format!(
            "history_file: {}\n\
             audio_file: {}\n\
             llm:\n  url: http://127.0.0.1:9/api/generate\n  timeout_secs: 2\n\
             classifier:\n  backend: lexicon\n\
             speech:\n  asr_url: http://127.0.0.1:9/asr\n  tts_url: http://127.0.0.1:9/tts\n  timeout_secs: 2\n",
            history.display(),
            dir.path().join("coach_response.mp3").display()
        );
        fs::write(&config, yaml).expect("write config");

        Self {
            dir,
            config,
            history,
        }
    }

    /// `moodcoach --config <ws config> <args...>`, with HOME pointed inside
    /// the workspace so nothing touches the real user directory.
    pub fn cmd(&self, args: &[&str]) -> Command {
        let mut cmd = mc();
        cmd.env("HOME", self.dir.path())
            .env_remove("RUST_LOG")
            .arg("--config")
            .arg(&self.config)
            .args(args);
        cmd
    }

    pub fn history_lines(&self) -> Vec<String> {
        fs::read_to_string(&self.history)
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }
}

/// One-shot HTTP server on a random local port. Answers the first request
/// with `status` and `body`, and hands back the request body it received.
pub fn serve_once(status: &str, content_type: &str, body: Vec<u8>) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    let status = status.to_string();
    let content_type = content_type.to_string();

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept");

        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        let header_end = loop {
            let n = stream.read(&mut chunk).expect("read");
            if n == 0 {
                break buf.len();
            }
            buf.extend_from_slice(&chunk[..n]);
            if let Some(pos) = find(&buf, b"\r\n\r\n") {
                break pos + 4;
            }
        };

        let head = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
        let length = head
            .lines()
            .find_map(|l| l.strip_prefix("content-length:"))
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(0);

        while buf.len() < header_end + length {
            let n = stream.read(&mut chunk).expect("read body");
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
        }
        let request_body = String::from_utf8_lossy(&buf[header_end..]).to_string();

        let head = format!(
            "HTTP/1.1 {status}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            body.len()
        );
        stream.write_all(head.as_bytes()).expect("write head");
        stream.write_all(&body).expect("write body");
        stream.flush().ok();

        request_body
    });

    (format!("http://{addr}"), handle)
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Small mono WAV for speech tests.
pub fn tiny_wav(path: &Path) {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 16000,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut w = hound::WavWriter::create(path, spec).expect("wav");
    for i in 0..1600 {
        w.write_sample(((i % 50) as i16 - 25) * 100).expect("sample");
    }
    w.finalize().expect("finalize");
}
