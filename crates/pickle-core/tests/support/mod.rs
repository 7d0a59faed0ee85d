//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::{Arc, Mutex};

use pickle_core::prelude::*;

/// Serve a single HTTP response on a loopback port and return the base URL.
pub fn serve_once(status: &str, body: Vec<u8>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind loopback port");
    let addr = listener.local_addr().expect("Failed to read local addr");
    let status = status.to_string();

    std::thread::spawn(move || {
        let Ok((mut stream, _)) = listener.accept() else {
            return;
        };
        let mut reader = BufReader::new(stream.try_clone().expect("Failed to clone stream"));
        let mut line = String::new();
        while reader.read_line(&mut line).is_ok() {
            if line == "\r\n" || line.is_empty() {
                break;
            }
            line.clear();
        }
        let header = format!(
            "HTTP/1.1 {status}\r\nContent-Length: {}\r\nContent-Type: application/octet-stream\r\nConnection: close\r\n\r\n",
            body.len()
        );
        let _ = stream.write_all(header.as_bytes());
        let _ = stream.write_all(&body);
    });

    format!("http://{addr}")
}

/// Gzipped tarball with the given `(path, contents)` entries.
pub fn tgz(entries: &[(&str, &str)]) -> Vec<u8> {
    use flate2::Compression;
    use flate2::write::GzEncoder;

    let mut builder = tar::Builder::new(Vec::new());
    for (path, data) in entries {
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder
            .append_data(&mut header, path, data.as_bytes())
            .expect("Failed to append tar entry");
    }
    let tar = builder.into_inner().expect("Failed to finish tar");

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&tar).expect("Failed to gzip tar");
    encoder.finish().expect("Failed to finish gzip")
}

pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Fetcher double that records every call.
#[derive(Clone, Default)]
pub struct RecordingFetcher {
    pub calls: Arc<Mutex<Vec<(PackageDescriptor, PathBuf)>>>,
}

impl RecordingFetcher {
    pub fn calls(&self) -> Vec<(PackageDescriptor, PathBuf)> {
        self.calls.lock().expect("Recorder lock poisoned").clone()
    }
}

impl Fetcher for RecordingFetcher {
    fn fetch(
        &self,
        descriptor: &PackageDescriptor,
        destination: &Path,
    ) -> Result<(), RetrievalError> {
        self.calls
            .lock()
            .expect("Recorder lock poisoned")
            .push((descriptor.clone(), destination.to_path_buf()));
        Ok(())
    }
}
