//! Shared helpers for integration tests: a mock remote file server.

#![allow(dead_code)]

use std::path::Path;
use std::time::Duration;

use charfetch_core::{OffsetMode, Pipeline, RemoteClient, ServiceConfig};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Renders a directory index the way simple static file servers do.
pub fn listing_html(names: &[&str]) -> String {
    let mut body = String::from("<!DOCTYPE HTML>\n<html>\n<body>\n<h1>Directory listing</h1>\n<hr>\n<ul>\n");
    for name in names {
        body.push_str(&format!("<li><a href=\"{name}\">{name}</a></li>\n"));
    }
    body.push_str("</ul>\n<hr>\n</body>\n</html>\n");
    body
}

/// Mounts the listing at `/` and one GET endpoint per text file.
pub async fn mount_files(server: &MockServer, files: &[(&str, &str)]) {
    let names: Vec<&str> = files.iter().map(|(name, _)| *name).collect();
    mount_listing(server, &names).await;
    for (name, content) in files {
        mount_file_bytes(server, name, content.as_bytes().to_vec()).await;
    }
}

/// Mounts a GET endpoint serving `content` at `/{name}`.
pub async fn mount_file_bytes(server: &MockServer, name: &str, content: Vec<u8>) {
    Mock::given(method("GET"))
        .and(path(format!("/{name}")))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(content))
        .mount(server)
        .await;
}

/// Mounts only the listing document.
pub async fn mount_listing(server: &MockServer, names: &[&str]) {
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_html(names)))
        .mount(server)
        .await;
}

/// Content with `needle` at byte `offset` and filler everywhere else.
pub fn content_with_char_at(len: usize, needle: u8, offset: usize) -> Vec<u8> {
    let mut content = vec![b'.'; len];
    content[offset] = needle;
    content
}

/// Test configuration writing into `output_dir`.
pub fn test_config(output_dir: &Path, mode: OffsetMode) -> ServiceConfig {
    ServiceConfig {
        concurrency: 4,
        offset_mode: mode,
        output_dir: Some(output_dir.to_path_buf()),
        request_timeout: Duration::from_secs(30),
        ..ServiceConfig::default()
    }
}

/// Pipeline with short client timeouts.
pub fn test_pipeline(config: ServiceConfig) -> Pipeline {
    let client = RemoteClient::new_with_timeouts(5, 10).expect("client should build");
    Pipeline::new(client, config)
}

/// What a raw file response does once its body frames are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyEnd {
    /// Close the connection.
    Close,
    /// Keep the connection open without sending anything more.
    Stall,
}

/// A file response written by hand, for bodies wiremock cannot produce.
#[derive(Debug, Clone)]
pub struct RawFile {
    pub name: &'static str,
    /// `Content-Length` announced in the headers.
    pub declared_len: usize,
    /// Body frames, written one after another.
    pub frames: Vec<Vec<u8>>,
    /// Pause before each frame.
    pub frame_delay: Duration,
    pub end: BodyEnd,
}

/// Serves a listing of `file.name` at `/` and `file` at every other path
/// over plain TCP. Returns the base URL.
pub async fn spawn_raw_server(file: RawFile) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("raw server should bind");
    let addr = listener.local_addr().expect("raw server address");

    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            let file = file.clone();
            tokio::spawn(async move {
                let _ = serve_raw(stream, file).await;
            });
        }
    });

    format!("http://{addr}")
}

async fn serve_raw(mut stream: TcpStream, file: RawFile) -> std::io::Result<()> {
    let mut head = Vec::new();
    let mut buf = [0u8; 1024];
    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = stream.read(&mut buf).await?;
        if n == 0 {
            return Ok(());
        }
        head.extend_from_slice(&buf[..n]);
    }
    let head = String::from_utf8_lossy(&head);
    let path = head.split_whitespace().nth(1).unwrap_or("/");

    if path == "/" {
        let body = listing_html(&[file.name]);
        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).await?;
        return stream.shutdown().await;
    }

    let headers = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: application/octet-stream\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        file.declared_len
    );
    stream.write_all(headers.as_bytes()).await?;
    stream.flush().await?;
    for frame in &file.frames {
        tokio::time::sleep(file.frame_delay).await;
        stream.write_all(frame).await?;
        stream.flush().await?;
    }

    match file.end {
        BodyEnd::Close => stream.shutdown().await,
        BodyEnd::Stall => {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(())
        }
    }
}

/// Names of the entries in `dir`.
pub fn dir_entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("dir should be readable")
        .map(|entry| {
            entry
                .expect("dir entry")
                .file_name()
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    names.sort();
    names
}
