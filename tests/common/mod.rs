//! Shared fixtures: an in-process stand-in for the remote file-hosting API
//! and a generator for minimal PDFs.

#![allow(dead_code)]

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// What the mock remote answers.
#[derive(Clone, Default)]
pub struct MockRemote {
    /// Status and raw body of `GET /list_files`.
    pub catalog: (u16, String),
    /// `file_id` → document bytes served with `200`. Unknown ids get `404`.
    pub files: HashMap<String, Vec<u8>>,
}

impl MockRemote {
    pub fn with_catalog(status: u16, body: &str) -> Self {
        Self {
            catalog: (status, body.to_string()),
            files: HashMap::new(),
        }
    }

    pub fn file(mut self, file_id: &str, bytes: Vec<u8>) -> Self {
        self.files.insert(file_id.to_string(), bytes);
        self
    }
}

/// Base URL of a running mock (e.g. `http://127.0.0.1:40123`).
pub struct MockServer {
    pub base_url: String,
}

impl MockServer {
    pub fn catalog_url(&self) -> String {
        format!("{}/list_files", self.base_url)
    }

    pub fn download_url(&self) -> String {
        format!("{}/download_file", self.base_url)
    }
}

/// Serves `remote` on an ephemeral port from a background thread.
///
/// The thread owns its own runtime, so the mock works from both plain and
/// `#[tokio::test]` tests. It lives until the test process exits.
pub fn spawn_mock(remote: MockRemote) -> MockServer {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.set_nonblocking(true).unwrap();
    let addr = listener.local_addr().unwrap();

    let app = Router::new()
        .route("/list_files", get(mock_catalog))
        .route("/download_file", get(mock_download))
        .with_state(Arc::new(remote));

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async move {
            let listener = tokio::net::TcpListener::from_std(listener).unwrap();
            axum::serve(listener, app).await.unwrap();
        });
    });

    MockServer {
        base_url: format!("http://{}", addr),
    }
}

async fn mock_catalog(State(remote): State<Arc<MockRemote>>) -> Response {
    let (status, body) = &remote.catalog;
    (
        StatusCode::from_u16(*status).unwrap(),
        [("content-type", "application/json")],
        body.clone(),
    )
        .into_response()
}

async fn mock_download(
    State(remote): State<Arc<MockRemote>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let file = params.get("file_id").and_then(|id| remote.files.get(id));
    match file {
        Some(bytes) => (
            StatusCode::OK,
            [("content-type", "application/pdf")],
            bytes.clone(),
        )
            .into_response(),
        None => (StatusCode::NOT_FOUND, "no such file").into_response(),
    }
}

/// Minimal valid PDF with one page per entry of `pages`, each drawing its
/// text in Helvetica. Byte offsets in the xref table are computed so that
/// `pdf-extract` can parse the result.
pub fn pdf_with_pages(pages: &[&str]) -> Vec<u8> {
    let n = pages.len();
    // Objects: 1 catalog, 2 page tree, 3 font, then (page, contents) pairs.
    let page_obj = |i: usize| 4 + 2 * i;
    let total_objs = 3 + 2 * n;

    let mut out = Vec::new();
    let mut offsets = Vec::with_capacity(total_objs);
    out.extend_from_slice(b"%PDF-1.4\n");

    offsets.push(out.len());
    out.extend_from_slice(b"1 0 obj << /Type /Catalog /Pages 2 0 R >> endobj\n");

    offsets.push(out.len());
    let kids = (0..n)
        .map(|i| format!("{} 0 R", page_obj(i)))
        .collect::<Vec<_>>()
        .join(" ");
    out.extend_from_slice(
        format!(
            "2 0 obj << /Type /Pages /Kids [{}] /Count {} >> endobj\n",
            kids, n
        )
        .as_bytes(),
    );

    offsets.push(out.len());
    out.extend_from_slice(
        b"3 0 obj << /Type /Font /Subtype /Type1 /BaseFont /Helvetica >> endobj\n",
    );

    for (i, text) in pages.iter().enumerate() {
        let page = page_obj(i);
        let contents = page + 1;

        offsets.push(out.len());
        out.extend_from_slice(
            format!(
                concat!(
                    "{} 0 obj << /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] ",
                    "/Contents {} 0 R /Resources << /Font << /F1 3 0 R >> >> >> endobj\n",
                ),
                page, contents
            )
            .as_bytes(),
        );

        let stream = format!("BT /F1 12 Tf 72 700 Td ({}) Tj ET", text);
        offsets.push(out.len());
        out.extend_from_slice(
            format!(
                "{} 0 obj << /Length {} >> stream\n{}\nendstream endobj\n",
                contents,
                stream.len(),
                stream
            )
            .as_bytes(),
        );
    }

    let xref_start = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n", total_objs + 1).as_bytes());
    out.extend_from_slice(format!("{:010} 65535 f \n", 0).as_bytes());
    for offset in &offsets {
        out.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer << /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            total_objs + 1,
            xref_start
        )
        .as_bytes(),
    );
    out
}

pub fn pdf_with_text(text: &str) -> Vec<u8> {
    pdf_with_pages(&[text])
}

/// Config TOML pointing at `mock`, storing into `download_dir`.
pub fn config_toml(mock: &MockServer, download_dir: &Path, bind: &str) -> String {
    format!(
        r#"[remote]
catalog_url = "{}"
download_url = "{}"
timeout_secs = 10
connect_timeout_secs = 5

[storage]
download_dir = "{}"

[search]
snippet_chars = 500

[server]
bind = "{}"
"#,
        mock.catalog_url(),
        mock.download_url(),
        download_dir.display(),
        bind
    )
}
