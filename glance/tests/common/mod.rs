#![allow(dead_code)]

use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request};

use glance::api::AppState;
use glance::auth::{hash_password, StaticCredentialStore};
use glance::config::{
    AuthConfig, Config, DriveConfig, ProcessingConfig, ServerConfig, UserEntry,
};
use glance::drive::DriveResolver;
use glance::error::{GlanceError, Result};
use glance::llm::{ContentAnalyzer, PreparedImage};

pub const TEST_USER: &str = "admin";
pub const TEST_PASSWORD: &str = "password123";
pub const MULTIPART_BOUNDARY: &str = "glance-test-boundary";

/// Build an in-memory DOCX with the docx-rs builder.
pub fn create_test_docx<F>(builder_fn: F) -> Vec<u8>
where
    F: FnOnce(docx_rs::Docx) -> docx_rs::Docx,
{
    let docx = builder_fn(docx_rs::Docx::new());
    let mut buffer = Cursor::new(Vec::new());
    docx.build().pack(&mut buffer).expect("Failed to pack DOCX");
    buffer.into_inner()
}

pub fn docx_with_paragraphs(paragraphs: &[&str]) -> Vec<u8> {
    create_test_docx(|mut docx| {
        for text in paragraphs {
            docx = docx.add_paragraph(
                docx_rs::Paragraph::new().add_run(docx_rs::Run::new().add_text(*text)),
            );
        }
        docx
    })
}

/// Build an in-memory PDF with one line of Helvetica text per page.
pub fn create_test_pdf(pages: &[&str]) -> Vec<u8> {
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Document, Object, Stream};

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let stream = Stream::new(dictionary! {}, content.encode().expect("Failed to encode page"));
        let content_id = doc.add_object(stream);
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut out = Vec::new();
    doc.save_to(&mut out).expect("Failed to write PDF");
    out
}

/// A small opaque PNG.
pub fn sample_png() -> Vec<u8> {
    let img = image::RgbImage::from_pixel(3, 2, image::Rgb([10, 120, 200]));
    let mut out = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
        .expect("Failed to encode PNG");
    out
}

pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            max_upload_bytes: 5 * 1024 * 1024,
            session_ttl_secs: 3600,
            session_cookie_secure: false,
        },
        llm: None,
        processing: ProcessingConfig::default(),
        drive: DriveConfig::default(),
        auth: AuthConfig {
            users: vec![UserEntry {
                username: TEST_USER.to_string(),
                role: "admin".to_string(),
                password_sha256: hash_password(TEST_PASSWORD),
            }],
        },
    }
}

/// Analyzer that records calls and answers with canned text.
#[derive(Default)]
pub struct FakeAnalyzer {
    pub fail: bool,
    pub text_calls: AtomicUsize,
    pub image_calls: AtomicUsize,
    pub last_prompt: Mutex<Option<String>>,
}

impl FakeAnalyzer {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.text_calls.load(Ordering::SeqCst) + self.image_calls.load(Ordering::SeqCst)
    }

    fn record(&self, prompt: &str) -> Result<()> {
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
        if self.fail {
            return Err(GlanceError::Analysis("upstream exploded".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ContentAnalyzer for FakeAnalyzer {
    fn model_name(&self) -> &str {
        "fake-model"
    }

    fn is_available(&self) -> bool {
        true
    }

    async fn analyze_text(&self, prompt: &str) -> Result<String> {
        self.text_calls.fetch_add(1, Ordering::SeqCst);
        self.record(prompt)?;
        Ok("A concise summary.".to_string())
    }

    async fn analyze_image(&self, prompt: &str, image: &PreparedImage) -> Result<String> {
        self.image_calls.fetch_add(1, Ordering::SeqCst);
        self.record(prompt)?;
        let (width, height) = image.dimensions();
        Ok(format!("An image of {width}x{height} pixels."))
    }
}

/// Drive resolver returning a fixed answer.
#[derive(Default)]
pub struct FakeDrive {
    pub enabled: bool,
    pub content: Option<String>,
    pub calls: AtomicUsize,
    pub last_file_id: Mutex<Option<String>>,
}

impl FakeDrive {
    pub fn with_content(content: &str) -> Self {
        Self {
            enabled: true,
            content: Some(content.to_string()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DriveResolver for FakeDrive {
    fn is_enabled(&self) -> bool {
        self.enabled
    }

    async fn fetch_content(&self, file_id: &str) -> Option<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_file_id.lock().unwrap() = Some(file_id.to_string());
        if !self.enabled {
            return None;
        }
        self.content.clone()
    }
}

pub fn test_state(analyzer: Arc<FakeAnalyzer>, drive: Arc<FakeDrive>) -> AppState {
    test_state_with_config(test_config(), analyzer, drive)
}

pub fn test_state_with_config(
    config: Config,
    analyzer: Arc<FakeAnalyzer>,
    drive: Arc<FakeDrive>,
) -> AppState {
    let credentials = StaticCredentialStore::from_config(&config.auth);
    AppState::new(config, analyzer, drive, Arc::new(credentials))
        .expect("Failed to build test state")
}

pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// One multipart part: field name, optional filename, raw bytes.
pub type Part<'a> = (&'a str, Option<&'a str>, &'a [u8]);

pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, filename, bytes) in parts {
        body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}\r\n").as_bytes());
        match filename {
            Some(filename) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                );
            }
            None => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
            }
        }
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn multipart_request(uri: &str, parts: &[Part<'_>]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap()
}

/// Extract `name=value` of the session cookie from a `Set-Cookie` header.
pub fn session_cookie(response: &axum::response::Response) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with("glance_session="))
        .and_then(|value| value.split(';').next())
        .map(str::to_string)
}

pub fn with_cookie(mut request: Request<Body>, cookie: &str) -> Request<Body> {
    request.headers_mut().insert(
        header::COOKIE,
        header::HeaderValue::from_str(cookie).unwrap(),
    );
    request
}
