// Shared harness: the real router on an ephemeral port over in-memory SQLite.
#![allow(dead_code)]

use std::net::{IpAddr, Ipv4Addr};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use alumease::{
    config::{AdminCredentials, Config},
    db, rest,
    upload::{ImageUploader, UploadError, UploadedImage},
    AppState,
};
use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use secrecy::SecretString;
use serde_json::{json, Value};

pub const ADMIN_EMAIL: &str = "admin@alumease.dev";
pub const ADMIN_PASSWORD: &str = "correct horse battery staple";
pub const JWT_SECRET: &str = "integration-test-signing-secret-0123456789";

/// Records every upload and hands back a predictable URL.
#[derive(Default)]
pub struct RecordingUploader {
    pub uploads: Mutex<Vec<(String, String)>>,
    pub fail: AtomicBool,
}

impl RecordingUploader {
    pub fn folders(&self) -> Vec<String> {
        self.uploads
            .lock()
            .unwrap()
            .iter()
            .map(|(folder, _)| folder.clone())
            .collect()
    }

    pub fn count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }
}

#[async_trait]
impl ImageUploader for RecordingUploader {
    async fn upload(&self, data: &str, folder: &str) -> Result<UploadedImage, UploadError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(UploadError::Rejected("Invalid image file".into()));
        }
        let mut uploads = self.uploads.lock().unwrap();
        uploads.push((folder.to_string(), data.to_string()));
        let n = uploads.len();
        Ok(UploadedImage {
            secure_url: format!("https://images.test/{folder}/{n}.png"),
            public_id: format!("{folder}/{n}"),
        })
    }
}

pub struct TestApp {
    pub base_url: String,
    pub http: reqwest::Client,
    pub state: AppState,
    pub uploader: Arc<RecordingUploader>,
}

pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".into(),
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        jwt_secret: SecretString::from(JWT_SECRET.to_string()),
        admin: AdminCredentials {
            email: ADMIN_EMAIL.into(),
            password: SecretString::from(ADMIN_PASSWORD.to_string()),
        },
        cors_origins: vec!["http://localhost:5173".into()],
        cloudinary: None,
    }
}

pub async fn spawn_app() -> TestApp {
    let config = test_config();
    let pool = db::connect(&config.database_url)
        .await
        .expect("in-memory database");
    let uploader = Arc::new(RecordingUploader::default());
    let state = AppState::new(pool, config, uploader.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().unwrap();
    let app = rest::router(state.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestApp {
        base_url: format!("http://{addr}"),
        http: reqwest::Client::new(),
        state,
        uploader,
    }
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> Response {
        let mut request = self.http.get(self.url(path));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request.send().await.unwrap()
    }

    pub async fn post(&self, path: &str, token: Option<&str>, body: Value) -> Response {
        let mut request = self.http.post(self.url(path)).json(&body);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request.send().await.unwrap()
    }

    pub async fn put(&self, path: &str, token: Option<&str>, body: Value) -> Response {
        let mut request = self.http.put(self.url(path)).json(&body);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request.send().await.unwrap()
    }

    pub async fn delete(&self, path: &str, token: Option<&str>) -> Response {
        let mut request = self.http.delete(self.url(path));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request.send().await.unwrap()
    }

    pub async fn admin_token(&self) -> String {
        let response = self
            .post(
                "/api/admin/login",
                None,
                json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }),
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = response.json().await.unwrap();
        body["token"].as_str().unwrap().to_string()
    }

    pub async fn register(&self, name: &str, email: &str, password: &str) -> String {
        let response = self
            .post(
                "/api/user/register",
                None,
                json!({ "name": name, "email": email, "password": password }),
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = response.json().await.unwrap();
        body["token"].as_str().unwrap().to_string()
    }
}

/// Status plus decoded JSON body.
pub async fn read(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let body = response.json().await.unwrap_or(Value::Null);
    (status, body)
}
