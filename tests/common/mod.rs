#![allow(dead_code)]
//! Utilidades compartidas por los tests HTTP

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use vehicle_catalog::config::EnvironmentConfig;
use vehicle_catalog::{create_router, AppState};

pub const BOUNDARY: &str = "catalog-test-boundary";

pub struct TestApp {
    router: Router,
    _uploads: tempfile::TempDir,
}

/// Configuración de test con un directorio de uploads temporal
pub fn test_config() -> (EnvironmentConfig, tempfile::TempDir) {
    let uploads = tempfile::tempdir().expect("temp dir");
    let config = EnvironmentConfig {
        upload_dir: uploads.path().to_path_buf(),
        max_images: 3,
        ..EnvironmentConfig::default()
    };
    (config, uploads)
}

// Función helper para crear la app de test sobre el almacén en memoria
pub fn create_test_app() -> TestApp {
    let (config, uploads) = test_config();
    TestApp::new(AppState::in_memory(config), uploads)
}

impl TestApp {
    pub fn new(state: AppState, uploads: tempfile::TempDir) -> Self {
        Self {
            router: create_router(state),
            _uploads: uploads,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("request failed");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body")
            .to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        (status, body)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    pub async fn get_raw(&self, uri: &str) -> (StatusCode, Vec<u8>) {
        let response = self
            .router
            .clone()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .expect("request failed");
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, bytes.to_vec())
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method(Method::DELETE)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    pub async fn json(&self, method: Method, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    pub async fn multipart(
        &self,
        method: Method,
        uri: &str,
        fields: &[(&str, &str)],
        files: &[(&str, &[u8])],
    ) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={}", BOUNDARY),
                )
                .body(Body::from(multipart_body(fields, files)))
                .unwrap(),
        )
        .await
    }

    pub async fn create_vehicle(&self, fields: &[(&str, &str)]) -> Value {
        let (status, body) = self
            .multipart(Method::POST, "/api/vehicles", fields, &[])
            .await;
        assert_eq!(status, StatusCode::OK, "create failed: {}", body);
        body
    }

    pub async fn create_order(&self, vehicle_id: &str) -> Value {
        let (status, body) = self
            .json(
                Method::POST,
                "/api/commandes",
                json!({
                    "vehiculeId": vehicle_id,
                    "nomComplet": "Jean Mukendi",
                    "telephone": "+243 900 000 000",
                    "adresse": "12 avenue du Commerce, Kinshasa",
                    "moyenPaiement": "Mobile Money",
                    "dateLivraison": "2025-09-01",
                    "heureLivraison": "14:00"
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "order failed: {}", body);
        body
    }
}

pub fn multipart_body(fields: &[(&str, &str)], files: &[(&str, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            )
            .as_bytes(),
        );
    }
    for (file_name, bytes) in files {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"images\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                BOUNDARY, file_name
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn ids(list: &Value) -> Vec<String> {
    list.as_array()
        .expect("array")
        .iter()
        .map(|v| v["_id"].as_str().unwrap().to_string())
        .collect()
}
