//! Recepción de imágenes
//!
//! Guarda los ficheros subidos desde la consola de administración en el
//! directorio público de uploads y devuelve sus rutas relativas.

use axum::body::Bytes;
use rand::Rng;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use crate::utils::errors::{AppError, AppResult};

/// Prefijo público bajo el que se sirven las imágenes
pub const PUBLIC_PREFIX: &str = "/uploads";

const FIELD_PREFIX: &str = "images";
const MAX_NAME_ATTEMPTS: usize = 3;

/// Fichero recibido en un formulario multipart
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub original_name: Option<String>,
    pub bytes: Bytes,
}

#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Crear el directorio de uploads si no existe
    pub async fn ensure_dir(&self) -> AppResult<()> {
        tokio::fs::create_dir_all(&self.root).await.map_err(|e| {
            AppError::Storage(format!(
                "cannot create upload directory {}: {}",
                self.root.display(),
                e
            ))
        })
    }

    /// Persistir los ficheros en el mismo orden en que llegaron.
    /// Si uno falla se borran los ya escritos y no se devuelve nada.
    pub async fn store(&self, files: Vec<UploadedFile>) -> AppResult<Vec<String>> {
        if files.is_empty() {
            return Ok(Vec::new());
        }

        self.ensure_dir().await?;

        let mut written: Vec<PathBuf> = Vec::with_capacity(files.len());
        let mut paths = Vec::with_capacity(files.len());

        for file in files {
            match self.write_one(&file).await {
                Ok((path, file_name)) => {
                    written.push(path);
                    paths.push(format!("{}/{}", PUBLIC_PREFIX, file_name));
                }
                Err(e) => {
                    self.discard(&written).await;
                    return Err(e);
                }
            }
        }

        info!("📸 {} imagen(es) guardada(s) en {}", paths.len(), self.root.display());
        Ok(paths)
    }

    async fn write_one(&self, file: &UploadedFile) -> AppResult<(PathBuf, String)> {
        let extension = file
            .original_name
            .as_deref()
            .map(extension_of)
            .unwrap_or_default();

        for _ in 0..MAX_NAME_ATTEMPTS {
            let file_name = unique_file_name(&extension);
            let path = self.root.join(&file_name);

            let mut handle = match tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(handle) => handle,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    debug!("Nombre de fichero ocupado, reintentando: {}", file_name);
                    continue;
                }
                Err(e) => return Err(storage_error(&path, e)),
            };

            if let Err(e) = write_all(&mut handle, &file.bytes).await {
                let _ = tokio::fs::remove_file(&path).await;
                return Err(storage_error(&path, e));
            }

            return Ok((path, file_name));
        }

        Err(AppError::Storage(
            "could not allocate a unique file name".to_string(),
        ))
    }

    /// Borrar imágenes ya publicadas a partir de sus rutas `/uploads/<nombre>`
    pub(crate) async fn discard_public(&self, public_paths: &[String]) {
        let written: Vec<PathBuf> = public_paths
            .iter()
            .filter_map(|public| self.local_path(public))
            .collect();
        self.discard(&written).await;
    }

    fn local_path(&self, public_path: &str) -> Option<PathBuf> {
        let file_name = public_path
            .strip_prefix(PUBLIC_PREFIX)?
            .strip_prefix('/')?;
        if file_name.is_empty() || file_name.contains(['/', '\\']) || file_name.starts_with('.') {
            return None;
        }
        Some(self.root.join(file_name))
    }

    async fn discard(&self, written: &[PathBuf]) {
        for path in written {
            if let Err(e) = tokio::fs::remove_file(path).await {
                warn!("⚠️ No se pudo borrar {}: {}", path.display(), e);
            }
        }
    }
}

async fn write_all(handle: &mut tokio::fs::File, bytes: &[u8]) -> std::io::Result<()> {
    handle.write_all(bytes).await?;
    handle.flush().await
}

fn storage_error(path: &Path, e: std::io::Error) -> AppError {
    AppError::Storage(format!("cannot write {}: {}", path.display(), e))
}

/// `images-<millis>-<aleatorio><.ext>`
fn unique_file_name(extension: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix: u32 = rand::thread_rng().gen_range(0..1_000_000_000);
    format!("{}-{}-{}{}", FIELD_PREFIX, millis, suffix, extension)
}

/// Extensión con punto, en minúsculas; vacía si no es alfanumérica
fn extension_of(original_name: &str) -> String {
    Path::new(original_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
        .unwrap_or_default()
}
