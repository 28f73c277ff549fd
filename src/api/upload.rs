use super::client::StoreClient;
use crate::core::prelude::*;
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Method};
use serde_json::Value;
use std::path::Path;

const IMAGE_TYPES: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("svg", "image/svg+xml"),
    ("avif", "image/avif"),
];

/// Image content type derived from the extension, or a validation error.
pub fn image_mime(path: &Path) -> Result<&'static str> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();
    IMAGE_TYPES
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, mime)| *mime)
        .ok_or_else(|| AppError::Validation(crate::t!("upload.not_image")))
}

/// Splits `data` into chunks and reports the sent fraction as each chunk is pulled.
fn progress_chunks<F>(data: Vec<u8>, chunk: usize, mut on_progress: F) -> Body
where
    F: FnMut(f64) + Send + Sync + 'static,
{
    let total = data.len();
    if total == 0 {
        on_progress(1.0);
        return Body::from(data);
    }

    let chunks: Vec<Vec<u8>> = data.chunks(chunk.max(1)).map(<[u8]>::to_vec).collect();
    let mut sent = 0usize;
    let stream = futures::stream::iter(chunks.into_iter().map(move |piece| {
        sent += piece.len();
        on_progress(sent as f64 / total as f64);
        Ok::<_, std::io::Error>(piece)
    }));
    Body::wrap_stream(stream)
}

impl StoreClient {
    /// Uploads one image as multipart field `image` and returns its public URL.
    pub async fn upload_image<F>(&self, path: &Path, on_progress: F) -> Result<String>
    where
        F: FnMut(f64) + Send + Sync + 'static,
    {
        let mime = image_mime(path)?;
        let data = tokio::fs::read(path).await.map_err(AppError::Io)?;
        let length = data.len() as u64;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();
        log::debug!("Uploading {} ({} bytes, {})", file_name, length, mime);

        let body = progress_chunks(data, self.upload_chunk(), on_progress);
        let part = Part::stream_with_length(body, length)
            .file_name(file_name)
            .mime_str(mime)
            .map_err(|e| AppError::Validation(e.to_string()))?;
        let form = Form::new().part("image", part);

        let builder = self.request(Method::POST, "upload").multipart(form);
        let body = self.send(Method::POST, "upload", builder).await?;

        match body.get("url").and_then(Value::as_str) {
            Some(url) => Ok(url.to_string()),
            None => match body {
                Value::String(url) if !url.is_empty() => Ok(url),
                _ => Err(AppError::Decode("Upload response carries no url".into())),
            },
        }
    }
}
