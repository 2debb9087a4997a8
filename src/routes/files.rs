use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::Response,
};
use serde::Deserialize;
use tokio::io::AsyncReadExt;

use crate::AppState;

#[derive(Deserialize)]
pub struct ServeFileQuery {
    pub download: Option<u8>,
}

/// Serve an uploaded file (photos, branding) with HTTP range support.
/// Add ?download=1 to get Content-Disposition: attachment.
pub async fn serve_file(
    State(state): State<AppState>,
    Path(path): Path<String>,
    Query(params): Query<ServeFileQuery>,
    headers: HeaderMap,
) -> Result<Response, StatusCode> {
    let file_path = std::path::PathBuf::from(&state.config.data_dir).join(&path);

    // Security: ensure the path doesn't escape the data directory
    let canonical_data = std::fs::canonicalize(&state.config.data_dir)
        .map_err(|_| StatusCode::NOT_FOUND)?;
    let canonical_file = match std::fs::canonicalize(&file_path) {
        Ok(p) => p,
        Err(_) => return Err(StatusCode::NOT_FOUND),
    };
    if !canonical_file.starts_with(&canonical_data) {
        return Err(StatusCode::FORBIDDEN);
    }

    let metadata = tokio::fs::metadata(&file_path)
        .await
        .map_err(|_| StatusCode::NOT_FOUND)?;
    let file_size = metadata.len();

    let content_type = mime_guess::from_path(&file_path)
        .first_raw()
        .unwrap_or("application/octet-stream");

    let download = params.download.unwrap_or(0) != 0;

    if let Some(range_header) = headers.get(header::RANGE) {
        let range_str = range_header.to_str().map_err(|_| StatusCode::BAD_REQUEST)?;
        if let Some((start, end)) = parse_range(range_str, file_size) {
            let length = end - start + 1;

            let mut file = tokio::fs::File::open(&file_path)
                .await
                .map_err(|_| StatusCode::NOT_FOUND)?;

            use tokio::io::AsyncSeekExt;
            file.seek(std::io::SeekFrom::Start(start))
                .await
                .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

            let mut buf = vec![0u8; length as usize];
            file.read_exact(&mut buf)
                .await
                .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

            let mut builder = Response::builder()
                .status(StatusCode::PARTIAL_CONTENT)
                .header(header::CONTENT_TYPE, content_type)
                .header(header::CONTENT_LENGTH, length.to_string())
                .header(
                    header::CONTENT_RANGE,
                    format!("bytes {}-{}/{}", start, end, file_size),
                )
                .header(header::ACCEPT_RANGES, "bytes");

            if download {
                builder = builder.header(
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", file_name(&file_path)),
                );
            }

            return Ok(builder.body(Body::from(bytes::Bytes::from(buf))).unwrap());
        }
    }

    let file_bytes = tokio::fs::read(&file_path)
        .await
        .map_err(|_| StatusCode::NOT_FOUND)?;

    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, file_size.to_string())
        .header(header::ACCEPT_RANGES, "bytes");

    if download {
        builder = builder.header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", file_name(&file_path)),
        );
    }

    Ok(builder.body(Body::from(file_bytes)).unwrap())
}

fn file_name(path: &std::path::Path) -> &str {
    path.file_name().and_then(|n| n.to_str()).unwrap_or("download")
}

fn parse_range(range: &str, file_size: u64) -> Option<(u64, u64)> {
    let range = range.strip_prefix("bytes=")?;
    let mut parts = range.split('-');
    let start: u64 = parts.next()?.parse().ok()?;
    let end: u64 = parts
        .next()
        .and_then(|e| e.parse().ok())
        .unwrap_or(file_size - 1);
    if start > end || end >= file_size {
        return None;
    }
    Some((start, end))
}

#[cfg(test)]
mod tests {
    use super::parse_range;

    #[test]
    fn plages_http_valides() {
        assert_eq!(parse_range("bytes=0-99", 1000), Some((0, 99)));
        assert_eq!(parse_range("bytes=500-", 1000), Some((500, 999)));
        assert_eq!(parse_range("bytes=900-1000", 1000), None);
        assert_eq!(parse_range("octets=0-99", 1000), None);
    }
}
