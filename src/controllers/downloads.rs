use std::result::Result;

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, Response};
use tokio_util::io::ReaderStream;

use crate::datasource::repository::downloads;
use crate::errors::Error;
use crate::state::DBPool;
use crate::storage::MediaStore;

pub(crate) async fn movie(
    Path(id): Path<i64>,
    State(pool): State<DBPool>,
    State(media): State<MediaStore>,
) -> Result<Response<Body>, Error> {
    let claim = downloads::movie::register(&pool, id)
        .await?
        .ok_or(Error::NotFound("movie"))?;
    stream_attachment(&media, &claim.video_file, &claim.attachment_filename()).await
}

pub(crate) async fn episode(
    Path(id): Path<i64>,
    State(pool): State<DBPool>,
    State(media): State<MediaStore>,
) -> Result<Response<Body>, Error> {
    let claim = downloads::episode::register(&pool, id)
        .await?
        .ok_or(Error::NotFound("episode"))?;
    stream_attachment(&media, &claim.video_file, &claim.attachment_filename()).await
}

async fn stream_attachment(
    media: &MediaStore,
    key: &str,
    filename: &str,
) -> Result<Response<Body>, Error> {
    let (file, len) = media.open(key).await?;
    let response = Response::builder()
        .header(header::CONTENT_TYPE, "video/mp4")
        .header(header::CONTENT_LENGTH, len)
        .header(header::CONTENT_DISPOSITION, content_disposition(filename))
        .body(Body::from_stream(ReaderStream::new(file)))
        .map_err(anyhow::Error::from)?;
    Ok(response)
}

/// Quotes, backslashes, and control characters would corrupt the quoted
/// filename parameter, so they are replaced before the header is built.
fn content_disposition(filename: &str) -> String {
    let sanitized: String = filename
        .chars()
        .map(|c| {
            if c == '"' || c == '\\' || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();
    format!("attachment; filename=\"{sanitized}\"")
}

#[cfg(test)]
mod tests {
    use super::content_disposition;

    #[test]
    fn plain_filenames_pass_through() {
        assert_eq!(
            content_disposition("Test.mp4"),
            "attachment; filename=\"Test.mp4\""
        );
        assert_eq!(
            content_disposition("S02E05 - Pilot.mp4"),
            "attachment; filename=\"S02E05 - Pilot.mp4\""
        );
    }

    #[test]
    fn quotes_and_control_characters_are_replaced() {
        assert_eq!(
            content_disposition("He said \"hi\".mp4"),
            "attachment; filename=\"He said _hi_.mp4\""
        );
        assert_eq!(
            content_disposition("bad\r\nname.mp4"),
            "attachment; filename=\"bad__name.mp4\""
        );
        assert_eq!(
            content_disposition("back\\slash.mp4"),
            "attachment; filename=\"back_slash.mp4\""
        );
    }
}
