use anyhow::Result;

use crate::state::DBPool;

pub mod models {
    /// What the download handler needs to stream the file.
    #[derive(Debug, sqlx::FromRow)]
    pub struct ClaimedDownload {
        pub title: String,
        pub video_file: String,
        pub file_format: String,
    }

    impl ClaimedDownload {
        pub fn attachment_filename(&self) -> String {
            format!("{}.{}", self.title, self.file_format.to_lowercase())
        }
    }
}

/// Increments the counter and returns the file to serve, or `None` when no
/// movie matches `id`. The increment sticks even if streaming fails later.
pub async fn register(pool: &DBPool, id: i64) -> Result<Option<models::ClaimedDownload>> {
    let row = sqlx::query_as::<_, models::ClaimedDownload>(
        "UPDATE movies SET download_count = download_count + 1 \
         WHERE id = $1 \
         RETURNING title, video_file, file_format",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::models::ClaimedDownload;

    #[test]
    fn attachment_filename_lowercases_the_format() {
        let claim = ClaimedDownload {
            title: "Test".to_string(),
            video_file: "videos/test.mp4".to_string(),
            file_format: "MP4".to_string(),
        };
        assert_eq!(claim.attachment_filename(), "Test.mp4");
    }

    #[test]
    fn attachment_filename_keeps_the_title_verbatim() {
        let claim = ClaimedDownload {
            title: "The Good, the Bad and the Ugly".to_string(),
            video_file: "videos/tgtbatu.mkv".to_string(),
            file_format: "MKV".to_string(),
        };
        assert_eq!(
            claim.attachment_filename(),
            "The Good, the Bad and the Ugly.mkv"
        );
    }
}
