use anyhow::Result;

use crate::state::DBPool;

pub mod models {
    use crate::models::episode_code;

    /// What the download handler needs to stream the file.
    #[derive(Debug, sqlx::FromRow)]
    pub struct ClaimedDownload {
        pub title: String,
        pub video_file: String,
        pub file_format: String,
        pub season_number: i32,
        pub episode_number: i32,
    }

    impl ClaimedDownload {
        pub fn attachment_filename(&self) -> String {
            format!(
                "{} - {}.{}",
                episode_code(self.season_number, self.episode_number),
                self.title,
                self.file_format.to_lowercase()
            )
        }
    }
}

/// Increments the counter and returns the file to serve, or `None` when no
/// episode matches `id`. The increment sticks even if streaming fails later.
pub async fn register(pool: &DBPool, id: i64) -> Result<Option<models::ClaimedDownload>> {
    let row = sqlx::query_as::<_, models::ClaimedDownload>(
        "UPDATE episodes e SET download_count = e.download_count + 1 \
         FROM seasons s \
         WHERE e.id = $1 AND s.id = e.season_id \
         RETURNING e.title, e.video_file, e.file_format, s.season_number, e.episode_number",
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
    fn attachment_filename_carries_the_episode_code() {
        let claim = ClaimedDownload {
            title: "Pilot".to_string(),
            video_file: "episodes/pilot.mp4".to_string(),
            file_format: "MP4".to_string(),
            season_number: 2,
            episode_number: 5,
        };
        assert_eq!(claim.attachment_filename(), "S02E05 - Pilot.mp4");
    }
}
