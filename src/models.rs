use chrono::NaiveDate;
use serde::Serialize;

#[derive(Serialize, Clone, Debug)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub year: i32,
    pub poster: String,
    pub video_file: String,
    /// Runtime in whole minutes.
    pub duration: i32,
    pub director: String,
    pub rating: f64,
    pub file_size: String,
    pub file_format: String,
    pub quality: String,
    pub download_count: i64,
    pub is_featured: bool,
    pub genres: Vec<String>,
}

impl Movie {
    pub fn duration_formatted(&self) -> String {
        format_duration(self.duration)
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct Series {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub start_year: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_year: Option<i32>,
    pub poster: String,
    pub genres: Vec<String>,
}

impl Series {
    /// Display range, `"2020-2023"` or `"2020-Present"` while ongoing.
    pub fn years(&self) -> String {
        match self.end_year {
            Some(end) => format!("{}-{}", self.start_year, end),
            None => format!("{}-Present", self.start_year),
        }
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct Season {
    pub id: i64,
    pub series_id: i64,
    pub season_number: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
}

#[derive(Serialize, Clone, Debug)]
pub struct Episode {
    pub id: i64,
    pub season_id: i64,
    pub season_number: i32,
    pub episode_number: i32,
    pub title: String,
    pub description: String,
    pub video_file: String,
    pub file_size: String,
    pub file_format: String,
    pub quality: String,
    pub download_count: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<NaiveDate>,
    /// Runtime in whole minutes.
    pub duration: i32,
}

impl Episode {
    /// Display identifier like `S02E05`.
    pub fn episode_code(&self) -> String {
        episode_code(self.season_number, self.episode_number)
    }

    pub fn duration_formatted(&self) -> String {
        format_duration(self.duration)
    }
}

pub fn episode_code(season_number: i32, episode_number: i32) -> String {
    format!("S{season_number:02}E{episode_number:02}")
}

pub fn format_duration(minutes: i32) -> String {
    if minutes >= 60 {
        format!("{}h {}m", minutes / 60, minutes % 60)
    } else {
        format!("{minutes}m")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(end_year: Option<i32>) -> Series {
        Series {
            id: 1,
            title: "Test".to_string(),
            description: String::new(),
            start_year: 2020,
            end_year,
            poster: "series_posters/test.jpg".to_string(),
            genres: vec![],
        }
    }

    #[test]
    fn years_for_finished_series() {
        assert_eq!(series(Some(2023)).years(), "2020-2023");
    }

    #[test]
    fn years_for_ongoing_series() {
        assert_eq!(series(None).years(), "2020-Present");
    }

    #[test]
    fn episode_code_pads_to_two_digits() {
        assert_eq!(episode_code(2, 5), "S02E05");
        assert_eq!(episode_code(10, 12), "S10E12");
    }

    #[test]
    fn duration_below_an_hour() {
        assert_eq!(format_duration(45), "45m");
    }

    #[test]
    fn duration_with_hours() {
        assert_eq!(format_duration(125), "2h 5m");
        assert_eq!(format_duration(60), "1h 0m");
    }
}
