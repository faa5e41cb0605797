pub const LIVENESS_MESSAGE: &str = "Studybot API is running!";

/// `GET /`
pub async fn home() -> &'static str {
    LIVENESS_MESSAGE
}
