/// API route modules
pub mod health;
pub mod songs;

/// GET / - Liveness banner
pub async fn root() -> &'static str {
    "API working"
}
