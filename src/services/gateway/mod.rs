/// Recommendation server gateway
///
/// Every network round trip the client makes goes through this trait:
/// one production implementation over HTTP, mock implementations in
/// tests. Calls are single-attempt; retrying is up to the user.
use crate::{
    error::AppResult,
    models::{MovieSummary, Rating, ScoredMovie},
};

pub mod http;

pub use http::HttpGateway;

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RecommenderGateway: Send + Sync {
    /// Persists one rating for one movie.
    ///
    /// A `success: false` reply surfaces as `AppError::Rejected`.
    async fn save_rating(&self, movie_id: &str, rating: Rating) -> AppResult<()>;

    /// Deletes the stored rating for one movie
    async fn delete_rating(&self, movie_id: &str) -> AppResult<()>;

    /// Searches movies by title substring and genre filter.
    ///
    /// An empty query matches everything; the server applies its own
    /// result cap. Stored ratings for the viewer ride along on each hit.
    async fn search_movies(&self, query: &str, genre: &str) -> AppResult<Vec<MovieSummary>>;

    /// Submits the full rating snapshot and returns scored suggestions.
    ///
    /// A successful reply with no suggestions is `Ok(vec![])`, distinct
    /// from `AppError::Rejected`.
    async fn get_recommendations(
        &self,
        ratings: &[(String, Rating)],
    ) -> AppResult<Vec<ScoredMovie>>;
}
