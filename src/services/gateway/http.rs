/// HTTP implementation of the recommendation server gateway
///
/// Endpoint shapes follow the server exactly: the save endpoint takes a
/// JSON body, the other three take form fields. Non-2xx statuses become
/// `AppError::BadStatus`; a well-formed reply with `success: false`
/// becomes `AppError::Rejected`.
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;

use crate::{
    error::{AppError, AppResult},
    models::{MovieSummary, MutationAck, Rating, RecommendationsReply, SaveRatingBody,
        ScoredMovie, SearchReply},
    services::gateway::RecommenderGateway,
};

#[derive(Debug, Clone)]
pub struct HttpGateway {
    http_client: HttpClient,
    base_url: String,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http_client: HttpClient::new(),
            base_url,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Checks the status line, then deserializes the payload
    async fn read_reply<T: DeserializeOwned>(response: reqwest::Response) -> AppResult<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::BadStatus { status, body });
        }
        Ok(response.json::<T>().await?)
    }

    fn check_ack(ack: MutationAck, fallback: &str) -> AppResult<()> {
        if ack.success {
            Ok(())
        } else {
            Err(AppError::Rejected(
                ack.message.unwrap_or_else(|| fallback.to_string()),
            ))
        }
    }
}

#[async_trait::async_trait]
impl RecommenderGateway for HttpGateway {
    async fn save_rating(&self, movie_id: &str, rating: Rating) -> AppResult<()> {
        let response = self
            .http_client
            .post(self.endpoint("rate_movie"))
            .json(&SaveRatingBody { movie_id, rating })
            .send()
            .await?;

        let ack: MutationAck = Self::read_reply(response).await?;
        Self::check_ack(ack, "rating was not saved")?;

        tracing::info!(movie_id = %movie_id, rating = %rating, "Rating saved");
        Ok(())
    }

    async fn delete_rating(&self, movie_id: &str) -> AppResult<()> {
        let response = self
            .http_client
            .post(self.endpoint("delete_rating"))
            .form(&[("movie_id", movie_id)])
            .send()
            .await?;

        let ack: MutationAck = Self::read_reply(response).await?;
        Self::check_ack(ack, "rating was not deleted")?;

        tracing::info!(movie_id = %movie_id, "Rating deleted");
        Ok(())
    }

    async fn search_movies(&self, query: &str, genre: &str) -> AppResult<Vec<MovieSummary>> {
        let response = self
            .http_client
            .post(self.endpoint("search_movies"))
            .form(&[("query", query), ("genre", genre)])
            .send()
            .await?;

        let reply: SearchReply = Self::read_reply(response).await?;

        tracing::info!(
            query = %query,
            genre = %genre,
            results = reply.movies.len(),
            "Movie search completed"
        );

        Ok(reply.movies)
    }

    async fn get_recommendations(
        &self,
        ratings: &[(String, Rating)],
    ) -> AppResult<Vec<ScoredMovie>> {
        let form: Vec<(String, String)> = ratings
            .iter()
            .map(|(movie_id, rating)| (format!("rating_{}", movie_id), rating.to_string()))
            .collect();

        let response = self
            .http_client
            .post(self.endpoint("get_recommendations"))
            .form(&form)
            .send()
            .await?;

        let reply: RecommendationsReply = Self::read_reply(response).await?;

        if !reply.success {
            return Err(AppError::Rejected(reply.message.unwrap_or_else(|| {
                "recommendations could not be generated".to_string()
            })));
        }

        let recommendations = reply.recommendations.unwrap_or_default();

        tracing::info!(
            ratings = ratings.len(),
            results = recommendations.len(),
            "Recommendations fetched"
        );

        Ok(recommendations)
    }
}
