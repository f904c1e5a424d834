use std::fmt::Display;
use std::sync::Arc;

use crate::{
    error::AppError,
    models::{MovieSummary, Rating, ScoredMovie, StarWidget, STAR_COUNT},
    services::gateway::RecommenderGateway,
};

/// One movie card on the board, with its embedded star widget
#[derive(Debug, Clone)]
pub struct MovieCard {
    pub movie_id: String,
    pub title: String,
    pub genres: String,
    pub widget: StarWidget,
}

impl MovieCard {
    pub fn new(movie: MovieSummary) -> Self {
        Self {
            movie_id: movie.movie_id,
            title: movie.title,
            genres: movie.genres,
            widget: StarWidget::new(movie.user_rating),
        }
    }
}

/// Snapshot entry for the rated-movies panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatedMovie {
    pub movie_id: String,
    pub title: String,
    pub rating: Rating,
}

/// One row of the recommendation panel
#[derive(Debug, Clone, PartialEq)]
pub struct RankedMovie {
    /// 1-based position in the ranked list
    pub rank: usize,
    pub title: String,
    pub genres: String,
    pub score: f64,
}

impl RankedMovie {
    /// Score shown to the user, one decimal place
    pub fn score_label(&self) -> String {
        format!("{:.1}", self.score)
    }

    /// Meter width: the score normalized to a percentage
    pub fn score_percent(&self) -> u32 {
        (self.score / STAR_COUNT as f64 * 100.0).round() as u32
    }
}

/// Turns a scored reply into ranked panel rows.
///
/// The single place recommendation output is shaped; ranks are 1-based.
pub fn rank_recommendations(scored: Vec<ScoredMovie>) -> Vec<RankedMovie> {
    scored
        .into_iter()
        .enumerate()
        .map(|(index, movie)| RankedMovie {
            rank: index + 1,
            title: movie.title,
            genres: movie.genres,
            score: movie.score,
        })
        .collect()
}

/// What the recommendation panel currently shows.
///
/// A successful-but-empty reply and a failed request are distinct states
/// with distinct renderings.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RecommendationsPanel {
    /// Nothing requested yet
    #[default]
    Hidden,
    Ranked(Vec<RankedMovie>),
    Empty,
    Failed(String),
}

/// A blocking notice surfaced to the user after an interaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    LoginRequired,
    SaveFailed(String),
    DeleteFailed(String),
    SearchFailed,
    NothingRated,
    UnknownMovie(String),
}

impl Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notice::LoginRequired => write!(f, "Log in to save ratings."),
            Notice::SaveFailed(detail) => write!(f, "Could not save the rating: {}", detail),
            Notice::DeleteFailed(detail) => write!(f, "Could not delete the rating: {}", detail),
            Notice::SearchFailed => write!(f, "Something went wrong while searching for movies."),
            Notice::NothingRated => write!(f, "Please rate at least one movie first."),
            Notice::UnknownMovie(movie_id) => write!(f, "No movie {} on the board.", movie_id),
        }
    }
}

/// What a failure notice shows: the server's own words for payload-level
/// rejections, a generic line for transport failures.
fn failure_detail(error: &AppError) -> String {
    match error {
        AppError::Rejected(message) => message.clone(),
        _ => "network error".to_string(),
    }
}

/// Keeps every movie's star widget, the rated-movies snapshot and the
/// recommendation panel in agreement with each other and with the server.
///
/// Local state moves first: a committed rating is visible immediately and
/// is never rolled back by a failed save. Deletes are the one exception,
/// mirroring the server only after a confirmed round trip.
pub struct RatingBoard {
    gateway: Arc<dyn RecommenderGateway>,
    logged_in: bool,
    cards: Vec<MovieCard>,
    recommendations: RecommendationsPanel,
}

impl RatingBoard {
    pub fn new(gateway: Arc<dyn RecommenderGateway>, logged_in: bool) -> Self {
        Self {
            gateway,
            logged_in,
            cards: Vec::new(),
            recommendations: RecommendationsPanel::default(),
        }
    }

    pub fn cards(&self) -> &[MovieCard] {
        &self.cards
    }

    pub fn recommendations(&self) -> &RecommendationsPanel {
        &self.recommendations
    }

    pub fn logged_in(&self) -> bool {
        self.logged_in
    }

    /// Rebuilds the rated-movies snapshot from scratch.
    ///
    /// Always derived from the widgets, never patched incrementally, so
    /// the panel cannot drift from the cards.
    pub fn rated_movies(&self) -> Vec<RatedMovie> {
        self.cards
            .iter()
            .filter_map(|card| {
                card.widget.committed().map(|rating| RatedMovie {
                    movie_id: card.movie_id.clone(),
                    title: card.title.clone(),
                    rating,
                })
            })
            .collect()
    }

    /// The recommend action is offered iff something is rated
    pub fn can_request_recommendations(&self) -> bool {
        self.cards.iter().any(|card| card.widget.is_rated())
    }

    /// Temporarily shows `rating` stars on one widget
    pub fn preview(&mut self, movie_id: &str, rating: Rating) -> Option<Notice> {
        match self.card_mut(movie_id) {
            Some(card) => {
                card.widget.preview(rating);
                None
            }
            None => Some(Notice::UnknownMovie(movie_id.to_string())),
        }
    }

    /// Reverts one widget's display to its committed value
    pub fn leave(&mut self, movie_id: &str) -> Option<Notice> {
        match self.card_mut(movie_id) {
            Some(card) => {
                card.widget.leave();
                None
            }
            None => Some(Notice::UnknownMovie(movie_id.to_string())),
        }
    }

    /// Commits a rating locally, then saves it when logged in.
    ///
    /// The widget shows the new value before the save call resolves, and
    /// keeps it whatever the outcome; failures only produce a notice.
    pub async fn set_rating(&mut self, movie_id: &str, rating: Rating) -> Option<Notice> {
        let Some(card) = self.card_mut(movie_id) else {
            return Some(Notice::UnknownMovie(movie_id.to_string()));
        };
        card.widget.commit(rating);

        tracing::debug!(
            movie_id = %movie_id,
            rating = %rating,
            rated = self.rated_movies().len(),
            "Rating committed locally"
        );

        if !self.logged_in {
            return Some(Notice::LoginRequired);
        }

        match self.gateway.save_rating(movie_id, rating).await {
            Ok(()) => None,
            Err(error) => {
                tracing::warn!(movie_id = %movie_id, error = %error, "Saving rating failed");
                Some(Notice::SaveFailed(failure_detail(&error)))
            }
        }
    }

    /// Clears a rating; against the server first when logged in.
    ///
    /// Unlike saves, the local value only changes after the server
    /// confirms, since a failed delete leaves the stored rating in place.
    pub async fn clear_rating(&mut self, movie_id: &str) -> Option<Notice> {
        if self.card_mut(movie_id).is_none() {
            return Some(Notice::UnknownMovie(movie_id.to_string()));
        }

        if !self.logged_in {
            self.clear_locally(movie_id);
            return None;
        }

        match self.gateway.delete_rating(movie_id).await {
            Ok(()) => {
                self.clear_locally(movie_id);
                None
            }
            Err(error) => {
                tracing::warn!(movie_id = %movie_id, error = %error, "Deleting rating failed");
                Some(Notice::DeleteFailed(failure_detail(&error)))
            }
        }
    }

    /// Replaces the results panel with fresh cards for `query`/`genre`.
    ///
    /// On failure the previous cards stay on the board untouched.
    pub async fn search(&mut self, query: &str, genre: &str) -> Option<Notice> {
        match self.gateway.search_movies(query, genre).await {
            Ok(movies) => {
                self.install_cards(movies);
                None
            }
            Err(error) => {
                tracing::warn!(query = %query, error = %error, "Movie search failed");
                Some(Notice::SearchFailed)
            }
        }
    }

    /// Submits the full rating snapshot as one batch.
    ///
    /// Refuses without a network call when nothing is rated. Outcomes
    /// land in the recommendation panel: ranked rows, an explanatory
    /// empty state, or an error state.
    pub async fn request_recommendations(&mut self) -> Option<Notice> {
        let snapshot = self.rated_movies();
        if snapshot.is_empty() {
            return Some(Notice::NothingRated);
        }

        let ratings: Vec<(String, Rating)> = snapshot
            .into_iter()
            .map(|movie| (movie.movie_id, movie.rating))
            .collect();

        match self.gateway.get_recommendations(&ratings).await {
            Ok(scored) if scored.is_empty() => {
                self.recommendations = RecommendationsPanel::Empty;
                None
            }
            Ok(scored) => {
                self.recommendations = RecommendationsPanel::Ranked(rank_recommendations(scored));
                None
            }
            Err(error) => {
                tracing::warn!(error = %error, "Recommendation request failed");
                self.recommendations = RecommendationsPanel::Failed(failure_detail(&error));
                None
            }
        }
    }

    fn card_mut(&mut self, movie_id: &str) -> Option<&mut MovieCard> {
        self.cards.iter_mut().find(|card| card.movie_id == movie_id)
    }

    fn clear_locally(&mut self, movie_id: &str) {
        if let Some(card) = self.card_mut(movie_id) {
            card.widget.clear();
        }
        tracing::debug!(
            movie_id = %movie_id,
            rated = self.rated_movies().len(),
            "Rating cleared locally"
        );
    }

    fn install_cards(&mut self, movies: Vec<MovieSummary>) {
        self.cards = movies.into_iter().map(MovieCard::new).collect();
        tracing::debug!(
            cards = self.cards.len(),
            rated = self.rated_movies().len(),
            "Results panel replaced"
        );
    }
}
