use serde::{Deserialize, Deserializer, Serialize};

mod rating;

pub use rating::{Rating, StarWidget, STAR_COUNT};

/// A movie as returned by the search endpoint
///
/// The server is inconsistent about numeric fields: ids and stored
/// ratings arrive as numbers on some paths and as strings on others, so
/// both fields deserialize permissively.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MovieSummary {
    #[serde(rename = "movieId", deserialize_with = "de_lenient_id")]
    pub movie_id: String,
    pub title: String,
    #[serde(default)]
    pub genres: String,
    #[serde(default, deserialize_with = "de_lenient_rating")]
    pub user_rating: Option<Rating>,
}

/// Reply shape of the search endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct SearchReply {
    #[serde(default)]
    pub movies: Vec<MovieSummary>,
}

/// Reply shape of the save and delete endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct MutationAck {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// One recommended movie with its predicted score
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScoredMovie {
    pub title: String,
    #[serde(default)]
    pub genres: String,
    pub score: f64,
}

/// Reply shape of the recommendations endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationsReply {
    pub success: bool,
    #[serde(default)]
    pub recommendations: Option<Vec<ScoredMovie>>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of the save-rating request
#[derive(Debug, Serialize)]
pub struct SaveRatingBody<'a> {
    pub movie_id: &'a str,
    pub rating: Rating,
}

/// Accepts `"7"`, `7` and `7.0` as the id `"7"`
fn de_lenient_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::Float(n) => n.to_string(),
    })
}

/// Accepts `4`, `4.0` and `"4"`; anything unparsable or out of range is
/// treated as no stored rating rather than a hard error.
fn de_lenient_rating<'de, D>(deserializer: D) -> Result<Option<Rating>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(f64),
        Text(String),
    }

    let rating = match Option::<Raw>::deserialize(deserializer)? {
        None => None,
        Some(Raw::Num(n)) => Rating::from_float(n),
        Some(Raw::Text(s)) => s.trim().parse::<f64>().ok().and_then(Rating::from_float),
    };

    Ok(rating)
}
