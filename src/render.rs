//! Text rendering for the board panels.
//!
//! Pure functions from board state to strings; nothing here mutates
//! state or talks to the network.

use crate::models::STAR_COUNT;
use crate::services::board::{MovieCard, RankedMovie, RatedMovie, RecommendationsPanel};

const METER_WIDTH: u32 = 10;

/// A row of `filled` black stars padded with white stars to five
pub fn stars(filled: u8) -> String {
    let filled = filled.min(STAR_COUNT) as usize;
    let mut row = String::new();
    for index in 0..STAR_COUNT as usize {
        row.push(if index < filled { '★' } else { '☆' });
    }
    row
}

/// Fixed-width meter for a score percentage, e.g. `[#########-] 91%`
pub fn meter(percent: u32) -> String {
    let percent = percent.min(100);
    let filled = (percent * METER_WIDTH + 50) / 100;
    let mut bar = String::from("[");
    for cell in 0..METER_WIDTH {
        bar.push(if cell < filled { '#' } else { '-' });
    }
    bar.push(']');
    format!("{} {}%", bar, percent)
}

pub fn movie_card(card: &MovieCard) -> String {
    let value = match card.widget.committed() {
        Some(rating) => format!("({}/{})", rating, STAR_COUNT),
        None => "(unrated)".to_string(),
    };
    format!(
        "{} [{}]\n  {}\n  {} {}",
        card.title,
        card.movie_id,
        card.genres,
        stars(card.widget.displayed()),
        value
    )
}

pub fn results_panel(cards: &[MovieCard]) -> String {
    if cards.is_empty() {
        return "No movies matched your search.".to_string();
    }
    cards
        .iter()
        .map(movie_card)
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn rated_panel(rated: &[RatedMovie], can_recommend: bool) -> String {
    if rated.is_empty() {
        return "You haven't rated any movies yet.".to_string();
    }

    let mut lines = vec!["Your ratings:".to_string()];
    for movie in rated {
        lines.push(format!(
            "  {}: {}/{} (clear {} to remove)",
            movie.title, movie.rating, STAR_COUNT, movie.movie_id
        ));
    }
    if can_recommend {
        lines.push("Type 'recommend' for suggestions based on these.".to_string());
    }
    lines.join("\n")
}

fn ranked_row(movie: &RankedMovie) -> String {
    format!(
        "  {}. {}  {}/{}  {}  {}",
        movie.rank,
        movie.title,
        movie.score_label(),
        STAR_COUNT,
        meter(movie.score_percent()),
        movie.genres
    )
}

pub fn recommendations_panel(panel: &RecommendationsPanel) -> String {
    match panel {
        RecommendationsPanel::Hidden => String::new(),
        RecommendationsPanel::Ranked(rows) => {
            let mut lines = vec!["Recommended for you:".to_string()];
            lines.extend(rows.iter().map(ranked_row));
            lines.join("\n")
        }
        RecommendationsPanel::Empty => {
            "No recommendations could be built from your ratings. Try rating more movies."
                .to_string()
        }
        RecommendationsPanel::Failed(detail) => {
            format!("Could not fetch recommendations: {}", detail)
        }
    }
}
