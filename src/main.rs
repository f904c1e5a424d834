use std::io::Write;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use starboard::{
    config::Config,
    models::Rating,
    render,
    services::{board::RatingBoard, gateway::HttpGateway},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let config = Config::from_env()?;
    tracing::info!(
        server_url = %config.server_url,
        logged_in = config.logged_in,
        "Starting board"
    );

    let gateway = Arc::new(HttpGateway::new(config.server_url.clone()));
    let mut board = RatingBoard::new(gateway, config.logged_in);

    // Seed the board so it opens populated, the way the original page
    // arrives server-rendered with popular movies and stored ratings.
    if let Some(notice) = board.search("", "all").await {
        println!("{}", notice);
    }
    if !config.logged_in {
        println!("Browsing as guest: ratings stay local to this session.\n");
    }
    print_panels(&board);
    print_help();

    let mut genre = String::from("all");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    prompt();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));

        match command {
            "" => {}
            "search" => match board.search(rest.trim(), &genre).await {
                Some(notice) => println!("{}", notice),
                None => println!("{}", render::results_panel(board.cards())),
            },
            "genre" => {
                let filter = rest.trim();
                genre = if filter.is_empty() {
                    "all".to_string()
                } else {
                    filter.to_string()
                };
                println!("Genre filter: {}", genre);
            }
            "rate" => {
                let mut args = rest.split_whitespace();
                match (args.next(), args.next().and_then(parse_rating)) {
                    (Some(movie_id), Some(rating)) => {
                        let notice = board.set_rating(movie_id, rating).await;
                        print_card(&board, movie_id);
                        print_rated(&board);
                        if let Some(notice) = notice {
                            println!("{}", notice);
                        }
                    }
                    _ => println!("usage: rate <movie-id> <1-5>"),
                }
            }
            "preview" => {
                let mut args = rest.split_whitespace();
                match (args.next(), args.next().and_then(parse_rating)) {
                    (Some(movie_id), Some(rating)) => {
                        match board.preview(movie_id, rating) {
                            Some(notice) => println!("{}", notice),
                            None => print_card(&board, movie_id),
                        }
                    }
                    _ => println!("usage: preview <movie-id> <1-5>"),
                }
            }
            "leave" => match rest.split_whitespace().next() {
                Some(movie_id) => match board.leave(movie_id) {
                    Some(notice) => println!("{}", notice),
                    None => print_card(&board, movie_id),
                },
                None => println!("usage: leave <movie-id>"),
            },
            "clear" => match rest.split_whitespace().next() {
                Some(movie_id) => {
                    let notice = board.clear_rating(movie_id).await;
                    print_card(&board, movie_id);
                    print_rated(&board);
                    if let Some(notice) = notice {
                        println!("{}", notice);
                    }
                }
                None => println!("usage: clear <movie-id>"),
            },
            "recommend" | "recs" => {
                match board.request_recommendations().await {
                    Some(notice) => println!("{}", notice),
                    None => println!(
                        "{}",
                        render::recommendations_panel(board.recommendations())
                    ),
                }
            }
            "list" => print_rated(&board),
            "show" => println!("{}", render::results_panel(board.cards())),
            "help" => print_help(),
            "quit" | "exit" => break,
            _ => println!("Unknown command '{}'. Try 'help'.", command),
        }

        prompt();
    }

    Ok(())
}

fn parse_rating(arg: &str) -> Option<Rating> {
    arg.parse::<u8>().ok().and_then(Rating::new)
}

fn prompt() {
    print!("> ");
    let _ = std::io::stdout().flush();
}

fn print_card(board: &RatingBoard, movie_id: &str) {
    if let Some(card) = board.cards().iter().find(|card| card.movie_id == movie_id) {
        println!("{}", render::movie_card(card));
    }
}

fn print_rated(board: &RatingBoard) {
    println!(
        "{}",
        render::rated_panel(&board.rated_movies(), board.can_request_recommendations())
    );
}

fn print_panels(board: &RatingBoard) {
    println!("{}", render::results_panel(board.cards()));
    println!();
    print_rated(board);
}

fn print_help() {
    println!();
    println!("Commands:");
    println!("  search <query>        search movies (current genre filter applies)");
    println!("  genre <name>          set the genre filter ('all' to reset)");
    println!("  rate <id> <1-5>       commit a star rating");
    println!("  preview <id> <1-5>    hover preview on a widget");
    println!("  leave <id>            end the hover preview");
    println!("  clear <id>            remove a rating");
    println!("  list                  show your rated movies");
    println!("  show                  show the current search results");
    println!("  recommend             fetch recommendations from your ratings");
    println!("  quit                  exit");
}
