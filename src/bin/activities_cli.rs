use clap::{Parser, Subcommand};
use dotenvy::dotenv;

use activities_board::client::{render, ActionOutcome, ActivitiesClient};
use activities_board::config;
use activities_board::services::activity_board_service::{BoardAction, BoardPage};

#[derive(Parser)]
#[command(name = "activities-cli")]
#[command(about = "List activities and manage signups on an activities server")]
struct Cli {
    /// Server base url (defaults to ACTIVITIES_API_URL)
    #[arg(long)]
    base_url: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show all activities
    List,
    /// Sign a student up for an activity
    Signup { activity: String, email: String },
    /// Remove a student from an activity
    Unregister { activity: String, email: String },
}

/// Output and exit code for `list`: 1 when the board could not be loaded.
fn listing_output(page: &BoardPage) -> (String, i32) {
    let code = if page.load_error.is_some() { 1 } else { 0 };
    (render::render_board(page), code)
}

/// Output and exit code for a mutation: the re-fetched board on success,
/// otherwise just the message with exit code 1.
fn outcome_output(outcome: &ActionOutcome) -> (String, i32) {
    match &outcome.page {
        Some(page) => (render::render_board(page), 0),
        None => (format!("{}\n", render::render_message(&outcome.message)), 1),
    }
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let base_url = cli.base_url.unwrap_or_else(config::api_base_url);

    let client = match ActivitiesClient::new(&base_url) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };

    let (output, code) = match cli.command {
        Commands::List => listing_output(&client.load_board(None).await),
        Commands::Signup { activity, email } => {
            outcome_output(&client.apply(BoardAction::Signup, &activity, &email).await)
        }
        Commands::Unregister { activity, email } => {
            outcome_output(&client.apply(BoardAction::Unregister, &activity, &email).await)
        }
    };

    print!("{}", output);
    if code != 0 {
        std::process::exit(code);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use activities_board::services::activity_board_service::{BoardMessage, LOAD_FAILED_TEXT};

    #[test]
    fn parses_subcommands() {
        let cli = Cli::try_parse_from(["activities-cli", "list"]).unwrap();
        assert!(cli.base_url.is_none());
        assert!(matches!(cli.command, Commands::List));

        let cli = Cli::try_parse_from([
            "activities-cli",
            "--base-url",
            "http://school:3000",
            "signup",
            "Track & Field",
            "a@mergington.edu",
        ])
        .unwrap();
        assert_eq!(cli.base_url.as_deref(), Some("http://school:3000"));
        match cli.command {
            Commands::Signup { activity, email } => {
                assert_eq!(activity, "Track & Field");
                assert_eq!(email, "a@mergington.edu");
            }
            _ => panic!("expected signup"),
        }

        let cli =
            Cli::try_parse_from(["activities-cli", "unregister", "Chess Club", "b@x.edu"]).unwrap();
        assert!(matches!(cli.command, Commands::Unregister { .. }));
    }

    #[test]
    fn rejects_incomplete_commands() {
        assert!(Cli::try_parse_from(["activities-cli"]).is_err());
        assert!(Cli::try_parse_from(["activities-cli", "signup", "Chess Club"]).is_err());
        assert!(Cli::try_parse_from(["activities-cli", "remove"]).is_err());
    }

    fn empty_page(load_error: Option<&'static str>) -> BoardPage {
        BoardPage {
            cards: vec![],
            load_error,
            message: None,
        }
    }

    #[test]
    fn list_exit_code_follows_load_result() {
        assert_eq!(listing_output(&empty_page(None)).1, 0);
        let (text, code) = listing_output(&empty_page(Some(LOAD_FAILED_TEXT)));
        assert_eq!(code, 1);
        assert!(text.contains(LOAD_FAILED_TEXT));
    }

    #[test]
    fn refused_mutation_exits_with_one() {
        let refused = ActionOutcome {
            message: BoardMessage::error("Activity not found"),
            page: None,
        };
        assert_eq!(
            outcome_output(&refused),
            ("[error] Activity not found\n".to_string(), 1)
        );

        let accepted = ActionOutcome {
            message: BoardMessage::success("Signed up a@x for Chess Club"),
            page: Some(empty_page(None)),
        };
        assert_eq!(outcome_output(&accepted).1, 0);
    }
}
