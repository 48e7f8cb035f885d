use std::process::ExitCode;

use bookmarkd_core::{
    positions_in_order, ApiClient, ApiError, BookQuery, ClientConfig, FeedType, ListInput, NewRating, RatingSort,
    ReadingStatus, Theme, DEFAULT_EMBED_COUNT, DEFAULT_FEED_LIMIT,
};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{}", .0.to_string().trim_end())]
    Api(#[from] ApiError),
    #[error("could not render output: {0}")]
    Render(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "bookmarkd", about = "Command-line client for the bookmarkd book-rating service")]
struct Cli {
    /// API base URL
    #[arg(long, global = true, env = "BOOKMARKD_API_URL")]
    api_url: Option<String>,

    /// Session state file
    #[arg(long, global = true, env = "BOOKMARKD_STATE")]
    state: Option<String>,

    /// Log requests at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and store the session token
    Login { email: String, password: String },
    /// Create an account
    Signup {
        username: String,
        email: String,
        password: String,
    },
    /// Forget the stored session token
    Logout,
    /// Show the signed-in account
    Whoami,

    /// Search the catalogue
    Books {
        search: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        offset: Option<u32>,
    },
    /// Show one book
    Book { id: i64 },
    /// Most-rated books this week
    Trending {
        #[arg(long, default_value_t = 10)]
        limit: u32,
    },
    /// Best-rated books
    Popular {
        #[arg(long, default_value_t = 10)]
        limit: u32,
    },
    /// Books sharing a genre with the given one
    Similar {
        id: i64,
        #[arg(long, default_value_t = 6)]
        limit: u32,
    },
    Genres,

    /// Ratings and reviews for a book
    Ratings {
        book_id: i64,
        /// newest, most_liked or highest_rating
        #[arg(long)]
        sort: Option<RatingSort>,
    },
    /// Rate a book: 1-10 once finished, 0-10 while shelved
    Rate {
        book_id: i64,
        rating: i32,
        #[arg(long, default_value = "")]
        review: String,
        #[arg(long, default_value = "finished_reading")]
        status: ReadingStatus,
    },
    /// Remove your rating of a book
    Unrate { book_id: i64 },
    /// Your ratings, optionally for one shelf
    MyRatings {
        #[arg(long)]
        status: Option<ReadingStatus>,
    },
    Like { rating_id: i64 },
    Unlike { rating_id: i64 },
    /// Comments on a rating
    Comments { rating_id: i64 },
    /// Comment on a rating
    Comment { rating_id: i64, text: String },

    /// A user's public profile
    User { id: i64 },
    Follow { user_id: i64 },
    Unfollow { user_id: i64 },
    /// Reading summary for one year
    Stats { user_id: i64, year: i32 },
    /// Recent ratings
    Feed {
        #[arg(long = "type", value_enum, default_value_t = FeedArg::All)]
        kind: FeedArg,
        #[arg(long, default_value_t = DEFAULT_FEED_LIMIT)]
        limit: u32,
        #[arg(long, default_value_t = 0)]
        offset: u32,
    },

    /// Lists of a user, or your own when no user is given
    Lists { user_id: Option<i64> },
    /// One list with its books
    List { id: i64 },
    ListCreate {
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        private: bool,
    },
    /// Add a book; position 0 appends
    ListAdd {
        list_id: i64,
        book_id: i64,
        #[arg(long, default_value_t = 0)]
        position: i64,
    },
    ListRemove { list_id: i64, book_id: i64 },
    /// Reorder a list to the given book ids, first to last
    ListReorder {
        list_id: i64,
        #[arg(required = true)]
        book_ids: Vec<i64>,
    },
    ListDelete { id: i64 },
    Bookmark { list_id: i64 },
    Unbookmark { list_id: i64 },

    /// A user's best scored books, as the embed widget shows them
    EmbedUser {
        user_id: i64,
        #[arg(long, default_value_t = DEFAULT_EMBED_COUNT)]
        count: u32,
    },
    /// The first books of a public list, as the embed widget shows them
    EmbedList {
        list_id: i64,
        #[arg(long, default_value_t = DEFAULT_EMBED_COUNT)]
        count: u32,
    },

    /// Show the theme, or set it
    Theme {
        #[arg(value_enum)]
        choice: Option<ThemeArg>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum FeedArg {
    All,
    Following,
}

impl From<FeedArg> for FeedType {
    fn from(arg: FeedArg) -> Self {
        match arg {
            FeedArg::All => FeedType::All,
            FeedArg::Following => FeedType::Following,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum ThemeArg {
    Dark,
    Light,
    Toggle,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = ClientConfig::from_env();
    if let Some(url) = cli.api_url {
        config.base_url = url;
    }
    if let Some(state) = cli.state {
        config.state_file = state.into();
    }
    let client = ApiClient::from_config(&config);

    match run(&client, cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(client: &ApiClient, command: Command) -> Result<(), CliError> {
    match command {
        Command::Login { email, password } => {
            let auth = client.login(&email, &password)?;
            eprintln!("logged in as {}", auth.user.username);
            print_json(&auth.user)
        }
        Command::Signup {
            username,
            email,
            password,
        } => print_json(&client.signup(&username, &email, &password)?),
        Command::Logout => {
            client.session().logout()?;
            eprintln!("logged out");
            Ok(())
        }
        Command::Whoami => print_json(&client.get_profile()?),

        Command::Books { search, limit, offset } => {
            let query = BookQuery { search, limit, offset };
            print_json(&client.get_books(&query)?)
        }
        Command::Book { id } => print_json(&client.get_book(id)?),
        Command::Trending { limit } => print_json(&client.get_trending_books(limit)?),
        Command::Popular { limit } => print_json(&client.get_popular_books(limit)?),
        Command::Similar { id, limit } => print_json(&client.get_similar_books(id, limit)?),
        Command::Genres => print_json(&client.get_genres()?),

        Command::Ratings { book_id, sort } => print_json(&client.get_ratings(book_id, sort)?),
        Command::Rate {
            book_id,
            rating,
            review,
            status,
        } => {
            let input = NewRating { rating, review, status };
            print_json(&client.create_rating(book_id, &input)?)
        }
        Command::Unrate { book_id } => Ok(client.delete_rating(book_id)?),
        Command::MyRatings { status } => print_json(&client.get_my_ratings(status)?),
        Command::Like { rating_id } => Ok(client.like_rating(rating_id)?),
        Command::Unlike { rating_id } => Ok(client.unlike_rating(rating_id)?),
        Command::Comments { rating_id } => print_json(&client.get_comments(rating_id)?),
        Command::Comment { rating_id, text } => print_json(&client.create_comment(rating_id, &text)?),

        Command::User { id } => print_json(&client.get_user_profile(id)?),
        Command::Follow { user_id } => Ok(client.follow_user(user_id)?),
        Command::Unfollow { user_id } => Ok(client.unfollow_user(user_id)?),
        Command::Stats { user_id, year } => print_json(&client.get_year_stats(user_id, year)?),
        Command::Feed { kind, limit, offset } => print_json(&client.get_feed(kind.into(), limit, offset)?),

        Command::Lists { user_id } => {
            let lists = match user_id {
                Some(id) => client.get_user_lists(id)?,
                None => client.get_my_lists()?,
            };
            print_json(&lists)
        }
        Command::List { id } => print_json(&client.get_list(id)?),
        Command::ListCreate {
            name,
            description,
            private,
        } => {
            let input = ListInput {
                name,
                description,
                public: !private,
            };
            print_json(&client.create_list(&input)?)
        }
        Command::ListAdd {
            list_id,
            book_id,
            position,
        } => Ok(client.add_book_to_list(list_id, book_id, position)?),
        Command::ListRemove { list_id, book_id } => Ok(client.remove_book_from_list(list_id, book_id)?),
        Command::ListReorder { list_id, book_ids } => {
            Ok(client.reorder_list_books(list_id, &positions_in_order(&book_ids))?)
        }
        Command::ListDelete { id } => Ok(client.delete_list(id)?),
        Command::Bookmark { list_id } => Ok(client.bookmark_list(list_id)?),
        Command::Unbookmark { list_id } => Ok(client.unbookmark_list(list_id)?),

        Command::EmbedUser { user_id, count } => print_json(&client.get_embed_user_books(user_id, count)?),
        Command::EmbedList { list_id, count } => print_json(&client.get_embed_list(list_id, count)?),

        Command::Theme { choice } => {
            let session = client.session();
            let theme = match choice {
                None => session.theme(),
                Some(ThemeArg::Toggle) => session.toggle_theme()?,
                Some(ThemeArg::Dark) => set_theme(client, Theme::Dark)?,
                Some(ThemeArg::Light) => set_theme(client, Theme::Light)?,
            };
            println!("{}", theme.as_str());
            Ok(())
        }
    }
}

fn set_theme(client: &ApiClient, theme: Theme) -> Result<Theme, ApiError> {
    client.session().set_theme(theme)?;
    Ok(theme)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
