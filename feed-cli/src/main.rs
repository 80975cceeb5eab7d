mod logging;
mod screen;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use feed_client::{
    ApiClient, ForgotPasswordRequest, ImageUpload, LoginRequest, RegisterRequest, Session,
};
use feed_core::{FeedState, TruncationPolicy, DEFAULT_PAGE_SIZE};

const DEFAULT_SERVER: &str = "http://localhost:3000/api";

#[derive(Parser)]
#[command(author, version, about = "Command-line reader and publisher for the blog", long_about = None)]
struct Cli {
    /// Base URL of the blog API (falls back to BLOG_API_URL)
    #[arg(short, long)]
    server: Option<String>,

    #[arg(long)]
    token_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store the session token
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },

    /// Create an account
    Register {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },

    /// Reset a forgotten password
    ForgotPassword {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        new_password: String,
    },

    /// Show whether a session token is stored
    Status,

    /// Forget the stored session token
    Logout,

    /// Show one page of the article feed
    Feed {
        /// Filter titles and bodies by substring
        #[arg(short, long)]
        query: Option<String>,

        #[arg(short, long, default_value_t = 1)]
        page: usize,

        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: usize,

        /// Print the page as JSON instead of cards
        #[arg(long)]
        json: bool,
    },

    /// Show the most recent articles, featured first
    Recent {
        #[arg(short, long, default_value_t = 4)]
        count: usize,
    },

    /// Browse the feed interactively (search, paginate, expand, refresh)
    Browse {
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: usize,
    },

    /// Publish a new article (requires login)
    Create {
        #[arg(short, long)]
        title: String,

        #[arg(short, long)]
        body: String,

        /// Path to an image to attach
        #[arg(short, long)]
        image: Option<PathBuf>,
    },

    /// List your own articles (requires login)
    MyPosts,
}

struct TokenManager {
    token_path: PathBuf,
}

impl TokenManager {
    fn new(custom_path: Option<PathBuf>) -> Result<Self> {
        let token_path = match custom_path {
            Some(path) => path,
            None => {
                let home = dirs::home_dir().context("Failed to get home directory")?;
                home.join(".blog_feed_token")
            }
        };

        Ok(Self { token_path })
    }

    fn save_token(&self, token: &str) -> Result<()> {
        fs::write(&self.token_path, token)
            .with_context(|| format!("Failed to save token to {:?}", self.token_path))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(&self.token_path)?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&self.token_path, perms)?;
        }

        println!("✓ Token saved to {:?}", self.token_path);
        Ok(())
    }

    fn load_session(&self) -> Result<Option<Session>> {
        match fs::read_to_string(&self.token_path) {
            Ok(token) => {
                let token = token.trim().to_string();
                if !token.is_empty() {
                    Ok(Some(Session::new(token)))
                } else {
                    Ok(None)
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).context("Failed to read token file"),
        }
    }

    fn clear_token(&self) -> Result<()> {
        if self.token_path.exists() {
            fs::remove_file(&self.token_path)
                .with_context(|| format!("Failed to remove token file {:?}", self.token_path))?;
            println!("✓ Token file removed");
        }
        Ok(())
    }
}

/// Requires a stored session or explains how to get one.
fn require_session(token_manager: &TokenManager) -> Result<Session> {
    match token_manager.load_session()? {
        Some(session) => Ok(session),
        None => {
            println!("❌ Not logged in. Please login first:");
            println!("   feed login --email <email> --password <password>");
            std::process::exit(1);
        }
    }
}

fn image_upload_from_path(path: &Path) -> Result<ImageUpload> {
    let bytes =
        fs::read(path).with_context(|| format!("Failed to read image file {:?}", path))?;

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("image")
        .to_string();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("jpeg")
        .to_lowercase();
    let mime_type = match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg".to_string(),
        other => format!("image/{}", other),
    };

    Ok(ImageUpload {
        file_name,
        bytes,
        mime_type,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();

    let server = cli
        .server
        .or_else(|| std::env::var("BLOG_API_URL").ok())
        .unwrap_or_else(|| DEFAULT_SERVER.to_string());

    let api = ApiClient::new(server);
    tracing::debug!(server = api.base_url(), "blog API client ready");

    let token_manager = TokenManager::new(cli.token_file)?;

    match &cli.command {
        Commands::Login { email, password } => {
            println!("🔑 Logging in as: {}", email);

            let req = LoginRequest {
                email: email.clone(),
                senha: password.clone(),
            };
            match api.login(req).await {
                Ok(session) => {
                    println!("✅ Login successful!");
                    token_manager.save_token(session.token())?;
                }
                Err(e) => {
                    println!("❌ Login failed: {}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Register {
            name,
            email,
            password,
        } => {
            println!("📝 Registering: {}", email);

            let req = RegisterRequest {
                nome: name.clone(),
                email: email.clone(),
                senha: password.clone(),
            };
            match api.register(req).await {
                Ok(()) => {
                    println!("✅ Registration successful!");
                    println!("   Now login: feed login --email {} --password <password>", email);
                }
                Err(e) => {
                    println!("❌ Registration failed: {}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::ForgotPassword {
            email,
            new_password,
        } => {
            let req = ForgotPasswordRequest {
                email: email.clone(),
                nova_senha: new_password.clone(),
            };
            match api.forgot_password(req).await {
                Ok(()) => println!("✅ Password reset for {}", email),
                Err(e) => {
                    println!("❌ Password reset failed: {}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Status => match token_manager.load_session()? {
            Some(session) => {
                println!("🔑 Token file: {:?}", token_manager.token_path);
                println!("   Length: {} characters", session.token().len());
                println!("   Status: ✅ Active");
            }
            None => {
                println!("❌ No token found");
                println!("   Please login first: feed login --email <email> --password <password>");
            }
        },

        Commands::Logout => {
            token_manager.clear_token()?;
        }

        Commands::Feed {
            query,
            page,
            page_size,
            json,
        } => {
            let posts = match api.fetch_posts().await {
                Ok(posts) => posts,
                Err(e) => {
                    eprintln!("{} could not load the feed: {}", "✗".red(), e);
                    std::process::exit(1);
                }
            };

            let mut state = FeedState::new(*page_size);
            state.apply_fetch(posts);
            if let Some(q) = query {
                state.set_query(q.clone());
            }
            if !state.set_page(*page) {
                eprintln!(
                    "{} no such page, the feed has {} page(s)",
                    "✗".red(),
                    state.total_pages()
                );
                std::process::exit(1);
            }

            if *json {
                println!("{}", serde_json::to_string_pretty(&screen::page_json(&state))?);
            } else {
                screen::render_page(&state, TruncationPolicy::ARTICLES);
            }
        }

        Commands::Recent { count } => {
            let posts = match api.fetch_posts().await {
                Ok(posts) => posts,
                Err(e) => {
                    eprintln!("{} could not load the feed: {}", "✗".red(), e);
                    std::process::exit(1);
                }
            };

            let mut state = FeedState::default();
            state.apply_fetch(posts);
            screen::render_recent(&state, *count, TruncationPolicy::HOME);
        }

        Commands::Browse { page_size } => {
            screen::browse(&api, *page_size).await?;
        }

        Commands::Create { title, body, image } => {
            let session = require_session(&token_manager)?;

            let upload = match image {
                Some(path) => Some(image_upload_from_path(path)?),
                None => None,
            };

            println!("📝 Publishing article...");
            match api
                .create_post(&session, title.clone(), body.clone(), upload)
                .await
            {
                Ok(()) => println!("✅ Article published!"),
                Err(e) => {
                    if e.is_unauthorized() {
                        println!("❌ Session expired. Please login again:");
                        println!("   feed login --email <email> --password <password>");
                    } else {
                        println!("❌ Failed to publish: {}", e);
                    }
                    std::process::exit(1);
                }
            }
        }

        Commands::MyPosts => {
            let session = require_session(&token_manager)?;

            match api.my_posts(&session).await {
                Ok(posts) if posts.is_empty() => {
                    println!("You haven't written any articles yet.");
                }
                Ok(posts) => {
                    println!("📰 Your articles ({})", posts.len());
                    println!();
                    for post in posts {
                        println!("#{} {}", post.id, post.title.bold());
                        if !post.body.is_empty() {
                            println!("   {}", post.body);
                        }
                        println!();
                    }
                }
                Err(e) => {
                    if e.is_unauthorized() {
                        println!("❌ Session expired. Please login again.");
                    } else {
                        println!("❌ Failed to load your articles: {}", e);
                    }
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}
