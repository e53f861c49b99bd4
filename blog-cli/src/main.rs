use anyhow::Context;
use blog_client::{BlogApi, TokenStore};
use clap::{Parser, Subcommand};
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "blog", about = "Command-line client for the blog platform")]
struct Cli {
    /// Base URL of the API server.
    #[arg(short, long, env = "BLOG_SERVER", default_value = "http://127.0.0.1:8080")]
    server: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an account and start a session.
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Log in and store the session locally.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Drop the stored session.
    Logout,
    /// Show who is currently logged in.
    Whoami,
    /// List blogs, newest first.
    List {
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Fetch a single blog by id.
    Get { id: Uuid },
    /// Publish a new blog.
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
    },
    /// Overwrite a blog you authored.
    Update {
        id: Uuid,
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
    },
    /// Permanently delete a blog you authored.
    Delete { id: Uuid },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let api = BlogApi::new(&cli.server, TokenStore::default_path());

    match cli.command {
        Command::Register {
            name,
            email,
            password,
        } => {
            let user = api.register(&name, &email, &password).await?;
            println!("registered and logged in as {} <{}>", user.name, user.email);
        }
        Command::Login { email, password } => {
            let user = api.login(&email, &password).await?;
            println!("logged in as {} <{}>", user.name, user.email);
        }
        Command::Logout => {
            api.logout()?;
            println!("logged out");
        }
        Command::Whoami => match api.session() {
            Some(session) => {
                println!("{} <{}>", session.user.name, session.user.email)
            }
            None => println!("not logged in"),
        },
        Command::List { page, limit } => {
            let list = api.list_blogs(page, limit).await?;
            println!(
                "{}",
                serde_json::to_string_pretty(&list.blogs).context("render blogs")?
            );
            eprintln!(
                "page {} of {}",
                list.current_page,
                list.total_pages.max(1)
            );
        }
        Command::Get { id } => {
            let blog = api.get_blog(id).await?;
            println!(
                "{}",
                serde_json::to_string_pretty(&blog).context("render blog")?
            );
        }
        Command::Create { title, content } => {
            let blog = api.create_blog(&title, &content).await?;
            println!("created {}", blog.id);
        }
        Command::Update { id, title, content } => {
            let blog = api.update_blog(id, &title, &content).await?;
            println!("updated {}", blog.id);
        }
        Command::Delete { id } => {
            api.delete_blog(id).await?;
            println!("deleted {id}");
        }
    }

    Ok(())
}
