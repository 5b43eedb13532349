use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use akshar::app::AppContext;
use akshar::cli::{commands, Cli, Commands};
use akshar::config::Config;
use akshar::domain::Registration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut config = Config::load()?;
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }
    let ctx = AppContext::new(config)?;

    match cli.command {
        Commands::Blogs { search, tag } => {
            commands::list_blogs(&ctx, search.as_deref(), tag.as_deref()).await?;
        }
        Commands::Landing => {
            commands::landing(&ctx).await?;
        }
        Commands::Read { slug } => {
            commands::read_blog(&ctx, &slug).await?;
        }
        Commands::Like { slug } => {
            commands::set_like(&ctx, &slug, true).await?;
        }
        Commands::Unlike { slug } => {
            commands::set_like(&ctx, &slug, false).await?;
        }
        Commands::Comment { slug, text } => {
            commands::comment(&ctx, &slug, &text).await?;
        }
        Commands::Login { email, password } => {
            commands::login(&ctx, &email, &password).await?;
        }
        Commands::Register {
            name,
            email,
            username,
            password,
        } => {
            let registration = Registration {
                name,
                email,
                username,
                password,
            };
            commands::register(&ctx, registration).await?;
        }
        Commands::Logout => {
            commands::logout(&ctx);
        }
        Commands::Whoami => {
            commands::whoami(&ctx);
        }
        Commands::Feed => {
            commands::feed(&ctx).await?;
        }
        Commands::Notifications { read, all } => {
            commands::notifications(&ctx, read.as_deref(), all).await?;
        }
        Commands::Profile { username } => {
            commands::profile(&ctx, &username).await?;
        }
        Commands::Follow { username } => {
            commands::set_follow(&ctx, &username, true).await?;
        }
        Commands::Unfollow { username } => {
            commands::set_follow(&ctx, &username, false).await?;
        }
        Commands::Create {
            title,
            content,
            tags,
            publish,
        } => {
            commands::create(&ctx, &title, &content, &tags, publish).await?;
        }
        Commands::Edit {
            id,
            title,
            content,
            tags,
            publish,
        } => {
            commands::edit(
                &ctx,
                &id,
                title.as_deref(),
                content.as_deref(),
                &tags,
                publish,
            )
            .await?;
        }
        Commands::Publish { id } => {
            commands::publish(&ctx, &id).await?;
        }
        Commands::Archive { id } => {
            commands::archive(&ctx, &id).await?;
        }
        Commands::Delete { id } => {
            commands::delete(&ctx, &id).await?;
        }
        Commands::Theme { value } => {
            commands::theme(&ctx, value.as_deref())?;
        }
    }

    Ok(())
}
