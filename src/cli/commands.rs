use crate::app::{AksharError, AppContext, Result};
use crate::domain::{Article, Credentials, Draft, Registration, Theme};
use crate::fetcher::{ListQuery, Resource, ViewScope};

const EXCERPT_CHARS: usize = 140;

/// Surface a view's load failure as the command's error.
fn settled<T>(resource: &mut Resource<T>) -> Result<()> {
    match resource.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn print_article_line(article: &Article) {
    println!(
        "{}  {}  ({} min, {} likes)\n  by {} | {}",
        article.created_at.format("%Y-%m-%d"),
        article.title,
        article.reading_time(),
        article.likes_count,
        article.author.name,
        article.slug
    );
}

fn print_articles(articles: &[&Article], using_fallback: bool) {
    if using_fallback {
        println!("(Backend unavailable, showing demo stories)\n");
    }
    if articles.is_empty() {
        println!("No stories");
        return;
    }
    for article in articles {
        print_article_line(article);
    }
}

pub async fn list_blogs(ctx: &AppContext, search: Option<&str>, tag: Option<&str>) -> Result<()> {
    let (_guard, scope) = ViewScope::open();
    let mut view = ctx.blog_list(scope, ListQuery::search(search));
    view.load().await?;
    settled(&mut view.articles)?;

    if let Some(tag) = tag {
        view.toggle_tag(&tag.trim().to_lowercase());
    }

    let tags = view.tags();
    if !tags.is_empty() {
        println!("Tags: {}\n", tags.join(", "));
    }
    print_articles(&view.visible(), view.articles.using_fallback);
    Ok(())
}

pub async fn landing(ctx: &AppContext) -> Result<()> {
    let (_guard, scope) = ViewScope::open();
    let mut view = ctx.landing(scope);
    view.load().await?;
    settled(&mut view.articles)?;

    if view.articles.using_fallback {
        println!("(Backend unavailable, showing demo stories)\n");
    }
    for article in view.visible() {
        print_article_line(article);
        println!("  {}\n", article.excerpt(EXCERPT_CHARS));
    }
    Ok(())
}

pub async fn read_blog(ctx: &AppContext, slug: &str) -> Result<()> {
    let (_guard, scope) = ViewScope::open();
    let mut view = ctx.blog_detail(scope, slug);
    view.load().await?;
    settled(&mut view.article)?;

    let Some(article) = view.article.data.as_ref() else {
        println!("Article not found.");
        return Ok(());
    };

    if view.article.using_fallback {
        println!("(Demo story)\n");
    }
    println!("{}", article.title);
    println!(
        "by {} (@{}) | {} | {} min read",
        article.author.name,
        article.author.username,
        article.created_at.format("%B %-d, %Y"),
        article.reading_time()
    );
    if !article.tags.is_empty() {
        println!("tags: {}", article.tags.join(", "));
    }
    println!("\n{}\n", article.excerpt(usize::MAX));

    let like = view.like_state();
    println!(
        "{} {} likes",
        if like.liked { "♥" } else { "♡" },
        like.count
    );

    if let Some(e) = view.comments.error.take() {
        eprintln!("Could not load comments: {}", e.user_message());
    } else {
        println!("{} comments", view.comments.data.len());
        for comment in &view.comments.data {
            println!(
                "  [{}] {}: {}",
                comment.author.initials(),
                comment.author.name,
                comment.content
            );
        }
    }
    Ok(())
}

pub async fn set_like(ctx: &AppContext, slug: &str, liked: bool) -> Result<()> {
    let (_guard, scope) = ViewScope::open();
    let mut view = ctx.blog_detail(scope, slug);
    view.load().await?;
    settled(&mut view.article)?;

    if view.like_state().liked == liked {
        println!("Nothing to do");
        return Ok(());
    }
    view.toggle_like().await?;

    let like = view.like_state();
    println!(
        "{} ({} likes)",
        if like.liked { "Liked" } else { "Unliked" },
        like.count
    );
    Ok(())
}

pub async fn comment(ctx: &AppContext, slug: &str, text: &str) -> Result<()> {
    let (_guard, scope) = ViewScope::open();
    let mut view = ctx.blog_detail(scope, slug);
    view.load().await?;
    settled(&mut view.article)?;

    match view.add_comment(text).await? {
        Some(_) => println!("Comment posted"),
        None => println!("Comment is empty"),
    }
    Ok(())
}

pub async fn login(ctx: &AppContext, email: &str, password: &str) -> Result<()> {
    let session = ctx
        .session
        .login(&ctx.api, &Credentials::new(email, password))
        .await?;
    if let Some(user) = session.user() {
        println!("Signed in as {} (@{})", user.name, user.username);
    }
    Ok(())
}

pub async fn register(ctx: &AppContext, registration: Registration) -> Result<()> {
    let session = ctx.session.register(&ctx.api, registration).await?;
    if let Some(user) = session.user() {
        println!("Welcome, {} (@{})", user.name, user.username);
    }
    Ok(())
}

pub fn logout(ctx: &AppContext) {
    ctx.session.logout();
    println!("Signed out");
}

pub fn whoami(ctx: &AppContext) {
    match ctx.session.current().user() {
        Some(user) => println!("{} (@{}) <{}>", user.name, user.username, user.email),
        None => println!("Not signed in"),
    }
}

pub async fn feed(ctx: &AppContext) -> Result<()> {
    let (_guard, scope) = ViewScope::open();
    let mut view = ctx.feed(scope);
    view.load().await?;
    settled(&mut view.articles)?;

    let articles: Vec<&Article> = view.articles.data.iter().collect();
    if articles.is_empty() {
        println!("Your feed is empty. Follow some authors to fill it.");
        return Ok(());
    }
    print_articles(&articles, false);
    Ok(())
}

pub async fn notifications(ctx: &AppContext, read: Option<&str>, all: bool) -> Result<()> {
    let (_guard, scope) = ViewScope::open();
    let mut view = ctx.notifications(scope);
    view.load().await?;
    settled(&mut view.items)?;

    if let Some(id) = read {
        view.mark_read(id).await?;
    }
    if all {
        let marked = view.mark_all_read().await?;
        println!("Marked {} as read", marked);
    }

    if view.items.data.is_empty() {
        println!("No notifications");
        return Ok(());
    }
    println!("{} unread\n", view.unread_count());
    for n in &view.items.data {
        println!(
            "{} {}  {}  [{}]",
            if n.read { " " } else { "●" },
            n.created_at.format("%Y-%m-%d"),
            n.summary(),
            n.id
        );
    }
    Ok(())
}

pub async fn profile(ctx: &AppContext, username: &str) -> Result<()> {
    let (_guard, scope) = ViewScope::open();
    let mut view = ctx.profile(scope, username);
    view.load().await?;
    settled(&mut view.profile)?;

    let Some(data) = view.profile.data.as_ref() else {
        println!("Author not found.");
        return Ok(());
    };

    println!("{} (@{})", data.user.name, data.user.username);
    if !data.user.bio.is_empty() {
        println!("{}", data.user.bio);
    }
    println!(
        "{} articles | {} followers | {} following",
        data.articles.len(),
        data.user.followers.len(),
        data.user.following.len()
    );
    if view.following() {
        println!("You follow this author");
    }
    println!();
    for article in &data.articles {
        print_article_line(article);
    }
    Ok(())
}

pub async fn set_follow(ctx: &AppContext, username: &str, follow: bool) -> Result<()> {
    let (_guard, scope) = ViewScope::open();
    let mut view = ctx.profile(scope, username);
    view.load().await?;
    settled(&mut view.profile)?;

    if view.following() == follow {
        println!("Nothing to do");
        return Ok(());
    }
    view.toggle_follow().await?;
    println!(
        "{} @{}",
        if follow { "Following" } else { "Unfollowed" },
        username
    );
    Ok(())
}

pub async fn create(
    ctx: &AppContext,
    title: &str,
    content: &str,
    tags: &[String],
    publish: bool,
) -> Result<()> {
    let (_guard, scope) = ViewScope::open();
    let mut editor = ctx.editor(scope);
    editor.draft = Draft::new(title, content);
    add_tags(&mut editor.draft, tags);

    let article = if publish {
        editor.publish_new().await?
    } else {
        editor.save_draft().await?
    };
    println!("{} {} ({})", article.status.as_str(), article.title, article.id);
    Ok(())
}

pub async fn edit(
    ctx: &AppContext,
    id: &str,
    title: Option<&str>,
    content: Option<&str>,
    tags: &[String],
    publish: bool,
) -> Result<()> {
    let (_guard, scope) = ViewScope::open();
    let mut editor = ctx.editor(scope);
    editor.load(id).await?;
    settled(&mut editor.article)?;

    if let Some(title) = title {
        editor.draft.title = title.to_string();
    }
    if let Some(content) = content {
        editor.draft.content = content.to_string();
    }
    if !tags.is_empty() {
        let current: Vec<String> = editor.draft.tags().to_vec();
        for tag in &current {
            editor.draft.remove_tag(tag);
        }
        add_tags(&mut editor.draft, tags);
    }

    let article = if publish {
        editor.publish_existing().await?
    } else {
        editor.save_changes().await?
    };
    println!("Saved {} ({})", article.title, article.status.as_str());
    Ok(())
}

pub async fn publish(ctx: &AppContext, id: &str) -> Result<()> {
    let (_guard, scope) = ViewScope::open();
    let mut editor = ctx.editor(scope);
    editor.load(id).await?;
    settled(&mut editor.article)?;

    let article = editor.publish_existing().await?;
    println!("Published {} ({})", article.title, article.slug);
    Ok(())
}

pub async fn archive(ctx: &AppContext, id: &str) -> Result<()> {
    let (_guard, scope) = ViewScope::open();
    let mut editor = ctx.editor(scope);
    editor.load(id).await?;
    settled(&mut editor.article)?;

    editor.archive().await?;
    println!("Archived {}", id);
    Ok(())
}

pub async fn delete(ctx: &AppContext, id: &str) -> Result<()> {
    let (_guard, scope) = ViewScope::open();
    let mut editor = ctx.editor(scope);
    editor.load(id).await?;
    settled(&mut editor.article)?;

    editor.delete().await?;
    println!("Deleted {}", id);
    Ok(())
}

pub fn theme(ctx: &AppContext, value: Option<&str>) -> Result<()> {
    let theme = match value {
        None => ctx.theme.current(),
        Some("toggle") => ctx.theme.toggle(),
        Some(raw) => {
            let theme: Theme = raw.parse().map_err(AksharError::Validation)?;
            ctx.theme.set(theme)
        }
    };
    println!("Theme: {}", theme);
    Ok(())
}

fn add_tags(draft: &mut Draft, tags: &[String]) {
    for tag in tags {
        if !draft.add_tag(tag) {
            eprintln!("Skipped tag {:?}", tag);
        }
    }
}
