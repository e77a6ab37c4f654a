use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::app::{AppContext, Result};
use crate::domain::time::{format_time_ago, parse_timestamp};
use crate::domain::{Card, Comment, MixedItem, Post, Record, SortOption};

pub async fn show_thread(
    ctx: &AppContext,
    url: &str,
    sort: Option<SortOption>,
    json: bool,
) -> Result<()> {
    let page = ctx.scrape_thread(url, sort).await?;

    if json {
        return print_json(&page);
    }

    let now = Utc::now();
    match page.post {
        Some(ref post) => println!("{}", post_line(post, now)),
        None => println!("(post not found)"),
    }
    if let Some(ref body) = page.post_body {
        println!("\n{}", body);
    }

    if page.comments.is_empty() {
        println!("\nNo comments");
        return Ok(());
    }

    println!();
    for comment in &page.comments {
        println!("{}", comment_block(comment, now));
    }

    Ok(())
}

pub async fn show_post(ctx: &AppContext, url: &str, json: bool) -> Result<()> {
    let post = ctx.scrape_post(url).await?;

    if json {
        return print_json(&post);
    }

    println!("{}", post_line(&post, Utc::now()));
    if !post.media_url.is_empty() {
        println!("  {}", post.media_url);
    }
    Ok(())
}

pub async fn show_profile(
    ctx: &AppContext,
    username: &str,
    filter: Option<&str>,
    after: Option<&str>,
    json: bool,
) -> Result<()> {
    let items = ctx.scrape_profile(username, filter, after).await?;

    if json {
        return print_json(&items);
    }

    if items.is_empty() {
        println!("No activity for {}", username);
        return Ok(());
    }

    let now = Utc::now();
    for item in &items {
        match item {
            MixedItem::Post { post, .. } => println!("{}", post_line(post, now)),
            MixedItem::Comment { comment, .. } => println!("{}", comment_block(comment, now)),
        }
    }

    Ok(())
}

pub async fn show_cards(
    ctx: &AppContext,
    username: &str,
    filter: Option<&str>,
    after: Option<&str>,
    json: bool,
) -> Result<()> {
    let items = ctx.scrape_profile(username, filter, after).await?;
    let (cards, report) = ctx.enrich_cards(&items).await;

    if json {
        #[derive(Serialize)]
        struct CardsOutput<'a> {
            cards: &'a [Card<MixedItem>],
            requested: usize,
            enriched: usize,
        }

        return print_json(&CardsOutput {
            cards: &cards,
            requested: report.requested,
            enriched: report.results.len(),
        });
    }

    for card in &cards {
        println!("{}", card_line(card, Utc::now()));
    }

    if report.is_degraded() {
        eprintln!(
            "Only {} of {} items could be loaded",
            report.results.len(),
            report.requested
        );
    }
    println!("{} cards", cards.len());

    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn ago(raw: &str, now: DateTime<Utc>) -> String {
    match parse_timestamp(raw) {
        Some(_) => format!("{} ago", format_time_ago(raw, now)),
        None => format_time_ago(raw, now),
    }
}

fn post_line(post: &Post, now: DateTime<Utc>) -> String {
    let mut line = format!(
        "[{}] {} ({} points, {} comments)\n  r/{} by u/{} {}",
        post.post_type.as_str(),
        post.title,
        post.votes,
        post.comments_count,
        post.subreddit,
        post.author,
        ago(&post.time, now)
    );
    if !post.tag.is_empty() {
        line.push_str(&format!(" [{}]", post.tag));
    }
    line
}

fn comment_block(comment: &Comment, now: DateTime<Utc>) -> String {
    let indent = "  ".repeat(comment.depth);
    let pin = if comment.stickied { " (pinned)" } else { "" };
    let mut block = format!(
        "{}u/{} | {} | {}{}",
        indent,
        comment.author,
        comment.score,
        ago(&comment.time, now),
        pin
    );
    for line in comment.body.lines() {
        block.push('\n');
        block.push_str(&indent);
        block.push_str("  ");
        block.push_str(line);
    }
    block
}

fn card_line<R: Record>(card: &Card<R>, now: DateTime<Utc>) -> String {
    format!(
        "{}\n  by u/{} | {} | {}",
        card.title,
        card.author,
        ago(card.record.time_raw(), now),
        card.record.direct_url()
    )
}
