use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use chrono::Utc;
use colored::Colorize;
use feed_client::ApiClient;
use feed_core::{display, EmptyReason, FeedState, Post, TruncationPolicy};
use serde_json::json;

/// Renders one post card. The featured (first) position gets a marker and
/// a larger truncation threshold from the policy.
fn render_post(post: &Post, index: usize, state: &FeedState, policy: TruncationPolicy) {
    let max_len = policy.max_for_position(index);
    let expanded = state.is_expanded(post.id);
    let truncatable = display::needs_truncation(&post.body, max_len);

    let marker = if index == 0 && policy.featured_max != policy.regular_max {
        "★ "
    } else {
        ""
    };
    let age = display::format_relative_age(post.published_at, Utc::now());

    println!(
        "{}{} {}  {}",
        marker,
        format!("#{}", post.id).dimmed(),
        post.title.bold(),
        age.dimmed()
    );
    if post.image.is_some() {
        // Пост без картинки не рисует ничего вместо неё
        println!("   {}", "[image attached]".dimmed());
    }

    let body = if expanded || !truncatable {
        post.body.clone()
    } else {
        display::truncate(&post.body, max_len)
    };
    if !body.is_empty() {
        println!("   {}", body);
    }

    if truncatable {
        let hint = if expanded {
            format!("read less: t {}", post.id)
        } else {
            format!("read more: t {}", post.id)
        };
        println!("   {}", hint.blue());
    }
    println!();
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

fn render_empty(reason: EmptyReason) {
    match reason {
        EmptyReason::NoPosts => {
            println!("No articles available yet. Refresh to check again.");
        }
        EmptyReason::NoMatches => {
            println!("No articles match your search.");
        }
    }
}

/// Renders the current page of the feed with its header and pagination
/// footer.
pub fn render_page(state: &FeedState, policy: TruncationPolicy) {
    let found = state.visible_posts().len();
    if state.query().is_empty() {
        println!("📰 {} article{}", found, plural(found));
    } else {
        println!(
            "🔎 {} article{} found for \"{}\"",
            found,
            plural(found),
            state.query()
        );
    }
    println!();

    if let Some(reason) = state.empty_reason() {
        render_empty(reason);
        return;
    }

    for (index, post) in state.current_page().iter().enumerate() {
        render_post(post, index, state, policy);
    }

    if state.total_pages() > 1 {
        let prev = if state.page() > 1 { "p: previous  " } else { "" };
        let next = if state.page() < state.total_pages() {
            "n: next"
        } else {
            ""
        };
        println!(
            "— page {} of {} —  {}{}",
            state.page(),
            state.total_pages(),
            prev,
            next
        );
    }
}

/// The home view: the most recent posts with the featured card first.
pub fn render_recent(state: &FeedState, count: usize, policy: TruncationPolicy) {
    println!("📰 Recent articles");
    println!();

    let recent = state.recent(count);
    if recent.is_empty() {
        render_empty(EmptyReason::NoPosts);
        return;
    }
    for (index, post) in recent.iter().enumerate() {
        render_post(post, index, state, policy);
    }
}

/// Machine-readable rendition of the current page, for scripting.
pub fn page_json(state: &FeedState) -> serde_json::Value {
    json!({
        "query": state.query(),
        "page": state.page(),
        "total_pages": state.total_pages(),
        "found": state.visible_posts().len(),
        "posts": state
            .current_page()
            .iter()
            .map(|p| json!({
                "id": p.id,
                "title": p.title,
                "body": p.body,
                "author_id": p.author_id,
                "published_at": p.published_at.to_rfc3339(),
                "has_image": p.image.is_some(),
                "expanded": state.is_expanded(p.id),
            }))
            .collect::<Vec<_>>(),
    })
}

fn print_help() {
    println!("Commands:");
    println!("  n            next page");
    println!("  p            previous page");
    println!("  <number>     jump to page");
    println!("  /<text>      search titles and bodies (`/` alone clears)");
    println!("  t <id>       expand/collapse a post");
    println!("  r            refresh the feed");
    println!("  h            this help");
    println!("  q            quit");
}

/// Interactive feed browser. One fetch is ever in flight: each refresh is
/// awaited before the next command is read. A failed refresh keeps the
/// last good batch on screen.
pub async fn browse(api: &ApiClient, page_size: usize) -> Result<()> {
    let mut state = FeedState::new(page_size);

    match api.fetch_posts().await {
        Ok(posts) => state.apply_fetch(posts),
        Err(e) => eprintln!("{} could not load the feed: {}", "✗".red(), e),
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        render_page(&state, TruncationPolicy::HOME);

        print!("feed> ");
        io::stdout().flush().context("Failed to flush stdout")?;

        let line = match lines.next() {
            Some(line) => line.context("Failed to read command")?,
            None => break,
        };
        let input = line.trim();

        match input {
            "" => {}
            "q" | "quit" => break,
            "h" | "?" | "help" => print_help(),
            "n" => {
                if !state.set_page(state.page() + 1) {
                    println!("{}", "Already on the last page".yellow());
                }
            }
            "p" => {
                if state.page() == 1 || !state.set_page(state.page() - 1) {
                    println!("{}", "Already on the first page".yellow());
                }
            }
            "r" => match api.fetch_posts().await {
                Ok(posts) => {
                    state.apply_fetch(posts);
                    println!("{} feed refreshed", "✓".green());
                }
                Err(e) => {
                    // Старые посты остаются на экране
                    eprintln!("{} refresh failed, showing cached feed: {}", "✗".red(), e);
                }
            },
            _ => {
                if let Some(query) = input.strip_prefix('/') {
                    state.set_query(query.trim());
                } else if let Some(raw) = input.strip_prefix("t ") {
                    match raw.trim().parse::<i64>() {
                        Ok(id) => state.toggle_expanded(id),
                        Err(_) => println!("{}", "Usage: t <post id>".yellow()),
                    }
                } else if let Ok(page) = input.parse::<usize>() {
                    if !state.set_page(page) {
                        println!(
                            "{}",
                            format!("No such page (1-{})", state.total_pages()).yellow()
                        );
                    }
                } else {
                    println!("Unknown command {:?}, try `h`", input);
                }
            }
        }
    }

    Ok(())
}
