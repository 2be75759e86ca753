use anyhow::{Context, Result};
use blogview::config::Config;
use blogview::post::Store;
use blogview::site;
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;

/// Renders the blog listing page and Atom feed for my personal site.
#[derive(Parser)]
#[command(name = "blogview", version, about)]
struct Args {
    /// Directory to search (upward) for `blog.yaml`.
    #[arg(short, long, default_value = ".")]
    project: PathBuf,

    /// Output directory for `blog.html` and `feed.atom`.
    #[arg(short, long, default_value = "public")]
    output: PathBuf,

    /// Post data file to use instead of the built-in one.
    #[arg(long)]
    posts: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::from_directory(&args.project)?;

    let store = match &args.posts {
        Some(path) => {
            let input = std::fs::read_to_string(path)
                .with_context(|| format!("Reading posts file `{}`", path.display()))?;
            Store::from_yaml(&input)
                .with_context(|| format!("Loading posts file `{}`", path.display()))?
        }
        None => Store::builtin().context("Loading built-in posts")?,
    };
    println!("{} {} posts", "loaded".green().bold(), store.len());

    site::build_site(&config, &store, &args.output)
        .with_context(|| format!("Building site into `{}`", args.output.display()))?;
    println!(
        "{} {}",
        "wrote".green().bold(),
        args.output.join("blog.html").display()
    );
    println!(
        "{} {}",
        "wrote".green().bold(),
        args.output.join("feed.atom").display()
    );
    Ok(())
}
