//! rss_items - Summarize the items of an RSS 2.0 / Media RSS feed.
//!
//! # Usage
//!
//! ```bash
//! rss_items [OPTIONS] <FILENAME>
//! ```
//!
//! # Examples
//!
//! ```bash
//! # List item titles and links
//! rss_items feed.xml
//!
//! # Include media attachments and scraped image URLs
//! rss_items --media --images feed.xml
//!
//! # Read from stdin and re-emit the feed as normalized RSS
//! curl -s https://example.com/feed.xml | rss_items --rewrite -
//!
//! # Show decoder diagnostics
//! rss_items --debug feed.xml
//! ```

use std::fs::File;
use std::io::{self, BufRead, BufReader};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use mediarss_rs::objects::{Channel, Item};
use mediarss_rs::reader::parse;
use mediarss_rs::writer::{RssWriter, WriterConfig};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Summarize the items of an RSS feed.
#[derive(Parser, Debug)]
#[command(name = "rss_items")]
#[command(version = VERSION)]
#[command(about = "Summarize the items of an RSS 2.0 / Media RSS feed")]
struct Args {
    /// Feed file to read, or `-` for stdin
    filename: String,

    /// List media:content, media:thumbnail and media:credit entries
    #[arg(long)]
    media: bool,

    /// List image URLs found in descriptions, content and media:text
    #[arg(long)]
    images: bool,

    /// Re-emit the decoded feed as RSS instead of a summary
    #[arg(long)]
    rewrite: bool,

    /// Output compact XML (no indentation), with --rewrite
    #[arg(long)]
    compact: bool,

    /// Enable debug output
    ///
    /// Turns on decoder tracing at debug level unless RUST_LOG is set.
    #[arg(long)]
    debug: bool,
}

fn open_input(filename: &str) -> io::Result<Box<dyn BufRead>> {
    if filename == "-" {
        Ok(Box::new(BufReader::new(io::stdin())))
    } else {
        Ok(Box::new(BufReader::new(File::open(filename)?)))
    }
}

fn print_item(index: usize, item: &Item, args: &Args) {
    println!(
        "[{}] {}",
        index + 1,
        item.title.as_deref().unwrap_or("(untitled)")
    );
    if let Some(ref link) = item.link {
        println!("    link: {}", link);
    }
    if let Some(ref date) = item.pub_date {
        println!("    date: {}", date.to_rfc2822());
    }

    if args.media {
        for content in &item.media_contents {
            let url = content.url.as_ref().map(|u| u.as_str()).unwrap_or("-");
            let marker = if content.is_default { " (default)" } else { "" };
            println!(
                "    content: {} [{}] {}{}",
                url,
                content.medium.as_deref().unwrap_or("?"),
                content.size,
                marker
            );
        }
        for thumbnail in &item.media_thumbnails {
            let url = thumbnail.url.as_ref().map(|u| u.as_str()).unwrap_or("-");
            println!("    thumbnail: {} {}", url, thumbnail.size);
        }
        for credit in &item.media_credits {
            match credit.role {
                Some(ref role) => println!("    credit: {} ({})", credit.value, role),
                None => println!("    credit: {}", credit.value),
            }
        }
    }

    if args.images {
        let images = item
            .images_from_item_description()
            .into_iter()
            .chain(item.images_from_content())
            .chain(item.images_from_media_text());
        for image in images {
            println!("    image: {}", image);
        }
    }
}

fn print_summary(channel: &Channel, args: &Args) {
    println!("{}", channel.title);
    if let Some(ref link) = channel.link {
        println!("{}", link);
    }
    println!("{} item(s)", channel.item_count());
    println!();

    for (index, item) in channel.iter_items().enumerate() {
        print_item(index, item, args);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let filter = if args.debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    tracing::debug!(input = %args.filename, "Reading feed");

    let channel = match parse(open_input(&args.filename)?) {
        Ok(channel) => channel,
        Err(e) => {
            eprintln!("Error parsing feed: {}", e);
            return Err(e.into());
        }
    };

    if args.rewrite {
        let config = if args.compact {
            WriterConfig::compact()
        } else {
            WriterConfig::default()
        };
        let xml = RssWriter::with_config(config).write_to_string(&channel)?;
        println!("{}", xml);
    } else {
        print_summary(&channel, &args);
    }

    Ok(())
}
