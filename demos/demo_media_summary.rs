//! demo_media_summary - Summarize the media attachments of a feed by medium.
//!
//! Reads an RSS file and groups every `media:content` entry by its `medium`
//! attribute, reporting count, total file size, total duration and how many
//! entries are flagged as the item's default.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example demo_media_summary <feed.xml>
//! ```

use std::collections::BTreeMap;
use std::env;
use std::fs::File;
use std::io::BufReader;

use mediarss_rs::objects::MediaContent;
use mediarss_rs::reader::parse;

/// Statistics accumulator for a single medium.
#[derive(Default)]
struct MediumStats {
    count: u64,
    bytes: u64,
    seconds: u64,
    defaults: u64,
}

impl MediumStats {
    fn add(&mut self, content: &MediaContent) {
        self.count += 1;
        self.bytes += content.file_size;
        self.seconds += content.duration;
        if content.is_default {
            self.defaults += 1;
        }
    }

    fn average_bytes(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.bytes as f64 / self.count as f64
        }
    }
}

/// Returns the grouping key for a media entry.
///
/// Entries without a `medium` attribute fall back to the major part of their
/// MIME type, then to an empty key.
fn medium_key(content: &MediaContent) -> String {
    if let Some(ref medium) = content.medium {
        return medium.to_lowercase();
    }
    content
        .mime_type
        .as_deref()
        .and_then(|t| t.split('/').next())
        .map(str::to_lowercase)
        .unwrap_or_default()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <feed.xml>", args[0]);
        std::process::exit(1);
    }

    let file = File::open(&args[1])?;
    let channel = match parse(BufReader::new(file)) {
        Ok(channel) => channel,
        Err(e) => {
            eprintln!("Error parsing feed: {}", e);
            return Err(e.into());
        }
    };

    let mut stats: BTreeMap<String, MediumStats> = BTreeMap::new();
    for content in channel.iter_media_contents() {
        stats.entry(medium_key(content)).or_default().add(content);
    }

    println!(
        "{:>10}    {:>8} {:>12} {:>12} {:>10} {:>8}",
        "Medium", "Count", "Bytes", "Average", "Seconds", "Default"
    );

    for (medium, s) in &stats {
        let display = if medium.is_empty() { "(none)" } else { medium };
        println!(
            "{:>10}    {:>8} {:>12} {:>12.1} {:>10} {:>8}",
            display,
            s.count,
            s.bytes,
            s.average_bytes(),
            s.seconds,
            s.defaults
        );
    }

    Ok(())
}
