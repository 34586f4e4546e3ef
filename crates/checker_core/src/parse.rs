use std::fs;
use std::io;
use std::iter::Enumerate;
use std::path::{Path, PathBuf};
use std::str::Lines;

use thiserror::Error;
use url::Url;

use crate::Entry;

/// Suffix that turns a line into a genre marker.
pub const GENRE_MARKER: &str = ",#genre#";

#[derive(Debug, Error)]
pub enum InputError {
    #[error("cannot read playlist {path:?}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Read and parse a playlist file.
///
/// Fails only when the file as a whole cannot be read (missing, permission
/// denied, not UTF-8). Malformed lines are skipped.
pub fn read_playlist(path: &Path) -> Result<Vec<Entry>, InputError> {
    let text = fs::read_to_string(path).map_err(|source| InputError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_playlist(&text))
}

/// Parse playlist text into entries, in source order.
pub fn parse_playlist(text: &str) -> Vec<Entry> {
    PlaylistParser::new(text).collect()
}

/// Lazy entry iterator over one playlist text.
///
/// Genre state lives inside the parser and starts empty. Create one parser
/// per file so a genre never leaks into the next file's entries.
pub struct PlaylistParser<'a> {
    lines: Enumerate<Lines<'a>>,
    genre: String,
}

impl<'a> PlaylistParser<'a> {
    pub fn new(text: &'a str) -> Self {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        Self {
            lines: text.lines().enumerate(),
            genre: String::new(),
        }
    }

    /// Genre that the next channel line would inherit.
    pub fn current_genre(&self) -> &str {
        &self.genre
    }
}

impl Iterator for PlaylistParser<'_> {
    type Item = Entry;

    fn next(&mut self) -> Option<Entry> {
        for (index, raw) in self.lines.by_ref() {
            match classify_line(raw) {
                Line::Genre(label) => self.genre = label.to_string(),
                Line::Channel { name, url } => {
                    return Some(Entry {
                        line_number: index + 1,
                        name: name.to_string(),
                        url: url.to_string(),
                        genre: self.genre.clone(),
                    });
                }
                Line::Skip => {}
            }
        }
        None
    }
}

enum Line<'a> {
    Genre(&'a str),
    Channel { name: &'a str, url: &'a str },
    Skip,
}

fn classify_line(raw: &str) -> Line<'_> {
    let line = raw.trim();
    if line.is_empty() {
        return Line::Skip;
    }
    if let Some(label) = line.strip_suffix(GENRE_MARKER) {
        return Line::Genre(label.trim());
    }
    if !(line.contains("http://") || line.contains("https://")) {
        return Line::Skip;
    }
    let Some((name, url)) = line.split_once(',') else {
        return Line::Skip;
    };
    let url = url.trim();
    if !is_http_uri(url) {
        return Line::Skip;
    }
    Line::Channel {
        name: name.trim(),
        url,
    }
}

fn is_http_uri(candidate: &str) -> bool {
    Url::parse(candidate)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
        .unwrap_or(false)
}
