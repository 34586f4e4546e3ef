use std::fmt;

/// One channel row of a playlist.
///
/// Built by the parser and read-only afterwards. `genre` is the label of the
/// closest preceding genre marker, or empty when none was seen yet.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Entry {
    /// 1-based line in the source text.
    pub line_number: usize,
    pub name: String,
    /// Absolute `http` or `https` URI.
    pub url: String,
    pub genre: String,
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (line {})", self.name, self.line_number)
    }
}
