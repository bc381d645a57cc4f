use nutype::nutype;

/// Free-text filter, folded to lowercase once on construction.
///
/// An empty query matches everything.
#[nutype(
    sanitize(lowercase),
    derive(Debug, Clone, PartialEq, Eq, Default, AsRef, Display),
    default = ""
)]
pub struct SearchText(String);

impl SearchText {
    pub fn is_empty(&self) -> bool {
        self.as_ref().is_empty()
    }

    /// Case-insensitive substring match.
    pub fn matches(&self, haystack: &str) -> bool {
        self.is_empty() || haystack.to_lowercase().contains(self.as_ref())
    }
}

impl From<&str> for SearchText {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}
