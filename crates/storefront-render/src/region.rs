//! The area of a page a [`crate::CatalogView`] owns.

/// A replaceable block of markup. Each call discards the previous content.
pub trait ContentRegion {
    fn replace(&mut self, html: String);
}

/// In-memory region holding the current content.
///
/// [`MemoryRegion::recording`] additionally keeps every write, oldest first,
/// for inspecting the loading → result sequence.
#[derive(Debug, Default, Clone)]
pub struct MemoryRegion {
    current: String,
    history: Option<Vec<String>>,
}

impl MemoryRegion {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn recording() -> Self {
        Self {
            current: String::new(),
            history: Some(Vec::new()),
        }
    }

    /// Current content, empty before the first write.
    #[must_use]
    pub fn current(&self) -> &str {
        &self.current
    }

    /// Every write so far; always empty unless built with [`Self::recording`].
    #[must_use]
    pub fn history(&self) -> &[String] {
        self.history.as_deref().unwrap_or_default()
    }
}

impl ContentRegion for MemoryRegion {
    fn replace(&mut self, html: String) {
        if let Some(history) = self.history.as_mut() {
            history.push(html.clone());
        }
        self.current = html;
    }
}
