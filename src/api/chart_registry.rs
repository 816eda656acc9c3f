#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartEntry<H> {
    pub id: String,
    pub handle: H,
}

/// Chart handles retained for the lifetime of a page.
///
/// Append-only while the page is loaded; entries leave only through
/// `dispose_all` on teardown.
#[derive(Debug)]
pub struct ChartRegistry<H> {
    entries: Vec<ChartEntry<H>>,
}

impl<H> Default for ChartRegistry<H> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<H> ChartRegistry<H> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, id: impl Into<String>, handle: H) {
        self.entries.push(ChartEntry {
            id: id.into(),
            handle,
        });
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.id.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChartEntry<H>> {
        self.entries.iter()
    }

    /// Removes every entry in registration order.
    pub fn dispose_all(&mut self) -> Vec<ChartEntry<H>> {
        std::mem::take(&mut self.entries)
    }
}
