use std::collections::VecDeque;

/// Separator used when the transcript is handed to the storyteller.
pub const TRANSCRIPT_SEPARATOR: &str = " -> ";

/// Ordered history of narrated text and player choices.
///
/// With a limit set, only the most recent entries are kept.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    entries: VecDeque<String>,
    limit: Option<usize>,
}

impl Transcript {
    pub fn new(limit: Option<usize>) -> Self {
        Self {
            entries: VecDeque::new(),
            limit,
        }
    }

    pub fn push(&mut self, entry: impl Into<String>) {
        self.entries.push_back(entry.into());

        if let Some(limit) = self.limit {
            while self.entries.len() > limit {
                self.entries.pop_front();
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }
}
