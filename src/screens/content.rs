//! Where browser screens get their items from

use anyhow::Result;

use crate::config::{LibraryEntry, PlaybackMode};
use crate::nav::state::{self, StateObject};
use crate::nav::widgets::GridItem;

pub trait ContentSource {
    /// All items (every page) for `state`
    fn items(&self, state: Option<&StateObject>) -> Result<Vec<GridItem>>;
}

/// Fixed item list
#[derive(Debug, Clone, Default)]
pub struct StaticContent {
    items: Vec<GridItem>,
}

impl StaticContent {
    pub fn new(items: Vec<GridItem>) -> Self {
        Self { items }
    }
}

impl ContentSource for StaticContent {
    fn items(&self, _state: Option<&StateObject>) -> Result<Vec<GridItem>> {
        Ok(self.items.clone())
    }
}

/// Configured library entries of one mode, optionally narrowed to the genre
/// named in the incoming state
#[derive(Debug, Clone)]
pub struct LibraryContent {
    mode: PlaybackMode,
    entries: Vec<LibraryEntry>,
}

impl LibraryContent {
    pub fn new(mode: PlaybackMode, entries: Vec<LibraryEntry>) -> Self {
        Self { mode, entries }
    }
}

impl ContentSource for LibraryContent {
    fn items(&self, state: Option<&StateObject>) -> Result<Vec<GridItem>> {
        let genre = state.and_then(|s| s.get_str(state::GENRE));

        let items = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| match genre {
                Some(g) => entry.genre.as_deref() == Some(g),
                None => true,
            })
            .map(|(index, entry)| {
                let mut item_state = StateObject::new()
                    .with(state::SOURCE, self.mode.key())
                    .with(state::NAME, entry.name.as_str())
                    .with(state::INDEX, index);
                if let Some(url) = &entry.url {
                    let key = match self.mode {
                        PlaybackMode::Files | PlaybackMode::Audiobooks => state::FILE_NAME,
                        _ => state::URL,
                    };
                    item_state.set(key, url.as_str());
                }
                if let Some(genre) = &entry.genre {
                    item_state.set(state::GENRE, genre.as_str());
                }
                GridItem::new(entry.name.as_str(), item_state).with_id(format!("{}:{}", self.mode.key(), index))
            })
            .collect();
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, genre: &str) -> LibraryEntry {
        LibraryEntry {
            name: name.to_string(),
            url: Some(format!("http://{}.example", name)),
            genre: Some(genre.to_string()),
        }
    }

    #[test]
    fn test_library_filters_by_genre() {
        let content = LibraryContent::new(
            PlaybackMode::Radio,
            vec![entry("a", "jazz"), entry("b", "rock"), entry("c", "jazz")],
        );

        assert_eq!(content.items(None).unwrap().len(), 3);

        let jazz = content
            .items(Some(&StateObject::new().with(state::GENRE, "jazz")))
            .unwrap();
        let names: Vec<_> = jazz.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(names, vec!["a", "c"]);
        // original position survives filtering
        assert_eq!(jazz[1].state.get_index(), Some(2));
        assert_eq!(jazz[1].state.get_str(state::URL), Some("http://c.example"));
    }

    #[test]
    fn test_file_entries_carry_file_name() {
        let content = LibraryContent::new(PlaybackMode::Files, vec![entry("song", "pop")]);
        let items = content.items(None).unwrap();
        assert_eq!(items[0].state.get_str(state::FILE_NAME), Some("http://song.example"));
        assert_eq!(items[0].id, "files:0");
    }
}
