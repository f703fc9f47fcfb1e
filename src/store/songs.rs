//! Song documents and the song list index.
//!
//! Each song lives at `data/songs/<id>.json`; `data/songs.json` lists the
//! metadata of every song so the list view needs a single read.

use chrono::Utc;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

use crate::constants::search::MIN_FUZZY_SCORE;
use crate::constants::store::{SONGS_DIR, SONGS_INDEX_PATH};
use crate::error::{Error, Result};
use crate::song::{slugify, Song, SongMetadata, SongsList};
use crate::store::DocumentStore;
use crate::types::{Revision, SongId};

/// Reads and writes songs through a [`DocumentStore`].
pub struct SongRepository<S> {
    store: S,
}

impl<S: DocumentStore> SongRepository<S> {
    /// Wrap `store`.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// All listed songs. A missing index means no songs.
    pub async fn list(&self) -> Result<Vec<SongMetadata>> {
        Ok(self.read_index().await?.0.songs)
    }

    /// Fetch one song.
    pub async fn get(&self, id: &SongId) -> Result<Option<Song>> {
        let path = song_path(id);
        let Some(doc) = self.store.get(&path).await? else {
            return Ok(None);
        };
        let song = serde_json::from_str(&doc.content)
            .map_err(|e| Error::parse(format!("Song {id}: {e}"), None))?;
        Ok(Some(song))
    }

    /// Store a new song and list it.
    ///
    /// An empty id is derived from the title. Fails if the id is already
    /// listed.
    pub async fn create(&self, mut song: Song) -> Result<Song> {
        song.validate()?;
        if song.id.is_empty() {
            song.id = slugify(&song.title);
        }

        let (mut index, index_rev) = self.read_index().await?;
        if index.songs.iter().any(|m| m.id == song.id) {
            return Err(Error::AlreadyExists(song.id.to_string()));
        }

        let now = Utc::now();
        song.created_at = now;
        song.updated_at = now;

        let json = serde_json::to_string_pretty(&song)?;
        self.store
            .put(&song_path(&song.id), &json, None, &format!("Create song: {}", song.title))
            .await?;

        index.songs.push(song.metadata());
        self.write_index(&index, index_rev.as_ref()).await?;

        tracing::info!("Created song {} ({})", song.id, song.title);
        Ok(song)
    }

    /// Save a song over its stored copy and refresh its index entry.
    pub async fn save(&self, mut song: Song) -> Result<Song> {
        song.validate()?;
        if song.id.is_empty() {
            return Err(Error::InvalidSong("song has no id; create it first".into()));
        }

        let path = song_path(&song.id);
        let revision = self.store.get(&path).await?.map(|d| d.revision);
        let message = if revision.is_some() {
            format!("Update song: {}", song.title)
        } else {
            format!("Create song: {}", song.title)
        };

        song.updated_at = Utc::now();
        let json = serde_json::to_string_pretty(&song)?;
        self.store.put(&path, &json, revision.as_ref(), &message).await?;

        let (mut index, index_rev) = self.read_index().await?;
        let meta = song.metadata();
        match index.songs.iter_mut().find(|m| m.id == song.id) {
            Some(entry) => *entry = meta,
            None => index.songs.push(meta),
        }
        self.write_index(&index, index_rev.as_ref()).await?;

        tracing::info!("Saved song {}", song.id);
        Ok(song)
    }

    /// Delete a song and drop it from the index.
    pub async fn delete(&self, id: &SongId) -> Result<()> {
        let path = song_path(id);
        let Some(doc) = self.store.get(&path).await? else {
            return Err(Error::NotFound(id.to_string()));
        };
        self.store.delete(&path, &doc.revision, &format!("Delete song: {id}")).await?;

        let (mut index, index_rev) = self.read_index().await?;
        let before = index.songs.len();
        index.songs.retain(|m| &m.id != id);
        if index.songs.len() != before {
            self.write_index(&index, index_rev.as_ref()).await?;
        }

        tracing::info!("Deleted song {id}");
        Ok(())
    }

    /// Listed songs whose titles match `query`, best first.
    pub async fn search(&self, query: &str, limit: usize) -> Result<Vec<SongMetadata>> {
        Ok(rank_by_title(self.list().await?, query, limit))
    }

    async fn read_index(&self) -> Result<(SongsList, Option<Revision>)> {
        match self.store.get(SONGS_INDEX_PATH).await? {
            Some(doc) if doc.content.trim().is_empty() => Ok((SongsList::default(), Some(doc.revision))),
            Some(doc) => {
                let list = serde_json::from_str(&doc.content)
                    .map_err(|e| Error::parse(format!("Song index: {e}"), None))?;
                Ok((list, Some(doc.revision)))
            }
            None => Ok((SongsList::default(), None)),
        }
    }

    async fn write_index(&self, index: &SongsList, revision: Option<&Revision>) -> Result<()> {
        let json = serde_json::to_string_pretty(index)?;
        self.store.put(SONGS_INDEX_PATH, &json, revision, "Update songs list").await?;
        Ok(())
    }
}

fn song_path(id: &SongId) -> String {
    format!("{SONGS_DIR}/{id}.json")
}

/// Order songs by how well their titles match `query`.
///
/// Substring matches come first in list order, then fuzzy matches above a
/// minimum score. An empty query keeps list order.
fn rank_by_title(songs: Vec<SongMetadata>, query: &str, limit: usize) -> Vec<SongMetadata> {
    let query = query.trim();
    if query.is_empty() {
        return songs.into_iter().take(limit).collect();
    }

    let matcher = SkimMatcherV2::default();
    let query_lower = query.to_lowercase();

    let mut scored: Vec<(i64, SongMetadata)> = songs
        .into_iter()
        .filter_map(|song| {
            if song.title.to_lowercase().contains(&query_lower) {
                return Some((i64::MAX, song));
            }
            let score = matcher.fuzzy_match(&song.title, query)?;
            (score >= MIN_FUZZY_SCORE).then_some((score, song))
        })
        .collect();

    // Stable sort keeps list order among equal scores.
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().take(limit).map(|(_, song)| song).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(id: &str, title: &str) -> SongMetadata {
        SongMetadata {
            id: SongId::new(id),
            title: title.to_string(),
            key: "C".into(),
            capo: 0,
            tags: Vec::new(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn song_paths() {
        assert_eq!(song_path(&SongId::new("qing-tian")), "data/songs/qing-tian.json");
    }

    #[test]
    fn substring_matches_rank_first() {
        let songs = vec![
            meta("a", "Amazing Grace"),
            meta("b", "Great Is Thy Faithfulness"),
            meta("c", "Grace Alone"),
        ];
        let ranked = rank_by_title(songs, "grace", 10);
        let ids: Vec<_> = ranked.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(&ids[..2], &["a", "c"]);
    }

    #[test]
    fn unrelated_titles_are_dropped() {
        let ranked = rank_by_title(vec![meta("a", "晴天"), meta("b", "Yesterday")], "晴天", 10);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].id.as_str(), "a");
    }

    #[test]
    fn empty_query_keeps_order_and_limit() {
        let songs = vec![meta("a", "A"), meta("b", "B"), meta("c", "C")];
        let ranked = rank_by_title(songs, "  ", 2);
        let ids: Vec<_> = ranked.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
