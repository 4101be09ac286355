//! Newest-first list of posts, mirrored to storage after every change.
//!
//! Every mutation rewrites the whole list under one key. Two tabs writing
//! the same key overwrite each other: last write wins, nothing is merged.

use crate::clock::Clock;
use crate::config::Config;
use crate::error::{AppError, Result, EMPTY_POST_MESSAGE};
use crate::storage::KeyValueStore;
use crate::types::{Post, PostId, Reaction};

/// Hands out millisecond-timestamp ids that never repeat, even when the
/// clock has not moved since the previous post.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdSequence {
    last: PostId,
}

impl IdSequence {
    pub fn after(posts: &[Post]) -> Self {
        Self {
            last: posts.iter().map(|p| p.id).max().unwrap_or(0),
        }
    }

    pub fn next(&mut self, now_millis: i64) -> PostId {
        let candidate = PostId::try_from(now_millis).unwrap_or(0);
        self.last = candidate.max(self.last.saturating_add(1));
        self.last
    }
}

pub fn load_posts<S: KeyValueStore + ?Sized>(storage: &S, key: &str) -> Result<Vec<Post>> {
    match storage.get(key)? {
        Some(raw) => Ok(serde_json::from_str(&raw)?),
        None => Ok(Vec::new()),
    }
}

pub fn persist<S: KeyValueStore + ?Sized>(storage: &S, key: &str, posts: &[Post]) -> Result<()> {
    let raw = serde_json::to_string(posts)
        .map_err(|e| AppError::Storage(format!("failed to serialize posts: {}", e)))?;
    storage.set(key, &raw)
}

pub struct FeedStore<S, C> {
    storage: S,
    clock: C,
    key: String,
    posts: Vec<Post>,
    ids: IdSequence,
}

impl<S: KeyValueStore, C: Clock> FeedStore<S, C> {
    /// Read the persisted list once; the store owns it from here on.
    pub fn load(storage: S, clock: C, config: &Config) -> Result<Self> {
        let posts = load_posts(&storage, &config.posts_key)?;
        tracing::debug!(count = posts.len(), "Loaded posts");
        Ok(Self::with_posts(storage, clock, config, posts))
    }

    /// Like `load`, but an unreadable stored list is logged and replaced by an
    /// empty feed. The bad blob stays in storage until the next mutation
    /// overwrites it.
    pub fn load_or_empty(storage: S, clock: C, config: &Config) -> Self {
        match load_posts(&storage, &config.posts_key) {
            Ok(posts) => Self::with_posts(storage, clock, config, posts),
            Err(e) => {
                tracing::error!("Failed to load posts, starting with an empty feed: {}", e);
                Self::with_posts(storage, clock, config, Vec::new())
            }
        }
    }

    /// Start from `posts` without reading storage.
    pub fn with_posts(storage: S, clock: C, config: &Config, posts: Vec<Post>) -> Self {
        Self {
            ids: IdSequence::after(&posts),
            storage,
            clock,
            key: config.posts_key.clone(),
            posts,
        }
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn get(&self, id: PostId) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }

    pub fn persist(&self) -> Result<()> {
        persist(&self.storage, &self.key, &self.posts)
    }

    /// Prepend a post by `author`. Fails without touching the list when there
    /// is no author or `text` is blank; the text is stored as typed.
    /// A storage error is returned after the post is already in memory.
    pub fn create_post(&mut self, author: Option<&str>, text: &str) -> Result<&Post> {
        let author = match author {
            Some(name) if !name.is_empty() => name,
            _ => return Err(AppError::validation(EMPTY_POST_MESSAGE)),
        };
        if text.trim().is_empty() {
            return Err(AppError::validation(EMPTY_POST_MESSAGE));
        }

        let now = self.clock.now_millis();
        let post = Post::new(self.ids.next(now), author, text, now);
        tracing::info!(id = post.id, author, "Post created");
        self.posts.insert(0, post);
        self.persist()?;
        Ok(&self.posts[0])
    }

    pub fn react(&mut self, id: PostId, reaction: Reaction) -> Result<&Post> {
        let index = match self.posts.iter().position(|p| p.id == id) {
            Some(index) => index,
            None => {
                tracing::debug!(id, ?reaction, "Reaction on unknown post");
                return Err(AppError::NotFound(id));
            }
        };
        self.posts[index].apply(reaction);
        self.persist()?;
        Ok(&self.posts[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::storage::MemoryStore;
    use std::rc::Rc;

    const NOW: i64 = 1_700_000_000_000;

    fn store() -> (FeedStore<Rc<MemoryStore>, Rc<ManualClock>>, Rc<MemoryStore>, Rc<ManualClock>) {
        let storage = Rc::new(MemoryStore::new());
        let clock = Rc::new(ManualClock::new(NOW));
        let feed = FeedStore::load(storage.clone(), clock.clone(), &Config::default()).unwrap();
        (feed, storage, clock)
    }

    #[test]
    fn test_load_empty() {
        let (feed, _, _) = store();
        assert!(feed.posts().is_empty());
    }

    #[test]
    fn test_create_prepends_and_persists() {
        let (mut feed, storage, clock) = store();
        feed.create_post(Some("Alice"), "first").unwrap();
        clock.advance(5);
        let post = feed.create_post(Some("Bob"), "  second ").unwrap().clone();

        assert_eq!(post.author, "Bob");
        assert_eq!(post.text, "  second ");
        assert_eq!((post.likes, post.loves), (0, 0));
        assert_eq!(post.timestamp, NOW + 5);

        let texts: Vec<_> = feed.posts().iter().map(|p| p.text.as_str()).collect();
        assert_eq!(texts, ["  second ", "first"]);
        assert_eq!(load_posts(&*storage, "posts").unwrap(), feed.posts());
    }

    #[test]
    fn test_blank_text_is_rejected() {
        let (mut feed, storage, _) = store();
        feed.create_post(Some("Alice"), "keep").unwrap();
        let before = storage.get("posts").unwrap();

        for text in ["", "   ", "\n\t"] {
            let err = feed.create_post(Some("Alice"), text).unwrap_err();
            assert_eq!(err.user_message(), Some(EMPTY_POST_MESSAGE));
        }
        assert_eq!(feed.posts().len(), 1);
        assert_eq!(storage.get("posts").unwrap(), before);
    }

    #[test]
    fn test_missing_author_is_rejected() {
        let (mut feed, storage, _) = store();
        for author in [None, Some("")] {
            let err = feed.create_post(author, "hello").unwrap_err();
            assert_eq!(err.user_message(), Some(EMPTY_POST_MESSAGE));
        }
        assert!(feed.posts().is_empty());
        assert_eq!(storage.get("posts").unwrap(), None);
    }

    #[test]
    fn test_react_increments_one_counter() {
        let (mut feed, _, clock) = store();
        let first = feed.create_post(Some("Alice"), "one").unwrap().id;
        clock.advance(1);
        feed.create_post(Some("Bob"), "two").unwrap();
        let untouched = feed.posts()[0].clone();

        let post = feed.react(first, Reaction::Like).unwrap();
        assert_eq!((post.likes, post.loves), (1, 0));
        assert_eq!(feed.posts()[0], untouched);
        assert_eq!(feed.get(first).unwrap().text, "one");
    }

    #[test]
    fn test_react_unknown_id_changes_nothing() {
        let (mut feed, storage, _) = store();
        let id = feed.create_post(Some("Alice"), "one").unwrap().id;
        let before = storage.get("posts").unwrap();

        let err = feed.react(id + 1, Reaction::Love).unwrap_err();
        assert!(matches!(err, AppError::NotFound(missing) if missing == id + 1));
        assert_eq!(storage.get("posts").unwrap(), before);
    }

    #[test]
    fn test_same_millisecond_ids_are_unique() {
        let (mut feed, _, _) = store();
        let a = feed.create_post(Some("Alice"), "a").unwrap().id;
        let b = feed.create_post(Some("Alice"), "b").unwrap().id;
        let c = feed.create_post(Some("Alice"), "c").unwrap().id;
        assert_eq!(a, NOW as u64);
        assert!(a < b && b < c);
    }

    #[test]
    fn test_ids_continue_after_reload() {
        let storage = Rc::new(MemoryStore::new());
        let clock = Rc::new(ManualClock::new(NOW));
        let config = Config::default();
        let mut feed = FeedStore::load(storage.clone(), clock.clone(), &config).unwrap();
        let a = feed.create_post(Some("Alice"), "a").unwrap().id;

        clock.set(NOW - 10_000);
        let mut reloaded = FeedStore::load(storage, clock, &config).unwrap();
        let b = reloaded.create_post(Some("Alice"), "b").unwrap().id;
        assert!(b > a);
    }

    #[test]
    fn test_corrupt_storage_is_reported() {
        let storage = MemoryStore::new();
        storage.set("posts", "{not json").unwrap();
        let result = FeedStore::load(storage, ManualClock::new(NOW), &Config::default());
        assert!(matches!(result, Err(AppError::Corrupt(_))));
    }

    struct FullStore;

    impl KeyValueStore for FullStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(AppError::Storage("quota exceeded".into()))
        }

        fn remove(&self, _key: &str) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_corrupt_storage_is_replaced_on_next_write() {
        let storage = Rc::new(MemoryStore::new());
        storage.set("posts", "{bad").unwrap();
        let mut feed = FeedStore::load_or_empty(storage.clone(), ManualClock::new(NOW), &Config::default());
        assert!(feed.posts().is_empty());
        assert_eq!(storage.get("posts").unwrap().as_deref(), Some("{bad"));

        feed.create_post(Some("Alice"), "fresh start").unwrap();
        let stored = load_posts(&*storage, "posts").unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].text, "fresh start");
        assert_eq!(stored, feed.posts());
    }

    #[test]
    fn test_failed_write_keeps_memory_change() {
        let mut feed = FeedStore::load_or_empty(FullStore, ManualClock::new(NOW), &Config::default());

        let err = feed.create_post(Some("Alice"), "hello").unwrap_err();
        assert!(matches!(err, AppError::Storage(_)));
        assert_eq!(feed.posts().len(), 1);

        let id = feed.posts()[0].id;
        let err = feed.react(id, Reaction::Like).unwrap_err();
        assert!(matches!(err, AppError::Storage(_)));
        assert_eq!(feed.get(id).unwrap().likes, 1);
    }

    #[test]
    fn test_persist_round_trip() {
        let storage = MemoryStore::new();
        let mut post = Post::new(3, "Zoë Ünal", "multi\nline \"quoted\" ✨", 3);
        post.likes = 12;
        post.loves = u64::MAX;
        let posts = vec![post, Post::new(2, "Bob", "x", 2), Post::new(1, "Alice", "y", 1)];

        persist(&storage, "posts", &posts).unwrap();
        assert_eq!(load_posts(&storage, "posts").unwrap(), posts);
    }
}
