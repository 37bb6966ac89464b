pub mod persist;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use teloxide::types::{ChatId, MessageId};

/// Identifies a `/lookup` prompt. Message ids are only unique per chat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PromptKey {
    pub message_id: MessageId,
    pub chat_id: ChatId,
}

impl PromptKey {
    pub fn new(message_id: MessageId, chat_id: ChatId) -> Self {
        Self {
            message_id,
            chat_id,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct PendingRadius {
    radius: u32,
    created_at: SystemTime,
}

/// On-disk form of one entry.
#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct StoredEntry {
    message_id: i32,
    chat_id: i64,
    radius: u32,
    created_at: u64,
}

/// Radii requested through `/lookup`, waiting for the user's location reply.
///
/// Entries expire after `ttl`; expired entries are never returned and are
/// pruned whenever a new prompt is recorded.
#[derive(Clone)]
pub struct PendingRadii {
    entries: Arc<Mutex<HashMap<PromptKey, PendingRadius>>>,
    ttl: Duration,
}

impl PendingRadii {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            ttl,
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<PromptKey, PendingRadius>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_expired(&self, created_at: SystemTime) -> bool {
        created_at.elapsed().unwrap_or_default() >= self.ttl
    }

    pub fn insert(&self, key: PromptKey, radius: u32) {
        let mut entries = self.lock();
        entries.retain(|_, entry| !self.is_expired(entry.created_at));
        entries.insert(
            key,
            PendingRadius {
                radius,
                created_at: SystemTime::now(),
            },
        );
    }

    /// Reads the radius for `key` without consuming it.
    pub fn get(&self, key: &PromptKey) -> Option<u32> {
        let entries = self.lock();
        entries
            .get(key)
            .filter(|entry| !self.is_expired(entry.created_at))
            .map(|entry| entry.radius)
    }

    pub fn remove(&self, key: &PromptKey) -> Option<u32> {
        self.lock().remove(key).map(|entry| entry.radius)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Serializes every live entry, returning the bytes and how many entries
    /// they hold.
    pub fn to_bytes(&self) -> Result<(Vec<u8>, usize), serde_json::Error> {
        let entries = self.lock();
        let stored: Vec<StoredEntry> = entries
            .iter()
            .filter(|(_, entry)| !self.is_expired(entry.created_at))
            .map(|(key, entry)| StoredEntry {
                message_id: key.message_id.0,
                chat_id: key.chat_id.0,
                radius: entry.radius,
                created_at: entry
                    .created_at
                    .duration_since(UNIX_EPOCH)
                    .unwrap_or_default()
                    .as_secs(),
            })
            .collect();
        Ok((serde_json::to_vec(&stored)?, stored.len()))
    }

    /// Merges entries produced by [`PendingRadii::to_bytes`], skipping expired
    /// ones. Returns how many were restored.
    pub fn restore_bytes(&self, bytes: &[u8]) -> Result<usize, serde_json::Error> {
        let stored: Vec<StoredEntry> = serde_json::from_slice(bytes)?;
        let mut entries = self.lock();
        let mut restored = 0;
        for entry in stored {
            let created_at = UNIX_EPOCH + Duration::from_secs(entry.created_at);
            if self.is_expired(created_at) {
                continue;
            }
            entries.insert(
                PromptKey::new(MessageId(entry.message_id), ChatId(entry.chat_id)),
                PendingRadius {
                    radius: entry.radius,
                    created_at,
                },
            );
            restored += 1;
        }
        Ok(restored)
    }
}
