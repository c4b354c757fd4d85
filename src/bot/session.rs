//! Per-session conversation state
//!
//! Holds the pending quiz answer (read-once) and the workout log for each
//! user. Sessions are created implicitly and evicted after a period of
//! inactivity.

use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// State kept for one conversing user
#[derive(Debug, Default, Clone)]
pub struct Session {
    /// Correct answer of the quiz question awaiting a reply
    pub pending_quiz_answer: Option<String>,
    /// Workouts logged with `/fitness log`
    pub workouts: Vec<String>,
}

/// In-memory store of [`Session`]s keyed by user id
#[derive(Clone)]
pub struct SessionStore {
    sessions: Cache<i64, Arc<Mutex<Session>>>,
}

impl SessionStore {
    /// Creates a store evicting sessions idle for `idle_secs`
    ///
    /// # Examples
    ///
    /// ```
    /// use super_bot::bot::SessionStore;
    ///
    /// let store = SessionStore::new(
    ///     86_400, // evict after a day of inactivity
    ///     10_000, // max 10k sessions
    /// );
    /// ```
    #[must_use]
    pub fn new(idle_secs: u64, max_capacity: u64) -> Self {
        let sessions = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_idle(Duration::from_secs(idle_secs))
            .build();

        Self { sessions }
    }

    async fn session(&self, user_id: i64) -> Arc<Mutex<Session>> {
        self.sessions
            .get_with(user_id, async { Arc::new(Mutex::new(Session::default())) })
            .await
    }

    /// Records the answer of a freshly issued quiz, replacing any unconsumed one
    pub async fn set_pending_answer(&self, user_id: i64, answer: String) {
        let session = self.session(user_id).await;
        session.lock().await.pending_quiz_answer = Some(answer);
    }

    /// Removes and returns the pending answer, if any
    pub async fn take_pending_answer(&self, user_id: i64) -> Option<String> {
        let session = self.sessions.get(&user_id).await?;
        let answer = session.lock().await.pending_quiz_answer.take();
        answer
    }

    /// Whether a quiz answer is awaited from this user
    pub async fn has_pending_answer(&self, user_id: i64) -> bool {
        match self.sessions.get(&user_id).await {
            Some(session) => session.lock().await.pending_quiz_answer.is_some(),
            None => false,
        }
    }

    /// Appends a workout and returns how many are logged now
    pub async fn log_workout(&self, user_id: i64, workout: String) -> usize {
        let session = self.session(user_id).await;
        let mut session = session.lock().await;
        session.workouts.push(workout);
        session.workouts.len()
    }

    /// Workouts logged by this user, oldest first
    pub async fn workouts(&self, user_id: i64) -> Vec<String> {
        match self.sessions.get(&user_id).await {
            Some(session) => session.lock().await.workouts.clone(),
            None => Vec::new(),
        }
    }

    /// Returns the current number of sessions in the store
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.sessions.entry_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_pending_answer_is_read_once() {
        let store = SessionStore::new(60, 100);

        store.set_pending_answer(1, "Paris".to_string()).await;
        assert!(store.has_pending_answer(1).await);
        assert_eq!(store.take_pending_answer(1).await.as_deref(), Some("Paris"));
        assert_eq!(store.take_pending_answer(1).await, None);
        assert!(!store.has_pending_answer(1).await);
    }

    #[tokio::test]
    async fn test_new_quiz_overwrites_unconsumed_answer() {
        let store = SessionStore::new(60, 100);

        store.set_pending_answer(1, "Paris".to_string()).await;
        store.set_pending_answer(1, "Rome".to_string()).await;
        assert_eq!(store.take_pending_answer(1).await.as_deref(), Some("Rome"));
    }

    #[tokio::test]
    async fn test_sessions_are_independent() {
        let store = SessionStore::new(60, 100);

        store.set_pending_answer(1, "Paris".to_string()).await;
        assert_eq!(store.take_pending_answer(2).await, None);
        assert!(store.has_pending_answer(1).await);
    }

    #[tokio::test]
    async fn test_workout_log() {
        let store = SessionStore::new(60, 100);

        assert_eq!(store.log_workout(7, "run 5k".to_string()).await, 1);
        assert_eq!(store.log_workout(7, "pushups".to_string()).await, 2);
        assert_eq!(store.workouts(7).await, vec!["run 5k", "pushups"]);
        assert!(store.workouts(8).await.is_empty());

        store.sessions.run_pending_tasks().await;
        assert_eq!(store.entry_count(), 1);
    }
}
