//! Autosave for editing sessions.
//!
//! [`AutosaveSchedule`] decides *when* a pending change should be written:
//! after a quiet period since the last change, and never more often than
//! the minimum interval. [`AutosaveTask`] runs that schedule on the tokio
//! runtime and writes the latest submitted record. The returned
//! [`AutosaveHandle`] owns the task; dropping it stops autosaving.
//!
//! Saves are last-writer-wins: a record submitted while an older one is still
//! pending replaces it.

use crate::config::EditorConfig;
use crate::log;
use crate::page::TranslationRecord;
use parking_lot::Mutex;
use std::{sync::Arc, time::Duration};
use tokio::{
    task::JoinHandle,
    time::{Instant, MissedTickBehavior},
};

// =============================================================================
// Schedule
// =============================================================================

/// Debounce + rate limit for autosaves.
#[derive(Debug, Clone)]
pub struct AutosaveSchedule {
    debounce: Duration,
    min_interval: Duration,
    last_change: Option<Instant>,
    last_save: Option<Instant>,
}

impl AutosaveSchedule {
    pub const fn new(debounce: Duration, min_interval: Duration) -> Self {
        Self {
            debounce,
            min_interval,
            last_change: None,
            last_save: None,
        }
    }

    pub fn from_config(config: &EditorConfig) -> Self {
        Self::new(config.autosave_debounce(), config.autosave_interval())
    }

    pub fn mark_dirty(&mut self, now: Instant) {
        self.last_change = Some(now);
    }

    pub const fn is_dirty(&self) -> bool {
        self.last_change.is_some()
    }

    fn in_cooldown(&self, now: Instant) -> bool {
        self.last_save
            .is_some_and(|t| now.saturating_duration_since(t) < self.min_interval)
    }

    /// A change is pending, the user paused typing and the last save is old
    /// enough.
    pub fn due(&self, now: Instant) -> bool {
        self.last_change
            .is_some_and(|t| now.saturating_duration_since(t) >= self.debounce)
            && !self.in_cooldown(now)
    }

    pub fn mark_saved(&mut self, now: Instant) {
        self.last_change = None;
        self.last_save = Some(now);
    }

    /// How often the task should check [`due`](Self::due).
    pub fn poll_interval(&self) -> Duration {
        self.debounce
            .min(self.min_interval)
            .max(Duration::from_millis(10))
    }
}

// =============================================================================
// Task
// =============================================================================

#[derive(Debug)]
struct Pending {
    record: Option<TranslationRecord>,
    schedule: AutosaveSchedule,
}

/// Background autosave loop.
pub struct AutosaveTask;

impl AutosaveTask {
    /// Spawn the autosave loop on the current tokio runtime.
    ///
    /// `save` runs on the runtime thread; failures are logged and the record
    /// is retried on the next due tick unless a newer one was submitted.
    pub fn spawn<F>(schedule: AutosaveSchedule, mut save: F) -> AutosaveHandle
    where
        F: FnMut(&mut TranslationRecord) -> anyhow::Result<()> + Send + 'static,
    {
        let poll = schedule.poll_interval();
        let pending = Arc::new(Mutex::new(Pending {
            record: None,
            schedule,
        }));
        let shared = Arc::clone(&pending);

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(poll);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                let Some(mut record) = take_due(&shared) else {
                    continue;
                };

                if let Err(err) = save(&mut record) {
                    log!(
                        "autosave";
                        "failed to save `{}` ({}): {err:#}",
                        record.page_id,
                        record.locale_code
                    );
                    let mut pending = shared.lock();
                    if pending.record.is_none() {
                        pending.record = Some(record);
                        pending.schedule.mark_dirty(Instant::now());
                    }
                }
            }
        });

        AutosaveHandle { pending, task }
    }
}

fn take_due(pending: &Mutex<Pending>) -> Option<TranslationRecord> {
    let mut pending = pending.lock();
    let now = Instant::now();
    if !pending.schedule.due(now) {
        return None;
    }
    pending.schedule.mark_saved(now);
    pending.record.take()
}

/// Owner of a running autosave loop. Dropping it cancels the loop.
pub struct AutosaveHandle {
    pending: Arc<Mutex<Pending>>,
    task: JoinHandle<()>,
}

impl AutosaveHandle {
    /// Queue the latest state of the translation, replacing any older one.
    pub fn submit(&self, record: TranslationRecord) {
        let mut pending = self.pending.lock();
        pending.record = Some(record);
        pending.schedule.mark_dirty(Instant::now());
    }

    pub fn has_pending(&self) -> bool {
        self.pending.lock().record.is_some()
    }

    /// Stop autosaving. A pending record is discarded.
    pub fn cancel(self) {
        self.pending.lock().record = None;
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for AutosaveHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::Translation;

    fn record(title: &str) -> TranslationRecord {
        TranslationRecord::new(
            "home",
            "en",
            Translation {
                title: title.into(),
                ..Default::default()
            },
        )
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_schedule_debounce() {
        let start = Instant::now();
        let mut schedule = AutosaveSchedule::new(ms(1500), ms(5000));
        assert!(!schedule.due(start));

        schedule.mark_dirty(start);
        assert!(schedule.is_dirty());
        assert!(!schedule.due(start + ms(1000)));
        assert!(schedule.due(start + ms(1500)));

        // another keystroke restarts the quiet period
        schedule.mark_dirty(start + ms(1200));
        assert!(!schedule.due(start + ms(2000)));
        assert!(schedule.due(start + ms(2700)));
    }

    #[test]
    fn test_schedule_min_interval() {
        let start = Instant::now();
        let mut schedule = AutosaveSchedule::new(ms(100), ms(5000));

        schedule.mark_dirty(start);
        schedule.mark_saved(start + ms(100));
        assert!(!schedule.is_dirty());

        schedule.mark_dirty(start + ms(200));
        assert!(!schedule.due(start + ms(1000)));
        assert!(schedule.due(start + ms(5100)));
    }

    #[test]
    fn test_schedule_from_config() {
        let schedule = AutosaveSchedule::from_config(&EditorConfig::default());
        assert_eq!(schedule.poll_interval(), ms(1500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_task_saves_latest_record() {
        let saved = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&saved);
        let handle = AutosaveTask::spawn(AutosaveSchedule::new(ms(100), ms(1000)), move |record| {
            sink.lock().push(record.translation.title.clone());
            Ok(())
        });

        handle.submit(record("first"));
        tokio::time::sleep(ms(50)).await;
        handle.submit(record("second"));
        tokio::time::sleep(ms(400)).await;

        assert_eq!(*saved.lock(), vec!["second".to_string()]);
        assert!(!handle.has_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_task_retries_failed_save() {
        let attempts = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&attempts);
        let handle = AutosaveTask::spawn(AutosaveSchedule::new(ms(100), ms(100)), move |_| {
            let mut attempts = counter.lock();
            *attempts += 1;
            if *attempts == 1 {
                anyhow::bail!("disk full");
            }
            Ok(())
        });

        handle.submit(record("draft"));
        tokio::time::sleep(ms(1000)).await;

        assert_eq!(*attempts.lock(), 2);
        assert!(!handle.has_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_handle_cancels_task() {
        let saved = Arc::new(Mutex::new(0));
        let sink = Arc::clone(&saved);
        let handle = AutosaveTask::spawn(AutosaveSchedule::new(ms(100), ms(100)), move |_| {
            *sink.lock() += 1;
            Ok(())
        });

        handle.submit(record("unsaved"));
        drop(handle);
        tokio::time::sleep(ms(1000)).await;

        assert_eq!(*saved.lock(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_discards_pending_record() {
        let saved = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&saved);
        let handle = AutosaveTask::spawn(AutosaveSchedule::new(ms(100), ms(100)), move |record| {
            sink.lock().push(record.translation.title.clone());
            Ok(())
        });

        handle.submit(record("saved"));
        tokio::time::sleep(ms(500)).await;
        handle.submit(record("discarded"));
        handle.cancel();
        tokio::time::sleep(ms(1000)).await;

        assert_eq!(*saved.lock(), vec!["saved".to_string()]);
    }
}
