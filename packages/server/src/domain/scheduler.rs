//! Queue scheduler.
//!
//! Computes when a newly queued song starts so that every participant's player
//! agrees on playback without a central clock: a song starts right after the
//! previous song's scheduled end, or immediately if the queue has run dry.

use std::sync::Arc;

use chorus_shared::time::Clock;

use super::{PendingSong, Queue, Song, Timestamp};

/// Schedule `song` at the end of `queue` as seen at `now`, append it and return it.
///
/// Deterministic in `(queue, now)`.
pub fn schedule_at(queue: &mut Queue, song: PendingSong, now: Timestamp) -> Song {
    let start_time = match queue.last_song() {
        None => now,
        Some(last) => {
            let last_end = last.end_time();
            if last_end <= now { now } else { last_end }
        }
    };

    let scheduled = song.scheduled_at(start_time);
    queue.songs.push(scheduled.clone());
    scheduled
}

/// Scheduler bound to a clock.
///
/// The clock is read exactly once per call so the start/end comparison and the
/// assigned start time agree.
#[derive(Clone)]
pub struct QueueScheduler {
    clock: Arc<dyn Clock>,
}

impl QueueScheduler {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    pub fn schedule(&self, queue: &mut Queue, song: PendingSong) -> Song {
        let now = Timestamp::new(self.clock.now_millis());
        schedule_at(queue, song, now)
    }
}
