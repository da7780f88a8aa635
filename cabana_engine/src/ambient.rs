//! Ambient hints --
//!
//! A background notifier checks right away and then on a fixed interval: if the player's
//! situation matches one of the world's `AmbientHint`s, it prints its message. It never touches the world itself: the REPL
//! publishes an `AmbientSnapshot` after every turn and the notifier only reads that.

use std::collections::HashSet;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, RwLock};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};

/// Read-only questions the notifier asks about the player's situation.
pub trait AmbientQuery {
    fn current_location_name(&self) -> &str;
    /// True if the player carries something whose name contains `pattern`.
    fn has_in_inventory(&self, pattern: &str) -> bool;
    fn is_alive(&self, npc: &str) -> bool;
}

/// A hint shown while `npc` is alive, the player is in `scenario` and carries `item`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmbientHint {
    pub npc: String,
    pub scenario: String,
    pub item: String,
    pub message: String,
}
impl AmbientHint {
    pub fn applies<Q: AmbientQuery + ?Sized>(&self, query: &Q) -> bool {
        query.is_alive(&self.npc)
            && query.current_location_name() == self.scenario
            && query.has_in_inventory(&self.item)
    }
}

/// Copy of exactly what the hints need, taken at the end of a turn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AmbientSnapshot {
    pub location: String,
    pub inventory: Vec<String>,
    pub living_npcs: HashSet<String>,
}

impl AmbientQuery for AmbientSnapshot {
    fn current_location_name(&self) -> &str {
        &self.location
    }

    fn has_in_inventory(&self, pattern: &str) -> bool {
        let pattern = pattern.to_lowercase();
        self.inventory.iter().any(|name| name.to_lowercase().contains(&pattern))
    }

    fn is_alive(&self, npc: &str) -> bool {
        self.living_npcs.contains(npc)
    }
}

/// Shared slot the REPL writes and the notifier reads.
pub type SnapshotCell = Arc<RwLock<AmbientSnapshot>>;

/// Where hint messages go (stdout, or rustyline's external printer).
pub type HintSink = Box<dyn FnMut(&str) + Send>;

/// Replace the published snapshot in one write, so readers never see half a turn.
pub fn publish(cell: &SnapshotCell, snapshot: AmbientSnapshot) {
    match cell.write() {
        Ok(mut guard) => *guard = snapshot,
        Err(poisoned) => *poisoned.into_inner() = snapshot,
    }
}

/// Messages of every hint that applies right now.
pub fn matching_hints<'a, Q: AmbientQuery + ?Sized>(hints: &'a [AmbientHint], query: &Q) -> Vec<&'a str> {
    hints
        .iter()
        .filter(|hint| hint.applies(query))
        .map(|hint| hint.message.as_str())
        .collect()
}

/// Handle to the running notifier thread. Stopped and joined on `shutdown` or drop.
pub struct Notifier {
    stop: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Notifier {
    /// Start the notifier thread.
    ///
    /// # Errors
    /// - if the OS refuses to spawn the thread
    pub fn spawn(cell: SnapshotCell, hints: Vec<AmbientHint>, interval: Duration, mut sink: HintSink) -> Result<Self> {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let handle = thread::Builder::new()
            .name("ambient-hints".into())
            .spawn(move || {
                info!("ambient notifier started ({}s interval)", interval.as_secs_f32());
                loop {
                    let Ok(snapshot) = cell.read() else {
                        warn!("ambient snapshot lock poisoned; notifier stopping");
                        break;
                    };
                    let messages: Vec<String> = matching_hints(&hints, &*snapshot)
                        .into_iter()
                        .map(str::to_string)
                        .collect();
                    drop(snapshot);
                    for message in messages {
                        sink(&message);
                    }
                    match stop_rx.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => {},
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                info!("ambient notifier stopped");
            })
            .context("spawning ambient notifier thread")?;
        Ok(Self {
            stop: Some(stop_tx),
            handle: Some(handle),
        })
    }

    /// Signal the thread to stop and wait for it. Safe to call more than once.
    pub fn shutdown(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(handle) = self.handle.take()
            && handle.join().is_err()
        {
            warn!("ambient notifier thread panicked");
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for Notifier {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::Instant;

    fn stag_hint() -> AmbientHint {
        AmbientHint {
            npc: "veado".into(),
            scenario: "Floresta".into(),
            item: "rifle".into(),
            message: "(PERCEPÇÃO) Há um veado na proximidade.".into(),
        }
    }

    fn armed_in_forest() -> AmbientSnapshot {
        AmbientSnapshot {
            location: "Floresta".into(),
            inventory: vec!["rifle de caça".into()],
            living_npcs: HashSet::from(["veado".to_string()]),
        }
    }

    #[test]
    fn hint_needs_all_three_conditions() {
        let hint = stag_hint();
        let mut snap = armed_in_forest();
        assert!(hint.applies(&snap));

        snap.location = "Exterior da Cabana".into();
        assert!(!hint.applies(&snap));

        let mut snap = armed_in_forest();
        snap.inventory.clear();
        assert!(!hint.applies(&snap));

        let mut snap = armed_in_forest();
        snap.living_npcs.clear();
        assert!(!hint.applies(&snap));
    }

    #[test]
    fn notifier_emits_and_stops_cleanly() {
        let cell: SnapshotCell = Arc::new(RwLock::new(AmbientSnapshot::default()));
        publish(&cell, armed_in_forest());
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink_seen = Arc::clone(&seen);
        let sink: HintSink = Box::new(move |msg| sink_seen.lock().unwrap().push(msg.to_string()));

        let mut notifier = Notifier::spawn(Arc::clone(&cell), vec![stag_hint()], Duration::from_millis(5), sink).unwrap();
        let deadline = Instant::now() + Duration::from_secs(5);
        while seen.lock().unwrap().is_empty() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
        notifier.shutdown();
        assert!(!notifier.is_running());
        assert_eq!(seen.lock().unwrap()[0], "(PERCEPÇÃO) Há um veado na proximidade.");
    }

    #[test]
    fn first_check_happens_before_the_first_wait() {
        let cell: SnapshotCell = Arc::new(RwLock::new(armed_in_forest()));
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink_seen = Arc::clone(&seen);
        let sink: HintSink = Box::new(move |msg| sink_seen.lock().unwrap().push(msg.to_string()));

        let mut notifier = Notifier::spawn(cell, vec![stag_hint()], Duration::from_secs(3600), sink).unwrap();
        let deadline = Instant::now() + Duration::from_secs(5);
        while seen.lock().unwrap().is_empty() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
        notifier.shutdown();
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn shutdown_interrupts_a_long_interval() {
        let cell: SnapshotCell = Arc::new(RwLock::new(AmbientSnapshot::default()));
        let sink: HintSink = Box::new(|_| {});
        let mut notifier = Notifier::spawn(cell, Vec::new(), Duration::from_secs(3600), sink).unwrap();
        let start = Instant::now();
        notifier.shutdown();
        notifier.shutdown();
        assert!(start.elapsed() < Duration::from_secs(60));
    }
}
