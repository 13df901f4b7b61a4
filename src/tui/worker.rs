use std::io;
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use tracing::debug;

use crate::io::store::PlantStore;
use crate::ops::catalog::{Effect, Event, run_effect};

/// Runs store effects off the UI thread and hands back their reply events.
///
/// Effects are processed one at a time in the order they were sent.
pub struct StoreWorker {
    tx: mpsc::Sender<Effect>,
    rx: mpsc::Receiver<Event>,
}

impl StoreWorker {
    /// Move `store` onto a background thread. Failed saves and seeding
    /// failures go to the recovery log in `recovery_dir`.
    pub fn spawn<S>(store: S, recovery_dir: Option<PathBuf>) -> io::Result<Self>
    where
        S: PlantStore + Send + 'static,
    {
        let (tx, effects) = mpsc::channel::<Effect>();
        let (replies, rx) = mpsc::channel::<Event>();

        thread::Builder::new()
            .name("frond-store".into())
            .spawn(move || {
                for effect in effects {
                    debug!(?effect, "running effect");
                    if let Some(event) = run_effect(&store, effect, recovery_dir.as_deref())
                        && replies.send(event).is_err()
                    {
                        break;
                    }
                }
            })?;

        Ok(StoreWorker { tx, rx })
    }

    /// Queue an effect. Returns false if the worker has stopped.
    pub fn send(&self, effect: Effect) -> bool {
        self.tx.send(effect).is_ok()
    }

    /// Non-blocking: every reply that has arrived so far
    pub fn poll(&self) -> Vec<Event> {
        self.rx.try_iter().collect()
    }
}
