use crate::config::{FocusConfig, FocusMode};
use crate::focus::tracker::{AttentionChange, AttentionTracker, PageEvent};
use crate::region::Viewport;
use std::path::Path;
use tokio::sync::mpsc;
use tokio::time::Instant;

/// Builder for a focus-tracking session driven on the tokio clock
pub struct FocusSession {
    viewport: Viewport,
    config: FocusConfig,
    buffer: usize,
}

impl FocusSession {
    /// Create a new session for a page shown in `viewport`
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            config: FocusConfig::default(),
            buffer: 1024,
        }
    }

    pub fn with_config(mut self, config: FocusConfig) -> Self {
        self.config = config;
        self
    }

    /// Load the focus section of a JSON configuration file
    pub fn with_config_file(self, path: impl AsRef<Path>) -> crate::Result<Self> {
        let config = crate::config::Config::from_file(path)?;
        Ok(self.with_config(config.focus))
    }

    pub fn with_mode(mut self, mode: FocusMode) -> Self {
        self.config.mode = mode;
        self
    }

    /// Capacity of the event and notification channels
    pub fn with_buffer(mut self, buffer: usize) -> Self {
        self.buffer = buffer.max(1);
        self
    }

    /// Spawn the session task.
    ///
    /// Returns the sender for page events and a receiver yielding attention
    /// changes. Dropping the sender lets pending debounced work finish, then
    /// closes the receiver.
    pub fn start(self) -> (mpsc::Sender<PageEvent>, mpsc::Receiver<AttentionChange>) {
        let (event_tx, event_rx) = mpsc::channel::<PageEvent>(self.buffer);
        let (change_tx, change_rx) = mpsc::channel::<AttentionChange>(self.buffer);
        let tracker = AttentionTracker::new(self.config, self.viewport);

        tokio::spawn(run(tracker, event_rx, change_tx));

        (event_tx, change_rx)
    }
}

async fn run(
    mut tracker: AttentionTracker,
    mut event_rx: mpsc::Receiver<PageEvent>,
    change_tx: mpsc::Sender<AttentionChange>,
) {
    ::log::debug!("Focus session started");

    loop {
        let deadline = tracker.next_deadline();
        tokio::select! {
            event = event_rx.recv() => {
                let Some(event) = event else { break };
                if let Some(change) = tracker.handle(event, Instant::now()) {
                    if change_tx.send(change).await.is_err() {
                        ::log::debug!("Attention listener gone, stopping session");
                        return;
                    }
                }
            }
            _ = wait_until(deadline) => {
                if !forward(&mut tracker, &change_tx).await {
                    return;
                }
            }
        }
    }

    // events are closed, let work that is already scheduled complete
    while let Some(deadline) = tracker.next_deadline() {
        tokio::time::sleep_until(deadline).await;
        if !forward(&mut tracker, &change_tx).await {
            return;
        }
    }
    ::log::debug!("Focus session finished");
}

/// Fire due debounce slots and pass the changes on; false once nobody listens
async fn forward(tracker: &mut AttentionTracker, change_tx: &mpsc::Sender<AttentionChange>) -> bool {
    for change in tracker.poll(Instant::now()) {
        if change_tx.send(change).await.is_err() {
            return false;
        }
    }
    true
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
