use crate::view::ClipboardSink;
use anyhow::Result;
use arboard::Clipboard;
use std::sync::mpsc as std_mpsc;
use std::sync::OnceLock;
use std::time::Duration;

type WriteResult = std::result::Result<(), String>;

struct WriteJob {
    text: String,
    done: std_mpsc::Sender<WriteResult>,
}

// Global clipboard manager channel - initialized once on first use
static CLIPBOARD_SENDER: OnceLock<std_mpsc::SyncSender<WriteJob>> = OnceLock::new();

/// How long a clipboard instance is kept alive after the last write.
const CLIPBOARD_HOLD: Duration = Duration::from_secs(2);

/// Initialize the clipboard manager thread if not already initialized.
/// Writes are processed sequentially and the clipboard instance is kept alive for a
/// while after each one so clipboard managers on Linux have time to read the contents.
fn init_clipboard_manager() -> &'static std_mpsc::SyncSender<WriteJob> {
    CLIPBOARD_SENDER.get_or_init(|| {
        let (tx, rx) = std_mpsc::sync_channel::<WriteJob>(4);

        std::thread::spawn(move || {
            let mut held: Option<Clipboard> = None;
            loop {
                let job = if held.is_some() {
                    match rx.recv_timeout(CLIPBOARD_HOLD) {
                        Ok(job) => job,
                        Err(std_mpsc::RecvTimeoutError::Timeout) => {
                            held = None;
                            continue;
                        }
                        Err(std_mpsc::RecvTimeoutError::Disconnected) => break,
                    }
                } else {
                    match rx.recv() {
                        Ok(job) => job,
                        Err(_) => break,
                    }
                };

                let result = write_held(&mut held, &job.text);
                match &result {
                    Ok(()) => tracing::debug!(chars = job.text.chars().count(), "reply copied"),
                    Err(e) => tracing::warn!(error = %e, "clipboard write failed"),
                }
                let _ = job.done.send(result);
            }
        });

        tx
    })
}

fn write_held(held: &mut Option<Clipboard>, text: &str) -> WriteResult {
    let mut clipboard = match held.take() {
        Some(c) => c,
        None => Clipboard::new().map_err(|e| format!("clipboard unavailable: {e}"))?,
    };
    clipboard.set_text(text).map_err(|e| e.to_string())?;
    *held = Some(clipboard);
    Ok(())
}

/// System clipboard backed by arboard.
///
/// Blocks until the manager thread has written the text, so a missing display or a
/// rejected write comes back as an error.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl ClipboardSink for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        let (done_tx, done_rx) = std_mpsc::channel();
        init_clipboard_manager()
            .send(WriteJob {
                text: text.to_string(),
                done: done_tx,
            })
            .map_err(|_| anyhow::anyhow!("Clipboard manager channel closed"))?;
        done_rx
            .recv()
            .map_err(|_| anyhow::anyhow!("Clipboard manager stopped"))?
            .map_err(anyhow::Error::msg)
    }
}
