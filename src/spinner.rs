//! Terminal spinner shown while waiting on a request

use std::future::Future;
use std::io::{self, IsTerminal, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::time::{Duration, sleep};

/// Await `future` while a spinner rotates on stdout
///
/// Falls back to a plain await when stdout is not a terminal.
pub async fn with_spinner<F: Future>(label: &str, future: F) -> F::Output {
    if !io::stdout().is_terminal() {
        return future.await;
    }

    let spinner_running = Arc::new(AtomicBool::new(true));
    let spinner_running_clone = Arc::clone(&spinner_running);
    let label = label.to_string();

    let spinner_task = tokio::spawn(async move {
        let spinner_chars = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
        let mut idx = 0;

        while spinner_running_clone.load(Ordering::Relaxed) {
            print!("\r{} {}", spinner_chars[idx], label);
            let _ = io::stdout().flush();
            idx = (idx + 1) % spinner_chars.len();
            sleep(Duration::from_millis(80)).await;
        }

        // Clear spinner line
        print!("\r\x1b[K");
        let _ = io::stdout().flush();
    });

    let output = future.await;

    spinner_running.store(false, Ordering::Relaxed);
    let _ = spinner_task.await;

    output
}
