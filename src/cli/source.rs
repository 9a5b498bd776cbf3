//! Source folder commands: a one-off check and a live watch

use std::io;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crate::display::format_source_state;
use crate::error::FontSwapResult;
use crate::services::SwapState;
use crate::source::{SourceUpdate, SourceWatcher};

const WAKE_INTERVAL: Duration = Duration::from_millis(200);

/// Handle the source command
pub fn handle_source_command(state: &mut SwapState) -> FontSwapResult<()> {
    println!("Source folder: {}", state.source_dir().display());
    let source = state.refresh_source()?;
    println!("{}", format_source_state(source));
    Ok(())
}

/// Handle the watch command
///
/// Prints the source folder state whenever it changes, until Enter is
/// pressed or `duration` has passed.
pub fn handle_watch_command(
    state: &mut SwapState,
    interval: Duration,
    duration: Option<Duration>,
) -> FontSwapResult<()> {
    println!(
        "Watching {} every {}s. Press Enter to stop.",
        state.source_dir().display(),
        interval.as_secs()
    );

    let mut watcher = SourceWatcher::spawn(state.resolver(), interval);

    let (enter_tx, enter_rx) = mpsc::channel();
    thread::spawn(move || {
        let mut line = String::new();
        // End of input is not a request to stop
        if matches!(io::stdin().read_line(&mut line), Ok(n) if n > 0) {
            let _ = enter_tx.send(());
        }
    });

    let deadline = duration.map(|d| Instant::now() + d);
    loop {
        if enter_rx.try_recv().is_ok() || deadline.is_some_and(|d| Instant::now() >= d) {
            break;
        }

        let Some(update) = watcher.next_timeout(WAKE_INTERVAL) else {
            continue;
        };
        state.apply_update(&update);
        match &update {
            SourceUpdate::State(source) => println!("{}", format_source_state(source)),
            SourceUpdate::Error(error) => println!("Source folder unavailable: {}", error),
        }
    }

    watcher.stop();
    println!("Stopped watching.");
    Ok(())
}
