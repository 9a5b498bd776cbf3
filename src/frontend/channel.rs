//! Event-driven front end
//!
//! Every question and progress update is sent as a `UiRequest` over a
//! channel. Questions carry a reply sender; the workflow blocks on it until
//! the UI thread answers. A UI that goes away mid-question cancels the run.

use std::sync::mpsc::{self, Receiver, Sender};

use crate::engine::ProgressEvent;
use crate::error::{FontSwapError, FontSwapResult};
use crate::models::{BackupSession, BackupSessionId};

use super::{ConfirmPrompt, Frontend};

/// Message from a running workflow to the UI
#[derive(Debug)]
pub enum UiRequest {
    Confirm {
        prompt: ConfirmPrompt,
        reply: Sender<bool>,
    },
    SelectSession {
        sessions: Vec<BackupSession>,
        reply: Sender<Option<BackupSessionId>>,
    },
    Progress(ProgressEvent),
}

/// Front end that forwards everything to a UI over a channel
pub struct ChannelFrontend {
    requests: Sender<UiRequest>,
}

impl ChannelFrontend {
    /// Create the front end and the receiver the UI reads from
    pub fn new() -> (Self, Receiver<UiRequest>) {
        let (requests, receiver) = mpsc::channel();
        (Self { requests }, receiver)
    }

    fn ask<T>(&self, build: impl FnOnce(Sender<T>) -> UiRequest) -> FontSwapResult<T> {
        let (reply, answer) = mpsc::channel();
        self.requests
            .send(build(reply))
            .map_err(|_| FontSwapError::Cancelled)?;
        answer.recv().map_err(|_| FontSwapError::Cancelled)
    }
}

impl Frontend for ChannelFrontend {
    fn confirm(&mut self, prompt: &ConfirmPrompt) -> FontSwapResult<bool> {
        let prompt = prompt.clone();
        self.ask(|reply| UiRequest::Confirm { prompt, reply })
    }

    fn report_progress(&mut self, event: &ProgressEvent) {
        if self.requests.send(UiRequest::Progress(event.clone())).is_err() {
            tracing::debug!("progress dropped, UI receiver closed");
        }
    }

    fn select_session(
        &mut self,
        sessions: &[BackupSession],
    ) -> FontSwapResult<Option<BackupSessionId>> {
        let sessions = sessions.to_vec();
        self.ask(|reply| UiRequest::SelectSession { sessions, reply })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::ConfirmKind;
    use std::thread;

    #[test]
    fn test_confirm_round_trip_through_ui_thread() {
        let (mut frontend, requests) = ChannelFrontend::new();

        let ui = thread::spawn(move || {
            let mut seen = Vec::new();
            for request in requests {
                match request {
                    UiRequest::Confirm { prompt, reply } => {
                        seen.push(prompt.title.clone());
                        reply.send(prompt.kind == ConfirmKind::Replace).unwrap();
                    }
                    UiRequest::SelectSession { reply, .. } => reply.send(None).unwrap(),
                    UiRequest::Progress(event) => seen.push(event.to_string()),
                }
            }
            seen
        });

        let replace = ConfirmPrompt::new(ConfirmKind::Replace, "Replace fonts");
        let cleanup = ConfirmPrompt::new(ConfirmKind::Cleanup, "Remove backup");
        assert!(frontend.confirm(&replace).unwrap());
        assert!(!frontend.confirm(&cleanup).unwrap());
        frontend.report_progress(&ProgressEvent::RestoreFinished { restored: 1 });
        assert_eq!(frontend.select_session(&[]).unwrap(), None);
        drop(frontend);

        let seen = ui.join().unwrap();
        assert_eq!(seen, vec!["Replace fonts", "Remove backup", "Restored 1 file(s)"]);
    }

    #[test]
    fn test_closed_ui_cancels() {
        let (mut frontend, requests) = ChannelFrontend::new();
        drop(requests);

        let prompt = ConfirmPrompt::new(ConfirmKind::Restore, "Restore");
        assert!(matches!(
            frontend.confirm(&prompt),
            Err(FontSwapError::Cancelled)
        ));
        // progress to a closed UI is silently dropped
        frontend.report_progress(&ProgressEvent::RestoreFinished { restored: 0 });
    }

    #[test]
    fn test_unanswered_question_cancels() {
        let (mut frontend, requests) = ChannelFrontend::new();

        let ui = thread::spawn(move || {
            // drop the reply sender without answering
            let _ = requests.recv().unwrap();
        });

        let prompt = ConfirmPrompt::new(ConfirmKind::Replace, "Replace");
        assert!(matches!(
            frontend.confirm(&prompt),
            Err(FontSwapError::Cancelled)
        ));
        ui.join().unwrap();
    }
}
