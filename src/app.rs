use ratatui::layout::Rect;

use crate::chat_message::{ChatMessage, Sender};
use crate::errors::ParleyResult;
use crate::status_indicator::StatusIndicator;
use crate::transcript::Transcript;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Chat,
    QuitConfirm,
    Quit,
}

pub struct App {
    pub state: AppState,
    pub transcript: Transcript,
    pub input: String,
    pub status_indicator: StatusIndicator,
    /// Requests currently awaiting a reply. A counter, not a flag:
    /// submissions are not serialized and cycles may overlap.
    in_flight: usize,
    /// Transcript viewport from the last draw, for scroll clamping.
    pub chat_area: Rect,
}

impl App {
    pub fn new() -> App {
        App {
            state: AppState::Chat,
            transcript: Transcript::new(),
            input: String::new(),
            status_indicator: StatusIndicator::new(),
            in_flight: 0,
            chat_area: Rect::default(),
        }
    }

    /// Reads the input control and starts a send. An empty input is a
    /// complete no-op: nothing rendered, nothing returned, so the caller
    /// issues no request. Otherwise the user's line goes into the
    /// transcript immediately and the query text is handed back for the
    /// caller to dispatch. The input is only cleared once a reply lands.
    pub fn submit(&mut self) -> Option<String> {
        if self.input.is_empty() {
            return None;
        }

        let query = self.input.clone();
        self.transcript
            .push(ChatMessage::new(Sender::User, query.clone()));
        self.transcript.scroll_to_bottom();
        self.in_flight += 1;
        self.status_indicator.set_waiting(true);
        log::info!("query submitted ({} chars)", query.len());
        Some(query)
    }

    /// Finishes a send cycle. A reply becomes a bot line, clears the
    /// input, and pins the view to the bottom. A failure becomes an
    /// error line and leaves the input untouched so nothing typed is
    /// lost.
    pub fn apply_outcome(&mut self, outcome: ParleyResult<String>) {
        self.in_flight = self.in_flight.saturating_sub(1);
        if self.in_flight == 0 {
            self.status_indicator.set_waiting(false);
        }

        match outcome {
            Ok(reply) => {
                self.transcript.push(ChatMessage::new(Sender::Bot, reply));
                self.input.clear();
                self.transcript.scroll_to_bottom();
            }
            Err(e) => {
                log::warn!("send failed: {}", e);
                self.transcript
                    .push(ChatMessage::new(Sender::Error, e.to_string()));
                self.transcript.scroll_to_bottom();
            }
        }
    }

    pub fn is_waiting(&self) -> bool {
        self.in_flight > 0
    }

    pub fn push_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn backspace(&mut self) {
        self.input.pop();
    }

    pub fn scroll_up(&mut self) {
        self.transcript.scroll_up(self.chat_area);
    }

    pub fn scroll_down(&mut self) {
        self.transcript.scroll_down(self.chat_area);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
