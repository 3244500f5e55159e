use ratatui::{layout::Rect, text::Line};

use crate::chat_message::{ChatMessage, Sender};

const MAX_MESSAGES: usize = 200;

/// The scrolling log view: an append-only message buffer plus a scroll
/// offset measured in rendered lines.
#[derive(Debug)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
    scroll: u16,
    /// When set, rendering pins the offset to the bottom of the view.
    follow: bool,
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

impl Transcript {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            scroll: 0,
            follow: true,
        }
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
        if self.messages.len() > MAX_MESSAGES {
            self.messages.remove(0);
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last_from(&self, sender: Sender) -> Option<&ChatMessage> {
        self.messages.iter().rev().find(|m| m.sender() == sender)
    }

    /// All rendered lines for the given viewport, blank-separated per
    /// message.
    pub fn render(&self, area: Rect) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        for message in &self.messages {
            if !lines.is_empty() {
                lines.push(Line::from(""));
            }
            lines.extend(message.render(area));
        }
        lines
    }

    pub fn max_scroll(&self, area: Rect) -> u16 {
        let total = self.render(area).len() as u16;
        total.saturating_sub(area.height)
    }

    /// Clamped offset to feed the paragraph widget. Follow mode is the
    /// TUI analog of `scrollTop = scrollHeight`.
    pub fn scroll_offset(&self, area: Rect) -> u16 {
        let max = self.max_scroll(area);
        if self.follow {
            max
        } else {
            self.scroll.min(max)
        }
    }

    pub fn scroll_to_bottom(&mut self) {
        self.follow = true;
    }

    pub fn scroll_up(&mut self, area: Rect) {
        if self.follow {
            self.scroll = self.max_scroll(area);
            self.follow = false;
        }
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self, area: Rect) {
        let max = self.max_scroll(area);
        self.scroll = (self.scroll + 1).min(max);
        if self.scroll == max {
            self.follow = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Rect {
        Rect::new(0, 0, 40, 5)
    }

    fn filled(n: usize) -> Transcript {
        let mut t = Transcript::new();
        for i in 0..n {
            t.push(ChatMessage::new(Sender::User, format!("message {}", i)));
        }
        t
    }

    #[test]
    fn empty_transcript_has_no_scroll() {
        let t = Transcript::new();
        assert_eq!(t.max_scroll(viewport()), 0);
        assert_eq!(t.scroll_offset(viewport()), 0);
    }

    #[test]
    fn follow_mode_pins_offset_to_max() {
        let t = filled(10);
        let area = viewport();
        assert!(t.max_scroll(area) > 0);
        assert_eq!(t.scroll_offset(area), t.max_scroll(area));
    }

    #[test]
    fn scrolling_up_disengages_follow() {
        let mut t = filled(10);
        let area = viewport();
        let max = t.max_scroll(area);
        t.scroll_up(area);
        assert_eq!(t.scroll_offset(area), max - 1);

        // New content no longer drags the view down.
        t.push(ChatMessage::new(Sender::Bot, "late reply"));
        assert!(t.scroll_offset(area) < t.max_scroll(area));
    }

    #[test]
    fn scrolling_back_down_reengages_follow() {
        let mut t = filled(10);
        let area = viewport();
        t.scroll_up(area);
        let max = t.max_scroll(area);
        for _ in 0..=max {
            t.scroll_down(area);
        }
        assert_eq!(t.scroll_offset(area), max);
        t.push(ChatMessage::new(Sender::Bot, "new"));
        assert_eq!(t.scroll_offset(area), t.max_scroll(area));
    }

    #[test]
    fn buffer_is_capped() {
        let t = filled(MAX_MESSAGES + 25);
        assert_eq!(t.messages().len(), MAX_MESSAGES);
        // Oldest entries were the ones dropped.
        assert_eq!(t.messages()[0].content(), "message 25");
    }
}
