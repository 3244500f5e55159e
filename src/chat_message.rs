use chrono::{DateTime, Local};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use textwrap::wrap;

use crate::utils::sanitize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
    Error,
}

#[derive(Debug, Clone)]
pub struct ChatMessage {
    sender: Sender,
    content: String,
    timestamp: DateTime<Local>,
}

impl ChatMessage {
    /// Content is sanitized here so nothing downstream has to care where
    /// the text came from.
    pub fn new(sender: Sender, content: impl Into<String>) -> Self {
        Self {
            sender,
            content: sanitize(&content.into()),
            timestamp: Local::now(),
        }
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    fn label(&self) -> &'static str {
        match self.sender {
            Sender::User => "You",
            Sender::Bot => "Bot",
            Sender::Error => "Error",
        }
    }

    fn base_style(&self) -> Style {
        match self.sender {
            Sender::User => Style::default().fg(Color::Rgb(255, 223, 128)),
            Sender::Bot => Style::default().fg(Color::Rgb(144, 238, 144)),
            Sender::Error => Style::default().fg(Color::Red).add_modifier(Modifier::DIM),
        }
    }

    /// Renders the message as styled lines for the given viewport width.
    /// Untrusted text only ever becomes span content, never markup.
    pub fn render(&self, area: Rect) -> Vec<Line<'static>> {
        let style = self.base_style();
        let mut lines = Vec::new();

        let timestamp = self.timestamp.format("%H:%M").to_string();
        lines.push(Line::from(vec![
            Span::styled(format!("┌─ {} ", self.label()), style),
            Span::styled(timestamp, style.add_modifier(Modifier::DIM)),
        ]));

        let wrap_width = (area.width as usize).saturating_sub(4).max(1);
        for paragraph in self.content.split('\n') {
            if paragraph.is_empty() {
                lines.push(Line::from(Span::styled("│".to_string(), style)));
                continue;
            }
            for wrapped in wrap(paragraph, wrap_width) {
                lines.push(Line::from(vec![
                    Span::styled("│ ".to_string(), style),
                    Span::styled(wrapped.to_string(), style),
                ]));
            }
        }

        lines.push(Line::from(Span::styled("╰─".to_string(), style)));
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_is_sanitized_on_construction() {
        let msg = ChatMessage::new(Sender::Bot, "hi\x1b[2Jthere");
        assert_eq!(msg.content(), "hi[2Jthere");
    }

    #[test]
    fn render_wraps_long_content() {
        let msg = ChatMessage::new(Sender::User, "a ".repeat(50));
        let area = Rect::new(0, 0, 20, 10);
        // header + several wrapped lines + footer
        assert!(msg.render(area).len() > 4);
    }

    #[test]
    fn render_tags_sender_in_header() {
        let area = Rect::new(0, 0, 40, 10);
        for (sender, label) in [
            (Sender::User, "You"),
            (Sender::Bot, "Bot"),
            (Sender::Error, "Error"),
        ] {
            let lines = ChatMessage::new(sender, "x").render(area);
            let header: String = lines[0]
                .spans
                .iter()
                .map(|s| s.content.clone().into_owned())
                .collect();
            assert!(header.contains(label));
        }
    }
}
