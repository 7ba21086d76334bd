//! Overlay rendering (error banner)

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Popup area sized to fit `message` wrapped inside a fixed-width box
pub fn error_popup_area(area: Rect, message: &str) -> Rect {
    let popup_width = 52u16.min(area.width.saturating_sub(4));
    let inner_width = popup_width.saturating_sub(4).max(1) as usize; // account for borders

    let line_count = message.chars().count().div_ceil(inner_width).max(1) as u16;

    // Height: top border (1) + error lines + bottom border (1)
    let popup_height = (2 + line_count).min(area.height.saturating_sub(4));

    Rect {
        x: area.width.saturating_sub(popup_width) / 2,
        y: area.height.saturating_sub(popup_height) / 2,
        width: popup_width,
        height: popup_height,
    }
}

pub fn render_error_notification(frame: &mut Frame, message: &str) {
    let popup_area = error_popup_area(frame.area(), message);

    // Clear the area behind the popup first
    frame.render_widget(Clear, popup_area);

    let error_widget = Paragraph::new(message.to_string())
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title(" Error (Esc to dismiss) ")
                .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
                .style(Style::default().bg(Color::Black)),
        );

    frame.render_widget(error_widget, popup_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn popup_is_centered_and_fits() {
        let screen = Rect::new(0, 0, 100, 40);
        let popup = error_popup_area(screen, "No result found");

        assert_eq!(popup.width, 52);
        assert_eq!(popup.height, 3);
        assert_eq!(popup.x, 24);
    }

    #[test]
    fn long_messages_wrap_onto_more_lines() {
        let screen = Rect::new(0, 0, 100, 40);
        let message = "Search failed: network error: ".repeat(4);

        assert!(error_popup_area(screen, &message).height > 3);
    }

    #[test]
    fn tiny_terminal_does_not_underflow() {
        let popup = error_popup_area(Rect::new(0, 0, 3, 2), "boom");
        assert_eq!(popup.height, 0);
    }
}
