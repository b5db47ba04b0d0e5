use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::input::PointerMap;
use crate::sim::{DrawList, HealthBand, Lifecycle, UiReport};
use crate::ui::canvas::DrawListView;

const BAR_CELLS: usize = 10;

fn band_color(band: HealthBand) -> Color {
    match band {
        HealthBand::Normal => Color::Rgb(80, 220, 80),
        HealthBand::Low => Color::Rgb(255, 170, 40),
        HealthBand::Critical => Color::Rgb(230, 50, 50),
    }
}

pub fn health_bar(percent: u8) -> String {
    let filled = (usize::from(percent) * BAR_CELLS).div_ceil(100).min(BAR_CELLS);
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_CELLS - filled))
}

pub fn status_line(icon: &'static str, ui: &UiReport) -> Line<'static> {
    let sep = || Span::styled(" | ", Style::default().fg(Color::DarkGray));
    let mut spans = vec![
        Span::styled(format!(" {icon} "), Style::default()),
        Span::styled(
            format!("Score: {} ", ui.score),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        sep(),
        Span::styled(
            format!("Lives: {} ", "\u{2665} ".repeat(ui.lives as usize)),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        sep(),
        Span::styled(format!("Level: {} ", ui.level), Style::default().fg(Color::Green)),
        sep(),
        Span::styled("Health ", Style::default().fg(Color::Gray)),
        Span::styled(health_bar(ui.health_percent), Style::default().fg(band_color(ui.health_band))),
        Span::styled(
            format!(" {}%", ui.health_percent),
            Style::default().fg(band_color(ui.health_band)).add_modifier(Modifier::BOLD),
        ),
    ];
    if let Some(left) = ui.remaining_enemies {
        spans.push(sep());
        spans.push(Span::styled(format!("Enemies: {left}"), Style::default().fg(Color::Rgb(200, 120, 120))));
    }
    Line::from(spans)
}

pub fn footer(ui: &UiReport, help: Vec<Span<'static>>) -> Line<'static> {
    match ui.lifecycle {
        Lifecycle::GameOver => Line::from(vec![
            Span::styled(" GAME OVER! ", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::styled(format!("Final score: {} ", ui.score), Style::default().fg(Color::Yellow)),
            Span::styled("| Press ENTER to play again, Esc for menu", Style::default().fg(Color::Gray)),
        ]),
        Lifecycle::Paused => Line::from(vec![Span::styled(
            " PAUSED - Press P to resume ",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )]),
        Lifecycle::NotStarted => Line::from(vec![
            Span::styled(" Press ", Style::default().fg(Color::Gray)),
            Span::styled("S", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::styled(" or ", Style::default().fg(Color::Gray)),
            Span::styled("ENTER", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::styled(" to start", Style::default().fg(Color::Gray)),
        ]),
        Lifecycle::Running => Line::from(help),
    }
}

/// Bordered block, status bar, canvas field and footer, in the suite's layout.
/// The canvas area is written back into `pointer` for mouse mapping.
#[allow(clippy::too_many_arguments)]
pub fn render_game(
    frame: &mut Frame,
    area: Rect,
    title: &'static str,
    accent: Color,
    status: Line<'static>,
    field: &DrawList,
    pointer: &mut PointerMap,
    foot: Line<'static>,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(accent))
        .title(title)
        .title_style(Style::default().fg(accent).add_modifier(Modifier::BOLD));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(8), Constraint::Length(1)])
        .split(inner);

    frame.render_widget(Paragraph::new(status), chunks[0]);

    let (width, height) = pointer.logical_size();
    pointer.set_area(chunks[1]);
    frame.render_widget(DrawListView::new(field, width, height), chunks[1]);

    frame.render_widget(Paragraph::new(foot), chunks[2]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_rounds_partial_cells_up() {
        assert_eq!(health_bar(100), "██████████");
        assert_eq!(health_bar(0), "░░░░░░░░░░");
        assert_eq!(health_bar(15), "██░░░░░░░░");
    }
}
