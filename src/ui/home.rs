use ratatui::prelude::*;
use ratatui::widgets::*;

const BANNER: &str = r#"

 ███████╗████████╗ █████╗ ██████╗ ███████╗██╗  ██╗ ██████╗ ████████╗
 ██╔════╝╚══██╔══╝██╔══██╗██╔══██╗██╔════╝██║  ██║██╔═══██╗╚══██╔══╝
 ███████╗   ██║   ███████║██████╔╝███████╗███████║██║   ██║   ██║
 ╚════██║   ██║   ██╔══██║██╔══██╗╚════██║██╔══██║██║   ██║   ██║
 ███████║   ██║   ██║  ██║██║  ██║███████║██║  ██║╚██████╔╝   ██║
 ╚══════╝   ╚═╝   ╚═╝  ╚═╝╚═╝  ╚═╝╚══════╝╚═╝  ╚═╝ ╚═════╝    ╚═╝"#;

struct GameTile {
    key: &'static str,
    icon: &'static str,
    name: &'static str,
    desc: &'static str,
    color: Color,
    border_color: Color,
}

pub const GAME_COUNT: usize = 2;

const GAME_TILES: [GameTile; GAME_COUNT] = [
    GameTile { key: "1", icon: "⭐", name: "Star Catcher", desc: "Catch the stars,\ndodge the meteors!", color: Color::Rgb(255, 215, 60), border_color: Color::Rgb(140, 110, 30) },
    GameTile { key: "2", icon: "🎯", name: "Sharp Shooter", desc: "Shoot the pop-ups\nbefore they fire!", color: Color::Rgb(230, 90, 90), border_color: Color::Rgb(120, 45, 45) },
];

fn render_game_tile(frame: &mut Frame, area: Rect, tile: &GameTile, selected: bool) {
    let border_color = if selected { Color::Rgb(255, 220, 80) } else { tile.border_color };
    let border_type = if selected { BorderType::Double } else { BorderType::Rounded };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 || inner.width == 0 { return; }

    let name_color = if selected { Color::Rgb(255, 255, 255) } else { tile.color };
    let mut lines = vec![Line::from(vec![
        Span::styled(format!("[{}] ", tile.key), Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD)),
        Span::styled(format!("{} ", tile.icon), Style::default()),
        Span::styled(tile.name, Style::default().fg(name_color).add_modifier(Modifier::BOLD)),
    ])];

    for desc_line in tile.desc.split('\n') {
        lines.push(Line::from(Span::styled(
            desc_line,
            Style::default().fg(if selected { Color::Rgb(180, 180, 200) } else { Color::Rgb(120, 120, 140) }),
        )));
    }

    if selected {
        lines.push(Line::from(Span::styled(
            "▶ Enter to play",
            Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD),
        )));
    }

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

fn control_line(keys: &'static str, what: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("    {keys:<17}"), Style::default().fg(Color::Rgb(80, 200, 255))),
        Span::styled(what, Style::default().fg(Color::Rgb(140, 140, 140))),
    ])
}

fn game_controls(game_idx: usize) -> Vec<Line<'static>> {
    let tile = &GAME_TILES[game_idx.min(GAME_COUNT - 1)];
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  {} {}", tile.icon, tile.name),
            Style::default().fg(tile.color).add_modifier(Modifier::BOLD),
        )),
    ];
    match game_idx {
        0 => lines.extend([
            Line::from(Span::styled("  Stars heal you, meteors cost a life.", Style::default().fg(Color::Rgb(100, 100, 120)))),
            Line::from(""),
            control_line("← → / A D", "Move basket"),
            control_line("S / Enter", "Start"),
            control_line("Space / P", "Pause"),
            control_line("R", "Restart"),
        ]),
        _ => lines.extend([
            Line::from(Span::styled("  Clear every wave to level up.", Style::default().fg(Color::Rgb(100, 100, 120)))),
            Line::from(""),
            control_line("Mouse click", "Shoot"),
            control_line("↑ ↓ ← →", "Move crosshair"),
            control_line("Enter / F", "Shoot at crosshair"),
            control_line("S / Enter", "Start"),
            control_line("Space / P", "Pause"),
            control_line("R", "Restart"),
        ]),
    }
    lines
}

pub fn render_home(frame: &mut Frame, area: Rect, selected_game: usize) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(10), // Banner
            Constraint::Length(2),  // Subtitle
            Constraint::Length(7),  // Game tiles
            Constraint::Min(10),    // Controls area
            Constraint::Length(2),  // Footer
        ])
        .split(area);

    let banner = Paragraph::new(BANNER)
        .style(Style::default().fg(Color::Rgb(80, 200, 255)))
        .alignment(Alignment::Center);
    frame.render_widget(banner, chunks[0]);

    let subtitle = Paragraph::new(Line::from(Span::styled(
        "  ✦ Two games, one loop ✦  ",
        Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD | Modifier::ITALIC),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(subtitle, chunks[1]);

    let games_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(60, 150, 200)))
        .title(" 🎮 Games - ←→ Select, Enter to Play ")
        .title_style(Style::default().fg(Color::Rgb(200, 120, 255)).add_modifier(Modifier::BOLD));
    let games_inner = games_block.inner(chunks[2]);
    frame.render_widget(games_block, chunks[2]);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
        .split(games_inner);
    for (i, tile) in GAME_TILES.iter().enumerate() {
        render_game_tile(frame, cols[i], tile, selected_game == i);
    }

    let ctrl_cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[3]);

    let controls = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "  🔧 Navigation",
            Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD),
        )),
        control_line("Tab / Shift+Tab", "Switch tabs"),
        control_line("1-2", "Launch game"),
        control_line("← →", "Select game"),
        control_line("Enter", "Play selected"),
        control_line("Esc", "Return to Home"),
        control_line("q / Ctrl+C", "Quit"),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Rgb(60, 150, 200)))
            .title(" ⌨ Navigation Control ")
            .title_style(Style::default().fg(Color::Rgb(200, 120, 255)).add_modifier(Modifier::BOLD)),
    );
    frame.render_widget(controls, ctrl_cols[0]);

    let tile = &GAME_TILES[selected_game.min(GAME_COUNT - 1)];
    let game_ctrl = Paragraph::new(game_controls(selected_game)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(tile.border_color))
            .title(format!(" 🎮 {} Control ", tile.name))
            .title_style(Style::default().fg(tile.color).add_modifier(Modifier::BOLD)),
    );
    frame.render_widget(game_ctrl, ctrl_cols[1]);

    let footer = Paragraph::new(Line::from(vec![
        Span::styled("  🦀 ", Style::default().fg(Color::Rgb(255, 100, 50))),
        Span::styled(concat!("v", env!("CARGO_PKG_VERSION")), Style::default().fg(Color::Rgb(80, 80, 100))),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(footer, chunks[4]);
}
