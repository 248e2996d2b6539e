//! Rendering for the setup and play screens.

use hazard_core::{GameStatus, RollOutcome};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::{App, Game, Screen, SetupField};

const RULES: &[&str] = &[
    "Your first roll sets your point.",
    "Roll your point again and you win.",
    "Roll a 1 at any time and you lose.",
];

pub fn render(frame: &mut Frame, app: &App) {
    match app.screen {
        Screen::Setup => render_setup(frame, app),
        Screen::Playing => render_play(frame, app),
    }
}

fn render_setup(frame: &mut Frame, app: &App) {
    let outer = Block::default().borders(Borders::ALL).title(" Die Game ");
    let inner = outer.inner(frame.area());
    frame.render_widget(outer, frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(RULES.len() as u16 + 2),
            Constraint::Length(7),
            Constraint::Length(2),
            Constraint::Min(0),
        ])
        .split(inner);

    let rules: Vec<Line> = RULES.iter().map(|r| Line::from(*r)).collect();
    frame.render_widget(
        Paragraph::new(rules)
            .block(Block::default().borders(Borders::ALL).title(" Rules "))
            .alignment(Alignment::Center),
        chunks[0],
    );

    frame.render_widget(
        Paragraph::new(form_lines(app)).block(Block::default().borders(Borders::ALL).title(" New die ")),
        chunks[1],
    );

    if let Some(error) = &app.form.error {
        frame.render_widget(
            Paragraph::new(error.as_str())
                .style(Style::default().fg(Color::Red))
                .wrap(Wrap { trim: true }),
            chunks[2],
        );
    }

    frame.render_widget(
        Paragraph::new("Type a value and press Enter to continue. Esc quits.")
            .style(Style::default().fg(Color::DarkGray)),
        chunks[3],
    );
}

fn form_lines(app: &App) -> Vec<Line<'static>> {
    let form = &app.form;
    let active = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let idle = Style::default();

    let field_line = |label: &'static str, value: &str, field: SetupField| -> Line<'static> {
        let style = if form.field == field { active } else { idle };
        let cursor = if form.field == field { "_" } else { "" };
        Line::from(vec![
            Span::styled(label, style),
            Span::styled(format!("{value}{cursor}"), style),
        ])
    };

    let mut lines = vec![field_line("Number of sides (3-50): ", &form.sides, SetupField::Sides)];

    let type_style = if form.field == SetupField::DieType { active } else { idle };
    let (fair, loaded) = if form.wants_loaded {
        ("  fair  ", "[ loaded ]")
    } else {
        ("[ fair ]", "  loaded  ")
    };
    lines.push(Line::from(vec![
        Span::styled("Die type:               ", type_style),
        Span::styled(fair, type_style),
        Span::raw(" "),
        Span::styled(loaded, type_style),
    ]));

    if form.wants_loaded {
        lines.push(field_line(
            "Load factor % (1-100):  ",
            &form.load_factor,
            SetupField::LoadFactor,
        ));
        lines.push(field_line(
            "Loaded side:            ",
            &form.loaded_side,
            SetupField::LoadedSide,
        ));
    }

    lines
}

fn render_play(frame: &mut Frame, app: &App) {
    let Some(game) = app.game.as_ref() else {
        return;
    };

    let outer = Block::default().borders(Borders::ALL).title(" Die Game ");
    let inner = outer.inner(frame.area());
    frame.render_widget(outer, frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(7),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    frame.render_widget(
        Paragraph::new(header_line(game)).alignment(Alignment::Center),
        chunks[0],
    );

    render_die(frame, game, chunks[1]);

    if !game.history.is_empty() {
        let faces = game
            .history
            .iter()
            .map(|r| r.face.to_string())
            .collect::<Vec<_>>()
            .join("  ");
        frame.render_widget(
            Paragraph::new(format!("rolls: {faces}"))
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            chunks[2],
        );
    }

    if let Some(status) = &app.status {
        frame.render_widget(
            Paragraph::new(status.as_str())
                .style(Style::default().fg(Color::Red))
                .alignment(Alignment::Center),
            chunks[3],
        );
    }

    frame.render_widget(
        Paragraph::new("[r] roll   [n] new game   [q] quit")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        chunks[4],
    );
}

fn header_line(game: &Game) -> Line<'_> {
    let die = game.session.die().to_string();
    match game.session.point() {
        Some(point) => Line::from(format!("{die}  |  point: {point}")),
        None => Line::from(format!("{die}  |  roll to set your point")),
    }
}

/// The die display: the last rolled face, or the end-of-game banner once the
/// reveal delay has passed.
fn render_die(frame: &mut Frame, game: &Game, area: Rect) {
    let boxed = centered_rect(area, 13, 5);

    if game.banner_visible() {
        let (text, color) = match game.session.status() {
            GameStatus::Won => ("YOU WIN", Color::Green),
            GameStatus::Lost => ("YOU LOSE", Color::Red),
            GameStatus::InProgress => unreachable!("banner only appears after a terminal roll"),
        };
        let detail = match game.session.status() {
            GameStatus::Won => "you rolled your point again",
            _ => "the die came up 1",
        };
        let lines = vec![
            Line::from(Span::styled(
                text,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(detail, Style::default().fg(color))),
        ];
        frame.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center),
            centered_rect(area, 40, 2),
        );
        return;
    }

    match game.last_roll() {
        Some(roll) => {
            let highlight = match roll.outcome {
                RollOutcome::Continue => Color::Yellow,
                RollOutcome::Won => Color::Green,
                RollOutcome::Lost => Color::Red,
            };
            let face = Line::from(Span::styled(
                roll.face.to_string(),
                Style::default().fg(highlight).add_modifier(Modifier::BOLD),
            ));
            frame.render_widget(
                Paragraph::new(vec![Line::raw(""), face])
                    .block(Block::default().borders(Borders::ALL))
                    .alignment(Alignment::Center),
                boxed,
            );
        }
        None => {
            frame.render_widget(
                Paragraph::new(vec![Line::raw(""), Line::from("?")])
                    .block(Block::default().borders(Borders::ALL))
                    .alignment(Alignment::Center),
                boxed,
            );
        }
    }
}

/// Center a `width` x `height` box inside `area`, clamped to fit.
fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
