use crate::app::{App, FocusPane};
use omendeck_core::{GroupKind, HOLD_LIMIT};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Alignment, Color, Line, Modifier, Style, Stylize};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

pub fn draw(frame: &mut Frame, app: &App) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),
            Constraint::Min(9),
            Constraint::Length(9),
            Constraint::Min(6),
        ])
        .split(frame.area());

    draw_header(frame, root[0], app);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(root[1]);

    draw_deck_panel(frame, middle[0], app);
    draw_current_panel(frame, middle[1], app);
    draw_held(frame, root[2], app);
    draw_events(frame, root[3], app);

    if app.show_help {
        draw_help_popup(frame, app);
    }
}

fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let title = format!(
        "Omendeck CUI | Focus: {} | Hint: {}",
        app.focus_label(app.focus),
        app.next_hint()
    );
    let summary = format!(
        "Deck {}  Discard {}  Held {}  Phase {}",
        app.session.deck_len(),
        app.session.discard_len(),
        app.held_count_label(),
        app.phase_label()
    );
    let extra = format!(
        "Seed {} | Cards {}",
        app.session.seed(),
        app.cards_path.display()
    );
    let lines = vec![
        Line::from(title.bold()),
        Line::from(summary),
        Line::from(extra),
        Line::from(format!("Status: {}", app.status_line)),
    ];
    let block = Block::default().borders(Borders::ALL).title("Overview");
    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true }).block(block);
    frame.render_widget(paragraph, area);
}

fn draw_deck_panel(frame: &mut Frame, area: Rect, app: &App) {
    let mut lines = vec![
        Line::from(format!("Deck: {}", app.session.deck_len())),
        Line::from(format!("Discard: {}", app.session.discard_len())),
        Line::from(format!("Held: {}", app.held_count_label())),
    ];
    if app.session.pending_reshuffle() {
        lines.push(Line::from(""));
        lines.push(Line::styled(
            "Reshuffle is queued. Next draw resets the".to_string(),
            Style::default().fg(Color::Yellow),
        ));
        lines.push(Line::styled(
            "deck (held cards stay out).".to_string(),
            Style::default().fg(Color::Yellow),
        ));
    }
    let block = Block::default().borders(Borders::ALL).title("Events Deck");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_current_panel(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().borders(Borders::ALL).title("Current Card");
    let Some(card) = app.session.current() else {
        let paragraph = Paragraph::new("Draw a card to begin.")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    };

    let mut badge = format!("{} | {}", card.group, card.timing);
    if card.reshuffle {
        badge.push_str(" | RESHUFFLE");
    }
    let mut lines = vec![
        Line::styled(badge, Style::default().fg(group_color(card.group_kind()))),
        Line::from(format!("[{}] {}", card.id, card.name).bold()),
    ];
    if !card.effect.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(card.effect.clone()));
    }
    lines.push(Line::from(""));
    if app.session.can_hold_current() {
        lines.push(Line::styled(
            "h holds this card".to_string(),
            Style::default().fg(Color::DarkGray),
        ));
    } else if card.holdable() {
        lines.push(Line::styled(
            "Hold is full.".to_string(),
            Style::default().fg(Color::Yellow),
        ));
    }
    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true }).block(block);
    frame.render_widget(paragraph, area);
}

fn draw_held(frame: &mut Frame, area: Rect, app: &App) {
    let held_len = app.session.held().len();
    let items: Vec<ListItem<'_>> = (0..HOLD_LIMIT)
        .map(|index| {
            let item = ListItem::new(app.held_slot_label(index));
            if index < held_len {
                item
            } else {
                item.style(Style::default().fg(Color::DarkGray))
            }
        })
        .collect();
    let title = format!("Hold ({})", app.held_count_label());
    let block = pane_block(title.as_str(), app.focus == FocusPane::Held);
    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(">> ");
    let mut state = ListState::default();
    if held_len > 0 {
        state.select(Some(app.held_cursor.min(held_len - 1)));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_events(frame: &mut Frame, area: Rect, app: &App) {
    let capacity = area.height.saturating_sub(2) as usize;
    let start = app.event_log.len().saturating_sub(capacity);
    let lines: Vec<Line<'_>> = app
        .event_log
        .iter()
        .skip(start)
        .map(|line| Line::from(line.clone()))
        .collect();
    let block = pane_block("Events", app.focus == FocusPane::Events);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_help_popup(frame: &mut Frame, _app: &App) {
    let area = centered_rect(60, 50, frame.area());
    frame.render_widget(Clear, area);
    let lines = vec![
        Line::from("q quit | ? help | tab focus | arrows/jk move"),
        Line::from("d draw | h hold | x discard"),
        Line::from("enter/p play held | del/D discard held"),
        Line::from(""),
        Line::from("a drawn RESHUFFLE card queues a deck reset;"),
        Line::from("the next d performs it and held cards stay out"),
    ];
    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn group_color(kind: GroupKind) -> Color {
    match kind {
        GroupKind::Good => Color::Green,
        GroupKind::MinorBad => Color::Yellow,
        GroupKind::MajorBad => Color::Red,
        GroupKind::Neutral => Color::DarkGray,
    }
}

fn pane_block(title: &str, focused: bool) -> Block<'_> {
    let mut block = Block::default().title(title).borders(Borders::ALL);
    if focused {
        block = block.border_style(Style::default().fg(Color::Yellow));
    }
    block
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
