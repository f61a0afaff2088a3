//! Screen rendering
//!
//! One exhaustive match over [`Screen`]; every frame is drawn from a state
//! snapshot and nothing else.

use super::style::{domain_color, domain_emoji, hint_color};
use crate::facts::FactRecord;
use crate::state_machine::{Screen, SessionContext, SessionState, Stage};
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph, Wrap};
use ratatui::Frame;

const SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Draw the whole frame
pub fn draw(frame: &mut Frame, state: &SessionState, context: &SessionContext, tick: usize) {
    let [body, footer] = Layout::vertical([Constraint::Min(8), Constraint::Length(1)]).areas(frame.area());

    match &state.screen {
        Screen::Start => draw_start(frame, body, context),
        Screen::Loading { .. } => draw_loading(frame, body, tick),
        Screen::ShowingFact { fact, stage } => {
            draw_fact(frame, body, fact, *stage, state.can_choose_new_topic(context));
        }
        Screen::Exit => draw_exit(frame, body, state.history.len()),
    }

    let hint = match state.screen {
        Screen::Exit => "any key: leave",
        _ => "q: quit",
    };
    frame.render_widget(
        Paragraph::new(hint)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Right),
        footer,
    );
}

fn card(color: Color) -> Block<'static> {
    Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_start(frame: &mut Frame, area: Rect, context: &SessionContext) {
    let [header, menu] = Layout::vertical([Constraint::Length(5), Constraint::Min(3)]).areas(area);

    let title = Paragraph::new(vec![
        Line::from(Span::styled(
            "👋 Welcome!",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from("Where do you want to start?"),
    ])
    .alignment(Alignment::Center)
    .block(card(Color::Cyan));
    frame.render_widget(title, header);

    // Two columns, filled row by row
    let rows = context.domains.len().div_ceil(2).max(1);
    let row_areas = Layout::vertical(vec![Constraint::Ratio(1, u32::try_from(rows).unwrap_or(1)); rows]).split(menu);
    for (i, domain) in context.domains.iter().enumerate() {
        let Some(row) = row_areas.get(i / 2) else {
            break;
        };
        let [left, right] = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(*row);
        let cell = if i % 2 == 0 { left } else { right };

        let label = Paragraph::new(Line::from(vec![
            Span::styled(format!("[{}] ", i + 1), Style::default().fg(Color::DarkGray)),
            Span::raw(format!("{} ", domain_emoji(domain))),
            Span::styled(
                domain.to_uppercase(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]))
        .alignment(Alignment::Center)
        .block(card(domain_color(domain)));
        frame.render_widget(label, cell);
    }
}

fn draw_loading(frame: &mut Frame, area: Rect, tick: usize) {
    let [top, bottom] = Layout::vertical([Constraint::Percentage(66), Constraint::Percentage(34)]).areas(area);
    let spinner = SPINNER[tick % SPINNER.len()];

    frame.render_widget(
        Paragraph::new(vec![
            Line::from(""),
            Line::from(format!("✨ {spinner}")),
            Line::from(Span::styled(
                "Thinking...",
                Style::default().add_modifier(Modifier::BOLD),
            )),
        ])
        .alignment(Alignment::Center)
        .block(card(Color::Indexed(99))),
        top,
    );
    frame.render_widget(
        Paragraph::new("Wait for it...")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(card(Color::DarkGray)),
        bottom,
    );
}

fn draw_fact(frame: &mut Frame, area: Rect, fact: &FactRecord, stage: Stage, new_topic_enabled: bool) {
    let [top, bottom] = Layout::vertical([Constraint::Percentage(66), Constraint::Percentage(34)]).areas(area);
    let color = hint_color(&fact.presentation_hint);

    let fact_card = Paragraph::new(vec![
        Line::from(fact.emoji.as_str()),
        Line::from(Span::styled(
            fact.domain.to_uppercase(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(fact.text.as_str()),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(card(color));
    frame.render_widget(fact_card, top);

    let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
    let prompt = match stage {
        Stage::AskedKnowledge => vec![
            Line::from(Span::styled(
                "Did you know that?",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![key("[y]"), Span::raw(" Yes   "), key("[n]"), Span::raw(" No")]),
        ],
        Stage::AskedNextAction => {
            let new_topic = if new_topic_enabled {
                vec![key("[t]"), Span::raw(" New topic   ")]
            } else {
                vec![Span::styled(
                    "[t] New topic (all explored)   ",
                    Style::default().fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT),
                )]
            };
            let mut choices = vec![key("[m]"), Span::raw(" More on this   ")];
            choices.extend(new_topic);
            choices.extend([key("[d]"), Span::raw(" Done")]);
            vec![
                Line::from(Span::styled(
                    "What next?",
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(choices),
            ]
        }
    };
    frame.render_widget(
        Paragraph::new(prompt)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(card(Color::Gray)),
        bottom,
    );
}

fn draw_exit(frame: &mut Frame, area: Rect, facts_seen: usize) {
    let noun = if facts_seen == 1 { "fact" } else { "facts" };
    frame.render_widget(
        Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "🎉 Great exploring!",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(format!("You checked {facts_seen} {noun} today.")),
            Line::from("Press any key to leave."),
        ])
        .alignment(Alignment::Center)
        .block(card(Color::LightGreen)),
        area,
    );
}
