use crate::movie::MovieDetail;
use crate::search::SearchPhase;
use crate::ui::app::{App, InputField, ListView};
use crate::ui::theme::Palette;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let palette = app.theme().palette();
    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(palette.background).fg(palette.text)),
        area,
    );

    let [inputs, body, footer] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(area);

    draw_inputs(frame, app, palette, inputs);
    draw_list(frame, app, palette, body);
    draw_footer(frame, app, palette, footer);

    if let Some(detail) = &app.session().selected {
        draw_detail(frame, app, palette, detail, area);
    }
}

fn draw_inputs(frame: &mut Frame<'_>, app: &App, palette: &Palette, area: Rect) {
    let [title_area, genre_area] =
        Layout::horizontal([Constraint::Percentage(70), Constraint::Percentage(30)]).areas(area);

    let session = app.session();
    let title = input_box(
        "Search",
        &session.query.text,
        app.focus() == InputField::Title,
        palette,
    );
    let genre = input_box(
        "Genre",
        app.genre_input(),
        app.focus() == InputField::Genre,
        palette,
    );
    frame.render_widget(title, title_area);
    frame.render_widget(genre, genre_area);
}

fn input_box<'a>(label: &'a str, value: &'a str, focused: bool, palette: &Palette) -> Paragraph<'a> {
    let border = if focused { palette.accent } else { palette.border };
    let mut spans = vec![Span::raw(value)];
    if focused {
        spans.push(Span::styled("_", Style::default().fg(palette.accent)));
    }
    Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(label),
    )
}

fn draw_list(frame: &mut Frame<'_>, app: &App, palette: &Palette, area: Rect) {
    let session = app.session();
    let items = app.visible_items();
    let title = match app.view() {
        ListView::Results => match session.total_results {
            Some(total) => format!("Results ({} of {})", session.results.len(), total),
            None => format!("Results ({})", session.results.len()),
        },
        ListView::Favorites => format!("Favorites ({})", items.len()),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border))
        .title(title);

    if items.is_empty() {
        let message = match (app.view(), session.phase) {
            (ListView::Favorites, _) => "No favorites yet",
            (_, SearchPhase::Idle) => "Type to search for a movie",
            (_, SearchPhase::Searching) => "Searching...",
            (_, SearchPhase::Error) => "",
            _ => "No movies found",
        };
        let paragraph = Paragraph::new(message)
            .style(Style::default().fg(palette.muted))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let rows: Vec<ListItem> = items
        .iter()
        .map(|movie| {
            let heart = if app.is_favorite(&movie.id) { "♥ " } else { "  " };
            ListItem::new(Line::from(vec![
                Span::styled(heart, Style::default().fg(palette.favorite)),
                Span::styled(movie.title.clone(), Style::default().fg(palette.text)),
                Span::styled(format!("  {}", movie.year), Style::default().fg(palette.muted)),
            ]))
        })
        .collect();

    let list = List::new(rows).block(block).highlight_style(
        Style::default()
            .bg(palette.highlight)
            .add_modifier(Modifier::BOLD),
    );
    let mut state = ListState::default().with_selected(Some(app.highlighted()));
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_footer(frame: &mut Frame<'_>, app: &App, palette: &Palette, area: Rect) {
    let session = app.session();
    let mut spans = Vec::new();

    if session.loading {
        let frame_index = usize::from(app.animation_tick()) % SPINNER.len();
        spans.push(Span::styled(
            format!("{} loading  ", SPINNER[frame_index]),
            Style::default().fg(palette.accent),
        ));
    }

    if let Some(error) = &session.error {
        spans.push(Span::styled(
            format!("{}  ", error),
            Style::default().fg(palette.error),
        ));
    } else if let Some(notice) = app.notice() {
        spans.push(Span::styled(
            format!("{}  ", notice),
            Style::default().fg(palette.muted),
        ));
    }

    let more = if session.can_load_more() && session.has_more() {
        " ^N more"
    } else {
        ""
    };
    spans.push(Span::styled(
        format!(
            "Tab field  ↑↓ move  Enter details  ^F favorite  ^V favorites  ^T theme  ^L clear{}  ^Q quit",
            more
        ),
        Style::default().fg(palette.muted),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_detail(frame: &mut Frame<'_>, app: &App, palette: &Palette, detail: &MovieDetail, area: Rect) {
    let popup = centered_rect(area, 70, 70);
    frame.render_widget(Clear, popup);

    let or_na = |value: &str| -> String {
        if value.trim().is_empty() {
            "N/A".to_string()
        } else {
            value.to_string()
        }
    };
    let label = |name: &'static str| Span::styled(name, Style::default().add_modifier(Modifier::BOLD));

    let favorite = if app.is_favorite(&detail.summary.id) {
        "♥ favorite"
    } else {
        "not a favorite"
    };

    let lines = vec![
        Line::from(vec![label("Plot: "), Span::raw(or_na(&detail.plot))]),
        Line::from(""),
        Line::from(vec![label("Director: "), Span::raw(or_na(&detail.director))]),
        Line::from(vec![label("Actors: "), Span::raw(or_na(&detail.actors))]),
        Line::from(vec![label("Genre: "), Span::raw(or_na(&detail.genre))]),
        Line::from(vec![label("Released: "), Span::raw(or_na(&detail.released))]),
        Line::from(vec![
            label("Poster: "),
            Span::raw(detail.summary.poster_url.clone().unwrap_or_else(|| "N/A".to_string())),
        ]),
        Line::from(""),
        Line::from(Span::styled(favorite, Style::default().fg(palette.favorite))),
        Line::from(Span::styled(
            "Esc close  ^F favorite",
            Style::default().fg(palette.muted),
        )),
    ];

    let title = if detail.summary.title.trim().is_empty() {
        "No Title".to_string()
    } else {
        format!("{} ({})", detail.summary.title, detail.summary.year)
    };

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .style(Style::default().bg(palette.background).fg(palette.text))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.accent))
                .title(title),
        );
    frame.render_widget(paragraph, popup);
}

fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let [_, middle, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(area);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(middle);
    center
}
