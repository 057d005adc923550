use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    prelude::*,
    widgets::{Bar, BarChart, BarGroup, Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use std::io::stdout;

use crate::dashboard::Dashboard;
use crate::models::{Application, Status};
use crate::pipeline::{StatusFilter, PAGE_SIZE_OPTIONS};
use crate::store::RecordStore;
use crate::truncate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Normal,
    Search,
    ConfirmDelete,
}

struct AppState {
    selected: usize,
    scroll_offset: u16,
    mode: Mode,
    show_chart: bool,
}

impl AppState {
    fn new() -> Self {
        Self {
            selected: 0,
            scroll_offset: 0,
            mode: Mode::Normal,
            show_chart: false,
        }
    }

    fn next(&mut self, page_len: usize) {
        if page_len > 0 && self.selected < page_len - 1 {
            self.selected += 1;
            self.scroll_offset = 0;
        }
    }

    fn prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            self.scroll_offset = 0;
        }
    }

    fn reset_selection(&mut self) {
        self.selected = 0;
        self.scroll_offset = 0;
    }

    fn scroll_down(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_add(3);
    }

    fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(3);
    }
}

pub fn run_browse<S: RecordStore>(dashboard: &mut Dashboard<'_, S>) -> Result<()> {
    let mut state = AppState::new();

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = run_loop(&mut terminal, &mut state, dashboard);

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

fn selected_id<S: RecordStore>(dashboard: &Dashboard<'_, S>, state: &AppState) -> Option<String> {
    dashboard.view().items.get(state.selected).map(|a| a.id.clone())
}

fn next_filter(filter: StatusFilter) -> StatusFilter {
    let position = match filter {
        StatusFilter::All => None,
        StatusFilter::Only(status) => Status::ALL.iter().position(|s| *s == status),
    };
    match position {
        None => StatusFilter::Only(Status::ALL[0]),
        Some(i) if i + 1 < Status::ALL.len() => StatusFilter::Only(Status::ALL[i + 1]),
        Some(_) => StatusFilter::All,
    }
}

fn next_page_size(current: usize) -> usize {
    let idx = PAGE_SIZE_OPTIONS.iter().position(|s| *s == current).unwrap_or(0);
    PAGE_SIZE_OPTIONS[(idx + 1) % PAGE_SIZE_OPTIONS.len()]
}

fn run_loop<S: RecordStore>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    state: &mut AppState,
    dashboard: &mut Dashboard<'_, S>,
) -> Result<()> {
    let mut list_state = ListState::default();

    loop {
        let page_len = dashboard.view().items.len();
        if state.selected >= page_len {
            state.selected = page_len.saturating_sub(1);
        }
        list_state.select((page_len > 0).then_some(state.selected));
        terminal.draw(|frame| draw(frame, state, dashboard, &mut list_state))?;

        let Event::Key(key) = event::read()? else { continue };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match state.mode {
            Mode::Search => match key.code {
                KeyCode::Enter | KeyCode::Esc => state.mode = Mode::Normal,
                KeyCode::Backspace => {
                    let mut search = dashboard.query().search.clone();
                    search.pop();
                    dashboard.set_search(&search);
                    state.reset_selection();
                }
                KeyCode::Char(c) => {
                    let search = format!("{}{}", dashboard.query().search, c);
                    dashboard.set_search(&search);
                    state.reset_selection();
                }
                _ => {}
            },
            Mode::ConfirmDelete => {
                if key.code == KeyCode::Char('y') {
                    if let Some(id) = selected_id(dashboard, state) {
                        // failures surface through last_error in the footer
                        let _ = dashboard.delete(&id);
                    }
                }
                state.mode = Mode::Normal;
            }
            Mode::Normal => match key.code {
                KeyCode::Esc if dashboard.last_error().is_some() => dashboard.clear_error(),
                KeyCode::Char('q') | KeyCode::Esc => break,
                KeyCode::Down | KeyCode::Char('j') => state.next(page_len),
                KeyCode::Up | KeyCode::Char('k') => state.prev(),
                KeyCode::Char('J') | KeyCode::PageDown => state.scroll_down(),
                KeyCode::Char('K') | KeyCode::PageUp => state.scroll_up(),
                KeyCode::Right | KeyCode::Char('n') => {
                    dashboard.next_page();
                    state.reset_selection();
                }
                KeyCode::Left | KeyCode::Char('p') => {
                    dashboard.prev_page();
                    state.reset_selection();
                }
                KeyCode::Char('/') => state.mode = Mode::Search,
                KeyCode::Char('s') => {
                    let filter = next_filter(dashboard.query().status);
                    let _ = dashboard.set_status_filter(filter);
                    state.reset_selection();
                }
                KeyCode::Char('o') => {
                    let sort = dashboard.query().sort.next();
                    dashboard.set_sort(sort);
                    state.reset_selection();
                }
                KeyCode::Char('r') => {
                    dashboard.toggle_direction();
                    state.reset_selection();
                }
                KeyCode::Char('+') => {
                    let size = next_page_size(dashboard.query().page_size);
                    let _ = dashboard.set_page_size(size);
                    state.reset_selection();
                }
                KeyCode::Char('R') => {
                    let _ = dashboard.refresh();
                }
                KeyCode::Char('c') => state.show_chart = !state.show_chart,
                KeyCode::Char('f') => {
                    if let Some(id) = selected_id(dashboard, state) {
                        let _ = dashboard.toggle_favorite(&id);
                    }
                }
                KeyCode::Char('a') => {
                    if let Some(id) = selected_id(dashboard, state) {
                        let _ = dashboard.archive(&id);
                    }
                }
                KeyCode::Char('d') => {
                    if selected_id(dashboard, state).is_some() {
                        state.mode = Mode::ConfirmDelete;
                    }
                }
                KeyCode::Char(c @ '1'..='5') => {
                    let status = match c {
                        '1' => Status::Applied,
                        '2' => Status::Interview,
                        '3' => Status::Offer,
                        '4' => Status::Rejected,
                        _ => Status::FollowUp,
                    };
                    if let Some(id) = selected_id(dashboard, state) {
                        let _ = dashboard.set_status(&id, status);
                    }
                }
                _ => {}
            },
        }
    }
    Ok(())
}

fn status_color(status: Status) -> Color {
    status.color().parse().unwrap_or(Color::White)
}

fn status_icon(status: Status) -> &'static str {
    match status {
        Status::Applied => " ",
        Status::Interview => "*",
        Status::Offer => "+",
        Status::Rejected => "x",
        Status::FollowUp => ">",
        Status::Archived => "-",
    }
}

fn draw<S: RecordStore>(
    frame: &mut Frame,
    state: &AppState,
    dashboard: &Dashboard<'_, S>,
    list_state: &mut ListState,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0), Constraint::Length(2)])
        .split(frame.area());

    let summary = dashboard.summary();
    let header = Paragraph::new(format!(
        " {}  |  Total {}  Interviews {}  Offers {}  Favorites {}",
        dashboard.owner().email,
        summary.total,
        summary.interviews,
        summary.offers,
        summary.favorited
    ))
    .style(Style::default().add_modifier(Modifier::BOLD));
    frame.render_widget(header, rows[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[1]);

    // Left panel: current page
    let page = dashboard.view();
    let items: Vec<ListItem> = page
        .items
        .iter()
        .map(|app| {
            let star = if dashboard.favorites().contains(&app.id) { "♥" } else { " " };
            let line = Line::from(vec![
                Span::styled(status_icon(app.status), Style::default().fg(status_color(app.status))),
                Span::raw(format!(
                    "{} {} | {}",
                    star,
                    truncate(&app.position, 28),
                    truncate(&app.company, 18)
                )),
            ]);
            ListItem::new(line)
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(format!(
            " Applications ({}) ",
            page.total
        )))
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, columns[0], list_state);

    // Right panel: detail, optionally with the status chart below it
    let right = if state.show_chart {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(columns[1])
    } else {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(100)])
            .split(columns[1])
    };

    let detail = build_detail(page.items.get(state.selected).copied(), dashboard);
    let detail_widget = Paragraph::new(detail)
        .block(Block::default().borders(Borders::ALL).title(" Detail "))
        .wrap(Wrap { trim: false })
        .scroll((state.scroll_offset, 0));
    frame.render_widget(detail_widget, right[0]);

    if state.show_chart {
        let bars: Vec<Bar> = summary
            .by_status
            .iter()
            .map(|c| {
                Bar::default()
                    .value(c.count as u64)
                    .label(Line::from(c.status.label()))
                    .style(Style::default().fg(status_color(c.status)))
            })
            .collect();
        let chart = BarChart::default()
            .block(Block::default().borders(Borders::ALL).title(" Applications by Status "))
            .data(BarGroup::default().bars(&bars))
            .bar_width(9)
            .bar_gap(1);
        frame.render_widget(chart, right[1]);
    }

    // Footer: paging, filters, errors and help
    let query = dashboard.query();
    let status_line = match state.mode {
        Mode::Search => format!(" search: {}_", query.search),
        Mode::ConfirmDelete => " Delete this application permanently? (y/n)".to_string(),
        Mode::Normal => format!(
            " Page {} of {} | status: {} | sort: {} {} | per page: {}{}",
            page.page,
            page.total_pages.max(1),
            query.status,
            query.sort,
            query.direction,
            query.page_size,
            if query.search.is_empty() {
                String::new()
            } else {
                format!(" | search: {}", query.search)
            }
        ),
    };
    let mut footer = vec![Line::from(status_line)];
    match dashboard.last_error() {
        Some(err) => footer.push(Line::from(Span::styled(
            format!(" {}", err),
            Style::default().fg(Color::Red),
        ))),
        None => footer.push(Line::from(Span::styled(
            " j/k:move n/p:page /:search s:status o:sort r:reverse +:size f:fav a:archive 1-5:set d:delete c:chart q:quit",
            Style::default().fg(Color::DarkGray),
        ))),
    }
    frame.render_widget(Paragraph::new(footer), rows[2]);
}

fn build_detail<'a, S: RecordStore>(app: Option<&'a Application>, dashboard: &Dashboard<'_, S>) -> Text<'a> {
    let Some(app) = app else {
        return Text::raw("No applications match the current filters.");
    };

    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled(
        app.position.as_str(),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(format!("at {} ({})", app.company, app.location)));
    lines.push(Line::from(Span::styled(
        format!("Status: {}", app.status),
        Style::default().fg(status_color(app.status)),
    )));
    if dashboard.favorites().contains(&app.id) {
        lines.push(Line::from("Favorite"));
    }
    lines.push(Line::from(format!("Applied: {}", app.date_applied.format("%b %-d, %Y"))));
    if let Some(salary) = &app.salary {
        lines.push(Line::from(format!("Salary: {}", salary)));
    }
    if let Some(manager) = &app.hiring_manager {
        lines.push(Line::from(format!("Hiring manager: {}", manager)));
    }
    if let Some(url) = &app.job_url {
        let online = if app.posting_online { "online" } else { "closed" };
        lines.push(Line::from(format!("Posting ({}): {}", online, url)));
    }
    lines.push(Line::from(Span::styled(
        format!("Id: {}", app.id),
        Style::default().fg(Color::DarkGray),
    )));

    lines.push(Line::from(""));
    if let Some(notes) = &app.notes {
        lines.push(Line::from(Span::styled(
            "Notes",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for line in textwrap::fill(notes, 70).lines() {
            lines.push(Line::from(format!("  {}", line)));
        }
    } else {
        lines.push(Line::from(Span::styled(
            "(No notes)",
            Style::default().fg(Color::DarkGray),
        )));
    }

    Text::from(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_filter_cycle_visits_every_status() {
        let mut filter = StatusFilter::All;
        let mut seen = Vec::new();
        for _ in 0..Status::ALL.len() {
            filter = next_filter(filter);
            seen.push(filter);
        }
        assert_eq!(seen.last(), Some(&StatusFilter::Only(Status::Archived)));
        assert_eq!(next_filter(filter), StatusFilter::All);
    }

    #[test]
    fn test_page_size_cycle_wraps() {
        assert_eq!(next_page_size(6), 12);
        assert_eq!(next_page_size(48), 6);
    }
}
