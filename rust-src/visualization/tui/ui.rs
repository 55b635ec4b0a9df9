//! Renders the dashboard using ratatui widgets.

use ratatui::prelude::*;
use ratatui::widgets::*;

use super::app::{App, Focus, SidebarItem, Tab};
use crate::aggregation::CountRow;
use crate::models::ContentType;


const VERSION: &str = env!("CARGO_PKG_VERSION");
const SIDEBAR_WIDTH: u16 = 34;


pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Body
            Constraint::Length(3), // Footer/help
        ])
        .split(frame.area());

    render_header(frame, chunks[0], app);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(40)])
        .split(chunks[1]);

    render_sidebar(frame, body[0], app);
    render_main(frame, body[1], app);
    render_footer(frame, chunks[2], app);
}


fn type_color(content_type: ContentType) -> Color {
    match content_type {
        ContentType::Movie => Color::Red,
        ContentType::TvShow => Color::Blue,
    }
}


fn rounded(title: impl Into<String>) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(title.into())
}


fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let mut title = format!(
        " catx v{} - {} of {} titles - {} ",
        VERSION,
        app.dashboard.filtered_rows,
        app.dashboard.total_rows,
        app.catalog.source().display(),
    );
    if let Some(status) = &app.status {
        title.push_str(&format!("- {status} "));
    }

    let block = rounded(title).title_style(Style::default().fg(Color::Cyan).bold());
    frame.render_widget(block, area);
}


fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let help_text = match app.focus {
        Focus::Main => {
            " [Tab/←→] Charts | [↑↓] Scroll | [f] Filters | [[ ]] From year | [{ }] To year | [r] Reload | [q] Quit "
        }
        Focus::Sidebar => {
            " [↑↓] Navigate | [Space] Toggle | [←→] Adjust year | [a/c] All/Clear countries | [f] Charts | [q] Quit "
        }
    };

    let help = Paragraph::new(help_text)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(rounded(""));

    frame.render_widget(help, area);
}


fn render_sidebar(frame: &mut Frame, area: Rect, app: &App) {
    let (from, to) = app.filter.year_range;
    let (lo, hi) = app.filter.bounds();

    let items: Vec<ListItem> = app
        .sidebar
        .iter()
        .map(|item| {
            let checkbox = if app.is_selected(item) { "[x]" } else { "[ ]" };
            let line = match item {
                SidebarItem::Type(t) => Line::from(vec![
                    Span::raw(format!("{checkbox} ")),
                    Span::styled(t.label(), Style::default().fg(type_color(*t))),
                ]),
                SidebarItem::YearFrom => Line::from(vec![
                    Span::styled("From ", Style::default().fg(Color::DarkGray)),
                    Span::styled(format!("◀ {from} ▶"), Style::default().fg(Color::Yellow)),
                    Span::styled(format!("  (min {lo})"), Style::default().fg(Color::DarkGray)),
                ]),
                SidebarItem::YearTo => Line::from(vec![
                    Span::styled("To   ", Style::default().fg(Color::DarkGray)),
                    Span::styled(format!("◀ {to} ▶"), Style::default().fg(Color::Yellow)),
                    Span::styled(format!("  (max {hi})"), Style::default().fg(Color::DarkGray)),
                ]),
                SidebarItem::Country(c) => Line::from(format!("{checkbox} {c}")),
            };
            ListItem::new(line)
        })
        .collect();

    let border_style = if app.focus == Focus::Sidebar {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let list = List::new(items)
        .block(
            rounded(format!(
                " Filters ({} countries) ",
                app.filter.countries.len()
            ))
            .border_style(border_style),
        )
        .highlight_style(Style::default().fg(Color::Cyan).bold())
        .highlight_symbol("▶ ");

    let mut state = ListState::default();
    if app.focus == Focus::Sidebar {
        state.select(Some(app.sidebar_cursor));
    }

    frame.render_stateful_widget(list, area, &mut state);
}


fn render_main(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5)])
        .split(area);

    let tabs = Tabs::new(Tab::ALL.iter().map(|t| t.title()))
        .select(app.tab.index())
        .highlight_style(Style::default().fg(Color::Cyan).bold())
        .block(rounded(""));
    frame.render_widget(tabs, chunks[0]);

    let content = chunks[1];
    match app.tab {
        Tab::Overview => render_overview(frame, content, app),
        Tab::Directors => render_ranking(
            frame,
            content,
            " Top 10 Directors with Most Content ",
            &app.dashboard.top_directors,
            Color::LightRed,
        ),
        Tab::Trends => render_trends(frame, content, app),
        Tab::Countries => render_ranking(
            frame,
            content,
            " Top 10 Countries Producing Content ",
            &app.dashboard.top_countries,
            Color::Green,
        ),
        Tab::Durations => render_durations(frame, content, app),
        Tab::Genres => render_ranking(
            frame,
            content,
            " Most Common Genres ",
            &app.dashboard.top_genres,
            Color::Magenta,
        ),
        Tab::Data => render_data(frame, content, app),
    }
}


fn no_data(frame: &mut Frame, area: Rect, title: &str) {
    let paragraph = Paragraph::new(Span::styled(
        "No data available",
        Style::default().fg(Color::DarkGray),
    ))
    .alignment(Alignment::Center)
    .block(rounded(title.to_string()));
    frame.render_widget(paragraph, area);
}


/// Type distribution gauges next to the rating bar chart.
fn render_overview(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let shares = &app.dashboard.type_distribution;
    if shares.is_empty() {
        no_data(frame, chunks[0], " Distribution of Movies and TV Shows ");
    } else {
        let block = rounded(" Distribution of Movies and TV Shows ");
        let inner = block.inner(chunks[0]);
        frame.render_widget(block, chunks[0]);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(shares.iter().map(|_| Constraint::Length(3)).collect::<Vec<_>>())
            .split(inner);

        for (share, row) in shares.iter().zip(rows.iter()) {
            let gauge = Gauge::default()
                .block(Block::default().title(share.content_type.label()))
                .gauge_style(Style::default().fg(type_color(share.content_type)))
                .ratio((share.share / 100.0).clamp(0.0, 1.0))
                .label(format!("{} ({:.1}%)", share.count, share.share));
            frame.render_widget(gauge, *row);
        }
    }

    let ratings = &app.dashboard.rating_distribution;
    if ratings.is_empty() {
        no_data(frame, chunks[1], " Content Rating Distribution ");
        return;
    }

    let bars: Vec<Bar> = ratings
        .iter()
        .map(|r| {
            Bar::default()
                .value(r.count as u64)
                .label(Line::from(r.label.clone()))
                .style(Style::default().fg(Color::Yellow))
        })
        .collect();

    let chart = BarChart::default()
        .block(rounded(" Content Rating Distribution "))
        .bar_width(5)
        .bar_gap(1)
        .data(BarGroup::default().bars(&bars));

    frame.render_widget(chart, chunks[1]);
}


/// Horizontal bar chart of a frequency table.
fn render_ranking(frame: &mut Frame, area: Rect, title: &str, rows: &[CountRow], color: Color) {
    if rows.is_empty() {
        no_data(frame, area, title);
        return;
    }

    let bars: Vec<Bar> = rows
        .iter()
        .map(|r| {
            Bar::default()
                .value(r.count as u64)
                .label(Line::from(truncate(&r.label, 28)))
                .text_value(r.count.to_string())
                .style(Style::default().fg(color))
        })
        .collect();

    let chart = BarChart::default()
        .block(rounded(title.to_string()))
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(1)
        .data(BarGroup::default().bars(&bars));

    frame.render_widget(chart, area);
}


/// Yearly additions per type and monthly additions as line charts.
fn render_trends(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let yearly = &app.dashboard.yearly_additions;
    if yearly.is_empty() {
        no_data(frame, chunks[0], " Content Added Over the Years ");
    } else {
        let min_year = yearly.iter().map(|r| r.year).min().unwrap_or(0) as f64;
        let max_year = yearly.iter().map(|r| r.year).max().unwrap_or(0) as f64;
        let max_count = yearly.iter().map(|r| r.count).max().unwrap_or(0) as f64;

        let series: Vec<(ContentType, Vec<(f64, f64)>)> = ContentType::ALL
            .iter()
            .map(|t| {
                let points = yearly
                    .iter()
                    .filter(|r| r.content_type == *t)
                    .map(|r| (r.year as f64, r.count as f64))
                    .collect();
                (*t, points)
            })
            .collect();

        let datasets: Vec<Dataset> = series
            .iter()
            .filter(|(_, points)| !points.is_empty())
            .map(|(t, points)| {
                Dataset::default()
                    .name(t.label())
                    .marker(symbols::Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(type_color(*t)))
                    .data(points)
            })
            .collect();

        let chart = Chart::new(datasets)
            .block(rounded(" Content Added Over the Years "))
            .x_axis(
                Axis::default()
                    .bounds([min_year, max_year.max(min_year + 1.0)])
                    .labels(vec![
                        Span::raw(format!("{min_year:.0}")),
                        Span::raw(format!("{max_year:.0}")),
                    ]),
            )
            .y_axis(
                Axis::default()
                    .bounds([0.0, max_count.max(1.0)])
                    .labels(vec![Span::raw("0"), Span::raw(format!("{max_count:.0}"))]),
            );

        frame.render_widget(chart, chunks[0]);
    }

    let monthly = &app.dashboard.monthly_additions;
    if monthly.is_empty() {
        no_data(frame, chunks[1], " Monthly Content Additions ");
        return;
    }

    let points: Vec<(f64, f64)> = monthly
        .iter()
        .enumerate()
        .map(|(i, m)| (i as f64, m.count as f64))
        .collect();
    let max_count = monthly.iter().map(|m| m.count).max().unwrap_or(0) as f64;
    let first = monthly.first().map(|m| m.month.clone()).unwrap_or_default();
    let last = monthly.last().map(|m| m.month.clone()).unwrap_or_default();

    let chart = Chart::new(vec![Dataset::default()
        .name("Titles added")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Yellow))
        .data(&points)])
    .block(rounded(" Monthly Content Additions "))
    .x_axis(
        Axis::default()
            .bounds([0.0, (points.len().saturating_sub(1) as f64).max(1.0)])
            .labels(vec![Span::raw(first), Span::raw(last)]),
    )
    .y_axis(
        Axis::default()
            .bounds([0.0, max_count.max(1.0)])
            .labels(vec![Span::raw("0"), Span::raw(format!("{max_count:.0}"))]),
    );

    frame.render_widget(chart, chunks[1]);
}


/// Movie duration histogram with the density curve below it.
fn render_durations(frame: &mut Frame, area: Rect, app: &App) {
    let hist = &app.dashboard.movie_durations;
    if hist.bins.is_empty() {
        no_data(frame, area, " Movie Duration Distribution ");
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let bars: Vec<Bar> = hist
        .bins
        .iter()
        .map(|b| {
            Bar::default()
                .value(b.count as u64)
                .label(Line::from(format!("{:.0}", b.start)))
                .style(Style::default().fg(Color::Blue))
        })
        .collect();

    let title = match hist.mean {
        Some(mean) => format!(
            " Movie Duration Distribution ({} movies, mean {:.1} min) ",
            hist.samples, mean
        ),
        None => " Movie Duration Distribution ".to_string(),
    };

    let chart = BarChart::default()
        .block(rounded(title))
        .bar_width(3)
        .bar_gap(1)
        .data(BarGroup::default().bars(&bars));
    frame.render_widget(chart, chunks[0]);

    if hist.density.is_empty() {
        no_data(frame, chunks[1], " Density ");
        return;
    }

    let lo = hist.density.first().map(|(x, _)| *x).unwrap_or(0.0);
    let hi = hist.density.last().map(|(x, _)| *x).unwrap_or(1.0);
    let max = hist.density.iter().map(|(_, d)| *d).fold(0.0, f64::max);

    let chart = Chart::new(vec![Dataset::default()
        .name("Density")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::LightBlue))
        .data(&hist.density)])
    .block(rounded(" Density "))
    .x_axis(
        Axis::default()
            .bounds([lo, hi.max(lo + 1.0)])
            .labels(vec![
                Span::raw(format!("{lo:.0} min")),
                Span::raw(format!("{hi:.0} min")),
            ]),
    )
    .y_axis(Axis::default().bounds([0.0, max.max(f64::EPSILON)]));

    frame.render_widget(chart, chunks[1]);
}


/// Scrollable table of the filtered rows.
fn render_data(frame: &mut Frame, area: Rect, app: &App) {
    let preview = &app.dashboard.preview;
    let title = format!(" Data Preview ({} rows) ", preview.len());
    if preview.is_empty() {
        no_data(frame, area, &title);
        return;
    }

    let header = Row::new(vec![
        "Type", "Title", "Director", "Country", "Added", "Year", "Rating", "Duration", "Genres",
    ])
    .style(Style::default().fg(Color::Cyan).bold());

    let rows: Vec<Row> = preview
        .iter()
        .map(|e| {
            Row::new(vec![
                Cell::from(Span::styled(
                    e.content_type.label(),
                    Style::default().fg(type_color(e.content_type)),
                )),
                Cell::from(e.title.clone()),
                Cell::from(e.director.clone().unwrap_or_default()),
                Cell::from(e.country.clone().unwrap_or_default()),
                Cell::from(e.date_added.format("%Y-%m-%d").to_string()),
                Cell::from(e.release_year.to_string()),
                Cell::from(e.rating.clone()),
                Cell::from(e.duration.clone()),
                Cell::from(e.listed_in.clone()),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(8),
        Constraint::Percentage(20),
        Constraint::Percentage(14),
        Constraint::Percentage(14),
        Constraint::Length(10),
        Constraint::Length(5),
        Constraint::Length(8),
        Constraint::Length(10),
        Constraint::Min(10),
    ];

    let border_style = if app.focus == Focus::Main {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let table = Table::new(rows, widths)
        .header(header)
        .block(rounded(title).border_style(border_style))
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("▶ ");

    let mut state = TableState::default().with_selected(Some(app.table_cursor));
    frame.render_stateful_widget(table, area, &mut state);
}


fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let mut t: String = s.chars().take(max.saturating_sub(1)).collect();
        t.push('…');
        t
    } else {
        s.to_string()
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use ratatui::backend::TestBackend;

    use crate::filter::FilterState;
    use crate::models::catalog_entry::tests::entry;
    use crate::models::Catalog;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn app() -> App {
        let catalog = Arc::new(Catalog::new(
            vec![
                entry(ContentType::Movie, "India", 2010),
                entry(ContentType::TvShow, "Japan", 2012),
            ],
            "test.csv",
            0,
        ));
        let filter = FilterState::defaults(&catalog);
        App::new(catalog, filter)
    }

    #[test]
    fn test_render_every_tab() {
        let mut app = app();
        let mut terminal = Terminal::new(TestBackend::new(160, 48)).unwrap();

        for tab in Tab::ALL {
            app.tab = tab;
            terminal.draw(|f| render(f, &app)).unwrap();
            let text = buffer_text(&terminal);
            assert!(text.contains("Filters"), "sidebar missing on {:?}", tab);
            assert!(text.contains(tab.title()), "tab title missing on {:?}", tab);
        }
    }

    #[test]
    fn test_render_empty_selection() {
        let mut app = app();
        app.handle_key(crossterm::event::KeyCode::Char('c'));
        app.tab = Tab::Data;

        let mut terminal = Terminal::new(TestBackend::new(160, 48)).unwrap();
        terminal.draw(|f| render(f, &app)).unwrap();

        assert!(buffer_text(&terminal).contains("No data available"));
    }

    #[test]
    fn test_header_shows_reload_status() {
        let mut app = app();
        app.status = Some("dataset unchanged".to_string());

        let mut terminal = Terminal::new(TestBackend::new(160, 48)).unwrap();
        terminal.draw(|f| render(f, &app)).unwrap();

        assert!(buffer_text(&terminal).contains("dataset unchanged"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Documentaries", 20), "Documentaries");
        assert_eq!(truncate("International TV Shows", 10), "Internati…");
    }
}
