//! Text report rendering for terminal output.

use std::fmt::Write as _;

use crate::aggregation::{CountRow, Dashboard};
use crate::config::PREVIEW_ROWS;


// Constants
const RED: &str = "\x1b[38;5;160m";
const CYAN: &str = "\x1b[36m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";
const BAR_WIDTH: usize = 20;
const LABEL_WIDTH: usize = 30;
const RULE: &str = "────────────────────────────────────────────────────────────────────────────";


/// Format number with thousands separator.
pub fn format_number(num: usize) -> String {
    let s = num.to_string();
    let mut result = String::new();
    let chars: Vec<char> = s.chars().collect();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }

    result
}


/// Create a simple text bar for visualization.
fn create_bar(value: usize, max_value: usize, width: usize, color: &str) -> String {
    if max_value == 0 {
        return "░".repeat(width);
    }

    let filled = ((value as f64 / max_value as f64) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!(
        "{}{}{}{}{}{}",
        color,
        "█".repeat(filled),
        RESET,
        DIM,
        "░".repeat(width - filled),
        RESET,
    )
}


/// Truncate a label to `width` characters.
fn fit(label: &str, width: usize) -> String {
    if label.chars().count() > width {
        let mut s: String = label.chars().take(width - 1).collect();
        s.push('…');
        s
    } else {
        label.to_string()
    }
}


/// Render the complete report as a string.
pub fn render_report(dashboard: &Dashboard) -> String {
    let mut out = String::new();

    render_header(&mut out, dashboard);
    render_preview(&mut out, dashboard);

    render_section(
        &mut out,
        "Distribution of Movies and TV Shows",
        &dashboard
            .type_distribution
            .iter()
            .map(|s| CountRow::new(s.content_type.label(), s.count))
            .collect::<Vec<_>>(),
    );
    render_section(&mut out, "Top 10 Directors with Most Content", &dashboard.top_directors);
    render_yearly_trend(&mut out, dashboard);
    render_monthly_trend(&mut out, dashboard);
    render_section(&mut out, "Top 10 Countries Producing Content", &dashboard.top_countries);
    render_section(&mut out, "Content Rating Distribution", &dashboard.rating_distribution);
    render_durations(&mut out, dashboard);
    render_section(&mut out, "Most Common Genres", &dashboard.top_genres);

    render_footer(&mut out, dashboard);
    out
}


/// Print the report to stdout.
pub fn print_report(dashboard: &Dashboard) {
    print!("{}", render_report(dashboard));
}


fn render_header(out: &mut String, dashboard: &Dashboard) {
    let _ = writeln!(out, "┌{}┐", RULE);
    let _ = writeln!(out, "│{:^76}│", "Catalog Exploration Dashboard");
    let _ = writeln!(out, "└{}┘", RULE);
    let _ = writeln!(
        out,
        "{}Showing {}{}{}{} of {} titles{}",
        DIM,
        RESET,
        BOLD,
        format_number(dashboard.filtered_rows),
        RESET,
        format_number(dashboard.total_rows),
        RESET,
    );
    let _ = writeln!(out);
}


fn render_preview(out: &mut String, dashboard: &Dashboard) {
    let _ = writeln!(out, "{}Data Preview{}", BOLD, RESET);
    if dashboard.preview.is_empty() {
        let _ = writeln!(out, "{}No titles match the current filters{}", DIM, RESET);
        let _ = writeln!(out);
        return;
    }

    for entry in dashboard.preview.iter().take(PREVIEW_ROWS) {
        let _ = writeln!(
            out,
            "  {:<8} {:<32} {:<20} {:>4}  {:<8} {}",
            entry.content_type.label(),
            fit(&entry.title, 32),
            fit(entry.country.as_deref().unwrap_or("-"), 20),
            entry.release_year,
            entry.rating,
            entry.duration,
        );
    }
    if dashboard.preview.len() > PREVIEW_ROWS {
        let _ = writeln!(
            out,
            "  {}... {} more{}",
            DIM,
            format_number(dashboard.preview.len() - PREVIEW_ROWS),
            RESET
        );
    }
    let _ = writeln!(out);
}


/// Render one boxed bar section.
fn render_section(out: &mut String, title: &str, rows: &[CountRow]) {
    let _ = writeln!(out, "┌{}┐", RULE);
    let _ = writeln!(out, "│ {}{:<75}{}│", BOLD, title, RESET);
    let _ = writeln!(out, "├{}┤", RULE);

    if rows.is_empty() {
        let _ = writeln!(out, "│ {}{:<75}{}│", DIM, "No data available", RESET);
        let _ = writeln!(out, "└{}┘", RULE);
        let _ = writeln!(out);
        return;
    }

    let total: usize = rows.iter().map(|r| r.count).sum();
    let max = rows.iter().map(|r| r.count).max().unwrap_or(0);

    for row in rows {
        let percentage = if total > 0 {
            row.count as f64 / total as f64 * 100.0
        } else {
            0.0
        };

        let _ = writeln!(
            out,
            "│ {:<width$} {} {}{:>10}{} {}{:>6.1}%{}    │",
            fit(&row.label, LABEL_WIDTH),
            create_bar(row.count, max, BAR_WIDTH, RED),
            RED,
            format_number(row.count),
            RESET,
            CYAN,
            percentage,
            RESET,
            width = LABEL_WIDTH,
        );
    }

    let _ = writeln!(out, "└{}┘", RULE);
    let _ = writeln!(out);
}


fn render_yearly_trend(out: &mut String, dashboard: &Dashboard) {
    let rows: Vec<CountRow> = dashboard
        .yearly_additions
        .iter()
        .map(|r| CountRow::new(format!("{} {}", r.year, r.content_type.label()), r.count))
        .collect();

    render_section(out, "Trend of Content Added Over Time by Type", &rows);
}


fn render_monthly_trend(out: &mut String, dashboard: &Dashboard) {
    let rows: Vec<CountRow> = dashboard
        .monthly_additions
        .iter()
        .map(|m| CountRow::new(m.month.clone(), m.count))
        .collect();

    render_section(out, "Trend of Content Added by Month", &rows);
}


fn render_durations(out: &mut String, dashboard: &Dashboard) {
    let hist = &dashboard.movie_durations;
    let rows: Vec<CountRow> = hist
        .bins
        .iter()
        .map(|b| CountRow::new(format!("{:>5.0} - {:<5.0} min", b.start, b.end), b.count))
        .collect();

    render_section(out, "Movie Duration Distribution", &rows);

    if let Some(mean) = hist.mean {
        let _ = writeln!(
            out,
            "{}Movies: {}  Mean duration: {:.1} min{}",
            DIM,
            format_number(hist.samples),
            mean,
            RESET
        );
        let _ = writeln!(out);
    }
}


/// Render the footer with the active filter and date range.
fn render_footer(out: &mut String, dashboard: &Dashboard) {
    let _ = writeln!(out, "{}Filters: {}{}{}", DIM, RESET, CYAN, dashboard.filter);
    let _ = write!(out, "{}", RESET);

    if let Some(range) = dashboard.date_range_label() {
        let _ = writeln!(out, "{}Date added: {}{}{}{}", DIM, RESET, CYAN, range, RESET);
    }

    let _ = writeln!(
        out,
        "{}Tip: explore interactively with {}{}catx dashboard{}",
        DIM, RESET, CYAN, RESET
    );
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterState;
    use crate::models::catalog_entry::tests::entry;
    use crate::models::{Catalog, ContentType};

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(8807), "8,807");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn test_create_bar_empty_max() {
        assert_eq!(create_bar(0, 0, 4, RED), "░░░░");
    }

    #[test]
    fn test_fit_truncates() {
        assert_eq!(fit("short", 10), "short");
        assert_eq!(fit("a very long label", 6), "a ver…");
    }

    #[test]
    fn test_report_contains_every_section() {
        let catalog = Catalog::new(
            vec![
                entry(ContentType::Movie, "India", 2010),
                entry(ContentType::TvShow, "Japan", 2012),
            ],
            "test.csv",
            0,
        );
        let dashboard = Dashboard::build(&catalog, &FilterState::defaults(&catalog));
        let report = render_report(&dashboard);

        for title in [
            "Data Preview",
            "Distribution of Movies and TV Shows",
            "Top 10 Directors with Most Content",
            "Trend of Content Added Over Time by Type",
            "Trend of Content Added by Month",
            "Top 10 Countries Producing Content",
            "Content Rating Distribution",
            "Movie Duration Distribution",
            "Most Common Genres",
        ] {
            assert!(report.contains(title), "missing section {title}");
        }
        assert!(report.contains("Title 2010"));
        assert!(report.contains("years: 2010-2012"));
    }

    #[test]
    fn test_report_empty_selection() {
        let catalog = Catalog::new(vec![entry(ContentType::Movie, "India", 2010)], "t.csv", 0);
        let mut filter = FilterState::defaults(&catalog);
        filter.clear_countries();

        let report = render_report(&Dashboard::build(&catalog, &filter));
        assert!(report.contains("No titles match the current filters"));
        assert!(report.contains("No data available"));
    }
}
