//! SVG/PNG export of the dashboard charts.

use std::path::Path;

use anyhow::{Context, Result};

use crate::aggregation::{CountRow, Dashboard};
use crate::models::ContentType;


// Color scheme
const BG: &str = "#141414";
const PANEL_BG: &str = "#1F1F1F";
const TEXT: &str = "#F5F5F1";
const TEXT_SECONDARY: &str = "#B3B3B3";
const GRID: &str = "#333333";
const MOVIE_COLOR: &str = "#E50914";
const SHOW_COLOR: &str = "#4A90D9";
const LINE_COLOR: &str = "#F5C518";

// Palettes as gradient stops
const COOLWARM: [(u8, u8, u8); 3] = [(59, 76, 192), (221, 221, 221), (180, 4, 38)];
const VIRIDIS: [(u8, u8, u8); 3] = [(68, 1, 84), (33, 145, 140), (253, 231, 37)];
const MAGMA: [(u8, u8, u8); 3] = [(0, 0, 4), (183, 55, 121), (252, 253, 191)];

// Layout
const PAGE_WIDTH: f64 = 1240.0;
const HEADER_HEIGHT: f64 = 80.0;
const PANEL_WIDTH: f64 = 590.0;
const PANEL_HEIGHT: f64 = 360.0;
const PANEL_GAP: f64 = 20.0;
const PANEL_PAD: f64 = 16.0;
const TITLE_SPACE: f64 = 36.0;


/// Inner plotting rectangle of a panel.
#[derive(Debug, Clone, Copy)]
struct Area {
    x: f64,
    y: f64,
    w: f64,
    h: f64,
}


/// Export the dashboard as SVG.
pub fn export_dashboard_svg(dashboard: &Dashboard, output_path: &Path) -> Result<()> {
    let svg_content = generate_svg(dashboard);

    std::fs::write(output_path, svg_content)
        .with_context(|| format!("Failed to write SVG to {}", output_path.display()))?;

    Ok(())
}


/// Export the dashboard as PNG.
pub fn export_dashboard_png(dashboard: &Dashboard, output_path: &Path) -> Result<()> {
    let svg_content = generate_svg(dashboard);

    let mut options = resvg::usvg::Options::default();
    options.fontdb_mut().load_system_fonts();

    // Parse SVG
    let tree = resvg::usvg::Tree::from_str(&svg_content, &options)
        .context("Failed to parse SVG")?;

    // Render to pixmap
    let size = tree.size();
    let mut pixmap = tiny_skia::Pixmap::new(size.width() as u32, size.height() as u32)
        .context("Failed to create pixmap")?;

    let bg = hex_to_rgb(BG);
    pixmap.fill(tiny_skia::Color::from_rgba8(bg.0, bg.1, bg.2, 255));

    resvg::render(&tree, tiny_skia::Transform::identity(), &mut pixmap.as_mut());

    pixmap
        .save_png(output_path)
        .with_context(|| format!("Failed to save PNG to {}", output_path.display()))?;

    Ok(())
}


/// Generate the full SVG page.
pub fn generate_svg(dashboard: &Dashboard) -> String {
    let rows = 4.0;
    let height = HEADER_HEIGHT + rows * (PANEL_HEIGHT + PANEL_GAP) + 40.0;

    let mut svg = vec![
        format!(
            r#"<svg width="{}" height="{}" xmlns="http://www.w3.org/2000/svg">"#,
            PAGE_WIDTH, height
        ),
        "<style>".to_string(),
        format!("  .title {{ fill: {}; font: bold 22px sans-serif; }}", TEXT),
        format!("  .subtitle {{ fill: {}; font: 13px sans-serif; }}", TEXT_SECONDARY),
        format!("  .panel-title {{ fill: {}; font: bold 15px sans-serif; }}", TEXT),
        format!("  .label {{ fill: {}; font: 11px sans-serif; }}", TEXT_SECONDARY),
        format!("  .value {{ fill: {}; font: 11px sans-serif; }}", TEXT),
        "</style>".to_string(),
        format!(r#"<rect width="{}" height="{}" fill="{}"/>"#, PAGE_WIDTH, height, BG),
        r#"<text x="20" y="38" class="title">Catalog Exploration Dashboard</text>"#.to_string(),
        format!(
            r#"<text x="20" y="62" class="subtitle">{} of {} titles | {}</text>"#,
            dashboard.filtered_rows,
            dashboard.total_rows,
            escape_xml(&dashboard.filter.to_string()),
        ),
    ];

    let panels: [(&str, Box<dyn Fn(Area) -> String + '_>); 8] = [
        ("Content Type Distribution", Box::new(move |a| type_pie(dashboard, a))),
        ("Top 10 Directors", Box::new(move |a| bar_chart(&dashboard.top_directors, a, &COOLWARM))),
        ("Content Added Over the Years", Box::new(move |a| yearly_lines(dashboard, a))),
        ("Monthly Content Additions", Box::new(move |a| monthly_line(dashboard, a))),
        ("Top 10 Countries", Box::new(move |a| bar_chart(&dashboard.top_countries, a, &VIRIDIS))),
        ("Rating Distribution", Box::new(move |a| column_chart(&dashboard.rating_distribution, a))),
        ("Movie Duration Distribution", Box::new(move |a| duration_histogram(dashboard, a))),
        ("Most Common Genres", Box::new(move |a| bar_chart(&dashboard.top_genres, a, &MAGMA))),
    ];

    for (i, (title, draw)) in panels.iter().enumerate() {
        let col = (i % 2) as f64;
        let row = (i / 2) as f64;
        let x = PANEL_GAP + col * (PANEL_WIDTH + PANEL_GAP);
        let y = HEADER_HEIGHT + row * (PANEL_HEIGHT + PANEL_GAP);

        svg.push(format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" rx="8" fill="{}"/>"#,
            x, y, PANEL_WIDTH, PANEL_HEIGHT, PANEL_BG
        ));
        svg.push(format!(
            r#"<text x="{}" y="{}" class="panel-title">{}</text>"#,
            x + PANEL_PAD,
            y + 26.0,
            title
        ));

        let area = Area {
            x: x + PANEL_PAD,
            y: y + TITLE_SPACE,
            w: PANEL_WIDTH - 2.0 * PANEL_PAD,
            h: PANEL_HEIGHT - TITLE_SPACE - PANEL_PAD,
        };
        svg.push(draw(area));
    }

    svg.push("</svg>".to_string());
    svg.join("\n")
}


fn no_data(area: Area) -> String {
    format!(
        r#"<text x="{}" y="{}" class="label" text-anchor="middle">No data available</text>"#,
        area.x + area.w / 2.0,
        area.y + area.h / 2.0
    )
}


fn type_color(content_type: ContentType) -> &'static str {
    match content_type {
        ContentType::Movie => MOVIE_COLOR,
        ContentType::TvShow => SHOW_COLOR,
    }
}


/// Donut chart of content type shares.
fn type_pie(dashboard: &Dashboard, area: Area) -> String {
    let shares = &dashboard.type_distribution;
    if shares.is_empty() {
        return no_data(area);
    }

    let cx = area.x + area.h / 2.0 + 20.0;
    let cy = area.y + area.h / 2.0;
    let r = area.h / 2.0 - 10.0;
    let hole = r * 0.3;

    let mut parts = Vec::new();
    let mut angle = -std::f64::consts::FRAC_PI_2;

    for (i, share) in shares.iter().enumerate() {
        let color = type_color(share.content_type);
        let sweep = share.share / 100.0 * std::f64::consts::TAU;

        if shares.len() == 1 {
            parts.push(format!(
                r#"<circle cx="{cx}" cy="{cy}" r="{r}" fill="{color}"/>"#
            ));
        } else {
            let end = angle + sweep;
            let large = if sweep > std::f64::consts::PI { 1 } else { 0 };
            parts.push(format!(
                r#"<path d="M {cx} {cy} L {} {} A {r} {r} 0 {large} 1 {} {} Z" fill="{color}"/>"#,
                cx + r * angle.cos(),
                cy + r * angle.sin(),
                cx + r * end.cos(),
                cy + r * end.sin(),
            ));
            angle = end;
        }

        let ly = area.y + 30.0 + i as f64 * 24.0;
        let lx = cx + r + 40.0;
        parts.push(format!(
            r#"<rect x="{lx}" y="{}" width="14" height="14" fill="{color}"/>"#,
            ly - 11.0
        ));
        parts.push(format!(
            r#"<text x="{}" y="{ly}" class="value">{} ({}, {:.1}%)</text>"#,
            lx + 22.0,
            share.content_type.label(),
            share.count,
            share.share
        ));
    }

    parts.push(format!(r#"<circle cx="{cx}" cy="{cy}" r="{hole}" fill="{PANEL_BG}"/>"#));
    parts.join("\n")
}


/// Horizontal bars, largest on top.
fn bar_chart(rows: &[CountRow], area: Area, palette: &[(u8, u8, u8)]) -> String {
    if rows.is_empty() {
        return no_data(area);
    }

    let label_w = 170.0;
    let value_w = 50.0;
    let bar_max = area.w - label_w - value_w;
    let slot = area.h / rows.len() as f64;
    let bar_h = (slot * 0.7).min(28.0);
    let max = rows.iter().map(|r| r.count).max().unwrap_or(1).max(1);

    let mut parts = Vec::new();
    for (i, row) in rows.iter().enumerate() {
        let y = area.y + i as f64 * slot + (slot - bar_h) / 2.0;
        let w = row.count as f64 / max as f64 * bar_max;
        let t = if rows.len() > 1 { i as f64 / (rows.len() - 1) as f64 } else { 0.0 };
        let color = interpolate(palette, t);

        parts.push(format!(
            r#"<text x="{}" y="{}" class="label" text-anchor="end">{}</text>"#,
            area.x + label_w - 8.0,
            y + bar_h / 2.0 + 4.0,
            escape_xml(&truncate(&row.label, 28))
        ));
        parts.push(format!(
            r#"<rect x="{}" y="{y}" width="{w}" height="{bar_h}" fill="{color}"><title>{}: {}</title></rect>"#,
            area.x + label_w,
            escape_xml(&row.label),
            row.count
        ));
        parts.push(format!(
            r#"<text x="{}" y="{}" class="value">{}</text>"#,
            area.x + label_w + w + 6.0,
            y + bar_h / 2.0 + 4.0,
            row.count
        ));
    }

    parts.join("\n")
}


/// Vertical bars with category labels underneath.
fn column_chart(rows: &[CountRow], area: Area) -> String {
    if rows.is_empty() {
        return no_data(area);
    }

    let plot = Area { h: area.h - 30.0, ..area };
    let slot = plot.w / rows.len() as f64;
    let bar_w = slot * 0.75;
    let max = rows.iter().map(|r| r.count).max().unwrap_or(1).max(1);

    let mut parts = vec![axis(plot)];
    for (i, row) in rows.iter().enumerate() {
        let h = row.count as f64 / max as f64 * (plot.h - 14.0);
        let x = plot.x + i as f64 * slot + (slot - bar_w) / 2.0;
        let y = plot.y + plot.h - h;
        let t = if rows.len() > 1 { i as f64 / (rows.len() - 1) as f64 } else { 0.0 };

        parts.push(format!(
            r#"<rect x="{x}" y="{y}" width="{bar_w}" height="{h}" fill="{}"><title>{}: {}</title></rect>"#,
            interpolate(&VIRIDIS, t),
            escape_xml(&row.label),
            row.count
        ));
        parts.push(format!(
            r#"<text x="{}" y="{}" class="label" text-anchor="middle">{}</text>"#,
            x + bar_w / 2.0,
            plot.y + plot.h + 16.0,
            escape_xml(&truncate(&row.label, 8))
        ));
    }

    parts.join("\n")
}


/// One line per content type across years added.
fn yearly_lines(dashboard: &Dashboard, area: Area) -> String {
    let rows = &dashboard.yearly_additions;
    if rows.is_empty() {
        return no_data(area);
    }

    let plot = Area { h: area.h - 30.0, ..area };
    let min_year = rows.iter().map(|r| r.year).min().unwrap_or(0);
    let max_year = rows.iter().map(|r| r.year).max().unwrap_or(0);
    let max = rows.iter().map(|r| r.count).max().unwrap_or(1).max(1);
    let span = (max_year - min_year).max(1) as f64;

    let mut parts = vec![axis(plot)];

    for content_type in ContentType::ALL {
        let points: Vec<(f64, f64)> = rows
            .iter()
            .filter(|r| r.content_type == content_type)
            .map(|r| {
                (
                    plot.x + (r.year - min_year) as f64 / span * plot.w,
                    plot.y + plot.h - r.count as f64 / max as f64 * (plot.h - 10.0),
                )
            })
            .collect();

        if !points.is_empty() {
            parts.push(polyline(&points, type_color(content_type)));
        }
    }

    parts.push(format!(
        r#"<text x="{}" y="{}" class="label">{}</text>"#,
        plot.x,
        plot.y + plot.h + 16.0,
        min_year
    ));
    parts.push(format!(
        r#"<text x="{}" y="{}" class="label" text-anchor="end">{}</text>"#,
        plot.x + plot.w,
        plot.y + plot.h + 16.0,
        max_year
    ));
    parts.push(legend(plot));

    parts.join("\n")
}


/// Single line of monthly additions.
fn monthly_line(dashboard: &Dashboard, area: Area) -> String {
    let rows = &dashboard.monthly_additions;
    if rows.is_empty() {
        return no_data(area);
    }

    let plot = Area { h: area.h - 30.0, ..area };
    let max = rows.iter().map(|r| r.count).max().unwrap_or(1).max(1);
    let step = if rows.len() > 1 { plot.w / (rows.len() - 1) as f64 } else { 0.0 };

    let points: Vec<(f64, f64)> = rows
        .iter()
        .enumerate()
        .map(|(i, r)| {
            (
                plot.x + i as f64 * step,
                plot.y + plot.h - r.count as f64 / max as f64 * (plot.h - 10.0),
            )
        })
        .collect();

    let mut parts = vec![axis(plot), polyline(&points, LINE_COLOR)];

    if let (Some(first), Some(last)) = (rows.first(), rows.last()) {
        parts.push(format!(
            r#"<text x="{}" y="{}" class="label">{}</text>"#,
            plot.x,
            plot.y + plot.h + 16.0,
            first.month
        ));
        parts.push(format!(
            r#"<text x="{}" y="{}" class="label" text-anchor="end">{}</text>"#,
            plot.x + plot.w,
            plot.y + plot.h + 16.0,
            last.month
        ));
    }

    parts.join("\n")
}


/// Histogram bars with the density curve on top.
fn duration_histogram(dashboard: &Dashboard, area: Area) -> String {
    let hist = &dashboard.movie_durations;
    if hist.bins.is_empty() {
        return no_data(area);
    }

    let plot = Area { h: area.h - 30.0, ..area };
    let lo = hist.bins.first().map(|b| b.start).unwrap_or(0.0);
    let hi = hist.bins.last().map(|b| b.end).unwrap_or(1.0);
    let span = (hi - lo).max(f64::EPSILON);

    let density_max = hist.density.iter().map(|(_, d)| *d).fold(0.0, f64::max);
    let y_max = (hist.max_count() as f64).max(density_max).max(1.0);
    let scale_y = |v: f64| plot.y + plot.h - v / y_max * (plot.h - 10.0);
    let scale_x = |v: f64| plot.x + (v - lo) / span * plot.w;

    let mut parts = vec![axis(plot)];
    for bin in &hist.bins {
        let x = scale_x(bin.start);
        let w = (scale_x(bin.end) - x - 1.0).max(0.5);
        let y = scale_y(bin.count as f64);
        parts.push(format!(
            r#"<rect x="{x}" y="{y}" width="{w}" height="{}" fill="{SHOW_COLOR}" fill-opacity="0.7"><title>{:.0}-{:.0} min: {}</title></rect>"#,
            plot.y + plot.h - y,
            bin.start,
            bin.end,
            bin.count
        ));
    }

    if !hist.density.is_empty() {
        let points: Vec<(f64, f64)> = hist
            .density
            .iter()
            .map(|(x, d)| (scale_x(*x), scale_y(*d)))
            .collect();
        parts.push(polyline(&points, SHOW_COLOR));
    }

    parts.push(format!(
        r#"<text x="{}" y="{}" class="label">{:.0} min</text>"#,
        plot.x,
        plot.y + plot.h + 16.0,
        lo
    ));
    parts.push(format!(
        r#"<text x="{}" y="{}" class="label" text-anchor="end">{:.0} min</text>"#,
        plot.x + plot.w,
        plot.y + plot.h + 16.0,
        hi
    ));

    parts.join("\n")
}


fn axis(plot: Area) -> String {
    format!(
        r#"<path d="M {} {} L {} {} L {} {}" stroke="{GRID}" fill="none"/>"#,
        plot.x,
        plot.y,
        plot.x,
        plot.y + plot.h,
        plot.x + plot.w,
        plot.y + plot.h
    )
}


fn polyline(points: &[(f64, f64)], color: &str) -> String {
    let coords: Vec<String> = points.iter().map(|(x, y)| format!("{x:.1},{y:.1}")).collect();
    format!(
        r#"<polyline points="{}" fill="none" stroke="{color}" stroke-width="2"/>"#,
        coords.join(" ")
    )
}


fn legend(plot: Area) -> String {
    ContentType::ALL
        .iter()
        .enumerate()
        .map(|(i, t)| {
            let x = plot.x + plot.w - 150.0 + i as f64 * 75.0;
            format!(
                r#"<rect x="{x}" y="{}" width="10" height="10" fill="{}"/><text x="{}" y="{}" class="label">{}</text>"#,
                plot.y,
                type_color(*t),
                x + 14.0,
                plot.y + 9.0,
                t.label()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}


/// Interpolate a color along palette stops, `t` in `[0, 1]`.
fn interpolate(stops: &[(u8, u8, u8)], t: f64) -> String {
    if stops.is_empty() {
        return TEXT.to_string();
    }
    if stops.len() == 1 {
        let (r, g, b) = stops[0];
        return format!("rgb({r},{g},{b})");
    }

    let t = t.clamp(0.0, 1.0) * (stops.len() - 1) as f64;
    let idx = (t.floor() as usize).min(stops.len() - 2);
    let frac = t - idx as f64;
    let (a, b) = (stops[idx], stops[idx + 1]);
    let lerp = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * frac).round() as u8;

    format!("rgb({},{},{})", lerp(a.0, b.0), lerp(a.1, b.1), lerp(a.2, b.2))
}


/// Convert hex color to RGB tuple.
fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
    let hex = hex.trim_start_matches('#');
    let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(0);
    let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(0);
    let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(0);
    (r, g, b)
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


fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}


/// Open file with default application.
pub fn open_file(path: &Path) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(path)
            .spawn()
            .context("Failed to open file")?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", "", &path.to_string_lossy()])
            .spawn()
            .context("Failed to open file")?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open")
            .arg(path)
            .spawn()
            .context("Failed to open file")?;
    }

    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterState;
    use crate::models::catalog_entry::tests::entry;
    use crate::models::Catalog;

    fn dashboard() -> Dashboard {
        let mut a = entry(ContentType::Movie, "India", 2010);
        a.director = Some("Tom & Jerry <Studio>".to_string());
        let catalog = Catalog::new(
            vec![a, entry(ContentType::TvShow, "Japan", 2012), entry(ContentType::Movie, "India", 2011)],
            "test.csv",
            0,
        );
        Dashboard::build(&catalog, &FilterState::defaults(&catalog))
    }

    #[test]
    fn test_generate_svg_has_all_panels() {
        let svg = generate_svg(&dashboard());

        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        for title in [
            "Content Type Distribution",
            "Top 10 Directors",
            "Content Added Over the Years",
            "Monthly Content Additions",
            "Top 10 Countries",
            "Rating Distribution",
            "Movie Duration Distribution",
            "Most Common Genres",
        ] {
            assert!(svg.contains(title), "missing panel {title}");
        }
    }

    #[test]
    fn test_labels_are_escaped() {
        let svg = generate_svg(&dashboard());
        assert!(svg.contains("Tom &amp; Jerry &lt;Studio&gt;"));
        assert!(!svg.contains("Tom & Jerry"));
    }

    #[test]
    fn test_export_svg_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.svg");
        export_dashboard_svg(&dashboard(), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("Catalog Exploration Dashboard"));
    }

    #[test]
    fn test_interpolate_endpoints() {
        assert_eq!(interpolate(&VIRIDIS, 0.0), "rgb(68,1,84)");
        assert_eq!(interpolate(&VIRIDIS, 1.0), "rgb(253,231,37)");
        assert_eq!(interpolate(&VIRIDIS, 0.5), "rgb(33,145,140)");
    }

    #[test]
    fn test_hex_to_rgb() {
        assert_eq!(hex_to_rgb("#E50914"), (229, 9, 20));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("abc", 5), "abc");
        assert_eq!(truncate("abcdef", 4), "abc…");
    }
}
