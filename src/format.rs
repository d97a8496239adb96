use crate::types::{Layout, Report};

#[derive(Clone, Copy)]
enum Align {
    Left,
    Right,
}

// Presentation contract for one column: fixed width, alignment, whether
// amounts get thousands grouping, and an optional name-truncation limit.
#[derive(Clone, Copy)]
struct ColumnSpec {
    width: usize,
    align: Align,
    grouped: bool,
    name_limit: Option<usize>,
}

const fn col(width: usize, align: Align, grouped: bool, name_limit: Option<usize>) -> ColumnSpec {
    ColumnSpec {
        width,
        align,
        grouped,
        name_limit,
    }
}

// Widths chosen so every line, header included, stays inside 80 columns
// with a single-space gutter between columns.
const COUNTRY_SOURCES: [ColumnSpec; 4] = [
    col(18, Align::Left, false, Some(18)),
    col(16, Align::Right, true, None),
    col(12, Align::Right, false, None),
    col(16, Align::Right, false, None),
];

const SOURCE_OWNERS: [ColumnSpec; 4] = [
    col(30, Align::Left, false, Some(30)),
    col(14, Align::Right, true, None),
    col(12, Align::Right, false, None),
    col(16, Align::Right, false, None),
];

const COUNTRY_TOTALS: [ColumnSpec; 4] = [
    col(30, Align::Left, false, Some(30)),
    col(16, Align::Right, true, None),
    col(16, Align::Right, true, None),
    col(12, Align::Right, false, None),
];

// Render a computed report into its final text lines.
pub fn format(report: &Report) -> Vec<String> {
    let specs: &[ColumnSpec; 4] = match report.layout {
        Layout::CountrySources => &COUNTRY_SOURCES,
        Layout::SourceOwners => &SOURCE_OWNERS,
        Layout::CountryTotals => &COUNTRY_TOTALS,
    };

    let mut lines = Vec::with_capacity(report.rows.len() + 7);
    lines.push(report.title.clone());
    lines.push("-".repeat(report.title.len()));
    lines.push(String::new());
    lines.push(render_row(&report.columns, specs, true));
    lines.push(String::new());
    for row in &report.rows {
        lines.push(render_row(row, specs, false));
    }
    lines.push(String::new());
    lines.push(format!("{} match(es) found.", report.match_count));
    lines
}

fn render_row(cells: &[String], specs: &[ColumnSpec], header: bool) -> String {
    let mut parts = Vec::with_capacity(cells.len());
    for (cell, spec) in cells.iter().zip(specs) {
        let mut text = cell.clone();
        if !header {
            if let Some(limit) = spec.name_limit {
                text = truncate_name(&text, limit);
            }
            if spec.grouped {
                text = group_thousands(&text);
            }
        }
        parts.push(match spec.align {
            Align::Left => format!("{text:<width$}", width = spec.width),
            Align::Right => format!("{text:>width$}", width = spec.width),
        });
    }
    parts.join(" ").trim_end().to_string()
}

// Insert thousands separators into the integer part of a decimal string,
// leaving any fractional part untouched. Empty input stays empty.
pub fn group_thousands(value: &str) -> String {
    let (int_part, frac_part) = match value.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (value, None),
    };

    let digits = int_part.chars().count();
    let mut grouped = String::with_capacity(value.len() + digits / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (digits - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }
    grouped
}

// Names longer than `max` are cut to `max - 3` characters plus "...".
pub fn truncate_name(name: &str, max: usize) -> String {
    if name.chars().count() > max {
        let kept: String = name.chars().take(max - 3).collect();
        kept + "..."
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn totals_report() -> Report {
        Report {
            title: "Combined Renewables for All Countries".into(),
            columns: vec![
                "Country".into(),
                "All Elec. (GWh)".into(),
                "Renewable (GWh)".into(),
                "% Renewable".into(),
            ],
            rows: vec![
                vec![
                    "Brazil".into(),
                    "656219".into(),
                    "459846.5".into(),
                    "70.07".into(),
                ],
                vec![
                    "Democratic Republic of the Congo".into(),
                    "12359".into(),
                    "12331".into(),
                    "99.77".into(),
                ],
            ],
            match_count: 2,
            layout: Layout::CountryTotals,
        }
    }

    #[test]
    fn groups_digits_right_to_left() {
        assert_eq!(group_thousands("999"), "999");
        assert_eq!(group_thousands("1000"), "1,000");
        assert_eq!(group_thousands("1234567.89"), "1,234,567.89");
        assert_eq!(group_thousands("12"), "12");
        assert_eq!(group_thousands(""), "");
    }

    #[test]
    fn grouping_leaves_the_fraction_alone() {
        assert_eq!(group_thousands("1234.56789"), "1,234.56789");
        assert_eq!(group_thousands("0.5"), "0.5");
    }

    #[test]
    fn truncates_long_names_with_ellipsis() {
        let name = "A".repeat(31);
        assert_eq!(truncate_name(&name, 30), format!("{}...", "A".repeat(27)));

        let exact = "B".repeat(30);
        assert_eq!(truncate_name(&exact, 30), exact);
    }

    #[test]
    fn report_opens_with_title_and_matching_underline() {
        let report = totals_report();
        let lines = format(&report);
        assert_eq!(lines[0], "Combined Renewables for All Countries");
        assert_eq!(lines[1], "-".repeat(lines[0].len()));
        assert_eq!(lines[2], "");
    }

    #[test]
    fn report_closes_with_match_count_line() {
        let lines = format(&totals_report());
        assert_eq!(lines.last().unwrap(), "2 match(es) found.");
        assert_eq!(lines[lines.len() - 2], "");
    }

    #[test]
    fn amounts_are_grouped_and_right_aligned() {
        let lines = format(&totals_report());
        let brazil = &lines[5];
        assert!(brazil.starts_with("Brazil"));
        assert!(brazil.contains("656,219"));
        assert!(brazil.contains("459,846.5"));
        // percent column is never grouped
        assert!(brazil.ends_with("70.07"));
    }

    #[test]
    fn long_country_names_are_truncated_in_rows() {
        let lines = format(&totals_report());
        assert!(lines[6].starts_with("Democratic Republic of the ..."));
    }

    #[test]
    fn every_line_fits_eighty_columns() {
        let mut report = totals_report();
        report.rows.push(vec![
            "X".repeat(60),
            "123456789012.34".into(),
            "999999999.9".into(),
            "100".into(),
        ]);
        for line in format(&report) {
            assert!(line.chars().count() <= 80, "line too wide: {line:?}");
        }
    }

    #[test]
    fn header_uses_the_same_grid_as_the_rows() {
        let lines = format(&totals_report());
        let header = &lines[3];
        assert!(header.starts_with("Country"));
        assert!(header.ends_with("% Renewable"));
    }
}
