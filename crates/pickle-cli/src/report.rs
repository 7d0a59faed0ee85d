//! Human-readable package reports.

use console::{Alignment, measure_text_width, pad_str, style};

use pickle_core::package::{ConfigureOption, OptionKind, PackageDescriptor};

/// Prompts wider than this are wrapped onto several lines.
const PROMPT_WIDTH: usize = 40;

/// Name, pretty version and stability of a package.
pub fn render_info(descriptor: &PackageDescriptor) -> String {
    let rows = vec![
        vec![
            style("Package name").green().to_string(),
            descriptor.name().to_string(),
        ],
        vec![
            style("Package version (current release)").green().to_string(),
            descriptor.pretty_version().to_string(),
        ],
        vec![
            style("Package status").green().to_string(),
            descriptor.stability().to_string(),
        ],
    ];
    render_table(None, &rows)
}

/// Type, prompt and default of each configure option.
pub fn render_options(options: &[ConfigureOption]) -> String {
    let rows: Vec<Vec<String>> = options
        .iter()
        .map(|option| match option.kind {
            OptionKind::Enable => {
                let default = if option.enabled_by_default() {
                    style("yes").green().to_string()
                } else {
                    style("no").red().to_string()
                };
                vec![
                    style(option.kind.as_str()).yellow().to_string(),
                    wrap(&option.prompt, PROMPT_WIDTH),
                    default,
                ]
            }
            OptionKind::With => vec![
                option.kind.as_str().to_string(),
                wrap(&option.prompt, PROMPT_WIDTH),
                option.default.clone(),
            ],
        })
        .collect();
    render_table(Some(&["Type", "Description", "Default"]), &rows)
}

/// Greedy word wrap. Words longer than `width` are kept whole.
fn wrap(text: &str, width: usize) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines.join("\n")
}

/// Boxed table; cells may span several lines.
fn render_table(headers: Option<&[&str]>, rows: &[Vec<String>]) -> String {
    let columns = headers
        .map(<[&str]>::len)
        .or_else(|| rows.first().map(Vec::len))
        .unwrap_or(0);
    let mut widths = vec![0usize; columns];

    let header_cells: Option<Vec<String>> =
        headers.map(|h| h.iter().map(|s| s.to_string()).collect());
    for row in header_cells.iter().chain(rows) {
        for (i, cell) in row.iter().enumerate().take(columns) {
            for line in cell.lines() {
                widths[i] = widths[i].max(measure_text_width(line));
            }
        }
    }

    let separator = format!(
        "+{}+",
        widths
            .iter()
            .map(|w| "-".repeat(w + 2))
            .collect::<Vec<_>>()
            .join("+")
    );

    let mut out = vec![separator.clone()];
    if let Some(cells) = &header_cells {
        out.extend(render_row(cells, &widths));
        out.push(separator.clone());
    }
    for row in rows {
        out.extend(render_row(row, &widths));
    }
    out.push(separator);
    out.join("\n")
}

fn render_row(cells: &[String], widths: &[usize]) -> Vec<String> {
    let split: Vec<Vec<&str>> = cells.iter().map(|c| c.lines().collect()).collect();
    let height = split.iter().map(Vec::len).max().unwrap_or(0).max(1);

    (0..height)
        .map(|line| {
            let parts: Vec<String> = widths
                .iter()
                .enumerate()
                .map(|(i, width)| {
                    let text = split
                        .get(i)
                        .and_then(|lines| lines.get(line))
                        .copied()
                        .unwrap_or("");
                    format!(" {} ", pad_str(text, *width, Alignment::Left, None))
                })
                .collect();
            format!("|{}|", parts.join("|"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use console::strip_ansi_codes;
    use pickle_core::package::Stability;

    #[test]
    fn wrap_breaks_on_word_boundaries() {
        let text = "Enable internal debugging in APCu, which is useful for developers only";
        let wrapped = wrap(text, 40);
        assert!(wrapped.lines().all(|l| l.len() <= 40));
        assert_eq!(wrapped.replace('\n', " "), text);
    }

    #[test]
    fn wrap_keeps_long_words() {
        assert_eq!(wrap("a verylongwordthatdoesnotfit", 8), "a\nverylongwordthatdoesnotfit");
    }

    #[test]
    fn info_table_lists_name_version_and_status() {
        let d = PackageDescriptor::dist(
            "apcu",
            "latest",
            "latest-beta",
            Stability::Beta,
            "http://pecl.php.net/get/apcu-beta",
        );
        let table = strip_ansi_codes(&render_info(&d)).to_string();

        assert!(table.contains("| Package name                      | apcu"));
        assert!(table.contains("latest-beta"));
        assert!(table.contains("| Package status                    | beta"));
    }

    #[test]
    fn options_table_renders_enable_defaults_as_yes_no() {
        let options = vec![
            ConfigureOption::new("enable-apcu-debug", "Enable internal debugging", "no"),
            ConfigureOption::new("enable-apcu-spinlocks", "Use spinlocks", "yes"),
            ConfigureOption::new("with-libdir", "Library directory", "/usr"),
        ];
        let table = strip_ansi_codes(&render_options(&options)).to_string();
        let lines: Vec<_> = table.lines().collect();

        assert!(lines[1].contains("Type") && lines[1].contains("Default"));
        assert!(lines[3].starts_with("| enable ") && lines[3].trim_end().ends_with("| no      |"));
        assert!(lines[4].trim_end().ends_with("| yes     |"));
        assert!(lines[5].starts_with("| with ") && lines[5].contains("/usr"));
    }

    #[test]
    fn multiline_prompts_extend_the_row() {
        let options = vec![ConfigureOption::new(
            "with-foo",
            "This prompt is long enough that it needs to wrap onto a second line",
            "",
        )];
        let table = render_options(&options);
        // separator, header, separator, two prompt lines, separator
        assert_eq!(table.lines().count(), 6);
    }
}
