use std::io::{self, IsTerminal, Write};

use anyhow::anyhow;
use unicode_width::UnicodeWidthStr;

use crate::config::Config;
use crate::projection::Buckets;
use crate::task::Priority;

#[derive(Debug, Clone)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(cfg: &Config) -> anyhow::Result<Self> {
        let color_cfg = cfg.get("color").unwrap_or_else(|| "on".to_string());
        let color = match color_cfg.to_ascii_lowercase().as_str() {
            "on" | "yes" | "true" | "1" => true,
            "off" | "no" | "false" | "0" => false,
            other => return Err(anyhow!("invalid color setting: {other}")),
        };

        Ok(Self { color })
    }

    #[tracing::instrument(skip(self, buckets, selected))]
    pub fn print_buckets(
        &mut self,
        buckets: &Buckets,
        selected: Option<(Priority, usize)>,
    ) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();

        let headers = vec![
            "#".to_string(),
            "High Priority".to_string(),
            "Medium Priority".to_string(),
            "Low Priority".to_string(),
        ];

        let depth = Priority::ALL
            .iter()
            .map(|level| buckets.get(*level).len())
            .max()
            .unwrap_or(0);

        let mut rows = Vec::with_capacity(depth);
        for local_index in 0..depth {
            let mut row = vec![local_index.to_string()];
            for level in Priority::ALL {
                let cell = buckets
                    .get(level)
                    .get(local_index)
                    .cloned()
                    .unwrap_or_default();
                let cell = if selected == Some((level, local_index)) {
                    self.paint(&cell, "33")
                } else {
                    cell
                };
                row.push(cell);
            }
            rows.push(row);
        }

        write_table(&mut out, headers, rows)?;
        Ok(())
    }

    pub fn print_error(&mut self, title: &str, message: &str) {
        eprintln!("{}: {message}", self.paint(title, "31"));
    }

    fn paint(&self, text: &str, code: &str) -> String {
        if !self.color || !io::stdout().is_terminal() {
            return text.to_string();
        }
        format!("\x1b[{code}m{text}\x1b[0m")
    }
}

fn write_table<W: Write>(
    mut writer: W,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
) -> anyhow::Result<()> {
    let column_count = headers.len();
    let mut widths = vec![0usize; column_count];

    for (idx, header) in headers.iter().enumerate() {
        widths[idx] = widths[idx].max(UnicodeWidthStr::width(header.as_str()));
    }

    for row in &rows {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(UnicodeWidthStr::width(strip_ansi(cell).as_str()));
        }
    }

    for idx in 0..column_count {
        write!(writer, "{:width$} ", headers[idx], width = widths[idx])?;
    }
    writeln!(writer)?;

    for idx in 0..column_count {
        write!(writer, "{:-<width$} ", "", width = widths[idx])?;
    }
    writeln!(writer)?;

    for row in rows {
        for idx in 0..column_count {
            let cell = &row[idx];
            let visible_width = UnicodeWidthStr::width(strip_ansi(cell).as_str());
            let padding = widths[idx].saturating_sub(visible_width);
            write!(writer, "{}{} ", cell, " ".repeat(padding))?;
        }
        writeln!(writer)?;
    }

    Ok(())
}

fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut escaped = false;

    for ch in s.chars() {
        if escaped {
            if ch == 'm' {
                escaped = false;
            }
            continue;
        }

        if ch == '\x1b' {
            escaped = true;
            continue;
        }

        out.push(ch);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::write_table;

    #[test]
    fn table_columns_align_to_widest_cell() {
        let headers = vec!["#".to_string(), "High Priority".to_string()];
        let rows = vec![
            vec!["0".to_string(), "Write report".to_string()],
            vec!["1".to_string(), "Call Bob".to_string()],
        ];

        let mut buf = Vec::new();
        write_table(&mut buf, headers, rows).expect("write table");
        let text = String::from_utf8(buf).expect("utf8");

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "# High Priority ");
        assert_eq!(lines[1], "- ------------- ");
        assert_eq!(lines[2], "0 Write report  ");
        assert_eq!(lines[3], "1 Call Bob      ");
    }
}
