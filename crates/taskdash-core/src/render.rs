use std::io::{self, IsTerminal, Write};

use chrono::NaiveDate;
use taskdash_model::persist::format_date;
use taskdash_model::view::is_overdue;
use taskdash_model::{RowCategory, Task, ViewSummary};
use unicode_width::UnicodeWidthStr;

use crate::config::Config;

const DESCRIPTION_WIDTH: usize = 48;

#[derive(Debug)]
pub struct Renderer<W = io::Stdout> {
    color: bool,
    out: W,
}

impl Renderer<io::Stdout> {
    pub fn new(cfg: &Config) -> anyhow::Result<Self> {
        let color = color_setting(cfg)? && io::stdout().is_terminal();
        Ok(Self {
            color,
            out: io::stdout(),
        })
    }
}

impl<W: Write> Renderer<W> {
    pub fn with_writer(cfg: &Config, out: W) -> anyhow::Result<Self> {
        Ok(Self {
            color: color_setting(cfg)?,
            out,
        })
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn print_line(&mut self, text: &str) -> anyhow::Result<()> {
        writeln!(self.out, "{text}")?;
        Ok(())
    }

    #[tracing::instrument(skip(self, tasks, today), fields(count = tasks.len()))]
    pub fn print_task_table(&mut self, tasks: &[&Task], today: NaiveDate) -> anyhow::Result<()> {
        let headers = vec![
            "ID".to_string(),
            "Status".to_string(),
            "Due".to_string(),
            "Title".to_string(),
            "Description".to_string(),
        ];

        let mut rows = Vec::with_capacity(tasks.len());
        for task in tasks {
            let category = RowCategory::of(task, today);
            let due = match task.due_date {
                Some(_) => format_date(task.due_date),
                None => "-".to_string(),
            };
            let title = if category == RowCategory::Overdue {
                format!("{} (overdue)", task.title)
            } else {
                task.title.clone()
            };

            let cells = vec![
                task.id.to_string(),
                task.status.to_string(),
                due,
                title,
                truncate(&task.description, DESCRIPTION_WIDTH),
            ];
            rows.push(
                cells
                    .into_iter()
                    .map(|cell| self.paint_row(&cell, category))
                    .collect(),
            );
        }

        write_table(&mut self.out, headers, rows)?;
        Ok(())
    }

    pub fn print_summary(&mut self, summary: &ViewSummary) -> anyhow::Result<()> {
        if summary.shown == 0 {
            let (headline, hint) = summary.empty_message();
            writeln!(self.out, "{headline}")?;
            writeln!(self.out, "{hint}")?;
        }
        writeln!(self.out, "{}", summary.label())?;
        Ok(())
    }

    #[tracing::instrument(skip(self, task, today), fields(id = task.id))]
    pub fn print_task_info(&mut self, task: &Task, today: NaiveDate) -> anyhow::Result<()> {
        writeln!(self.out, "id           {}", task.id)?;
        writeln!(self.out, "title        {}", task.title)?;
        writeln!(self.out, "description  {}", task.description)?;
        writeln!(self.out, "due          {}", format_date(task.due_date))?;
        writeln!(self.out, "status       {}", task.status)?;
        writeln!(self.out, "overdue      {}", is_overdue(task, today))?;
        writeln!(
            self.out,
            "category     {}",
            RowCategory::of(task, today).as_str()
        )?;
        Ok(())
    }

    fn paint_row(&self, text: &str, category: RowCategory) -> String {
        let code = match category {
            RowCategory::Done => "32",
            RowCategory::Overdue => "31",
            RowCategory::InProgress => "33",
            RowCategory::Todo => return text.to_string(),
        };
        self.paint(text, code)
    }

    fn paint(&self, text: &str, code: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        format!("\x1b[{code}m{text}\x1b[0m")
    }
}

fn color_setting(cfg: &Config) -> anyhow::Result<bool> {
    Ok(cfg.get_bool("color")?.unwrap_or(true))
}

fn truncate(text: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(text) <= max_width {
        return text.to_string();
    }

    let mut out = String::new();
    let mut width = 0;
    for ch in text.chars() {
        let ch_width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if width + ch_width + 1 > max_width {
            break;
        }
        width += ch_width;
        out.push(ch);
    }
    out.push('…');
    out
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
    use super::{strip_ansi, truncate};

    #[test]
    fn truncation_respects_display_width() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
    }

    #[test]
    fn ansi_codes_are_invisible() {
        assert_eq!(strip_ansi("\x1b[31mlate\x1b[0m"), "late");
    }
}
