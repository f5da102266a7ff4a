//! Terminal rendering of the list, search and form regions.

use std::io::{self, BufRead, Stderr, StdinLock, Stdout, Write};

use billbook_core::render::{
    ListRegion, RecordRow, SearchRegion, EMPTY_LIST_PLACEHOLDER, NOT_FOUND_MESSAGE,
};
use billbook_core::{FormPresentation, View};

/// Which regions are echoed to the output stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Regions {
    pub list: bool,
    pub search: bool,
    pub form: bool,
}

impl Regions {
    pub const ALL: Self = Self {
        list: true,
        search: true,
        form: true,
    };
    pub const NONE: Self = Self {
        list: false,
        search: false,
        form: false,
    };
    pub const LIST: Self = Self {
        list: true,
        ..Self::NONE
    };
    pub const SEARCH: Self = Self {
        search: true,
        ..Self::NONE
    };
}

/// [`View`] over an output stream, an error stream and a line-based input.
pub struct TerminalView<W, E, I> {
    out: W,
    err: E,
    input: I,
    regions: Regions,
    assume_yes: bool,
}

impl TerminalView<Stdout, Stderr, StdinLock<'static>> {
    pub fn stdio(regions: Regions) -> Self {
        Self::new(io::stdout(), io::stderr(), io::stdin().lock(), regions)
    }
}

impl<W: Write, E: Write, I: BufRead> TerminalView<W, E, I> {
    pub const fn new(out: W, err: E, input: I, regions: Regions) -> Self {
        Self {
            out,
            err,
            input,
            regions,
            assume_yes: false,
        }
    }

    /// Answer every confirmation with yes.
    #[must_use]
    pub fn assume_yes(mut self, assume_yes: bool) -> Self {
        self.assume_yes = assume_yes;
        self
    }

    /// Next input line without its terminator, `None` at end of input.
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    pub fn prompt(&mut self, prompt: &str) -> io::Result<()> {
        write_prompt(&mut self.out, prompt)
    }

    /// Plain output line, independent of the enabled regions.
    pub fn print(&mut self, text: &str) {
        write_line(&mut self.out, text);
    }

    pub fn print_form(&mut self, form: &FormPresentation) {
        for line in format_form(form) {
            write_line(&mut self.out, &line);
        }
    }

    pub const fn output(&self) -> &W {
        &self.out
    }

    pub const fn errors(&self) -> &E {
        &self.err
    }
}

impl<W: Write, E: Write, I: BufRead> View for TerminalView<W, E, I> {
    fn render_list(&mut self, region: &ListRegion) {
        if !self.regions.list {
            return;
        }
        match region {
            ListRegion::Rows(rows) => {
                for (index, row) in rows.iter().enumerate() {
                    write_line(&mut self.out, &format_row(index + 1, row));
                }
            }
            ListRegion::Empty => write_line(&mut self.out, EMPTY_LIST_PLACEHOLDER),
        }
    }

    fn render_search(&mut self, region: &SearchRegion) {
        if !self.regions.search {
            return;
        }
        match region {
            SearchRegion::Cleared => {}
            SearchRegion::Found(row) => write_line(&mut self.out, &row.summary()),
            SearchRegion::NotFound => write_line(&mut self.out, NOT_FOUND_MESSAGE),
            SearchRegion::Failed(message) => write_line(&mut self.out, message),
        }
    }

    fn render_form(&mut self, form: &FormPresentation) {
        if self.regions.form {
            self.print_form(form);
        }
    }

    fn show_error(&mut self, message: &str) {
        write_line(&mut self.err, &format!("Error: {message}"));
    }

    fn warn(&mut self, message: &str) {
        write_line(&mut self.err, message);
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        if let Err(error) = write_prompt(&mut self.err, &format!("{prompt} [y/N] ")) {
            tracing::debug!("Failed to write confirmation prompt: {}", error);
        }
        match self.read_line() {
            Ok(Some(answer)) => {
                matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
            }
            Ok(None) => false,
            Err(error) => {
                tracing::debug!("Failed to read confirmation: {}", error);
                false
            }
        }
    }
}

/// Numbered list row: `#1  ID: 7 | Name: Monitor | Price: R$ 850.50`.
pub fn format_row(position: usize, row: &RecordRow) -> String {
    format!("#{position:<3}{}", row.summary())
}

pub fn format_form(form: &FormPresentation) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(match form.mode.bound_id() {
        Some(id) => format!("Editing {id}"),
        None => "New record".to_string(),
    });
    for (name, value) in form.fields.iter() {
        lines.push(format!("  {name:<12}{value}"));
    }
    if let Some(updated_at) = &form.updated_at {
        lines.push(format!("  {:<12}{updated_at}", "updated_at"));
    }
    let mut actions = format!("[{}]", form.submit_label);
    if form.cancel_visible {
        actions.push_str(" [Cancel]");
    }
    lines.push(actions);
    lines
}

fn write_prompt(stream: &mut impl Write, text: &str) -> io::Result<()> {
    write!(stream, "{text}")?;
    stream.flush()
}

fn write_line(stream: &mut impl Write, text: &str) {
    if let Err(error) = writeln!(stream, "{text}") {
        tracing::debug!("Failed to write terminal output: {}", error);
    }
}
