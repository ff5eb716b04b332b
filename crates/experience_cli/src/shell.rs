//! Interactive line shell over the session store.
//!
//! # Responsibility
//! - Map typed commands onto list/add/edit routes.
//! - Prompt form fields one by one and ask before deleting.
//!
//! # Invariants
//! - Empty answers keep the current field value; `:clear` empties it.
//! - `:cancel` abandons a form without touching the store.
//! - EOF ends the session cleanly.

use chrono::NaiveDate;
use experience_core::{
    parse_form_date, ExperienceForm, ExperienceRecord, ExperienceService, FormSession,
    InMemoryExperienceStore, Route, ServiceError, DATE_FORMAT,
};
use log::debug;
use std::io::{self, BufRead, Write};

const CANCEL_TOKEN: &str = ":cancel";
const CLEAR_TOKEN: &str = ":clear";

const HELP: &str = "Commands:
  list              show all experiences
  add               open a blank form
  edit <n>          edit experience n
  show <n>          print every field of experience n
  delete <n>        delete experience n (asks first)
  go <path>         navigate to /, /add or /edit/<n>
  help              show this help
  quit              leave (experiences are not saved)
While filling a form, press Enter to keep a value, type :clear to empty a text
field, or :cancel to discard the form.";

/// Parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Navigate(Route),
    Show(usize),
    Delete(usize),
    Help,
    Quit,
}

impl Command {
    /// Parses one input line. Blank input lists experiences.
    pub fn parse(line: &str) -> Result<Self, String> {
        let mut parts = line.split_whitespace();
        let verb = parts.next().unwrap_or("list");
        let arg = parts.next();

        let command = match verb {
            "list" | "ls" => Self::Navigate(Route::List),
            "add" | "new" => Self::Navigate(Route::Add),
            "edit" => Self::Navigate(Route::Edit(parse_index(arg)?)),
            "show" => Self::Show(parse_index(arg)?),
            "delete" | "rm" => Self::Delete(parse_index(arg)?),
            "go" => {
                let path = arg.ok_or_else(|| "usage: go <path>".to_string())?;
                Self::Navigate(Route::parse(path).map_err(|err| err.to_string())?)
            }
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => return Err(format!("unknown command `{other}`; type `help`")),
        };
        Ok(command)
    }
}

fn parse_index(arg: Option<&str>) -> Result<usize, String> {
    let raw = arg.ok_or_else(|| "missing experience number".to_string())?;
    raw.parse::<usize>()
        .map_err(|_| format!("`{raw}` is not an experience number"))
}

/// Line-oriented front-end owning the session service.
pub struct Shell<I, O> {
    service: ExperienceService<InMemoryExperienceStore>,
    input: I,
    output: O,
}

impl<I: BufRead, O: Write> Shell<I, O> {
    pub fn new(input: I, output: O) -> Self {
        Self {
            service: ExperienceService::new(InMemoryExperienceStore::new()),
            input,
            output,
        }
    }

    /// Runs until `quit` or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "Experience notes. Type `help` for commands.")?;
        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;
            let Some(line) = self.read_line()? else {
                writeln!(self.output)?;
                return Ok(());
            };

            match Command::parse(&line) {
                Ok(Command::Quit) => return Ok(()),
                Ok(command) => self.execute(command)?,
                Err(message) => writeln!(self.output, "{message}")?,
            }
        }
    }

    /// Returns the session service, mainly for inspection.
    pub fn service(&self) -> &ExperienceService<InMemoryExperienceStore> {
        &self.service
    }

    fn execute(&mut self, command: Command) -> io::Result<()> {
        debug!("event=cli_command module=cli status=start command={command:?}");
        match command {
            Command::Navigate(route) if route.is_form() => self.run_form(route),
            Command::Navigate(_) => {
                let rendered = self.service.render_list();
                writeln!(self.output, "{rendered}")
            }
            Command::Show(index) => self.show(index),
            Command::Delete(index) => self.delete(index),
            Command::Help => writeln!(self.output, "{HELP}"),
            Command::Quit => Ok(()),
        }
    }

    fn run_form(&mut self, route: Route) -> io::Result<()> {
        let FormSession { mode, form } = match self.service.open_form(route) {
            Ok(session) => session,
            Err(err) => return self.report(&err),
        };
        writeln!(self.output, "== {} ==", mode.heading())?;

        let Some(form) = self.fill_form(form)? else {
            return writeln!(self.output, "Form discarded.");
        };

        match self.service.save_form(mode, form) {
            Ok(record) => {
                let verb = if mode.is_editing() { "Updated" } else { "Added" };
                writeln!(self.output, "{verb}: {} ({})", record.title(), record.date())?;
                let rendered = self.service.render_list();
                writeln!(self.output, "{rendered}")
            }
            Err(err) => self.report(&err),
        }
    }

    fn fill_form(&mut self, mut form: ExperienceForm) -> io::Result<Option<ExperienceForm>> {
        if !self.fill_text("Title", &mut form.title)? {
            return Ok(None);
        }
        match self.prompt_date("Start date", form.start_date)? {
            Some(date) => form.start_date = date,
            None => return Ok(None),
        }
        match self.prompt_date("End date", form.end_date)? {
            Some(date) => form.end_date = date,
            None => return Ok(None),
        }
        let text_fields = [
            ("Duration", &mut form.duration),
            ("Summary", &mut form.summary),
            ("Details", &mut form.details),
            ("Keywords", &mut form.keywords),
            ("Notes", &mut form.notes),
        ];
        for (label, field) in text_fields {
            if !self.fill_text(label, field)? {
                return Ok(None);
            }
        }
        Ok(Some(form))
    }

    /// Returns `false` when the form was cancelled.
    fn fill_text(&mut self, label: &str, field: &mut String) -> io::Result<bool> {
        match self.prompt_text(label, field)? {
            Some(value) => {
                *field = value;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Returns `None` on cancel or EOF.
    fn prompt_text(&mut self, label: &str, current: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label} [{current}]: ")?;
        self.output.flush()?;
        let Some(answer) = self.read_line()? else {
            return Ok(None);
        };
        if answer == CANCEL_TOKEN {
            return Ok(None);
        }
        if answer == CLEAR_TOKEN {
            return Ok(Some(String::new()));
        }
        if answer.is_empty() {
            return Ok(Some(current.to_string()));
        }
        Ok(Some(answer))
    }

    fn prompt_date(
        &mut self,
        label: &str,
        current: NaiveDate,
    ) -> io::Result<Option<NaiveDate>> {
        let current_text = current.format(DATE_FORMAT).to_string();
        loop {
            let Some(answer) = self.prompt_text(label, &current_text)? else {
                return Ok(None);
            };
            match parse_form_date(&answer) {
                Ok(date) => return Ok(Some(date)),
                Err(_) => writeln!(self.output, "Please enter a date as YYYY-MM-DD.")?,
            }
        }
    }

    fn show(&mut self, index: usize) -> io::Result<()> {
        let record = match self.service.open_form(Route::Edit(index)) {
            Ok(session) => session.form.save(),
            Err(err) => return self.report(&err),
        };
        write_details(&mut self.output, index, &record)
    }

    fn delete(&mut self, index: usize) -> io::Result<()> {
        let Self {
            service,
            input,
            output,
        } = self;
        let mut prompt_error = None;
        let mut ask = |_: usize, record: &ExperienceRecord| {
            match confirm(&mut *input, &mut *output, record) {
                Ok(answer) => answer,
                Err(err) => {
                    prompt_error = Some(err);
                    false
                }
            }
        };
        let result = service.delete_with_confirmation(index, &mut ask);
        if let Some(err) = prompt_error {
            return Err(err);
        }

        match result {
            Ok(Some(removed)) => writeln!(self.output, "Deleted: {}", removed.title()),
            Ok(None) => writeln!(self.output, "Kept."),
            Err(err) => self.report(&err),
        }
    }

    fn report(&mut self, err: &ServiceError) -> io::Result<()> {
        writeln!(self.output, "error: {err}")
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        read_trimmed_line(&mut self.input)
    }
}

fn read_trimmed_line(input: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn confirm(
    input: &mut impl BufRead,
    output: &mut impl Write,
    record: &ExperienceRecord,
) -> io::Result<bool> {
    write!(output, "Really delete \"{}\"? [y/N]: ", record.title())?;
    output.flush()?;
    let answer = read_trimmed_line(input)?.unwrap_or_default();
    Ok(matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes"))
}

fn write_details(
    output: &mut impl Write,
    index: usize,
    record: &ExperienceRecord,
) -> io::Result<()> {
    writeln!(output, "[{index}] {}", record.title())?;
    writeln!(output, "    Period:   {}", record.date())?;
    writeln!(output, "    Duration: {}", record.duration())?;
    writeln!(output, "    Summary:  {}", record.summary())?;
    writeln!(output, "    Details:  {}", record.details())?;
    writeln!(output, "    Keywords: {}", record.keyword_list().join(", "))?;
    writeln!(output, "    Notes:    {}", record.notes())
}

#[cfg(test)]
mod tests {
    use super::{Command, Shell};
    use experience_core::Route;
    use std::io::Cursor;

    fn run(script: &str) -> (Vec<String>, String) {
        let mut shell = Shell::new(Cursor::new(script.as_bytes().to_vec()), Vec::new());
        shell.run().unwrap();
        let titles = shell
            .service()
            .list_all()
            .iter()
            .map(|record| record.title().to_string())
            .collect();
        let Shell { output, .. } = shell;
        (titles, String::from_utf8(output).unwrap())
    }

    #[test]
    fn parses_commands() {
        assert_eq!(Command::parse("").unwrap(), Command::Navigate(Route::List));
        assert_eq!(Command::parse("edit 2").unwrap(), Command::Navigate(Route::Edit(2)));
        assert_eq!(Command::parse("go /add").unwrap(), Command::Navigate(Route::Add));
        assert_eq!(Command::parse("rm 0").unwrap(), Command::Delete(0));
        assert!(Command::parse("edit").is_err());
        assert!(Command::parse("delete x").is_err());
        assert!(Command::parse("fly").is_err());
    }

    #[test]
    fn add_form_saves_record_with_period() {
        let script = "add\nHackathon\n2024-01-05\n2024-01-10\n6 days\n\n\nrust, teamwork\n\nquit\n";
        let (titles, output) = run(script);
        assert_eq!(titles, vec!["Hackathon"]);
        assert!(output.contains("Added: Hackathon (2024-01-05 ~ 2024-01-10)"));
    }

    #[test]
    fn invalid_date_is_asked_again() {
        let script = "add\nTrip\n2024/01/05\n2024-01-05\n2024-01-06\n\n\n\n\n\nquit\n";
        let (titles, output) = run(script);
        assert_eq!(titles, vec!["Trip"]);
        assert!(output.contains("Please enter a date as YYYY-MM-DD."));
    }

    #[test]
    fn cancel_discards_form() {
        let (titles, output) = run("add\nDraft\n:cancel\nquit\n");
        assert!(titles.is_empty());
        assert!(output.contains("Form discarded."));
    }

    #[test]
    fn edit_keeps_blank_answers() {
        let script = "add\nA\n2024-01-01\n2024-01-02\n\n\n\n\n\n\
                      edit 0\nB\n\n\n\n\n\n\n\nquit\n";
        let (titles, output) = run(script);
        assert_eq!(titles, vec!["B"]);
        assert!(output.contains("Updated: B (2024-01-01 ~ 2024-01-02)"));
    }

    #[test]
    fn clear_token_empties_text_fields() {
        let script = "add\nA\n2024-01-01\n2024-01-02\n\n\n\n\nnote\n\
                      edit 0\n:clear\n\n\n\n\n\n\n:clear\nquit\n";
        let mut shell = Shell::new(Cursor::new(script.as_bytes().to_vec()), Vec::new());
        shell.run().unwrap();

        let records = shell.service().list_all();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title(), "");
        assert_eq!(records[0].notes(), "");
        assert_eq!(records[0].date(), "2024-01-01 ~ 2024-01-02");
    }

    #[test]
    fn clear_token_is_rejected_for_dates() {
        let script = "add\nA\n:clear\n2024-01-01\n2024-01-02\n\n\n\n\n\nquit\n";
        let (titles, output) = run(script);
        assert_eq!(titles, vec!["A"]);
        assert!(output.contains("Please enter a date as YYYY-MM-DD."));
    }

    #[test]
    fn delete_requires_yes() {
        let script = "add\nA\n\n\n\n\n\n\n\n\
                      delete 0\nn\n\
                      delete 0\ny\nquit\n";
        let (titles, output) = run(script);
        assert!(titles.is_empty());
        assert!(output.contains("Kept."));
        assert!(output.contains("Deleted: A"));
    }

    #[test]
    fn go_to_list_path_renders_list_instead_of_form() {
        let (titles, output) = run("go /\nquit\n");
        assert!(titles.is_empty());
        assert!(output.contains("No experiences yet"));
        assert!(!output.contains("=="));
    }

    #[test]
    fn out_of_range_is_reported() {
        let (_, output) = run("edit 3\ndelete 1\nquit\n");
        assert_eq!(output.matches("out of range").count(), 2);
    }

    #[test]
    fn eof_ends_session() {
        let (titles, _) = run("add\nHalf");
        assert!(titles.is_empty());
    }
}
