//! Interactive form session over stdin/stdout.

use std::io::{BufRead, Write};
use std::ops::ControlFlow;

use billbook_core::api::{HttpRecordsApi, RecordsApi};
use billbook_core::config::ClientConfig;
use billbook_core::{DeleteOutcome, FormController, RecordId, Resource, View};

use crate::commands::common::describe_outcome;
use crate::error::CliError;
use crate::view::{Regions, TerminalView};

const HELP: &str = "\
Commands:
  list                    reload and show every record
  set <field> <value>     change a form field
  show                    show the form
  submit                  save the form (create, or update while editing)
  edit <#row|id>          load a record into the form
  cancel                  leave edit mode
  search <id>             look a record up by id
  delete <#row|id>        delete a record
  help                    show this help
  quit                    leave the shell";

/// A record referenced by list position (`#2`) or by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowRef {
    Position(usize),
    Id(RecordId),
}

impl RowRef {
    pub fn parse(raw: &str) -> Result<Self, CliError> {
        let raw = raw.trim();
        if let Some(position) = raw.strip_prefix('#') {
            return position
                .parse::<usize>()
                .ok()
                .filter(|position| *position > 0)
                .map(Self::Position)
                .ok_or_else(|| CliError::RecordNotFound(raw.to_string()));
        }
        if raw.is_empty() {
            return Err(CliError::EmptyRecordId);
        }
        Ok(Self::Id(RecordId::parse(raw)?))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Empty,
    List,
    Set { field: String, value: String },
    Show,
    Submit,
    Edit(RowRef),
    Cancel,
    Search(String),
    Delete(RowRef),
    Help,
    Quit,
}

impl ShellCommand {
    pub fn parse(line: &str) -> Result<Self, CliError> {
        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(word, rest)| (word, rest.trim()));

        Ok(match word.to_ascii_lowercase().as_str() {
            "" => Self::Empty,
            "list" | "ls" => Self::List,
            "set" => {
                let (field, value) = rest
                    .split_once(char::is_whitespace)
                    .map_or((rest, ""), |(field, value)| (field, value.trim()));
                if field.is_empty() {
                    return Err(CliError::InvalidAssignment(line.to_string()));
                }
                Self::Set {
                    field: field.to_string(),
                    value: value.to_string(),
                }
            }
            "show" | "form" => Self::Show,
            "submit" | "save" => Self::Submit,
            "edit" => Self::Edit(RowRef::parse(rest)?),
            "cancel" => Self::Cancel,
            "search" | "find" => Self::Search(rest.to_string()),
            "delete" | "rm" => Self::Delete(RowRef::parse(rest)?),
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => return Err(CliError::UnknownCommand(other.to_string())),
        })
    }
}

pub async fn run_shell<R: Resource>(config: &ClientConfig) -> Result<(), CliError> {
    let api = HttpRecordsApi::<R>::from_config(config)?;
    let view = TerminalView::stdio(Regions::ALL);
    let mut controller = FormController::<R, _, _>::new(api, view, config.clock());
    controller.view_mut().print(&format!(
        "billbook shell for {} at {} (type 'help')",
        R::COLLECTION,
        config.base_url
    ));

    run_session(&mut controller, &format!("{}> ", R::COLLECTION)).await
}

/// Read-eval loop until `quit` or end of input.
pub async fn run_session<R, A, W, E, I>(
    controller: &mut FormController<R, A, TerminalView<W, E, I>>,
    prompt: &str,
) -> Result<(), CliError>
where
    R: Resource,
    A: RecordsApi<R>,
    W: Write,
    E: Write,
    I: BufRead,
{
    if let Err(error) = controller.load_list().await {
        tracing::debug!("Initial list load failed: {}", error);
    }

    loop {
        controller.view_mut().prompt(prompt)?;
        let Some(line) = controller.view_mut().read_line()? else {
            break;
        };

        let result = match ShellCommand::parse(&line) {
            Ok(command) => execute(controller, command).await,
            Err(error) => Err(error),
        };
        match result {
            Ok(ControlFlow::Break(())) => break,
            Ok(ControlFlow::Continue(())) => {}
            Err(error) if error.is_reported() => {}
            Err(error) => controller.view_mut().show_error(&error.to_string()),
        }
    }

    Ok(())
}

async fn execute<R, A, W, E, I>(
    controller: &mut FormController<R, A, TerminalView<W, E, I>>,
    command: ShellCommand,
) -> Result<ControlFlow<()>, CliError>
where
    R: Resource,
    A: RecordsApi<R>,
    W: Write,
    E: Write,
    I: BufRead,
{
    match command {
        ShellCommand::Empty => {}
        ShellCommand::List => {
            controller.load_list().await.map_err(CliError::reported)?;
        }
        ShellCommand::Set { field, value } => {
            controller
                .set_field(&field, value)
                .map_err(CliError::reported)?;
        }
        ShellCommand::Show => {
            let form = controller.presentation();
            controller.view_mut().print_form(&form);
        }
        ShellCommand::Submit => {
            let outcome = controller.submit().await.map_err(CliError::reported)?;
            let message = describe_outcome::<R>(&outcome);
            controller.view_mut().print(&message);
        }
        ShellCommand::Edit(row) => {
            let id = resolve_row(controller, row)?;
            controller.prepare_edit(&id).map_err(CliError::reported)?;
        }
        ShellCommand::Cancel => controller.cancel_edit(),
        ShellCommand::Search(query) => {
            controller.search(&query).await.map_err(CliError::reported)?;
        }
        ShellCommand::Delete(row) => {
            let id = resolve_row(controller, row)?;
            let outcome = controller.delete(&id).await.map_err(CliError::reported)?;
            if outcome == DeleteOutcome::Cancelled {
                controller.view_mut().print("Cancelled");
            }
        }
        ShellCommand::Help => controller.view_mut().print(HELP),
        ShellCommand::Quit => return Ok(ControlFlow::Break(())),
    }
    Ok(ControlFlow::Continue(()))
}

fn resolve_row<R, A, V>(
    controller: &FormController<R, A, V>,
    row: RowRef,
) -> Result<RecordId, CliError>
where
    R: Resource,
    A: RecordsApi<R>,
    V: View,
{
    match row {
        RowRef::Id(id) => Ok(id),
        RowRef::Position(position) => controller
            .row_id(position - 1)
            .cloned()
            .ok_or_else(|| CliError::RecordNotFound(format!("#{position}"))),
    }
}
