//! Line-oriented command shell.
//!
//! # Responsibility
//! - Own the tank store for the application lifetime and lend it to
//!   components.
//! - Translate text commands into component events (form edits, submits,
//!   deletes, navigation).
//!
//! # Invariants
//! - Every command runs to completion before the next line is read.
//! - User input never panics the shell; failures surface as `ShellError`.

use crate::routes::{render_page, PageContext, Route, RouteError};
use crate::ui::form::{self, FormError, FormField, TankForm};
use crate::ui::list::TankList;
use aquascape_core::{StoreError, TankId, TankStore, TankUpdate};
use log::{debug, info};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(\w+)="([^"]*)"|"([^"]*)"|(\S+)"#).expect("valid token regex"));
static ASSIGNMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\w+)=(.*)$").expect("valid assignment regex"));

pub const HELP_TEXT: &str = "\
commands:
  goto <path>                  navigate (/ or /tanks)
  set <field> <value>          edit a form field (name, size, filter, lighting, co2)
  co2 on|off                   toggle CO₂ injection on the form
  submit                       add a tank from the form
  add key=value ...            fill a fresh form and submit it
  update <id|#n> key=value ... change fields of a stored tank
  delete <id|#n>               remove a tank
  show <id|#n>                 print a tank as JSON
  list                         print the tank list
  help                         show this text
  quit                         exit";

/// Result of one shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellOutcome {
    Output(String),
    Quit,
}

#[derive(Debug)]
pub enum ShellError {
    UnknownCommand(String),
    Usage(&'static str),
    InvalidId(String),
    Form(FormError),
    Route(RouteError),
    Store(StoreError),
    Json(serde_json::Error),
}

impl Display for ShellError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownCommand(name) => write!(f, "unknown command `{name}`; try `help`"),
            Self::Usage(usage) => write!(f, "usage: {usage}"),
            Self::InvalidId(value) => write!(f, "no tank matches `{value}`"),
            Self::Form(err) => write!(f, "{err}"),
            Self::Route(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::Json(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ShellError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Form(err) => Some(err),
            Self::Route(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FormError> for ShellError {
    fn from(value: FormError) -> Self {
        Self::Form(value)
    }
}

impl From<RouteError> for ShellError {
    fn from(value: RouteError) -> Self {
        Self::Route(value)
    }
}

impl From<StoreError> for ShellError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<serde_json::Error> for ShellError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// One command-line token. `key` is set for `key=value` tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Token {
    key: Option<String>,
    value: String,
}

impl Token {
    /// Token text as typed, minus surrounding quotes.
    fn raw(&self) -> String {
        match &self.key {
            Some(key) => format!("{key}={}", self.value),
            None => self.value.clone(),
        }
    }
}

/// Application shell: store, page state and mounted components.
pub struct Shell {
    store: TankStore,
    form: TankForm,
    list: TankList,
    route: Route,
    navigated: bool,
}

impl Default for Shell {
    fn default() -> Self {
        Self::new()
    }
}

impl Shell {
    /// Creates the store and mounts components on the home page.
    pub fn new() -> Self {
        let mut store = TankStore::new();
        let list = TankList::mount(&mut store);
        Self {
            store,
            form: TankForm::new(),
            list,
            route: Route::Home,
            navigated: true,
        }
    }

    pub fn store(&self) -> &TankStore {
        &self.store
    }

    pub fn form(&self) -> &TankForm {
        &self.form
    }

    pub fn route(&self) -> Route {
        self.route
    }

    /// Renders the current page unconditionally.
    pub fn render(&mut self) -> String {
        self.navigated = false;
        let ctx = PageContext {
            tanks: self.store.tanks(),
            form: &self.form,
            list: &self.list,
        };
        render_page(self.route, &ctx)
    }

    /// Renders only when navigation happened or the visible tank list changed.
    pub fn render_if_stale(&mut self) -> Option<String> {
        let list_visible = self.route == Route::Tanks;
        if self.navigated || (list_visible && self.list.needs_render()) {
            Some(self.render())
        } else {
            None
        }
    }

    /// Runs one command line.
    pub fn execute(&mut self, line: &str) -> Result<ShellOutcome, ShellError> {
        let tokens = tokenize(line);
        let Some((command, args)) = tokens.split_first() else {
            return Ok(ShellOutcome::Output(String::new()));
        };
        let command = command.value.to_ascii_lowercase();
        debug!("event=command module=shell status=start command={command}");

        let output = match command.as_str() {
            "help" | "?" => HELP_TEXT.to_string(),
            "quit" | "exit" => return Ok(ShellOutcome::Quit),
            "goto" => self.goto(args)?,
            "set" => self.set(args)?,
            "co2" => self.co2(args)?,
            "submit" => {
                let id = self.form.submit(&mut self.store)?;
                format!("Tank added: {id}")
            }
            "add" => self.add(args)?,
            "update" => self.update(args)?,
            "delete" | "rm" => self.delete(args)?,
            "show" => self.show(args)?,
            "list" => self.list.render(self.store.tanks()),
            other => return Err(ShellError::UnknownCommand(other.to_string())),
        };
        Ok(ShellOutcome::Output(output))
    }

    fn goto(&mut self, args: &[Token]) -> Result<String, ShellError> {
        let [path] = args else {
            return Err(ShellError::Usage("goto <path>"));
        };
        let route = Route::resolve(&path.value)?;
        info!(
            "event=navigate module=shell status=ok from={} to={}",
            self.route.path(),
            route.path()
        );
        self.route = route;
        self.navigated = true;
        Ok(String::new())
    }

    fn set(&mut self, args: &[Token]) -> Result<String, ShellError> {
        let Some((field, rest)) = args.split_first() else {
            return Err(ShellError::Usage("set <field> <value>"));
        };
        let field = field.value.parse::<FormField>()?;
        let value = rest.iter().map(Token::raw).collect::<Vec<_>>().join(" ");
        self.form.set_field(field, value)?;
        Ok(format!("{field} = {}", self.form.value(field)))
    }

    fn co2(&mut self, args: &[Token]) -> Result<String, ShellError> {
        match args {
            [] => self.form.toggle_co2(),
            [flag] => self.form.set_co2(form::parse_flag(&flag.value)?),
            _ => return Err(ShellError::Usage("co2 [on|off]")),
        }
        Ok(format!("co2 = {}", self.form.value(FormField::HasCo2)))
    }

    fn add(&mut self, args: &[Token]) -> Result<String, ShellError> {
        if args.is_empty() {
            return Err(ShellError::Usage("add key=value ..."));
        }
        let mut draft = TankForm::new();
        for (field, value) in assignments(args, "add key=value ...")? {
            draft.set_field(field, value)?;
        }
        let id = draft.submit(&mut self.store)?;
        Ok(format!("Tank added: {id}"))
    }

    fn update(&mut self, args: &[Token]) -> Result<String, ShellError> {
        const USAGE: &str = "update <id|#n> key=value ...";
        let Some((target, rest)) = args.split_first() else {
            return Err(ShellError::Usage(USAGE));
        };
        if rest.is_empty() {
            return Err(ShellError::Usage(USAGE));
        }
        let id = self.resolve_id(&target.value)?;

        let mut updates = TankUpdate::default();
        for (field, value) in assignments(rest, USAGE)? {
            match field {
                FormField::Name => updates.name = Some(form::required(field, &value)?),
                FormField::Size => updates.size_liters = Some(form::parse_number(field, &value)?),
                FormField::FilterType => {
                    updates.filter_type = Some(form::required(field, &value)?)
                }
                FormField::LightingHours => {
                    updates.lighting_hours = Some(form::parse_lighting_hours(&value)?)
                }
                FormField::HasCo2 => updates.has_co2 = Some(form::parse_flag(&value)?),
            }
        }

        if self.store.update(id, updates)? {
            Ok(format!("Tank updated: {id}"))
        } else {
            Ok(format!("No tank with id {id}; nothing changed"))
        }
    }

    fn delete(&mut self, args: &[Token]) -> Result<String, ShellError> {
        let [target] = args else {
            return Err(ShellError::Usage("delete <id|#n>"));
        };
        let id = self.resolve_id(&target.value)?;
        if self.list.delete(&mut self.store, id) {
            Ok(format!("Tank deleted: {id}"))
        } else {
            Ok(format!("No tank with id {id}; nothing changed"))
        }
    }

    fn show(&self, args: &[Token]) -> Result<String, ShellError> {
        let [target] = args else {
            return Err(ShellError::Usage("show <id|#n>"));
        };
        let id = self.resolve_id(&target.value)?;
        match self.store.get_by_id(id) {
            Some(tank) => Ok(serde_json::to_string_pretty(tank)?),
            None => Err(ShellError::InvalidId(target.value.clone())),
        }
    }

    /// Accepts a full UUID or a 1-based list position written as `#n`.
    fn resolve_id(&self, raw: &str) -> Result<TankId, ShellError> {
        if let Some(position) = raw.strip_prefix('#') {
            return position
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|index| self.store.tanks().get(index))
                .map(|tank| tank.id)
                .ok_or_else(|| ShellError::InvalidId(raw.to_string()));
        }
        Uuid::parse_str(raw.trim()).map_err(|_| ShellError::InvalidId(raw.to_string()))
    }
}

fn tokenize(line: &str) -> Vec<Token> {
    TOKEN_RE
        .captures_iter(line)
        .filter_map(|caps| {
            if let (Some(key), Some(value)) = (caps.get(1), caps.get(2)) {
                return Some(Token {
                    key: Some(key.as_str().to_string()),
                    value: value.as_str().to_string(),
                });
            }
            if let Some(quoted) = caps.get(3) {
                return Some(Token {
                    key: None,
                    value: quoted.as_str().to_string(),
                });
            }
            let bare = caps.get(4)?.as_str();
            Some(match ASSIGNMENT_RE.captures(bare) {
                Some(assign) => Token {
                    key: Some(assign[1].to_string()),
                    value: assign[2].to_string(),
                },
                None => Token {
                    key: None,
                    value: bare.to_string(),
                },
            })
        })
        .collect()
}

fn assignments(
    tokens: &[Token],
    usage: &'static str,
) -> Result<Vec<(FormField, String)>, ShellError> {
    tokens
        .iter()
        .map(|token| -> Result<(FormField, String), ShellError> {
            let key = token.key.as_deref().ok_or(ShellError::Usage(usage))?;
            Ok((key.parse::<FormField>()?, token.value.clone()))
        })
        .collect()
}
