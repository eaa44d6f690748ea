//! Chat command parsing.
//!
//! Every command declares an ordered schema of required arguments. Parsing
//! splits the message on whitespace, checks the argument count against the
//! schema and produces either a typed [`Command`] or a [`CommandError`] that
//! can be rendered as a usage line. Arguments past the schema are ignored.

use std::fmt;

/// One required positional argument of a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArgSpec {
    pub name: &'static str,
}

const ADD_ARGS: &[ArgSpec] = &[ArgSpec { name: "name" }, ArgSpec { name: "url" }];

const EDIT_ARGS: &[ArgSpec] = &[
    ArgSpec { name: "name" },
    ArgSpec { name: "new_name" },
    ArgSpec { name: "new_url" },
];

/// Commands understood by the bot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Start,
    Add,
    Edit,
    Delete,
    List,
}

impl CommandKind {
    pub const ALL: [CommandKind; 5] = [
        CommandKind::Start,
        CommandKind::Add,
        CommandKind::Edit,
        CommandKind::Delete,
        CommandKind::List,
    ];

    /// Keyword following the slash
    pub fn keyword(self) -> &'static str {
        match self {
            CommandKind::Start => "start",
            CommandKind::Add => "add",
            CommandKind::Edit => "edit",
            CommandKind::Delete => "delete",
            CommandKind::List => "list",
        }
    }

    /// Ordered required arguments
    pub fn arg_schema(self) -> &'static [ArgSpec] {
        match self {
            CommandKind::Add => ADD_ARGS,
            CommandKind::Edit => EDIT_ARGS,
            CommandKind::Start | CommandKind::Delete | CommandKind::List => &[],
        }
    }

    /// Usage line rendered from the schema, e.g. `/add <name> <url>`
    pub fn usage(self) -> String {
        let mut usage = format!("/{}", self.keyword());
        for arg in self.arg_schema() {
            usage.push_str(&format!(" <{}>", arg.name));
        }
        usage
    }

    fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.keyword().eq_ignore_ascii_case(keyword))
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.keyword())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddArgs {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditArgs {
    pub name: String,
    pub new_name: String,
    pub new_url: String,
}

/// A fully parsed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Add(AddArgs),
    Edit(EditArgs),
    Delete,
    List,
}

impl Command {
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::Start => CommandKind::Start,
            Command::Add(_) => CommandKind::Add,
            Command::Edit(_) => CommandKind::Edit,
            Command::Delete => CommandKind::Delete,
            Command::List => CommandKind::List,
        }
    }
}

/// Argument validation failure for a recognized command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    MissingArguments { command: CommandKind, found: usize },
}

impl CommandError {
    pub fn command(&self) -> CommandKind {
        match self {
            CommandError::MissingArguments { command, .. } => *command,
        }
    }

    /// Usage line of the failing command
    pub fn usage(&self) -> String {
        self.command().usage()
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::MissingArguments { command, found } => write!(
                f,
                "{} expects {} argument(s), got {}",
                command,
                command.arg_schema().len(),
                found
            ),
        }
    }
}

impl std::error::Error for CommandError {}

/// Parse a message text into a command.
///
/// Returns `None` when the text is not a command this bot handles: plain
/// text, an unknown keyword, or a command addressed to another bot
/// (`/add@OtherBot`). `bot_username` is compared case-insensitively; when it
/// is `None` any `@suffix` is accepted.
pub fn parse_command(text: &str, bot_username: Option<&str>) -> Option<Result<Command, CommandError>> {
    let mut tokens = text.split_whitespace();
    let head = tokens.next()?.strip_prefix('/')?;

    let (keyword, addressee) = match head.split_once('@') {
        Some((keyword, addressee)) => (keyword, Some(addressee)),
        None => (head, None),
    };

    if let (Some(addressee), Some(username)) = (addressee, bot_username) {
        if !addressee.eq_ignore_ascii_case(username) {
            return None;
        }
    }

    let kind = CommandKind::from_keyword(keyword)?;
    let args: Vec<&str> = tokens.collect();
    Some(build_command(kind, &args))
}

fn build_command(kind: CommandKind, args: &[&str]) -> Result<Command, CommandError> {
    let required = kind.arg_schema().len();
    if args.len() < required {
        return Err(CommandError::MissingArguments {
            command: kind,
            found: args.len(),
        });
    }

    let arg = |index: usize| args[index].to_string();
    let command = match kind {
        CommandKind::Start => Command::Start,
        CommandKind::Add => Command::Add(AddArgs {
            name: arg(0),
            url: arg(1),
        }),
        CommandKind::Edit => Command::Edit(EditArgs {
            name: arg(0),
            new_name: arg(1),
            new_url: arg(2),
        }),
        CommandKind::Delete => Command::Delete,
        CommandKind::List => Command::List,
    };
    Ok(command)
}
