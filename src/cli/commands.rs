#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    Help,
    Save,
    Reset,
    Mode(Option<CommandMode>),
    Regenerate,
    Export(Option<String>),
    Set { key: String, value: String },
    FaqAdd { question: String, answer: String },
    FaqRemove(usize),
    FaqList,
    ToolOn(String),
    ToolOff(String),
    ToolNew {
        name: String,
        url: String,
        method: Option<String>,
        context_vars: Vec<String>,
    },
    ToolTest(String),
    ToolRemove(String),
    CustomLoad(String),
    CustomClear,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CommandMode {
    SystemGenerated,
    Custom,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ParseError {
    message: String,
}

impl ParseError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub(crate) fn message(&self) -> &str {
        &self.message
    }
}

pub(crate) const HELP_TEXT: &str = "Available commands:\n  /help                      Show this command list\n  /save                      Persist the profile to disk\n  /reset                     Restore the sample profile (discards edits)\n  /mode [sys|custom]         Show or switch the prompt mode\n  /regenerate                Force a fresh system-generated prompt\n  /export [path]             Write the active prompt text to a file\n  /set <field> <value>       Set a configuration field by key\n  /faq add <q> :: <a>        Append a FAQ entry (max 10)\n  /faq rm <n>                Remove FAQ entry n (1-based)\n  /faq list                  List FAQ entries\n  /tool on|off <id>          Enable or disable a tool\n  /tool new <name> :: <url> [:: <method> [:: <vars,comma>]]  Create a custom tool\n  /tool test <id>            Run a simulated invocation\n  /tool rm <id>              Remove a custom tool\n  /custom load <file>        Load custom prompt text from a file\n  /custom clear              Clear the custom prompt text\n  /quit                      Exit the console";

pub(crate) fn is_command_line(line: &str) -> bool {
    line.starts_with('/')
}

pub(crate) fn parse_command(line: &str) -> Result<Command, ParseError> {
    if !line.starts_with('/') {
        return Err(ParseError::new("not a command"));
    }

    let trimmed = line.trim();
    if trimmed == "/" {
        return Err(ParseError::new("empty command. Try /help"));
    }

    let command_text = &trimmed[1..];
    let mut parts = command_text.splitn(2, char::is_whitespace);
    let name = parts.next().unwrap_or("").to_ascii_lowercase();
    if name.is_empty() {
        return Err(ParseError::new("empty command. Try /help"));
    }
    let rest = parts.next().map(str::trim).unwrap_or("");

    match name.as_str() {
        "help" => expect_no_args(rest, Command::Help, "usage: /help"),
        "save" => expect_no_args(rest, Command::Save, "usage: /save"),
        "reset" => expect_no_args(rest, Command::Reset, "usage: /reset"),
        "mode" => parse_mode(rest),
        "regenerate" => expect_no_args(rest, Command::Regenerate, "usage: /regenerate"),
        "export" => Ok(Command::Export(if rest.is_empty() {
            None
        } else {
            Some(rest.to_string())
        })),
        "set" => parse_set(rest),
        "faq" => parse_faq(rest),
        "tool" => parse_tool(rest),
        "custom" => parse_custom(rest),
        "quit" | "exit" => expect_no_args(rest, Command::Quit, "usage: /quit"),
        _ => Err(ParseError::new(format!(
            "unknown command '/{name}'. Try /help"
        ))),
    }
}

fn expect_no_args(rest: &str, command: Command, usage: &str) -> Result<Command, ParseError> {
    if rest.is_empty() {
        Ok(command)
    } else {
        Err(ParseError::new(usage))
    }
}

fn parse_mode(rest: &str) -> Result<Command, ParseError> {
    if rest.is_empty() {
        return Ok(Command::Mode(None));
    }

    match rest {
        "sys" => Ok(Command::Mode(Some(CommandMode::SystemGenerated))),
        "custom" => Ok(Command::Mode(Some(CommandMode::Custom))),
        _ => Err(ParseError::new("usage: /mode [sys|custom]")),
    }
}

fn parse_set(rest: &str) -> Result<Command, ParseError> {
    let mut parts = rest.splitn(2, char::is_whitespace);
    let key = parts.next().unwrap_or("");
    if key.is_empty() {
        return Err(ParseError::new("usage: /set <field> <value>"));
    }
    let value = parts.next().map(str::trim).unwrap_or("");

    Ok(Command::Set {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_faq(rest: &str) -> Result<Command, ParseError> {
    let mut parts = rest.splitn(2, char::is_whitespace);
    let action = parts.next().unwrap_or("");
    let args = parts.next().map(str::trim).unwrap_or("");

    match action {
        "add" => {
            let Some((question, answer)) = split_double_colon(args) else {
                return Err(ParseError::new("usage: /faq add <question> :: <answer>"));
            };
            Ok(Command::FaqAdd {
                question: question.to_string(),
                answer: answer.to_string(),
            })
        }
        "rm" => {
            let index = args
                .parse::<usize>()
                .map_err(|_| ParseError::new("usage: /faq rm <n>"))?;
            if index == 0 {
                return Err(ParseError::new("usage: /faq rm <n> (n must be >= 1)"));
            }
            Ok(Command::FaqRemove(index))
        }
        "list" => expect_no_args(args, Command::FaqList, "usage: /faq list"),
        _ => Err(ParseError::new("usage: /faq add|rm|list")),
    }
}

fn parse_tool(rest: &str) -> Result<Command, ParseError> {
    let mut parts = rest.splitn(2, char::is_whitespace);
    let action = parts.next().unwrap_or("");
    let args = parts.next().map(str::trim).unwrap_or("");

    match action {
        "on" => required_arg(args, "usage: /tool on <id>").map(Command::ToolOn),
        "off" => required_arg(args, "usage: /tool off <id>").map(Command::ToolOff),
        "test" => required_arg(args, "usage: /tool test <id>").map(Command::ToolTest),
        "rm" => required_arg(args, "usage: /tool rm <id>").map(Command::ToolRemove),
        "new" => parse_tool_new(args),
        _ => Err(ParseError::new("usage: /tool on|off|new|test|rm")),
    }
}

fn parse_tool_new(args: &str) -> Result<Command, ParseError> {
    const USAGE: &str = "usage: /tool new <name> :: <url> [:: <method> [:: <vars,comma>]]";

    let parts: Vec<&str> = args.split("::").map(str::trim).collect();
    let (name, url) = match (parts.first(), parts.get(1)) {
        (Some(name), Some(url)) if !name.is_empty() && !url.is_empty() => (*name, *url),
        _ => return Err(ParseError::new(USAGE)),
    };
    if parts.len() > 4 {
        return Err(ParseError::new(USAGE));
    }

    let method = parts.get(2).map(|method| method.to_string());
    let context_vars = parts
        .get(3)
        .map(|vars| {
            vars.split(',')
                .map(str::trim)
                .filter(|var| !var.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    Ok(Command::ToolNew {
        name: name.to_string(),
        url: url.to_string(),
        method,
        context_vars,
    })
}

fn parse_custom(rest: &str) -> Result<Command, ParseError> {
    let mut parts = rest.splitn(2, char::is_whitespace);
    let action = parts.next().unwrap_or("");
    let args = parts.next().map(str::trim).unwrap_or("");

    match action {
        "load" => required_arg(args, "usage: /custom load <file>").map(Command::CustomLoad),
        "clear" => expect_no_args(args, Command::CustomClear, "usage: /custom clear"),
        _ => Err(ParseError::new("usage: /custom load|clear")),
    }
}

fn required_arg(args: &str, usage: &str) -> Result<String, ParseError> {
    if args.is_empty() {
        return Err(ParseError::new(usage));
    }
    Ok(args.to_string())
}

fn split_double_colon(text: &str) -> Option<(&str, &str)> {
    text.split_once("::")
        .map(|(left, right)| (left.trim(), right.trim()))
}

#[cfg(test)]
mod tests {
    use super::{Command, CommandMode, HELP_TEXT, is_command_line, parse_command};

    #[test]
    fn help_text_lists_all_supported_commands() {
        for needle in [
            "/help",
            "/save",
            "/reset",
            "/mode [sys|custom]",
            "/regenerate",
            "/export [path]",
            "/set <field> <value>",
            "/faq add <q> :: <a>",
            "/faq rm <n>",
            "/faq list",
            "/tool on|off <id>",
            "/tool new <name> :: <url>",
            "/tool test <id>",
            "/tool rm <id>",
            "/custom load <file>",
            "/custom clear",
            "/quit",
        ] {
            assert!(HELP_TEXT.contains(needle), "missing help entry: {needle}");
        }
    }

    #[test]
    fn parse_simple_commands() {
        assert_eq!(parse_command("/help").expect("help"), Command::Help);
        assert_eq!(parse_command("/save").expect("save"), Command::Save);
        assert_eq!(parse_command("/reset").expect("reset"), Command::Reset);
        assert_eq!(
            parse_command("/regenerate").expect("regenerate"),
            Command::Regenerate
        );
        assert_eq!(parse_command("/quit").expect("quit"), Command::Quit);
        assert_eq!(parse_command("/exit").expect("exit alias"), Command::Quit);
    }

    #[test]
    fn parse_mode_optional_argument() {
        assert_eq!(parse_command("/mode").expect("mode"), Command::Mode(None));
        assert_eq!(
            parse_command("/mode sys").expect("mode sys"),
            Command::Mode(Some(CommandMode::SystemGenerated))
        );
        assert_eq!(
            parse_command("/mode custom").expect("mode custom"),
            Command::Mode(Some(CommandMode::Custom))
        );
    }

    #[test]
    fn parse_export_with_and_without_path() {
        assert_eq!(parse_command("/export").expect("export"), Command::Export(None));
        assert_eq!(
            parse_command("/export /tmp/prompt.txt").expect("export path"),
            Command::Export(Some("/tmp/prompt.txt".to_string()))
        );
    }

    #[test]
    fn parse_set_splits_key_and_value() {
        assert_eq!(
            parse_command("/set store_name TechStore Pro").expect("set"),
            Command::Set {
                key: "store_name".to_string(),
                value: "TechStore Pro".to_string(),
            }
        );
        // An omitted value clears the field.
        assert_eq!(
            parse_command("/set tone").expect("set empty"),
            Command::Set {
                key: "tone".to_string(),
                value: String::new(),
            }
        );
    }

    #[test]
    fn parse_faq_subcommands() {
        assert_eq!(
            parse_command("/faq add ¿Hay garantía? :: Sí, 12 meses").expect("faq add"),
            Command::FaqAdd {
                question: "¿Hay garantía?".to_string(),
                answer: "Sí, 12 meses".to_string(),
            }
        );
        assert_eq!(parse_command("/faq rm 2").expect("faq rm"), Command::FaqRemove(2));
        assert_eq!(parse_command("/faq list").expect("faq list"), Command::FaqList);
    }

    #[test]
    fn parse_tool_subcommands() {
        assert_eq!(
            parse_command("/tool on crear-carrito").expect("tool on"),
            Command::ToolOn("crear-carrito".to_string())
        );
        assert_eq!(
            parse_command("/tool off crear-carrito").expect("tool off"),
            Command::ToolOff("crear-carrito".to_string())
        );
        assert_eq!(
            parse_command("/tool test webhook-inventario").expect("tool test"),
            Command::ToolTest("webhook-inventario".to_string())
        );
        assert_eq!(
            parse_command("/tool rm webhook-inventario").expect("tool rm"),
            Command::ToolRemove("webhook-inventario".to_string())
        );
    }

    #[test]
    fn parse_tool_new_with_optional_method_and_vars() {
        assert_eq!(
            parse_command("/tool new Consultar Inventario :: https://api.ejemplo.com")
                .expect("tool new"),
            Command::ToolNew {
                name: "Consultar Inventario".to_string(),
                url: "https://api.ejemplo.com".to_string(),
                method: None,
                context_vars: vec![],
            }
        );
        assert_eq!(
            parse_command("/tool new Consultar Inventario :: https://api.ejemplo.com :: GET")
                .expect("tool new with method"),
            Command::ToolNew {
                name: "Consultar Inventario".to_string(),
                url: "https://api.ejemplo.com".to_string(),
                method: Some("GET".to_string()),
                context_vars: vec![],
            }
        );
        assert_eq!(
            parse_command(
                "/tool new Consultar Inventario :: https://api.ejemplo.com :: POST :: user_id, user_message"
            )
            .expect("tool new with vars"),
            Command::ToolNew {
                name: "Consultar Inventario".to_string(),
                url: "https://api.ejemplo.com".to_string(),
                method: Some("POST".to_string()),
                context_vars: vec!["user_id".to_string(), "user_message".to_string()],
            }
        );
    }

    #[test]
    fn parse_custom_subcommands() {
        assert_eq!(
            parse_command("/custom load notas/prompt.txt").expect("custom load"),
            Command::CustomLoad("notas/prompt.txt".to_string())
        );
        assert_eq!(
            parse_command("/custom clear").expect("custom clear"),
            Command::CustomClear
        );
    }

    #[test]
    fn parse_reports_usage_for_invalid_arguments() {
        assert_eq!(
            parse_command("/mode loud").expect_err("invalid mode").message(),
            "usage: /mode [sys|custom]"
        );
        assert_eq!(
            parse_command("/faq add sin separador")
                .expect_err("faq add without separator")
                .message(),
            "usage: /faq add <question> :: <answer>"
        );
        assert_eq!(
            parse_command("/faq rm 0")
                .expect_err("faq rm zero")
                .message(),
            "usage: /faq rm <n> (n must be >= 1)"
        );
        assert_eq!(
            parse_command("/tool on").expect_err("tool on missing id").message(),
            "usage: /tool on <id>"
        );
        assert_eq!(
            parse_command("/tool new solo-nombre")
                .expect_err("tool new missing url")
                .message(),
            "usage: /tool new <name> :: <url> [:: <method> [:: <vars,comma>]]"
        );
        assert_eq!(
            parse_command("/custom").expect_err("custom without action").message(),
            "usage: /custom load|clear"
        );
    }

    #[test]
    fn parse_reports_unknown_commands() {
        assert_eq!(
            parse_command("/bogus").expect_err("unknown command").message(),
            "unknown command '/bogus'. Try /help"
        );
    }

    #[test]
    fn parse_reports_empty_command_when_name_is_missing() {
        assert_eq!(
            parse_command("/ help")
                .expect_err("missing command name")
                .message(),
            "empty command. Try /help"
        );
    }

    #[test]
    fn command_line_detection_is_prefix_based() {
        assert!(is_command_line("/help"));
        assert!(is_command_line("/tool on x"));
        assert!(!is_command_line(" /help"));
        assert!(!is_command_line("texto con /help dentro"));
    }
}
