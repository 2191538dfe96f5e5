//! The interactive console: a three-pane editor over the seller profile
//! with a live prompt preview.

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::fs;
use std::io::{Stdout, stdout};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use time::{Date, OffsetDateTime};

use crate::cli::commands::{self, Command, CommandMode, HELP_TEXT};
use crate::cli::fields::{FIELDS, field_by_key};
use crate::cli::theme::Theme;
use crate::cli::view;
use crate::profile::SellerProfile;
use crate::prompt::model::CONTEXT_VARS;
use crate::prompt::{FaqEntry, HttpMethod, MAX_FAQS, Markup, PromptMode, PromptSession};
use crate::tools::{self, CustomToolDraft, tester};
use crate::trace::SessionTrace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Focus {
    Fields,
    Tools,
    Preview,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum InputState {
    Idle,
    EditingField { buffer: String },
    Command { buffer: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Status {
    pub(crate) text: String,
    pub(crate) is_error: bool,
}

pub(crate) struct App {
    pub(crate) profile: SellerProfile,
    pub(crate) profile_path: PathBuf,
    pub(crate) session: PromptSession,
    pub(crate) theme: Theme,
    pub(crate) trace: SessionTrace,
    pub(crate) focus: Focus,
    pub(crate) field_index: usize,
    pub(crate) tool_index: usize,
    pub(crate) preview_scroll: u16,
    pub(crate) input: InputState,
    pub(crate) status: Option<Status>,
    /// Full-pane text shown instead of the preview (help, test results).
    pub(crate) overlay: Option<String>,
    pub(crate) show_template: bool,
    saved_revision: u64,
    test_latency: Duration,
    clock: fn() -> Date,
    should_quit: bool,
}

fn default_clock() -> Date {
    OffsetDateTime::now_utc().date()
}

impl App {
    pub(crate) fn new(
        profile: SellerProfile,
        profile_path: PathBuf,
        theme: Theme,
        trace: SessionTrace,
    ) -> Self {
        let session = PromptSession::with_custom_text(profile.custom_prompt.clone());
        Self {
            profile,
            profile_path,
            session,
            theme,
            trace,
            focus: Focus::Fields,
            field_index: 0,
            tool_index: 0,
            preview_scroll: 0,
            input: InputState::Idle,
            status: None,
            overlay: None,
            show_template: false,
            saved_revision: 0,
            test_latency: tester::SIMULATED_LATENCY,
            clock: default_clock,
            should_quit: false,
        }
    }

    #[cfg(test)]
    pub(crate) fn for_tests(profile: SellerProfile, profile_path: PathBuf, trace: SessionTrace) -> Self {
        let mut app = Self::new(profile, profile_path, Theme::new(false), trace);
        app.test_latency = Duration::ZERO;
        app.clock = || time::macros::date!(2025 - 08 - 07);
        app
    }

    pub(crate) fn today(&self) -> Date {
        (self.clock)()
    }

    pub(crate) fn dirty(&self) -> bool {
        self.session.revision() != self.saved_revision
    }

    pub(crate) fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub(crate) fn preview_markup(&self) -> Markup {
        let today = self.today();
        if self.show_template && self.session.mode() == PromptMode::SystemGenerated {
            self.session.template_markup(&self.profile.tools, today)
        } else {
            self.session
                .active_markup(&self.profile.agent, &self.profile.tools, today)
        }
    }

    pub(crate) fn selected_tool_id(&self) -> Option<String> {
        view::flattened_tool_ids(&self.profile.tools)
            .into_iter()
            .nth(self.tool_index)
    }

    pub(crate) fn selected_field_label(&self) -> &'static str {
        FIELDS[self.field_index.min(FIELDS.len() - 1)].label
    }

    pub(crate) fn fields_scroll(&self) -> u16 {
        (self.field_index as u16).saturating_sub(8)
    }

    fn info(&mut self, text: impl Into<String>) {
        self.status = Some(Status {
            text: text.into(),
            is_error: false,
        });
    }

    fn error(&mut self, text: impl Into<String>) {
        self.status = Some(Status {
            text: text.into(),
            is_error: true,
        });
    }

    pub(crate) async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        self.status = None;
        if self.overlay.take().is_some() {
            return Ok(());
        }

        match std::mem::replace(&mut self.input, InputState::Idle) {
            InputState::Idle => self.handle_idle_key(key).await?,
            InputState::EditingField { buffer } => self.handle_edit_key(key, buffer),
            InputState::Command { buffer } => self.handle_command_key(key, buffer).await?,
        }
        Ok(())
    }

    async fn handle_idle_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Tab => self.cycle_focus(),
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::PageUp => self.preview_scroll = self.preview_scroll.saturating_sub(10),
            KeyCode::PageDown => self.preview_scroll = self.preview_scroll.saturating_add(10),
            KeyCode::Enter => match self.focus {
                Focus::Fields => self.begin_field_edit(),
                Focus::Tools => self.toggle_selected_tool(),
                Focus::Preview => {}
            },
            KeyCode::Char(' ') if self.focus == Focus::Tools => self.toggle_selected_tool(),
            KeyCode::Char('m') => self.toggle_mode(),
            KeyCode::Char('r') => {
                self.session.regenerate();
                self.trace.log_mode("regenerate");
                self.info("Prompt regenerado");
            }
            KeyCode::Char('p') => self.show_template = !self.show_template,
            KeyCode::Char('s') => self.save(),
            KeyCode::Char('/') => {
                self.input = InputState::Command {
                    buffer: "/".to_string(),
                };
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_edit_key(&mut self, key: KeyEvent, mut buffer: String) {
        match key.code {
            KeyCode::Esc => {}
            KeyCode::Enter => self.commit_field_edit(buffer),
            KeyCode::Backspace => {
                buffer.pop();
                self.input = InputState::EditingField { buffer };
            }
            KeyCode::Char(ch) => {
                buffer.push(ch);
                self.input = InputState::EditingField { buffer };
            }
            _ => self.input = InputState::EditingField { buffer },
        }
    }

    async fn handle_command_key(&mut self, key: KeyEvent, mut buffer: String) -> Result<()> {
        match key.code {
            KeyCode::Esc => {}
            KeyCode::Enter => {
                self.trace.log_command(&buffer);
                if commands::is_command_line(&buffer) {
                    match commands::parse_command(&buffer) {
                        Ok(command) => self.execute(command).await?,
                        Err(err) => self.error(err.message().to_string()),
                    }
                } else {
                    self.error("los comandos empiezan con '/'. Prueba /help");
                }
            }
            KeyCode::Backspace => {
                buffer.pop();
                if !buffer.is_empty() {
                    self.input = InputState::Command { buffer };
                }
            }
            KeyCode::Char(ch) => {
                buffer.push(ch);
                self.input = InputState::Command { buffer };
            }
            _ => self.input = InputState::Command { buffer },
        }
        Ok(())
    }

    fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Fields => Focus::Tools,
            Focus::Tools => Focus::Preview,
            Focus::Preview => Focus::Fields,
        };
    }

    fn move_selection(&mut self, delta: i32) {
        match self.focus {
            Focus::Fields => {
                self.field_index = step(self.field_index, delta, FIELDS.len());
            }
            Focus::Tools => {
                let count = self.profile.tools.len();
                self.tool_index = step(self.tool_index, delta, count);
            }
            Focus::Preview => {
                self.preview_scroll = if delta < 0 {
                    self.preview_scroll.saturating_sub(1)
                } else {
                    self.preview_scroll.saturating_add(1)
                };
            }
        }
    }

    fn begin_field_edit(&mut self) {
        let field = &FIELDS[self.field_index];
        self.input = InputState::EditingField {
            buffer: (field.get)(&self.profile.agent).to_string(),
        };
    }

    fn commit_field_edit(&mut self, value: String) {
        let field = &FIELDS[self.field_index];
        (field.set)(&mut self.profile.agent, value.clone());
        self.session.note_source_changed();
        self.trace.log_field_edit(field.key, &value);
    }

    fn toggle_selected_tool(&mut self) {
        let Some(id) = self.selected_tool_id() else {
            return;
        };
        if let Some(enabled) = tools::toggle(&mut self.profile.tools, &id) {
            self.session.note_source_changed();
            self.trace.log_tool_flag(&id, enabled);
            let name = tools::find(&self.profile.tools, &id)
                .map(|tool| tool.name.clone())
                .unwrap_or(id);
            if enabled {
                self.info(format!("Tool activada: {name}"));
            } else {
                self.info(format!("Tool desactivada: {name}"));
            }
        }
    }

    fn toggle_mode(&mut self) {
        match self.session.mode() {
            PromptMode::SystemGenerated => {
                self.session.select_custom();
                self.trace.log_mode("custom");
            }
            PromptMode::Custom => {
                self.session.select_system_generated();
                self.trace.log_mode("sys");
            }
        }
    }

    fn save(&mut self) {
        self.profile.custom_prompt = self.session.custom_text().to_string();
        match self.profile.save(&self.profile_path) {
            Ok(()) => {
                self.saved_revision = self.session.revision();
                self.trace
                    .log_event("save", &self.profile_path.display().to_string());
                self.info("Cambios guardados");
            }
            Err(err) => {
                self.trace.log_error(&err.to_string());
                self.error(err.to_string());
            }
        }
    }

    pub(crate) async fn execute(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Help => self.overlay = Some(HELP_TEXT.to_string()),
            Command::Save => self.save(),
            Command::Reset => {
                self.profile = SellerProfile::sample();
                self.session = PromptSession::new();
                self.session.note_source_changed();
                self.field_index = 0;
                self.tool_index = 0;
                self.trace.log_event("reset", "restored sample profile");
                self.info("Agente reseteado a la configuración base");
            }
            Command::Mode(None) => {
                let mode = match self.session.mode() {
                    PromptMode::SystemGenerated => "sys",
                    PromptMode::Custom => "custom",
                };
                self.trace.log_mode(mode);
                self.info(format!("mode: {mode}"));
            }
            Command::Mode(Some(CommandMode::SystemGenerated)) => {
                self.session.select_system_generated();
                self.trace.log_mode("sys");
                self.info("Modo generado por el sistema");
            }
            Command::Mode(Some(CommandMode::Custom)) => {
                self.session.select_custom();
                self.trace.log_mode("custom");
                self.info("Modo personalizado");
            }
            Command::Regenerate => {
                self.session.regenerate();
                self.trace.log_mode("regenerate");
                self.info("Prompt regenerado");
            }
            Command::Export(path) => self.export(path)?,
            Command::Set { key, value } => match field_by_key(&key) {
                Some(field) => {
                    (field.set)(&mut self.profile.agent, value.clone());
                    self.session.note_source_changed();
                    self.trace.log_field_edit(field.key, &value);
                    self.info(format!("{key} actualizado"));
                }
                None => self.error(format!("campo desconocido '{key}'")),
            },
            Command::FaqAdd { question, answer } => {
                if self.profile.agent.faqs.len() >= MAX_FAQS {
                    self.error(format!("máximo {MAX_FAQS} FAQs por agente"));
                } else {
                    self.trace.log_event("faq", &format!("add: {question}"));
                    self.profile.agent.faqs.push(FaqEntry { question, answer });
                    self.session.note_source_changed();
                    self.info("FAQ agregada");
                }
            }
            Command::FaqRemove(index) => {
                if index > self.profile.agent.faqs.len() {
                    self.error(format!("no existe la FAQ {index}"));
                } else {
                    let removed = self.profile.agent.faqs.remove(index - 1);
                    self.session.note_source_changed();
                    self.trace
                        .log_event("faq", &format!("rm: {}", removed.question));
                    self.info("FAQ eliminada");
                }
            }
            Command::FaqList => {
                let listing = if self.profile.agent.faqs.is_empty() {
                    "Sin FAQs configuradas".to_string()
                } else {
                    self.profile
                        .agent
                        .faqs
                        .iter()
                        .enumerate()
                        .map(|(index, faq)| {
                            format!("{}. {}\n   {}", index + 1, faq.question, faq.answer)
                        })
                        .collect::<Vec<_>>()
                        .join("\n")
                };
                self.overlay = Some(listing);
            }
            Command::ToolOn(key) => self.set_tool_enabled(&key, true),
            Command::ToolOff(key) => self.set_tool_enabled(&key, false),
            Command::ToolNew {
                name,
                url,
                method,
                context_vars,
            } => {
                let method = match method {
                    None => HttpMethod::default(),
                    Some(raw) => match HttpMethod::from_str(&raw) {
                        Ok(method) => method,
                        Err(reason) => {
                            self.error(reason);
                            return Ok(());
                        }
                    },
                };
                if let Some(unknown) = context_vars
                    .iter()
                    .find(|var| !CONTEXT_VARS.contains(&var.as_str()))
                {
                    self.error(format!("variable de contexto desconocida '{unknown}'"));
                    return Ok(());
                }
                let draft = CustomToolDraft {
                    name: name.clone(),
                    url,
                    method,
                    context_vars,
                    ..CustomToolDraft::default()
                };
                match tools::add_custom(&mut self.profile.tools, draft) {
                    Ok(id) => {
                        self.session.note_source_changed();
                        self.trace.log_event("tool.new", &id);
                        self.info(format!("Tool personalizada creada: {name}"));
                    }
                    Err(err) => self.error(err.to_string()),
                }
            }
            Command::ToolTest(key) => self.test_tool(&key).await,
            Command::ToolRemove(key) => {
                let id = match tools::find(&self.profile.tools, &key) {
                    Some(tool) => tool.id.clone(),
                    None => key,
                };
                match tools::remove_custom(&mut self.profile.tools, &id) {
                    Ok(()) => {
                        self.session.note_source_changed();
                        self.trace.log_event("tool.rm", &id);
                        self.tool_index = 0;
                        self.info("Tool eliminada");
                    }
                    Err(err) => self.error(err.to_string()),
                }
            }
            Command::CustomLoad(path) => {
                match fs::read_to_string(&path)
                    .with_context(|| format!("Failed to load custom prompt from {path}"))
                {
                    Ok(text) => {
                        self.session.set_custom_text(text);
                        self.session.select_custom();
                        self.trace.log_event("custom", &format!("load: {path}"));
                        self.info(format!("Prompt personalizado cargado desde {path}"));
                    }
                    Err(err) => self.error(err.to_string()),
                }
            }
            Command::CustomClear => {
                self.session.set_custom_text(String::new());
                self.trace.log_event("custom", "clear");
                self.info("Prompt personalizado vacío");
            }
            Command::Quit => self.should_quit = true,
        }
        Ok(())
    }

    fn export(&mut self, path: Option<String>) -> Result<()> {
        let path = path.unwrap_or_else(|| "prompt.txt".to_string());
        let text =
            self.session
                .active_text(&self.profile.agent, &self.profile.tools, self.today());
        match fs::write(&path, &text) {
            Ok(()) => {
                self.trace.log_event("export", &path);
                self.info(format!("Prompt exportado a {path}"));
            }
            Err(err) => self.error(format!("Failed to export prompt to {path}: {err}")),
        }
        Ok(())
    }

    fn set_tool_enabled(&mut self, key: &str, enabled: bool) {
        let Some(tool) = tools::find(&self.profile.tools, key) else {
            self.error(format!("no existe la tool '{key}'"));
            return;
        };
        let id = tool.id.clone();
        let name = tool.name.clone();
        let already = tool.enabled == enabled;

        if !already {
            tools::toggle(&mut self.profile.tools, &id);
            self.session.note_source_changed();
            self.trace.log_tool_flag(&id, enabled);
        }
        if enabled {
            self.info(format!("Tool activada: {name}"));
        } else {
            self.info(format!("Tool desactivada: {name}"));
        }
    }

    async fn test_tool(&mut self, key: &str) {
        let Some(tool) = tools::find(&self.profile.tools, key) else {
            self.error(format!("no existe la tool '{key}'"));
            return;
        };
        let Some(spec) = tool.webhook.clone() else {
            self.error(format!("'{}' no es una tool personalizada", tool.id));
            return;
        };
        let id = tool.id.clone();

        let outcome = tester::run_test(&spec, self.test_latency, OffsetDateTime::now_utc()).await;
        self.trace.log_event(
            "tool.test",
            &format!("{id}: {}", if outcome.ok { "ok" } else { "error" }),
        );
        if outcome.ok {
            self.info("Prueba exitosa: la tool respondió correctamente");
        } else {
            self.error("Error en la prueba: no se pudo ejecutar la tool");
        }
        self.overlay = Some(outcome.body);
    }
}

fn step(current: usize, delta: i32, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    if delta < 0 {
        current.saturating_sub(delta.unsigned_abs() as usize)
    } else {
        (current + delta as usize).min(len - 1)
    }
}

pub(crate) async fn run_console(mut app: App) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_loop(&mut terminal, &mut app).await;
    restore_terminal(&mut terminal)?;
    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<()> {
    while !app.should_quit() {
        terminal.draw(|frame| view::draw(frame, app))?;

        if event::poll(Duration::from_millis(200))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            app.handle_key(key).await?;
        }
    }
    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("Failed to enable raw terminal mode")?;
    let mut out = stdout();
    execute!(out, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    Terminal::new(CrosstermBackend::new(out)).context("Failed to initialize terminal")
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw terminal mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to restore cursor")
}
