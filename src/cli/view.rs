//! Frame rendering: configuration pane, tools pane, prompt preview, legend,
//! status bar, and the input bar.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};

use crate::cli::console::{App, Focus, InputState};
use crate::cli::fields::FIELDS;
use crate::cli::theme::Theme;
use crate::config::ThemeToken;
use crate::prompt::{Markup, PromptMode, ToolDescriptor};
use crate::tools;

/// Converts highlight markup into styled lines, splitting segments that
/// span newlines so each output line carries its own spans.
pub(crate) fn markup_lines(markup: &Markup, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();

    for segment in markup.segments() {
        let style = theme.segment_style(segment.kind);
        let mut parts = segment.text.split('\n');

        if let Some(first) = parts.next()
            && !first.is_empty()
        {
            current.push(Span::styled(first.to_string(), style));
        }

        for part in parts {
            lines.push(Line::from(std::mem::take(&mut current)));
            if !part.is_empty() {
                current.push(Span::styled(part.to_string(), style));
            }
        }
    }

    lines.push(Line::from(current));
    lines
}

/// Tool ids in the order the tools pane lists them (grouped by category).
pub(crate) fn flattened_tool_ids(catalog: &[ToolDescriptor]) -> Vec<String> {
    tools::grouped(catalog)
        .into_iter()
        .flat_map(|(_, members)| members.into_iter().map(|tool| tool.id.clone()))
        .collect()
}

pub(crate) fn draw(frame: &mut Frame<'_>, app: &App) {
    let [main, legend, status, input] = Layout::vertical([
        Constraint::Min(8),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let [fields_area, tools_area, preview_area] = Layout::horizontal([
        Constraint::Percentage(30),
        Constraint::Percentage(25),
        Constraint::Percentage(45),
    ])
    .areas(main);

    draw_fields(frame, app, fields_area);
    draw_tools(frame, app, tools_area);
    draw_preview(frame, app, preview_area);
    frame.render_widget(Paragraph::new(legend_line(app)), legend);
    frame.render_widget(Paragraph::new(status_line(app)), status);
    draw_input(frame, app, input);
}

fn draw_fields(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let theme = &app.theme;
    let mut lines = Vec::new();
    let mut last_section = None;

    for (index, field) in FIELDS.iter().enumerate() {
        if last_section != Some(field.section) {
            lines.push(Line::from(Span::styled(
                field.section.label().to_string(),
                theme.style(ThemeToken::SectionHeader),
            )));
            last_section = Some(field.section);
        }

        let value = (field.get)(&app.profile.agent);
        let selected = matches!(app.focus, Focus::Fields) && index == app.field_index;
        let row_style = if selected {
            theme.style(ThemeToken::Selection)
        } else {
            theme.style(ThemeToken::FieldValue)
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {}: ", field.label),
                theme.style(ThemeToken::FieldLabel),
            ),
            Span::styled(truncate(value, 40), row_style),
        ]));
    }

    lines.push(Line::from(Span::styled(
        "FAQs".to_string(),
        theme.style(ThemeToken::SectionHeader),
    )));
    lines.push(Line::from(Span::styled(
        format!("  {} entradas (/faq para editar)", app.profile.agent.faqs.len()),
        theme.style(ThemeToken::FieldLabel),
    )));

    let block = pane_block("Configuración del Agente", matches!(app.focus, Focus::Fields));
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .scroll((app.fields_scroll(), 0)),
        area,
    );
}

fn draw_tools(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let theme = &app.theme;
    let catalog = &app.profile.tools;
    let selected_id = app.selected_tool_id();
    let mut lines = Vec::new();

    for (category, members) in tools::grouped(catalog) {
        let enabled_count = members.iter().filter(|tool| tool.enabled).count();
        lines.push(Line::from(vec![
            Span::styled(
                category.label().to_string(),
                theme.style(ThemeToken::SectionHeader),
            ),
            Span::styled(
                format!("  {enabled_count}/{} activas", members.len()),
                theme.style(ThemeToken::Legend),
            ),
        ]));

        for tool in members {
            let marker = if tool.enabled { "[x]" } else { "[ ]" };
            let state_style = if tool.enabled {
                theme.style(ThemeToken::ToolEnabled)
            } else {
                theme.style(ThemeToken::ToolDisabled)
            };
            let selected = matches!(app.focus, Focus::Tools)
                && selected_id.as_deref() == Some(tool.id.as_str());
            let name_style = if selected {
                theme.style(ThemeToken::Selection)
            } else {
                state_style
            };
            lines.push(Line::from(vec![
                Span::styled(format!("  {marker} "), state_style),
                Span::styled(tool.name.clone(), name_style),
            ]));
        }
    }

    let (enabled_count, total) = tools::counts(catalog);
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("Tools activas: {enabled_count} de {total}"),
        theme.style(ThemeToken::Legend),
    )));

    let block = pane_block("Herramientas", matches!(app.focus, Focus::Tools));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_preview(frame: &mut Frame<'_>, app: &App, area: Rect) {
    if let Some(overlay) = &app.overlay {
        let block = pane_block("Resultado (cualquier tecla para cerrar)", false);
        frame.render_widget(
            Paragraph::new(overlay.clone())
                .block(block)
                .wrap(Wrap { trim: false }),
            area,
        );
        return;
    }

    let markup = app.preview_markup();
    let lines = markup_lines(&markup, &app.theme);

    let title = match (app.session.mode(), app.show_template) {
        (PromptMode::Custom, _) => "Prompt del Agente — personalizado",
        (PromptMode::SystemGenerated, true) => "Prompt del Agente — plantilla",
        (PromptMode::SystemGenerated, false) => "Prompt del Agente — vista previa",
    };
    let block = pane_block(title, matches!(app.focus, Focus::Preview));
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((app.preview_scroll, 0)),
        area,
    );
}

fn legend_line(app: &App) -> Line<'static> {
    let theme = &app.theme;
    let (enabled_count, total) = tools::counts(&app.profile.tools);

    let mut spans = vec![
        Span::styled(" variables".to_string(), theme.style(ThemeToken::Variable)),
        Span::styled(" · ".to_string(), theme.style(ThemeToken::Legend)),
        Span::styled(
            format!("herramientas activas ({enabled_count} de {total})"),
            theme.style(ThemeToken::ToolsList),
        ),
    ];
    if matches!(app.session.mode(), PromptMode::Custom) {
        spans.push(Span::styled(" · ".to_string(), theme.style(ThemeToken::Legend)));
        spans.push(Span::styled(
            "{tokens} sin resolver".to_string(),
            theme.style(ThemeToken::Placeholder),
        ));
    }
    Line::from(spans)
}

fn status_line(app: &App) -> Line<'static> {
    let theme = &app.theme;
    let mode_text = match app.session.mode() {
        PromptMode::SystemGenerated => " Generado ",
        PromptMode::Custom => " Personalizado ",
    };

    let mut spans = vec![Span::styled(
        mode_text.to_string(),
        theme.style(ThemeToken::ModeBadge),
    )];
    if app.dirty() {
        spans.push(Span::styled(
            " Cambios sin guardar ".to_string(),
            theme.style(ThemeToken::DirtyBadge),
        ));
    }

    match &app.status {
        Some(status) => {
            let token = if status.is_error {
                ThemeToken::StatusError
            } else {
                ThemeToken::StatusInfo
            };
            spans.push(Span::styled(format!(" {}", status.text), theme.style(token)));
        }
        None => {
            spans.push(Span::styled(
                " TAB panel · Enter editar · Espacio tool · m modo · r regenerar · p plantilla · / comando · q salir"
                    .to_string(),
                theme.style(ThemeToken::StatusInfo),
            ));
        }
    }

    Line::from(spans)
}

fn draw_input(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let theme = &app.theme;
    let line = match &app.input {
        InputState::Idle => Line::from(""),
        InputState::EditingField { buffer } => {
            let label = app.selected_field_label();
            Line::from(vec![
                Span::styled(format!("{label}: "), theme.style(ThemeToken::FieldLabel)),
                Span::styled(format!("{buffer}▏"), theme.style(ThemeToken::InputBar)),
            ])
        }
        InputState::Command { buffer } => Line::from(Span::styled(
            format!("{buffer}▏"),
            theme.style(ThemeToken::InputBar),
        )),
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn pane_block(title: &str, focused: bool) -> Block<'static> {
    let block = Block::bordered().title(title.to_string());
    if focused {
        block.border_style(
            ratatui::style::Style::default().add_modifier(ratatui::style::Modifier::BOLD),
        )
    } else {
        block
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let truncated: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{truncated}…")
}
