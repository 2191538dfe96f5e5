//! Prompt compilation: configuration plus enabled tools in, resolved
//! system-prompt text out.
//!
//! Everything here is a pure function of its arguments. The render date is
//! injected as a [`time::Date`] so re-rendering on every keystroke stays
//! deterministic and testable; nothing reads a global clock.

use time::{Date, Month, Weekday};

use super::highlight;
use super::model::{AgentPromptConfig, FaqEntry, ToolDescriptor};

/// Fallback line when no tool is enabled.
pub const NO_TOOLS_LINE: &str = "- No hay herramientas disponibles";

/// Renders the full system prompt for the given configuration and tool
/// catalog. Missing or malformed fields degrade to empty text or a defined
/// fallback; this function never fails.
pub fn compile(config: &AgentPromptConfig, tools: &[ToolDescriptor], today: Date) -> String {
    highlight::values(config, tools, today).to_text()
}

/// `- name` lines for the enabled subsequence of the catalog, in catalog
/// order, or the literal fallback line when nothing is enabled.
pub fn tools_block(tools: &[ToolDescriptor]) -> String {
    let lines: Vec<String> = tools
        .iter()
        .filter(|tool| tool.enabled)
        .map(|tool| format!("- {}", tool.name))
        .collect();

    if lines.is_empty() {
        NO_TOOLS_LINE.to_string()
    } else {
        lines.join("\n")
    }
}

/// FAQ paragraphs: bold question, answer on the next line, blank line
/// between entries, no trailing separator. An empty list renders empty; the
/// skeleton carries the section heading either way.
pub fn faq_block(faqs: &[FaqEntry]) -> String {
    faqs.iter()
        .map(|faq| format!("*{}*\n{}", faq.question, faq.answer))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Long-form Spanish date, the shape `es-ES` locales render:
/// `jueves, 7 de agosto de 2025`.
pub fn long_date_es(date: Date) -> String {
    format!(
        "{}, {} de {} de {}",
        weekday_es(date.weekday()),
        date.day(),
        month_es(date.month()),
        date.year()
    )
}

fn weekday_es(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Monday => "lunes",
        Weekday::Tuesday => "martes",
        Weekday::Wednesday => "miércoles",
        Weekday::Thursday => "jueves",
        Weekday::Friday => "viernes",
        Weekday::Saturday => "sábado",
        Weekday::Sunday => "domingo",
    }
}

fn month_es(month: Month) -> &'static str {
    match month {
        Month::January => "enero",
        Month::February => "febrero",
        Month::March => "marzo",
        Month::April => "abril",
        Month::May => "mayo",
        Month::June => "junio",
        Month::July => "julio",
        Month::August => "agosto",
        Month::September => "septiembre",
        Month::October => "octubre",
        Month::November => "noviembre",
        Month::December => "diciembre",
    }
}

#[cfg(test)]
mod tests {
    use super::{NO_TOOLS_LINE, compile, faq_block, long_date_es, tools_block};
    use crate::prompt::model::{AgentPromptConfig, FaqEntry, ToolCategory, ToolDescriptor};
    use time::macros::date;

    fn tool(id: &str, name: &str, enabled: bool) -> ToolDescriptor {
        ToolDescriptor {
            id: id.to_string(),
            name: name.to_string(),
            enabled,
            category: ToolCategory::Orders,
            ..ToolDescriptor::default()
        }
    }

    #[test]
    fn long_date_matches_es_locale_shape() {
        assert_eq!(long_date_es(date!(2025 - 08 - 07)), "jueves, 7 de agosto de 2025");
        assert_eq!(long_date_es(date!(2024 - 01 - 01)), "lunes, 1 de enero de 2024");
        assert_eq!(
            long_date_es(date!(2026 - 12 - 26)),
            "sábado, 26 de diciembre de 2026"
        );
    }

    #[test]
    fn tools_block_filters_disabled_and_preserves_order() {
        let tools = vec![
            tool("a", "Buscar Productos", true),
            tool("b", "Agendar Cita", false),
            tool("c", "Estado de Envío", true),
        ];
        insta::assert_snapshot!(tools_block(&tools), @r"
        - Buscar Productos
        - Estado de Envío
        ");
    }

    #[test]
    fn tools_block_falls_back_when_nothing_enabled() {
        assert_eq!(tools_block(&[]), NO_TOOLS_LINE);
        assert_eq!(tools_block(&[tool("a", "Buscar Productos", false)]), NO_TOOLS_LINE);
    }

    #[test]
    fn faq_block_separates_entries_without_trailing_separator() {
        let faqs = vec![
            FaqEntry {
                question: "Q1".to_string(),
                answer: "A1".to_string(),
            },
            FaqEntry {
                question: "Q2".to_string(),
                answer: "A2".to_string(),
            },
        ];
        assert_eq!(faq_block(&faqs), "*Q1*\nA1\n\n*Q2*\nA2");
        assert_eq!(faq_block(&[]), "");
    }

    #[test]
    fn compile_is_deterministic_for_a_fixed_clock() {
        let config = AgentPromptConfig {
            agent_name: "Sofia".to_string(),
            store_name: "TechStore Pro".to_string(),
            ..AgentPromptConfig::default()
        };
        let tools = vec![tool("envio", "Estado de Envío", true)];
        let today = date!(2025 - 08 - 07);

        let first = compile(&config, &tools, today);
        let second = compile(&config, &tools, today);
        assert_eq!(first, second);
    }

    #[test]
    fn compile_starts_with_the_identity_line() {
        let config = AgentPromptConfig {
            agent_name: "Sofia".to_string(),
            store_name: "TechStore Pro".to_string(),
            ..AgentPromptConfig::default()
        };
        let prompt = compile(&config, &[], date!(2025 - 08 - 07));
        let first_line = prompt.lines().next().expect("prompt has lines");
        assert_eq!(
            first_line,
            "Eres Sofia, un agente de inteligencia artificial especializado en e-commerce. Tu propósito es asistir a los clientes de TechStore Pro."
        );
    }

    #[test]
    fn compile_bakes_the_injected_date() {
        let prompt = compile(&AgentPromptConfig::default(), &[], date!(2025 - 08 - 07));
        assert!(prompt.contains("Hoy es jueves, 7 de agosto de 2025"));
    }

    #[test]
    fn unknown_base_style_resolves_to_empty_description() {
        let config = AgentPromptConfig {
            base_style: "no_such_style".to_string(),
            ..AgentPromptConfig::default()
        };
        let prompt = compile(&config, &[], date!(2025 - 08 - 07));
        assert!(prompt.contains("Tu estilo de conversación debe ser: \n"));
    }
}
