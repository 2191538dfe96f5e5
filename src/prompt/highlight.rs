//! Marked-up renderings of prompt text for review panes.
//!
//! Output is a read-only sequence of typed segments; the view maps segment
//! kinds to styles. Editing always happens on untagged source text, never on
//! markup. Because the sink consumes typed segments instead of concatenated
//! markup strings, configuration text can never be interpreted as markup
//! structure.

use time::Date;

use super::compose;
use super::model::{AgentPromptConfig, ToolDescriptor};
use super::template::{self, SUBSTITUTIONS, TOOLS_TOKEN};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// Fixed template text.
    Plain,
    /// A substituted configuration value.
    Variable,
    /// The rendered tool list in the resolved view.
    ToolsList,
    /// An unresolved `{identifier}` token in template or custom text.
    Placeholder,
    /// The tool list inserted into the placeholder view.
    ToolsSection,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub kind: SegmentKind,
    pub text: String,
}

/// A marked-up rendering of prompt text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Markup {
    segments: Vec<Segment>,
}

impl Markup {
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The untagged text, concatenated. For the resolved view this is
    /// exactly the compiled prompt.
    pub fn to_text(&self) -> String {
        self.segments
            .iter()
            .map(|segment| segment.text.as_str())
            .collect()
    }

    fn push(&mut self, kind: SegmentKind, text: String) {
        if text.is_empty() {
            return;
        }
        self.segments.push(Segment { kind, text });
    }
}

/// Resolved-value highlighting: walks the template, substituting every
/// configuration value while tagging it [`SegmentKind::Variable`] and the
/// tool list [`SegmentKind::ToolsList`]. The untagged concatenation equals
/// [`compose::compile`]'s output.
pub fn values(config: &AgentPromptConfig, tools: &[ToolDescriptor], today: Date) -> Markup {
    let faq_block = compose::faq_block(&config.faqs);
    let tools_text = compose::tools_block(tools);
    let text = template::template_text(&compose::long_date_es(today));

    let mut markup = Markup::default();
    let mut plain = String::new();
    let mut rest = text.as_str();

    while !rest.is_empty() {
        if let Some(tail) = rest.strip_prefix(TOOLS_TOKEN) {
            flush(&mut markup, &mut plain);
            markup.push(SegmentKind::ToolsList, tools_text.clone());
            rest = tail;
            continue;
        }

        if rest.starts_with('{')
            && let Some(substitution) = SUBSTITUTIONS.iter().find(|s| rest.starts_with(s.token))
        {
            flush(&mut markup, &mut plain);
            markup.push(
                SegmentKind::Variable,
                substitution.resolve(config, &faq_block),
            );
            rest = &rest[substitution.token.len()..];
            continue;
        }

        let Some(ch) = rest.chars().next() else {
            break;
        };
        plain.push(ch);
        rest = &rest[ch.len_utf8()..];
    }

    flush(&mut markup, &mut plain);
    markup
}

/// Placeholder highlighting: tags every brace-delimited token without
/// evaluating or validating its identifier, and substitutes the tool list at
/// the tools token, tagged [`SegmentKind::ToolsSection`]. Used for custom
/// prompt text and the template view of the generated prompt.
///
/// A token is `{` + one-or-more non-`}` characters + `}`. `{}` and an
/// unclosed `{` stay plain text; nothing stricter is enforced.
pub fn placeholders(text: &str, tools: &[ToolDescriptor]) -> Markup {
    let tools_text = compose::tools_block(tools);

    let mut markup = Markup::default();
    let mut plain = String::new();
    let mut rest = text;

    while !rest.is_empty() {
        // The tools token wins over brace scanning so its trailing
        // `{toolsList}` is never claimed as a placeholder.
        if let Some(tail) = rest.strip_prefix(TOOLS_TOKEN) {
            flush(&mut markup, &mut plain);
            markup.push(SegmentKind::ToolsSection, tools_text.clone());
            rest = tail;
            continue;
        }

        if rest.starts_with('{') {
            match rest[1..].find('}') {
                Some(0) | None => {}
                Some(offset) => {
                    let token_len = offset + 2;
                    flush(&mut markup, &mut plain);
                    markup.push(SegmentKind::Placeholder, rest[..token_len].to_string());
                    rest = &rest[token_len..];
                    continue;
                }
            }
        }

        let Some(ch) = rest.chars().next() else {
            break;
        };
        plain.push(ch);
        rest = &rest[ch.len_utf8()..];
    }

    flush(&mut markup, &mut plain);
    markup
}

fn flush(markup: &mut Markup, plain: &mut String) {
    if !plain.is_empty() {
        markup.push(SegmentKind::Plain, std::mem::take(plain));
    }
}

#[cfg(test)]
mod tests {
    use super::{SegmentKind, placeholders, values};
    use crate::prompt::compose;
    use crate::prompt::model::{AgentPromptConfig, FaqEntry, ToolCategory, ToolDescriptor};
    use time::macros::date;

    fn tool(name: &str, enabled: bool) -> ToolDescriptor {
        ToolDescriptor {
            id: name.to_ascii_lowercase(),
            name: name.to_string(),
            enabled,
            category: ToolCategory::Products,
            ..ToolDescriptor::default()
        }
    }

    fn full_config() -> AgentPromptConfig {
        AgentPromptConfig {
            agent_name: "Sofia".to_string(),
            base_style: "friendly_and_servicial".to_string(),
            store_name: "TechStore Pro".to_string(),
            faqs: vec![FaqEntry {
                question: "¿Hay garantía?".to_string(),
                answer: "Sí, 12 meses".to_string(),
            }],
            ..AgentPromptConfig::default()
        }
    }

    #[test]
    fn values_markup_concatenates_to_the_compiled_prompt() {
        let config = full_config();
        let tools = vec![tool("Crear Carrito", true)];
        let today = date!(2025 - 08 - 07);

        let markup = values(&config, &tools, today);
        assert_eq!(markup.to_text(), compose::compile(&config, &tools, today));
    }

    #[test]
    fn values_tags_substituted_spans_and_tools() {
        let config = full_config();
        let tools = vec![tool("Crear Carrito", true), tool("Agendar Cita", false)];
        let markup = values(&config, &tools, date!(2025 - 08 - 07));

        let variables: Vec<&str> = markup
            .segments()
            .iter()
            .filter(|segment| segment.kind == SegmentKind::Variable)
            .map(|segment| segment.text.as_str())
            .collect();
        assert!(variables.contains(&"Sofia"));
        assert!(variables.contains(&"TechStore Pro"));
        assert!(variables.contains(&"*¿Hay garantía?*\nSí, 12 meses"));

        let tools_segments: Vec<&str> = markup
            .segments()
            .iter()
            .filter(|segment| segment.kind == SegmentKind::ToolsList)
            .map(|segment| segment.text.as_str())
            .collect();
        assert_eq!(tools_segments, vec!["- Crear Carrito"]);
    }

    #[test]
    fn values_drops_empty_substitutions_without_gaps() {
        // Every field empty: the markup still concatenates to a full prompt
        // and contains no empty segments.
        let markup = values(&AgentPromptConfig::default(), &[], date!(2025 - 08 - 07));
        assert!(markup.segments().iter().all(|segment| !segment.text.is_empty()));
        assert!(markup.to_text().contains("INFORMACIÓN GENERAL DE LA TIENDA:"));
    }

    #[test]
    fn placeholders_tags_brace_tokens_without_evaluating() {
        let markup = placeholders("Hola {nombre}, bienvenido a {tienda}.", &[]);
        let kinds: Vec<(SegmentKind, &str)> = markup
            .segments()
            .iter()
            .map(|segment| (segment.kind, segment.text.as_str()))
            .collect();
        assert_eq!(
            kinds,
            vec![
                (SegmentKind::Plain, "Hola "),
                (SegmentKind::Placeholder, "{nombre}"),
                (SegmentKind::Plain, ", bienvenido a "),
                (SegmentKind::Placeholder, "{tienda}"),
                (SegmentKind::Plain, "."),
            ]
        );
    }

    #[test]
    fn placeholders_substitutes_the_tools_token_as_a_section() {
        let tools = vec![tool("Crear Carrito", true), tool("Consultar Orden", true)];
        let markup = placeholders("Herramientas:\n${toolsList}\nfin", &tools);
        let section = markup
            .segments()
            .iter()
            .find(|segment| segment.kind == SegmentKind::ToolsSection)
            .expect("tools section segment");
        assert_eq!(section.text, "- Crear Carrito\n- Consultar Orden");
        // The token must not be half-consumed as a brace placeholder.
        assert!(
            markup
                .segments()
                .iter()
                .all(|segment| segment.kind != SegmentKind::Placeholder)
        );
    }

    #[test]
    fn placeholders_empty_tools_renders_fallback_section() {
        let markup = placeholders("${toolsList}", &[]);
        assert_eq!(markup.to_text(), "- No hay herramientas disponibles");
    }

    #[test]
    fn placeholders_keeps_malformed_braces_plain() {
        let markup = placeholders("a {} b { c", &[]);
        assert_eq!(
            markup.segments(),
            &[super::Segment {
                kind: SegmentKind::Plain,
                text: "a {} b { c".to_string(),
            }]
        );
    }

    #[test]
    fn placeholders_brace_scan_is_first_open_next_close() {
        let markup = placeholders("{a{b} y {x}}", &[]);
        let kinds: Vec<(SegmentKind, &str)> = markup
            .segments()
            .iter()
            .map(|segment| (segment.kind, segment.text.as_str()))
            .collect();
        assert_eq!(
            kinds,
            vec![
                (SegmentKind::Placeholder, "{a{b}"),
                (SegmentKind::Plain, " y "),
                (SegmentKind::Placeholder, "{x}"),
                (SegmentKind::Plain, "}"),
            ]
        );
    }

    #[test]
    fn rendering_twice_is_byte_identical() {
        let text = "Hola {nombre}\n${toolsList}";
        let tools = vec![tool("Crear Carrito", true)];
        assert_eq!(placeholders(text, &tools), placeholders(text, &tools));

        let config = full_config();
        assert_eq!(
            values(&config, &tools, date!(2025 - 08 - 07)),
            values(&config, &tools, date!(2025 - 08 - 07))
        );
    }

    #[test]
    fn template_view_tags_every_recognized_identifier() {
        let text = crate::prompt::template::template_text("lunes, 1 de enero de 2024");
        let markup = placeholders(&text, &[]);
        let placeholder_count = markup
            .segments()
            .iter()
            .filter(|segment| segment.kind == SegmentKind::Placeholder)
            .count();
        // 23 substitution points, with storeName occurring four times.
        assert_eq!(placeholder_count, 26);
    }
}
