//! Prompt mode state machine: system-generated vs. user-authored text.

use time::Date;

use super::compose;
use super::highlight::{self, Markup};
use super::model::{AgentPromptConfig, ToolDescriptor};
use super::template;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptMode {
    SystemGenerated,
    Custom,
}

/// Holds the active prompt mode and the user-owned custom text buffer, and
/// mediates which text the preview and the export action operate on.
///
/// While in [`PromptMode::SystemGenerated`] the active text is the live
/// compiler output; it re-tracks every configuration or tool edit and is
/// never frozen at the moment of a mode switch.
///
/// Every mutation bumps [`revision`](Self::revision) exactly once. That
/// counter is the "content changed" signal the surrounding editor watches to
/// mark the session dirty; no richer callback is exposed.
#[derive(Debug, Clone)]
pub struct PromptSession {
    mode: PromptMode,
    custom_text: String,
    revision: u64,
}

impl Default for PromptSession {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptSession {
    pub fn new() -> Self {
        Self {
            mode: PromptMode::SystemGenerated,
            custom_text: String::new(),
            revision: 0,
        }
    }

    /// Restores a session with previously saved custom text, still starting
    /// in system-generated mode.
    pub fn with_custom_text(custom_text: impl Into<String>) -> Self {
        Self {
            custom_text: custom_text.into(),
            ..Self::new()
        }
    }

    pub fn mode(&self) -> PromptMode {
        self.mode
    }

    pub fn custom_text(&self) -> &str {
        &self.custom_text
    }

    /// Monotonic change counter; bumped once per mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Switches to user-authored text. The buffer keeps whatever custom text
    /// was last set (initially empty).
    pub fn select_custom(&mut self) {
        if self.mode != PromptMode::Custom {
            self.mode = PromptMode::Custom;
            self.revision += 1;
        }
    }

    pub fn select_system_generated(&mut self) {
        if self.mode != PromptMode::SystemGenerated {
            self.mode = PromptMode::SystemGenerated;
            self.revision += 1;
        }
    }

    /// Forces system-generated mode. Counts as a mutation even when already
    /// in that mode: the user asked for a fresh render.
    pub fn regenerate(&mut self) {
        self.mode = PromptMode::SystemGenerated;
        self.revision += 1;
    }

    /// Replaces the custom buffer. Never touches the agent configuration.
    pub fn set_custom_text(&mut self, text: impl Into<String>) {
        self.custom_text = text.into();
        self.revision += 1;
    }

    /// Called by the editor after it mutates the configuration or the tool
    /// catalog, so the change surfaces through the same signal.
    pub fn note_source_changed(&mut self) {
        self.revision += 1;
    }

    /// The text the export action reads: live compiler output in
    /// system-generated mode, the custom buffer verbatim otherwise.
    pub fn active_text(
        &self,
        config: &AgentPromptConfig,
        tools: &[ToolDescriptor],
        today: Date,
    ) -> String {
        match self.mode {
            PromptMode::SystemGenerated => compose::compile(config, tools, today),
            PromptMode::Custom => self.custom_text.clone(),
        }
    }

    /// The marked-up rendering for the preview pane: resolved-value
    /// highlighting in system-generated mode, placeholder highlighting over
    /// the custom buffer otherwise.
    pub fn active_markup(
        &self,
        config: &AgentPromptConfig,
        tools: &[ToolDescriptor],
        today: Date,
    ) -> Markup {
        match self.mode {
            PromptMode::SystemGenerated => highlight::values(config, tools, today),
            PromptMode::Custom => highlight::placeholders(&self.custom_text, tools),
        }
    }

    /// The placeholder view of the generated template, for reviewing which
    /// substitution points exist. Only meaningful in system-generated mode.
    pub fn template_markup(&self, tools: &[ToolDescriptor], today: Date) -> Markup {
        let text = template::template_text(&compose::long_date_es(today));
        highlight::placeholders(&text, tools)
    }
}

#[cfg(test)]
mod tests {
    use super::{PromptMode, PromptSession};
    use crate::prompt::model::{AgentPromptConfig, ToolCategory, ToolDescriptor};
    use time::macros::date;

    fn tool(name: &str) -> ToolDescriptor {
        ToolDescriptor {
            id: name.to_ascii_lowercase(),
            name: name.to_string(),
            enabled: true,
            category: ToolCategory::Cart,
            ..ToolDescriptor::default()
        }
    }

    #[test]
    fn starts_in_system_generated_mode() {
        let session = PromptSession::new();
        assert_eq!(session.mode(), PromptMode::SystemGenerated);
        assert_eq!(session.revision(), 0);
        assert_eq!(session.custom_text(), "");
    }

    #[test]
    fn config_edits_change_exported_text_but_not_mode() {
        let session = PromptSession::new();
        let today = date!(2025 - 08 - 07);
        let mut config = AgentPromptConfig {
            agent_name: "Sofia".to_string(),
            ..AgentPromptConfig::default()
        };

        let before = session.active_text(&config, &[], today);
        config.agent_name = "Valentina".to_string();
        let after = session.active_text(&config, &[], today);

        assert_eq!(session.mode(), PromptMode::SystemGenerated);
        assert_ne!(before, after);
        assert!(after.contains("Valentina"));
    }

    #[test]
    fn system_generated_text_is_live_not_frozen() {
        let mut session = PromptSession::new();
        let today = date!(2025 - 08 - 07);
        let mut config = AgentPromptConfig::default();

        session.select_custom();
        session.select_system_generated();
        config.store_name = "Fashion Boutique".to_string();

        let text = session.active_text(&config, &[], today);
        assert!(text.contains("Fashion Boutique"));
    }

    #[test]
    fn custom_edits_never_touch_the_configuration() {
        let mut session = PromptSession::new();
        let config = AgentPromptConfig {
            agent_name: "Sofia".to_string(),
            ..AgentPromptConfig::default()
        };
        let snapshot = config.clone();

        session.select_custom();
        session.set_custom_text("Eres un asistente de {tienda}.");

        assert_eq!(config, snapshot);
        assert_eq!(
            session.active_text(&config, &[], date!(2025 - 08 - 07)),
            "Eres un asistente de {tienda}."
        );
    }

    #[test]
    fn regenerate_forces_system_generated() {
        let mut session = PromptSession::new();
        session.select_custom();
        session.set_custom_text("texto propio");

        session.regenerate();
        assert_eq!(session.mode(), PromptMode::SystemGenerated);
        // The custom buffer survives for the next switch.
        assert_eq!(session.custom_text(), "texto propio");
    }

    #[test]
    fn each_mutation_bumps_revision_once() {
        let mut session = PromptSession::new();

        session.select_custom();
        assert_eq!(session.revision(), 1);
        session.select_custom();
        assert_eq!(session.revision(), 1, "re-selecting the same mode is a no-op");
        session.set_custom_text("a");
        assert_eq!(session.revision(), 2);
        session.note_source_changed();
        assert_eq!(session.revision(), 3);
        session.regenerate();
        assert_eq!(session.revision(), 4);
        session.regenerate();
        assert_eq!(session.revision(), 5, "regenerate always counts");
    }

    #[test]
    fn export_reads_the_mode_active_text_untransformed() {
        let mut session = PromptSession::new();
        let today = date!(2025 - 08 - 07);
        let config = AgentPromptConfig::default();
        let tools = vec![tool("Crear Carrito")];

        let generated = session.active_text(&config, &tools, today);
        assert!(generated.contains("- Crear Carrito"));

        session.select_custom();
        session.set_custom_text("sin transformar");
        assert_eq!(session.active_text(&config, &tools, today), "sin transformar");
    }

    #[test]
    fn active_markup_follows_the_mode() {
        use crate::prompt::highlight::SegmentKind;

        let mut session = PromptSession::new();
        let today = date!(2025 - 08 - 07);
        let config = AgentPromptConfig::default();

        let generated = session.active_markup(&config, &[], today);
        assert!(
            generated
                .segments()
                .iter()
                .any(|segment| segment.kind == SegmentKind::ToolsList)
        );

        session.select_custom();
        session.set_custom_text("hola {nombre}");
        let custom = session.active_markup(&config, &[], today);
        assert!(
            custom
                .segments()
                .iter()
                .any(|segment| segment.kind == SegmentKind::Placeholder)
        );
    }
}
