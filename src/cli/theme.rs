use crate::config::{
    HexColor, StyleOverride, ThemeConfig as UserThemeConfig, ThemeModifier, ThemePreset, ThemeToken,
};
use crate::prompt::SegmentKind;
use ratatui::style::{Color, Modifier, Style};
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct Theme {
    enabled: bool,
    styles: HashMap<ThemeToken, Style>,
}

impl Theme {
    #[cfg(test)]
    pub fn new(enabled: bool) -> Self {
        Self::from_config(enabled, &UserThemeConfig::default())
    }

    pub fn from_config(enabled: bool, config: &UserThemeConfig) -> Self {
        let mut styles = preset_styles(config.preset);
        for (token, override_style) in &config.styles {
            let base = styles.get(token).copied().unwrap_or_default();
            styles.insert(*token, merge_style(base, override_style));
        }

        Self { enabled, styles }
    }

    pub fn style(&self, token: ThemeToken) -> Style {
        if !self.enabled {
            return disabled_style(token);
        }

        self.styles.get(&token).copied().unwrap_or_default()
    }

    /// Style for a highlight-markup segment kind.
    pub fn segment_style(&self, kind: SegmentKind) -> Style {
        self.style(segment_token_for(kind))
    }
}

fn segment_token_for(kind: SegmentKind) -> ThemeToken {
    match kind {
        SegmentKind::Plain => ThemeToken::PreviewText,
        SegmentKind::Variable => ThemeToken::Variable,
        SegmentKind::ToolsList => ThemeToken::ToolsList,
        SegmentKind::Placeholder => ThemeToken::Placeholder,
        SegmentKind::ToolsSection => ThemeToken::ToolsSection,
    }
}

fn preset_styles(preset: ThemePreset) -> HashMap<ThemeToken, Style> {
    ThemeToken::all()
        .iter()
        .copied()
        .map(|token| (token, preset_style(preset, token)))
        .collect()
}

fn preset_style(preset: ThemePreset, token: ThemeToken) -> Style {
    match preset {
        ThemePreset::Default => default_preset_style(token),
        ThemePreset::Light => light_preset_style(token),
        ThemePreset::HighContrast => high_contrast_preset_style(token),
    }
}

fn default_preset_style(token: ThemeToken) -> Style {
    match token {
        ThemeToken::SectionHeader => Style::default()
            .fg(Color::Rgb(125, 166, 255))
            .add_modifier(Modifier::BOLD),
        ThemeToken::FieldLabel => Style::default().fg(Color::Rgb(86, 95, 137)),
        ThemeToken::FieldValue => Style::default().fg(Color::White),
        ThemeToken::Selection => Style::default()
            .bg(Color::Rgb(41, 46, 66))
            .add_modifier(Modifier::BOLD),
        ThemeToken::PreviewText => Style::default().fg(Color::Rgb(192, 202, 245)),
        ThemeToken::Variable => Style::default().fg(Color::Rgb(158, 206, 106)),
        ThemeToken::Placeholder => Style::default()
            .fg(Color::Rgb(224, 175, 104))
            .add_modifier(Modifier::BOLD),
        ThemeToken::ToolsList | ThemeToken::ToolsSection => {
            Style::default().fg(Color::Rgb(122, 162, 247))
        }
        ThemeToken::ToolEnabled => Style::default().fg(Color::Rgb(158, 206, 106)),
        ThemeToken::ToolDisabled => Style::default()
            .fg(Color::Rgb(86, 95, 137))
            .add_modifier(Modifier::DIM),
        ThemeToken::Legend => Style::default()
            .fg(Color::Rgb(86, 95, 137))
            .add_modifier(Modifier::ITALIC),
        ThemeToken::StatusInfo => Style::default().fg(Color::Rgb(86, 95, 137)),
        ThemeToken::StatusError => Style::default()
            .fg(Color::Rgb(247, 118, 142))
            .add_modifier(Modifier::BOLD),
        ThemeToken::ModeBadge => Style::default()
            .fg(Color::Rgb(187, 154, 247))
            .add_modifier(Modifier::BOLD),
        ThemeToken::DirtyBadge => Style::default()
            .fg(Color::Rgb(255, 158, 100))
            .add_modifier(Modifier::BOLD),
        ThemeToken::InputBar => Style::default().bg(Color::Rgb(22, 22, 30)).fg(Color::White),
    }
}

fn light_preset_style(token: ThemeToken) -> Style {
    match token {
        ThemeToken::SectionHeader => Style::default()
            .fg(Color::Rgb(31, 111, 235))
            .add_modifier(Modifier::BOLD),
        ThemeToken::FieldLabel => Style::default().fg(Color::Rgb(80, 90, 110)),
        ThemeToken::FieldValue => Style::default().fg(Color::Rgb(36, 41, 47)),
        ThemeToken::Selection => Style::default()
            .bg(Color::Rgb(221, 230, 244))
            .add_modifier(Modifier::BOLD),
        ThemeToken::PreviewText => Style::default().fg(Color::Rgb(36, 41, 47)),
        ThemeToken::Variable => Style::default().fg(Color::Rgb(5, 110, 40)),
        ThemeToken::Placeholder => Style::default()
            .fg(Color::Rgb(154, 103, 0))
            .add_modifier(Modifier::BOLD),
        ThemeToken::ToolsList | ThemeToken::ToolsSection => {
            Style::default().fg(Color::Rgb(9, 105, 218))
        }
        ThemeToken::ToolEnabled => Style::default().fg(Color::Rgb(5, 110, 40)),
        ThemeToken::ToolDisabled => Style::default()
            .fg(Color::Rgb(140, 149, 159))
            .add_modifier(Modifier::DIM),
        ThemeToken::Legend => Style::default()
            .fg(Color::Rgb(80, 90, 110))
            .add_modifier(Modifier::ITALIC),
        ThemeToken::StatusInfo => Style::default().fg(Color::Rgb(36, 70, 120)),
        ThemeToken::StatusError => Style::default()
            .fg(Color::Rgb(176, 0, 32))
            .add_modifier(Modifier::BOLD),
        ThemeToken::ModeBadge => Style::default()
            .fg(Color::Rgb(102, 57, 186))
            .add_modifier(Modifier::BOLD),
        ThemeToken::DirtyBadge => Style::default()
            .fg(Color::Rgb(188, 76, 0))
            .add_modifier(Modifier::BOLD),
        ThemeToken::InputBar => Style::default()
            .bg(Color::Rgb(246, 248, 250))
            .fg(Color::Rgb(36, 41, 47)),
    }
}

fn high_contrast_preset_style(token: ThemeToken) -> Style {
    match token {
        ThemeToken::SectionHeader => Style::default()
            .fg(Color::Rgb(135, 206, 250))
            .add_modifier(Modifier::BOLD),
        ThemeToken::FieldLabel => Style::default().fg(Color::Rgb(220, 220, 220)),
        ThemeToken::FieldValue => Style::default().fg(Color::Rgb(255, 255, 255)),
        ThemeToken::Selection => Style::default().add_modifier(Modifier::REVERSED),
        ThemeToken::PreviewText => Style::default().fg(Color::Rgb(255, 255, 255)),
        ThemeToken::Variable => Style::default().fg(Color::Rgb(0, 255, 127)),
        ThemeToken::Placeholder => Style::default()
            .fg(Color::Rgb(255, 215, 0))
            .add_modifier(Modifier::BOLD),
        ThemeToken::ToolsList | ThemeToken::ToolsSection => {
            Style::default().fg(Color::Rgb(135, 206, 250))
        }
        ThemeToken::ToolEnabled => Style::default().fg(Color::Rgb(0, 255, 127)),
        ThemeToken::ToolDisabled => Style::default().fg(Color::Rgb(169, 169, 169)),
        ThemeToken::Legend => Style::default().fg(Color::Rgb(220, 220, 220)),
        ThemeToken::StatusInfo => Style::default().fg(Color::Rgb(173, 216, 230)),
        ThemeToken::StatusError => Style::default()
            .fg(Color::Rgb(255, 64, 64))
            .add_modifier(Modifier::BOLD),
        ThemeToken::ModeBadge => Style::default()
            .fg(Color::Rgb(255, 215, 0))
            .add_modifier(Modifier::BOLD),
        ThemeToken::DirtyBadge => Style::default()
            .fg(Color::Rgb(255, 140, 0))
            .add_modifier(Modifier::BOLD),
        ThemeToken::InputBar => Style::default()
            .bg(Color::Rgb(0, 0, 0))
            .fg(Color::Rgb(255, 255, 255)),
    }
}

fn disabled_style(token: ThemeToken) -> Style {
    match token {
        ThemeToken::SectionHeader | ThemeToken::Placeholder => {
            Style::default().add_modifier(Modifier::BOLD)
        }
        ThemeToken::Selection => Style::default().add_modifier(Modifier::REVERSED),
        _ => Style::default(),
    }
}

fn merge_style(base: Style, override_style: &StyleOverride) -> Style {
    let mut merged = base;

    if let Some(fg) = override_style.fg {
        merged = merged.fg(color_from_hex(fg));
    }

    if let Some(bg) = override_style.bg {
        merged = merged.bg(color_from_hex(bg));
    }

    if let Some(modifiers) = &override_style.modifiers {
        merged = merged
            .remove_modifier(Modifier::all())
            .add_modifier(modifiers_to_modifier(modifiers));
    }

    merged
}

fn color_from_hex(color: HexColor) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}

fn modifiers_to_modifier(modifiers: &[ThemeModifier]) -> Modifier {
    modifiers
        .iter()
        .copied()
        .fold(Modifier::empty(), |acc, modifier| {
            acc | modifier_to_ratatui(modifier)
        })
}

fn modifier_to_ratatui(modifier: ThemeModifier) -> Modifier {
    match modifier {
        ThemeModifier::Bold => Modifier::BOLD,
        ThemeModifier::Dim => Modifier::DIM,
        ThemeModifier::Italic => Modifier::ITALIC,
        ThemeModifier::Underlined => Modifier::UNDERLINED,
        ThemeModifier::Reversed => Modifier::REVERSED,
        ThemeModifier::CrossedOut => Modifier::CROSSED_OUT,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::Theme;
    use crate::config::{HexColor, StyleOverride, ThemeConfig, ThemePreset, ThemeToken};
    use crate::prompt::SegmentKind;

    #[test]
    fn theme_new_matches_default_preset() {
        let theme = Theme::new(true);
        assert_eq!(
            theme.style(ThemeToken::Variable),
            Theme::from_config(true, &ThemeConfig::default()).style(ThemeToken::Variable)
        );
    }

    #[test]
    fn disabled_theme_keeps_structure_only() {
        let theme = Theme::new(false);
        assert!(
            theme
                .style(ThemeToken::SectionHeader)
                .add_modifier
                .contains(ratatui::style::Modifier::BOLD)
        );
        assert_eq!(
            theme.style(ThemeToken::Variable),
            ratatui::style::Style::default()
        );
    }

    #[test]
    fn segment_kinds_map_to_their_tokens() {
        let theme = Theme::new(true);
        assert_eq!(
            theme.segment_style(SegmentKind::Variable),
            theme.style(ThemeToken::Variable)
        );
        assert_eq!(
            theme.segment_style(SegmentKind::ToolsSection),
            theme.style(ThemeToken::ToolsSection)
        );
        assert_eq!(
            theme.segment_style(SegmentKind::Plain),
            theme.style(ThemeToken::PreviewText)
        );
    }

    #[test]
    fn partial_override_preserves_unset_fields() {
        let mut config = ThemeConfig {
            preset: ThemePreset::Default,
            styles: HashMap::new(),
        };
        config.styles.insert(
            ThemeToken::Placeholder,
            StyleOverride {
                fg: Some(HexColor { r: 1, g: 2, b: 3 }),
                bg: None,
                modifiers: None,
            },
        );

        let theme = Theme::from_config(true, &config);
        let style = theme.style(ThemeToken::Placeholder);
        assert_eq!(style.fg, Some(ratatui::style::Color::Rgb(1, 2, 3)));
        assert_eq!(
            style.add_modifier,
            ratatui::style::Modifier::BOLD,
            "preset bold should be preserved"
        );
    }
}
