/// Static catalog of base conversation styles. Keys are stored in
/// [`AgentPromptConfig::base_style`](super::model::AgentPromptConfig);
/// the value is the behavioral paragraph substituted into the prompt.
pub const BASE_STYLES: &[(&str, &str)] = &[
    (
        "formal_and_professional",
        "Debes mantener un lenguaje profesional, respetuoso y claro. Evita el uso de coloquialismos. Sé preciso en tus respuestas y transmite autoridad y confianza.",
    ),
    (
        "friendly_and_servicial",
        "Tu tono debe ser cercano, cálido y positivo. Habla de forma amistosa, como si conocieras al cliente. Prioriza ayudar de manera proactiva, con una actitud de servicio genuina.",
    ),
    (
        "humorous_and_relaxed",
        "Habla de forma relajada, con un toque de humor sutil y desenfadado. Puedes usar expresiones que generen cercanía y una sonrisa. Mantén el respeto, pero hazlo divertido.",
    ),
    (
        "expert_consultant",
        "Adopta un tono experto y asesor. Transmite confianza, conocimiento profundo y precisión. Tu rol es guiar al cliente con recomendaciones claras y útiles, sin sonar condescendiente.",
    ),
    (
        "energetic_and_enthusiastic",
        "Tu estilo debe ser muy animado y positivo. Usa exclamaciones y un lenguaje dinámico. Transmite entusiasmo real por ayudar y por los productos de la tienda.",
    ),
];

/// Behavioral description for a style key. Unknown keys resolve to the empty
/// string so a half-configured agent still renders a prompt.
pub fn description_for(key: &str) -> &'static str {
    BASE_STYLES
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, description)| *description)
        .unwrap_or("")
}

/// Style keys in catalog order, for the editor's selection list.
pub fn keys() -> impl Iterator<Item = &'static str> {
    BASE_STYLES.iter().map(|(name, _)| *name)
}

#[cfg(test)]
mod tests {
    use super::{BASE_STYLES, description_for, keys};

    #[test]
    fn catalog_has_five_styles() {
        assert_eq!(BASE_STYLES.len(), 5);
        let names: Vec<_> = keys().collect();
        assert_eq!(
            names,
            vec![
                "formal_and_professional",
                "friendly_and_servicial",
                "humorous_and_relaxed",
                "expert_consultant",
                "energetic_and_enthusiastic",
            ]
        );
    }

    #[test]
    fn known_key_resolves_to_description() {
        let description = description_for("expert_consultant");
        assert!(description.starts_with("Adopta un tono experto"));
    }

    #[test]
    fn unknown_key_resolves_to_empty_string() {
        assert_eq!(description_for("sarcastic"), "");
        assert_eq!(description_for(""), "");
    }
}
