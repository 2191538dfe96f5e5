//! Registry of the editable configuration fields, grouped the way the
//! editor pane presents them.

use crate::prompt::AgentPromptConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Section {
    Personalidad,
    Tienda,
    Politicas,
    Devoluciones,
    Envios,
    Pagos,
}

impl Section {
    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::Personalidad => "Personalidad",
            Self::Tienda => "Tienda",
            Self::Politicas => "Políticas",
            Self::Devoluciones => "Devoluciones",
            Self::Envios => "Envíos",
            Self::Pagos => "Pagos",
        }
    }
}

type GetFn = for<'a> fn(&'a AgentPromptConfig) -> &'a str;
type SetFn = fn(&mut AgentPromptConfig, String);

pub(crate) struct FieldSpec {
    /// Stable key used in trace lines and the `/set` command.
    pub(crate) key: &'static str,
    pub(crate) label: &'static str,
    pub(crate) section: Section,
    pub(crate) get: GetFn,
    pub(crate) set: SetFn,
}

pub(crate) const FIELDS: &[FieldSpec] = &[
    FieldSpec {
        key: "agent_name",
        label: "Nombre del agente",
        section: Section::Personalidad,
        get: |config| &config.agent_name,
        set: |config, value| config.agent_name = value,
    },
    FieldSpec {
        key: "initial_greeting",
        label: "Saludo inicial",
        section: Section::Personalidad,
        get: |config| &config.initial_greeting,
        set: |config, value| config.initial_greeting = value,
    },
    FieldSpec {
        key: "base_style",
        label: "Estilo base",
        section: Section::Personalidad,
        get: |config| &config.base_style,
        set: |config, value| config.base_style = value,
    },
    FieldSpec {
        key: "tone",
        label: "Tono",
        section: Section::Personalidad,
        get: |config| &config.tone,
        set: |config, value| config.tone = value,
    },
    FieldSpec {
        key: "characteristic_phrases",
        label: "Frases características",
        section: Section::Personalidad,
        get: |config| &config.characteristic_phrases,
        set: |config, value| config.characteristic_phrases = value,
    },
    FieldSpec {
        key: "store_name",
        label: "Nombre de la tienda",
        section: Section::Tienda,
        get: |config| &config.store_name,
        set: |config, value| config.store_name = value,
    },
    FieldSpec {
        key: "store_description",
        label: "Descripción",
        section: Section::Tienda,
        get: |config| &config.store_description,
        set: |config, value| config.store_description = value,
    },
    FieldSpec {
        key: "business_hours",
        label: "Horarios de atención",
        section: Section::Tienda,
        get: |config| &config.business_hours,
        set: |config, value| config.business_hours = value,
    },
    FieldSpec {
        key: "contact_info",
        label: "Contacto",
        section: Section::Tienda,
        get: |config| &config.contact_info,
        set: |config, value| config.contact_info = value,
    },
    FieldSpec {
        key: "physical_address",
        label: "Dirección física",
        section: Section::Tienda,
        get: |config| &config.physical_address,
        set: |config, value| config.physical_address = value,
    },
    FieldSpec {
        key: "privacy_policy_url",
        label: "Política de privacidad",
        section: Section::Politicas,
        get: |config| &config.privacy_policy_url,
        set: |config, value| config.privacy_policy_url = value,
    },
    FieldSpec {
        key: "terms_conditions_url",
        label: "Términos y condiciones",
        section: Section::Politicas,
        get: |config| &config.terms_conditions_url,
        set: |config, value| config.terms_conditions_url = value,
    },
    FieldSpec {
        key: "return_policy",
        label: "Política de devoluciones",
        section: Section::Devoluciones,
        get: |config| &config.return_policy,
        set: |config, value| config.return_policy = value,
    },
    FieldSpec {
        key: "return_timeframe",
        label: "Tiempo límite",
        section: Section::Devoluciones,
        get: |config| &config.return_timeframe,
        set: |config, value| config.return_timeframe = value,
    },
    FieldSpec {
        key: "return_conditions",
        label: "Condiciones",
        section: Section::Devoluciones,
        get: |config| &config.return_conditions,
        set: |config, value| config.return_conditions = value,
    },
    FieldSpec {
        key: "return_process",
        label: "Proceso",
        section: Section::Devoluciones,
        get: |config| &config.return_process,
        set: |config, value| config.return_process = value,
    },
    FieldSpec {
        key: "shipping_options",
        label: "Opciones de envío",
        section: Section::Envios,
        get: |config| &config.shipping_options,
        set: |config, value| config.shipping_options = value,
    },
    FieldSpec {
        key: "delivery_times",
        label: "Tiempos de entrega",
        section: Section::Envios,
        get: |config| &config.delivery_times,
        set: |config, value| config.delivery_times = value,
    },
    FieldSpec {
        key: "shipping_costs",
        label: "Costos de envío",
        section: Section::Envios,
        get: |config| &config.shipping_costs,
        set: |config, value| config.shipping_costs = value,
    },
    FieldSpec {
        key: "coverage_areas",
        label: "Cobertura",
        section: Section::Envios,
        get: |config| &config.coverage_areas,
        set: |config, value| config.coverage_areas = value,
    },
    FieldSpec {
        key: "payment_methods",
        label: "Métodos de pago",
        section: Section::Pagos,
        get: |config| &config.payment_methods,
        set: |config, value| config.payment_methods = value,
    },
    FieldSpec {
        key: "payment_security",
        label: "Seguridad de pagos",
        section: Section::Pagos,
        get: |config| &config.payment_security,
        set: |config, value| config.payment_security = value,
    },
];

pub(crate) fn field_by_key(key: &str) -> Option<&'static FieldSpec> {
    FIELDS.iter().find(|field| field.key == key)
}
