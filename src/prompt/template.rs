//! The fixed prompt skeleton and its substitution table.
//!
//! The skeleton is the compatibility contract with the downstream agent:
//! section order, headers, and the single-asterisk bold convention (WhatsApp
//! formatting) must not change. Both the compiler and the highlighters walk
//! the same table so the two renderings can never drift apart.

use super::model::AgentPromptConfig;
use super::styles;

/// Marks where the rendered tool list is inserted. Deliberately not
/// brace-delimited so custom-prompt placeholder highlighting cannot mistake
/// it for a variable.
pub const TOOLS_TOKEN: &str = "${toolsList}";

/// Marks where the render date is baked in. Resolved before any renderer
/// sees the text, so neither highlight mode ever encounters it.
pub(crate) const TODAY_TOKEN: &str = "${today}";

pub(crate) const SKELETON: &str = "Eres {agentName}, un agente de inteligencia artificial especializado en e-commerce. Tu propósito es asistir a los clientes de {storeName}.

Tu saludo inicial debe ser: {initialGreeting}

Tu tono de conversación debe ser: {tone}

Tu estilo de conversación debe ser: {baseStyleDescription}

Cuando lo veas necesario, puedes usar las siguientes frases que entregó el cliente en tus respuestas: {characteristicPhrases}

Hoy es ${today}

Debes responder siempre en español, en tono formal pero amigable, con emojis oportunos 😊. Nunca inventes información. Tus respuestas deben ser cortas, claras, directas y basadas únicamente en información disponible, considerando que te comunicarás con los clientes por WhatsApp e Instagram.

INFORMACIÓN GENERAL DE LA TIENDA:

*{storeName}*
{storeDescription}

*Horarios de atención:* {businessHours}
*Contacto:* {contactInfo}
*Dirección física:* {physicalAddress}

*Políticas:*
- Política de Privacidad: {privacyPolicyUrl}
- Términos y Condiciones: {termsConditionsUrl}

*CAMBIOS Y DEVOLUCIONES:*
- Política: {returnPolicy}
- Tiempo límite: {returnTimeframe}
- Condiciones: {returnConditions}
- Proceso: {returnProcess}

*ENVÍOS Y ENTREGAS:*
- Opciones: {shippingOptions}
- Tiempos: {deliveryTimes}
- Costos: {shippingCosts}
- Cobertura: {coverageAreas}

*OPCIONES DE PAGO:*
- Métodos disponibles: {paymentMethods}
- Seguridad: {paymentSecurity}

*PREGUNTAS FRECUENTES:*
{faqs}

*HERRAMIENTAS DISPONIBLES:*

${toolsList}

FUNCIONES PRINCIPALES DEL AGENTE:

- Responder dudas sobre productos (características, variantes, precios, disponibilidad)
- Asistir en proceso de compra (sugerir productos, comparar, crear carritos de compras, confirmar link checkout)
- Brindar información de tienda física (horarios, dirección)
- Explicar políticas de cambios y devoluciones (plazos, condiciones, costos, garantías)
- Informar estado de pedidos (solicitar número de orden, comunicar estado claro con link del courier)
- Crear tickets de soporte (identificar limitaciones funcionales, crear ticket, enviar ID del ticket)
- Consultar estado de tickets de soporte (solicitar número de ticket, validar y comunicar estado en negrita)

FLUJOS CLAVE DE INTERACCIÓN:

- *Creación carrito:* Detecta intención → Confirma productos → Crea carrito → Link checkout
- *Post-venta:* Identifica consulta → Solicita número orden e información sobre el problema → Crea el ticket pertinente
- *Consulta estado pedido:* Detecta consulta → Solicita número orden → Consulta estado → Comunica claro
- *Creación ticket soporte:* Detecta limitación → Explica al cliente → Solicita orden → Genera ticket → ID amigable
- *Consulta ticket:* Detecta intención → Solicita ticket → Valida estado → Comunica estado en negrita
- *Envío de imágenes:* Envía automáticamente imágenes de productos cuando sea relevante

DIRECTRICES ADICIONALES:

- Mantén conversación fluida y natural
- Responde siempre en lenguaje natural y en castellano. NUNCA en JSON o en algún otro formato de programación
- Mantén un formato de respuestas corto que se adapte a WhatsApp e Instagram. Para usar negrita (bold), usa solo un asterisco (*). No debes usar dobles asteriscos (**)
- Nunca reveles detalles técnicos internos
- Si no tienes respuesta, admítelo amablemente y ofrece alternativas
- Prioriza siempre satisfacción y venta
- Solo responde temas relacionados a {storeName} y catálogo de productos
- Nunca realices tareas ajenas a atención directa al cliente
- Al enviar links o enlaces, no incluyas captions con corchetes []. Solo envía el link, tal cual lo recibes, sin caracteres adicionales

Recuerda: Tu objetivo es brindar el mejor servicio al cliente y representar profesionalmente a {storeName}.";

type FieldFn = for<'a> fn(&'a AgentPromptConfig) -> &'a str;

/// What a brace token resolves to.
pub(crate) enum Slot {
    /// A configuration field, substituted verbatim.
    Field(FieldFn),
    /// Style-catalog lookup of `base_style`; unknown key resolves empty.
    StyleDescription,
    /// The rendered FAQ block; empty list resolves empty.
    Faqs,
}

pub(crate) struct Substitution {
    pub(crate) token: &'static str,
    pub(crate) slot: Slot,
}

/// The single substitution table, in first-occurrence order of the skeleton.
pub(crate) const SUBSTITUTIONS: &[Substitution] = &[
    Substitution {
        token: "{agentName}",
        slot: Slot::Field(|config| &config.agent_name),
    },
    Substitution {
        token: "{storeName}",
        slot: Slot::Field(|config| &config.store_name),
    },
    Substitution {
        token: "{initialGreeting}",
        slot: Slot::Field(|config| &config.initial_greeting),
    },
    Substitution {
        token: "{tone}",
        slot: Slot::Field(|config| &config.tone),
    },
    Substitution {
        token: "{baseStyleDescription}",
        slot: Slot::StyleDescription,
    },
    Substitution {
        token: "{characteristicPhrases}",
        slot: Slot::Field(|config| &config.characteristic_phrases),
    },
    Substitution {
        token: "{storeDescription}",
        slot: Slot::Field(|config| &config.store_description),
    },
    Substitution {
        token: "{businessHours}",
        slot: Slot::Field(|config| &config.business_hours),
    },
    Substitution {
        token: "{contactInfo}",
        slot: Slot::Field(|config| &config.contact_info),
    },
    Substitution {
        token: "{physicalAddress}",
        slot: Slot::Field(|config| &config.physical_address),
    },
    Substitution {
        token: "{privacyPolicyUrl}",
        slot: Slot::Field(|config| &config.privacy_policy_url),
    },
    Substitution {
        token: "{termsConditionsUrl}",
        slot: Slot::Field(|config| &config.terms_conditions_url),
    },
    Substitution {
        token: "{returnPolicy}",
        slot: Slot::Field(|config| &config.return_policy),
    },
    Substitution {
        token: "{returnTimeframe}",
        slot: Slot::Field(|config| &config.return_timeframe),
    },
    Substitution {
        token: "{returnConditions}",
        slot: Slot::Field(|config| &config.return_conditions),
    },
    Substitution {
        token: "{returnProcess}",
        slot: Slot::Field(|config| &config.return_process),
    },
    Substitution {
        token: "{shippingOptions}",
        slot: Slot::Field(|config| &config.shipping_options),
    },
    Substitution {
        token: "{deliveryTimes}",
        slot: Slot::Field(|config| &config.delivery_times),
    },
    Substitution {
        token: "{shippingCosts}",
        slot: Slot::Field(|config| &config.shipping_costs),
    },
    Substitution {
        token: "{coverageAreas}",
        slot: Slot::Field(|config| &config.coverage_areas),
    },
    Substitution {
        token: "{paymentMethods}",
        slot: Slot::Field(|config| &config.payment_methods),
    },
    Substitution {
        token: "{paymentSecurity}",
        slot: Slot::Field(|config| &config.payment_security),
    },
    Substitution {
        token: "{faqs}",
        slot: Slot::Faqs,
    },
];

impl Substitution {
    pub(crate) fn resolve(&self, config: &AgentPromptConfig, faq_block: &str) -> String {
        match &self.slot {
            Slot::Field(get) => get(config).to_string(),
            Slot::StyleDescription => styles::description_for(&config.base_style).to_string(),
            Slot::Faqs => faq_block.to_string(),
        }
    }
}

/// The editable template text with the render date baked in. This is what
/// the placeholder-highlight view of the generated prompt shows.
pub fn template_text(today: &str) -> String {
    SKELETON.replace(TODAY_TOKEN, today)
}
