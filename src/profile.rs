//! Seller profile persistence: the agent configuration and tool catalog,
//! stored as a TOML document.
//!
//! This collaborator owns the data the prompt engine renders, including the
//! sample seller used when no profile exists yet. The engine itself never
//! embeds defaults.

use anyhow::{Result, anyhow, bail};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::prompt::{
    AgentPromptConfig, FaqEntry, HttpMethod, ToolCategory, ToolDescriptor, ToolKind, WebhookSpec,
};

const PROFILE_DIR_NAME: &str = "promptdesk";
const PROFILE_FILE_NAME: &str = "profile.toml";

/// Environment override for the profile file location.
pub const PROFILE_ENV_VAR: &str = "PROMPTDESK_PROFILE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SellerInfo {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SellerProfile {
    pub seller: SellerInfo,
    pub agent: AgentPromptConfig,
    pub tools: Vec<ToolDescriptor>,
    /// Last saved user-authored prompt text, if any.
    pub custom_prompt: String,
}

impl SellerProfile {
    /// The sample seller shipped with a fresh installation.
    pub fn sample() -> Self {
        Self {
            seller: SellerInfo {
                name: "TechStore Pro".to_string(),
            },
            agent: sample_agent(),
            tools: sample_tools(),
            custom_prompt: String::new(),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|err| {
            anyhow!(
                "Failed to load profile {}: unable to read file: {err}",
                path.display()
            )
        })?;

        let raw: RawProfile = toml::from_str(&text)
            .map_err(|err| anyhow!("Failed to load profile {}: {err}", path.display()))?;

        validate_profile(raw, path)
    }

    /// Loads the profile if the file exists, otherwise returns the sample
    /// seller without touching the filesystem.
    pub fn load_or_sample(path: &Path) -> Result<Self> {
        if path.is_file() {
            Self::load(path)
        } else {
            Ok(Self::sample())
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|err| {
                anyhow!(
                    "Failed to save profile {}: unable to create directory: {err}",
                    path.display()
                )
            })?;
        }

        let raw = RawProfile::from_profile(self);
        let text = toml::to_string_pretty(&raw)
            .map_err(|err| anyhow!("Failed to save profile {}: {err}", path.display()))?;
        fs::write(path, text).map_err(|err| {
            anyhow!(
                "Failed to save profile {}: unable to write file: {err}",
                path.display()
            )
        })
    }
}

/// Profile location precedence: explicit flag, then `PROMPTDESK_PROFILE`,
/// then the app config entry, then the XDG data directory.
pub fn resolve_profile_path(
    explicit: Option<&Path>,
    from_config: Option<&Path>,
) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    if let Ok(value) = env::var(PROFILE_ENV_VAR) {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            bail!("Failed to resolve profile path: {PROFILE_ENV_VAR} is set but empty");
        }
        return Ok(PathBuf::from(trimmed));
    }

    if let Some(path) = from_config {
        return Ok(path.to_path_buf());
    }

    default_profile_path()
}

fn default_profile_path() -> Result<PathBuf> {
    if let Ok(xdg) = env::var("XDG_DATA_HOME") {
        let trimmed = xdg.trim();
        if trimmed.is_empty() {
            bail!("Failed to resolve profile path: XDG_DATA_HOME is set but empty");
        }
        return Ok(PathBuf::from(trimmed)
            .join(PROFILE_DIR_NAME)
            .join(PROFILE_FILE_NAME));
    }

    let home = dirs::home_dir()
        .ok_or_else(|| anyhow!("Failed to resolve profile path: HOME directory is unavailable"))?;
    Ok(home
        .join(".local/share")
        .join(PROFILE_DIR_NAME)
        .join(PROFILE_FILE_NAME))
}

fn sample_agent() -> AgentPromptConfig {
    AgentPromptConfig {
        agent_name: "Sofia".to_string(),
        initial_greeting: "¡Hola! Soy Sofia, tu asistente virtual. ¿En qué puedo ayudarte hoy?"
            .to_string(),
        base_style: "friendly_and_servicial".to_string(),
        tone: "conversacional".to_string(),
        characteristic_phrases: "¡Excelente elección!, Será un placer ayudarte, ¡Perfecto!"
            .to_string(),
        store_name: "TechStore Pro".to_string(),
        store_description:
            "Tu tienda de tecnología de confianza con los mejores productos y precios del mercado"
                .to_string(),
        business_hours: "Lunes a Viernes: 9:00 - 18:00, Sábados: 10:00 - 16:00".to_string(),
        contact_info: "WhatsApp: +1234567890, Email: contacto@techstore.com".to_string(),
        physical_address: "Av. Providencia 1234, Santiago, Chile".to_string(),
        privacy_policy_url: "https://techstore.com/privacidad".to_string(),
        terms_conditions_url: "https://techstore.com/terminos".to_string(),
        return_policy: "Aceptamos devoluciones en perfectas condiciones dentro del plazo establecido"
            .to_string(),
        return_timeframe: "30 días".to_string(),
        return_conditions: "Producto sin usar, con etiquetas originales, en embalaje original"
            .to_string(),
        return_process:
            "1. Contacta por WhatsApp, 2. Empaca el producto en su embalaje original, 3. Programa la recogida"
                .to_string(),
        shipping_options: "Envío estándar, Express, Recogida en tienda".to_string(),
        delivery_times: "Estándar: 3-5 días hábiles, Express: 1-2 días hábiles".to_string(),
        shipping_costs: "Envío gratis en compras sobre $50.000. Estándar: $8.000, Express: $15.000"
            .to_string(),
        coverage_areas: "Región Metropolitana, Valparaíso, Concepción".to_string(),
        payment_methods:
            "Tarjeta de crédito/débito, PSE, Efectivo contra entrega, Transferencia bancaria"
                .to_string(),
        payment_security: "Todos los pagos están protegidos con encriptación SSL de 256 bits"
            .to_string(),
        faqs: vec![
            FaqEntry {
                question: "¿Tienen garantía los productos?".to_string(),
                answer: "Sí, todos nuestros productos incluyen garantía del fabricante de 12 meses"
                    .to_string(),
            },
            FaqEntry {
                question: "¿Puedo cambiar mi pedido después de comprarlo?".to_string(),
                answer:
                    "Puedes modificar tu pedido hasta 2 horas después de la compra contactándonos por WhatsApp"
                        .to_string(),
            },
        ],
    }
}

fn sample_tools() -> Vec<ToolDescriptor> {
    fn native(id: &str, name: &str, description: &str, enabled: bool, category: ToolCategory) -> ToolDescriptor {
        ToolDescriptor {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            kind: ToolKind::Native,
            enabled,
            category,
            webhook: None,
        }
    }

    vec![
        native(
            "buscar-productos",
            "Buscar Productos",
            "Busca productos del catálogo por nombre, variante o precio",
            true,
            ToolCategory::Products,
        ),
        native(
            "crear-carrito",
            "Crear Carrito",
            "Permite crear carritos de compra para los clientes",
            true,
            ToolCategory::Cart,
        ),
        native(
            "consultar-orden",
            "Consultar Orden",
            "Busca información sobre órdenes existentes",
            true,
            ToolCategory::Orders,
        ),
        native(
            "agendar-cita",
            "Agendar Cita",
            "Programa citas con el equipo comercial",
            false,
            ToolCategory::Support,
        ),
        native(
            "enviar-imagenes",
            "Enviar Imágenes",
            "Envía imágenes de productos cuando sean relevantes",
            true,
            ToolCategory::Media,
        ),
        native(
            "consultar-devoluciones",
            "Consultar Devoluciones",
            "Explica la política de cambios y devoluciones vigente",
            false,
            ToolCategory::Policies,
        ),
        ToolDescriptor {
            id: "webhook-inventario".to_string(),
            name: "Webhook Inventario".to_string(),
            description: "Consulta inventario en un sistema externo".to_string(),
            kind: ToolKind::Custom,
            enabled: true,
            category: ToolCategory::Products,
            webhook: Some(WebhookSpec {
                method: HttpMethod::Post,
                url: "https://api.ejemplo.com/inventario".to_string(),
                headers: vec![("Content-Type".to_string(), "application/json".to_string())],
                body: "{\n  \"user_id\": \"{user_id}\",\n  \"message\": \"{user_message}\"\n}"
                    .to_string(),
                context_vars: vec!["user_id".to_string(), "user_message".to_string()],
            }),
        },
    ]
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawProfile {
    // Plain values must precede tables for TOML serialization.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    custom_prompt: String,
    seller: RawSeller,
    agent: RawAgent,
    #[serde(default)]
    tools: Vec<RawTool>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSeller {
    name: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
struct RawAgent {
    name: String,
    initial_greeting: String,
    base_style: String,
    tone: String,
    characteristic_phrases: String,
    store_name: String,
    store_description: String,
    business_hours: String,
    contact_info: String,
    physical_address: String,
    privacy_policy_url: String,
    terms_conditions_url: String,
    return_policy: String,
    return_timeframe: String,
    return_conditions: String,
    return_process: String,
    shipping_options: String,
    delivery_times: String,
    shipping_costs: String,
    coverage_areas: String,
    payment_methods: String,
    payment_security: String,
    faqs: Vec<RawFaq>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawFaq {
    question: String,
    answer: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTool {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default = "default_tool_kind")]
    kind: String,
    enabled: bool,
    category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    webhook: Option<RawWebhook>,
}

fn default_tool_kind() -> String {
    "native".to_string()
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawWebhook {
    #[serde(default = "default_method")]
    method: String,
    url: String,
    #[serde(default)]
    body: String,
    #[serde(default)]
    context_vars: Vec<String>,
    // Array-of-tables field stays last so TOML serialization never places
    // a value after a table.
    #[serde(default)]
    headers: Vec<RawHeader>,
}

fn default_method() -> String {
    "POST".to_string()
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawHeader {
    key: String,
    value: String,
}

impl RawProfile {
    fn from_profile(profile: &SellerProfile) -> Self {
        Self {
            seller: RawSeller {
                name: profile.seller.name.clone(),
            },
            agent: RawAgent {
                name: profile.agent.agent_name.clone(),
                initial_greeting: profile.agent.initial_greeting.clone(),
                base_style: profile.agent.base_style.clone(),
                tone: profile.agent.tone.clone(),
                characteristic_phrases: profile.agent.characteristic_phrases.clone(),
                store_name: profile.agent.store_name.clone(),
                store_description: profile.agent.store_description.clone(),
                business_hours: profile.agent.business_hours.clone(),
                contact_info: profile.agent.contact_info.clone(),
                physical_address: profile.agent.physical_address.clone(),
                privacy_policy_url: profile.agent.privacy_policy_url.clone(),
                terms_conditions_url: profile.agent.terms_conditions_url.clone(),
                return_policy: profile.agent.return_policy.clone(),
                return_timeframe: profile.agent.return_timeframe.clone(),
                return_conditions: profile.agent.return_conditions.clone(),
                return_process: profile.agent.return_process.clone(),
                shipping_options: profile.agent.shipping_options.clone(),
                delivery_times: profile.agent.delivery_times.clone(),
                shipping_costs: profile.agent.shipping_costs.clone(),
                coverage_areas: profile.agent.coverage_areas.clone(),
                payment_methods: profile.agent.payment_methods.clone(),
                payment_security: profile.agent.payment_security.clone(),
                faqs: profile
                    .agent
                    .faqs
                    .iter()
                    .map(|faq| RawFaq {
                        question: faq.question.clone(),
                        answer: faq.answer.clone(),
                    })
                    .collect(),
            },
            tools: profile.tools.iter().map(RawTool::from_tool).collect(),
            custom_prompt: profile.custom_prompt.clone(),
        }
    }
}

impl RawTool {
    fn from_tool(tool: &ToolDescriptor) -> Self {
        Self {
            id: tool.id.clone(),
            name: tool.name.clone(),
            description: tool.description.clone(),
            kind: tool.kind.as_str().to_string(),
            enabled: tool.enabled,
            category: tool.category.as_str().to_string(),
            webhook: tool.webhook.as_ref().map(|webhook| RawWebhook {
                method: webhook.method.as_str().to_string(),
                url: webhook.url.clone(),
                headers: webhook
                    .headers
                    .iter()
                    .map(|(key, value)| RawHeader {
                        key: key.clone(),
                        value: value.clone(),
                    })
                    .collect(),
                body: webhook.body.clone(),
                context_vars: webhook.context_vars.clone(),
            }),
        }
    }
}

fn validate_profile(raw: RawProfile, path: &Path) -> Result<SellerProfile> {
    let mut seen_ids = HashSet::new();
    let mut tools = Vec::with_capacity(raw.tools.len());

    for (index, tool) in raw.tools.into_iter().enumerate() {
        if !seen_ids.insert(tool.id.clone()) {
            bail!(
                "Failed to load profile {}: tools[{index}]: duplicate id '{}'",
                path.display(),
                tool.id
            );
        }
        tools.push(validate_tool(tool, index, path)?);
    }

    Ok(SellerProfile {
        seller: SellerInfo {
            name: raw.seller.name,
        },
        agent: AgentPromptConfig {
            agent_name: raw.agent.name,
            initial_greeting: raw.agent.initial_greeting,
            base_style: raw.agent.base_style,
            tone: raw.agent.tone,
            characteristic_phrases: raw.agent.characteristic_phrases,
            store_name: raw.agent.store_name,
            store_description: raw.agent.store_description,
            business_hours: raw.agent.business_hours,
            contact_info: raw.agent.contact_info,
            physical_address: raw.agent.physical_address,
            privacy_policy_url: raw.agent.privacy_policy_url,
            terms_conditions_url: raw.agent.terms_conditions_url,
            return_policy: raw.agent.return_policy,
            return_timeframe: raw.agent.return_timeframe,
            return_conditions: raw.agent.return_conditions,
            return_process: raw.agent.return_process,
            shipping_options: raw.agent.shipping_options,
            delivery_times: raw.agent.delivery_times,
            shipping_costs: raw.agent.shipping_costs,
            coverage_areas: raw.agent.coverage_areas,
            payment_methods: raw.agent.payment_methods,
            payment_security: raw.agent.payment_security,
            faqs: raw
                .agent
                .faqs
                .into_iter()
                .map(|faq| FaqEntry {
                    question: faq.question,
                    answer: faq.answer,
                })
                .collect(),
        },
        tools,
        custom_prompt: raw.custom_prompt,
    })
}

fn validate_tool(raw: RawTool, index: usize, path: &Path) -> Result<ToolDescriptor> {
    let category = ToolCategory::from_str(&raw.category).map_err(|reason| {
        anyhow!(
            "Failed to load profile {}: tools[{index}].category: {reason}",
            path.display()
        )
    })?;
    let kind = ToolKind::from_str(&raw.kind).map_err(|reason| {
        anyhow!(
            "Failed to load profile {}: tools[{index}].kind: {reason}",
            path.display()
        )
    })?;

    let webhook = match raw.webhook {
        None => None,
        Some(webhook) => {
            let method = HttpMethod::from_str(&webhook.method).map_err(|reason| {
                anyhow!(
                    "Failed to load profile {}: tools[{index}].webhook.method: {reason}",
                    path.display()
                )
            })?;
            Some(WebhookSpec {
                method,
                url: webhook.url,
                headers: webhook
                    .headers
                    .into_iter()
                    .map(|header| (header.key, header.value))
                    .collect(),
                body: webhook.body,
                context_vars: webhook.context_vars,
            })
        }
    };

    Ok(ToolDescriptor {
        id: raw.id,
        name: raw.name,
        description: raw.description,
        kind,
        enabled: raw.enabled,
        category,
        webhook,
    })
}

#[cfg(test)]
mod tests {
    use super::{PROFILE_ENV_VAR, SellerProfile, resolve_profile_path};
    use crate::prompt::{ToolCategory, ToolKind};
    use serial_test::serial;
    use std::env;
    use std::fs;
    use std::path::Path;

    #[test]
    fn sample_profile_is_fully_populated() {
        let profile = SellerProfile::sample();
        assert_eq!(profile.agent.agent_name, "Sofia");
        assert_eq!(profile.seller.name, "TechStore Pro");
        assert_eq!(profile.agent.faqs.len(), 2);
        assert!(profile.tools.len() >= 6);
        assert!(
            profile
                .tools
                .iter()
                .any(|tool| tool.kind == ToolKind::Custom && tool.webhook.is_some())
        );
    }

    #[test]
    fn save_then_load_round_trips() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("profile.toml");

        let mut profile = SellerProfile::sample();
        profile.custom_prompt = "Eres un asistente de {tienda}.".to_string();
        profile.save(&path).expect("save profile");

        let loaded = SellerProfile::load(&path).expect("load profile");
        assert_eq!(loaded, profile);
    }

    #[test]
    fn load_or_sample_falls_back_when_missing() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let profile = SellerProfile::load_or_sample(&tmp.path().join("missing.toml"))
            .expect("fallback profile");
        assert_eq!(profile, SellerProfile::sample());
    }

    #[test]
    fn load_rejects_unknown_category() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("profile.toml");
        fs::write(
            &path,
            r#"
[seller]
name = "TechStore Pro"

[agent]
name = "Sofia"

[[tools]]
id = "t1"
name = "Misteriosa"
enabled = true
category = "billing"
"#,
        )
        .expect("write profile");

        let err = SellerProfile::load(&path).expect_err("unknown category should fail");
        assert!(
            err.to_string()
                .contains("tools[0].category: unknown category 'billing'")
        );
    }

    #[test]
    fn load_rejects_duplicate_tool_ids() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("profile.toml");
        fs::write(
            &path,
            r#"
[seller]
name = "TechStore Pro"

[agent]
name = "Sofia"

[[tools]]
id = "t1"
name = "Primera"
enabled = true
category = "cart"

[[tools]]
id = "t1"
name = "Segunda"
enabled = false
category = "orders"
"#,
        )
        .expect("write profile");

        let err = SellerProfile::load(&path).expect_err("duplicate id should fail");
        assert!(err.to_string().contains("duplicate id 't1'"));
    }

    #[test]
    fn load_rejects_unknown_root_keys() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("profile.toml");
        fs::write(
            &path,
            "[seller]\nname = \"TechStore Pro\"\n\n[agent]\nname = \"Sofia\"\n\nmystery = 1\n",
        )
        .expect("write profile");

        let err = SellerProfile::load(&path).expect_err("unknown key should fail");
        assert!(err.to_string().contains("Failed to load profile"));
    }

    #[test]
    fn partial_agent_section_defaults_missing_fields_to_empty() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("profile.toml");
        fs::write(
            &path,
            "[seller]\nname = \"Fashion Boutique\"\n\n[agent]\nname = \"Valentina\"\n",
        )
        .expect("write profile");

        let profile = SellerProfile::load(&path).expect("load partial profile");
        assert_eq!(profile.agent.agent_name, "Valentina");
        assert_eq!(profile.agent.store_name, "");
        assert!(profile.agent.faqs.is_empty());
        assert!(profile.tools.is_empty());
    }

    #[test]
    fn loaded_categories_map_to_strong_types() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("profile.toml");
        SellerProfile::sample().save(&path).expect("save sample");

        let profile = SellerProfile::load(&path).expect("load sample");
        let cart_tool = profile
            .tools
            .iter()
            .find(|tool| tool.id == "crear-carrito")
            .expect("cart tool present");
        assert_eq!(cart_tool.category, ToolCategory::Cart);
    }

    #[test]
    #[serial]
    fn resolve_profile_path_prefers_explicit_flag() {
        unsafe {
            env::set_var(PROFILE_ENV_VAR, "/tmp/env-profile.toml");
        }
        let path = resolve_profile_path(Some(Path::new("/tmp/flag.toml")), None)
            .expect("resolve path");
        assert_eq!(path, Path::new("/tmp/flag.toml"));
        unsafe {
            env::remove_var(PROFILE_ENV_VAR);
        }
    }

    #[test]
    #[serial]
    fn resolve_profile_path_uses_env_before_config() {
        unsafe {
            env::set_var(PROFILE_ENV_VAR, "/tmp/env-profile.toml");
        }
        let path = resolve_profile_path(None, Some(Path::new("/tmp/config.toml")))
            .expect("resolve path");
        assert_eq!(path, Path::new("/tmp/env-profile.toml"));
        unsafe {
            env::remove_var(PROFILE_ENV_VAR);
        }
    }

    #[test]
    #[serial]
    fn resolve_profile_path_rejects_empty_env_value() {
        unsafe {
            env::set_var(PROFILE_ENV_VAR, "   ");
        }
        let err = resolve_profile_path(None, None).expect_err("empty env should fail");
        assert!(
            err.to_string()
                .contains("PROMPTDESK_PROFILE is set but empty")
        );
        unsafe {
            env::remove_var(PROFILE_ENV_VAR);
        }
    }

    #[test]
    #[serial]
    fn resolve_profile_path_falls_back_to_xdg_data_home() {
        unsafe {
            env::remove_var(PROFILE_ENV_VAR);
            env::set_var("XDG_DATA_HOME", "/tmp/data");
        }
        let path = resolve_profile_path(None, None).expect("resolve path");
        assert_eq!(path, Path::new("/tmp/data/promptdesk/profile.toml"));
        unsafe {
            env::remove_var("XDG_DATA_HOME");
        }
    }
}
