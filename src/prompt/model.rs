use std::fmt;
use std::str::FromStr;

/// Per-agent configuration owned by the seller profile. The prompt engine
/// reads it on every render and never mutates it.
///
/// All fields are free text; `base_style` holds a style-catalog key and an
/// unknown key degrades to an empty style description instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentPromptConfig {
    pub agent_name: String,
    pub initial_greeting: String,
    pub base_style: String,
    pub tone: String,
    pub characteristic_phrases: String,

    pub store_name: String,
    pub store_description: String,
    pub business_hours: String,
    pub contact_info: String,
    pub physical_address: String,

    pub privacy_policy_url: String,
    pub terms_conditions_url: String,

    pub return_policy: String,
    pub return_timeframe: String,
    pub return_conditions: String,
    pub return_process: String,

    pub shipping_options: String,
    pub delivery_times: String,
    pub shipping_costs: String,
    pub coverage_areas: String,

    pub payment_methods: String,
    pub payment_security: String,

    pub faqs: Vec<FaqEntry>,
}

/// One frequently-asked question. Insertion order is preserved; the editing
/// collaborator caps the list at [`MAX_FAQS`], the prompt engine renders
/// whatever it is given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

/// Maximum FAQ entries the editor accepts per agent.
pub const MAX_FAQS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolCategory {
    Products,
    Cart,
    Orders,
    Support,
    Media,
    Policies,
}

impl ToolCategory {
    pub fn all() -> [ToolCategory; 6] {
        [
            Self::Products,
            Self::Cart,
            Self::Orders,
            Self::Support,
            Self::Media,
            Self::Policies,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Products => "products",
            Self::Cart => "cart",
            Self::Orders => "orders",
            Self::Support => "support",
            Self::Media => "media",
            Self::Policies => "policies",
        }
    }

    /// Label shown in the tools pane.
    pub fn label(self) -> &'static str {
        match self {
            Self::Products => "Productos",
            Self::Cart => "Carrito",
            Self::Orders => "Pedidos",
            Self::Support => "Soporte",
            Self::Media => "Multimedia",
            Self::Policies => "Políticas",
        }
    }
}

impl FromStr for ToolCategory {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "products" => Ok(Self::Products),
            "cart" => Ok(Self::Cart),
            "orders" => Ok(Self::Orders),
            "support" => Ok(Self::Support),
            "media" => Ok(Self::Media),
            "policies" => Ok(Self::Policies),
            _ => Err(format!("unknown category '{value}'")),
        }
    }
}

impl fmt::Display for ToolCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for ToolCategory {
    fn default() -> Self {
        Self::Support
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ToolKind {
    #[default]
    Native,
    Custom,
}

impl ToolKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Native => "native",
            Self::Custom => "custom",
        }
    }
}

impl FromStr for ToolKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "native" => Ok(Self::Native),
            "custom" => Ok(Self::Custom),
            _ => Err(format!("unknown tool kind '{value}'")),
        }
    }
}

/// One capability the downstream agent may invoke. The prompt engine only
/// consumes the `enabled = true` subsequence, preserving catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolDescriptor {
    pub id: String,
    pub name: String,
    pub description: String,
    pub kind: ToolKind,
    pub enabled: bool,
    pub category: ToolCategory,
    /// Present only for custom tools.
    pub webhook: Option<WebhookSpec>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    #[default]
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl FromStr for HttpMethod {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "DELETE" => Ok(Self::Delete),
            _ => Err(format!("unknown HTTP method '{value}'")),
        }
    }
}

/// How a custom tool would call its endpoint. Invocations are simulated;
/// the spec is configuration data only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WebhookSpec {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    /// JSON body template; may contain `{variable}` tokens.
    pub body: String,
    pub context_vars: Vec<String>,
}

/// Context variables a custom tool may request at invocation time.
pub const CONTEXT_VARS: &[&str] = &[
    "user_message",
    "user_id",
    "conversation_id",
    "timestamp",
    "seller_id",
    "agent_id",
    "session_data",
];
