//! The prompt engine: deterministic composition of the seller agent's
//! system prompt plus the marked-up renderings used for review.

pub mod compose;
pub mod highlight;
pub mod model;
pub mod session;
pub mod styles;
pub mod template;

pub use compose::{NO_TOOLS_LINE, compile, long_date_es};
pub use highlight::{Markup, Segment, SegmentKind};
pub use model::{
    AgentPromptConfig, FaqEntry, HttpMethod, MAX_FAQS, ToolCategory, ToolDescriptor, ToolKind,
    WebhookSpec,
};
pub use session::{PromptMode, PromptSession};
