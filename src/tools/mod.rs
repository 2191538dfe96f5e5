//! Tool catalog operations for the management pane: toggling, grouping,
//! and custom-tool creation. The prompt engine itself only reads the
//! catalog.

pub mod tester;

use anyhow::{Result, bail};

use crate::prompt::{HttpMethod, ToolCategory, ToolDescriptor, ToolKind, WebhookSpec};

/// Enabled subsequence of the catalog, preserving catalog order.
pub fn enabled(tools: &[ToolDescriptor]) -> Vec<&ToolDescriptor> {
    tools.iter().filter(|tool| tool.enabled).collect()
}

/// `(enabled, total)` counts for the stats footer.
pub fn counts(tools: &[ToolDescriptor]) -> (usize, usize) {
    (enabled(tools).len(), tools.len())
}

/// Flips a tool's enabled flag. Returns the new state, or `None` when the
/// id is unknown.
pub fn toggle(tools: &mut [ToolDescriptor], id: &str) -> Option<bool> {
    let tool = tools.iter_mut().find(|tool| tool.id == id)?;
    tool.enabled = !tool.enabled;
    Some(tool.enabled)
}

/// Looks a tool up by id, or by exact name when no id matches.
pub fn find<'a>(tools: &'a [ToolDescriptor], key: &str) -> Option<&'a ToolDescriptor> {
    tools
        .iter()
        .find(|tool| tool.id == key)
        .or_else(|| tools.iter().find(|tool| tool.name == key))
}

/// Catalog grouped by category, in category declaration order. Categories
/// with no tools are omitted.
pub fn grouped(tools: &[ToolDescriptor]) -> Vec<(ToolCategory, Vec<&ToolDescriptor>)> {
    ToolCategory::all()
        .into_iter()
        .filter_map(|category| {
            let members: Vec<&ToolDescriptor> = tools
                .iter()
                .filter(|tool| tool.category == category)
                .collect();
            if members.is_empty() {
                None
            } else {
                Some((category, members))
            }
        })
        .collect()
}

/// Input for creating a custom tool. Name and URL are the only required
/// fields, mirroring the creation form.
#[derive(Debug, Clone, Default)]
pub struct CustomToolDraft {
    pub name: String,
    pub description: String,
    pub url: String,
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub body: String,
    pub context_vars: Vec<String>,
}

/// Appends a custom tool to the catalog, enabled, with a unique slug id.
/// Returns the new tool's id.
pub fn add_custom(tools: &mut Vec<ToolDescriptor>, draft: CustomToolDraft) -> Result<String> {
    if draft.name.trim().is_empty() || draft.url.trim().is_empty() {
        bail!("la tool necesita nombre y URL");
    }

    let id = unique_id(tools, &slug(&draft.name));
    tools.push(ToolDescriptor {
        id: id.clone(),
        name: draft.name.trim().to_string(),
        description: draft.description,
        kind: ToolKind::Custom,
        enabled: true,
        category: ToolCategory::Support,
        webhook: Some(WebhookSpec {
            method: draft.method,
            url: draft.url.trim().to_string(),
            headers: draft.headers,
            body: draft.body,
            context_vars: draft.context_vars,
        }),
    });
    Ok(id)
}

/// Removes a custom tool. Native tools can only be disabled, not removed.
pub fn remove_custom(tools: &mut Vec<ToolDescriptor>, id: &str) -> Result<()> {
    let Some(index) = tools.iter().position(|tool| tool.id == id) else {
        bail!("no existe la tool '{id}'");
    };
    if tools[index].kind != ToolKind::Custom {
        bail!("'{id}' es una tool nativa y no puede eliminarse");
    }
    tools.remove(index);
    Ok(())
}

fn slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for ch in name.trim().to_lowercase().chars() {
        if ch.is_alphanumeric() {
            slug.push(ch);
        } else if ch.is_whitespace() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let trimmed = slug.trim_matches('-');
    if trimmed.is_empty() {
        "tool".to_string()
    } else {
        trimmed.to_string()
    }
}

fn unique_id(tools: &[ToolDescriptor], base: &str) -> String {
    if !tools.iter().any(|tool| tool.id == base) {
        return base.to_string();
    }

    let mut counter = 2;
    loop {
        let candidate = format!("{base}-{counter}");
        if !tools.iter().any(|tool| tool.id == candidate) {
            return candidate;
        }
        counter += 1;
    }
}
