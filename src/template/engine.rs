//! Placeholder-substitution template engine

use serde_json::Value;
use tracing::debug;

use super::registry::{TemplateError, TemplateRegistry};
use super::{TemplateEngine, Variables};

const OPEN_TAG: &str = "{{";
const CLOSE_TAG: &str = "}}";

/// Engine replacing `{{ key }}` tags with variable values
///
/// Keys may be dotted paths into nested objects (`{{ user.name }}`). Strings
/// are inserted as-is, `null` as nothing, anything else as its JSON text.
#[derive(Debug, Default)]
pub struct SimpleTemplateEngine {
    registry: TemplateRegistry,
}

impl SimpleTemplateEngine {
    /// Create an engine reading templates from `registry`
    pub fn new(registry: TemplateRegistry) -> Self {
        Self { registry }
    }
}

impl TemplateEngine for SimpleTemplateEngine {
    fn render(&self, name: &str, variables: &Variables) -> Result<String, TemplateError> {
        let source = self.registry.load(name)?;
        debug!(template = name, "rendering template");
        interpolate(name, &source, variables)
    }
}

fn interpolate(template: &str, source: &str, variables: &Variables) -> Result<String, TemplateError> {
    let mut output = String::with_capacity(source.len());
    let mut rest = source;

    while let Some(start) = rest.find(OPEN_TAG) {
        output.push_str(&rest[..start]);
        let tag = &rest[start + OPEN_TAG.len()..];
        let end = tag.find(CLOSE_TAG).ok_or_else(|| TemplateError::Syntax {
            template: template.to_string(),
            message: format!(
                "unterminated tag at byte {}",
                source.len() - rest.len() + start
            ),
        })?;

        let key = tag[..end].trim();
        if key.is_empty() {
            return Err(TemplateError::Syntax {
                template: template.to_string(),
                message: "empty tag".to_string(),
            });
        }

        match lookup(variables, key) {
            Some(Value::String(s)) => output.push_str(s),
            Some(Value::Null) => {}
            Some(other) => output.push_str(&other.to_string()),
            None => {
                return Err(TemplateError::MissingVariable {
                    template: template.to_string(),
                    variable: key.to_string(),
                })
            }
        }

        rest = &tag[end + CLOSE_TAG.len()..];
    }

    output.push_str(rest);
    Ok(output)
}

fn lookup<'v>(variables: &'v Variables, path: &str) -> Option<&'v Value> {
    let mut segments = path.split('.');
    let mut current = variables.get(segments.next()?)?;
    for segment in segments {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}
