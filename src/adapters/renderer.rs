use crate::domain::model::{Attachment, CardTemplate, TemplateDataSet};
use crate::domain::ports::TemplateRenderer;
use crate::utils::error::{CardError, Result};
use regex::Regex;
use serde_json::Value;

/// Binds `${field}` expressions in an Adaptive Card template.
///
/// A string that is exactly one expression takes the bound value with its JSON
/// type; expressions embedded in longer strings are interpolated as text.
/// Dotted paths (`${sender.name}`) walk nested objects. Unbound expressions are
/// left in place, matching how card hosts treat them.
pub struct AdaptiveCardRenderer {
    expression: Regex,
}

impl AdaptiveCardRenderer {
    pub fn new() -> Result<Self> {
        let expression =
            Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*(?:\.[A-Za-z_][A-Za-z0-9_]*)*)\}").map_err(
                |e| CardError::RenderError {
                    message: format!("invalid expression pattern: {}", e),
                },
            )?;
        Ok(Self { expression })
    }

    fn bind(&self, node: &Value, data: &TemplateDataSet) -> Value {
        match node {
            Value::String(text) => self.bind_string(text, data),
            Value::Array(items) => Value::Array(items.iter().map(|v| self.bind(v, data)).collect()),
            Value::Object(fields) => Value::Object(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), self.bind(v, data)))
                    .collect(),
            ),
            other => other.clone(),
        }
    }

    fn bind_string(&self, text: &str, data: &TemplateDataSet) -> Value {
        if let Some(caps) = self.expression.captures(text) {
            if caps.get(0).map(|m| m.as_str().len()) == Some(text.len()) {
                if let Some(value) = lookup(data, &caps[1]) {
                    return value.clone();
                }
            }
        }

        let bound = self.expression.replace_all(text, |caps: &regex::Captures| {
            match lookup(data, &caps[1]) {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Null) => String::new(),
                Some(other) => other.to_string(),
                None => {
                    tracing::warn!("No value bound for template field '{}'", &caps[1]);
                    caps[0].to_string()
                }
            }
        });
        Value::String(bound.into_owned())
    }
}

fn lookup<'a>(data: &'a TemplateDataSet, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let mut current = data.get(segments.next()?)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

impl TemplateRenderer for AdaptiveCardRenderer {
    fn render(&self, template: &CardTemplate, data: &TemplateDataSet) -> Result<Attachment> {
        if template.body.get("type").and_then(Value::as_str) != Some("AdaptiveCard") {
            return Err(CardError::RenderError {
                message: format!("template '{}' is not an AdaptiveCard", template.name),
            });
        }

        let content = self.bind(&template.body, data);
        Ok(Attachment::adaptive_card(content))
    }
}
