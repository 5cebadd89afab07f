//! Handlebars-backed placeholder renderer.
//!
//! ```text
//! {{name}}                         answer value
//! {{author.email}}                 derived value
//! {{pascal_case name}}             helper call
//! {{json (author_name author)}}    nested helper call
//! {{#if gitlabci}} … {{/if}}       block kept when the flag is true
//! {{#unless gitlabci}} … {{/unless}}
//! ```
//!
//! The registry runs in strict mode, so a value that is not in the context
//! fails the render instead of printing nothing. Output is never
//! HTML-escaped; templates produce JSON, JavaScript, YAML and Markdown.

use handlebars::{
    Context, Handlebars, Helper, HelperDef, HelperResult, Output, RenderErrorReason,
};
use serde_json::{Map, Value, json};
use stencil_core::{
    application::{ApplicationError, ports::TemplateRenderer},
    domain::{AnswerValue, RenderContext, TemplateId},
    error::StencilResult,
};
use tracing::instrument;

/// Helpers registered on every renderer, all taking one text argument.
const HELPERS: [&str; 5] = ["pascal_case", "uppercc", "author_name", "author_email", "json"];

/// Renderer for Handlebars templates over a [`RenderContext`].
#[derive(Debug, Clone)]
pub struct PlaceholderRenderer {
    registry: Handlebars<'static>,
}

impl PlaceholderRenderer {
    pub fn new() -> Self {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_escape_fn(handlebars::no_escape);

        // The context carries the helper table; an empty one is enough to read it.
        let lookup = RenderContext::with_year(Default::default(), 0);
        for name in HELPERS {
            if let Some(apply) = lookup.helper(name) {
                registry.register_helper(name, Box::new(TextHelper { name, apply }));
            }
        }
        Self { registry }
    }
}

impl Default for PlaceholderRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer for PlaceholderRenderer {
    #[instrument(skip_all, fields(template = %template))]
    fn render(
        &self,
        template: &TemplateId,
        source: &str,
        context: &RenderContext,
    ) -> StencilResult<String> {
        self.registry
            .render_template(source, &template_data(context))
            .map_err(|e| {
                ApplicationError::RenderingFailed {
                    template: template.to_string(),
                    reason: e.to_string(),
                }
                .into()
            })
    }
}

/// The JSON object templates see: every answer, `year`, and `author` split
/// into `name` and `email`.
fn template_data(context: &RenderContext) -> Value {
    let mut data: Map<String, Value> = context
        .answers()
        .iter()
        .map(|(key, value)| {
            let value = match value {
                AnswerValue::Flag(flag) => Value::Bool(*flag),
                AnswerValue::Text(text) => Value::String(text.clone()),
            };
            (key.to_string(), value)
        })
        .collect();

    let author = context.author();
    data.insert(
        "author".into(),
        json!({ "name": author.name, "email": author.email }),
    );
    if let Some(year) = context.lookup("year") {
        data.insert("year".into(), Value::String(year));
    }
    Value::Object(data)
}

/// Adapts a `fn(&str) -> String` context helper to Handlebars.
struct TextHelper {
    name: &'static str,
    apply: stencil_core::domain::Helper,
}

impl HelperDef for TextHelper {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc Context,
        _: &mut handlebars::RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let param = h
            .param(0)
            .ok_or_else(|| RenderErrorReason::Other(format!("'{}' takes one argument", self.name)))?;
        if param.is_value_missing() {
            return Err(RenderErrorReason::Other(format!(
                "'{}' was given unknown value '{}'",
                self.name,
                param.relative_path().map(String::as_str).unwrap_or("?"),
            ))
            .into());
        }
        let text = param.value().as_str().ok_or_else(|| {
            RenderErrorReason::Other(format!("'{}' needs a text argument", self.name))
        })?;
        out.write(&(self.apply)(text))?;
        Ok(())
    }
}
