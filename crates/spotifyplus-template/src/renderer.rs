//! Response text renderer
//!
//! Renders the template text found in response documents against a
//! context exposing `slots`, the way intent scripts expose them.

use crate::error::TemplateResult;
use crate::filters;
use minijinja::{Environment, UndefinedBehavior};
use serde::Serialize;
use spotifyplus_core::Slots;
use tracing::trace;

/// Template renderer for response text
///
/// Undefined values follow Jinja2 defaults: printing an undefined value
/// yields an empty string, but reading an attribute of one is an error,
/// so `{{ slots.missing.text }}` fails when `missing` is not a slot.
#[derive(Debug, Clone)]
pub struct ResponseRenderer {
    env: Environment<'static>,
}

#[derive(Serialize)]
struct SlotContext<'a> {
    slots: &'a Slots,
}

impl ResponseRenderer {
    /// Environment with lenient undefined values and the SpotifyPlus filters
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Lenient);

        env.add_filter("spotify_id", filters::spotify_id);
        env.add_filter("spotify_url", filters::spotify_url);
        env.add_filter("masked", filters::masked);
        env.add_filter("clip", filters::clip);

        Self { env }
    }

    /// Render response text with `slots` in the context
    pub fn render(&self, template: &str, slots: &Slots) -> TemplateResult<String> {
        self.render_with_context(template, SlotContext { slots })
    }

    /// Render a template with an arbitrary serializable context
    pub fn render_with_context(
        &self,
        template: &str,
        context: impl Serialize,
    ) -> TemplateResult<String> {
        trace!(template = %template, "rendering response template");
        let tmpl = self.env.template_from_str(template)?;
        let result = tmpl.render(context)?;
        Ok(result)
    }
}

impl Default for ResponseRenderer {
    fn default() -> Self {
        Self::new()
    }
}
