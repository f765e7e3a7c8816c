//! Literal macro substitution.
//!
//! Every placeholder of a [`MacroTable`] is replaced by its text wherever it
//! appears as a whole token. A match directly followed by `.` is left alone,
//! so `process.env.NODE_ENV.foo` keeps referring to the real property.

use std::borrow::Cow;
use std::sync::Arc;

use polyship_config::MacroTable;
use regex::Regex;
use rolldown_plugin::{
    HookTransformArgs, HookTransformOutput, HookTransformReturn, HookUsage, Plugin,
    SharedTransformPluginContext,
};
use tracing::trace;

/// A compiled macro table.
#[derive(Debug, Clone)]
pub struct Substitution {
    macros: MacroTable,
    pattern: Option<Regex>,
}

impl Substitution {
    /// Compile the table into a single alternation, longest placeholder first.
    pub fn new(macros: &MacroTable) -> Result<Self, regex::Error> {
        let mut keys: Vec<&str> = macros.iter().map(|(key, _)| key).collect();
        keys.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        let pattern = if keys.is_empty() {
            None
        } else {
            let alternation = keys
                .iter()
                .map(|key| regex::escape(key))
                .collect::<Vec<_>>()
                .join("|");
            Some(Regex::new(&format!(r"\b(?:{alternation})\b"))?)
        };

        Ok(Self {
            macros: macros.clone(),
            pattern,
        })
    }

    /// Replace every placeholder in `code`. Borrows when nothing matched.
    pub fn apply<'a>(&self, code: &'a str) -> Cow<'a, str> {
        let Some(pattern) = &self.pattern else {
            return Cow::Borrowed(code);
        };

        let mut output = String::new();
        let mut last = 0;
        let mut replaced = false;
        for found in pattern.find_iter(code) {
            if code[found.end()..].starts_with('.') {
                continue;
            }
            let Some(replacement) = self.macros.get(found.as_str()) else {
                continue;
            };
            output.push_str(&code[last..found.start()]);
            output.push_str(replacement);
            last = found.end();
            replaced = true;
        }

        if !replaced {
            return Cow::Borrowed(code);
        }
        output.push_str(&code[last..]);
        Cow::Owned(output)
    }
}

/// Engine plugin running a [`Substitution`] over every module.
#[derive(Debug, Clone)]
pub struct SubstitutePlugin {
    substitution: Arc<Substitution>,
}

impl SubstitutePlugin {
    pub fn new(macros: &MacroTable) -> Result<Self, regex::Error> {
        Ok(Self {
            substitution: Arc::new(Substitution::new(macros)?),
        })
    }
}

impl Plugin for SubstitutePlugin {
    fn name(&self) -> Cow<'static, str> {
        "polyship:substitute".into()
    }

    fn register_hook_usage(&self) -> HookUsage {
        HookUsage::Transform
    }

    fn transform(
        &self,
        _ctx: SharedTransformPluginContext,
        args: &HookTransformArgs<'_>,
    ) -> impl std::future::Future<Output = HookTransformReturn> + Send {
        let id = args.id.to_string();
        let code = args.code.to_string();
        let substitution = Arc::clone(&self.substitution);

        async move {
            match substitution.apply(&code) {
                Cow::Borrowed(_) => Ok(None),
                Cow::Owned(replaced) => {
                    trace!(module = %id, "substituted macros");
                    Ok(Some(HookTransformOutput {
                        code: Some(replaced),
                        map: None,
                        side_effects: None,
                        module_type: None,
                    }))
                }
            }
        }
    }
}
