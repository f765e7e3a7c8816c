//! Syntax downleveling through the oxc transformer.

use std::borrow::Cow;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, anyhow, bail};
use oxc_allocator::Allocator;
use oxc_codegen::Codegen;
use oxc_parser::Parser;
use oxc_semantic::SemanticBuilder;
use oxc_span::SourceType;
use oxc_transformer::{TransformOptions, Transformer};
use rolldown_plugin::{
    HookTransformArgs, HookTransformOutput, HookTransformReturn, HookUsage, Plugin,
    SharedTransformPluginContext,
};
use tracing::trace;

const SCRIPT_EXTENSIONS: &[&str] = &["js", "mjs", "cjs", "jsx", "ts", "tsx", "mts", "cts"];

/// Lowers modern syntax in every script module to a fixed ECMAScript target.
#[derive(Debug, Clone)]
pub struct DownlevelPlugin {
    target: String,
    options: Arc<TransformOptions>,
}

impl DownlevelPlugin {
    /// # Errors
    ///
    /// Returns an error when `target` is not a target oxc understands.
    pub fn new(target: &str) -> anyhow::Result<Self> {
        let options = TransformOptions::from_target(target)
            .map_err(|e| anyhow!("invalid downlevel target '{target}': {e}"))?;
        Ok(Self {
            target: target.to_string(),
            options: Arc::new(options),
        })
    }

    pub fn target(&self) -> &str {
        &self.target
    }
}

/// Whether a module id names a file the downlevel pass handles.
pub fn is_script(id: &str) -> bool {
    let path = id.split(['?', '#']).next().unwrap_or(id);
    Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SCRIPT_EXTENSIONS.contains(&ext))
}

/// Parse, transform and re-print `source`.
pub fn downlevel(source: &str, path: &Path, options: &TransformOptions) -> anyhow::Result<String> {
    let allocator = Allocator::default();
    let source_type = SourceType::from_path(path).unwrap_or_else(|_| SourceType::mjs());

    let parsed = Parser::new(&allocator, source, source_type).parse();
    if let Some(error) = parsed.errors.first() {
        bail!("parse error in {}: {error}", path.display());
    }
    let mut program = parsed.program;

    let scoping = SemanticBuilder::new()
        .build(&program)
        .semantic
        .into_scoping();
    let transformed =
        Transformer::new(&allocator, path, options).build_with_scoping(scoping, &mut program);
    if let Some(error) = transformed.errors.first() {
        bail!("transform error in {}: {error}", path.display());
    }

    Ok(Codegen::new().build(&program).code)
}

impl Plugin for DownlevelPlugin {
    fn name(&self) -> Cow<'static, str> {
        "polyship:downlevel".into()
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
        let options = Arc::clone(&self.options);
        let target = self.target.clone();

        async move {
            if !is_script(&id) {
                return Ok(None);
            }

            let lowered = downlevel(&code, Path::new(&id), &options)
                .with_context(|| format!("failed to downlevel {id} to {target}"))?;
            trace!(module = %id, %target, "downleveled");

            Ok(Some(HookTransformOutput {
                code: Some(lowered),
                map: None,
                side_effects: None,
                module_type: None,
            }))
        }
    }
}
