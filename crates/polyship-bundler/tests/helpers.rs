//! Fakes shared by the executor tests.
#![allow(dead_code)]

use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use polyship_bundler::{BundleEngine, Error, Minifier, Result, with_banner};
use polyship_config::{BuildContext, ModuleFormat, ResolvedConfig, TargetSpec, compile};

/// Engine returning fixed code, honouring the banner like a real engine.
pub struct FakeEngine {
    pub code: String,
    pub calls: Mutex<Vec<String>>,
}

impl FakeEngine {
    pub fn new(code: &str) -> Self {
        Self {
            code: code.to_string(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl BundleEngine for FakeEngine {
    async fn bundle(&self, config: &ResolvedConfig) -> Result<String> {
        self.calls.lock().unwrap().push(config.source_name.clone());
        Ok(with_banner(config.output.banner.as_deref(), self.code.clone()))
    }
}

/// Engine that always fails.
pub struct FailingEngine;

#[async_trait]
impl BundleEngine for FailingEngine {
    async fn bundle(&self, config: &ResolvedConfig) -> Result<String> {
        Err(Error::Bundle {
            target: config.source_name.clone(),
            message: "Could not resolve entry module".to_string(),
        })
    }
}

/// Minifier that strips whitespace and records what it saw.
#[derive(Default)]
pub struct FakeMinifier {
    pub seen: Mutex<Vec<String>>,
}

impl Minifier for FakeMinifier {
    fn minify(&self, code: &str, _format: ModuleFormat) -> anyhow::Result<String> {
        self.seen.lock().unwrap().push(code.to_string());
        Ok(code.split_whitespace().collect())
    }
}

pub struct FailingMinifier;

impl Minifier for FailingMinifier {
    fn minify(&self, _code: &str, _format: ModuleFormat) -> anyhow::Result<String> {
        anyhow::bail!("Unexpected token (1:4)")
    }
}

pub fn resolved(root: &Path, name: &str, destination: &str, banner: Option<&str>) -> ResolvedConfig {
    let context = BuildContext::new("1.0.0", root);
    let mut target = TargetSpec::new(name, "src/index.js", destination, ModuleFormat::Umd);
    if let Some(banner) = banner {
        target = target.banner(banner);
    }
    compile(&target, &context).unwrap()
}
