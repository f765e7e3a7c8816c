//! The bundling engine seam.

use async_trait::async_trait;
use polyship_config::ResolvedConfig;

use crate::Result;

/// Bundles one resolved configuration into a single chunk of code.
///
/// Implementations honour the whole [`ResolvedConfig`]: input, plugin chain,
/// format, module name, externals and the output banner. Failures are
/// reported as [`Error::Bundle`](crate::Error::Bundle).
#[async_trait]
pub trait BundleEngine: Send + Sync {
    async fn bundle(&self, config: &ResolvedConfig) -> Result<String>;
}

/// Prepend `banner` on its own line.
pub fn with_banner(banner: Option<&str>, code: String) -> String {
    match banner {
        Some(banner) if !banner.is_empty() => format!("{banner}\n{code}"),
        _ => code,
    }
}
