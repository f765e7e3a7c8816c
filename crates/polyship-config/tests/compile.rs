//! Tests for the config compiler.

use std::path::PathBuf;

use indexmap::IndexMap;
use polyship_config::{
    BuildContext, ConfigError, EnvironmentMode, ModuleFormat, NODE_ENV_PLACEHOLDER, TargetSpec,
    TransformStep, VERSION_PLACEHOLDER, compile,
};

fn context() -> BuildContext {
    BuildContext::new("2.7.16", "/repo")
        .alias("foo", "./default-foo")
        .alias("baz", "./baz")
        .alias("web", "src/platforms/web")
        .feature_flag("NEW_SLOT_SYNTAX", true)
        .module_name("Vue")
}

fn full_target() -> TargetSpec {
    TargetSpec::new(
        "web-full-dev",
        "web/entry-runtime-with-compiler.js",
        "dist/vue.js",
        ModuleFormat::Umd,
    )
    .env(EnvironmentMode::Development)
    .alias("he", "./entity-decoder")
    .banner("/*! banner */")
}

#[test]
fn compile_is_deterministic() {
    let target = full_target();
    let first = compile(&target, &context()).unwrap();
    let second = compile(&target, &context()).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
}

#[test]
fn plugin_order_is_alias_custom_substitute_downlevel() {
    let target = full_target().plugin("strip-comments");
    let resolved = compile(&target, &context()).unwrap();

    let kinds: Vec<_> = resolved.plugins.iter().map(TransformStep::kind).collect();
    assert_eq!(kinds, ["alias", "custom", "substitute", "downlevel"]);
    assert_eq!(resolved.downlevel_target(), Some("es2015"));
    assert_eq!(resolved.custom_plugins().collect::<Vec<_>>(), ["strip-comments"]);
}

#[test]
fn transpile_false_omits_downlevel() {
    let target = full_target().transpile(false);
    let resolved = compile(&target, &context()).unwrap();

    let kinds: Vec<_> = resolved.plugins.iter().map(TransformStep::kind).collect();
    assert_eq!(kinds, ["alias", "substitute"]);
    assert!(resolved.downlevel_target().is_none());
}

#[test]
fn alias_overrides_win_over_defaults() {
    let target = TargetSpec::new("t", "src/index.js", "dist/t.js", ModuleFormat::Es)
        .alias("foo", "./bar");
    let context = BuildContext::new("1.0.0", "/repo")
        .alias("foo", "./default-foo")
        .alias("baz", "./baz");

    let resolved = compile(&target, &context).unwrap();

    let mut expected = IndexMap::new();
    expected.insert("foo".to_string(), "./bar".to_string());
    expected.insert("baz".to_string(), "./baz".to_string());
    assert_eq!(resolved.aliases(), Some(&expected));
}

#[test]
fn entry_and_destination_are_resolved() {
    let resolved = compile(&full_target(), &context()).unwrap();
    assert_eq!(
        resolved.input,
        PathBuf::from("/repo/src/platforms/web/entry-runtime-with-compiler.js")
    );
    assert_eq!(resolved.output.destination, PathBuf::from("/repo/dist/vue.js"));
    assert_eq!(resolved.base_dir, PathBuf::from("/repo"));
    assert_eq!(resolved.source_name, "web-full-dev");
}

#[test]
fn output_descriptor_carries_format_banner_and_name() {
    let resolved = compile(&full_target(), &context()).unwrap();
    assert_eq!(resolved.output.format, ModuleFormat::Umd);
    assert_eq!(resolved.output.banner.as_deref(), Some("/*! banner */"));
    assert_eq!(resolved.output.module_name, "Vue");

    let named = compile(&full_target().module_name("VueRuntime"), &context()).unwrap();
    assert_eq!(named.output.module_name, "VueRuntime");
}

#[test]
fn macros_cover_version_flags_and_env() {
    let resolved = compile(&full_target(), &context()).unwrap();
    let macros = resolved.macros().unwrap();
    assert_eq!(macros.get(VERSION_PLACEHOLDER), Some("2.7.16"));
    assert_eq!(macros.get("process.env.NEW_SLOT_SYNTAX"), Some("true"));
    assert_eq!(macros.get(NODE_ENV_PLACEHOLDER), Some("\"development\""));
}

#[test]
fn production_is_decided_by_destination_only() {
    let dev_named_min = TargetSpec::new("a", "src/index.js", "dist/vue.min.js", ModuleFormat::Umd)
        .env(EnvironmentMode::Development);
    let prod_env_plain = TargetSpec::new("b", "src/index.js", "dist/vue.js", ModuleFormat::Umd)
        .env(EnvironmentMode::Production);
    let prod_suffix = TargetSpec::new("c", "src/index.js", "dist/vue.prod.js", ModuleFormat::Es);

    assert!(compile(&dev_named_min, &context()).unwrap().is_production);
    assert!(!compile(&prod_env_plain, &context()).unwrap().is_production);
    assert!(compile(&prod_suffix, &context()).unwrap().is_production);
}

#[test]
fn empty_entry_is_invalid() {
    let target = TargetSpec::new("broken", "", "dist/x.js", ModuleFormat::Es);
    let err = compile(&target, &context()).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::InvalidTarget { ref target, field: "entry" } if target == "broken"
    ));
}

#[test]
fn blank_destination_is_invalid() {
    let target = TargetSpec::new("broken", "src/index.js", "   ", ModuleFormat::Es);
    let err = compile(&target, &context()).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::InvalidTarget { field: "destination", .. }
    ));
}

#[test]
fn externals_are_copied() {
    let target = full_target().external("lodash");
    let resolved = compile(&target, &context()).unwrap();
    assert_eq!(resolved.external, vec!["lodash".to_string()]);
}
