//! Minification of production artifacts.
//!
//! Production builds are compressed and mangled at top level, calls to known
//! side-effect-free helpers are treated as pure, and the printed code is
//! restricted to ASCII.

use std::borrow::Cow;
use std::fmt::Write as _;

use anyhow::bail;
use oxc_allocator::Allocator;
use oxc_codegen::{Codegen, CodegenOptions};
use oxc_minifier::{
    CompressOptions, MangleOptions, Minifier as OxcMinifierEngine, MinifierOptions,
    TreeShakeOptions,
};
use oxc_parser::Parser;
use oxc_span::SourceType;
use polyship_config::ModuleFormat;

/// Fixed minification settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinifyOptions {
    /// Mangle top-level bindings too.
    pub top_level: bool,
    /// Escape every non-ASCII character in the printed output.
    pub ascii_only: bool,
    /// Functions whose unused calls may be dropped.
    ///
    /// Only calls through a bare identifier count; `obj.makeMap()` does not.
    pub pure_functions: Vec<String>,
}

impl Default for MinifyOptions {
    fn default() -> Self {
        Self {
            top_level: true,
            ascii_only: true,
            pure_functions: vec!["makeMap".to_string()],
        }
    }
}

/// Minifies bundled code.
pub trait Minifier: Send + Sync {
    /// `format` tells the minifier whether `code` is an ES module.
    fn minify(&self, code: &str, format: ModuleFormat) -> anyhow::Result<String>;
}

/// [`Minifier`] backed by `oxc_minifier`.
#[derive(Debug, Clone, Default)]
pub struct OxcMinifier {
    options: MinifyOptions,
}

impl OxcMinifier {
    pub fn new(options: MinifyOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &MinifyOptions {
        &self.options
    }
}

impl Minifier for OxcMinifier {
    fn minify(&self, code: &str, format: ModuleFormat) -> anyhow::Result<String> {
        let allocator = Allocator::default();
        let source_type = SourceType::mjs().with_module(format == ModuleFormat::Es);
        let parsed = Parser::new(&allocator, code, source_type).parse();
        if let Some(error) = parsed.errors.first() {
            bail!("{error}");
        }
        let mut program = parsed.program;

        let options = MinifierOptions {
            mangle: Some(MangleOptions {
                top_level: self.options.top_level,
                ..MangleOptions::default()
            }),
            compress: Some(CompressOptions {
                treeshake: TreeShakeOptions {
                    manual_pure_functions: self.options.pure_functions.clone(),
                    ..TreeShakeOptions::default()
                },
                ..CompressOptions::default()
            }),
        };
        let minified = OxcMinifierEngine::new(options).minify(&allocator, &mut program);

        let printed = Codegen::new()
            .with_options(CodegenOptions::minify())
            .with_scoping(minified.scoping)
            .build(&program)
            .code;

        Ok(if self.options.ascii_only {
            escape_non_ascii(&printed).into_owned()
        } else {
            printed
        })
    }
}

/// Escape characters outside printable ASCII as `\uXXXX`.
///
/// Characters beyond the BMP become a surrogate pair.
pub fn escape_non_ascii(code: &str) -> Cow<'_, str> {
    if code.chars().all(|ch| (ch as u32) < 0x7f) {
        return Cow::Borrowed(code);
    }

    let mut escaped = String::with_capacity(code.len() + 16);
    for ch in code.chars() {
        if (ch as u32) < 0x7f {
            escaped.push(ch);
            continue;
        }
        let mut units = [0u16; 2];
        for unit in ch.encode_utf16(&mut units) {
            let _ = write!(escaped, "\\u{unit:04x}");
        }
    }
    Cow::Owned(escaped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options() {
        let options = MinifyOptions::default();
        assert!(options.top_level);
        assert!(options.ascii_only);
        assert_eq!(options.pure_functions, ["makeMap"]);
    }

    #[test]
    fn escapes_non_ascii() {
        assert_eq!(escape_non_ascii("var s=\"é\";"), "var s=\"\\u00e9\";");
        assert_eq!(escape_non_ascii("\"😀\""), "\"\\ud83d\\ude00\"");
        assert!(matches!(escape_non_ascii("plain"), Cow::Borrowed(_)));
    }

    #[test]
    fn minifies_and_mangles() {
        let source = "function makeMap(str) { return str.split(','); }\n\
                      var unusedMap = makeMap('a,b');\n\
                      function greet(name) { var message = 'hello ' + name; console.log(message); }\n\
                      greet('ünïcode');\n";
        let out = OxcMinifier::default()
            .minify(source, ModuleFormat::Iife)
            .unwrap();

        assert!(out.len() < source.len());
        assert!(!out.contains("message"));
        assert!(out.is_ascii());
        assert!(out.contains("console.log"));
    }

    #[test]
    fn unused_pure_calls_are_dropped() {
        let source = "function makeMap(str) { return str.split(','); }\n\
                      makeMap('div,span');\n\
                      util.makeMap('p,ul');\n";
        let out = OxcMinifier::default()
            .minify(source, ModuleFormat::Cjs)
            .unwrap();

        assert!(!out.contains("div,span"));
        // member calls keep their side effects
        assert!(out.contains("p,ul"));
    }

    #[test]
    fn string_contents_are_left_alone() {
        let source = "var msg = \"call makeMap(x) first\";\n\
                      var tpl = `makeMap(${msg})`;\n\
                      console.log(msg, tpl);\n";
        let out = OxcMinifier::default()
            .minify(source, ModuleFormat::Cjs)
            .unwrap();

        assert!(out.contains("call makeMap(x) first"));
        assert!(out.contains("makeMap("));
        assert!(!out.contains("__PURE__"));
    }

    #[test]
    fn without_pure_functions_calls_are_kept() {
        let minifier = OxcMinifier::new(MinifyOptions {
            pure_functions: Vec::new(),
            ..MinifyOptions::default()
        });
        let source = "function makeMap(str) { return str.split(','); }\nmakeMap('div,span');\n";
        let out = minifier.minify(source, ModuleFormat::Cjs).unwrap();
        assert!(out.contains("div,span"));
    }

    #[test]
    fn syntax_errors_fail() {
        assert!(
            OxcMinifier::default()
                .minify("function (", ModuleFormat::Es)
                .is_err()
        );
    }
}
