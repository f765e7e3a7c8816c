//! Size reports for written artifacts.

use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use owo_colors::OwoColorize;
use polyship_bundler::BuildResult;

use crate::orchestrator::Reporter;

/// Bytes as kilobytes with two decimals.
///
/// ```
/// use polyship_cli::ui::format_kb;
///
/// assert_eq!(format_kb(0), "0.00kb");
/// assert_eq!(format_kb(1536), "1.50kb");
/// ```
pub fn format_kb(bytes: u64) -> String {
    format!("{:.2}kb", bytes as f64 / 1024.0)
}

/// One report line: destination relative to `cwd`, size, and gzip size for
/// production artifacts.
///
/// With `color` the path is bold blue.
pub fn format_report(result: &BuildResult, cwd: &Path, color: bool) -> String {
    let path = relative_to(&result.destination, cwd).display().to_string();
    let path = if color {
        path.blue().bold().to_string()
    } else {
        path
    };

    let mut line = format!("{path} {}", format_kb(result.raw_bytes));
    if let Some(compressed) = result.compressed_bytes {
        line.push_str(&format!(" (gzipped: {})", format_kb(compressed)));
    }
    line
}

/// `path` as seen from `base`, climbing with `..` where needed.
///
/// Paths on different roots (another drive prefix) are returned unchanged.
fn relative_to(path: &Path, base: &Path) -> PathBuf {
    let path_parts: Vec<Component<'_>> = path.components().collect();
    let base_parts: Vec<Component<'_>> = base.components().collect();
    if path_parts.first() != base_parts.first() {
        return path.to_path_buf();
    }

    let shared = path_parts
        .iter()
        .zip(&base_parts)
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in shared..base_parts.len() {
        relative.push("..");
    }
    for part in &path_parts[shared..] {
        relative.push(part.as_os_str());
    }
    relative
}

/// Format a duration as `ms`, `s` or `m s`.
pub fn format_duration(duration: Duration) -> String {
    let millis = duration.as_millis();

    if millis < 1000 {
        format!("{millis}ms")
    } else if millis < 60_000 {
        format!("{:.2}s", duration.as_secs_f64())
    } else {
        let secs = duration.as_secs();
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

/// Prints a report line to stdout for each built artifact.
#[derive(Debug, Clone)]
pub struct ConsoleReporter {
    cwd: PathBuf,
    color: bool,
}

impl ConsoleReporter {
    pub fn new(cwd: impl Into<PathBuf>, color: bool) -> Self {
        Self {
            cwd: cwd.into(),
            color,
        }
    }
}

impl Reporter for ConsoleReporter {
    fn target_built(&self, result: &BuildResult) {
        println!("{}", format_report(result, &self.cwd, self.color));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(destination: &str, raw: u64, compressed: Option<u64>) -> BuildResult {
        BuildResult {
            source_name: "t".to_string(),
            destination: PathBuf::from(destination),
            raw_bytes: raw,
            compressed_bytes: compressed,
        }
    }

    #[test]
    fn development_report_has_no_gzip_size() {
        let line = format_report(&result("/repo/dist/vue.js", 2048, None), Path::new("/repo"), false);
        assert_eq!(line, "dist/vue.js 2.00kb");
    }

    #[test]
    fn production_report_includes_gzip_size() {
        let line = format_report(
            &result("/repo/dist/vue.min.js", 10_240, Some(3_584)),
            Path::new("/repo"),
            false,
        );
        assert_eq!(line, "dist/vue.min.js 10.00kb (gzipped: 3.50kb)");
    }

    #[test]
    fn path_outside_cwd_climbs_up() {
        let line = format_report(&result("/other/lib.js", 512, None), Path::new("/repo"), false);
        assert_eq!(line, "../other/lib.js 0.50kb");

        let line = format_report(
            &result("/work/vue/dist/vue.js", 512, None),
            Path::new("/work/vue/packages/compiler"),
            false,
        );
        assert_eq!(line, "../../dist/vue.js 0.50kb");
    }

    #[test]
    fn colored_path_keeps_text() {
        let line = format_report(&result("/repo/dist/vue.js", 1024, None), Path::new("/repo"), true);
        assert!(line.contains("dist/vue.js"));
        assert!(line.contains('\u{1b}'));
        assert!(line.ends_with(" 1.00kb"));
    }

    #[test]
    fn kb_rounds_to_two_decimals() {
        assert_eq!(format_kb(1000), "0.98kb");
        assert_eq!(format_kb(1024 * 1024), "1024.00kb");
    }

    #[test]
    fn durations() {
        assert_eq!(format_duration(Duration::from_millis(50)), "50ms");
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
        assert_eq!(format_duration(Duration::from_secs(150)), "2m 30s");
    }
}
