//! Build-time configure options declared by a package.
//!
//! PECL packages list them in `package.xml` as
//! `<configureoption name="enable-foo-debug" default="no" prompt="..."/>`.

use std::path::Path;
use std::sync::LazyLock;

use anyhow::Context;
use regex::Regex;
use serde::{Deserialize, Serialize};

static CONFIGURE_OPTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<configureoption\b([^>]*?)/?>").expect("configureoption pattern is valid")
});

static ATTRIBUTE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([A-Za-z_][A-Za-z0-9_.-]*)\s*=\s*(?:"([^"]*)"|'([^']*)')"#)
        .expect("attribute pattern is valid")
});

/// Manifest file names, in lookup order.
const MANIFEST_FILES: [&str; 2] = ["package2.xml", "package.xml"];

/// Kind of a configure switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKind {
    /// `--enable-<name>` toggle
    Enable,
    /// `--with-<name>[=value]` option
    With,
}

impl OptionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Enable => "enable",
            Self::With => "with",
        }
    }
}

/// A single configure option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigureOption {
    pub name: String,
    pub kind: OptionKind,
    pub prompt: String,
    pub default: String,
}

impl ConfigureOption {
    pub fn new(
        name: impl Into<String>,
        prompt: impl Into<String>,
        default: impl Into<String>,
    ) -> Self {
        let name = name.into();
        let kind = if name.starts_with("enable-") {
            OptionKind::Enable
        } else {
            OptionKind::With
        };
        Self {
            name,
            kind,
            prompt: prompt.into(),
            default: default.into(),
        }
    }

    /// Whether an `enable` toggle is on by default.
    pub fn enabled_by_default(&self) -> bool {
        matches!(
            self.default.trim().to_ascii_lowercase().as_str(),
            "yes" | "y" | "1" | "on" | "true"
        )
    }
}

/// Extract configure options from `package.xml` content.
pub fn parse_configure_options(xml: &str) -> Vec<ConfigureOption> {
    CONFIGURE_OPTION_RE
        .captures_iter(xml)
        .filter_map(|caps| {
            let attrs = caps.get(1)?.as_str();
            let mut name = None;
            let mut prompt = String::new();
            let mut default = String::new();
            for attr in ATTRIBUTE_RE.captures_iter(attrs) {
                let value = attr
                    .get(2)
                    .or_else(|| attr.get(3))
                    .map(|m| decode_entities(m.as_str()))
                    .unwrap_or_default();
                match &attr[1] {
                    "name" => name = Some(value),
                    "prompt" => prompt = value,
                    "default" => default = value,
                    _ => {}
                }
            }
            name.map(|n| ConfigureOption::new(n, prompt, default))
        })
        .collect()
}

/// Read configure options from the manifest in a downloaded package directory.
///
/// Returns an empty list when the package ships no manifest. Older manifests
/// are often ISO-8859-1, so bytes that are not UTF-8 are replaced rather than
/// rejected.
pub fn read_configure_options(package_dir: &Path) -> anyhow::Result<Vec<ConfigureOption>> {
    for file in MANIFEST_FILES {
        let path = package_dir.join(file);
        if path.is_file() {
            let bytes = std::fs::read(&path)
                .with_context(|| format!("Failed to read manifest: {}", path.display()))?;
            return Ok(parse_configure_options(&String::from_utf8_lossy(&bytes)));
        }
    }
    Ok(Vec::new())
}

fn decode_entities(raw: &str) -> String {
    raw.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PACKAGE_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<package version="2.0" xmlns="http://pear.php.net/dtd/package-2.0">
 <name>apcu</name>
 <extsrcrelease>
  <configureoption name="enable-apcu-debug" default="no" prompt="Enable internal debugging in APCu"/>
  <configureoption name="with-apcu-lib" prompt="Path to lib &amp; headers" default="/usr" />
  <configureoption default="yes" prompt="nameless"/>
 </extsrcrelease>
</package>
"#;

    #[test]
    fn parses_options_from_manifest() {
        let options = parse_configure_options(PACKAGE_XML);
        assert_eq!(options.len(), 2);

        assert_eq!(options[0].name, "enable-apcu-debug");
        assert_eq!(options[0].kind, OptionKind::Enable);
        assert_eq!(options[0].prompt, "Enable internal debugging in APCu");
        assert!(!options[0].enabled_by_default());

        assert_eq!(options[1].name, "with-apcu-lib");
        assert_eq!(options[1].kind, OptionKind::With);
        assert_eq!(options[1].prompt, "Path to lib & headers");
        assert_eq!(options[1].default, "/usr");
    }

    #[test]
    fn enabled_by_default_accepts_common_spellings() {
        assert!(ConfigureOption::new("enable-x", "", "yes").enabled_by_default());
        assert!(ConfigureOption::new("enable-x", "", " 1 ").enabled_by_default());
        assert!(!ConfigureOption::new("enable-x", "", "").enabled_by_default());
    }

    #[test]
    fn reads_manifest_from_directory() {
        let temp = tempfile::TempDir::new().unwrap();
        std::fs::write(temp.path().join("package.xml"), PACKAGE_XML).unwrap();

        let options = read_configure_options(temp.path()).unwrap();
        assert_eq!(options.len(), 2);
    }

    #[test]
    fn latin1_manifest_is_read() {
        let temp = tempfile::TempDir::new().unwrap();
        let mut xml = br#"<?xml version="1.0" encoding="ISO-8859-1"?>
<package><configureoption name="with-caf"#
            .to_vec();
        xml.push(0xE9);
        xml.extend_from_slice(br#"" default="/usr" prompt="Caf"#);
        xml.push(0xE9);
        xml.extend_from_slice(br#" library path"/></package>"#);
        std::fs::write(temp.path().join("package.xml"), xml).unwrap();

        let options = read_configure_options(temp.path()).unwrap();
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].name, "with-caf\u{FFFD}");
        assert_eq!(options[0].kind, OptionKind::With);
        assert_eq!(options[0].default, "/usr");
        assert_eq!(options[0].prompt, "Caf\u{FFFD} library path");
    }

    #[test]
    fn missing_manifest_yields_no_options() {
        let temp = tempfile::TempDir::new().unwrap();
        assert!(read_configure_options(temp.path()).unwrap().is_empty());
    }
}
