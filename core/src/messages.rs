//! Localized message templates.
//!
//! Templates use `{0}`, `{1}`, … placeholders. The core only ever looks
//! messages up by key; where they come from is up to the frontend, which
//! can supply its own [`MessageSource`] or override entries of the built-in
//! English [`MessageCatalog`].

use std::collections::HashMap;

/// Default name of a newly created folder.
pub const NEW_FOLDER: &str = "newFolder";
/// Name of further new folders; `{0}` is the running number.
pub const NEW_FOLDER_SUBSEQUENT: &str = "newFolder.subsequent";
pub const SIZE_KILOBYTES: &str = "fileSize.kiloBytes";
pub const SIZE_MEGABYTES: &str = "fileSize.megaBytes";
pub const SIZE_GIGABYTES: &str = "fileSize.gigaBytes";
/// Description of the accept-all file filter.
pub const ACCEPT_ALL_FILTER: &str = "acceptAllFileFilter";

const ENGLISH: &[(&str, &str)] = &[
    (NEW_FOLDER, "New Folder"),
    (NEW_FOLDER_SUBSEQUENT, "New Folder ({0})"),
    (SIZE_KILOBYTES, "{0} KB"),
    (SIZE_MEGABYTES, "{0} MB"),
    (SIZE_GIGABYTES, "{0} GB"),
    (ACCEPT_ALL_FILTER, "All Files"),
];

/// String lookup service for localized templates.
pub trait MessageSource: Send + Sync {
    /// Template for `key`, if known.
    fn template(&self, key: &str) -> Option<&str>;

    /// Look up `key` and substitute `args`; unknown keys yield the key itself.
    fn format(&self, key: &str, args: &[&str]) -> String {
        match self.template(key) {
            Some(template) => format_template(template, args),
            None => key.to_string(),
        }
    }
}

/// In-memory message catalog seeded with English defaults.
#[derive(Debug, Clone)]
pub struct MessageCatalog {
    messages: HashMap<String, String>,
}

impl MessageCatalog {
    /// English catalog.
    pub fn english() -> Self {
        Self {
            messages: ENGLISH
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    /// English catalog with `overrides` applied on top.
    pub fn with_overrides(overrides: &HashMap<String, String>) -> Self {
        let mut catalog = Self::english();
        for (key, value) in overrides {
            catalog.set(key, value);
        }
        catalog
    }

    pub fn set(&mut self, key: &str, template: &str) {
        self.messages.insert(key.to_string(), template.to_string());
    }
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self::english()
    }
}

impl MessageSource for MessageCatalog {
    fn template(&self, key: &str) -> Option<&str> {
        self.messages.get(key).map(String::as_str)
    }
}

/// Replace `{n}` placeholders with `args[n]`. Placeholders without a
/// matching argument are left as they are.
pub fn format_template(template: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let substituted = after.find('}').and_then(|close| {
            let index: usize = after[..close].parse().ok()?;
            args.get(index).map(|arg| (arg, close))
        });
        match substituted {
            Some((arg, close)) => {
                out.push_str(arg);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_defaults() {
        let catalog = MessageCatalog::english();
        assert_eq!(catalog.template(NEW_FOLDER), Some("New Folder"));
        assert_eq!(catalog.format(NEW_FOLDER_SUBSEQUENT, &["2"]), "New Folder (2)");
        assert_eq!(catalog.format(SIZE_MEGABYTES, &["5"]), "5 MB");
        assert_eq!(catalog.format(ACCEPT_ALL_FILTER, &[]), "All Files");
    }

    #[test]
    fn unknown_key_formats_as_key() {
        let catalog = MessageCatalog::english();
        assert_eq!(catalog.format("no.such.key", &[]), "no.such.key");
    }

    #[test]
    fn overrides_replace_defaults() {
        let overrides = HashMap::from([
            (NEW_FOLDER.to_string(), "Neuer Ordner".to_string()),
            (
                NEW_FOLDER_SUBSEQUENT.to_string(),
                "Neuer Ordner {0}".to_string(),
            ),
        ]);
        let catalog = MessageCatalog::with_overrides(&overrides);
        assert_eq!(catalog.format(NEW_FOLDER, &[]), "Neuer Ordner");
        assert_eq!(catalog.format(NEW_FOLDER_SUBSEQUENT, &["3"]), "Neuer Ordner 3");
        assert_eq!(catalog.format(SIZE_KILOBYTES, &["1"]), "1 KB");
    }

    #[test]
    fn format_template_placeholders() {
        assert_eq!(format_template("{0} of {1}", &["a", "b"]), "a of b");
        assert_eq!(format_template("{1}{0}", &["x", "y"]), "yx");
        assert_eq!(format_template("{2} left", &["a"]), "{2} left");
        assert_eq!(format_template("{name}", &["a"]), "{name}");
        assert_eq!(format_template("open {", &["a"]), "open {");
        assert_eq!(format_template("plain", &[]), "plain");
    }
}
