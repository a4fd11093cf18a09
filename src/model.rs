use std::fmt;

pub const HEADER: &str = "[Desktop Entry]";

/// Coarse category of a target, driving the `Icon=` value of the entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IconClass {
    WebLink,
    Folder,
    #[default]
    Unset,
}

impl IconClass {
    pub fn icon_name(self) -> &'static str {
        match self {
            IconClass::WebLink => "text-html",
            IconClass::Folder => "document-folder",
            IconClass::Unset => "",
        }
    }
}

/// One converted shortcut. Built fresh for every source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcutRecord {
    pub name: String,          // Display name
    pub target: String,        // URL, network path or resolved local path
    pub icon_class: IconClass,
    pub locale: String,        // Suffix of the localized Name[..] key
}

impl ShortcutRecord {
    /// Returns `None` unless both `target` and `name` are non-empty.
    pub fn build(target: &str, name: &str, icon_class: IconClass) -> Option<Self> {
        if target.is_empty() || name.is_empty() {
            return None;
        }
        Some(Self {
            name: name.to_string(),
            target: target.to_string(),
            icon_class,
            locale: "ru".to_string(),
        })
    }

    pub fn with_locale(mut self, locale: &str) -> Self {
        self.locale = locale.to_string();
        self
    }

    pub fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.target.is_empty()
    }

    /// Key/value pairs of the `[Desktop Entry]` group in output order.
    /// The header itself is not part of the list.
    pub fn fields(&self) -> Vec<(String, String)> {
        vec![
            ("Encoding".to_string(), "UTF-8".to_string()),
            ("Name".to_string(), self.name.clone()),
            ("Type".to_string(), "Link".to_string()),
            ("StartupNotify".to_string(), "true".to_string()),
            ("URL".to_string(), self.target.clone()),
            ("Icon".to_string(), self.icon_class.icon_name().to_string()),
            (format!("Name[{}]", self.locale), self.name.clone()),
            ("NoDisplay".to_string(), "false".to_string()),
            ("Hidden".to_string(), "false".to_string()),
        ]
    }
}

impl fmt::Display for ShortcutRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", HEADER)?;
        for (key, value) in self.fields() {
            writeln!(f, "{}={}", key, value)?;
        }
        Ok(())
    }
}
