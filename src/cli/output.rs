use std::fmt;
use std::sync::RwLock;

use colored::Colorize;
use once_cell::sync::Lazy;

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
    Hint,
    Section,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct OutputPreferences {
    /// Drop labels and colours; print message text only.
    pub plain_mode: bool,
    pub color_enabled: bool,
}

static PREFERENCES: Lazy<RwLock<OutputPreferences>> = Lazy::new(|| {
    RwLock::new(OutputPreferences {
        plain_mode: false,
        color_enabled: true,
    })
});

pub fn set_preferences(prefs: OutputPreferences) {
    if let Ok(mut guard) = PREFERENCES.write() {
        *guard = prefs;
    }
    if !prefs.color_enabled || prefs.plain_mode {
        colored::control::set_override(false);
    } else {
        colored::control::unset_override();
    }
}

pub fn preferences() -> OutputPreferences {
    PREFERENCES
        .read()
        .map(|guard| *guard)
        .unwrap_or_default()
}

fn label(kind: MessageKind) -> &'static str {
    match kind {
        MessageKind::Info => "INFO: [i]",
        MessageKind::Success => "SUCCESS: [ok]",
        MessageKind::Warning => "WARNING: [!]",
        MessageKind::Error => "ERROR: [x]",
        MessageKind::Hint => "HINT:",
        MessageKind::Section => "",
    }
}

pub(crate) fn format_message(
    kind: MessageKind,
    message: impl fmt::Display,
    prefs: &OutputPreferences,
) -> String {
    let text = message.to_string();
    if prefs.plain_mode {
        return match kind {
            MessageKind::Section => text.trim().to_string(),
            _ => text,
        };
    }

    let formatted = match kind {
        MessageKind::Section => format!("=== {} ===", text.trim()),
        _ => format!("{} {}", label(kind), text),
    };

    match kind {
        MessageKind::Success => formatted.bright_green().to_string(),
        MessageKind::Warning => formatted.bright_yellow().to_string(),
        MessageKind::Error => formatted.bright_red().to_string(),
        MessageKind::Hint => formatted.bright_cyan().to_string(),
        MessageKind::Section => formatted.bold().to_string(),
        MessageKind::Info => formatted,
    }
}

pub fn print(kind: MessageKind, message: impl fmt::Display) {
    let formatted = format_message(kind, message, &preferences());
    match kind {
        MessageKind::Section => println!("\n{}", formatted),
        _ => println!("{}", formatted),
    }
}

pub fn info(message: impl fmt::Display) {
    print(MessageKind::Info, message);
}

pub fn success(message: impl fmt::Display) {
    print(MessageKind::Success, message);
}

pub fn warning(message: impl fmt::Display) {
    print(MessageKind::Warning, message);
}

pub fn error(message: impl fmt::Display) {
    print(MessageKind::Error, message);
}

pub fn hint(message: impl fmt::Display) {
    print(MessageKind::Hint, message);
}

pub fn section(title: impl fmt::Display) {
    print(MessageKind::Section, title);
}

/// Bold, used for table headers.
pub fn emphasize(text: &str) -> String {
    if preferences().plain_mode {
        text.to_string()
    } else {
        text.bold().to_string()
    }
}

/// Highlight for selected table rows.
pub fn highlight(text: &str) -> String {
    if preferences().plain_mode {
        text.to_string()
    } else {
        text.reversed().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_mode_drops_labels() {
        let prefs = OutputPreferences {
            plain_mode: true,
            color_enabled: false,
        };
        assert_eq!(format_message(MessageKind::Error, "boom", &prefs), "boom");
        assert_eq!(format_message(MessageKind::Section, " Totals ", &prefs), "Totals");
    }

    #[test]
    fn labels_prefix_messages() {
        let prefs = OutputPreferences {
            plain_mode: false,
            color_enabled: false,
        };
        assert_eq!(
            format_message(MessageKind::Info, "loaded", &prefs),
            "INFO: [i] loaded"
        );
    }
}
