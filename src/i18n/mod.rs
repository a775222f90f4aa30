use std::collections::HashMap;

use crate::{
    core::models::Language,
    parser::CsvTable,
};

/// Built-in English strings. Other languages come from the translations
/// reference CSV and overlay these at load time.
const ENGLISH: &[(&str, &str)] = &[
    ("app_title", "Medical Dictionary"),
    ("logged_in_as", "Logged in as:"),
    ("settings", "Settings"),
    ("language", "Language"),
    ("account_sync", "Account & Sync"),
    ("sync", "Sync"),
    ("back_to_language_menu", "Back to Language Menu"),
    ("return_to_login", "Return to Login"),
    ("choose_language", "Choose language"),
    ("may_change_later", "May later change in settings"),
    ("login", "Login"),
    ("register", "Register"),
    ("continue_without_account", "Continue without account"),
    ("please_note", "Please note: This version is still in development…"),
    ("login_or_register", "Login or Register"),
    ("back", "Back"),
    ("welcome", "Welcome"),
    ("search_terms", "Search Terms"),
    ("add_term", "Add Term"),
    ("quiz", "Quiz"),
    ("search", "Search"),
    ("save_term", "Save Term"),
    ("start", "Start"),
    ("notes", "Notes"),
    ("login_required", "Login required"),
    ("sync_in_progress", "Syncing…"),
    ("sync_done", "Synced"),
    ("last_sync", "Last sync"),
    ("never", "Never"),
    ("sign_out", "Sign out"),
    ("unsynced_changes", "Unsynced changes"),
    ("term_saved", "Term saved"),
    ("nothing_to_save", "Nothing to save"),
    ("no_matches", "No matches"),
    ("offline_mode", "No backend configured, working locally"),
    ("quiz_empty", "Not enough data for a quiz"),
    ("quiz_next", "Next"),
    ("quiz_done", "Quiz finished"),
    ("quiz_score", "Score"),
    ("identifier", "Username or email"),
    ("secret", "Password"),
];

#[derive(Debug, Clone)]
pub struct Translations {
    tables: HashMap<Language, HashMap<String, String>>,
}

impl Translations {
    pub fn builtin() -> Self {
        let english = ENGLISH
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect::<HashMap<_, _>>();

        let mut tables = HashMap::new();
        tables.insert(Language::English, english);
        Self { tables }
    }

    /// Overlays strings from the translations CSV: a `key` column plus one
    /// column per language code. Empty cells leave earlier values in place.
    pub fn merge_csv(&mut self, table: &CsvTable) {
        for row in &table.rows {
            let Some(key) = row.get("key").map(|k| k.trim()).filter(|k| !k.is_empty()) else {
                continue;
            };

            for language in Language::ALL {
                if let Some(value) = row.get(language.code()).map(|v| v.trim()) {
                    if !value.is_empty() {
                        self.tables
                            .entry(language)
                            .or_default()
                            .insert(key.to_string(), value.to_string());
                    }
                }
            }
        }
    }

    /// Lookup with fallback: requested language, then English, then the raw
    /// key itself.
    pub fn text(&self, language: Language, key: &str) -> String {
        self.tables
            .get(&language)
            .and_then(|table| table.get(key))
            .or_else(|| self.tables.get(&Language::English).and_then(|table| table.get(key)))
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

impl Default for Translations {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_csv;

    #[test]
    fn falls_back_to_english_then_key() {
        let translations = Translations::builtin();

        assert_eq!(translations.text(Language::German, "quiz"), "Quiz");
        assert_eq!(translations.text(Language::Slovak, "no_such_key"), "no_such_key");
    }

    #[test]
    fn csv_overlay_wins_for_its_language() {
        let table = parse_csv("key,en,de,sk\nquiz,Quiz,Quiz,Kvíz\nsearch,Search,Suche,\n").unwrap();

        let mut translations = Translations::builtin();
        translations.merge_csv(&table);

        assert_eq!(translations.text(Language::Slovak, "quiz"), "Kvíz");
        assert_eq!(translations.text(Language::German, "search"), "Suche");
        // Empty cell: Slovak falls back to English.
        assert_eq!(translations.text(Language::Slovak, "search"), "Search");
    }
}
