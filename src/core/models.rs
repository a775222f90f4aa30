use chrono::{
    DateTime,
    Utc,
};
use serde::{
    Deserialize,
    Serialize,
};

/// UI languages offered on the language screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    English,
    German,
    Slovak,
    Spanish,
    Norwegian,
    Icelandic,
}

impl Language {
    pub const ALL: [Language; 6] = [
        Language::English,
        Language::German,
        Language::Slovak,
        Language::Spanish,
        Language::Norwegian,
        Language::Icelandic,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::German => "de",
            Language::Slovak => "sk",
            Language::Spanish => "es",
            Language::Norwegian => "no",
            Language::Icelandic => "is",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::German => "Deutsch",
            Language::Slovak => "Slovensky",
            Language::Spanish => "Español",
            Language::Norwegian => "Norsk",
            Language::Icelandic => "Íslenska",
        }
    }

    pub fn from_code(code: &str) -> Option<Language> {
        Language::ALL.into_iter().find(|language| language.code() == code)
    }

    /// Glossary column that holds this language's translations.
    pub fn term_field(&self) -> TermField {
        match self {
            Language::English => TermField::English,
            Language::German => TermField::German,
            Language::Slovak => TermField::Slovak,
            Language::Spanish => TermField::Spanish,
            Language::Norwegian => TermField::Norwegian,
            Language::Icelandic => TermField::Icelandic,
        }
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::English
    }
}

/// Translation columns of a term record. Latin is a glossary column only,
/// not a UI language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TermField {
    English,
    German,
    Latin,
    Slovak,
    Spanish,
    Norwegian,
    Icelandic,
}

impl TermField {
    pub const ALL: [TermField; 7] = [
        TermField::English,
        TermField::German,
        TermField::Latin,
        TermField::Slovak,
        TermField::Spanish,
        TermField::Norwegian,
        TermField::Icelandic,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TermField::English => "English",
            TermField::German => "German",
            TermField::Latin => "Latin",
            TermField::Slovak => "Slovak",
            TermField::Spanish => "Spanish",
            TermField::Norwegian => "Norwegian",
            TermField::Icelandic => "Icelandic",
        }
    }

    /// Maps a CSV header to its column, accepting the spellings the reference
    /// files have used over time.
    pub fn from_header(header: &str) -> Option<TermField> {
        match header.trim().to_lowercase().as_str() {
            "english" | "en" => Some(TermField::English),
            "german" | "deutsch" | "de" => Some(TermField::German),
            "latin" | "la" => Some(TermField::Latin),
            "slovak" | "slovensky" | "sk" => Some(TermField::Slovak),
            "spanish" | "español" | "espanol" | "es" => Some(TermField::Spanish),
            "norwegian" | "norsk" | "no" => Some(TermField::Norwegian),
            "icelandic" | "íslenska" | "islenska" | "is" => Some(TermField::Icelandic),
            _ => None,
        }
    }
}

/// One dictionary entry: translations of a medical term plus bookkeeping for
/// the sync reconciler. Base glossary rows and user-created terms share this
/// shape; base rows are never dirty and never carry an id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TermRecord {
    pub id: Option<String>,
    pub english: Option<String>,
    pub german: Option<String>,
    pub latin: Option<String>,
    pub slovak: Option<String>,
    pub spanish: Option<String>,
    pub norwegian: Option<String>,
    pub icelandic: Option<String>,
    pub notes: Option<String>,
    pub source: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub dirty: bool,
}

impl TermRecord {
    pub fn field(&self, field: TermField) -> Option<&str> {
        let value = match field {
            TermField::English => &self.english,
            TermField::German => &self.german,
            TermField::Latin => &self.latin,
            TermField::Slovak => &self.slovak,
            TermField::Spanish => &self.spanish,
            TermField::Norwegian => &self.norwegian,
            TermField::Icelandic => &self.icelandic,
        };
        value.as_deref()
    }

    pub fn set_field(&mut self, field: TermField, value: String) {
        let slot = match field {
            TermField::English => &mut self.english,
            TermField::German => &mut self.german,
            TermField::Latin => &mut self.latin,
            TermField::Slovak => &mut self.slovak,
            TermField::Spanish => &mut self.spanish,
            TermField::Norwegian => &mut self.norwegian,
            TermField::Icelandic => &mut self.icelandic,
        };
        *slot = Some(value);
    }

    pub fn has_translations(&self) -> bool {
        TermField::ALL.iter().any(|field| {
            self.field(*field).map(|value| !value.trim().is_empty()).unwrap_or(false)
        })
    }

    /// Case-insensitive substring match across every column. `query` must
    /// already be lowercased.
    pub fn matches(&self, query: &str) -> bool {
        let field_hit = TermField::ALL.iter().any(|field| {
            self.field(*field).map(|value| value.to_lowercase().contains(query)).unwrap_or(false)
        });

        field_hit
            || self.notes.as_deref().map(|n| n.to_lowercase().contains(query)).unwrap_or(false)
    }
}

/// Per-term review bookkeeping, stored for spaced-repetition scheduling that
/// lives upstream. Links to a term either by id or, for base glossary rows
/// that have none, by natural key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub id: Option<String>,
    pub term_id: Option<String>,
    pub term_key: Option<String>,
    pub difficulty: Option<f32>,
    pub last_seen: Option<DateTime<Utc>>,
    pub next_due: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub dirty: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_codes_round_trip() {
        for language in Language::ALL {
            assert_eq!(Language::from_code(language.code()), Some(language));
        }
        assert_eq!(Language::from_code("fr"), None);
    }

    #[test]
    fn header_aliases_map_to_columns() {
        assert_eq!(TermField::from_header("Deutsch"), Some(TermField::German));
        assert_eq!(TermField::from_header(" english "), Some(TermField::English));
        assert_eq!(TermField::from_header("Norsk"), Some(TermField::Norwegian));
        assert_eq!(TermField::from_header("id"), None);
    }

    #[test]
    fn term_matches_any_column() {
        let mut term = TermRecord::default();
        term.set_field(TermField::Latin, "Ren".to_string());
        term.notes = Some("paired organ".to_string());

        assert!(term.matches("ren"));
        assert!(term.matches("paired"));
        assert!(!term.matches("kidney"));
    }
}
