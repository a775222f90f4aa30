use crate::{
    core::models::{
        TermField,
        TermRecord,
    },
    parser::CsvTable,
};

pub const SEARCH_LIMIT: usize = 50;

/// The shared, non-editable term dataset loaded from the reference CSVs.
/// User terms are layered on top at search and quiz time, never stored here.
#[derive(Debug, Clone, Default)]
pub struct Glossary {
    entries: Vec<TermRecord>,
}

impl Glossary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_csv(table: &CsvTable, source: &str) -> Self {
        let mut glossary = Self::new();
        glossary.extend_from_csv(table, source);
        glossary
    }

    pub fn extend_from_csv(&mut self, table: &CsvTable, source: &str) {
        let columns: Vec<(String, TermField)> = table
            .headers
            .iter()
            .filter_map(|header| TermField::from_header(header).map(|field| (header.clone(), field)))
            .collect();

        let notes_column =
            table.headers.iter().find(|header| header.trim().eq_ignore_ascii_case("notes")).cloned();

        let before = self.entries.len();
        for row in &table.rows {
            let mut term = TermRecord { source: Some(source.to_string()), ..Default::default() };

            for (header, field) in &columns {
                if let Some(value) = row.get(header).map(|v| v.trim()).filter(|v| !v.is_empty()) {
                    term.set_field(*field, value.to_string());
                }
            }

            if let Some(notes) = notes_column
                .as_ref()
                .and_then(|header| row.get(header))
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
            {
                term.notes = Some(notes.to_string());
            }

            if term.has_translations() {
                self.entries.push(term);
            }
        }

        println!("Glossary: {} entries from dataset '{}'", self.entries.len() - before, source);
    }

    pub fn entries(&self) -> &[TermRecord] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Substring search over base entries and the user's own terms, first
    /// `SEARCH_LIMIT` hits in dataset order.
    pub fn search<'a>(&'a self, query: &str, user_terms: &'a [TermRecord]) -> Vec<&'a TermRecord> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        self.entries
            .iter()
            .chain(user_terms.iter())
            .filter(|term| term.matches(&query))
            .take(SEARCH_LIMIT)
            .collect()
    }
}

/// Stable key for base glossary rows, which never carry an id. Review items
/// reference base terms through this.
pub fn natural_key(term: &TermRecord) -> Option<String> {
    term.field(TermField::English).map(|english| english.trim().to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_csv;

    fn sample() -> Glossary {
        let table = parse_csv(
            "english,deutsch,latin,notes\n\
             kidney,Niere,ren,paired organ\n\
             liver,Leber,hepar,\n\
             ,,,note only\n",
        )
        .unwrap();
        Glossary::from_csv(&table, "medical_terms")
    }

    #[test]
    fn builds_entries_from_aliased_headers() {
        let glossary = sample();

        assert_eq!(glossary.len(), 2);
        let kidney = &glossary.entries()[0];
        assert_eq!(kidney.field(TermField::German), Some("Niere"));
        assert_eq!(kidney.field(TermField::Latin), Some("ren"));
        assert_eq!(kidney.notes.as_deref(), Some("paired organ"));
        assert_eq!(kidney.source.as_deref(), Some("medical_terms"));
        assert!(!kidney.dirty);
    }

    #[test]
    fn search_spans_base_and_user_terms() {
        let glossary = sample();
        let mut mine = TermRecord { dirty: true, ..Default::default() };
        mine.set_field(TermField::English, "heart".to_string());

        let user_terms = vec![mine];
        let hits = glossary.search("hea", &user_terms);

        // "hepar" matches via latin, "heart" via the user term.
        assert_eq!(hits.len(), 2);
        assert!(glossary.search("", &user_terms).is_empty());
    }

    #[test]
    fn natural_key_is_lowercased_english() {
        let glossary = sample();
        assert_eq!(natural_key(&glossary.entries()[0]).as_deref(), Some("kidney"));
        assert_eq!(natural_key(&TermRecord::default()), None);
    }
}
