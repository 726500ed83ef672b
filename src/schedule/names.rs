use std::collections::HashMap;

/// Converts a raw name into its comparison key: lowercase with every
/// whitespace character removed, so "Ann  Lee" and "annlee" match.
pub fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Everyone known to the run, keyed by normalized name
#[derive(Debug, Clone, Default)]
pub struct NameBook {
    keys: Vec<String>,
    display: HashMap<String, String>,
}

impl NameBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a raw name and returns its key. Blank names are ignored.
    /// The first spelling seen for a key is the one shown in output.
    pub fn insert(&mut self, raw: &str) -> Option<String> {
        let key = normalize(raw);
        if key.is_empty() {
            return None;
        }
        if !self.display.contains_key(&key) {
            self.display.insert(key.clone(), raw.trim().to_string());
            self.keys.push(key.clone());
        }
        Some(key)
    }

    /// Display name for a key, or the key itself if it was never recorded
    pub fn display<'a>(&'a self, key: &'a str) -> &'a str {
        self.display.get(key).map(String::as_str).unwrap_or(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.display.contains_key(key)
    }

    /// All keys in first-seen order
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
