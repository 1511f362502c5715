use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::engine::{Bootstrap, Resources, VocabularyKind};
use crate::unescape::unescape;

lazy_static! {
    /// Editor option names mapped to the names the engine's profiles use.
    static ref PROFILE_KEYS: BTreeMap<&'static str, &'static str> = [
        ("tagCase", "tag_case"),
        ("attrCase", "attr_case"),
        ("attrQuotes", "attr_quotes"),
        ("tagNewline", "tag_nl"),
        ("placeCaret", "place_cursor"),
        ("indentTags", "indent"),
        ("inlineBreak", "inline_break"),
        ("selfClosing", "self_closing_tag"),
        ("filters", "filters"),
    ]
    .into_iter()
    .collect();
}

pub type SyntaxProfiles = BTreeMap<String, BTreeMap<String, Value>>;
pub type VariableTable = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnippetKind {
    Snippet,
    Abbreviation,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SyntaxSnippets {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippets: Option<BTreeMap<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abbreviations: Option<BTreeMap<String, Value>>,
}

impl SyntaxSnippets {
    fn table_mut(&mut self, kind: SnippetKind) -> &mut BTreeMap<String, Value> {
        match kind {
            SnippetKind::Snippet => self.snippets.get_or_insert_with(BTreeMap::new),
            SnippetKind::Abbreviation => {
                self.abbreviations.get_or_insert_with(BTreeMap::new)
            }
        }
    }
}

/// Snippets and abbreviations per syntax, plus the user's variables which
/// the engine expects under the `variables` key next to the syntaxes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SnippetTable {
    #[serde(flatten)]
    pub syntaxes: BTreeMap<String, SyntaxSnippets>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<VariableTable>,
}

impl SnippetTable {
    pub fn insert(
        &mut self,
        syntax: &str,
        kind: SnippetKind,
        key: &str,
        value: Value,
    ) {
        self.syntaxes
            .entry(syntax.to_owned())
            .or_default()
            .table_mut(kind)
            .insert(key.to_owned(), value);
    }
}

/// User configuration in the shape the engine bootstrap consumes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub syntax_profiles: Option<SyntaxProfiles>,
    pub snippets: SnippetTable,
}

impl UserData {
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Parse a structured-text payload. Malformed text is logged and read as an
/// empty object.
pub fn parse_payload(text: &str) -> Value {
    match serde_json::from_str(text) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("Error while parsing payload: {}", e);
            Value::Object(Map::new())
        }
    }
}

/// Reshape a raw user-data payload.
pub fn normalize_user_data(payload: &Value) -> UserData {
    let empty = Map::new();
    let payload = match payload {
        Value::Object(map) => map,
        other => {
            log::warn!("user data must be an object, got {}", other);
            &empty
        }
    };

    let syntax_profiles = payload.get("profiles").map(normalize_profiles);

    let mut snippets = SnippetTable::default();
    fold_snippets(&mut snippets, payload.get("snippets"), SnippetKind::Snippet);
    fold_snippets(
        &mut snippets,
        payload.get("abbreviations"),
        SnippetKind::Abbreviation,
    );
    snippets.variables = payload.get("variables").map(normalize_variables);

    UserData {
        syntax_profiles,
        snippets,
    }
}

fn normalize_profiles(profiles: &Value) -> SyntaxProfiles {
    let mut result = SyntaxProfiles::new();
    let Some(profiles) = profiles.as_object() else {
        log::warn!("profiles must be an object, got {}", profiles);
        return result;
    };

    for (syntax, profile) in profiles {
        let Some(profile) = profile.as_object() else {
            log::warn!("profile for {} is not an object, skipping", syntax);
            continue;
        };

        let mut options = BTreeMap::new();
        for (key, value) in profile {
            match PROFILE_KEYS.get(key.as_str()) {
                Some(name) => {
                    options.insert((*name).to_owned(), value.clone());
                }
                None => log::warn!(
                    "unknown profile option {} for {}, dropping it",
                    key,
                    syntax
                ),
            }
        }
        result.insert(syntax.clone(), options);
    }

    result
}

fn fold_snippets(table: &mut SnippetTable, items: Option<&Value>, kind: SnippetKind) {
    let Some(items) = items else {
        return;
    };
    let Some(items) = items.as_array() else {
        log::warn!("{:?} list must be an array, got {}", kind, items);
        return;
    };

    for item in items {
        match triple(item) {
            Some((syntax, key, value)) => {
                table.insert(&syntax, kind, &key, value.clone())
            }
            None => log::warn!("malformed {:?} entry {}, skipping", kind, item),
        }
    }
}

fn normalize_variables(variables: &Value) -> VariableTable {
    let mut result = VariableTable::new();
    let Some(items) = variables.as_array() else {
        log::warn!("variables must be an array, got {}", variables);
        return result;
    };

    for item in items {
        match triple(item) {
            Some((_, name, raw)) => {
                result.insert(name, unescape(&scalar_to_string(raw)));
            }
            None => log::warn!("malformed variable entry {}, skipping", item),
        }
    }

    result
}

/// Split a `[a, b, c]` entry, stringifying the first two members.
fn triple(item: &Value) -> Option<(String, String, &Value)> {
    match item.as_array()?.as_slice() {
        [first, second, third, ..] => {
            Some((scalar_to_string(first), scalar_to_string(second), third))
        }
        _ => None,
    }
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Coerce an editor preference string into the value the engine expects:
/// booleans, leading integers, or the lower-cased text.
pub fn coerce_option(raw: &str) -> Value {
    let lowered = raw.to_lowercase();
    match lowered.as_str() {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }

    match leading_integer(&lowered) {
        Some(number) => Value::from(number),
        None => Value::String(lowered),
    }
}

fn leading_integer(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let digits_start = usize::from(text.starts_with(['-', '+']));
    let digits_len = text[digits_start..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits_len == 0 {
        return None;
    }
    text[..digits_start + digits_len].parse().ok()
}

/// Feeds host payloads into the engine.
pub struct ConfigLoader<'a, R, B> {
    resources: &'a mut R,
    bootstrap: &'a mut B,
}

impl<'a, R: Resources, B: Bootstrap> ConfigLoader<'a, R, B> {
    pub fn new(resources: &'a mut R, bootstrap: &'a mut B) -> Self {
        Self {
            resources,
            bootstrap,
        }
    }

    /// Register the host's built-in snippets. An empty payload is ignored.
    pub fn load_snippets(&mut self, payload: &str) {
        if payload.is_empty() {
            return;
        }
        let vocabulary = parse_payload(payload);
        log::debug!("registering {} vocabulary", VocabularyKind::System.as_str());
        self.resources
            .set_vocabulary(vocabulary, VocabularyKind::System);
    }

    pub fn load_user_data(&mut self, payload: &str) {
        let data = normalize_user_data(&parse_payload(payload));
        self.bootstrap.load_user_data(data);
    }

    pub fn load_extensions(&mut self, payload: &str) {
        self.bootstrap
            .load_extensions(parse_payload(payload));
    }
}
