// ABOUTME: Shortcode-style option parser for merge tag modifiers
// ABOUTME: Turns `step_id=2 display_name="true"` into typed values merged over declared defaults

use std::collections::HashMap;

use super::error::{AttributeError, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Null,
    Bool(bool),
    Text(String),
}

impl AttrValue {
    /// Host truthiness: empty strings and `"0"` are false.
    pub fn is_truthy(&self) -> bool {
        match self {
            AttrValue::Null => false,
            AttrValue::Bool(value) => *value,
            AttrValue::Text(text) => !(text.is_empty() || text == "0"),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttrValue::Text(text) => Some(text),
            _ => None,
        }
    }

    fn from_raw(raw: String) -> Self {
        if raw.eq_ignore_ascii_case("true") {
            AttrValue::Bool(true)
        } else if raw.eq_ignore_ascii_case("false") {
            AttrValue::Bool(false)
        } else {
            AttrValue::Text(raw)
        }
    }
}

/// Parsed options, restricted to the keys declared as defaults.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Attributes {
    values: HashMap<String, AttrValue>,
}

impl Attributes {
    pub fn from_defaults(defaults: &[(&str, AttrValue)]) -> Self {
        Self {
            values: defaults
                .iter()
                .map(|(key, value)| (key.to_string(), value.clone()))
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> &AttrValue {
        self.values.get(key).unwrap_or(&AttrValue::Null)
    }

    pub fn flag(&self, key: &str) -> bool {
        self.get(key).is_truthy()
    }
}

/// Parse a modifier string over `defaults`.
///
/// Unknown keys and bare positional words are dropped.
pub fn parse_attributes(modifiers: &str, defaults: &[(&str, AttrValue)]) -> Result<Attributes> {
    let mut attributes = Attributes::from_defaults(defaults);

    for (key, raw) in tokenize(modifiers)? {
        if let Some(slot) = attributes.values.get_mut(&key) {
            *slot = AttrValue::from_raw(raw);
        }
    }

    Ok(attributes)
}

fn is_key_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-'
}

fn tokenize(input: &str) -> Result<Vec<(String, String)>> {
    let chars: Vec<char> = input.chars().collect();
    let mut pairs = Vec::new();
    let mut pos = 0;

    while pos < chars.len() {
        if chars[pos].is_whitespace() {
            pos += 1;
            continue;
        }

        if chars[pos] == '=' {
            return Err(AttributeError::MissingKey { position: pos });
        }

        if chars[pos] == '"' || chars[pos] == '\'' {
            // Quoted positional atom
            let (_, next) = read_quoted(&chars, pos)?;
            pos = next;
            continue;
        }

        let start = pos;
        while pos < chars.len() && is_key_char(chars[pos]) {
            pos += 1;
        }
        if pos == start {
            // Bare positional atom made of other characters
            while pos < chars.len() && !chars[pos].is_whitespace() {
                pos += 1;
            }
            continue;
        }
        let key: String = chars[start..pos].iter().collect();

        let mut lookahead = pos;
        while lookahead < chars.len() && chars[lookahead].is_whitespace() {
            lookahead += 1;
        }
        if lookahead >= chars.len() || chars[lookahead] != '=' {
            // Positional atom
            while pos < chars.len() && !chars[pos].is_whitespace() {
                pos += 1;
            }
            continue;
        }

        pos = lookahead + 1;
        while pos < chars.len() && chars[pos].is_whitespace() {
            pos += 1;
        }

        let value = if pos < chars.len() && (chars[pos] == '"' || chars[pos] == '\'') {
            let (value, next) = read_quoted(&chars, pos)?;
            pos = next;
            value
        } else {
            let value_start = pos;
            while pos < chars.len() && !chars[pos].is_whitespace() {
                pos += 1;
            }
            chars[value_start..pos].iter().collect()
        };

        pairs.push((key.to_lowercase(), value));
    }

    Ok(pairs)
}

fn read_quoted(chars: &[char], start: usize) -> Result<(String, usize)> {
    let quote = chars[start];
    let mut pos = start + 1;
    while pos < chars.len() && chars[pos] != quote {
        pos += 1;
    }
    if pos >= chars.len() {
        return Err(AttributeError::UnterminatedQuote { position: start });
    }
    Ok((chars[start + 1..pos].iter().collect(), pos + 1))
}
