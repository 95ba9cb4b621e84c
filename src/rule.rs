//! Rule definition and loading

use crate::config::ConfigError;
use crate::document::Element;
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::path::Path;

/// Wildcard accepted in attribute conditions
pub const WILDCARD: &str = "*";

/// Expected value of a single attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    /// Attribute present with any non-empty value (`"*"`)
    Any,
    /// Attribute present and equal to this literal
    Exact(String),
}

impl AttrValue {
    /// Check an attribute value (as found on an element) against this expectation
    pub fn matches(&self, actual: Option<&str>) -> bool {
        match self {
            AttrValue::Any => actual.is_some_and(|v| !v.is_empty()),
            AttrValue::Exact(expected) => actual == Some(expected.as_str()),
        }
    }

    /// The literal as written in the rule
    pub fn as_str(&self) -> &str {
        match self {
            AttrValue::Any => WILDCARD,
            AttrValue::Exact(v) => v,
        }
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        if s == WILDCARD {
            AttrValue::Any
        } else {
            AttrValue::Exact(s.to_string())
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered attribute conditions (`all` / `contain` payloads)
///
/// Declaration order is kept because it shows up in diagnostic messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conditions(Vec<(String, AttrValue)>);

impl Conditions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a condition (builder style)
    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.insert(name, value);
        self
    }

    /// Add or replace a condition, keeping the original position on replace
    pub fn insert(&mut self, name: &str, value: &str) {
        let value = AttrValue::from(value);
        match self.0.iter_mut().find(|(k, _)| k == name) {
            Some(entry) => entry.1 = value,
            None => self.0.push((name.to_string(), value)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    /// True when the element satisfies every condition
    pub fn is_satisfied_by(&self, element: &dyn Element) -> bool {
        self.0
            .iter()
            .all(|(name, expected)| expected.matches(element.attr(name)))
    }
}

impl Serialize for Conditions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value.as_str())?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Conditions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ConditionsVisitor;

        impl<'de> Visitor<'de> for ConditionsVisitor {
            type Value = Conditions;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a mapping of attribute name to value or \"*\"")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Conditions, A::Error> {
                let mut conditions = Conditions::new();
                while let Some((name, value)) = access.next_entry::<String, ScalarText>()? {
                    conditions.insert(&name, &value.0);
                }
                Ok(conditions)
            }
        }

        deserializer.deserialize_map(ConditionsVisitor)
    }
}

/// A condition value written as a string, number or boolean, kept as text
struct ScalarText(String);

impl<'de> Deserialize<'de> for ScalarText {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ScalarVisitor;

        impl<'de> Visitor<'de> for ScalarVisitor {
            type Value = ScalarText;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string, number or boolean")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<ScalarText, E> {
                Ok(ScalarText(v.to_string()))
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<ScalarText, E> {
                Ok(ScalarText(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<ScalarText, E> {
                Ok(ScalarText(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<ScalarText, E> {
                Ok(ScalarText(v.to_string()))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<ScalarText, E> {
                Ok(ScalarText(v.to_string()))
            }
        }

        deserializer.deserialize_any(ScalarVisitor)
    }
}

/// Cardinality bounds; 0 disables a side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limit {
    pub min: usize,
    pub max: usize,
}

impl Limit {
    pub fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    pub fn at_least(min: usize) -> Self {
        Self { min, max: 0 }
    }

    pub fn at_most(max: usize) -> Self {
        Self { min: 0, max }
    }
}

/// A single SEO rule
///
/// The shape keys (`all`, `contain`, `limit`) decide which handlers pick the
/// rule up. A rule without any of them is valid and simply never reports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Selector for the target elements (e.g. "img", "head title")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,

    /// Every matched element must carry all of these attributes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all: Option<Conditions>,

    /// At least one matched element must carry all of these attributes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contain: Option<Conditions>,

    /// Bounds on the number of matched elements
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<Limit>,
}

impl Rule {
    /// Create a rule for a selector with no shape yet
    pub fn new(tag: &str) -> Self {
        Self {
            tag: Some(tag.to_string()),
            ..Self::default()
        }
    }

    pub fn with_all(mut self, conditions: Conditions) -> Self {
        self.all = Some(conditions);
        self
    }

    pub fn with_contain(mut self, conditions: Conditions) -> Self {
        self.contain = Some(conditions);
        self
    }

    pub fn with_limit(mut self, limit: Limit) -> Self {
        self.limit = Some(limit);
        self
    }

    /// The selector, if it is set and non-empty
    pub fn selector(&self) -> Option<&str> {
        self.tag.as_deref().filter(|t| !t.is_empty())
    }

    /// Name used in messages: last space-separated token of the selector
    pub fn display_name(&self) -> &str {
        self.tag
            .as_deref()
            .and_then(|t| t.rsplit(' ').next())
            .unwrap_or_default()
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag.as_deref().unwrap_or("(no tag)"))?;
        if let Some(all) = &self.all {
            let keys: Vec<_> = all.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
            write!(f, " all[{}]", keys.join(", "))?;
        }
        if let Some(contain) = &self.contain {
            let keys: Vec<_> = contain
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect();
            write!(f, " contain[{}]", keys.join(", "))?;
        }
        if let Some(limit) = &self.limit {
            write!(f, " limit[min={}, max={}]", limit.min, limit.max)?;
        }
        Ok(())
    }
}

/// Wrapped rule file form: a mapping with a `rules` key
#[derive(Deserialize)]
struct RuleFile {
    rules: Vec<Rule>,
}

/// Load a rule set from a YAML or JSON file
///
/// The file is either a bare list of rules or a mapping with a `rules` key.
pub fn load_rules(path: &Path) -> Result<Vec<Rule>, ConfigError> {
    let content = std::fs::read_to_string(path)?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    let rules: Vec<Rule> = match ext {
        "yaml" | "yml" => {
            let value: serde_yaml::Value = serde_yaml::from_str(&content)?;
            if value.is_sequence() {
                serde_yaml::from_value(value)?
            } else {
                serde_yaml::from_value::<RuleFile>(value)?.rules
            }
        }
        "json" => {
            let value: serde_json::Value = serde_json::from_str(&content)?;
            if value.is_array() {
                serde_json::from_value(value)?
            } else {
                serde_json::from_value::<RuleFile>(value)?.rules
            }
        }
        _ => {
            return Err(ConfigError::Invalid(format!(
                "Unknown rules file format: {}",
                ext
            )))
        }
    };

    log::debug!("Loaded {} rules from {}", rules.len(), path.display());
    Ok(rules)
}
