use crate::core::value::Value;

/// One suggestion: what is shown, what lands in the field, and the payload
/// that came with it.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub label: String,
    pub value: String,
    pub data: Value,
}

impl Candidate {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        let label = label.into();
        let value = value.into();
        Self {
            data: Value::Text(value.clone()),
            label,
            value,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        let text = text.into();
        Self::new(text.clone(), text)
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = data;
        self
    }

    /// Builds a candidate from a decoded payload.
    ///
    /// Text becomes a plain candidate. Objects use their `label` and `value`
    /// keys, either one standing in for the other when missing. Other
    /// scalars use their text form. Lists and nulls have no display text.
    pub fn from_value(data: Value) -> Option<Self> {
        match &data {
            Value::Text(text) => Some(Self::plain(text.clone())),
            Value::Object(_) => {
                let label = data.get("label").and_then(Value::to_text_scalar);
                let value = data.get("value").and_then(Value::to_text_scalar);
                let (label, value) = match (label, value) {
                    (Some(label), Some(value)) => (label, value),
                    (Some(label), None) => (label.clone(), label),
                    (None, Some(value)) => (value.clone(), value),
                    (None, None) => return None,
                };
                Some(Self::new(label, value).with_data(data))
            }
            _ => {
                let text = data.to_text_scalar()?;
                Some(Self::plain(text).with_data(data))
            }
        }
    }
}

impl From<&str> for Candidate {
    fn from(value: &str) -> Self {
        Self::plain(value)
    }
}

impl From<String> for Candidate {
    fn from(value: String) -> Self {
        Self::plain(value)
    }
}

/// Ordered, size-bounded result of one evaluation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SuggestionSet {
    items: Vec<Candidate>,
}

impl SuggestionSet {
    pub fn new(items: Vec<Candidate>) -> Self {
        Self { items }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Candidate> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Candidate> {
        self.items.iter()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.label.as_str()).collect()
    }
}

impl From<Vec<Candidate>> for SuggestionSet {
    fn from(items: Vec<Candidate>) -> Self {
        Self::new(items)
    }
}

#[cfg(test)]
mod tests {
    use super::Candidate;
    use crate::core::value::Value;

    #[test]
    fn object_payload_uses_label_and_value() {
        let json: serde_json::Value =
            serde_json::from_str(r#"{"label":"Pear (fruit)","value":"pear"}"#).expect("json");
        let candidate = Candidate::from_value(Value::from(json)).expect("candidate");
        assert_eq!(candidate.label, "Pear (fruit)");
        assert_eq!(candidate.value, "pear");
        assert!(matches!(candidate.data, Value::Object(_)));
    }

    #[test]
    fn object_without_value_falls_back_to_label() {
        let json: serde_json::Value = serde_json::from_str(r#"{"label":"plum"}"#).expect("json");
        let candidate = Candidate::from_value(Value::from(json)).expect("candidate");
        assert_eq!(candidate.value, "plum");
    }

    #[test]
    fn numbers_become_text_and_lists_are_dropped() {
        let candidate = Candidate::from_value(Value::Number(42)).expect("candidate");
        assert_eq!(candidate.label, "42");
        assert_eq!(candidate.data, Value::Number(42));
        assert!(Candidate::from_value(Value::List(Vec::new())).is_none());
        assert!(Candidate::from_value(Value::None).is_none());
    }
}
