//! Attribute generators - constants and index-aware sequences

use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Produces one attribute value per created record.
///
/// The index is the number of records already in the model's collection,
/// so the first record gets index 0.
#[derive(Clone)]
pub enum AttributeGenerator {
    Constant(Value),
    Sequence(Arc<dyn Fn(usize) -> Value + Send + Sync>),
}

impl AttributeGenerator {
    pub fn constant(value: impl Into<Value>) -> Self {
        Self::Constant(value.into())
    }

    pub fn sequence<F, V>(f: F) -> Self
    where
        F: Fn(usize) -> V + Send + Sync + 'static,
        V: Into<Value>,
    {
        Self::Sequence(Arc::new(move |index| f(index).into()))
    }

    pub fn generate(&self, index: usize) -> Value {
        match self {
            Self::Constant(value) => value.clone(),
            Self::Sequence(f) => f(index),
        }
    }
}

impl fmt::Debug for AttributeGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(value) => f.debug_tuple("Constant").field(value).finish(),
            Self::Sequence(_) => f.write_str("Sequence(<fn>)"),
        }
    }
}

/// Common sequence generators
pub struct Sequence;

impl Sequence {
    /// Replace `{n}` in `template` with the creation index
    pub fn format(template: &str) -> AttributeGenerator {
        let template = template.to_string();
        AttributeGenerator::sequence(move |index| template.replace("{n}", &index.to_string()))
    }

    /// Integers counting up from `start`
    pub fn counter(start: u64) -> AttributeGenerator {
        AttributeGenerator::sequence(move |index| start + index as u64)
    }

    /// Cycle through `values`; an empty list yields null
    pub fn cycle<V: Into<Value> + Clone + Send + Sync + 'static>(values: Vec<V>) -> AttributeGenerator {
        AttributeGenerator::sequence(move |index| {
            if values.is_empty() {
                Value::Null
            } else {
                values[index % values.len()].clone().into()
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_constant() {
        let generator = AttributeGenerator::constant("Yehuda");
        assert_eq!(generator.generate(0), json!("Yehuda"));
        assert_eq!(generator.generate(7), json!("Yehuda"));
    }

    #[test]
    fn test_format_sequence() {
        let generator = Sequence::format("Contact {n}");
        assert_eq!(generator.generate(0), json!("Contact 0"));
        assert_eq!(generator.generate(2), json!("Contact 2"));
    }

    #[test]
    fn test_counter_and_cycle() {
        assert_eq!(Sequence::counter(100).generate(3), json!(103));

        let colors = Sequence::cycle(vec!["red", "green"]);
        assert_eq!(colors.generate(0), json!("red"));
        assert_eq!(colors.generate(3), json!("green"));
        assert_eq!(Sequence::cycle(Vec::<String>::new()).generate(1), Value::Null);
    }

    #[test]
    fn test_debug_hides_closures() {
        let generator = AttributeGenerator::sequence(|i| i as u64);
        assert_eq!(format!("{:?}", generator), "Sequence(<fn>)");
    }
}
