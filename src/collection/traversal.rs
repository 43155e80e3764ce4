use std::rc::Rc;

use crate::value::Value;

/// How one call walks its collection.
///
/// Sequence-like inputs are walked by index with the length read once;
/// everything else is walked by its own enumerable keys. Values without
/// properties walk nothing.
pub(crate) enum Traversal {
    Indexed(usize),
    Keyed(Vec<Rc<str>>),
}

impl Traversal {
    pub(crate) fn of(collection: &Value) -> Self {
        collection
            .sequence_length()
            .map_or_else(|| Self::Keyed(keys_of(collection)), Self::Indexed)
    }

    pub(crate) fn len(&self) -> usize {
        match self {
            Self::Indexed(length) => *length,
            Self::Keyed(keys) => keys.len(),
        }
    }

    /// The index or key at `position`, as handed to callbacks.
    pub(crate) fn key_at(&self, position: usize) -> Value {
        match self {
            Self::Indexed(_) => Value::from(position),
            Self::Keyed(keys) => Value::from(&keys[position]),
        }
    }

    pub(crate) fn value_at(&self, collection: &Value, position: usize) -> Value {
        match (self, collection) {
            (Self::Indexed(_), Value::Array(array)) => array.get(position),
            (Self::Indexed(_), other) => other.get(&position.to_string()),
            (Self::Keyed(keys), other) => other.get(&keys[position]),
        }
    }

    /// `(value, key)` pairs in traversal order.
    pub(crate) fn entries<'a>(
        &'a self,
        collection: &'a Value,
    ) -> impl DoubleEndedIterator<Item = (Value, Value)> + 'a {
        (0..self.len()).map(move |position| {
            (self.value_at(collection, position), self.key_at(position))
        })
    }
}

/// Own enumerable keys of a value that can carry properties.
pub(crate) fn keys_of(value: &Value) -> Vec<Rc<str>> {
    if value.is_object() {
        value.own_keys()
    } else {
        Vec::new()
    }
}

/// The elements of a sequence-like value, or the own values of a record.
pub(crate) fn values_of(collection: &Value) -> Vec<Value> {
    match collection {
        Value::Array(array) => array.to_vec(),
        Value::String(text) => text.chars().map(|character| Value::from(character.to_string())).collect(),
        other => {
            let traversal = Traversal::of(other);
            (0..traversal.len())
                .map(|position| traversal.value_at(other, position))
                .collect()
        }
    }
}

/// The elements of a sequence-like value; nothing for anything else.
pub(crate) fn elements_of(sequence: &Value) -> Vec<Value> {
    if sequence.is_sequence_like() {
        values_of(sequence)
    } else {
        Vec::new()
    }
}
