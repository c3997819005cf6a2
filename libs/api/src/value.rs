use std::collections::HashMap;

/// One primitive value as the store holds it.
///
/// Numbers stay in the store's decimal text form; conversion to a
/// JSON number happens at normalization time.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    String(String),
    /// Decimal text, e.g. `"1994"` or `"8.5"`.
    Number(String),
    Bool(bool),
    /// Opaque binary payload.
    Binary(Vec<u8>),
    /// Explicit null attribute.
    Null,
}

/// Kind tag of a `Primitive`, used to check homogeneous lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    String,
    Number,
    Bool,
    Binary,
    Null,
}

impl Primitive {
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Primitive::String(_) => PrimitiveKind::String,
            Primitive::Number(_) => PrimitiveKind::Number,
            Primitive::Bool(_) => PrimitiveKind::Bool,
            Primitive::Binary(_) => PrimitiveKind::Binary,
            Primitive::Null => PrimitiveKind::Null,
        }
    }
}

/// Tagged value representation of a stored attribute.
///
/// Strategy by kind:
/// - `Scalar`: a single primitive
/// - `Record`: nested document, recursive
/// - `List`: heterogeneous ordered list, recursive
/// - `ScalarList`: homogeneous list of primitives (string/number/binary sets)
/// - `Unrecognized`: a kind the store adapter has no mapping for; carries
///   the adapter's textual rendering of it
#[derive(Debug, Clone, PartialEq)]
pub enum TaggedValue {
    Scalar(Primitive),
    Record(HashMap<String, TaggedValue>),
    List(Vec<TaggedValue>),
    ScalarList(Vec<Primitive>),
    Unrecognized(String),
}

impl TaggedValue {
    pub fn string(s: impl Into<String>) -> Self {
        TaggedValue::Scalar(Primitive::String(s.into()))
    }

    pub fn number(n: impl ToString) -> Self {
        TaggedValue::Scalar(Primitive::Number(n.to_string()))
    }

    pub fn bool(b: bool) -> Self {
        TaggedValue::Scalar(Primitive::Bool(b))
    }

    pub fn binary(bytes: impl Into<Vec<u8>>) -> Self {
        TaggedValue::Scalar(Primitive::Binary(bytes.into()))
    }

    pub fn record<K: Into<String>>(fields: impl IntoIterator<Item = (K, TaggedValue)>) -> Self {
        TaggedValue::Record(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Kind shared by every element of a `ScalarList`, `None` for an empty
    /// list, a mixed list, or any other variant.
    pub fn scalar_list_kind(&self) -> Option<PrimitiveKind> {
        let TaggedValue::ScalarList(items) = self else {
            return None;
        };
        let first = items.first()?.kind();
        items.iter().all(|p| p.kind() == first).then_some(first)
    }
}

/// One record returned by a table scan: attribute name → value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    attributes: HashMap<String, TaggedValue>,
}

impl RawRecord {
    pub fn new(attributes: HashMap<String, TaggedValue>) -> Self {
        Self { attributes }
    }

    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }

    pub fn get(&self, name: &str) -> Option<&TaggedValue> {
        self.attributes.get(name)
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &TaggedValue)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn into_attributes(self) -> HashMap<String, TaggedValue> {
        self.attributes
    }
}

impl<K: Into<String>> FromIterator<(K, TaggedValue)> for RawRecord {
    fn from_iter<I: IntoIterator<Item = (K, TaggedValue)>>(iter: I) -> Self {
        Self {
            attributes: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
