use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use scan_api::{Primitive, RawRecord, TaggedValue};

// ═══════════════════════════════════════════════════════════════
//  AttributeValue → TaggedValue
// ═══════════════════════════════════════════════════════════════

pub(crate) fn attribute_to_tagged(value: AttributeValue) -> TaggedValue {
    match value {
        AttributeValue::S(s) => TaggedValue::Scalar(Primitive::String(s)),
        AttributeValue::N(n) => TaggedValue::Scalar(Primitive::Number(n)),
        AttributeValue::Bool(b) => TaggedValue::Scalar(Primitive::Bool(b)),
        AttributeValue::B(b) => TaggedValue::Scalar(Primitive::Binary(b.into_inner())),
        AttributeValue::Null(_) => TaggedValue::Scalar(Primitive::Null),
        AttributeValue::M(fields) => TaggedValue::Record(
            fields
                .into_iter()
                .map(|(k, v)| (k, attribute_to_tagged(v)))
                .collect(),
        ),
        AttributeValue::L(items) => {
            TaggedValue::List(items.into_iter().map(attribute_to_tagged).collect())
        }
        AttributeValue::Ss(items) => scalar_set(items.into_iter().map(Primitive::String).collect()),
        AttributeValue::Ns(items) => scalar_set(items.into_iter().map(Primitive::Number).collect()),
        AttributeValue::Bs(items) => scalar_set(
            items
                .into_iter()
                .map(|b| Primitive::Binary(b.into_inner()))
                .collect(),
        ),
        // AttributeValue is non-exhaustive; newer service types land here.
        other => TaggedValue::Unrecognized(format!("{other:?}")),
    }
}

fn scalar_set(items: Vec<Primitive>) -> TaggedValue {
    let set = TaggedValue::ScalarList(items);
    debug_assert!(
        matches!(&set, TaggedValue::ScalarList(items) if items.is_empty())
            || set.scalar_list_kind().is_some(),
        "set elements must share one kind: {set:?}"
    );
    set
}

pub(crate) fn item_to_record(item: HashMap<String, AttributeValue>) -> RawRecord {
    RawRecord::new(
        item.into_iter()
            .map(|(k, v)| (k, attribute_to_tagged(v)))
            .collect(),
    )
}
