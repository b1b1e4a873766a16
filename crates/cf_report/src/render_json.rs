//! render_json.rs — Report JSON renderer (title → result → categories → total → dominant).
//!
//! Object key order is part of the output contract: this crate enables
//! `serde_json`'s `preserve_order`, and the renderer relies on the insertion
//! order of `serde_json::Map<String, Value>`.

use serde_json::{Map as JsonMap, Value};

use crate::{Amount, CategoryRow, ReportModel};

pub fn render_json(m: &ReportModel) -> Value {
    let mut root = obj();

    root.insert("title".into(), Value::String(m.title.clone()));

    let mut result = obj();
    result.insert("id".into(), Value::String(m.result_id.to_string()));
    result.insert("factor_table_version".into(), Value::String(m.factor_table_version.clone()));
    root.insert("result".into(), Value::Object(result));

    root.insert(
        "categories".into(),
        Value::Array(m.categories.iter().map(category_json).collect()),
    );
    root.insert("total".into(), amount_json(&m.total));
    root.insert("dominant".into(), Value::String(m.dominant.clone()));

    Value::Object(root)
}

/* ----------------------- sections ----------------------- */

fn category_json(c: &CategoryRow) -> Value {
    // key → name → kg → tonnes → share_pct
    let mut o = obj();
    o.insert("key".into(), Value::String(c.key.clone()));
    o.insert("name".into(), Value::String(c.name.clone()));
    o.insert("kg".into(), number(c.amount.kg));
    o.insert("tonnes".into(), number(c.amount.tonnes));
    o.insert("share_pct".into(), Value::String(c.share_pct.clone()));
    Value::Object(o)
}

fn amount_json(a: &Amount) -> Value {
    let mut o = obj();
    o.insert("kg".into(), number(a.kg));
    o.insert("tonnes".into(), number(a.tonnes));
    Value::Object(o)
}

/* ----------------------- helpers ----------------------- */

#[inline]
fn obj() -> JsonMap<String, Value> {
    JsonMap::new()
}

/// Non-finite values cannot appear in a built model; map them to null regardless.
fn number(x: f64) -> Value {
    serde_json::Number::from_f64(x).map(Value::Number).unwrap_or(Value::Null)
}
