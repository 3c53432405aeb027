use serde_json::Value;
use tabled::{builder::Builder, Table};

/// Format output as tables using the tabled crate.
///
/// Scalar fields (nested objects flattened to dotted keys) come first as a
/// Field/Value table; each embedded array of records, e.g. disbursements or
/// transactions, gets its own table below.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(_) => print_object_tables(value),
        Value::Array(arr) => print_array_table(arr),
        _ => println!("{}", value),
    }
}

fn print_object_tables(value: &Value) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    let mut arrays: Vec<(String, Vec<Value>)> = Vec::new();
    flatten_into(&mut builder, &mut arrays, "", value);
    println!("{}", Table::from(builder));

    for (name, arr) in arrays {
        if arr.is_empty() {
            continue;
        }
        println!("\n{}:", name);
        print_array_table(&arr);
    }
}

fn flatten_into(
    builder: &mut Builder,
    arrays: &mut Vec<(String, Vec<Value>)>,
    prefix: &str,
    value: &Value,
) {
    if let Value::Object(map) = value {
        for (key, val) in map {
            let label = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{prefix}.{key}")
            };
            match val {
                Value::Object(_) => flatten_into(builder, arrays, &label, val),
                Value::Array(arr) => arrays.push((label, arr.clone())),
                other => builder.push_record([label.as_str(), format_value(other).as_str()]),
            }
        }
    }
}

fn print_array_table(arr: &[Value]) {
    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(headers.clone());
        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(h).map(format_value).unwrap_or_default())
                    .collect();
                builder.push_record(row);
            }
        }
        println!("{}", Table::from(builder));
    } else {
        for item in arr {
            println!("{}", format_value(item));
        }
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
