use serde_json::Value;

/// Print just the key answer value from the output.
///
/// Allocation outcomes nest the headline numbers under "allocation";
/// disbursement lists print one `guarantor: amount` line each.
pub fn print_minimal(value: &Value) {
    if let Value::Array(arr) = value {
        for item in arr {
            match (item.get("guarantor_id"), item.get("share_amount")) {
                (Some(Value::String(id)), Some(amount)) => {
                    println!("{}: {}", id, format_minimal(amount));
                }
                _ => println!("{}", format_minimal(item)),
            }
        }
        return;
    }

    let result_obj = value
        .as_object()
        .and_then(|m| m.get("allocation"))
        .unwrap_or(value);

    // Priority list of key output fields
    let priority_keys = [
        "applied_payment",
        "remaining_balance",
        "share_amount",
        "status",
    ];

    if let Value::Object(map) = result_obj {
        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    println!("{}", format_minimal(val));
                    return;
                }
            }
        }

        // Fall back to first field
        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_minimal(val));
            return;
        }
    }

    println!("{}", format_minimal(result_obj));
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
