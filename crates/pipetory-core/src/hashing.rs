//! Hash de definición de un pipe: JSON canónico + blake3.
//!
//! El hash cubre nombres de steps (en orden), tipo de entrada y params
//! ligados. Sirve para detectar si el mapa compilado corresponde a los
//! registros actuales.

use std::collections::BTreeMap;

use blake3::Hasher;
use serde_json::Value;

/// Serializa `value` con claves de objeto ordenadas.
pub fn to_canonical_json(value: &Value) -> String {
    match value {
        Value::Object(map) => {
            let tree: BTreeMap<&String, String> = map.iter().map(|(k, v)| (k, to_canonical_json(v))).collect();
            let items: Vec<String> = tree.into_iter()
                                         .map(|(k, v)| format!("{}:{}", Value::String(k.clone()), v))
                                         .collect();
            format!("{{{}}}", items.join(","))
        }
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(to_canonical_json).collect();
            format!("[{}]", items.join(","))
        }
        other => other.to_string(),
    }
}

/// Hashea un string y devuelve hex.
pub fn hash_str(input: &str) -> String {
    let mut h = Hasher::new();
    h.update(input.as_bytes());
    h.finalize().to_hex().to_string()
}

pub fn hash_value(value: &Value) -> String {
    hash_str(&to_canonical_json(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn canonical_json_sorts_keys() {
        let a = json!({"b": 1, "a": {"y": true, "x": null}});
        assert_eq!(to_canonical_json(&a), r#"{"a":{"x":null,"y":true},"b":1}"#);
    }

    #[test]
    fn hash_ignores_key_order() {
        let a = json!({"weight": 0.5, "base": 10});
        let b = json!({"base": 10, "weight": 0.5});
        assert_eq!(hash_value(&a), hash_value(&b));
        assert_eq!(hash_value(&a).len(), 64);
    }
}
