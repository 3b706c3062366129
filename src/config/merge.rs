//! Deep merge of YAML documents.

use serde_yaml::Value;

/// Merge `overlay` into `base`. Mappings merge key by key; any other
/// overlay value replaces the base value.
pub fn merge_yaml(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Mapping(base_map), Value::Mapping(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) => merge_yaml(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(s: &str) -> Value {
        serde_yaml::from_str(s).unwrap()
    }

    #[test]
    fn test_nested_merge() {
        let mut base = yaml("data:\n  host: a\n  port: 1\nlogging:\n  level: info\n");
        merge_yaml(&mut base, yaml("data:\n  host: b\n"));
        assert_eq!(base, yaml("data:\n  host: b\n  port: 1\nlogging:\n  level: info\n"));
    }

    #[test]
    fn test_new_keys_and_scalar_replacement() {
        let mut base = yaml("a: 1\nlist: [1, 2]\n");
        merge_yaml(&mut base, yaml("b: 2\nlist: [3]\n"));
        assert_eq!(base, yaml("a: 1\nlist: [3]\nb: 2\n"));
    }
}
