use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::DecodeError;

fn with_path<T>(result: Result<T, serde_path_to_error::Error<serde_json::Error>>) -> Result<T, DecodeError> {
    result.map_err(|err| DecodeError::Shape {
        path: err.path().to_string(),
        source: err.into_inner(),
    })
}

/// Deserialize with JSON-path context in error messages.
pub fn from_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T, DecodeError> {
    let de = &mut serde_json::Deserializer::from_str(src);
    with_path(serde_path_to_error::deserialize::<_, T>(de))
}

pub fn from_slice_with_path<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, DecodeError> {
    let de = &mut serde_json::Deserializer::from_slice(bytes);
    with_path(serde_path_to_error::deserialize::<_, T>(de))
}

/// Same as [`from_str_with_path`] for an already-parsed document.
pub fn from_value_with_path<T: DeserializeOwned>(value: &Value) -> Result<T, DecodeError> {
    with_path(serde_path_to_error::deserialize::<_, T>(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn reports_nested_path() {
        let err = from_str_with_path::<BTreeMap<String, Vec<bool>>>(r#"{"a": [true, 3]}"#).unwrap_err();
        match err {
            DecodeError::Shape { path, .. } => assert_eq!(path, "a[1]"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn value_and_str_agree() {
        let v = serde_json::json!({"x": [false]});
        let a: BTreeMap<String, Vec<bool>> = from_value_with_path(&v).unwrap();
        let b: BTreeMap<String, Vec<bool>> = from_slice_with_path(v.to_string().as_bytes()).unwrap();
        assert_eq!(a, b);
    }
}
