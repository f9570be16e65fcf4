//! Deterministic cache keys for parameterized API requests

/// Builds a repeatable cache key from an endpoint and its query parameters
///
/// Each parameter becomes a `name_value` fragment; fragments are sorted so
/// the key is independent of parameter order, then joined with `_` and
/// prefixed by the endpoint. Adversarial values containing the separator
/// could collide, which is an accepted limitation at this scale.
pub fn request_key(base: &str, params: &[(&str, &str)]) -> String {
    let mut fragments: Vec<String> = params
        .iter()
        .map(|(name, value)| format!("{}_{}", name, value))
        .collect();
    fragments.sort();
    format!("{}_{}", base, fragments.join("_"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_is_order_independent() {
        let a = request_key("B", &[("x", "1"), ("y", "2")]);
        let b = request_key("B", &[("y", "2"), ("x", "1")]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_key_discriminates_values() {
        let a = request_key("B", &[("x", "1")]);
        let b = request_key("B", &[("x", "2")]);
        assert_ne!(a, b);
    }

    #[test]
    fn test_key_discriminates_bases() {
        let a = request_key("A", &[("x", "1")]);
        let b = request_key("B", &[("x", "1")]);
        assert_ne!(a, b);
    }

    #[test]
    fn test_key_format() {
        let key = request_key(
            "http://www.mapquestapi.com/search/v2/radius",
            &[("radius", "10"), ("origin", "49931")],
        );
        assert_eq!(
            key,
            "http://www.mapquestapi.com/search/v2/radius_origin_49931_radius_10"
        );
    }

    #[test]
    fn test_key_with_no_params() {
        assert_eq!(request_key("B", &[]), "B_");
    }
}
