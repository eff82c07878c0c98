use sha2::{Digest, Sha256};

/// Normalize definition text for structural comparison.
///
/// Collapses any run of whitespace (spaces, tabs, newlines) to a single
/// space and trims leading/trailing whitespace. Idempotent:
/// `normalize_definition(normalize_definition(x)) == normalize_definition(x)`.
pub fn normalize_definition(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Compare two definition texts ignoring whitespace formatting
pub fn definitions_equal(a: &str, b: &str) -> bool {
    normalize_definition(a) == normalize_definition(b)
}

/// SHA-256 fingerprint of the normalized definition, for compact
/// structured logging of modified objects
pub fn definition_fingerprint(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(normalize_definition(text).as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn test_normalize_collapses_whitespace_runs() {
        assert_eq!(normalize_definition("SELECT  1;"), "SELECT 1;");
        assert_eq!(normalize_definition("  SELECT\t1;\n"), "SELECT 1;");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let inputs = [
            "SELECT  base +\n  tax",
            "",
            "   ",
            "already normal",
            "\t\n mixed \t whitespace \n",
        ];
        for input in inputs {
            let once = normalize_definition(input);
            assert_eq!(normalize_definition(&once), once);
        }
    }

    #[test]
    fn test_whitespace_only_change_compares_equal() {
        let source = indoc! {"
            BEGIN
                RETURN  base + tax;
            END;
        "};
        let destination = "BEGIN RETURN base + tax; END;";
        assert!(definitions_equal(source, destination));
    }

    #[test]
    fn test_content_change_compares_unequal() {
        assert!(!definitions_equal("SELECT 1", "SELECT 2"));
    }

    #[test]
    fn test_fingerprint_ignores_formatting() {
        let a = definition_fingerprint("SELECT   1");
        let b = definition_fingerprint("SELECT 1\n");
        let c = definition_fingerprint("SELECT 2");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
