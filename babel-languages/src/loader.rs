use crate::error::{RegistryError, RegistryResult};
use crate::language::{Language, validate_code};
use crate::registry::LanguageRegistry;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Load a language table from a JSON file
///
/// The JSON file should have the following structure:
/// ```json
/// {
///     "@metadata": { ... },  // Ignored
///     "en": { "marian": "en", "nllb": "eng_Latn" },
///     "ko": { "marian": null, "nllb": "kor_Hang" }
/// }
/// ```
///
/// # Errors
/// - File not found or unreadable
/// - Invalid JSON
/// - Anything [`parse_language_table`] rejects
pub fn load_language_table(path: &Path) -> RegistryResult<LanguageRegistry> {
    let content = fs::read_to_string(path).map_err(|source| RegistryError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_language_table(&content)
}

/// Parse a language table from JSON text
///
/// Keys starting with `@` are skipped. Every other key is a canonical
/// language id whose value maps backend names to a code string or `null`.
pub fn parse_language_table(content: &str) -> RegistryResult<LanguageRegistry> {
    let json: Value = serde_json::from_str(content)?;

    let obj = json
        .as_object()
        .ok_or_else(|| RegistryError::Malformed("root must be an object".to_string()))?;

    let mut entries = BTreeMap::new();
    for (key, value) in obj {
        if key.starts_with('@') {
            continue;
        }

        let language = Language::new(key)?;
        let backends = value.as_object().ok_or_else(|| {
            RegistryError::Malformed(format!("entry for '{}' must be an object", key))
        })?;

        let mut codes = BTreeMap::new();
        for (backend, code) in backends {
            let code = match code {
                Value::Null => None,
                Value::String(code) => {
                    validate_code(code)?;
                    Some(code.clone())
                }
                other => {
                    return Err(RegistryError::Malformed(format!(
                        "code for '{}' on backend '{}' must be a string or null, got {}",
                        key, backend, other
                    )));
                }
            };
            codes.insert(backend.clone(), code);
        }

        if entries.insert(language, codes).is_some() {
            return Err(RegistryError::Malformed(format!(
                "language '{}' is listed more than once",
                key
            )));
        }
    }

    if entries.is_empty() {
        return Err(RegistryError::Malformed(
            "table does not define any language".to_string(),
        ));
    }

    Ok(LanguageRegistry::new(entries))
}
