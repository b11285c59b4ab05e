//! User-defined class files
//!
//! TOML files list classes as `[[class]]` tables; YAML files hold either a
//! plain list or a `classes:` list. Each class has a `name` and optional
//! `required`, `excluded` and `check_overlap` entries.
//!
//! ```toml
//! [[class]]
//! name = "Kinase"
//! required = ["GO:0016301"]
//! check_overlap = false
//! ```

use crate::error::{CliError, Result};
use gofn_core::ClassDefinition;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct TomlClassFile {
    #[serde(default, rename = "class", alias = "classes")]
    classes: Vec<ClassDefinition>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum YamlClassFile {
    List(Vec<ClassDefinition>),
    Table { classes: Vec<ClassDefinition> },
}

/// Load class definitions, in file order.
pub fn load(path: &Path) -> Result<Vec<ClassDefinition>> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.display().to_string()));
    }
    let contents = std::fs::read_to_string(path)?;

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    let classes = match extension.as_deref() {
        Some("toml") => toml::from_str::<TomlClassFile>(&contents)?.classes,
        Some("yaml") | Some("yml") => match serde_yaml::from_str::<YamlClassFile>(&contents)? {
            YamlClassFile::List(classes) => classes,
            YamlClassFile::Table { classes } => classes,
        },
        _ => {
            return Err(CliError::invalid_class_file(
                path.display().to_string(),
                "unsupported extension, use .toml, .yaml or .yml",
            ))
        },
    };

    validate(path, &classes)?;
    debug!(file = %path.display(), classes = classes.len(), "Loaded class definitions");
    Ok(classes)
}

fn validate(path: &Path, classes: &[ClassDefinition]) -> Result<()> {
    let file = path.display().to_string();
    if classes.is_empty() {
        return Err(CliError::invalid_class_file(file, "no classes defined"));
    }

    let mut names = HashSet::new();
    for class in classes {
        if class.name.trim().is_empty() {
            return Err(CliError::invalid_class_file(file, "class with an empty name"));
        }
        if !names.insert(class.name.as_str()) {
            return Err(CliError::invalid_class_file(
                file,
                format!("class '{}' is defined twice", class.name),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn class_file(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_toml() {
        let file = class_file(
            ".toml",
            r#"
[[class]]
name = "Kinase"
required = ["GO:0016301"]
check_overlap = false

[[class]]
name = "Transporter"
required = ["GO:0005215"]
excluded = ["GO:0015075"]
"#,
        );

        let classes = load(file.path()).unwrap();
        assert_eq!(classes.len(), 2);
        assert_eq!(classes[0].name, "Kinase");
        assert!(!classes[0].check_overlap);
        assert!(classes[1].check_overlap);
        assert_eq!(classes[1].excluded, vec!["GO:0015075"]);
    }

    #[test]
    fn test_load_yaml_list_and_table() {
        let list = class_file(
            ".yaml",
            "- name: Kinase\n  required: [GO:0016301]\n  check_clash: false\n",
        );
        let classes = load(list.path()).unwrap();
        assert_eq!(classes[0].required, vec!["GO:0016301"]);
        assert!(!classes[0].check_overlap);

        let table = class_file(".yml", "classes:\n  - name: Transporter\n    required: [GO:0005215]\n");
        assert_eq!(load(table.path()).unwrap()[0].name, "Transporter");
    }

    #[test]
    fn test_rejects_duplicates_and_unknown_extension() {
        let duplicate = class_file(
            ".toml",
            "[[class]]\nname = \"A\"\n\n[[class]]\nname = \"A\"\n",
        );
        assert!(matches!(
            load(duplicate.path()),
            Err(CliError::InvalidClassFile { .. })
        ));

        let json = class_file(".json", "[]");
        assert!(matches!(load(json.path()), Err(CliError::InvalidClassFile { .. })));
    }

    #[test]
    fn test_syntax_error_is_reported() {
        let broken = class_file(".toml", "[[class]\nname = ");
        assert!(matches!(load(broken.path()), Err(CliError::TomlParse(_))));
    }
}
