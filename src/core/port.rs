//! `vcpkg.json` port manifest written next to the portfile.

use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::core::metadata::PackageMetadata;
use crate::core::utils::{format_description, to_port_name};

/// Port manifest in vcpkg's JSON layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortManifest {
    pub name: String,
    #[serde(rename = "version-string")]
    pub version_string: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub description: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub dependencies: Vec<String>,
}

impl PortManifest {
    pub fn from_metadata(meta: &PackageMetadata) -> Self {
        let mut description = Vec::new();
        let (synopsis, body) = format_description(&meta.description);
        if !synopsis.is_empty() {
            description.push(synopsis);
        }
        description.extend(body);

        let mut dependencies: Vec<String> =
            meta.dependencies.iter().map(|d| to_port_name(d)).collect();
        dependencies.sort();
        dependencies.dedup();

        Self {
            name: to_port_name(&meta.name),
            version_string: format!("{}-{}", meta.version, meta.inc),
            description,
            dependencies,
        }
    }

    /// Pretty printed JSON with a trailing newline
    pub fn to_json(&self) -> Result<String> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::metadata::BuildType;
    use serde_json::json;

    fn meta() -> PackageMetadata {
        PackageMetadata {
            name: "rclcpp_action".to_string(),
            version: "16.0.1".to_string(),
            inc: 2,
            distribution: "humble".to_string(),
            description: "Adds <b>action</b> APIs.   Wraps rcl_action for C++.".to_string(),
            build_type: BuildType::AmentCmake,
            dependencies: vec![
                "rcl_action".to_string(),
                "ament_cmake".to_string(),
                "rcl_action".to_string(),
            ],
        }
    }

    #[test]
    fn test_port_manifest_from_metadata() {
        let manifest = PortManifest::from_metadata(&meta());
        assert_eq!(manifest.name, "rclcpp-action");
        assert_eq!(manifest.version_string, "16.0.1-2");
        assert_eq!(
            manifest.description,
            vec!["Adds action APIs.", "Wraps rcl_action for C++."]
        );
        assert_eq!(manifest.dependencies, vec!["ament-cmake", "rcl-action"]);
    }

    #[test]
    fn test_port_manifest_json_layout() {
        let json_text = PortManifest::from_metadata(&meta()).to_json().unwrap();
        assert!(json_text.ends_with("}\n"));

        let value: serde_json::Value = serde_json::from_str(&json_text).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "rclcpp-action",
                "version-string": "16.0.1-2",
                "description": ["Adds action APIs.", "Wraps rcl_action for C++."],
                "dependencies": ["ament-cmake", "rcl-action"],
            })
        );
    }

    #[test]
    fn test_empty_description_and_dependencies_are_omitted() {
        let mut meta = meta();
        meta.description.clear();
        meta.dependencies.clear();
        let value: serde_json::Value =
            serde_json::from_str(&PortManifest::from_metadata(&meta).to_json().unwrap()).unwrap();
        assert!(value.get("description").is_none());
        assert!(value.get("dependencies").is_none());
    }
}
