//! FBX import option variants and the grouped import spec.
//!
//! The editor's `ImportAssets` commandlet consumes a JSON file with a
//! top-level `ImportGroups` array. Each group names its source files, a
//! destination content path and a per-asset-type option bundle nested under
//! the bundle's type name (`StaticMeshImportData`, `SkeletalMeshImportData`,
//! `AnimSequenceImportData` or `TextureImportData`). A target skeleton, when
//! present, is lifted out of the bundle into a top-level
//! `ImportSettings.Skeleton` reference because the commandlet resolves it
//! separately from the per-type options.

use crate::error::UeCmdError;
use camino::{Utf8Path, Utf8PathBuf};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::fs;

/// Options for importing a static mesh FBX.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticMeshImportData {
    #[serde(rename = "bConvertScene")]
    pub convert_scene: bool,
    #[serde(rename = "bConvertSceneUnit")]
    pub convert_scene_unit: bool,
    #[serde(rename = "bConvertAsScene")]
    pub convert_as_scene: bool,
    #[serde(rename = "bRemoveDegenerates")]
    pub remove_degenerates: bool,
    #[serde(rename = "bBuildAdjacencyBuffer")]
    pub build_adjacency_buffer: bool,
    #[serde(rename = "bBuildReversedIndexBuffer")]
    pub build_reversed_index_buffer: bool,
    #[serde(rename = "bGenerateLightmapUVs")]
    pub generate_lightmap_uvs: bool,
    #[serde(rename = "bOneConvexHullPerUCX")]
    pub one_convex_hull_per_ucx: bool,
    #[serde(rename = "bAutoGenerateCollision")]
    pub auto_generate_collision: bool,
    #[serde(rename = "bCombineMeshes")]
    pub combine_meshes: bool,
}

impl Default for StaticMeshImportData {
    fn default() -> Self {
        Self {
            convert_scene: true,
            convert_scene_unit: true,
            convert_as_scene: true,
            remove_degenerates: true,
            build_adjacency_buffer: true,
            build_reversed_index_buffer: false,
            generate_lightmap_uvs: false,
            one_convex_hull_per_ucx: true,
            auto_generate_collision: false,
            combine_meshes: false,
        }
    }
}

/// Options for importing a skinned mesh FBX.
///
/// `target_skeleton` is not part of the serialized option bundle; the spec
/// builder lifts it into `ImportSettings.Skeleton`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkeletalMeshImportData {
    #[serde(rename = "bConvertScene")]
    pub convert_scene: bool,
    #[serde(rename = "bConvertSceneUnit")]
    pub convert_scene_unit: bool,
    #[serde(rename = "bConvertAsScene")]
    pub convert_as_scene: bool,
    #[serde(rename = "bUpdateSkeletonReferencePose")]
    pub update_skeleton_reference_pose: bool,
    #[serde(rename = "bUseT0AsRefPose")]
    pub use_t0_as_ref_pose: bool,
    #[serde(rename = "bPreserveSmoothingGroups")]
    pub preserve_smoothing_groups: bool,
    #[serde(rename = "bImportMeshesInBoneHierarchy")]
    pub import_meshes_in_bone_hierarchy: bool,
    #[serde(rename = "bImportMorphTargets")]
    pub import_morph_targets: bool,
    #[serde(rename = "bKeepOverlappingVertices")]
    pub keep_overlapping_vertices: bool,
    #[serde(skip)]
    pub target_skeleton: Option<String>,
}

impl Default for SkeletalMeshImportData {
    fn default() -> Self {
        Self {
            convert_scene: true,
            convert_scene_unit: true,
            convert_as_scene: true,
            update_skeleton_reference_pose: true,
            use_t0_as_ref_pose: true,
            preserve_smoothing_groups: true,
            import_meshes_in_bone_hierarchy: false,
            import_morph_targets: true,
            keep_overlapping_vertices: true,
            target_skeleton: None,
        }
    }
}

/// Options for importing an animation sequence FBX.
///
/// Like [`SkeletalMeshImportData`], the target skeleton rides outside the
/// serialized bundle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimSequenceImportData {
    #[serde(rename = "bConvertScene")]
    pub convert_scene: bool,
    #[serde(rename = "bConvertSceneUnit")]
    pub convert_scene_unit: bool,
    #[serde(rename = "bConvertAsScene")]
    pub convert_as_scene: bool,
    #[serde(rename = "bImportCustomAttribute")]
    pub import_custom_attribute: bool,
    #[serde(rename = "bDeleteExistingCustomAttributeCurves")]
    pub delete_existing_custom_attribute_curves: bool,
    #[serde(rename = "bDeleteExistingNonCurveCustomAttributes")]
    pub delete_existing_non_curve_custom_attributes: bool,
    #[serde(rename = "bImportBoneTracks")]
    pub import_bone_tracks: bool,
    #[serde(rename = "bSetMaterialDriveParameterOnCustomAttribute")]
    pub set_material_drive_parameter_on_custom_attribute: bool,
    #[serde(rename = "bRemoveRedundantKeys")]
    pub remove_redundant_keys: bool,
    #[serde(rename = "bDeleteExistingMorphTargetCurves")]
    pub delete_existing_morph_target_curves: bool,
    #[serde(rename = "bDoNotImportCurveWithZero")]
    pub do_not_import_curve_with_zero: bool,
    #[serde(rename = "bPreserveLocalTransform")]
    pub preserve_local_transform: bool,
    #[serde(skip)]
    pub target_skeleton: Option<String>,
}

impl Default for AnimSequenceImportData {
    fn default() -> Self {
        Self {
            convert_scene: true,
            convert_scene_unit: true,
            convert_as_scene: true,
            import_custom_attribute: true,
            delete_existing_custom_attribute_curves: true,
            delete_existing_non_curve_custom_attributes: true,
            import_bone_tracks: true,
            set_material_drive_parameter_on_custom_attribute: true,
            remove_redundant_keys: false,
            delete_existing_morph_target_curves: false,
            do_not_import_curve_with_zero: true,
            preserve_local_transform: false,
            target_skeleton: None,
        }
    }
}

/// Options for importing textures. The texture factory takes no scene
/// conversion settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextureImportData {
    #[serde(rename = "bInvertNormalMaps")]
    pub invert_normal_maps: bool,
}

impl Default for TextureImportData {
    fn default() -> Self {
        Self {
            invert_normal_maps: true,
        }
    }
}

/// The closed set of recognized import option bundles.
///
/// The commandlet only understands these four bundle types, so the variant
/// set is closed at the type level; there is no way to hand the spec builder
/// an unrecognized bundle.
#[derive(Debug, Clone)]
pub enum ImportOptions {
    StaticMesh(StaticMeshImportData),
    SkeletalMesh(SkeletalMeshImportData),
    AnimSequence(AnimSequenceImportData),
    Texture(TextureImportData),
}

impl ImportOptions {
    /// The bundle's type name, used as the nesting key inside
    /// `ImportSettings`.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::StaticMesh(_) => "StaticMeshImportData",
            Self::SkeletalMesh(_) => "SkeletalMeshImportData",
            Self::AnimSequence(_) => "AnimSequenceImportData",
            Self::Texture(_) => "TextureImportData",
        }
    }

    /// The target-skeleton reference, for the variants that carry one.
    pub fn target_skeleton(&self) -> Option<&str> {
        match self {
            Self::SkeletalMesh(data) => data.target_skeleton.as_deref(),
            Self::AnimSequence(data) => data.target_skeleton.as_deref(),
            Self::StaticMesh(_) | Self::Texture(_) => None,
        }
    }

    fn to_options_value(&self) -> serde_json::Result<Value> {
        match self {
            Self::StaticMesh(data) => serde_json::to_value(data),
            Self::SkeletalMesh(data) => serde_json::to_value(data),
            Self::AnimSequence(data) => serde_json::to_value(data),
            Self::Texture(data) => serde_json::to_value(data),
        }
    }
}

/// One named import job inside an [`ImportSpec`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportGroup {
    #[serde(rename = "GroupName")]
    pub group_name: String,

    #[serde(rename = "Filenames")]
    pub filenames: Vec<String>,

    #[serde(rename = "DestinationPath")]
    pub destination_path: String,

    #[serde(rename = "bReplaceExisting")]
    pub replace_existing: bool,

    #[serde(rename = "bSkipReadOnly")]
    pub skip_read_only: bool,

    #[serde(rename = "FactoryName")]
    pub factory_name: String,

    #[serde(rename = "ImportSettings")]
    pub import_settings: Map<String, Value>,
}

/// An ordered collection of import groups, serializable to the JSON file the
/// `ImportAssets` commandlet reads.
///
/// Group names are unique; insertion order is preserved in the serialized
/// `ImportGroups` array.
#[derive(Debug, Clone, Default)]
pub struct ImportSpec {
    groups: IndexMap<String, ImportGroup>,
}

impl ImportSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a named import group.
    ///
    /// Every group imports through the FBX factory with replace-existing and
    /// skip-read-only fixed on. A target skeleton carried by the option
    /// bundle is lifted into a top-level `ImportSettings.Skeleton` reference
    /// instead of being nested with the rest of the bundle.
    ///
    /// # Errors
    ///
    /// Rejects a duplicate group name without appending anything.
    pub fn add_group(
        &mut self,
        group_name: impl Into<String>,
        filenames: Vec<String>,
        destination_path: impl Into<String>,
        options: &ImportOptions,
        is_reimport: bool,
    ) -> Result<&ImportGroup, UeCmdError> {
        let group_name = group_name.into();
        if self.groups.contains_key(&group_name) {
            tracing::warn!("Rejecting duplicate import group \"{}\"", group_name);
            return Err(UeCmdError::DuplicateGroup(group_name));
        }

        let mut import_settings = Map::new();
        if let Some(skeleton) = options.target_skeleton() {
            import_settings.insert("Skeleton".to_string(), Value::String(skeleton.to_string()));
        }
        if is_reimport {
            import_settings.insert("bIsReimport".to_string(), Value::Bool(true));
        }
        let bundle = options
            .to_options_value()
            .expect("import option bundles serialize to JSON objects");
        import_settings.insert(options.type_name().to_string(), bundle);

        let group = ImportGroup {
            group_name: group_name.clone(),
            filenames,
            destination_path: destination_path.into(),
            replace_existing: true,
            skip_read_only: true,
            factory_name: "FbxFactory".to_string(),
            import_settings,
        };

        self.groups.insert(group_name.clone(), group);
        Ok(&self.groups[&group_name])
    }

    /// Look up a group by name.
    pub fn get_group(&self, group_name: &str) -> Option<&ImportGroup> {
        self.groups.get(group_name)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// The full spec as the JSON document the commandlet reads.
    pub fn to_value(&self) -> Value {
        let groups: Vec<Value> = self
            .groups
            .values()
            .map(|group| {
                serde_json::to_value(group).expect("import groups serialize to JSON objects")
            })
            .collect();
        json!({ "ImportGroups": groups })
    }

    /// Write the spec to `path`, or to a timestamped file under the system
    /// temp directory when no path is given. Parent directories are created
    /// as needed. Returns the path written.
    ///
    /// # Errors
    ///
    /// Directory-creation and write failures surface as
    /// [`UeCmdError::SpecWrite`]; callers decide whether a failed artifact is
    /// fatal.
    pub fn write_json(&self, path: Option<&Utf8Path>) -> Result<Utf8PathBuf, UeCmdError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => default_spec_path().map_err(|source| UeCmdError::SpecWrite {
                path: Utf8PathBuf::from("importsetting.json"),
                source,
            })?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|source| UeCmdError::SpecWrite {
                    path: path.clone(),
                    source,
                })?;
            }
        }

        let contents = crate::models::to_pretty_json(&self.to_value()).map_err(|source| {
            UeCmdError::SpecWrite {
                path: path.clone(),
                source: std::io::Error::other(source),
            }
        })?;

        fs::write(&path, contents).map_err(|source| UeCmdError::SpecWrite {
            path: path.clone(),
            source,
        })?;

        tracing::info!("Wrote import spec with {} group(s) to {}", self.len(), path);
        Ok(path)
    }
}

/// `<tmp>/uecmd/importsetting.<ddmmYYYYHHMMSS>.json`
fn default_spec_path() -> std::io::Result<Utf8PathBuf> {
    let temp_dir = Utf8PathBuf::try_from(std::env::temp_dir()).map_err(std::io::Error::other)?;
    let stamp = chrono::Local::now().format("%d%m%Y%H%M%S");
    Ok(temp_dir
        .join("uecmd")
        .join(format!("importsetting.{stamp}.json")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skeletal_options(skeleton: &str) -> ImportOptions {
        ImportOptions::SkeletalMesh(SkeletalMeshImportData {
            target_skeleton: Some(skeleton.to_string()),
            ..Default::default()
        })
    }

    #[test]
    fn test_add_group_fixed_flags() {
        let mut spec = ImportSpec::new();
        let group = spec
            .add_group(
                "props",
                vec!["C:/assets/chair.fbx".to_string()],
                "/Game/Props",
                &ImportOptions::StaticMesh(StaticMeshImportData::default()),
                false,
            )
            .unwrap();

        assert!(group.replace_existing);
        assert!(group.skip_read_only);
        assert_eq!(group.factory_name, "FbxFactory");
        assert!(group.import_settings.contains_key("StaticMeshImportData"));
    }

    #[test]
    fn test_duplicate_group_rejected() {
        let mut spec = ImportSpec::new();
        let options = ImportOptions::Texture(TextureImportData::default());
        spec.add_group("tex", vec![], "/Game/Textures", &options, false)
            .unwrap();

        let err = spec
            .add_group("tex", vec![], "/Game/Textures", &options, false)
            .unwrap_err();
        assert!(matches!(err, UeCmdError::DuplicateGroup(name) if name == "tex"));
        assert_eq!(spec.len(), 1);
    }

    #[test]
    fn test_skeleton_lifted_out_of_bundle() {
        let mut spec = ImportSpec::new();
        spec.add_group(
            "hero",
            vec!["C:/assets/hero.fbx".to_string()],
            "/Game/Characters",
            &skeletal_options("/Game/Characters/Hero_Skeleton"),
            false,
        )
        .unwrap();

        let settings = &spec.get_group("hero").unwrap().import_settings;
        assert_eq!(settings["Skeleton"], "/Game/Characters/Hero_Skeleton");

        let bundle = settings["SkeletalMeshImportData"].as_object().unwrap();
        assert!(!bundle.contains_key("TargetSkeleton"));
        assert!(!bundle.contains_key("target_skeleton"));
    }

    #[test]
    fn test_anim_sequence_skeleton_lifted() {
        let mut spec = ImportSpec::new();
        spec.add_group(
            "walk",
            vec!["C:/assets/walk.fbx".to_string()],
            "/Game/Animations",
            &ImportOptions::AnimSequence(AnimSequenceImportData {
                target_skeleton: Some("/Game/Characters/Hero_Skeleton".to_string()),
                ..Default::default()
            }),
            false,
        )
        .unwrap();

        let settings = &spec.get_group("walk").unwrap().import_settings;
        assert_eq!(settings["Skeleton"], "/Game/Characters/Hero_Skeleton");
        assert!(settings.contains_key("AnimSequenceImportData"));
    }

    #[test]
    fn test_reimport_flag() {
        let mut spec = ImportSpec::new();
        spec.add_group(
            "props",
            vec![],
            "/Game/Props",
            &ImportOptions::StaticMesh(StaticMeshImportData::default()),
            true,
        )
        .unwrap();

        let settings = &spec.get_group("props").unwrap().import_settings;
        assert_eq!(settings["bIsReimport"], true);
    }

    #[test]
    fn test_no_reimport_flag_by_default() {
        let mut spec = ImportSpec::new();
        spec.add_group(
            "props",
            vec![],
            "/Game/Props",
            &ImportOptions::StaticMesh(StaticMeshImportData::default()),
            false,
        )
        .unwrap();

        let settings = &spec.get_group("props").unwrap().import_settings;
        assert!(!settings.contains_key("bIsReimport"));
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut spec = ImportSpec::new();
        let options = ImportOptions::Texture(TextureImportData::default());
        for name in ["zulu", "alpha", "mike"] {
            spec.add_group(name, vec![], "/Game/Textures", &options, false)
                .unwrap();
        }

        let value = spec.to_value();
        let names: Vec<&str> = value["ImportGroups"]
            .as_array()
            .unwrap()
            .iter()
            .map(|g| g["GroupName"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["zulu", "alpha", "mike"]);
    }

    #[test]
    fn test_get_group_missing() {
        let spec = ImportSpec::new();
        assert!(spec.get_group("nope").is_none());
    }

    #[test]
    fn test_static_mesh_bundle_field_names() {
        let value = serde_json::to_value(StaticMeshImportData::default()).unwrap();
        assert_eq!(value["bConvertScene"], true);
        assert_eq!(value["bCombineMeshes"], false);
        assert_eq!(value["bOneConvexHullPerUCX"], true);
    }

    #[test]
    fn test_texture_bundle_has_no_scene_conversion() {
        let value = serde_json::to_value(TextureImportData::default()).unwrap();
        let bundle = value.as_object().unwrap();
        assert_eq!(bundle.len(), 1);
        assert_eq!(bundle["bInvertNormalMaps"], true);
    }
}
