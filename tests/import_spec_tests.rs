//! Integration tests for the import spec builder
//!
//! These tests verify the serialized artifact the ImportAssets commandlet
//! reads: group structure, skeleton lifting, flag placement and the on-disk
//! formatting contract.

use camino::Utf8PathBuf;
use std::fs;
use tempfile::TempDir;
use uecmd::models::import::{
    AnimSequenceImportData, ImportOptions, ImportSpec, SkeletalMeshImportData,
    StaticMeshImportData,
};

fn utf8_dir(temp_dir: &TempDir) -> Utf8PathBuf {
    Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap()
}

#[test]
fn test_written_spec_has_import_groups_array() {
    let temp_dir = TempDir::new().unwrap();
    let target = utf8_dir(&temp_dir).join("importsetting.json");

    let mut spec = ImportSpec::new();
    spec.add_group(
        "props",
        vec!["C:/assets/chair.fbx".to_string(), "C:/assets/table.fbx".to_string()],
        "/Game/Props",
        &ImportOptions::StaticMesh(StaticMeshImportData::default()),
        false,
    )
    .unwrap();

    let written = spec.write_json(Some(&target)).unwrap();
    assert_eq!(written, target);

    let document: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&written).unwrap()).unwrap();
    let groups = document["ImportGroups"].as_array().unwrap();
    assert_eq!(groups.len(), 1);

    let group = &groups[0];
    assert_eq!(group["GroupName"], "props");
    assert_eq!(group["Filenames"].as_array().unwrap().len(), 2);
    assert_eq!(group["DestinationPath"], "/Game/Props");
    assert_eq!(group["bReplaceExisting"], true);
    assert_eq!(group["bSkipReadOnly"], true);
    assert_eq!(group["FactoryName"], "FbxFactory");
    assert!(group["ImportSettings"]["StaticMeshImportData"].is_object());
}

#[test]
fn test_written_skeleton_round_trips() {
    let temp_dir = TempDir::new().unwrap();
    let target = utf8_dir(&temp_dir).join("importsetting.json");

    let mut spec = ImportSpec::new();
    spec.add_group(
        "hero_walk",
        vec!["C:/assets/walk.fbx".to_string()],
        "/Game/Animations",
        &ImportOptions::AnimSequence(AnimSequenceImportData {
            target_skeleton: Some("/Game/Characters/Hero_Skeleton".to_string()),
            ..Default::default()
        }),
        true,
    )
    .unwrap();
    spec.write_json(Some(&target)).unwrap();

    let document: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&target).unwrap()).unwrap();
    let settings = &document["ImportGroups"][0]["ImportSettings"];
    assert_eq!(settings["Skeleton"], "/Game/Characters/Hero_Skeleton");
    assert_eq!(settings["bIsReimport"], true);

    let bundle = settings["AnimSequenceImportData"].as_object().unwrap();
    assert!(!bundle.contains_key("TargetSkeleton"));
    assert!(!bundle.contains_key("Skeleton"));
}

#[test]
fn test_write_creates_parent_directories() {
    let temp_dir = TempDir::new().unwrap();
    let target = utf8_dir(&temp_dir)
        .join("nested")
        .join("deeper")
        .join("importsetting.json");

    let spec = ImportSpec::new();
    let written = spec.write_json(Some(&target)).unwrap();
    assert!(written.exists());
}

#[test]
fn test_write_failure_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    // The target path is an existing directory, so the write must fail.
    let target = utf8_dir(&temp_dir);

    let spec = ImportSpec::new();
    let result = spec.write_json(Some(&target));
    assert!(matches!(
        result,
        Err(uecmd::UeCmdError::SpecWrite { .. })
    ));
}

#[test]
fn test_default_path_is_timestamped_under_temp() {
    let spec = ImportSpec::new();
    let written = spec.write_json(None).unwrap();

    assert!(written.exists());
    assert!(written.as_str().contains("uecmd"));
    let file_name = written.file_name().unwrap();
    assert!(file_name.starts_with("importsetting."));
    assert!(file_name.ends_with(".json"));

    fs::remove_file(written).unwrap();
}

#[test]
fn test_formatting_is_sorted_and_indented() {
    let temp_dir = TempDir::new().unwrap();
    let target = utf8_dir(&temp_dir).join("importsetting.json");

    let mut spec = ImportSpec::new();
    spec.add_group(
        "hero",
        vec![],
        "/Game/Characters",
        &ImportOptions::SkeletalMesh(SkeletalMeshImportData::default()),
        false,
    )
    .unwrap();
    spec.write_json(Some(&target)).unwrap();

    let contents = fs::read_to_string(&target).unwrap();
    assert!(contents.contains("    \"ImportGroups\""));
    // Keys inside a group come out sorted.
    let destination = contents.find("\"DestinationPath\"").unwrap();
    let group_name = contents.find("\"GroupName\"").unwrap();
    let settings = contents.find("\"ImportSettings\"").unwrap();
    assert!(destination < group_name && group_name < settings);
}
