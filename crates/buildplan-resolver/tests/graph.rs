use buildplan_core::dependency::{Coordinate, DependencyDeclaration, DependencyScope};
use buildplan_resolver::graph::{resolve, DependencyGraphBuilder, ScanState, VersionSource};
use buildplan_resolver::warnings::{Drift, PlanWarning};
use buildplan_util::errors::PlanError;

fn platform(spec: &str) -> DependencyDeclaration {
    let (coordinate, version) = Coordinate::parse(spec).unwrap();
    DependencyDeclaration::Platform {
        coordinate,
        version: version.unwrap(),
        scope: DependencyScope::Implementation,
    }
}

fn library(spec: &str) -> DependencyDeclaration {
    let (coordinate, version) = Coordinate::parse(spec).unwrap();
    DependencyDeclaration::Library {
        coordinate,
        version,
        scope: DependencyScope::Implementation,
    }
}

fn coord(spec: &str) -> Coordinate {
    Coordinate::parse(spec).unwrap().0
}

#[test]
fn test_bom_pins_three_libraries_in_group() {
    let (set, warnings) = resolve(&[
        platform("com.google.firebase:firebase-bom:32.7.0"),
        library("com.google.firebase:firebase-analytics"),
        library("com.google.firebase:firebase-messaging"),
        library("com.google.firebase:firebase-crashlytics"),
    ])
    .unwrap();

    assert!(warnings.is_empty());
    assert_eq!(set.len(), 4);
    for artifact in [
        "firebase-analytics",
        "firebase-messaging",
        "firebase-crashlytics",
    ] {
        let entry = set.get(&Coordinate::new("com.google.firebase", artifact)).unwrap();
        assert_eq!(entry.version, "32.7.0");
        assert_eq!(
            entry.source,
            VersionSource::Pinned {
                bom: "com.google.firebase:firebase-bom".to_string()
            }
        );
    }
    let bom = set.get(&coord("com.google.firebase:firebase-bom")).unwrap();
    assert_eq!(bom.source, VersionSource::Platform);
}

#[test]
fn test_unpinned_library_fails() {
    let err = resolve(&[library("com.google.firebase:firebase-analytics")]).unwrap_err();
    match err {
        PlanError::UnpinnedVersion { coordinate, group } => {
            assert_eq!(coordinate, "com.google.firebase:firebase-analytics");
            assert_eq!(group, "com.google.firebase");
        }
        other => panic!("expected UnpinnedVersion, got {other:?}"),
    }
}

#[test]
fn test_pin_only_governs_later_declarations() {
    let err = resolve(&[
        library("com.google.firebase:firebase-analytics"),
        platform("com.google.firebase:firebase-bom:32.7.0"),
    ])
    .unwrap_err();
    assert!(matches!(err, PlanError::UnpinnedVersion { .. }));
}

#[test]
fn test_pin_does_not_leak_into_other_groups() {
    let err = resolve(&[
        platform("com.google.firebase:firebase-bom:32.7.0"),
        library("androidx.compose.ui:ui"),
    ])
    .unwrap_err();
    match err {
        PlanError::UnpinnedVersion { group, .. } => assert_eq!(group, "androidx.compose.ui"),
        other => panic!("expected UnpinnedVersion, got {other:?}"),
    }
}

#[test]
fn test_explicit_version_overrides_pin_with_warning() {
    let (set, warnings) = resolve(&[
        platform("com.google.firebase:firebase-bom:32.7.0"),
        library("com.google.firebase:firebase-auth:22.3.1"),
    ])
    .unwrap();

    let auth = set.get(&coord("com.google.firebase:firebase-auth")).unwrap();
    assert_eq!(auth.version, "22.3.1");
    assert_eq!(auth.source, VersionSource::Explicit);
    assert_eq!(
        warnings,
        vec![PlanWarning::VersionOverride {
            coordinate: "com.google.firebase:firebase-auth".to_string(),
            declared: "22.3.1".to_string(),
            pinned: "32.7.0".to_string(),
            bom: "com.google.firebase:firebase-bom".to_string(),
            drift: Drift::Downgrade,
        }]
    );
}

#[test]
fn test_explicit_version_without_pin_is_quiet() {
    let (set, warnings) = resolve(&[library("com.android.support:multidex:1.0.3")]).unwrap();
    assert!(warnings.is_empty());
    assert_eq!(
        set.get(&coord("com.android.support:multidex")).unwrap().version,
        "1.0.3"
    );
}

#[test]
fn test_duplicate_coordinate_keeps_later_declaration() {
    let (set, warnings) = resolve(&[
        library("com.android.support:multidex:1.0.2"),
        library("com.google.android.gms:play-services-base:18.2.0"),
        library("com.android.support:multidex:1.0.3"),
    ])
    .unwrap();

    assert_eq!(set.len(), 2);
    let order: Vec<String> = set.iter().map(|e| e.coordinate.to_string()).collect();
    assert_eq!(
        order,
        vec![
            "com.google.android.gms:play-services-base",
            "com.android.support:multidex"
        ]
    );
    assert_eq!(
        set.get(&coord("com.android.support:multidex")).unwrap().version,
        "1.0.3"
    );
    assert_eq!(
        warnings,
        vec![PlanWarning::DuplicateDependency {
            coordinate: "com.android.support:multidex".to_string(),
            dropped: "1.0.2".to_string(),
            kept: "1.0.3".to_string(),
        }]
    );
}

#[test]
fn test_replacing_bom_repins_group() {
    let (set, warnings) = resolve(&[
        platform("com.google.firebase:firebase-bom:32.7.0"),
        library("com.google.firebase:firebase-analytics"),
        platform("com.google.firebase:firebase-bom:33.1.0"),
        library("com.google.firebase:firebase-messaging"),
    ])
    .unwrap();

    assert_eq!(
        set.get(&coord("com.google.firebase:firebase-analytics"))
            .unwrap()
            .version,
        "32.7.0"
    );
    assert_eq!(
        set.get(&coord("com.google.firebase:firebase-messaging"))
            .unwrap()
            .version,
        "33.1.0"
    );
    assert!(warnings.contains(&PlanWarning::BomReplaced {
        group: "com.google.firebase".to_string(),
        previous: "com.google.firebase:firebase-bom:32.7.0".to_string(),
        replacement: "com.google.firebase:firebase-bom:33.1.0".to_string(),
    }));
    assert!(warnings
        .iter()
        .any(|w| matches!(w, PlanWarning::DuplicateDependency { .. })));
}

#[test]
fn test_builder_state_tracks_pinned_groups() {
    let mut builder = DependencyGraphBuilder::new();
    assert_eq!(builder.state(), ScanState::Scanning);

    builder
        .push(&library("com.android.support:multidex:1.0.3"))
        .unwrap();
    assert_eq!(builder.state(), ScanState::Scanning);

    builder
        .push(&platform("com.google.firebase:firebase-bom:32.7.0"))
        .unwrap();
    builder
        .push(&platform("androidx.compose:compose-bom:2024.06.00"))
        .unwrap();
    assert_eq!(
        builder.state(),
        ScanState::PinActive(vec![
            "androidx.compose".to_string(),
            "com.google.firebase".to_string()
        ])
    );

    builder
        .push(&library("com.android.support:support-annotations:28.0.0"))
        .unwrap();
    let (set, warnings) = builder.finish();
    assert_eq!(set.len(), 4);
    assert!(warnings.is_empty());
    assert_eq!(builder.state(), ScanState::Resolved);
}

#[test]
fn test_builder_reused_after_resolved_starts_clean() {
    let mut builder = DependencyGraphBuilder::new();
    builder
        .push(&platform("com.google.firebase:firebase-bom:32.7.0"))
        .unwrap();
    builder
        .push(&library("com.google.firebase:firebase-analytics"))
        .unwrap();
    let (first, _) = builder.finish();
    assert_eq!(first.len(), 2);
    assert_eq!(builder.state(), ScanState::Resolved);

    let err = builder
        .push(&library("com.google.firebase:firebase-messaging"))
        .unwrap_err();
    assert!(matches!(err, PlanError::UnpinnedVersion { .. }));

    builder
        .push(&library("com.android.support:multidex:1.0.3"))
        .unwrap();
    assert_eq!(builder.state(), ScanState::Scanning);
    let (second, warnings) = builder.finish();
    assert_eq!(second.len(), 1);
    assert!(warnings.is_empty());
}

#[test]
fn test_scope_is_carried_through() {
    let (coordinate, version) = Coordinate::parse("com.android.tools:desugar_jdk_libs:2.1.4").unwrap();
    let (set, _) = resolve(&[DependencyDeclaration::Library {
        coordinate: coordinate.clone(),
        version,
        scope: DependencyScope::CoreLibraryDesugaring,
    }])
    .unwrap();
    assert_eq!(
        set.get(&coordinate).unwrap().scope,
        DependencyScope::CoreLibraryDesugaring
    );
}
