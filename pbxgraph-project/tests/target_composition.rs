//! Target composition: build phases, dependencies and product references.
//!
//! Every test builds its own project with sequential ids; no shared state.

use pbxgraph_core::{GraphError, GraphOptions, ObjectId, Value};
use pbxgraph_project::{BuildPhaseKind, Project, TargetKind};
use rstest::rstest;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn project_with(kind: TargetKind, name: &str) -> (Project, ObjectId) {
    let mut project = Project::new(&GraphOptions::sequential());
    let id = project.create_target(kind, name).expect("create target");
    (project, id)
}

fn app() -> (Project, ObjectId) {
    project_with(TargetKind::Native, "App")
}

// ---------------------------------------------------------------------------
// 1. create_build_phase
// ---------------------------------------------------------------------------

#[rstest]
#[case(BuildPhaseKind::Sources, "PBXSourcesBuildPhase")]
#[case(BuildPhaseKind::Resources, "PBXResourcesBuildPhase")]
#[case(BuildPhaseKind::Frameworks, "PBXFrameworksBuildPhase")]
#[case(BuildPhaseKind::RunScript, "PBXShellScriptBuildPhase")]
#[case(BuildPhaseKind::CopyHeaders, "PBXHeadersBuildPhase")]
fn create_build_phase_appends_one_phase_of_kind(#[case] kind: BuildPhaseKind, #[case] isa: &str) {
    let (mut project, app) = app();
    let phase = project.target_mut(&app).expect("target").create_build_phase(kind).expect("create");

    let target = project.target(&app).expect("target");
    assert_eq!(target.build_phase_ids().expect("ids"), vec![phase.id().clone()]);
    assert_eq!(project.registry().object(phase.id()).expect("phase").isa(), isa);
    assert_eq!(phase.kind(), kind);
}

#[test]
fn create_build_phase_twice_does_not_deduplicate() {
    let (mut project, app) = app();
    let mut target = project.target_mut(&app).expect("target");
    let first = target.create_build_phase(BuildPhaseKind::Sources).expect("first");
    let second = target.create_build_phase(BuildPhaseKind::Sources).expect("second");

    assert_ne!(first.id(), second.id());
    let ids = project.target(&app).expect("target").build_phase_ids().expect("ids");
    assert_eq!(ids, vec![first.id().clone(), second.id().clone()]);
    for id in &ids {
        assert_eq!(project.registry().object(id).expect("phase").isa(), "PBXSourcesBuildPhase");
    }
}

#[test]
fn create_build_phase_runs_configure_on_new_phase() {
    let (mut project, app) = app();
    let phase = project
        .target_mut(&app)
        .expect("target")
        .create_build_phase_with(BuildPhaseKind::RunScript, |object| {
            object.set("shellScript", "make generate");
        })
        .expect("create");

    let object = project.registry().object(phase.id()).expect("phase");
    assert_eq!(object.string("shellScript"), Some("make generate"));
}

// ---------------------------------------------------------------------------
// 2. create_build_phases
// ---------------------------------------------------------------------------

#[test]
fn create_build_phases_keeps_call_order() {
    let (mut project, app) = app();
    let phases = project
        .target_mut(&app)
        .expect("target")
        .create_build_phases([BuildPhaseKind::Sources, BuildPhaseKind::Resources])
        .expect("create");

    assert_eq!(phases.len(), 2);
    assert_eq!(phases[0].kind(), BuildPhaseKind::Sources);
    assert_eq!(phases[1].kind(), BuildPhaseKind::Resources);
    let ids = project.target(&app).expect("target").build_phase_ids().expect("ids");
    assert_eq!(ids, vec![phases[0].id().clone(), phases[1].id().clone()]);
}

#[test]
fn create_build_phases_skips_absent_entries() {
    let (mut project, app) = app();
    let phases = project
        .target_mut(&app)
        .expect("target")
        .create_build_phases([None, Some(BuildPhaseKind::Frameworks), None, Some(BuildPhaseKind::Sources)])
        .expect("create");

    let kinds: Vec<_> = phases.iter().map(|p| p.kind()).collect();
    assert_eq!(kinds, vec![BuildPhaseKind::Frameworks, BuildPhaseKind::Sources]);
}

#[test]
fn create_build_phases_applies_configure_to_each() {
    let (mut project, app) = app();
    let mut seen = Vec::new();
    let phases = project
        .target_mut(&app)
        .expect("target")
        .create_build_phases_with(BuildPhaseKind::ALL, |object| {
            seen.push(object.isa().to_owned());
            object.set("runOnlyForDeploymentPostprocessing", "0");
        })
        .expect("create");

    assert_eq!(phases.len(), 5);
    assert_eq!(seen, BuildPhaseKind::ALL.iter().map(|k| k.isa().to_owned()).collect::<Vec<_>>());
    for phase in &phases {
        let object = project.registry().object(phase.id()).expect("phase");
        assert_eq!(object.string("runOnlyForDeploymentPostprocessing"), Some("0"));
    }
}

#[test]
fn unknown_phase_name_creates_nothing() {
    let (mut project, app) = app();
    let before = project.registry().len();
    let err = pbxgraph_project::build_phase::parse_kinds(["sources", "copy_files"]).unwrap_err();
    assert!(matches!(err, GraphError::UnknownPhaseKind { .. }));
    assert_eq!(project.registry().len(), before);
    assert!(project.target_mut(&app).expect("target").as_target().build_phase_ids().expect("ids").is_empty());
}

// ---------------------------------------------------------------------------
// 3. build_phase lookup
// ---------------------------------------------------------------------------

#[test]
fn build_phase_returns_first_of_kind() {
    let (mut project, app) = app();
    let mut target = project.target_mut(&app).expect("target");
    let first = target.create_build_phase(BuildPhaseKind::Sources).expect("first");
    target.create_build_phase(BuildPhaseKind::Resources).expect("resources");
    target.create_build_phase(BuildPhaseKind::Sources).expect("second");

    assert_eq!(target.build_phase(BuildPhaseKind::Sources).expect("lookup"), first);
    assert_eq!(target.as_target().sources_build_phase().expect("lookup"), first);
}

#[test]
fn build_phase_missing_is_not_found_and_skips_configure() {
    let (mut project, app) = app();
    let mut target = project.target_mut(&app).expect("target");
    target.create_build_phase(BuildPhaseKind::Sources).expect("sources");

    let mut called = false;
    let err = target
        .build_phase_with(BuildPhaseKind::Resources, |_| called = true)
        .unwrap_err();

    assert!(matches!(err, GraphError::NotFound { ref kind } if kind == "resources"), "got: {err}");
    assert!(!called, "configure must not run when nothing was found");
}

#[test]
fn build_phase_with_configures_found_phase() {
    let (mut project, app) = app();
    let mut target = project.target_mut(&app).expect("target");
    target.create_build_phase(BuildPhaseKind::CopyHeaders).expect("headers");

    let phase = target
        .build_phase_with(BuildPhaseKind::CopyHeaders, |object| object.set("buildActionMask", "8"))
        .expect("found");

    let object = project.registry().object(phase.id()).expect("phase");
    assert_eq!(object.string("buildActionMask"), Some("8"));
}

// ---------------------------------------------------------------------------
// 4. Dependencies
// ---------------------------------------------------------------------------

#[test]
fn add_dependency_is_one_directional() {
    let (mut project, app) = app();
    let lib = project.create_target(TargetKind::Bundle, "Plugin").expect("lib");

    let dependency = project.target_mut(&app).expect("target").add_dependency(&lib).expect("dep");

    let app_view = project.target(&app).expect("app");
    assert_eq!(app_view.dependency_ids().expect("ids"), vec![dependency.id().clone()]);
    assert_eq!(dependency.target_id(project.registry()).expect("bound"), Some(lib.clone()));
    assert_eq!(
        project.registry().object(dependency.id()).expect("dep").isa(),
        "PBXTargetDependency"
    );
    assert!(project.target(&lib).expect("lib").dependency_ids().expect("ids").is_empty());
}

#[test]
fn dependency_proxy_points_back_at_project_and_target() {
    let (mut project, app) = app();
    let lib = project.create_target(TargetKind::Native, "Core").expect("lib");
    let dependency = project.target_mut(&app).expect("target").add_dependency(&lib).expect("dep");

    let proxy_id = dependency.proxy_id(project.registry()).expect("proxy").expect("bound");
    let proxy = project.registry().object(&proxy_id).expect("proxy object");
    assert_eq!(proxy.id("containerPortal"), Some(project.root_id()));
    assert_eq!(proxy.id("remoteGlobalIDString"), Some(&lib));
    assert_eq!(proxy.string("remoteInfo"), Some("Core"));
}

#[test]
fn add_dependency_on_non_target_mutates_nothing() {
    let (mut project, app) = app();
    let root = project.root_id().clone();
    let before = project.registry().len();

    let err = project.target_mut(&app).expect("target").add_dependency(&root).unwrap_err();

    assert!(matches!(err, GraphError::UnexpectedIsa { .. }), "got: {err}");
    assert_eq!(project.registry().len(), before);
    assert!(project.target(&app).expect("app").dependencies().expect("deps").is_empty());
}

// ---------------------------------------------------------------------------
// 5. Product reference
// ---------------------------------------------------------------------------

#[test]
fn create_product_reference_sets_product_reference() {
    let (mut project, app) = app();
    assert_eq!(
        project.registry().object(&app).expect("app").get("productReference"),
        Some(&Value::Unset)
    );

    let reference = project
        .target_mut(&app)
        .expect("target")
        .create_product_reference("App")
        .expect("reference");

    let target = project.target(&app).expect("app");
    assert_eq!(target.product_reference_id().expect("id"), Some(reference.id()));
    assert_eq!(reference.path(project.registry()).expect("path"), Some("App"));

    let children = project.products_group().expect("group").children().expect("children");
    assert_eq!(children, vec![reference.id().clone()]);
}

// ---------------------------------------------------------------------------
// 6. Templates through the project
// ---------------------------------------------------------------------------

#[rstest]
#[case(TargetKind::Native, Some("com.apple.product-type.application"))]
#[case(TargetKind::Bundle, Some("com.apple.product-type.bundle"))]
#[case(TargetKind::Aggregate, None)]
fn created_targets_start_empty(#[case] kind: TargetKind, #[case] product_type: Option<&str>) {
    let (project, id) = project_with(kind, "T");
    let target = project.target(&id).expect("target");
    assert_eq!(target.kind().expect("kind"), kind);
    assert_eq!(target.product_type().expect("product type"), product_type);
    assert!(target.build_phases().expect("phases").is_empty());
    assert!(target.dependencies().expect("deps").is_empty());
    assert_eq!(target.product_reference_id().expect("ref"), None);
}
