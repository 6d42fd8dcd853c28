//! End-to-end tests for `centerline point` commands.

mod fixtures;
use fixtures::*;

use centerline::models::Status;

// ============================================================================
// List Command Tests
// ============================================================================

#[test]
fn test_list_falls_back_to_built_in_points() {
    let env = TestEnv::new();
    let output = env.run(&["point", "list", "--json"]);

    assert_exit(&output, 0);
    let rows = stdout_json(&output);
    let rows = rows.as_array().expect("Should be an array");
    assert_eq!(rows.len(), 13);
    assert_eq!(rows[0]["id"], "P-01");
    assert_eq!(rows[12]["id"], "P-13");
    assert!(!env.points_file().exists(), "Reading must not write defaults");
}

#[test]
fn test_list_includes_hidden_points_sorted_by_number() {
    let mut points = test_points_small();
    points.reverse();
    let env = TestEnv::with_points(&points);

    let output = env.run(&["point", "list", "--json"]);
    assert_exit(&output, 0);

    let ids: Vec<String> = stdout_json(&output)
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, ["P-01", "P-02", "P-03"]);
}

#[test]
fn test_list_filters_combine() {
    let env = TestEnv::with_points(&test_points_small());

    let output = env.run(&["point", "list", "--criticality", "critical", "--json"]);
    assert_exit(&output, 0);
    assert_eq!(stdout_json(&output).as_array().unwrap().len(), 2);

    let output = env.run(&[
        "point",
        "list",
        "--criticality",
        "critical",
        "--status",
        "red",
        "--json",
    ]);
    assert_exit(&output, 0);
    let rows = stdout_json(&output);
    assert_eq!(rows.as_array().unwrap().len(), 1);
    assert_eq!(rows[0]["id"], "P-02");

    let output = env.run(&["point", "list", "--zone", "shrink-film", "--json"]);
    assert_exit(&output, 0);
    assert_eq!(stdout_json(&output)[0]["id"], "P-02");
}

#[test]
fn test_list_search_is_case_insensitive() {
    let env = TestEnv::with_points(&test_points_small());
    let output = env.run(&["point", "list", "--search", "KNIFE", "--json"]);

    assert_exit(&output, 0);
    let rows = stdout_json(&output);
    assert_eq!(rows.as_array().unwrap().len(), 1);
    assert_eq!(rows[0]["name"], "Knife timing");
}

#[test]
fn test_list_invalid_search_pattern() {
    let env = TestEnv::with_points(&test_points_small());
    let output = env.run(&["point", "list", "--search", "("]);

    assert_exit(&output, 1);
    assert!(stderr(&output).contains("Invalid search pattern"));
}

#[test]
fn test_list_human_readable() {
    let env = TestEnv::with_points(&test_points_small());
    let output = env.run(&["point", "list"]);

    assert_exit(&output, 0);
    let out = stdout(&output);
    assert!(out.contains("Points (3):"));
    assert!(out.contains("Knife timing"));
    assert!(out.contains("hidden"));
    assert!(out.contains("STOP"));
}

#[test]
fn test_list_no_matches() {
    let env = TestEnv::with_points(&test_points_small());
    let output = env.run(&["point", "list", "--zone", "infeed"]);

    assert_exit(&output, 0);
    assert!(stdout(&output).contains("No points match."));
}

// ============================================================================
// Show Command Tests
// ============================================================================

#[test]
fn test_show_point_json() {
    let env = TestEnv::new();
    let output = env.run(&["point", "show", "P-09", "--json"]);

    assert_exit(&output, 0);
    let point = stdout_json(&output);
    assert_eq!(point["name"], "Flap folder cam");
    assert_eq!(point["criticality"], "Critical");
    assert_eq!(point["phaseAngle"], 270.0);
}

#[test]
fn test_show_point_detail() {
    let env = TestEnv::new();
    let output = env.run(&["point", "show", "P-06"]);

    assert_exit(&output, 0);
    let out = stdout(&output);
    assert!(out.contains("P-06 #6 Overhead guide clearance"));
    assert!(out.contains("Map:           hidden"));
}

#[test]
fn test_show_unknown_point() {
    let env = TestEnv::new();
    let output = env.run(&["point", "show", "P-99"]);

    assert_exit(&output, 3);
    assert!(stderr(&output).contains("P-99"));
}

// ============================================================================
// Add Command Tests
// ============================================================================

#[test]
fn test_add_suggests_next_number_and_id() {
    let env = TestEnv::new();
    let output = env.run(&[
        "point",
        "add",
        "--name",
        "Pusher stroke",
        "--zone",
        "forming",
        "--target",
        "120 mm",
        "--tolerance",
        "± 1 mm",
        "--method",
        "Tape measure",
        "--criticality",
        "high",
        "--x",
        "60",
        "--y",
        "70",
        "--json",
    ]);

    assert_exit(&output, 0);
    let point = stdout_json(&output);
    assert_eq!(point["id"], "P-14");
    assert_eq!(point["number"], 14);
    assert_eq!(point["visibleOnMap"], true);

    let stored = env.stored_points();
    assert_eq!(stored.len(), 14);
    assert_eq!(stored[13].name, "Pusher stroke");
}

#[test]
fn test_add_hidden_point_without_coordinates() {
    let env = TestEnv::with_points(&test_points_small());
    let output = env.run(&[
        "point",
        "add",
        "--name",
        "Film tension",
        "--zone",
        "shrinkfilm",
        "--target",
        "2 N",
        "--tolerance",
        "± 0.2 N",
        "--method",
        "Spring scale",
        "--criticality",
        "low",
        "--hidden",
    ]);

    assert_exit(&output, 0);
    assert!(stdout(&output).contains("Added P-04 (Film tension)"));

    let stored = env.stored_points();
    assert_eq!(stored.len(), 4);
    assert!(!stored[3].visible_on_map);
    assert!(stored[3].coordinates.is_none());
}

#[test]
fn test_add_reports_every_missing_field() {
    let env = TestEnv::with_points(&test_points_small());
    let output = env.run(&["point", "add", "--name", "Incomplete"]);

    assert_exit(&output, 1);
    let err = stderr(&output);
    assert!(err.contains("targetValue"));
    assert!(err.contains("zone"));
    assert!(err.contains("criticality"));
    assert_eq!(env.stored_points().len(), 3, "Nothing may be written");
}

#[test]
fn test_add_rejects_out_of_range_values() {
    let env = TestEnv::with_points(&test_points_small());
    let output = env.run(&[
        "point",
        "add",
        "--name",
        "Bad",
        "--zone",
        "guides",
        "--target",
        "1",
        "--tolerance",
        "1",
        "--method",
        "eye",
        "--criticality",
        "low",
        "--x",
        "120",
        "--y",
        "50",
        "--phase",
        "360",
    ]);

    assert_exit(&output, 1);
    let err = stderr(&output);
    assert!(err.contains("coordinates"));
    assert!(err.contains("phaseAngle"));
}

#[test]
fn test_add_needs_both_axes() {
    let env = TestEnv::with_points(&test_points_small());
    let output = env.run(&["point", "add", "--name", "Half placed", "--x", "10"]);

    assert_exit(&output, 1);
    assert!(stderr(&output).contains("--x and --y"));
}

#[test]
fn test_add_duplicate_id_allowed_by_default() {
    let env = TestEnv::with_points(&test_points_small());
    let output = env.run(&[
        "point",
        "add",
        "--number",
        "2",
        "--name",
        "Second knife",
        "--zone",
        "shrink-film",
        "--target",
        "1",
        "--tolerance",
        "1",
        "--method",
        "strobe",
        "--criticality",
        "critical",
        "--hidden",
    ]);

    assert_exit(&output, 0);
    let stored = env.stored_points();
    assert_eq!(stored.iter().filter(|p| p.id == "P-02").count(), 2);
}

// ============================================================================
// Edit Command Tests
// ============================================================================

#[test]
fn test_edit_keeps_unchanged_fields() {
    let env = TestEnv::with_points(&test_points_small());
    let output = env.run(&["point", "edit", "P-01", "--name", "Renamed", "--x", "15", "--json"]);

    assert_exit(&output, 0);
    let stored = env.stored_points();
    let point = &stored[0];
    assert_eq!(point.name, "Renamed");
    let coordinates = point.coordinates.unwrap();
    assert!((coordinates.x - 15.0).abs() < f64::EPSILON);
    assert!((coordinates.y - 20.0).abs() < f64::EPSILON);
    assert_eq!(point.phase_angle, Some(265.0));
    assert_eq!(point.target_value, "10 mm");
}

#[test]
fn test_edit_clear_phase_and_hide() {
    let env = TestEnv::with_points(&test_points_small());
    let output = env.run(&["point", "edit", "P-02", "--clear-phase", "--visible", "false"]);

    assert_exit(&output, 0);
    assert!(stdout(&output).contains("Updated P-02"));
    let point = &env.stored_points()[1];
    assert_eq!(point.phase_angle, None);
    assert!(!point.visible_on_map);
    assert_eq!(point.status, Status::TaggedRed);
}

#[test]
fn test_edit_unknown_point() {
    let env = TestEnv::with_points(&test_points_small());
    let output = env.run(&["point", "edit", "P-42", "--name", "Ghost"]);

    assert_exit(&output, 3);
}

// ============================================================================
// Status Command Tests
// ============================================================================

#[test]
fn test_status_changes_only_status_and_timestamp() {
    let points = test_points_small();
    let env = TestEnv::with_points(&points);
    let output = env.run(&["point", "status", "P-01", "yellow"]);

    assert_exit(&output, 0);
    assert!(stdout(&output).contains("P-01 is now TaggedYellow"));

    let stored = env.stored_points();
    let mut expected = points[0].clone();
    expected.status = Status::TaggedYellow;
    expected.last_checked = stored[0].last_checked;
    assert!(stored[0].last_checked.is_some());
    assert_eq!(stored[0], expected);
    assert_eq!(stored[1], points[1]);
    assert_eq!(stored[2], points[2]);
}

#[test]
fn test_status_unknown_point() {
    let env = TestEnv::with_points(&test_points_small());
    let output = env.run(&["point", "status", "P-77", "red"]);

    assert_exit(&output, 3);
    assert_eq!(env.stored_points().len(), 3);
}

#[test]
fn test_status_rejects_unknown_value() {
    let env = TestEnv::with_points(&test_points_small());
    let output = env.run(&["point", "status", "P-01", "purple"]);

    assert!(!output.status.success());
}
