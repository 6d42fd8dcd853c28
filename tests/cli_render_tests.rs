//! End-to-end tests for `centerline map`, `centerline phasing` and `centerline qr`.

mod fixtures;
use fixtures::*;

// ============================================================================
// Map Command Tests
// ============================================================================

#[test]
fn test_map_one_marker_per_visible_point() {
    let env = TestEnv::with_points(&test_points_small());
    let output = env.run(&["map"]);

    assert_exit(&output, 0);
    let svg = stdout(&output);
    assert_eq!(svg.matches("data-point-id=").count(), 2);
    assert!(svg.contains(r#"data-point-id="P-01""#));
    assert!(!svg.contains(r#"data-point-id="P-03""#));
    assert!(svg.contains(r#"class="schematic""#));
}

#[test]
fn test_map_marker_positions_follow_percentages() {
    let env = TestEnv::with_points(&test_points_small());
    let output = env.run(&["map"]);

    assert_exit(&output, 0);
    let svg = stdout(&output);
    // 10%, 20% of the 1000x500 surface
    assert!(svg.contains(r#"cx="100" cy="100""#));
    // 50%, 50%
    assert!(svg.contains(r#"cx="500" cy="250""#));
}

#[test]
fn test_map_selected_point_is_highlighted() {
    let env = TestEnv::with_points(&test_points_small());
    let output = env.run(&["map", "--selected", "P-02"]);

    assert_exit(&output, 0);
    assert!(stdout(&output).contains("#2563EB"));
}

#[test]
fn test_map_selected_unknown_point() {
    let env = TestEnv::with_points(&test_points_small());
    let output = env.run(&["map", "--selected", "P-99"]);

    assert_exit(&output, 3);
    assert!(output.stdout.is_empty());
}

#[test]
fn test_map_print_mode_drops_interactive_hooks() {
    let env = TestEnv::with_points(&test_points_small());
    let output = env.run(&["map", "--print", "--selected", "P-01"]);

    assert_exit(&output, 0);
    let svg = stdout(&output);
    assert!(!svg.contains("data-point-id"));
    assert!(!svg.contains("cursor:pointer"));
    assert!(!svg.contains("hoverable"));
    assert!(!svg.contains("#2563EB"));
    assert_eq!(svg.matches(r#"<g class="marker">"#).count(), 2);
}

#[test]
fn test_map_uses_configured_background() {
    let env = TestEnv::with_points(&test_points_small());
    let set = env.run(&["config", "set", "display.map_background", "https://example.com/line.png"]);
    assert_exit(&set, 0);

    let output = env.run(&["map"]);
    assert_exit(&output, 0);
    let svg = stdout(&output);
    assert!(svg.contains("https://example.com/line.png"));
    assert!(!svg.contains(r#"class="schematic""#));
}

#[test]
fn test_map_writes_output_file() {
    let env = TestEnv::new();
    let target = env.data_dir().join("map.svg");
    let output = env.run(&["map", "--output", target.to_str().unwrap()]);

    assert_exit(&output, 0);
    assert!(output.stdout.is_empty());
    let svg = std::fs::read_to_string(&target).unwrap();
    // Built-in data: 13 points, one hidden
    assert_eq!(svg.matches("data-point-id=").count(), 12);
}

// ============================================================================
// Phasing Command Tests
// ============================================================================

#[test]
fn test_phasing_json_reports_near_points() {
    let env = TestEnv::with_points(&test_points_small());
    let output = env.run(&["phasing", "--angle", "270", "--json"]);

    assert_exit(&output, 0);
    let report = stdout_json(&output);
    assert_eq!(report["simulatedAngle"], 270.0);
    assert_eq!(report["markers"].as_array().unwrap().len(), 2);

    let near: Vec<&str> = report["near"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(near.len(), 2);
    assert!(near.contains(&"P-01"));
    assert!(near.contains(&"P-02"));
}

#[test]
fn test_phasing_proximity_boundary_is_exclusive() {
    let env = TestEnv::with_points(&test_points_small());
    // P-01 sits at 265, exactly 10 away
    let output = env.run(&["phasing", "--angle", "275", "--json"]);

    assert_exit(&output, 0);
    let report = stdout_json(&output);
    assert_eq!(report["near"], serde_json::json!(["P-02"]));
}

#[test]
fn test_phasing_angle_is_clamped() {
    let env = TestEnv::with_points(&test_points_small());
    let output = env.run(&["phasing", "--angle", "-45", "--json"]);

    assert_exit(&output, 0);
    let report = stdout_json(&output);
    assert_eq!(report["simulatedAngle"], 0.0);
    assert_eq!(report["near"], serde_json::json!([]));
}

#[test]
fn test_phasing_svg_marks_near_points() {
    let env = TestEnv::with_points(&test_points_small());
    let output = env.run(&["phasing", "--angle", "268"]);

    assert_exit(&output, 0);
    let svg = stdout(&output);
    assert_eq!(svg.matches("dial-marker hoverable near").count(), 2);
    assert!(svg.contains(r#"class="needle""#));
}

#[test]
fn test_phasing_print_mode() {
    let env = TestEnv::with_points(&test_points_small());
    let output = env.run(&["phasing", "--angle", "268", "--print"]);

    assert_exit(&output, 0);
    let svg = stdout(&output);
    assert!(!svg.contains("data-point-id"));
    assert_eq!(svg.matches(r#"<g class="dial-marker">"#).count(), 2);
}

#[test]
fn test_phasing_json_conflicts_with_print() {
    let env = TestEnv::new();
    let output = env.run(&["phasing", "--json", "--print"]);

    assert!(!output.status.success());
}

// ============================================================================
// QR Command Tests
// ============================================================================

#[test]
fn test_qr_local_origin_without_override() {
    let env = TestEnv::new();
    let output = env.run(&["qr", "P-07", "--origin", "http://localhost:5173", "--json"]);

    assert_exit(&output, 0);
    let result = stdout_json(&output);
    assert_eq!(result["link"], "http://localhost:5173/?p=P-07");
    assert_eq!(
        result["qrImageUrl"],
        "https://api.qrserver.com/v1/create-qr-code/?size=200x200\
         &data=http%3A%2F%2Flocalhost%3A5173%2F%3Fp%3DP-07&margin=10&ecc=M&format=png"
    );
}

#[test]
fn test_qr_local_origin_warns_on_stderr() {
    let env = TestEnv::new();
    let output = env.run(&["qr", "P-07", "--origin", "http://127.0.0.1:8080"]);

    assert_exit(&output, 0);
    let lines: Vec<String> = stdout(&output).lines().map(str::to_string).collect();
    assert_eq!(lines[0], "http://127.0.0.1:8080/?p=P-07");
    assert!(stderr(&output).contains("qr.public_base_url"));
}

#[test]
fn test_qr_public_base_url_applies_to_local_origin_only() {
    let env = TestEnv::new();
    let set = env.run(&["config", "set", "qr.public_base_url", "https://line3.example.com/"]);
    assert_exit(&set, 0);

    let local = env.run(&["qr", "P-07", "--origin", "http://localhost:5173", "--json"]);
    assert_exit(&local, 0);
    assert_eq!(stdout_json(&local)["link"], "https://line3.example.com/?p=P-07");

    let remote = env.run(&["qr", "P-07", "--origin", "https://dash.example.com", "--json"]);
    assert_exit(&remote, 0);
    assert_eq!(stdout_json(&remote)["link"], "https://dash.example.com/?p=P-07");
}

#[test]
fn test_qr_custom_size() {
    let env = TestEnv::new();
    let output = env.run(&["qr", "P-01", "--origin", "https://dash.example.com", "--size", "300", "--json"]);

    assert_exit(&output, 0);
    let url = stdout_json(&output)["qrImageUrl"].as_str().unwrap().to_string();
    assert!(url.contains("size=300x300"));
}

#[test]
fn test_qr_rejects_size_out_of_range() {
    let env = TestEnv::new();
    let output = env.run(&["qr", "P-01", "--origin", "https://dash.example.com", "--size", "10"]);

    assert_exit(&output, 1);
}

#[test]
fn test_qr_unknown_point() {
    let env = TestEnv::new();
    let output = env.run(&["qr", "P-99", "--origin", "https://dash.example.com"]);

    assert_exit(&output, 3);
}
