//! Shared test fixtures for E2E CLI tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use centerline::models::{Coordinates, Criticality, Module, Point, Status, Zone};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Path to the centerline binary
pub fn centerline_bin() -> String {
    std::env::var("CARGO_BIN_EXE_centerline")
        .unwrap_or_else(|_| "target/debug/centerline".to_string())
}

/// Isolated configuration and data directories for one test.
pub struct TestEnv {
    config_dir: TempDir,
    data_dir: TempDir,
}

impl TestEnv {
    /// Creates empty config and data directories.
    pub fn new() -> Self {
        Self {
            config_dir: TempDir::new().expect("Failed to create config dir"),
            data_dir: TempDir::new().expect("Failed to create data dir"),
        }
    }

    /// Creates an environment whose data directory already holds `points`.
    pub fn with_points(points: &[Point]) -> Self {
        let env = Self::new();
        write_points(env.data_dir(), points);
        env
    }

    pub fn config_dir(&self) -> &Path {
        self.config_dir.path()
    }

    pub fn data_dir(&self) -> &Path {
        self.data_dir.path()
    }

    pub fn points_file(&self) -> PathBuf {
        self.data_dir().join("points.json")
    }

    pub fn layout_file(&self) -> PathBuf {
        self.data_dir().join("layout.json")
    }

    /// Builds a command with the isolated config directory and `--data-dir`.
    pub fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(centerline_bin());
        cmd.env("CENTERLINE_CONFIG_DIR", self.config_dir());
        cmd.env_remove("RUST_LOG");
        cmd.arg("--data-dir").arg(self.data_dir());
        cmd.args(args);
        cmd
    }

    /// Runs a command and returns its output.
    pub fn run(&self, args: &[&str]) -> Output {
        self.command(args)
            .output()
            .expect("Failed to execute command")
    }

    /// Reads the stored points back.
    pub fn stored_points(&self) -> Vec<Point> {
        let content = fs::read_to_string(self.points_file()).expect("points.json should exist");
        serde_json::from_str(&content).expect("points.json should parse")
    }

    /// Reads the stored modules back.
    pub fn stored_modules(&self) -> Vec<Module> {
        let content = fs::read_to_string(self.layout_file()).expect("layout.json should exist");
        serde_json::from_str(&content).expect("layout.json should parse")
    }
}

/// Asserts a process exit code, printing stderr on mismatch.
pub fn assert_exit(output: &Output, expected: i32) {
    assert_eq!(
        output.status.code(),
        Some(expected),
        "unexpected exit code. stdout: {} stderr: {}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// Parses stdout as JSON.
pub fn stdout_json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

/// Writes `points` as the stored point collection.
pub fn write_points(dir: &Path, points: &[Point]) {
    let json = serde_json::to_string_pretty(points).expect("Failed to serialize points");
    fs::write(dir.join("points.json"), json).expect("Failed to write points.json");
}

/// A point with the given number, position and phase angle.
pub fn test_point(number: u32, at: Option<(f64, f64)>, phase_angle: Option<f64>) -> Point {
    Point {
        id: Point::id_for_number(number),
        number,
        name: format!("Check {number}"),
        zone: Zone::Forming,
        description: String::new(),
        target_value: "10 mm".to_string(),
        tolerance: "± 1 mm".to_string(),
        measure_method: "Caliper".to_string(),
        criticality: Criticality::Medium,
        status: Status::Ok,
        last_checked: None,
        primary_image: None,
        secondary_image: None,
        coordinates: at.map(|(x, y)| Coordinates::new(x, y)),
        visible_on_map: at.is_some(),
        phase_angle,
    }
}

/// Three points: two phased and on the map, one hidden and unphased.
pub fn test_points_small() -> Vec<Point> {
    let mut hidden = test_point(3, None, None);
    hidden.name = "Hidden gauge".to_string();
    hidden.zone = Zone::Discharge;
    hidden.criticality = Criticality::Critical;

    let mut knife = test_point(2, Some((50.0, 50.0)), Some(272.0));
    knife.name = "Knife timing".to_string();
    knife.zone = Zone::ShrinkFilm;
    knife.criticality = Criticality::Critical;
    knife.status = Status::TaggedRed;

    vec![test_point(1, Some((10.0, 20.0)), Some(265.0)), knife, hidden]
}
