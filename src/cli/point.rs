//! Point catalog commands: table view, detail view, add/edit forms and status tags.

use std::path::Path;

use clap::{Args, Subcommand};
use regex::RegexBuilder;

use crate::cli::common::{open_catalog, print_json, CliError, CliResult};
use crate::models::{Coordinates, Criticality, Point, PointDraft, Status, Zone};
use crate::services::PointFilter;

/// Browse and edit calibration points
#[derive(Debug, Clone, Args)]
pub struct PointArgs {
    /// Point subcommand
    #[command(subcommand)]
    pub command: PointCommand,
}

/// Point subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum PointCommand {
    /// List points ordered by number (hidden points included)
    List(ListPointsArgs),
    /// Show every field of one point
    Show(ShowPointArgs),
    /// Add a new point
    Add(AddPointArgs),
    /// Edit an existing point (full replace)
    Edit(EditPointArgs),
    /// Tag a point OK, yellow or red
    Status(StatusArgs),
}

/// List points ordered by number
#[derive(Debug, Clone, Args)]
pub struct ListPointsArgs {
    /// Only points in this zone
    #[arg(long, value_name = "ZONE")]
    pub zone: Option<Zone>,

    /// Only points with this criticality
    #[arg(long, value_name = "LEVEL")]
    pub criticality: Option<Criticality>,

    /// Only points with this status (ok, yellow, red)
    #[arg(long, value_name = "STATUS")]
    pub status: Option<Status>,

    /// Case-insensitive regex matched against id, name and description
    #[arg(long, value_name = "REGEX")]
    pub search: Option<String>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Show one point
#[derive(Debug, Clone, Args)]
pub struct ShowPointArgs {
    /// Point id (e.g. P-07)
    #[arg(value_name = "ID")]
    pub id: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Form fields shared by add and edit. Unset fields keep their draft value.
#[derive(Debug, Clone, Default, Args)]
pub struct PointFields {
    /// Display name
    #[arg(long)]
    pub name: Option<String>,

    /// Line section
    #[arg(long, value_name = "ZONE")]
    pub zone: Option<Zone>,

    /// Free-text description
    #[arg(long)]
    pub description: Option<String>,

    /// Calibration target (e.g. "125 mm")
    #[arg(long, value_name = "TEXT")]
    pub target: Option<String>,

    /// Accepted deviation (e.g. "± 2 mm")
    #[arg(long, value_name = "TEXT")]
    pub tolerance: Option<String>,

    /// How to verify the setting
    #[arg(long, value_name = "TEXT")]
    pub method: Option<String>,

    /// Severity ranking
    #[arg(long, value_name = "LEVEL")]
    pub criticality: Option<Criticality>,

    /// Horizontal map position, percent
    #[arg(long, allow_hyphen_values = true)]
    pub x: Option<f64>,

    /// Vertical map position, percent
    #[arg(long, allow_hyphen_values = true)]
    pub y: Option<f64>,

    /// Position in the machine cycle, degrees
    #[arg(long, value_name = "DEG", allow_hyphen_values = true)]
    pub phase: Option<f64>,

    /// Primary photo (URL or data URI)
    #[arg(long, value_name = "REF")]
    pub primary_image: Option<String>,

    /// Secondary photo (URL or data URI)
    #[arg(long, value_name = "REF")]
    pub secondary_image: Option<String>,
}

impl PointFields {
    fn apply(&self, mut draft: PointDraft) -> CliResult<PointDraft> {
        if let Some(name) = &self.name {
            draft.name = Some(name.clone());
        }
        if let Some(zone) = self.zone {
            draft.zone = Some(zone);
        }
        if let Some(description) = &self.description {
            draft.description = Some(description.clone());
        }
        if let Some(target) = &self.target {
            draft.target_value = Some(target.clone());
        }
        if let Some(tolerance) = &self.tolerance {
            draft.tolerance = Some(tolerance.clone());
        }
        if let Some(method) = &self.method {
            draft.measure_method = Some(method.clone());
        }
        if let Some(criticality) = self.criticality {
            draft.criticality = Some(criticality);
        }
        if let Some(phase) = self.phase {
            draft.phase_angle = Some(phase);
        }
        if let Some(image) = &self.primary_image {
            draft.primary_image = Some(image.clone());
        }
        if let Some(image) = &self.secondary_image {
            draft.secondary_image = Some(image.clone());
        }

        draft.coordinates = match (self.x, self.y, draft.coordinates) {
            (None, None, current) => current,
            (Some(x), Some(y), _) => Some(Coordinates::new(x, y)),
            (Some(x), None, Some(current)) => Some(Coordinates::new(x, current.y)),
            (None, Some(y), Some(current)) => Some(Coordinates::new(current.x, y)),
            (_, _, None) => {
                return Err(CliError::validation(
                    "Both --x and --y are needed to place a point on the map",
                ))
            }
        };

        Ok(draft)
    }
}

/// Add a new point
#[derive(Debug, Clone, Args)]
pub struct AddPointArgs {
    /// Form fields
    #[command(flatten)]
    pub fields: PointFields,

    /// Display number (defaults to one past the highest)
    #[arg(long)]
    pub number: Option<u32>,

    /// Keep the point off the map
    #[arg(long)]
    pub hidden: bool,

    /// Output the created point as JSON
    #[arg(long)]
    pub json: bool,
}

/// Edit an existing point
#[derive(Debug, Clone, Args)]
pub struct EditPointArgs {
    /// Point id (e.g. P-07)
    #[arg(value_name = "ID")]
    pub id: String,

    /// Form fields
    #[command(flatten)]
    pub fields: PointFields,

    /// Display number
    #[arg(long)]
    pub number: Option<u32>,

    /// Show or hide the map marker
    #[arg(long, value_name = "BOOL")]
    pub visible: Option<bool>,

    /// Remove the phase angle
    #[arg(long, conflicts_with = "phase")]
    pub clear_phase: bool,

    /// Output the updated point as JSON
    #[arg(long)]
    pub json: bool,
}

/// Tag a point
#[derive(Debug, Clone, Args)]
pub struct StatusArgs {
    /// Point id (e.g. P-07)
    #[arg(value_name = "ID")]
    pub id: String,

    /// New status: ok, yellow or red
    #[arg(value_name = "STATUS")]
    pub status: Status,

    /// Output the updated point as JSON
    #[arg(long)]
    pub json: bool,
}

impl PointArgs {
    /// Execute the point command
    pub fn execute(&self, data_dir: Option<&Path>) -> CliResult<()> {
        match &self.command {
            PointCommand::List(args) => args.execute(data_dir),
            PointCommand::Show(args) => args.execute(data_dir),
            PointCommand::Add(args) => args.execute(data_dir),
            PointCommand::Edit(args) => args.execute(data_dir),
            PointCommand::Status(args) => args.execute(data_dir),
        }
    }
}

impl ListPointsArgs {
    /// Execute the list command
    pub fn execute(&self, data_dir: Option<&Path>) -> CliResult<()> {
        let search = self
            .search
            .as_deref()
            .map(|pattern| {
                RegexBuilder::new(pattern)
                    .case_insensitive(true)
                    .build()
                    .map_err(|e| CliError::validation(format!("Invalid search pattern: {e}")))
            })
            .transpose()?;

        let filter = PointFilter {
            zone: self.zone,
            criticality: self.criticality,
            status: self.status,
            search,
        };

        let catalog = open_catalog(data_dir)?;
        let rows = catalog.table(&filter);

        if self.json {
            return print_json(&rows);
        }

        if rows.is_empty() {
            println!("No points match.");
            return Ok(());
        }

        println!("Points ({}):", rows.len());
        println!();
        for point in rows {
            let map = point
                .map_position()
                .map_or_else(|| "hidden".to_string(), |c| format!("{:.1},{:.1}", c.x, c.y));
            let stop = if point.criticality.stops_line() { " STOP" } else { "" };
            println!(
                "  {:<6} {:>3}  {:<30} {:<11} {:<9} {:<12} {}{}",
                point.id,
                point.number,
                point.name,
                point.zone,
                point.criticality,
                point.status,
                map,
                stop
            );
        }

        Ok(())
    }
}

impl ShowPointArgs {
    /// Execute the show command
    pub fn execute(&self, data_dir: Option<&Path>) -> CliResult<()> {
        let catalog = open_catalog(data_dir)?;
        let point = catalog
            .point(&self.id)
            .ok_or_else(|| CliError::not_found(format!("Point '{}' not found", self.id)))?;

        if self.json {
            print_json(point)
        } else {
            print_detail(point);
            Ok(())
        }
    }
}

impl AddPointArgs {
    /// Execute the add command
    pub fn execute(&self, data_dir: Option<&Path>) -> CliResult<()> {
        let mut draft = self.fields.apply(PointDraft::new())?;
        draft.number = self.number;
        if self.hidden {
            draft.visible_on_map = Some(false);
        }

        let mut catalog = open_catalog(data_dir)?;
        let point = draft.commit(catalog.next_number())?;
        catalog.add_point(point.clone())?;

        if self.json {
            print_json(&point)
        } else {
            println!("Added {} ({})", point.id, point.name);
            Ok(())
        }
    }
}

impl EditPointArgs {
    /// Execute the edit command
    pub fn execute(&self, data_dir: Option<&Path>) -> CliResult<()> {
        let mut catalog = open_catalog(data_dir)?;
        let current = catalog
            .point(&self.id)
            .ok_or_else(|| CliError::not_found(format!("Point '{}' not found", self.id)))?;

        let mut draft = self.fields.apply(PointDraft::from_point(current))?;
        if let Some(number) = self.number {
            draft.number = Some(number);
        }
        if let Some(visible) = self.visible {
            draft.visible_on_map = Some(visible);
        }
        if self.clear_phase {
            draft.phase_angle = None;
        }

        let point = draft.commit(catalog.next_number())?;
        catalog.replace_point(point.clone());

        if self.json {
            print_json(&point)
        } else {
            println!("Updated {} ({})", point.id, point.name);
            Ok(())
        }
    }
}

impl StatusArgs {
    /// Execute the status command
    pub fn execute(&self, data_dir: Option<&Path>) -> CliResult<()> {
        let mut catalog = open_catalog(data_dir)?;
        let point = catalog.set_status(&self.id, self.status)?;

        if self.json {
            print_json(point)
        } else {
            println!("{} is now {}", point.id, point.status);
            Ok(())
        }
    }
}

fn print_detail(point: &Point) {
    println!("{} #{} {}", point.id, point.number, point.name);
    println!();
    println!("  Zone:          {}", point.zone);
    println!(
        "  Criticality:   {}{}",
        point.criticality,
        if point.criticality.stops_line() {
            " (stop the line)"
        } else {
            ""
        }
    );
    println!("  Status:        {}", point.status);
    if let Some(checked) = point.last_checked {
        println!("  Last checked:  {}", checked.to_rfc3339());
    }
    println!("  Target:        {}", point.target_value);
    println!("  Tolerance:     {}", point.tolerance);
    println!("  Method:        {}", point.measure_method);
    match point.coordinates {
        Some(c) if point.visible_on_map => println!("  Map:           {:.1}%, {:.1}%", c.x, c.y),
        _ => println!("  Map:           hidden"),
    }
    if let Some(angle) = point.phase_angle {
        println!("  Phase angle:   {angle}°");
    }
    if !point.description.is_empty() {
        println!();
        println!("  {}", point.description);
    }
}
