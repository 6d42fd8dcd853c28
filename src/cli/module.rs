//! Layout module commands.
//!
//! Provides commands to list, add, update, delete and render the labelled
//! rectangles composing the editable schematic.

use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use serde::Serialize;

use crate::cli::common::{open_catalog, print_json, write_output, CliError, CliResult};
use crate::export::{render_layout, RenderMode};
use crate::models::{Module, ModuleColor};

/// Manage layout modules
#[derive(Debug, Clone, Args)]
pub struct ModuleArgs {
    /// Module subcommand
    #[command(subcommand)]
    pub command: ModuleCommand,
}

/// Module management subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum ModuleCommand {
    /// List all modules
    List(ListModulesArgs),
    /// Add a module
    Add(AddModuleArgs),
    /// Change fields of a module
    Update(UpdateModuleArgs),
    /// Remove a module
    Delete(DeleteModuleArgs),
    /// Render the layout as SVG
    Render(RenderLayoutArgs),
}

/// List all modules
#[derive(Debug, Clone, Args)]
pub struct ListModulesArgs {
    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Add a module
#[derive(Debug, Clone, Args)]
pub struct AddModuleArgs {
    /// Module id (generated when omitted)
    #[arg(long, value_name = "ID")]
    pub id: Option<String>,

    /// Display text
    #[arg(long)]
    pub label: String,

    /// Left edge, percent
    #[arg(long)]
    pub x: f64,

    /// Top edge, percent
    #[arg(long)]
    pub y: f64,

    /// Width, percent
    #[arg(long)]
    pub width: f64,

    /// Height, percent
    #[arg(long)]
    pub height: f64,

    /// Palette token (slate, blue, emerald, amber, rose, violet) or any CSS colour
    #[arg(long, default_value = "slate")]
    pub color: String,

    /// Fill the rectangle instead of outlining it
    #[arg(long)]
    pub fill: bool,

    /// Wrap the label inside the rectangle
    #[arg(long)]
    pub wrap: bool,

    /// Label size, percent of canvas height
    #[arg(long)]
    pub font_size: Option<f64>,
}

/// Change fields of a module
#[derive(Debug, Clone, Args)]
pub struct UpdateModuleArgs {
    /// Module id
    #[arg(value_name = "ID")]
    pub id: String,

    /// Display text
    #[arg(long)]
    pub label: Option<String>,

    /// Left edge, percent
    #[arg(long)]
    pub x: Option<f64>,

    /// Top edge, percent
    #[arg(long)]
    pub y: Option<f64>,

    /// Width, percent
    #[arg(long)]
    pub width: Option<f64>,

    /// Height, percent
    #[arg(long)]
    pub height: Option<f64>,

    /// Palette token or any CSS colour
    #[arg(long)]
    pub color: Option<String>,

    /// Fill the rectangle instead of outlining it
    #[arg(long, value_name = "BOOL")]
    pub fill: Option<bool>,

    /// Wrap the label inside the rectangle
    #[arg(long, value_name = "BOOL")]
    pub wrap: Option<bool>,

    /// Label size, percent of canvas height
    #[arg(long)]
    pub font_size: Option<f64>,
}

/// Remove a module
#[derive(Debug, Clone, Args)]
pub struct DeleteModuleArgs {
    /// Module id
    #[arg(value_name = "ID")]
    pub id: String,
}

/// Render the layout as SVG
#[derive(Debug, Clone, Args)]
pub struct RenderLayoutArgs {
    /// High-contrast output without interactive hooks
    #[arg(long)]
    pub print: bool,

    /// Write to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct ListModulesResponse<'a> {
    modules: &'a [Module],
    count: usize,
}

impl ModuleArgs {
    /// Execute the module command
    pub fn execute(&self, data_dir: Option<&Path>) -> CliResult<()> {
        match &self.command {
            ModuleCommand::List(args) => args.execute(data_dir),
            ModuleCommand::Add(args) => args.execute(data_dir),
            ModuleCommand::Update(args) => args.execute(data_dir),
            ModuleCommand::Delete(args) => args.execute(data_dir),
            ModuleCommand::Render(args) => args.execute(data_dir),
        }
    }
}

impl ListModulesArgs {
    /// Execute the list command
    pub fn execute(&self, data_dir: Option<&Path>) -> CliResult<()> {
        let catalog = open_catalog(data_dir)?;
        let modules = catalog.modules();

        if self.json {
            return print_json(&ListModulesResponse {
                modules,
                count: modules.len(),
            });
        }

        if modules.is_empty() {
            println!("No modules defined.");
            return Ok(());
        }

        println!("Modules ({}):", modules.len());
        println!();
        for module in modules {
            println!(
                "  {:<20} {:<20} x={:<6} y={:<6} w={:<6} h={:<6} {}",
                module.id, module.label, module.x, module.y, module.width, module.height, module.color
            );
        }
        Ok(())
    }
}

impl AddModuleArgs {
    /// Execute the add command
    pub fn execute(&self, data_dir: Option<&Path>) -> CliResult<()> {
        let id = match &self.id {
            Some(id) if id.trim().is_empty() => {
                return Err(CliError::validation("Module id cannot be blank"))
            }
            Some(id) => id.trim().to_string(),
            None => Module::generate_id(),
        };

        let mut module = Module::new(id, &self.label, self.x, self.y, self.width, self.height);
        module.color = normalize_color(&self.color);
        module.has_fill = self.fill;
        module.wrap_text = self.wrap;
        if let Some(size) = self.font_size {
            module.font_size = size;
        }
        check_geometry(&module)?;

        let mut catalog = open_catalog(data_dir)?;
        let id = module.id.clone();
        catalog.add_module(module)?;
        println!("Added module {id}");
        Ok(())
    }
}

impl UpdateModuleArgs {
    /// Execute the update command
    pub fn execute(&self, data_dir: Option<&Path>) -> CliResult<()> {
        let mut catalog = open_catalog(data_dir)?;
        let mut module = catalog
            .module(&self.id)
            .cloned()
            .ok_or_else(|| CliError::not_found(format!("Module '{}' not found", self.id)))?;

        if let Some(label) = &self.label {
            module.label.clone_from(label);
        }
        if let Some(x) = self.x {
            module.x = x;
        }
        if let Some(y) = self.y {
            module.y = y;
        }
        if let Some(width) = self.width {
            module.width = width;
        }
        if let Some(height) = self.height {
            module.height = height;
        }
        if let Some(color) = &self.color {
            module.color = normalize_color(color);
        }
        if let Some(fill) = self.fill {
            module.has_fill = fill;
        }
        if let Some(wrap) = self.wrap {
            module.wrap_text = wrap;
        }
        if let Some(size) = self.font_size {
            module.font_size = size;
        }
        check_geometry(&module)?;

        catalog.update_module(module);
        println!("Updated module {}", self.id);
        Ok(())
    }
}

impl DeleteModuleArgs {
    /// Execute the delete command
    pub fn execute(&self, data_dir: Option<&Path>) -> CliResult<()> {
        let mut catalog = open_catalog(data_dir)?;
        if catalog.delete_module(&self.id) {
            println!("Deleted module {}", self.id);
        } else {
            println!("No module '{}'; nothing deleted", self.id);
        }
        Ok(())
    }
}

impl RenderLayoutArgs {
    /// Execute the render command
    pub fn execute(&self, data_dir: Option<&Path>) -> CliResult<()> {
        let catalog = open_catalog(data_dir)?;
        let svg = render_layout(catalog.modules(), RenderMode::from_print_flag(self.print));
        write_output(self.output.as_deref(), &svg)
    }
}

/// Palette tokens are stored lowercase; anything else is kept verbatim.
fn normalize_color(color: &str) -> String {
    ModuleColor::from_token(color).map_or_else(|| color.trim().to_string(), |c| c.token().to_string())
}

/// Rejects sizes that cannot be drawn. Position and overlap are unconstrained.
fn check_geometry(module: &Module) -> CliResult<()> {
    let finite = [module.x, module.y, module.width, module.height, module.font_size]
        .iter()
        .all(|v| v.is_finite());
    if !finite {
        return Err(CliError::validation("Module geometry must be finite numbers"));
    }
    if module.width <= 0.0 || module.height <= 0.0 {
        return Err(CliError::validation("Module width and height must be positive"));
    }
    if module.font_size <= 0.0 {
        return Err(CliError::validation("Font size must be positive"));
    }
    Ok(())
}
