//! Rename command implementation
//!
//! Prefixes every bone of the chosen skeletons with the skeleton's name.

use anyhow::{Context, Result};
use colored::Colorize;
use curvebones_rig::SceneDocument;
use log::info;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use thiserror::Error;

use super::json_output::{
    error_codes, input_error_to_json, print_json, JsonError, RenameOutput, RenamedSkeleton,
};
use crate::input::{load_scene, save_scene};

/// Arguments for `curvebones rename`.
#[derive(Debug, Clone, Default)]
pub struct RenameArgs {
    pub scene: PathBuf,
    /// Skeletons to rename. Empty means the selected skeletons.
    pub skeletons: Vec<String>,
    pub output: Option<PathBuf>,
    pub json: bool,
}

impl RenameArgs {
    fn output_path(&self) -> &Path {
        self.output.as_deref().unwrap_or(&self.scene)
    }
}

#[derive(Debug, Error)]
pub enum RenameError {
    #[error("no skeleton named '{0}' in the scene")]
    UnknownSkeleton(String),

    #[error("no skeletons selected")]
    NoSkeletons,
}

impl RenameError {
    fn to_json(&self) -> JsonError {
        let code = match self {
            RenameError::UnknownSkeleton(_) => error_codes::UNKNOWN_OBJECT,
            RenameError::NoSkeletons => error_codes::NO_SKELETONS,
        };
        JsonError::new(code, self.to_string())
    }
}

/// Qualifies bone names on the named skeletons (or the selected ones).
///
/// Every name is checked before anything is renamed.
pub fn rename_skeletons(
    scene: &mut SceneDocument,
    names: &[String],
) -> Result<Vec<RenamedSkeleton>, RenameError> {
    let targets = if names.is_empty() {
        scene.selected_skeleton_names()
    } else {
        names.to_vec()
    };
    if targets.is_empty() {
        return Err(RenameError::NoSkeletons);
    }
    if let Some(missing) = targets.iter().find(|n| scene.skeleton_named(n).is_none()) {
        return Err(RenameError::UnknownSkeleton(missing.clone()));
    }

    let mut results = Vec::with_capacity(targets.len());
    for name in targets {
        let Some(skeleton) = scene.skeleton_named_mut(&name) else {
            continue;
        };
        let renamed = skeleton.qualify_bone_names();
        for (old, new) in &renamed {
            info!("Renaming '{}' to '{}'", old, new);
        }
        results.push(RenamedSkeleton {
            skeleton: name,
            renamed,
        });
    }
    Ok(results)
}

/// Run the rename command
///
/// # Returns
/// Exit code: 0 on success, 1 on error
pub fn run(args: &RenameArgs) -> Result<ExitCode> {
    if args.json {
        run_json(args)
    } else {
        run_human(args)
    }
}

fn run_human(args: &RenameArgs) -> Result<ExitCode> {
    println!(
        "{} {}",
        "Renaming bones in:".cyan().bold(),
        args.scene.display()
    );

    let mut scene = load_scene(&args.scene)
        .with_context(|| format!("Failed to load scene: {}", args.scene.display()))?;
    let results = rename_skeletons(&mut scene, &args.skeletons)?;

    for result in &results {
        println!(
            "  {} {} ({} bone(s) renamed)",
            "✓".green(),
            result.skeleton.bold(),
            result.renamed.len()
        );
        for (old, new) in &result.renamed {
            println!("    {} {} {}", old.dimmed(), "->".dimmed(), new);
        }
    }

    let output_path = args.output_path();
    save_scene(&scene, output_path)
        .with_context(|| format!("Failed to write scene: {}", output_path.display()))?;

    println!(
        "\n{} Scene written to {}",
        "SUCCESS".green().bold(),
        output_path.display()
    );
    Ok(ExitCode::SUCCESS)
}

fn run_json(args: &RenameArgs) -> Result<ExitCode> {
    let mut scene = match load_scene(&args.scene) {
        Ok(scene) => scene,
        Err(e) => return fail_json(input_error_to_json(&e)),
    };

    let results = match rename_skeletons(&mut scene, &args.skeletons) {
        Ok(results) => results,
        Err(e) => return fail_json(e.to_json()),
    };

    let output_path = args.output_path();
    if let Err(e) = save_scene(&scene, output_path) {
        return fail_json(input_error_to_json(&e));
    }

    print_json(&RenameOutput {
        success: true,
        errors: Vec::new(),
        skeletons: results,
        output: Some(output_path.display().to_string()),
    })?;
    Ok(ExitCode::SUCCESS)
}

fn fail_json(error: JsonError) -> Result<ExitCode> {
    print_json(&RenameOutput::failure(vec![error]))?;
    Ok(ExitCode::from(1))
}
