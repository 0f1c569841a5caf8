//! Build command implementation
//!
//! Builds one skeleton per selected curve and writes the updated scene.

use anyhow::{Context, Result};
use colored::Colorize;
use curvebones_rig::{
    run_batch, BatchError, BatchOutcome, BatchReport, BuildOptions, CurveData, SceneDocument,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use thiserror::Error;

use super::json_output::{
    error_codes, input_error_to_json, print_json, rig_error_to_json, BuildOutput, JsonError,
};
use crate::config::{resolve_options, OptionOverrides};
use crate::input::{load_scene, save_scene};

/// Arguments for `curvebones build`.
#[derive(Debug, Clone, Default)]
pub struct BuildArgs {
    /// Scene document to read.
    pub scene: PathBuf,
    /// Curves to build, by name. Empty means "use the scene selection".
    pub objects: Vec<String>,
    /// Optional JSON file with [`BuildOptions`].
    pub config: Option<PathBuf>,
    pub overrides: OptionOverrides,
    /// Where to write the updated scene (default: overwrite `scene`).
    pub output: Option<PathBuf>,
    pub json: bool,
}

impl BuildArgs {
    fn output_path(&self) -> &Path {
        self.output.as_deref().unwrap_or(&self.scene)
    }
}

/// Errors that stop a build before or during the batch.
#[derive(Debug, Error)]
pub enum BuildError {
    /// A curve named on the command line is not in the scene.
    #[error("no curve named '{0}' in the scene")]
    UnknownCurve(String),

    #[error(transparent)]
    Batch(#[from] BatchError),
}

impl BuildError {
    fn to_json(&self) -> JsonError {
        match self {
            BuildError::UnknownCurve(_) => {
                JsonError::new(error_codes::UNKNOWN_OBJECT, self.to_string())
            }
            BuildError::Batch(err) => rig_error_to_json(err),
        }
    }
}

/// Picks the curves a build operates on.
///
/// Explicit names win, in the order given. Otherwise the selected curves are
/// used; with nothing selected the list is empty and the batch refuses to run.
pub fn select_curves(
    scene: &SceneDocument,
    objects: &[String],
) -> Result<Vec<CurveData>, BuildError> {
    if !objects.is_empty() {
        return objects
            .iter()
            .map(|name| {
                scene
                    .curve(name)
                    .cloned()
                    .ok_or_else(|| BuildError::UnknownCurve(name.clone()))
            })
            .collect();
    }

    Ok(scene.selected_curves().into_iter().cloned().collect())
}

/// Runs the batch against `scene` for the chosen curves.
pub fn build_scene(
    scene: &mut SceneDocument,
    objects: &[String],
    options: &BuildOptions,
) -> Result<BatchOutcome, BuildError> {
    let curves = select_curves(scene, objects)?;
    Ok(run_batch(scene, &curves, options)?)
}

/// Run the build command
///
/// # Returns
/// Exit code: 0 if every curve produced a skeleton, 1 otherwise
pub fn run(args: &BuildArgs) -> Result<ExitCode> {
    if args.json {
        run_json(args)
    } else {
        run_human(args)
    }
}

/// Run build with human-readable (colored) output
fn run_human(args: &BuildArgs) -> Result<ExitCode> {
    println!("{} {}", "Building:".cyan().bold(), args.scene.display());

    let options = resolve_options(args.config.as_deref(), &args.overrides)
        .context("Failed to resolve build options")?;
    println!(
        "{} {}, prefix '{}'{}",
        "Options:".dimmed(),
        options.direction().as_str(),
        options.bone_prefix,
        if options.qualify_names {
            ", qualified names"
        } else {
            ""
        }
    );

    let mut scene = load_scene(&args.scene)
        .with_context(|| format!("Failed to load scene: {}", args.scene.display()))?;

    let outcome = build_scene(&mut scene, &args.objects, &options)?;
    print_curve_results(&outcome.report);

    let output_path = args.output_path();
    save_scene(&scene, output_path)
        .with_context(|| format!("Failed to write scene: {}", output_path.display()))?;

    print_summary(&outcome.report, output_path);

    if outcome.report.ok {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}

/// Run build with machine-readable JSON output
fn run_json(args: &BuildArgs) -> Result<ExitCode> {
    let options = match resolve_options(args.config.as_deref(), &args.overrides) {
        Ok(options) => options,
        Err(e) => return fail_json(input_error_to_json(&e)),
    };

    let mut scene = match load_scene(&args.scene) {
        Ok(scene) => scene,
        Err(e) => return fail_json(input_error_to_json(&e)),
    };

    let outcome = match build_scene(&mut scene, &args.objects, &options) {
        Ok(outcome) => outcome,
        Err(e) => return fail_json(e.to_json()),
    };

    let output_path = args.output_path();
    if let Err(e) = save_scene(&scene, output_path) {
        let output = BuildOutput {
            report: Some(outcome.report),
            ..BuildOutput::failure(vec![input_error_to_json(&e)])
        };
        print_json(&output)?;
        return Ok(ExitCode::from(1));
    }

    let success = outcome.report.ok;
    let output = BuildOutput {
        success,
        errors: Vec::new(),
        report: Some(outcome.report),
        output: Some(output_path.display().to_string()),
    };
    print_json(&output)?;

    if success {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}

fn fail_json(error: JsonError) -> Result<ExitCode> {
    print_json(&BuildOutput::failure(vec![error]))?;
    Ok(ExitCode::from(1))
}

fn print_curve_results(report: &BatchReport) {
    for curve in &report.curves {
        match (&curve.skeleton, &curve.error) {
            (Some(skeleton), _) => println!(
                "  {} {} -> {} ({} chain(s), {} bone(s))",
                "✓".green(),
                curve.curve,
                skeleton.bold(),
                curve.chain_count,
                curve.bone_count
            ),
            (None, Some(error)) => println!(
                "  {} {} [{}]: {}",
                "✗".red(),
                curve.curve,
                error.code.red(),
                error.message
            ),
            (None, None) => println!("  {} {}", "✗".red(), curve.curve),
        }

        for issue in &curve.skipped {
            println!(
                "    {} [{}]: {}",
                "!".yellow(),
                issue.code.dimmed(),
                issue.message
            );
        }
    }
}

fn print_summary(report: &BatchReport, output_path: &Path) {
    let failed = report.failures().count();

    println!("\n{}", "=".repeat(60));
    println!(
        "{} {} {}",
        "Build Summary".bold(),
        "•".dimmed(),
        report.direction.as_str().dimmed()
    );
    println!("  Curves:    {}", report.curves.len());
    println!(
        "  Skeletons: {}",
        if failed == 0 {
            report.skeletons_created.to_string().green()
        } else {
            report.skeletons_created.to_string().normal()
        }
    );
    println!(
        "  Failed:    {}",
        if failed > 0 {
            failed.to_string().red()
        } else {
            failed.to_string().normal()
        }
    );
    println!("Scene: {}", output_path.display());
}
