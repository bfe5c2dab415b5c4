use clap::Args;
use drip_campaign::config::AppConfig;
use drip_campaign::error::AppError;
use drip_campaign::workflows::survey::{
    OptionId, PathWarnings, RoutingEngine, Selections, SurveyDefinition, SurveyGuard,
    SurveyImporter, ValidationReport,
};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub(crate) struct RouteArgs {
    /// Survey definition exported from the campaign builder (JSON)
    #[arg(long)]
    pub(crate) survey: PathBuf,
    /// Selected option id; repeat for each selected option
    #[arg(long = "select")]
    pub(crate) select: Vec<String>,
}

#[derive(Args, Debug)]
pub(crate) struct ValidateArgs {
    /// Survey definition exported from the campaign builder (JSON)
    #[arg(long)]
    pub(crate) survey: PathBuf,
}

fn load_survey(path: &Path) -> Result<SurveyDefinition, AppError> {
    let config = AppConfig::load()?;
    let importer = SurveyImporter::new(SurveyGuard::with_limits(config.intake));
    Ok(importer.load_path(path)?)
}

pub(crate) fn run_route(args: RouteArgs) -> Result<(), AppError> {
    let survey = load_survey(&args.survey)?;
    let selections: Selections = args.select.into_iter().map(OptionId).collect();

    print!("{}", render_route(&survey, &selections));
    Ok(())
}

pub(crate) fn run_validate(args: ValidateArgs) -> Result<(), AppError> {
    let survey = load_survey(&args.survey)?;
    let report = ValidationReport::build(&survey.paths, &survey.questions);

    print!("{}", render_report(&survey, &report));
    Ok(())
}

fn survey_heading(survey: &SurveyDefinition) -> String {
    if survey.title.is_empty() {
        "Survey".to_string()
    } else {
        format!("Survey: {}", survey.title)
    }
}

pub(crate) fn render_route(survey: &SurveyDefinition, selections: &Selections) -> String {
    let engine = RoutingEngine::new(survey.clone());
    let decision = engine.route(selections);

    let mut out = String::new();
    let _ = writeln!(out, "{}", survey_heading(survey));
    let selected: Vec<&str> = selections.iter().map(|option| option.0.as_str()).collect();
    let _ = writeln!(
        out,
        "- selected: {}",
        if selected.is_empty() {
            "(none)".to_string()
        } else {
            selected.join(", ")
        }
    );
    if let Some(score) = decision.score {
        let _ = writeln!(out, "- score: {score}");
    }
    match decision.path {
        Some(path) => {
            let _ = writeln!(
                out,
                "- path: {} ({}) via {}",
                path.id,
                if path.label.is_empty() {
                    "unlabelled"
                } else {
                    path.label.as_str()
                },
                decision.reason.label()
            );
        }
        None => {
            let _ = writeln!(out, "- path: none ({})", decision.reason.label());
        }
    }
    out
}

fn render_section(out: &mut String, heading: &str, entries: &PathWarnings) {
    if entries.is_empty() {
        return;
    }
    let _ = writeln!(out, "{heading}:");
    for (path, warnings) in entries {
        let _ = writeln!(out, "  {path}:");
        for warning in warnings {
            let _ = writeln!(out, "    - {warning}");
        }
    }
}

pub(crate) fn render_report(survey: &SurveyDefinition, report: &ValidationReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", survey_heading(survey));
    let _ = writeln!(
        out,
        "- {} question(s), {} path(s)",
        survey.questions.len(),
        survey.paths.len()
    );

    if report.is_clean() {
        let _ = writeln!(out, "No configuration warnings.");
        return out;
    }

    render_section(&mut out, "Warnings", &report.warnings);
    render_section(&mut out, "Dangling references", &report.dangling_references);
    out
}
