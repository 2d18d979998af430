//! Command-line front end: parse arguments, extract the resume text, run one
//! analysis, and render the report.

use std::io::Read;
use std::path::PathBuf;

use clap::Parser;

use atscore::logging::{LogLevel, init_logging};
use atscore::{
    AnalysisReport, AnalysisRequest, Analyzer, AtsError, GeminiClient, GeminiModel, extract,
};

#[derive(Parser, Debug)]
#[command(
    name = "atscore",
    version,
    about = "Score a resume against a job description with the Gemini API"
)]
struct Cli {
    /// Path to the resume PDF
    #[arg(long)]
    resume: PathBuf,

    /// Path to the job description text file, or `-` to read it from stdin
    #[arg(long)]
    jd: PathBuf,

    /// Override the pinned Gemini model
    #[arg(long)]
    model: Option<String>,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

async fn run() -> atscore::Result<()> {
    dotenvy::dotenv().ok(); // load .env if present; ignore if missing
    init_logging(LogLevel::Warn);

    let cli = Cli::parse();

    // Fail on missing credentials before touching any input.
    let mut client = GeminiClient::from_env()?;
    if let Some(model) = cli.model {
        client = client.model(GeminiModel::from_string(model));
    }

    let pdf = std::fs::read(&cli.resume).map_err(|e| {
        AtsError::Extraction(format!("could not read {}: {e}", cli.resume.display()))
    })?;
    let resume_text = extract::resume_text_from_pdf(&pdf)?;

    let jd_text = read_jd(&cli.jd)?;
    if jd_text.trim().is_empty() {
        return Err(AtsError::Unexpected(
            "the job description is empty".to_string(),
        ));
    }

    let analyzer = Analyzer::new(client);
    let request = AnalysisRequest {
        resume_text,
        jd_text,
    };

    eprintln!("Analyzing resume, this may take a moment...");
    let report = analyzer.analyze(&request).await?;
    render_report(&report);
    Ok(())
}

fn read_jd(path: &PathBuf) -> atscore::Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| AtsError::Unexpected(format!("could not read stdin: {e}")))?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path)
            .map_err(|e| AtsError::Unexpected(format!("could not read {}: {e}", path.display())))
    }
}

/// Label for a score band, mirroring the 80/60 thresholds the report UI uses
/// for green/orange/red.
fn score_band(score: i64) -> &'static str {
    if score >= 80 {
        "strong"
    } else if score >= 60 {
        "fair"
    } else {
        "weak"
    }
}

fn render_report(report: &AnalysisReport) {
    println!("ATS Compatibility Report");
    println!("========================");
    println!();
    println!("Match score: {}/100 ({})", report.score, score_band(report.score));
    println!();
    println!("Summary: {}", report.summary);
    println!();
    println!("Keyword match");
    println!("-------------");
    println!("{}", report.feedback.keyword_match);
    println!();
    println!("Content impact");
    println!("--------------");
    println!("{}", report.feedback.content_impact);
    println!();
    println!("Formatting and structure");
    println!("------------------------");
    println!("{}", report.feedback.formatting_and_structure);
}
