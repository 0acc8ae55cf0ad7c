use crate::engine::UpdateEngine;
use crate::model::{Location, PassEvent, RunConfig};
use crate::{storage, templates, text_summary};
use anyhow::{bail, Result};
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use std::sync::mpsc;

/// Output line routing for stdout/stderr writer.
enum OutputLine {
    Stdout(String),
    Stderr(String),
}

/// Spawn a dedicated writer for stdout/stderr so progress and summary lines
/// are routed and flushed in one place.
fn spawn_output_writer() -> (mpsc::Sender<OutputLine>, std::thread::JoinHandle<()>) {
    let (tx, rx) = mpsc::channel::<OutputLine>();
    let handle = std::thread::spawn(move || {
        let stdout = std::io::stdout();
        let stderr = std::io::stderr();
        let mut out = std::io::LineWriter::new(stdout.lock());
        let mut err = std::io::LineWriter::new(stderr.lock());

        while let Ok(line) = rx.recv() {
            match line {
                OutputLine::Stdout(msg) => {
                    let _ = writeln!(out, "{}", msg);
                }
                OutputLine::Stderr(msg) => {
                    let _ = writeln!(err, "{}", msg);
                }
            }
        }

        let _ = out.flush();
        let _ = err.flush();
    });
    (tx, handle)
}

#[derive(Debug, Parser, Clone)]
#[command(
    name = "docfill",
    version,
    about = "Fill a docx template with company, product and reference details"
)]
pub struct Cli {
    /// Directory scanned (non-recursively) for .docx templates
    #[arg(long)]
    pub template_dir: PathBuf,

    /// Template filename to process, as listed by --list-templates
    #[arg(long)]
    pub template: Option<String>,

    /// List selectable templates and exit
    #[arg(long)]
    pub list_templates: bool,

    /// New company name used in the generated reference
    #[arg(long)]
    pub company: Option<String>,

    /// Reference number used in the generated reference
    #[arg(long)]
    pub reference_number: Option<String>,

    /// Text substituted for the placeholder token; defaults to the token
    /// itself, leaving the document unchanged where it appears
    #[arg(long)]
    pub new_word: Option<String>,

    /// Placeholder token searched for in the template
    #[arg(long, default_value = "$@$")]
    pub placeholder: String,

    /// Product name; repeat for multiple, joined with '&' in the reference
    #[arg(long = "product")]
    pub products: Vec<String>,

    /// Contractual year; enables the contractual-year pass
    #[arg(long)]
    pub contractual_year: Option<String>,

    /// Marker identifying the footer cell carrying the old reference
    #[arg(long, default_value = "Ref.: ")]
    pub reference_marker: String,

    /// Output directory, created if missing; defaults to a docfill/processed
    /// folder under the platform documents directory
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Print the run result as JSON instead of a text summary
    #[arg(long)]
    pub json: bool,
}

/// Build a `RunConfig` from CLI arguments and the resolved template path.
pub fn build_config(args: &Cli, template_path: PathBuf) -> RunConfig {
    RunConfig {
        template_path,
        output_dir: args
            .output_dir
            .clone()
            .unwrap_or_else(storage::default_output_dir),
        placeholder: args.placeholder.clone(),
        replacement: args
            .new_word
            .clone()
            .unwrap_or_else(|| args.placeholder.clone()),
        reference_marker: args.reference_marker.clone(),
        company: args.company.clone().unwrap_or_default(),
        reference_number: args.reference_number.clone().unwrap_or_default(),
        products: args.products.clone(),
        contractual_year: args
            .contractual_year
            .clone()
            .filter(|year| !year.trim().is_empty()),
    }
}

fn location_label(location: Location) -> &'static str {
    match location {
        Location::ParagraphRun => "paragraph",
        Location::TableCell => "table cell",
        Location::FooterCell => "footer cell",
    }
}

pub fn run(args: Cli) -> Result<()> {
    if args.list_templates {
        let entries = templates::list_templates(&args.template_dir)?;
        if entries.is_empty() {
            bail!(
                "no .{} templates in {}",
                templates::TEMPLATE_EXTENSION,
                args.template_dir.display()
            );
        }
        for entry in entries {
            println!("{}", entry.name);
        }
        return Ok(());
    }

    let Some(selected) = args.template.as_deref() else {
        bail!("no template selected; pass --template <name> (see --list-templates)");
    };
    let template_path = templates::resolve_template(&args.template_dir, selected)?;
    let cfg = build_config(&args, template_path);

    let (out_tx, out_handle) = spawn_output_writer();
    let (evt_tx, evt_rx) = mpsc::channel::<PassEvent>();

    let run_res = UpdateEngine::new(cfg).run(&evt_tx);
    drop(evt_tx);

    // The engine is synchronous; render whatever progress it buffered before
    // reporting the outcome.
    for ev in evt_rx.try_iter() {
        match ev {
            PassEvent::PassStarted { pass } => {
                let _ = out_tx.send(OutputLine::Stderr(format!("== {} ==", pass.name())));
            }
            PassEvent::Replaced { location, text, .. } => {
                let _ = out_tx.send(OutputLine::Stderr(format!(
                    "Updated {}: '{}'",
                    location_label(location),
                    text
                )));
            }
            PassEvent::Info(info) => {
                let _ = out_tx.send(OutputLine::Stderr(info.to_message()));
            }
            PassEvent::RunCompleted { .. } => {}
        }
    }

    let result = match run_res {
        Ok(result) => result,
        Err(e) => {
            drop(out_tx);
            let _ = out_handle.join();
            return Err(e);
        }
    };

    if args.json {
        let out = serde_json::to_string_pretty(&result)?;
        let _ = out_tx.send(OutputLine::Stdout(out));
    } else {
        for line in text_summary::build_text_summary(&result).lines {
            let _ = out_tx.send(OutputLine::Stdout(line));
        }
        let _ = out_tx.send(OutputLine::Stdout(
            "Document processed and saved successfully!".to_string(),
        ));
    }

    drop(out_tx);
    let _ = out_handle.join();
    Ok(())
}
