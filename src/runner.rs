use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;
use tracing::debug;

use crate::cli::{Cli, Command, OutputArgs, PdfNameArgs, WriteTexArgs};
use crate::config::Settings;
use crate::metadata::{self, Metadata};
use crate::{envfile, manuscript, pdf};

/// Resolved layout printed by `info`.
#[derive(Debug, Serialize)]
struct LayoutSummary {
    manuscript_dir: Utf8PathBuf,
    manuscript_path_source: &'static str,
    main_file: Option<Utf8PathBuf>,
    tex_output: Utf8PathBuf,
    expected_pdf: Utf8PathBuf,
    custom_pdf_name: String,
}

pub fn run(cli: Cli) -> Result<()> {
    let cwd = resolve_cwd(cli.chdir.as_deref())?;
    let settings = Settings::resolve(&cwd, cli.manuscript_path.as_deref())?;
    debug!(
        "manuscript path {} ({})",
        settings.manuscript_path,
        settings.source.as_str()
    );

    match cli.command {
        Command::OutputDir { dir } => {
            let dir = resolve_arg(&settings, &dir)?;
            manuscript::create_output_dir(&dir)?;
            Ok(())
        }
        Command::Locate => {
            let path = manuscript::find_manuscript_md(&settings)?;
            println!("{}", path);
            Ok(())
        }
        Command::WriteTex(args) => handle_write_tex(&settings, args),
        Command::PdfName(args) => handle_pdf_name(&settings, args),
        Command::CopyPdf(args) => handle_copy_pdf(&settings, args),
        Command::Info(args) => handle_info(&settings, args),
    }
}

fn resolve_cwd(chdir: Option<&Path>) -> Result<Utf8PathBuf> {
    let cwd = envfile::current_working_dir()?;
    let Some(chdir) = chdir else {
        return Ok(cwd);
    };
    let chdir = utf8(chdir)?;
    let target = cwd.join(chdir);
    if !target.is_dir() {
        bail!("--chdir target {} is not a directory", target);
    }
    Ok(target)
}

fn resolve_arg(settings: &Settings, path: &Path) -> Result<Utf8PathBuf> {
    Ok(settings.cwd.join(utf8(path)?))
}

fn utf8(path: &Path) -> Result<&Utf8Path> {
    Utf8Path::from_path(path).ok_or_else(|| anyhow!("path {} is not valid UTF-8", path.display()))
}

fn handle_write_tex(settings: &Settings, args: WriteTexArgs) -> Result<()> {
    let output_dir = resolve_arg(settings, &args.output_dir)?;
    let content = match args.input.as_deref() {
        None => read_stdin()?,
        Some(path) if path == Path::new("-") => read_stdin()?,
        Some(path) => {
            let path = resolve_arg(settings, path)?;
            fs::read_to_string(&path).with_context(|| format!("reading {}", path))?
        }
    };

    manuscript::create_output_dir(&output_dir)?;
    let written = manuscript::write_manuscript_output(settings, &output_dir, &content)?;
    println!("{}", written);
    Ok(())
}

fn read_stdin() -> Result<String> {
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .context("reading generated LaTeX from stdin")?;
    Ok(buf)
}

fn load_metadata(settings: &Settings, explicit: Option<&Path>) -> Result<Metadata> {
    match explicit {
        Some(path) => metadata::load_yaml_file(&resolve_arg(settings, path)?),
        None => metadata::load(settings),
    }
}

fn handle_pdf_name(settings: &Settings, args: PdfNameArgs) -> Result<()> {
    let metadata = load_metadata(settings, args.metadata.as_deref())?;
    println!("{}", pdf::custom_pdf_filename(&metadata));
    Ok(())
}

fn handle_copy_pdf(settings: &Settings, args: OutputArgs) -> Result<()> {
    let output_dir = resolve_arg(settings, &args.output_dir)?;
    let metadata = metadata::load(settings)?;
    if let Some(copied) = pdf::copy_pdf_to_manuscript_folder(settings, &output_dir, &metadata) {
        println!("{}", copied);
    }
    Ok(())
}

fn handle_info(settings: &Settings, args: OutputArgs) -> Result<()> {
    let output_dir = resolve_arg(settings, &args.output_dir)?;
    let summary = layout_summary(settings, &output_dir)?;
    let rendered = serde_json::to_string_pretty(&summary).context("serializing layout")?;
    println!("{}", rendered);
    Ok(())
}

fn layout_summary(settings: &Settings, output_dir: &Utf8Path) -> Result<LayoutSummary> {
    let metadata = metadata::load(settings)?;
    Ok(LayoutSummary {
        manuscript_dir: settings.manuscript_dir(),
        manuscript_path_source: settings.source.as_str(),
        main_file: manuscript::find_manuscript_md(settings).ok(),
        tex_output: manuscript::tex_output_path(settings, output_dir),
        expected_pdf: pdf::expected_pdf_path(settings, output_dir),
        custom_pdf_name: pdf::custom_pdf_filename(&metadata),
    })
}
