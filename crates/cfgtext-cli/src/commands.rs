use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use cfgtext_import::ImportTarget;
use cfgtext_resolve::{preview, render, render_line, resolve, ChangeSet, PreviewLine, TextPreview};
use cfgtext_sdk::{ConfigService, SdkConfig, UpdateReport};
use cfgtext_store::JsonFileItemStore;
use cfgtext_types::{Item, NamespaceId};
use colored::Colorize;
use serde::Serialize;
use tracing::debug;

use crate::cli::*;

/// Namespace assumed for a plan whose baseline file is empty.
const DEFAULT_PLAN_NAMESPACE: NamespaceId = NamespaceId::new(1);

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => SdkConfig::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => SdkConfig::default(),
    };
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(cli.command, &cli.format, config, &mut out)
}

fn run(command: Command, format: &OutputFormat, config: SdkConfig, out: &mut dyn Write) -> anyhow::Result<()> {
    match command {
        Command::Plan(args) => cmd_plan(args, format, out),
        Command::Apply(args) => cmd_apply(args, format, config, out),
        Command::Render(args) => cmd_render(args, config, out),
        Command::Import(args) => cmd_import(args, format, config, out),
        Command::Preview(args) => cmd_preview(args, config, out),
        Command::Namespaces(args) => cmd_namespaces(args, format, config, out),
    }
}

fn open_service(store: &StoreArgs, config: SdkConfig) -> ConfigService {
    debug!(store = %store.store.display(), operator = %config.operator, "opening store");
    ConfigService::new(Arc::new(JsonFileItemStore::open(&store.store)), config)
}

fn read_text(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn write_json(out: &mut dyn Write, value: &impl Serialize) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

fn cmd_plan(args: PlanArgs, format: &OutputFormat, out: &mut dyn Write) -> anyhow::Result<()> {
    let baseline: Vec<Item> = serde_json::from_str(&read_text(&args.baseline)?)
        .with_context(|| format!("parsing baseline items in {}", args.baseline.display()))?;
    let text = read_text(&args.text)?;
    let namespace = baseline
        .first()
        .map(|item| item.namespace_id)
        .unwrap_or(DEFAULT_PLAN_NAMESPACE);

    let changes = resolve(namespace, &text, &baseline)?;
    match format {
        OutputFormat::Json => write_json(out, &changes),
        OutputFormat::Text => {
            print_change_set(out, &changes)?;
            let diff = preview(&render(&baseline), &text);
            if !diff.is_empty() {
                writeln!(out)?;
                print_preview(out, &diff)?;
            }
            Ok(())
        }
    }
}

fn cmd_apply(args: ApplyArgs, format: &OutputFormat, config: SdkConfig, out: &mut dyn Write) -> anyhow::Result<()> {
    let service = open_service(&args.store, config);
    let text = read_text(&args.text)?;
    let report = service.update_by_text(args.namespace, &text)?;
    print_report(out, format, &report)
}

fn cmd_render(args: RenderArgs, config: SdkConfig, out: &mut dyn Write) -> anyhow::Result<()> {
    let service = open_service(&args.store, config);
    // Written verbatim so the output can be edited and applied back.
    out.write_all(service.render_namespace(args.namespace)?.as_bytes())?;
    Ok(())
}

fn cmd_import(args: ImportArgs, format: &OutputFormat, config: SdkConfig, out: &mut dyn Write) -> anyhow::Result<()> {
    let target = ImportTarget::from_path(&args.file)?;
    let text = read_text(&args.file)?;
    let service = open_service(&args.store, config);

    debug!(target = %target, "importing");
    let report = service.import_or_register(&target.file_name(), &text)?;
    print_report(out, format, &report)
}

fn cmd_preview(args: PreviewArgs, config: SdkConfig, out: &mut dyn Write) -> anyhow::Result<()> {
    let service = open_service(&args.store, config);
    let text = read_text(&args.text)?;
    let plan = service.plan(args.namespace, &text)?;
    if plan.preview.is_empty() {
        writeln!(out, "No changes.")?;
        return Ok(());
    }
    print_preview(out, &plan.preview)?;
    writeln!(
        out,
        "{} line(s) added, {} line(s) removed; {}",
        plan.preview.additions(),
        plan.preview.deletions(),
        plan.changes.summary()
    )?;
    Ok(())
}

fn cmd_namespaces(args: StoreArgs, format: &OutputFormat, config: SdkConfig, out: &mut dyn Write) -> anyhow::Result<()> {
    let service = open_service(&args, config);
    let namespaces = service.namespaces()?;
    if let OutputFormat::Json = format {
        return write_json(out, &namespaces);
    }
    if namespaces.is_empty() {
        writeln!(out, "No namespaces.")?;
    }
    for info in &namespaces {
        writeln!(out, "{}  {}", info.id.to_string().yellow(), info.coordinates())?;
    }
    Ok(())
}

fn print_change_set(out: &mut dyn Write, changes: &ChangeSet) -> anyhow::Result<()> {
    if changes.is_empty() {
        writeln!(out, "No changes.")?;
        return Ok(());
    }
    for item in changes.deletes() {
        writeln!(out, "  {} line {}: {}", "delete".red(), item.line_num, render_line(item))?;
    }
    for item in changes.updates() {
        writeln!(out, "  {} line {}: {}", "update".yellow(), item.line_num, render_line(item))?;
    }
    for item in changes.creates() {
        writeln!(out, "  {} line {}: {}", "create".green(), item.line_num, render_line(item))?;
    }
    writeln!(out, "{}", changes.summary().to_string().bold())?;
    Ok(())
}

fn print_preview(out: &mut dyn Write, diff: &TextPreview) -> anyhow::Result<()> {
    for hunk in &diff.hunks {
        let header = format!(
            "@@ -{},{} +{},{} @@",
            hunk.old_start, hunk.old_count, hunk.new_start, hunk.new_count
        );
        writeln!(out, "{}", header.cyan())?;
        for line in &hunk.lines {
            match line {
                PreviewLine::Context(text) => writeln!(out, " {text}")?,
                PreviewLine::Added(text) => writeln!(out, "{}", format!("+{text}").green())?,
                PreviewLine::Removed(text) => writeln!(out, "{}", format!("-{text}").red())?,
            }
        }
    }
    Ok(())
}

fn print_report(out: &mut dyn Write, format: &OutputFormat, report: &UpdateReport) -> anyhow::Result<()> {
    if let OutputFormat::Json = format {
        return write_json(out, report);
    }
    writeln!(
        out,
        "{} {} at revision {}: {}",
        "✓".green().bold(),
        report.namespace.to_string().yellow(),
        report.revision,
        report.summary
    )?;
    if let Some(id) = report.audit_id {
        writeln!(out, "  Audit: {}", id.to_string().dimmed())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn run_to_string(command: Command, format: OutputFormat) -> anyhow::Result<String> {
        colored::control::set_override(false);
        let mut out = Vec::new();
        run(command, &format, SdkConfig::default(), &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    fn store_args(dir: &Path) -> StoreArgs {
        StoreArgs {
            store: dir.join("state.json"),
        }
    }

    #[test]
    fn import_apply_render_cycle() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("app+default+application.properties");
        fs::write(&file, "# web\nport = 8080").unwrap();

        let out = run_to_string(
            Command::Import(ImportArgs {
                store: store_args(dir.path()),
                file: file.clone(),
            }),
            OutputFormat::Text,
        )
        .unwrap();
        assert!(out.contains("2 created, 0 updated, 0 deleted"));

        let edited = dir.path().join("edited.properties");
        fs::write(&edited, "# web\nport = 9090\nhost = local").unwrap();
        let out = run_to_string(
            Command::Apply(ApplyArgs {
                store: store_args(dir.path()),
                namespace: NamespaceId::new(1),
                text: edited,
            }),
            OutputFormat::Text,
        )
        .unwrap();
        assert!(out.contains("1 created, 1 updated, 0 deleted"));

        let rendered = run_to_string(
            Command::Render(RenderArgs {
                store: store_args(dir.path()),
                namespace: NamespaceId::new(1),
            }),
            OutputFormat::Text,
        )
        .unwrap();
        assert_eq!(rendered, "# web\nport = 9090\nhost = local");
    }

    #[test]
    fn reimport_reuses_namespace() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("app+default+db.properties");
        for text in ["url = a", "url = b"] {
            fs::write(&file, text).unwrap();
            run_to_string(
                Command::Import(ImportArgs {
                    store: store_args(dir.path()),
                    file: file.clone(),
                }),
                OutputFormat::Text,
            )
            .unwrap();
        }

        let out = run_to_string(Command::Namespaces(store_args(dir.path())), OutputFormat::Text).unwrap();
        assert_eq!(out.lines().count(), 1);
        assert!(out.contains("app+default+db"));
    }

    #[test]
    fn rejected_import_leaves_store_empty() {
        let dir = tempfile::tempdir().unwrap();
        let empty = dir.path().join("app+default+empty.properties");
        fs::write(&empty, "").unwrap();
        let yaml = dir.path().join("app+default+cfg.yml");
        fs::write(&yaml, "a: 1").unwrap();

        for file in [empty, yaml] {
            assert!(run_to_string(
                Command::Import(ImportArgs {
                    store: store_args(dir.path()),
                    file,
                }),
                OutputFormat::Text,
            )
            .is_err());
        }

        let out = run_to_string(Command::Namespaces(store_args(dir.path())), OutputFormat::Text).unwrap();
        assert_eq!(out, "No namespaces.\n");
    }

    #[test]
    fn plan_against_baseline_file() {
        let dir = tempfile::tempdir().unwrap();
        let ns = NamespaceId::new(3);
        let baseline = vec![
            Item::data(ns, "a", "1", 1).with_id(10),
            Item::data(ns, "b", "2", 2).with_id(11),
        ];
        let baseline_path = dir.path().join("items.json");
        fs::write(&baseline_path, serde_json::to_string(&baseline).unwrap()).unwrap();
        let text_path = dir.path().join("app.properties");
        fs::write(&text_path, "a = 5").unwrap();

        let json = run_to_string(
            Command::Plan(PlanArgs {
                baseline: baseline_path.clone(),
                text: text_path.clone(),
            }),
            OutputFormat::Json,
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["to_update"][0]["value"], "5");
        assert_eq!(value["to_delete"][0]["key"], "b");

        let text = run_to_string(
            Command::Plan(PlanArgs {
                baseline: baseline_path,
                text: text_path,
            }),
            OutputFormat::Text,
        )
        .unwrap();
        assert!(text.contains("0 created, 1 updated, 1 deleted"));
        assert!(text.contains("-b = 2"));
    }

    #[test]
    fn malformed_text_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let baseline_path = dir.path().join("items.json");
        fs::write(&baseline_path, "[]").unwrap();
        let text_path = dir.path().join("bad.properties");
        fs::write(&text_path, "ok = 1\nbroken").unwrap();

        let err = run_to_string(
            Command::Plan(PlanArgs {
                baseline: baseline_path,
                text: text_path,
            }),
            OutputFormat::Text,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "line:2 key value must separate by '='");
    }

    #[test]
    fn preview_without_changes() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("app+default+application.properties");
        fs::write(&file, "a = 1").unwrap();
        run_to_string(
            Command::Import(ImportArgs {
                store: store_args(dir.path()),
                file: file.clone(),
            }),
            OutputFormat::Text,
        )
        .unwrap();

        let out = run_to_string(
            Command::Preview(PreviewArgs {
                store: store_args(dir.path()),
                namespace: NamespaceId::new(1),
                text: PathBuf::from(&file),
            }),
            OutputFormat::Text,
        )
        .unwrap();
        assert_eq!(out, "No changes.\n");
    }
}
