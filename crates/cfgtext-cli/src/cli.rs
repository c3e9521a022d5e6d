use std::path::PathBuf;

use cfgtext_types::NamespaceId;
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "cfgtext",
    about = "Edit configuration namespaces as plain text",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// SDK settings file (TOML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the change set a text would produce against a baseline file
    Plan(PlanArgs),
    /// Replace a namespace's items with the contents of a text file
    Apply(ApplyArgs),
    /// Print a namespace as text
    Render(RenderArgs),
    /// Import an `app+cluster+namespace.format` file
    Import(ImportArgs),
    /// Show a line diff between a namespace and a text file
    Preview(PreviewArgs),
    /// List registered namespaces
    Namespaces(StoreArgs),
}

#[derive(Args)]
pub struct StoreArgs {
    /// Store file (JSON)
    #[arg(long, default_value = "cfgtext.json")]
    pub store: PathBuf,
}

#[derive(Args)]
pub struct PlanArgs {
    /// JSON list of baseline items
    #[arg(long)]
    pub baseline: PathBuf,
    #[arg(long)]
    pub text: PathBuf,
}

#[derive(Args)]
pub struct ApplyArgs {
    #[command(flatten)]
    pub store: StoreArgs,
    #[arg(long)]
    pub namespace: NamespaceId,
    #[arg(long)]
    pub text: PathBuf,
}

#[derive(Args)]
pub struct RenderArgs {
    #[command(flatten)]
    pub store: StoreArgs,
    #[arg(long)]
    pub namespace: NamespaceId,
}

#[derive(Args)]
pub struct ImportArgs {
    #[command(flatten)]
    pub store: StoreArgs,
    pub file: PathBuf,
}

#[derive(Args)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub store: StoreArgs,
    #[arg(long)]
    pub namespace: NamespaceId,
    #[arg(long)]
    pub text: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_plan() {
        let cli = Cli::try_parse_from([
            "cfgtext", "plan", "--baseline", "items.json", "--text", "app.properties",
        ])
        .unwrap();
        if let Command::Plan(args) = cli.command {
            assert_eq!(args.baseline, PathBuf::from("items.json"));
            assert_eq!(args.text, PathBuf::from("app.properties"));
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_apply_namespace_forms() {
        for ns in ["7", "ns:7"] {
            let cli = Cli::try_parse_from([
                "cfgtext", "apply", "--store", "s.json", "--namespace", ns, "--text", "a.txt",
            ])
            .unwrap();
            if let Command::Apply(args) = cli.command {
                assert_eq!(args.namespace, NamespaceId::new(7));
                assert_eq!(args.store.store, PathBuf::from("s.json"));
            } else {
                panic!("wrong command");
            }
        }
    }

    #[test]
    fn reject_bad_namespace() {
        assert!(Cli::try_parse_from(["cfgtext", "render", "--namespace", "zero"]).is_err());
        assert!(Cli::try_parse_from(["cfgtext", "render", "--namespace", "0"]).is_err());
    }

    #[test]
    fn parse_import_with_default_store() {
        let cli = Cli::try_parse_from(["cfgtext", "import", "app+default+db.properties"]).unwrap();
        if let Command::Import(args) = cli.command {
            assert_eq!(args.file, PathBuf::from("app+default+db.properties"));
            assert_eq!(args.store.store, PathBuf::from("cfgtext.json"));
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_namespaces() {
        let cli = Cli::try_parse_from(["cfgtext", "namespaces", "--store", "s.json"]).unwrap();
        assert!(matches!(cli.command, Command::Namespaces(_)));
    }

    #[test]
    fn parse_globals() {
        let cli = Cli::try_parse_from([
            "cfgtext", "--verbose", "--format", "json", "--config", "sdk.toml", "namespaces",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.format, OutputFormat::Json));
        assert_eq!(cli.config, Some(PathBuf::from("sdk.toml")));
    }
}
