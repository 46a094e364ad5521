use clap::Parser;

/// Arguments for the add command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                   Add a repository:\n    toolshed add https://github.com/org/tool\n\n\
                   Add with install steps and an isolated environment:\n    \
                   toolshed add https://github.com/org/tool --isolated-env \\\n        \
                   --step 'uv pip install -r requirements.txt'\n\n\
                   Add and install immediately:\n    toolshed add https://github.com/org/tool --install")]
pub struct AddArgs {
    /// Source URL of the tool
    pub url: String,

    /// Tool name (defaults to the URL's last path segment)
    #[arg(long, short = 'n')]
    pub name: Option<String>,

    /// Install step to run inside the tool folder; repeatable, runs in
    /// the given order
    #[arg(long = "step", value_name = "COMMAND")]
    pub steps: Vec<String>,

    /// Command that starts the tool (informational)
    #[arg(long, value_name = "COMMAND")]
    pub start_command: Option<String>,

    /// Create an isolated environment before install steps
    #[arg(long)]
    pub isolated_env: bool,

    /// Manifest to add to (name in the workspace, or a path)
    #[arg(long, short = 'm', value_name = "MANIFEST")]
    pub manifest: Option<String>,

    /// Install the tool right after adding it
    #[arg(long)]
    pub install: bool,

    /// With --install, only show what would be run
    #[arg(long)]
    pub dry_run: bool,
}

#[cfg(test)]
mod tests {
    use super::super::{Cli, Commands};
    use clap::Parser;

    #[test]
    fn test_cli_parsing_add_minimal() {
        let cli =
            Cli::try_parse_from(["toolshed", "add", "https://github.com/org/tool"]).unwrap();
        match cli.command {
            Commands::Add(args) => {
                assert_eq!(args.url, "https://github.com/org/tool");
                assert!(args.name.is_none());
                assert!(args.steps.is_empty());
                assert!(!args.install);
            }
            _ => panic!("Expected Add command"),
        }
    }

    #[test]
    fn test_cli_parsing_add_with_steps() {
        let cli = Cli::try_parse_from([
            "toolshed",
            "add",
            "https://github.com/org/tool",
            "--name",
            "tool",
            "--isolated-env",
            "--step",
            "uv pip install -r requirements.txt",
            "--step",
            "python setup.py check",
        ])
        .unwrap();
        match cli.command {
            Commands::Add(args) => {
                assert_eq!(args.name.as_deref(), Some("tool"));
                assert!(args.isolated_env);
                assert_eq!(args.steps.len(), 2);
            }
            _ => panic!("Expected Add command"),
        }
    }
}
