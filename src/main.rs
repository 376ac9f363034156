use std::fmt::Display;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use skillxfer::{
    available_skills, detect_installed_targets, display_path, install_skills, resolve_repository,
    skill_description, Environment, InstallOptions, InstallOutcome, InstallSummary,
    ResolvedRepository, Target,
};

const DESCRIPTION_PREVIEW: usize = 60;

#[derive(Parser)]
#[command(
    name = "skillxfer",
    version,
    about = "Convert Claude skills for other agentic coding CLIs"
)]
struct Cli {
    /// Log debug output (overrides RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct RepoArgs {
    /// Git repository URL or local path holding the skills
    #[arg(long)]
    repo: String,

    /// Skills root inside the repository, when not at its top level
    #[arg(long, value_name = "PATH")]
    sub_dir: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Install skills for one or more targets
    Install {
        #[command(flatten)]
        repo: RepoArgs,

        /// Target to install for (repeatable)
        #[arg(
            long = "target",
            value_name = "TARGET",
            required_unless_present = "detect",
            conflicts_with = "detect"
        )]
        targets: Vec<String>,

        /// Install for every target detected on this host
        #[arg(long)]
        detect: bool,

        /// Skills to install
        #[arg(long, num_args = 1.., required_unless_present = "all", conflicts_with = "all")]
        skills: Vec<String>,

        /// Install every skill in the repository
        #[arg(long)]
        all: bool,

        /// Base directory used instead of each target's default location
        #[arg(long, value_name = "DIR")]
        dest: Option<PathBuf>,

        /// Overwrite existing installations
        #[arg(long)]
        force: bool,

        /// Keep a cloned repository on disk afterwards
        #[arg(long)]
        keep_clone: bool,
    },
    /// List the skills in a repository
    List {
        #[command(flatten)]
        repo: RepoArgs,
    },
    /// Show supported targets and which are installed
    Targets,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(if cli.verbose { "debug" } else { "warn" }, cli.verbose);

    let env = match Environment::current() {
        Ok(env) => env,
        Err(err) => {
            error(format!("Cannot read the current directory: {err}"));
            std::process::exit(1);
        }
    };

    let exit_code = match cli.command {
        Command::Install {
            repo,
            targets,
            detect,
            skills,
            all,
            dest,
            force,
            keep_clone,
        } => {
            let selection = Selection {
                targets,
                detect,
                skills,
                all,
            };
            let options = InstallOptions {
                env: &env,
                base: dest.as_deref(),
                force,
            };
            run_install(&repo, selection, options, keep_clone)
        }
        Command::List { repo } => run_list(&repo),
        Command::Targets => run_targets(&env),
    };

    std::process::exit(exit_code);
}

fn init_tracing(default_level: &str, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new(default_level)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

struct Selection {
    targets: Vec<String>,
    detect: bool,
    skills: Vec<String>,
    all: bool,
}

fn run_install(
    repo: &RepoArgs,
    selection: Selection,
    options: InstallOptions<'_>,
    keep_clone: bool,
) -> i32 {
    let Some(repository) = open_repository(repo) else {
        return 1;
    };

    let exit_code = install_from(&repository, selection, options);

    if repository.is_cloned() {
        if keep_clone {
            if let Some(path) = repository.keep() {
                info(format!("Cloned repository kept at: {}", path.display()));
            }
        } else {
            match repository.close() {
                Ok(()) => success("Cloned repository removed"),
                Err(err) => warning(format!("Failed to remove cloned repository: {err}")),
            }
        }
    }
    exit_code
}

fn install_from(
    repository: &ResolvedRepository,
    selection: Selection,
    options: InstallOptions<'_>,
) -> i32 {
    let skills = if selection.all {
        available_skills(&repository.root)
    } else {
        selection.skills
    };
    if skills.is_empty() {
        error("No skills to install");
        return 1;
    }

    let mut targets = if selection.detect {
        let detected = detect_installed_targets(options.env);
        if detected.is_empty() {
            error("No supported targets detected on this system");
            info(format!("Install one of: {}", target_names(&Target::ALL)));
            return 1;
        }
        info(format!("Detected targets: {}", target_names(&detected)));
        detected
    } else {
        resolve_targets(&selection.targets)
    };
    dedup_in_order(&mut targets);

    let mut summary = InstallSummary::default();
    for target in targets {
        let adapter = target.adapter();
        header(&format!("Installing skills for {}", target.as_str().to_uppercase()));
        match options.base {
            Some(base) => info(format!("Target directory: {}", base.display())),
            None => info(format!(
                "Target: {} (default)",
                adapter.default_install_root(options.env).display()
            )),
        }
        println!();

        let outcomes = install_skills(adapter.as_ref(), &skills, &repository.root, options);
        for (skill, outcome) in skills.iter().zip(&outcomes) {
            match outcome {
                InstallOutcome::Installed(path) => success(format!(
                    "Installed {skill} to {}",
                    display_path(path, &options.env.cwd)
                )),
                InstallOutcome::Skipped(path) => warning(format!(
                    "Skipping {skill} (already exists at {}, use --force to overwrite)",
                    display_path(path, &options.env.cwd)
                )),
                InstallOutcome::Failed(err) => error(format!("Failed to install {skill}: {err}")),
            }
        }
        summary.record(&outcomes);
    }

    println!();
    header("Installation Summary");
    println!("  Skills installed: {}/{}", summary.installed, summary.attempted);
    if summary.installed == 0 {
        error("No skills were installed");
    } else if summary.installed == summary.attempted {
        success("All skills installed successfully!");
    } else {
        warning("Some skills failed to install");
    }

    summary.exit_code()
}

fn run_list(repo: &RepoArgs) -> i32 {
    let Some(repository) = open_repository(repo) else {
        return 1;
    };

    header("Available Skills");
    let skills = available_skills(&repository.root);
    if skills.is_empty() {
        warning("No skills found in repository");
        return 0;
    }

    for skill in skills {
        let name = format!("{skill:25}").cyan();
        match skill_description(&repository.root.join(&skill)) {
            Some(description) => {
                let preview: String = description.chars().take(DESCRIPTION_PREVIEW).collect();
                println!("  {name} {preview}...");
            }
            None => println!("  {name} (no description)"),
        }
    }
    0
}

fn run_targets(env: &Environment) -> i32 {
    header("Supported Targets");
    for target in Target::ALL {
        let root = target.adapter().default_install_root(env);
        println!(
            "  {} → {}",
            format!("{:15}", target.as_str()).cyan(),
            root.display()
        );
    }
    println!();

    let detected = detect_installed_targets(env);
    if detected.is_empty() {
        warning("No supported targets detected on this system");
    } else {
        info(format!("Detected on this system: {}", target_names(&detected)));
    }
    0
}

fn open_repository(repo: &RepoArgs) -> Option<ResolvedRepository> {
    if skillxfer::discovery::is_url(&repo.repo) {
        info(format!("Cloning repository: {}", repo.repo));
    }
    match resolve_repository(&repo.repo, repo.sub_dir.as_deref()) {
        Ok(repository) => Some(repository),
        Err(err) => {
            error(format!("Failed to resolve repository: {err}"));
            None
        }
    }
}

/// Parse target names, reporting and dropping unknown ones.
fn resolve_targets(names: &[String]) -> Vec<Target> {
    names
        .iter()
        .filter_map(|name| match name.parse::<Target>() {
            Ok(target) => Some(target),
            Err(err) => {
                error(err);
                None
            }
        })
        .collect()
}

fn target_names(targets: &[Target]) -> String {
    targets
        .iter()
        .map(|target| target.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn dedup_in_order(targets: &mut Vec<Target>) {
    let mut seen = Vec::with_capacity(targets.len());
    targets.retain(|target| {
        if seen.contains(target) {
            false
        } else {
            seen.push(*target);
            true
        }
    });
}

fn header(text: &str) {
    println!("\n{}", text.bold().cyan());
    println!("{}", "=".repeat(text.chars().count()));
}

fn success(text: impl Display) {
    println!("{} {text}", "✓".green());
}

fn warning(text: impl Display) {
    println!("{} {text}", "⚠".yellow());
}

fn error(text: impl Display) {
    eprintln!("{} {text}", "✗".red());
}

fn info(text: impl Display) {
    println!("{} {text}", "ℹ".blue());
}
