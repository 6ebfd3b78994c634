//! sprig CLI - miniature version control command line interface

use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use sprig::ops::{
    add, branch, checkout_branch, checkout_file, checkout_file_from_commit, commit, find, fsck,
    global_log, init, log, merge, reset, rm, rm_branch, status, MergeOutcome,
};
use sprig::Repo;

#[derive(Parser)]
#[command(name = "sprig")]
#[command(about = "miniature version control - commits, branches and three-way merge")]
#[command(version)]
struct Cli {
    /// working directory of the repository
    #[arg(short, long, env = "SPRIG_DIR", default_value = ".")]
    dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// create a new repository in the working directory
    Init,

    /// stage a file for the next commit
    Add {
        /// file name
        file: String,
    },

    /// record the staged changes as a new commit
    Commit {
        /// commit message
        message: String,
    },

    /// unstage a file, untracking and deleting it if committed
    Rm {
        /// file name
        file: String,
    },

    /// show first-parent history of the current branch
    Log,

    /// show every commit ever made
    GlobalLog,

    /// print ids of commits with the given message
    Find {
        /// exact commit message
        message: String,
    },

    /// show branches, staged files and working-tree changes
    Status,

    /// switch branch, or restore a file from HEAD or a commit
    ///
    /// `checkout <branch>`, `checkout -- <file>`, `checkout <commit> -- <file>`
    Checkout {
        /// branch name, or commit id when a file is given
        target: Option<String>,

        /// file to restore
        #[arg(last = true)]
        file: Option<String>,
    },

    /// create a branch at the current commit
    Branch {
        /// branch name
        name: String,
    },

    /// delete a branch pointer
    RmBranch {
        /// branch name
        name: String,
    },

    /// move the current branch to a commit and check it out
    Reset {
        /// commit id, may be abbreviated
        commit: String,
    },

    /// merge a branch into the current branch
    Merge {
        /// branch name
        branch: String,
    },

    /// verify repository integrity
    Fsck,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("error: {}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn run(cli: Cli) -> sprig::Result<()> {
    let dir = cli.dir;
    let open = || Repo::open(&dir);

    match cli.command {
        Commands::Init => {
            init(&dir)?;
            println!("initialized sprig repository in {}", dir.display());
        }
        Commands::Add { file } => {
            let repo = open()?;
            add(&repo, &file)?;
        }
        Commands::Commit { message } => {
            let repo = open()?;
            let hash = commit(&repo, &message)?;
            println!("{}", hash);
        }
        Commands::Rm { file } => {
            let repo = open()?;
            rm(&repo, &file)?;
        }
        Commands::Log => {
            let repo = open()?;
            for entry in log(&repo)? {
                print!("{}", entry);
            }
        }
        Commands::GlobalLog => {
            let repo = open()?;
            for entry in global_log(&repo)? {
                print!("{}", entry);
            }
        }
        Commands::Find { message } => {
            let repo = open()?;
            for hash in find(&repo, &message)? {
                println!("{}", hash);
            }
        }
        Commands::Status => {
            let repo = open()?;
            print!("{}", status(&repo)?);
        }
        Commands::Checkout { target, file } => {
            let repo = open()?;
            match (target, file) {
                (Some(name), None) => checkout_branch(&repo, &name)?,
                (None, Some(file)) => checkout_file(&repo, &file)?,
                (Some(id), Some(file)) => checkout_file_from_commit(&repo, &id, &file)?,
                (None, None) => Cli::command()
                    .error(
                        ErrorKind::MissingRequiredArgument,
                        "checkout needs a branch, `-- <file>` or `<commit> -- <file>`",
                    )
                    .exit(),
            }
        }
        Commands::Branch { name } => {
            let repo = open()?;
            branch(&repo, &name)?;
        }
        Commands::RmBranch { name } => {
            let repo = open()?;
            rm_branch(&repo, &name)?;
        }
        Commands::Reset { commit } => {
            let repo = open()?;
            reset(&repo, &commit)?;
        }
        Commands::Merge { branch } => {
            let repo = open()?;
            match merge(&repo, &branch)? {
                MergeOutcome::AlreadyAncestor => {
                    println!("Given branch is an ancestor of the current branch.");
                }
                MergeOutcome::FastForward(_) => {
                    println!("Current branch fast-forwarded.");
                }
                MergeOutcome::Merged(hash) => {
                    println!("{}", hash);
                }
                MergeOutcome::Conflict { files } => {
                    for file in files {
                        println!("conflict: {}", file);
                    }
                    println!("Encountered a merge conflict.");
                }
            }
        }
        Commands::Fsck => {
            let repo = open()?;
            let report = fsck(&repo)?;

            println!("objects checked: {}", report.objects_checked);

            if !report.corrupt_objects.is_empty() {
                println!("\ncorrupt objects:");
                for obj in &report.corrupt_objects {
                    println!("  {}: {}", obj.hash, obj.message);
                }
            }

            if !report.missing_objects.is_empty() {
                println!("\nmissing objects:");
                for obj in &report.missing_objects {
                    println!(
                        "  {} {} (referenced by {})",
                        obj.object_type, obj.hash, obj.referenced_by
                    );
                }
            }

            if !report.dangling_objects.is_empty() {
                println!("\ndangling objects: {}", report.dangling_objects.len());
            }

            if report.is_ok() {
                println!("\nrepository is healthy");
            } else {
                println!("\nrepository has issues");
                return Err(sprig::Error::CorruptObjectMessage(
                    "repository integrity check failed".to_string(),
                ));
            }
        }
    }

    Ok(())
}
