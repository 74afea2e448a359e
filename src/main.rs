//! resx-strings CLI - RESX string-resource manager

use clap::{Parser, Subcommand};
use resx_strings::{ResourceEntry, ResxDocument, Workspace};
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "resx-strings")]
#[command(about = "Manage RESX string resources and their generated accessors")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the entries of a resource file
    List {
        /// Resource file (.resx)
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Find an entry by key or by value
    Find {
        /// Resource file (.resx)
        file: PathBuf,

        /// Look up by key
        #[arg(short, long)]
        key: Option<String>,

        /// Look up by value (first match in file order)
        #[arg(short, long)]
        value: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Append a new entry and regenerate the accessor
    Add {
        /// Resource file (.resx)
        file: PathBuf,

        /// Entry key
        key: String,

        /// Entry value
        value: String,

        /// Skip the duplicate-key check
        #[arg(long)]
        overwrite: bool,
    },

    /// Regenerate the designer file from the current entries
    Regen {
        /// Resource file (.resx)
        file: PathBuf,
    },

    /// Print the fully-qualified accessor class name
    ClassName {
        /// Resource file (.resx)
        file: PathBuf,
    },

    /// List every resource file known to the workspace
    Files {
        /// Workspace root
        #[arg(short, long, default_value = ".")]
        root: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Find the first entry matching a value across the workspace
    Search {
        /// Value to look for (exact match)
        value: String,

        /// Workspace root
        #[arg(short, long, default_value = ".")]
        root: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write an empty resource-file skeleton
    Init {
        /// Resource file to create (.resx)
        file: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::List { file, json } => {
            let doc = match resx_strings::read_document(&file) {
                Ok(d) => d,
                Err(e) => {
                    eprintln!("Failed to read {}: {}", file.display(), e);
                    std::process::exit(1);
                }
            };

            if json {
                println!("{}", serde_json::to_string_pretty(doc.entries()).unwrap());
            } else {
                for entry in doc.entries() {
                    println!("{} = {}", entry.name, entry.value);
                }
                println!();
                println!("{} entries", doc.len());
            }
        }

        Commands::Find {
            file,
            key,
            value,
            json,
        } => {
            let result = match (&key, &value) {
                (Some(k), None) => resx_strings::find_by_key(&file, k),
                (None, Some(v)) => resx_strings::find_by_value(&file, v),
                _ => {
                    eprintln!("Specify exactly one of --key or --value");
                    std::process::exit(1);
                }
            };

            match result {
                Ok(Some(entry)) => print_entry(&entry, json),
                Ok(None) => {
                    eprintln!("No matching entry in {}", file.display());
                    std::process::exit(1);
                }
                Err(e) => {
                    eprintln!("Failed to read {}: {}", file.display(), e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Add {
            file,
            key,
            value,
            overwrite,
        } => {
            if !overwrite {
                match resx_strings::find_by_key(&file, &key) {
                    Ok(Some(_)) => {
                        eprintln!("Resource with key '{}' already exists!", key);
                        std::process::exit(1);
                    }
                    Ok(None) => {}
                    Err(e) => {
                        eprintln!("Failed to read {}: {}", file.display(), e);
                        std::process::exit(1);
                    }
                }
            }

            match resx_strings::add(&file, &key, &value, overwrite) {
                Ok(true) => println!("Added '{}' to {}", key, file.display()),
                Ok(false) => {
                    eprintln!(
                        "Added '{}' to {} but accessor regeneration failed; run 'resx-strings regen' to reconcile",
                        key,
                        file.display()
                    );
                    std::process::exit(1);
                }
                Err(e) => {
                    eprintln!("Failed to update {}: {}", file.display(), e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Regen { file } => {
            if resx_strings::regenerate_designer(&file) {
                println!(
                    "Regenerated {}",
                    resx_strings::designer_path(&file).display()
                );
            } else {
                eprintln!("Failed to regenerate accessor for {}", file.display());
                std::process::exit(1);
            }
        }

        Commands::ClassName { file } => {
            let class_name = resx_strings::get_class_name(&file);
            if class_name.is_empty() {
                eprintln!("No accessor class found for {}", file.display());
                std::process::exit(1);
            }
            println!("{}", class_name);
        }

        Commands::Files { root, json } => {
            let files = match Workspace::new(&root).enumerate_resource_files() {
                Ok(f) => f,
                Err(e) => {
                    eprintln!("Failed to enumerate {}: {}", root.display(), e);
                    std::process::exit(1);
                }
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&files).unwrap());
            } else {
                for file in &files {
                    println!("{}", file.display());
                }
                println!();
                println!("{} resource files", files.len());
            }
        }

        Commands::Search { value, root, json } => {
            let result = match Workspace::new(&root).find_first_matching_value(&value) {
                Ok(r) => r,
                Err(e) => {
                    eprintln!("Failed to search {}: {}", root.display(), e);
                    std::process::exit(1);
                }
            };

            match result {
                Some((file, entry)) => {
                    if json {
                        let hit = SearchHit { file, entry };
                        println!("{}", serde_json::to_string_pretty(&hit).unwrap());
                    } else {
                        println!("{}: {} = {}", file.display(), entry.name, entry.value);
                    }
                }
                None => {
                    eprintln!("No entry with value {:?}", value);
                    std::process::exit(1);
                }
            }
        }

        Commands::Init { file, force } => {
            if file.exists() && !force {
                eprintln!("{} already exists (use --force to overwrite)", file.display());
                std::process::exit(1);
            }

            match fs::write(&file, ResxDocument::template()) {
                Ok(_) => println!("Created {}", file.display()),
                Err(e) => {
                    eprintln!("Failed to write {}: {}", file.display(), e);
                    std::process::exit(1);
                }
            }
        }
    }
}

fn print_entry(entry: &ResourceEntry, json: bool) {
    if json {
        println!("{}", serde_json::to_string_pretty(entry).unwrap());
    } else {
        println!("{} = {}", entry.name, entry.value);
        if let Some(ref comment) = entry.comment {
            println!("  comment: {}", comment);
        }
    }
}

#[derive(serde::Serialize)]
struct SearchHit {
    file: PathBuf,
    entry: ResourceEntry,
}
