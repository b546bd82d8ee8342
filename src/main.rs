//! cashflow-minimizer CLI
//!
//! Track debts within a group and compute the payments that settle them.
//!
//! # Usage
//!
//! ```bash
//! # Interactive session (login, menu, save on exit)
//! cashflow-minimizer session
//!
//! # Settle a saved data file
//! cashflow-minimizer settle --data new_optimized_transactions.txt --format json
//!
//! # Generate a random group for testing
//! cashflow-minimizer generate --entities 10 --debts 30 --output group.txt
//! ```

use cashflow_minimizer::config::Config;
use cashflow_minimizer::interactive::{authenticate, run_menu, Prompt};
use cashflow_minimizer::session::Session;
use cashflow_minimizer::simulation::stress_test::{generate_random_session, NetworkConfig};
use cashflow_minimizer::store::audit::{FileAuditLog, MemoryAuditLog};
use cashflow_minimizer::store::auth::CredentialStore;
use cashflow_minimizer::store::snapshot::Snapshot;
use std::io;
use std::path::PathBuf;
use std::process;

fn print_usage() {
    eprintln!(
        r#"cashflow-minimizer: multi-party debt tracking and cash flow minimization

USAGE:
    cashflow-minimizer <COMMAND> [OPTIONS]

COMMANDS:
    session     Log in and manage debts interactively
    settle      Compute settlement payments for a saved data file
    generate    Generate a random group of debts (for testing)
    help        Show this message

OPTIONS (session, settle):
    --config <FILE>     TOML file with data_file / history_file / user_file
    --data <FILE>       Data file (overrides the config)

OPTIONS (settle):
    --format <FORMAT>   Output format: text (default) or json

OPTIONS (generate):
    --entities <N>      Number of entities (default: 10)
    --debts <N>         Number of debts (default: 30)
    --seed <N>          Fixed random seed
    --output <FILE>     Write to file instead of stdout

ENVIRONMENT:
    RUST_LOG            Log level (default: warn)"#
    );
}

#[derive(serde::Serialize)]
struct SettleOutput {
    gross_total: i64,
    net_total: i64,
    savings: i64,
    savings_percent: f64,
    valid: bool,
    balances: Vec<BalanceOutput>,
    payments: Vec<PaymentOutput>,
}

#[derive(serde::Serialize)]
struct BalanceOutput {
    entity: String,
    net_balance: i64,
    status: String,
}

#[derive(serde::Serialize)]
struct PaymentOutput {
    from: String,
    to: String,
    amount: i64,
}

fn required(args: &[String], i: usize, flag: &str, what: &str) -> String {
    args.get(i).cloned().unwrap_or_else(|| {
        eprintln!("{flag} requires {what}");
        process::exit(1);
    })
}

/// Parse `--config` / `--data`, plus any extra flags handled by `extra`.
fn parse_common(
    args: &[String],
    mut extra: impl FnMut(&str, &[String], &mut usize) -> bool,
) -> Config {
    let mut config_path: Option<String> = None;
    let mut data_path: Option<String> = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                config_path = Some(required(args, i, "--config", "a file path"));
            }
            "--data" => {
                i += 1;
                data_path = Some(required(args, i, "--data", "a file path"));
            }
            other => {
                if !extra(other, args, &mut i) {
                    eprintln!("Unknown option: {}", other);
                    process::exit(1);
                }
            }
        }
        i += 1;
    }

    let mut config = match config_path {
        Some(path) => Config::load(&path).unwrap_or_else(|e| {
            eprintln!("Error loading config '{}': {}", path, e);
            process::exit(1);
        }),
        None => Config::default(),
    };
    if let Some(data) = data_path {
        config.data_file = PathBuf::from(data);
    }
    config
}

fn load_snapshot(config: &Config) -> Snapshot {
    Snapshot::load(&config.data_file).unwrap_or_else(|e| {
        eprintln!(
            "Error reading data file '{}': {}",
            config.data_file.display(),
            e
        );
        process::exit(1);
    })
}

fn cmd_session(args: &[String]) {
    let config = parse_common(args, |_, _, _| false);

    println!("\n\t********************* Welcome to CASH FLOW MINIMIZER SYSTEM *********************\n");
    println!("This system minimizes the number of transactions among multiple entities.\n");

    let mut users = CredentialStore::load(&config.user_file).unwrap_or_else(|e| {
        eprintln!(
            "Error reading user file '{}': {}",
            config.user_file.display(),
            e
        );
        process::exit(1);
    });

    let stdin = io::stdin();
    let mut prompt = Prompt::new(stdin.lock(), io::stdout());
    match authenticate(&mut prompt, &mut users) {
        Ok(true) => {}
        Ok(false) => return,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }

    let snapshot = load_snapshot(&config);
    if snapshot.entity_count() == 0 {
        eprintln!("\nNo previous data found. Starting fresh...");
    }
    let audit = FileAuditLog::new(&config.history_file);
    let mut session = Session::from_snapshot(snapshot, audit).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });

    if let Err(e) = run_menu(&mut prompt, &mut session, &config.data_file) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn cmd_settle(args: &[String]) {
    let mut format = "text".to_string();
    let config = parse_common(args, |flag, args, i| {
        if flag == "--format" {
            *i += 1;
            format = required(args, *i, "--format", "'text' or 'json'");
            true
        } else {
            false
        }
    });

    let snapshot = load_snapshot(&config);
    let audit = FileAuditLog::new(&config.history_file);
    let mut session = Session::from_snapshot(snapshot, audit).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });
    let report = session.settle();

    if format == "json" {
        let names = session.registry().names();
        let balances = session
            .net_balances()
            .into_iter()
            .zip(names)
            .map(|(net, name)| BalanceOutput {
                entity: name.clone(),
                net_balance: net,
                status: match net {
                    n if n > 0 => "CREDITOR",
                    n if n < 0 => "DEBTOR",
                    _ => "SETTLED",
                }
                .to_string(),
            })
            .collect();

        let output = SettleOutput {
            gross_total: report.gross_total(),
            net_total: report.net_total(),
            savings: report.savings(),
            savings_percent: report.savings_percent(),
            valid: report.is_valid(),
            balances,
            payments: report
                .instructions()
                .iter()
                .map(|p| PaymentOutput {
                    from: p.debtor_name.clone(),
                    to: p.creditor_name.clone(),
                    amount: p.amount,
                })
                .collect(),
        };

        match serde_json::to_string_pretty(&output) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing output: {}", e);
                process::exit(1);
            }
        }
    } else {
        println!("{}", report);
    }
}

fn cmd_generate(args: &[String]) {
    let mut entities = 10usize;
    let mut debts = 30usize;
    let mut seed: Option<u64> = None;
    let mut output_path: Option<String> = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--entities" => {
                i += 1;
                entities = args
                    .get(i)
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(|| {
                        eprintln!("--entities requires a number");
                        process::exit(1);
                    });
            }
            "--debts" => {
                i += 1;
                debts = args
                    .get(i)
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(|| {
                        eprintln!("--debts requires a number");
                        process::exit(1);
                    });
            }
            "--seed" => {
                i += 1;
                seed = Some(args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--seed requires a number");
                    process::exit(1);
                }));
            }
            "--output" => {
                i += 1;
                output_path = Some(required(args, i, "--output", "a file path"));
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let config = NetworkConfig {
        entity_count: entities,
        debts_per_entity: debts / entities.max(1),
        seed,
        ..Default::default()
    };
    let session = generate_random_session(&config, MemoryAuditLog::new()).unwrap_or_else(|e| {
        eprintln!("Error generating debts: {}", e);
        process::exit(1);
    });
    let snapshot = session.snapshot();

    if let Some(path) = output_path {
        snapshot.save(&path).unwrap_or_else(|e| {
            eprintln!("Error writing to '{}': {}", path, e);
            process::exit(1);
        });
        eprintln!(
            "Generated {} debts across {} entities → {}",
            session.history().len(),
            entities,
            path
        );
    } else {
        print!("{}", snapshot.render());
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "session" => cmd_session(rest),
        "settle" => cmd_settle(rest),
        "generate" => cmd_generate(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
