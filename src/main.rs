// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;

use anyhow::Result;

use finsight::{cli, commands, db, logging};

fn main() -> Result<()> {
    logging::init();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let db_path = matches.get_one::<String>("db").map(PathBuf::from);
    let owner = matches
        .get_one::<String>("owner")
        .map(String::as_str)
        .unwrap_or("default");
    let mut conn = db::open_or_init(db_path.as_deref())?;

    match matches.subcommand() {
        Some(("init", _)) => match &db_path {
            Some(p) => println!("Database initialized at {}", p.display()),
            None => println!("Database initialized at {}", db::db_path()?.display()),
        },
        Some(("tx", sub)) => commands::transactions::handle(&conn, owner, sub)?,
        Some(("report", sub)) => commands::reports::handle(&conn, owner, sub)?,
        Some(("category", sub)) => commands::categories::handle(sub)?,
        Some(("export", sub)) => commands::exporter::handle(&conn, owner, sub)?,
        Some(("import", sub)) => commands::importer::handle(&mut conn, owner, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&conn, owner)?,
        Some(("config", sub)) => commands::config::handle(&conn, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
