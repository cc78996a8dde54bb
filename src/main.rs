use std::error::Error;
use std::process::ExitCode;

use clap::Parser;
use log::{error, warn};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use dropmaker::config::Config;
use dropmaker::drop::builder::{spec_for_blocks, spec_for_dataset_paths};
use dropmaker::metadata::MemoryMetadata;
use dropmaker::sitedb::{phedex_node_to_cms_name, SiteDb, SE_NODE_MAP_REPORT};
use dropmaker::InjectionSpec;

mod cli;
use crate::cli::Cli;
use crate::cli::Commands;
use crate::cli::Output;
use crate::cli::SiteQuery;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = Config::load(cli.config.as_deref())?;

    let pick_service = |service: Option<String>| {
        service
            .or_else(|| config.drop.service.clone())
            .ok_or("no service given, pass --service or set drop.service in the config")
    };

    match cli.command {
        Commands::Blocks {
            service,
            dataset,
            metadata,
            output,
            blocks,
        } => {
            let service = pick_service(service)?;
            let source = MemoryMetadata::from_path(&metadata)?;
            let spec = spec_for_blocks(&source, &service, &dataset, &blocks)?;
            emit(&spec, &output)
        }
        Commands::Datasets {
            service,
            output,
            paths,
        } => {
            let service = pick_service(service)?;
            emit(&spec_for_dataset_paths(&service, &paths), &output)
        }
        Commands::Site { clear_cache, query } => {
            let sitedb = SiteDb::from_config(&config.sitedb)?;
            if clear_cache {
                sitedb.clear_cache()?;
            }

            match query {
                SiteQuery::CmsToCe { name } => print_lines(sitedb.cms_name_to_ce(&name)?),
                SiteQuery::CmsToSe { name } => print_lines(sitedb.cms_name_to_se(&name)?),
                SiteQuery::CeToCms { host } => print_lines(sitedb.ce_to_cms_name(&host)?),
                SiteQuery::SeToCms { host } => print_lines(sitedb.se_to_cms_name(&host)?),
                SiteQuery::CmsToNode { name } => match sitedb.cms_name_to_phedex_node(&name)? {
                    Some(nodes) => print_lines(nodes),
                    None => warn!("No CMS site called {}", name),
                },
                SiteQuery::NodeToCms { node } => println!("{}", phedex_node_to_cms_name(&node)),
                SiteQuery::AllCe => print_lines(sitedb.all_ce_names()?),
                SiteQuery::AllSe => print_lines(sitedb.all_se_names()?),
                SiteQuery::AllCms => print_lines(sitedb.all_cms_names()?),
                SiteQuery::User { dn } => println!("{}", sitedb.dn_user_name(&dn)?),
                SiteQuery::Groups { dn } => {
                    for row in sitedb.group_responsibilities(&dn)? {
                        println!("{}", serde_json::to_string(&row)?);
                    }
                }
                SiteQuery::SeNodeMap => println!("{}", sitedb.load_report(SE_NODE_MAP_REPORT)?),
            }
            Ok(())
        }
    }
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{}", line);
    }
}

fn emit(spec: &InjectionSpec, output: &Output) -> Result<(), Box<dyn Error>> {
    let path = match &output.output {
        None => {
            print!("{}", spec.to_xml()?);
            return Ok(());
        }
        Some(p) if output.stamp => {
            let stamp = OffsetDateTime::now_utc().format(&Rfc3339)?;
            p.join(format!("drop-{}.xml", stamp))
        }
        Some(p) => p.clone(),
    };

    spec.write_to_file(&path)?;
    Ok(())
}
