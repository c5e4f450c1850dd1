use std::env;

use anyhow::{Context, Result};
use tracing::warn;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use seolens_cli::{
    CliCommand, analyze, parse_arguments, print_help, print_version, render_json, render_report,
    save_output,
};
use seolens_core::{AdvisorConfig, GeminiAdvisor, HttpPageProvider, ProviderConfig};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "seolens=info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let raw_args = env::args().skip(1).collect::<Vec<_>>();
    let options = match parse_arguments(&raw_args)? {
        CliCommand::Run(options) => options,
        CliCommand::Help => {
            print_help();
            return Ok(());
        }
        CliCommand::Version => {
            print_version();
            return Ok(());
        }
    };

    let provider = HttpPageProvider::new(&ProviderConfig::from_env())
        .context("failed to set up page fetching")?;
    let advisor = match GeminiAdvisor::new(AdvisorConfig::from_env()) {
        Ok(advisor) => Some(advisor),
        Err(err) => {
            warn!(error = %err, "AI advisor disabled");
            None
        }
    };

    let analysis = analyze(&provider, advisor.as_ref(), &options).await;
    let text = render_report(&analysis);

    if options.json {
        println!("{}", render_json(&analysis)?);
    } else {
        print!("{text}");
    }

    if let Some(save_base) = options.save_target.as_ref() {
        let output_path = save_output(save_base, &options.url, &text)?;
        // Keep stdout parseable in JSON mode
        if options.json {
            eprintln!("Wrote output to {}", output_path.display());
        } else {
            println!("\nWrote output to {}", output_path.display());
        }
    }

    Ok(())
}
