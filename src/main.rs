use clap::Parser;
use std::path::Path;
use tb_statements::domain::ports::ArtifactSink;
use tb_statements::utils::{logger, validation::Validate};
use tb_statements::{CliConfig, LocalArtifacts, MistralClient, StatementBundle, StatementEngine};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting tb-statements");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    // Missing credential is a precondition failure: the pipeline never starts.
    let api_key = match config.resolved_api_key() {
        Ok(key) => key,
        Err(e) => {
            tracing::error!("❌ {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    let completion = MistralClient::new(api_key)
        .with_model(config.model.clone())
        .with_base_url(config.api_base_url.clone());
    let artifacts = LocalArtifacts::new(config.output_path.clone());
    let engine = StatementEngine::new(completion, artifacts.clone());

    match engine.run(Path::new(&config.input)).await {
        Ok(bundle) => {
            write_outputs(&artifacts, &bundle).await?;
            print_bundle(&bundle);
            println!("✅ Financial statements generated successfully!");
            println!("📁 Output saved to: {}", config.output_path);
        }
        Err(e) => {
            tracing::error!("❌ Pipeline failed: {}", e);
            // One generic message to the caller; stage detail stays in the logs.
            eprintln!("❌ Error: {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}

async fn write_outputs(
    artifacts: &LocalArtifacts,
    bundle: &StatementBundle,
) -> tb_statements::Result<()> {
    artifacts
        .write_artifact(
            "profit_and_loss.md",
            render_document(&bundle.profit_and_loss).as_bytes(),
        )
        .await?;
    artifacts
        .write_artifact(
            "balance_sheet.md",
            render_document(&bundle.balance_sheet).as_bytes(),
        )
        .await?;
    Ok(())
}

fn render_document(statement: &tb_statements::RenderedStatement) -> String {
    match &statement.explanation {
        Some(explanation) => format!("{}\n\n**ℹ️ Explanation:**\n\n{}\n", statement.body, explanation),
        None => format!("{}\n", statement.body),
    }
}

fn print_bundle(bundle: &StatementBundle) {
    println!("\n🧾 Profit & Loss Statement\n");
    println!("{}", render_document(&bundle.profit_and_loss));
    println!("Net profit: {}", bundle.net_profit);
    println!("\n📑 Balance Sheet\n");
    println!("{}", render_document(&bundle.balance_sheet));
}
