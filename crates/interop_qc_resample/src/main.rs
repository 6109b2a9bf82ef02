use std::path::PathBuf;
use std::process::exit;

use clap::{Parser, Subcommand};
use serde_json::json;

mod icav2;
mod resample;
mod upload;

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "resample_multiqc",
    about = "Rewrite sample names in a MultiQC parquet report and push it to ICAv2"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replace a sample name throughout a MultiQC parquet report
    UpdateSampleNames {
        /// Path of the parquet file to rewrite
        #[arg(long)]
        input_parquet_file: PathBuf,
        /// Output path; may be the same as the input file
        #[arg(long)]
        output_parquet_file: PathBuf,
        /// Sample name to be replaced
        #[arg(long)]
        old_sample_name: String,
        /// Replacement sample name
        #[arg(long)]
        new_sample_name: String,
    },
    /// Upload a parquet report into an ICAv2 destination folder
    Upload {
        /// Local file to upload
        #[arg(long)]
        input_file: PathBuf,
        /// Destination object URI; the file lands in its parent folder
        #[arg(long)]
        output_uri: String,
        #[arg(
            long,
            env = "ICAV2_BASE_URL",
            default_value = "https://ica.illumina.com/ica/rest"
        )]
        icav2_base_url: String,
        #[arg(long, env = "ICAV2_ACCESS_TOKEN", hide_env_values = true)]
        icav2_access_token: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let outcome = match cli.command {
        Commands::UpdateSampleNames {
            input_parquet_file,
            output_parquet_file,
            old_sample_name,
            new_sample_name,
        } => resample::update_sample_names_in_parquet(
            &input_parquet_file,
            &output_parquet_file,
            &old_sample_name,
            &new_sample_name,
        )
        .map(|rows_rewritten| {
            log_info(
                "sample_names_updated",
                json!({
                    "output_parquet_file": output_parquet_file.display().to_string(),
                    "old_sample_name": old_sample_name,
                    "new_sample_name": new_sample_name,
                    "rows_rewritten": rows_rewritten,
                }),
            );
        }),
        Commands::Upload {
            input_file,
            output_uri,
            icav2_base_url,
            icav2_access_token,
        } => {
            let client = icav2::Icav2Client::new(&icav2_base_url, icav2_access_token);
            upload::upload_parquet_file(&client, &input_file, &output_uri).map(|summary| {
                log_info(
                    "upload_completed",
                    json!({
                        "destination_folder": summary.destination_folder,
                        "bytes_uploaded": summary.bytes_uploaded,
                        "sha256": summary.sha256,
                    }),
                );
            })
        }
    };

    if let Err(message) = outcome {
        log_error("task_failed", json!({"error": message}));
        exit(1);
    }
}

fn log_info(event: &str, details: serde_json::Value) {
    eprintln!(
        "{}",
        json!({
            "component": "resample_multiqc",
            "event": event,
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "details": details,
        })
    );
}

fn log_error(event: &str, details: serde_json::Value) {
    eprintln!(
        "{}",
        json!({
            "component": "resample_multiqc",
            "level": "error",
            "event": event,
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "details": details,
        })
    );
}
