use anyhow::Result;
use base64::{engine::general_purpose, Engine as _};
use clap::{Parser, Subcommand};
use skillnest_upload::utils::{logger, validation::Validate};
use skillnest_upload::{
    handle_request, GatewayConfig, GatewayRequest, GithubContents, MediaConfig, MediaFile,
    MediaUploader,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "skillnest-upload")]
#[command(about = "Course file uploads: GitHub-backed content gateway and media host client")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[arg(long, global = true, help = "Enable verbose output")]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Upload a local file into the content repository.
    UploadFile {
        #[arg(long, help = "Destination path inside the repository")]
        path: String,

        #[arg(long, help = "Local file to upload")]
        file: PathBuf,

        #[arg(long, help = "Commit message (defaults to 'Upload <path>')")]
        message: Option<String>,
    },
    /// Append a course record to the published course list.
    AddCourse {
        #[arg(long, help = "Course record as JSON, e.g. '{\"id\":1,\"title\":\"Rust\"}'")]
        course: String,
    },
    /// Print the published course list.
    GetCourses,
    /// Upload a media file to the media host.
    UploadMedia {
        #[arg(long, help = "Local file to upload")]
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init_cli_logger(cli.verbose);

    match cli.command {
        Command::UploadMedia { file } => upload_media(file).await,
        command => run_gateway(command).await,
    }
}

async fn run_gateway(command: Command) -> Result<()> {
    let body = match command {
        Command::UploadFile {
            path,
            file,
            message,
        } => {
            let bytes = std::fs::read(&file)?;
            serde_json::json!({
                "action": "upload-file",
                "path": path,
                "content": general_purpose::STANDARD.encode(bytes),
                "message": message,
            })
        }
        Command::AddCourse { course } => {
            let course: serde_json::Value = serde_json::from_str(&course)?;
            serde_json::json!({ "action": "update-courses", "courseData": course })
        }
        Command::GetCourses => serde_json::json!({ "action": "get-courses" }),
        Command::UploadMedia { .. } => unreachable!("handled in main"),
    };

    let store = GatewayConfig::from_env().and_then(|config| {
        config.validate()?;
        Ok(GithubContents::new(config))
    });
    let response = handle_request(&GatewayRequest::post(&body), store).await;

    let body = response.body.unwrap_or_default();
    if response.status < 300 {
        println!("{}", serde_json::to_string_pretty(&body)?);
        Ok(())
    } else {
        eprintln!("❌ request failed ({}): {}", response.status, body);
        std::process::exit(1);
    }
}

async fn upload_media(file: PathBuf) -> Result<()> {
    let config = MediaConfig::from_env()?;
    config.validate()?;

    let uploader = MediaUploader::new(config);
    let upload = uploader.upload(MediaFile::from_path(&file)?).await?;
    println!("{}", serde_json::to_string_pretty(&upload)?);
    Ok(())
}
