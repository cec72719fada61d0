use crate::{
    schemas::{decode_payload, schema_for_name},
    types::{destinations_in_region, visa_free_destinations},
    AuthRequest, BackendClient, BackendResponse, ClientConfig, ClientError, ContactRequest,
    FinalizeRequest, GenerateRequest, ModifyRequest, PassportUpload, PayloadSchema,
    TripLogRequest,
};
use anyhow::{anyhow, Context};
use clap::{Arg, ArgMatches, Command};
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use tracing::{error, info};

fn payload_command(name: &'static str, about: &'static str) -> Command {
    Command::new(name).about(about).arg(
        Arg::new("payload")
            .help("Path to a JSON file holding the request body ('-' for stdin)")
            .required(true)
            .index(1),
    )
}

fn auth_command(name: &'static str, about: &'static str) -> Command {
    Command::new(name)
        .about(about)
        .arg(
            Arg::new("email")
                .short('e')
                .long("email")
                .value_name("EMAIL")
                .required(true),
        )
        .arg(
            Arg::new("password")
                .short('p')
                .long("password")
                .value_name("PASSWORD")
                .help("Account password (or set TRIP_PLANNER_PASSWORD env var)"),
        )
}

fn build_command() -> Command {
    Command::new("trip-planner")
        .version("0.1.0")
        .about("Command-line access to the trip-planner travel backend")
        .subcommand_required(true)
        .arg(
            Arg::new("base-url")
                .short('u')
                .long("base-url")
                .value_name("URL")
                .global(true)
                .help("Backend base URL (or set BACKEND_URL env var)"),
        )
        .subcommand(payload_command(
            "log-search",
            "Record a trip search (TripLogRequest)",
        ))
        .subcommand(payload_command(
            "generate",
            "Generate an itinerary (GenerateRequest)",
        ))
        .subcommand(payload_command(
            "modify",
            "Apply an edit to an itinerary (ModifyRequest)",
        ))
        .subcommand(payload_command(
            "finalize",
            "Price an itinerary into packages (FinalizeRequest)",
        ))
        .subcommand(payload_command(
            "contact",
            "Submit a contact message (ContactRequest)",
        ))
        .subcommand(
            Command::new("scan-passport")
                .about("Upload a passport image for scanning")
                .arg(
                    Arg::new("image")
                        .help("Path to the passport image")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(auth_command("signin", "Sign in to an account"))
        .subcommand(auth_command("signup", "Create an account"))
        .subcommand(
            Command::new("schema")
                .about("Print the JSON schema of a request payload")
                .arg(
                    Arg::new("payload")
                        .help("Payload or endpoint name, e.g. GenerateRequest or generate")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(
            Command::new("visa")
                .about("List visa-free destinations")
                .arg(
                    Arg::new("region")
                        .short('r')
                        .long("region")
                        .value_name("REGION")
                        .help("Only show destinations in this region"),
                ),
        )
}

/// CLI entry point for the trip-planner tool
pub async fn run() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let matches = build_command().get_matches();

    let config = match matches.get_one::<String>("base-url") {
        Some(base_url) => ClientConfig::new(base_url.clone()),
        None => ClientConfig::from_env(),
    };
    let client = BackendClient::new(config);
    info!("Base URL: {}", client.base_url());

    let Some((name, sub)) = matches.subcommand() else {
        return Err(anyhow!("a subcommand is required"));
    };

    match dispatch(&client, name, sub).await {
        Ok(()) => Ok(()),
        Err(err) => {
            error!("{} failed: {:#}", name, err);
            if let Some(ClientError::Api { body, .. }) = err.downcast_ref::<ClientError>() {
                eprintln!("{}", serde_json::to_string_pretty(body)?);
            }
            Err(err)
        }
    }
}

async fn dispatch(client: &BackendClient, name: &str, sub: &ArgMatches) -> anyhow::Result<()> {
    match name {
        "log-search" => {
            let request: TripLogRequest = read_payload(sub).await?;
            print_response(&client.log_search(&request).await?)
        }
        "generate" => {
            let request: GenerateRequest = read_payload(sub).await?;
            print_response(client.generate_itinerary(&request).await?.body())
        }
        "modify" => {
            let request: ModifyRequest = read_payload(sub).await?;
            print_response(client.modify_itinerary(&request).await?.body())
        }
        "finalize" => {
            let request: FinalizeRequest = read_payload(sub).await?;
            print_response(client.finalize_packages(&request).await?.body())
        }
        "contact" => {
            let request: ContactRequest = read_payload(sub).await?;
            print_response(&client.send_contact(&request).await?)
        }
        "scan-passport" => {
            let path = required(sub, "image")?;
            let upload = PassportUpload::from_path(path)
                .await
                .with_context(|| format!("reading passport image {path}"))?;
            print_json(&client.upload_passport(upload).await?)
        }
        "signin" => print_response(&client.sign_in(&auth_request(sub)?).await?),
        "signup" => print_response(&client.sign_up(&auth_request(sub)?).await?),
        "schema" => {
            let payload = required(sub, "payload")?;
            let handle = schema_for_name(payload)
                .ok_or_else(|| anyhow!("unknown payload `{payload}`"))?;
            print_json(handle.json())
        }
        "visa" => match sub.get_one::<String>("region") {
            Some(region) => print_json(&destinations_in_region(region)),
            None => print_json(&visa_free_destinations()),
        },
        other => Err(anyhow!("unknown command `{other}`")),
    }
}

fn required<'a>(matches: &'a ArgMatches, id: &str) -> anyhow::Result<&'a str> {
    matches
        .get_one::<String>(id)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("missing argument `{id}`"))
}

async fn read_payload<T: PayloadSchema>(matches: &ArgMatches) -> anyhow::Result<T> {
    let source = required(matches, "payload")?;
    let raw = if source == "-" {
        tokio::task::spawn_blocking(|| std::io::read_to_string(std::io::stdin())).await??
    } else {
        tokio::fs::read_to_string(Path::new(source))
            .await
            .with_context(|| format!("reading payload file {source}"))?
    };

    let value: Value =
        serde_json::from_str(&raw).with_context(|| format!("{source} is not valid JSON"))?;
    Ok(decode_payload::<T>(value)?)
}

fn auth_request(matches: &ArgMatches) -> anyhow::Result<AuthRequest> {
    let email = required(matches, "email")?;
    let password = matches
        .get_one::<String>("password")
        .cloned()
        .or_else(|| std::env::var("TRIP_PLANNER_PASSWORD").ok())
        .ok_or_else(|| {
            anyhow!("a password is required. Use --password or set TRIP_PLANNER_PASSWORD")
        })?;
    Ok(AuthRequest::new(email, password))
}

fn print_response(response: &BackendResponse) -> anyhow::Result<()> {
    match response {
        BackendResponse::Json(value) => print_json(value),
        BackendResponse::Text(text) => {
            println!("{}", text);
            Ok(())
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
