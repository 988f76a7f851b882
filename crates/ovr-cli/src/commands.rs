//! Command implementations.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use chrono::NaiveDate;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{CellAlignment, ContentArrangement, Table};
use tracing::info;

use ovr_pa::{PaRegistration, PaSession, Signature, SignatureFormat};

use crate::cli::{Cli, RegisterArgs};
use crate::transport::HttpTransport;

/// Build a ready session from the global flags.
fn open_session(cli: &Cli) -> Result<PaSession<HttpTransport>> {
    let api_key = cli
        .api_key
        .as_deref()
        .ok_or_else(|| anyhow!("an API key is required (--api-key or OVR_API_KEY)"))?;
    let transport = HttpTransport::new()?;
    let mut session = PaSession::new(transport, api_key, !cli.production)
        .with_language(cli.language);
    session.setup().context("session setup failed")?;
    Ok(session)
}

pub fn run_election_info(cli: &Cli) -> Result<()> {
    let session = open_session(cli)?;
    let info = session.election_info()?;
    println!("{}", serde_json::to_string_pretty(&info)?);
    Ok(())
}

pub fn run_constants(cli: &Cli) -> Result<()> {
    let session = open_session(cli)?;
    println!("{}", serde_json::to_string_pretty(session.constants()?)?);
    Ok(())
}

pub fn run_counties(cli: &Cli) -> Result<()> {
    let session = open_session(cli)?;
    let counties = session.fetch_counties_and_municipalities()?;

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["ID", "County", "Municipalities"]);
    for county in &counties {
        table.add_row(vec![
            county.county_id.clone(),
            county.county_name.clone(),
            county.municipalities.len().to_string(),
        ]);
    }
    if let Some(column) = table.column_mut(2) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    println!("{table}");
    Ok(())
}

/// Submit the canned test registration the staging API expects.
pub fn run_register(cli: &Cli, args: &RegisterArgs) -> Result<()> {
    if cli.production {
        bail!("the canned test registration only makes sense against staging");
    }
    let session = open_session(cli)?;

    let mut request = PaRegistration {
        first_name: "Sally".to_string(),
        last_name: "Penndot".to_string(),
        suffix: Some("XIV".to_string()),
        date_of_birth: NaiveDate::from_ymd_opt(1944, 5, 2)
            .ok_or_else(|| anyhow!("invalid canned date of birth"))?,
        address1: "123 A St".to_string(),
        city: "Clarion".to_string(),
        county: "Clarion".to_string(),
        zipcode: "16214".to_string(),
        gender: Some("female".to_string()),
        party: "Democrat".to_string(),
        federal_voter: Some(true),
        united_states_citizen: true,
        eighteen_on_election_day: true,
        declaration: true,
        ..PaRegistration::default()
    };
    if args.with_dl {
        request.dl_number = Some("99007069".to_string());
    }
    if args.with_ssn {
        request.ssn4 = Some("1234".to_string());
    }
    if let Some(path) = &args.signature {
        request.signature = Some(read_signature(path)?);
    }

    let receipt = session.register(&request)?;
    info!(application_id = %receipt.application_id, "registration accepted");
    println!("{}", serde_json::to_string_pretty(&serde_json::json!({
        "application_id": receipt.application_id,
        "application_date": receipt.application_date,
        "signature_source": receipt.signature_source,
    }))?);
    Ok(())
}

/// Load a signature image, inferring the format from the file extension.
fn read_signature(path: &Path) -> Result<Signature> {
    let format: SignatureFormat = path
        .extension()
        .and_then(|e| e.to_str())
        .ok_or_else(|| anyhow!("signature file {} has no extension", path.display()))?
        .parse()?;
    let data = fs::read(path)
        .with_context(|| format!("failed to read signature file {}", path.display()))?;
    Ok(Signature::new(data, format))
}
