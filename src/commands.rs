use std::path::Path;

use anyhow::Result;
use tracing::info;

use crate::client::ActivitiesClient;
use crate::config;
use crate::models::Activity;

pub async fn run_list(server: &str, verbose: bool) -> Result<()> {
    let client = ActivitiesClient::new(server)?;
    let activities = client.list().await?;

    if verbose {
        println!("{}", serde_json::to_string_pretty(&activities)?);
        return Ok(());
    }

    if activities.is_empty() {
        println!("No activities available.");
        return Ok(());
    }
    for (name, activity) in &activities {
        print!("{}", format_activity(name, activity));
    }
    Ok(())
}

pub async fn run_signup(server: &str, activity: &str, email: &str) -> Result<()> {
    let client = ActivitiesClient::new(server)?;
    let msg = client.signup(activity, email).await?;
    info!("Signup accepted by {}", server);
    println!("{}", msg);
    Ok(())
}

pub async fn run_unregister(server: &str, activity: &str, email: &str) -> Result<()> {
    let client = ActivitiesClient::new(server)?;
    let msg = client.unregister(activity, email).await?;
    info!("Unregister accepted by {}", server);
    println!("{}", msg);
    Ok(())
}

/// Validate a catalog and print it without starting the server.
pub fn run_catalog(config_path: Option<&Path>) -> Result<()> {
    let cfg = config::resolve_config(config_path)?;
    let source = config_path
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "built-in catalog".to_string());
    println!("{} activities in {}:\n", cfg.activities.len(), source);
    for entry in &cfg.activities {
        print!("{}", format_activity(&entry.name, &entry.to_activity()));
    }
    Ok(())
}

fn format_activity(name: &str, activity: &Activity) -> String {
    let mut out = format!(
        "{}\n  {}\n  Schedule: {}\n  Availability: {} spots left ({}/{})\n",
        name,
        activity.description,
        activity.schedule,
        activity.spots_left(),
        activity.participants.len(),
        activity.max_participants
    );
    if activity.participants.is_empty() {
        out.push_str("  No participants yet\n");
    } else {
        out.push_str("  Participants:\n");
        for p in &activity.participants {
            out.push_str(&format!("    - {}\n", p));
        }
    }
    out.push('\n');
    out
}
