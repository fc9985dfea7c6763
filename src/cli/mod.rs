//! Admin CLI over the family profile store.
//! - Reads one command from the process arguments
//! - Prints results as pretty JSON

use anyhow::{bail, Context, Result};
use serde::Serialize;
use serde_json::Value;

use crate::backend::patch::patchable_fields;
use crate::backend::FamilyProfileService;
use crate::database::models::FamilyProfile;

pub mod util;

use util::{fmt_optional_money, parse_id};

const USAGE: &str = "usage: finwise-profiles <list | show <id> | user <user_id> | patch <id> <json> | delete <id>>";

pub async fn run(service: &FamilyProfileService, args: &[String]) -> Result<()> {
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    match args.as_slice() {
        ["list"] => {
            for profile in service.list().await? {
                println!(
                    "#{:<5} user={:<5} size={:<3} income={:<10} expenses={:<10} {}",
                    profile.id.unwrap_or_default(),
                    profile.user_id.map(|u| u.to_string()).unwrap_or_else(|| "-".into()),
                    profile.family_size.map(|s| s.to_string()).unwrap_or_else(|| "-".into()),
                    fmt_optional_money(profile.monthly_income.as_ref()),
                    fmt_optional_money(profile.monthly_expenses.as_ref()),
                    profile.location.as_deref().unwrap_or(""),
                );
            }
        }
        ["show", id] => print_json(&service.get_by_id(parse_id(id)?).await?)?,
        ["user", user_id] => print_json(&service.get_by_user_id(Some(parse_id(user_id)?)).await?)?,
        ["patch", id, body] => {
            let updates = match serde_json::from_str::<Value>(body).context("patch body is not JSON")? {
                Value::Object(map) => map,
                _ => bail!(
                    "patch body must be a JSON object with any of: {}",
                    patchable_fields::<FamilyProfile>().collect::<Vec<_>>().join(", ")
                ),
            };
            match service.patch_partial(parse_id(id)?, &updates).await? {
                Some(profile) => print_json(&profile)?,
                None => println!("No family profile with id {id}"),
            }
        }
        ["delete", id] => {
            service.delete(parse_id(id)?).await?;
            println!("Deleted family profile {id}");
        }
        _ => bail!(USAGE),
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
